//! Operation report generation.
//!
//! A pure transform from the history (read-only) plus the operator profile
//! into one formatted document, as plain monospaced text or as HTML. The
//! document keeps the product's Portuguese field labels; absent values render
//! as the literal "N/A", an absent mobilization/demobilization renders as
//! "não registrada", and a single broken item never aborts the document - it
//! is replaced by a placeholder and generation continues.

use crate::libs::config::ProfileConfig;
use crate::libs::formatter::format_clock;
use crate::libs::interval::TimeInterval;
use crate::libs::operation::Operation;
use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use std::fmt::Write as _;

/// Output flavor of the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Html,
}

const CORRUPTED_ITEM: &str = "Item corrompido ou com dados indisponíveis";

pub struct ReportGenerator {
    profile: ProfileConfig,
    generated_at: NaiveDateTime,
}

impl ReportGenerator {
    pub fn new(profile: ProfileConfig, generated_at: NaiveDateTime) -> Self {
        ReportGenerator { profile, generated_at }
    }

    pub fn render(&self, operations: &[Operation], format: ReportFormat) -> String {
        match format {
            ReportFormat::Text => self.render_text(operations),
            ReportFormat::Html => self.render_html(operations),
        }
    }

    // === Plain text ===

    pub fn render_text(&self, operations: &[Operation]) -> String {
        let mut out = String::new();
        let line = "=".repeat(52);

        let _ = writeln!(out, "{}", line);
        let _ = writeln!(out, "{:^52}", "RELATÓRIO DE OPERAÇÕES");
        let _ = writeln!(out, "Gerado em: {}", self.generated_at.format("%d/%m/%Y %H:%M"));
        let _ = writeln!(out, "{}", line);
        out.push('\n');

        let _ = writeln!(out, "DADOS DO RESPONSÁVEL");
        let _ = writeln!(out, "Nome: {}", text_or_na(&self.profile.name));
        let _ = writeln!(out, "Matrícula: {}", text_or_na(&self.profile.registration));
        let _ = writeln!(out, "Cargo: {}", text_or_na(&self.profile.position));
        let _ = writeln!(out, "Auxiliar: {}", text_or_na(&self.profile.auxiliar_name));
        let _ = writeln!(out, "Placa do Veículo: {}", text_or_na(&self.profile.vehicle_plate));
        out.push('\n');

        let _ = writeln!(out, "Total de operações: {}", operations.len());

        for (index, operation) in operations.iter().enumerate() {
            out.push('\n');
            let _ = writeln!(out, "{}", "-".repeat(52));
            let _ = writeln!(out, "OPERAÇÃO #{}", index + 1);
            let _ = writeln!(out, "{}", "-".repeat(52));
            match operation_text(operation) {
                Ok(body) => out.push_str(&body),
                Err(_) => {
                    let _ = writeln!(out, "{}", CORRUPTED_ITEM);
                }
            }
        }

        out
    }

    // === HTML ===

    pub fn render_html(&self, operations: &[Operation]) -> String {
        let mut out = String::new();
        out.push_str(HTML_HEAD);

        let _ = writeln!(out, "<div class=\"header\">");
        let _ = writeln!(out, "  <div class=\"title\">RELATÓRIO DE OPERAÇÕES</div>");
        let _ = writeln!(
            out,
            "  <div class=\"subtitle\">Gerado em: {}</div>",
            self.generated_at.format("%d/%m/%Y %H:%M")
        );
        let _ = writeln!(out, "</div>");

        let _ = writeln!(out, "<div class=\"user-info\">");
        let _ = writeln!(out, "  <div class=\"user-info-title\">DADOS DO RESPONSÁVEL</div>");
        for (label, value) in [
            ("Nome", &self.profile.name),
            ("Matrícula", &self.profile.registration),
            ("Cargo", &self.profile.position),
            ("Auxiliar", &self.profile.auxiliar_name),
            ("Placa do Veículo", &self.profile.vehicle_plate),
        ] {
            let _ = writeln!(
                out,
                "  <div class=\"user-info-item\"><b>{}:</b> {}</div>",
                label,
                escape_html(text_or_na(value))
            );
        }
        let _ = writeln!(out, "</div>");

        let _ = writeln!(out, "<div class=\"operation-count\">Total de operações: {}</div>", operations.len());

        for (index, operation) in operations.iter().enumerate() {
            let _ = writeln!(out, "<div class=\"operation\">");
            let _ = writeln!(out, "  <div class=\"operation-header\">OPERAÇÃO #{}</div>", index + 1);
            match operation_html(operation) {
                Ok(body) => out.push_str(&body),
                Err(_) => {
                    let _ = writeln!(out, "  <div class=\"section\">{}</div>", CORRUPTED_ITEM);
                }
            }
            let _ = writeln!(out, "</div>");
        }

        out.push_str(HTML_FOOT);
        out
    }
}

// === Per-operation rendering (isolated: an Err becomes a placeholder) ===

fn operation_text(op: &Operation) -> Result<String> {
    check_consistency(op)?;
    let mut out = String::new();

    let _ = writeln!(out, "INFORMAÇÕES BÁSICAS");
    let _ = writeln!(out, "Tipo: {}", text_or_na(&op.op_type));
    let _ = writeln!(out, "Cidade: {}", text_or_na(&op.city));
    let _ = writeln!(out, "Operador: {}", text_or_na(&op.operator));
    let _ = writeln!(out, "Poço/Serviço: {}", text_or_na(&op.well_service));
    if let Some(start) = op.start_time {
        let _ = writeln!(out, "Data Início: {}", start.format("%d/%m/%Y %H:%M:%S"));
    }
    if let Some(end) = op.end_time {
        let _ = writeln!(out, "Data Fim: {}", end.format("%d/%m/%Y %H:%M:%S"));
    }
    out.push('\n');

    let _ = writeln!(out, "DADOS TÉCNICOS");
    if op.volume.is_empty() && op.temperature.is_empty() && op.pressure.is_empty() {
        let _ = writeln!(out, "Dados técnicos não informados");
    } else {
        if !op.volume.is_empty() {
            let _ = writeln!(out, "Volume: {} bbl", op.volume);
        }
        if !op.temperature.is_empty() {
            let _ = writeln!(out, "Temperatura: {} °C", op.temperature);
        }
        if !op.pressure.is_empty() {
            let _ = writeln!(out, "Pressão: {} PSI", op.pressure);
        }
    }
    if !op.activities.is_empty() {
        let _ = writeln!(out, "Atividades: {}", op.activities);
    }
    out.push('\n');

    let _ = writeln!(out, "DESLOCAMENTO");
    if op.origin.is_empty() || op.destination.is_empty() {
        let _ = writeln!(out, "Deslocamento não informado");
    } else {
        let _ = writeln!(out, "Origem: {}", op.origin);
        let _ = writeln!(out, "Destino: {}", op.destination);
        if !op.start_km.is_empty() && !op.end_km.is_empty() {
            let _ = writeln!(out, "KM Inicial: {}", op.start_km);
            let _ = writeln!(out, "KM Final: {}", op.end_km);
        }
        if let Some(distance) = op.distance_km {
            let _ = writeln!(out, "Distância: {:.1} km", distance);
        }
    }
    out.push('\n');

    let _ = writeln!(out, "MOBILIZAÇÃO");
    write_interval_text(&mut out, &op.mobilization, "Mobilização não registrada");
    out.push('\n');

    let _ = writeln!(out, "DESMOBILIZAÇÃO");
    write_interval_text(&mut out, &op.demobilization, "Desmobilização não registrada");

    if !op.waiting_periods.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "PERÍODOS DE AGUARDO");
        for (i, period) in op.waiting_periods.iter().enumerate() {
            let _ = writeln!(
                out,
                "Aguardo {}: {} - {} ({:.0} minutos)",
                i + 1,
                format_clock(period.start_time),
                format_clock(period.end_time),
                period.duration.unwrap_or(0.0)
            );
            for reason in &period.reasons {
                let _ = writeln!(out, "  [{}] {}", format_clock(reason.timestamp), reason.reason);
            }
        }
        if let Some(total) = op.total_waiting_time {
            let _ = writeln!(out, "Tempo Total de Aguardo: {:.0} minutos", total);
        }
    }

    if !op.lunch_breaks.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "INTERVALOS DE ALMOÇO");
        for (i, lunch) in op.lunch_breaks.iter().enumerate() {
            let _ = writeln!(
                out,
                "Almoço {}: {} - {} ({:.0} minutos)",
                i + 1,
                format_clock(lunch.start_time),
                format_clock(lunch.end_time),
                lunch.duration.unwrap_or(0.0)
            );
        }
        if let Some(total) = op.total_lunch_time {
            let _ = writeln!(out, "Tempo Total de Almoço: {:.0} minutos", total);
        }
    }

    if !op.refuelings.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "ABASTECIMENTOS");
        for (i, refueling) in op.refuelings.iter().enumerate() {
            let _ = writeln!(
                out,
                "Abastecimento {} ({}): {} - {} ({:.0} minutos)",
                i + 1,
                refueling.fuel_type,
                format_clock(refueling.start_time),
                format_clock(refueling.end_time),
                refueling.duration.unwrap_or(0.0)
            );
        }
        if let Some(total) = op.total_refueling_time {
            let _ = writeln!(out, "Tempo Total de Abastecimento: {:.0} minutos", total);
        }
    }

    if let Some(total) = op.total_operation_minutes() {
        out.push('\n');
        let _ = writeln!(out, "Tempo Total (Mobilização + Desmobilização): {:.0} minutos", total);
    }

    Ok(out)
}

fn operation_html(op: &Operation) -> Result<String> {
    check_consistency(op)?;
    let mut out = String::new();

    let _ = writeln!(out, "  <div class=\"section\">");
    let _ = writeln!(out, "    <div class=\"section-title\">INFORMAÇÕES BÁSICAS</div>");
    item_row(&mut out, "Tipo", text_or_na(&op.op_type));
    item_row(&mut out, "Cidade", text_or_na(&op.city));
    item_row(&mut out, "Operador", text_or_na(&op.operator));
    item_row(&mut out, "Poço/Serviço", text_or_na(&op.well_service));
    if let Some(start) = op.start_time {
        item_row(&mut out, "Data Início", &start.format("%d/%m/%Y %H:%M:%S").to_string());
    }
    if let Some(end) = op.end_time {
        item_row(&mut out, "Data Fim", &end.format("%d/%m/%Y %H:%M:%S").to_string());
    }
    let _ = writeln!(out, "  </div>");

    let _ = writeln!(out, "  <div class=\"section\">");
    let _ = writeln!(out, "    <div class=\"section-title\">DADOS TÉCNICOS</div>");
    if op.volume.is_empty() && op.temperature.is_empty() && op.pressure.is_empty() {
        let _ = writeln!(out, "    <div>Dados técnicos não informados</div>");
    } else {
        if !op.volume.is_empty() {
            item_row(&mut out, "Volume", &format!("{} bbl", op.volume));
        }
        if !op.temperature.is_empty() {
            item_row(&mut out, "Temperatura", &format!("{} °C", op.temperature));
        }
        if !op.pressure.is_empty() {
            item_row(&mut out, "Pressão", &format!("{} PSI", op.pressure));
        }
    }
    if !op.activities.is_empty() {
        item_row(&mut out, "Atividades", &op.activities);
    }
    let _ = writeln!(out, "  </div>");

    let _ = writeln!(out, "  <div class=\"section\">");
    let _ = writeln!(out, "    <div class=\"section-title\">DESLOCAMENTO</div>");
    if op.origin.is_empty() || op.destination.is_empty() {
        let _ = writeln!(out, "    <div>Deslocamento não informado</div>");
    } else {
        item_row(&mut out, "Origem", &op.origin);
        item_row(&mut out, "Destino", &op.destination);
        if !op.start_km.is_empty() && !op.end_km.is_empty() {
            item_row(&mut out, "KM Inicial", &op.start_km);
            item_row(&mut out, "KM Final", &op.end_km);
        }
        if let Some(distance) = op.distance_km {
            item_row(&mut out, "Distância", &format!("{:.1} km", distance));
        }
    }
    let _ = writeln!(out, "  </div>");

    interval_section_html(&mut out, "MOBILIZAÇÃO", &op.mobilization, "Mobilização não registrada");
    interval_section_html(&mut out, "DESMOBILIZAÇÃO", &op.demobilization, "Desmobilização não registrada");

    if !op.waiting_periods.is_empty() {
        let _ = writeln!(out, "  <div class=\"section\">");
        let _ = writeln!(out, "    <div class=\"section-title\">PERÍODOS DE AGUARDO</div>");
        for (i, period) in op.waiting_periods.iter().enumerate() {
            let _ = writeln!(out, "    <div class=\"subsection waiting\">");
            let _ = writeln!(out, "      <div class=\"subsection-title\">Aguardo {}</div>", i + 1);
            item_row(&mut out, "Início", &format_clock(period.start_time));
            item_row(&mut out, "Fim", &format_clock(period.end_time));
            item_row(&mut out, "Duração", &format!("{:.0} minutos", period.duration.unwrap_or(0.0)));
            for reason in &period.reasons {
                item_row(&mut out, "Motivo", &format!("[{}] {}", format_clock(reason.timestamp), reason.reason));
            }
            let _ = writeln!(out, "    </div>");
        }
        if let Some(total) = op.total_waiting_time {
            let _ = writeln!(out, "    <div class=\"total\">Tempo Total de Aguardo: {:.0} minutos</div>", total);
        }
        let _ = writeln!(out, "  </div>");
    }

    if !op.lunch_breaks.is_empty() {
        let _ = writeln!(out, "  <div class=\"section\">");
        let _ = writeln!(out, "    <div class=\"section-title\">INTERVALOS DE ALMOÇO</div>");
        for (i, lunch) in op.lunch_breaks.iter().enumerate() {
            let _ = writeln!(out, "    <div class=\"subsection lunch\">");
            let _ = writeln!(out, "      <div class=\"subsection-title\">Almoço {}</div>", i + 1);
            item_row(&mut out, "Início", &format_clock(lunch.start_time));
            item_row(&mut out, "Fim", &format_clock(lunch.end_time));
            item_row(&mut out, "Duração", &format!("{:.0} minutos", lunch.duration.unwrap_or(0.0)));
            let _ = writeln!(out, "    </div>");
        }
        if let Some(total) = op.total_lunch_time {
            let _ = writeln!(out, "    <div class=\"total\">Tempo Total de Almoço: {:.0} minutos</div>", total);
        }
        let _ = writeln!(out, "  </div>");
    }

    if !op.refuelings.is_empty() {
        let _ = writeln!(out, "  <div class=\"section\">");
        let _ = writeln!(out, "    <div class=\"section-title\">ABASTECIMENTOS</div>");
        for (i, refueling) in op.refuelings.iter().enumerate() {
            let _ = writeln!(out, "    <div class=\"subsection refueling\">");
            let _ = writeln!(out, "      <div class=\"subsection-title\">Abastecimento {}</div>", i + 1);
            item_row(&mut out, "Tipo", &refueling.fuel_type.to_string());
            item_row(&mut out, "Início", &format_clock(refueling.start_time));
            item_row(&mut out, "Fim", &format_clock(refueling.end_time));
            item_row(&mut out, "Duração", &format!("{:.0} minutos", refueling.duration.unwrap_or(0.0)));
            let _ = writeln!(out, "    </div>");
        }
        if let Some(total) = op.total_refueling_time {
            let _ = writeln!(out, "    <div class=\"total\">Tempo Total de Abastecimento: {:.0} minutos</div>", total);
        }
        let _ = writeln!(out, "  </div>");
    }

    if let Some(total) = op.total_operation_minutes() {
        let _ = writeln!(out, "  <div class=\"section\">");
        let _ = writeln!(
            out,
            "    <div class=\"total\">Tempo Total (Mobilização + Desmobilização): {:.0} minutos</div>",
            total
        );
        let _ = writeln!(out, "  </div>");
    }

    Ok(out)
}

/// The one data shape rendering refuses to paper over: an interval whose end
/// precedes its start (only possible in a tampered or corrupted document).
fn check_consistency(op: &Operation) -> Result<()> {
    for interval in [&op.displacement, &op.mobilization, &op.demobilization] {
        if let (Some(start), Some(end)) = (interval.start, interval.end) {
            if end < start {
                bail!("inconsistent interval: end precedes start");
            }
        }
    }
    Ok(())
}

fn write_interval_text(out: &mut String, interval: &TimeInterval, absent: &str) {
    match interval.duration_minutes {
        Some(duration) => {
            let start = interval.start.map_or_else(|| "N/A".to_string(), |ts| format_clock(ts));
            let end = interval.end.map_or_else(|| "N/A".to_string(), |ts| format_clock(ts));
            let _ = writeln!(out, "Início: {}", start);
            let _ = writeln!(out, "Fim: {}", end);
            let _ = writeln!(out, "Duração: {:.0} minutos", duration);
        }
        None => {
            let _ = writeln!(out, "{}", absent);
        }
    }
}

fn interval_section_html(out: &mut String, title: &str, interval: &TimeInterval, absent: &str) {
    let _ = writeln!(out, "  <div class=\"section\">");
    let _ = writeln!(out, "    <div class=\"section-title\">{}</div>", title);
    match interval.duration_minutes {
        Some(duration) => {
            let start = interval.start.map_or_else(|| "N/A".to_string(), |ts| format_clock(ts));
            let end = interval.end.map_or_else(|| "N/A".to_string(), |ts| format_clock(ts));
            item_row(out, "Início", &start);
            item_row(out, "Fim", &end);
            item_row(out, "Duração", &format!("{:.0} minutos", duration));
        }
        None => {
            let _ = writeln!(out, "    <div>{}</div>", absent);
        }
    }
    let _ = writeln!(out, "  </div>");
}

fn item_row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(
        out,
        "    <div class=\"item-row\"><div class=\"item-label\">{}:</div><div class=\"item-value\">{}</div></div>",
        label,
        escape_html(value)
    );
}

fn text_or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Relatório de Operações</title>
<style>
    body { font-family: Arial, sans-serif; margin: 20px; color: #2c3e50; }
    .header { text-align: center; margin-bottom: 20px; }
    .title { font-size: 22px; font-weight: bold; margin-bottom: 5px; }
    .subtitle { font-size: 14px; color: #7f8c8d; margin-bottom: 15px; }
    .user-info { background-color: #f8f9fa; padding: 15px; border-radius: 5px; margin-bottom: 20px; }
    .user-info-title { font-weight: bold; margin-bottom: 10px; color: #34495e; }
    .user-info-item { margin-bottom: 5px; }
    .operation-count { font-weight: bold; margin: 15px 0; color: #2c3e50; }
    .operation { border: 1px solid #bdc3c7; border-radius: 5px; margin-bottom: 25px; overflow: hidden; }
    .operation-header { background-color: #34495e; color: white; padding: 10px 15px; font-size: 16px; font-weight: bold; }
    .section { padding: 15px; border-bottom: 1px solid #ecf0f1; }
    .section:last-child { border-bottom: none; }
    .section-title { font-weight: bold; margin-bottom: 10px; color: #34495e; border-bottom: 1px solid #ecf0f1; padding-bottom: 5px; }
    .item-row { display: flex; margin-bottom: 5px; }
    .item-label { font-weight: bold; min-width: 120px; color: #7f8c8d; }
    .item-value { flex: 1; }
    .subsection { background-color: #f9f9f9; padding: 10px; border-radius: 5px; margin-bottom: 10px; }
    .subsection-title { font-weight: bold; color: #2c3e50; margin-bottom: 5px; }
    .total { font-weight: bold; text-align: right; margin-top: 10px; color: #e74c3c; }
    .waiting { border-left: 3px solid #e74c3c; padding-left: 10px; }
    .lunch { border-left: 3px solid #e67e22; padding-left: 10px; }
    .refueling { border-left: 3px solid #f39c12; padding-left: 10px; }
    .footer { text-align: center; margin-top: 30px; padding-top: 15px; border-top: 1px solid #bdc3c7; color: #7f8c8d; font-size: 12px; }
</style>
</head>
<body>
"#;

const HTML_FOOT: &str = r#"<div class="footer">Documento gerado pelo opslog</div>
</body>
</html>
"#;
