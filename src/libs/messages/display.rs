//! Display implementation for opslog application messages.
//!
//! Converts structured `Message` variants into the human-readable text shown
//! on the terminal. All user-facing wording lives here, in one place, so the
//! rest of the code never embeds display strings.

use super::types::Message;
use crate::libs::formatter::format_minutes;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === DISPLACEMENT ===
            Message::DisplacementStarted => "Displacement started".to_string(),
            Message::DisplacementFinished { distance_km, minutes } => {
                format!("Displacement finished! Distance: {:.1} km, time: {}", distance_km, format_minutes(*minutes))
            }
            Message::DisplacementAbandoned => "Displacement abandoned, nothing was recorded".to_string(),

            // === MOBILIZATION / DEMOBILIZATION ===
            Message::MobilizationStarted => "Mobilization started".to_string(),
            Message::MobilizationFinished(minutes) => format!("Mobilization finished! Duration: {}", format_minutes(*minutes)),
            Message::MobilizationAbandoned => "Mobilization abandoned, nothing was recorded".to_string(),
            Message::DemobilizationStarted => "Demobilization started".to_string(),
            Message::DemobilizationFinished(minutes) => format!("Demobilization finished! Duration: {}", format_minutes(*minutes)),
            Message::DemobilizationAbandoned => "Demobilization abandoned, nothing was recorded".to_string(),
            Message::TotalOperationTime(minutes) => format!("Total operation time: {}", format_minutes(*minutes)),

            // === OPERATION ===
            Message::OperationStarted => "Operation started".to_string(),
            Message::OperationSaved(id) => format!("Operation saved (id {})", id),
            Message::OperationDraftAbandoned => "Operation draft abandoned".to_string(),
            Message::PreviousOperationStillOpen => "The previous operation was never demobilized; starting a new one anyway".to_string(),

            // === WAITING ===
            Message::WaitingStarted => "Waiting period started".to_string(),
            Message::WaitingReasonAdded => "Reason recorded".to_string(),
            Message::WaitingFinished { minutes, total } => {
                format!("Waiting period finished! Duration: {}, total waiting: {}", format_minutes(*minutes), format_minutes(*total))
            }
            Message::WaitingAbandoned => "Waiting period abandoned, nothing was recorded".to_string(),

            // === LUNCH ===
            Message::LunchStarted => "Lunch break started".to_string(),
            Message::LunchFinished { minutes, total } => {
                format!("Lunch break finished! Duration: {}, total lunch: {}", format_minutes(*minutes), format_minutes(*total))
            }
            Message::LunchAbandoned => "Lunch break abandoned, nothing was recorded".to_string(),

            // === REFUELING ===
            Message::RefuelingStarted(fuel) => format!("{} refueling started", fuel),
            Message::RefuelingFinished { fuel, minutes, total } => {
                format!("{} refueling finished! Duration: {}, total refueling: {}", fuel, format_minutes(*minutes), format_minutes(*total))
            }
            Message::RefuelingAbandoned => "Refueling abandoned, nothing was recorded".to_string(),

            // === HISTORY ===
            Message::HistoryTitle(count) => format!("Operation history ({} operations)", count),
            Message::HistoryEmpty => "No operations recorded yet".to_string(),
            Message::ConfirmClearHistory(count) => {
                format!("This will delete all {} recorded operations and the current session. Continue?", count)
            }
            Message::HistoryCleared => "History cleared".to_string(),
            Message::ClearCancelled => "Clear cancelled, nothing was deleted".to_string(),
            Message::HistoryEntriesDropped(count) => {
                format!("{} corrupted history entries were skipped; they will be removed on the next save", count)
            }

            // === STATUS ===
            Message::StatusTitle => "Current session".to_string(),
            Message::NoActivePhases => "No phase is currently active".to_string(),
            Message::WatchStopHint => "Watching (refresh every second, press Ctrl+C to stop)".to_string(),

            // === REPORT / EXPORT ===
            Message::NoOperationsForReport => "There are no operations to report".to_string(),
            Message::ReportSaved(path) => format!("Report written to {}", path),
            Message::ExportSaved(path) => format!("Data exported to {}", path),

            // === SYNC ===
            Message::MirrorNotConfigured => "Remote mirror is not configured; run 'opslog init' first".to_string(),
            Message::SyncQueueEmpty => "Sync queue is empty, nothing to push".to_string(),
            Message::SyncPushing(count) => format!("Pushing {} queued operations to the remote mirror...", count),
            Message::SyncFinished { pushed, kept } => {
                if *kept == 0 {
                    format!("Synced {} operations", pushed)
                } else {
                    format!("Synced {} operations, {} kept in the queue after failures", pushed, kept)
                }
            }
            Message::SyncItemFailed { id, reason } => format!("Failed to push operation {}: {}", id, reason),

            // === CONFIGURATION ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleProfile => "Operator profile".to_string(),
            Message::ConfigModuleMirror => "Remote mirror".to_string(),
            Message::ConfigModuleStorage => "Storage options".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptProfileName => "Operator name".to_string(),
            Message::PromptProfileRegistration => "Registration number".to_string(),
            Message::PromptProfileAuxiliar => "Auxiliary name".to_string(),
            Message::PromptProfileVehiclePlate => "Vehicle plate".to_string(),
            Message::PromptMirrorApiUrl => "Mirror API base URL".to_string(),
            Message::PromptMirrorAuthToken => "Mirror auth token".to_string(),
            Message::PromptMirrorCollection => "Mirror collection name".to_string(),
            Message::PromptRewriteOnLoad => "Rewrite repaired history back to disk on load?".to_string(),

            // === PERSISTENCE ===
            Message::PersistFailed(err) => {
                format!("Failed to persist state ({}); the change is applied in memory but may be lost", err)
            }

            // === GENERIC ===
            Message::Custom(text) => text.clone(),
        };

        write!(f, "{}", text)
    }
}
