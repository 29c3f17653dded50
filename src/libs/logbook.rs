//! The logbook controller: one explicit state object owning the session and
//! the operation history.
//!
//! Every command loads a `Logbook`, applies a single transition and persists
//! it. All cross-phase invariants live here:
//!
//! - mobilization needs a completed displacement;
//! - demobilization needs a saved operation, and its close writes the
//!   interval onto the current aggregate and ends the cycle;
//! - waiting/lunch/refueling attach to the current aggregate, resolved by
//!   its explicit id (never by "last element"), and require one to exist;
//! - rejected transitions leave both the session and the history untouched.

use crate::libs::displacement::DisplacementSummary;
use crate::libs::error::{LogbookError, Phase};
use crate::libs::operation::{Operation, OperationInput};
use crate::libs::subevents::FuelType;
use crate::store::history::HistoryStore;
use crate::store::session::Session;
use anyhow::Result;
use chrono::NaiveDateTime;

/// What a closed sub-event reports back: its own duration and the updated
/// running total on the aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubEventSummary {
    pub duration_minutes: f64,
    pub total_minutes: f64,
}

/// Result of a demobilization close: the cycle is over.
#[derive(Debug, Clone)]
pub struct CycleClose {
    pub duration_minutes: f64,
    /// Mobilization + demobilization, when both were recorded.
    pub total_minutes: Option<f64>,
    /// The finished aggregate, ready for the sync queue.
    pub operation: Operation,
}

pub struct Logbook {
    session: Session,
    history: HistoryStore,
}

impl Logbook {
    pub fn load() -> Result<Self> {
        Ok(Logbook {
            session: Session::load()?,
            history: HistoryStore::load()?,
        })
    }

    pub fn new(session: Session, history: HistoryStore) -> Self {
        Logbook { session, history }
    }

    /// Writes both documents back. The in-memory state is not rolled back on
    /// failure; callers surface the error as a warning.
    pub fn persist(&self) -> Result<()> {
        self.history.save()?;
        self.session.save()?;
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// The aggregate sub-events and demobilization attach to, if any.
    pub fn current_operation(&self) -> Option<&Operation> {
        let id = self.session.current_operation_id.as_deref()?;
        self.history.operation(id)
    }

    // === Displacement ===

    pub fn start_displacement(
        &mut self,
        origin: &str,
        destination: &str,
        start_km: &str,
        now: NaiveDateTime,
    ) -> Result<(), LogbookError> {
        self.session.displacement.start(origin, destination, start_km, now)
    }

    pub fn end_displacement(&mut self, end_km: &str, now: NaiveDateTime) -> Result<DisplacementSummary, LogbookError> {
        self.session.displacement.end(end_km, now)
    }

    pub fn abandon_displacement(&mut self) {
        self.session.displacement.abandon();
    }

    // === Mobilization ===

    pub fn start_mobilization(&mut self, now: NaiveDateTime) -> Result<(), LogbookError> {
        if !self.session.displacement.is_completed() {
            return Err(LogbookError::DisplacementNotCompleted);
        }
        self.session.mobilization.begin(Phase::Mobilization, now)
    }

    pub fn end_mobilization(&mut self, now: NaiveDateTime) -> Result<f64, LogbookError> {
        self.session.mobilization.close(Phase::Mobilization, now)
    }

    pub fn abandon_mobilization(&mut self) {
        self.session.mobilization.reset();
    }

    // === Operation draft ===

    /// Opens a draft. Returns true when a previously saved operation is
    /// still waiting for demobilization, so the caller can warn about the
    /// abandon-and-start-new flow.
    pub fn start_operation(&mut self, now: NaiveDateTime) -> Result<bool, LogbookError> {
        if self.session.draft_started_at.is_some() {
            return Err(LogbookError::OperationAlreadyStarted);
        }
        let previous_open = self.session.operation_saved;
        self.session.draft_started_at = Some(now);
        Ok(previous_open)
    }

    /// Validates the draft, freezes the snapshot and appends it to the
    /// history. The new aggregate becomes the mutation target for
    /// sub-events and demobilization.
    pub fn save_operation(&mut self, input: &OperationInput, now: NaiveDateTime) -> Result<&Operation, LogbookError> {
        let start_time = self.session.draft_started_at.ok_or(LogbookError::OperationNotStarted)?;
        input.validate()?;

        let operation = Operation::from_save(input, &self.session.displacement, &self.session.mobilization, start_time, now);
        let id = operation.id.clone();
        self.history.push(operation);
        self.session.operation_saved = true;
        self.session.current_operation_id = Some(id);
        self.session.draft_started_at = None;

        Ok(self.history.last().expect("operation was just appended"))
    }

    pub fn abandon_operation_draft(&mut self) {
        self.session.draft_started_at = None;
    }

    // === Demobilization ===

    pub fn start_demobilization(&mut self, now: NaiveDateTime) -> Result<(), LogbookError> {
        if !self.session.operation_saved {
            return Err(LogbookError::NoSavedOperation);
        }
        self.session.demobilization.begin(Phase::Demobilization, now)
    }

    /// Closes demobilization, writes it onto the current aggregate and ends
    /// the operating cycle. The last displacement snapshot is kept for
    /// reference; every other tracker resets for the next cycle.
    pub fn end_demobilization(&mut self, now: NaiveDateTime) -> Result<CycleClose, LogbookError> {
        let id = self.session.current_operation_id.clone().ok_or(LogbookError::NoSavedOperation)?;
        if self.history.operation(&id).is_none() {
            return Err(LogbookError::NoSavedOperation);
        }

        let duration = self.session.demobilization.close(Phase::Demobilization, now)?;

        let demobilization = self.session.demobilization.clone();
        let mobilization = self.session.mobilization.clone();
        let operation = self
            .history
            .operation_mut(&id)
            .expect("current operation checked above");
        operation.demobilization = demobilization;
        // A mobilization closed after the save never reached the aggregate;
        // backfill it so the report keeps the recorded interval.
        if operation.mobilization.is_idle() && mobilization.is_closed() {
            operation.mobilization = mobilization;
        }
        let total = operation.total_operation_minutes();
        let closed = operation.clone();

        self.session.mobilization.reset();
        self.session.demobilization.reset();
        self.session.waiting.abandon();
        self.session.lunch.abandon();
        self.session.refueling.abandon();
        self.session.draft_started_at = None;
        self.session.operation_saved = false;
        self.session.current_operation_id = None;

        Ok(CycleClose {
            duration_minutes: duration,
            total_minutes: total,
            operation: closed,
        })
    }

    pub fn abandon_demobilization(&mut self) {
        self.session.demobilization.reset();
    }

    // === Sub-events ===

    fn require_current_operation(&self) -> Result<String, LogbookError> {
        let id = self.session.current_operation_id.clone().ok_or(LogbookError::NoSavedOperation)?;
        if self.history.operation(&id).is_none() {
            return Err(LogbookError::NoSavedOperation);
        }
        Ok(id)
    }

    pub fn start_waiting(&mut self, reason: &str, now: NaiveDateTime) -> Result<(), LogbookError> {
        self.require_current_operation()?;
        self.session.waiting.start(reason, now)
    }

    pub fn add_waiting_reason(&mut self, reason: &str, now: NaiveDateTime) -> Result<(), LogbookError> {
        self.session.waiting.add_reason(reason, now)
    }

    pub fn end_waiting(&mut self, now: NaiveDateTime) -> Result<SubEventSummary, LogbookError> {
        let id = self.require_current_operation()?;
        let period = self.session.waiting.end(now)?;
        let duration = period.duration.unwrap_or(0.0);
        let operation = self.history.operation_mut(&id).ok_or(LogbookError::NoSavedOperation)?;
        operation.append_waiting(period);
        Ok(SubEventSummary {
            duration_minutes: duration,
            total_minutes: operation.total_waiting_time.unwrap_or(duration),
        })
    }

    pub fn abandon_waiting(&mut self) {
        self.session.waiting.abandon();
    }

    pub fn start_lunch(&mut self, now: NaiveDateTime) -> Result<(), LogbookError> {
        self.require_current_operation()?;
        self.session.lunch.start(now)
    }

    pub fn end_lunch(&mut self, now: NaiveDateTime) -> Result<SubEventSummary, LogbookError> {
        let id = self.require_current_operation()?;
        let lunch = self.session.lunch.end(now)?;
        let duration = lunch.duration.unwrap_or(0.0);
        let operation = self.history.operation_mut(&id).ok_or(LogbookError::NoSavedOperation)?;
        operation.append_lunch(lunch);
        Ok(SubEventSummary {
            duration_minutes: duration,
            total_minutes: operation.total_lunch_time.unwrap_or(duration),
        })
    }

    pub fn abandon_lunch(&mut self) {
        self.session.lunch.abandon();
    }

    pub fn start_refueling(&mut self, fuel_type: FuelType, now: NaiveDateTime) -> Result<(), LogbookError> {
        self.require_current_operation()?;
        self.session.refueling.start(fuel_type, now)
    }

    pub fn end_refueling(&mut self, now: NaiveDateTime) -> Result<(FuelType, SubEventSummary), LogbookError> {
        let id = self.require_current_operation()?;
        let refueling = self.session.refueling.end(now)?;
        let fuel = refueling.fuel_type;
        let duration = refueling.duration.unwrap_or(0.0);
        let operation = self.history.operation_mut(&id).ok_or(LogbookError::NoSavedOperation)?;
        operation.append_refueling(refueling);
        Ok((
            fuel,
            SubEventSummary {
                duration_minutes: duration,
                total_minutes: operation.total_refueling_time.unwrap_or(duration),
            },
        ))
    }

    pub fn abandon_refueling(&mut self) {
        self.session.refueling.abandon();
    }

    /// Wipes the history and resets the session. The sync queue is handled
    /// by the caller; it belongs to the mirror, not to the history.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.session = Session::default();
    }
}
