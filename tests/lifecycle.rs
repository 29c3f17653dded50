#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use opslog::libs::error::{LogbookError, Phase};
    use opslog::libs::logbook::Logbook;
    use opslog::libs::operation::OperationInput;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    // Tests share the process environment; holding the lock keeps the
    // HOME redirection stable for the duration of each test.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Test context redirecting data storage into a temporary directory.
    struct LifecycleTestContext {
        _temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
    }

    impl TestContext for LifecycleTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            LifecycleTestContext {
                _temp_dir: temp_dir,
                _guard: guard,
            }
        }
    }

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 24).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    fn input() -> OperationInput {
        OperationInput {
            op_type: "Transfer".to_string(),
            city: "X".to_string(),
            well_service: "Y".to_string(),
            operator: "Z".to_string(),
            ..OperationInput::default()
        }
    }

    /// Drives a logbook to the point where an operation is saved.
    fn saved_logbook() -> Logbook {
        let mut logbook = Logbook::load().unwrap();
        logbook.start_displacement("Base", "Site A", "100", ts(7, 0, 0)).unwrap();
        logbook.end_displacement("150", ts(7, 42, 0)).unwrap();
        logbook.start_mobilization(ts(8, 0, 0)).unwrap();
        logbook.end_mobilization(ts(8, 30, 0)).unwrap();
        logbook.start_operation(ts(9, 0, 0)).unwrap();
        logbook.save_operation(&input(), ts(10, 0, 0)).unwrap();
        logbook
    }

    #[test_context(LifecycleTestContext)]
    #[test]
    fn test_mobilization_requires_completed_displacement(_ctx: &mut LifecycleTestContext) {
        let mut logbook = Logbook::load().unwrap();
        let err = logbook.start_mobilization(ts(8, 0, 0)).unwrap_err();
        assert_eq!(err, LogbookError::DisplacementNotCompleted);

        // Still blocked while the displacement is only in progress.
        logbook.start_displacement("Base", "Site A", "100", ts(7, 0, 0)).unwrap();
        let err = logbook.start_mobilization(ts(8, 0, 0)).unwrap_err();
        assert_eq!(err, LogbookError::DisplacementNotCompleted);

        logbook.end_displacement("150", ts(7, 42, 0)).unwrap();
        logbook.start_mobilization(ts(8, 0, 0)).unwrap();
    }

    #[test_context(LifecycleTestContext)]
    #[test]
    fn test_save_requires_started_operation(_ctx: &mut LifecycleTestContext) {
        let mut logbook = Logbook::load().unwrap();
        let err = logbook.save_operation(&input(), ts(10, 0, 0)).unwrap_err();
        assert_eq!(err, LogbookError::OperationNotStarted);
        assert_eq!(logbook.history().len(), 0);
    }

    /// Any single missing required field rejects the save and the history
    /// length is unchanged.
    #[test_context(LifecycleTestContext)]
    #[test]
    fn test_save_requires_every_required_field(_ctx: &mut LifecycleTestContext) {
        let mut logbook = Logbook::load().unwrap();
        logbook.start_operation(ts(9, 0, 0)).unwrap();

        for (field, missing) in [
            ("type", OperationInput { op_type: String::new(), ..input() }),
            ("city", OperationInput { city: String::new(), ..input() }),
            ("well/service", OperationInput { well_service: String::new(), ..input() }),
            ("operator", OperationInput { operator: String::new(), ..input() }),
        ] {
            let err = logbook.save_operation(&missing, ts(10, 0, 0)).unwrap_err();
            assert_eq!(err, LogbookError::MissingField(field));
            assert_eq!(logbook.history().len(), 0);
            assert!(!logbook.session().operation_saved);
        }

        logbook.save_operation(&input(), ts(10, 0, 0)).unwrap();
        assert_eq!(logbook.history().len(), 1);
    }

    #[test_context(LifecycleTestContext)]
    #[test]
    fn test_double_operation_start_rejected(_ctx: &mut LifecycleTestContext) {
        let mut logbook = Logbook::load().unwrap();
        logbook.start_operation(ts(9, 0, 0)).unwrap();
        let err = logbook.start_operation(ts(9, 5, 0)).unwrap_err();
        assert_eq!(err, LogbookError::OperationAlreadyStarted);
    }

    /// Saving without mobilization data leaves the aggregate's mobilization
    /// absent; totals stay "not applicable", never zero.
    #[test_context(LifecycleTestContext)]
    #[test]
    fn test_save_without_mobilization(_ctx: &mut LifecycleTestContext) {
        let mut logbook = Logbook::load().unwrap();
        logbook.start_operation(ts(9, 0, 0)).unwrap();
        let operation = logbook.save_operation(&input(), ts(10, 0, 0)).unwrap();

        assert!(operation.mobilization.is_idle());
        assert_eq!(operation.total_operation_minutes(), None);
        assert_eq!(operation.op_type, "Transfer");
        assert_eq!(operation.start_time, Some(ts(9, 0, 0)));
        assert_eq!(operation.end_time, Some(ts(10, 0, 0)));
        assert!(!operation.id.is_empty());
    }

    #[test_context(LifecycleTestContext)]
    #[test]
    fn test_save_freezes_displacement_and_mobilization_snapshot(_ctx: &mut LifecycleTestContext) {
        let logbook = saved_logbook();
        let operation = logbook.history().last().unwrap();

        assert_eq!(operation.origin, "Base");
        assert_eq!(operation.destination, "Site A");
        assert_eq!(operation.start_km, "100");
        assert_eq!(operation.end_km, "150");
        assert_eq!(operation.distance_km, Some(50.0));
        assert_eq!(operation.mobilization.duration_minutes, Some(30.0));
        assert!(operation.demobilization.is_idle());
    }

    /// Demobilization cannot start before the operation is persisted.
    #[test_context(LifecycleTestContext)]
    #[test]
    fn test_demobilization_requires_saved_operation(_ctx: &mut LifecycleTestContext) {
        let mut logbook = Logbook::load().unwrap();
        logbook.start_operation(ts(9, 0, 0)).unwrap();

        let err = logbook.start_demobilization(ts(10, 0, 0)).unwrap_err();
        assert_eq!(err, LogbookError::NoSavedOperation);
        assert!(logbook.session().demobilization.is_idle());

        logbook.save_operation(&input(), ts(10, 0, 0)).unwrap();
        logbook.start_demobilization(ts(16, 0, 0)).unwrap();
    }

    #[test_context(LifecycleTestContext)]
    #[test]
    fn test_demobilization_end_requires_start(_ctx: &mut LifecycleTestContext) {
        let mut logbook = saved_logbook();
        let err = logbook.end_demobilization(ts(16, 0, 0)).unwrap_err();
        assert_eq!(err, LogbookError::NotStarted(Phase::Demobilization));
    }

    /// Closing demobilization writes the interval onto the saved aggregate,
    /// reports the combined total and resets the session for the next cycle.
    #[test_context(LifecycleTestContext)]
    #[test]
    fn test_demobilization_close_ends_the_cycle(_ctx: &mut LifecycleTestContext) {
        let mut logbook = saved_logbook();
        logbook.start_demobilization(ts(16, 0, 0)).unwrap();
        let close = logbook.end_demobilization(ts(16, 45, 0)).unwrap();

        assert_eq!(close.duration_minutes, 45.0);
        assert_eq!(close.total_minutes, Some(75.0)); // 30 min mob + 45 min demob

        let operation = logbook.history().last().unwrap();
        assert_eq!(operation.demobilization.duration_minutes, Some(45.0));
        assert_eq!(operation.total_operation_minutes(), Some(75.0));

        let session = logbook.session();
        assert!(!session.operation_saved);
        assert_eq!(session.current_operation_id, None);
        assert!(session.mobilization.is_idle());
        assert!(session.demobilization.is_idle());
        // The last displacement snapshot is kept for reference.
        assert!(session.displacement.is_completed());
    }

    /// A mobilization closed only after the save is backfilled onto the
    /// aggregate when demobilization closes.
    #[test_context(LifecycleTestContext)]
    #[test]
    fn test_late_mobilization_is_backfilled(_ctx: &mut LifecycleTestContext) {
        let mut logbook = Logbook::load().unwrap();
        logbook.start_displacement("Base", "Site A", "100", ts(7, 0, 0)).unwrap();
        logbook.end_displacement("150", ts(7, 42, 0)).unwrap();
        logbook.start_mobilization(ts(8, 0, 0)).unwrap();
        logbook.start_operation(ts(9, 0, 0)).unwrap();
        logbook.save_operation(&input(), ts(10, 0, 0)).unwrap();
        assert!(logbook.history().last().unwrap().mobilization.is_idle());

        logbook.end_mobilization(ts(10, 20, 0)).unwrap();
        logbook.start_demobilization(ts(16, 0, 0)).unwrap();
        let close = logbook.end_demobilization(ts(16, 30, 0)).unwrap();

        let operation = logbook.history().last().unwrap();
        assert_eq!(operation.mobilization.duration_minutes, Some(140.0));
        assert_eq!(close.total_minutes, Some(170.0));
    }

    /// Starting a new operation while the previous one was never
    /// demobilized is the supported abandon-and-start-new flow; the caller
    /// is told so it can warn.
    #[test_context(LifecycleTestContext)]
    #[test]
    fn test_abandon_and_start_new_flow(_ctx: &mut LifecycleTestContext) {
        let mut logbook = saved_logbook();
        let first_id = logbook.history().last().unwrap().id.clone();

        let previous_open = logbook.start_operation(ts(11, 0, 0)).unwrap();
        assert!(previous_open);

        logbook.save_operation(&input(), ts(12, 0, 0)).unwrap();
        assert_eq!(logbook.history().len(), 2);
        let current = logbook.session().current_operation_id.clone().unwrap();
        assert_ne!(current, first_id);
    }

    #[test_context(LifecycleTestContext)]
    #[test]
    fn test_state_survives_reload(_ctx: &mut LifecycleTestContext) {
        let logbook = saved_logbook();
        let id = logbook.session().current_operation_id.clone().unwrap();
        logbook.persist().unwrap();

        let reloaded = Logbook::load().unwrap();
        assert_eq!(reloaded.history().len(), 1);
        assert!(reloaded.session().operation_saved);
        assert_eq!(reloaded.session().current_operation_id, Some(id.clone()));
        assert_eq!(reloaded.current_operation().unwrap().id, id);
    }
}
