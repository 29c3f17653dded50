#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use opslog::libs::logbook::Logbook;
    use opslog::libs::operation::OperationInput;
    use opslog::store::queue::SyncQueue;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct QueueTestContext {
        _temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
    }

    impl TestContext for QueueTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            QueueTestContext {
                _temp_dir: temp_dir,
                _guard: guard,
            }
        }
    }

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 24).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    /// Runs one full cycle and returns the closed aggregate, the way the
    /// demobilization command enqueues it. The save minute varies the
    /// timestamp-derived id.
    fn closed_operation_at(save_minute: u32) -> opslog::libs::operation::Operation {
        let mut logbook = Logbook::load().unwrap();
        logbook.start_operation(ts(9, 0, 0)).unwrap();
        let input = OperationInput {
            op_type: "Transfer".to_string(),
            city: "X".to_string(),
            well_service: "Y".to_string(),
            operator: "Z".to_string(),
            ..OperationInput::default()
        };
        logbook.save_operation(&input, ts(10, save_minute, 0)).unwrap();
        logbook.start_demobilization(ts(16, 0, 0)).unwrap();
        logbook.end_demobilization(ts(16, 30, 0)).unwrap().operation
    }

    fn closed_operation() -> opslog::libs::operation::Operation {
        closed_operation_at(0)
    }

    /// The cycle close hands back the finished aggregate, demobilization
    /// included, ready for the outbound queue.
    #[test_context(QueueTestContext)]
    #[test]
    fn test_cycle_close_yields_complete_document(_ctx: &mut QueueTestContext) {
        let operation = closed_operation();
        assert_eq!(operation.demobilization.duration_minutes, Some(30.0));
        assert_eq!(operation.op_type, "Transfer");
    }

    #[test_context(QueueTestContext)]
    #[test]
    fn test_queue_persists_between_loads(_ctx: &mut QueueTestContext) {
        let operation = closed_operation();
        let id = operation.id.clone();

        let mut queue = SyncQueue::load().unwrap();
        assert!(queue.is_empty());
        queue.push(operation);
        queue.save().unwrap();

        let reloaded = SyncQueue::load().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.items()[0].id, id);
    }

    /// Failed pushes go back into the queue; only successfully pushed items
    /// are gone after a drain.
    #[test_context(QueueTestContext)]
    #[test]
    fn test_take_all_and_requeue(_ctx: &mut QueueTestContext) {
        let first = closed_operation_at(0);
        let mut queue = SyncQueue::load().unwrap();
        queue.push(first.clone());
        queue.push(closed_operation_at(5));

        let drained = queue.take_all();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());

        // Simulate the first item failing to push.
        queue.requeue(drained[0].clone());
        queue.save().unwrap();

        let reloaded = SyncQueue::load().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.items()[0].id, first.id);
    }

    /// The queue is decoupled from the history: clearing the history leaves
    /// queued documents alone.
    #[test_context(QueueTestContext)]
    #[test]
    fn test_queue_survives_history_clear(_ctx: &mut QueueTestContext) {
        let operation = closed_operation();
        let mut queue = SyncQueue::load().unwrap();
        queue.push(operation);
        queue.save().unwrap();

        let mut logbook = Logbook::load().unwrap();
        logbook.clear_history();
        logbook.persist().unwrap();

        let reloaded = SyncQueue::load().unwrap();
        assert_eq!(reloaded.len(), 1);
    }
}
