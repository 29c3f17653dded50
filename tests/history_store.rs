#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use opslog::libs::data_storage::DataStorage;
    use opslog::libs::interval::TimeInterval;
    use opslog::libs::operation::Operation;
    use opslog::libs::subevents::FuelType;
    use opslog::store::history::{HistoryStore, HISTORY_FILE_NAME};
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct HistoryTestContext {
        _temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
    }

    impl TestContext for HistoryTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            HistoryTestContext {
                _temp_dir: temp_dir,
                _guard: guard,
            }
        }
    }

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 24).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    fn write_history(raw: &str) {
        let path = DataStorage::new().get_path(HISTORY_FILE_NAME).unwrap();
        std::fs::write(path, raw).unwrap();
    }

    fn sample_operation(id: &str) -> Operation {
        let mut interval = TimeInterval::default();
        interval.begin(opslog::libs::error::Phase::Mobilization, ts(8, 0, 0)).unwrap();
        interval.close(opslog::libs::error::Phase::Mobilization, ts(8, 30, 0)).unwrap();

        Operation {
            id: id.to_string(),
            start_time: Some(ts(9, 0, 0)),
            end_time: Some(ts(10, 0, 0)),
            op_type: "Transfer".to_string(),
            city: "Mossoró".to_string(),
            well_service: "Poço 7".to_string(),
            operator: "Silva".to_string(),
            volume: String::new(),
            temperature: String::new(),
            pressure: String::new(),
            activities: String::new(),
            origin: "Base".to_string(),
            destination: "Site A".to_string(),
            start_km: "100".to_string(),
            end_km: "150".to_string(),
            distance_km: Some(50.0),
            displacement: TimeInterval::default(),
            mobilization: interval,
            demobilization: TimeInterval::default(),
            waiting_periods: Vec::new(),
            lunch_breaks: Vec::new(),
            refuelings: Vec::new(),
            total_waiting_time: None,
            total_lunch_time: None,
            total_refueling_time: None,
        }
    }

    /// Serialize a history with mixed present/absent durations, load it
    /// back: every null stays null (never 0, never dropped) and every id
    /// stays a non-empty string.
    #[test_context(HistoryTestContext)]
    #[test]
    fn test_round_trip_preserves_nulls(_ctx: &mut HistoryTestContext) {
        let mut store = HistoryStore::load().unwrap();
        store.push(sample_operation("1750752000000"));
        store.save().unwrap();

        // The document carries explicit nulls, not missing keys.
        let path = DataStorage::new().get_path(HISTORY_FILE_NAME).unwrap();
        let raw = std::fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let item = &value["operations"][0];
        assert!(item["demobilization"]["durationMinutes"].is_null());
        assert!(item["totalWaitingTime"].is_null());

        let reloaded = HistoryStore::load().unwrap();
        assert_eq!(reloaded.len(), 1);
        let operation = reloaded.last().unwrap();
        assert_eq!(operation.demobilization.duration_minutes, None);
        assert_eq!(operation.total_waiting_time, None);
        assert_eq!(operation.mobilization.duration_minutes, Some(30.0));
        assert!(!operation.id.is_empty());
    }

    /// A bare array is the version-0 document of the mobile app: flat
    /// camelCase fields, ISO-8601 UTC timestamps, duck-typed durations.
    #[test_context(HistoryTestContext)]
    #[test]
    fn test_legacy_document_migrates(_ctx: &mut HistoryTestContext) {
        write_history(
            r#"[
                {
                    "id": "1718000000000",
                    "startTime": "2025-06-24T09:00:00.000Z",
                    "endTime": "2025-06-24T10:00:00.000Z",
                    "type": "Transfer",
                    "city": "X",
                    "wellService": "Y",
                    "operator": "Z",
                    "origin": "Base",
                    "destination": "Site A",
                    "startKm": "100",
                    "endKm": "150",
                    "mobilizationStartTime": "2025-06-24T08:00:00.000Z",
                    "mobilizationEndTime": "2025-06-24T08:30:00.000Z",
                    "mobilizationDuration": 30,
                    "demobilizationStartTime": null,
                    "demobilizationEndTime": null,
                    "demobilizationDuration": "not a number",
                    "waitingPeriods": [
                        {
                            "startTime": "2025-06-24T10:00:00.000Z",
                            "endTime": "2025-06-24T10:10:00.000Z",
                            "duration": 10,
                            "reasons": [{"timestamp": "2025-06-24T10:00:00.000Z", "reason": "blocked"}]
                        }
                    ],
                    "refuelings": [
                        {
                            "startTime": "2025-06-24T11:00:00.000Z",
                            "endTime": "2025-06-24T11:12:00.000Z",
                            "duration": 12,
                            "type": "Água"
                        }
                    ],
                    "totalWaitingTime": 10,
                    "totalRefuelingTime": 12
                }
            ]"#,
        );

        let store = HistoryStore::load().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.dropped_on_load(), 0);

        let operation = store.last().unwrap();
        assert_eq!(operation.id, "1718000000000");
        assert_eq!(operation.start_time, Some(ts(9, 0, 0)));
        assert_eq!(operation.mobilization.duration_minutes, Some(30.0));
        // The duck-typed placeholder collapses to null, never to a number.
        assert_eq!(operation.demobilization.duration_minutes, None);
        assert_eq!(operation.waiting_periods.len(), 1);
        assert_eq!(operation.waiting_periods[0].reasons[0].reason, "blocked");
        assert_eq!(operation.refuelings[0].fuel_type, FuelType::Water);
        assert_eq!(operation.total_waiting_time, Some(10.0));
        assert_eq!(operation.total_lunch_time, None);
    }

    /// Null and non-object entries are dropped from the in-memory view but
    /// survive in the stored blob until the next explicit save.
    #[test_context(HistoryTestContext)]
    #[test]
    fn test_corrupted_entries_dropped_but_blob_kept(_ctx: &mut HistoryTestContext) {
        write_history(r#"[null, "garbage", {"id": "1718000000001", "type": "Transfer", "city": "X"}]"#);

        let store = HistoryStore::load().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.dropped_on_load(), 2);

        // Load alone does not rewrite the document.
        let path = DataStorage::new().get_path(HISTORY_FILE_NAME).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("garbage"));

        // An explicit save flushes the repaired view.
        store.save().unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("garbage"));
        let reloaded = HistoryStore::load().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.dropped_on_load(), 0);
    }

    /// A blank id is re-derived from the operation's start time.
    #[test_context(HistoryTestContext)]
    #[test]
    fn test_missing_id_is_rederived(_ctx: &mut HistoryTestContext) {
        write_history(r#"[{"startTime": "2025-06-24T09:00:00.000Z", "type": "Transfer", "city": "X"}]"#);

        let store = HistoryStore::load().unwrap();
        let operation = store.last().unwrap();
        assert!(!operation.id.trim().is_empty());
        assert_eq!(operation.id, Operation::derive_id(ts(9, 0, 0)));
    }

    /// The current envelope round-trips through the same loader.
    #[test_context(HistoryTestContext)]
    #[test]
    fn test_envelope_round_trip(_ctx: &mut HistoryTestContext) {
        let mut store = HistoryStore::load().unwrap();
        store.push(sample_operation("a"));
        store.push(sample_operation("b"));
        store.save().unwrap();

        let reloaded = HistoryStore::load().unwrap();
        assert_eq!(reloaded.len(), 2);
        // Insertion order is chronological order.
        assert_eq!(reloaded.operations()[0].id, "a");
        assert_eq!(reloaded.operations()[1].id, "b");
        assert_eq!(reloaded.operations().to_vec(), store.operations().to_vec());
    }

    #[test_context(HistoryTestContext)]
    #[test]
    fn test_clear_is_the_only_deletion_path(_ctx: &mut HistoryTestContext) {
        let mut store = HistoryStore::load().unwrap();
        store.push(sample_operation("a"));
        store.save().unwrap();

        store.clear();
        store.save().unwrap();

        let reloaded = HistoryStore::load().unwrap();
        assert!(reloaded.is_empty());
    }

    /// Negative durations can only come from a tampered document; they
    /// collapse to null on load.
    #[test_context(HistoryTestContext)]
    #[test]
    fn test_negative_duration_collapses_to_null(_ctx: &mut HistoryTestContext) {
        write_history(r#"[{"id": "x", "type": "Transfer", "mobilizationDuration": -5}]"#);
        let store = HistoryStore::load().unwrap();
        assert_eq!(store.last().unwrap().mobilization.duration_minutes, None);
    }
}
