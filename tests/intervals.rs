#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use opslog::libs::error::{LogbookError, Phase};
    use opslog::libs::interval::{PhaseState, TimeInterval};

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 24).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    /// Closing an interval caches the exact duration in fractional minutes
    /// and the value never changes afterwards.
    #[test]
    fn test_duration_cached_at_close() {
        let mut interval = TimeInterval::default();
        interval.begin(Phase::Lunch, ts(12, 0, 0)).unwrap();
        let minutes = interval.close(Phase::Lunch, ts(12, 45, 30)).unwrap();

        assert_eq!(minutes, 45.5);
        assert_eq!(interval.duration_minutes, Some(45.5));
        assert_eq!(interval.state(), PhaseState::Closed);
    }

    #[test]
    fn test_zero_length_interval_is_valid() {
        let mut interval = TimeInterval::default();
        interval.begin(Phase::Waiting, ts(10, 0, 0)).unwrap();
        let minutes = interval.close(Phase::Waiting, ts(10, 0, 0)).unwrap();
        assert_eq!(minutes, 0.0);
    }

    /// An end before the start is rejected and the interval stays active.
    #[test]
    fn test_end_before_start_rejected() {
        let mut interval = TimeInterval::default();
        interval.begin(Phase::Waiting, ts(10, 0, 0)).unwrap();

        let err = interval.close(Phase::Waiting, ts(9, 59, 59)).unwrap_err();
        assert_eq!(err, LogbookError::EndBeforeStart);
        assert_eq!(interval.state(), PhaseState::Active);
        assert_eq!(interval.duration_minutes, None);

        // The interval can still close normally afterwards.
        let minutes = interval.close(Phase::Waiting, ts(10, 10, 0)).unwrap();
        assert_eq!(minutes, 10.0);
    }

    #[test]
    fn test_double_start_rejected() {
        let mut interval = TimeInterval::default();
        interval.begin(Phase::Refueling, ts(8, 0, 0)).unwrap();
        let err = interval.begin(Phase::Refueling, ts(8, 5, 0)).unwrap_err();
        assert_eq!(err, LogbookError::AlreadyInProgress(Phase::Refueling));
    }

    #[test]
    fn test_close_without_start_rejected() {
        let mut interval = TimeInterval::default();
        let err = interval.close(Phase::Mobilization, ts(8, 0, 0)).unwrap_err();
        assert_eq!(err, LogbookError::NotStarted(Phase::Mobilization));
        assert_eq!(interval.state(), PhaseState::Idle);
    }

    /// No transition from closed back to active; a repeat phase needs a new
    /// interval value.
    #[test]
    fn test_closed_interval_cannot_reopen() {
        let mut interval = TimeInterval::default();
        interval.begin(Phase::Mobilization, ts(8, 0, 0)).unwrap();
        interval.close(Phase::Mobilization, ts(8, 30, 0)).unwrap();

        let err = interval.begin(Phase::Mobilization, ts(9, 0, 0)).unwrap_err();
        assert_eq!(err, LogbookError::AlreadyCompleted(Phase::Mobilization));
        let err = interval.close(Phase::Mobilization, ts(9, 0, 0)).unwrap_err();
        assert_eq!(err, LogbookError::AlreadyCompleted(Phase::Mobilization));
    }

    #[test]
    fn test_elapsed_is_read_only() {
        let mut interval = TimeInterval::default();
        assert_eq!(interval.elapsed_minutes(ts(9, 0, 0)), None);

        interval.begin(Phase::Waiting, ts(9, 0, 0)).unwrap();
        assert_eq!(interval.elapsed_minutes(ts(9, 30, 0)), Some(30.0));
        // Recomputing elapsed time leaves the interval untouched.
        assert_eq!(interval.end, None);
        assert_eq!(interval.duration_minutes, None);

        interval.close(Phase::Waiting, ts(9, 40, 0)).unwrap();
        assert_eq!(interval.elapsed_minutes(ts(10, 0, 0)), None);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut interval = TimeInterval::default();
        interval.begin(Phase::Lunch, ts(12, 0, 0)).unwrap();
        interval.reset();
        assert_eq!(interval.state(), PhaseState::Idle);
        assert_eq!(interval, TimeInterval::default());
    }
}
