#[derive(Debug, Clone)]
pub enum Message {
    // === DISPLACEMENT MESSAGES ===
    DisplacementStarted,
    DisplacementFinished { distance_km: f64, minutes: f64 },
    DisplacementAbandoned,

    // === MOBILIZATION / DEMOBILIZATION MESSAGES ===
    MobilizationStarted,
    MobilizationFinished(f64), // duration in minutes
    MobilizationAbandoned,
    DemobilizationStarted,
    DemobilizationFinished(f64),
    DemobilizationAbandoned,
    TotalOperationTime(f64), // mobilization + demobilization

    // === OPERATION MESSAGES ===
    OperationStarted,
    OperationSaved(String), // operation id
    OperationDraftAbandoned,
    PreviousOperationStillOpen,

    // === WAITING MESSAGES ===
    WaitingStarted,
    WaitingReasonAdded,
    WaitingFinished { minutes: f64, total: f64 },
    WaitingAbandoned,

    // === LUNCH MESSAGES ===
    LunchStarted,
    LunchFinished { minutes: f64, total: f64 },
    LunchAbandoned,

    // === REFUELING MESSAGES ===
    RefuelingStarted(String), // fuel type
    RefuelingFinished { fuel: String, minutes: f64, total: f64 },
    RefuelingAbandoned,

    // === HISTORY MESSAGES ===
    HistoryTitle(usize), // operation count
    HistoryEmpty,
    ConfirmClearHistory(usize),
    HistoryCleared,
    ClearCancelled,
    HistoryEntriesDropped(usize), // corrupted entries skipped on load

    // === STATUS MESSAGES ===
    StatusTitle,
    NoActivePhases,
    WatchStopHint,

    // === REPORT / EXPORT MESSAGES ===
    NoOperationsForReport,
    ReportSaved(String), // file path
    ExportSaved(String),

    // === SYNC MESSAGES ===
    MirrorNotConfigured,
    SyncQueueEmpty,
    SyncPushing(usize),
    SyncFinished { pushed: usize, kept: usize },
    SyncItemFailed { id: String, reason: String },

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleProfile,
    ConfigModuleMirror,
    ConfigModuleStorage,
    PromptSelectModules,
    PromptProfileName,
    PromptProfileRegistration,
    PromptProfileAuxiliar,
    PromptProfileVehiclePlate,
    PromptMirrorApiUrl,
    PromptMirrorAuthToken,
    PromptMirrorCollection,
    PromptRewriteOnLoad,

    // === PERSISTENCE MESSAGES ===
    PersistFailed(String),

    // === GENERIC ===
    Custom(String),
}
