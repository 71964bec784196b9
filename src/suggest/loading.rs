/// Loading state of a generation action
///
/// `Idle -> Loading -> Idle` on success, `Loading -> Failed` on failure.
/// A failed action can be dispatched again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadingFlag {
    #[default]
    Idle,
    Loading {
        request_id: u64,
    },
    Failed(String),
}

impl LoadingFlag {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingFlag::Loading { .. })
    }

    /// Whether `request_id` is the outstanding request for this action
    pub fn is_current(&self, request_id: u64) -> bool {
        matches!(self, LoadingFlag::Loading { request_id: id } if *id == request_id)
    }

    pub fn begin(&mut self, request_id: u64) {
        *self = LoadingFlag::Loading { request_id };
    }

    pub fn finish(&mut self) {
        *self = LoadingFlag::Idle;
    }

    pub fn fail(&mut self, message: String) {
        *self = LoadingFlag::Failed(message);
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadingFlag::Failed(message) => Some(message),
            _ => None,
        }
    }
}
