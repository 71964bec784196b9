/// Titles or tags offered to the user
///
/// Replaced wholesale when the latest dispatched fetch completes. Results
/// from any earlier fetch are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionSet {
    items: Vec<String>,
    /// ID of the most recently dispatched fetch
    latest_request_id: Option<u64>,
    /// Whether the latest fetch is still outstanding
    pending: bool,
    error: Option<String>,
}

impl SuggestionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly dispatched fetch
    ///
    /// Returns the ID of the fetch it supersedes, if that one was still
    /// outstanding.
    pub fn begin(&mut self, request_id: u64) -> Option<u64> {
        let superseded = self.latest_request_id.filter(|_| self.pending);
        self.latest_request_id = Some(request_id);
        self.pending = true;
        superseded
    }

    /// Replace the items if `request_id` is the latest fetch
    pub fn accept(&mut self, request_id: u64, items: Vec<String>) -> bool {
        if !self.is_latest(request_id) {
            return false;
        }
        self.items = items;
        self.pending = false;
        self.error = None;
        true
    }

    /// Record a failure of the latest fetch, keeping the previous items
    pub fn fail(&mut self, request_id: u64, message: String) -> bool {
        if !self.is_latest(request_id) {
            return false;
        }
        self.pending = false;
        self.error = Some(message);
        true
    }

    pub fn is_latest(&self, request_id: u64) -> bool {
        self.latest_request_id == Some(request_id)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_begin_reports_superseded_pending_fetch() {
        let mut set = SuggestionSet::new();
        assert_eq!(set.begin(1), None);
        assert_eq!(set.begin(2), Some(1));
        assert!(set.accept(2, items(&["a"])));
        assert_eq!(set.begin(3), None);
    }

    #[test]
    fn test_stale_result_is_rejected() {
        let mut set = SuggestionSet::new();
        set.begin(1);
        set.begin(2);
        assert!(!set.accept(1, items(&["stale"])));
        assert!(set.is_empty());
        assert!(set.is_pending());

        assert!(set.accept(2, items(&["fresh"])));
        assert_eq!(set.items(), &["fresh".to_string()]);
        assert!(!set.is_pending());
    }

    #[test]
    fn test_failure_keeps_previous_items() {
        let mut set = SuggestionSet::new();
        set.begin(1);
        set.accept(1, items(&["keep"]));
        set.begin(2);
        assert!(set.fail(2, "timeout".to_string()));
        assert_eq!(set.items(), &["keep".to_string()]);
        assert_eq!(set.error(), Some("timeout"));

        set.begin(3);
        set.accept(3, items(&["new"]));
        assert_eq!(set.error(), None);
    }
}
