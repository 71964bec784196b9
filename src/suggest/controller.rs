//! Suggestion refresh controller
//!
//! Owns the post body, the snapshot last sent for suggestions, both
//! suggestion lists, the committed tags and the loading flags of the two
//! generation actions.

use tokio::sync::mpsc::UnboundedSender;

use super::loading::LoadingFlag;
use super::request::{
    AssistOutput, AssistRequest, AssistResponse, AssistTask, GenerateKind, SuggestionKind,
};
use super::suggestion_set::SuggestionSet;
use crate::diff::exceeds_threshold;
use crate::draft::TagSelection;

/// Error reported when no worker is available to take a request
const ASSISTANT_UNAVAILABLE: &str = "assistant unavailable";

/// What applying a worker response changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseEffect {
    /// The response was for a superseded request and was dropped
    Discarded,
    /// A suggestion list was replaced
    SuggestionsUpdated(SuggestionKind),
    /// Generated text was appended to the buffer
    BufferChanged,
    /// The current request for a task failed
    Failed { task: AssistTask, message: String },
}

/// Edit-driven suggestion refresh controller
#[derive(Debug)]
pub struct SuggestionController {
    buffer: String,
    snapshot: String,
    threshold: usize,
    titles: SuggestionSet,
    tags: SuggestionSet,
    tag_selection: TagSelection,
    paragraph: LoadingFlag,
    conclusion: LoadingFlag,
    /// Last request ID handed out, incremented for each dispatch
    request_id: u64,
    request_tx: Option<UnboundedSender<AssistRequest>>,
}

impl SuggestionController {
    /// Create a controller that refreshes once more than `threshold`
    /// characters have changed since the last refresh
    pub fn new(threshold: usize) -> Self {
        Self {
            buffer: String::new(),
            snapshot: String::new(),
            threshold,
            titles: SuggestionSet::new(),
            tags: SuggestionSet::new(),
            tag_selection: TagSelection::new(),
            paragraph: LoadingFlag::Idle,
            conclusion: LoadingFlag::Idle,
            request_id: 0,
            request_tx: None,
        }
    }

    /// Set the channel used to send requests to the worker
    pub fn set_channel(&mut self, request_tx: UnboundedSender<AssistRequest>) {
        self.request_tx = Some(request_tx);
    }

    /// Replace the buffer with `new_text`
    ///
    /// Refreshes suggestions when the change since the snapshot exceeds the
    /// threshold. Returns true if a refresh was triggered.
    pub fn on_edit(&mut self, new_text: &str) -> bool {
        self.buffer.clear();
        self.buffer.push_str(new_text);

        if !exceeds_threshold(&self.buffer, &self.snapshot, self.threshold) {
            return false;
        }

        let text = self.buffer.clone();
        self.refresh(&text);
        true
    }

    /// Take a new snapshot and fetch titles and tags for it
    ///
    /// Both fetches are dispatched without waiting. Any fetch of the same
    /// kind still outstanding is cancelled, and its result will be dropped.
    pub fn refresh(&mut self, text: &str) {
        self.snapshot = text.to_string();
        log::debug!("Refreshing suggestions ({} chars)", text.chars().count());

        for kind in [SuggestionKind::Titles, SuggestionKind::Tags] {
            let request_id = self.next_request_id();
            let superseded = self.suggestions_mut(kind).begin(request_id);

            if let Some(old_id) = superseded {
                self.send(AssistRequest::Cancel { request_id: old_id });
            }

            let sent = self.send(AssistRequest::Run {
                task: AssistTask::Suggest(kind),
                text: text.to_string(),
                request_id,
            });
            if !sent {
                self.suggestions_mut(kind)
                    .fail(request_id, ASSISTANT_UNAVAILABLE.to_string());
            }
        }
    }

    /// Request generated text to append to the buffer
    ///
    /// Refused while the same action is already loading. Returns true if a
    /// request was dispatched.
    pub fn append_generated(&mut self, kind: GenerateKind) -> bool {
        if self.loading(kind).is_loading() {
            log::debug!("Ignoring {:?} request, one is already in flight", kind);
            return false;
        }

        let request_id = self.next_request_id();
        self.loading_mut(kind).begin(request_id);

        let sent = self.send(AssistRequest::Run {
            task: AssistTask::Generate(kind),
            text: self.buffer.clone(),
            request_id,
        });
        if !sent {
            self.loading_mut(kind).fail(ASSISTANT_UNAVAILABLE.to_string());
        }
        sent
    }

    /// Apply a response from the worker
    pub fn handle_response(&mut self, response: AssistResponse) -> ResponseEffect {
        match response {
            AssistResponse::Completed {
                task,
                request_id,
                output,
            } => self.apply_output(task, request_id, output),
            AssistResponse::Failed {
                task,
                request_id,
                message,
            } => self.apply_failure(task, request_id, message),
            AssistResponse::Cancelled { task, request_id } => {
                self.apply_failure(task, request_id, "request cancelled".to_string())
            }
        }
    }

    fn apply_output(
        &mut self,
        task: AssistTask,
        request_id: u64,
        output: AssistOutput,
    ) -> ResponseEffect {
        match (task, output) {
            (AssistTask::Suggest(kind), AssistOutput::Items(items)) => {
                if self.suggestions_mut(kind).accept(request_id, items) {
                    ResponseEffect::SuggestionsUpdated(kind)
                } else {
                    log::debug!("Discarding stale {} result {}", task.label(), request_id);
                    ResponseEffect::Discarded
                }
            }
            (AssistTask::Generate(kind), AssistOutput::Text(text)) => {
                if !self.loading(kind).is_current(request_id) {
                    log::debug!("Discarding stale {} result {}", task.label(), request_id);
                    return ResponseEffect::Discarded;
                }

                self.buffer.push_str("\n\n");
                self.buffer.push_str(&text);
                self.loading_mut(kind).finish();

                // Appends always refresh, regardless of magnitude
                let buffer = self.buffer.clone();
                self.refresh(&buffer);
                ResponseEffect::BufferChanged
            }
            (task, output) => {
                log::warn!("Unexpected output for {}: {:?}", task.label(), output);
                self.apply_failure(task, request_id, "unexpected response".to_string())
            }
        }
    }

    fn apply_failure(&mut self, task: AssistTask, request_id: u64, message: String) -> ResponseEffect {
        let current = match task {
            AssistTask::Suggest(kind) => self.suggestions_mut(kind).fail(request_id, message.clone()),
            AssistTask::Generate(kind) => {
                let flag = self.loading_mut(kind);
                if flag.is_current(request_id) {
                    flag.fail(message.clone());
                    true
                } else {
                    false
                }
            }
        };

        if current {
            log::warn!("{} request {} failed: {}", task.label(), request_id, message);
            ResponseEffect::Failed { task, message }
        } else {
            ResponseEffect::Discarded
        }
    }

    /// Commit a tag; no-op if already selected
    pub fn select_tag(&mut self, tag: &str) -> bool {
        self.tag_selection.select(tag)
    }

    /// Replace the tag selection from the raw tags field
    pub fn set_tags_from_text(&mut self, raw: &str) {
        self.tag_selection.set_from_text(raw);
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn snapshot(&self) -> &str {
        &self.snapshot
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn suggestions(&self, kind: SuggestionKind) -> &SuggestionSet {
        match kind {
            SuggestionKind::Titles => &self.titles,
            SuggestionKind::Tags => &self.tags,
        }
    }

    pub fn tag_selection(&self) -> &TagSelection {
        &self.tag_selection
    }

    pub fn loading(&self, kind: GenerateKind) -> &LoadingFlag {
        match kind {
            GenerateKind::Paragraph => &self.paragraph,
            GenerateKind::Conclusion => &self.conclusion,
        }
    }

    fn suggestions_mut(&mut self, kind: SuggestionKind) -> &mut SuggestionSet {
        match kind {
            SuggestionKind::Titles => &mut self.titles,
            SuggestionKind::Tags => &mut self.tags,
        }
    }

    fn loading_mut(&mut self, kind: GenerateKind) -> &mut LoadingFlag {
        match kind {
            GenerateKind::Paragraph => &mut self.paragraph,
            GenerateKind::Conclusion => &mut self.conclusion,
        }
    }

    fn next_request_id(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.request_id
    }

    fn send(&self, request: AssistRequest) -> bool {
        self.request_tx
            .as_ref()
            .is_some_and(|tx| tx.send(request).is_ok())
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
