//! Messages exchanged with the assistant worker

/// Which suggestion list a fetch refreshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
    Titles,
    Tags,
}

/// Which piece of text a generation appends to the post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerateKind {
    Paragraph,
    Conclusion,
}

/// One of the four assistant operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssistTask {
    Suggest(SuggestionKind),
    Generate(GenerateKind),
}

impl AssistTask {
    pub fn label(&self) -> &'static str {
        match self {
            AssistTask::Suggest(SuggestionKind::Titles) => "titles",
            AssistTask::Suggest(SuggestionKind::Tags) => "tags",
            AssistTask::Generate(GenerateKind::Paragraph) => "paragraph",
            AssistTask::Generate(GenerateKind::Conclusion) => "conclusion",
        }
    }
}

/// Request messages sent to the assistant worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistRequest {
    /// Run a task against a snapshot of the post text
    Run {
        task: AssistTask,
        text: String,
        /// Unique, increasing ID used to discard stale results
        request_id: u64,
    },
    /// Abort a request that has been superseded
    Cancel { request_id: u64 },
}

/// Successful output of a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistOutput {
    /// Titles or tags
    Items(Vec<String>),
    /// A generated paragraph (new text only, not the full post)
    Text(String),
}

/// Response messages received from the assistant worker
///
/// Every `Run` request produces exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistResponse {
    Completed {
        task: AssistTask,
        request_id: u64,
        output: AssistOutput,
    },
    Failed {
        task: AssistTask,
        request_id: u64,
        message: String,
    },
    Cancelled {
        task: AssistTask,
        request_id: u64,
    },
}
