use std::sync::mpsc::Receiver;

use ratatui::style::{Modifier, Style};
use tokio::sync::mpsc::UnboundedSender;
use tui_textarea::{CursorMove, TextArea};

use crate::config::Config;
use crate::draft::Draft;
use crate::suggest::{
    AssistRequest, AssistResponse, GenerateKind, ResponseEffect, SuggestionController,
    SuggestionKind,
};

/// Which form element has focus, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    TitleSuggestions,
    Content,
    AddParagraph,
    AddConclusion,
    Tags,
    TagSuggestions,
    Submit,
}

const TAB_ORDER: [Focus; 8] = [
    Focus::Title,
    Focus::TitleSuggestions,
    Focus::Content,
    Focus::AddParagraph,
    Focus::AddConclusion,
    Focus::Tags,
    Focus::TagSuggestions,
    Focus::Submit,
];

impl Focus {
    fn position(self) -> usize {
        TAB_ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Focus {
        TAB_ORDER[(self.position() + 1) % TAB_ORDER.len()]
    }

    pub fn prev(self) -> Focus {
        TAB_ORDER[(self.position() + TAB_ORDER.len() - 1) % TAB_ORDER.len()]
    }
}

/// Application state
pub struct App {
    pub title: TextArea<'static>,
    pub body: TextArea<'static>,
    pub tags_input: TextArea<'static>,
    pub focus: Focus,
    pub controller: SuggestionController,
    /// Highlighted entry in the title suggestions
    pub title_choice: usize,
    /// Highlighted entry in the tag suggestions
    pub tag_choice: usize,
    /// Latest failure or warning shown in the status line
    pub status: Option<String>,
    pub should_quit: bool,
    /// Set when the form is submitted
    pub submitted: Option<Draft>,
    /// Channel to receive responses from the assistant worker
    pub response_rx: Option<Receiver<AssistResponse>>,
    /// Animation frame for loading spinners
    pub frame: usize,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &Config) -> Self {
        Self {
            title: single_line_input(""),
            body: body_textarea(""),
            tags_input: single_line_input("tag1, tag2, tag3..."),
            focus: Focus::Title,
            controller: SuggestionController::new(config.suggestions.threshold),
            title_choice: 0,
            tag_choice: 0,
            status: None,
            should_quit: false,
            submitted: None,
            response_rx: None,
            frame: 0,
        }
    }

    /// Set the channel handles for communication with the worker thread
    pub fn set_channels(
        &mut self,
        request_tx: UnboundedSender<AssistRequest>,
        response_rx: Receiver<AssistResponse>,
    ) {
        self.controller.set_channel(request_tx);
        self.response_rx = Some(response_rx);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advance loading animations
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// Drain and apply every pending worker response
    ///
    /// Returns true if anything was received.
    pub fn poll_responses(&mut self) -> bool {
        let mut responses = Vec::new();
        if let Some(rx) = &self.response_rx {
            while let Ok(response) = rx.try_recv() {
                responses.push(response);
            }
        }

        let received = !responses.is_empty();
        for response in responses {
            self.apply_response(response);
        }
        received
    }

    pub fn apply_response(&mut self, response: AssistResponse) {
        match self.controller.handle_response(response) {
            ResponseEffect::BufferChanged => self.sync_body(),
            ResponseEffect::SuggestionsUpdated(kind) => self.clamp_choice(kind),
            ResponseEffect::Failed { task, message } => {
                self.status = Some(format!("{} failed: {}", task.label(), message));
            }
            ResponseEffect::Discarded => {}
        }
    }

    /// Current title text
    pub fn title_text(&self) -> String {
        self.title.lines().join("")
    }

    /// Feed the body textarea back into the controller
    pub fn on_body_changed(&mut self) {
        let text = self.body.lines().join("\n");
        self.controller.on_edit(&text);
    }

    /// Feed the tags field back into the controller
    pub fn on_tags_changed(&mut self) {
        let raw = self.tags_input.lines().join("");
        self.controller.set_tags_from_text(&raw);
    }

    /// Replace the title with the suggestion at `index`
    pub fn choose_title(&mut self, index: usize) {
        let Some(title) = self
            .controller
            .suggestions(SuggestionKind::Titles)
            .items()
            .get(index)
            .cloned()
        else {
            return;
        };
        self.title = single_line_input("");
        self.title.insert_str(&title);
    }

    /// Commit the suggested tag at `index` and rewrite the tags field
    pub fn choose_tag(&mut self, index: usize) {
        let Some(tag) = self
            .controller
            .suggestions(SuggestionKind::Tags)
            .items()
            .get(index)
            .cloned()
        else {
            return;
        };
        if self.controller.select_tag(&tag) {
            let text = self.controller.tag_selection().as_text();
            self.tags_input = single_line_input("tag1, tag2, tag3...");
            self.tags_input.insert_str(&text);
        }
    }

    /// Start generating a paragraph or conclusion
    pub fn generate(&mut self, kind: GenerateKind) {
        if self.controller.append_generated(kind) {
            self.status = None;
        } else if let Some(error) = self.controller.loading(kind).error() {
            self.status = Some(error.to_string());
        }
    }

    /// Finish the session, handing back the draft
    pub fn submit(&mut self) {
        self.submitted = Some(self.draft());
        self.should_quit = true;
    }

    pub fn draft(&self) -> Draft {
        Draft {
            title: self.title_text(),
            body: self.controller.buffer().to_string(),
            tags: self.controller.tag_selection().to_vec(),
        }
    }

    /// Bring the body textarea up to date after generated text was appended
    ///
    /// The new text is inserted at the end as a single edit, so undo history
    /// and the user's cursor survive. Falls back to a rebuild if the textarea
    /// no longer holds a prefix of the buffer.
    fn sync_body(&mut self) {
        let shown = self.body.lines().join("\n");
        let Some(appended) = self.controller.buffer().strip_prefix(shown.as_str()) else {
            log::debug!("Body out of sync with buffer, rebuilding");
            self.body = body_textarea(self.controller.buffer());
            self.body.move_cursor(CursorMove::Bottom);
            self.body.move_cursor(CursorMove::End);
            return;
        };
        if appended.is_empty() {
            return;
        }

        let appended = appended.to_string();
        let (row, col) = self.body.cursor();
        self.body.move_cursor(CursorMove::Bottom);
        self.body.move_cursor(CursorMove::End);
        self.body.insert_str(appended);
        self.body.move_cursor(CursorMove::Jump(
            u16::try_from(row).unwrap_or(u16::MAX),
            u16::try_from(col).unwrap_or(u16::MAX),
        ));
    }

    fn clamp_choice(&mut self, kind: SuggestionKind) {
        let len = self.controller.suggestions(kind).items().len();
        let choice = match kind {
            SuggestionKind::Titles => &mut self.title_choice,
            SuggestionKind::Tags => &mut self.tag_choice,
        };
        *choice = (*choice).min(len.saturating_sub(1));
    }
}

fn single_line_input(placeholder: &str) -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_cursor_line_style(Style::default());
    if !placeholder.is_empty() {
        textarea.set_placeholder_text(placeholder);
    }
    textarea
}

fn body_textarea(text: &str) -> TextArea<'static> {
    let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    let mut textarea = TextArea::new(lines);
    textarea.set_cursor_line_style(Style::default());
    textarea.set_placeholder_text("Start writing your post...");
    textarea.set_placeholder_style(Style::default().add_modifier(Modifier::ITALIC));
    textarea
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
