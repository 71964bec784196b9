use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{App, Focus};
use crate::suggest::{GenerateKind, SuggestionKind};

impl App {
    /// Wait up to `timeout` for a terminal event and handle it
    ///
    /// Returns true if an event was handled.
    pub fn handle_events(&mut self, timeout: Duration) -> io::Result<bool> {
        if !event::poll(timeout)? {
            return Ok(false);
        }
        match event::read()? {
            // Check that it's a key press event to avoid duplicates
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event);
                Ok(true)
            }
            Event::Resize(..) => Ok(true),
            _ => Ok(false),
        }
    }

    /// Handle key press events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.handle_global_keys(key) {
            return;
        }

        match self.focus {
            Focus::Title => self.handle_title_key(key),
            Focus::TitleSuggestions => self.handle_suggestion_key(SuggestionKind::Titles, key),
            Focus::Content => self.handle_content_key(key),
            Focus::AddParagraph => self.handle_button_key(key, GenerateKind::Paragraph),
            Focus::AddConclusion => self.handle_button_key(key, GenerateKind::Conclusion),
            Focus::Tags => self.handle_tags_key(key),
            Focus::TagSuggestions => self.handle_suggestion_key(SuggestionKind::Tags, key),
            Focus::Submit => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.submit();
                }
            }
        }
    }

    /// Handle keys that work regardless of focus
    /// Returns true if key was handled
    fn handle_global_keys(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('s') if ctrl => {
                self.submit();
                true
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                true
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                true
            }
            KeyCode::F(2) => {
                self.generate(GenerateKind::Paragraph);
                true
            }
            KeyCode::F(3) => {
                self.generate(GenerateKind::Conclusion);
                true
            }
            _ => false,
        }
    }

    fn handle_title_key(&mut self, key: KeyEvent) {
        // Single-line field: Enter moves on instead of breaking the line
        if key.code == KeyCode::Enter {
            self.focus = self.focus.next();
            return;
        }
        self.title.input(key);
    }

    fn handle_content_key(&mut self, key: KeyEvent) {
        if self.body.input(key) {
            self.on_body_changed();
        }
    }

    fn handle_tags_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.focus = self.focus.next();
            return;
        }
        if self.tags_input.input(key) {
            self.on_tags_changed();
        }
    }

    fn handle_button_key(&mut self, key: KeyEvent, kind: GenerateKind) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            self.generate(kind);
        }
    }

    fn handle_suggestion_key(&mut self, kind: SuggestionKind, key: KeyEvent) {
        let len = self.controller.suggestions(kind).items().len();
        if len == 0 {
            return;
        }

        let choice = match kind {
            SuggestionKind::Titles => &mut self.title_choice,
            SuggestionKind::Tags => &mut self.tag_choice,
        };

        match key.code {
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => {
                *choice = (*choice + 1) % len;
            }
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => {
                *choice = (*choice + len - 1) % len;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let index = *choice;
                match kind {
                    SuggestionKind::Titles => self.choose_title(index),
                    SuggestionKind::Tags => self.choose_tag(index),
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod events_tests;
