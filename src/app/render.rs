use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::state::{App, Focus};
use crate::suggest::{GenerateKind, LoadingFlag, SuggestionKind, SuggestionSet};

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const EMPTY_SUGGESTIONS: &str = "type some content for suggestions";
const MAX_VISIBLE_TITLES: usize = 5;
const HELP_LINE: &str = "Tab/Shift+Tab move · F2 paragraph · F3 conclusion · Ctrl+S submit · Esc quit";

impl App {
    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let title_rows = self
            .controller
            .suggestions(SuggestionKind::Titles)
            .items()
            .len()
            .clamp(1, MAX_VISIBLE_TITLES) as u16;

        let layout = Layout::vertical([
            Constraint::Length(3),              // Title
            Constraint::Length(title_rows + 2), // Suggested titles
            Constraint::Min(5),                 // Content
            Constraint::Length(1),              // Generate buttons
            Constraint::Length(3),              // Tags
            Constraint::Length(4),              // Suggested tags
            Constraint::Length(1),              // Submit
            Constraint::Length(1),              // Status
        ])
        .split(frame.area());

        self.render_inputs(frame, layout[0], layout[2], layout[4]);
        self.render_title_suggestions(frame, layout[1]);
        self.render_buttons(frame, layout[3]);
        self.render_tag_suggestions(frame, layout[5]);
        self.render_submit(frame, layout[6]);
        self.render_status(frame, layout[7]);
    }

    fn render_inputs(&mut self, frame: &mut Frame, title: Rect, content: Rect, tags: Rect) {
        self.title.set_block(field_block(" Title ", self.focus == Focus::Title));
        self.body
            .set_block(field_block(" Content ", self.focus == Focus::Content));
        self.tags_input
            .set_block(field_block(" Tags ", self.focus == Focus::Tags));

        frame.render_widget(&self.title, title);
        frame.render_widget(&self.body, content);
        frame.render_widget(&self.tags_input, tags);
    }

    fn render_title_suggestions(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::TitleSuggestions;
        let set = self.controller.suggestions(SuggestionKind::Titles);
        let block = field_block(&suggestion_heading("Suggested titles", set, self.frame), focused);
        let max_width = area.width.saturating_sub(4) as usize;

        let lines: Vec<Line> = if set.is_empty() {
            vec![placeholder_line()]
        } else {
            set.items()
                .iter()
                .take(MAX_VISIBLE_TITLES)
                .enumerate()
                .map(|(i, title)| {
                    let selected = focused && i == self.title_choice;
                    let marker = if selected { "> " } else { "  " };
                    Line::from(vec![
                        Span::raw(marker),
                        Span::styled(truncate(title, max_width), choice_style(selected)),
                    ])
                })
                .collect()
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_tag_suggestions(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::TagSuggestions;
        let set = self.controller.suggestions(SuggestionKind::Tags);
        let block = field_block(&suggestion_heading("Suggested tags", set, self.frame), focused);

        let line = if set.is_empty() {
            placeholder_line()
        } else {
            let selection = self.controller.tag_selection();
            let mut spans = Vec::new();
            for (i, tag) in set.items().iter().enumerate() {
                let selected = focused && i == self.tag_choice;
                let mut style = choice_style(selected);
                if selection.contains(tag) {
                    style = style.fg(Color::Green);
                }
                spans.push(Span::styled(format!("[{}]", tag), style));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        };

        frame.render_widget(
            Paragraph::new(line).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (kind, focus, label) in [
            (GenerateKind::Paragraph, Focus::AddParagraph, "Add Paragraph"),
            (GenerateKind::Conclusion, Focus::AddConclusion, "Add Conclusion"),
        ] {
            let flag = self.controller.loading(kind);
            let text = match flag {
                LoadingFlag::Loading { .. } => format!(" {} {}... ", self.spinner(), label),
                _ => format!(" {} ", label),
            };
            spans.push(Span::styled(text, button_style(self.focus == focus, flag)));
            spans.push(Span::raw("  "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_submit(&self, frame: &mut Frame, area: Rect) {
        let style = button_style(self.focus == Focus::Submit, &LoadingFlag::Idle);
        frame.render_widget(Paragraph::new(Span::styled(" Submit ", style)), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(message) => Span::styled(format!("⚠ {}", message), Style::default().fg(Color::Red)),
            None => Span::styled(HELP_LINE, Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn spinner(&self) -> &'static str {
        SPINNER[self.frame % SPINNER.len()]
    }
}

fn field_block(title: &str, focused: bool) -> Block<'static> {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(Style::default().fg(border_color))
}

fn suggestion_heading(label: &str, set: &SuggestionSet, frame: usize) -> String {
    if set.is_pending() {
        format!(" {} {} ", label, SPINNER[frame % SPINNER.len()])
    } else if set.error().is_some() {
        format!(" {} (failed) ", label)
    } else {
        format!(" {} ", label)
    }
}

fn placeholder_line() -> Line<'static> {
    Line::from(Span::styled(
        EMPTY_SUGGESTIONS,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    ))
}

fn choice_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn button_style(focused: bool, flag: &LoadingFlag) -> Style {
    let base = match flag {
        LoadingFlag::Loading { .. } => Style::default().fg(Color::Yellow),
        LoadingFlag::Failed(_) => Style::default().fg(Color::Red),
        LoadingFlag::Idle => Style::default().fg(Color::White),
    };
    if focused {
        base.bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    } else {
        base
    }
}

/// Cut `text` to at most `max_width` terminal columns, marking the cut with "…"
fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
