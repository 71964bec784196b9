//! Prompts for the assistant tasks and parsing of model replies

use super::provider::AiError;
use crate::suggest::{AssistOutput, AssistTask, GenerateKind, SuggestionKind};

/// Build the prompt sent to a model for `task`
pub fn build_prompt(task: AssistTask, text: &str) -> String {
    let instruction = match task {
        AssistTask::Suggest(SuggestionKind::Titles) => {
            "Suggest five titles for the blog post below. \
             Reply with one title per line and nothing else."
        }
        AssistTask::Suggest(SuggestionKind::Tags) => {
            "Suggest up to eight short, lowercase tags for the blog post below. \
             Reply with one tag per line and nothing else."
        }
        AssistTask::Generate(GenerateKind::Paragraph) => {
            "Write the next paragraph of the blog post below, continuing in the same voice. \
             Reply with the new paragraph only, without repeating the existing text."
        }
        AssistTask::Generate(GenerateKind::Conclusion) => {
            "Write a concluding paragraph for the blog post below. \
             Reply with the new paragraph only, without repeating the existing text."
        }
    };

    format!("{}\n\n<post>\n{}\n</post>", instruction, text)
}

/// Turn a model reply into the output shape `task` expects
pub fn parse_output(task: AssistTask, response: &str) -> Result<AssistOutput, AiError> {
    match task {
        AssistTask::Suggest(_) => Ok(AssistOutput::Items(parse_items(response))),
        AssistTask::Generate(_) => {
            let text = response.trim();
            if text.is_empty() {
                return Err(AiError::Parse("model returned no text".to_string()));
            }
            Ok(AssistOutput::Text(text.to_string()))
        }
    }
}

/// Parse a list reply: one item per line, or a single comma-separated line
///
/// Bullets, numbering and surrounding quotes are stripped; empty and
/// repeated items are dropped.
pub fn parse_items(response: &str) -> Vec<String> {
    let lines: Vec<&str> = response
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let raw: Vec<&str> = match lines.as_slice() {
        [single] if single.contains(',') => single.split(',').collect(),
        _ => lines,
    };

    let mut items: Vec<String> = Vec::new();
    for item in raw.into_iter().map(clean_item).filter(|i| !i.is_empty()) {
        if !items.contains(&item) {
            items.push(item);
        }
    }
    items
}

fn clean_item(item: &str) -> String {
    let item = item.trim();
    let item = item
        .strip_prefix("- ")
        .or_else(|| item.strip_prefix("* "))
        .or_else(|| item.strip_prefix("• "))
        .unwrap_or(item);
    let item = strip_numbering(item);
    item.trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '#')
        .trim()
        .to_string()
}

/// Strip a leading "1." or "1)" marker
fn strip_numbering(item: &str) -> &str {
    let digits = item.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return item;
    }
    let rest = &item[digits..];
    rest.strip_prefix('.')
        .or_else(|| rest.strip_prefix(')'))
        .unwrap_or(item)
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod prompt_tests;
