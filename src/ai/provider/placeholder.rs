//! Offline placeholder generators
//!
//! Deterministic stand-ins for a real model: titles, tags and paragraphs
//! are assembled from the most frequent significant words in the post.
//! A configurable delay simulates network latency.

use std::collections::HashMap;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::AiError;
use crate::suggest::{AssistOutput, AssistTask, GenerateKind, SuggestionKind};

/// Words shorter than this are never keywords
const MIN_KEYWORD_LEN: usize = 4;

/// Maximum number of suggested tags
const MAX_TAGS: usize = 5;

const STOPWORDS: &[&str] = &[
    "about", "after", "also", "because", "been", "before", "being", "could", "does", "each",
    "from", "have", "here", "into", "just", "like", "make", "many", "more", "most", "much",
    "only", "other", "over", "same", "should", "some", "such", "than", "that", "their", "them",
    "then", "there", "these", "they", "this", "those", "through", "very", "want", "were",
    "what", "when", "where", "which", "while", "will", "with", "would", "your",
];

/// Offline generator used when no model is configured
#[derive(Debug, Clone)]
pub struct PlaceholderWriter {
    delay: Duration,
}

impl PlaceholderWriter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    pub async fn run(
        &self,
        task: AssistTask,
        text: &str,
        cancel_token: &CancellationToken,
    ) -> Result<AssistOutput, AiError> {
        if !self.delay.is_zero() {
            tokio::select! {
                biased;
                _ = cancel_token.cancelled() => return Err(AiError::Cancelled),
                _ = tokio::time::sleep(self.delay) => {}
            }
        }
        if cancel_token.is_cancelled() {
            return Err(AiError::Cancelled);
        }

        Ok(generate(task, text))
    }
}

/// Produce the output for `task` without any delay
pub fn generate(task: AssistTask, text: &str) -> AssistOutput {
    let keywords = keywords(text);
    match task {
        AssistTask::Suggest(SuggestionKind::Titles) => AssistOutput::Items(titles(&keywords)),
        AssistTask::Suggest(SuggestionKind::Tags) => {
            AssistOutput::Items(keywords.into_iter().take(MAX_TAGS).collect())
        }
        AssistTask::Generate(GenerateKind::Paragraph) => AssistOutput::Text(paragraph(&keywords)),
        AssistTask::Generate(GenerateKind::Conclusion) => {
            AssistOutput::Text(conclusion(&keywords))
        }
    }
}

/// Significant words ordered by frequency, ties broken by first appearance
pub fn keywords(text: &str) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

    for (position, word) in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN)
        .map(str::to_lowercase)
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
        .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
        .enumerate()
    {
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });
    ranked.into_iter().map(|(word, _)| word).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn titles(keywords: &[String]) -> Vec<String> {
    let Some(first) = keywords.first() else {
        return Vec::new();
    };
    let main = capitalize(first);

    let mut titles = vec![
        format!("{}: A Practical Introduction", main),
        format!("What I Learned About {}", main),
    ];
    if let Some(second) = keywords.get(1) {
        titles.push(format!("{} and {}: Notes from the Field", main, capitalize(second)));
    }
    titles.push(format!("Why {} Matters", main));
    titles
}

fn paragraph(keywords: &[String]) -> String {
    match keywords {
        [] => "Every post needs a starting point. This one begins with a question worth \
               exploring, and the paragraphs that follow try to answer it."
            .to_string(),
        [only] => format!(
            "There is more to say about {only}. Looking at {only} from a different angle \
             shows details that are easy to miss at first glance."
        ),
        [first, second, ..] => format!(
            "There is more to say about {first}. Looking at how {first} relates to {second} \
             shows details that are easy to miss at first glance."
        ),
    }
}

fn conclusion(keywords: &[String]) -> String {
    match keywords.first() {
        Some(first) => format!(
            "In conclusion, {first} deserves a closer look. The ideas above are only a \
             starting point, and there is plenty left to explore."
        ),
        None => "In conclusion, the ideas above are only a starting point, and there is \
                 plenty left to explore."
            .to_string(),
    }
}

#[cfg(test)]
#[path = "placeholder_tests.rs"]
mod placeholder_tests;
