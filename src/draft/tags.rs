/// Delimiter between tags in the free-text tags field
pub const TAG_DELIMITER: &str = ", ";

/// Tags committed to the post, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    tags: Vec<String>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag unless it is already selected
    ///
    /// Returns true if the selection changed.
    pub fn select(&mut self, tag: &str) -> bool {
        if self.contains(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Replace the selection with `raw` split on the literal `", "`
    ///
    /// No trimming, deduplication or empty filtering: `"a,b"` is one tag and
    /// an empty field is a single empty tag.
    pub fn set_from_text(&mut self, raw: &str) {
        self.tags = raw.split(TAG_DELIMITER).map(str::to_string).collect();
    }

    /// The selection joined back into the tags field format
    pub fn as_text(&self) -> String {
        self.tags.join(TAG_DELIMITER)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.tags.clone()
    }
}

#[cfg(test)]
#[path = "tags_tests.rs"]
mod tags_tests;
