//! Blog post form
//!
//! Terminal rendition of the drafting form: title, body, tags, suggestion
//! chips and the generation buttons, all backed by one
//! [`SuggestionController`](crate::suggest::SuggestionController).

mod events;
mod render;
mod state;

pub use state::{App, Focus};
