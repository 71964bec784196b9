//! Edit-driven suggestion refresh
//!
//! The controller owns the post body and decides when the title and tag
//! suggestions are stale enough to be fetched again. It talks to the
//! assistant worker only through [`AssistRequest`] / [`AssistResponse`]
//! messages, so every state change happens on the thread that owns it.

mod controller;
mod loading;
mod request;
mod suggestion_set;

pub use controller::{ResponseEffect, SuggestionController};
pub use loading::LoadingFlag;
pub use request::{
    AssistOutput, AssistRequest, AssistResponse, AssistTask, GenerateKind, SuggestionKind,
};
pub use suggestion_set::SuggestionSet;
