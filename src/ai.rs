//! Assistant integration
//!
//! The four content generators (titles, tags, paragraph, conclusion) live
//! behind [`AiProvider`]. The [`worker`] runs them off the UI thread.

pub mod prompt;
pub mod provider;
pub mod worker;

pub use provider::{AiError, AiProvider};
pub use worker::spawn_worker;
