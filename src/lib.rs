//! postdraft - blog post drafting form with live title and tag suggestions
//!
//! Library crate exposing the form's building blocks for integration tests.

pub mod ai;
pub mod app;
pub mod config;
pub mod diff;
pub mod draft;
pub mod error;
pub mod suggest;
