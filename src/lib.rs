pub mod models;
pub mod views;
pub mod controllers;
pub mod cli;
pub mod error;

// Re-exports for convenience
pub use models::{classify, filter_and_sort, Config, HttpOutcome, OrderMode, Post, SocialClient};
pub use controllers::{run, start_app};
pub use error::PostameError;
