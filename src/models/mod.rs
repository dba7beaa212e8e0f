pub mod client;
pub mod config;
pub mod outcome;
pub mod post;
pub mod profile;
pub mod session;
pub mod view;

// Re-export important structs for convenience
pub use client::SocialClient;
pub use config::Config;
pub use outcome::{classify, classify_failure, ApiFailure, HttpOutcome};
pub use post::{Post, PostDraft};
pub use profile::Profile;
pub use session::{Session, SessionStore};
pub use view::{filter_and_sort, OrderMode};
