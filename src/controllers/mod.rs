pub mod app_controller;
pub mod command_controller;
pub mod post_controller;

// Re-export key functions
pub use app_controller::start_app;
pub use command_controller::{run, Context};
