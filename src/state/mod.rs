// State management module
// Handles the capture screen and the latest annotation result

pub mod app_state;

pub use app_state::{AppState, Screen};
