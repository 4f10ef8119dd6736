//! Application modules for the auction browser UI.

pub mod components;
pub mod state;

pub use components::app;
pub use state::{SharedAppState, SHARED_STATE};
