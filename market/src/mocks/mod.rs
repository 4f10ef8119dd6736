//! Mock implementations for testing.
//!
//! This module provides mock implementations of the trait abstractions
//! that allow unit testing without external dependencies.

pub mod identity;
pub mod navigator;
pub mod store;
pub mod time;

pub use identity::MockIdentity;
pub use navigator::RecordingNavigator;
pub use store::{MockStore, MockStoreFailure};
pub use time::MockTime;
