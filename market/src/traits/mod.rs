//! Trait abstractions for dependency injection and testability.
//!
//! The browsing core talks to its collaborators (document store, clock,
//! identity source, router) only through these traits, so it can be driven
//! by in-memory fakes in tests and by real adapters in the binaries.

pub mod identity;
pub mod navigator;
pub mod store;
pub mod time;

pub use identity::{Identity, IdentityProvider, StaticIdentity};
pub use navigator::{ChannelNavigator, NavigationIntent, Navigator};
pub use store::{Document, DocumentStore};
pub use time::{SystemTimeProvider, TimeProvider};
