//! Store-backed operations and store adapters.

pub mod json_file;
pub mod listing_ops;
pub mod profile_ops;

pub use json_file::JsonFileStore;
pub use listing_ops::ListingOperations;
pub use profile_ops::RoleResolver;
