//! Release store access for the hosting forge.
//!
//! Provides token-based authentication, release lookup/creation/update and
//! pull request comments through a common trait.

/// Configuration and authentication for the forge connection.
pub mod config;

/// GitHub API client implementation.
pub mod github;

/// Release upsert and comment workflow on top of a [`traits::Forge`].
pub mod manager;

/// Request and response types shared by forge implementations.
pub mod request;

/// Common traits for forge platform abstraction.
pub mod traits;
