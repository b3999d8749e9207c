//! KeySwitch persistence
//!
//! This module provides the data-access contract for the catalog and its
//! two backends.
//!
//! # Module Structure
//!
//! - [`error`] - Error taxonomy shared by all backends
//! - [`http`] - HTTP utilities for REST calls
//! - [`firebase`] - Firebase Realtime Database REST backend
//! - [`memory`] - In-process backend for offline use and tests
//!
//! # Example
//!
//! ```ignore
//! use mdex::store::{FirebaseKeySwitchService, KeySwitchService, StoreHttpClient};
//!
//! async fn example(base: &url::Url) -> anyhow::Result<()> {
//!     let store = FirebaseKeySwitchService::new(StoreHttpClient::new()?, base);
//!     let switches = store.get_all().await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod firebase;
pub mod http;
pub mod memory;

use crate::model::KeySwitch;
use async_trait::async_trait;

pub use error::{diagnostic_chain, StoreError};
pub use firebase::FirebaseKeySwitchService;
pub use http::StoreHttpClient;
pub use memory::MemoryKeySwitchService;

/// CRUD operations over the KeySwitch collection.
///
/// Every call is a single request/response pair; nothing is retried or
/// cached.
#[async_trait]
pub trait KeySwitchService: Send + Sync {
    /// Persist a pending record and return it with its generated id
    async fn create(&self, ks: KeySwitch) -> Result<KeySwitch, StoreError>;

    async fn get_by_id(&self, id: &str) -> Result<KeySwitch, StoreError>;

    /// Every stored record; an empty collection is an empty vector
    async fn get_all(&self) -> Result<Vec<KeySwitch>, StoreError>;

    /// Overwrite an existing record; fails without an id
    async fn update(&self, ks: KeySwitch) -> Result<KeySwitch, StoreError>;

    /// Remove a record; unknown ids are not an error
    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    /// Where the records live, for display
    fn describe(&self) -> String;
}
