//! I/O adapters for the exchange gateway.
//!
//! - [`OpenErApiProvider`]: live rate tables over HTTP
//! - [`OpendalSnapshotStore`]: rate cache persistence in any OpenDAL backend

pub mod client;
pub mod store;

pub use client::OpenErApiProvider;
pub use store::OpendalSnapshotStore;
