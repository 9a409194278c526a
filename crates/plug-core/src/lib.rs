//! Install transaction coordinator for plugsync
//!
//! Sits above the Layer 0 crates and below the CLI:
//!
//! ```text
//!                 plug-cli
//!                    |
//!                plug-core
//!                    |
//!     +--------------+--------------+
//!     |              |              |
//!  plug-fs       plug-meta      plug-fetch
//! ```
//!
//! A run is planned first (every fetcher resolved, every command working
//! name derived), then each destination is staged into a `-new` sibling,
//! local plugins are imported, and finally every staged destination is
//! swapped into place.

pub mod coordinator;
pub mod error;
pub mod local;
pub mod plan;
pub mod report;
pub mod transaction;

pub use coordinator::{Coordinator, RunOptions};
pub use error::{Error, Result};
pub use local::{LOCAL_DIR_NAME, LocalSource};
pub use plan::{PlannedFetch, RunPlan};
pub use report::RunReport;
pub use transaction::InstallTransaction;
