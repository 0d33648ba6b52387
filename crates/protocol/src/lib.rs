//! FeatureDev Protocol
//!
//! Shared types for communication between the featuredev chat UI and the
//! IDE host that backs it. These types are serialized as JSON over whatever
//! channel the host provides.

use uuid::Uuid;

// Re-exports
pub mod host;
pub mod types;
pub mod ui;

pub use host::HostMessage;
pub use types::*;
pub use ui::{HostBound, UiCommand};

/// Generate a new unique ID
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
