//! Review-session settings: the editor appearance bundle plus the two
//! suspicious-line flags, with JSON persistence.
//!
//! The settings carry a stable fingerprint so consumers can tell whether a
//! change actually affects them; the highlight synchronizer uses it to skip
//! redundant full-buffer rescans when the bundle is rewritten with the same
//! values.

mod review;
mod store;

pub use review::ReviewSettings;
pub use store::{SettingsError, SettingsStore};
