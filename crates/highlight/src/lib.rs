//! Keeps an editor's suspicious-line decorations in sync with its buffer and
//! the review settings.
//!
//! Every pass replaces whole decoration layers (clear-then-apply), so a
//! reader never observes a mix of stale and fresh highlights. Passes are
//! gated on the pair (buffer revision, settings fingerprint): rewriting the
//! settings with unchanged values, or calling refresh twice in a row, costs
//! nothing.

mod sync;

pub use sync::{HighlightSynchronizer, RefreshOutcome};
