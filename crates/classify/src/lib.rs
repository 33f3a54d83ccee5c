//! Heuristic line classification for translated chapter text.
//!
//! A translated document is expected to contain only target-language prose.
//! Lines that still carry source-language text, or that match known
//! promotional/boilerplate phrases in either language, are flagged for human
//! review. Classification is pure string/regex work: no state, no I/O, safe to
//! run on every keystroke or over a whole buffer.

mod classifier;
mod rules;

pub use classifier::{FlaggedLine, LineClassifier, LineFlags, ScanReport, ScanSummary};
pub use rules::{builtin, ClassifyError, RuleSet};
