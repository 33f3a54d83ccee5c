//! Editor widget adapters behind a single interface.
//!
//! The review UI historically ran on two different editor widgets: one
//! addresses text by line and cursor column, the other by byte offset and
//! range. [`EditorHandle`] normalizes both to a common vocabulary — 0-based
//! line indices, layered full-line decorations, and a small set of events —
//! so consumers never branch on which widget is active. The widget is chosen
//! once at construction time.

mod handle;
mod line_widget;
mod span_widget;

pub use handle::{
    Decoration, DecorationLayer, EditorError, EditorEvent, EditorHandle, StyleClass,
};
pub use line_widget::LineWidget;
pub use span_widget::SpanWidget;
