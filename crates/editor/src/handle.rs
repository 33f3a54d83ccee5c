use thiserror::Error;

/// Independent decoration layers. Replacing one layer never disturbs the
/// others.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationLayer {
    /// Lines flagged by the classifier.
    Suspicious,
    /// Clean lines visually collapsed while "hide clean" is active.
    Hidden,
    /// The line currently under review.
    ActiveLine,
}

impl DecorationLayer {
    pub const ALL: [DecorationLayer; 3] = [
        DecorationLayer::Suspicious,
        DecorationLayer::Hidden,
        DecorationLayer::ActiveLine,
    ];
}

/// Visual styles a decoration can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleClass {
    Suspicious,
    ForeignAlphabet,
    SourceSpam,
    TargetSpam,
    Hidden,
    ActiveLine,
}

impl StyleClass {
    /// Stylesheet class name for renderers.
    pub fn class_name(&self) -> &'static str {
        match self {
            StyleClass::Suspicious => "suspicious-line",
            StyleClass::ForeignAlphabet => "sl-latin",
            StyleClass::SourceSpam => "sl-source-spam",
            StyleClass::TargetSpam => "sl-target-spam",
            StyleClass::Hidden => "hidden-line",
            StyleClass::ActiveLine => "active-line",
        }
    }
}

/// A full-line visual annotation: style classes attached to a 0-based line
/// index. Decorations never alter buffer content and live only until the
/// owning layer is next replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoration {
    pub line: usize,
    pub styles: Vec<StyleClass>,
}

impl Decoration {
    pub fn new(line: usize, styles: Vec<StyleClass>) -> Self {
        Self { line, styles }
    }
}

/// Normalized events emitted by every widget. Line indices are always
/// 0-based regardless of what the underlying widget displays.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    LineNumberClicked {
        line: usize,
        content: String,
        x: f32,
        y: f32,
    },
    SelectionChanged {
        text: String,
        start_line: usize,
        end_line: usize,
        x: f32,
        y: f32,
    },
    SelectionCleared,
    ContentChanged,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("line {index} is out of bounds for a buffer of {count} lines")]
    LineOutOfBounds { index: usize, count: usize },
    #[error("editor widget is not ready")]
    NotReady,
}

/// Common interface over the two editor widgets.
///
/// Content is an ordered sequence of lines; a buffer always has at least one
/// (possibly empty) line. `revision` increases on every content mutation,
/// which also drops all decoration layers — stale decorations are never left
/// behind for a recompute to race against. Events accumulate until drained.
pub trait EditorHandle {
    /// False until the widget is attached to a buffer. All mutation through
    /// the trait fails with [`EditorError::NotReady`] before that.
    fn is_ready(&self) -> bool;

    /// Monotonic content counter; bumps on every mutation.
    fn revision(&self) -> u64;

    fn line_count(&self) -> usize;

    fn line(&self, index: usize) -> Option<&str>;

    fn lines(&self) -> Vec<String>;

    /// Atomically replaces the given layer with the supplied decorations.
    /// Decorations addressing lines past the end of the buffer are ignored.
    fn set_decorations(&mut self, layer: DecorationLayer, decorations: Vec<Decoration>);

    fn clear_decorations(&mut self, layer: DecorationLayer);

    /// Current decorations on the layer, ordered by line.
    fn decorations(&self, layer: DecorationLayer) -> Vec<Decoration>;

    fn delete_line(&mut self, index: usize) -> Result<(), EditorError>;

    fn duplicate_line(&mut self, index: usize) -> Result<(), EditorError>;

    fn insert_line_above(&mut self, index: usize) -> Result<(), EditorError>;

    fn insert_line_below(&mut self, index: usize) -> Result<(), EditorError>;

    /// Removes and returns all pending events in emission order.
    fn drain_events(&mut self) -> Vec<EditorEvent>;
}
