use std::collections::{HashMap, VecDeque};
use std::ops::Range;

use crate::handle::{
    Decoration, DecorationLayer, EditorError, EditorEvent, EditorHandle, StyleClass,
};

/// Offset/range-oriented widget. Text is one string, positions are byte
/// offsets, and decorations are stored natively as byte ranges replaced
/// wholesale per layer — the model of a delta-decoration editor. Offsets are
/// converted to 0-based line indices at the trait boundary.
#[derive(Debug)]
pub struct SpanWidget {
    ready: bool,
    contents: String,
    line_starts: Vec<usize>,
    revision: u64,
    selection: Option<Range<usize>>,
    layers: HashMap<DecorationLayer, Vec<SpanDecoration>>,
    events: VecDeque<EditorEvent>,
}

#[derive(Debug, Clone)]
struct SpanDecoration {
    range: Range<usize>,
    styles: Vec<StyleClass>,
}

impl SpanWidget {
    pub fn new(text: &str) -> Self {
        let mut widget = Self {
            ready: true,
            contents: text.to_string(),
            line_starts: Vec::new(),
            revision: 0,
            selection: None,
            layers: HashMap::new(),
            events: VecDeque::new(),
        };
        widget.rebuild_index();
        widget
    }

    /// Widget before its buffer exists; every pass over it is a no-op until
    /// [`SpanWidget::attach`].
    pub fn detached() -> Self {
        let mut widget = Self::new("");
        widget.ready = false;
        widget
    }

    pub fn attach(&mut self, text: &str) {
        self.ready = true;
        self.contents = text.to_string();
        self.touch();
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn set_contents(&mut self, text: &str) {
        if !self.ready {
            return;
        }
        self.contents = text.to_string();
        self.touch();
    }

    /// A click on the number margin, reported as a byte offset into the
    /// buffer. The emitted event carries the containing line's 0-based index.
    pub fn click_margin(&mut self, offset: usize, x: f32, y: f32) {
        if !self.ready {
            return;
        }
        let line = self.line_at_offset(offset.min(self.contents.len()));
        let range = self.line_range(line);
        self.events.push_back(EditorEvent::LineNumberClicked {
            line,
            content: self.contents[range].to_string(),
            x,
            y,
        });
    }

    /// Byte-range selection. Bounds are clamped to the buffer and snapped
    /// down to character boundaries; an empty range clears the selection.
    pub fn select_range(&mut self, a: usize, b: usize, x: f32, y: f32) {
        if !self.ready {
            return;
        }
        let start = self.snap(a.min(b));
        let end = self.snap(a.max(b));
        if start == end {
            self.clear_selection();
            return;
        }
        self.selection = Some(start..end);
        self.events.push_back(EditorEvent::SelectionChanged {
            text: self.contents[start..end].to_string(),
            start_line: self.line_at_offset(start),
            end_line: self.line_at_offset(end),
            x,
            y,
        });
    }

    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.events.push_back(EditorEvent::SelectionCleared);
        }
    }

    fn touch(&mut self) {
        self.rebuild_index();
        self.revision += 1;
        self.layers.clear();
        self.clear_selection();
        self.events.push_back(EditorEvent::ContentChanged);
    }

    fn rebuild_index(&mut self) {
        self.line_starts.clear();
        self.line_starts.push(0);
        for (index, byte) in self.contents.bytes().enumerate() {
            if byte == b'\n' {
                self.line_starts.push(index + 1);
            }
        }
    }

    fn line_at_offset(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|start| *start <= offset) - 1
    }

    /// Byte range of the line's content, excluding the trailing newline.
    fn line_range(&self, index: usize) -> Range<usize> {
        let start = self.line_starts[index];
        let end = self
            .line_starts
            .get(index + 1)
            .map(|next| next - 1)
            .unwrap_or(self.contents.len());
        start..end
    }

    fn snap(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.contents.len());
        while !self.contents.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    fn check_index(&self, index: usize) -> Result<(), EditorError> {
        if !self.ready {
            return Err(EditorError::NotReady);
        }
        if index >= self.line_starts.len() {
            return Err(EditorError::LineOutOfBounds {
                index,
                count: self.line_starts.len(),
            });
        }
        Ok(())
    }
}

impl EditorHandle for SpanWidget {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        if index >= self.line_starts.len() {
            return None;
        }
        Some(&self.contents[self.line_range(index)])
    }

    fn lines(&self) -> Vec<String> {
        self.contents.split('\n').map(str::to_string).collect()
    }

    fn set_decorations(&mut self, layer: DecorationLayer, decorations: Vec<Decoration>) {
        let count = self.line_starts.len();
        let spans = decorations
            .into_iter()
            .filter(|decoration| decoration.line < count)
            .map(|decoration| SpanDecoration {
                range: self.line_range(decoration.line),
                styles: decoration.styles,
            })
            .collect();
        self.layers.insert(layer, spans);
    }

    fn clear_decorations(&mut self, layer: DecorationLayer) {
        self.layers.remove(&layer);
    }

    fn decorations(&self, layer: DecorationLayer) -> Vec<Decoration> {
        let mut decorations: Vec<Decoration> = self
            .layers
            .get(&layer)
            .map(|spans| {
                spans
                    .iter()
                    .map(|span| {
                        Decoration::new(self.line_at_offset(span.range.start), span.styles.clone())
                    })
                    .collect()
            })
            .unwrap_or_default();
        decorations.sort_by_key(|decoration| decoration.line);
        decorations
    }

    fn delete_line(&mut self, index: usize) -> Result<(), EditorError> {
        self.check_index(index)?;
        if self.line_starts.len() == 1 {
            self.contents.clear();
        } else {
            let start = self.line_starts[index];
            let end = self
                .line_starts
                .get(index + 1)
                .copied()
                .unwrap_or(self.contents.len());
            if index + 1 == self.line_starts.len() {
                // Last line: remove the preceding newline instead.
                self.contents.replace_range(start - 1..end, "");
            } else {
                self.contents.replace_range(start..end, "");
            }
        }
        self.touch();
        Ok(())
    }

    fn duplicate_line(&mut self, index: usize) -> Result<(), EditorError> {
        self.check_index(index)?;
        let copy = self.contents[self.line_range(index)].to_string();
        match self.line_starts.get(index + 1).copied() {
            Some(next_start) => {
                self.contents.insert_str(next_start, &format!("{copy}\n"));
            }
            None => {
                self.contents.push('\n');
                self.contents.push_str(&copy);
            }
        }
        self.touch();
        Ok(())
    }

    fn insert_line_above(&mut self, index: usize) -> Result<(), EditorError> {
        self.check_index(index)?;
        let start = self.line_starts[index];
        self.contents.insert(start, '\n');
        self.touch();
        Ok(())
    }

    fn insert_line_below(&mut self, index: usize) -> Result<(), EditorError> {
        self.check_index(index)?;
        match self.line_starts.get(index + 1).copied() {
            Some(next_start) => self.contents.insert(next_start, '\n'),
            None => self.contents.push('\n'),
        }
        self.touch();
        Ok(())
    }

    fn drain_events(&mut self) -> Vec<EditorEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_index_tracks_newlines() {
        let widget = SpanWidget::new("alpha\nbeta\ngamma");
        assert_eq!(widget.line_count(), 3);
        assert_eq!(widget.line(1), Some("beta"));
        assert_eq!(widget.line(3), None);
    }

    #[test]
    fn trailing_newline_yields_trailing_empty_line() {
        let widget = SpanWidget::new("alpha\n");
        assert_eq!(widget.line_count(), 2);
        assert_eq!(widget.line(1), Some(""));
    }

    #[test]
    fn margin_click_reports_containing_line() {
        let mut widget = SpanWidget::new("alpha\nbeta");
        widget.click_margin(7, 3.0, 6.0);
        assert_eq!(
            widget.drain_events(),
            vec![EditorEvent::LineNumberClicked {
                line: 1,
                content: "beta".to_string(),
                x: 3.0,
                y: 6.0,
            }]
        );
    }

    #[test]
    fn range_selection_maps_offsets_to_lines() {
        let mut widget = SpanWidget::new("alpha\nbeta\ngamma");
        // "pha\nbeta\ngam", reversed bounds.
        widget.select_range(14, 2, 1.0, 2.0);
        assert_eq!(
            widget.drain_events(),
            vec![EditorEvent::SelectionChanged {
                text: "pha\nbeta\ngam".to_string(),
                start_line: 0,
                end_line: 2,
                x: 1.0,
                y: 2.0,
            }]
        );
    }

    #[test]
    fn selection_bounds_snap_to_char_boundaries() {
        let mut widget = SpanWidget::new("привет");
        // Byte 3 splits the second character; snaps down to 2.
        widget.select_range(0, 3, 0.0, 0.0);
        match widget.drain_events().pop() {
            Some(EditorEvent::SelectionChanged { text, .. }) => assert_eq!(text, "п"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn empty_range_clears_selection() {
        let mut widget = SpanWidget::new("alpha");
        widget.select_range(1, 3, 0.0, 0.0);
        widget.select_range(2, 2, 0.0, 0.0);
        let events = widget.drain_events();
        assert_eq!(events[1], EditorEvent::SelectionCleared);
    }

    #[test]
    fn delete_first_middle_and_last_lines() {
        let mut widget = SpanWidget::new("a\nb\nc");
        widget.delete_line(2).unwrap();
        assert_eq!(widget.contents(), "a\nb");
        widget.delete_line(0).unwrap();
        assert_eq!(widget.contents(), "b");
        widget.delete_line(0).unwrap();
        assert_eq!(widget.contents(), "");
        assert_eq!(widget.line_count(), 1);
    }

    #[test]
    fn duplicate_and_insert_primitives() {
        let mut widget = SpanWidget::new("alpha\nbeta");
        widget.duplicate_line(1).unwrap();
        assert_eq!(widget.contents(), "alpha\nbeta\nbeta");
        widget.insert_line_above(0).unwrap();
        assert_eq!(widget.contents(), "\nalpha\nbeta\nbeta");
        widget.insert_line_below(3).unwrap();
        assert_eq!(widget.contents(), "\nalpha\nbeta\nbeta\n");
    }

    #[test]
    fn edits_bump_revision_and_drop_decorations() {
        let mut widget = SpanWidget::new("alpha\nbeta");
        widget.set_decorations(
            DecorationLayer::Suspicious,
            vec![Decoration::new(1, vec![StyleClass::Suspicious])],
        );
        assert_eq!(
            widget.decorations(DecorationLayer::Suspicious),
            vec![Decoration::new(1, vec![StyleClass::Suspicious])]
        );
        let before = widget.revision();
        widget.insert_line_above(0).unwrap();
        assert!(widget.revision() > before);
        assert!(widget.decorations(DecorationLayer::Suspicious).is_empty());
    }

    #[test]
    fn detached_widget_rejects_edits_until_attached() {
        let mut widget = SpanWidget::detached();
        assert!(!widget.is_ready());
        assert_eq!(widget.delete_line(0), Err(EditorError::NotReady));
        widget.attach("alpha");
        assert!(widget.is_ready());
        assert!(widget.delete_line(0).is_ok());
    }
}
