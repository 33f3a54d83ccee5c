use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::handle::{
    Decoration, DecorationLayer, EditorError, EditorEvent, EditorHandle, StyleClass,
};

/// Line/cursor-oriented widget. Text lives as a vector of lines, positions
/// are (line, character-column) pairs, and decorations are stored natively as
/// per-line style-class sets — the model of a gutter-based code editor.
#[derive(Debug)]
pub struct LineWidget {
    ready: bool,
    lines: Vec<String>,
    revision: u64,
    selection: Option<(usize, usize)>,
    layers: HashMap<DecorationLayer, BTreeMap<usize, Vec<StyleClass>>>,
    events: VecDeque<EditorEvent>,
}

impl LineWidget {
    pub fn new(text: &str) -> Self {
        Self {
            ready: true,
            lines: split_lines(text),
            revision: 0,
            selection: None,
            layers: HashMap::new(),
            events: VecDeque::new(),
        }
    }

    /// Widget before its buffer exists; every pass over it is a no-op until
    /// [`LineWidget::attach`].
    pub fn detached() -> Self {
        Self {
            ready: false,
            lines: vec![String::new()],
            revision: 0,
            selection: None,
            layers: HashMap::new(),
            events: VecDeque::new(),
        }
    }

    pub fn attach(&mut self, text: &str) {
        self.ready = true;
        self.lines = split_lines(text);
        self.touch();
    }

    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }

    pub fn set_contents(&mut self, text: &str) {
        if !self.ready {
            return;
        }
        self.lines = split_lines(text);
        self.touch();
    }

    /// A click on the line-number gutter. The gutter displays 1-based
    /// numbers; out-of-range values are ignored, the emitted event carries
    /// the 0-based index.
    pub fn click_gutter(&mut self, gutter_number: usize, x: f32, y: f32) {
        if !self.ready || gutter_number == 0 || gutter_number > self.lines.len() {
            return;
        }
        let line = gutter_number - 1;
        self.events.push_back(EditorEvent::LineNumberClicked {
            line,
            content: self.lines[line].clone(),
            x,
            y,
        });
    }

    /// Cursor-pair selection, as reported by the widget's "from"/"to"
    /// positions. Columns are character counts, clamped to the line length.
    /// An empty range clears the selection.
    pub fn set_selection(
        &mut self,
        anchor: (usize, usize),
        head: (usize, usize),
        x: f32,
        y: f32,
    ) {
        if !self.ready {
            return;
        }
        let (from, to) = if anchor <= head {
            (anchor, head)
        } else {
            (head, anchor)
        };
        let start_line = from.0.min(self.lines.len() - 1);
        let end_line = to.0.min(self.lines.len() - 1);

        let text = if start_line == end_line {
            let line = &self.lines[start_line];
            let begin = byte_index(line, from.1);
            let finish = byte_index(line, to.1.max(from.1));
            line[begin..finish].to_string()
        } else {
            let mut parts = Vec::with_capacity(end_line - start_line + 1);
            let first = &self.lines[start_line];
            parts.push(first[byte_index(first, from.1)..].to_string());
            for line in &self.lines[start_line + 1..end_line] {
                parts.push(line.clone());
            }
            let last = &self.lines[end_line];
            parts.push(last[..byte_index(last, to.1)].to_string());
            parts.join("\n")
        };

        if text.is_empty() {
            self.clear_selection();
            return;
        }
        self.selection = Some((start_line, end_line));
        self.events.push_back(EditorEvent::SelectionChanged {
            text,
            start_line,
            end_line,
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
        self.revision += 1;
        self.layers.clear();
        self.clear_selection();
        self.events.push_back(EditorEvent::ContentChanged);
    }

    fn check_index(&self, index: usize) -> Result<(), EditorError> {
        if !self.ready {
            return Err(EditorError::NotReady);
        }
        if index >= self.lines.len() {
            return Err(EditorError::LineOutOfBounds {
                index,
                count: self.lines.len(),
            });
        }
        Ok(())
    }
}

impl EditorHandle for LineWidget {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    fn lines(&self) -> Vec<String> {
        self.lines.clone()
    }

    fn set_decorations(&mut self, layer: DecorationLayer, decorations: Vec<Decoration>) {
        let count = self.lines.len();
        let classes: BTreeMap<usize, Vec<StyleClass>> = decorations
            .into_iter()
            .filter(|decoration| decoration.line < count)
            .map(|decoration| (decoration.line, decoration.styles))
            .collect();
        self.layers.insert(layer, classes);
    }

    fn clear_decorations(&mut self, layer: DecorationLayer) {
        self.layers.remove(&layer);
    }

    fn decorations(&self, layer: DecorationLayer) -> Vec<Decoration> {
        self.layers
            .get(&layer)
            .map(|classes| {
                classes
                    .iter()
                    .map(|(line, styles)| Decoration::new(*line, styles.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn delete_line(&mut self, index: usize) -> Result<(), EditorError> {
        self.check_index(index)?;
        if self.lines.len() == 1 {
            self.lines[0].clear();
        } else {
            self.lines.remove(index);
        }
        self.touch();
        Ok(())
    }

    fn duplicate_line(&mut self, index: usize) -> Result<(), EditorError> {
        self.check_index(index)?;
        let copy = self.lines[index].clone();
        self.lines.insert(index + 1, copy);
        self.touch();
        Ok(())
    }

    fn insert_line_above(&mut self, index: usize) -> Result<(), EditorError> {
        self.check_index(index)?;
        self.lines.insert(index, String::new());
        self.touch();
        Ok(())
    }

    fn insert_line_below(&mut self, index: usize) -> Result<(), EditorError> {
        self.check_index(index)?;
        self.lines.insert(index + 1, String::new());
        self.touch();
        Ok(())
    }

    fn drain_events(&mut self) -> Vec<EditorEvent> {
        self.events.drain(..).collect()
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

fn byte_index(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(index, _)| index)
        .unwrap_or(line.len())
}
