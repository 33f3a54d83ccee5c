use redpen_classify::LineClassifier;
use redpen_editor::{Decoration, DecorationLayer, EditorHandle, StyleClass};
use redpen_settings::ReviewSettings;

/// What a refresh pass did, mostly for tests and report output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The editor widget has no buffer yet; nothing happened.
    NotReady,
    /// Buffer and settings are unchanged since the last pass; nothing to do.
    Unchanged,
    /// Highlighting is disabled; decoration layers were cleared.
    Cleared,
    /// Decorations were recomputed and applied.
    Applied { suspicious: usize, hidden: usize },
}

/// Owns the classifier and the last-seen (revision, fingerprint) pair for one
/// editor. One synchronizer per editor instance; the state is only a cache,
/// so recreating it merely costs one extra scan.
#[derive(Debug, Default)]
pub struct HighlightSynchronizer {
    classifier: LineClassifier,
    last_pass: Option<(u64, u64)>,
}

impl HighlightSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classifier(classifier: LineClassifier) -> Self {
        Self {
            classifier,
            last_pass: None,
        }
    }

    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Runs one highlight pass. Skips work when the editor is not ready or
    /// when neither the buffer revision nor the settings fingerprint changed
    /// since the previous pass.
    pub fn refresh(
        &mut self,
        editor: &mut dyn EditorHandle,
        settings: &ReviewSettings,
    ) -> RefreshOutcome {
        if !editor.is_ready() {
            return RefreshOutcome::NotReady;
        }
        let pass = (editor.revision(), settings.fingerprint());
        if self.last_pass == Some(pass) {
            return RefreshOutcome::Unchanged;
        }
        self.last_pass = Some(pass);
        self.apply(editor, settings)
    }

    /// Like [`HighlightSynchronizer::refresh`] but ignores the change gate.
    pub fn force_refresh(
        &mut self,
        editor: &mut dyn EditorHandle,
        settings: &ReviewSettings,
    ) -> RefreshOutcome {
        if !editor.is_ready() {
            return RefreshOutcome::NotReady;
        }
        self.last_pass = Some((editor.revision(), settings.fingerprint()));
        self.apply(editor, settings)
    }

    fn apply(
        &mut self,
        editor: &mut dyn EditorHandle,
        settings: &ReviewSettings,
    ) -> RefreshOutcome {
        if !settings.highlight_suspicious {
            editor.clear_decorations(DecorationLayer::Suspicious);
            editor.clear_decorations(DecorationLayer::Hidden);
            return RefreshOutcome::Cleared;
        }

        let lines = editor.lines();
        let mut suspicious = Vec::new();
        let mut hidden = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            let flags = self.classifier.classify(line);
            if flags.is_suspicious() {
                let mut styles = vec![StyleClass::Suspicious];
                if flags.foreign_alphabet {
                    styles.push(StyleClass::ForeignAlphabet);
                }
                if flags.source_spam {
                    styles.push(StyleClass::SourceSpam);
                }
                if flags.target_spam {
                    styles.push(StyleClass::TargetSpam);
                }
                suspicious.push(Decoration::new(index, styles));
            } else if settings.hide_clean {
                hidden.push(Decoration::new(index, vec![StyleClass::Hidden]));
            }
        }

        let applied = RefreshOutcome::Applied {
            suspicious: suspicious.len(),
            hidden: if settings.hide_clean { hidden.len() } else { 0 },
        };
        editor.set_decorations(DecorationLayer::Suspicious, suspicious);
        if settings.hide_clean {
            editor.set_decorations(DecorationLayer::Hidden, hidden);
        } else {
            editor.clear_decorations(DecorationLayer::Hidden);
        }
        applied
    }

    /// Moves the active-line marker, or clears it with `None`. Independent of
    /// the refresh gate; out-of-range lines just clear the marker.
    pub fn set_active_line(&self, editor: &mut dyn EditorHandle, line: Option<usize>) {
        if !editor.is_ready() {
            return;
        }
        editor.clear_decorations(DecorationLayer::ActiveLine);
        if let Some(line) = line {
            if line < editor.line_count() {
                editor.set_decorations(
                    DecorationLayer::ActiveLine,
                    vec![Decoration::new(line, vec![StyleClass::ActiveLine])],
                );
            }
        }
    }
}
