use serde::Serialize;

use crate::rules::{builtin, RuleSet};

/// Classification tags attached transiently to a single line. A line with any
/// tag set is "suspicious" and should be surfaced for review.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LineFlags {
    /// The line still contains at least one ASCII Latin letter — a heuristic
    /// for untranslated source text left in a target-language document.
    pub foreign_alphabet: bool,
    /// The line matches a source-language promotional/boilerplate pattern.
    pub source_spam: bool,
    /// The line matches a target-language promotional/boilerplate pattern.
    pub target_spam: bool,
}

impl LineFlags {
    pub fn is_suspicious(&self) -> bool {
        self.foreign_alphabet || self.source_spam || self.target_spam
    }

    pub fn is_clean(&self) -> bool {
        !self.is_suspicious()
    }

    /// Short labels for the set tags, used by report renderers.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.foreign_alphabet {
            labels.push("latin");
        }
        if self.source_spam {
            labels.push("source-spam");
        }
        if self.target_spam {
            labels.push("target-spam");
        }
        labels
    }
}

/// Stateless line classifier. Holds the compiled rule sets; construction is
/// the only place a pattern error can surface, `classify` itself never fails.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    source_rules: RuleSet,
    target_rules: RuleSet,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LineClassifier {
    /// Classifier with the built-in English/Russian rule sets.
    pub fn new() -> Self {
        Self {
            source_rules: builtin::source_spam(),
            target_rules: builtin::target_spam(),
        }
    }

    /// Classifier with caller-supplied rule sets.
    pub fn with_rules(source_rules: RuleSet, target_rules: RuleSet) -> Self {
        Self {
            source_rules,
            target_rules,
        }
    }

    pub fn source_rules(&self) -> &RuleSet {
        &self.source_rules
    }

    pub fn target_rules(&self) -> &RuleSet {
        &self.target_rules
    }

    /// Classifies one line. Empty input yields all-false flags.
    pub fn classify(&self, line: &str) -> LineFlags {
        if line.is_empty() {
            return LineFlags::default();
        }
        LineFlags {
            foreign_alphabet: line.bytes().any(|byte| byte.is_ascii_alphabetic()),
            source_spam: self.source_rules.matches(line),
            target_spam: self.target_rules.matches(line),
        }
    }

    /// Runs the classifier over an ordered line sequence and collects every
    /// flagged line along with aggregate counters.
    pub fn classify_lines<'a, I>(&self, lines: I) -> ScanReport
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut report = ScanReport::default();
        for (index, line) in lines.into_iter().enumerate() {
            report.total_lines += 1;
            let flags = self.classify(line);
            if flags.is_clean() {
                continue;
            }
            report.flagged.push(FlaggedLine {
                line: index,
                flags,
                text: line.to_string(),
            });
        }
        report
    }
}

/// One flagged line inside a [`ScanReport`]. `line` is the 0-based position
/// in the scanned buffer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlaggedLine {
    pub line: usize,
    pub flags: LineFlags,
    pub text: String,
}

/// Aggregated classification results for one buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub flagged: Vec<FlaggedLine>,
    pub total_lines: usize,
}

/// Per-category counters, used for report headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub total_lines: usize,
    pub suspicious_lines: usize,
    pub foreign_alphabet: usize,
    pub source_spam: usize,
    pub target_spam: usize,
}

impl ScanReport {
    pub fn is_clean(&self) -> bool {
        self.flagged.is_empty()
    }

    pub fn suspicious_lines(&self) -> usize {
        self.flagged.len()
    }

    pub fn summary(&self) -> ScanSummary {
        let mut summary = ScanSummary {
            total_lines: self.total_lines,
            suspicious_lines: self.flagged.len(),
            foreign_alphabet: 0,
            source_spam: 0,
            target_spam: 0,
        };
        for entry in &self.flagged {
            if entry.flags.foreign_alphabet {
                summary.foreign_alphabet += 1;
            }
            if entry.flags.source_spam {
                summary.source_spam += 1;
            }
            if entry.flags.target_spam {
                summary.target_spam += 1;
            }
        }
        summary
    }
}
