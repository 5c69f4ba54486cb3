//! Finding annotations: writing them into cells and recognizing them again.
//!
//! The document format gives us no metadata channel we use for this, so an
//! annotation is just a run with a recognizable shape. What that shape is
//! lives behind [`FindingMarker`]; callers only ever ask the [`Annotator`].

use crate::model::{Cell, Run};
use crate::types::FindingKind;

/// Alert color of annotation runs (hex RGB as written to `w:color`)
pub const ALERT_COLOR: &str = "FF0000";

/// How an annotation run looks, and how to tell one apart from user text
pub trait FindingMarker {
    /// Is this run an annotation written by a previous pass?
    fn is_finding(&self, run: &Run) -> bool;

    /// Build a new annotation run carrying `label`
    fn finding_run(&self, label: &str, leading_break: bool) -> Run;

    /// Flag an annotation as seen on a later pass
    fn mark_seen(&self, run: &mut Run) {
        run.set_underline(true);
    }
}

/// Bold, alert-colored, all upper-case text.
///
/// Any user-authored run styled the same way is taken for an annotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyledMarker;

impl FindingMarker for StyledMarker {
    fn is_finding(&self, run: &Run) -> bool {
        run.is_bold()
            && run
                .color()
                .is_some_and(|color| color.eq_ignore_ascii_case(ALERT_COLOR))
            && is_upper_case(run.text().trim())
    }

    fn finding_run(&self, label: &str, leading_break: bool) -> Run {
        let mut run = Run::new();
        run.set_bold(true);
        run.set_color(ALERT_COLOR);
        if leading_break {
            run.push_break();
        }
        run.push_text(label);
        run
    }
}

/// At least one cased character and no lower-case ones
pub fn is_upper_case(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        cased |= c.is_uppercase();
    }
    cased
}

pub struct Annotator {
    marker: Box<dyn FindingMarker>,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(Box::new(StyledMarker))
    }
}

impl Annotator {
    pub fn new(marker: Box<dyn FindingMarker>) -> Self {
        Self { marker }
    }

    fn matches(&self, run: &Run, label: Option<&str>) -> bool {
        self.marker.is_finding(run) && label.map_or(true, |label| run.text().contains(label))
    }

    /// Whether the cell carries an annotation (containing `label`, if given).
    /// Read-only; nothing is marked.
    pub fn detect(&self, cell: &Cell, label: Option<&str>) -> bool {
        cell.runs().any(|run| self.matches(run, label))
    }

    /// Like [`Annotator::detect`], but every matching annotation is also
    /// marked as seen
    pub fn has_finding(&self, cell: &mut Cell, label: Option<&str>) -> bool {
        !self.mark_existing(cell, label).is_empty()
    }

    /// Mark every matching annotation as seen and return their labels
    pub fn mark_existing(&self, cell: &mut Cell, label: Option<&str>) -> Vec<String> {
        let mut labels = Vec::new();
        for run in cell.runs_mut() {
            if self.matches(run, label) {
                self.marker.mark_seen(run);
                labels.push(run.text().trim().to_string());
            }
        }
        labels
    }

    /// Append an annotation to the end of the cell's last paragraph.
    ///
    /// The annotation starts on a new line unless the paragraph holds nothing
    /// yet. Existing runs are never touched.
    pub fn add_finding(&self, cell: &mut Cell, kind: FindingKind) {
        let paragraph = cell.last_paragraph_mut();
        let leading_break = paragraph.has_content();
        paragraph.push_run(self.marker.finding_run(kind.label(), leading_break));
    }

    /// Add the annotation unless the cell already carries one of this kind.
    /// Returns whether anything was written.
    pub fn annotate_once(&self, cell: &mut Cell, kind: FindingKind) -> bool {
        if self.detect(cell, Some(kind.label())) {
            return false;
        }
        self.add_finding(cell, kind);
        true
    }
}
