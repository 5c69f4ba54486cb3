//! Cell classification: pure checks of a single cell against the table
//! conventions. Nothing here writes to the document.

use crate::annotator::Annotator;
use crate::config::ConventionConfig;
use crate::model::{Cell, Paragraph};
use crate::types::FindingKind;
use regex::Regex;
use std::sync::LazyLock;

const HYPHEN: char = '-';
const EM_DASH: char = '\u{2014}';

// A hyphen with a space on either side
static SPACED_HYPHEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" -|- ").unwrap());

/// One hyphen-convention check and the finding it produces
pub struct HyphenRule {
    pub kind: FindingKind,
    pub violated: fn(text: &str, na_sentinel: &str) -> bool,
}

/// Hyphen-convention checks in priority order; the first violated rule wins
pub static HYPHEN_RULES: [HyphenRule; 3] = [
    HyphenRule {
        kind: FindingKind::RedundantSpaces,
        violated: has_spaced_hyphen,
    },
    HyphenRule {
        kind: FindingKind::DashInsteadOfHyphen,
        violated: has_em_dash,
    },
    HyphenRule {
        kind: FindingKind::MissingHyphen,
        violated: lacks_hyphen,
    },
];

fn has_spaced_hyphen(text: &str, _na_sentinel: &str) -> bool {
    SPACED_HYPHEN_REGEX.is_match(text)
}

fn has_em_dash(text: &str, _na_sentinel: &str) -> bool {
    text.contains(EM_DASH)
}

fn lacks_hyphen(text: &str, na_sentinel: &str) -> bool {
    !text.contains(HYPHEN) && !text.contains(EM_DASH) && text != na_sentinel
}

/// True when no paragraph holds anything but whitespace.
/// Images and other embedded objects make a cell non-empty.
pub fn is_empty(cell: &Cell) -> bool {
    !cell.has_content()
}

/// First hyphen-convention finding for a cell's text, if any.
/// Surrounding whitespace is ignored.
pub fn hyphen_convention_violation(text: &str, na_sentinel: &str) -> Option<FindingKind> {
    let text = text.trim();
    HYPHEN_RULES
        .iter()
        .find(|rule| (rule.violated)(text, na_sentinel))
        .map(|rule| rule.kind)
}

/// A centered paragraph in `cell` needs an explanation in the row's
/// annotation cell: either the exemption phrase or an earlier alignment finding
pub fn alignment_violation(
    cell: &Cell,
    annotation_cell: &Cell,
    conventions: &ConventionConfig,
    annotator: &Annotator,
) -> bool {
    cell.paragraphs().any(Paragraph::is_centered)
        && !annotation_cell
            .text()
            .contains(&conventions.alignment_exemption)
        && !annotator.detect(
            annotation_cell,
            Some(FindingKind::MissingAlignmentComment.label()),
        )
}

/// A line break inside the text (leading and trailing ones don't count)
pub fn line_break_violation(text: &str) -> bool {
    text.trim().contains('\n')
}
