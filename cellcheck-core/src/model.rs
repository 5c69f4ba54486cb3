//! Typed view of a WordprocessingML body.
//!
//! Tables, rows, cells, paragraphs and runs are decoded into their own types;
//! every other node (properties, bookmarks, grids, section settings...) stays
//! as the original XML node at its original position. Encoding a decoded body
//! therefore reproduces it, plus whatever the scanner appended.

use crate::docx::xml::{XmlElement, XmlNode};
use crate::docx::DocxError;

/// Qualified WordprocessingML names used by the model
pub mod tags {
    pub const DOCUMENT: &str = "w:document";
    pub const BODY: &str = "w:body";
    pub const TABLE: &str = "w:tbl";
    pub const ROW: &str = "w:tr";
    pub const CELL: &str = "w:tc";
    pub const CELL_PROPS: &str = "w:tcPr";
    pub const GRID_SPAN: &str = "w:gridSpan";
    pub const VERTICAL_MERGE: &str = "w:vMerge";
    pub const PARAGRAPH: &str = "w:p";
    pub const PARAGRAPH_PROPS: &str = "w:pPr";
    pub const JUSTIFICATION: &str = "w:jc";
    pub const HYPERLINK: &str = "w:hyperlink";
    pub const RUN: &str = "w:r";
    pub const RUN_PROPS: &str = "w:rPr";
    pub const TEXT: &str = "w:t";
    pub const TAB: &str = "w:tab";
    pub const POSITIONAL_TAB: &str = "w:ptab";
    pub const BREAK: &str = "w:br";
    pub const CARRIAGE_RETURN: &str = "w:cr";
    pub const NO_BREAK_HYPHEN: &str = "w:noBreakHyphen";
    pub const SOFT_HYPHEN: &str = "w:softHyphen";
    pub const RENDERED_PAGE_BREAK: &str = "w:lastRenderedPageBreak";
    pub const BOLD: &str = "w:b";
    pub const COLOR: &str = "w:color";
    pub const UNDERLINE: &str = "w:u";
    pub const VAL: &str = "w:val";
}

/// Child order of `w:rPr` (CT_RPr)
const RUN_PROPERTY_ORDER: &[&str] = &[
    "w:rStyle", "w:rFonts", "w:b", "w:bCs", "w:i", "w:iCs", "w:caps", "w:smallCaps",
    "w:strike", "w:dstrike", "w:outline", "w:shadow", "w:emboss", "w:imprint",
    "w:noProof", "w:snapToGrid", "w:vanish", "w:webHidden", "w:color", "w:spacing",
    "w:w", "w:kern", "w:position", "w:sz", "w:szCs", "w:highlight", "w:u", "w:effect",
    "w:bdr", "w:shd", "w:fitText", "w:vertAlign", "w:rtl", "w:cs", "w:em", "w:lang",
    "w:eastAsianLayout", "w:specVanish", "w:oMath", "w:rPrChange",
];

/// `w:rPr` always leads a run
const RUN_CHILD_ORDER: &[&str] = &[tags::RUN_PROPS];

/// Paragraph justification, as read from `w:pPr/w:jc`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    Other,
}

impl Alignment {
    fn from_val(val: &str) -> Self {
        match val {
            "left" | "start" => Alignment::Left,
            "center" => Alignment::Center,
            "right" | "end" => Alignment::Right,
            "both" | "distribute" => Alignment::Justify,
            _ => Alignment::Other,
        }
    }
}

fn element_node<'a>(node: &'a XmlNode, name: &str) -> Option<&'a XmlElement> {
    node.as_element().filter(|element| element.name == name)
}

/// OOXML on/off property: present without `w:val`, or with a truthy one
fn is_on(property: &XmlElement) -> bool {
    !matches!(property.attr(tags::VAL), Some("0" | "false" | "off"))
}

/// Non-whitespace text or any embedded object inside `element`.
///
/// Runs decide for themselves; a nested table is always content; anything
/// else is content when one of its descendants is.
fn element_has_content(element: &XmlElement) -> bool {
    match element.name.as_str() {
        tags::RUN => run_has_content(element),
        tags::TABLE => true,
        _ => element.elements().any(element_has_content),
    }
}

fn run_has_content(run: &XmlElement) -> bool {
    run.elements().any(|child| match child.name.as_str() {
        tags::RUN_PROPS => false,
        tags::TEXT => !child.text().trim().is_empty(),
        tags::TAB
        | tags::POSITIONAL_TAB
        | tags::BREAK
        | tags::CARRIAGE_RETURN
        | tags::SOFT_HYPHEN
        | tags::RENDERED_PAGE_BREAK => false,
        // drawings, pictures, objects, fields, symbols, hyphens...
        _ => true,
    })
}

fn run_text(run: &XmlElement) -> String {
    let mut text = String::new();
    for child in run.elements() {
        match child.name.as_str() {
            tags::TEXT => text.push_str(&child.text()),
            tags::TAB | tags::POSITIONAL_TAB => text.push('\t'),
            tags::BREAK | tags::CARRIAGE_RETURN => text.push('\n'),
            tags::NO_BREAK_HYPHEN => text.push('-'),
            _ => {}
        }
    }
    text
}

// ============================================================================
// Run
// ============================================================================

/// A `w:r` element: styled text plus any inline objects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    element: XmlElement,
}

impl Default for Run {
    fn default() -> Self {
        Self::new()
    }
}

impl Run {
    pub fn new() -> Self {
        Self {
            element: XmlElement::new(tags::RUN),
        }
    }

    pub fn from_element(element: XmlElement) -> Self {
        Self { element }
    }

    pub fn to_element(&self) -> XmlElement {
        self.element.clone()
    }

    pub fn text(&self) -> String {
        run_text(&self.element)
    }

    /// True unless the run holds only whitespace, breaks and tabs
    pub fn has_content(&self) -> bool {
        run_has_content(&self.element)
    }

    fn properties(&self) -> Option<&XmlElement> {
        self.element.child(tags::RUN_PROPS)
    }

    fn properties_mut(&mut self) -> &mut XmlElement {
        self.element.ensure_child(tags::RUN_PROPS, RUN_CHILD_ORDER)
    }

    pub fn is_bold(&self) -> bool {
        self.properties()
            .and_then(|props| props.child(tags::BOLD))
            .is_some_and(is_on)
    }

    /// Hex value of `w:color`, e.g. `FF0000`
    pub fn color(&self) -> Option<&str> {
        self.properties()
            .and_then(|props| props.child(tags::COLOR))
            .and_then(|color| color.attr(tags::VAL))
    }

    pub fn is_underlined(&self) -> bool {
        self.properties()
            .and_then(|props| props.child(tags::UNDERLINE))
            .is_some_and(|underline| underline.attr(tags::VAL) != Some("none"))
    }

    pub fn set_bold(&mut self, bold: bool) {
        let props = self.properties_mut();
        if bold {
            props
                .ensure_child(tags::BOLD, RUN_PROPERTY_ORDER)
                .attributes
                .retain(|(key, _)| key != tags::VAL);
        } else {
            props.remove_child(tags::BOLD);
        }
    }

    pub fn set_color(&mut self, hex: &str) {
        self.properties_mut()
            .ensure_child(tags::COLOR, RUN_PROPERTY_ORDER)
            .set_attr(tags::VAL, hex);
    }

    pub fn set_underline(&mut self, underline: bool) {
        let props = self.properties_mut();
        if underline {
            props
                .ensure_child(tags::UNDERLINE, RUN_PROPERTY_ORDER)
                .set_attr(tags::VAL, "single");
        } else {
            props.remove_child(tags::UNDERLINE);
        }
    }

    pub fn push_break(&mut self) {
        self.element
            .children
            .push(XmlNode::Element(XmlElement::new(tags::BREAK)));
    }

    pub fn push_text(&mut self, text: &str) {
        let mut node = XmlElement::new(tags::TEXT).with_text(text);
        if text.trim() != text {
            node.set_attr("xml:space", "preserve");
        }
        self.element.children.push(XmlNode::Element(node));
    }
}

// ============================================================================
// Paragraph
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphItem {
    Run(Run),
    Other(XmlNode),
}

/// A `w:p` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    shell: XmlElement,
    items: Vec<ParagraphItem>,
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Paragraph {
    pub fn new() -> Self {
        Self {
            shell: XmlElement::new(tags::PARAGRAPH),
            items: Vec::new(),
        }
    }

    pub fn from_element(element: XmlElement) -> Self {
        let items = element
            .children
            .iter()
            .cloned()
            .map(|node| match node {
                XmlNode::Element(el) if el.name == tags::RUN => {
                    ParagraphItem::Run(Run::from_element(el))
                }
                other => ParagraphItem::Other(other),
            })
            .collect();
        Self {
            shell: element.shell(),
            items,
        }
    }

    pub fn to_element(&self) -> XmlElement {
        let mut element = self.shell.clone();
        element.children = self
            .items
            .iter()
            .map(|item| match item {
                ParagraphItem::Run(run) => XmlNode::Element(run.to_element()),
                ParagraphItem::Other(node) => node.clone(),
            })
            .collect();
        element
    }

    /// Direct `w:r` children (runs nested in hyperlinks are not included)
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.items.iter().filter_map(|item| match item {
            ParagraphItem::Run(run) => Some(run),
            ParagraphItem::Other(_) => None,
        })
    }

    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut Run> {
        self.items.iter_mut().filter_map(|item| match item {
            ParagraphItem::Run(run) => Some(run),
            ParagraphItem::Other(_) => None,
        })
    }

    pub fn push_run(&mut self, run: Run) {
        self.items.push(ParagraphItem::Run(run));
    }

    /// Direct `w:jc` justification; `None` when the paragraph inherits it
    pub fn alignment(&self) -> Option<Alignment> {
        self.items
            .iter()
            .find_map(|item| match item {
                ParagraphItem::Other(node) => element_node(node, tags::PARAGRAPH_PROPS),
                ParagraphItem::Run(_) => None,
            })
            .and_then(|props| props.child(tags::JUSTIFICATION))
            .and_then(|jc| jc.attr(tags::VAL))
            .map(Alignment::from_val)
    }

    pub fn is_centered(&self) -> bool {
        self.alignment() == Some(Alignment::Center)
    }

    /// Run text, including runs inside hyperlinks
    pub fn text(&self) -> String {
        let mut text = String::new();
        for item in &self.items {
            match item {
                ParagraphItem::Run(run) => text.push_str(&run.text()),
                ParagraphItem::Other(node) => {
                    if let Some(link) = element_node(node, tags::HYPERLINK) {
                        for run in link.elements().filter(|el| el.name == tags::RUN) {
                            text.push_str(&run_text(run));
                        }
                    }
                }
            }
        }
        text
    }

    pub fn has_content(&self) -> bool {
        self.items.iter().any(|item| match item {
            ParagraphItem::Run(run) => run.has_content(),
            ParagraphItem::Other(XmlNode::Element(element)) => element_has_content(element),
            ParagraphItem::Other(_) => false,
        })
    }
}

// ============================================================================
// Cell
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellItem {
    Paragraph(Paragraph),
    Other(XmlNode),
}

/// A `w:tc` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    shell: XmlElement,
    items: Vec<CellItem>,
}

impl Cell {
    pub fn from_element(element: XmlElement) -> Self {
        let items = element
            .children
            .iter()
            .cloned()
            .map(|node| match node {
                XmlNode::Element(el) if el.name == tags::PARAGRAPH => {
                    CellItem::Paragraph(Paragraph::from_element(el))
                }
                other => CellItem::Other(other),
            })
            .collect();
        Self {
            shell: element.shell(),
            items,
        }
    }

    /// Decode a cell from its XML text, e.g. `<w:tc><w:p/></w:tc>`
    pub fn parse(xml: &str) -> Result<Self, DocxError> {
        Ok(Self::from_element(XmlElement::parse_fragment(xml)?))
    }

    pub fn to_element(&self) -> XmlElement {
        let mut element = self.shell.clone();
        element.children = self
            .items
            .iter()
            .map(|item| match item {
                CellItem::Paragraph(paragraph) => XmlNode::Element(paragraph.to_element()),
                CellItem::Other(node) => node.clone(),
            })
            .collect();
        element
    }

    fn properties(&self) -> Option<&XmlElement> {
        self.items.iter().find_map(|item| match item {
            CellItem::Other(node) => element_node(node, tags::CELL_PROPS),
            CellItem::Paragraph(_) => None,
        })
    }

    /// Number of grid columns the cell covers (`w:gridSpan`, at least 1)
    pub fn grid_span(&self) -> usize {
        self.properties()
            .and_then(|props| props.child(tags::GRID_SPAN))
            .and_then(|span| span.attr(tags::VAL))
            .and_then(|val| val.trim().parse::<usize>().ok())
            .filter(|&span| span > 0)
            .unwrap_or(1)
    }

    /// Whether this cell continues a vertical merge started in a row above.
    /// Such a cell has no content of its own; it shows the merge's top cell.
    pub fn is_merge_continuation(&self) -> bool {
        self.properties()
            .and_then(|props| props.child(tags::VERTICAL_MERGE))
            .is_some_and(|merge| merge.attr(tags::VAL).map_or(true, |val| val == "continue"))
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.items.iter().filter_map(|item| match item {
            CellItem::Paragraph(paragraph) => Some(paragraph),
            CellItem::Other(_) => None,
        })
    }

    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.items.iter_mut().filter_map(|item| match item {
            CellItem::Paragraph(paragraph) => Some(paragraph),
            CellItem::Other(_) => None,
        })
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.paragraphs().flat_map(Paragraph::runs)
    }

    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut Run> {
        self.paragraphs_mut().flat_map(Paragraph::runs_mut)
    }

    /// Last paragraph of the cell, appending an empty one if there is none
    pub fn last_paragraph_mut(&mut self) -> &mut Paragraph {
        let index = match self
            .items
            .iter()
            .rposition(|item| matches!(item, CellItem::Paragraph(_)))
        {
            Some(index) => index,
            None => {
                self.items.push(CellItem::Paragraph(Paragraph::new()));
                self.items.len() - 1
            }
        };
        match &mut self.items[index] {
            CellItem::Paragraph(paragraph) => paragraph,
            CellItem::Other(_) => unreachable!("index was chosen to point at a paragraph"),
        }
    }

    /// Paragraph texts joined by line breaks
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_content(&self) -> bool {
        self.items.iter().any(|item| match item {
            CellItem::Paragraph(paragraph) => paragraph.has_content(),
            CellItem::Other(XmlNode::Element(element)) => element_has_content(element),
            CellItem::Other(_) => false,
        })
    }
}

// ============================================================================
// Row / Table
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowItem {
    Cell(Cell),
    Other(XmlNode),
}

/// A `w:tr` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    shell: XmlElement,
    items: Vec<RowItem>,
}

impl Row {
    pub fn from_element(element: XmlElement) -> Self {
        let items = element
            .children
            .iter()
            .cloned()
            .map(|node| match node {
                XmlNode::Element(el) if el.name == tags::CELL => RowItem::Cell(Cell::from_element(el)),
                other => RowItem::Other(other),
            })
            .collect();
        Self {
            shell: element.shell(),
            items,
        }
    }

    pub fn to_element(&self) -> XmlElement {
        let mut element = self.shell.clone();
        element.children = self
            .items
            .iter()
            .map(|item| match item {
                RowItem::Cell(cell) => XmlNode::Element(cell.to_element()),
                RowItem::Other(node) => node.clone(),
            })
            .collect();
        element
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.items.iter().filter_map(|item| match item {
            RowItem::Cell(cell) => Some(cell),
            RowItem::Other(_) => None,
        })
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.items.iter_mut().filter_map(|item| match item {
            RowItem::Cell(cell) => Some(cell),
            RowItem::Other(_) => None,
        })
    }

    /// Cells paired with the first grid column each one covers
    pub fn grid_cells(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells().scan(0, |next, cell| {
            let start = *next;
            *next += cell.grid_span();
            Some((start, cell))
        })
    }

    pub fn grid_cells_mut(&mut self) -> impl Iterator<Item = (usize, &mut Cell)> {
        self.cells_mut().scan(0, |next, cell| {
            let start = *next;
            *next += cell.grid_span();
            Some((start, cell))
        })
    }

    /// Grid columns covered by the row's cells
    pub fn grid_width(&self) -> usize {
        self.cells().map(Cell::grid_span).sum()
    }

    /// The cell covering grid column `column`. A horizontally merged cell is
    /// returned for every column it spans.
    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.grid_cells()
            .find(|(start, cell)| column < start + cell.grid_span())
            .map(|(_, cell)| cell)
    }

    pub fn cell_mut(&mut self, column: usize) -> Option<&mut Cell> {
        self.grid_cells_mut()
            .find(|(start, cell)| column < *start + cell.grid_span())
            .map(|(_, cell)| cell)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableItem {
    Row(Row),
    Other(XmlNode),
}

/// A `w:tbl` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    shell: XmlElement,
    items: Vec<TableItem>,
}

impl Table {
    pub fn from_element(element: XmlElement) -> Self {
        let items = element
            .children
            .iter()
            .cloned()
            .map(|node| match node {
                XmlNode::Element(el) if el.name == tags::ROW => TableItem::Row(Row::from_element(el)),
                other => TableItem::Other(other),
            })
            .collect();
        Self {
            shell: element.shell(),
            items,
        }
    }

    /// Decode a table from its XML text
    pub fn parse(xml: &str) -> Result<Self, DocxError> {
        Ok(Self::from_element(XmlElement::parse_fragment(xml)?))
    }

    pub fn to_element(&self) -> XmlElement {
        let mut element = self.shell.clone();
        element.children = self
            .items
            .iter()
            .map(|item| match item {
                TableItem::Row(row) => XmlNode::Element(row.to_element()),
                TableItem::Other(node) => node.clone(),
            })
            .collect();
        element
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.items.iter().filter_map(|item| match item {
            TableItem::Row(row) => Some(row),
            TableItem::Other(_) => None,
        })
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut Row> {
        self.items.iter_mut().filter_map(|item| match item {
            TableItem::Row(row) => Some(row),
            TableItem::Other(_) => None,
        })
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows().nth(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows_mut().nth(index)
    }

    /// Row holding the top cell of the vertical merge that covers
    /// (`row`, `column`); `row` itself when the cell is not merged
    pub fn merge_origin(&self, row: usize, column: usize) -> usize {
        let mut origin = row;
        while origin > 0
            && self
                .row(origin)
                .and_then(|r| r.cell(column))
                .is_some_and(Cell::is_merge_continuation)
        {
            origin -= 1;
        }
        origin
    }

    pub fn row_count(&self) -> usize {
        self.rows().count()
    }
}

// ============================================================================
// Document
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyItem {
    Table(Table),
    Other(XmlNode),
}

/// The decoded main document part.
///
/// `root` is the `w:document` element with an empty `w:body`; the body's
/// content lives in `body` until the document is encoded again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: XmlElement,
    body: Vec<BodyItem>,
}

impl Document {
    pub fn from_element(mut root: XmlElement) -> Result<Self, DocxError> {
        if root.name != tags::DOCUMENT {
            return Err(DocxError::NotAWordDocument);
        }
        let body = root
            .child_mut(tags::BODY)
            .ok_or(DocxError::NotAWordDocument)?;
        let body = std::mem::take(&mut body.children)
            .into_iter()
            .map(|node| match node {
                XmlNode::Element(el) if el.name == tags::TABLE => {
                    BodyItem::Table(Table::from_element(el))
                }
                other => BodyItem::Other(other),
            })
            .collect();
        Ok(Self { root, body })
    }

    pub fn to_element(&self) -> XmlElement {
        let mut root = self.root.clone();
        if let Some(body) = root.child_mut(tags::BODY) {
            body.children = self
                .body
                .iter()
                .map(|item| match item {
                    BodyItem::Table(table) => XmlNode::Element(table.to_element()),
                    BodyItem::Other(node) => node.clone(),
                })
                .collect();
        }
        root
    }

    /// Top-level body tables, in document order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|item| match item {
            BodyItem::Table(table) => Some(table),
            BodyItem::Other(_) => None,
        })
    }

    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.body.iter_mut().filter_map(|item| match item {
            BodyItem::Table(table) => Some(table),
            BodyItem::Other(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(xml: &str) -> Cell {
        Cell::parse(xml).unwrap()
    }

    #[test]
    fn test_cell_text_joins_paragraphs_with_line_breaks() {
        let c = cell(
            "<w:tc><w:tcPr/><w:p><w:r><w:t>one</w:t><w:tab/><w:t>two</w:t></w:r></w:p>\
             <w:p><w:r><w:t>three</w:t><w:br/><w:t>four</w:t></w:r></w:p></w:tc>",
        );
        assert_eq!(c.text(), "one\ttwo\nthree\nfour");
    }

    #[test]
    fn test_hyperlink_text_counts_toward_paragraph_text() {
        let c = cell(
            r#"<w:tc><w:p><w:r><w:t xml:space="preserve">see </w:t></w:r><w:hyperlink r:id="rId4"><w:r><w:t>here</w:t></w:r></w:hyperlink></w:p></w:tc>"#,
        );
        assert_eq!(c.text(), "see here");
        assert_eq!(c.runs().count(), 1);
    }

    #[test]
    fn test_whitespace_only_cell_has_no_content() {
        let c = cell(r#"<w:tc><w:p><w:r><w:t xml:space="preserve">   </w:t><w:tab/></w:r></w:p><w:p/></w:tc>"#);
        assert!(!c.has_content());
    }

    #[test]
    fn test_drawing_counts_as_content() {
        let c = cell("<w:tc><w:p><w:r><w:drawing><wp:inline/></w:drawing></w:r></w:p></w:tc>");
        assert!(c.has_content());
        assert_eq!(c.text().trim(), "");
    }

    #[test]
    fn test_nested_table_counts_as_content() {
        let c = cell("<w:tc><w:tbl><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl><w:p/></w:tc>");
        assert!(c.has_content());
    }

    #[test]
    fn test_run_style_flags() {
        let c = cell(
            r#"<w:tc><w:p><w:r><w:rPr><w:b/><w:color w:val="FF0000"/><w:u w:val="single"/></w:rPr><w:t>X</w:t></w:r>
               <w:r><w:rPr><w:b w:val="0"/><w:u w:val="none"/></w:rPr><w:t>y</w:t></w:r></w:p></w:tc>"#,
        );
        let runs: Vec<_> = c.runs().collect();
        assert!(runs[0].is_bold());
        assert_eq!(runs[0].color(), Some("FF0000"));
        assert!(runs[0].is_underlined());
        assert!(!runs[1].is_bold());
        assert!(!runs[1].is_underlined());
        assert_eq!(runs[1].color(), None);
    }

    #[test]
    fn test_underline_inserted_in_schema_order() {
        let mut c = cell(
            r#"<w:tc><w:p><w:r><w:rPr><w:b/><w:sz w:val="20"/><w:lang w:val="en-US"/></w:rPr><w:t>X</w:t></w:r></w:p></w:tc>"#,
        );
        let run = c.runs_mut().next().unwrap();
        run.set_underline(true);

        let element = run.to_element();
        let names: Vec<_> = element
            .child(tags::RUN_PROPS)
            .unwrap()
            .elements()
            .map(|e| e.name.clone())
            .collect();
        assert_eq!(names, vec!["w:b", "w:sz", "w:u", "w:lang"]);
    }

    #[test]
    fn test_run_properties_created_ahead_of_text() {
        let mut run = Run::new();
        run.push_text("LABEL");
        run.set_bold(true);
        run.set_color("FF0000");

        let names: Vec<_> = run.to_element().elements().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["w:rPr", "w:t"]);
        assert!(run.is_bold());
    }

    #[test]
    fn test_paragraph_alignment() {
        let c = cell(
            r#"<w:tc><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>a</w:t></w:r></w:p><w:p><w:r><w:t>b</w:t></w:r></w:p></w:tc>"#,
        );
        let alignments: Vec<_> = c.paragraphs().map(Paragraph::alignment).collect();
        assert_eq!(alignments, vec![Some(Alignment::Center), None]);
    }

    #[test]
    fn test_last_paragraph_created_when_missing() {
        let mut c = cell("<w:tc><w:tcPr/></w:tc>");
        c.last_paragraph_mut().push_run(Run::new());
        assert_eq!(c.paragraphs().count(), 1);

        let names: Vec<_> = c.to_element().elements().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["w:tcPr", "w:p"]);
    }

    #[test]
    fn test_table_roundtrip_preserves_unknown_nodes() {
        let xml = r#"<w:tbl><w:tblPr><w:tblW w:w="0"/></w:tblPr><w:tblGrid/><w:tr><w:trPr/><w:tc><w:p><w:bookmarkStart w:id="0"/><w:r><w:t>A</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#;
        let element = XmlElement::parse_fragment(xml).unwrap();
        let table = Table::from_element(element.clone());

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.row(0).unwrap().grid_width(), 1);
        assert_eq!(table.to_element(), element);
    }

    #[test]
    fn test_spanned_cell_covers_each_of_its_grid_columns() {
        let table = Table::parse(
            r#"<w:tbl><w:tr><w:tc><w:tcPr><w:gridSpan w:val="2"/></w:tcPr><w:p><w:r><w:t>Field</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>CDASH</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        )
        .unwrap();
        let row = table.row(0).unwrap();

        assert_eq!(row.grid_width(), 3);
        assert_eq!(row.cell(0).unwrap().text(), "Field");
        assert_eq!(row.cell(1).unwrap().text(), "Field");
        assert_eq!(row.cell(2).unwrap().text(), "CDASH");
        assert!(row.cell(3).is_none());
        let starts: Vec<usize> = row.grid_cells().map(|(start, _)| start).collect();
        assert_eq!(starts, vec![0, 2]);
    }

    #[test]
    fn test_vertical_merge_continuation() {
        let table = Table::parse(
            r#"<w:tbl>
<w:tr><w:tc><w:tcPr><w:vMerge w:val="restart"/></w:tcPr><w:p><w:r><w:t>Demographics</w:t></w:r></w:p></w:tc><w:tc><w:p/></w:tc></w:tr>
<w:tr><w:tc><w:tcPr><w:vMerge/></w:tcPr><w:p/></w:tc><w:tc><w:p/></w:tc></w:tr>
<w:tr><w:tc><w:tcPr><w:vMerge w:val="continue"/></w:tcPr><w:p/></w:tc><w:tc><w:p/></w:tc></w:tr>
</w:tbl>"#,
        )
        .unwrap();

        assert!(!table.row(0).unwrap().cell(0).unwrap().is_merge_continuation());
        assert!(table.row(1).unwrap().cell(0).unwrap().is_merge_continuation());
        assert!(table.row(2).unwrap().cell(0).unwrap().is_merge_continuation());
        assert_eq!(table.merge_origin(2, 0), 0);
        assert_eq!(table.merge_origin(2, 1), 2);
    }

    #[test]
    fn test_document_requires_body() {
        let root = XmlElement::parse_fragment("<w:document/>").unwrap();
        assert!(matches!(
            Document::from_element(root),
            Err(DocxError::NotAWordDocument)
        ));
    }

    #[test]
    fn test_document_lists_only_top_level_tables() {
        let root = XmlElement::parse_fragment(
            "<w:document><w:body><w:p/><w:tbl><w:tr><w:tc><w:tbl/><w:p/></w:tc></w:tr></w:tbl><w:tbl/><w:sectPr/></w:body></w:document>",
        )
        .unwrap();
        let document = Document::from_element(root.clone()).unwrap();

        assert_eq!(document.tables().count(), 2);
        assert_eq!(document.to_element(), root);
    }
}
