//! DOCX package access
//!
//! A `.docx` file is a zip container of XML parts. Only the main document
//! part is decoded; every other part is carried through byte-for-byte.
//!
//! ```text
//! .docx (zip)
//!     ↓
//! [DocxPackage] ── parts kept in archive order
//!     ↓
//! word/document.xml → XmlDocument → model::Document
//!     ↓ (scan, annotate)
//! model::Document → XmlDocument → word/document.xml
//!     ↓
//! .docx (zip)
//! ```

pub mod package;
pub mod xml;

pub use package::{DocxPackage, PackagePart};
pub use xml::{XmlDocument, XmlElement, XmlNode};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("failed to read or write the DOCX container: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML part is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("unbalanced XML element nesting")]
    Unbalanced,

    #[error("XML part has no root element")]
    MissingRoot,

    #[error("package has no main document part (expected {0})")]
    MissingMainPart(String),

    #[error("main document part is not a w:document with a w:body")]
    NotAWordDocument,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
