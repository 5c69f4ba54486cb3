use super::xml::XmlDocument;
use super::DocxError;
use crate::model::Document;
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

const PACKAGE_RELATIONSHIPS: &str = "_rels/.rels";
const DEFAULT_MAIN_PART: &str = "word/document.xml";
const OFFICE_DOCUMENT_REL_SUFFIX: &str = "/officeDocument";

/// One entry of the zip container
#[derive(Debug, Clone)]
pub struct PackagePart {
    pub name: String,
    pub data: Vec<u8>,
    compression: CompressionMethod,
    last_modified: DateTime,
    is_dir: bool,
}

/// An opened `.docx` file with its main document decoded
#[derive(Debug, Clone)]
pub struct DocxPackage {
    parts: Vec<PackagePart>,
    main_part: usize,
    main_xml: XmlDocument,
    document: Document,
}

impl DocxPackage {
    pub fn open(path: &Path) -> Result<Self, DocxError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocxError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut parts = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            parts.push(PackagePart {
                name: file.name().to_string(),
                data,
                compression: file.compression(),
                last_modified: file.last_modified(),
                is_dir: file.is_dir(),
            });
        }

        let main_name = locate_main_part(&parts);
        let main_part = parts
            .iter()
            .position(|part| part.name == main_name)
            .ok_or_else(|| DocxError::MissingMainPart(main_name.clone()))?;

        let mut main_xml = XmlDocument::parse(&parts[main_part].data)?;
        let root = std::mem::take(&mut main_xml.root);
        let document = Document::from_element(root)?;

        Ok(Self {
            parts,
            main_part,
            main_xml,
            document,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Name of the decoded part, usually `word/document.xml`
    pub fn main_part_name(&self) -> &str {
        &self.parts[self.main_part].name
    }

    pub fn parts(&self) -> &[PackagePart] {
        &self.parts
    }

    /// Serialize the package, re-encoding only the main document part
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        let main_bytes = self
            .main_xml
            .with_root(self.document.to_element())
            .to_bytes()?;

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (index, part) in self.parts.iter().enumerate() {
            let options = FileOptions::default()
                .compression_method(writable_compression(part.compression))
                .last_modified_time(part.last_modified);

            if part.is_dir {
                writer.add_directory(part.name.clone(), options)?;
                continue;
            }

            writer.start_file(part.name.clone(), options)?;
            if index == self.main_part {
                writer.write_all(&main_bytes)?;
            } else {
                writer.write_all(&part.data)?;
            }
        }

        Ok(writer.finish()?.into_inner())
    }

    pub fn save(&self, path: &Path) -> Result<(), DocxError> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

/// Resolve the officeDocument relationship target, falling back to the
/// conventional location when the relationships part is missing or unreadable
fn locate_main_part(parts: &[PackagePart]) -> String {
    parts
        .iter()
        .find(|part| part.name == PACKAGE_RELATIONSHIPS)
        .and_then(|part| XmlDocument::parse(&part.data).ok())
        .and_then(|rels| {
            rels.root
                .elements()
                .filter(|rel| rel.name.ends_with("Relationship"))
                .find(|rel| {
                    rel.attr("Type")
                        .is_some_and(|kind| kind.ends_with(OFFICE_DOCUMENT_REL_SUFFIX))
                })
                .and_then(|rel| rel.attr("Target"))
                .map(|target| target.trim_start_matches('/').to_string())
        })
        .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string())
}

/// The writer only produces stored or deflated entries
fn writable_compression(method: CompressionMethod) -> CompressionMethod {
    match method {
        CompressionMethod::Stored => CompressionMethod::Stored,
        _ => CompressionMethod::Deflated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

    fn build_package(rels_target: Option<&str>, main_name: &str, body: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();

        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(CONTENT_TYPES.as_bytes()).unwrap();

        if let Some(target) = rels_target {
            writer.start_file(PACKAGE_RELATIONSHIPS, options).unwrap();
            let rels = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="{target}"/></Relationships>"#
            );
            writer.write_all(rels.as_bytes()).unwrap();
        }

        writer.start_file(main_name, options).unwrap();
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        writer.write_all(document.as_bytes()).unwrap();

        writer.start_file("word/media/image1.png", options).unwrap();
        writer.write_all(&[0x89, b'P', b'N', b'G', 0, 1, 2, 3]).unwrap();

        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_main_part_found_through_relationships() {
        let bytes = build_package(Some("/word/main.xml"), "word/main.xml", "<w:p/>");
        let package = DocxPackage::from_bytes(&bytes).unwrap();
        assert_eq!(package.main_part_name(), "word/main.xml");
    }

    #[test]
    fn test_main_part_falls_back_to_default_location() {
        let bytes = build_package(None, "word/document.xml", "<w:p/>");
        let package = DocxPackage::from_bytes(&bytes).unwrap();
        assert_eq!(package.main_part_name(), "word/document.xml");
    }

    #[test]
    fn test_missing_main_part_is_an_error() {
        let bytes = build_package(None, "word/elsewhere.xml", "<w:p/>");
        let err = DocxPackage::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, DocxError::MissingMainPart(_)));
    }

    #[test]
    fn test_unmodified_roundtrip_keeps_every_part() {
        let body = "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>A</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:sectPr/>";
        let bytes = build_package(Some("word/document.xml"), "word/document.xml", body);
        let package = DocxPackage::from_bytes(&bytes).unwrap();

        let rewritten = DocxPackage::from_bytes(&package.to_bytes().unwrap()).unwrap();

        let names: Vec<_> = rewritten.parts().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "word/document.xml",
                "word/media/image1.png"
            ]
        );
        assert_eq!(rewritten.parts()[3].data, package.parts()[3].data);
        assert_eq!(
            rewritten.document().to_element(),
            package.document().to_element()
        );
    }

    #[test]
    fn test_not_a_zip_is_an_error() {
        assert!(matches!(
            DocxPackage::from_bytes(b"plain text"),
            Err(DocxError::Zip(_))
        ));
    }
}
