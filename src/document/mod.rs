//! Generated DITA topics and their on-disk layout.
//!
//! Each product yields one topic per [`DocumentKind`]; bodies are either a
//! property list or a single narrative paragraph.
mod concept;
mod reference;
mod xml;

pub use concept::build_concept;
pub use reference::build_reference;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File extension for generated topics.
pub const DITA_EXTENSION: &str = "dita";

/// The two document shapes produced per product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Reference,
    Concept,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Reference, DocumentKind::Concept];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Reference => "Reference",
            DocumentKind::Concept => "Concept",
        }
    }

    fn file_suffix(self) -> &'static str {
        match self {
            DocumentKind::Reference => "reference",
            DocumentKind::Concept => "concept",
        }
    }

    fn root_element(self) -> &'static str {
        self.file_suffix()
    }

    fn public_id(self) -> &'static str {
        match self {
            DocumentKind::Reference => "-//OASIS//DTD DITA Reference//EN",
            DocumentKind::Concept => "-//OASIS//DTD DITA Concept//EN",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "reference" => Ok(DocumentKind::Reference),
            "concept" => Ok(DocumentKind::Concept),
            _ => Err(anyhow!(
                "unknown document kind {s:?} (expected reference or concept)"
            )),
        }
    }
}

/// One `<property>` row of a reference topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: String,
}

/// Body of a concept topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narrative {
    /// A well-formed `<p>` element, emitted verbatim.
    Markup(String),
    /// Plain text, escaped into a `<p>` element.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentBody {
    Properties(Vec<Property>),
    Narrative(Narrative),
}

/// A topic ready to be rendered and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub kind: DocumentKind,
    pub id: String,
    pub title: String,
    pub body: DocumentBody,
}

/// DTD locations declared in generated doctypes, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPaths {
    pub reference_dtd: String,
    pub concept_dtd: String,
}

impl SchemaPaths {
    pub fn dtd_for(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Reference => &self.reference_dtd,
            DocumentKind::Concept => &self.concept_dtd,
        }
    }
}

/// File name for a product's topic of the given kind.
pub fn document_file_name(record_id: &str, kind: DocumentKind) -> String {
    format!("{record_id}_{}.{DITA_EXTENSION}", kind.file_suffix())
}

/// Render a topic, including XML declaration and doctype.
pub fn render_document(document: &Document, schemas: &SchemaPaths) -> String {
    xml::render(document, schemas.dtd_for(document.kind))
}

/// Render and write a topic into `output_dir`, returning the written path.
///
/// Existing files are overwritten.
pub fn write_document(
    output_dir: &Path,
    record_id: &str,
    document: &Document,
    schemas: &SchemaPaths,
) -> Result<PathBuf> {
    let path = output_dir.join(document_file_name(record_id, document.kind));
    let text = render_document(document, schemas);
    fs::write(&path, text.as_bytes()).with_context(|| format!("write document {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schemas() -> SchemaPaths {
        SchemaPaths {
            reference_dtd: "dtds/reference.dtd".to_string(),
            concept_dtd: "dtds/concept.dtd".to_string(),
        }
    }

    #[test]
    fn file_names_follow_kind_suffix() {
        assert_eq!(
            document_file_name("A-50", DocumentKind::Reference),
            "A-50_reference.dita"
        );
        assert_eq!(
            document_file_name("A-50", DocumentKind::Concept),
            "A-50_concept.dita"
        );
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("concept".parse::<DocumentKind>().unwrap(), DocumentKind::Concept);
        assert_eq!("Reference".parse::<DocumentKind>().unwrap(), DocumentKind::Reference);
        assert!("task".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn write_document_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut document = Document {
            kind: DocumentKind::Concept,
            id: "X_summary".to_string(),
            title: "About the X".to_string(),
            body: DocumentBody::Narrative(Narrative::Text("first".to_string())),
        };
        let path = write_document(dir.path(), "X", &document, &schemas()).unwrap();
        document.body = DocumentBody::Narrative(Narrative::Text("second".to_string()));
        let again = write_document(dir.path(), "X", &document, &schemas()).unwrap();

        assert_eq!(path, again);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("second"));
        assert!(!text.contains("first"));
    }

    #[test]
    fn write_document_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let document = Document {
            kind: DocumentKind::Reference,
            id: "X".to_string(),
            title: "t".to_string(),
            body: DocumentBody::Properties(Vec::new()),
        };
        let missing = dir.path().join("absent");
        let err = write_document(&missing, "X", &document, &schemas()).unwrap_err();
        assert!(err.to_string().contains("write document"));
    }
}
