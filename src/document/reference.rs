use super::{Document, DocumentBody, DocumentKind, Property};
use crate::records::ProductRecord;

/// Map a record's non-identifying fields into a reference topic.
pub fn build_reference(record: &ProductRecord) -> Document {
    let properties = record
        .attributes()
        .map(|(name, value)| Property {
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect();

    Document {
        kind: DocumentKind::Reference,
        id: record.id().to_string(),
        title: format!("Technical Specifications for {}", record.name()),
        body: DocumentBody::Properties(properties),
    }
}
