use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub content_type: String,
    /// Any other keys carried by the source (page number, author, ...).
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl DocumentMetadata {
    #[must_use]
    pub fn new(source: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content_type: content_type.into(),
            extra: HashMap::new(),
        }
    }
}

/// One unit of extracted text. A missing or `null` content field
/// deserializes to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Document {
    #[serde(default, alias = "page_content", deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl Document {
    #[must_use]
    pub fn new(content: impl Into<String>, metadata: DocumentMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ordered documents as produced by a loader. Positions are the indices
/// referenced by validation reports.
#[derive(Debug, Clone, Default)]
pub struct DocumentCollection {
    documents: Vec<Document>,
}

impl DocumentCollection {
    #[must_use]
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Document] {
        &self.documents
    }

    pub fn extend(&mut self, documents: impl IntoIterator<Item = Document>) {
        self.documents.extend(documents);
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Document> {
        self.documents
    }
}

impl From<Vec<Document>> for DocumentCollection {
    fn from(documents: Vec<Document>) -> Self {
        Self::new(documents)
    }
}

impl FromIterator<Document> for DocumentCollection {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DocumentCollection {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_doc(content: &str) -> Document {
        Document::new(content, DocumentMetadata::new("test", "text/plain"))
    }

    #[test]
    fn get_returns_document_at_position() {
        let collection: DocumentCollection =
            ["first", "second", "third"].into_iter().map(make_doc).collect();
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.get(1).unwrap().content, "second");
    }

    #[test]
    fn get_out_of_range_is_none() {
        let collection = DocumentCollection::new(vec![make_doc("only")]);
        assert!(collection.get(1).is_none());
        assert!(DocumentCollection::default().get(0).is_none());
    }

    #[test]
    fn extend_preserves_insertion_order() {
        let mut collection = DocumentCollection::new(vec![make_doc("a")]);
        collection.extend(vec![make_doc("b"), make_doc("c")]);
        let contents: Vec<&str> = collection.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_content_deserializes_empty() {
        let doc: Document = serde_json::from_str(r#"{"metadata": {"source": "x.pdf"}}"#).unwrap();
        assert!(doc.content.is_empty());
        assert_eq!(doc.metadata.source, "x.pdf");
    }

    #[test]
    fn null_content_deserializes_empty() {
        let doc: Document = serde_json::from_str(r#"{"content": null}"#).unwrap();
        assert!(doc.content.is_empty());
    }

    #[test]
    fn page_content_alias_accepted() {
        let doc: Document = serde_json::from_str(
            r#"{"page_content": "hello", "metadata": {"source": "a.pdf", "page": 3}}"#,
        )
        .unwrap();
        assert_eq!(doc.content, "hello");
        assert_eq!(doc.metadata.extra["page"], serde_json::json!(3));
    }
}
