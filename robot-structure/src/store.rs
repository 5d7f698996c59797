//! Open documents shared with concurrent readers
//!
//! The store holds the latest [`ParsedDocument`] for each file. A parse pass
//! builds a document privately and publishes it here when done; readers get
//! an `Arc` to that finished document. Reparsing publishes a replacement and
//! closing the file discards it. Nothing is shared between documents.

use std::sync::Arc;

use dashmap::DashMap;
use url::Url;

use crate::document::ParsedDocument;

/// Latest parsed document per file
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<ParsedDocument>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a finished document for `uri`, replacing any previous one.
    ///
    /// Readers holding the previous document keep it alive until they drop it.
    pub fn publish(&self, uri: Url, document: ParsedDocument) -> Arc<ParsedDocument> {
        let document = Arc::new(document);
        tracing::debug!(
            "Document published: {} ({} definitions)",
            uri,
            document.definition_count()
        );
        if self.documents.insert(uri, Arc::clone(&document)).is_some() {
            tracing::debug!("Replaced previous parse");
        }
        document
    }

    pub fn get(&self, uri: &Url) -> Option<Arc<ParsedDocument>> {
        self.documents
            .get(uri)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Discard the document for `uri`. Returns whether one was open.
    pub fn close(&self, uri: &Url) -> bool {
        let removed = self.documents.remove(uri).is_some();
        if removed {
            tracing::debug!("Document closed: {}", uri);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
