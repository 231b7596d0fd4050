//! Persistence contract for annotations, plus an in-memory implementation.
//!
//! The engine never calls a store itself. Hosts drain the engine's actions
//! through [`apply_actions`] (or their own equivalent), and reload a page
//! with [`AnnotationStore::list`] when they need the canonical list back.
//! Failures are not retried and local state is not rolled back.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::doc::{Annotation, AnnotationId};
use crate::engine::Action;

/// Identifier of the document an annotation set belongs to.
pub type DocumentId = Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("annotation not found: {0}")]
    NotFound(AnnotationId),
    #[error("annotation {id} belongs to page {actual}, not {expected}")]
    WrongPage { id: AnnotationId, expected: u32, actual: u32 },
    #[error("annotation has no points: {0}")]
    EmptyPoints(AnnotationId),
    #[error("store rejected the operation: {0}")]
    Rejected(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Stable code for host-side error reporting.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_ANNOTATION_NOT_FOUND",
            Self::WrongPage { .. } => "E_WRONG_PAGE",
            Self::EmptyPoints(_) => "E_EMPTY_POINTS",
            Self::Rejected(_) => "E_REJECTED",
            Self::Serialization(_) => "E_SERIALIZATION",
        }
    }
}

/// List-replace contract of the annotation store. Updates always carry the
/// full annotation; there is no partial patch.
pub trait AnnotationStore {
    /// Every annotation on `page_number` of `document_id`, in paint order.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the in-memory store never fails here.
    fn list(&self, document_id: DocumentId, page_number: u32) -> Result<Vec<Annotation>, StoreError>;

    /// Append a new annotation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyPoints`] for an annotation without points.
    fn add(&mut self, document_id: DocumentId, annotation: Annotation) -> Result<(), StoreError>;

    /// Replace an existing annotation by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no annotation has that id.
    fn update(&mut self, document_id: DocumentId, annotation: Annotation) -> Result<(), StoreError>;

    /// Remove an annotation by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no annotation has that id.
    fn delete(&mut self, document_id: DocumentId, id: &AnnotationId) -> Result<(), StoreError>;
}

/// Forward persistence actions from the engine to `store`, in order.
///
/// Non-persistence actions are skipped. Stops at the first failure and
/// returns it; earlier writes stay applied.
///
/// # Errors
///
/// Returns the first [`StoreError`] raised by the store.
pub fn apply_actions<S: AnnotationStore + ?Sized>(
    store: &mut S,
    document_id: DocumentId,
    actions: &[Action],
) -> Result<(), StoreError> {
    for action in actions {
        let result = match action {
            Action::AnnotationCreated(ann) => store.add(document_id, ann.clone()),
            Action::AnnotationUpdated(ann) => store.update(document_id, ann.clone()),
            Action::AnnotationDeleted { id } => store.delete(document_id, id),
            _ => continue,
        };
        if let Err(e) = result {
            warn!(%document_id, error = %e, code = e.error_code(), "annotation store write failed");
            return Err(e);
        }
    }
    Ok(())
}

/// Page-scoped annotation lists for one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentPages {
    pages: HashMap<u32, Vec<Annotation>>,
}

impl DocumentPages {
    fn find(&self, id: &AnnotationId) -> Option<(u32, usize)> {
        self.pages
            .iter()
            .find_map(|(page, items)| items.iter().position(|a| &a.id == id).map(|i| (*page, i)))
    }
}

/// In-memory [`AnnotationStore`], keyed by document then page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStore {
    documents: HashMap<DocumentId, DocumentPages>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total annotations held for `document_id` across all pages.
    #[must_use]
    pub fn count(&self, document_id: DocumentId) -> usize {
        self.documents
            .get(&document_id)
            .map_or(0, |d| d.pages.values().map(Vec::len).sum())
    }

    /// Serialize the whole store to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a store from [`MemoryStore::to_json`] output.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl AnnotationStore for MemoryStore {
    fn list(&self, document_id: DocumentId, page_number: u32) -> Result<Vec<Annotation>, StoreError> {
        Ok(self
            .documents
            .get(&document_id)
            .and_then(|d| d.pages.get(&page_number))
            .cloned()
            .unwrap_or_default())
    }

    fn add(&mut self, document_id: DocumentId, annotation: Annotation) -> Result<(), StoreError> {
        if annotation.points.is_empty() {
            return Err(StoreError::EmptyPoints(annotation.id));
        }
        let doc = self.documents.entry(document_id).or_default();
        if let Some((page, _)) = doc.find(&annotation.id) {
            return Err(StoreError::Rejected(format!("duplicate annotation {} on page {page}", annotation.id)));
        }
        debug!(%document_id, id = %annotation.id, page = annotation.page_number, "annotation stored");
        doc.pages.entry(annotation.page_number).or_default().push(annotation);
        Ok(())
    }

    fn update(&mut self, document_id: DocumentId, annotation: Annotation) -> Result<(), StoreError> {
        let doc = self
            .documents
            .get_mut(&document_id)
            .ok_or(StoreError::NotFound(annotation.id))?;
        let (page, index) = doc.find(&annotation.id).ok_or(StoreError::NotFound(annotation.id))?;
        if page != annotation.page_number {
            return Err(StoreError::WrongPage { id: annotation.id, expected: page, actual: annotation.page_number });
        }
        if let Some(slot) = doc.pages.get_mut(&page).and_then(|items| items.get_mut(index)) {
            *slot = annotation;
        }
        Ok(())
    }

    fn delete(&mut self, document_id: DocumentId, id: &AnnotationId) -> Result<(), StoreError> {
        let doc = self.documents.get_mut(&document_id).ok_or(StoreError::NotFound(*id))?;
        let (page, index) = doc.find(id).ok_or(StoreError::NotFound(*id))?;
        if let Some(items) = doc.pages.get_mut(&page) {
            items.remove(index);
        }
        debug!(%document_id, %id, "annotation removed from store");
        Ok(())
    }
}
