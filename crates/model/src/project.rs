//! Project and document snapshot handles.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::analyzer::AnalyzerReference;
use crate::ids::{DocumentId, ProjectId};

/// A text document within a project snapshot.
#[derive(Debug, Clone)]
pub struct DocumentHandle {
	/// Document identity.
	pub id: DocumentId,
	/// Display name (file name or relative path).
	pub name: String,
}

/// Analyzers a host skips for a project, plus per-analyzer diagnostic-id
/// filters, both keyed by analyzer name.
#[derive(Debug, Clone, Default)]
pub struct SkippedAnalyzersInfo {
	/// Analyzers that are host-only and never reported for this project.
	pub skipped: HashSet<String>,
	/// Diagnostic rule ids removed from a given analyzer's output.
	pub filtered_ids: HashMap<String, HashSet<String>>,
}

impl SkippedAnalyzersInfo {
	/// Whether an analyzer is skipped entirely.
	pub fn is_skipped(&self, analyzer_name: &str) -> bool {
		self.skipped.contains(analyzer_name)
	}

	/// Diagnostic ids filtered from an analyzer's output, if any.
	pub fn filtered_ids_for(&self, analyzer_name: &str) -> Option<&HashSet<String>> {
		self.filtered_ids.get(analyzer_name)
	}
}

/// Construction data for a [`ProjectHandle`].
pub struct ProjectInfo {
	/// Project identity.
	pub id: ProjectId,
	/// Language tag (e.g. "rust").
	pub language: String,
	/// Solution-level analyzer references, ordered.
	pub solution_references: Vec<Arc<dyn AnalyzerReference>>,
	/// Project-level analyzer references, ordered.
	pub references: Vec<Arc<dyn AnalyzerReference>>,
	/// Documents in the project.
	pub documents: Vec<DocumentHandle>,
	/// Host skip information for this project.
	pub skipped_analyzers: SkippedAnalyzersInfo,
}

struct ProjectInner {
	id: ProjectId,
	language: String,
	solution_references: Vec<Arc<dyn AnalyzerReference>>,
	references: Vec<Arc<dyn AnalyzerReference>>,
	documents: BTreeMap<DocumentId, DocumentHandle>,
	skipped_analyzers: SkippedAnalyzersInfo,
}

/// Cheap-clone handle over one project within one snapshot.
///
/// Two handles with the same [`ProjectId`] but different allocations are
/// distinct identities (different in-flight snapshots of the same logical
/// project); [`ProjectHandle::same_handle`] distinguishes them.
#[derive(Clone)]
pub struct ProjectHandle {
	inner: Arc<ProjectInner>,
}

impl ProjectHandle {
	/// Creates a handle from construction data.
	pub fn new(info: ProjectInfo) -> Self {
		let documents = info.documents.into_iter().map(|doc| (doc.id, doc)).collect();
		Self {
			inner: Arc::new(ProjectInner {
				id: info.id,
				language: info.language,
				solution_references: info.solution_references,
				references: info.references,
				documents,
				skipped_analyzers: info.skipped_analyzers,
			}),
		}
	}

	/// Project identity.
	pub fn id(&self) -> ProjectId {
		self.inner.id
	}

	/// Language tag.
	pub fn language(&self) -> &str {
		&self.inner.language
	}

	/// Solution-level analyzer references, ordered.
	pub fn solution_references(&self) -> &[Arc<dyn AnalyzerReference>] {
		&self.inner.solution_references
	}

	/// Project-level analyzer references, ordered.
	pub fn references(&self) -> &[Arc<dyn AnalyzerReference>] {
		&self.inner.references
	}

	/// Looks up a document by id.
	pub fn document(&self, id: DocumentId) -> Option<&DocumentHandle> {
		self.inner.documents.get(&id)
	}

	/// Number of documents in the project.
	pub fn document_count(&self) -> usize {
		self.inner.documents.len()
	}

	/// Host skip information for this project.
	pub fn skipped_analyzers(&self) -> &SkippedAnalyzersInfo {
		&self.inner.skipped_analyzers
	}

	/// Whether two handles are the same allocation, not merely the same id.
	pub fn same_handle(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

impl std::fmt::Debug for ProjectHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ProjectHandle")
			.field("id", &self.inner.id)
			.field("language", &self.inner.language)
			.field("documents", &self.inner.documents.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn project(id: u64) -> ProjectHandle {
		ProjectHandle::new(ProjectInfo {
			id: ProjectId(id),
			language: "rust".into(),
			solution_references: Vec::new(),
			references: Vec::new(),
			documents: vec![DocumentHandle {
				id: DocumentId(1),
				name: "lib.rs".into(),
			}],
			skipped_analyzers: SkippedAnalyzersInfo::default(),
		})
	}

	#[test]
	fn test_same_handle_is_identity_not_id_equality() {
		let a = project(7);
		let b = project(7);
		assert_eq!(a.id(), b.id());
		assert!(!a.same_handle(&b));
		assert!(a.same_handle(&a.clone()));
	}

	#[test]
	fn test_document_lookup() {
		let p = project(1);
		assert!(p.document(DocumentId(1)).is_some());
		assert!(p.document(DocumentId(2)).is_none());
		assert_eq!(p.document_count(), 1);
	}
}
