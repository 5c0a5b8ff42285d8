//! Analyzer abstractions and the id↔analyzer bijection.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use thiserror::Error;

use crate::ids::{AnalyzerId, AnalyzerReferenceId};

/// An opaque rule engine producing diagnostics against a compilation.
///
/// Analyzers are held as `Arc<dyn Analyzer>` and compared by pointer
/// identity; the same instance yielded twice is the same analyzer.
pub trait Analyzer: Send + Sync {
	/// Human-readable analyzer name, also the key host skip lists use.
	fn name(&self) -> &str;
}

/// Error raised when a reference fails to materialize its analyzers.
#[derive(Debug, Clone, Error)]
#[error("failed to load analyzers from reference {reference:?}: {message}")]
pub struct AnalyzerLoadError {
	/// The reference that failed.
	pub reference: AnalyzerReferenceId,
	/// Host-provided failure detail.
	pub message: String,
}

/// A source of analyzers, deduplicated by [`AnalyzerReferenceId`].
pub trait AnalyzerReference: Send + Sync {
	/// Identity used for deduplication across solution and project lists.
	fn id(&self) -> AnalyzerReferenceId;

	/// Ordered analyzers this reference provides for a language.
	fn analyzers_for(&self, language: &str) -> Result<Vec<Arc<dyn Analyzer>>, AnalyzerLoadError>;
}

/// Bijection between [`AnalyzerId`] keys and analyzer instances.
///
/// Ids are assigned in insertion order (`a0`, `a1`, ...). The reverse lookup
/// is total for every analyzer the map contains; inserting an instance twice
/// returns the existing id instead of minting a new one.
#[derive(Clone, Default)]
pub struct AnalyzerIdMap {
	forward: BTreeMap<AnalyzerId, Arc<dyn Analyzer>>,
	reverse: HashMap<usize, AnalyzerId>,
}

fn identity_key(analyzer: &Arc<dyn Analyzer>) -> usize {
	Arc::as_ptr(analyzer) as *const () as usize
}

impl AnalyzerIdMap {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts an analyzer, assigning the next ordinal id.
	///
	/// Returns the existing id when the instance is already mapped, keeping
	/// the bijection intact.
	pub fn insert(&mut self, analyzer: Arc<dyn Analyzer>) -> AnalyzerId {
		let key = identity_key(&analyzer);
		if let Some(existing) = self.reverse.get(&key) {
			return existing.clone();
		}
		let id = AnalyzerId::new(format!("a{}", self.forward.len()));
		debug_assert!(!self.forward.contains_key(&id), "ordinal id collision");
		self.forward.insert(id.clone(), analyzer);
		self.reverse.insert(key, id.clone());
		id
	}

	/// Looks up an analyzer by id.
	pub fn get(&self, id: &AnalyzerId) -> Option<&Arc<dyn Analyzer>> {
		self.forward.get(id)
	}

	/// Reverse lookup: the id assigned to an analyzer instance.
	pub fn id_of(&self, analyzer: &Arc<dyn Analyzer>) -> Option<&AnalyzerId> {
		self.reverse.get(&identity_key(analyzer))
	}

	/// Number of mapped analyzers.
	pub fn len(&self) -> usize {
		self.forward.len()
	}

	/// Whether the map is empty.
	pub fn is_empty(&self) -> bool {
		self.forward.is_empty()
	}

	/// Iterates `(id, analyzer)` pairs in id order.
	pub fn iter(&self) -> impl Iterator<Item = (&AnalyzerId, &Arc<dyn Analyzer>)> {
		self.forward.iter()
	}
}

impl std::fmt::Debug for AnalyzerIdMap {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AnalyzerIdMap").field("len", &self.forward.len()).finish()
	}
}
