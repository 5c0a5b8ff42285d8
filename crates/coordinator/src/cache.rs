//! Single-slot analysis-context cache.
//!
//! The slot memoizes the last document-scoped build keyed by snapshot and
//! exact project handle identity. Whole-project requests bypass the slot in
//! both directions: their contexts can be arbitrarily large and retaining
//! them would pin the working set (one slot, replace on miss, no LRU).

use std::sync::Arc;

use argus_host::{AnalysisContext, AnalysisOptions};
use argus_model::{AnalyzerIdMap, DiagnosticsRequest, ProjectHandle, SnapshotId};

use crate::analyzer_set::build_analyzer_set;
use crate::coordinator::DiagnosticCoordinator;
use crate::error::Result;

/// The single process-wide memo of a built analysis context.
#[derive(Clone)]
pub struct CacheEntry {
	/// Snapshot the context was built against.
	pub snapshot: SnapshotId,
	/// Exact project handle the context was built from.
	pub project: ProjectHandle,
	/// Context over the project's full analyzer set.
	pub context: AnalysisContext,
	/// Id bijection for the context's analyzers.
	pub map: Arc<AnalyzerIdMap>,
}

impl std::fmt::Debug for CacheEntry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CacheEntry")
			.field("snapshot", &self.snapshot)
			.field("project", &self.project.id())
			.field("analyzers", &self.map.len())
			.finish()
	}
}

impl DiagnosticCoordinator {
	/// Returns the cached entry when both snapshot and project identity match.
	pub(crate) fn lookup_entry(&self, snapshot: SnapshotId, project: &ProjectHandle) -> Option<CacheEntry> {
		let state = self.inner.state.lock();
		state
			.slot
			.as_ref()
			.filter(|entry| entry.snapshot == snapshot && entry.project.same_handle(project))
			.cloned()
	}

	/// Returns the context for one attempt, consulting the slot only for
	/// document-scoped requests.
	pub(crate) async fn acquire_context(&self, request: &DiagnosticsRequest) -> Result<CacheEntry> {
		let document_present = request.document.is_some();
		if document_present && let Some(entry) = self.lookup_entry(request.snapshot, &request.project) {
			self.inner.stats.cache_hit();
			tracing::trace!(project = ?request.project.id(), "diag.cache.hit");
			return Ok(entry);
		}

		match self.build_entry(request).await {
			Ok(entry) => {
				if document_present {
					// The slot holds the last entry, replaced unconditionally
					// under the lock. Held only across the assignment.
					let mut state = self.inner.state.lock();
					state.slot = Some(entry.clone());
					self.inner.stats.cache_replaced();
					tracing::debug!(snapshot = ?entry.snapshot, project = ?entry.project.id(), "diag.cache.replace");
				}
				Ok(entry)
			}
			Err(err) => {
				// A failed build never publishes; the previous entry is
				// dropped too rather than outliving the snapshot that broke.
				if document_present {
					let mut state = self.inner.state.lock();
					if state.slot.take().is_some() {
						tracing::debug!("diag.cache.clear");
					}
				}
				Err(err)
			}
		}
	}

	async fn build_entry(&self, request: &DiagnosticsRequest) -> Result<CacheEntry> {
		let (analyzers, map) = build_analyzer_set(&request.project).map_err(argus_host::HostError::from)?;
		let compilation = self.inner.host.compilation(&request.project).await?;
		let compilation = self.inner.host.with_concurrent_build(compilation);
		let options = AnalysisOptions::for_ide(request.ide_options.clone());
		let context = self.inner.host.with_analyzers(compilation, analyzers, options);
		Ok(CacheEntry {
			snapshot: request.snapshot,
			project: request.project.clone(),
			context,
			map: Arc::new(map),
		})
	}

	/// Rewrites a request onto the cached project handle when the snapshot
	/// and project id match but the handle identity differs.
	///
	/// This preserves cache hits across transient handle respawns within one
	/// logical snapshot. A document id the cached handle no longer carries
	/// silently downgrades the request to whole-project scope.
	pub(crate) fn reconcile(&self, request: &mut DiagnosticsRequest) {
		let cached = {
			let state = self.inner.state.lock();
			match &state.slot {
				Some(entry)
					if entry.snapshot == request.snapshot && entry.project.id() == request.project.id() && !entry.project.same_handle(&request.project) =>
				{
					Some(entry.project.clone())
				}
				_ => None,
			}
		};
		let Some(project) = cached else { return };

		tracing::debug!(project = ?project.id(), "diag.reconcile");
		request.project = project;
		if let Some(document) = request.document
			&& request.project.document(document).is_none()
		{
			tracing::debug!(document = ?document, "diag.reconcile.document_missing");
			request.document = None;
			request.kind = None;
			request.span = None;
		}
	}
}
