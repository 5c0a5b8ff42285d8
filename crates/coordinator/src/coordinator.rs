//! The coordinator facade and its single-lock shared state.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use argus_host::AnalyzerHost;
use argus_model::{DiagnosticsRequest, DiagnosticsResult};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::cache::CacheEntry;
use crate::error::{ComputeError, Result};
use crate::scheduler::TicketId;
use crate::telemetry::PerformanceTracker;

/// All cross-request mutable state, guarded by one mutex.
///
/// The lock is held only across field reads and assignments, never across a
/// suspension point: the drain loop snapshots `high` and releases before
/// awaiting, preemption snapshots `normal` and fires outside the lock.
#[derive(Default)]
pub(crate) struct SharedState {
	/// The single context-cache slot.
	pub(crate) slot: Option<CacheEntry>,
	/// Completion signals of in-flight high-priority tickets.
	pub(crate) high: HashMap<TicketId, CancellationToken>,
	/// Preempt sources of in-flight normal-priority tickets.
	pub(crate) normal: HashMap<TicketId, CancellationToken>,
}

#[derive(Default)]
pub(crate) struct StatCounters {
	attempts: AtomicU64,
	preemptions: AtomicU64,
	retries: AtomicU64,
	completions: AtomicU64,
	cache_hits: AtomicU64,
	cache_replacements: AtomicU64,
}

impl StatCounters {
	pub(crate) fn attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn preempted(&self, count: usize) {
		self.preemptions.fetch_add(count as u64, Ordering::Relaxed);
	}

	pub(crate) fn retried(&self) {
		self.retries.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn completed(&self) {
		self.completions.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn cache_hit(&self) {
		self.cache_hits.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn cache_replaced(&self) {
		self.cache_replacements.fetch_add(1, Ordering::Relaxed);
	}
}

/// Snapshot of the coordinator's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
	/// Attempts started, including retries.
	pub attempts: u64,
	/// Normal tickets fired by high-priority admissions.
	pub preemptions: u64,
	/// Attempts re-entered after preemption.
	pub retries: u64,
	/// Requests that completed with a result.
	pub completions: u64,
	/// Context-cache hits.
	pub cache_hits: u64,
	/// Context-cache slot replacements.
	pub cache_replacements: u64,
}

/// Sizes of the in-flight ticket registries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InFlightCounts {
	/// Registered high-priority tickets.
	pub high: usize,
	/// Registered normal-priority tickets.
	pub normal: usize,
}

pub(crate) struct Inner {
	pub(crate) host: Arc<dyn AnalyzerHost>,
	pub(crate) perf: Option<Arc<dyn PerformanceTracker>>,
	pub(crate) state: Mutex<SharedState>,
	pub(crate) next_ticket: AtomicU64,
	pub(crate) stats: StatCounters,
}

/// Out-of-process diagnostic computation coordinator.
///
/// Owns the single context-cache slot and the two scheduler registries; all
/// requests flow through [`DiagnosticCoordinator::get_diagnostics`]. Clones
/// share state, so one value is created at process start and handed around.
#[derive(Clone)]
pub struct DiagnosticCoordinator {
	pub(crate) inner: Arc<Inner>,
}

impl DiagnosticCoordinator {
	/// Creates a coordinator over an analyzer host.
	pub fn new(host: Arc<dyn AnalyzerHost>) -> Self {
		Self {
			inner: Arc::new(Inner {
				host,
				perf: None,
				state: Mutex::new(SharedState::default()),
				next_ticket: AtomicU64::new(0),
				stats: StatCounters::default(),
			}),
		}
	}

	/// Creates a coordinator with a performance tracker installed.
	pub fn with_tracker(host: Arc<dyn AnalyzerHost>, tracker: Arc<dyn PerformanceTracker>) -> Self {
		Self {
			inner: Arc::new(Inner {
				host,
				perf: Some(tracker),
				state: Mutex::new(SharedState::default()),
				next_ticket: AtomicU64::new(0),
				stats: StatCounters::default(),
			}),
		}
	}

	/// Computes diagnostics for one request.
	///
	/// High-priority requests preempt in-flight normal ones on admission;
	/// normal requests wait for in-flight high work, and are retried
	/// transparently when preempted mid-flight. `caller` aborts the request
	/// from the caller's side; a tripped token surfaces as
	/// [`ComputeError::Cancelled`].
	pub async fn get_diagnostics(&self, mut request: DiagnosticsRequest, caller: CancellationToken) -> Result<DiagnosticsResult> {
		validate(&request)?;
		self.reconcile(&mut request);
		tracing::debug!(
			snapshot = ?request.snapshot,
			project = ?request.project.id(),
			document = ?request.document,
			priority = ?request.priority,
			analyzers = request.analyzer_ids.len(),
			"diag.request"
		);
		self.schedule(request, caller).await
	}

	/// Snapshot of the coordinator's counters.
	pub fn stats(&self) -> SchedulerStats {
		let stats = &self.inner.stats;
		SchedulerStats {
			attempts: stats.attempts.load(Ordering::Relaxed),
			preemptions: stats.preemptions.load(Ordering::Relaxed),
			retries: stats.retries.load(Ordering::Relaxed),
			completions: stats.completions.load(Ordering::Relaxed),
			cache_hits: stats.cache_hits.load(Ordering::Relaxed),
			cache_replacements: stats.cache_replacements.load(Ordering::Relaxed),
		}
	}

	/// Current sizes of the in-flight ticket registries.
	pub fn in_flight(&self) -> InFlightCounts {
		let state = self.inner.state.lock();
		InFlightCounts {
			high: state.high.len(),
			normal: state.normal.len(),
		}
	}

	/// The current cache slot contents, if any.
	pub fn cached_entry(&self) -> Option<CacheEntry> {
		self.inner.state.lock().slot.clone()
	}

	pub(crate) fn next_ticket(&self) -> TicketId {
		TicketId(self.inner.next_ticket.fetch_add(1, Ordering::Relaxed))
	}
}

/// Boundary constraints: a document implies a kind, a kind implies a
/// document, and a span is only meaningful inside a document.
fn validate(request: &DiagnosticsRequest) -> Result<()> {
	if request.document.is_some() && request.kind.is_none() {
		return Err(ComputeError::Contract("document-scoped request without analysis kind".into()));
	}
	if request.document.is_none() && request.kind.is_some() {
		return Err(ComputeError::Contract("analysis kind given without a document".into()));
	}
	if request.document.is_none() && request.span.is_some() {
		return Err(ComputeError::Contract("span given without a document".into()));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use argus_model::{AnalysisKind, DocumentId, ProjectHandle, ProjectId, ProjectInfo, RequestPriority, SkippedAnalyzersInfo, SnapshotId, TextSpan};

	use super::*;

	fn request(document: Option<DocumentId>, kind: Option<AnalysisKind>, span: Option<TextSpan>) -> DiagnosticsRequest {
		DiagnosticsRequest {
			snapshot: SnapshotId(1),
			project: ProjectHandle::new(ProjectInfo {
				id: ProjectId(1),
				language: "rust".into(),
				solution_references: Vec::new(),
				references: Vec::new(),
				documents: Vec::new(),
				skipped_analyzers: SkippedAnalyzersInfo::default(),
			}),
			document,
			span,
			kind,
			analyzer_ids: Vec::new(),
			ide_options: None,
			priority: RequestPriority::Normal,
			report_suppressed: false,
			want_performance: false,
			want_telemetry: false,
		}
	}

	#[test]
	fn test_document_requires_kind() {
		let err = validate(&request(Some(DocumentId(1)), None, None)).unwrap_err();
		assert!(matches!(err, ComputeError::Contract(_)));
	}

	#[test]
	fn test_kind_requires_document() {
		let err = validate(&request(None, Some(AnalysisKind::Semantic), None)).unwrap_err();
		assert!(matches!(err, ComputeError::Contract(_)));
	}

	#[test]
	fn test_span_requires_document() {
		let err = validate(&request(None, None, Some(TextSpan::new(0, 4)))).unwrap_err();
		assert!(matches!(err, ComputeError::Contract(_)));
	}

	#[test]
	fn test_valid_shapes_pass() {
		assert!(validate(&request(None, None, None)).is_ok());
		assert!(validate(&request(Some(DocumentId(1)), Some(AnalysisKind::Syntax), None)).is_ok());
		assert!(validate(&request(Some(DocumentId(1)), Some(AnalysisKind::Semantic), Some(TextSpan::new(1, 2)))).is_ok());
	}
}
