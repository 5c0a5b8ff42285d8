//! Boundary request record and the analysis scope derived from it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analyzer::Analyzer;
use crate::ids::{AnalyzerId, DocumentId, SnapshotId, TextSpan};
use crate::project::ProjectHandle;

/// Which analysis pass a document-scoped request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisKind {
	/// Syntax-tree-local analysis.
	Syntax,
	/// Semantic-model-local analysis.
	Semantic,
	/// Analysis spanning beyond the requested document.
	NonLocal,
}

/// Two-level request priority.
///
/// High represents interactive (lightbulb) work and preempts Normal;
/// Normal represents background work and is retried after preemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestPriority {
	/// Interactive work; never preempted, preempts Normal on admission.
	High,
	/// Background work; preempted by High arrivals and retried.
	Normal,
}

/// One diagnostic computation request.
///
/// `document`, `span`, and `kind` travel together: a document implies a kind,
/// and a span is only meaningful for a document-scoped request. The
/// coordinator validates these constraints at admission.
#[derive(Debug, Clone)]
pub struct DiagnosticsRequest {
	/// Workspace snapshot the request is computed against.
	pub snapshot: SnapshotId,
	/// Project within the snapshot.
	pub project: ProjectHandle,
	/// Document scope; absent means whole-project analysis.
	pub document: Option<DocumentId>,
	/// Optional sub-document span.
	pub span: Option<TextSpan>,
	/// Analysis kind; required exactly when `document` is set.
	pub kind: Option<AnalysisKind>,
	/// Analyzers to run, by id. Unknown ids are dropped silently.
	pub analyzer_ids: Vec<AnalyzerId>,
	/// Opaque IDE option bag forwarded to the host.
	pub ide_options: Option<Value>,
	/// Scheduling class.
	pub priority: RequestPriority,
	/// Whether suppressed diagnostics are reported back.
	pub report_suppressed: bool,
	/// Whether to feed the performance tracker.
	pub want_performance: bool,
	/// Whether the result carries per-analyzer telemetry.
	pub want_telemetry: bool,
}

/// Scope of one document-targeted analysis invocation.
#[derive(Clone)]
pub struct DocumentScope {
	/// The document under analysis.
	pub document: DocumentId,
	/// Optional span restriction within the document.
	pub span: Option<TextSpan>,
	/// The analyzers to execute for this scope.
	pub analyzers: Vec<Arc<dyn Analyzer>>,
	/// Which pass to run.
	pub kind: AnalysisKind,
}

impl std::fmt::Debug for DocumentScope {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DocumentScope")
			.field("document", &self.document)
			.field("span", &self.span)
			.field("analyzers", &self.analyzers.len())
			.field("kind", &self.kind)
			.finish()
	}
}
