//! Wire-shaped diagnostic result records.

use serde::{Deserialize, Serialize};

use crate::ids::{AnalyzerId, DocumentId, TextSpan};

/// Severity of a diagnostic finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
	/// Build-breaking finding.
	Error,
	/// Non-breaking finding surfaced prominently.
	Warning,
	/// Informational finding.
	Info,
	/// Low-priority hint.
	Hint,
}

/// A single analyzer finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
	/// Rule id (e.g. "RS1024").
	pub id: String,
	/// Finding severity.
	pub severity: Severity,
	/// Human-readable message.
	pub message: String,
	/// Document the finding is located in, if any.
	pub document: Option<DocumentId>,
	/// Span within the document, if located.
	pub span: Option<TextSpan>,
	/// Whether a suppression applies to this finding.
	pub is_suppressed: bool,
}

/// Diagnostics of one analyzer, partitioned the way the boundary expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticMap {
	/// Syntax-pass diagnostics, keyed by document.
	pub syntax_local: Vec<(DocumentId, Vec<Diagnostic>)>,
	/// Semantic-pass diagnostics, keyed by document.
	pub semantic_local: Vec<(DocumentId, Vec<Diagnostic>)>,
	/// Diagnostics reported outside their origin document, keyed by document.
	pub nonlocal: Vec<(DocumentId, Vec<Diagnostic>)>,
	/// Diagnostics with no document association.
	pub other: Vec<Diagnostic>,
}

impl DiagnosticMap {
	/// Whether every partition is empty.
	pub fn is_empty(&self) -> bool {
		self.syntax_local.is_empty() && self.semantic_local.is_empty() && self.nonlocal.is_empty() && self.other.is_empty()
	}
}

/// Per-analyzer execution telemetry passed through from the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryInfo {
	/// Wall-clock execution time in milliseconds.
	pub execution_time_ms: u64,
	/// Number of analyzer actions executed.
	pub executed_actions: u32,
}

/// The boundary result of one diagnostic computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsResult {
	/// Shaped diagnostics per executed analyzer, in host iteration order.
	pub per_analyzer: Vec<(AnalyzerId, DiagnosticMap)>,
	/// Telemetry per analyzer when requested, in host iteration order.
	pub telemetry: Vec<(AnalyzerId, TelemetryInfo)>,
}

impl DiagnosticsResult {
	/// Whether the result carries neither diagnostics nor telemetry.
	pub fn is_empty(&self) -> bool {
		self.per_analyzer.is_empty() && self.telemetry.is_empty()
	}
}
