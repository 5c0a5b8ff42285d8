use std::collections::BTreeMap;
use std::sync::Arc;

use argus_model::{Analyzer, Diagnostic, DocumentId, TelemetryInfo};

/// Diagnostics produced by one analyzer, partitioned by pass and keyed by
/// document where located.
#[derive(Clone, Default)]
pub struct AnalyzerDiagnostics {
	/// Syntax-pass diagnostics per document.
	pub syntax_local: BTreeMap<DocumentId, Vec<Diagnostic>>,
	/// Semantic-pass diagnostics per document.
	pub semantic_local: BTreeMap<DocumentId, Vec<Diagnostic>>,
	/// Diagnostics reported outside their origin document.
	pub nonlocal: BTreeMap<DocumentId, Vec<Diagnostic>>,
	/// Diagnostics with no document association.
	pub other: Vec<Diagnostic>,
}

/// A suppression diagnostic the host attributes to a producing analyzer.
#[derive(Clone)]
pub struct ExtraSuppression {
	/// The analyzer the suppression is attributed to.
	pub analyzer: Arc<dyn Analyzer>,
	/// The document the suppression applies in.
	pub document: DocumentId,
	/// The suppression diagnostic itself.
	pub diagnostic: Diagnostic,
}

/// The result of one analysis invocation.
///
/// Iteration order of both sequences is the host's and is preserved all the
/// way to the boundary result.
#[derive(Clone, Default)]
pub struct AnalysisOutput {
	diagnostics: Vec<(Arc<dyn Analyzer>, AnalyzerDiagnostics)>,
	telemetry: Vec<(Arc<dyn Analyzer>, TelemetryInfo)>,
}

impl AnalysisOutput {
	/// Creates an output from host sequences.
	pub fn new(diagnostics: Vec<(Arc<dyn Analyzer>, AnalyzerDiagnostics)>, telemetry: Vec<(Arc<dyn Analyzer>, TelemetryInfo)>) -> Self {
		Self { diagnostics, telemetry }
	}

	/// Per-analyzer partitioned diagnostics, in host order.
	pub fn diagnostics(&self) -> &[(Arc<dyn Analyzer>, AnalyzerDiagnostics)] {
		&self.diagnostics
	}

	/// Per-analyzer telemetry, in host order.
	pub fn telemetry(&self) -> &[(Arc<dyn Analyzer>, TelemetryInfo)] {
		&self.telemetry
	}
}

impl std::fmt::Debug for AnalysisOutput {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AnalysisOutput")
			.field("analyzers", &self.diagnostics.len())
			.field("telemetry", &self.telemetry.len())
			.finish()
	}
}
