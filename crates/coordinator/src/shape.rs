//! Dehydration of host analysis output into the boundary result shape.
//!
//! Both operations are pure functions of their inputs; the compute pipeline
//! calls them once per attempt after analysis finishes.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use argus_host::{AnalysisOutput, ExtraSuppression};
use argus_model::{Analyzer, AnalyzerId, AnalyzerIdMap, Diagnostic, DiagnosticMap, DocumentId, SkippedAnalyzersInfo, TelemetryInfo};

use crate::error::{ComputeError, Result};

/// Converts per-analyzer partitioned diagnostics into the wire shape.
///
/// Every executed analyzer must reverse-map through `map`; a miss is a
/// broken bijection and fatal. Skipped analyzers are dropped whole,
/// filtered rule ids and (unless `report_suppressed`) suppressed findings
/// are dropped per diagnostic, and host-attributed extra suppressions are
/// merged into the producing analyzer's semantic-local partition. Entries
/// that end up empty are omitted.
pub(crate) fn dehydrate(
	output: &AnalysisOutput,
	extra_suppressions: Vec<ExtraSuppression>,
	map: &AnalyzerIdMap,
	skipped: &SkippedAnalyzersInfo,
	report_suppressed: bool,
) -> Result<Vec<(AnalyzerId, DiagnosticMap)>> {
	let mut extras_by_id: HashMap<AnalyzerId, Vec<(DocumentId, Diagnostic)>> = HashMap::new();
	for extra in extra_suppressions {
		match map.id_of(&extra.analyzer) {
			Some(id) => extras_by_id.entry(id.clone()).or_default().push((extra.document, extra.diagnostic)),
			None => tracing::debug!(analyzer = extra.analyzer.name(), "diag.shape.unattributed_suppression"),
		}
	}

	let mut shaped = Vec::with_capacity(output.diagnostics().len());
	for (analyzer, diagnostics) in output.diagnostics() {
		let id = map
			.id_of(analyzer)
			.cloned()
			.ok_or_else(|| ComputeError::Contract(format!("analyzer {:?} missing from id map", analyzer.name())))?;
		if skipped.is_skipped(analyzer.name()) {
			continue;
		}
		let filtered_ids = skipped.filtered_ids_for(analyzer.name());
		let keep = |diag: &Diagnostic| -> bool {
			if !report_suppressed && diag.is_suppressed {
				return false;
			}
			filtered_ids.is_none_or(|ids| !ids.contains(&diag.id))
		};

		let mut semantic_local = diagnostics.semantic_local.clone();
		if let Some(extras) = extras_by_id.remove(&id) {
			for (document, diagnostic) in extras {
				semantic_local.entry(document).or_default().push(diagnostic);
			}
		}

		let shaped_map = DiagnosticMap {
			syntax_local: partition(&diagnostics.syntax_local, &keep),
			semantic_local: partition(&semantic_local, &keep),
			nonlocal: partition(&diagnostics.nonlocal, &keep),
			other: diagnostics.other.iter().filter(|diag| keep(diag)).cloned().collect(),
		};
		if shaped_map.is_empty() {
			continue;
		}
		shaped.push((id, shaped_map));
	}

	for id in extras_by_id.keys() {
		tracing::debug!(analyzer_id = %id, "diag.shape.suppression_without_execution");
	}
	Ok(shaped)
}

fn partition(source: &BTreeMap<DocumentId, Vec<Diagnostic>>, keep: &impl Fn(&Diagnostic) -> bool) -> Vec<(DocumentId, Vec<Diagnostic>)> {
	source
		.iter()
		.filter_map(|(document, diagnostics)| {
			let kept: Vec<Diagnostic> = diagnostics.iter().filter(|diag| keep(diag)).cloned().collect();
			(!kept.is_empty()).then(|| (*document, kept))
		})
		.collect()
}

/// Shapes the telemetry sequence for the boundary result.
///
/// Empty unless requested. When fewer analyzers executed than the host's
/// telemetry covers (a specialized or document-scoped run over a wider
/// context), the sequence is filtered to the executed set; host iteration
/// order is preserved either way.
pub(crate) fn telemetry(
	output: &AnalysisOutput,
	executed: &[Arc<dyn Analyzer>],
	map: &AnalyzerIdMap,
	want_telemetry: bool,
) -> Result<Vec<(AnalyzerId, TelemetryInfo)>> {
	if !want_telemetry {
		return Ok(Vec::new());
	}

	let executed_ids: HashSet<&AnalyzerId> = executed.iter().filter_map(|analyzer| map.id_of(analyzer)).collect();
	let filter_to_executed = executed.len() < output.telemetry().len();

	let mut shaped = Vec::with_capacity(output.telemetry().len());
	for (analyzer, info) in output.telemetry() {
		let id = map
			.id_of(analyzer)
			.ok_or_else(|| ComputeError::Contract(format!("analyzer {:?} missing from id map", analyzer.name())))?;
		if filter_to_executed && !executed_ids.contains(id) {
			continue;
		}
		shaped.push((id.clone(), *info));
	}
	Ok(shaped)
}
