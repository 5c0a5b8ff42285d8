//! One compute attempt: context acquisition through result shaping.

use std::sync::Arc;

use argus_model::{Analyzer, DiagnosticsRequest, DiagnosticsResult, DocumentScope};

use crate::coordinator::DiagnosticCoordinator;
use crate::error::{ComputeError, Result};
use crate::shape;

impl DiagnosticCoordinator {
	/// Runs one analysis attempt end to end.
	///
	/// Runs inside a scheduler compute task; cancellation arrives by this
	/// future being dropped, so every await below is a cancellation point.
	pub(crate) async fn compute_attempt(&self, request: &DiagnosticsRequest) -> Result<DiagnosticsResult> {
		let entry = self.acquire_context(request).await?;

		// Unknown ids are dropped silently; an empty resolve is a valid
		// outcome, not an error.
		let resolved: Vec<Arc<dyn Analyzer>> = request.analyzer_ids.iter().filter_map(|id| entry.map.get(id).cloned()).collect();
		if resolved.is_empty() {
			tracing::trace!(requested = request.analyzer_ids.len(), "diag.compute.empty_resolve");
			return Ok(DiagnosticsResult::default());
		}

		let document_present = request.document.is_some();
		let context = if !document_present && resolved.len() < entry.context.analyzers().len() {
			// Transient specialization: shares the cached compilation and
			// dies with this attempt, never written back to the slot.
			tracing::trace!(subset = resolved.len(), full = entry.context.analyzers().len(), "diag.compute.specialize");
			self.inner
				.host
				.with_analyzers(entry.context.compilation().clone(), resolved.clone(), entry.context.options().clone())
		} else {
			entry.context.clone()
		};

		let skipped = request.project.skipped_analyzers();

		let scope = match request.document {
			Some(document) => {
				let kind = request
					.kind
					.ok_or_else(|| ComputeError::Contract("document-scoped request without analysis kind".into()))?;
				Some(DocumentScope {
					document,
					span: request.span,
					analyzers: resolved.clone(),
					kind,
				})
			}
			None => None,
		};

		let (output, extra_suppressions) = self.inner.host.analyze(&context, scope.as_ref(), &request.project).await?;

		if request.want_performance
			&& let Some(tracker) = &self.inner.perf
			&& tracker.is_active()
		{
			let unit_count = 1 + if scope.is_none() { request.project.document_count() } else { 0 };
			tracker.record(unit_count, output.telemetry(), request.span.is_some());
		}

		let per_analyzer = shape::dehydrate(&output, extra_suppressions, &entry.map, skipped, request.report_suppressed)?;
		let telemetry = shape::telemetry(&output, &resolved, &entry.map, request.want_telemetry)?;
		Ok(DiagnosticsResult { per_analyzer, telemetry })
	}
}
