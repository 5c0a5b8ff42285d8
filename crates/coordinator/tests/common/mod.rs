//! Common fixtures for coordinator integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use argus_coordinator::{DiagnosticCoordinator, PerformanceTracker};
use argus_host::{AnalysisContext, AnalysisOptions, AnalysisOutput, AnalyzerDiagnostics, AnalyzerHost, Compilation, ExtraSuppression, HostError, HostResult};
use argus_model::{
	AnalysisKind, Analyzer, AnalyzerId, AnalyzerLoadError, AnalyzerReference, AnalyzerReferenceId, Diagnostic, DiagnosticsRequest, DocumentHandle,
	DocumentId, DocumentScope, ProjectHandle, ProjectId, ProjectInfo, RequestPriority, Severity, SkippedAnalyzersInfo, SnapshotId, TelemetryInfo,
};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Analyzer stub identified by name.
pub struct NamedAnalyzer(pub &'static str);

impl Analyzer for NamedAnalyzer {
	fn name(&self) -> &str {
		self.0
	}
}

/// Analyzer reference serving a fixed analyzer list.
pub struct StaticReference {
	id: AnalyzerReferenceId,
	analyzers: Vec<Arc<dyn Analyzer>>,
}

impl AnalyzerReference for StaticReference {
	fn id(&self) -> AnalyzerReferenceId {
		self.id
	}

	fn analyzers_for(&self, _language: &str) -> Result<Vec<Arc<dyn Analyzer>>, AnalyzerLoadError> {
		Ok(self.analyzers.clone())
	}
}

/// Builds a project handle with one reference providing one analyzer per name.
pub fn project_with_analyzers(project_id: u64, names: &[&'static str]) -> ProjectHandle {
	let analyzers: Vec<Arc<dyn Analyzer>> = names.iter().map(|name| Arc::new(NamedAnalyzer(name)) as Arc<dyn Analyzer>).collect();
	ProjectHandle::new(ProjectInfo {
		id: ProjectId(project_id),
		language: "rust".into(),
		solution_references: Vec::new(),
		references: vec![Arc::new(StaticReference {
			id: AnalyzerReferenceId(1),
			analyzers,
		})],
		documents: vec![
			DocumentHandle {
				id: DocumentId(1),
				name: "lib.rs".into(),
			},
			DocumentHandle {
				id: DocumentId(2),
				name: "main.rs".into(),
			},
		],
		skipped_analyzers: SkippedAnalyzersInfo::default(),
	})
}

/// The ordinal ids the analyzer-set builder assigns, `a0..aN`.
pub fn analyzer_ids(count: usize) -> Vec<AnalyzerId> {
	(0..count).map(|ordinal| AnalyzerId::new(format!("a{ordinal}"))).collect()
}

/// A document-scoped semantic request.
pub fn document_request(snapshot: u128, project: &ProjectHandle, ids: Vec<AnalyzerId>, priority: RequestPriority) -> DiagnosticsRequest {
	DiagnosticsRequest {
		snapshot: SnapshotId(snapshot),
		project: project.clone(),
		document: Some(DocumentId(1)),
		span: None,
		kind: Some(AnalysisKind::Semantic),
		analyzer_ids: ids,
		ide_options: None,
		priority,
		report_suppressed: false,
		want_performance: false,
		want_telemetry: false,
	}
}

/// A whole-project request.
pub fn project_request(snapshot: u128, project: &ProjectHandle, ids: Vec<AnalyzerId>, priority: RequestPriority) -> DiagnosticsRequest {
	DiagnosticsRequest {
		snapshot: SnapshotId(snapshot),
		project: project.clone(),
		document: None,
		span: None,
		kind: None,
		analyzer_ids: ids,
		ide_options: None,
		priority,
		report_suppressed: false,
		want_performance: false,
		want_telemetry: false,
	}
}

/// Instrumented analyzer host.
///
/// Emits, per executed analyzer, one plain and one suppressed semantic
/// diagnostic against the scoped document (or `other` diagnostics for
/// whole-project runs), and telemetry for every context analyzer. All
/// output is deterministic.
#[derive(Default)]
pub struct MockHost {
	pub compilation_calls: AtomicUsize,
	pub with_analyzers_calls: AtomicUsize,
	pub analyze_calls: AtomicUsize,
	/// Latency injected into whole-project analysis runs.
	pub project_analyze_delay: Mutex<Duration>,
	/// Latency injected into document-scoped analysis runs.
	pub document_analyze_delay: Mutex<Duration>,
	pub fail_compilation: AtomicBool,
	pub fail_analyze: AtomicBool,
	/// Every context `with_analyzers` produced, in call order.
	pub contexts: Mutex<Vec<AnalysisContext>>,
}

impl MockHost {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	fn finding(analyzer: &Arc<dyn Analyzer>, document: Option<DocumentId>, suppressed: bool) -> Diagnostic {
		let marker = if suppressed { "suppressed" } else { "finding" };
		Diagnostic {
			id: format!("{}/{marker}", analyzer.name()),
			severity: Severity::Warning,
			message: format!("{} reported a {marker}", analyzer.name()),
			document,
			span: None,
			is_suppressed: suppressed,
		}
	}
}

#[async_trait]
impl AnalyzerHost for MockHost {
	async fn compilation(&self, project: &ProjectHandle) -> HostResult<Compilation> {
		self.compilation_calls.fetch_add(1, Ordering::SeqCst);
		if self.fail_compilation.load(Ordering::SeqCst) {
			return Err(HostError::CompilationUnavailable("mock compilation failure".into()));
		}
		Ok(Compilation::new(Arc::new(project.id())))
	}

	fn with_analyzers(&self, compilation: Compilation, analyzers: Vec<Arc<dyn Analyzer>>, options: AnalysisOptions) -> AnalysisContext {
		self.with_analyzers_calls.fetch_add(1, Ordering::SeqCst);
		let context = AnalysisContext::new(compilation, analyzers, options);
		self.contexts.lock().push(context.clone());
		context
	}

	async fn analyze(
		&self,
		context: &AnalysisContext,
		scope: Option<&DocumentScope>,
		_project: &ProjectHandle,
	) -> HostResult<(AnalysisOutput, Vec<ExtraSuppression>)> {
		self.analyze_calls.fetch_add(1, Ordering::SeqCst);
		let delay = match scope {
			Some(_) => *self.document_analyze_delay.lock(),
			None => *self.project_analyze_delay.lock(),
		};
		if !delay.is_zero() {
			tokio::time::sleep(delay).await;
		}
		if self.fail_analyze.load(Ordering::SeqCst) {
			return Err(HostError::Analysis("mock analysis failure".into()));
		}

		let executed: &[Arc<dyn Analyzer>] = match scope {
			Some(scope) => &scope.analyzers,
			None => context.analyzers(),
		};
		let document = scope.map(|scope| scope.document);

		let mut diagnostics = Vec::with_capacity(executed.len());
		for analyzer in executed {
			let mut partitioned = AnalyzerDiagnostics::default();
			let findings = vec![Self::finding(analyzer, document, false), Self::finding(analyzer, document, true)];
			match document {
				Some(document) => {
					partitioned.semantic_local.insert(document, findings);
				}
				None => partitioned.other = findings,
			}
			diagnostics.push((analyzer.clone(), partitioned));
		}
		let telemetry = context
			.analyzers()
			.iter()
			.map(|analyzer| {
				(
					analyzer.clone(),
					TelemetryInfo {
						execution_time_ms: 1,
						executed_actions: 1,
					},
				)
			})
			.collect();
		Ok((AnalysisOutput::new(diagnostics, telemetry), Vec::new()))
	}
}

/// Performance tracker recording `(unit_count, telemetry entries, for_span)`.
#[derive(Default)]
pub struct RecordingTracker {
	pub active: AtomicBool,
	pub records: Mutex<Vec<(usize, usize, bool)>>,
}

impl PerformanceTracker for RecordingTracker {
	fn is_active(&self) -> bool {
		self.active.load(Ordering::SeqCst)
	}

	fn record(&self, unit_count: usize, telemetry: &[(Arc<dyn Analyzer>, TelemetryInfo)], for_span: bool) {
		self.records.lock().push((unit_count, telemetry.len(), for_span));
	}
}

/// Creates a coordinator over a fresh mock host.
pub fn setup() -> (DiagnosticCoordinator, Arc<MockHost>) {
	let _ = tracing_subscriber::fmt::try_init();
	let host = MockHost::new();
	(DiagnosticCoordinator::new(host.clone()), host)
}
