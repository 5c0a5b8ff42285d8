use std::sync::Arc;

use argus_model::{Analyzer, DocumentScope, ProjectHandle};
use async_trait::async_trait;

use crate::compilation::Compilation;
use crate::context::{AnalysisContext, AnalysisOptions};
use crate::error::HostResult;
use crate::output::{AnalysisOutput, ExtraSuppression};

/// The analyzer host consumed by the coordinator.
///
/// Implementations own the compilation engine and analyzer execution; the
/// coordinator drives them through this surface only. Async methods must be
/// cancel-safe: the coordinator cancels in-flight work by dropping the
/// future.
#[async_trait]
pub trait AnalyzerHost: Send + Sync {
	/// Produces the compilation for a project snapshot.
	async fn compilation(&self, project: &ProjectHandle) -> HostResult<Compilation>;

	/// Returns a compilation variant configured for concurrent internal work.
	fn with_concurrent_build(&self, compilation: Compilation) -> Compilation {
		compilation.into_concurrent()
	}

	/// Binds analyzers to a compilation under fixed options.
	fn with_analyzers(&self, compilation: Compilation, analyzers: Vec<Arc<dyn Analyzer>>, options: AnalysisOptions) -> AnalysisContext;

	/// Runs one analysis invocation.
	///
	/// `scope` present means document-scoped analysis of `scope.analyzers`;
	/// absent means whole-project analysis of every context analyzer. The
	/// second tuple element carries suppression diagnostics the host
	/// attributes to specific analyzers.
	async fn analyze(
		&self,
		context: &AnalysisContext,
		scope: Option<&DocumentScope>,
		project: &ProjectHandle,
	) -> HostResult<(AnalysisOutput, Vec<ExtraSuppression>)>;
}
