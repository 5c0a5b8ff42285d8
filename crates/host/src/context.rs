use std::sync::Arc;

use argus_model::Analyzer;
use serde_json::Value;

use crate::compilation::Compilation;

/// Fixed analysis configuration.
///
/// The defaults are chosen so one cached context satisfies every caller
/// regardless of request flags: suppressed diagnostics are always computed
/// and filtered later in the shaper, never re-computed.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
	/// Run analyzer actions concurrently inside the host.
	pub concurrent: bool,
	/// Record per-analyzer execution time.
	pub log_execution_time: bool,
	/// Compute suppressed diagnostics.
	pub report_suppressed: bool,
	/// Opaque IDE option bag forwarded from the request.
	pub ide_options: Option<Value>,
}

impl AnalysisOptions {
	/// The coordinator's fixed configuration with a forwarded option bag.
	pub fn for_ide(ide_options: Option<Value>) -> Self {
		Self {
			concurrent: true,
			log_execution_time: true,
			report_suppressed: true,
			ide_options,
		}
	}
}

impl Default for AnalysisOptions {
	fn default() -> Self {
		Self::for_ide(None)
	}
}

/// A binding of a compilation to an ordered set of analyzers with fixed
/// options. Immutable once created by the host.
#[derive(Clone)]
pub struct AnalysisContext {
	compilation: Compilation,
	analyzers: Vec<Arc<dyn Analyzer>>,
	options: AnalysisOptions,
}

impl AnalysisContext {
	/// Creates a context; hosts call this from `with_analyzers`.
	pub fn new(compilation: Compilation, analyzers: Vec<Arc<dyn Analyzer>>, options: AnalysisOptions) -> Self {
		Self { compilation, analyzers, options }
	}

	/// The bound compilation.
	pub fn compilation(&self) -> &Compilation {
		&self.compilation
	}

	/// The bound analyzers, in binding order.
	pub fn analyzers(&self) -> &[Arc<dyn Analyzer>] {
		&self.analyzers
	}

	/// The bound options.
	pub fn options(&self) -> &AnalysisOptions {
		&self.options
	}
}

impl std::fmt::Debug for AnalysisContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AnalysisContext")
			.field("analyzers", &self.analyzers.len())
			.field("compilation", &self.compilation)
			.finish()
	}
}
