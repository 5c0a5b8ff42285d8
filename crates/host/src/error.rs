use argus_model::AnalyzerLoadError;
use thiserror::Error;

/// Failures raised by the analyzer host.
#[derive(Debug, Clone, Error)]
pub enum HostError {
	/// The host could not produce a compilation for the project.
	#[error("compilation unavailable: {0}")]
	CompilationUnavailable(String),

	/// An analyzer reference failed to load.
	#[error(transparent)]
	AnalyzerLoad(#[from] AnalyzerLoadError),

	/// Analysis execution failed inside the host.
	#[error("analysis failed: {0}")]
	Analysis(String),
}

/// Result alias for host operations.
pub type HostResult<T> = std::result::Result<T, HostError>;
