use argus_host::HostError;
use thiserror::Error;

/// Failures surfaced to a diagnostic request's caller.
///
/// Preemption is not represented here: a preempted attempt is classified
/// inside the scheduler (a cancelled attempt whose local preempt source
/// fired) and consumed by the retry loop before it can reach a caller.
#[derive(Debug, Error)]
pub enum ComputeError {
	/// The caller's cancellation token tripped.
	#[error("diagnostic request cancelled")]
	Cancelled,

	/// The analyzer host failed during compilation or analysis. Fatal for
	/// the request; never retried, no partial results.
	#[error(transparent)]
	Host(#[from] HostError),

	/// Programmer bug: malformed request or a broken id-map bijection.
	#[error("contract violation: {0}")]
	Contract(String),
}

/// Result alias for coordinator operations.
pub type Result<T> = std::result::Result<T, ComputeError>;
