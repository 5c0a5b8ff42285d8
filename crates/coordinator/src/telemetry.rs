use std::sync::Arc;

use argus_model::{Analyzer, TelemetryInfo};

/// Seam to an optional performance-tracking collaborator.
///
/// The coordinator feeds it one record per analysis invocation when the
/// request opted in and a session is active; everything else about tracking
/// (sessions, transport, aggregation) belongs to the collaborator.
pub trait PerformanceTracker: Send + Sync {
	/// Whether a tracking session is currently active.
	fn is_active(&self) -> bool;

	/// Records one analysis invocation.
	///
	/// `unit_count` is the number of analysis units the invocation covered
	/// (1 for a document, 1 + document count for a whole project);
	/// `for_span` marks sub-document requests.
	fn record(&self, unit_count: usize, telemetry: &[(Arc<dyn Analyzer>, TelemetryInfo)], for_span: bool);
}
