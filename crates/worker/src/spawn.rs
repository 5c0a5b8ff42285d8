use std::future::Future;

use tokio::task::JoinHandle;

use crate::TaskClass;

/// Spawns a compute task onto the ambient runtime with classification
/// metadata.
///
/// Every call site sits inside the coordinator's admission path, which is
/// itself driven by the process's owning tokio runtime, so there is no
/// fallback runtime here; calling this outside a runtime panics the way
/// `tokio::spawn` does.
pub fn spawn<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(worker_class = class.as_str(), "worker.spawn");
	tokio::spawn(fut)
}
