use std::any::Any;
use std::sync::Arc;

/// Opaque representation of a project's sources ready for semantic queries.
///
/// The payload belongs to the host; the coordinator only clones the handle
/// and toggles concurrent-build mode through the host adapter. Clones share
/// the underlying payload, which is how a specialized analysis context reuses
/// the compilation of the cached one.
#[derive(Clone)]
pub struct Compilation {
	payload: Arc<dyn Any + Send + Sync>,
	concurrent: bool,
}

impl Compilation {
	/// Wraps a host payload into a compilation handle (non-concurrent).
	pub fn new(payload: Arc<dyn Any + Send + Sync>) -> Self {
		Self { payload, concurrent: false }
	}

	/// The host payload, for the host to downcast.
	pub fn payload(&self) -> &Arc<dyn Any + Send + Sync> {
		&self.payload
	}

	/// Whether this handle is configured for concurrent internal work.
	pub fn is_concurrent(&self) -> bool {
		self.concurrent
	}

	/// Returns a variant of this handle configured for concurrent work,
	/// sharing the same payload.
	pub fn into_concurrent(self) -> Self {
		Self { concurrent: true, ..self }
	}

	/// Whether two handles share one underlying payload.
	pub fn shares_payload(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.payload, &other.payload)
	}
}

impl std::fmt::Debug for Compilation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Compilation").field("concurrent", &self.concurrent).finish()
	}
}
