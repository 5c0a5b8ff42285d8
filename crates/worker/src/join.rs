use tokio::task::JoinError;

/// Extracts the panic payload message from a join error, if the task panicked.
///
/// Returns `None` for cancellation join errors and for panic payloads that
/// are neither `&str` nor `String`.
pub fn join_error_panic_message(err: JoinError) -> Option<String> {
	let payload = err.try_into_panic().ok()?;
	if let Some(msg) = payload.downcast_ref::<&'static str>() {
		return Some((*msg).to_string());
	}
	payload.downcast_ref::<String>().cloned()
}
