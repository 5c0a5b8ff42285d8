//! Two-class preemptive admission over compute attempts.
//!
//! High-priority tickets fire every registered normal preempt source on
//! admission and are never cancelled themselves. Normal tickets first drain
//! all in-flight high work, then run raced against their own preempt source;
//! a preempted attempt is retried from admission, indefinitely, until it
//! completes or the caller cancels. The retry carries no backoff: high
//! arrivals bound the retry cadence because each preemption costs a
//! scheduler hop on the high side.

use argus_model::{DiagnosticsRequest, DiagnosticsResult, RequestPriority};
use argus_worker::TaskClass;
use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;

use crate::coordinator::DiagnosticCoordinator;
use crate::error::{ComputeError, Result};

/// Identity of one in-flight attempt in the scheduler registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TicketId(pub(crate) u64);

/// Classification of one finished attempt.
enum AttemptOutcome {
	/// The attempt produced a caller-visible outcome.
	Done(Result<DiagnosticsResult>),
	/// The attempt was cancelled by its own preempt source; retry.
	Preempted,
}

/// Deregisters a ticket and aborts its compute task on drop.
///
/// Deregistration must survive the awaiting future being dropped (a caller
/// abandoning `get_diagnostics` mid-flight), so it lives here rather than in
/// straight-line code after the await.
struct TicketGuard {
	coordinator: DiagnosticCoordinator,
	ticket: TicketId,
	priority: RequestPriority,
	abort: Option<AbortHandle>,
}

impl TicketGuard {
	fn disarm_abort(&mut self) {
		self.abort = None;
	}
}

impl Drop for TicketGuard {
	fn drop(&mut self) {
		if let Some(abort) = self.abort.take() {
			abort.abort();
		}
		let mut state = self.coordinator.inner.state.lock();
		let removed = match self.priority {
			RequestPriority::High => state.high.remove(&self.ticket).is_some(),
			RequestPriority::Normal => state.normal.remove(&self.ticket).is_some(),
		};
		debug_assert!(removed, "ticket deregistered twice");
	}
}

impl DiagnosticCoordinator {
	/// Runs a request to a caller-visible outcome, retrying preempted
	/// normal attempts.
	pub(crate) async fn schedule(&self, request: DiagnosticsRequest, caller: CancellationToken) -> Result<DiagnosticsResult> {
		loop {
			self.inner.stats.attempt();
			match self.run_attempt(&request, &caller).await {
				AttemptOutcome::Done(result) => {
					if result.is_ok() {
						self.inner.stats.completed();
					}
					return result;
				}
				AttemptOutcome::Preempted => {
					debug_assert!(matches!(request.priority, RequestPriority::Normal), "high-priority attempt classified as preempted");
					self.inner.stats.retried();
					tracing::trace!(project = ?request.project.id(), "diag.attempt.retry");
				}
			}
		}
	}

	async fn run_attempt(&self, request: &DiagnosticsRequest, caller: &CancellationToken) -> AttemptOutcome {
		if caller.is_cancelled() {
			return AttemptOutcome::Done(Err(ComputeError::Cancelled));
		}

		match request.priority {
			RequestPriority::High => self.preempt_normals(),
			RequestPriority::Normal => {
				if let Err(err) = self.drain_high(caller).await {
					return AttemptOutcome::Done(Err(err));
				}
			}
		}

		let ticket = self.next_ticket();
		let preempt = CancellationToken::new();
		let done = CancellationToken::new();

		{
			let mut state = self.inner.state.lock();
			let fresh = match request.priority {
				RequestPriority::High => state.high.insert(ticket, done.clone()).is_none(),
				RequestPriority::Normal => state.normal.insert(ticket, preempt.clone()).is_none(),
			};
			debug_assert!(fresh, "ticket registered twice");
		}
		let mut guard = TicketGuard {
			coordinator: self.clone(),
			ticket,
			priority: request.priority,
			abort: None,
		};

		let class = match request.priority {
			RequestPriority::High => TaskClass::Interactive,
			RequestPriority::Normal => TaskClass::Background,
		};
		let task = {
			let coordinator = self.clone();
			let request = request.clone();
			let caller = caller.clone();
			let preempt = preempt.clone();
			// Fires the registered done signal on success, failure, panic,
			// and abort alike.
			let done_guard = done.drop_guard();
			argus_worker::spawn(class, async move {
				let _done = done_guard;
				tokio::select! {
					biased;
					_ = caller.cancelled() => Err(ComputeError::Cancelled),
					_ = preempt.cancelled() => Err(ComputeError::Cancelled),
					result = coordinator.compute_attempt(&request) => result,
				}
			})
		};
		guard.abort = Some(task.abort_handle());

		let joined = task.await;
		guard.disarm_abort();
		drop(guard);

		let result = match joined {
			Ok(result) => result,
			Err(join_err) if join_err.is_panic() => {
				let msg = argus_worker::join_error_panic_message(join_err).unwrap_or_else(|| "<unknown panic>".to_string());
				tracing::error!(panic = %msg, "diag.attempt.panicked");
				Err(ComputeError::Contract(format!("compute task panicked: {msg}")))
			}
			Err(_) => Err(ComputeError::Cancelled),
		};

		match result {
			// Cancelled with the local preempt source fired: a preemption,
			// not a caller outcome. When the caller cancelled as well, the
			// retry re-entry surfaces that at its admission check.
			Err(ComputeError::Cancelled) if preempt.is_cancelled() => {
				debug_assert!(matches!(request.priority, RequestPriority::Normal), "preempt source fired for high-priority ticket");
				AttemptOutcome::Preempted
			}
			other => AttemptOutcome::Done(other),
		}
	}

	/// Fires every registered normal preempt source (high admission).
	fn preempt_normals(&self) {
		let sources: Vec<CancellationToken> = {
			let state = self.inner.state.lock();
			state.normal.values().cloned().collect()
		};
		if sources.is_empty() {
			return;
		}
		tracing::debug!(count = sources.len(), "diag.preempt");
		self.inner.stats.preempted(sources.len());
		for source in sources {
			// Idempotent; a source whose attempt already finished absorbs
			// the fire silently.
			source.cancel();
		}
	}

	/// Waits until no high ticket is in flight (normal admission).
	///
	/// A drain loop, not a fixed list: high tickets arriving during a wait
	/// are picked up by the re-snapshot and waited on too.
	async fn drain_high(&self, caller: &CancellationToken) -> Result<()> {
		loop {
			let in_flight: Vec<CancellationToken> = {
				let state = self.inner.state.lock();
				state.high.values().cloned().collect()
			};
			if in_flight.is_empty() {
				return Ok(());
			}
			tracing::trace!(high_in_flight = in_flight.len(), "diag.drain");
			for done in in_flight {
				tokio::select! {
					biased;
					_ = caller.cancelled() => return Err(ComputeError::Cancelled),
					_ = done.cancelled() => {}
				}
			}
		}
	}
}
