//! Remote diagnostic computation coordinator.
//!
//! Given a project snapshot and a set of analyzer ids, produces shaped
//! diagnostic results while reusing one expensive per-project analysis
//! context across fine-grained requests and coordinating concurrent
//! requests under a two-class priority scheme with preemption and retry.
//!
//! The coordinator owns exactly three pieces of shared mutable state behind
//! one mutex: the context-cache slot and the two in-flight ticket
//! registries. Everything else flows from request to result.

mod analyzer_set;
mod cache;
mod compute;
mod coordinator;
mod error;
mod scheduler;
mod shape;
mod telemetry;

pub use cache::CacheEntry;
pub use coordinator::{DiagnosticCoordinator, InFlightCounts, SchedulerStats};
pub use error::{ComputeError, Result};
pub use telemetry::PerformanceTracker;
