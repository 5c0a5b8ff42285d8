//! Host Adapter abstraction for the diagnostic coordinator.
//!
//! The analyzer host owns the actual compilation and analysis machinery; the
//! coordinator only depends on the narrow surface defined here: producing a
//! [`Compilation`], binding analyzers into an [`AnalysisContext`], and running
//! one analysis invocation to an [`AnalysisOutput`].
#![warn(missing_docs)]

mod adapter;
mod compilation;
mod context;
mod error;
mod output;

pub use adapter::AnalyzerHost;
pub use compilation::Compilation;
pub use context::{AnalysisContext, AnalysisOptions};
pub use error::{HostError, HostResult};
pub use output::{AnalysisOutput, AnalyzerDiagnostics, ExtraSuppression};
