//! Data model for the diagnostic computation coordinator.
//!
//! Identifier newtypes, analyzer and analyzer-reference abstractions, project
//! snapshot handles, and the boundary request/result records exchanged with
//! the coordinator. Everything here is transport-agnostic; the wire-shaped
//! records carry serde derives, the in-process handles do not.
#![warn(missing_docs)]

mod analyzer;
mod diagnostics;
mod ids;
mod project;
mod request;

pub use analyzer::{Analyzer, AnalyzerIdMap, AnalyzerLoadError, AnalyzerReference};
pub use diagnostics::{Diagnostic, DiagnosticMap, DiagnosticsResult, Severity, TelemetryInfo};
pub use ids::{AnalyzerId, AnalyzerReferenceId, DocumentId, ProjectId, SnapshotId, TextSpan};
pub use project::{DocumentHandle, ProjectHandle, ProjectInfo, SkippedAnalyzersInfo};
pub use request::{AnalysisKind, DiagnosticsRequest, DocumentScope, RequestPriority};
