//! Analyzer-set construction: reference deduplication and id assignment.

use std::collections::HashSet;
use std::sync::Arc;

use argus_model::{Analyzer, AnalyzerIdMap, AnalyzerLoadError, ProjectHandle};

/// Builds the ordered analyzer list and id bijection for a project.
///
/// Walks solution-level references followed by project-level references,
/// skipping references whose id was already seen, then appends each
/// reference's analyzers for the project language. The output order is
/// deterministic given the reference order; ids are assigned in append
/// order by [`AnalyzerIdMap::insert`].
pub(crate) fn build_analyzer_set(project: &ProjectHandle) -> Result<(Vec<Arc<dyn Analyzer>>, AnalyzerIdMap), AnalyzerLoadError> {
	let mut seen = HashSet::new();
	let mut analyzers = Vec::new();
	let mut map = AnalyzerIdMap::new();

	for reference in project.solution_references().iter().chain(project.references()) {
		if !seen.insert(reference.id()) {
			continue;
		}
		for analyzer in reference.analyzers_for(project.language())? {
			// An instance already mapped through another reference keeps its
			// id and is not appended a second time.
			let before = map.len();
			map.insert(analyzer.clone());
			if map.len() > before {
				analyzers.push(analyzer);
			}
		}
	}

	tracing::trace!(project = ?project.id(), references = seen.len(), analyzers = analyzers.len(), "diag.analyzers.built");
	Ok((analyzers, map))
}

#[cfg(test)]
mod tests {
	use argus_model::{AnalyzerReference, AnalyzerReferenceId, DocumentHandle, DocumentId, ProjectId, ProjectInfo, SkippedAnalyzersInfo};

	use super::*;

	struct NamedAnalyzer(&'static str);

	impl Analyzer for NamedAnalyzer {
		fn name(&self) -> &str {
			self.0
		}
	}

	struct StaticReference {
		id: AnalyzerReferenceId,
		analyzers: Vec<Arc<dyn Analyzer>>,
	}

	impl AnalyzerReference for StaticReference {
		fn id(&self) -> AnalyzerReferenceId {
			self.id
		}

		fn analyzers_for(&self, _language: &str) -> Result<Vec<Arc<dyn Analyzer>>, AnalyzerLoadError> {
			Ok(self.analyzers.clone())
		}
	}

	struct FailingReference(AnalyzerReferenceId);

	impl AnalyzerReference for FailingReference {
		fn id(&self) -> AnalyzerReferenceId {
			self.0
		}

		fn analyzers_for(&self, _language: &str) -> Result<Vec<Arc<dyn Analyzer>>, AnalyzerLoadError> {
			Err(AnalyzerLoadError {
				reference: self.0,
				message: "bad assembly".into(),
			})
		}
	}

	fn project(solution: Vec<Arc<dyn AnalyzerReference>>, references: Vec<Arc<dyn AnalyzerReference>>) -> ProjectHandle {
		ProjectHandle::new(ProjectInfo {
			id: ProjectId(1),
			language: "rust".into(),
			solution_references: solution,
			references,
			documents: vec![DocumentHandle {
				id: DocumentId(1),
				name: "lib.rs".into(),
			}],
			skipped_analyzers: SkippedAnalyzersInfo::default(),
		})
	}

	fn reference(id: u64, analyzers: Vec<Arc<dyn Analyzer>>) -> Arc<dyn AnalyzerReference> {
		Arc::new(StaticReference {
			id: AnalyzerReferenceId(id),
			analyzers,
		})
	}

	#[test]
	fn test_solution_references_precede_project_references() {
		let sol: Arc<dyn Analyzer> = Arc::new(NamedAnalyzer("solution"));
		let proj: Arc<dyn Analyzer> = Arc::new(NamedAnalyzer("project"));
		let p = project(vec![reference(1, vec![sol])], vec![reference(2, vec![proj])]);

		let (analyzers, map) = build_analyzer_set(&p).unwrap();
		assert_eq!(analyzers.len(), 2);
		assert_eq!(analyzers[0].name(), "solution");
		assert_eq!(analyzers[1].name(), "project");
		assert_eq!(map.len(), 2);
	}

	#[test]
	fn test_duplicate_reference_ids_yield_analyzers_once() {
		let analyzer: Arc<dyn Analyzer> = Arc::new(NamedAnalyzer("dup"));
		// Same reference id registered at both solution and project level.
		let p = project(vec![reference(7, vec![analyzer.clone()])], vec![reference(7, vec![analyzer])]);

		let (analyzers, map) = build_analyzer_set(&p).unwrap();
		assert_eq!(analyzers.len(), 1);
		assert_eq!(map.len(), 1);
	}

	#[test]
	fn test_shared_instance_across_distinct_references_kept_once() {
		let shared: Arc<dyn Analyzer> = Arc::new(NamedAnalyzer("shared"));
		let p = project(vec![reference(1, vec![shared.clone()])], vec![reference(2, vec![shared.clone()])]);

		let (analyzers, map) = build_analyzer_set(&p).unwrap();
		assert_eq!(analyzers.len(), 1);
		assert_eq!(map.id_of(&shared).unwrap().as_str(), "a0");
	}

	#[test]
	fn test_load_failure_propagates() {
		let p = project(vec![Arc::new(FailingReference(AnalyzerReferenceId(9)))], Vec::new());
		let err = match build_analyzer_set(&p) {
			Ok(_) => panic!("expected build_analyzer_set to fail"),
			Err(err) => err,
		};
		assert_eq!(err.reference, AnalyzerReferenceId(9));
	}
}
