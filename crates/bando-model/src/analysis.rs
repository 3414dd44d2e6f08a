//! Analysis snapshots.
//!
//! An [`Analysis`] is the complete result the backend produces for one
//! uploaded document: an executive summary plus the criteria forest. It is
//! decoded in one shot and validated before any view state is built on it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::criterion::{Criterion, DepthFirst};
use crate::error::ModelError;

/// One document's analysis result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Name of the analyzed document.
    #[serde(default)]
    pub file_name: String,
    /// Executive summary extracted by the backend.
    #[serde(default)]
    pub summary: String,
    /// Top-level evaluation criteria in display order.
    #[serde(default)]
    pub criteria: Vec<Criterion>,
}

impl Analysis {
    /// Create an analysis for the given document with the given criteria.
    #[must_use]
    pub fn new(file_name: impl Into<String>, criteria: Vec<Criterion>) -> Self {
        Self {
            file_name: file_name.into(),
            summary: String::new(),
            criteria,
        }
    }

    /// Set the executive summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Decode and validate a JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, ModelError> {
        let analysis: Self = serde_json::from_str(payload)?;
        analysis.validate()?;
        Ok(analysis)
    }

    /// Check the identity invariants the view layer depends on: every
    /// criterion has a non-empty id and no id occurs twice anywhere in the
    /// forest.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for node in DepthFirst::of(&self.criteria) {
            if node.id.is_empty() {
                return Err(ModelError::EmptyId {
                    name: node.name.clone(),
                });
            }
            if !seen.insert(node.id.as_str()) {
                return Err(ModelError::DuplicateId {
                    id: node.id.clone(),
                });
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            file = %self.file_name,
            nodes = seen.len(),
            "analysis validated"
        );
        Ok(())
    }

    /// Total number of criteria at every depth.
    #[must_use]
    pub fn node_count(&self) -> usize {
        DepthFirst::of(&self.criteria).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn forest() -> Vec<Criterion> {
        vec![
            Criterion::new("A", "Offerta tecnica")
                .child(Criterion::new("B", "Qualità"))
                .child(Criterion::new("C", "Sostenibilità").child(Criterion::new("D", "CAM"))),
            Criterion::new("E", "Offerta economica"),
        ]
    }

    #[test]
    fn validate_accepts_unique_ids() {
        let analysis = Analysis::new("gara.pdf", forest());
        assert!(analysis.validate().is_ok());
        assert_eq!(analysis.node_count(), 5);
    }

    #[test]
    fn validate_rejects_duplicate_across_depths() {
        // "B" appears both as a sibling and as a grandchild.
        let analysis = Analysis::new(
            "gara.pdf",
            vec![
                Criterion::new("A", "a")
                    .child(Criterion::new("B", "b"))
                    .child(Criterion::new("C", "c").child(Criterion::new("B", "dup"))),
            ],
        );
        match analysis.validate() {
            Err(ModelError::DuplicateId { id }) => assert_eq!(id, "B"),
            other => panic!("expected DuplicateId, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_empty_id() {
        let analysis = Analysis::new(
            "gara.pdf",
            vec![Criterion::new("A", "a").child(Criterion::new("", "anonima"))],
        );
        match analysis.validate() {
            Err(ModelError::EmptyId { name }) => assert_eq!(name, "anonima"),
            other => panic!("expected EmptyId, got {other:?}"),
        }
    }

    #[test]
    fn from_json_decodes_and_validates() {
        let payload = r#"{
            "fileName": "disciplinare_2024_17.pdf",
            "summary": "Appalto servizi di pulizia.",
            "criteria": [
                {"id": "1", "name": "Offerta tecnica", "maxScore": "70",
                 "children": [{"id": "1.1", "name": "Organizzazione"}]}
            ]
        }"#;
        let analysis = Analysis::from_json(payload).unwrap();
        assert_eq!(analysis.file_name, "disciplinare_2024_17.pdf");
        assert_eq!(analysis.node_count(), 2);
    }

    #[test]
    fn from_json_surfaces_duplicate_ids() {
        let payload = r#"{
            "fileName": "x.pdf",
            "criteria": [
                {"id": "1", "name": "a"},
                {"id": "1", "name": "b"}
            ]
        }"#;
        assert!(matches!(
            Analysis::from_json(payload),
            Err(ModelError::DuplicateId { .. })
        ));
    }

    #[test]
    fn empty_analysis_is_valid() {
        let analysis = Analysis::default();
        assert!(analysis.validate().is_ok());
        assert_eq!(analysis.node_count(), 0);
    }

    // Shape of a generated subtree; ids are assigned afterwards so
    // uniqueness is by construction.
    #[derive(Debug, Clone)]
    struct Shape(Vec<Shape>);

    fn arb_shape() -> impl Strategy<Value = Shape> {
        Just(Shape(Vec::new())).prop_recursive(4, 32, 4, |inner| {
            prop::collection::vec(inner, 0..4).prop_map(Shape)
        })
    }

    fn number(shape: &Shape, next: &mut usize) -> Criterion {
        let id = format!("n{next}");
        *next += 1;
        let children = shape.0.iter().map(|s| number(s, next)).collect();
        Criterion::new(id, "criterio").with_children(children)
    }

    proptest! {
        #[test]
        fn collect_all_ids_is_complete(shapes in prop::collection::vec(arb_shape(), 0..4)) {
            let mut next = 0usize;
            let criteria: Vec<Criterion> =
                shapes.iter().map(|s| number(s, &mut next)).collect();
            let analysis = Analysis::new("p.pdf", criteria);

            prop_assert!(analysis.validate().is_ok());
            let ids = crate::criterion::collect_all_ids(&analysis.criteria);
            // Every assigned id shows up exactly once.
            prop_assert_eq!(ids.len(), next);
            prop_assert_eq!(analysis.node_count(), next);
            for i in 0..next {
                let expected_id = format!("n{}", i);
                prop_assert!(ids.contains(&expected_id));
            }
        }
    }
}
