//! Criterion tree nodes.
//!
//! A [`Criterion`] is one node in the evaluation-criteria tree extracted
//! from a tender document. The tree is an immutable snapshot: it is built
//! wholesale from a backend payload and never mutated in place; updates
//! arrive as a fresh snapshot.
//!
//! # Example
//!
//! ```
//! use bando_model::criterion::{Criterion, collect_all_ids};
//!
//! let forest = vec![
//!     Criterion::new("A", "Offerta tecnica")
//!         .child(Criterion::new("B", "Qualità"))
//!         .child(Criterion::new("C", "Sostenibilità").child(Criterion::new("D", "CAM"))),
//! ];
//!
//! let ids = collect_all_ids(&forest);
//! assert_eq!(ids.len(), 4);
//! assert!(ids.contains("D"));
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::similarity::Similarity;

/// A cross-document match attached to a criterion.
///
/// Ids are unique only within the owning criterion's similarity list; they
/// may collide across different criteria and must never be used as global
/// keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarCriterion {
    /// Identifier within the parent's similarity list.
    pub id: String,
    /// Similarity measure, canonical fraction in `[0, 1]`.
    pub score: Similarity,
    /// The matched excerpt from the other document.
    #[serde(default)]
    pub source_text: String,
    /// Identifier of the matching criterion in the other document.
    #[serde(default)]
    pub origin_criterion_id: String,
    /// Originating document, used for cross-navigation.
    #[serde(default)]
    pub source_file_name: String,
}

impl SimilarCriterion {
    /// Create a similar-criterion entry with the given id and score.
    #[must_use]
    pub fn new(id: impl Into<String>, score: Similarity) -> Self {
        Self {
            id: id.into(),
            score,
            source_text: String::new(),
            origin_criterion_id: String::new(),
            source_file_name: String::new(),
        }
    }

    /// Set the matched source excerpt.
    #[must_use]
    pub fn with_source_text(mut self, text: impl Into<String>) -> Self {
        self.source_text = text.into();
        self
    }

    /// Set the matching criterion's id in the other document.
    #[must_use]
    pub fn with_origin(mut self, id: impl Into<String>) -> Self {
        self.origin_criterion_id = id.into();
        self
    }

    /// Set the originating document name.
    #[must_use]
    pub fn with_source_file(mut self, name: impl Into<String>) -> Self {
        self.source_file_name = name.into();
        self
    }
}

/// One node in the evaluation-criteria tree.
///
/// Ids are unique across the *entire* tree, not just among siblings: the
/// view layer keys collapse state by id in a flat set. Uniqueness is
/// enforced by [`Analysis::validate`](crate::Analysis::validate) at the
/// payload boundary, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    /// Tree-wide unique identifier.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Display-formatted maximum score; may carry units, never parsed.
    #[serde(default)]
    pub max_score: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Cross-document matches, informational only.
    #[serde(default, rename = "similarCriteria")]
    pub similar: Vec<SimilarCriterion>,
    /// Sub-criteria in display order.
    #[serde(default)]
    pub children: Vec<Criterion>,
}

impl Criterion {
    /// Create a criterion with the given id and name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_score: String::new(),
            description: String::new(),
            similar: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the display-formatted maximum score.
    #[must_use]
    pub fn with_max_score(mut self, score: impl Into<String>) -> Self {
        self.max_score = score.into();
        self
    }

    /// Set the description text.
    #[must_use]
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Add a child criterion.
    #[must_use]
    pub fn child(mut self, node: Criterion) -> Self {
        self.children.push(node);
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<Criterion>) -> Self {
        self.children = nodes;
        self
    }

    /// Add a similar-criterion entry.
    #[must_use]
    pub fn with_similar(mut self, entry: SimilarCriterion) -> Self {
        self.similar.push(entry);
        self
    }

    /// Whether this criterion has sub-criteria.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in the subtree rooted here, including this one.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        DepthFirst::of(std::slice::from_ref(self)).count()
    }
}

/// Depth-first iterator over a criterion forest.
///
/// Visits every node exactly once, parents before children, siblings in
/// display order. Uses an explicit work-list so arbitrarily deep payloads
/// cannot exhaust the call stack.
#[derive(Debug)]
pub struct DepthFirst<'a> {
    stack: Vec<&'a Criterion>,
}

impl<'a> DepthFirst<'a> {
    /// Iterate over `forest` and all descendants.
    #[must_use]
    pub fn of(forest: &'a [Criterion]) -> Self {
        Self {
            stack: forest.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a Criterion;

    fn next(&mut self) -> Option<&'a Criterion> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Collect the id of every node in the forest, at every depth.
///
/// This is the input the view layer's `collapse_all` expects; completeness
/// matters, ordering does not.
#[must_use]
pub fn collect_all_ids(forest: &[Criterion]) -> HashSet<String> {
    DepthFirst::of(forest).map(|node| node.id.clone()).collect()
}
