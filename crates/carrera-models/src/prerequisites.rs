//! Prerequisites between subjects of the same plan.
//!
//! An edge `(subject, prerequisite)` means `prerequisite` must be approved
//! before taking `subject`. Edges never cross owners and never form cycles.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::SubjectId;
use crate::subjects::SubjectStatus;

/// Short form of a subject used in prerequisite lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct SubjectRef {
    pub id: SubjectId,
    pub name: String,
    pub year: i32,
    pub status: SubjectStatus,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PrerequisiteFormDto {
    pub prerequisite_id: SubjectId,
}

/// Prerequisites of one subject and the subjects that require it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrerequisiteLinks {
    pub prerequisites: Vec<SubjectRef>,
    pub required_by: Vec<SubjectRef>,
}

/// Whether adding `subject -> prerequisite` to `edges` closes a cycle.
///
/// `edges` holds existing `(subject, prerequisite)` pairs. A self edge is a cycle.
pub fn would_create_cycle(
    edges: &[(SubjectId, SubjectId)],
    subject: SubjectId,
    prerequisite: SubjectId,
) -> bool {
    let mut graph: HashMap<SubjectId, Vec<SubjectId>> = HashMap::new();
    for &(from, to) in edges {
        graph.entry(from).or_default().push(to);
    }

    let mut stack = vec![prerequisite];
    let mut seen = HashSet::new();
    while let Some(current) = stack.pop() {
        if current == subject {
            return true;
        }
        if seen.insert(current) {
            stack.extend(graph.get(&current).into_iter().flatten().copied());
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> SubjectId {
        SubjectId::from_u128(n)
    }

    #[test]
    fn test_self_edge_is_a_cycle() {
        assert!(would_create_cycle(&[], id(1), id(1)));
    }

    #[test]
    fn test_transitive_cycle() {
        // 1 requires 2, 2 requires 3
        let edges = [(id(1), id(2)), (id(2), id(3))];
        assert!(would_create_cycle(&edges, id(3), id(1)));
        assert!(!would_create_cycle(&edges, id(1), id(3)));
        assert!(!would_create_cycle(&edges, id(4), id(1)));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let edges = [(id(1), id(2)), (id(1), id(3)), (id(2), id(4))];
        assert!(!would_create_cycle(&edges, id(3), id(4)));
    }

    #[test]
    fn test_form_reads_prerequisite_id() {
        let form: PrerequisiteFormDto = serde_urlencoded::from_str(
            "prerequisite_id=00000000-0000-0000-0000-000000000007",
        )
        .unwrap();
        assert_eq!(form.prerequisite_id, id(7));
    }
}
