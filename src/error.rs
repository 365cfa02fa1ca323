//! Error types for table operations and structural checks.

use thiserror::Error;

/// Failure to store a new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// The node arena has no index space left. The table is unchanged.
    #[error("table is full: cannot hold more than {max} entries")]
    CapacityExhausted { max: usize },
}

/// A violated structural invariant of the underlying list.
///
/// Only produced by `check_invariants`; a correct table never returns one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("cycle detected: walked {steps} links over {stored} stored nodes")]
    Cycle { steps: usize, stored: usize },
    #[error("only {reachable} of {stored} stored nodes are reachable from the head")]
    Unreachable { reachable: usize, stored: usize },
    #[error("link points at a node that is not stored (after {steps} links)")]
    DanglingLink { steps: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_numbers() {
        let e = TableError::CapacityExhausted { max: 7 };
        assert!(e.to_string().contains('7'));

        let e = InvariantError::Unreachable {
            reachable: 2,
            stored: 3,
        };
        assert_eq!(
            e.to_string(),
            "only 2 of 3 stored nodes are reachable from the head"
        );
    }
}
