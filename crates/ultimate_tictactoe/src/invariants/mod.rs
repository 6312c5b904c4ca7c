//! Properties every reachable [`GameState`](crate::GameState) satisfies.
//!
//! Each invariant is a zero-sized type, so a group of them can be named as a
//! tuple type and checked in one call after every move.

/// A property of a state.
pub trait Invariant<S> {
    /// Returns true if the property holds.
    fn holds(state: &S) -> bool;

    /// What the property says, used in violation reports.
    fn description() -> &'static str;
}

/// An invariant that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the failed invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a violation report.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Invariants checked together, reporting every failure rather than the first.
pub trait InvariantSet<S> {
    /// Checks each member invariant.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, A, B, C> InvariantSet<S> for (A, B, C)
where
    A: Invariant<S>,
    B: Invariant<S>,
    C: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let members: [(fn(&S) -> bool, fn() -> &'static str); 3] = [
            (A::holds, A::description),
            (B::holds, B::description),
            (C::holds, C::description),
        ];
        let violations: Vec<InvariantViolation> = members
            .iter()
            .filter(|(holds, _)| !holds(state))
            .map(|(_, description)| InvariantViolation::new(description()))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod alternating_turn;
pub mod forced_board;
pub mod status_consistent;

pub use alternating_turn::AlternatingTurnInvariant;
pub use forced_board::ForcedBoardInvariant;
pub use status_consistent::StatusConsistentInvariant;

/// All game invariants as a composable set.
pub type UltimateInvariants = (
    StatusConsistentInvariant,
    AlternatingTurnInvariant,
    ForcedBoardInvariant,
);
