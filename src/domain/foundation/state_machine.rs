//! State machine trait for lifecycle enums.
//!
//! Gives every lifecycle enum (plan tiers today) one way to declare its
//! edges and one validated way to move along them.

use super::ValidationError;

/// Trait for enums whose values form a state machine.
///
/// Implementors list their edges; `transition_to` and `is_terminal` come for free.
///
/// ```ignore
/// impl StateMachine for Plan {
///     const FIELD: &'static str = "plan";
///
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Basic, Premium) | (Premium, Basic))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Basic => vec![Premium],
///             Premium => vec![Basic],
///         }
///     }
/// }
///
/// let next = Plan::Basic.transition_to(Plan::Premium)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Field name reported when a transition is rejected.
    const FIELD: &'static str;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                Self::FIELD,
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
