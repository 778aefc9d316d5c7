//! Character build errors.

use charforge_domain::DomainError;

/// Errors that can occur while applying or resolving a creation choice.
///
/// Every variant aborts the current call. The redirect path of an automatic
/// skill grant is not an error; it produces a pending item instead.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Unknown {kind}: {name}")]
    UnknownEntity { kind: &'static str, name: String },

    #[error("{kind} already selected: {name}")]
    DuplicateSelection { kind: &'static str, name: String },

    #[error("Skill cap exceeded: {0} is already at its maximum level")]
    SkillCapExceeded(String),

    #[error("Invalid category: {choice} is not a {expected} choice")]
    InvalidCategory { choice: String, expected: String },

    #[error("Invalid option {choice:?}: {reason}")]
    InvalidOption { choice: String, reason: String },

    #[error("Budget exceeded: cost {cost} is over the budget of {budget}")]
    BudgetExceeded { cost: u32, budget: u32 },

    #[error("Unknown pending kind: {0}")]
    UnknownPendingKind(String),

    #[error("Prerequisite unmet for {item}: requires {requirement}")]
    PrerequisiteUnmet { item: String, requirement: String },

    #[error("{count} pending item(s) must be resolved first")]
    PendingOutstanding { count: usize },

    #[error("No pending item to resolve")]
    NothingPending,

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl BuildError {
    pub fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownEntity {
            kind,
            name: name.into(),
        }
    }

    pub fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateSelection {
            kind,
            name: name.into(),
        }
    }

    pub fn invalid_option(choice: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            choice: choice.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_category(choice: impl Into<String>, expected: impl ToString) -> Self {
        Self::InvalidCategory {
            choice: choice.into(),
            expected: expected.to_string(),
        }
    }
}
