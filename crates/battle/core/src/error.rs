//! Issue taxonomy for the combat pipeline.
//!
//! Nothing in a tick is fatal: every issue is rendered into the battle log and
//! a `tracing` record, and the offending action is skipped. The types here
//! only exist so that the reporting is uniform.

use crate::state::CombatantId;

/// Severity level of an issue, used for log routing.
///
/// - **Recoverable**: the actor falls through to its next action
/// - **Validation**: a request referenced something that is gone
/// - **Internal**: static data is inconsistent and should be fixed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for battle-core issues.
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the variant, stable across releases.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Kind of static definition a lookup failed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DefinitionKind {
    Hero,
    Enemy,
    Ability,
    Status,
}

/// A condition that made the pipeline skip one action or event.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BattleIssue {
    #[error("missing {kind} definition `{id}`")]
    MissingDefinition { kind: DefinitionKind, id: String },

    #[error("target {id} is gone or already defeated")]
    InvalidTarget { id: CombatantId },

    #[error("cannot cast `{ability}`: needs {needed:.0} mana, has {available:.0}")]
    ResourceInsufficient {
        ability: String,
        needed: f64,
        available: f64,
    },
}

impl BattleIssue {
    pub fn missing(kind: DefinitionKind, id: impl Into<String>) -> Self {
        Self::MissingDefinition {
            kind,
            id: id.into(),
        }
    }
}

impl BattleError for BattleIssue {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingDefinition { .. } => ErrorSeverity::Internal,
            Self::InvalidTarget { .. } => ErrorSeverity::Validation,
            Self::ResourceInsufficient { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingDefinition { .. } => "BATTLE_MISSING_DEFINITION",
            Self::InvalidTarget { .. } => "BATTLE_INVALID_TARGET",
            Self::ResourceInsufficient { .. } => "BATTLE_RESOURCE_INSUFFICIENT",
        }
    }
}
