//! Error types for slot configuration and resolution.

use thiserror::Error;

use crate::arity::ArityParseError;

/// Configuration defects caught when the slot set is finalized.
///
/// These are developer mistakes in the slot declarations, detected once at
/// startup before any token is parsed, and are fatal to program setup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A passthrough slot was registered before other slots.
    #[error("passthrough slot `{slot}` must be the last positional slot")]
    MisplacedPassthrough { slot: String },

    /// Soft passthrough and a trailing unbounded slot both claim the
    /// overflow tokens.
    #[error("soft passthrough is ambiguous: trailing slot `{slot}` already accepts unbounded arguments")]
    AmbiguousPassthrough { slot: String },

    /// An unbounded slot can never receive tokens because an earlier
    /// unbounded slot always consumes first and nothing forces tokens past it.
    #[error("positional `{current}` can never match: it is shadowed by the unbounded `{previous}` before it")]
    SliceShadowed { current: String, previous: String },

    /// A slot declaration carried an unparseable range expression.
    #[error("invalid arity expression: {0}")]
    InvalidArity(#[from] ArityParseError),
}

/// Failures of one resolution invocation.
///
/// Reported to the caller, expected to produce a usage message and a
/// non-zero exit; never retried. A failed resolution leaves partial sink
/// state behind — the caller must discard the destination wholesale.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// One or more slots did not reach their minimum. The message aggregates
    /// every under-satisfied slot from the first failure onward.
    #[error("required argument(s) missing: {0}")]
    RequiredMissing(String),

    /// The trailing container was filled to its declared ceiling and tokens
    /// were still left over.
    #[error("too many arguments for `{slot}` (at most {max} arguments, but got {got})")]
    TooManyFor { slot: String, max: usize, got: usize },

    /// Tokens were left over and no slot or passthrough could own them.
    #[error("too many arguments ({got} unexpected)")]
    TooMany { got: usize },

    /// A sink or choice set rejected a token.
    #[error("invalid value '{value}' for `{slot}`: {reason}")]
    ValueConversion {
        slot: String,
        value: String,
        reason: String,
    },
}
