//! Arity ranges and the textual range-expression grammar.

use thiserror::Error;

/// Upper bound of an arity range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotMax {
    /// At most this many tokens.
    Bounded(usize),
    /// No ceiling — consumes as many tokens as downstream constraints allow.
    Unbounded,
}

impl SlotMax {
    pub fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Whether a slot that already holds `consumed` tokens may take one more.
    pub(crate) fn admits(self, consumed: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Bounded(max) => consumed < max,
        }
    }

    /// Sum of two bounds. Any unbounded side makes the total unbounded,
    /// which is why aggregate maxima are advisory only.
    pub(crate) fn plus(self, other: Self) -> Self {
        match (self, other) {
            (Self::Bounded(a), Self::Bounded(b)) => Self::Bounded(a + b),
            _ => Self::Unbounded,
        }
    }
}

/// Declared token-count range for a slot.
///
/// Both ends are optional: what the declaration leaves unsaid is filled in
/// by registry defaults when the slot set is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Arity {
    /// Declared minimum, if any.
    pub min: Option<usize>,
    /// Declared maximum, if any.
    pub max: Option<SlotMax>,
}

impl Arity {
    /// Exactly `count` tokens.
    pub const fn exact(count: usize) -> Self {
        Self {
            min: Some(count),
            max: Some(SlotMax::Bounded(count)),
        }
    }

    /// At least `min` tokens, no ceiling.
    pub const fn at_least(min: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(SlotMax::Unbounded),
        }
    }

    /// Between `min` and `max` tokens.
    pub const fn range(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(SlotMax::Bounded(max)),
        }
    }

    /// Parse a textual range expression.
    ///
    /// Accepted forms:
    /// - a bare count: `"2"` (exactly two tokens)
    /// - a closed range: `"2-3"`
    /// - a half-open range: `"2-"` (no ceiling) or `"-3"` (may be empty)
    /// - the keywords `required` (minimum 1) and `optional` (minimum 0),
    ///   leaving the maximum to registry defaults
    pub fn parse(expression: &str) -> Result<Self, ArityParseError> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(ArityParseError::Empty);
        }
        if expression.eq_ignore_ascii_case("required") {
            return Ok(Self {
                min: Some(1),
                max: None,
            });
        }
        if expression.eq_ignore_ascii_case("optional") {
            return Ok(Self {
                min: Some(0),
                max: None,
            });
        }
        if let Some((low, high)) = expression.split_once('-') {
            let min = if low.trim().is_empty() {
                0
            } else {
                parse_count(low)?
            };
            let max = if high.trim().is_empty() {
                SlotMax::Unbounded
            } else {
                SlotMax::Bounded(parse_count(high)?)
            };
            if let SlotMax::Bounded(high) = max {
                if min > high {
                    return Err(ArityParseError::Inverted { min, max: high });
                }
            }
            return Ok(Self {
                min: Some(min),
                max: Some(max),
            });
        }
        Ok(Self::exact(parse_count(expression)?))
    }
}

fn parse_count(text: &str) -> Result<usize, ArityParseError> {
    let text = text.trim();
    text.parse().map_err(|_| ArityParseError::InvalidCount {
        text: text.to_string(),
    })
}

/// Errors produced by [`Arity::parse`].
#[derive(Debug, Error)]
pub enum ArityParseError {
    #[error("empty arity expression")]
    Empty,

    #[error("invalid count '{text}' in arity expression")]
    InvalidCount { text: String },

    #[error("inverted arity range: minimum {min} exceeds maximum {max}")]
    Inverted { min: usize, max: usize },
}
