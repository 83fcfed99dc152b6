//! Sequential resolver — the single-pass word-consumption algorithm.

use crate::cursor::Cursor;
use crate::error::ResolveError;
use crate::registry::SlotRegistry;
use crate::report;

/// Explicit marker after which constrained slot-matching stops.
pub(crate) const TERMINATOR: &str = "--";

/// Outcome of a successful resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Tokens left unassigned, in stream order. Empty unless soft
    /// passthrough is enabled (a passthrough slot captures its leftovers
    /// itself). Handed to the host framework's remaining-arguments callback.
    pub leftover: Vec<String>,
    /// Tokens consumed per slot, by ordinal index.
    pub consumed: Vec<usize>,
}

/// Resolve a token stream against the registry's slots.
///
/// Locates the first `--` marker itself: the marker is dropped and
/// everything at or after its position is kept away from constrained
/// matching. Sinks are mutated in place as tokens are consumed; on failure
/// the caller must treat the destination as aborted, partial values
/// included.
pub fn resolve(registry: &mut SlotRegistry, tokens: &[String]) -> Result<Resolution, ResolveError> {
    match locate_terminator(tokens) {
        Some((cleaned, dash)) => resolve_with_terminator(registry, &cleaned, Some(dash)),
        None => resolve_with_terminator(registry, tokens, None),
    }
}

/// Split the first `--` marker out of a token stream.
///
/// Returns the stream without the marker and the marker's position, or
/// `None` when the stream carries no marker.
pub(crate) fn locate_terminator(tokens: &[String]) -> Option<(Vec<String>, usize)> {
    let dash = tokens.iter().position(|token| token == TERMINATOR)?;
    let mut cleaned = Vec::with_capacity(tokens.len() - 1);
    cleaned.extend_from_slice(&tokens[..dash]);
    cleaned.extend_from_slice(&tokens[dash + 1..]);
    Some((cleaned, dash))
}

/// Resolve with a precomputed terminator index, for callers that split the
/// stream themselves. Tokens at or after `dash` are never consumed by
/// arity-constrained slots.
pub fn resolve_with_terminator(
    registry: &mut SlotRegistry,
    tokens: &[String],
    dash: Option<usize>,
) -> Result<Resolution, ResolveError> {
    assert!(
        registry.is_finalized(),
        "SlotRegistry::finalize must succeed before resolution"
    );
    tracing::debug!(
        "resolving {} token(s) across {} slot(s)",
        tokens.len(),
        registry.slot_count()
    );

    let mut cursor = Cursor::new(tokens, registry.total_min(), dash);
    let mut consumed = vec![0usize; registry.slot_count()];

    for index in 0..registry.slot_count() {
        if registry.slot(index).is_passthrough() {
            continue;
        }
        let min = registry.slot(index).min();
        let max = registry.slot(index).max();

        cursor.begin_slot(min);
        while cursor.wants_more(min, max) {
            let token = cursor.pop();
            registry.slot_mut(index).feed(token)?;
        }
        consumed[index] = cursor.slot_consumed();
        tracing::trace!(
            "slot `{}` consumed {} token(s), {} still owed downstream",
            registry.slot(index).name(),
            consumed[index],
            cursor.needed_remaining()
        );

        if consumed[index] < min {
            return Err(starvation(registry, index, consumed[index]));
        }
    }

    let leftover: Vec<String> = cursor.rest().to_vec();

    if let Some(index) = registry.passthrough_index() {
        for token in &leftover {
            registry.slot_mut(index).feed(token)?;
        }
        consumed[index] = leftover.len();
        tracing::debug!(
            "passthrough slot `{}` captured {} leftover token(s)",
            registry.slot(index).name(),
            leftover.len()
        );
        return Ok(Resolution {
            leftover: Vec::new(),
            consumed,
        });
    }

    if registry.is_soft_passthrough() || leftover.is_empty() {
        return Ok(Resolution { leftover, consumed });
    }

    if let Some(slot) = registry.slots().last() {
        if let crate::arity::SlotMax::Bounded(max) = slot.max() {
            if slot.is_container() && consumed[slot.index()] == max {
                return Err(ResolveError::TooManyFor {
                    slot: slot.name().to_string(),
                    max,
                    got: max + leftover.len(),
                });
            }
        }
    }
    Err(ResolveError::TooMany {
        got: leftover.len(),
    })
}

/// Aggregate error naming the starved slot and every subsequent slot that
/// is still below its minimum. Processing stops here; later slots are never
/// attempted.
fn starvation(registry: &SlotRegistry, first: usize, got: usize) -> ResolveError {
    let slots = registry.slots();
    let starved = &slots[first];
    let mut phrases = vec![report::shortfall(
        starved.name(),
        starved.is_container(),
        starved.min(),
        starved.max(),
        got,
    )];
    for slot in &slots[first + 1..] {
        if !slot.is_passthrough() && slot.min() > 0 {
            phrases.push(report::shortfall(
                slot.name(),
                slot.is_container(),
                slot.min(),
                slot.max(),
                0,
            ));
        }
    }
    ResolveError::RequiredMissing(report::join_phrases(&phrases))
}
