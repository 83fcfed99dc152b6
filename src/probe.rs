//! Concurrent probe resolver — speculative resolution for completion
//! decisions.
//!
//! One short-lived probe per slot, fanned out over scoped threads and merged
//! by slot index after the scope's join barrier. Probes replay the
//! consumption algorithm against private cursor copies and plain copied
//! arity data; slot sinks are not reachable from a probe, so the live
//! destinations cannot be mutated.

use parking_lot::Mutex;
use std::thread;

use crate::arity::SlotMax;
use crate::cursor::Cursor;
use crate::registry::SlotRegistry;
use crate::sequential::locate_terminator;

/// Arity data copied out of a slot before fan-out.
#[derive(Debug, Clone, Copy)]
struct ProbeView {
    min: usize,
    max: SlotMax,
    start_min: usize,
    passthrough: bool,
}

/// Decide, per slot, whether to offer completion candidates at the current
/// cursor position.
///
/// Accepts the live, possibly incomplete token list. A probe never aborts:
/// values a sink or choice set would reject are consumed and counted all the
/// same. Returns one decision per slot, by ordinal index.
pub fn probe(registry: &SlotRegistry, tokens: &[String]) -> Vec<bool> {
    assert!(
        registry.is_finalized(),
        "SlotRegistry::finalize must succeed before probing"
    );

    let views: Vec<ProbeView> = registry
        .slots()
        .iter()
        .map(|slot| ProbeView {
            min: slot.min(),
            max: slot.max(),
            start_min: slot.start_min(),
            passthrough: slot.is_passthrough(),
        })
        .collect();

    let (cleaned, dash) = match locate_terminator(tokens) {
        Some((cleaned, dash)) => (cleaned, Some(dash)),
        None => (tokens.to_vec(), None),
    };

    let base = Cursor::new(&cleaned, registry.total_min(), dash);
    let offers = Mutex::new(vec![false; views.len()]);

    thread::scope(|scope| {
        for index in 0..views.len() {
            let views = &views;
            let base = &base;
            let offers = &offers;
            scope.spawn(move || {
                let offer = probe_slot(views, index, base.clone());
                offers.lock()[index] = offer;
            });
        }
    });

    offers.into_inner()
}

/// Replay the consumption algorithm up to and including slot `index` on a
/// private cursor, then apply the offer rule: unbounded, or consumed below
/// the minimum, or consumed below the maximum.
fn probe_slot(views: &[ProbeView], index: usize, mut cursor: Cursor<'_>) -> bool {
    let view = views[index];
    if cursor.token_count() < view.start_min {
        // Not enough words on the line to ever reach this slot.
        return false;
    }
    if view.passthrough {
        return true;
    }

    let mut consumed = 0;
    for (position, earlier) in views[..=index].iter().enumerate() {
        if earlier.passthrough {
            continue;
        }
        cursor.begin_slot(earlier.min);
        while cursor.wants_more(earlier.min, earlier.max) {
            // Scratch consumption only: the token is counted, never
            // converted, so a value the live sink would reject cannot
            // abort the probe.
            cursor.pop();
        }
        if position == index {
            consumed = cursor.slot_consumed();
        }
    }

    match view.max {
        SlotMax::Unbounded => true,
        SlotMax::Bounded(max) => consumed < view.min || consumed < max,
    }
}
