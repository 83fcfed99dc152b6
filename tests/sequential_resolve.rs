//! Scenario tests for the sequential resolver: exact fills, greedy
//! consumption versus trailing minimums, overflow errors, and value
//! conversion failures.

use std::sync::Arc;

use argslot::{resolve, Arity, ResolveError, SinkRejection, Slot, SlotMax, SlotRegistry};
use parking_lot::Mutex;

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn scalar_slot(name: &str, dest: &Arc<Mutex<Option<String>>>) -> Slot {
    let dest = Arc::clone(dest);
    Slot::scalar(name, move |token| {
        *dest.lock() = Some(token.to_string());
        Ok(())
    })
}

fn container_slot(name: &str, dest: &Arc<Mutex<Vec<String>>>) -> Slot {
    let dest = Arc::clone(dest);
    Slot::container(name, move |token| {
        dest.lock().push(token.to_string());
        Ok(())
    })
}

// =============================================================================
// EXACT-ARITY FILLS
// =============================================================================

#[test]
fn exact_arities_consume_exactly_their_minimums() {
    let pair = Arc::new(Mutex::new(Vec::new()));
    let name = Arc::new(Mutex::new(None));

    let mut registry = SlotRegistry::new();
    registry.register(container_slot("Pair", &pair).with_arity(Arity::exact(2)));
    registry.register(scalar_slot("Name", &name).with_arity(Arity::exact(1)));
    registry.finalize().unwrap();

    let resolution = resolve(&mut registry, &words(&["a", "b", "c"])).unwrap();

    assert_eq!(*pair.lock(), words(&["a", "b"]));
    assert_eq!(name.lock().as_deref(), Some("c"));
    assert_eq!(resolution.consumed, vec![2, 1]);
    assert!(resolution.leftover.is_empty());
}

// =============================================================================
// UNDERFLOW — AGGREGATED REQUIRED-ARGUMENT ERRORS
// =============================================================================

#[test]
fn too_few_tokens_name_every_starved_slot() {
    let first = Arc::new(Mutex::new(Vec::new()));
    let second = Arc::new(Mutex::new(None));

    let mut registry = SlotRegistry::new();
    registry.register(container_slot("First", &first).with_arity(Arity::range(2, 3)));
    registry.register(scalar_slot("Second", &second).with_arity(Arity::exact(1)));
    registry.finalize().unwrap();

    let err = resolve(&mut registry, &words(&["only"])).unwrap_err();

    assert!(matches!(err, ResolveError::RequiredMissing(_)));
    assert_eq!(
        err.to_string(),
        "required argument(s) missing: `First` (at least 2 arguments, but got only 1) and `Second`"
    );
}

#[test]
fn partial_fills_remain_after_a_failed_resolution() {
    let first = Arc::new(Mutex::new(None));
    let second = Arc::new(Mutex::new(None));

    let mut registry = SlotRegistry::new();
    registry.register(scalar_slot("First", &first).with_arity(Arity::exact(1)));
    registry.register(scalar_slot("Second", &second).with_arity(Arity::exact(1)));
    registry.finalize().unwrap();

    let err = resolve(&mut registry, &words(&["one"])).unwrap_err();

    assert_eq!(err.to_string(), "required argument(s) missing: `Second`");
    assert_eq!(first.lock().as_deref(), Some("one"));
    assert!(second.lock().is_none());
}

// =============================================================================
// GREEDY SLOTS VERSUS TRAILING MINIMUMS
// =============================================================================

#[test]
fn trailing_mandatory_slot_outranks_preceding_greedy_slot() {
    let rest = Arc::new(Mutex::new(Vec::new()));
    let name = Arc::new(Mutex::new(None));

    let mut registry = SlotRegistry::new();
    registry.register(container_slot("Rest", &rest).with_arity(Arity::at_least(0)));
    registry.register(scalar_slot("Name", &name).with_arity(Arity::exact(1)));
    registry.finalize().unwrap();

    let resolution = resolve(&mut registry, &words(&["a", "b", "c", "d"])).unwrap();

    assert_eq!(*rest.lock(), words(&["a", "b", "c"]));
    assert_eq!(name.lock().as_deref(), Some("d"));
    assert_eq!(resolution.consumed, vec![3, 1]);
}

#[test]
fn clamped_leading_list_leaves_the_surplus_to_the_last_list() {
    let first = Arc::new(Mutex::new(Vec::new()));
    let second = Arc::new(Mutex::new(Vec::new()));

    let mut registry = SlotRegistry::new();
    registry.register(container_slot("FirstList", &first).with_arity(Arity::at_least(2)));
    registry.register(container_slot("SecondList", &second).with_arity(Arity::at_least(2)));
    registry.finalize().unwrap();

    // The leading list is cut down to its own minimum; the trailing one
    // keeps the open ceiling.
    assert_eq!(registry.slots()[0].max(), SlotMax::Bounded(2));
    assert_eq!(registry.slots()[1].max(), SlotMax::Unbounded);

    resolve(&mut registry, &words(&["f1", "f2", "s1", "s2", "s3"])).unwrap();

    assert_eq!(*first.lock(), words(&["f1", "f2"]));
    assert_eq!(*second.lock(), words(&["s1", "s2", "s3"]));
}

// =============================================================================
// OVERFLOW
// =============================================================================

#[test]
fn full_trailing_container_reports_its_ceiling() {
    let files = Arc::new(Mutex::new(Vec::new()));

    let mut registry = SlotRegistry::new();
    registry.register(container_slot("Files", &files).with_arity(Arity::range(1, 2)));
    registry.finalize().unwrap();

    let err = resolve(&mut registry, &words(&["a", "b", "c", "d"])).unwrap_err();

    assert!(matches!(
        &err,
        ResolveError::TooManyFor { slot, max: 2, got: 4 } if slot == "Files"
    ));
    assert_eq!(
        err.to_string(),
        "too many arguments for `Files` (at most 2 arguments, but got 4)"
    );
}

#[test]
fn excess_tokens_without_a_trailing_container_are_a_generic_error() {
    let name = Arc::new(Mutex::new(None));

    let mut registry = SlotRegistry::new();
    registry.register(scalar_slot("Name", &name).with_arity(Arity::exact(1)));
    registry.finalize().unwrap();

    let err = resolve(&mut registry, &words(&["a", "b"])).unwrap_err();

    assert!(matches!(err, ResolveError::TooMany { got: 1 }));
}

// =============================================================================
// VALUE CONVERSION
// =============================================================================

#[test]
fn choice_set_rejects_unknown_values() {
    let color = Arc::new(Mutex::new(None));

    let mut registry = SlotRegistry::new();
    registry.register(
        scalar_slot("Color", &color)
            .with_arity(Arity::exact(1))
            .with_choices(["red", "green"]),
    );
    registry.finalize().unwrap();

    let err = resolve(&mut registry, &words(&["blue"])).unwrap_err();

    assert!(matches!(
        &err,
        ResolveError::ValueConversion { slot, value, reason }
            if slot == "Color" && value == "blue" && reason.contains("red, green")
    ));
}

#[test]
fn sink_rejections_carry_the_slot_and_offending_value() {
    let mut registry = SlotRegistry::new();
    registry.register(
        Slot::scalar("Port", |token: &str| {
            token
                .parse::<u16>()
                .map(|_| ())
                .map_err(|_| SinkRejection::new("not a port number"))
        })
        .with_arity(Arity::exact(1)),
    );
    registry.finalize().unwrap();

    let err = resolve(&mut registry, &words(&["http"])).unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid value 'http' for `Port`: not a port number"
    );
}
