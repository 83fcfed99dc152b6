//! Error composer — phrases for slots whose token count missed their arity.

use crate::arity::SlotMax;

/// Describe one slot whose actual token count fell outside its arity range.
///
/// Pure classification over (minimum, maximum, actually got); the resolver
/// joins the phrases and wraps them in the aggregate error.
pub(crate) fn shortfall(
    name: &str,
    container: bool,
    min: usize,
    max: SlotMax,
    got: usize,
) -> String {
    if let SlotMax::Bounded(max) = max {
        if got > max {
            return format!("`{name}` (at most {max} arguments, but got {got})");
        }
        // A slot declared to take nothing is a configuration smell, not a
        // crash; name it so the developer can see it.
        if min == 0 && max == 0 {
            return format!("`{name}` (zero arguments)");
        }
    }
    if !container {
        return format!("`{name}`");
    }
    if min > 1 {
        format!("`{name}` (at least {min} arguments, but got only {got})")
    } else {
        format!("`{name}` (at least 1 argument)")
    }
}

/// Join phrases with commas and a final "and".
pub(crate) fn join_phrases(phrases: &[String]) -> String {
    match phrases {
        [] => String::new(),
        [one] => one.clone(),
        [head @ .., tail] => format!("{} and {}", head.join(", "), tail),
    }
}
