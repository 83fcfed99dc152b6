//! Slot — one positional-argument destination.

use crate::arity::{Arity, SlotMax};
use crate::error::ResolveError;
use crate::sink::{SinkRejection, SlotSink};

/// One positional-argument destination derived from a declared field.
///
/// A slot carries its display name, the value-sink capability that accepts
/// matched tokens, and the declared arity range. Registration assigns the
/// ordinal index once; finalization computes the effective minimum/maximum
/// and the cumulative totals of everything registered before it.
#[derive(Debug)]
pub struct Slot {
    pub(crate) name: String,
    pub(crate) usage: String,
    pub(crate) sink: SlotSink,
    pub(crate) declared: Arity,
    /// Captures every otherwise-unassigned leftover token.
    pub(crate) passthrough: bool,
    /// Admissible token values, if restricted.
    pub(crate) choices: Option<Vec<String>>,
    /// Assigned once at registration, never changes.
    pub(crate) index: usize,
    /// Effective minimum, computed at finalize.
    pub(crate) min: usize,
    /// Effective maximum, computed at finalize.
    pub(crate) max: SlotMax,
    /// Sum of effective minimums of all slots before this one.
    pub(crate) start_min: usize,
    /// Sum of effective maximums of all slots before this one.
    pub(crate) start_max: SlotMax,
}

impl Slot {
    /// Scalar destination — holds a single value.
    pub fn scalar(
        name: impl Into<String>,
        sink: impl FnMut(&str) -> Result<(), SinkRejection> + Send + 'static,
    ) -> Self {
        Self::new(name, SlotSink::Scalar(Box::new(sink)))
    }

    /// Container destination — appends every accepted token.
    pub fn container(
        name: impl Into<String>,
        sink: impl FnMut(&str) -> Result<(), SinkRejection> + Send + 'static,
    ) -> Self {
        Self::new(name, SlotSink::Container(Box::new(sink)))
    }

    /// Build a slot around an explicit sink capability.
    pub fn new(name: impl Into<String>, sink: SlotSink) -> Self {
        Self {
            name: name.into(),
            usage: String::new(),
            sink,
            declared: Arity::default(),
            passthrough: false,
            choices: None,
            index: 0,
            min: 0,
            max: SlotMax::Bounded(0),
            start_min: 0,
            start_max: SlotMax::Bounded(0),
        }
    }

    /// Usage text shown by the host framework.
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Declared arity range.
    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.declared = arity;
        self
    }

    /// Capture every otherwise-unassigned leftover token instead of letting
    /// it raise an arity error. Must be the last slot registered.
    pub fn passthrough(mut self) -> Self {
        self.passthrough = true;
        self
    }

    /// Restrict accepted tokens to a fixed set of values.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Effective minimum. Meaningful only after the registry is finalized.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Effective maximum. Meaningful only after the registry is finalized.
    pub fn max(&self) -> SlotMax {
        self.max
    }

    /// Sum of the minimums of every slot registered before this one.
    pub fn start_min(&self) -> usize {
        self.start_min
    }

    /// Sum of the maximums of every slot registered before this one.
    pub fn start_max(&self) -> SlotMax {
        self.start_max
    }

    pub fn is_passthrough(&self) -> bool {
        self.passthrough
    }

    pub fn is_container(&self) -> bool {
        self.sink.is_container()
    }

    /// Hand one token to the destination, checking the choice set first.
    pub(crate) fn feed(&mut self, token: &str) -> Result<(), ResolveError> {
        if let Some(choices) = &self.choices {
            if !choices.iter().any(|choice| choice == token) {
                return Err(ResolveError::ValueConversion {
                    slot: self.name.clone(),
                    value: token.to_string(),
                    reason: format!("expected one of: {}", choices.join(", ")),
                });
            }
        }
        self.sink
            .accept(token)
            .map_err(|rejection| ResolveError::ValueConversion {
                slot: self.name.clone(),
                value: token.to_string(),
                reason: rejection.to_string(),
            })
    }
}
