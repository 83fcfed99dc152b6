//! Slot registry — ordered slot set and constraint aggregation.

use crate::arity::SlotMax;
use crate::error::ConfigError;
use crate::slot::Slot;

/// Ordered set of positional slots with aggregate arity totals.
///
/// Slots are registered in declaration order, then the whole set is
/// validated and adjusted exactly once with [`SlotRegistry::finalize`]
/// before the first resolution. Configuration defects surface there, never
/// mid-parse.
#[derive(Debug)]
pub struct SlotRegistry {
    slots: Vec<Slot>,
    total_min: usize,
    total_max: SlotMax,
    /// Registry-level default: untagged slots get a minimum of 1.
    all_required: bool,
    /// Excess tokens become leftover output instead of an error.
    soft_passthrough: bool,
    finalized: bool,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            total_min: 0,
            total_max: SlotMax::Bounded(0),
            all_required: false,
            soft_passthrough: false,
            finalized: false,
        }
    }

    /// Treat every slot without a declared minimum as requiring one token.
    pub fn all_required(mut self, on: bool) -> Self {
        self.all_required = on;
        self
    }

    /// Return excess tokens to the caller instead of raising an arity error.
    pub fn soft_passthrough(mut self, on: bool) -> Self {
        self.soft_passthrough = on;
        self
    }

    /// Append a slot, assigning its ordinal index and recording the running
    /// totals accumulated so far. Returns the assigned index.
    pub fn register(&mut self, mut slot: Slot) -> usize {
        let index = self.slots.len();
        slot.index = index;
        slot.start_min = self.total_min;
        slot.start_max = self.total_max;

        let declared_min = slot.declared.min.unwrap_or(0);
        let declared_max = match slot.declared.max {
            Some(max) => max,
            None if slot.is_container() => SlotMax::Unbounded,
            None => SlotMax::Bounded(1),
        };
        self.total_min += declared_min;
        self.total_max = self.total_max.plus(declared_max);

        self.finalized = false;
        self.slots.push(slot);
        index
    }

    /// Validate and adjust the whole slot set.
    ///
    /// Effective arity is rebuilt from the declared ranges on every call, so
    /// repeated finalization converges instead of clamping twice.
    pub fn finalize(&mut self) -> Result<(), ConfigError> {
        // Fill in what the declarations left unsaid. Passthrough slots sit
        // outside constrained matching entirely: they take whatever is left,
        // so any declared arity on them is meaningless.
        let all_required = self.all_required;
        for slot in &mut self.slots {
            if slot.passthrough {
                slot.min = 0;
                slot.max = SlotMax::Unbounded;
                continue;
            }
            slot.min = slot.declared.min.unwrap_or(usize::from(all_required));
            slot.max = match slot.declared.max {
                Some(max) => max,
                None if slot.is_container() => SlotMax::Unbounded,
                None => SlotMax::Bounded(1),
            };
        }

        // Passthrough legality.
        let last = self.slots.len().checked_sub(1);
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.passthrough && Some(index) != last {
                return Err(ConfigError::MisplacedPassthrough {
                    slot: slot.name.clone(),
                });
            }
        }
        if self.soft_passthrough {
            if let Some(slot) = self.slots.last() {
                if slot.passthrough || slot.max.is_unbounded() {
                    return Err(ConfigError::AmbiguousPassthrough {
                        slot: slot.name.clone(),
                    });
                }
            }
        }

        // Shadow detection: a second unbounded slot with no minimum of its
        // own can never be reached past the first one.
        let mut previous_unbounded: Option<usize> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.passthrough || !slot.max.is_unbounded() {
                continue;
            }
            if let Some(previous) = previous_unbounded {
                if slot.min == 0 {
                    return Err(ConfigError::SliceShadowed {
                        current: slot.name.clone(),
                        previous: self.slots[previous].name.clone(),
                    });
                }
            }
            previous_unbounded = Some(index);
        }

        // Clamp pass: the last variable-length slot has priority. An earlier
        // unbounded slot is cut down to its own minimum whenever a later one
        // with a positive minimum would otherwise be starved.
        for index in 0..self.slots.len() {
            let slot = &self.slots[index];
            if slot.passthrough || !slot.max.is_unbounded() {
                continue;
            }
            let forced_by = self.slots[index + 1..]
                .iter()
                .find(|later| !later.passthrough && later.max.is_unbounded() && later.min > 0)
                .map(|later| later.name.clone());
            if let Some(later_name) = forced_by {
                let own_min = self.slots[index].min;
                self.slots[index].max = SlotMax::Bounded(own_min);
                tracing::warn!(
                    "clamping unbounded positional `{}` to at most {} token(s): `{}` later in the line also takes unbounded arguments",
                    self.slots[index].name,
                    own_min,
                    later_name
                );
            }
        }

        // Recompute the running totals from the adjusted arities.
        let mut running_min = 0usize;
        let mut running_max = SlotMax::Bounded(0);
        for slot in &mut self.slots {
            slot.start_min = running_min;
            slot.start_max = running_max;
            running_min += slot.min;
            running_max = running_max.plus(slot.max);
        }
        self.total_min = running_min;
        self.total_max = running_max;
        self.finalized = true;

        tracing::debug!(
            "slot set finalized: {} slot(s), total minimum {}, total maximum {:?}",
            self.slots.len(),
            self.total_min,
            self.total_max
        );
        Ok(())
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Sum of every slot's effective minimum.
    pub fn total_min(&self) -> usize {
        self.total_min
    }

    /// Sum of every slot's effective maximum; advisory once any slot is
    /// unbounded.
    pub fn total_max(&self) -> SlotMax {
        self.total_max
    }

    pub fn is_soft_passthrough(&self) -> bool {
        self.soft_passthrough
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub(crate) fn slot(&self, index: usize) -> &Slot {
        &self.slots[index]
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut Slot {
        &mut self.slots[index]
    }

    pub(crate) fn passthrough_index(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.passthrough)
    }
}

impl Default for SlotRegistry {
    fn default() -> Self {
        Self::new()
    }
}
