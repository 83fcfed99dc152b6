//! Positional-argument resolution over typed, arity-ranged slots.
//!
//! ```text
//! Declared fields → Slots → Register → Finalize → Resolve → Sinks + Leftovers
//! ```
//!
//! A host framework registers one [`Slot`] per positional field, finalizes
//! the [`SlotRegistry`] once at startup — configuration defects (misplaced
//! passthrough, shadowed unbounded slots) surface there, before any token is
//! parsed — then calls [`resolve`] per invocation. An explicit `--` marker
//! halts constrained matching; a passthrough slot or soft passthrough turns
//! unmatched trailing words into leftover output instead of an error.
//!
//! [`probe`] answers the speculative "offer completions for this slot?"
//! question against a live, possibly incomplete command line without
//! touching any destination.

mod arity;
mod cursor;
mod error;
mod probe;
mod registry;
mod report;
mod sequential;
mod sink;
mod slot;

pub use arity::{Arity, ArityParseError, SlotMax};
pub use error::{ConfigError, ResolveError};
pub use probe::probe;
pub use registry::SlotRegistry;
pub use sequential::{resolve, resolve_with_terminator, Resolution};
pub use sink::{SinkFn, SinkRejection, SlotSink};
pub use slot::Slot;
