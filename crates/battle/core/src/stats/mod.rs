//! Stat & Resistance Model.
//!
//! ```text
//! [ StatBlock (immutable baseline) ] + [ BuffSet (signed deltas) ]
//!      ↓
//! [ DerivedStats (recomputed, never stored) ]
//! ```
//!
//! Incoming damage is then scaled by the defender's [`ResistanceProfile`]
//! for the element involved.

pub mod block;
pub mod buff;
pub mod derived;
pub mod resistance;

pub use block::{StatBlock, StatKind};
pub use buff::{ActiveBuff, BuffSet};
pub use derived::DerivedStats;
pub use resistance::{Element, ResistanceProfile};
