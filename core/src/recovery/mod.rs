//! Sequence storage for replay.
//!
//! The encoder only writes forward into a [`SequenceStore`]; reading history
//! back for a resuming peer goes through [`ReplaySource`].

pub mod store;
pub mod memory;
pub mod persist;

pub use store::*;
pub use memory::*;
pub use persist::*;
