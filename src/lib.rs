//! # Goal
//! The main goal of this library is to provide contiguous and ordered
//! container types whose storage is routed through a pluggable raw
//! allocator, with explicit, recoverable failure instead of aborts.
//!
//! Primary attribute of the library is that algorithms are written once
//! against a capability-graded cursor abstraction and reused by every
//! container, so a container only has to say how strong its positions are.
//!
//! Secondary attribute is control over memory: element lifetimes are managed
//! slot by slot, growth policy is explicit, and node storage is arena-based
//! with stable handles.
//!
//! # Features
//! - Allocation management, through the [`core::RawAlloc`] strategy.
//!      - Responsible for: Where do buffers come from and how large may they get?
//! - Position management, through the cursor family of traits.
//!      - Responsible for: What can this position do? (read, re-walk, step back, jump)
//! - Ordering management, through the [`core::Comparator`] strategy.
//!      - Responsible for: Which of two keys comes first?
//!
//! # Architecture
//! There are several pieces that compose into the containers:
//! - [`core`] - allocator and comparator strategies plus the error type.
//! - [`cursor`] - the capability ladder (input ⊂ forward ⊂ bidirectional ⊂
//!   random-access, output orthogonal) and the adaptors over it.
//! - [`algo`] - generic range algorithms bounded by the weakest cursor they need.
//! - [`pair`] - the two-field value the map stores its entries as.
//! - [`vector`] - contiguous storage handing out random-access cursors.
//! - [`tree`] - arena red-black tree handing out bidirectional cursors.
//! - [`map`] - sorted unique-key view over the tree.
//!
//! Cursors are concrete per container; algorithms and containers meet only
//! at the cursor traits, so a new container slots in by implementing them.

pub mod algo;
pub mod core;
pub mod cursor;
pub mod map;
pub mod pair;
pub mod tree;
pub mod vector;

pub use crate::core::{natural, Comparator, Error, Global, Natural, RawAlloc};
pub use crate::map::{MapCursor, OrdMap};
pub use crate::pair::{pair, Pair};
pub use crate::tree::{NodeId, Tree};
pub use crate::vector::Vector;
