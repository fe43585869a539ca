//! Foundation shared by all containers: the allocator capability, the
//! comparator capability, and the error taxonomy.

mod alloc;
mod compare;
mod error;

pub use alloc::{Global, RawAlloc};
pub use compare::{natural, Comparator, Natural};
pub use error::Error;
