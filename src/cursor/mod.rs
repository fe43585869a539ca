//! Uniform position abstraction over raw pointers and tree nodes.

mod raw;
mod rev;
mod traits;

pub use raw::{SliceCursor, SliceCursorMut};
pub use rev::Rev;
pub use traits::{
    advance_by, distance, BidiCursor, Bidirectional, Forward, ForwardCursor, Input, InputCursor,
    Output, OutputCursor, RandomAccess, RandomCursor,
};
