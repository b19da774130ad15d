//! An exact-capacity generic dynamic array.
//!
//! [`DynamicArray`] owns a contiguous [`Buffer`] whose capacity is always exactly the number
//! of live elements. There is no growth strategy: every operation that changes the length
//! allocates storage of the new length, fills it, adopts it and releases the old storage.
//!
//! Index and range preconditions are checked and reported as [`ArrayError`]. Selections
//! ([`Selection`], [`SelectionMut`]) are views that borrow from the array they were taken
//! from.
//!
//! ```
//! use dynarray::{dynarray, DynamicArray};
//!
//! let mut array = dynarray![1, 2, 3];
//! array.insert(9, 1)?;
//! assert_eq!(array, [1, 9, 2, 3]);
//!
//! let indices: DynamicArray<usize> = dynarray![3, 0];
//! assert_eq!(array.gather(&indices)?, [3, 1]);
//! # Ok::<(), dynarray::ArrayError>(())
//! ```

pub mod constants;
pub mod containers;
mod error;
mod macros;
mod position;

pub use containers::{
    array::DynamicArray,
    buffer::Buffer,
    selection::{Selection, SelectionMut},
};
pub use error::ArrayError;
pub use position::Position;
