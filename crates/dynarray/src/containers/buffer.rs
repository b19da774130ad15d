use core::{fmt, mem};

use bytesize::ByteSize;
use log::{debug, trace};

use crate::constants::LARGE_ALLOCATION_BYTES;

/// A single-owner heap array whose capacity is always exactly its length.
///
/// An empty `Buffer` holds no allocation. The storage is released when the buffer is dropped.
pub struct Buffer<T> {
    slots: Box<[T]>,
}

impl<T> Buffer<T> {
    /// Constructs a new, empty `Buffer`. Does not allocate.
    #[inline]
    pub fn empty() -> Self {
        Self {
            slots: Box::new([]),
        }
    }

    /// Constructs a `Buffer` of `len` default values.
    pub fn with_default(len: usize) -> Self
    where
        T: Default,
    {
        Self::from_fn(len, |_| T::default())
    }

    /// Constructs a `Buffer` of `len` values, where slot `i` holds `f(i)`.
    pub fn from_fn<F: FnMut(usize) -> T>(len: usize, f: F) -> Self {
        Self::collect_exact(len, (0..len).map(f))
    }

    /// Constructs a `Buffer` holding the first `len` items of `iter`.
    ///
    /// # Panics
    ///
    /// Panics if `iter` yields fewer than `len` items, or if `len` slots of `T` exceed
    /// `isize::MAX` bytes.
    pub(crate) fn collect_exact<I: IntoIterator<Item = T>>(len: usize, iter: I) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.extend(iter.into_iter().take(len));
        assert_eq!(slots.len(), len, "iterator ended early");
        Self::from(slots)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the size of the storage in bytes.
    #[inline]
    pub fn byte_size(&self) -> usize {
        mem::size_of::<T>() * self.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.slots
    }

    /// Detaches the storage, leaving this buffer empty. Nothing is freed.
    #[inline]
    pub fn take(&mut self) -> Self {
        Self {
            slots: mem::take(&mut self.slots),
        }
    }

    /// Converts the buffer into a [`Vec`] with the same storage.
    ///
    /// The buffer gives up its storage here, so the release is logged now.
    pub fn into_vec(mut self) -> Vec<T> {
        log_release::<T>(self.len());
        mem::take(&mut self.slots).into_vec()
    }
}

fn log_allocation<T>(len: usize) {
    if len == 0 {
        return;
    }
    let bytes = mem::size_of::<T>() * len;
    if bytes >= LARGE_ALLOCATION_BYTES {
        debug!(
            "allocated {} slots ({})",
            len,
            ByteSize::b(bytes as u64).to_string_as(true)
        );
    } else {
        trace!(
            "allocated {} slots ({})",
            len,
            ByteSize::b(bytes as u64).to_string_as(true)
        );
    }
}

fn log_release<T>(len: usize) {
    if len == 0 {
        return;
    }
    trace!(
        "released {} slots ({})",
        len,
        ByteSize::b((mem::size_of::<T>() * len) as u64).to_string_as(true)
    );
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for Buffer<T> {
    fn from(slots: Vec<T>) -> Self {
        // into_boxed_slice drops any excess capacity
        let slots = slots.into_boxed_slice();
        log_allocation::<T>(slots.len());
        Self { slots }
    }
}

impl<T> From<Box<[T]>> for Buffer<T> {
    fn from(slots: Box<[T]>) -> Self {
        log_allocation::<T>(slots.len());
        Self { slots }
    }
}

impl<T: Clone> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Self::collect_exact(self.len(), self.slots.iter().cloned())
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        log_release::<T>(self.len());
    }
}

impl<T> IntoIterator for Buffer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.slots.iter()).finish()
    }
}
