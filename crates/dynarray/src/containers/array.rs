use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    iter, mem,
    ops::{Add, AddAssign, Index, IndexMut},
    slice,
};

use super::buffer::Buffer;
use crate::error::ArrayError;

/// A contiguous array type, written as `DynamicArray<T>`, whose capacity always equals its length.
///
/// There is no growth strategy. Every operation that changes the length allocates storage of
/// exactly the new length, fills it, adopts it, and releases the old storage.
pub struct DynamicArray<T> {
    buf: Buffer<T>,
}

impl<T> DynamicArray<T> {
    /// Constructs a new, empty `DynamicArray`. Does not allocate.
    #[inline]
    pub fn new() -> Self {
        Self {
            buf: Buffer::empty(),
        }
    }

    /// Constructs a `DynamicArray` of `len` default values.
    pub fn with_size(len: usize) -> Self
    where
        T: Default,
    {
        Self::from_buffer(Buffer::with_default(len))
    }

    /// Constructs a `DynamicArray` that takes ownership of `buf`.
    #[inline]
    pub fn from_buffer(buf: Buffer<T>) -> Self {
        Self { buf }
    }

    /// Constructs a `DynamicArray` holding a copy of each value, in order.
    pub fn from_values(values: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_buffer(Buffer::collect_exact(values.len(), values.iter().cloned()))
    }

    /// Constructs a `DynamicArray` holding the elements of every part, concatenated in order.
    ///
    /// The storage is allocated once, sized to the sum of the part lengths.
    pub fn concat(parts: &[&DynamicArray<T>]) -> Self
    where
        T: Clone,
    {
        let len = parts.iter().map(|part| part.len()).sum();
        Self::from_buffer(Buffer::collect_exact(
            len,
            parts.iter().flat_map(|part| part.iter().cloned()),
        ))
    }

    /// Consumes the array, returning its storage.
    #[inline]
    pub fn into_buffer(self) -> Buffer<T> {
        self.buf
    }

    /// Returns the number of elements in the array.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn is_not_empty(&self) -> bool {
        !self.buf.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.buf.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buf.as_mut_slice()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Replaces the storage with `new_len` default values. Elements are not preserved.
    ///
    /// Does nothing if the length is unchanged.
    pub fn set_size(&mut self, new_len: usize) -> &mut Self
    where
        T: Default,
    {
        if self.len() != new_len {
            drop(self.buf.take());
            self.buf = Buffer::with_default(new_len);
        }
        self
    }

    /// Reallocates to exactly `new_len` slots, keeping the leading `min(len, new_len)` elements.
    ///
    /// New trailing slots hold default values. Does nothing if the length is unchanged.
    pub fn resize(&mut self, new_len: usize) -> &mut Self
    where
        T: Default,
    {
        if self.len() != new_len {
            let mut resized = Self::from_buffer(Buffer::collect_exact(
                new_len,
                self.buf
                    .take()
                    .into_iter()
                    .chain(iter::repeat_with(T::default)),
            ));
            self.adopt(&mut resized);
        }
        self
    }

    /// Releases the storage. The array is empty afterwards.
    pub fn clear(&mut self) -> &mut Self {
        drop(self.buf.take());
        self
    }

    /// Takes ownership of `other`'s storage, releasing this array's storage first.
    ///
    /// `other` is left empty. No element is copied or moved.
    pub fn adopt(&mut self, other: &mut Self) -> &mut Self {
        drop(mem::take(&mut self.buf));
        self.buf = other.buf.take();
        self
    }

    /// Exchanges storage with `other`. No element is copied or moved.
    pub fn swap_storage(&mut self, other: &mut Self) -> &mut Self {
        mem::swap(&mut self.buf, &mut other.buf);
        self
    }

    /// Exchanges the elements at indices `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either index is out of range.
    pub fn swap_elements(&mut self, a: usize, b: usize) -> Result<&mut Self, ArrayError> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.as_mut_slice().swap(a, b);
        Ok(self)
    }

    /// Replaces the contents with a copy of `values`.
    ///
    /// Storage of the same length is reused, otherwise it is reallocated to the new length.
    pub fn assign_values(&mut self, values: &[T]) -> &mut Self
    where
        T: Clone,
    {
        self.refill(values.len(), values.iter().cloned())
    }

    /// Replaces the contents with the elements of every part, concatenated in order.
    pub fn assign_arrays(&mut self, parts: &[&DynamicArray<T>]) -> &mut Self
    where
        T: Clone,
    {
        let len = parts.iter().map(|part| part.len()).sum();
        self.refill(len, parts.iter().flat_map(|part| part.iter().cloned()))
    }

    /// Replaces the contents with a copy of `other`.
    pub fn assign_from(&mut self, other: &Self) -> &mut Self
    where
        T: Clone,
    {
        self.refill(other.len(), other.iter().cloned())
    }

    fn refill<I: IntoIterator<Item = T>>(&mut self, len: usize, values: I) -> &mut Self {
        if self.len() == len {
            for (slot, value) in self.iter_mut().zip(values) {
                *slot = value;
            }
        } else {
            drop(self.buf.take());
            self.buf = Buffer::collect_exact(len, values);
        }
        self
    }

    /// Appends a copy of `other`'s elements.
    ///
    /// The concatenation is built in fresh storage which is then adopted.
    pub fn append(&mut self, other: &Self) -> &mut Self
    where
        T: Clone,
    {
        let len = self.len() + other.len();
        let mut joined = Self::from_buffer(Buffer::collect_exact(
            len,
            self.buf.take().into_iter().chain(other.iter().cloned()),
        ));
        self.adopt(&mut joined)
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `index` is out of range.
    pub fn at(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    /// Returns a copy of the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `index` is out of range.
    pub fn get(&self, index: usize) -> Result<T, ArrayError>
    where
        T: Clone,
    {
        self.as_slice()
            .get(index)
            .cloned()
            .ok_or(ArrayError::OutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Inserts `element` at `index`, shifting every element after it to the right.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `index > len`.
    pub fn insert(&mut self, element: T, index: usize) -> Result<&mut Self, ArrayError> {
        let len = self.len();
        if index > len {
            return Err(ArrayError::OutOfRange { index, len });
        }

        let mut source = self.buf.take().into_iter();
        let mut element = Some(element);
        let mut inserted = Self::from_buffer(Buffer::collect_exact(
            len + 1,
            (0..=len).filter_map(|i| {
                if i == index {
                    element.take()
                } else {
                    source.next()
                }
            }),
        ));
        Ok(self.adopt(&mut inserted))
    }

    /// Inserts a copy of `other`'s elements starting at `index`.
    ///
    /// Inserting an empty array does nothing.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `index > len`.
    pub fn insert_array(&mut self, other: &Self, index: usize) -> Result<&mut Self, ArrayError>
    where
        T: Clone,
    {
        let len = self.len();
        if index > len {
            return Err(ArrayError::OutOfRange { index, len });
        }
        if other.is_empty() {
            return Ok(self);
        }

        let end = index + other.len();
        let mut source = self.buf.take().into_iter();
        let mut copied = other.iter().cloned();
        let mut inserted = Self::from_buffer(Buffer::collect_exact(
            len + other.len(),
            (0..len + other.len()).filter_map(|i| {
                if i < index || i >= end {
                    source.next()
                } else {
                    copied.next()
                }
            }),
        ));
        Ok(self.adopt(&mut inserted))
    }

    /// Inserts a copy of the whole array into itself, starting at `index`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `index > len`.
    pub fn insert_self(&mut self, index: usize) -> Result<&mut Self, ArrayError>
    where
        T: Clone,
    {
        let copy = self.clone();
        self.insert_array(&copy, index)
    }

    /// Removes the element at `index`, shifting every element after it to the left.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `index` is out of range.
    pub fn erase(&mut self, index: usize) -> Result<&mut Self, ArrayError> {
        self.check_index(index)?;
        let len = self.len();
        let mut erased = Self::from_buffer(Buffer::collect_exact(
            len - 1,
            self.buf
                .take()
                .into_iter()
                .enumerate()
                .filter_map(|(i, element)| (i != index).then_some(element)),
        ));
        Ok(self.adopt(&mut erased))
    }

    /// Removes the elements in the inclusive range `first..=last`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `first > last` or `last` is out of range.
    pub fn erase_range(&mut self, first: usize, last: usize) -> Result<&mut Self, ArrayError> {
        let len = self.len();
        if first > last || last >= len {
            return Err(ArrayError::InvalidRange { first, last, len });
        }

        let mut erased = Self::from_buffer(Buffer::collect_exact(
            len - (last - first + 1),
            self.buf
                .take()
                .into_iter()
                .enumerate()
                .filter_map(|(i, element)| (i < first || i > last).then_some(element)),
        ));
        Ok(self.adopt(&mut erased))
    }

    /// Reverses the order of the elements.
    pub fn reverse(&mut self) -> &mut Self {
        let len = self.len();
        let mut reversed =
            Self::from_buffer(Buffer::collect_exact(len, self.buf.take().into_iter().rev()));
        self.adopt(&mut reversed)
    }

    /// Calls `observer` on each element, in index order.
    pub fn apply<F: FnMut(&T)>(&self, mut observer: F) -> &Self {
        for element in self.iter() {
            observer(element);
        }
        self
    }

    /// Replaces each element with the next value from `generator`, in index order.
    pub fn generate<F: FnMut() -> T>(&mut self, mut generator: F) -> &mut Self {
        for slot in self.iter_mut() {
            *slot = generator();
        }
        self
    }

    /// Replaces each element with `f` applied to it, in index order.
    pub fn transform<F: FnMut(&T) -> T>(&mut self, mut f: F) -> &mut Self {
        for slot in self.iter_mut() {
            let next = f(slot);
            *slot = next;
        }
        self
    }

    #[inline]
    pub(crate) fn check_index(&self, index: usize) -> Result<(), ArrayError> {
        if index < self.len() {
            Ok(())
        } else {
            Err(ArrayError::OutOfRange {
                index,
                len: self.len(),
            })
        }
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        Self::from_buffer(self.buf.clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source);
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: PartialEq> PartialEq<[T]> for DynamicArray<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<&[T]> for DynamicArray<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynamicArray<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}

/// Arrays are ordered by length only.
///
/// Arrays of equal length compare `Equal` when their elements are equal and are unordered
/// otherwise, so `<` and `>` are both `false` for them.
impl<T: PartialEq> PartialOrd for DynamicArray<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.len().cmp(&other.len()) {
            Ordering::Equal => (self == other).then_some(Ordering::Equal),
            ordering => Some(ordering),
        }
    }
}

impl<T: Hash> Hash for DynamicArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone> Add for &DynamicArray<T> {
    type Output = DynamicArray<T>;

    fn add(self, rhs: Self) -> DynamicArray<T> {
        DynamicArray::concat(&[self, rhs])
    }
}

impl<T: Clone> Add<&DynamicArray<T>> for DynamicArray<T> {
    type Output = DynamicArray<T>;

    fn add(mut self, rhs: &DynamicArray<T>) -> DynamicArray<T> {
        self.append(rhs);
        self
    }
}

impl<T: Clone> AddAssign<&DynamicArray<T>> for DynamicArray<T> {
    fn add_assign(&mut self, rhs: &DynamicArray<T>) {
        self.append(rhs);
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(values: [T; N]) -> Self {
        Self::from_buffer(Buffer::collect_exact(N, values))
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_buffer(Buffer::from(values))
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(values: &[T]) -> Self {
        Self::from_values(values)
    }
}

impl<T> From<DynamicArray<T>> for Vec<T> {
    fn from(array: DynamicArray<T>) -> Self {
        array.buf.into_vec()
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
