use core::{cmp::min, iter, ops::Range};

use bitvec::{bitvec, order::Lsb0};
use log::warn;
use num_traits::{NumCast, ToPrimitive};

use super::{
    array::DynamicArray,
    buffer::Buffer,
    selection::{Selection, SelectionMut},
};
use crate::{error::ArrayError, position::Position};

impl<T> DynamicArray<T> {
    /// Returns the number of slots a part `first..=last` holds.
    fn part_len(&self, first: usize, last: usize) -> Result<usize, ArrayError> {
        last.checked_sub(first)
            .and_then(|span| span.checked_add(1))
            .ok_or(ArrayError::InvalidRange {
                first,
                last,
                len: self.len(),
            })
    }

    /// Returns the range `first..=last` with both bounds clamped to the last index.
    fn clamped(&self, first: usize, last: usize) -> Range<usize> {
        match self.len().checked_sub(1) {
            Some(end) => min(first, end)..min(last, end) + 1,
            None => 0..0,
        }
    }

    fn warn_unfilled(&self, first: usize, last: usize, part_len: usize, filled: usize) {
        if filled < part_len {
            warn!(
                "part {}..={} of an array of length {} has {} slots without a source element",
                first,
                last,
                self.len(),
                part_len - filled
            );
        }
    }

    /// Ensures every position in `indices` names a slot of this array.
    fn check_positions<I: Position>(&self, indices: &DynamicArray<I>) -> Result<(), ArrayError> {
        match indices
            .iter()
            .map(|&position| position.into_index())
            .find(|&index| index >= self.len())
        {
            Some(index) => Err(ArrayError::OutOfRange {
                index,
                len: self.len(),
            }),
            None => Ok(()),
        }
    }

    /// Returns a copy of the elements in `first..=last`.
    ///
    /// Both bounds are clamped to the last index before copying, but the result always holds
    /// `last - first + 1` slots. Slots past the clamped range hold default values, so
    /// `[1, 2, 3].get_part(1, 4)` is `[2, 3, 0, 0]`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `first > last`.
    ///
    /// # Panics
    ///
    /// Panics if `last - first + 1` slots exceed the maximum allocation size, which the
    /// unclamped sizing allows even for a small array.
    pub fn get_part(&self, first: usize, last: usize) -> Result<Self, ArrayError>
    where
        T: Clone + Default,
    {
        let part_len = self.part_len(first, last)?;
        let source = &self.as_slice()[self.clamped(first, last)];
        self.warn_unfilled(first, last, part_len, source.len());
        Ok(Self::from_buffer(Buffer::collect_exact(
            part_len,
            source
                .iter()
                .cloned()
                .chain(iter::repeat_with(T::default)),
        )))
    }

    /// Returns a copy of the element at each position of `indices`, in the order given.
    ///
    /// Positions may repeat.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any position is out of range.
    pub fn gather<I: Position>(&self, indices: &DynamicArray<I>) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        self.check_positions(indices)?;
        let slots = self.as_slice();
        Ok(Self::from_buffer(Buffer::collect_exact(
            indices.len(),
            indices
                .iter()
                .map(|&position| slots[position.into_index()].clone()),
        )))
    }

    /// Returns an array holding each element converted to `U`.
    pub fn cast<U>(&self) -> DynamicArray<U>
    where
        T: Clone + Into<U>,
    {
        DynamicArray::from_buffer(Buffer::collect_exact(
            self.len(),
            self.iter().cloned().map(Into::into),
        ))
    }

    /// Returns an array holding each element converted to the numeric type `U`.
    ///
    /// Unlike [`cast`](Self::cast) this allows narrowing conversions, such as `f64` to `i32`.
    ///
    /// # Errors
    ///
    /// Returns `Err` for the first element that `U` cannot represent.
    pub fn try_cast_numeric<U: NumCast>(&self) -> Result<DynamicArray<U>, ArrayError>
    where
        T: ToPrimitive + Copy,
    {
        let cast = self
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                <U as NumCast>::from(value).ok_or(ArrayError::CastFailed { index })
            })
            .collect::<Result<Vec<U>, ArrayError>>()?;
        Ok(DynamicArray::from(cast))
    }

    /// Returns a view of the elements in `first..=last`.
    ///
    /// Sized and clamped like [`get_part`](Self::get_part). Slots past the clamped range are
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `first > last`.
    ///
    /// # Panics
    ///
    /// Panics if `last - first + 1` slots exceed the maximum allocation size.
    pub fn select_part(&self, first: usize, last: usize) -> Result<Selection<'_, T>, ArrayError> {
        let part_len = self.part_len(first, last)?;
        let source = &self.as_slice()[self.clamped(first, last)];
        self.warn_unfilled(first, last, part_len, source.len());
        Ok(Selection::new(DynamicArray::from_buffer(
            Buffer::collect_exact(part_len, source.iter().map(Some).chain(iter::repeat(None))),
        )))
    }

    /// Returns a mutable view of the elements in `first..=last`.
    ///
    /// Sized and clamped like [`get_part`](Self::get_part).
    ///
    /// # Errors
    ///
    /// Returns `Err` if `first > last`.
    ///
    /// # Panics
    ///
    /// Panics if `last - first + 1` slots exceed the maximum allocation size.
    pub fn select_part_mut(
        &mut self,
        first: usize,
        last: usize,
    ) -> Result<SelectionMut<'_, T>, ArrayError> {
        let part_len = self.part_len(first, last)?;
        let range = self.clamped(first, last);
        self.warn_unfilled(first, last, part_len, range.len());
        let source = &mut self.as_mut_slice()[range];
        Ok(SelectionMut::new(DynamicArray::from_buffer(
            Buffer::collect_exact(
                part_len,
                source
                    .iter_mut()
                    .map(Some)
                    .chain(iter::repeat_with(|| None)),
            ),
        )))
    }

    /// Returns a view of the element at each position of `indices`, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any position is out of range.
    pub fn select_indices<I: Position>(
        &self,
        indices: &DynamicArray<I>,
    ) -> Result<Selection<'_, T>, ArrayError> {
        self.check_positions(indices)?;
        let slots = self.as_slice();
        Ok(Selection::new(DynamicArray::from_buffer(
            Buffer::collect_exact(
                indices.len(),
                indices
                    .iter()
                    .map(|&position| Some(&slots[position.into_index()])),
            ),
        )))
    }

    /// Returns a mutable view of the element at each position of `indices`, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any position is out of range or appears more than once.
    pub fn select_indices_mut<I: Position>(
        &mut self,
        indices: &DynamicArray<I>,
    ) -> Result<SelectionMut<'_, T>, ArrayError> {
        self.check_positions(indices)?;

        let mut seen = bitvec![usize, Lsb0; 0; self.len()];
        for &position in indices.iter() {
            let index = position.into_index();
            if seen.replace(index, true) {
                return Err(ArrayError::AliasedIndex { index });
            }
        }

        let mut slots: Vec<Option<&mut T>> = self.iter_mut().map(Some).collect();
        Ok(SelectionMut::new(DynamicArray::from_buffer(
            Buffer::collect_exact(
                indices.len(),
                indices
                    .iter()
                    .map(|&position| slots[position.into_index()].take()),
            ),
        )))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{dynarray, ArrayError, DynamicArray};

    #[test]
    fn test_get_part() {
        let array = dynarray![1, 2, 3, 4, 5];
        assert_eq!(array.get_part(1, 3).unwrap(), [2, 3, 4]);
        assert_eq!(array.get_part(4, 4).unwrap(), [5]);
    }

    #[test]
    fn test_get_part_sizes_from_unclamped_bounds() {
        let array = dynarray![1, 2, 3];
        assert_eq!(array.get_part(1, 4).unwrap(), [2, 3, 0, 0]);
        assert_eq!(array.get_part(5, 6).unwrap(), [3, 0]);
    }

    #[test]
    fn test_get_part_of_empty() {
        let array: DynamicArray<i32> = DynamicArray::new();
        assert_eq!(array.get_part(0, 1).unwrap(), [0, 0]);
    }

    #[test]
    fn test_get_part_reversed_bounds() {
        let array = dynarray![1, 2, 3];
        assert_eq!(
            array.get_part(2, 1).unwrap_err(),
            ArrayError::InvalidRange {
                first: 2,
                last: 1,
                len: 3
            }
        );
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_get_part_too_large_to_allocate() {
        let array = dynarray![1u64, 2, 3];
        let _ = array.get_part(0, usize::MAX - 1);
    }

    #[test]
    fn test_gather_preserves_order() {
        let array = dynarray![5, 2, 8, 1];
        let indices: DynamicArray<usize> = dynarray![2, 0];
        assert_eq!(array.gather(&indices).unwrap(), [8, 5]);
    }

    #[test]
    fn test_gather_allows_duplicates_and_narrow_positions() {
        let array = dynarray!['a', 'b', 'c'];
        let indices: DynamicArray<u8> = dynarray![1, 1, 2, 0];
        assert_eq!(array.gather(&indices).unwrap(), ['b', 'b', 'c', 'a']);
    }

    #[test]
    fn test_gather_out_of_range() {
        let array = dynarray![1, 2];
        let indices: DynamicArray<u32> = dynarray![0, 2];
        assert_eq!(
            array.gather(&indices).unwrap_err(),
            ArrayError::OutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn test_cast() {
        let array: DynamicArray<u8> = dynarray![1, 2, 255];
        let wide: DynamicArray<u32> = array.cast();
        assert_eq!(wide, [1, 2, 255]);
        let floats = array.cast::<f64>();
        assert_eq!(floats, [1.0, 2.0, 255.0]);
    }

    #[test]
    fn test_try_cast_numeric_narrows() {
        let array = dynarray![1.9f64, -2.5, 300.0];
        assert_eq!(array.try_cast_numeric::<i32>().unwrap(), [1, -2, 300]);
        assert_eq!(
            array.try_cast_numeric::<u8>().unwrap_err(),
            ArrayError::CastFailed { index: 1 }
        );
    }

    #[test]
    fn test_select_part_aliases_parent() {
        let array = dynarray![10, 20, 30, 40];
        let selection = array.select_part(1, 2).unwrap();
        assert_eq!(selection.len(), 2);
        assert!(core::ptr::eq(selection.get(0).unwrap(), &array[1]));
        assert!(core::ptr::eq(selection.get(1).unwrap(), &array[2]));
    }

    #[test]
    fn test_select_part_unfilled_tail() {
        let array = dynarray![10, 20];
        let selection = array.select_part(1, 3).unwrap();
        assert_eq!(selection.len(), 3);
        assert_eq!(selection.filled(), 1);
        assert_eq!(selection.to_array(), [20, 0, 0]);
    }

    #[test]
    fn test_select_part_mut_writes_through() {
        let mut array = dynarray![1, 2, 3, 4];
        array.select_part_mut(1, 2).unwrap().fill(0);
        assert_eq!(array, [1, 0, 0, 4]);
    }

    #[test]
    fn test_select_part_reversed_bounds() {
        let mut array = dynarray![1, 2, 3];
        let expected = ArrayError::InvalidRange {
            first: 2,
            last: 0,
            len: 3,
        };
        assert_eq!(array.select_part(2, 0).unwrap_err(), expected);
        assert_eq!(array.select_part_mut(2, 0).unwrap_err(), expected);
        assert_eq!(array, [1, 2, 3]);
    }

    #[test]
    fn test_select_indices() {
        let array = dynarray![5, 2, 8, 1];
        let indices: DynamicArray<usize> = dynarray![3, 3, 0];
        let selection = array.select_indices(&indices).unwrap();
        assert_eq!(selection.to_array(), [1, 1, 5]);
        assert!(core::ptr::eq(selection.get(2).unwrap(), &array[0]));
    }

    #[test]
    fn test_select_indices_mut() {
        let mut array = dynarray![1, 2, 3];
        let indices: DynamicArray<u16> = dynarray![2, 0];
        {
            let mut selection = array.select_indices_mut(&indices).unwrap();
            for element in selection.iter_mut() {
                *element *= 10;
            }
        }
        assert_eq!(array, [10, 2, 30]);
    }

    #[test]
    fn test_select_indices_out_of_range() {
        let mut array = dynarray![1, 2, 3];
        let indices: DynamicArray<u8> = dynarray![0, 3];
        let expected = ArrayError::OutOfRange { index: 3, len: 3 };
        assert_eq!(array.select_indices(&indices).unwrap_err(), expected);
        assert_eq!(array.select_indices_mut(&indices).unwrap_err(), expected);
        assert_eq!(array, [1, 2, 3]);
    }

    #[test]
    fn test_select_indices_mut_rejects_duplicates() {
        let mut array = dynarray![1, 2, 3];
        let indices: DynamicArray<usize> = dynarray![1, 2, 1];
        assert_eq!(
            array.select_indices_mut(&indices).unwrap_err(),
            ArrayError::AliasedIndex { index: 1 }
        );
    }
}
