use core::{fmt, slice};

use super::array::DynamicArray;

/// A view of selected elements of a [`DynamicArray`], borrowed from it.
///
/// `Selection` holds one shared reference per selected slot. A slot is empty when the
/// selection was sized past the end of the parent (see
/// [`select_part`](DynamicArray::select_part)). The view copies nothing, and the parent
/// cannot be resized, reallocated or dropped while it is alive.
pub struct Selection<'a, T> {
    slots: DynamicArray<Option<&'a T>>,
}

/// A view of selected elements of a [`DynamicArray`], mutably borrowed from it.
///
/// Writes through the view land in the parent's storage.
pub struct SelectionMut<'a, T> {
    slots: DynamicArray<Option<&'a mut T>>,
}

impl<'a, T> Selection<'a, T> {
    pub(crate) fn new(slots: DynamicArray<Option<&'a T>>) -> Self {
        Self { slots }
    }

    /// Returns the number of slots in the selection, including empty ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the number of slots that refer to an element.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns the element referred to by slot `index`, or `None` if the slot is empty or out
    /// of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.slots.as_slice().get(index).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&'a T>> + '_ {
        self.slots.iter().copied()
    }

    /// Returns the slots as an array of references.
    #[inline]
    pub fn as_array(&self) -> &DynamicArray<Option<&'a T>> {
        &self.slots
    }

    /// Copies the selected elements into a new array. Empty slots become default values.
    pub fn to_array(&self) -> DynamicArray<T>
    where
        T: Clone + Default,
    {
        self.slots
            .iter()
            .map(|&slot| slot.cloned().unwrap_or_default())
            .collect()
    }
}

impl<'a, T> SelectionMut<'a, T> {
    pub(crate) fn new(slots: DynamicArray<Option<&'a mut T>>) -> Self {
        Self { slots }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.as_slice().get(index)?.as_deref()
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.as_mut_slice().get_mut(index)?.as_deref_mut()
    }

    /// Returns an iterator over the selected elements, skipping empty slots.
    pub fn iter_mut(&mut self) -> IterMut<'_, 'a, T> {
        IterMut {
            slots: self.slots.iter_mut(),
        }
    }

    /// Writes a copy of `value` into every selected element.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for element in self.iter_mut() {
            *element = value.clone();
        }
    }
}

/// Mutable iterator over the filled slots of a [`SelectionMut`].
pub struct IterMut<'s, 'a, T> {
    slots: slice::IterMut<'s, Option<&'a mut T>>,
}

impl<'s, T> Iterator for IterMut<'s, '_, T> {
    type Item = &'s mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| slot.as_deref_mut())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.slots.size_hint().1)
    }
}

impl<T: fmt::Debug> fmt::Debug for Selection<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.slots.iter()).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for SelectionMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.slots.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dynarray;

    #[test]
    fn test_selection_get() {
        let array = dynarray![1, 2, 3];
        let selection = Selection::new(dynarray![Some(&array[2]), None]);
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.filled(), 1);
        assert_eq!(selection.get(0), Some(&3));
        assert_eq!(selection.get(1), None);
        assert_eq!(selection.get(2), None);
    }

    #[test]
    fn test_selection_to_array_fills_defaults() {
        let array = dynarray![4, 5];
        let selection = Selection::new(dynarray![Some(&array[1]), Some(&array[0]), None]);
        assert_eq!(selection.to_array(), [5, 4, 0]);
    }

    #[test]
    fn test_selection_mut_writes_through() {
        let mut array = dynarray![1, 2, 3];
        {
            let (head, tail) = array.as_mut_slice().split_at_mut(1);
            let mut selection =
                SelectionMut::new(dynarray![Some(&mut tail[1]), Some(&mut head[0])]);
            *selection.get_mut(0).unwrap() = 30;
            assert_eq!(selection.get(1), Some(&1));
            selection.fill(7);
        }
        assert_eq!(array, [7, 2, 7]);
    }

    #[test]
    fn test_iter_mut_skips_empty_slots() {
        let mut array = dynarray![1, 2, 3];
        {
            let mut selection = array.select_part_mut(1, 4).unwrap();
            assert_eq!(selection.len(), 4);
            let mut visited = 0;
            for element in selection.iter_mut() {
                *element += 10;
                visited += 1;
            }
            assert_eq!(visited, 2);
        }
        assert_eq!(array, [1, 12, 13]);
    }

    #[test]
    fn test_selection_debug() {
        let array = dynarray![1];
        let selection = Selection::new(dynarray![Some(&array[0]), None]);
        assert_eq!(format!("{:?}", selection), "[Some(1), None]");
    }
}
