use num_traits::{PrimInt, Unsigned};

/// An unsigned integer type that can name a slot of a [`DynamicArray`](crate::DynamicArray).
///
/// Containers of positions drive [`gather`](crate::DynamicArray::gather) and the
/// indexed selections.
pub trait Position: PrimInt + Unsigned {
    /// Returns the slot index this position names.
    fn into_index(self) -> usize;
}

macro_rules! impl_position {
    ($ty:ty) => {
        impl Position for $ty {
            #[inline]
            fn into_index(self) -> usize {
                self as usize
            }
        }
    };
}

impl_position!(usize);
impl_position!(u8);
impl_position!(u16);
#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
impl_position!(u32);
#[cfg(target_pointer_width = "64")]
impl_position!(u64);

#[cfg(test)]
mod tests {
    use super::Position;

    #[test]
    fn test_into_index() {
        assert_eq!(7u8.into_index(), 7);
        assert_eq!(300u16.into_index(), 300);
        assert_eq!(70_000u32.into_index(), 70_000);
        assert_eq!(usize::MAX.into_index(), usize::MAX);
    }
}
