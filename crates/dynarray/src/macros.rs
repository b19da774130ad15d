/// Creates a [`DynamicArray`](crate::DynamicArray) holding the listed values, in order.
///
/// ```
/// use dynarray::dynarray;
///
/// let array = dynarray![1, 2, 3];
/// assert_eq!(array.len(), 3);
/// assert_eq!(array, [1, 2, 3]);
/// ```
#[macro_export]
macro_rules! dynarray {
    () => {
        $crate::DynamicArray::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($value),+])
    };
}
