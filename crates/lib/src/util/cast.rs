//! Checked downcasts for loosely typed values.

use std::any::Any;

/// Returns `value` as a `T` if that is its concrete type.
///
/// ```
/// # use paperkit::util::cast::as_type;
/// let value: Box<dyn std::any::Any> = Box::new(7_i32);
/// assert_eq!(as_type::<i32>(value.as_ref()), Some(&7));
/// assert_eq!(as_type::<String>(value.as_ref()), None);
/// ```
pub fn as_type<T: Any>(value: &dyn Any) -> Option<&T> {
    value.downcast_ref::<T>()
}

/// Renders common scalar types as text. Anything else yields `None`.
pub fn as_string(value: &dyn Any) -> Option<String> {
    if let Some(s) = value.downcast_ref::<String>() {
        return Some(s.clone());
    }
    if let Some(s) = value.downcast_ref::<&str>() {
        return Some((*s).to_string());
    }
    macro_rules! display {
        ($($ty:ty),*) => {
            $(
                if let Some(v) = value.downcast_ref::<$ty>() {
                    return Some(v.to_string());
                }
            )*
        };
    }
    display!(bool, char, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);
    None
}
