//! Partial-update helpers.
//!
//! A PATCH payload carries each updatable field as an `Option`. A field is
//! applied only when it is present *and* truthy: empty strings, empty lists
//! and zero ids are treated the same as an absent field, matching the
//! behaviour existing clients rely on.

pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for i32 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

/// Overwrite `target` with `value` when it is supplied and truthy.
/// Returns whether the field changed hands.
pub fn merge<T: Truthy>(target: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) if v.is_truthy() => {
            *target = v;
            true
        }
        _ => false,
    }
}
