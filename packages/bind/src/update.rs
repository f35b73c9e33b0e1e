//! The setter's argument: a literal value or an updater of the current one.

/// What a setter accepts: either a replacement value or a function of the
/// current value.
///
/// The two cases are resolved by [`resolve`](Update::resolve) at the write
/// boundary, mirroring the functional-update convention of observable-cell
/// setters.
pub enum Update<T> {
    /// Use the value as-is.
    Literal(T),
    /// Compute the new value from the current one.
    Updater(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Update<T> {
    /// Wrap an updater function.
    pub fn updater(f: impl FnOnce(&T) -> T + 'static) -> Self {
        Update::Updater(Box::new(f))
    }

    /// Collapse to a concrete value against `current`.
    pub fn resolve(self, current: &T) -> T {
        match self {
            Update::Literal(value) => value,
            Update::Updater(f) => f(current),
        }
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Update::Literal(value)
    }
}
