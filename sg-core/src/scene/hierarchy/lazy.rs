/// A memoized value with an explicit validity flag.
///
/// The cell itself performs no synchronization: every call site must hold
/// the lock that guards the cell. `element` intentionally hands back the
/// stored value even while invalid; callers gate on `is_valid` (or
/// recompute) first.
#[derive(Debug)]
pub struct Lazy<T> {
    element: T,
    valid: bool,
}

impl<T> Lazy<T> {
    /// Creates a cell that starts out invalid.
    pub fn new(element: T) -> Self {
        Self {
            element,
            valid: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    pub fn validate(&mut self, element: T) {
        self.element = element;
        self.valid = true;
    }

    pub fn element(&self) -> &T {
        &self.element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_invalid() {
        let lazy = Lazy::new(42);
        assert_eq!(lazy.is_valid(), false);
        assert_eq!(*lazy.element(), 42);
    }

    #[test]
    fn test_validate_stores_element() {
        let mut lazy = Lazy::new(0);
        lazy.validate(7);
        assert_eq!(lazy.is_valid(), true);
        assert_eq!(*lazy.element(), 7);
    }

    #[test]
    fn test_invalidate_keeps_last_element() {
        let mut lazy = Lazy::new(0);
        lazy.validate(7);
        lazy.invalidate();
        assert_eq!(lazy.is_valid(), false);
        assert_eq!(*lazy.element(), 7);
    }
}
