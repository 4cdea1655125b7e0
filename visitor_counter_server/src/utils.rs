/// Runs the wrapped closure when dropped.
pub struct Defer<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> Defer<F> {
    pub fn new(f: F) -> Self {
        Defer(Some(f))
    }
}

impl<F: FnOnce()> Drop for Defer<F> {
    fn drop(&mut self) {
        if let Some(f) = self.0.take() { f() }
    }
}

/// Runs the given statements when the enclosing scope ends.
macro_rules! defer {
    ( $($body:tt)* ) => {
        let _defer_guard = $crate::utils::Defer::new(|| { $($body)* });
    };
}

pub(crate) use defer;

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    #[test]
    fn runs_at_end_of_scope() {
        let ran = Cell::new(false);
        {
            defer! { ran.set(true) };
            assert!(!ran.get());
        }
        assert!(ran.get());
    }
}
