//! Memoised lazy values.
//!
//! A `Deferred<T>` holds an initialiser and a cell. The cell moves through
//! three states: unevaluated, evaluating (one thread runs the initialiser,
//! every other reader blocks), and evaluated. Once evaluated the value is
//! frozen for the lifetime of the `Deferred`, including when it is an error.

use std::fmt;

use once_cell::sync::OnceCell;

type Init<T> = Box<dyn Fn() -> T + Send + Sync>;

pub struct Deferred<T> {
    cell: OnceCell<T>,
    init: Option<Init<T>>,
}

impl<T> Deferred<T> {
    /// A value computed by `init` on first read.
    pub fn new(init: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            cell: OnceCell::new(),
            init: Some(Box::new(init)),
        }
    }

    /// An already-evaluated value.
    pub fn ready(value: T) -> Self {
        Self {
            cell: OnceCell::with_value(value),
            init: None,
        }
    }

    /// Evaluate on first call, then return the cached value.
    ///
    /// Concurrent first reads run the initialiser once; the others wait.
    pub fn get(&self) -> &T {
        self.cell.get_or_init(|| match &self.init {
            Some(init) => init(),
            // `ready` always fills the cell, so this arm is never taken.
            None => unreachable!("ready deferred value without a cached result"),
        })
    }

    pub fn is_evaluated(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => f.debug_tuple("Deferred").field(value).finish(),
            None => f.write_str("Deferred(<unevaluated>)"),
        }
    }
}
