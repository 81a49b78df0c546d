//! Values that never fail to reach the display.

use std::fmt::Display;

/// Outcome of a derivation: the computed value, or a documented fallback
/// together with the reason the computation failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Derived<T, E> {
    /// The computation succeeded.
    Computed(T),
    /// The computation failed and `value` is the documented default.
    Fallback { value: T, reason: E },
}

impl<T, E: Display> Derived<T, E> {
    /// Turn a fallible computation into a displayable value, logging the
    /// failure when the fallback is used.
    pub fn or_fallback(result: Result<T, E>, fallback: T, what: &'static str) -> Self {
        match result {
            Ok(value) => Derived::Computed(value),
            Err(reason) => {
                tracing::warn!(%reason, "{what} failed, using fallback");
                Derived::Fallback {
                    value: fallback,
                    reason,
                }
            }
        }
    }
}

impl<T, E> Derived<T, E> {
    /// The value to display, computed or not.
    pub fn value(&self) -> &T {
        match self {
            Derived::Computed(value) | Derived::Fallback { value, .. } => value,
        }
    }

    /// Consume the outcome and keep only the value.
    pub fn into_value(self) -> T {
        match self {
            Derived::Computed(value) | Derived::Fallback { value, .. } => value,
        }
    }

    /// Whether the fallback was used.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Derived::Fallback { .. })
    }

    /// Why the fallback was used, if it was.
    pub fn reason(&self) -> Option<&E> {
        match self {
            Derived::Computed(_) => None,
            Derived::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Transform the value, keeping any recorded failure.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Derived<U, E> {
        match self {
            Derived::Computed(value) => Derived::Computed(f(value)),
            Derived::Fallback { value, reason } => Derived::Fallback {
                value: f(value),
                reason,
            },
        }
    }
}

impl<T: Copy, E> Derived<T, E> {
    /// Copy the value out.
    pub fn get(&self) -> T {
        *self.value()
    }
}
