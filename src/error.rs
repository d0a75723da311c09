//! The `Error` enum names the failures `underbar` reports itself. Fallible
//! functions return `anyhow::Result`, so callers that care about the kind of
//! failure can `downcast_ref::<Error>()`.

/// Failures raised by `underbar` operations (as opposed to failures raised by
/// caller-supplied callbacks, which are never wrapped).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `uniq_with` was told its input is sorted but was given no key function
    #[error("uniq on sorted input needs a key function")]
    MissingKeyFn,
    /// A sequence was required, but the value was something else
    #[error("expected a sequence, found {found}")]
    NotASequence {
        /// The JSON kind of the value actually supplied
        found: &'static str,
    },
    /// A mapping was required, but the value was something else
    #[error("expected a mapping, found {found}")]
    NotAMapping {
        /// The JSON kind of the value actually supplied
        found: &'static str,
    },
    /// `distinct::calculate` numbers its operands with a `u32`
    #[error("can't handle more than {} operands", u32::MAX)]
    TooManyOperands,
}
