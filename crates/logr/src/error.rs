//! crates/logr/src/error.rs
//! Error types surfaced to callers.

use thiserror::Error;

/// A format string that does not fit the supplied arguments.
///
/// Returned by [`Logger::log`](crate::Logger::log) and its shorthands. Each
/// variant carries the offending specifier as written in the template.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum FormatError {
    /// A specifier refers to an argument that was not supplied.
    #[error("format specifier '{specifier}' has no matching argument")]
    MissingArgument {
        /// The specifier text, including the leading `%`.
        specifier: String,
    },
    /// The conversion cannot render the kind of argument it was given.
    #[error("conversion '{conversion}' cannot format a {argument} argument")]
    IllegalConversion {
        /// The conversion character.
        conversion: char,
        /// Kind of the argument that was supplied.
        argument: &'static str,
    },
    /// The specifier ends early or names an unknown conversion.
    #[error("unknown format conversion '{specifier}'")]
    UnknownConversion {
        /// The specifier text, including the leading `%`.
        specifier: String,
    },
    /// A `-` or `0` flag was given without a width.
    #[error("format specifier '{specifier}' requires a width")]
    MissingWidth {
        /// The specifier text, including the leading `%`.
        specifier: String,
    },
    /// The flags contradict each other or do not apply to the conversion,
    /// or a width or precision exceeds 65535.
    #[error("format specifier '{specifier}' has flags that do not apply")]
    IllegalFlags {
        /// The specifier text, including the leading `%`.
        specifier: String,
    },
    /// An explicit argument index of zero, or `<` with no previous argument.
    #[error("format specifier '{specifier}' has an invalid argument index")]
    InvalidArgumentIndex {
        /// The specifier text, including the leading `%`.
        specifier: String,
    },
}

/// The object-context lookup was handed no object.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("cannot derive a logger context from an absent object")]
pub struct MissingContextError;

/// Error returned when parsing a [`Level`](crate::Level) from an unrecognised string.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unrecognised log level '{input}'; expected info, warn or error")]
pub struct LevelParseError {
    input: String,
}

impl LevelParseError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// The rejected input, trimmed.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}
