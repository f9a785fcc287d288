//! The unified error handling system for the takeout core.

use std::fmt::Display;

// 1. Core Types
pub use types::TakeoutError;

/// A unified `Result` type for the entire crate.
///
/// Every component operation returns this type; callers match on the
/// variant to learn which kind of failure occurred.
pub type Result<T> = std::result::Result<T, TakeoutError>;

// 2. Module declarations
pub mod macros;
pub mod types;

// 3. Context Trait for adding context to errors.
pub trait Context<T, E> {
    #[track_caller]
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display;

    #[track_caller]
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T, E> Context<T, E> for std::result::Result<T, E>
where
    E: Into<TakeoutError>,
{
    #[track_caller]
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display,
    {
        self.with_context(|| context)
    }

    #[track_caller]
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(TakeoutError::Context {
                context: context().to_string(),
                source: Box::new(error.into()),
            }),
        }
    }
}

// 4. Error Category for logging at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Errors caused by the caller (bad input, missing resource, broken rule).
    /// Corresponds to 4xx HTTP status codes.
    Client,
    /// Errors caused by the persistence layer or the process itself.
    /// Corresponds to 5xx HTTP status codes.
    Server,
}
