//! Error types for the inference engine.
//!
//! Every well-formed JSON value maps to some `TypeNode`; the engine degrades
//! to the `Json` escape hatch instead of rejecting awkward shapes. The one
//! fatal condition is running out of candidate identifiers while
//! disambiguating a generated type name.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The word bank could not produce an unused identifier for a generated
    /// type. Not retried; resolving it needs a larger word bank or a
    /// different context key.
    #[error(
        "could not allocate a unique type name for \"{context}\" after {attempts} attempts"
    )]
    NameAllocationExhausted { context: String, attempts: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
