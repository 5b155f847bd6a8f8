//! Shared error and value types.

pub(crate) mod error;
pub(crate) mod value;
