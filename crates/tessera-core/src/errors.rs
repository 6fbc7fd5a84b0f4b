//! Error types for tessera-core.
//!
//! All failures in this crate are raised synchronously at the point of the
//! failing operation. Nothing is retried internally, and a failing child
//! encode aborts the parent encode with no partial output.
//!
//! Stable categories:
//! - `AddressFormat`: text is neither a valid bech32 address nor a valid
//!   checksummed hex address
//! - `UnboundType`: a named variant was typed or serialized without a
//!   qualifier
//! - `WidthOverflow`: an integer value exceeds its declared bit width
//! - `InvalidArgument` / `Serialization`: malformed inputs and serde failures

use thiserror::Error;

pub type TesseraResult<T> = Result<T, TesseraError>;

#[derive(Debug, Error)]
pub enum TesseraError {
    #[error("address format: {0}")]
    AddressFormat(String),

    #[error("unbound type: {0}")]
    UnboundType(String),

    #[error("width overflow: {0}")]
    WidthOverflow(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("serialization: {0}")]
    Serialization(String),
}

impl TesseraError {
    pub fn address_format(msg: impl Into<String>) -> Self {
        Self::AddressFormat(msg.into())
    }

    pub fn unbound_type(msg: impl Into<String>) -> Self {
        Self::UnboundType(msg.into())
    }

    pub fn width_overflow(msg: impl Into<String>) -> Self {
        Self::WidthOverflow(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_category() {
        let e = TesseraError::width_overflow("value 5000000000 exceeds Uint32");
        assert!(e.to_string().starts_with("width overflow:"));
    }

    #[test]
    fn constructors_map_to_variants() {
        assert!(matches!(
            TesseraError::address_format("x"),
            TesseraError::AddressFormat(_)
        ));
        assert!(matches!(
            TesseraError::unbound_type("x"),
            TesseraError::UnboundType(_)
        ));
    }
}
