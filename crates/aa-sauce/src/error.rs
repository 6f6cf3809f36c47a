use aa_core::CoreError;
use thiserror::Error;

/// Errors raised while reading or interpreting SAUCE metadata.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SauceError {
    /// Tinfo interpretation requested for a data type with no catalog semantics.
    #[error("Type de données SAUCE non supporté : {data_type} (BinaryText)")]
    UnsupportedDataType {
        /// Raw `data_type` byte.
        data_type: u8,
    },

    /// A text field could not be decoded or encoded.
    #[error(transparent)]
    Core(#[from] CoreError),
}
