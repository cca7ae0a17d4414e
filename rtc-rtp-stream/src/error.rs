use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("unknown media type in mime type: {0}")]
    ErrUnknownMediaType(String),
    #[error("header extension id {0} out of range")]
    ErrInvalidHeaderExtensionId(u16),
    #[error("nack is enabled but no nack generator was provided")]
    ErrNackGeneratorRequired,
}
