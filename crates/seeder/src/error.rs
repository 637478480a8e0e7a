use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeederError {
    #[error("hashing failed: {0}")]
    Hashing(String),
    #[error("hash does not verify against the password it was made from")]
    VerificationMismatch,
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("invalid configuration: {0}")]
    Config(#[from] envy::Error),
    #[error("no password given; use --password, SEEDER_PASSWORD or --prompt")]
    MissingPassword,
    #[error("could not read password: {0}")]
    Prompt(#[source] io::Error),
    #[error("not a plain SQL identifier: {0:?}")]
    InvalidIdentifier(String),
    #[error("username must be non-empty and printable: {0:?}")]
    InvalidUsername(String),
    #[error("encoded hash contains characters outside the expected set")]
    UnsafeHash,
}

pub type SeederResult<T> = Result<T, SeederError>;

impl From<bcrypt::BcryptError> for SeederError {
    fn from(err: bcrypt::BcryptError) -> Self {
        SeederError::Hashing(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for SeederError {
    fn from(err: argon2::password_hash::Error) -> Self {
        SeederError::Hashing(err.to_string())
    }
}

impl From<argon2::Error> for SeederError {
    fn from(err: argon2::Error) -> Self {
        SeederError::Hashing(err.to_string())
    }
}
