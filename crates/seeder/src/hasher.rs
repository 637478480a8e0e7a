use std::fmt;

use argon2::{
    Argon2, Params, Version,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use clap::ValueEnum;
use serde::Deserialize;

use crate::error::SeederResult;

pub const DEFAULT_COST: u32 = 12;

/// Argon2 memory cost in KiB (19 MiB).
const ARGON2_MEMORY_KIB: u32 = 19 * 1024;
const ARGON2_PARALLELISM: u32 = 1;

/// An adaptive password hash producing self-describing encoded strings.
pub trait SecretHasher: Send + Sync {
    /// Hashes `secret` with a fresh random salt.
    fn hash(&self, secret: &str) -> SeederResult<String>;

    /// `Ok(false)` on mismatch, `Err` when `hash` can't be checked at all.
    fn verify(&self, secret: &str, hash: &str) -> SeederResult<bool>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bcrypt,
    Argon2,
}

impl Algorithm {
    pub fn hasher(self, cost: u32) -> Box<dyn SecretHasher> {
        match self {
            Algorithm::Bcrypt => Box::new(BcryptHasher { cost }),
            Algorithm::Argon2 => Box::new(Argon2Hasher { time_cost: cost }),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Bcrypt => f.write_str("bcrypt"),
            Algorithm::Argon2 => f.write_str("argon2"),
        }
    }
}

/// bcrypt, `$2b$` flavour. `cost` is the log2 round count.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    pub cost: u32,
}

impl SecretHasher for BcryptHasher {
    fn hash(&self, secret: &str) -> SeederResult<String> {
        Ok(bcrypt::hash(secret, self.cost)?)
    }

    fn verify(&self, secret: &str, hash: &str) -> SeederResult<bool> {
        Ok(bcrypt::verify(secret, hash)?)
    }
}

/// Argon2id v1.3. `time_cost` is the iteration count.
#[derive(Debug, Clone, Copy)]
pub struct Argon2Hasher {
    pub time_cost: u32,
}

impl Argon2Hasher {
    fn argon2(&self) -> SeederResult<Argon2<'static>> {
        let params = Params::new(ARGON2_MEMORY_KIB, self.time_cost, ARGON2_PARALLELISM, None)?;
        Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl SecretHasher for Argon2Hasher {
    fn hash(&self, secret: &str) -> SeederResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()?
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|err| {
                tracing::warn!("Error hashing password: {:?}", err);
                err
            })?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, secret: &str, hash: &str) -> SeederResult<bool> {
        let parsed = PasswordHash::new(hash)?;
        // params come from the hash itself, not from `self`
        match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

/// Reads the cost factor back out of an encoded hash.
///
/// Understands bcrypt's `$2?$NN$...` form (returns the round exponent) and
/// Argon2 PHC strings (returns the `t` parameter).
pub fn embedded_cost(hash: &str) -> Option<u32> {
    if hash.starts_with("$argon2") {
        let parsed = PasswordHash::new(hash).ok()?;
        return parsed.params.get_decimal("t");
    }

    let mut parts = hash.split('$');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(""), Some("2a" | "2b" | "2x" | "2y"), Some(cost), Some(_)) if cost.len() == 2 => {
            cost.parse().ok()
        }
        _ => None,
    }
}
