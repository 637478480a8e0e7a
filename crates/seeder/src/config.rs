use std::{fmt, io};

use serde::Deserialize;

use crate::{
    cli::Args,
    error::{SeederError, SeederResult},
    hasher::{Algorithm, DEFAULT_COST},
};

pub const ENV_PREFIX: &str = "SEEDER_";
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_TABLE: &str = "adminka";

/// `SEEDER_*` variables. Everything is optional; see [`Config::resolve`].
#[derive(Debug, Default, Deserialize)]
pub struct EnvConfig {
    pub password: Option<String>,
    pub cost: Option<u32>,
    pub algorithm: Option<Algorithm>,
    pub username: Option<String>,
    pub table: Option<String>,
    pub strict: Option<bool>,
}

impl EnvConfig {
    pub fn from_env() -> SeederResult<Self> {
        Ok(envy::prefixed(ENV_PREFIX).from_env::<EnvConfig>()?)
    }
}

#[derive(Clone)]
pub struct Config {
    pub password: String,
    pub cost: u32,
    pub algorithm: Algorithm,
    pub username: String,
    pub table: String,
    pub strict: bool,
}

impl Config {
    /// Defaults for everything but the password.
    pub fn with_password(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            cost: DEFAULT_COST,
            algorithm: Algorithm::default(),
            username: DEFAULT_USERNAME.to_owned(),
            table: DEFAULT_TABLE.to_owned(),
            strict: false,
        }
    }

    /// Reads the process environment and falls back to a hidden terminal prompt
    /// for the password.
    pub fn load(args: Args) -> SeederResult<Self> {
        let env = EnvConfig::from_env()?;
        Self::resolve(args, env, || rpassword::prompt_password("Пароль: "))
    }

    /// Flags win over the environment, which wins over the defaults.
    ///
    /// `prompt` is only called when `--prompt` was given or neither source
    /// supplied a password.
    pub fn resolve<P>(args: Args, env: EnvConfig, prompt: P) -> SeederResult<Self>
    where
        P: FnOnce() -> io::Result<String>,
    {
        let password = match args.password.or(env.password) {
            Some(password) if !args.prompt => password,
            _ => prompt().map_err(SeederError::Prompt)?,
        };
        if password.is_empty() {
            return Err(SeederError::MissingPassword);
        }

        Ok(Self {
            password,
            cost: args.cost.or(env.cost).unwrap_or(DEFAULT_COST),
            algorithm: args.algorithm.or(env.algorithm).unwrap_or_default(),
            username: args
                .username
                .or(env.username)
                .unwrap_or_else(|| DEFAULT_USERNAME.to_owned()),
            table: args
                .table
                .or(env.table)
                .unwrap_or_else(|| DEFAULT_TABLE.to_owned()),
            strict: args.strict || env.strict.unwrap_or(false),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("password", &"<redacted>")
            .field("cost", &self.cost)
            .field("algorithm", &self.algorithm)
            .field("username", &self.username)
            .field("table", &self.table)
            .field("strict", &self.strict)
            .finish()
    }
}
