use std::fmt;

use crate::error::{SeederError, SeederResult};

/// Single-row `INSERT` into `<table> (username, password_hash)`.
///
/// Only ever rendered as text. Inputs are checked up front so that the rendered
/// statement stays one line and cannot break out of its literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    table: String,
    username: String,
    hash: String,
}

impl InsertStatement {
    pub fn new(table: &str, username: &str, hash: &str) -> SeederResult<Self> {
        if !is_identifier(table) {
            return Err(SeederError::InvalidIdentifier(table.to_owned()));
        }
        if username.is_empty() || username.chars().any(char::is_control) {
            return Err(SeederError::InvalidUsername(username.to_owned()));
        }
        if hash.is_empty() || !hash.chars().all(is_hash_char) {
            return Err(SeederError::UnsafeHash);
        }

        Ok(Self {
            table: table.to_owned(),
            username: username.to_owned(),
            hash: hash.to_owned(),
        })
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "INSERT INTO {} (username, password_hash) VALUES ('{}', '{}');",
            self.table,
            self.username.replace('\'', "''"),
            self.hash,
        )
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// bcrypt's base64 alphabet plus the PHC separators.
fn is_hash_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '/' | '$' | '=' | ',' | '+' | '-')
}
