use clap::Parser;

use crate::hasher::Algorithm;

/// Hash an admin password and print the SQL row to seed it.
///
/// Every option can also be set through `SEEDER_*` environment variables or a
/// `.env` file; flags take precedence.
#[derive(Debug, Default, Parser)]
#[command(name = "seed_admin", version)]
pub struct Args {
    /// Password to hash. Visible in shell history; prefer SEEDER_PASSWORD or --prompt
    #[arg(long)]
    pub password: Option<String>,

    /// Read the password from the terminal without echo
    #[arg(long, conflicts_with = "password")]
    pub prompt: bool,

    /// Work factor (bcrypt rounds exponent, Argon2 iterations) [default: 12]
    #[arg(long)]
    pub cost: Option<u32>,

    /// Hashing algorithm [default: bcrypt]
    #[arg(long, value_enum)]
    pub algorithm: Option<Algorithm>,

    /// Value for the username column [default: admin]
    #[arg(long)]
    pub username: Option<String>,

    /// Target table [default: adminka]
    #[arg(long)]
    pub table: Option<String>,

    /// Exit with a non-zero status when hashing fails
    #[arg(long)]
    pub strict: bool,
}
