use std::{
    io::{self, Write},
    process::ExitCode,
    sync::Arc,
    time::Instant,
};

use tokio::task;

use crate::{
    config::Config,
    error::{SeederError, SeederResult},
    hasher::SecretHasher,
    sql::InsertStatement,
};

/// Everything one run prints on success.
#[derive(Debug, Clone)]
pub struct Report {
    pub password: String,
    pub hash: String,
    pub verified: bool,
    pub statement: InsertStatement,
}

impl Report {
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Оригинальный пароль: {}", self.password)?;
        writeln!(out, "Хешированный пароль: {}", self.hash)?;
        writeln!(out, "Пароль проверен: {}", self.verified)?;
        writeln!(out)?;
        writeln!(out, "SQL запрос для вставки в базу:")?;
        writeln!(out, "{}", self.statement)?;
        out.flush()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Seeded,
    Failed,
}

impl Outcome {
    /// Failures only change the exit status in strict mode.
    pub fn is_fatal(self, strict: bool) -> bool {
        strict && self == Outcome::Failed
    }

    pub fn exit_code(self, strict: bool) -> ExitCode {
        if self.is_fatal(strict) {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Hashes the password, checks the hash against it and builds the statement.
///
/// Both hashing calls run on the blocking pool; each is awaited before the
/// next step starts.
pub async fn generate(config: &Config) -> SeederResult<Report> {
    generate_with(config, Arc::from(config.algorithm.hasher(config.cost))).await
}

/// Like [`generate`], with the hasher supplied by the caller.
pub async fn generate_with(
    config: &Config,
    hasher: Arc<dyn SecretHasher>,
) -> SeederResult<Report> {
    let started = Instant::now();
    let hash = blocking(&hasher, &config.password, |h, pw| h.hash(pw)).await?;
    tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "hash computed");

    let verified = {
        let hash = hash.clone();
        blocking(&hasher, &config.password, move |h, pw| h.verify(pw, &hash)).await?
    };
    if !verified {
        return Err(SeederError::VerificationMismatch);
    }

    let statement = InsertStatement::new(&config.table, &config.username, &hash)?;

    Ok(Report {
        password: config.password.clone(),
        hash,
        verified,
        statement,
    })
}

async fn blocking<T, F>(hasher: &Arc<dyn SecretHasher>, password: &str, f: F) -> SeederResult<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn SecretHasher, &str) -> SeederResult<T> + Send + 'static,
{
    let hasher = Arc::clone(hasher);
    let password = password.to_owned();
    task::spawn_blocking(move || f(hasher.as_ref(), &password)).await?
}

/// Runs generate-and-report: the report goes to `out`, a failure goes to `err`
/// as a one-line diagnostic and nothing is written to `out`.
///
/// Only I/O errors on the writers themselves are returned.
pub async fn run<O, E>(config: &Config, out: &mut O, err: &mut E) -> io::Result<Outcome>
where
    O: Write,
    E: Write,
{
    let hasher = Arc::from(config.algorithm.hasher(config.cost));
    run_with(config, hasher, out, err).await
}

pub async fn run_with<O, E>(
    config: &Config,
    hasher: Arc<dyn SecretHasher>,
    out: &mut O,
    err: &mut E,
) -> io::Result<Outcome>
where
    O: Write,
    E: Write,
{
    tracing::info!(
        algorithm = %config.algorithm,
        cost = config.cost,
        table = %config.table,
        "seeding admin password"
    );

    match generate_with(config, hasher).await {
        Ok(report) => {
            report.write_to(out)?;
            tracing::info!("done");
            Ok(Outcome::Seeded)
        }
        Err(e) => {
            tracing::warn!(error = %e, "seeding failed");
            writeln!(err, "Ошибка: {e}")?;
            err.flush()?;
            Ok(Outcome::Failed)
        }
    }
}
