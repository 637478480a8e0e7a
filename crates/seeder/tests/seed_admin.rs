use std::process::{Command, Output};

use seeder::{
    Config,
    hasher::{BcryptHasher, SecretHasher, embedded_cost},
    report::{self, Outcome},
};

const PASSWORD: &str = "HM/a7GmOqd;6mZ";
const INSERT_PREFIX: &str = "INSERT INTO adminka (username, password_hash) VALUES ('admin', '";

fn config(cost: u32) -> Config {
    Config {
        cost,
        ..Config::with_password(PASSWORD)
    }
}

async fn run(config: &Config) -> (Outcome, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let outcome = report::run(config, &mut out, &mut err).await.unwrap();
    (
        outcome,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn hash_line(stdout: &str) -> &str {
    stdout
        .lines()
        .find_map(|l| l.strip_prefix("Хешированный пароль: "))
        .expect("hash line")
}

#[tokio::test]
async fn default_cost_produces_bcrypt_row() {
    let (outcome, stdout, stderr) = run(&config(12)).await;
    assert_eq!(outcome, Outcome::Seeded);
    assert!(stderr.is_empty(), "{stderr}");

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6, "{stdout}");
    assert_eq!(lines[0], format!("Оригинальный пароль: {PASSWORD}"));
    assert_eq!(lines[2], "Пароль проверен: true");
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "SQL запрос для вставки в базу:");

    let hash = hash_line(&stdout);
    assert!(hash.starts_with("$2b$12$"), "{hash}");
    assert_eq!(embedded_cost(hash), Some(12));
    assert_eq!(lines[5], format!("{INSERT_PREFIX}{hash}');"));
}

#[tokio::test]
async fn each_run_uses_a_fresh_salt() {
    let (_, first, _) = run(&config(4)).await;
    let (_, second, _) = run(&config(4)).await;
    let (first, second) = (hash_line(&first), hash_line(&second));
    assert_ne!(first, second);

    let hasher = BcryptHasher { cost: 4 };
    for hash in [first, second] {
        assert!(hasher.verify(PASSWORD, hash).unwrap());
        assert!(!hasher.verify("HM/a7GmOqd;6m", hash).unwrap());
    }
}

#[tokio::test]
async fn hashing_failure_prints_error_and_no_sql() {
    let (outcome, stdout, stderr) = run(&config(32)).await;
    assert_eq!(outcome, Outcome::Failed);
    assert!(stdout.is_empty(), "{stdout}");
    assert!(stderr.starts_with("Ошибка: hashing failed"), "{stderr}");
    assert!(!stderr.contains("INSERT"));
}

#[tokio::test]
async fn custom_username_and_table() {
    let config = Config {
        username: "root".into(),
        table: "users".into(),
        ..config(4)
    };
    let (_, stdout, _) = run(&config).await;
    let hash = hash_line(&stdout);
    assert!(stdout.contains(&format!(
        "INSERT INTO users (username, password_hash) VALUES ('root', '{hash}');"
    )));
}

/// The binary with no inherited `SEEDER_*` or `LOG_LEVEL` settings.
fn seed_admin_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_seed_admin"));
    for var in [
        "SEEDER_PASSWORD",
        "SEEDER_COST",
        "SEEDER_ALGORITHM",
        "SEEDER_USERNAME",
        "SEEDER_TABLE",
        "SEEDER_STRICT",
        "LOG_LEVEL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn seed_admin(args: &[&str]) -> Output {
    seed_admin_cmd().args(args).output().unwrap()
}

#[test]
fn binary_prints_report() {
    let output = seed_admin(&["--password", PASSWORD, "--cost", "4"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let hash = hash_line(&stdout);
    assert!(stdout.contains(&format!("{INSERT_PREFIX}{hash}');")));
}

#[test]
fn binary_reads_password_from_env() {
    let output = seed_admin_cmd()
        .env("SEEDER_PASSWORD", "from-env")
        .env("SEEDER_COST", "4")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Оригинальный пароль: from-env\n"), "{stdout}");
}

#[test]
fn binary_exits_zero_on_failure_unless_strict() {
    let lenient = seed_admin(&["--password", PASSWORD, "--cost", "3"]);
    assert!(lenient.status.success());
    assert!(lenient.stdout.is_empty());
    let stderr = String::from_utf8(lenient.stderr).unwrap();
    assert_eq!(stderr.lines().count(), 1, "{stderr}");
    assert!(stderr.starts_with("Ошибка: hashing failed"), "{stderr}");

    let strict = seed_admin(&["--password", PASSWORD, "--cost", "3", "--strict"]);
    assert_eq!(strict.status.code(), Some(1));
    assert!(strict.stdout.is_empty());
}
