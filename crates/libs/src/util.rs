use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

const APP_DIR: &str = "admin_seeder";

/// Per-user config directory of the tool. Never created here.
pub fn get_config_dir() -> Option<PathBuf> {
    let mut config_dir = dirs::config_dir()?;
    config_dir.push(APP_DIR);
    Some(config_dir)
}

/// Loads `./.env`, then `<config dir>/admin_seeder/.env` if it exists.
///
/// `dotenv` never overrides variables that are already set, so the process
/// environment wins over the working directory, which wins over the config dir.
pub fn load_env() {
    dotenv::dotenv().ok();

    if let Some(path) = get_config_dir().map(|dir| dir.join(".env")) {
        load_env_file(&path);
    }
}

/// Loads one env file without overriding set variables. Returns whether it was read.
pub fn load_env_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    match dotenv::from_path(path) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("ignoring unreadable {}: {err}", path.display());
            false
        }
    }
}

/// Diagnostics go to stderr so stdout only carries program output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("LOG_LEVEL"))
        .with_writer(std::io::stderr)
        .init();
}
