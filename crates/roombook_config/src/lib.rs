use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources, later ones winning:
/// 1. `<config dir>/default.{toml,yaml,json,...}` (optional)
/// 2. `<config dir>/<RUN_ENV>.*` (optional, `RUN_ENV` defaults to `debug`)
/// 3. environment variables with prefix `ROOMBOOK` (or `$PREFIX`) and `__` as
///    separator, e.g. `ROOMBOOK__STORE__BASE_URL`
///
/// The config dir is `$ROOMBOOK_CONFIG_DIR` or `./config`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "ROOMBOOK".to_string());
    let config_dir =
        PathBuf::from(env::var("ROOMBOOK_CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    load_config_from(&config_dir, &run_env, &prefix)
}

/// Loads the configuration from an explicit directory, run environment and env prefix.
pub fn load_config_from(
    config_dir: &Path,
    run_env: &str,
    prefix: &str,
) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    debug!(
        "loading config: default={}, env={}, prefix={}",
        default_path.display(),
        env_path.display(),
        prefix
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(prefix).separator("__"));

    let config: AppConfig = builder.build()?.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.store.base_url.trim().is_empty() {
        return Err(ConfigError::Message(
            "store.base_url must not be empty".to_string(),
        ));
    }
    if !config.store.base_url.starts_with("http://") && !config.store.base_url.starts_with("https://")
    {
        return Err(ConfigError::Message(format!(
            "store.base_url must be an http(s) URL, got {}",
            config.store.base_url
        )));
    }
    Ok(())
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `$DOTENV_OVERRIDE`, else the first command line argument if it
/// starts with `.env`, else `.env`. Loading happens at most once per process.
/// Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
