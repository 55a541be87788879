//! Export configuration: TOML file, environment/CLI overrides, validation.
//!
//! Precedence, lowest first: built-in defaults, the optional config file,
//! overrides supplied by the caller (environment variables and flags).
//!
//! Supports `${ENV_VAR}` substitution in all string values of the file.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    error::{Error, Result},
    loader::{load_config, resolve},
    schema::{ConfigOverrides, DEFAULT_OUTPUT, ExportConfig},
    validate::ExportSettings,
};
