use std::path::Path;

use tracing::debug;

use crate::{
    Error, Result,
    env_subst::substitute_env,
    schema::{ConfigOverrides, ExportConfig},
    validate::ExportSettings,
};

/// Load a TOML config file, expanding `${ENV_VAR}` placeholders first.
pub fn load_config(path: &Path) -> Result<ExportConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::read(path, source))?;
    toml::from_str(&substitute_env(&raw)).map_err(|source| Error::parse(path, source))
}

/// Defaults, then `file` when given, then `overrides`; validated.
pub fn resolve(file: Option<&Path>, overrides: ConfigOverrides) -> Result<ExportSettings> {
    let mut config = match file {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(path)?
        },
        None => ExportConfig::default(),
    };
    config.apply(overrides);
    debug!(?config, "resolved config");
    config.validate()
}
