/// Client settings loading
use anyhow::Context;
use std::path::{Path, PathBuf};
use teamspace_session::ClientConfig;

/// File read when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "teamspace.toml";

/// Load configuration from defaults, an optional file, and the environment.
///
/// Later sources win: `TEAMSPACE_SERVER__URL` overrides `server.url` from the
/// file, which overrides the built-in default.
pub fn load(path: Option<&Path>) -> anyhow::Result<ClientConfig> {
    let defaults = config::Config::try_from(&ClientConfig::default())
        .context("Failed to encode default configuration")?;

    let mut settings = config::Config::builder().add_source(defaults);

    // An explicit path must exist; the default file is optional
    settings = match path {
        Some(path) => settings.add_source(config::File::from(path.to_path_buf())),
        None => settings
            .add_source(config::File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false)),
    };

    settings = settings.add_source(
        config::Environment::with_prefix("TEAMSPACE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config: ClientConfig = settings
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;

    config.validate()?;
    Ok(config)
}
