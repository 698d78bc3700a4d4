mod types;

pub use types::*;

use anyhow::{Context, Result};
use filterbrr_parser::Normalizer;
use filterbrr_rules::Filter;
use std::collections::HashSet;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to load config file: {:?}", path))?;
    tracing::debug!(
        path = %path.display(),
        filters = config.filters.len(),
        indexers = config.indexers.len(),
        "loaded config"
    );
    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let mut config: Config = toml::from_str(content).context("Failed to parse config")?;
    validate_config(&config)?;
    prepare_filters(&mut config.filters);
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./filterbrr.toml",
        "./config.toml",
        "~/.config/filterbrr/config.toml",
        "/etc/filterbrr/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    tracing::debug!("no config file found, using defaults");
    Ok(Config::default())
}

fn prepare_filters(filters: &mut [Filter]) {
    filters.sort_by(|a, b| b.priority.cmp(&a.priority));
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.parser.min_year > config.parser.max_year {
        anyhow::bail!(
            "Parser year window is empty: min_year {} > max_year {}",
            config.parser.min_year,
            config.parser.max_year
        );
    }

    let mut seen = HashSet::new();
    for indexer in &config.indexers {
        if indexer.identifier.trim().is_empty() {
            anyhow::bail!("Indexer has no identifier");
        }
        if !seen.insert(indexer.identifier.to_ascii_lowercase()) {
            anyhow::bail!("Duplicate indexer identifier '{}'", indexer.identifier);
        }
        if let Some(name) = &indexer.normalizer {
            if Normalizer::from_name(name).is_none() {
                anyhow::bail!(
                    "Indexer '{}' has unknown normalizer '{}'",
                    indexer.identifier,
                    name
                );
            }
        }
    }

    for filter in config.filters.iter().filter(|f| f.enabled) {
        filter.validate()?;

        for (field, pattern, err) in filter.invalid_regexes() {
            tracing::warn!(
                filter = %filter.name,
                field,
                pattern = %pattern,
                error = %err,
                "regex does not compile and will never match"
            );
        }
    }

    Ok(())
}
