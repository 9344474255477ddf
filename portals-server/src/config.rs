//! The configuration for the server, given from environment variables and lazy
//! initialized when needed.

use std::env;

use once_cell::race::OnceBool;
use once_cell::sync::OnceCell;
use thiserror::Error;

use portals::dimension::{DimensionId, DEFAULT_TAG_NAMESPACE};
use portals::tag::ParseIdError;
use portals::{block, item};


/// Return the namespace of the portal frame and igniter tags.
///
/// To change it, set `PORTALS_NAMESPACE=<namespace>`, defaults to `server_sided_portals`.
pub fn namespace() -> &'static str {
    static ENV: OnceCell<String> = OnceCell::new();
    ENV.get_or_init(|| {
        env::var("PORTALS_NAMESPACE")
            .unwrap_or_else(|_| DEFAULT_TAG_NAMESPACE.to_string())
    })
}

/// Return the raw list of custom dimensions, see [`parse_dimensions`] for its format.
///
/// To define custom dimensions, set `PORTALS_DIMENSIONS`, for example
/// `PORTALS_DIMENSIONS="mymod:aether=glowstone/water_bucket"`.
pub fn dimensions() -> &'static str {
    static ENV: OnceCell<String> = OnceCell::new();
    ENV.get_or_init(|| env::var("PORTALS_DIMENSIONS").unwrap_or_default())
}

/// Return true if the closest portal search uses the short nether radius in every
/// dimension.
///
/// To enable this feature, set `PORTALS_FAST_SEARCH=1`.
pub fn fast_search() -> bool {
    static ENV: OnceBool = OnceBool::new();
    ENV.get_or_init(|| {
        env::var_os("PORTALS_FAST_SEARCH")
            .map(|s| s.as_encoded_bytes() == b"1")
            .unwrap_or(false)
    })
}


/// A custom dimension defined in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionConfig {
    /// The custom dimension.
    pub dimension: DimensionId,
    /// Blocks of its portal frame, never empty.
    pub frame: Vec<u8>,
    /// Items igniting its portal, fire lights it when empty.
    pub igniter: Vec<u16>,
}

/// Error of a single custom dimension entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing '=' between dimension and frame blocks in '{0}'")]
    MissingFrame(String),
    #[error("no frame block for dimension {0}")]
    EmptyFrame(DimensionId),
    #[error("unknown block '{0}'")]
    UnknownBlock(String),
    #[error("unknown item '{0}'")]
    UnknownItem(String),
    #[error("invalid dimension: {0}")]
    Dimension(#[from] ParseIdError),
}

/// Parse a semicolon separated list of custom dimensions, each one being defined as
/// `<dimension>=<frame block>[,<frame block>...][/<igniter item>[,<igniter item>...]]`.
/// Each entry is parsed on its own, so an invalid entry doesn't prevent others from
/// being defined.
pub fn parse_dimensions(raw: &str) -> impl Iterator<Item = Result<DimensionConfig, ConfigError>> + '_ {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_dimension)
}

/// Parse a single custom dimension entry.
pub fn parse_dimension(entry: &str) -> Result<DimensionConfig, ConfigError> {

    let (dimension, tags) = entry.split_once('=')
        .ok_or_else(|| ConfigError::MissingFrame(entry.to_string()))?;

    let dimension = DimensionId::parse(dimension.trim())?;

    let (frame, igniter) = match tags.split_once('/') {
        Some((frame, igniter)) => (frame, igniter),
        None => (tags, ""),
    };

    let frame = parse_names(frame, block::from_name, ConfigError::UnknownBlock)?;
    if frame.is_empty() {
        return Err(ConfigError::EmptyFrame(dimension));
    }

    let igniter = parse_names(igniter, item::from_name, ConfigError::UnknownItem)?;

    Ok(DimensionConfig {
        dimension,
        frame,
        igniter,
    })

}

/// Parse a comma separated list of block or item names, the `minecraft:` namespace is
/// optional.
fn parse_names<T>(
    raw: &str,
    from_name: impl Fn(&str) -> Option<T>,
    unknown: impl Fn(String) -> ConfigError,
) -> Result<Vec<T>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            let short = name.strip_prefix("minecraft:").unwrap_or(name);
            from_name(short).ok_or_else(|| unknown(name.to_string()))
        })
        .collect()
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn full_entry() {
        let config = parse_dimension("mymod:aether=glowstone, minecraft:quartz_block/water_bucket").unwrap();
        assert_eq!(config, DimensionConfig {
            dimension: DimensionId::parse("mymod:aether").unwrap(),
            frame: vec![block::GLOWSTONE, block::QUARTZ_BLOCK],
            igniter: vec![item::WATER_BUCKET],
        });
    }

    #[test]
    fn frame_only() {
        let config = parse_dimension("deep=crying_obsidian").unwrap();
        assert_eq!(config.dimension.as_str(), "minecraft:deep");
        assert_eq!(config.frame, [block::CRYING_OBSIDIAN]);
        assert!(config.igniter.is_empty());
        // Block items are items too.
        assert_eq!(parse_dimension("a:b=stone/torch").unwrap().igniter, [block::TORCH as u16]);
    }

    #[test]
    fn invalid_entries() {
        assert_eq!(parse_dimension("mymod:aether"), Err(ConfigError::MissingFrame("mymod:aether".to_string())));
        assert_eq!(parse_dimension("mymod:aether=/water_bucket"), Err(ConfigError::EmptyFrame(DimensionId::parse("mymod:aether").unwrap())));
        assert_eq!(parse_dimension("mymod:aether=cloud"), Err(ConfigError::UnknownBlock("cloud".to_string())));
        assert_eq!(parse_dimension("mymod:aether=glowstone/wand"), Err(ConfigError::UnknownItem("wand".to_string())));
        assert!(matches!(parse_dimension("My Mod:aether=glowstone"), Err(ConfigError::Dimension(_))));
    }

    #[test]
    fn entry_list() {

        let entries: Vec<_> = parse_dimensions(" a:one=glowstone ;; bad ; a:two=obsidian/diamond;").collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].as_ref().unwrap().dimension.as_str(), "a:one");
        assert!(entries[1].is_err());
        assert_eq!(entries[2].as_ref().unwrap().igniter, [item::DIAMOND]);

        assert_eq!(parse_dimensions("").count(), 0);

    }

}
