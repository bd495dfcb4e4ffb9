//! Render configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;

use crate::consts::{ENV_ANTI_ALIAS, ENV_ARC_FLAGS, ENV_FILL_RULE};
use crate::paint::FillRule;
use crate::viewport::ArcFlagPolicy;

/// Error returned by [`RenderConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: String, reason: String },
    #[error("{var} is not valid unicode")]
    NotUnicode { var: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Winding rule for the fill pass.
    pub fill_rule: FillRule,
    /// Arc flag treatment when rewriting through a viewport transform.
    pub arc_flags: ArcFlagPolicy,
    /// Anti-alias edges on raster backends.
    pub anti_alias: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { fill_rule: FillRule::EvenOdd, arc_flags: ArcFlagPolicy::Preserve, anti_alias: true }
    }
}

impl RenderConfig {
    /// Build config from environment variables. All are optional:
    ///
    /// - `SVGPAINT_FILL_RULE`: `evenodd` (default) or `nonzero`
    /// - `SVGPAINT_ARC_FLAGS`: `preserve` (default) or `force_cleared`
    /// - `SVGPAINT_ANTI_ALIAS`: `true` (default), `false`, `1` or `0`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unrecognised value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { var: key.to_owned() }),
        })
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the lookup fails or a value is unrecognised.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let defaults = Self::default();

        let fill_rule = match lookup(ENV_FILL_RULE)? {
            Some(raw) => raw.parse::<FillRule>().map_err(|reason| invalid(ENV_FILL_RULE, reason))?,
            None => defaults.fill_rule,
        };
        let arc_flags = match lookup(ENV_ARC_FLAGS)? {
            Some(raw) => raw.parse::<ArcFlagPolicy>().map_err(|reason| invalid(ENV_ARC_FLAGS, reason))?,
            None => defaults.arc_flags,
        };
        let anti_alias = match lookup(ENV_ANTI_ALIAS)? {
            Some(raw) => parse_bool(&raw).map_err(|reason| invalid(ENV_ANTI_ALIAS, reason))?,
            None => defaults.anti_alias,
        };

        tracing::debug!(?fill_rule, ?arc_flags, anti_alias, "render config loaded");
        Ok(Self { fill_rule, arc_flags, anti_alias })
    }
}

fn invalid(var: &str, reason: String) -> ConfigError {
    ConfigError::Invalid { var: var.to_owned(), reason }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(format!("expected true/false, got '{other}'")),
    }
}
