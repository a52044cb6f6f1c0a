//! Router configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{with_err_context, ErrorContext, Result};
use crate::port::Port;
use crate::routing::bundle::RoutingRequest;

/// Default parameters for bundle routing.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub bend_radius: f64,
    pub separation: f64,
    pub start_straight_length: f64,
    pub end_straight_length: f64,
    pub extension_length: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            bend_radius: 10.0,
            separation: 5.0,
            start_straight_length: 0.01,
            end_straight_length: 0.01,
            extension_length: 0.0,
        }
    }
}

impl RouterConfig {
    pub fn from_toml(input: &str) -> Result<Self> {
        let value = toml::from_str(input)?;
        Ok(value)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = with_err_context(std::fs::read_to_string(path), || {
            ErrorContext::ReadFile(path.to_path_buf())
        })?;
        with_err_context(Self::from_toml(&input), || {
            ErrorContext::ReadFile(path.to_path_buf())
        })
    }

    /// Builds a [`RoutingRequest`] for the given ports using the configured lengths.
    pub fn request(&self, ports1: Vec<Port>, ports2: Vec<Port>) -> RoutingRequest {
        RoutingRequest {
            ports1,
            ports2,
            separation: self.separation,
            start_straight_length: self.start_straight_length,
            end_straight_length: self.end_straight_length,
            extension_length: self.extension_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = RouterConfig::from_toml("bend_radius = 4.0\nseparation = 2.5\n").unwrap();
        assert_eq!(cfg.bend_radius, 4.0);
        assert_eq!(cfg.separation, 2.5);
        assert_eq!(cfg.start_straight_length, 0.01);
        assert_eq!(cfg.extension_length, 0.0);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let err = RouterConfig::from_toml("bend_radius = \"big\"").unwrap_err();
        assert_eq!(err.source().kind(), "TomlParsing");
    }

    #[test]
    fn missing_file_carries_path_context() {
        let err = RouterConfig::from_toml_file("/nonexistent/router.toml").unwrap_err();
        assert_eq!(err.source().kind(), "Io");
        assert!(matches!(err.context(), [ErrorContext::ReadFile(_)]));
    }

    #[test]
    fn request_copies_lengths() {
        let cfg = RouterConfig {
            separation: 3.0,
            extension_length: 7.0,
            ..Default::default()
        };
        let req = cfg.request(vec![], vec![]);
        assert_eq!(req.separation, 3.0);
        assert_eq!(req.extension_length, 7.0);
        assert_eq!(req.end_straight_length, 0.01);
    }
}
