//! Converter configuration.
//!
//! Provides [`ConverterConfig`], loaded from environment variables.

use serde::{Deserialize, Serialize};
use soapconv_xml::{DEFAULT_ROOT_ELEMENT, SerializeOptions};
use typed_builder::TypedBuilder;

/// Converter service configuration.
///
/// # Examples
///
/// ```
/// use soapconv_core::config::ConverterConfig;
///
/// let config = ConverterConfig::default();
/// assert_eq!(config.gateway_listen, "0.0.0.0:8000");
/// assert_eq!(config.default_root_element, "Request");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ConverterConfig {
    /// Bind address for the server (e.g. `"0.0.0.0:8000"`).
    #[builder(default = String::from("0.0.0.0:8000"))]
    pub gateway_listen: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Body element used by `POST /rest`.
    #[builder(default = String::from(DEFAULT_ROOT_ELEMENT))]
    pub default_root_element: String,

    /// Largest accepted request body in bytes.
    #[builder(default = 10_485_760)]
    pub max_body_size: usize,

    /// Whether XML output is indented.
    #[builder(default = true)]
    pub pretty_print: bool,

    /// Spaces per indentation level when `pretty_print` is on.
    #[builder(default = 2)]
    pub indent_width: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            gateway_listen: String::from("0.0.0.0:8000"),
            log_level: String::from("info"),
            default_root_element: String::from(DEFAULT_ROOT_ELEMENT),
            max_body_size: 10_485_760,
            pretty_print: true,
            indent_width: 2,
        }
    }
}

impl ConverterConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATEWAY_LISTEN` | `0.0.0.0:8000` |
    /// | `LOG_LEVEL` | `info` |
    /// | `SOAPCONV_DEFAULT_ROOT_ELEMENT` | `Request` |
    /// | `SOAPCONV_MAX_BODY_SIZE` | `10485760` |
    /// | `SOAPCONV_PRETTY_PRINT` | `true` |
    /// | `SOAPCONV_INDENT_WIDTH` | `2` |
    ///
    /// Unparseable numbers keep their default.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("SOAPCONV_DEFAULT_ROOT_ELEMENT") {
            if !v.trim().is_empty() {
                config.default_root_element = v;
            }
        }
        if let Ok(v) = std::env::var("SOAPCONV_MAX_BODY_SIZE") {
            if let Ok(n) = v.parse::<usize>() {
                config.max_body_size = n;
            }
        }
        if let Ok(v) = std::env::var("SOAPCONV_PRETTY_PRINT") {
            config.pretty_print = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("SOAPCONV_INDENT_WIDTH") {
            if let Ok(n) = v.parse::<usize>() {
                config.indent_width = n;
            }
        }

        config
    }

    /// XML serialization options derived from `pretty_print` and `indent_width`.
    #[must_use]
    pub fn serialize_options(&self) -> SerializeOptions {
        if self.pretty_print {
            SerializeOptions {
                indent: Some(self.indent_width),
            }
        } else {
            SerializeOptions::compact()
        }
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = ConverterConfig::default();
        assert_eq!(config.gateway_listen, "0.0.0.0:8000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.default_root_element, "Request");
        assert_eq!(config.max_body_size, 10_485_760);
        assert!(config.pretty_print);
        assert_eq!(config.indent_width, 2);
    }

    #[test]
    fn test_should_load_from_env() {
        let config = ConverterConfig::from_env();
        assert!(!config.gateway_listen.is_empty());
    }

    #[test]
    fn test_should_build_with_typed_builder() {
        let config = ConverterConfig::builder()
            .gateway_listen("127.0.0.1:9999".into())
            .default_root_element("Envelope".into())
            .max_body_size(1024)
            .pretty_print(false)
            .build();

        assert_eq!(config.gateway_listen, "127.0.0.1:9999");
        assert_eq!(config.default_root_element, "Envelope");
        assert_eq!(config.max_body_size, 1024);
        assert!(!config.pretty_print);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_should_derive_serialize_options() {
        let config = ConverterConfig::builder().indent_width(4).build();
        assert_eq!(config.serialize_options().indent, Some(4));

        let config = ConverterConfig::builder().pretty_print(false).build();
        assert_eq!(config.serialize_options(), SerializeOptions::compact());
    }

    #[test]
    fn test_should_serialize_to_camel_case_json() {
        let json = serde_json::to_string(&ConverterConfig::default()).expect("test serialization");
        assert!(json.contains("gatewayListen"));
        assert!(json.contains("defaultRootElement"));
        assert!(json.contains("maxBodySize"));
    }

    #[test]
    fn test_should_parse_bool_values() {
        assert!(parse_bool("1"));
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }
}
