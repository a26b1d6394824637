//! Loading group parameters from configuration.

use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::{Error, GroupParameters, NamedGroup, Result};

/// Where a process gets its group from.
///
/// Either `name` selects a [`NamedGroup`], or all of `p`, `q` and `g` are
/// given as hex literals (an optional `0x` prefix is accepted).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Named parameter set, e.g. `rfc5114-2048-256`.
    pub name: Option<String>,
    /// Hex modulus.
    #[serde(default, deserialize_with = "hex_literal")]
    pub p: Option<String>,
    /// Hex subgroup order.
    #[serde(default, deserialize_with = "hex_literal")]
    pub q: Option<String>,
    /// Hex generator.
    #[serde(default, deserialize_with = "hex_literal")]
    pub g: Option<String>,
}

impl GroupConfig {
    /// Configuration selecting a named set.
    pub fn named(group: NamedGroup) -> Self {
        Self {
            name: Some(group.name().to_string()),
            ..Self::default()
        }
    }

    /// Configuration carrying literal parameters.
    pub fn literal(p: &BigUint, q: &BigUint, g: &BigUint) -> Self {
        Self {
            name: None,
            p: Some(format!("{p:x}")),
            q: Some(format!("{q:x}")),
            g: Some(format!("{g:x}")),
        }
    }

    /// Loads configuration from `.env` file, TOML file, and environment variables.
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables with `SCHNORR_GROUP_` prefix (e.g., `SCHNORR_GROUP_NAME`)
    /// 2. TOML configuration file (if exists)
    /// 3. `.env` file (if exists)
    ///
    /// The TOML file path can be set via `SCHNORR_CONFIG_PATH` environment
    /// variable. If not set, defaults to `./config/group.toml`. A missing file
    /// is silently skipped.
    ///
    /// # Environment Variable Examples
    /// ```bash
    /// SCHNORR_GROUP_NAME=rfc5114-2048-256
    /// # or
    /// SCHNORR_GROUP_P=0x7f7
    /// SCHNORR_GROUP_Q=0x3fb
    /// SCHNORR_GROUP_G=0x4
    /// ```
    ///
    /// # Errors
    /// Returns an error if the configuration is malformed.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> figment::error::Result<Self> {
        use figment::providers::{Env, Format, Toml};
        use figment::Figment;

        // Attempt to load .env file (silently ignore if it doesn't exist)
        let _ = dotenvy::dotenv();

        let config_path = std::env::var("SCHNORR_CONFIG_PATH")
            .unwrap_or_else(|_| "config/group.toml".to_string());

        Figment::new()
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("SCHNORR_GROUP_"))
            .extract()
    }

    /// Builds validated group parameters.
    ///
    /// Named sets skip the primality test; literals get full validation.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the configuration is ambiguous, incomplete or not
    /// hex, and [`Error::InvalidGroup`] if the literals fail validation.
    pub fn to_parameters(&self) -> Result<GroupParameters> {
        let has_literal = self.p.is_some() || self.q.is_some() || self.g.is_some();

        match (&self.name, has_literal) {
            (Some(_), true) => Err(Error::Config(
                "Set either a group name or literal p, q, g, not both".to_string(),
            )),
            (Some(name), false) => {
                let group = NamedGroup::from_str(name)?;
                debug!(%group, "loading named group");
                GroupParameters::named(group)
            }
            (None, _) => {
                let p = parse_hex("p", self.p.as_deref())?;
                let q = parse_hex("q", self.q.as_deref())?;
                let g = parse_hex("g", self.g.as_deref())?;
                GroupParameters::new(p, q, g)
            }
        }
    }
}

/// Accepts a hex literal as a string or, when it is made only of decimal
/// digits, as the integer the environment provider parsed it into.
fn hex_literal<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Literal {
        Text(String),
        Digits(u64),
    }

    let literal = Option::<Literal>::deserialize(deserializer)?;
    Ok(literal.map(|literal| match literal {
        Literal::Text(text) => text,
        Literal::Digits(digits) => digits.to_string(),
    }))
}

fn parse_hex(field: &str, value: Option<&str>) -> Result<BigUint> {
    let value = value.ok_or_else(|| Error::Config(format!("Missing group parameter {field}")))?;
    let digits = value.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);

    BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| Error::Config(format!("Group parameter {field} is not valid hex")))
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    fn small_literal() -> GroupConfig {
        GroupConfig::literal(
            &BigUint::from(2039u32),
            &BigUint::from(1019u32),
            &BigUint::from(4u32),
        )
    }

    #[test]
    fn named_config() {
        let params = GroupConfig::named(NamedGroup::Rfc5114_2048_256)
            .to_parameters()
            .unwrap();
        assert_eq!(params.element_len(), 256);
        assert_eq!(params.scalar_len(), 32);
    }

    #[test]
    fn literal_config() {
        let config = small_literal();
        assert_eq!(config.p.as_deref(), Some("7f7"));

        let params = config.to_parameters().unwrap();
        assert_eq!(params.q(), &BigUint::from(1019u32));
    }

    #[test]
    fn prefixed_hex() {
        let config = GroupConfig {
            p: Some("0x7F7".to_string()),
            q: Some(" 0x3fb ".to_string()),
            g: Some("4".to_string()),
            ..GroupConfig::default()
        };
        assert_eq!(config.to_parameters().unwrap().p(), &BigUint::from(2039u32));
    }

    #[test]
    fn rejected_configs() {
        let ambiguous = GroupConfig {
            name: Some("rfc5114-2048-256".to_string()),
            ..small_literal()
        };
        assert!(matches!(ambiguous.to_parameters(), Err(Error::Config(_))));

        let missing = GroupConfig {
            g: None,
            ..small_literal()
        };
        assert!(matches!(missing.to_parameters(), Err(Error::Config(_))));

        let not_hex = GroupConfig {
            q: Some("xyz".to_string()),
            ..small_literal()
        };
        assert!(matches!(not_hex.to_parameters(), Err(Error::Config(_))));

        let unknown = GroupConfig {
            name: Some("modp-17".to_string()),
            ..GroupConfig::default()
        };
        assert!(matches!(unknown.to_parameters(), Err(Error::Config(_))));

        // p - 1 has order 2, not 1019
        let bad_group = GroupConfig {
            g: Some("7f6".to_string()),
            ..small_literal()
        };
        assert!(matches!(
            bad_group.to_parameters(),
            Err(Error::InvalidGroup(_))
        ));
    }

    #[test]
    fn loads_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("SCHNORR_CONFIG_PATH", "missing.toml");
            jail.set_env("SCHNORR_GROUP_NAME", "rfc5114-2048-256");

            let config = GroupConfig::from_env()?;
            assert_eq!(config, GroupConfig::named(NamedGroup::Rfc5114_2048_256));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "group.toml",
                r#"
                p = "0x7f7"
                q = "0x3fb"
                g = "0x4"
                "#,
            )?;
            jail.set_env("SCHNORR_CONFIG_PATH", "group.toml");
            jail.set_env("SCHNORR_GROUP_G", "0x10");

            let config = GroupConfig::from_env()?;
            assert_eq!(config.g.as_deref(), Some("0x10"));

            let params = config.to_parameters().unwrap();
            assert_eq!(params.g(), &BigUint::from(16u32));
            Ok(())
        });
    }

    #[test]
    fn digit_only_hex_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("SCHNORR_CONFIG_PATH", "missing.toml");
            jail.set_env("SCHNORR_GROUP_P", "7f7");
            jail.set_env("SCHNORR_GROUP_Q", "3fb");
            jail.set_env("SCHNORR_GROUP_G", "4");

            let config = GroupConfig::from_env()?;
            assert_eq!(config, small_literal());
            assert_eq!(config.to_parameters().unwrap().g(), &BigUint::from(4u32));

            // read as hex, not decimal
            jail.set_env("SCHNORR_GROUP_G", "10");
            let config = GroupConfig::from_env()?;
            assert_eq!(config.g.as_deref(), Some("10"));
            assert_eq!(config.to_parameters().unwrap().g(), &BigUint::from(16u32));
            Ok(())
        });
    }

    #[test]
    fn digit_only_hex_from_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "group.toml",
                r#"
                p = "7f7"
                q = "3fb"
                g = 4
                "#,
            )?;
            jail.set_env("SCHNORR_CONFIG_PATH", "group.toml");

            let config = GroupConfig::from_env()?;
            assert_eq!(config.g.as_deref(), Some("4"));
            assert!(config.to_parameters().is_ok());
            Ok(())
        });
    }
}
