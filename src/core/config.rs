use crate::model::Meta;
use anyhow::{anyhow, Result};

/// Entry point variants the K2 taxonomy publishes for limited companies.
pub const ENTRY_POINTS: &[&str] = &["risbs", "risab", "raibs", "raiab"];

/// Generator settings that are not part of a report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub software: String,
    pub software_version: String,
    pub entry_point: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            software: env!("CARGO_PKG_NAME").to_string(),
            software_version: env!("CARGO_PKG_VERSION").to_string(),
            entry_point: crate::ixbrl::generate::DEFAULT_ENTRY_POINT.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let software = lookup("K2IXBRL_SOFTWARE").unwrap_or(defaults.software);
        let software_version =
            lookup("K2IXBRL_SOFTWARE_VERSION").unwrap_or(defaults.software_version);

        let entry_point = lookup("K2IXBRL_ENTRY_POINT").unwrap_or(defaults.entry_point);
        if !ENTRY_POINTS.contains(&entry_point.as_str()) {
            return Err(anyhow!(
                "K2IXBRL_ENTRY_POINT must be one of {}, got {:?}",
                ENTRY_POINTS.join(", "),
                entry_point
            ));
        }

        Ok(Self {
            software,
            software_version,
            entry_point,
        })
    }

    /// Fill the metadata fields the report left empty.
    pub fn apply(&self, meta: &mut Meta) {
        for (field, value) in [
            (&mut meta.software, &self.software),
            (&mut meta.software_version, &self.software_version),
            (&mut meta.entry_point, &self.entry_point),
        ] {
            if field.is_empty() {
                field.clone_from(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.software, "k2ixbrl");
        assert_eq!(config.software_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.entry_point, "risbs");
    }

    #[test]
    fn test_overrides_and_validation() {
        let config = GeneratorConfig::from_lookup(lookup(&[
            ("K2IXBRL_SOFTWARE", "Bokslut"),
            ("K2IXBRL_ENTRY_POINT", "risab"),
        ]))
        .unwrap();
        assert_eq!(config.software, "Bokslut");
        assert_eq!(config.entry_point, "risab");

        let err = GeneratorConfig::from_lookup(lookup(&[("K2IXBRL_ENTRY_POINT", "k3")]))
            .unwrap_err();
        assert!(err.to_string().contains("k3"));
    }

    #[test]
    fn test_apply_keeps_report_values() {
        let config = GeneratorConfig::default();
        let mut meta = Meta {
            software: "Eget program".to_string(),
            ..Default::default()
        };
        config.apply(&mut meta);
        assert_eq!(meta.software, "Eget program");
        assert_eq!(meta.software_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(meta.entry_point, "risbs");
    }
}
