// assay-core/src/domain/options.rs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::domain::project::ProjectDefaults;

/// Options applied to every generated assertion once defaults are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalOptions {
    pub database: String,
    pub schema: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub tags: BTreeSet<String>,
    pub disabled_in_envs: BTreeSet<String>,
}

impl GlobalOptions {
    pub fn defaults(project: &ProjectDefaults) -> Self {
        Self {
            database: project.database.clone(),
            schema: project.schema.clone(),
            location: project.location.clone(),
            tags: BTreeSet::new(),
            disabled_in_envs: BTreeSet::new(),
        }
    }

    /// Shallow merge: a key present in `overrides` replaces the default value wholesale.
    pub fn merged(self, overrides: &GlobalOptionsOverrides) -> Self {
        Self {
            database: overrides.database.clone().unwrap_or(self.database),
            schema: overrides.schema.clone().unwrap_or(self.schema),
            location: match &overrides.location {
                Some(explicit) => explicit.clone(),
                None => self.location,
            },
            tags: overrides.tags.clone().unwrap_or(self.tags),
            disabled_in_envs: overrides
                .disabled_in_envs
                .clone()
                .unwrap_or(self.disabled_in_envs),
        }
    }
}

/// Caller-supplied subset of [`GlobalOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalOptionsOverrides {
    #[serde(default, alias = "targetDatabase", skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    #[serde(default, alias = "targetSchema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `Some(None)` is an explicit `location: null`, which clears the default.
    #[serde(
        default,
        alias = "targetLocation",
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,

    #[serde(
        default,
        alias = "disabledInEnvs",
        alias = "disabledEnvironments",
        skip_serializing_if = "Option::is_none"
    )]
    pub disabled_in_envs: Option<BTreeSet<String>>,
}

impl GlobalOptionsOverrides {
    /// Stacks `upper` on top of `self`, key by key.
    pub fn layered(self, upper: GlobalOptionsOverrides) -> Self {
        Self {
            database: upper.database.or(self.database),
            schema: upper.schema.or(self.schema),
            location: upper.location.or(self.location),
            tags: upper.tags.or(self.tags),
            disabled_in_envs: upper.disabled_in_envs.or(self.disabled_in_envs),
        }
    }
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Opaque configuration forwarded untouched to every generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharedConfig(pub Map<String, Value>);

impl SharedConfig {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Shallow merge, keys of `upper` win.
    pub fn layered(mut self, upper: SharedConfig) -> Self {
        self.0.extend(upper.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectDefaults {
        ProjectDefaults {
            database: "proj".into(),
            schema: "assertions".into(),
            location: Some("US".into()),
        }
    }

    #[test]
    fn test_empty_overrides_yield_defaults() {
        let options = GlobalOptions::defaults(&project()).merged(&GlobalOptionsOverrides::default());
        assert_eq!(
            options,
            GlobalOptions {
                database: "proj".into(),
                schema: "assertions".into(),
                location: Some("US".into()),
                tags: BTreeSet::new(),
                disabled_in_envs: BTreeSet::new(),
            }
        );
    }

    #[test]
    fn test_override_replaces_key_wholesale() {
        let mut defaults = GlobalOptions::defaults(&project());
        defaults.tags.insert("default_tag".into());

        let overrides = GlobalOptionsOverrides {
            tags: Some(BTreeSet::from(["x".to_string()])),
            ..Default::default()
        };
        let options = defaults.merged(&overrides);

        assert_eq!(options.tags, BTreeSet::from(["x".to_string()]));
        assert_eq!(options.database, "proj");
    }

    #[test]
    fn test_overrides_accept_camel_case_keys() -> anyhow::Result<()> {
        let json = r#"{"targetDatabase": "other", "disabledInEnvs": ["dev"]}"#;
        let overrides: GlobalOptionsOverrides = serde_json::from_str(json)?;
        assert_eq!(overrides.database.as_deref(), Some("other"));
        assert_eq!(
            overrides.disabled_in_envs,
            Some(BTreeSet::from(["dev".to_string()]))
        );
        Ok(())
    }

    #[test]
    fn test_explicit_null_location_clears_default() -> anyhow::Result<()> {
        let cleared: GlobalOptionsOverrides = serde_yaml::from_str("location: null\n")?;
        assert_eq!(cleared.location, Some(None));
        let options = GlobalOptions::defaults(&project()).merged(&cleared);
        assert_eq!(options.location, None);

        let absent: GlobalOptionsOverrides = serde_yaml::from_str("schema: other\n")?;
        assert_eq!(absent.location, None);
        let options = GlobalOptions::defaults(&project()).merged(&absent);
        assert_eq!(options.location.as_deref(), Some("US"));

        let moved: GlobalOptionsOverrides = serde_json::from_str(r#"{"targetLocation": "EU"}"#)?;
        let options = GlobalOptions::defaults(&project()).merged(&moved);
        assert_eq!(options.location.as_deref(), Some("EU"));
        Ok(())
    }

    #[test]
    fn test_unknown_override_key_is_rejected() {
        let typo: Result<GlobalOptionsOverrides, _> = serde_yaml::from_str("tag: [x]\n");
        assert!(typo.is_err());

        let nested: Result<crate::domain::rules::RuleSetInput, _> =
            serde_yaml::from_str("globalAssertionsParams: { tag: [x] }\n");
        assert!(nested.is_err());
    }

    #[test]
    fn test_layered_overrides_upper_wins_per_key() {
        let base = GlobalOptionsOverrides {
            database: Some("a".into()),
            schema: Some("s".into()),
            ..Default::default()
        };
        let upper = GlobalOptionsOverrides {
            database: Some("b".into()),
            ..Default::default()
        };
        let layered = base.layered(upper);
        assert_eq!(layered.database.as_deref(), Some("b"));
        assert_eq!(layered.schema.as_deref(), Some("s"));
    }

    #[test]
    fn test_shared_config_layering() -> anyhow::Result<()> {
        let base: SharedConfig = serde_json::from_str(r#"{"type": "assertion", "hermetic": false}"#)?;
        let upper: SharedConfig = serde_json::from_str(r#"{"hermetic": true}"#)?;
        let merged = base.layered(upper);
        assert_eq!(merged.as_map().get("hermetic"), Some(&Value::Bool(true)));
        assert_eq!(merged.as_map().len(), 2);
        Ok(())
    }
}
