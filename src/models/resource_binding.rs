//! Input resource binding of a pipeline task
//!
//! Wire shape:
//!
//! ```yaml
//! from: [build, test]   # optional - upstream tasks producing the resource
//! name: source          # required - resource name declared by the task
//! resource: repo1       # required - declared pipeline resource to use
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::builders::ResourceBindingBuilder;
use crate::config::Configuration;
use crate::error::Result;
use crate::mapping::{impl_wire_value, put_field, Mapping, Serializable};
use crate::schema::{FieldSpec, Model, WireType};

use super::require;

const TYPE_NAME: &str = "PipelineTaskInputResource";

const FROM_TASKS: FieldSpec = FieldSpec::new("from_tasks", "from", WireType::StringList, false);
const NAME: FieldSpec = FieldSpec::new("name", "name", WireType::String, true);
const RESOURCE: FieldSpec = FieldSpec::new("resource", "resource", WireType::String, true);

/// Binds a task's declared input resource to a pipeline-level resource.
///
/// `name` and `resource` are required unless the configuration disables
/// client-side validation. Equality compares wire mappings only.
#[derive(Debug, Clone)]
pub struct ResourceBinding {
    from_tasks: Option<Vec<String>>,
    name: Option<String>,
    resource: Option<String>,
    config: Configuration,
}

/// Unvalidated wire shape
#[derive(Debug, Default, Deserialize)]
pub struct ResourceBindingRaw {
    #[serde(default, rename = "from")]
    pub from_tasks: Option<Vec<String>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
}

impl ResourceBinding {
    pub fn new(
        from_tasks: Option<Vec<String>>,
        name: Option<String>,
        resource: Option<String>,
        config: &Configuration,
    ) -> Result<Self> {
        Ok(Self {
            from_tasks,
            name: require(TYPE_NAME, &NAME, name, config)?,
            resource: require(TYPE_NAME, &RESOURCE, resource, config)?,
            config: *config,
        })
    }

    pub fn builder() -> ResourceBindingBuilder {
        ResourceBindingBuilder::new()
    }

    /// Upstream tasks the resource has to come from
    pub fn from_tasks(&self) -> Option<&[String]> {
        self.from_tasks.as_deref()
    }

    pub fn set_from_tasks(&mut self, from_tasks: Option<Vec<String>>) {
        self.from_tasks = from_tasks;
    }

    /// Resource name as declared by the owning task
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) -> Result<()> {
        self.name = require(TYPE_NAME, &NAME, name, &self.config)?;
        Ok(())
    }

    /// Declared pipeline resource satisfying this binding
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    pub fn set_resource(&mut self, resource: Option<String>) -> Result<()> {
        self.resource = require(TYPE_NAME, &RESOURCE, resource, &self.config)?;
        Ok(())
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Tasks that must run before the owning task (empty when unset)
    pub fn upstream_tasks(&self) -> &[String] {
        self.from_tasks.as_deref().unwrap_or_default()
    }

    pub fn depends_on(&self, task: &str) -> bool {
        self.upstream_tasks().iter().any(|t| t == task)
    }
}

impl Serializable for ResourceBinding {
    fn to_mapping(&self) -> Mapping {
        let mut map = Mapping::new();
        put_field(&mut map, &FROM_TASKS, self.from_tasks.as_ref());
        put_field(&mut map, &NAME, self.name.as_ref());
        put_field(&mut map, &RESOURCE, self.resource.as_ref());
        map
    }
}

impl_wire_value!(ResourceBinding);

impl Model for ResourceBinding {
    const TYPE_NAME: &'static str = TYPE_NAME;
    const FIELDS: &'static [FieldSpec] = &[FROM_TASKS, NAME, RESOURCE];

    type Raw = ResourceBindingRaw;

    fn from_raw(raw: Self::Raw, config: &Configuration) -> Result<Self> {
        Self::new(raw.from_tasks, raw.name, raw.resource, config)
    }
}

impl PartialEq for ResourceBinding {
    fn eq(&self, other: &Self) -> bool {
        self.to_mapping() == other.to_mapping()
    }
}

impl fmt::Display for ResourceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Serialize for ResourceBinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_mapping().serialize(serializer)
    }
}

/// Deserializes with [`Configuration::shared`]
impl<'de> Deserialize<'de> for ResourceBinding {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = ResourceBindingRaw::deserialize(deserializer)?;
        Self::from_raw(raw, Configuration::shared()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use serde_json::json;

    fn strict() -> Configuration {
        Configuration::default()
    }

    fn binding(from: Option<&[&str]>, name: &str, resource: &str) -> ResourceBinding {
        ResourceBinding::new(
            from.map(|f| f.iter().map(|s| s.to_string()).collect()),
            Some(name.to_string()),
            Some(resource.to_string()),
            &strict(),
        )
        .unwrap()
    }

    #[test]
    fn test_reads_back_supplied_values() {
        let b = binding(Some(&["build", "test"]), "source", "repo1");
        assert_eq!(
            b.from_tasks(),
            Some(&["build".to_string(), "test".to_string()][..])
        );
        assert_eq!(b.name(), Some("source"));
        assert_eq!(b.resource(), Some("repo1"));
    }

    #[test]
    fn test_null_name_rejected_at_construction() {
        let err = ResourceBinding::new(None, None, Some("repo1".to_string()), &strict())
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidFieldValue { field: "name", .. }
        ));
    }

    #[test]
    fn test_null_resource_rejected_at_construction() {
        let err = ResourceBinding::new(None, Some("source".to_string()), None, &strict())
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidFieldValue {
                field: "resource",
                ..
            }
        ));
    }

    #[test]
    fn test_failed_assignment_keeps_previous_value() {
        let mut b = binding(None, "source", "repo1");
        assert!(b.set_name(None).is_err());
        assert!(b.set_resource(None).is_err());
        assert_eq!(b.name(), Some("source"));
        assert_eq!(b.resource(), Some("repo1"));
    }

    #[test]
    fn test_validation_disabled_allows_null() {
        let config = Configuration::without_validation();
        let mut b = ResourceBinding::new(None, None, None, &config).unwrap();
        assert_eq!(b.name(), None);
        assert_eq!(b.resource(), None);
        b.set_name(None).unwrap();
        assert_eq!(
            serde_json::Value::Object(b.to_mapping()),
            json!({"name": null, "resource": null})
        );
    }

    #[test]
    fn test_mapping_order_and_keys() {
        let b = binding(Some(&["build", "test"]), "source", "repo1");
        let map = b.to_mapping();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["from", "name", "resource"]);
    }

    #[test]
    fn test_absent_vs_empty_from() {
        let absent = binding(None, "source", "repo1");
        let empty = binding(Some(&[]), "source", "repo1");
        assert!(!absent.to_mapping().contains_key("from"));
        assert_eq!(empty.to_mapping()["from"], json!([]));
        assert_ne!(absent, empty);
    }

    #[test]
    fn test_equality_ignores_config() {
        let a = binding(None, "source", "repo1");
        let b = ResourceBinding::new(
            None,
            Some("source".to_string()),
            Some("repo1".to_string()),
            &Configuration::without_validation(),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_upstream_tasks() {
        let b = binding(Some(&["build"]), "source", "repo1");
        assert!(b.depends_on("build"));
        assert!(!b.depends_on("deploy"));
        assert!(binding(None, "source", "repo1").upstream_tasks().is_empty());
    }

    #[test]
    fn test_metadata_tables() {
        assert_eq!(
            ResourceBinding::attribute_map(),
            vec![("from_tasks", "from"), ("name", "name"), ("resource", "resource")]
        );
        assert_eq!(
            ResourceBinding::openapi_types(),
            vec![
                ("from_tasks", "list[str]".to_string()),
                ("name", "str".to_string()),
                ("resource", "str".to_string()),
            ]
        );
    }
}
