//! Output resource binding of a pipeline task

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::Configuration;
use crate::error::Result;
use crate::mapping::{impl_wire_value, put_field, Mapping, Serializable};
use crate::schema::{FieldSpec, Model, WireType};

use super::require;

const TYPE_NAME: &str = "PipelineTaskOutputResource";

const NAME: FieldSpec = FieldSpec::new("name", "name", WireType::String, true);
const RESOURCE: FieldSpec = FieldSpec::new("resource", "resource", WireType::String, true);

/// Binds a task's declared output resource to a pipeline-level resource.
#[derive(Debug, Clone)]
pub struct OutputResourceBinding {
    name: Option<String>,
    resource: Option<String>,
    config: Configuration,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputResourceBindingRaw {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
}

impl OutputResourceBinding {
    pub fn new(
        name: Option<String>,
        resource: Option<String>,
        config: &Configuration,
    ) -> Result<Self> {
        Ok(Self {
            name: require(TYPE_NAME, &NAME, name, config)?,
            resource: require(TYPE_NAME, &RESOURCE, resource, config)?,
            config: *config,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) -> Result<()> {
        self.name = require(TYPE_NAME, &NAME, name, &self.config)?;
        Ok(())
    }

    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    pub fn set_resource(&mut self, resource: Option<String>) -> Result<()> {
        self.resource = require(TYPE_NAME, &RESOURCE, resource, &self.config)?;
        Ok(())
    }
}

impl Serializable for OutputResourceBinding {
    fn to_mapping(&self) -> Mapping {
        let mut map = Mapping::new();
        put_field(&mut map, &NAME, self.name.as_ref());
        put_field(&mut map, &RESOURCE, self.resource.as_ref());
        map
    }
}

impl_wire_value!(OutputResourceBinding);

impl Model for OutputResourceBinding {
    const TYPE_NAME: &'static str = TYPE_NAME;
    const FIELDS: &'static [FieldSpec] = &[NAME, RESOURCE];

    type Raw = OutputResourceBindingRaw;

    fn from_raw(raw: Self::Raw, config: &Configuration) -> Result<Self> {
        Self::new(raw.name, raw.resource, config)
    }
}

impl PartialEq for OutputResourceBinding {
    fn eq(&self, other: &Self) -> bool {
        self.to_mapping() == other.to_mapping()
    }
}

impl fmt::Display for OutputResourceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Serialize for OutputResourceBinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_mapping().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OutputResourceBinding {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = OutputResourceBindingRaw::deserialize(deserializer)?;
        Self::from_raw(raw, Configuration::shared()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use serde_json::json;

    #[test]
    fn test_requires_name_and_resource() {
        let config = Configuration::default();
        assert!(matches!(
            OutputResourceBinding::new(None, Some("image".into()), &config),
            Err(ModelError::InvalidFieldValue { field: "name", .. })
        ));
        assert!(matches!(
            OutputResourceBinding::new(Some("out".into()), None, &config),
            Err(ModelError::InvalidFieldValue {
                field: "resource",
                ..
            })
        ));
    }

    #[test]
    fn test_mapping() {
        let out = OutputResourceBinding::new(
            Some("out".into()),
            Some("image".into()),
            &Configuration::default(),
        )
        .unwrap();
        assert_eq!(
            serde_json::Value::Object(out.to_mapping()),
            json!({"name": "out", "resource": "image"})
        );
    }

    #[test]
    fn test_from_yaml_ignores_unknown_keys() {
        let out = OutputResourceBinding::from_yaml(
            "name: out\nresource: image\nextra: 1\n",
            &Configuration::default(),
        )
        .unwrap();
        assert_eq!(out.name(), Some("out"));
    }
}
