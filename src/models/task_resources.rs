//! Resource bindings of one pipeline task (inputs + outputs)

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::Configuration;
use crate::error::Result;
use crate::mapping::{impl_wire_value, put_field, Mapping, Serializable};
use crate::schema::{FieldSpec, Model, WireType};

use super::{OutputResourceBinding, OutputResourceBindingRaw, ResourceBinding, ResourceBindingRaw};

const INPUTS: FieldSpec = FieldSpec::new(
    "inputs",
    "inputs",
    WireType::ModelList {
        type_name: <ResourceBinding as Model>::TYPE_NAME,
        schema: <ResourceBinding as Model>::json_schema,
    },
    false,
);
const OUTPUTS: FieldSpec = FieldSpec::new(
    "outputs",
    "outputs",
    WireType::ModelList {
        type_name: <OutputResourceBinding as Model>::TYPE_NAME,
        schema: <OutputResourceBinding as Model>::json_schema,
    },
    false,
);

#[derive(Debug, Clone, Default)]
pub struct TaskResourceBindings {
    inputs: Option<Vec<ResourceBinding>>,
    outputs: Option<Vec<OutputResourceBinding>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskResourceBindingsRaw {
    #[serde(default)]
    pub inputs: Option<Vec<ResourceBindingRaw>>,
    #[serde(default)]
    pub outputs: Option<Vec<OutputResourceBindingRaw>>,
}

impl TaskResourceBindings {
    pub fn new(
        inputs: Option<Vec<ResourceBinding>>,
        outputs: Option<Vec<OutputResourceBinding>>,
    ) -> Self {
        Self { inputs, outputs }
    }

    pub fn inputs(&self) -> Option<&[ResourceBinding]> {
        self.inputs.as_deref()
    }

    pub fn set_inputs(&mut self, inputs: Option<Vec<ResourceBinding>>) {
        self.inputs = inputs;
    }

    pub fn add_input(&mut self, input: ResourceBinding) {
        self.inputs.get_or_insert_with(Vec::new).push(input);
    }

    pub fn outputs(&self) -> Option<&[OutputResourceBinding]> {
        self.outputs.as_deref()
    }

    pub fn set_outputs(&mut self, outputs: Option<Vec<OutputResourceBinding>>) {
        self.outputs = outputs;
    }

    pub fn add_output(&mut self, output: OutputResourceBinding) {
        self.outputs.get_or_insert_with(Vec::new).push(output);
    }

    /// Every upstream task named by an input, first-seen order, no duplicates
    pub fn upstream_tasks(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for task in self
            .inputs()
            .unwrap_or_default()
            .iter()
            .flat_map(|input| input.upstream_tasks())
        {
            if !seen.contains(&task.as_str()) {
                seen.push(task);
            }
        }
        seen
    }
}

impl Serializable for TaskResourceBindings {
    fn to_mapping(&self) -> Mapping {
        let mut map = Mapping::new();
        put_field(&mut map, &INPUTS, self.inputs.as_ref());
        put_field(&mut map, &OUTPUTS, self.outputs.as_ref());
        map
    }
}

impl_wire_value!(TaskResourceBindings);

impl Model for TaskResourceBindings {
    const TYPE_NAME: &'static str = "PipelineTaskResources";
    const FIELDS: &'static [FieldSpec] = &[INPUTS, OUTPUTS];

    type Raw = TaskResourceBindingsRaw;

    fn from_raw(raw: Self::Raw, config: &Configuration) -> Result<Self> {
        let inputs = raw
            .inputs
            .map(|inputs| {
                inputs
                    .into_iter()
                    .map(|input| ResourceBinding::from_raw(input, config))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;
        let outputs = raw
            .outputs
            .map(|outputs| {
                outputs
                    .into_iter()
                    .map(|output| OutputResourceBinding::from_raw(output, config))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;
        Ok(Self::new(inputs, outputs))
    }
}

impl PartialEq for TaskResourceBindings {
    fn eq(&self, other: &Self) -> bool {
        self.to_mapping() == other.to_mapping()
    }
}

impl fmt::Display for TaskResourceBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Serialize for TaskResourceBindings {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_mapping().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TaskResourceBindings {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = TaskResourceBindingsRaw::deserialize(deserializer)?;
        Self::from_raw(raw, Configuration::shared()).map_err(serde::de::Error::custom)
    }
}
