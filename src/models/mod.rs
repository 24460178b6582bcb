//! API models
//!
//! - `resource_binding`: input resource of a pipeline task
//! - `output_resource`: output resource of a pipeline task
//! - `task_resources`: inputs + outputs of one pipeline task

mod output_resource;
mod resource_binding;
mod task_resources;

pub use output_resource::{OutputResourceBinding, OutputResourceBindingRaw};
pub use resource_binding::{ResourceBinding, ResourceBindingRaw};
pub use task_resources::{TaskResourceBindings, TaskResourceBindingsRaw};

use crate::config::Configuration;
use crate::error::{ModelError, Result};
use crate::schema::FieldSpec;

/// The single validated-assignment path for required fields
///
/// Every constructor and setter of a required field goes through here.
pub(crate) fn require<T>(
    model: &'static str,
    field: &FieldSpec,
    value: Option<T>,
    config: &Configuration,
) -> Result<Option<T>> {
    if config.client_side_validation && field.required && value.is_none() {
        tracing::debug!(model, field = field.attr, "rejected null for required field");
        return Err(ModelError::InvalidFieldValue {
            model,
            field: field.attr,
        });
    }
    Ok(value)
}
