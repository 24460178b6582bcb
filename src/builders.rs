//! Builder patterns for ergonomic model construction
//!
//! Provides fluent APIs for building bindings programmatically.

use crate::config::Configuration;
use crate::error::Result;
use crate::models::ResourceBinding;

// ============================================================================
// RESOURCE BINDING BUILDER
// ============================================================================

/// Fluent builder for [`ResourceBinding`]
///
/// Validation happens in `build()`, through the same path as
/// [`ResourceBinding::new`].
#[derive(Debug, Default)]
pub struct ResourceBindingBuilder {
    from_tasks: Option<Vec<String>>,
    name: Option<String>,
    resource: Option<String>,
    config: Configuration,
}

impl ResourceBindingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one upstream task
    pub fn from_task(mut self, task: impl Into<String>) -> Self {
        self.from_tasks
            .get_or_insert_with(Vec::new)
            .push(task.into());
        self
    }

    /// Replace the upstream task list (an empty list stays explicit)
    pub fn from_tasks<I, S>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.from_tasks = Some(tasks.into_iter().map(Into::into).collect());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn config(mut self, config: Configuration) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<ResourceBinding> {
        ResourceBinding::new(self.from_tasks, self.name, self.resource, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    #[test]
    fn test_builder_accumulates_from_tasks() {
        let binding = ResourceBindingBuilder::new()
            .from_task("build")
            .from_task("test")
            .name("source")
            .resource("repo1")
            .build()
            .unwrap();
        assert_eq!(binding.upstream_tasks(), ["build", "test"]);
    }

    #[test]
    fn test_builder_keeps_empty_from_tasks() {
        let binding = ResourceBinding::builder()
            .from_tasks(Vec::<String>::new())
            .name("source")
            .resource("repo1")
            .build()
            .unwrap();
        assert_eq!(binding.from_tasks(), Some(&[][..]));
    }

    #[test]
    fn test_builder_validates() {
        let err = ResourceBinding::builder().name("source").build().unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidFieldValue {
                field: "resource",
                ..
            }
        ));
    }

    #[test]
    fn test_builder_respects_config() {
        let binding = ResourceBinding::builder()
            .config(Configuration::without_validation())
            .build()
            .unwrap();
        assert_eq!(binding.name(), None);
    }
}
