//! pipeline-models - client-side models for pipeline task resource bindings
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`models`] | `ResourceBinding`, `OutputResourceBinding`, `TaskResourceBindings` |
//! | [`mapping`] | Wire mappings: `Serializable`, `WireValue` |
//! | [`schema`] | Field tables, `Model` trait, JSON Schema validation |
//! | [`builders`] | Fluent construction |
//! | [`config`] | Client-side validation configuration |
//! | [`error`] | Error types with fix suggestions |

pub mod builders;
pub mod config;
pub mod error;
pub mod mapping;
pub mod models;
pub mod schema;

pub use builders::ResourceBindingBuilder;
pub use config::Configuration;
pub use error::{FixSuggestion, ModelError, Result};
pub use mapping::{Mapping, Serializable, WireValue};
pub use models::{OutputResourceBinding, ResourceBinding, TaskResourceBindings};
pub use schema::{FieldSpec, Model, SchemaError, SchemaValidator, WireType};
