//! pipeline-models CLI - inspect and validate resource binding documents

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use std::fs;

use pipeline_models::{
    Configuration, FixSuggestion, Model, ModelError, OutputResourceBinding, ResourceBinding,
    SchemaValidator, Serializable, TaskResourceBindings,
};

#[derive(Parser)]
#[command(name = "pipeline-models")]
#[command(about = "Inspect and validate pipeline task resource bindings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which model a document holds
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    /// PipelineTaskInputResource (`from`, `name`, `resource`)
    Input,
    /// PipelineTaskOutputResource (`name`, `resource`)
    Output,
    /// PipelineTaskResources (`inputs`, `outputs`)
    Resources,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a YAML/JSON document and print its wire mapping
    Inspect {
        /// Path to a .yaml or .json file
        file: String,

        #[arg(short, long, value_enum, default_value_t = Kind::Input)]
        kind: Kind,

        /// Accept null required fields
        #[arg(long)]
        no_validation: bool,
    },

    /// Check a document against the model schema and construct it
    Validate {
        /// Path to a .yaml or .json file
        file: String,

        #[arg(short, long, value_enum, default_value_t = Kind::Input)]
        kind: Kind,

        /// Accept null required fields
        #[arg(long)]
        no_validation: bool,
    },

    /// Print the JSON Schema of a model
    Schema {
        #[arg(short, long, value_enum, default_value_t = Kind::Input)]
        kind: Kind,

        /// Print the lenient schema (required fields may be null)
        #[arg(long)]
        no_validation: bool,
    },
}

fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect {
            file,
            kind,
            no_validation,
        } => load_config(no_validation).and_then(|config| inspect(&file, kind, &config)),
        Commands::Validate {
            file,
            kind,
            no_validation,
        } => load_config(no_validation).and_then(|config| validate(&file, kind, &config)),
        Commands::Schema {
            kind,
            no_validation,
        } => load_config(no_validation).map(|config| print_schema(kind, &config)),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        if let Some(suggestion) = e
            .downcast_ref::<ModelError>()
            .and_then(|m| m.fix_suggestion())
        {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn load_config(no_validation: bool) -> Result<Configuration> {
    let config = Configuration::from_env()?;
    Ok(if no_validation {
        config.with_validation(false)
    } else {
        config
    })
}

/// Read a YAML or JSON file (YAML parsing accepts both)
fn read_document(file: &str) -> Result<Value> {
    let text = fs::read_to_string(file).with_context(|| format!("Failed to read '{}'", file))?;
    let value: Value = serde_yaml::from_str(&text).map_err(ModelError::from)?;
    tracing::debug!(file, "loaded document");
    Ok(value)
}

fn inspect(file: &str, kind: Kind, config: &Configuration) -> Result<()> {
    let value = read_document(file)?;
    let text = match kind {
        Kind::Input => ResourceBinding::from_value(&value, config)?.to_text(),
        Kind::Output => OutputResourceBinding::from_value(&value, config)?.to_text(),
        Kind::Resources => TaskResourceBindings::from_value(&value, config)?.to_text(),
    };
    println!("{}", text);
    Ok(())
}

fn validate(file: &str, kind: Kind, config: &Configuration) -> Result<()> {
    let value = read_document(file)?;
    let type_name = match kind {
        Kind::Input => check::<ResourceBinding>(&value, config)?,
        Kind::Output => check::<OutputResourceBinding>(&value, config)?,
        Kind::Resources => check::<TaskResourceBindings>(&value, config)?,
    };
    println!("{} {} '{}' is valid", "✓".green(), type_name, file);
    Ok(())
}

fn check<M: Model>(value: &Value, config: &Configuration) -> Result<&'static str, ModelError> {
    SchemaValidator::for_model::<M>(config)?.validate(value)?;
    M::from_value(value, config)?;
    Ok(M::TYPE_NAME)
}

fn print_schema(kind: Kind, config: &Configuration) {
    let strict = config.client_side_validation;
    let schema = match kind {
        Kind::Input => ResourceBinding::json_schema(strict),
        Kind::Output => OutputResourceBinding::json_schema(strict),
        Kind::Resources => TaskResourceBindings::json_schema(strict),
    };
    println!("{:#}", schema);
}
