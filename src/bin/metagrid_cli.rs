use clap::{Parser, Subcommand};
use log::error;
use metagrid::{
    MetaGridConfig, MetaGridError, MetaGridResult, MetadataRegistry, SchemaGenerator,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config/metagrid.toml")]
    config: String,

    /// Metadata directory (overrides the configured one)
    #[arg(short, long)]
    metadata_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List entities discovered in the metadata directory
    ListEntities {},
    /// Validate entity metadata documents and report rejected files
    Validate {},
    /// Generate the form schema pair for an entity
    GenerateSchema {
        /// Entity name to generate for
        #[arg(long, short, required = true)]
        entity: String,
        /// Include platform-maintained system fields
        #[arg(long)]
        include_system_fields: bool,
        /// Include read-only fields
        #[arg(long)]
        include_read_only_fields: bool,
        /// Do not include virtual JSONB sub-path fields
        #[arg(long)]
        no_expand_jsonb: bool,
        /// Do not populate the required list from mandatory fields
        #[arg(long)]
        no_required: bool,
        /// Title override for the generated schema
        #[arg(long)]
        title: Option<String>,
        /// Write JSON to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Generate default detail-view groups for an entity
    GenerateGroups {
        /// Entity name to generate for
        #[arg(long, short, required = true)]
        entity: String,
        /// Write JSON to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> MetaGridResult<()> {
    let cli = Cli::parse();
    let config = MetaGridConfig::load(Path::new(&cli.config))?;
    let metadata_dir = cli.metadata_dir.unwrap_or_else(|| config.metadata_dir.clone());

    let mut registry = MetadataRegistry::new();
    let report = registry.load_from_dir(&metadata_dir)?;

    match cli.command {
        Commands::ListEntities {} => {
            for name in registry.entity_names() {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Validate {} => {
            println!(
                "{} discovered, {} loaded, {} failed",
                report.discovered.len(),
                report.loaded.len(),
                report.failed.len()
            );
            for (file, reason) in &report.failed {
                println!("  {file}: {reason}");
            }
            if report.failed.is_empty() {
                Ok(())
            } else {
                Err(MetaGridError::invalid_data(format!(
                    "{} metadata document(s) failed validation",
                    report.failed.len()
                )))
            }
        }
        Commands::GenerateSchema {
            entity,
            include_system_fields,
            include_read_only_fields,
            no_expand_jsonb,
            no_required,
            title,
            output,
        } => {
            let mut options = config.default_options.clone();
            options.include_system_fields |= include_system_fields;
            options.include_read_only_fields |= include_read_only_fields;
            if no_expand_jsonb {
                options.expand_jsonb_fields = false;
            }
            if no_required {
                options.generate_required = false;
            }
            if let Some(title) = title {
                options.entity_name = title;
            }

            let generator = SchemaGenerator::new(&registry);
            let pair = generator.generate_form_schema(&entity, &options)?;
            emit(&serde_json::to_value(&pair)?, output.as_deref())
        }
        Commands::GenerateGroups { entity, output } => {
            let generator = SchemaGenerator::new(&registry);
            let groups = generator.generate_default_groups(&entity)?;
            emit(&serde_json::to_value(&groups)?, output.as_deref())
        }
    }
}

fn emit(value: &serde_json::Value, output: Option<&Path>) -> MetaGridResult<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => std::fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }
    Ok(())
}
