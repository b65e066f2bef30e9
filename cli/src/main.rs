use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use go2proto_core::{
    load_graphs_from_path, load_type_mappings, naming, render, TransformOptions, Transformer,
    TypeGraph, TypeMappings, Warning,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "go2proto")]
#[command(about = "Generate proto3 schemas from Go type graphs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate .proto files from one or more type-graph JSON files
    Generate {
        /// Type-graph JSON files (one package or an array of packages each)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory for generated files
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Proto package name (default: derived from the Go import path)
        #[arg(long)]
        package: Option<String>,

        /// go_package option (default: the Go import path)
        #[arg(long)]
        go_package: Option<String>,

        /// Include unexported struct fields
        #[arg(long)]
        private: bool,

        /// Write all packages into a single file
        #[arg(long)]
        one_file: bool,

        /// Output filename (only with --one-file)
        #[arg(long, requires = "one_file")]
        filename: Option<String>,

        /// JSON file of extra type mappings, e.g. {"uuid.UUID": {"proto": "string"}}
        #[arg(long)]
        mappings: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Proto)]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    /// proto3 source text
    Proto,
    /// The intermediate representation as pretty JSON
    Ir,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Proto => "proto",
            OutputFormat::Ir => "json",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only lists written files
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            inputs,
            out,
            package,
            go_package,
            private,
            one_file,
            filename,
            mappings,
            format,
        } => {
            let mut graphs = Vec::new();
            for input in &inputs {
                let loaded = load_graphs_from_path(input)
                    .with_context(|| format!("Failed to load type graph: {}", input.display()))?;
                graphs.extend(loaded);
            }
            if graphs.is_empty() {
                anyhow::bail!("No packages found in {} input file(s)", inputs.len());
            }
            tracing::debug!(packages = graphs.len(), "loaded type graphs");

            let type_mappings = match mappings {
                Some(path) => {
                    let extra = load_type_mappings(&path).with_context(|| {
                        format!("Failed to load type mappings: {}", path.display())
                    })?;
                    TypeMappings::default().with_overrides(extra)
                }
                None => TypeMappings::default(),
            };

            let options = TransformOptions {
                package_name: package.unwrap_or_default(),
                go_package: go_package.unwrap_or_default(),
                include_private: private,
                type_mappings,
            };
            let transformer = Transformer::new(options);

            fs::create_dir_all(&out)
                .with_context(|| format!("Failed to create output directory: {}", out.display()))?;

            if one_file {
                generate_single_file(&graphs, &transformer, &out, filename, format)?;
            } else {
                generate_per_package(&graphs, &transformer, &out, format)?;
            }
        }
    }

    Ok(())
}

fn generate_single_file(
    graphs: &[TypeGraph],
    transformer: &Transformer,
    out: &Path,
    filename: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let result = transformer.transform(graphs);
    report_warnings(&result.warnings);

    let filename = filename.unwrap_or_else(|| {
        let stem = if result.proto.package.is_empty() {
            "generated".to_string()
        } else {
            naming::file_stem(&result.proto.package)
        };
        format!("{stem}.{}", format.extension())
    });
    write_output(&result.proto, &out.join(filename), format)
}

fn generate_per_package(
    graphs: &[TypeGraph],
    transformer: &Transformer,
    out: &Path,
    format: OutputFormat,
) -> Result<()> {
    for graph in graphs {
        let result = transformer.transform(std::slice::from_ref(graph));
        report_warnings(&result.warnings);

        if !result.proto.has_declarations() {
            tracing::info!(path = %graph.path, "skipping package with no proto types");
            continue;
        }
        tracing::debug!(
            path = %graph.path,
            messages = result.proto.messages.len(),
            enums = result.proto.enums.len(),
            services = result.proto.services.len(),
            "generated package"
        );

        let path = out.join(format!("{}.{}", graph.name, format.extension()));
        write_output(&result.proto, &path, format)?;
    }
    Ok(())
}

fn write_output(proto: &go2proto_core::Proto, path: &Path, format: OutputFormat) -> Result<()> {
    let content = match format {
        OutputFormat::Proto => render(proto),
        OutputFormat::Ir => {
            let mut json = serde_json::to_string_pretty(proto).context("Failed to serialize IR")?;
            json.push('\n');
            json
        }
    };
    fs::write(path, content)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}

fn report_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}
