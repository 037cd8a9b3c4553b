//! AsyncAPI docgen CLI
//!
//! Command-line interface for generating, linting, and validating against
//! AsyncAPI documents for WebSocket routes.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use asyncapi_docgen::{
    lint_file, load_auto, load_file, validate_message, Generator, Manifest, RouteSource,
    SchemaCatalog, Severity, ValidateError,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asyncapi-docgen")]
#[command(about = "Generate AsyncAPI 3.0 documents for WebSocket routes")]
#[command(version)]
struct Cli {
    /// Log generation steps to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a document from a route manifest
    Generate {
        /// Manifest source: file path or URL (http:// or https://)
        manifest: String,

        /// Directory of pre-generated JSON Schema files, one per type
        #[arg(long)]
        schemas: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: OutputFormat,

        /// Document title (overrides the manifest)
        #[arg(long)]
        title: Option<String>,

        /// Document version (overrides the manifest)
        #[arg(long)]
        doc_version: Option<String>,

        /// Document description (overrides the manifest)
        #[arg(long)]
        description: Option<String>,

        /// Prefix for inbound channel keys
        #[arg(long)]
        app_prefix: Option<String>,

        /// Prefix for outbound channel keys
        #[arg(long)]
        topic_prefix: Option<String>,

        /// Skip inbound routes that declare no reply
        #[arg(long)]
        require_reply: bool,
    },

    /// Lint a document for broken refs and unused components
    Lint {
        /// Document source: file path or URL
        document: String,

        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Only show errors
        #[arg(long, short)]
        quiet: bool,
    },

    /// Validate a payload against a message of a document
    Validate {
        /// Document source: file path or URL
        document: String,

        /// Message name in components/messages
        #[arg(long, short)]
        message: String,

        /// Payload file to validate
        payload: PathBuf,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            manifest,
            schemas,
            output,
            format,
            title,
            doc_version,
            description,
            app_prefix,
            topic_prefix,
            require_reply,
        } => run_generate(GenerateArgs {
            manifest,
            schemas,
            output,
            format,
            title,
            doc_version,
            description,
            app_prefix,
            topic_prefix,
            require_reply,
        }),

        Commands::Lint {
            document,
            format,
            strict,
            quiet,
        } => run_lint(&document, &format, strict, quiet),

        Commands::Validate {
            document,
            message,
            payload,
            json,
        } => run_validate(&document, &message, &payload, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

struct GenerateArgs {
    manifest: String,
    schemas: Option<PathBuf>,
    output: Option<PathBuf>,
    format: OutputFormat,
    title: Option<String>,
    doc_version: Option<String>,
    description: Option<String>,
    app_prefix: Option<String>,
    topic_prefix: Option<String>,
    require_reply: bool,
}

fn run_generate(args: GenerateArgs) -> Result<(), u8> {
    let manifest = Manifest::load(&args.manifest).map_err(|e| {
        eprintln!("Error loading manifest: {}", e);
        e.exit_code() as u8
    })?;

    let mut config = manifest.docs.clone();
    if let Some(title) = args.title {
        config = config.title(title);
    }
    if let Some(version) = args.doc_version {
        config = config.version(version);
    }
    if let Some(description) = args.description {
        config = config.description(description);
    }
    if let Some(prefix) = args.app_prefix {
        config = config.app_prefix(prefix);
    }
    if let Some(prefix) = args.topic_prefix {
        config = config.topic_prefix(prefix);
    }
    if args.require_reply {
        config = config.require_reply(true);
    }

    let mut catalog = SchemaCatalog::new();
    if let Some(dir) = &args.schemas {
        catalog = catalog.load_dir(dir).map_err(|e| {
            eprintln!("Error loading schemas: {}", e);
            e.exit_code() as u8
        })?;
    }
    let catalog = manifest.apply_enums(catalog);

    let generate_error = |e: asyncapi_docgen::GenerateError| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    };
    let routes = manifest.discover().map_err(generate_error)?;
    let document = Generator::new(config, catalog)
        .generate(&routes)
        .map_err(generate_error)?;

    let text = match args.format {
        OutputFormat::Yaml => document.to_yaml(),
        OutputFormat::Json => document.to_json_pretty(),
    }
    .map_err(generate_error)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &text).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => print!("{}", text),
    }

    Ok(())
}

fn run_validate(document: &str, message: &str, payload: &Path, json_output: bool) -> Result<(), u8> {
    let document = load_auto(document).map_err(|e| {
        report_error(json_output, &format!("loading document: {}", e));
        e.exit_code() as u8
    })?;
    let payload = load_file(payload).map_err(|e| {
        report_error(json_output, &format!("loading payload: {}", e));
        e.exit_code() as u8
    })?;

    match validate_message(&document, message, &payload) {
        Ok(()) => {
            if json_output {
                println!(r#"{{"valid":true}}"#);
            } else {
                println!("Valid");
            }
            Ok(())
        }
        Err(ValidateError::Invalid { errors }) => {
            if json_output {
                let output = serde_json::json!({
                    "valid": false,
                    "errors": errors
                });
                println!("{}", output);
            } else {
                eprintln!("Validation failed:");
                for error in errors {
                    eprintln!("  {}", error);
                }
            }
            Err(1)
        }
        Err(e) => {
            report_error(json_output, &e.to_string());
            Err(e.exit_code() as u8)
        }
    }
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!("{}", serde_json::json!({ "valid": false, "error": msg }));
    } else {
        eprintln!("Error: {}", msg);
    }
}

fn run_lint(document: &str, format: &str, strict: bool, quiet: bool) -> Result<(), u8> {
    let result = lint_file(document).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;
    let passed = result.is_ok() && (!strict || result.warnings == 0);

    if format == "json" {
        let text = serde_json::to_string_pretty(&result).map_err(|e| {
            eprintln!("Error serializing output: {}", e);
            2u8
        })?;
        println!("{}", text);
    } else {
        if !quiet {
            println!("Linting {} ...\n", document);
        }

        for diag in &result.diagnostics {
            let (color, label) = match diag.severity {
                Severity::Error => ("\x1b[31m", "error"),
                Severity::Warning => ("\x1b[33m", "warning"),
            };
            if !quiet || diag.severity == Severity::Error {
                println!(
                    "  {}{}[{}]\x1b[0m: {} - {}",
                    color, label, diag.code, diag.path, diag.message
                );
            }
        }

        if !quiet {
            println!();
        }
        if passed {
            if !quiet {
                println!("\x1b[32m✓ passed ({} warnings)\x1b[0m", result.warnings);
            }
        } else {
            println!(
                "\x1b[31m✗ failed ({} errors, {} warnings)\x1b[0m",
                result.errors, result.warnings
            );
        }
    }

    if passed {
        Ok(())
    } else {
        Err(1)
    }
}
