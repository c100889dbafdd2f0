use batch_vmt::batch::{DEFAULT_DESCRIPTOR_EXTENSION, DEFAULT_IMAGE_EXTENSION};
use batch_vmt::{
    BatchGenerator, BatchResult, ErrorKind, GenerationMode, GeneratorConfig, Result,
    SubstitutionMap, TemplateSource, parse_substitution,
};
use clap::{Parser, ValueEnum};
use log::{LevelFilter, info, warn};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::PathBuf;

const LONG_HELP: &str = r#"
Template placeholders:
  <filename>           - Texture path without its extension (always bound)
  <keyword>            - Replaced by --substitute keyword:replacement

Substitutions are applied before <filename>, so a replacement may itself
use <filename>. Placeholders without a substitution are written as-is.
Overriding <filename> makes every generated descriptor identical.

Examples:
  # Generate from base.vmt for every .vtf in a folder
  batch_vmt materials/brick
  # Include sub-folders and fill in a surfaceprop
  batch_vmt -r -s surface:brick materials/brick
  # Displacements: skip blend, bump and editor textures
  batch_vmt -t displacement_base.vmt -s bumpmap:<filename>_bump \
      -i '.*_a' '.*_bump' '.*_bm' '.*_editor' -- materials/disp
  # See what would be written
  batch_vmt --dry-run -v materials/brick
  # Machine-readable summary
  batch_vmt --summary json materials/brick
"#;

/// Generate .vmt files from a folder of .vtf files.
#[derive(Parser, Debug)]
#[command(
    name = "batch_vmt",
    version,
    about = "Generate .vmt files from a folder of .vtf files.",
    after_long_help = LONG_HELP
)]
struct Cli {
    /// Folders to scan and texture files to generate descriptors for
    #[arg(value_name = "INPUTS")]
    inputs: Vec<PathBuf>,

    /// Template file expanded for every texture
    #[arg(
        short,
        long,
        value_name = "TEMPLATE",
        default_value = "base.vmt",
        env = "BATCH_VMT_TEMPLATE"
    )]
    template: PathBuf,

    /// Replace <KEYWORD> in the template (one entry per use, repeatable; replacement can't contain ':')
    #[arg(short, long = "substitute", value_name = "KEYWORD:REPLACEMENT", action = clap::ArgAction::Append)]
    substitute: Vec<String>,

    /// Also scan sub-folders of the given folders
    #[arg(short, long = "recurse")]
    recurse: bool,

    /// Skip textures whose path (without extension) starts with a match of PATTERN
    #[arg(short, long, value_name = "PATTERN", num_args = 1.., action = clap::ArgAction::Append)]
    ignore: Vec<String>,

    /// Build descriptors from texture metadata instead of a template (not implemented)
    #[arg(long, conflicts_with = "template")]
    metadata: bool,

    /// Extension of the textures to look for in folders
    #[arg(long, value_name = "EXT", default_value = DEFAULT_IMAGE_EXTENSION)]
    extension: String,

    /// Extension of the generated descriptors
    #[arg(long, value_name = "EXT", default_value = DEFAULT_DESCRIPTOR_EXTENSION)]
    output_extension: String,

    /// Show what would be written without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Format of the final summary
    #[arg(long, value_enum, default_value = "plain")]
    summary: SummaryFormat,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq)]
enum SummaryFormat {
    /// Human-readable counts and failures
    Plain,
    /// JSON for scripting
    Json,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    if let Err(e) = TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("[WARN] Failed to initialise logging: {e}");
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        let code = match e.kind() {
            ErrorKind::Configuration => 2,
            ErrorKind::UnimplementedMode => 3,
            ErrorKind::Recoverable | ErrorKind::Io => 1,
        };
        std::process::exit(code);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mode = if cli.metadata {
        GenerationMode::Metadata
    } else {
        GenerationMode::Template(TemplateSource::File(cli.template.clone()))
    };

    let substitutions = parse_substitutions(&cli.substitute)?;
    let config = GeneratorConfig {
        image_extension: cli.extension.clone(),
        descriptor_extension: cli.output_extension.clone(),
        recursive: cli.recurse,
        verbose: cli.verbose > 0,
        dry_run: cli.dry_run,
    };

    let generator = BatchGenerator::load(&mode, substitutions, &cli.ignore, config)?;
    info!("Loaded template from {}", cli.template.display());

    let (folders, files): (Vec<PathBuf>, Vec<PathBuf>) =
        cli.inputs.iter().cloned().partition(|input| input.is_dir());
    if folders.is_empty() && files.is_empty() {
        warn!("No folders or files given, nothing to do");
    }

    let result = generator.run(folders, files);
    print_summary(&result, cli.summary, cli.dry_run)
}

fn parse_substitutions(entries: &[String]) -> Result<SubstitutionMap> {
    let mut substitutions = SubstitutionMap::new();
    for entry in entries {
        let (keyword, replacement) = parse_substitution(entry)?;
        substitutions.insert(keyword, replacement);
    }
    Ok(substitutions)
}

fn print_summary(result: &BatchResult, format: SummaryFormat, dry_run: bool) -> Result<()> {
    match format {
        SummaryFormat::Plain => {
            let verb = if dry_run { "would be written" } else { "written" };
            println!("\nSummary: {} files", result.total());
            println!("  ✓ {} {verb}", result.written);
            if result.skipped > 0 {
                println!("  - {} skipped", result.skipped);
            }
            if result.has_failures() {
                println!("  ✗ {} failed", result.failed);
                for failure in &result.failures {
                    println!("    {}", failure.reason);
                }
            }
        }
        SummaryFormat::Json => {
            let json = serde_json::to_string_pretty(result)?;
            println!("{json}");
        }
    }
    Ok(())
}
