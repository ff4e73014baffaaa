use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pairwise_pubmed::compose::{
    GenerationReport, GenerationRequest, IntersectionSection, MeshSection, ProximitySection,
};
use pairwise_pubmed::config::{
    default_config_path, find_config_file, get_config, load_config, Settings, ENV_PREFIX,
};
use pairwise_pubmed::models::{IntersectionField, ProximityField, QueryResult, TermList};
use pairwise_pubmed::presets;
use pairwise_pubmed::ui::{self, Status};
use pairwise_pubmed::utils::{is_terminal, search_url};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pairwise PubMed - Generate PubMed search strings from two lists of terms
#[derive(Parser, Debug)]
#[command(name = "pairwise-pubmed")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate pairwise PubMed search strings from two lists of terms", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show long search strings in full instead of collapsed
    #[arg(long, global = true)]
    full: bool,

    /// Show all environment variables
    #[arg(long)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, plain otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Field for proximity searches
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ProximityFieldArg {
    /// Title
    Ti,
    /// Title/abstract
    Tiab,
    /// Affiliation
    Ad,
}

/// Field for intersection searches
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum IntersectionFieldArg {
    /// Title
    Ti,
    /// Title/abstract
    Tiab,
    /// Text word
    Tw,
    /// All fields
    All,
}

/// Which example to generate
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ExampleMode {
    Mesh,
    Proximity,
    Intersection,
    All,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Combine MeSH main headings with MeSH subheadings
    #[command(alias = "m")]
    Mesh {
        /// File with MeSH main headings, one per line ("-" for stdin)
        #[arg(long, required_unless_present = "example")]
        headings: Option<PathBuf>,

        /// File with MeSH subheadings, one per line ("-" for stdin)
        #[arg(long, required_unless_present = "example")]
        subheadings: Option<PathBuf>,

        /// Restrict to MeSH major topics ([majr] instead of [mh])
        #[arg(long, overrides_with = "no_major_topic")]
        major_topic: bool,

        /// Search any MeSH mention ([mh]), even if the config says otherwise
        #[arg(long, overrides_with = "major_topic")]
        no_major_topic: bool,

        /// Do not explode the MeSH hierarchy (:noexp)
        #[arg(long, overrides_with = "explode")]
        no_explode: bool,

        /// Explode the MeSH hierarchy, even if the config says otherwise
        #[arg(long, overrides_with = "no_explode")]
        explode: bool,

        /// Use the built-in example lists
        #[arg(long, conflicts_with_all = ["headings", "subheadings"])]
        example: bool,
    },

    /// Combine two lists of terms in a proximity search
    #[command(alias = "p")]
    Proximity {
        /// File with topic 1 terms, one per line, no truncation ("-" for stdin)
        #[arg(long, required_unless_present = "example")]
        topic1: Option<PathBuf>,

        /// File with topic 2 terms, one per line, no truncation ("-" for stdin)
        #[arg(long, required_unless_present = "example")]
        topic2: Option<PathBuf>,

        /// Field to search
        #[arg(long, short, value_enum)]
        field: Option<ProximityFieldArg>,

        /// Maximum number of words between the two terms
        #[arg(long, short)]
        distance: Option<u32>,

        /// Use the built-in example lists
        #[arg(long, conflicts_with_all = ["topic1", "topic2"])]
        example: bool,
    },

    /// Combine two lists of terms with the Boolean AND operator
    #[command(alias = "i")]
    Intersection {
        /// File with topic 1 terms, one per line ("-" for stdin)
        #[arg(long, required_unless_present = "example")]
        topic1: Option<PathBuf>,

        /// File with topic 2 terms, one per line ("-" for stdin)
        #[arg(long, required_unless_present = "example")]
        topic2: Option<PathBuf>,

        /// Field to search
        #[arg(long, short, value_enum)]
        field: Option<IntersectionFieldArg>,

        /// Use the built-in example lists
        #[arg(long, conflicts_with_all = ["topic1", "topic2"])]
        example: bool,
    },

    /// Generate every search string described in a TOML or JSON request file
    #[command(alias = "g")]
    Generate {
        /// Request file (.toml or .json)
        request: PathBuf,
    },

    /// Generate search strings from the built-in frailty measures example
    Example {
        /// Which search to generate
        #[arg(long, short, value_enum, default_value_t = ExampleMode::All)]
        mode: ExampleMode,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a configuration file with default settings
    Init {
        /// Where to write the file (default: user config directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },

    /// Show the effective configuration
    Show,

    /// Show the default configuration file location
    Path,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("Pairwise PubMed - Environment Variables");
    println!();
    println!("Search Settings:");
    println!("  {}_SEARCH__BASE_URL             URL the search string is appended to", ENV_PREFIX);
    println!("  {}_SEARCH__WILDCARD_LIMIT       Wildcards allowed per string (default: 256)", ENV_PREFIX);
    println!("  {}_SEARCH__COLLAPSE_THRESHOLD   Collapse strings at this length (default: 1000)", ENV_PREFIX);
    println!();
    println!("Option Defaults:");
    println!("  {}_DEFAULTS__MAJOR_TOPIC        Use [majr] for MeSH searches (default: false)", ENV_PREFIX);
    println!("  {}_DEFAULTS__NO_EXPLODE         Use :noexp for MeSH searches (default: false)", ENV_PREFIX);
    println!("  {}_DEFAULTS__PROXIMITY_FIELD    ti, tiab or ad (default: tiab)", ENV_PREFIX);
    println!("  {}_DEFAULTS__PROXIMITY_DISTANCE Proximity distance (default: 2)", ENV_PREFIX);
    println!("  {}_DEFAULTS__INTERSECTION_FIELD ti, tiab, tw or all (default: tiab)", ENV_PREFIX);
    println!();
    println!("Other Settings:");
    println!("  {}_LOGGING__LEVEL               Default log level (default: warn)", ENV_PREFIX);
    println!("  RUST_LOG                    Rust logging filter (overrides everything else)");
    println!();
    println!("Example:");
    println!("  export {}_DEFAULTS__PROXIMITY_DISTANCE=4", ENV_PREFIX);
    std::process::exit(0);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
    }

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut settings = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => get_config().context("Failed to read configuration from environment")?,
    };
    settings.validate()?;

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => settings.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("pairwise_pubmed={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let request = match cli.command {
        Some(Commands::Mesh {
            headings,
            subheadings,
            major_topic,
            no_major_topic,
            no_explode,
            explode,
            example,
        }) => {
            let mut section = if example {
                presets::mesh_example()
            } else {
                let (headings, subheadings) = read_term_files(headings, subheadings)?;
                MeshSection {
                    headings,
                    subheadings,
                    ..MeshSection::default()
                }
            };
            if let Some(value) = flag_pair(major_topic, no_major_topic) {
                section.major_topic = Some(value);
            }
            if let Some(value) = flag_pair(no_explode, explode) {
                section.no_explode = Some(value);
            }
            GenerationRequest {
                mesh: Some(section),
                ..GenerationRequest::default()
            }
        }

        Some(Commands::Proximity {
            topic1,
            topic2,
            field,
            distance,
            example,
        }) => {
            let mut section = if example {
                presets::proximity_example()
            } else {
                let (topic1, topic2) = read_term_files(topic1, topic2)?;
                ProximitySection {
                    topic1,
                    topic2,
                    ..ProximitySection::default()
                }
            };
            if let Some(field) = field {
                section.field = Some(proximity_field(field));
            }
            if distance.is_some() {
                section.distance = distance;
            }
            GenerationRequest {
                proximity: Some(section),
                ..GenerationRequest::default()
            }
        }

        Some(Commands::Intersection {
            topic1,
            topic2,
            field,
            example,
        }) => {
            let mut section = if example {
                presets::intersection_example()
            } else {
                let (topic1, topic2) = read_term_files(topic1, topic2)?;
                IntersectionSection {
                    topic1,
                    topic2,
                    ..IntersectionSection::default()
                }
            };
            if let Some(field) = field {
                section.field = Some(intersection_field(field));
            }
            GenerationRequest {
                intersection: Some(section),
                ..GenerationRequest::default()
            }
        }

        Some(Commands::Generate { request }) => {
            let loaded = GenerationRequest::load(&request)?;
            ensure_requested(&loaded, &request)?;
            loaded
        }

        Some(Commands::Example { mode }) => match mode {
            ExampleMode::Mesh => GenerationRequest {
                mesh: Some(presets::mesh_example()),
                ..GenerationRequest::default()
            },
            ExampleMode::Proximity => GenerationRequest {
                proximity: Some(presets::proximity_example()),
                ..GenerationRequest::default()
            },
            ExampleMode::Intersection => GenerationRequest {
                intersection: Some(presets::intersection_example()),
                ..GenerationRequest::default()
            },
            ExampleMode::All => presets::full_example(),
        },

        Some(Commands::Config { command }) => {
            run_config_command(command, &settings, config_path.as_deref())?;
            return Ok(());
        }

        None => {
            println!("No command provided. Use --help for usage information.");
            println!("Common commands:");
            println!("  mesh --headings <file> --subheadings <file>   - MeSH main/subheading pairs");
            println!("  proximity --topic1 <file> --topic2 <file>     - Proximity search pairs");
            println!("  intersection --topic1 <file> --topic2 <file>  - Boolean AND pairs");
            println!("  generate <request.toml>                       - Several searches at once");
            println!("  example                                       - Try the built-in example");
            return Ok(());
        }
    };

    let report = request.generate(&settings.composer(), &settings.defaults);

    if !cli.quiet {
        for section in &report.skipped {
            eprintln!("Skipped {} search: a term list is empty", section);
        }
    }

    ensure_generated(&report)?;
    output_report(&report, &settings, cli.output, cli.full)?;
    Ok(())
}

/// Resolve an on/off flag pair; `None` leaves the option to the request or config
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn ensure_requested(request: &GenerationRequest, path: &Path) -> Result<()> {
    if request.is_blank() {
        anyhow::bail!(
            "{} requests no search strings; add a [mesh], [proximity] or [intersection] section",
            path.display()
        );
    }
    Ok(())
}

fn ensure_generated(report: &GenerationReport) -> Result<()> {
    if report.is_empty() {
        anyhow::bail!(
            "Empty term lists, no search strings generated. Tip: try `pairwise-pubmed example` to see how it works"
        );
    }
    Ok(())
}

fn run_config_command(
    command: ConfigCommands,
    settings: &Settings,
    config_path: Option<&Path>,
) -> Result<()> {
    match command {
        ConfigCommands::Init { path, force } => {
            let path = path
                .or_else(default_config_path)
                .context("Could not determine a configuration directory; pass --path")?;
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists; use --force to overwrite it",
                    path.display()
                );
            }
            Settings::default().save(&path)?;
            ui::print_status(
                Status::Success,
                &format!("Wrote default configuration to {}", path.display()),
            );
        }
        ConfigCommands::Show => {
            match config_path {
                Some(path) => println!("# Loaded from {}", path.display()),
                None => println!("# Built-in defaults and environment"),
            }
            print!("{}", settings.to_toml()?);
        }
        ConfigCommands::Path => match default_config_path() {
            Some(path) => {
                let state = if path.is_file() { "exists" } else { "not created" };
                println!("{} ({})", path.display(), state);
            }
            None => println!("No configuration directory available on this platform"),
        },
    }
    Ok(())
}

/// Read both term lists; at most one of them may come from stdin
fn read_term_files(
    first: Option<PathBuf>,
    second: Option<PathBuf>,
) -> Result<(TermList, TermList)> {
    let first = first.context("Missing first term list file")?;
    let second = second.context("Missing second term list file")?;
    if is_stdin(&first) && is_stdin(&second) {
        anyhow::bail!("Only one term list can be read from stdin");
    }
    Ok((read_terms(&first)?, read_terms(&second)?))
}

fn read_terms(path: &Path) -> Result<TermList> {
    let text = if is_stdin(path) {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read terms from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read terms from {}", path.display()))?
    };
    let terms = TermList::parse(&text);
    tracing::debug!(path = %path.display(), terms = terms.len(), "Read term list");
    Ok(terms)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn proximity_field(field: ProximityFieldArg) -> ProximityField {
    match field {
        ProximityFieldArg::Ti => ProximityField::Title,
        ProximityFieldArg::Tiab => ProximityField::TitleAbstract,
        ProximityFieldArg::Ad => ProximityField::Affiliation,
    }
}

fn intersection_field(field: IntersectionFieldArg) -> IntersectionField {
    match field {
        IntersectionFieldArg::Ti => IntersectionField::Title,
        IntersectionFieldArg::Tiab => IntersectionField::TitleAbstract,
        IntersectionFieldArg::Tw => IntersectionField::TextWord,
        IntersectionFieldArg::All => IntersectionField::All,
    }
}

/// A report section as emitted in JSON output
#[derive(Serialize)]
struct SectionOutput<'a> {
    title: &'a str,
    #[serde(flatten)]
    result: &'a QueryResult,
    generated_char_count: usize,
    url: String,
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    sections: Vec<SectionOutput<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: &'a Vec<String>,
}

fn output_report(
    report: &GenerationReport,
    settings: &Settings,
    format: OutputFormat,
    full: bool,
) -> Result<()> {
    let actual_format = if format == OutputFormat::Auto {
        if is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Plain
        }
    } else {
        format
    };

    let base_url = settings.search.base_url.as_str();

    match actual_format {
        OutputFormat::Json => {
            let output = ReportOutput {
                sections: report
                    .sections()
                    .into_iter()
                    .map(|section| SectionOutput {
                        title: section.title,
                        result: section.result,
                        generated_char_count: section.result.generated_char_count(),
                        url: search_url(base_url, &section.result.query),
                    })
                    .collect(),
                skipped: &report.skipped,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for section in report.sections() {
                let result = section.result;
                println!("# {}", section.title);
                println!("{}", result.query);
                println!(
                    "# pairs: {}, typed: {}, generated: {}, length: {}",
                    result.pair_count,
                    result.typed_char_count,
                    result.generated_char_count(),
                    result.length
                );
                if let Some(wildcards) = result.wildcard_count {
                    println!("# wildcards: {}", wildcards);
                }
                for advisory in &result.advisories {
                    println!("# warning: {}", advisory);
                }
                println!("# url: {}", search_url(base_url, &result.query));
                println!();
            }
        }
        OutputFormat::Table => {
            for section in report.sections() {
                ui::print_result(
                    section.title,
                    section.result,
                    section.labels,
                    &search_url(base_url, &section.result.query),
                    settings.search.collapse_threshold,
                    full,
                );
            }
        }
        OutputFormat::Auto => unreachable!(),
    }
    Ok(())
}
