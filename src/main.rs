use clap::Parser;
use colored::Colorize;
use miette::Result;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use spritegen::config::{Config, MalformedPolicy};
use spritegen::pipeline::{Cleaner, Generator, Normalizer, RunSummary};
use spritegen::report::{Reporter, ReportFormat};
use spritegen::watch::FileWatcher;

/// spritegen - generate SVG sprite wrapper templates
#[derive(Parser, Debug)]
#[command(name = "spritegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project root containing the icon directories
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Plain icon source directory (relative to the project root)
    #[arg(long)]
    svg_dir: Option<PathBuf>,

    /// Optimized icon source directory, rewritten in place
    #[arg(long)]
    optimized_dir: Option<PathBuf>,

    /// Directory the wrapper templates are written into
    #[arg(long)]
    components_dir: Option<PathBuf>,

    /// Attribute to strip during normalization (can be specified multiple
    /// times; replaces the default width/height/fill list)
    #[arg(long)]
    strip: Vec<String>,

    /// Abort the run on the first malformed SVG instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Show what would be cleaned, normalized and generated without
    /// touching any file
    #[arg(long)]
    dry_run: bool,

    /// Watch the source directories and regenerate on changes
    #[arg(long)]
    watch: bool,

    /// Output format for the run summary
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for the json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("spritegen v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    if cli.watch {
        run_watch_mode(&config, &cli)?;
    } else {
        run_generation(&config, &cli)?;
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&cli.path)?
    };

    // Override with CLI arguments
    if let Some(dir) = &cli.svg_dir {
        config.svg_dir = dir.clone();
    }
    if let Some(dir) = &cli.optimized_dir {
        config.optimized_dir = dir.clone();
    }
    if let Some(dir) = &cli.components_dir {
        config.components_dir = dir.clone();
    }
    if !cli.strip.is_empty() {
        config.strip_attributes = cli.strip.clone();
    }
    if cli.strict {
        config.on_malformed = MalformedPolicy::Abort;
    }

    Ok(config.resolved(&cli.path))
}

fn run_generation(config: &Config, cli: &Cli) -> Result<RunSummary> {
    let start_time = Instant::now();

    if !cli.quiet {
        println!("{}", "SVG sprite wrapper generation".cyan().bold());
    }

    if !cli.quiet {
        println!("{}", "1. Clearing generated wrappers".yellow());
    }
    let cleaned = Cleaner::new(&config.components_dir)
        .with_dry_run(cli.dry_run)
        .run()?;
    info!("Cleaned {} stale wrapper files", cleaned);

    if !cli.quiet {
        println!("{}", "2. Normalizing optimized icons".yellow());
    }
    let normalize = Normalizer::new(config).with_dry_run(cli.dry_run).run()?;
    info!(
        "Normalized {} optimized icons ({} rewritten)",
        normalize.processed, normalize.rewritten
    );

    if !cli.quiet {
        println!("{}", "3. Writing wrapper templates".yellow());
    }
    let generate = Generator::new(config).with_dry_run(cli.dry_run).run()?;
    info!("Generated {} wrapper templates", generate.wrappers.len());

    let mut skipped = normalize.skipped;
    skipped.extend(generate.skipped);

    let summary = RunSummary {
        cleaned,
        normalized: normalize.processed,
        rewritten: normalize.rewritten,
        wrappers: generate.wrappers,
        skipped,
        dry_run: cli.dry_run,
    };

    let reporter = Reporter::new(cli.format.clone().into(), cli.output.clone());
    reporter.report(&summary)?;

    let elapsed = start_time.elapsed();
    if !cli.quiet {
        println!(
            "{}",
            format!("Finished in {:.2}s", elapsed.as_secs_f64()).dimmed()
        );
    }

    Ok(summary)
}

fn run_watch_mode(config: &Config, cli: &Cli) -> Result<()> {
    let watcher = FileWatcher::new().with_ignored_root(config.components_dir.clone());

    // The optimized directory usually nests inside the plain one; avoid
    // registering it twice in that case.
    let mut roots = vec![config.svg_dir.clone()];
    if !config.optimized_dir.starts_with(&config.svg_dir) {
        roots.push(config.optimized_dir.clone());
    }

    watcher
        .watch(&roots, || match run_generation(config, cli) {
            Ok(_) => {
                println!();
                println!(
                    "{}",
                    "Generation complete. Waiting for changes...".green()
                );
                true
            }
            Err(e) => {
                eprintln!("{}: {:?}", "Generation error".red(), e);
                true // Continue watching
            }
        })
        .map_err(|e| miette::miette!("Watch error: {}", e))?;

    Ok(())
}
