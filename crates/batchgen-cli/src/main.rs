use batchgen_build::{
    FsLister, GeneratorConfig, LogNotifier, Notice, Notifier, Pipeline, ScanReport, Severity,
};
use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "batchgen")]
#[command(author, version, about = "Regenerate compile.bat from the sources in a project directory")]
struct Cli {
    /// Config file (default: ./batchgen.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Send notices to the log only
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the project and rewrite the build script (default)
    Generate {
        #[command(flatten)]
        overrides: Overrides,

        /// Print the script instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show discovered files, their includes and the inferred flags
    Scan {
        #[command(flatten)]
        overrides: Overrides,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Default)]
struct Overrides {
    /// Directory scanned for sources
    #[arg(long)]
    project_dir: Option<PathBuf>,

    /// Path of the generated script
    #[arg(long)]
    script: Option<PathBuf>,

    /// Entry file compiled first
    #[arg(long)]
    entry: Option<String>,
}

impl Overrides {
    fn apply(self, mut config: GeneratorConfig) -> Result<GeneratorConfig> {
        if let Some(dir) = self.project_dir {
            config = config.with_project_dir(dir);
        }
        if let Some(script) = self.script {
            config = config.with_script_path(script);
        }
        if let Some(entry) = self.entry {
            config = config.with_entry(entry);
        }
        config.validate().into_diagnostic()?;
        Ok(config)
    }
}

/// Prints notices to the terminal, or only logs them when quiet.
struct ConsoleNotifier {
    quiet: bool,
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        if self.quiet {
            return LogNotifier.notify(notice);
        }
        tracing::debug!(kind = ?notice.kind, "{}", notice.message);
        match notice.severity {
            Severity::Info => println!("{}", notice.title),
            Severity::Error => eprintln!("{}: {} {}", notice.severity, notice.title, notice.message),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_report(report: &ScanReport) {
    println!("{}:", report.project_dir.display());
    for file in &report.files {
        let includes: Vec<&str> = file.includes.iter().map(|i| i.as_str()).collect();
        if includes.is_empty() {
            println!("  {}", file.file);
        } else {
            println!("  {}: {}", file.file, includes.join(", "));
        }
    }
    for file in &report.unreadable {
        println!("  {} (unreadable)", file);
    }
    let flags: Vec<&str> = report.flags.iter().collect();
    println!("flags: {}", if flags.is_empty() { "(none)".to_string() } else { flags.join(" ") });
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let notifier = ConsoleNotifier { quiet: cli.quiet };
    let config = GeneratorConfig::load(cli.config.as_deref()).into_diagnostic()?;
    let command = cli.command.unwrap_or(Commands::Generate {
        overrides: Overrides::default(),
        dry_run: false,
    });

    match command {
        Commands::Generate { overrides, dry_run } => {
            let config = overrides.apply(config)?;
            let pipeline = Pipeline::new(&config, FsLister, &notifier);

            if dry_run {
                print!("{}", pipeline.render().script.as_str());
            } else if pipeline.run().is_err() {
                return Err(miette::miette!(
                    "{} was not updated",
                    config.script.path.display()
                ));
            }
        }

        Commands::Scan { overrides, json } => {
            let config = overrides.apply(config)?;
            let report = Pipeline::new(&config, FsLister, &notifier).report();

            if json {
                println!("{}", report.to_json().into_diagnostic()?);
            } else {
                print_report(&report);
            }
        }
    }

    Ok(())
}
