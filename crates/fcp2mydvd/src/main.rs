//! fcp2mydvd binary entry point.
//!
//! Exit codes: 0 success, 1 usage error, 2 conversion error, 3 configuration error.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;

use fcp2mydvd_core::config::{ConfigManager, Settings};
use fcp2mydvd_core::fcp::list_projects;
use fcp2mydvd_core::logging::{init_tracing, LogLevel};
use fcp2mydvd_core::xml::Document;
use fcp2mydvd_core::{convert, prepare, Conversion, ConvertOptions, ConvertRequest};

const EXIT_USAGE: u8 = 1;
const EXIT_CONVERSION: u8 = 2;
const EXIT_CONFIG: u8 = 3;

/// Converts Final Cut Pro chapter markers to Toast MyDVD.
#[derive(Parser, Debug)]
#[command(name = "fcp2mydvd", version, about)]
struct Cli {
    /// The input Final Cut Pro XML file
    #[arg(short = 'i', long = "in", value_name = "FILE")]
    input: PathBuf,

    /// The Toast MyDVD project to take the menus and thumbnail from
    #[arg(short = 'm', long = "mydvd", value_name = "FILE", required_unless_present = "list")]
    mydvd: Option<PathBuf>,

    /// The event name in the Final Cut Pro library
    #[arg(short = 'e', long = "event", value_name = "NAME", required_unless_present = "list")]
    event: Option<String>,

    /// The project name under the event in the Final Cut Pro library
    #[arg(short = 'p', long = "project", value_name = "NAME", required_unless_present = "list")]
    project: Option<String>,

    /// The output Toast MyDVD file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "FILE",
        required_unless_present_any = ["list", "dry_run"]
    )]
    out: Option<PathBuf>,

    /// Show details
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Read settings from a TOML file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the chapters that would be written without writing them
    #[arg(long)]
    dry_run: bool,

    /// List the event/project pairs in the Final Cut Pro library and exit
    #[arg(long, conflicts_with_all = ["mydvd", "out", "dry_run"])]
    list: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_USAGE),
            };
        }
    };

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let mut level = settings.logging.level;
    if cli.verbose && level > LogLevel::Info {
        level = LogLevel::Info;
    }
    init_tracing(level);

    let options = ConvertOptions::from_settings(&settings).with_verbose(cli.verbose);
    match run(&cli, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::from(EXIT_CONVERSION)
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let mut manager = ConfigManager::new(path);
    manager
        .load()
        .with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(manager.settings().clone())
}

fn run(cli: &Cli, options: &ConvertOptions) -> Result<()> {
    tracing::debug!("fcp2mydvd {}", fcp2mydvd_core::version());

    if cli.list {
        let doc = Document::open(&cli.input)?;
        for entry in list_projects(&doc.root)? {
            println!("{}", entry);
        }
        return Ok(());
    }

    // clap guarantees these when --list is absent
    let (Some(mydvd), Some(event), Some(project)) = (&cli.mydvd, &cli.event, &cli.project) else {
        anyhow::bail!("Missing required arguments");
    };

    let request = ConvertRequest {
        fcp_path: cli.input.clone(),
        mydvd_path: mydvd.clone(),
        event: event.clone(),
        project: project.clone(),
        destination: cli.out.clone().unwrap_or_default(),
    };

    if cli.dry_run {
        let conversion = prepare(&request, options)
            .with_context(|| format!("Converting {}/{}", event, project))?;
        print_chapters(&conversion);
        return Ok(());
    }

    let conversion = convert(&request, options)
        .with_context(|| format!("Converting {}/{}", event, project))?;
    println!(
        "Wrote {} chapters to {}",
        conversion.chapters.len(),
        request.destination.display()
    );
    Ok(())
}

fn print_chapters(conversion: &Conversion) {
    println!(
        "{}/{} ({}, time base {})",
        conversion.project.event,
        conversion.project.name,
        conversion.project.tc_format,
        conversion.project.time_base
    );
    for chapter in &conversion.chapters {
        println!(
            "{:>3}  {:<14}  {:>10}/{:<8}  {}",
            chapter.label,
            chapter.edit_name,
            chapter.time_value,
            chapter.time_scale,
            chapter.marker_name
        );
    }
}
