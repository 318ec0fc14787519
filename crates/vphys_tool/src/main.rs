// Convert a Source 2 physics file (.vphys) into a flat triangle dump (.tri).
// Run with: cargo run --release -- <path_to.vphys> [-o out.tri] [--config options.json] [--report] [--force]

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use vphys_core::{convert_file, output_path, ConvertOptions};

const USAGE: &str = "Usage: vphys2tri <input.vphys> [-o <output.tri>] [--config <options.json>] [--report] [--force]";

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    report: bool,
    force: bool,
}

impl Args {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = Args::default();
        let mut input = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-o" | "--output" => {
                    let value = args.next().context("-o requires a path")?;
                    parsed.output = Some(PathBuf::from(value));
                }
                "--config" => {
                    let value = args.next().context("--config requires a path")?;
                    parsed.config = Some(PathBuf::from(value));
                }
                "--report" => parsed.report = true,
                "--force" => parsed.force = true,
                flag if flag.starts_with('-') => bail!("Unknown option: {}\n{}", flag, USAGE),
                _ if input.is_some() => bail!("Unexpected argument: {}\n{}", arg, USAGE),
                _ => input = Some(PathBuf::from(&arg)),
            }
        }

        parsed.input = input.context(USAGE)?;
        Ok(parsed)
    }
}

fn has_vphys_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("vphys"))
}

fn run(args: Args) -> Result<()> {
    if !args.input.is_file() {
        bail!("Input file not found: {}", args.input.display());
    }
    if !args.force && !has_vphys_extension(&args.input) {
        bail!(
            "Expected a .vphys file, got {} (use --force to convert anyway)",
            args.input.display()
        );
    }

    let options = match &args.config {
        Some(path) => ConvertOptions::load(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => ConvertOptions::default(),
    };

    let output = args.output.clone().unwrap_or_else(|| output_path(&args.input));
    let report = convert_file(&args.input, &output, &options)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    for skipped in &report.skipped {
        log::warn!(
            "Skipped {:?} {} in part {}: {}",
            skipped.kind,
            skipped.index,
            skipped.part,
            skipped.reason
        );
    }

    if args.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    log::info!(
        "Processed {} -> {} ({} triangles)",
        args.input.display(),
        output.display(),
        report.triangles
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse(env::args().skip(1))?;
    run(args)
}
