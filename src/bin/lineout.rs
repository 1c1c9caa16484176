use std::error::Error;
use std::io::{self, BufRead};

use lineout::cli::{LinesArgs, OutputFile, Separator};
use lineout::{Console, ConsoleTaskRunner, LineOptions, OptionsFile};
use sarge::prelude::*;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  lineout [--sep <separator>] [--output-file <path>]");
    eprintln!("          [--lines-sep <separator>] [--lines-output-file <path>]");
    eprintln!("          [--config <options file>]");
    eprintln!();
    eprintln!("Reads records from stdin, one per line, and writes each followed by the separator.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --sep                String written after every record (default: \\n)");
    eprintln!("  --output-file        Write to this file instead of stdout");
    eprintln!("  --lines-sep          Shared default for --sep");
    eprintln!("  --lines-output-file  Shared default for --output-file");
    eprintln!("  --config             Options file (.json, .yaml, .toml) with `lines` and `task` sections");
    eprintln!();
    eprintln!("--sep/--output-file win over the shared options only when one of them is given.");
}

fn scope_or_file(args: LinesArgs, from_file: Option<LineOptions>) -> LineOptions {
    match from_file {
        Some(options) if args.is_empty() => options,
        _ => args.into_options(),
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut reader = ArgumentReader::new();

    let help_ref = reader.add::<bool>(tag::both('h', "help"));
    let sep_ref = reader.add::<Separator>(tag::long("sep"));
    let out_ref = reader.add::<OutputFile>(tag::long("output-file"));
    let lines_sep_ref = reader.add::<Separator>(tag::long("lines-sep"));
    let lines_out_ref = reader.add::<OutputFile>(tag::long("lines-output-file"));
    let config_ref = reader.add::<String>(tag::long("config"));

    let args = reader.parse()?;

    if let Some(Ok(true)) = help_ref.get(&args) {
        print_usage();
        return Ok(());
    }

    let file = match config_ref.get(&args) {
        Some(Ok(path)) => Some(OptionsFile::load(path)?),
        _ => None,
    };

    let local = LinesArgs::new()
        .with_sep(sep_ref.get(&args).and_then(Result::ok))
        .with_output_file(out_ref.get(&args).transpose()?);
    let shared = LinesArgs::new()
        .with_sep(lines_sep_ref.get(&args).and_then(Result::ok))
        .with_output_file(lines_out_ref.get(&args).transpose()?);

    let shared = scope_or_file(shared, file.as_ref().map(OptionsFile::shared));
    let local = scope_or_file(local, file.as_ref().map(OptionsFile::local));

    let runner = ConsoleTaskRunner::new(&shared, &local);
    let mut console = Console::new();
    let records = io::stdin().lock().lines();
    lineout::try_execute(runner.config(), &mut console, Some(records))?;

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("lineout error: {e}");
        std::process::exit(1);
    }
}
