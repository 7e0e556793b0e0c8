//! xmlquery - select nodes from XML on stdin using XPath
//!
//! This is the CLI entry point: it validates flags, resolves the color
//! policy and hands stdin/stdout to the core pipeline.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use xmlquery_core::{pipeline, resolve_color, stdout_is_terminal, CommandLineError, Invocation};

use cli::{normalize_args, Args};

/// Exit status for errors other than command-line mistakes
const EXIT_INTERNAL_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse_from(normalize_args(std::env::args_os()));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(cmd_error) = e.downcast_ref::<CommandLineError>() {
                eprintln!("{}", cmd_error);
                eprintln!();
                print_usage();
                return ExitCode::FAILURE;
            }

            eprintln!("error: {}", e);
            ExitCode::from(EXIT_INTERNAL_ERROR)
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let options = match args.into_flags().validate()? {
        Invocation::Help => {
            print_usage();
            return Ok(());
        }
        Invocation::Query(options) => options,
    };

    let use_color = resolve_color(stdout_is_terminal(), options.color, options.no_color);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let summary = pipeline::run(stdin.lock(), &mut out, &options, use_color)?;

    if options.verbose {
        eprintln!("xmlquery: wrote {} match(es)", summary.matches);
    }

    Ok(())
}

/// Usage text goes to stderr, for help requests as well as errors
fn print_usage() {
    let mut stderr = io::stderr();
    Args::command().write_help(&mut stderr).ok();
    stderr.flush().ok();
}
