use std::{fs, num::NonZeroUsize};

use clap::Parser;
use matcalc::{
    interpreter::{
        evaluator::{core::EvalConfig, report::ConsoleReporter},
        value::{core::Value, matrix::DEFAULT_TILE_SIZE},
    },
    run_source,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// matcalc runs programs written in a small language for scalar and matrix
/// arithmetic.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells matcalc to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Multiplies matrices with the cache-blocked kernel.
    #[arg(short, long)]
    blocked: bool,

    /// Edge length of the tiles used by `--blocked`.
    #[arg(short, long, default_value_t = NonZeroUsize::new(DEFAULT_TILE_SIZE).unwrap_or(NonZeroUsize::MIN))]
    tile_size: NonZeroUsize,

    /// Skips the dump of all variables after the run.
    #[arg(long)]
    no_state: bool,

    contents: String,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr))
                                  .with(filter)
                                  .init();

    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let config = EvalConfig::new(args.blocked, args.tile_size);
    let context = match run_source(&script, config, &mut ConsoleReporter) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    };

    if !args.no_state {
        println!("Final variable state:");
        for (name, value) in context.environment().sorted() {
            match value {
                Value::Scalar(s) => println!("{name} = {s} (scalar {})", s.element_type()),
                Value::Matrix(m) => {
                    println!("{name} = Matrix {}x{} of {}", m.rows(), m.columns(), m.element_type());
                    println!("{m}");
                },
            }
        }
    }
}
