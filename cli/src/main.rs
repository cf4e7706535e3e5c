use {
    clap::{ArgAction, Parser},
    customers::{FakeProvider, OUTPUT_FILE, RECORD_COUNT},
    indicatif::ProgressBar,
    rand::rngs::ThreadRng,
    std::process::ExitCode,
    tracing_subscriber::EnvFilter,
};

/// Writes mock customer records to mock_customer.csv.
///
/// The record count and output path are fixed. These flags only change log
/// verbosity and the progress bar, and `RUST_LOG` only changes log filtering.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[arg(short, long, action = ArgAction::Count, help = "More log output (-v, -vv, -vvv)")]
    verbose: u8,

    #[arg(short, long, help = "Hide the progress bar")]
    quiet: bool,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(RECORD_COUNT)
    };

    let result = customers::generate_file(
        OUTPUT_FILE,
        RECORD_COUNT,
        FakeProvider::<ThreadRng>::default(),
        || pb.inc(1),
    );
    pb.finish_and_clear();

    match result {
        Ok(summary) => {
            println!("Mock data successfully written to {}", summary.path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
