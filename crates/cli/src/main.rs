use anyhow::Context;
use clap::Parser;
use pontifex_core::{
    run, KeyFormat, KeyMaterial, Mode, RngState, RunConfig, RunError,
};
use pontifex_data::{
    clean_text, load_input, prepare_key, write_json, write_summary, RunReport,
    DEFAULT_OUTPUT_FILE,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Exit status for a broken deck invariant, as opposed to bad input.
const EXIT_INTERNAL: u8 = 70;

#[derive(Parser, Debug)]
#[command(name = "pontifex")]
#[command(about = "Encrypt or decrypt text with the Solitaire card cipher")]
struct Args {
    /// Input file: text on the first line, optional key or deck on the second
    input: PathBuf,

    /// Decrypt instead of encrypt
    #[arg(short, long)]
    decrypt: bool,

    /// Read the key line as an alphabetic key instead of a deck
    #[arg(short = 'k', long)]
    alpha_key: bool,

    /// Summary file to write
    #[arg(short, long, env = "PONTIFEX_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Also write the summary as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Encrypt with a random deck if the key line cannot build one
    #[arg(long)]
    fallback_random: bool,

    /// Log filter, e.g. `info` or `pontifex_core=trace`
    #[arg(long, env = "PONTIFEX_LOG", default_value = "warn", value_parser = parse_log_filter)]
    log_level: String,
}

impl Args {
    fn config(&self) -> RunConfig {
        RunConfig {
            mode: if self.decrypt {
                Mode::Decrypt
            } else {
                Mode::Encrypt
            },
            key_format: if self.alpha_key {
                KeyFormat::Alphabetic
            } else {
                KeyFormat::Deck
            },
            fallback_to_random: self.fallback_random,
        }
    }
}

fn parse_log_filter(value: &str) -> Result<String, String> {
    EnvFilter::try_new(value)
        .map(|_| value.to_string())
        .map_err(|err| format!("invalid log filter: {err}"))
}

fn init_logging(filter: &str) {
    // Already checked by `parse_log_filter`.
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);
    match execute(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let internal = err
                .downcast_ref::<RunError>()
                .is_some_and(RunError::is_internal);
            if internal {
                eprintln!("internal error: {err:#}");
                ExitCode::from(EXIT_INTERNAL)
            } else {
                eprintln!("pontifex failed: {err:#}");
                ExitCode::FAILURE
            }
        }
    }
}

fn execute(args: &Args) -> anyhow::Result<String> {
    let config = args.config();
    let input = load_input(&args.input)?;
    let cleaned = clean_text(&input.text);
    debug!(raw = %input.text, %cleaned, "cleaned input");

    let key = prepare_key(input.key.as_deref(), config.key_format);
    if key.material == KeyMaterial::None && config.mode == Mode::Encrypt {
        info!("no key or deck supplied");
    }

    let mut rng = RngState::from_entropy();
    let outcome = run(&config, &cleaned, &key.material, &mut rng)?;

    let report = RunReport::new(&cleaned, key.cleaned.as_deref(), &outcome);
    write_summary(&args.output, &report)?;
    if let Some(path) = &args.json {
        write_json(path, &report).context("write json summary")?;
    }
    info!(output = %args.output.display(), "summary written");
    Ok(outcome.output)
}
