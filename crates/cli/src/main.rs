#![deny(unsafe_code)]
//! `brushgen`: writes a procedurally generated brush texture to `Brush.png`
//! in the current directory.
//!
//! Output differs on every run unless `--seed` is given.

mod error;

use brushgen_brush::{generate, snapshot, BrushParams};
use brushgen_core::prng::entropy_seed;
use clap::Parser;
use error::CliError;
use std::io::Write;
use std::path::Path;
use std::process;

/// Output file, relative to the working directory.
const OUTPUT_PATH: &str = "Brush.png";

#[derive(Parser)]
#[command(
    name = "brushgen",
    about = "Generate a grayscale ellipse brush texture as Brush.png"
)]
struct Cli {
    /// PRNG seed for reproducible output. Defaults to a clock-derived seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Report as JSON instead of human-readable text.
    #[arg(long)]
    json: bool,
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let params = BrushParams::default();
    let seed = cli.seed.unwrap_or_else(entropy_seed);
    let output = Path::new(OUTPUT_PATH);

    let canvas = generate(&params, Some(seed))?;
    snapshot::write_png(&canvas, output)?;

    if cli.json {
        let info = serde_json::json!({
            "output": output.display().to_string(),
            "seed": seed,
            "width": canvas.width(),
            "height": canvas.height(),
            "stamps": params.stamps,
            "params": serde_json::to_value(&params)?,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        log::info!(
            "wrote {} ({}x{}, {} stamps, seed {seed})",
            output.display(),
            canvas.width(),
            canvas.height(),
            params.stamps
        );
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{style}{}{style:#} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Diagnostic printed to stderr on failure. Bypasses the logger so that
/// `RUST_LOG=off` cannot hide it.
fn failure_message(e: &CliError, json: bool) -> String {
    if json {
        let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
        serde_json::to_string_pretty(&j).unwrap_or_default()
    } else {
        format!("error: {e}")
    }
}

fn main() {
    init_logger();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("{}", failure_message(&e, cli.json));
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn seed_is_optional() {
        let cli = Cli::try_parse_from(["brushgen"]).unwrap();
        assert_eq!(cli.seed, None);
        assert!(!cli.json);
    }

    #[test]
    fn seed_and_json_flags_parse() {
        let cli = Cli::try_parse_from(["brushgen", "--seed", "42", "--json"]).unwrap();
        assert_eq!(cli.seed, Some(42));
        assert!(cli.json);
    }

    #[test]
    fn failure_message_is_plain_text_without_json() {
        let e = CliError::Write("Brush.png: permission denied".into());
        assert_eq!(
            failure_message(&e, false),
            "error: cannot write brush texture: Brush.png: permission denied"
        );
    }

    #[test]
    fn failure_message_carries_exit_code_in_json_mode() {
        let e = CliError::Write("disk full".into());
        let v: serde_json::Value = serde_json::from_str(&failure_message(&e, true)).unwrap();
        assert_eq!(v["exit_code"], 11);
        assert!(v["error"].as_str().unwrap().contains("disk full"));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["brushgen", "--output", "x.png"]).is_err());
        assert!(Cli::try_parse_from(["brushgen", "--seed", "-1"]).is_err());
    }
}
