use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use serde_json::json;

use crate::error::Result;
use crate::replay::replay;
use crate::script::{GestureScript, ScriptFormat};

#[derive(Debug, Parser)]
#[command(
    name = "mslider-harness",
    about = "Replay a gesture script against a range slider and print its notifications",
    version
)]
pub struct Cli {
    /// Script file (JSON or TOML).
    pub script: PathBuf,

    /// Script encoding; inferred from the extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<ScriptFormat>,

    /// Also print the final render state.
    #[arg(long)]
    pub render: bool,

    /// Print one summary line per script step instead of per notification.
    #[arg(long)]
    pub steps: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

/// Replay `cli.script` and write JSON lines to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let script = GestureScript::load(&cli.script, cli.format)?;
    tracing::info!(
        script = %cli.script.display(),
        events = script.events.len(),
        "replaying gesture script"
    );
    let replay = replay(&script)?;

    if cli.steps {
        for step in &replay.steps {
            writeln!(out, "{}", serde_json::to_string(step)?)?;
        }
    } else {
        for line in &replay.lines {
            writeln!(out, "{}", serde_json::to_string(line)?)?;
        }
    }
    let summary = json!({
        "values": replay.values,
        "positions": replay.positions,
    });
    writeln!(out, "{summary}")?;
    if cli.render {
        writeln!(out, "{}", json!({ "render": replay.render }))?;
    }
    Ok(())
}
