//! Tally - terminal front end for the calculator engine
//!
//! Runs keystroke scripts given on the command line, or reads one script
//! per line from stdin when none are given. Display text goes to stdout;
//! logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use tally::{parse_sequence, Action, CalculatorEngine, State};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "tally")]
#[command(version, about = "Four-function running-total calculator", long_about = None)]
struct Cli {
    /// Keystroke scripts, e.g. "5+3+2=" or "12 CE 4 Enter"
    scripts: Vec<String>,

    /// Print the display after every key instead of once per script
    #[arg(short, long)]
    steps: bool,

    /// Print a JSON snapshot of the engine state instead of the bare display
    #[arg(long)]
    json: bool,

    /// Print the phase transition history to stderr on exit
    #[arg(long)]
    trace: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut engine = CalculatorEngine::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.scripts.is_empty() {
        run_interactive(&cli, &mut engine, io::stdin().lock(), &mut out)?;
    } else {
        for script in &cli.scripts {
            let actions = parse_sequence(script)
                .with_context(|| format!("invalid keystroke script '{script}'"))?;
            run_actions(&cli, &mut engine, &actions, &mut out)?;
        }
    }

    if cli.trace {
        print_trace(&engine)?;
    }

    Ok(())
}

/// Read scripts line by line until EOF or `:q`.
fn run_interactive(
    cli: &Cli,
    engine: &mut CalculatorEngine,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    info!("interactive mode, one keystroke script per line");
    render(cli, engine, None, out)?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let script = line.trim();
        if script == ":q" {
            break;
        }
        if script.is_empty() {
            // A bare Enter presses equals, as on the keyboard.
            Action::Equals.dispatch(engine);
            let shown = cli.steps.then_some(Action::Equals);
            render(cli, engine, shown, out)?;
            continue;
        }

        match parse_sequence(script) {
            Ok(actions) => run_actions(cli, engine, &actions, out)?,
            Err(err) => {
                warn!(script, error = %err, "ignoring script");
                eprintln!("tally: {err}");
            }
        }
    }

    Ok(())
}

fn run_actions(
    cli: &Cli,
    engine: &mut CalculatorEngine,
    actions: &[Action],
    out: &mut impl Write,
) -> Result<()> {
    for &action in actions {
        action.dispatch(engine);
        if cli.steps {
            render(cli, engine, Some(action), out)?;
        }
    }
    if !cli.steps {
        render(cli, engine, None, out)?;
    }
    Ok(())
}

fn render(
    cli: &Cli,
    engine: &CalculatorEngine,
    action: Option<Action>,
    out: &mut impl Write,
) -> Result<()> {
    if cli.json {
        let line = serde_json::to_string(engine.snapshot())
            .context("failed to serialize engine state")?;
        writeln!(out, "{line}")?;
    } else if let Some(action) = action {
        writeln!(out, "{action:>3}  {}", engine.display())?;
    } else {
        writeln!(out, "{}", engine.display())?;
    }
    out.flush()?;
    Ok(())
}

fn print_trace(engine: &CalculatorEngine) -> Result<()> {
    let stderr = io::stderr();
    let mut err = stderr.lock();
    for transition in engine.history().transitions() {
        writeln!(
            err,
            "{} {} -> {} ({})",
            transition.timestamp.format("%H:%M:%S%.3f"),
            transition.from.name(),
            transition.to.name(),
            transition.operation
        )?;
    }
    if let Some(elapsed) = engine.history().duration() {
        writeln!(err, "elapsed {:.3}s", elapsed.as_secs_f64())?;
    }
    Ok(())
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("tally=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tally=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
