// The driver picks an evaluation strategy and an argument, evaluates the
// Fibonacci program and reports the single result.
//
// `baseline` is the native recursion with no nodes at all, the yardstick
// the node-based stages are timed against. `all` runs the baseline and then
// every stage, and fails unless they all agree.

pub mod logging;

use std::time::Instant;

use clap::{Parser, ValueEnum};
use sprig_base::{err, Result};
use sprig_eval::{fib, Config, Evaluator, Stage};
use sprig_lang::DEFAULT_STACK_CAPACITY;
use tracing::info;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "sprig",
    about = "Evaluate doubly-recursive fib(N) with a chosen node-fusion stage",
    version
)]
pub struct Cli {
    /// Evaluation strategy, or `all` to cross-check every one of them
    #[arg(long, short, value_enum, default_value_t = Mode::SimplifyCalls)]
    pub stage: Mode,
    /// Argument-stack capacity in frames; deeper recursion fails
    #[arg(long, env = "SPRIG_STACK_CAPACITY", default_value_t = DEFAULT_STACK_CAPACITY)]
    pub stack_capacity: usize,
    /// Log filter (trace|debug|info|warn|error or an EnvFilter directive).
    /// Falls back to RUST_LOG, then `warn`.
    #[arg(long)]
    pub log_level: Option<String>,
    /// Argument passed to fib
    #[arg(default_value_t = 42)]
    pub n: u32,
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Mode {
    Baseline,
    Simplest,
    ConstFusion,
    DirectFusion,
    SimplifyCalls,
    All,
}

impl Mode {
    fn stage(self) -> Option<Stage> {
        match self {
            Mode::Simplest => Some(Stage::Simplest),
            Mode::ConstFusion => Some(Stage::ConstFusion),
            Mode::DirectFusion => Some(Stage::DirectFusion),
            Mode::SimplifyCalls => Some(Stage::SimplifyCalls),
            Mode::Baseline | Mode::All => None,
        }
    }
}

pub fn run(cli: &Cli) -> Result<u32> {
    let config = Config::default().with_stack_capacity(cli.stack_capacity);
    match (cli.stage, cli.stage.stage()) {
        (_, Some(stage)) => eval_stage(stage, cli.n, config),
        (Mode::All, None) => check_all(cli.n, config),
        (_, None) => baseline(cli.n),
    }
}

fn timed(name: &str, f: impl FnOnce() -> Result<u32>) -> Result<u32> {
    let start = Instant::now();
    let result = f()?;
    let elapsed_ms = start.elapsed().as_millis() as u64;
    info!(target: "sprig", stage = name, result, elapsed_ms, "evaluated");
    Ok(result)
}

fn baseline(n: u32) -> Result<u32> {
    timed("baseline", || Ok(fib::reference(n)))
}

fn eval_stage(stage: Stage, n: u32, config: Config) -> Result<u32> {
    let (program, entry) = fib::program()?;
    let ev = Evaluator::new(stage, &program, entry, config)?;
    timed(stage.name(), || ev.eval(n))
}

fn check_all(n: u32, config: Config) -> Result<u32> {
    let expect = baseline(n)?;
    for stage in Stage::ALL {
        let got = eval_stage(stage, n, config)?;
        if got != expect {
            return Err(err(format!(
                "{} computed {} but baseline computed {}",
                stage, got, expect
            )));
        }
    }
    Ok(expect)
}
