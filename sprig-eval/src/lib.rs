// Eval holds the evaluation strategies. Each is a different way of lowering
// the same Program into nodes, trading generality for fewer indirect calls
// on the hot path:
//
//  1. simplest       one boxed node per operator, operand and statement.
//  2. const_fusion   `x < c` and `x - c` embed the constant.
//  3. direct         `arg < c` and `arg - c` hold concrete leaves and call
//                    their non-virtual `compute`.
//  4. simplify       single-expression bodies replace statement lists and
//                    the return signal; calls go straight to the body node.
//
// All four produce bit-identical results for every program Program::define
// accepts; they differ only in node granularity and dispatch cost.

use std::fmt;

use sprig_base::Result;
use sprig_lang::{Callee, Context, FnRef, Module, Program, DEFAULT_STACK_CAPACITY};
use tracing::{debug, debug_span};

mod const_fusion;
mod direct;
pub mod fib;
mod lower;
mod simplest;
mod simplify;

#[cfg(test)]
mod test;

pub use const_fusion::{LessConstNode, SubConstNode};
pub use direct::{LessArgConstNode, SubArgConstNode};
pub use lower::Lowered;
pub use simplify::CallAnyNode;

use lower::{lower_with, Rules};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Stage {
    Simplest,
    ConstFusion,
    DirectFusion,
    SimplifyCalls,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Simplest,
        Stage::ConstFusion,
        Stage::DirectFusion,
        Stage::SimplifyCalls,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Simplest => "simplest",
            Stage::ConstFusion => "const-fusion",
            Stage::DirectFusion => "direct-fusion",
            Stage::SimplifyCalls => "simplify-calls",
        }
    }

    fn rules(self) -> &'static dyn Rules {
        match self {
            Stage::Simplest => &simplest::Simplest,
            Stage::ConstFusion => &const_fusion::ConstFusion,
            Stage::DirectFusion => &direct::DirectFusion,
            Stage::SimplifyCalls => &simplify::SimplifyCalls,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn lower(stage: Stage, program: &Program) -> Result<Lowered> {
    lower_with(stage.name(), stage.rules(), program)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    // Frames available to one evaluation; recursion deeper than this fails
    // with StackOverflow.
    pub stack_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stack_capacity: DEFAULT_STACK_CAPACITY,
        }
    }
}

impl Config {
    pub fn with_stack_capacity(mut self, stack_capacity: usize) -> Self {
        self.stack_capacity = stack_capacity;
        self
    }
}

/// One program lowered by one stage, ready to be called repeatedly.
#[derive(Debug)]
pub struct Evaluator {
    stage: Stage,
    lowered: Lowered,
    entry: Callee,
    config: Config,
}

impl Evaluator {
    pub fn new(stage: Stage, program: &Program, entry: FnRef, config: Config) -> Result<Self> {
        let lowered = lower(stage, program)?;
        let entry = lowered.callee(entry)?;
        debug!(target: "sprig", %stage, ?entry, "evaluator ready");
        Ok(Evaluator {
            stage,
            lowered,
            entry,
            config,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn module(&self) -> &Module {
        self.lowered.module()
    }

    pub fn lowered(&self) -> &Lowered {
        &self.lowered
    }

    /// Calls the entry function with `arg` against a fresh Context.
    pub fn eval(&self, arg: u32) -> Result<u32> {
        let mut ctx = Context::with_capacity(self.config.stack_capacity);
        self.eval_in(arg, &mut ctx)
    }

    /// Like `eval`, against a caller-supplied Context that must be fresh.
    pub fn eval_in(&self, arg: u32, ctx: &mut Context) -> Result<u32> {
        let _span = debug_span!(target: "sprig", "eval", stage = self.stage.name(), arg).entered();
        self.lowered.module().evaluate(self.entry, arg, ctx)
    }
}
