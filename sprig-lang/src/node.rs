use std::fmt::Debug;

use sprig_base::Result;

use crate::{Context, Module};

/// The evaluation unit. Every expression and statement kind, fused or not,
/// is a Node; a generic holder only ever sees `Box<dyn Node>` and pays one
/// indirect call per `eval`.
///
/// `module` resolves the function and body handles held by call nodes. It
/// is immutable for the whole evaluation; all mutation goes through `ctx`.
pub trait Node: Debug {
    fn eval(&self, module: &Module, ctx: &mut Context) -> Result<u32>;

    // Whether evaluating this node as a statement is guaranteed to set the
    // return signal. Conservative: false unless a kind can prove it.
    fn always_returns(&self) -> bool {
        false
    }
}
