// Stage 4: when a function body is really one tail expression, drop the
// statement list and the return signal round trip. The common base-case
// shape
//
//     if (cond) return a;
//     return b;
//
// becomes `IfElse(cond, a, b)`, which is registered as a bare node body,
// and calls to it go through CallAnyNode: push, evaluate the body once,
// pop. Bodies that are not of that shape keep their statement list and
// are called through CallNode as before.
//
// Expression fusion is the same as stage 3.

use sprig_base::Result;
use sprig_lang::{Context, Expr, Module, Node, NodeId};

use crate::direct::fuse_direct;
use crate::lower::{Lowering, Rules};

#[derive(Debug)]
pub struct CallAnyNode {
    callee: NodeId,
    arg: Box<dyn Node>,
}

impl CallAnyNode {
    pub fn new(callee: NodeId, arg: Box<dyn Node>) -> Self {
        CallAnyNode { callee, arg }
    }
}

impl Node for CallAnyNode {
    fn eval(&self, module: &Module, ctx: &mut Context) -> Result<u32> {
        let arg = self.arg.eval(module, ctx)?;
        let callee = module.node(self.callee);
        ctx.invoke(arg, |ctx| callee.eval(module, ctx))
    }
}

// The body as a single value expression, if every statement up to the
// first unconditional return is `if (c) return a;` and nothing inside the
// conditions or returned values is itself a statement.
fn tail(body: &[Expr]) -> Option<Expr> {
    match body {
        [Expr::Return(value), ..] if value.is_value() => Some((**value).clone()),
        [Expr::If(condition, then), rest @ ..] if condition.is_value() => match &**then {
            Expr::Return(value) if value.is_value() => Some(Expr::if_else(
                (**condition).clone(),
                (**value).clone(),
                tail(rest)?,
            )),
            _ => None,
        },
        _ => None,
    }
}

pub(crate) struct SimplifyCalls;

impl Rules for SimplifyCalls {
    fn fuse(&self, expr: &Expr, lw: &Lowering<'_>) -> Result<Option<Box<dyn Node>>> {
        fuse_direct(expr, lw)
    }

    fn tail(&self, body: &[Expr]) -> Option<Expr> {
        tail(body)
    }
}
