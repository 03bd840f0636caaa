// Stage 3: `Arg < const` and `Arg - const` become nodes that hold their
// ArgNode and ConstNode by value. Since the concrete types are known here,
// the fused node calls their `compute` directly (inlined, no vtable) and
// only the fused node itself is reached through `Node::eval`.
//
// Shapes that don't match fall back to the stage 2 rules.

use sprig_base::Result;
use sprig_lang::{ArgNode, ConstNode, Context, Expr, Module, Node};

use crate::const_fusion::fuse_const;
use crate::lower::{Lowering, Rules};

#[derive(Debug)]
pub struct LessArgConstNode {
    lhs: ArgNode,
    rhs: ConstNode,
}

impl LessArgConstNode {
    pub fn new(lhs: ArgNode, rhs: ConstNode) -> Self {
        LessArgConstNode { lhs, rhs }
    }

    #[inline(always)]
    pub fn compute(&self, ctx: &Context) -> u32 {
        (self.lhs.compute(ctx) < self.rhs.compute(ctx)) as u32
    }
}

impl Node for LessArgConstNode {
    fn eval(&self, _module: &Module, ctx: &mut Context) -> Result<u32> {
        Ok(self.compute(ctx))
    }
}

#[derive(Debug)]
pub struct SubArgConstNode {
    lhs: ArgNode,
    rhs: ConstNode,
}

impl SubArgConstNode {
    pub fn new(lhs: ArgNode, rhs: ConstNode) -> Self {
        SubArgConstNode { lhs, rhs }
    }

    #[inline(always)]
    pub fn compute(&self, ctx: &Context) -> u32 {
        self.lhs.compute(ctx).wrapping_sub(self.rhs.compute(ctx))
    }
}

impl Node for SubArgConstNode {
    fn eval(&self, _module: &Module, ctx: &mut Context) -> Result<u32> {
        Ok(self.compute(ctx))
    }
}

pub(crate) fn fuse_direct(expr: &Expr, lw: &Lowering<'_>) -> Result<Option<Box<dyn Node>>> {
    match expr {
        Expr::Less(lhs, rhs) => {
            if let (Expr::Arg, Expr::Const(c)) = (&**lhs, &**rhs) {
                let node = LessArgConstNode::new(ArgNode::new(), ConstNode::new(*c));
                return Ok(Some(Box::new(node)));
            }
        }
        Expr::Sub(lhs, rhs) => {
            if let (Expr::Arg, Expr::Const(c)) = (&**lhs, &**rhs) {
                let node = SubArgConstNode::new(ArgNode::new(), ConstNode::new(*c));
                return Ok(Some(Box::new(node)));
            }
        }
        _ => (),
    }
    fuse_const(expr, lw)
}

pub(crate) struct DirectFusion;

impl Rules for DirectFusion {
    fn fuse(&self, expr: &Expr, lw: &Lowering<'_>) -> Result<Option<Box<dyn Node>>> {
        fuse_direct(expr, lw)
    }
}
