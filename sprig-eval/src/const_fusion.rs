// Stage 2: a comparison or subtraction whose right operand is a constant
// embeds the constant instead of owning a ConstNode, saving one indirect
// call per evaluation.

use sprig_base::Result;
use sprig_lang::{Context, Expr, Module, Node};

use crate::lower::{Lowering, Rules};

#[derive(Debug)]
pub struct LessConstNode {
    lhs: Box<dyn Node>,
    constant: u32,
}

impl LessConstNode {
    pub fn new(lhs: Box<dyn Node>, constant: u32) -> Self {
        LessConstNode { lhs, constant }
    }
}

impl Node for LessConstNode {
    fn eval(&self, module: &Module, ctx: &mut Context) -> Result<u32> {
        Ok((self.lhs.eval(module, ctx)? < self.constant) as u32)
    }
}

#[derive(Debug)]
pub struct SubConstNode {
    lhs: Box<dyn Node>,
    constant: u32,
}

impl SubConstNode {
    pub fn new(lhs: Box<dyn Node>, constant: u32) -> Self {
        SubConstNode { lhs, constant }
    }
}

impl Node for SubConstNode {
    fn eval(&self, module: &Module, ctx: &mut Context) -> Result<u32> {
        Ok(self.lhs.eval(module, ctx)?.wrapping_sub(self.constant))
    }
}

pub(crate) fn fuse_const(expr: &Expr, lw: &Lowering<'_>) -> Result<Option<Box<dyn Node>>> {
    match expr {
        Expr::Less(lhs, rhs) => {
            if let Expr::Const(c) = **rhs {
                return Ok(Some(Box::new(LessConstNode::new(lw.lower(lhs)?, c))));
            }
        }
        Expr::Sub(lhs, rhs) => {
            if let Expr::Const(c) = **rhs {
                return Ok(Some(Box::new(SubConstNode::new(lw.lower(lhs)?, c))));
            }
        }
        _ => (),
    }
    Ok(None)
}

pub(crate) struct ConstFusion;

impl Rules for ConstFusion {
    fn fuse(&self, expr: &Expr, lw: &Lowering<'_>) -> Result<Option<Box<dyn Node>>> {
        fuse_const(expr, lw)
    }
}
