// Primitive node kinds. Every operator, leaf and control node is its own
// type and every child is reached through `Box<dyn Node>`.
//
// ConstNode and ArgNode additionally expose `compute`, a non-virtual entry
// point for callers that hold the concrete type (see the fused nodes in
// sprig-eval). `eval` is just `compute` behind the vtable.

use sprig_base::Result;

use crate::{Context, Module, Node};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConstNode {
    value: u32,
}

impl ConstNode {
    pub fn new(value: u32) -> Self {
        ConstNode { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    #[inline(always)]
    pub fn compute(&self, _ctx: &Context) -> u32 {
        self.value
    }
}

impl Node for ConstNode {
    fn eval(&self, _module: &Module, ctx: &mut Context) -> Result<u32> {
        Ok(self.compute(ctx))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ArgNode;

impl ArgNode {
    pub fn new() -> Self {
        ArgNode
    }

    #[inline(always)]
    pub fn compute(&self, ctx: &Context) -> u32 {
        ctx.arg()
    }
}

impl Node for ArgNode {
    fn eval(&self, _module: &Module, ctx: &mut Context) -> Result<u32> {
        Ok(self.compute(ctx))
    }
}

#[derive(Debug)]
pub struct AddNode {
    lhs: Box<dyn Node>,
    rhs: Box<dyn Node>,
}

impl AddNode {
    pub fn new(lhs: Box<dyn Node>, rhs: Box<dyn Node>) -> Self {
        AddNode { lhs, rhs }
    }
}

impl Node for AddNode {
    fn eval(&self, module: &Module, ctx: &mut Context) -> Result<u32> {
        let lhs = self.lhs.eval(module, ctx)?;
        let rhs = self.rhs.eval(module, ctx)?;
        Ok(lhs.wrapping_add(rhs))
    }
}

#[derive(Debug)]
pub struct SubNode {
    lhs: Box<dyn Node>,
    rhs: Box<dyn Node>,
}

impl SubNode {
    pub fn new(lhs: Box<dyn Node>, rhs: Box<dyn Node>) -> Self {
        SubNode { lhs, rhs }
    }
}

impl Node for SubNode {
    fn eval(&self, module: &Module, ctx: &mut Context) -> Result<u32> {
        let lhs = self.lhs.eval(module, ctx)?;
        let rhs = self.rhs.eval(module, ctx)?;
        Ok(lhs.wrapping_sub(rhs))
    }
}

#[derive(Debug)]
pub struct LessNode {
    lhs: Box<dyn Node>,
    rhs: Box<dyn Node>,
}

impl LessNode {
    pub fn new(lhs: Box<dyn Node>, rhs: Box<dyn Node>) -> Self {
        LessNode { lhs, rhs }
    }
}

impl Node for LessNode {
    fn eval(&self, module: &Module, ctx: &mut Context) -> Result<u32> {
        let lhs = self.lhs.eval(module, ctx)?;
        let rhs = self.rhs.eval(module, ctx)?;
        Ok((lhs < rhs) as u32)
    }
}

/// Statement-only conditional: runs `body` when `condition` is non-zero.
/// Its own value is always 0; any effect, including a return, comes from
/// the body.
#[derive(Debug)]
pub struct IfNode {
    condition: Box<dyn Node>,
    body: Box<dyn Node>,
}

impl IfNode {
    pub fn new(condition: Box<dyn Node>, body: Box<dyn Node>) -> Self {
        IfNode { condition, body }
    }
}

impl Node for IfNode {
    fn eval(&self, module: &Module, ctx: &mut Context) -> Result<u32> {
        if self.condition.eval(module, ctx)? != 0 {
            self.body.eval(module, ctx)?;
        }
        Ok(0)
    }
}

/// Evaluates exactly one branch and yields its value.
#[derive(Debug)]
pub struct IfElseNode {
    condition: Box<dyn Node>,
    if_body: Box<dyn Node>,
    else_body: Box<dyn Node>,
}

impl IfElseNode {
    pub fn new(condition: Box<dyn Node>, if_body: Box<dyn Node>, else_body: Box<dyn Node>) -> Self {
        IfElseNode {
            condition,
            if_body,
            else_body,
        }
    }
}

impl Node for IfElseNode {
    fn eval(&self, module: &Module, ctx: &mut Context) -> Result<u32> {
        if self.condition.eval(module, ctx)? != 0 {
            self.if_body.eval(module, ctx)
        } else {
            self.else_body.eval(module, ctx)
        }
    }

    fn always_returns(&self) -> bool {
        self.if_body.always_returns() && self.else_body.always_returns()
    }
}

#[derive(Debug)]
pub struct ReturnNode {
    rhs: Box<dyn Node>,
}

impl ReturnNode {
    pub fn new(rhs: Box<dyn Node>) -> Self {
        ReturnNode { rhs }
    }
}

impl Node for ReturnNode {
    fn eval(&self, module: &Module, ctx: &mut Context) -> Result<u32> {
        let value = self.rhs.eval(module, ctx)?;
        ctx.set_return(value);
        // The value travels in the context; this one is never used.
        Ok(0)
    }

    fn always_returns(&self) -> bool {
        true
    }
}
