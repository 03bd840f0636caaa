// Lowering turns a Program into a Module of nodes. The walk is the same for
// every strategy; a strategy only contributes Rules:
//
//  - `fuse` gets the first look at every expression and may claim it by
//    returning a specialized node (building its children through the
//    Lowering it is handed).
//  - `tail` may turn a whole statement-list body into one expression, in
//    which case the function becomes a bare node body and calls to it
//    become CallAnyNode instead of CallNode.
//
// Expressions nobody claims become the primitive nodes from sprig-lang.

use std::cell::Cell;

use sprig_base::{Error, ErrorKind, Result};
use sprig_lang::{
    AddNode, ArgNode, CallNode, Callee, ConstNode, Expr, FnRef, FuncId, IfElseNode, IfNode,
    LessNode, Module, ModuleBuilder, Node, NodeId, Program, ReturnNode, SubNode,
};
use tracing::debug;

use crate::simplify::CallAnyNode;

pub(crate) trait Rules {
    fn fuse(&self, _expr: &Expr, _lw: &Lowering<'_>) -> Result<Option<Box<dyn Node>>> {
        Ok(None)
    }

    fn tail(&self, _body: &[Expr]) -> Option<Expr> {
        None
    }
}

pub(crate) struct Lowering<'a> {
    rules: &'a dyn Rules,
    callees: Vec<Callee>,
    fused: Cell<usize>,
}

impl<'a> Lowering<'a> {
    fn callee(&self, f: FnRef) -> Result<Callee> {
        callee_of(&self.callees, f)
    }

    pub(crate) fn lower(&self, expr: &Expr) -> Result<Box<dyn Node>> {
        let rules = self.rules;
        if let Some(node) = rules.fuse(expr, self)? {
            self.fused.set(self.fused.get() + 1);
            return Ok(node);
        }
        let node: Box<dyn Node> = match expr {
            Expr::Const(value) => Box::new(ConstNode::new(*value)),
            Expr::Arg => Box::new(ArgNode::new()),
            Expr::Add(lhs, rhs) => Box::new(AddNode::new(self.lower(lhs)?, self.lower(rhs)?)),
            Expr::Sub(lhs, rhs) => Box::new(SubNode::new(self.lower(lhs)?, self.lower(rhs)?)),
            Expr::Less(lhs, rhs) => Box::new(LessNode::new(self.lower(lhs)?, self.lower(rhs)?)),
            Expr::If(condition, body) => {
                Box::new(IfNode::new(self.lower(condition)?, self.lower(body)?))
            }
            Expr::IfElse(condition, if_body, else_body) => Box::new(IfElseNode::new(
                self.lower(condition)?,
                self.lower(if_body)?,
                self.lower(else_body)?,
            )),
            Expr::Return(rhs) => Box::new(ReturnNode::new(self.lower(rhs)?)),
            Expr::Call(f, arg) => match self.callee(*f)? {
                Callee::Function(id) => Box::new(CallNode::new(id, self.lower(arg)?)),
                Callee::Node(id) => Box::new(CallAnyNode::new(id, self.lower(arg)?)),
            },
        };
        Ok(node)
    }
}

fn callee_of(callees: &[Callee], f: FnRef) -> Result<Callee> {
    callees
        .get(f.index())
        .copied()
        .ok_or_else(|| Error::from_kind(ErrorKind::UnknownHandle { index: f.index() }))
}

enum Shape {
    Stmts(FuncId),
    Tail(NodeId, Expr),
}

/// A Program lowered by one strategy.
#[derive(Debug)]
pub struct Lowered {
    module: Module,
    callees: Vec<Callee>,
    fused: usize,
    tails: usize,
}

impl Lowered {
    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Where a call to the program function `f` lands in the module.
    pub fn callee(&self, f: FnRef) -> Result<Callee> {
        callee_of(&self.callees, f)
    }

    /// Number of expressions a fusion rule replaced.
    pub fn fused(&self) -> usize {
        self.fused
    }

    /// Number of functions collapsed to a single expression body.
    pub fn tails(&self) -> usize {
        self.tails
    }
}

pub(crate) fn lower_with(name: &str, rules: &dyn Rules, program: &Program) -> Result<Lowered> {
    let mut mb = ModuleBuilder::new();
    let mut shapes = Vec::with_capacity(program.len());
    for (_, def) in program.functions() {
        let shape = match rules.tail(def.body()?) {
            Some(tail) => Shape::Tail(mb.declare_node(def.name()), tail),
            None => Shape::Stmts(mb.declare_function(def.name())),
        };
        shapes.push(shape);
    }

    let callees = shapes
        .iter()
        .map(|shape| match shape {
            Shape::Stmts(id) => Callee::Function(*id),
            Shape::Tail(id, _) => Callee::Node(*id),
        })
        .collect();
    let lw = Lowering {
        rules,
        callees,
        fused: Cell::new(0),
    };

    let mut tails = 0;
    for ((_, def), shape) in program.functions().zip(shapes.iter()) {
        match shape {
            Shape::Stmts(id) => {
                let body = def
                    .body()?
                    .iter()
                    .map(|stmt| lw.lower(stmt))
                    .collect::<Result<Vec<_>>>()?;
                mb.define_function(*id, body)?;
            }
            Shape::Tail(id, tail) => {
                mb.define_node(*id, lw.lower(tail)?)?;
                tails += 1;
            }
        }
    }

    let fused = lw.fused.get();
    debug!(target: "sprig", stage = name, fused, tails, "lowered program");
    Ok(Lowered {
        module: mb.build()?,
        callees: lw.callees,
        fused,
        tails,
    })
}
