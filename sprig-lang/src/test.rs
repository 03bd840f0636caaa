use crate::{
    AddNode, ArgNode, CallNode, Callee, ConstNode, Context, FuncId, IfNode, LessNode, Module,
    ModuleBuilder, Node, ReturnNode, SubNode,
};
use sprig_base::Result;

mod call;
mod nodes;

pub(crate) fn node<N: Node + 'static>(n: N) -> Box<dyn Node> {
    Box::new(n)
}

// fib as a plain statement-list function, every node its own box.
pub(crate) fn fib_module() -> Result<(Module, FuncId)> {
    let mut mb = ModuleBuilder::new();
    let fib = mb.declare_function("fib");
    mb.define_function(
        fib,
        vec![
            node(IfNode::new(
                node(LessNode::new(node(ArgNode), node(ConstNode::new(2)))),
                node(ReturnNode::new(node(ArgNode))),
            )),
            node(ReturnNode::new(node(AddNode::new(
                node(CallNode::new(
                    fib,
                    node(SubNode::new(node(ArgNode), node(ConstNode::new(1)))),
                )),
                node(CallNode::new(
                    fib,
                    node(SubNode::new(node(ArgNode), node(ConstNode::new(2)))),
                )),
            )))),
        ],
    )?;
    Ok((mb.build()?, fib))
}

pub(crate) fn eval_fib(n: u32) -> Result<u32> {
    let (module, fib) = fib_module()?;
    let mut ctx = Context::new();
    module.evaluate(Callee::Function(fib), n, &mut ctx)
}
