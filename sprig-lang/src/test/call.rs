use crate::test::{eval_fib, fib_module, node};
use crate::{
    AddNode, ArgNode, CallNode, Callee, ConstNode, Context, IfNode, LessNode, ModuleBuilder,
    ReturnNode, DEFAULT_STACK_CAPACITY,
};
use sprig_base::{ErrorKind, Result};
use test_log::test;

#[test]
fn test_fib_values() -> Result<()> {
    assert_eq!(eval_fib(0)?, 0);
    assert_eq!(eval_fib(1)?, 1);
    assert_eq!(eval_fib(2)?, 1);
    assert_eq!(eval_fib(10)?, 55);
    assert_eq!(eval_fib(20)?, 6765);
    Ok(())
}

#[test]
fn test_stack_restored_after_call() -> Result<()> {
    let (module, fib) = fib_module()?;
    let mut ctx = Context::new();
    assert_eq!(module.evaluate(Callee::Function(fib), 12, &mut ctx)?, 144);
    assert_eq!(ctx.depth(), 0);
    assert!(ctx.is_fresh());
    // A fresh-again context can be reused.
    assert_eq!(module.evaluate(Callee::Function(fib), 13, &mut ctx)?, 233);
    Ok(())
}

#[test]
fn test_overflow_is_reported_and_unwound() -> Result<()> {
    let (module, fib) = fib_module()?;
    // fib(n) nests n frames deep.
    let mut ctx = Context::with_capacity(8);
    assert_eq!(module.evaluate(Callee::Function(fib), 8, &mut ctx)?, 21);
    let err = module
        .evaluate(Callee::Function(fib), 9, &mut ctx)
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::StackOverflow { capacity: 8 });
    assert!(ctx.is_fresh());
    Ok(())
}

#[test]
fn test_busy_context_rejected() -> Result<()> {
    let (module, fib) = fib_module()?;
    let mut ctx = Context::new();
    ctx.push(3)?;
    let err = module
        .evaluate(Callee::Function(fib), 3, &mut ctx)
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::BusyContext);
    Ok(())
}

// g returns early for small arguments; f calls g as a bare statement and
// must still reach its own return afterwards.
#[test]
fn test_return_signal_stays_in_its_frame() -> Result<()> {
    let mut mb = ModuleBuilder::new();
    let g = mb.declare_function("g");
    let f = mb.declare_function("f");
    mb.define_function(
        g,
        vec![
            node(IfNode::new(
                node(LessNode::new(node(ArgNode), node(ConstNode::new(5)))),
                node(ReturnNode::new(node(ConstNode::new(100)))),
            )),
            node(ReturnNode::new(node(ArgNode))),
        ],
    )?;
    mb.define_function(
        f,
        vec![
            node(CallNode::new(g, node(ConstNode::new(1)))),
            node(ReturnNode::new(node(AddNode::new(
                node(ArgNode),
                node(CallNode::new(g, node(ConstNode::new(10)))),
            )))),
        ],
    )?;
    let module = mb.build()?;
    let mut ctx = Context::new();
    assert_eq!(module.evaluate(Callee::Function(f), 7, &mut ctx)?, 17);
    assert!(ctx.is_fresh());
    Ok(())
}

#[test]
fn test_missing_return_rejected() {
    let mut mb = ModuleBuilder::new();
    let f = mb.declare_function("f");
    let err = mb
        .define_function(
            f,
            vec![node(IfNode::new(
                node(ArgNode),
                node(ReturnNode::new(node(ArgNode))),
            ))],
        )
        .unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::MissingReturn {
            function: "f".to_string()
        }
    );
}

#[test]
fn test_undefined_and_redefined() {
    let mut mb = ModuleBuilder::new();
    let f = mb.declare_function("f");
    let _g = mb.declare_function("g");
    assert!(mb
        .define_function(f, vec![node(ReturnNode::new(node(ArgNode)))])
        .is_ok());
    let err = mb
        .define_function(f, vec![node(ReturnNode::new(node(ArgNode)))])
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Redefined { name: "f".to_string() });
    let err = mb.build().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Undefined { name: "g".to_string() });
}

#[test]
fn test_node_callee() -> Result<()> {
    let mut mb = ModuleBuilder::new();
    let twice = mb.declare_node("twice");
    mb.define_node(twice, node(AddNode::new(node(ArgNode), node(ArgNode))))?;
    let module = mb.build()?;
    let mut ctx = Context::new();
    assert_eq!(module.evaluate(Callee::Node(twice), 21, &mut ctx)?, 42);
    assert_eq!(module.node_name(twice), "twice");
    assert!(ctx.is_fresh());
    Ok(())
}

// The argument stack, not the native one, must be what runs out first.
#[test]
fn test_overflow_at_default_capacity() -> Result<()> {
    let (module, fib) = fib_module()?;
    let mut ctx = Context::new();
    let err = module
        .evaluate(Callee::Function(fib), 5000, &mut ctx)
        .unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::StackOverflow {
            capacity: DEFAULT_STACK_CAPACITY
        }
    );
    assert!(ctx.is_fresh());
    Ok(())
}

#[test]
fn test_foreign_handles_rejected() {
    let mut other = ModuleBuilder::new();
    other.declare_function("a");
    let foreign_fn = other.declare_function("b");
    let foreign_node = other.declare_node("c");

    let mut mb = ModuleBuilder::new();
    let err = mb
        .define_function(foreign_fn, vec![node(ReturnNode::new(node(ArgNode)))])
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownHandle { index: 1 });
    let err = mb.define_node(foreign_node, node(ArgNode)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownHandle { index: 0 });
}
