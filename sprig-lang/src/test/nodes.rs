use crate::test::node;
use crate::{
    AddNode, ArgNode, ConstNode, Context, IfElseNode, IfNode, LessNode, Module, Node, ReturnNode,
    SubNode,
};
use sprig_base::{ErrorKind, Result};
use test_log::test;

fn with_arg(arg: u32) -> Result<Context> {
    let mut ctx = Context::with_capacity(4);
    ctx.push(arg)?;
    Ok(ctx)
}

#[test]
fn test_push_pop() -> Result<()> {
    let mut ctx = Context::with_capacity(2);
    assert!(ctx.is_fresh());
    ctx.push(7)?;
    ctx.push(9)?;
    assert_eq!(ctx.depth(), 2);
    assert_eq!(ctx.arg(), 9);
    ctx.pop();
    assert_eq!(ctx.arg(), 7);
    ctx.pop();
    assert!(ctx.is_fresh());
    Ok(())
}

#[test]
fn test_push_past_capacity() -> Result<()> {
    let mut ctx = Context::with_capacity(1);
    ctx.push(1)?;
    let err = ctx.push(2).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::StackOverflow { capacity: 1 });
    assert_eq!(ctx.depth(), 1);
    assert_eq!(ctx.arg(), 1);
    Ok(())
}

#[test]
fn test_arithmetic_wraps() -> Result<()> {
    let module = Module::default();
    let mut ctx = with_arg(0)?;
    let sub = SubNode::new(node(ArgNode), node(ConstNode::new(1)));
    assert_eq!(sub.eval(&module, &mut ctx)?, u32::MAX);
    let add = AddNode::new(node(ConstNode::new(u32::MAX)), node(ConstNode::new(3)));
    assert_eq!(add.eval(&module, &mut ctx)?, 2);
    Ok(())
}

#[test]
fn test_less() -> Result<()> {
    let module = Module::default();
    let mut ctx = with_arg(5)?;
    for (c, expect) in [(4, 0), (5, 0), (6, 1)] {
        let less = LessNode::new(node(ArgNode), node(ConstNode::new(c)));
        assert_eq!(less.eval(&module, &mut ctx)?, expect);
    }
    Ok(())
}

#[test]
fn test_if_yields_zero() -> Result<()> {
    let module = Module::default();
    let mut ctx = with_arg(1)?;
    let taken = IfNode::new(node(ConstNode::new(1)), node(ReturnNode::new(node(ConstNode::new(42)))));
    assert_eq!(taken.eval(&module, &mut ctx)?, 0);
    assert!(ctx.is_returning());
    assert_eq!(ctx.return_value(), 42);

    ctx.clear_return();
    let skipped = IfNode::new(node(ConstNode::new(0)), node(ReturnNode::new(node(ConstNode::new(7)))));
    assert_eq!(skipped.eval(&module, &mut ctx)?, 0);
    assert!(!ctx.is_returning());
    assert_eq!(ctx.return_value(), 42);
    Ok(())
}

#[test]
fn test_if_else_picks_one_branch() -> Result<()> {
    let module = Module::default();
    let mut ctx = with_arg(3)?;
    let pick = |c| {
        IfElseNode::new(
            node(LessNode::new(node(ArgNode), node(ConstNode::new(c)))),
            node(ConstNode::new(10)),
            node(ReturnNode::new(node(ConstNode::new(20)))),
        )
    };
    assert_eq!(pick(4).eval(&module, &mut ctx)?, 10);
    assert!(!ctx.is_returning());
    assert_eq!(pick(3).eval(&module, &mut ctx)?, 0);
    assert!(ctx.is_returning());
    assert_eq!(ctx.return_value(), 20);
    Ok(())
}

#[test]
fn test_always_returns() {
    assert!(ReturnNode::new(node(ArgNode)).always_returns());
    assert!(!IfNode::new(node(ArgNode), node(ReturnNode::new(node(ArgNode)))).always_returns());
    let both = IfElseNode::new(
        node(ArgNode),
        node(ReturnNode::new(node(ArgNode))),
        node(ReturnNode::new(node(ConstNode::new(0)))),
    );
    assert!(both.always_returns());
    let one = IfElseNode::new(node(ArgNode), node(ReturnNode::new(node(ArgNode))), node(ArgNode));
    assert!(!one.always_returns());
    assert!(!AddNode::new(node(ArgNode), node(ArgNode)).always_returns());
}
