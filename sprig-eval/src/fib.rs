//! The doubly-recursive Fibonacci program every stage is measured on.

use sprig_base::Result;
use sprig_lang::{Expr, FnRef, Program};

/// ```text
/// fib(n):
///     if (n < 2) return n;
///     return fib(n - 1) + fib(n - 2);
/// ```
pub fn program() -> Result<(Program, FnRef)> {
    let mut p = Program::new();
    let fib = p.declare("fib");
    p.define(
        fib,
        vec![
            Expr::when(Expr::less(Expr::Arg, Expr::Const(2)), Expr::ret(Expr::Arg)),
            Expr::ret(Expr::add(
                Expr::call(fib, Expr::sub(Expr::Arg, Expr::Const(1))),
                Expr::call(fib, Expr::sub(Expr::Arg, Expr::Const(2))),
            )),
        ],
    )?;
    Ok((p, fib))
}

/// Native recursion, with the same wraparound as the node trees.
pub fn reference(n: u32) -> u32 {
    if n < 2 {
        return n;
    }
    reference(n - 1).wrapping_add(reference(n - 2))
}
