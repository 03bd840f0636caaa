// The call protocol shared by every strategy:
//
//  1. evaluate the argument in the caller's frame
//  2. push it, opening the callee's frame
//  3. run the callee body
//  4. clear the return signal, it belongs to the frame being left
//  5. pop
//
// Steps 4 and 5 run even when the body failed, so an error raised deep in
// a recursion unwinds every frame and leaves the Context fresh.
//
// One interpreted frame is several native frames deep (call node, invoke,
// body, statements, operators), so the native stack is grown on demand
// here. Running out of argument-stack capacity must surface as
// StackOverflow, never as the host thread overflowing first.

use sprig_base::Result;

use crate::{Context, FuncId, Module, Node};

const STACK_RED_ZONE: usize = 128 * 1024;
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

impl Context {
    pub fn invoke<F>(&mut self, arg: u32, body: F) -> Result<u32>
    where
        F: FnOnce(&mut Context) -> Result<u32>,
    {
        self.push(arg)?;
        let res = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || body(self));
        self.clear_return();
        self.pop();
        res
    }
}

/// An owned, ordered statement sequence. Immutable once built.
#[derive(Debug)]
pub struct Function {
    name: String,
    body: Box<[Box<dyn Node>]>,
}

impl Function {
    pub(crate) fn new(name: String, body: Vec<Box<dyn Node>>) -> Self {
        Function {
            name,
            body: body.into_boxed_slice(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn statements(&self) -> &[Box<dyn Node>] {
        &self.body
    }

    // Bodies are checked for a returning statement when they are defined.
    pub(crate) fn always_returns(&self) -> bool {
        self.body.iter().any(|stmt| stmt.always_returns())
    }

    /// Runs the statements of the current frame until one of them signals
    /// a return, and yields the returned value.
    pub fn run(&self, module: &Module, ctx: &mut Context) -> Result<u32> {
        for stmt in self.body.iter() {
            stmt.eval(module, ctx)?;
            if ctx.is_returning() {
                break;
            }
        }
        Ok(ctx.return_value())
    }
}

#[derive(Debug)]
pub struct CallNode {
    function: FuncId,
    arg: Box<dyn Node>,
}

impl CallNode {
    pub fn new(function: FuncId, arg: Box<dyn Node>) -> Self {
        CallNode { function, arg }
    }
}

impl Node for CallNode {
    fn eval(&self, module: &Module, ctx: &mut Context) -> Result<u32> {
        let arg = self.arg.eval(module, ctx)?;
        let function = module.function(self.function);
        ctx.invoke(arg, |ctx| function.run(module, ctx))
    }
}
