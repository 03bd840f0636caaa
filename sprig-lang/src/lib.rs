// Lang is the language core: the per-evaluation Context, the Node capability
// every expression and statement kind implements, the primitive node kinds,
// functions with their call protocol, and the Module arena that owns them.
//
// A Program is the strategy-independent description of the same thing. The
// evaluation strategies (see sprig-eval) lower a Program into a Module, each
// with its own choice of node shapes.
//
// Ownership is strictly a tree: every node owns its children. The only
// sharing is the non-owning FuncId / NodeId handle a call node holds, which
// is how a function's body refers back to the function itself.

mod call;
mod context;
mod module;
mod node;
mod prim;
mod program;

#[cfg(test)]
mod test;

pub use call::{CallNode, Function};
pub use context::{Context, DEFAULT_STACK_CAPACITY};
pub use module::{Callee, FuncId, Module, ModuleBuilder, NodeId};
pub use node::Node;
pub use prim::{AddNode, ArgNode, ConstNode, IfElseNode, IfNode, LessNode, ReturnNode, SubNode};
pub use program::{Expr, FnDef, FnRef, Program};
