// A Module is the arena that owns every function and expression body of
// one lowered program. Call nodes refer into it by handle, which lets a
// body call itself without an ownership cycle: the module owns the body,
// the body owns the call node, the call node holds a plain index.
//
// Building is two-phase so that self- and mutual recursion can be wired
// up: declare a handle, build bodies that mention it, then define it.

use sprig_base::{Error, ErrorKind, Result};
use tracing::debug;

use crate::{CallNode, ConstNode, Context, Function, Node};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FuncId(u32);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

/// Something a call can target: a statement-list function, or a node that
/// is the whole body by itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Callee {
    Function(FuncId),
    Node(NodeId),
}

#[derive(Debug)]
struct Slot<T> {
    name: String,
    def: Option<T>,
}

impl<T> Slot<T> {
    fn define(&mut self, def: T) -> Result<()> {
        if self.def.is_some() {
            return Err(Error::from_kind(ErrorKind::Redefined {
                name: self.name.clone(),
            }));
        }
        self.def = Some(def);
        Ok(())
    }

    fn take(self) -> Result<T> {
        match self.def {
            Some(def) => Ok(def),
            None => Err(Error::from_kind(ErrorKind::Undefined { name: self.name })),
        }
    }
}

#[derive(Debug, Default)]
pub struct ModuleBuilder {
    functions: Vec<Slot<Function>>,
    nodes: Vec<Slot<(String, Box<dyn Node>)>>,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_function(&mut self, name: impl Into<String>) -> FuncId {
        let id = FuncId(self.functions.len() as u32);
        self.functions.push(Slot {
            name: name.into(),
            def: None,
        });
        id
    }

    /// Gives a declared function its body. The body must contain a
    /// statement that always returns, otherwise a call could finish with
    /// no value and this fails with MissingReturn.
    pub fn define_function(&mut self, id: FuncId, body: Vec<Box<dyn Node>>) -> Result<()> {
        let slot = self
            .functions
            .get_mut(id.0 as usize)
            .ok_or_else(|| Error::from_kind(ErrorKind::UnknownHandle { index: id.0 as usize }))?;
        let function = Function::new(slot.name.clone(), body);
        if !function.always_returns() {
            return Err(Error::from_kind(ErrorKind::MissingReturn {
                function: slot.name.clone(),
            }));
        }
        slot.define(function)
    }

    pub fn declare_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Slot {
            name: name.into(),
            def: None,
        });
        id
    }

    pub fn define_node(&mut self, id: NodeId, body: Box<dyn Node>) -> Result<()> {
        let slot = self
            .nodes
            .get_mut(id.0 as usize)
            .ok_or_else(|| Error::from_kind(ErrorKind::UnknownHandle { index: id.0 as usize }))?;
        let name = slot.name.clone();
        slot.define((name, body))
    }

    pub fn build(self) -> Result<Module> {
        let functions = self
            .functions
            .into_iter()
            .map(Slot::take)
            .collect::<Result<Vec<_>>>()?;
        let nodes = self
            .nodes
            .into_iter()
            .map(Slot::take)
            .collect::<Result<Vec<_>>>()?;
        debug!(
            target: "sprig",
            functions = functions.len(),
            nodes = nodes.len(),
            "built module"
        );
        Ok(Module { functions, nodes })
    }
}

// The accessors below panic on a handle from another builder; lowering
// only ever mints handles from the builder that produces the module.
#[derive(Debug, Default)]
pub struct Module {
    functions: Vec<Function>,
    nodes: Vec<(String, Box<dyn Node>)>,
}

impl Module {
    pub fn function(&self, id: FuncId) -> &Function {
        &self.functions[id.0 as usize]
    }

    pub fn node(&self, id: NodeId) -> &dyn Node {
        self.nodes[id.0 as usize].1.as_ref()
    }

    pub fn node_name(&self, id: NodeId) -> &str {
        &self.nodes[id.0 as usize].0
    }

    /// Calls `callee` with `arg` as a top-level call against `ctx`, which
    /// must be fresh. On success or failure `ctx` is fresh again afterwards.
    pub fn evaluate(&self, callee: Callee, arg: u32, ctx: &mut Context) -> Result<u32> {
        if !ctx.is_fresh() {
            return Err(Error::from_kind(ErrorKind::BusyContext));
        }
        match callee {
            Callee::Function(id) => {
                let call = CallNode::new(id, Box::new(ConstNode::new(arg)));
                call.eval(self, ctx)
            }
            Callee::Node(id) => {
                let body = self.node(id);
                ctx.invoke(arg, |ctx| body.eval(self, ctx))
            }
        }
    }
}
