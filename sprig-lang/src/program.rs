// A Program describes what to compute without committing to node shapes.
// It is plain data: a closed sum type, cloneable and comparable, so a
// lowering pass can pattern-match on it and the same Program can be fed to
// every strategy.

use sprig_base::{Error, ErrorKind, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FnRef(u32);

impl FnRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Expr {
    Const(u32),
    Arg,
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Less(Box<Expr>, Box<Expr>),
    If(Box<Expr>, Box<Expr>),
    IfElse(Box<Expr>, Box<Expr>, Box<Expr>),
    Return(Box<Expr>),
    Call(FnRef, Box<Expr>),
}

impl Expr {
    pub fn add(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Add(Box::new(lhs), Box::new(rhs))
    }
    pub fn sub(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Sub(Box::new(lhs), Box::new(rhs))
    }
    pub fn less(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Less(Box::new(lhs), Box::new(rhs))
    }
    pub fn when(condition: Expr, body: Expr) -> Expr {
        Expr::If(Box::new(condition), Box::new(body))
    }
    pub fn if_else(condition: Expr, if_body: Expr, else_body: Expr) -> Expr {
        Expr::IfElse(Box::new(condition), Box::new(if_body), Box::new(else_body))
    }
    pub fn ret(rhs: Expr) -> Expr {
        Expr::Return(Box::new(rhs))
    }
    pub fn call(function: FnRef, arg: Expr) -> Expr {
        Expr::Call(function, Box::new(arg))
    }

    /// True when the expression only produces a value: no `If` or
    /// `Return` anywhere inside it, so it can stand as a tail expression.
    pub fn is_value(&self) -> bool {
        match self {
            Expr::Const(_) | Expr::Arg => true,
            Expr::Add(l, r) | Expr::Sub(l, r) | Expr::Less(l, r) => l.is_value() && r.is_value(),
            Expr::IfElse(c, a, b) => c.is_value() && a.is_value() && b.is_value(),
            Expr::Call(_, arg) => arg.is_value(),
            Expr::If(..) | Expr::Return(_) => false,
        }
    }

    /// True when the expression may stand as a body statement: `Return`
    /// and `If` only at statement level (a body, an `If` body, an `IfElse`
    /// branch that is itself a statement), values everywhere else.
    pub fn is_statement(&self) -> bool {
        match self {
            Expr::Return(rhs) => rhs.is_value(),
            Expr::If(condition, body) => condition.is_value() && body.is_statement(),
            Expr::IfElse(condition, if_body, else_body) => {
                condition.is_value() && if_body.is_statement() && else_body.is_statement()
            }
            other => other.is_value(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FnDef {
    name: String,
    body: Option<Vec<Expr>>,
}

impl FnDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> Result<&[Expr]> {
        match &self.body {
            Some(body) => Ok(body),
            None => Err(Error::from_kind(ErrorKind::Undefined {
                name: self.name.clone(),
            })),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Program {
    functions: Vec<FnDef>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: impl Into<String>) -> FnRef {
        let f = FnRef(self.functions.len() as u32);
        self.functions.push(FnDef {
            name: name.into(),
            body: None,
        });
        f
    }

    /// Gives a declared function its body. A `Return` or `If` nested in a
    /// value (an operand, a condition, a call argument) fails with
    /// Misplaced: its return signal would leak into the next frame opened.
    pub fn define(&mut self, f: FnRef, body: Vec<Expr>) -> Result<()> {
        let def = self
            .functions
            .get_mut(f.index())
            .ok_or_else(|| Error::from_kind(ErrorKind::UnknownHandle { index: f.index() }))?;
        if def.body.is_some() {
            return Err(Error::from_kind(ErrorKind::Redefined {
                name: def.name.clone(),
            }));
        }
        if !body.iter().all(Expr::is_statement) {
            return Err(Error::from_kind(ErrorKind::Misplaced {
                function: def.name.clone(),
            }));
        }
        def.body = Some(body);
        Ok(())
    }

    /// Panics if `f` was declared by another Program.
    pub fn function(&self, f: FnRef) -> &FnDef {
        &self.functions[f.index()]
    }

    pub fn functions(&self) -> impl Iterator<Item = (FnRef, &FnDef)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(i, def)| (FnRef(i as u32), def))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
