use sprig_base::{Error, ErrorKind, Result};

pub const DEFAULT_STACK_CAPACITY: usize = 4096;

/// Execution state for one top-level evaluation: one argument slot per
/// active call frame, plus the return signal and value set by `Return`.
///
/// A Context is never shared between concurrent evaluations; a host that
/// evaluates on several threads needs one Context per thread.
#[derive(Clone, Debug)]
pub struct Context {
    returning: bool,
    return_value: u32,
    stack: Box<[u32]>,
    top: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STACK_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Context {
            returning: false,
            return_value: 0,
            stack: vec![0; capacity].into_boxed_slice(),
            top: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.stack.len()
    }

    /// Number of active frames.
    pub fn depth(&self) -> usize {
        self.top
    }

    pub fn is_fresh(&self) -> bool {
        self.top == 0 && !self.returning
    }

    /// Opens a frame whose single argument is `value`. Fails without
    /// touching the stack when every slot is in use.
    pub fn push(&mut self, value: u32) -> Result<()> {
        match self.stack.get_mut(self.top) {
            Some(slot) => {
                *slot = value;
                self.top += 1;
                Ok(())
            }
            None => Err(Error::from_kind(ErrorKind::StackOverflow {
                capacity: self.stack.len(),
            })),
        }
    }

    pub fn pop(&mut self) {
        debug_assert!(self.top > 0, "pop with no active frame");
        self.top -= 1;
    }

    /// The current frame's argument.
    ///
    /// Panics if no frame is active. Evaluation always enters through a
    /// call, so a well-built tree never reads an argument outside one.
    #[inline(always)]
    pub fn arg(&self) -> u32 {
        self.stack[self.top - 1]
    }

    pub fn set_return(&mut self, value: u32) {
        self.return_value = value;
        self.returning = true;
    }

    #[inline(always)]
    pub fn is_returning(&self) -> bool {
        self.returning
    }

    pub fn clear_return(&mut self) {
        self.returning = false;
    }

    /// Value of the most recent `Return`. Stale (not reset) across calls.
    pub fn return_value(&self) -> u32 {
        self.return_value
    }
}
