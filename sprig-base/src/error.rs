// We want a few things here:
// 1. A way to create a new error with a backtrace
// 2. A way to centralize setting a breakpoint to trap any error in the system fairly soon
//    after it's created (or at least when it's propagated from a library we use back to us)
// 3. Same but for logging / emitting error messages into the tracing/logging system
// 4. A kind that callers can match on, since an evaluation can fail in a few
//    well-defined ways and the driver wants to tell them apart

use std::borrow::Cow;
use std::fmt;
use backtrace_error::DynBacktraceError;
use tracing::error;

#[cfg(test)]
use test_log::test;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    // The argument stack is full and a call tried to push another frame.
    StackOverflow { capacity: usize },
    // A statement-list body has no statement that always reaches a Return.
    MissingReturn { function: String },
    // Declared but never given a body.
    Undefined { name: String },
    Redefined { name: String },
    // A Return or If used where a value is expected, e.g. as an operand
    // or a call argument, instead of as a statement.
    Misplaced { function: String },
    // A handle minted by a different Program or ModuleBuilder.
    UnknownHandle { index: usize },
    // An evaluation was started on a context that still holds frames or
    // a pending return.
    BusyContext,
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::StackOverflow { capacity } => {
                write!(f, "stack overflow: argument stack holds {} frames", capacity)
            }
            ErrorKind::MissingReturn { function } => {
                write!(f, "missing return: body of '{}' can finish without returning", function)
            }
            ErrorKind::Undefined { name } => write!(f, "undefined: '{}' has no body", name),
            ErrorKind::Redefined { name } => write!(f, "redefined: '{}' already has a body", name),
            ErrorKind::Misplaced { function } => {
                write!(f, "misplaced statement: body of '{}' uses return or if as a value", function)
            }
            ErrorKind::UnknownHandle { index } => write!(f, "unknown handle: #{} was not declared here", index),
            ErrorKind::BusyContext => write!(f, "busy context: evaluation needs a fresh context"),
            ErrorKind::Other => write!(f, "error"),
        }
    }
}

pub struct Error {
    kind: ErrorKind,
    message: String,
    inner: DynBacktraceError,
}
pub type Result<T> = std::result::Result<T, Error>;

struct SimpleErr(Cow<'static, str>);
impl fmt::Debug for SimpleErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl fmt::Display for SimpleErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for SimpleErr {}

// Carries a kind through DynBacktraceError without giving ErrorKind itself
// an std::error::Error impl (which would route it through the blanket From
// below and lose the kind).
struct KindErr(ErrorKind);
impl fmt::Debug for KindErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl fmt::Display for KindErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for KindErr {}

impl<E: std::error::Error + Send + Sync + 'static> From<E> for Error {
    fn from(err: E) -> Error {
        Error::new(err)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.inner)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    pub fn new<E: std::error::Error + Send + Sync + 'static>(err: E) -> Error {
        error!(target: "sprig", "{:?}", err);
        Error {
            kind: ErrorKind::Other,
            message: err.to_string(),
            inner: DynBacktraceError::from(err),
        }
    }

    pub fn from_kind(kind: ErrorKind) -> Error {
        error!(target: "sprig", "{}", kind);
        Error {
            message: kind.to_string(),
            kind: kind.clone(),
            inner: DynBacktraceError::from(KindErr(kind)),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

pub fn err(msg: impl Into<Cow<'static, str>>) -> Error {
    let err = SimpleErr(msg.into());
    Error::new(err)
}

#[test]
fn test_error() {
    let err = err("test error");
    assert_eq!(err.kind(), &ErrorKind::Other);
    assert_eq!(err.to_string(), "test error");
}

#[test]
fn test_error_kind() {
    let err = Error::from_kind(ErrorKind::StackOverflow { capacity: 8 });
    assert_eq!(err.kind(), &ErrorKind::StackOverflow { capacity: 8 });
    assert!(err.to_string().contains("stack overflow"));
}

#[test]
fn test_foreign_error() {
    fn parse(s: &str) -> Result<u32> {
        Ok(s.parse::<u32>()?)
    }
    assert_eq!(parse("12").ok(), Some(12));
    let err = parse("twelve").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Other);
}
