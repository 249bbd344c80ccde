//! Statement variants produced by the classifier.
//!
//! Nested bodies stay as raw text: loops and conditionals re-split them each
//! time they run. Expressions are likewise kept as text and resolved by the
//! interpreter's evaluator.

/// Something that can be assigned to
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Scalar(String),
    Element { name: String, index: String },
}

impl Target {
    pub fn name(&self) -> &str {
        match self {
            Target::Scalar(name) => name,
            Target::Element { name, .. } => name,
        }
    }
}

/// Assignment operator (`=`, `+=`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Set,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl AssignOp {
    /// Binary operator character applied by a compound assignment.
    pub fn operator(self) -> Option<char> {
        match self {
            AssignOp::Set => None,
            AssignOp::Add => Some('+'),
            AssignOp::Sub => Some('-'),
            AssignOp::Mul => Some('*'),
            AssignOp::Div => Some('/'),
            AssignOp::Mod => Some('%'),
        }
    }
}

/// A `printf` argument
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// A string literal, escapes already expanded
    Text(String),
    /// Any other expression
    Expr(String),
}

/// One classified statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `int x` or `int x = expr`
    Declaration { name: String, init: Option<String> },

    /// `int a[N]` or `int a[N] = {e0, e1, ...}`
    ArrayDeclaration {
        name: String,
        size: usize,
        init: Vec<String>,
    },

    /// `printf("fmt", args...)`; `format` is the raw literal contents
    Output { format: String, args: Vec<Argument> },

    /// `scanf("fmt", &a, &b[i], ...)`
    Input { targets: Vec<Target> },

    For {
        init: String,
        condition: String,
        increment: String,
        body: String,
    },

    While { condition: String, body: String },

    DoWhile { body: String, condition: String },

    If {
        condition: String,
        then_branch: String,
        else_branch: Option<String>,
    },

    /// `x = e`, `a[i] += e`, `i++` (as `i += 1`)
    Assignment {
        target: Target,
        op: AssignOp,
        value: String,
    },

    Return(Option<String>),

    /// `{ ... }`
    Block(String),

    Break,

    Continue,

    /// Anything not recognized; the text is kept for diagnostics
    NoOp(String),
}
