// Execution engine for the simulated C runner

use crate::config::SimConfig;
use crate::interpreter::errors::SimError;
use crate::memory::Namespace;
use crate::output::OutputBuffer;
use crate::parser::ast::Statement;
use crate::parser::{classify, prepare, split_statements};

/// Signal returned by every executed statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Normal,
    Break,
    Continue,
    /// `return` anywhere stops the whole run
    Return,
}

/// Executes the body of `main` one statement at a time against a single
/// flat namespace.
pub struct Interpreter {
    pub(crate) config: SimConfig,

    /// Scalars and arrays
    pub(crate) namespace: Namespace,

    /// Everything `printf` and `scanf` produced
    pub(crate) output: OutputBuffer,

    /// Current body nesting (bounded by `config.max_depth`)
    depth: usize,

    /// Number of enclosing loops; `break`/`continue` outside a loop do nothing
    pub(crate) loop_depth: usize,

    /// Loops stopped by the iteration cap
    pub(crate) capped_loops: usize,

    /// Truncated value of the `return` expression, if one ran
    pub(crate) exit_code: Option<i64>,

    statements_executed: usize,
}

impl Interpreter {
    pub fn new(config: SimConfig) -> Self {
        Interpreter {
            config,
            namespace: Namespace::new(),
            output: OutputBuffer::new(),
            depth: 0,
            loop_depth: 0,
            capped_loops: 0,
            exit_code: None,
            statements_executed: 0,
        }
    }

    /// Runs a complete program: pre-checks, then the body of `main`.
    ///
    /// State from any earlier run is discarded first.
    pub fn run(&mut self, source: &str) -> Result<(), SimError> {
        self.reset();
        let body = prepare(source)?;
        self.execute_block(&body)?;
        Ok(())
    }

    fn reset(&mut self) {
        self.namespace = Namespace::new();
        self.output = OutputBuffer::new();
        self.depth = 0;
        self.loop_depth = 0;
        self.capped_loops = 0;
        self.exit_code = None;
        self.statements_executed = 0;
    }

    /// Splits `body` into statements and executes them in order, stopping at
    /// the first non-normal control signal.
    pub fn execute_block(&mut self, body: &str) -> Result<ControlFlow, SimError> {
        if self.depth >= self.config.max_depth {
            return Err(SimError::NestingTooDeep {
                limit: self.config.max_depth,
            });
        }

        self.depth += 1;
        let result = self.execute_statements(body);
        self.depth -= 1;
        result
    }

    fn execute_statements(&mut self, body: &str) -> Result<ControlFlow, SimError> {
        for fragment in split_statements(body) {
            let stmt = classify(&fragment);
            let flow = self.execute_statement(&stmt)?;
            if flow != ControlFlow::Normal {
                return Ok(flow);
            }
        }
        Ok(ControlFlow::Normal)
    }

    /// Execute a single classified statement
    pub fn execute_statement(&mut self, stmt: &Statement) -> Result<ControlFlow, SimError> {
        self.statements_executed += 1;

        match stmt {
            Statement::Declaration { name, init } => {
                self.execute_declaration(name, init.as_deref())?;
                Ok(ControlFlow::Normal)
            }

            Statement::ArrayDeclaration { name, size, init } => {
                self.execute_array_declaration(name, *size, init)?;
                Ok(ControlFlow::Normal)
            }

            Statement::Output { format, args } => {
                self.builtin_printf(format, args)?;
                Ok(ControlFlow::Normal)
            }

            Statement::Input { targets } => {
                self.builtin_scanf(targets)?;
                Ok(ControlFlow::Normal)
            }

            Statement::For {
                init,
                condition,
                increment,
                body,
            } => self.execute_for(init, condition, increment, body),

            Statement::While { condition, body } => self.execute_while(condition, body),

            Statement::DoWhile { body, condition } => self.execute_do_while(body, condition),

            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => self.execute_if(condition, then_branch, else_branch.as_deref()),

            Statement::Assignment { target, op, value } => {
                self.execute_assignment(target, *op, value)?;
                Ok(ControlFlow::Normal)
            }

            Statement::Return(expr) => self.execute_return(expr.as_deref()),

            Statement::Block(body) => self.execute_block(body),

            Statement::Break if self.loop_depth > 0 => Ok(ControlFlow::Break),

            Statement::Continue if self.loop_depth > 0 => Ok(ControlFlow::Continue),

            Statement::Break => self.fallback("break", ControlFlow::Normal),

            Statement::Continue => self.fallback("continue", ControlFlow::Normal),

            Statement::NoOp(text) => self.fallback(text, ControlFlow::Normal),
        }
    }

    /// In permissive mode yields `value`; in strict mode rejects `fragment`.
    pub(crate) fn fallback<T>(&self, fragment: &str, value: T) -> Result<T, SimError> {
        if self.config.permissive {
            Ok(value)
        } else {
            Err(SimError::UnsupportedConstruct {
                fragment: fragment.to_string(),
            })
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn capped_loops(&self) -> usize {
        self.capped_loops
    }

    pub fn exit_code(&self) -> Option<i64> {
        self.exit_code
    }

    pub fn statements_executed(&self) -> usize {
        self.statements_executed
    }
}
