//! Statement execution implementation
//!
//! Declarations, assignments, `if`/`else` and `return`. Loops live in
//! `loops`, `printf`/`scanf` in `builtins`.
//!
//! All of these write into the one flat namespace: a declaration inside a
//! nested body is visible after the body ends, and assigning to a name that
//! was never declared declares it.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::SimError;
use crate::interpreter::expressions::apply_operator;
use crate::parser::ast::{AssignOp, Statement, Target};
use crate::parser::{classify, split_statements};

impl Interpreter {
    pub(crate) fn execute_declaration(
        &mut self,
        name: &str,
        init: Option<&str>,
    ) -> Result<(), SimError> {
        let value = match init {
            Some(expr) => self.evaluate_expr(expr)?,
            None => 0.0,
        };
        self.namespace.declare(name, value);
        Ok(())
    }

    pub(crate) fn execute_array_declaration(
        &mut self,
        name: &str,
        size: usize,
        init: &[String],
    ) -> Result<(), SimError> {
        let mut values = Vec::with_capacity(init.len().min(size));
        for expr in init.iter().take(size) {
            values.push(self.evaluate_expr(expr)?);
        }
        self.namespace.declare_array(name, size, &values);
        Ok(())
    }

    pub(crate) fn execute_assignment(
        &mut self,
        target: &Target,
        op: AssignOp,
        value: &str,
    ) -> Result<(), SimError> {
        let rhs = self.evaluate_expr(value)?;
        let result = match op.operator() {
            None => rhs,
            Some(operator) => {
                let current = self.read_target(target)?;
                let expr = format!("{} {}= {}", target.name(), operator, value);
                apply_operator(operator, current, rhs, &expr)?
            }
        };
        self.write_target(target, result)
    }

    pub(crate) fn read_target(&self, target: &Target) -> Result<f64, SimError> {
        match target {
            Target::Scalar(name) => Ok(self.namespace.get(name).unwrap_or(0.0)),
            Target::Element { name, index } => {
                let index = self.evaluate_expr(index)?;
                Ok(self.namespace.element(name, index.trunc() as i64))
            }
        }
    }

    /// Stores into a scalar or array element. Writes to unknown arrays or
    /// out-of-range elements are dropped.
    pub(crate) fn write_target(&mut self, target: &Target, value: f64) -> Result<(), SimError> {
        match target {
            Target::Scalar(name) => self.namespace.set(name, value),
            Target::Element { name, index } => {
                let index = self.evaluate_expr(index)?;
                self.namespace
                    .set_element(name, index.trunc() as i64, value);
            }
        }
        Ok(())
    }

    /// `else if` arms are walked in this frame, so a long chain does not
    /// count against the nesting limit.
    pub(crate) fn execute_if(
        &mut self,
        condition: &str,
        then_branch: &str,
        else_branch: Option<&str>,
    ) -> Result<ControlFlow, SimError> {
        if self.evaluate_condition(condition)? {
            return self.execute_block(then_branch);
        }

        let mut else_body = else_branch.map(str::to_string);
        while let Some(body) = else_body.take() {
            let Some((condition, then_branch, next)) = chained_if(&body) else {
                return self.execute_block(&body);
            };
            if self.evaluate_condition(&condition)? {
                return self.execute_block(&then_branch);
            }
            else_body = next;
        }
        Ok(ControlFlow::Normal)
    }

    pub(crate) fn execute_return(&mut self, expr: Option<&str>) -> Result<ControlFlow, SimError> {
        if let Some(ret_expr) = expr {
            let value = self.evaluate_expr(ret_expr)?;
            self.exit_code = Some(value.trunc() as i64);
        }
        Ok(ControlFlow::Return)
    }
}

/// The parts of an `else` body that is exactly one `if` statement
fn chained_if(body: &str) -> Option<(String, String, Option<String>)> {
    let mut statements = split_statements(body);
    if statements.len() != 1 {
        return None;
    }
    match classify(&statements.pop()?) {
        Statement::If {
            condition,
            then_branch,
            else_branch,
        } => Some((condition, then_branch, else_branch)),
        _ => None,
    }
}
