//! Loop statement execution (`while`, `do-while`, `for`).
//!
//! Bodies are kept as text and re-split on every iteration. Every loop is
//! bounded by `config.iteration_cap`: once a loop has run its body that many
//! times it stops even if the condition still holds, and the stop is counted
//! in `capped_loops`.
//!
//! `break` ends the loop, `continue` skips to the increment, and `return`
//! unwinds out of the loop and ends the run.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::SimError;
use crate::parser::{classify, split_statements};

impl Interpreter {
    /// Executes a `for (init; condition; increment) body` loop.
    ///
    /// An empty condition is always true.
    pub(crate) fn execute_for(
        &mut self,
        init: &str,
        condition: &str,
        increment: &str,
        body: &str,
    ) -> Result<ControlFlow, SimError> {
        self.execute_clause(init)?;
        self.drive_loop(condition, body, Some(increment), true)
    }

    pub(crate) fn execute_while(
        &mut self,
        condition: &str,
        body: &str,
    ) -> Result<ControlFlow, SimError> {
        self.drive_loop(condition, body, None, true)
    }

    /// The body always runs at least once.
    pub(crate) fn execute_do_while(
        &mut self,
        body: &str,
        condition: &str,
    ) -> Result<ControlFlow, SimError> {
        self.drive_loop(condition, body, None, false)
    }

    fn drive_loop(
        &mut self,
        condition: &str,
        body: &str,
        increment: Option<&str>,
        test_first: bool,
    ) -> Result<ControlFlow, SimError> {
        self.loop_depth += 1;
        let result = self.iterate(condition, body, increment, test_first);
        self.loop_depth -= 1;
        result
    }

    fn iterate(
        &mut self,
        condition: &str,
        body: &str,
        increment: Option<&str>,
        test_first: bool,
    ) -> Result<ControlFlow, SimError> {
        let mut iterations = 0;
        let mut test = test_first;

        loop {
            if test && !self.loop_condition(condition)? {
                return Ok(ControlFlow::Normal);
            }
            test = true;

            if iterations == self.config.iteration_cap {
                self.capped_loops += 1;
                return Ok(ControlFlow::Normal);
            }
            iterations += 1;

            match self.execute_block(body)? {
                ControlFlow::Break => return Ok(ControlFlow::Normal),
                ControlFlow::Return => return Ok(ControlFlow::Return),
                ControlFlow::Normal | ControlFlow::Continue => {}
            }

            if let Some(inc) = increment {
                self.execute_clause(inc)?;
            }
        }
    }

    fn loop_condition(&self, condition: &str) -> Result<bool, SimError> {
        if condition.trim().is_empty() {
            return Ok(true);
        }
        self.evaluate_condition(condition)
    }

    /// Runs a `for` init or increment clause; control signals are ignored.
    fn execute_clause(&mut self, clause: &str) -> Result<(), SimError> {
        for fragment in split_statements(clause) {
            self.execute_statement(&classify(&fragment))?;
        }
        Ok(())
    }
}
