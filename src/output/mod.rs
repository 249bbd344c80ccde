// Output accumulator for simulated runs

/// Text produced by a run, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    fragments: Vec<String>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        OutputBuffer {
            fragments: Vec::new(),
        }
    }

    /// Append formatted `printf` output
    pub fn print(&mut self, text: String) {
        if !text.is_empty() {
            self.fragments.push(text);
        }
    }

    /// Append the echo of a simulated `scanf` value
    pub fn echo_input(&mut self, value: i64) {
        self.fragments.push(format!("Input: {}\n", value));
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Everything printed so far, concatenated
    pub fn text(&self) -> String {
        self.fragments.concat()
    }

    /// Output split into display lines
    pub fn lines(&self) -> Vec<String> {
        let text = self.text();
        let mut result: Vec<String> = text.split('\n').map(|s| s.to_string()).collect();
        // Remove trailing empty string if text ended with newline
        if result.last().is_some_and(|s| s.is_empty()) {
            result.pop();
        }
        result
    }
}
