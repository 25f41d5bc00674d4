//! The line REPL: prompt, read a line byte-by-byte into a bounded buffer,
//! evaluate it, print the resulting data stack, and continue. Errors are
//! reported and swallowed rather than ending the session: evaluation
//! failures are non-fatal.

use froth_compiler::Evaluator;
use froth_core::FrothError;
use froth_core::interpreter::Interpreter;

use crate::format::render_stack;
use crate::platform::Platform;

/// Input buffer size, in bytes. `froth-core`'s `Limits` governs heap/stack/
/// slot-table capacities; this one is REPL-specific, the same way the
/// source separates `FROTH_LINE_BUFFER_SIZE` from the core's own limits.
pub const LINE_BUFFER_SIZE: usize = 256;

pub const PROMPT: &str = "froth> ";

pub struct Repl<P: Platform> {
    platform: P,
    interp: Interpreter,
    evaluator: Evaluator,
}

impl<P: Platform> Repl<P> {
    #[must_use]
    pub fn new(platform: P, interp: Interpreter) -> Repl<P> {
        Repl {
            platform,
            interp,
            evaluator: Evaluator::new(),
        }
    }

    fn emit_str(&mut self, s: &str) -> Result<(), FrothError> {
        for byte in s.bytes() {
            self.platform.emit(byte)?;
        }
        Ok(())
    }

    /// Read one line (up to `LINE_BUFFER_SIZE - 1` bytes, or a trailing
    /// `\n`) from the platform.
    fn read_line(&mut self) -> Result<String, FrothError> {
        let mut buf = Vec::with_capacity(LINE_BUFFER_SIZE);
        while buf.len() < LINE_BUFFER_SIZE - 1 {
            let byte = self.platform.key()?;
            if byte == b'\n' {
                break;
            }
            buf.push(byte);
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Evaluate one line, printing either the resulting stack or an error
    /// message. Returns the underlying I/O error only if output itself
    /// fails; evaluation errors are reported, not propagated.
    pub fn eval_line(&mut self, line: &str) -> Result<(), FrothError> {
        match self.evaluator.evaluate(line, &mut self.interp) {
            Ok(()) => {
                let rendered =
                    render_stack(&self.interp.data_stack, &self.interp.slots, &self.interp.heap);
                self.emit_str(&rendered)
            }
            Err(err) => {
                tracing::warn!(error = %err, "error evaluating input");
                self.emit_str(&format!("Error evaluating input: {err}\n"))
            }
        }
    }

    /// Run one prompt/read/eval/print cycle.
    pub fn step(&mut self) -> Result<(), FrothError> {
        self.emit_str(PROMPT)?;
        let line = self.read_line()?;
        self.eval_line(&line)
    }

    /// Run forever, until the platform reports an I/O error (e.g. stdin
    /// closed).
    pub fn run(&mut self) -> Result<(), FrothError> {
        loop {
            self.step()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::test_support::BufferPlatform;
    use froth_core::interpreter::Limits;

    fn run_lines(input: &str) -> String {
        let platform = BufferPlatform::new(input);
        let interp = Interpreter::new(Limits::default()).unwrap();
        let mut repl = Repl::new(platform, interp);
        loop {
            if repl.step().is_err() {
                break;
            }
        }
        repl.platform.output_string()
    }

    fn strip_prompts(output: &str) -> Vec<&str> {
        output
            .split(PROMPT)
            .filter(|s| !s.is_empty())
            .collect()
    }

    #[test]
    fn scenario_e1_numbers() {
        let output = run_lines("1 2 3\n");
        assert_eq!(strip_prompts(&output), vec!["[1 2 3]\n"]);
    }

    #[test]
    fn scenario_e2_negative_number() {
        let output = run_lines("-7\n");
        assert_eq!(strip_prompts(&output), vec!["[-7]\n"]);
    }

    #[test]
    fn scenario_e3_quotation_renders_as_quote_ref() {
        let output = run_lines("[ 1 2 ]\n");
        let sections = strip_prompts(&output);
        assert_eq!(sections.len(), 1);
        assert!(sections[0].starts_with("[Q:"));
        assert!(sections[0].ends_with("]\n"));
    }

    #[test]
    fn scenario_e4_nested_quotation_renders_single_quote_ref() {
        let output = run_lines("[ 1 [ 2 3 ] 4 ]\n");
        let sections = strip_prompts(&output);
        assert_eq!(sections.len(), 1);
        // One top-level value: the outer quotation's QuoteRef. Its body
        // layout (length 3, body[1] a nested QuoteRef of length 2) is
        // exercised directly against the heap in
        // `froth_compiler::evaluator`'s own tests.
        assert_eq!(sections[0].matches("Q:").count(), 1);
    }

    #[test]
    fn scenario_e5_identifier() {
        let output = run_lines("foo\n");
        assert_eq!(strip_prompts(&output), vec!["[C:foo]\n"]);
    }

    #[test]
    fn scenario_e7_comment_discarded() {
        let output = run_lines("1 \\ this is a comment 2\n");
        assert_eq!(strip_prompts(&output), vec!["[1]\n"]);
    }

    #[test]
    fn scenario_e8_trailing_letters_is_identifier() {
        let output = run_lines("3foo\n");
        assert_eq!(strip_prompts(&output), vec!["[C:3foo]\n"]);
    }

    #[test]
    fn scenario_e6_unterminated_quotation_is_non_fatal() {
        let output = run_lines("[ 1 2\nok\n");
        let sections = strip_prompts(&output);
        assert!(sections[0].starts_with("Error evaluating input"));
        assert_eq!(sections[1], "[C:ok]\n");
    }

    #[test]
    fn prompt_is_emitted_before_each_read() {
        // Two input lines plus the trailing prompt emitted just before the
        // loop discovers the input is exhausted and `step` returns an error.
        let output = run_lines("1\n2\n");
        assert!(output.starts_with(PROMPT));
        assert_eq!(output.matches(PROMPT).count(), 3);
    }
}
