use std::fmt::Display;
use std::io::Write;

use tracing::{info, warn};

use crate::input::{Choice, InvalidChoice, LineSource, parse_choice};

/// A numbered menu that keeps asking until it gets a usable answer
pub struct Menu<'a> {
    heading: &'a str,
    prompt: &'a str,
}

impl<'a> Menu<'a> {
    pub fn new(heading: &'a str, prompt: &'a str) -> Self {
        Menu { heading, prompt }
    }

    /// List `items` as `1. item`, `2. item`, ... and read answers from `input` until one is
    /// the cancel sentinel or a valid ordinal. Rejected answers are logged and asked again.
    ///
    /// An empty menu is cancelled right away, as is running out of input.
    pub fn choose<'i, T, L, W>(
        &self,
        items: &'i [T],
        input: &mut L,
        output: &mut W,
    ) -> std::io::Result<Choice<&'i T>>
    where
        T: Display,
        L: LineSource + ?Sized,
        W: Write + ?Sized,
    {
        if items.is_empty() {
            return Ok(Choice::Cancelled);
        }

        info!("{} ({})", self.heading, items.len());
        for (i, item) in items.iter().enumerate() {
            writeln!(output, "{}. {}", i + 1, item)?;
        }

        loop {
            write!(output, "\n{} (0 to cancel): ", self.prompt)?;
            output.flush()?;

            let Some(line) = input.next_line()? else {
                warn!("Input closed, treating as cancel");
                return Ok(Choice::Cancelled);
            };

            match parse_choice(&line, items.len()) {
                Ok(choice) => return Ok(choice.map(|index| &items[index])),
                Err(InvalidChoice::NotANumber) => {
                    warn!(
                        "Invalid input '{}'. Please enter a number between 1 and {}, or 0 to cancel.",
                        line.trim(),
                        items.len()
                    );
                }
                Err(InvalidChoice::OutOfRange(n)) => {
                    warn!(
                        "Invalid choice {}. Please enter a number between 1 and {}, or 0 to cancel.",
                        n,
                        items.len()
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture_logs;

    fn choose_with(items: &[&'static str], answers: &str) -> (Choice<&'static str>, String, String) {
        let mut output = Vec::new();
        let mut input = answers.as_bytes();
        let (choice, logs) = capture_logs(|| {
            Menu::new("Files", "Enter file number")
                .choose(items, &mut input, &mut output)
                .unwrap()
                .map(|s| *s)
        });
        (choice, String::from_utf8(output).unwrap(), logs)
    }

    #[test]
    fn test_lists_items_with_ordinals() {
        let (choice, output, _) = choose_with(&["a.csv", "b.xlsx"], "2\n");
        assert_eq!(choice, Choice::Selected("b.xlsx"));
        assert!(output.starts_with("1. a.csv\n2. b.xlsx\n"));
        assert!(output.contains("Enter file number (0 to cancel): "));
    }

    #[test]
    fn test_cancel() {
        let (choice, _, logs) = choose_with(&["data.csv", "data.xlsx"], "0\n");
        assert_eq!(choice, Choice::Cancelled);
        assert_eq!(logs.matches("WARN").count(), 0);
    }

    #[test]
    fn test_retries_until_valid() {
        let (choice, output, logs) = choose_with(&["a", "b", "c"], "abc\n99\n1\n");
        assert_eq!(choice, Choice::Selected("a"));
        assert_eq!(logs.matches("WARN").count(), 2);
        assert!(logs.contains("Invalid input 'abc'"));
        assert!(logs.contains("Invalid choice 99"));
        assert!(logs.contains("between 1 and 3"));
        // One prompt for each answer read
        assert_eq!(output.matches("(0 to cancel): ").count(), 3);
    }

    #[test]
    fn test_negative_is_out_of_range() {
        let (choice, _, logs) = choose_with(&["a", "b"], "-1\n2\n");
        assert_eq!(choice, Choice::Selected("b"));
        assert_eq!(logs.matches("WARN").count(), 1);
    }

    #[test]
    fn test_end_of_input_cancels() {
        let (choice, _, logs) = choose_with(&["a"], "x\n");
        assert_eq!(choice, Choice::Cancelled);
        assert!(logs.contains("Input closed"));
    }

    #[test]
    fn test_empty_menu_does_not_prompt() {
        let (choice, output, _) = choose_with(&[], "1\n");
        assert_eq!(choice, Choice::Cancelled);
        assert!(output.is_empty());
    }
}
