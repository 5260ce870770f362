use std::io::{self, BufRead};

/// Source of interactive answers, one line at a time
pub trait LineSource {
    /// Next line without its line terminator, or `None` once input is exhausted
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<R: BufRead> LineSource for R {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Outcome of a numbered selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice<T> {
    Selected(T),
    Cancelled,
}

impl<T> Choice<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Choice<U> {
        match self {
            Choice::Selected(t) => Choice::Selected(f(t)),
            Choice::Cancelled => Choice::Cancelled,
        }
    }

    pub fn selected(self) -> Option<T> {
        match self {
            Choice::Selected(t) => Some(t),
            Choice::Cancelled => None,
        }
    }
}

/// Why a line was rejected as a menu answer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidChoice {
    NotANumber,
    OutOfRange(i64),
}

/// The value entered to cancel a selection
pub const CANCEL: i64 = 0;

/// Parse a menu answer for a menu of `len` items. Selections are returned as 0-based indices.
pub fn parse_choice(line: &str, len: usize) -> Result<Choice<usize>, InvalidChoice> {
    let n: i64 = line
        .trim()
        .parse()
        .map_err(|_| InvalidChoice::NotANumber)?;
    if n == CANCEL {
        return Ok(Choice::Cancelled);
    }
    if n >= 1 && (n as u64) <= len as u64 {
        return Ok(Choice::Selected((n - 1) as usize));
    }
    Err(InvalidChoice::OutOfRange(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Ok(Choice::Cancelled))]
    #[case("1", Ok(Choice::Selected(0)))]
    #[case(" 3 ", Ok(Choice::Selected(2)))]
    #[case("4", Err(InvalidChoice::OutOfRange(4)))]
    #[case("-1", Err(InvalidChoice::OutOfRange(-1)))]
    #[case("abc", Err(InvalidChoice::NotANumber))]
    #[case("", Err(InvalidChoice::NotANumber))]
    #[case("1.5", Err(InvalidChoice::NotANumber))]
    #[case("99999999999999999999", Err(InvalidChoice::NotANumber))]
    fn test_parse_choice(#[case] line: &str, #[case] expected: Result<Choice<usize>, InvalidChoice>) {
        assert_eq!(parse_choice(line, 3), expected);
    }

    #[test]
    fn test_line_source_strips_terminators() {
        let mut input = "first\r\nsecond\nlast".as_bytes();
        assert_eq!(input.next_line().unwrap(), Some("first".to_owned()));
        assert_eq!(input.next_line().unwrap(), Some("second".to_owned()));
        assert_eq!(input.next_line().unwrap(), Some("last".to_owned()));
        assert_eq!(input.next_line().unwrap(), None);
    }
}
