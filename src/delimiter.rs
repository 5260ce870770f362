use crate::errors::{CrossbowError, CrossbowResult};

/// Delimiter behaviour as specified in the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delimiter {
    /// Use the default delimiter (comma)
    #[default]
    Default,

    /// Use the specified delimiter
    Character(u8),
}

impl Delimiter {
    /// Create a Delimiter by parsing the command line argument for the delimiter
    pub fn from_arg(delimiter_arg: &Option<String>, tab_separation: bool) -> CrossbowResult<Self> {
        if tab_separation {
            return Ok(Delimiter::Character('\t'.try_into()?));
        }

        if let Some(s) = delimiter_arg {
            if s == r"\t" {
                return Ok(Delimiter::Character(b'\t'));
            }
            let mut chars = s.chars();
            let c = chars.next().ok_or(CrossbowError::DelimiterEmpty)?;
            if !c.is_ascii() {
                return Err(CrossbowError::DelimiterNotAscii(c));
            }
            if chars.next().is_some() {
                return Err(CrossbowError::DelimiterMultipleCharacters(s.clone()));
            }
            Ok(Delimiter::Character(c.try_into()?))
        } else {
            Ok(Delimiter::Default)
        }
    }

    /// The byte to split fields on. Files ending in `.tsv` default to tabs.
    pub fn byte_for(&self, filename: &str) -> u8 {
        match self {
            Delimiter::Character(c) => *c,
            Delimiter::Default => {
                if filename.to_lowercase().ends_with(".tsv") {
                    b'\t'
                } else {
                    b','
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, false, Delimiter::Default)]
    #[case(Some(";"), false, Delimiter::Character(b';'))]
    #[case(Some(r"\t"), false, Delimiter::Character(b'\t'))]
    #[case(Some(";"), true, Delimiter::Character(b'\t'))]
    fn test_from_arg(
        #[case] arg: Option<&str>,
        #[case] tab_separation: bool,
        #[case] expected: Delimiter,
    ) {
        let arg = arg.map(|s| s.to_owned());
        assert_eq!(Delimiter::from_arg(&arg, tab_separation).unwrap(), expected);
    }

    #[test]
    fn test_rejects_bad_delimiters() {
        let empty = Delimiter::from_arg(&Some("".to_owned()), false);
        assert!(matches!(empty, Err(CrossbowError::DelimiterEmpty)));

        let fancy = Delimiter::from_arg(&Some("é".to_owned()), false);
        assert!(matches!(fancy, Err(CrossbowError::DelimiterNotAscii('é'))));

        let long = Delimiter::from_arg(&Some("ab".to_owned()), false);
        assert!(matches!(
            long,
            Err(CrossbowError::DelimiterMultipleCharacters(_))
        ));
    }

    #[test]
    fn test_tsv_defaults_to_tab() {
        assert_eq!(Delimiter::Default.byte_for("data.TSV"), b'\t');
        assert_eq!(Delimiter::Default.byte_for("data.csv"), b',');
        assert_eq!(Delimiter::Character(b'|').byte_for("data.tsv"), b'|');
    }
}
