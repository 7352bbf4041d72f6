use crate::constant::MAX_NESTING;
use crate::grammar::{closer, Grammar, GrammarError};

/// Check that every group in the grammar is closed by its matching delimiter.
///
/// Only bracket balance is checked; alternatives and option syntax are left to the matcher.
/// The validation walks a copy of the cursor, so `grammar` is left where it was.
pub(crate) fn validate(grammar: &Grammar) -> Result<(), GrammarError> {
    let mut cursor = *grammar;
    check_group(&mut cursor, None, 0)
}

fn check_group(
    cursor: &mut Grammar,
    open: Option<(char, usize)>,
    depth: usize,
) -> Result<(), GrammarError> {
    loop {
        let at = cursor.position();

        match cursor.bump() {
            None => {
                return match open {
                    Some((open, at)) => Err(GrammarError::Unclosed { open, at }),
                    None => Ok(()),
                };
            }
            Some(c @ ('[' | '{')) => {
                if depth + 1 > MAX_NESTING {
                    return Err(GrammarError::TooDeep {
                        at,
                        limit: MAX_NESTING,
                    });
                }

                check_group(cursor, Some((c, at)), depth + 1)?;
            }
            Some(close @ (']' | '}')) => {
                return match open {
                    Some((open, _)) if closer(open) == close => Ok(()),
                    Some((open, open_at)) => Err(GrammarError::Mismatched {
                        open,
                        at: open_at,
                        close,
                        close_at: at,
                    }),
                    None => Err(GrammarError::Unmatched { close, at }),
                };
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("FILE")]
    #[case("[-a] FILE")]
    #[case("{-a | -b}")]
    #[case("[-Aablh | --width=WIDTH | -w WIDTH | --help]... [FILE]")]
    #[case("{ params... | [-h | --help] }")]
    #[case("[[{[]}]]")]
    fn well_nested(#[case] usage: &str) {
        let grammar = Grammar::new(usage);
        validate(&grammar).unwrap();
        assert_eq!(grammar.position(), 0);
    }

    #[rstest]
    #[case("[-a FILE", GrammarError::Unclosed { open: '[', at: 0 })]
    #[case("{a [b}", GrammarError::Mismatched { open: '[', at: 3, close: '}', close_at: 5 })]
    #[case("a]", GrammarError::Unmatched { close: ']', at: 1 })]
    #[case("[a]}", GrammarError::Unmatched { close: '}', at: 3 })]
    #[case("{[a}]", GrammarError::Mismatched { open: '[', at: 1, close: '}', close_at: 3 })]
    #[case("[a] {b", GrammarError::Unclosed { open: '{', at: 4 })]
    fn malformed(#[case] usage: &str, #[case] expected: GrammarError) {
        assert_eq!(validate(&Grammar::new(usage)).unwrap_err(), expected);
    }

    #[test]
    fn too_deep() {
        let usage = format!("{}{}", "[".repeat(MAX_NESTING + 1), "]".repeat(MAX_NESTING + 1));
        assert_eq!(
            validate(&Grammar::new(&usage)).unwrap_err(),
            GrammarError::TooDeep {
                at: MAX_NESTING,
                limit: MAX_NESTING,
            }
        );

        let usage = format!("{}{}", "[".repeat(MAX_NESTING), "]".repeat(MAX_NESTING));
        validate(&Grammar::new(&usage)).unwrap();
    }

    fn random_nesting(depth: usize) -> String {
        let mut out = String::default();

        for _ in 0..thread_rng().gen_range(0..4) {
            match thread_rng().gen_range(0..4) {
                0 if depth < 6 => out.push_str(&format!("[{}]", random_nesting(depth + 1))),
                1 if depth < 6 => out.push_str(&format!("{{{}}}", random_nesting(depth + 1))),
                2 => out.push_str(" -a |"),
                _ => out.push_str(" WORD..."),
            }
        }

        out
    }

    #[test]
    fn random_well_nested() {
        for _ in 0..100 {
            let usage = random_nesting(0);
            let grammar = Grammar::new(&usage);
            assert_eq!(validate(&grammar), Ok(()), "'{usage}' should be valid");
            assert_eq!(grammar.position(), 0);
        }
    }

    #[test]
    fn random_one_unmatched() {
        for _ in 0..100 {
            let usage = random_nesting(0);
            let broken = match thread_rng().gen_range(0..4) {
                0 => format!("[{usage}"),
                1 => format!("{usage}]"),
                2 => format!("{{{usage}"),
                _ => format!("{usage}}}"),
            };
            assert!(
                validate(&Grammar::new(&broken)).is_err(),
                "'{broken}' should be invalid"
            );
        }
    }
}
