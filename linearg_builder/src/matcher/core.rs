use crate::constant::*;
use crate::grammar::{validate, Grammar, GrammarError};
use crate::matcher::{CallbackQueue, Failure, MatchError};
use crate::registry::{Registry, Target};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Walks a usage string and the argument tokens side by side.
///
/// There are two cursors: `grammar` into the usage, and `next` into the tokens.
/// Groups back-track by restoring both, and by discarding the callbacks queued while trying the failed alternative.
pub(crate) struct UsageMatcher<'m, 'a> {
    registry: &'m Registry<'a>,
    grammar: Grammar<'m>,
    tokens: &'m [&'m str],
    next: usize,
    queue: CallbackQueue,
}

impl<'m, 'a> UsageMatcher<'m, 'a> {
    pub(crate) fn new(registry: &'m Registry<'a>, usage: &'m str, tokens: &'m [&'m str]) -> Self {
        Self {
            registry,
            grammar: Grammar::new(usage),
            tokens,
            next: 0,
            queue: CallbackQueue::default(),
        }
    }

    /// Match the full usage against the full set of tokens.
    /// On success, returns the callbacks of the matched path (not yet invoked).
    pub(crate) fn consume(mut self) -> Result<CallbackQueue, Failure> {
        validate(&self.grammar)?;

        if let Some(after) = self.grammar.next_alternative(0, self.grammar.end()) {
            return Err(GrammarError::StrayAlternative { at: after - 1 }.into());
        }

        self.match_sequence()?;

        if let Some(c) = self.grammar.peek() {
            unreachable!("internal error - a validated usage cannot stop at '{c}'");
        }

        if let Some(word) = self.tokens.get(self.next) {
            return Err(MatchError::ExtraWord {
                word: word.to_string(),
            }
            .into());
        }

        Ok(self.queue)
    }

    // Match units until the end of the enclosing alternative.
    fn match_sequence(&mut self) -> Result<(), Failure> {
        loop {
            self.grammar.skip_whitespace();

            match self.grammar.peek() {
                None | Some(ALTERNATIVE | ']' | '}') => return Ok(()),
                Some(_) => self.match_thing()?,
            }
        }
    }

    // Match a unit, followed by its repetitions when it is marked with `...`.
    fn match_thing(&mut self) -> Result<(), Failure> {
        let start = self.grammar.position();
        self.match_unit()?;

        if self.grammar.starts_with(REPETITION) {
            let end = self.grammar.position();
            self.repeat(start)?;
            self.grammar.seek(end + REPETITION.len());

            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Repetition of '{}' stopped at token {}.",
                    self.grammar.span(start, end),
                    self.next
                );
            }
        }

        Ok(())
    }

    fn match_unit(&mut self) -> Result<(), Failure> {
        match (self.grammar.peek(), self.grammar.peek_second()) {
            (Some(SHORT_PREFIX), Some(SHORT_PREFIX)) => self.match_long(),
            (Some(SHORT_PREFIX), _) => self.match_short(),
            (Some('['), _) => match self.match_group(']') {
                // An optional group which matched nothing is still a successful unit.
                Err(Failure::Match(_error)) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Optional group skipped: {_error}");
                    }

                    Ok(())
                }
                result => result,
            },
            (Some('{'), _) => self.match_group('}'),
            _ => self.match_param(),
        }
    }

    // Greedily retry the unit starting at `start`, until a retry fails or stops consuming tokens.
    fn repeat(&mut self, start: usize) -> Result<(), Failure> {
        loop {
            let before = self.next;
            self.grammar.seek(start);

            match self.attempt(|m| m.match_unit()) {
                Ok(()) if self.next > before => {}
                Ok(()) | Err(Failure::Match(_)) => return Ok(()),
                Err(error) => return Err(error),
            }
        }
    }

    /// Run `f` in a fresh callback scope.
    /// Success merges the scope into the enclosing queue; failure discards it and rewinds the token cursor.
    fn attempt(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<(), Failure>,
    ) -> Result<(), Failure> {
        let entry = self.next;
        let parent = std::mem::take(&mut self.queue);
        let result = f(self);
        let nested = std::mem::replace(&mut self.queue, parent);

        match &result {
            Ok(()) => nested.merge_into(&mut self.queue),
            Err(_) => {
                nested.discard();
                self.next = entry;
            }
        }

        result
    }

    fn match_group(&mut self, close: char) -> Result<(), Failure> {
        let open_at = self.grammar.position();
        let close_at = self.grammar.group_end(open_at);
        let after = close_at + close.len_utf8();
        self.grammar.bump();

        loop {
            let alternative = self.grammar.position();

            match self.attempt(|m| m.match_sequence()) {
                Ok(()) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!(
                            "Matched alternative '{}'.",
                            self.grammar.span(alternative, self.grammar.position()).trim()
                        );
                    }

                    self.grammar.seek(after);
                    return Ok(());
                }
                Err(Failure::Match(_error)) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Alternative at {alternative} failed: {_error}");
                    }

                    match self.grammar.next_alternative(alternative, close_at) {
                        Some(next) => self.grammar.seek(next),
                        None => {
                            self.grammar.seek(after);
                            return Err(MatchError::MissingGroup {
                                group: self.grammar.span(open_at, after).to_string(),
                            }
                            .into());
                        }
                    }
                }
                Err(error) => return Err(error),
            }
        }
    }

    fn match_short(&mut self) -> Result<(), Failure> {
        let at = self.grammar.position();
        self.grammar.bump();
        let allowed = self.grammar.take_word(true);

        if allowed.is_empty() {
            return Err(GrammarError::EmptyOption { at }.into());
        }

        if self.grammar.peek() == Some(VALUE_DELIMITER) {
            return Err(GrammarError::ShortOptionValue { at }.into());
        }

        let tokens = self.tokens;
        let flags = tokens
            .get(self.next)
            .filter(|token| !token.starts_with(LONG_PREFIX))
            .and_then(|token| token.strip_prefix(SHORT_PREFIX))
            .filter(|flags| !flags.is_empty())
            .ok_or_else(|| MatchError::MissingFlag {
                allowed: allowed.to_string(),
            })?;

        if let Some(flag) = flags.chars().find(|flag| !allowed.contains(*flag)) {
            return Err(MatchError::UnknownFlag {
                flag,
                allowed: allowed.to_string(),
            }
            .into());
        }

        for flag in flags.chars() {
            let (index, option) =
                self.registry
                    .find_short(flag)
                    .ok_or_else(|| {
                        Failure::Unregistered(MatchError::MissingOptionInfo {
                            form: format!("{SHORT_PREFIX}{flag}"),
                        })
                    })?;

            if option.has_callback() {
                self.queue.append(Target::Option(index), flag.to_string());
            }
        }

        self.next += 1;
        Ok(())
    }

    fn match_long(&mut self) -> Result<(), Failure> {
        let at = self.grammar.position();
        self.grammar.bump();
        self.grammar.bump();
        let name = self.grammar.take_word(true);

        if name.is_empty() {
            return Err(GrammarError::EmptyOption { at }.into());
        }

        let param = if self.grammar.peek() == Some(VALUE_DELIMITER) {
            self.grammar.bump();
            let param = self.grammar.take_word(true);

            if param.is_empty() {
                return Err(GrammarError::EmptyValue { at }.into());
            }

            if self.grammar.peek() == Some(VALUE_DELIMITER) {
                return Err(GrammarError::RepeatedValue { at }.into());
            }

            Some(param)
        } else {
            None
        };

        let tokens = self.tokens;
        let (given, value) = match tokens
            .get(self.next)
            .and_then(|token| token.strip_prefix(LONG_PREFIX))
        {
            Some(option) => split_equals_delimiter(option),
            None => {
                return Err(MatchError::MissingLongOption {
                    name: name.to_string(),
                }
                .into());
            }
        };

        if given != name {
            return Err(MatchError::MissingLongOption {
                name: name.to_string(),
            }
            .into());
        }

        let value = match (param, value) {
            (None, Some(_)) => {
                return Err(MatchError::UnexpectedArgument {
                    name: name.to_string(),
                }
                .into());
            }
            (Some(param), None) => {
                return Err(MatchError::MissingArgument {
                    name: name.to_string(),
                    param: param.to_string(),
                }
                .into());
            }
            (Some(param), Some(value)) => Some((param, value)),
            (None, None) => None,
        };

        let (index, option) =
            self.registry
                .find_long(name)
                .ok_or_else(|| {
                    Failure::Unregistered(MatchError::MissingOptionInfo {
                        form: format!("{LONG_PREFIX}{name}"),
                    })
                })?;

        if option.has_callback() {
            self.queue.append(Target::Option(index), name);
        }

        if let Some((param, value)) = value {
            self.queue_param(param, value);
        }

        self.next += 1;
        Ok(())
    }

    fn match_param(&mut self) -> Result<(), Failure> {
        let at = self.grammar.position();
        let name = self.grammar.take_word(false);

        if name.is_empty() {
            return Err(GrammarError::DanglingRepetition { at }.into());
        }

        let tokens = self.tokens;

        match tokens.get(self.next) {
            Some(token) if !token.starts_with(SHORT_PREFIX) => {
                self.queue_param(name, token);
                self.next += 1;
                Ok(())
            }
            _ => Err(MatchError::MissingParameter {
                name: name.to_string(),
            }
            .into()),
        }
    }

    // Parameters needn't be registered; an unregistered one simply has nothing to notify.
    fn queue_param(&mut self, name: &str, value: &str) {
        if let Some((index, param)) = self.registry.find_param(name) {
            if param.has_callback() {
                self.queue.append(Target::Param(index), value);
            }
        }
    }
}

fn split_equals_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once(VALUE_DELIMITER) {
        Some((n, v)) => (n, Some(v)),
        None => (token, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CliOption, Param};
    use rstest::rstest;

    fn registry() -> Registry<'static> {
        let noop = |_: &str| {};
        Registry::new(
            vec![
                CliOption::new("a", "all", "").callback(noop),
                CliOption::new("b", "escape", "").callback(noop),
                CliOption::short("c", "").callback(noop),
                CliOption::new("w", "width", "").callback(noop),
                CliOption::new("h", "help", ""),
            ],
            vec![
                Param::new("WIDTH").callback(noop),
                Param::new("FILE").callback(noop),
                Param::new("PARAM").callback(noop),
            ],
        )
        .unwrap()
    }

    const A: Target = Target::Option(0);
    const B: Target = Target::Option(1);
    const W: Target = Target::Option(3);
    const WIDTH: Target = Target::Param(0);
    const FILE: Target = Target::Param(1);
    const PARAM: Target = Target::Param(2);

    fn consume(usage: &str, tokens: &[&str]) -> Result<Vec<(Target, String)>, Failure> {
        let registry = registry();
        UsageMatcher::new(&registry, usage, tokens)
            .consume()
            .map(|queue| queue.entries().to_vec())
    }

    fn queued(entries: Vec<(Target, &str)>) -> Vec<(Target, String)> {
        entries
            .into_iter()
            .map(|(target, argument)| (target, argument.to_string()))
            .collect()
    }

    #[rstest]
    #[case("-ab", vec!["-a"], vec![(A, "a")])]
    #[case("-ab", vec!["-ab"], vec![(A, "a"), (B, "b")])]
    #[case("-ab", vec!["-ba"], vec![(B, "b"), (A, "a")])]
    #[case("-ab", vec!["-aa"], vec![(A, "a"), (A, "a")])]
    fn short(#[case] usage: &str, #[case] tokens: Vec<&str>, #[case] expected: Vec<(Target, &str)>) {
        assert_eq!(consume(usage, &tokens).unwrap(), queued(expected));
    }

    #[rstest]
    #[case(vec!["-c"], MatchError::UnknownFlag { flag: 'c', allowed: "ab".to_string() })]
    #[case(vec!["-ac"], MatchError::UnknownFlag { flag: 'c', allowed: "ab".to_string() })]
    #[case(vec!["--all"], MatchError::MissingFlag { allowed: "ab".to_string() })]
    #[case(vec!["-"], MatchError::MissingFlag { allowed: "ab".to_string() })]
    #[case(vec!["a"], MatchError::MissingFlag { allowed: "ab".to_string() })]
    #[case(vec![], MatchError::MissingFlag { allowed: "ab".to_string() })]
    fn short_invalid(#[case] tokens: Vec<&str>, #[case] expected: MatchError) {
        assert_eq!(consume("-ab", &tokens).unwrap_err(), Failure::Match(expected));
    }

    #[test]
    fn short_unregistered() {
        assert_eq!(
            consume("-ax", &["-x"]).unwrap_err(),
            Failure::Unregistered(MatchError::MissingOptionInfo {
                form: "-x".to_string()
            })
        );
    }

    #[rstest]
    #[case("[-x | FILE]", vec!["-x"], "-x")]
    #[case("{-x | FILE}", vec!["-x"], "-x")]
    #[case("[--nope]...", vec!["--nope"], "--nope")]
    fn unregistered_not_backtracked(#[case] usage: &str, #[case] tokens: Vec<&str>, #[case] form: &str) {
        assert_eq!(
            consume(usage, &tokens).unwrap_err(),
            Failure::Unregistered(MatchError::MissingOptionInfo {
                form: form.to_string()
            })
        );
    }

    #[test]
    fn short_without_callback() {
        assert_eq!(consume("-h", &["-h"]).unwrap(), vec![]);
    }

    #[test]
    fn long_with_value() {
        assert_eq!(
            consume("--width=WIDTH", &["--width=80"]).unwrap(),
            queued(vec![(W, "width"), (WIDTH, "80")])
        );
    }

    #[rstest]
    #[case("--width=WIDTH", vec!["--width"], MatchError::MissingArgument { name: "width".to_string(), param: "WIDTH".to_string() })]
    #[case("--width=WIDTH", vec!["--height=80"], MatchError::MissingLongOption { name: "width".to_string() })]
    #[case("--width=WIDTH", vec!["--wid=80"], MatchError::MissingLongOption { name: "width".to_string() })]
    #[case("--width=WIDTH", vec!["-w"], MatchError::MissingLongOption { name: "width".to_string() })]
    #[case("--width=WIDTH", vec![], MatchError::MissingLongOption { name: "width".to_string() })]
    #[case("--all", vec!["--all=yes"], MatchError::UnexpectedArgument { name: "all".to_string() })]
    fn long_invalid(#[case] usage: &str, #[case] tokens: Vec<&str>, #[case] expected: MatchError) {
        assert_eq!(consume(usage, &tokens).unwrap_err(), Failure::Match(expected));
    }

    #[test]
    fn long_empty_value() {
        assert_eq!(
            consume("--width=WIDTH", &["--width="]).unwrap(),
            queued(vec![(W, "width"), (WIDTH, "")])
        );
    }

    #[test]
    fn long_unregistered_param() {
        assert_eq!(
            consume("--width=COLS", &["--width=80"]).unwrap(),
            queued(vec![(W, "width")])
        );
    }

    #[rstest]
    #[case(vec!["f.txt"], vec![(FILE, "f.txt")])]
    #[case(vec!["-a", "f.txt"], vec![(A, "a"), (FILE, "f.txt")])]
    fn optional(#[case] tokens: Vec<&str>, #[case] expected: Vec<(Target, &str)>) {
        assert_eq!(consume("[-a] FILE", &tokens).unwrap(), queued(expected));
    }

    #[rstest]
    #[case(vec!["-a"], MatchError::MissingParameter { name: "FILE".to_string() })]
    #[case(vec![], MatchError::MissingParameter { name: "FILE".to_string() })]
    #[case(vec!["f.txt", "g.txt"], MatchError::ExtraWord { word: "g.txt".to_string() })]
    #[case(vec!["-b", "f.txt"], MatchError::MissingParameter { name: "FILE".to_string() })]
    fn optional_invalid(#[case] tokens: Vec<&str>, #[case] expected: MatchError) {
        assert_eq!(consume("[-a] FILE", &tokens).unwrap_err(), Failure::Match(expected));
    }

    #[test]
    fn repetition() {
        assert_eq!(
            consume("PARAM...", &["x", "y", "z"]).unwrap(),
            queued(vec![(PARAM, "x"), (PARAM, "y"), (PARAM, "z")])
        );
        assert_eq!(
            consume("PARAM...", &[]).unwrap_err(),
            Failure::Match(MatchError::MissingParameter {
                name: "PARAM".to_string()
            })
        );
    }

    #[test]
    fn repetition_stops_before_option() {
        assert_eq!(
            consume("PARAM... [-a]", &["x", "y", "-a"]).unwrap(),
            queued(vec![(PARAM, "x"), (PARAM, "y"), (A, "a")])
        );
    }

    #[rstest]
    #[case("[-a | -b]...", vec![], vec![])]
    #[case("[-a | -b]...", vec!["-b", "-a", "-b"], vec![(B, "b"), (A, "a"), (B, "b")])]
    #[case("{-a | -b}...", vec!["-b", "-a"], vec![(B, "b"), (A, "a")])]
    #[case("[-a]... FILE", vec!["-a", "-a", "f"], vec![(A, "a"), (A, "a"), (FILE, "f")])]
    fn group_repetition(
        #[case] usage: &str,
        #[case] tokens: Vec<&str>,
        #[case] expected: Vec<(Target, &str)>,
    ) {
        assert_eq!(consume(usage, &tokens).unwrap(), queued(expected));
    }

    #[test]
    fn required_group_repetition_needs_one() {
        assert_eq!(
            consume("{-a | -b}...", &[]).unwrap_err(),
            Failure::Match(MatchError::MissingGroup {
                group: "{-a | -b}".to_string()
            })
        );
    }

    #[test]
    fn alternation_rollback() {
        assert_eq!(
            consume("{-a | -b}", &["-c"]).unwrap_err(),
            Failure::Match(MatchError::MissingGroup {
                group: "{-a | -b}".to_string()
            })
        );
    }

    #[test]
    fn alternative_rewinds_tokens() {
        // The first alternative consumes '-a' before failing on FILE.
        assert_eq!(
            consume("{-a FILE | -a -b}", &["-a", "-b"]).unwrap(),
            queued(vec![(A, "a"), (B, "b")])
        );
    }

    #[test]
    fn nested_groups() {
        let usage = "{ PARAM... | [-a | --width=WIDTH [-b]] }";
        assert_eq!(
            consume(usage, &["--width=3", "-b"]).unwrap(),
            queued(vec![(W, "width"), (WIDTH, "3"), (B, "b")])
        );
        assert_eq!(
            consume(usage, &["x", "y"]).unwrap(),
            queued(vec![(PARAM, "x"), (PARAM, "y")])
        );
        assert_eq!(consume(usage, &[]).unwrap(), vec![]);
    }

    #[test]
    fn empty_alternative() {
        assert_eq!(consume("{ | -a}", &[]).unwrap(), vec![]);
        assert_eq!(
            consume("{ | -a}", &["-a"]).unwrap_err(),
            Failure::Match(MatchError::ExtraWord {
                word: "-a".to_string()
            })
        );
    }

    #[rstest]
    #[case("", vec![])]
    #[case("-a", vec!["-a", "-a"])]
    #[case("[-a]", vec!["-b"])]
    #[case("FILE", vec!["f", "--all"])]
    fn extra_word(#[case] usage: &str, #[case] tokens: Vec<&str>) {
        let expected = if tokens.is_empty() {
            Ok(vec![])
        } else {
            Err(Failure::Match(MatchError::ExtraWord {
                word: tokens.last().unwrap().to_string(),
            }))
        };
        assert_eq!(consume(usage, &tokens), expected);
    }

    #[rstest]
    #[case("[-a", GrammarError::Unclosed { open: '[', at: 0 })]
    #[case("-a | -b", GrammarError::StrayAlternative { at: 3 })]
    #[case("[-a | -b] | FILE", GrammarError::StrayAlternative { at: 10 })]
    #[case("- FILE", GrammarError::EmptyOption { at: 0 })]
    #[case("-- FILE", GrammarError::EmptyOption { at: 0 })]
    #[case("--width= FILE", GrammarError::EmptyValue { at: 0 })]
    #[case("-w=WIDTH", GrammarError::ShortOptionValue { at: 0 })]
    #[case("--all=B=C", GrammarError::RepeatedValue { at: 0 })]
    #[case("[-a | --width=W=X]", GrammarError::RepeatedValue { at: 6 })]
    #[case("FILE ...", GrammarError::DanglingRepetition { at: 5 })]
    fn grammar_invalid(#[case] usage: &str, #[case] expected: GrammarError) {
        assert_eq!(
            consume(usage, &["f"]).unwrap_err(),
            Failure::Grammar(expected)
        );
    }

    #[test]
    fn grammar_error_inside_optional_group() {
        assert_eq!(
            consume("[-a | FILE ...]", &["f"]).unwrap_err(),
            Failure::Grammar(GrammarError::DanglingRepetition { at: 11 })
        );
    }
}
