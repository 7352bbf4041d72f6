use std::collections::HashSet;

use crate::api::{CliOption, Param};
use crate::parser::ConfigError;

/// Identifies the owner of a queued callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Option(usize),
    Param(usize),
}

/// The options and parameters a usage string may reference.
#[derive(Debug)]
pub(crate) struct Registry<'a> {
    options: Vec<CliOption<'a>>,
    params: Vec<Param<'a>>,
}

impl<'a> Registry<'a> {
    pub(crate) fn new(options: Vec<CliOption<'a>>, params: Vec<Param<'a>>) -> Result<Self, ConfigError> {
        let mut shorts = HashSet::new();
        let mut longs = HashSet::new();
        let mut names = HashSet::new();

        for option in &options {
            if option.shorts().is_empty() && option.longs().is_empty() {
                return Err(ConfigError(format!(
                    "The option '{}' needs a short or long form.",
                    option.description()
                )));
            }

            for short in option.shorts() {
                if !shorts.insert(*short) {
                    return Err(ConfigError(format!(
                        "Cannot duplicate the short option '-{short}'."
                    )));
                }
            }

            for long in option.longs() {
                if !longs.insert(long.as_str()) {
                    return Err(ConfigError(format!(
                        "Cannot duplicate the option '--{long}'."
                    )));
                }
            }
        }

        for param in &params {
            if !names.insert(param.name()) {
                return Err(ConfigError(format!(
                    "Cannot duplicate the parameter '{}'.",
                    param.name()
                )));
            }
        }

        Ok(Self { options, params })
    }

    pub(crate) fn options(&self) -> &[CliOption<'a>] {
        &self.options
    }

    pub(crate) fn find_short(&self, short: char) -> Option<(usize, &CliOption<'a>)> {
        self.options
            .iter()
            .enumerate()
            .find(|(_, option)| option.shorts().contains(&short))
    }

    pub(crate) fn find_long(&self, long: &str) -> Option<(usize, &CliOption<'a>)> {
        self.options
            .iter()
            .enumerate()
            .find(|(_, option)| option.longs().iter().any(|l| l == long))
    }

    pub(crate) fn find_param(&self, name: &str) -> Option<(usize, &Param<'a>)> {
        self.params
            .iter()
            .enumerate()
            .find(|(_, param)| param.name() == name)
    }

    pub(crate) fn invoke(&mut self, target: Target, argument: &str) {
        match target {
            Target::Option(index) => self.options[index].invoke(argument),
            Target::Param(index) => self.params[index].invoke(argument),
        }
    }
}
