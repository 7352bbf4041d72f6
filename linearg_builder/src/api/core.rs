use crate::api::{CliOption, Param};
use crate::parser::{ConfigError, ConsoleInterface, Printer, UsageParser, UserInterface};
use crate::registry::Registry;

/// The command line parser builder.
///
/// ### Example
/// ```
/// # use linearg_builder as linearg;
/// use linearg::{CliOption, CommandLineParser};
///
/// let mut parser = CommandLineParser::new("program")
///     .usage("[-v]")
///     .option(CliOption::new("v", "verbose", "Print more."))
///     // Configure with CommandLineParser::usage, CommandLineParser::option, and CommandLineParser::param.
///     .build();
/// parser.parse_tokens(&[]).unwrap();
/// ```
pub struct CommandLineParser<'a> {
    program: String,
    header: Option<String>,
    footer: Option<String>,
    usages: Vec<String>,
    options: Vec<CliOption<'a>>,
    params: Vec<Param<'a>>,
}

impl<'a> CommandLineParser<'a> {
    /// Create a command line parser.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            header: None,
            footer: None,
            usages: Vec::default(),
            options: Vec::default(),
            params: Vec::default(),
        }
    }

    /// Document the header of the help message, printed right after the usages.
    /// If repeated, only the final header will apply.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header.replace(header.into());
        self
    }

    /// Document the footer of the help message, printed after all the options.
    /// If repeated, only the final footer will apply.
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer.replace(footer.into());
        self
    }

    /// Add a usage string: one valid shape of the program's invocation.
    ///
    /// The usage grammar:
    /// * `-abc`: one token of bundled short flags, each of which must be among `a`, `b`, `c`.
    /// * `--name` and `--name=PARAM`: one long option token, with its value handed to `PARAM`.
    /// * `NAME`: one positional token for the parameter `NAME`.
    /// * `[ .. ]`: an optional group; `{ .. }`: a required group.
    /// * `|`: separates the alternatives of the nearest enclosing group.
    /// * `...`: repeats the unit right before it (ex: `FILE...`, `[-v]...`).
    ///
    /// Usages are addressed by the order they were added, starting at `0`.
    /// Usage strings are checked when they are matched, not here.
    ///
    /// ### Example
    /// ```
    /// # use linearg_builder as linearg;
    /// use linearg::{CliOption, CommandLineParser};
    ///
    /// let mut parser = CommandLineParser::new("program")
    ///     .usage("{-a | -b}")
    ///     .usage("--help")
    ///     .option(CliOption::short("a", "The a."))
    ///     .option(CliOption::short("b", "The b."))
    ///     .option(CliOption::long("help", "Show this help message and exit."))
    ///     .build();
    ///
    /// assert_eq!(parser.parse_tokens(&["--help"]).unwrap(), 1);
    /// ```
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usages.push(usage.into());
        self
    }

    /// Register an option referenced by the usage strings.
    pub fn option(mut self, option: CliOption<'a>) -> Self {
        self.options.push(option);
        self
    }

    /// Register a parameter referenced by the usage strings.
    ///
    /// Registering parameters isn't required, but it is how the program is notified of the values it received.
    pub fn param(mut self, param: Param<'a>) -> Self {
        self.params.push(param);
        self
    }

    fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<UsageParser<'a>, ConfigError> {
        if self.usages.is_empty() {
            return Err(ConfigError(
                "At least one usage must be added.".to_string(),
            ));
        }

        if self.usages.iter().any(|usage| usage.trim().is_empty()) {
            return Err(ConfigError("Cannot add an empty usage.".to_string()));
        }

        let registry = Registry::new(self.options, self.params)?;
        Ok(UsageParser::new(
            self.program,
            self.usages,
            registry,
            Printer::terminal(self.header, self.footer),
            user_interface,
        ))
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated option name).
    pub fn build_parser(self) -> Result<UsageParser<'a>, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated option name).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> UsageParser<'a> {
        match self.build_parser() {
            Ok(parser) => parser,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
