use crate::api::Callback;

/// A named switch of the Cli, referenced by the usage strings as `-x` or `--name`.
///
/// ### Example
/// ```
/// # use linearg_builder as linearg;
/// use linearg::CliOption;
/// use std::cell::Cell;
///
/// let all = Cell::new(false);
/// let option = CliOption::new("a", "all", "do not ignore entries starting with .")
///     .callback(|_| all.set(true));
/// ```
pub struct CliOption<'a> {
    shorts: Vec<char>,
    longs: Vec<String>,
    description: String,
    callback: Option<Callback<'a>>,
}

impl<'a> std::fmt::Debug for CliOption<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliOption")
            .field("shorts", &self.shorts)
            .field("longs", &self.longs)
            .finish()
    }
}

impl<'a> CliOption<'a> {
    /// Create an option with both short and long forms.
    ///
    /// Each character of `short` is an independent alias (ex: `"hH"` matches both `-h` and `-H`).
    /// An empty `short` or `long` leaves that form absent.
    pub fn new(
        short: impl Into<String>,
        long: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let long = long.into();
        Self {
            shorts: short.into().chars().collect(),
            longs: if long.is_empty() { vec![] } else { vec![long] },
            description: description.into(),
            callback: None,
        }
    }

    /// Create an option with only short forms.
    pub fn short(short: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(short, "", description)
    }

    /// Create an option with only a long form.
    pub fn long(long: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new("", long, description)
    }

    /// Add another long form for this option.
    pub fn alias(mut self, long: impl Into<String>) -> Self {
        self.longs.push(long.into());
        self
    }

    /// Set the callback for when this option is matched.
    /// If repeated, only the final callback will apply.
    ///
    /// The callback receives the form that matched: the single short character for `-x`, or the long word for `--name`.
    pub fn callback(mut self, callback: impl FnMut(&str) + 'a) -> Self {
        self.callback.replace(Box::new(callback));
        self
    }

    pub(crate) fn shorts(&self) -> &[char] {
        &self.shorts
    }

    pub(crate) fn longs(&self) -> &[String] {
        &self.longs
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    pub(crate) fn invoke(&mut self, argument: &str) {
        if let Some(callback) = self.callback.as_mut() {
            callback(argument);
        }
    }
}
