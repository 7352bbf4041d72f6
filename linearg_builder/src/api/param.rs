use crate::api::Callback;

/// A named value slot of the Cli.
///
/// The name matches bare words in the usage strings (ex: `FILE`), as well as the right hand side of long options (ex: `--width=WIDTH`).
pub struct Param<'a> {
    name: String,
    callback: Option<Callback<'a>>,
}

impl<'a> std::fmt::Debug for Param<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Param").field("name", &self.name).finish()
    }
}

impl<'a> Param<'a> {
    /// Create a parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callback: None,
        }
    }

    /// Set the callback for when this parameter is matched.
    /// If repeated, only the final callback will apply.
    ///
    /// The callback receives the literal value text, in the order the values were read.
    ///
    /// ### Example
    /// ```
    /// # use linearg_builder as linearg;
    /// use linearg::Param;
    ///
    /// let mut files: Vec<String> = Vec::default();
    /// let param = Param::new("FILE").callback(|file| files.push(file.to_string()));
    /// ```
    pub fn callback(mut self, callback: impl FnMut(&str) + 'a) -> Self {
        self.callback.replace(Box::new(callback));
        self
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
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
