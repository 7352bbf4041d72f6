use terminal_size::{terminal_size, Width};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::CliOption;
use crate::constant::*;

/// Renders the help message from the usages and registered options.
#[derive(Debug)]
pub(crate) struct Printer {
    header: Option<String>,
    footer: Option<String>,
    terminal_width: Option<usize>,
}

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(None, None, None)
    }

    pub(crate) fn terminal(header: Option<String>, footer: Option<String>) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(header, footer, terminal_width)
    }

    pub(crate) fn new(
        header: Option<String>,
        footer: Option<String>,
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            header,
            footer,
            terminal_width,
        }
    }

    pub(crate) fn render(
        &self,
        program: &str,
        usages: &[String],
        options: &[CliOption],
    ) -> Vec<String> {
        let mut lines = Vec::default();

        for (i, usage) in usages.iter().enumerate() {
            let prefix = if i == 0 { "usage:" } else { "   or:" };
            lines.push(format!("{prefix} {program} {usage}"));
        }

        if let Some(header) = &self.header {
            lines.push("".to_string());
            lines.extend(header.lines().map(String::from));
        }

        if !options.is_empty() {
            let forms: Vec<String> = options.iter().map(option_forms).collect();
            let left = forms.iter().map(|f| f.len()).max().unwrap_or(0);
            let width = self.description_width(left);
            let indent = MAIN_INDENT;
            let padding = PADDING_WIDTH;
            lines.push("".to_string());
            lines.push("options:".to_string());

            for (form, option) in forms.iter().zip(options) {
                let parts = chunk(option.description(), width);

                if parts.is_empty() {
                    lines.push(format!("{:indent$}{form}", ""));
                }

                for (i, part) in parts.iter().enumerate() {
                    let form = if i == 0 { form.as_str() } else { "" };
                    lines.push(format!("{:indent$}{form:left$}{:padding$}{part}", "", ""));
                }
            }
        }

        if let Some(footer) = &self.footer {
            lines.push("".to_string());
            lines.extend(footer.lines().map(String::from));
        }

        lines
    }

    fn description_width(&self, left: usize) -> usize {
        match self.terminal_width {
            Some(terminal_width) => {
                let available = terminal_width.saturating_sub(MAIN_INDENT + left + PADDING_WIDTH);
                let width = available.clamp(MINIMUM_DESCRIPTION_WIDTH, MAX_DESCRIPTION_WIDTH);

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Terminal width {terminal_width} leaves {available}.  Selecting description width: {width}.");
                }

                width
            }
            None => MAX_DESCRIPTION_WIDTH,
        }
    }
}

fn option_forms(option: &CliOption) -> String {
    option
        .shorts()
        .iter()
        .map(|short| format!("{SHORT_PREFIX}{short}"))
        .chain(option.longs().iter().map(|long| format!("{LONG_PREFIX}{long}")))
        .collect::<Vec<String>>()
        .join(", ")
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() < width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;

    while characters.len() - left > width {
        let part: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{part}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}
