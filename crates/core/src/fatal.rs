//! Messages handed to the fatal-log primitive

use std::fmt::{self, Display};

/// The text of a fatal termination.
///
/// The three variants correspond to the three fatal entry points; they only
/// differ in how the operands are laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FatalMessage {
    /// Operands concatenated without separators
    Plain(String),
    /// Output of a format string
    Formatted(String),
    /// One operand per line
    Lines(Vec<String>),
}

impl FatalMessage {
    /// Concatenate already rendered operands
    pub fn plain<I, S>(operands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut message = String::new();
        for operand in operands {
            message.push_str(operand.as_ref());
        }
        FatalMessage::Plain(message)
    }

    pub fn formatted(args: fmt::Arguments<'_>) -> Self {
        FatalMessage::Formatted(fmt::format(args))
    }

    pub fn lines<I, S>(operands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FatalMessage::Lines(operands.into_iter().map(Into::into).collect())
    }

    /// Render the message, always terminated by exactly one newline.
    pub fn render(&self) -> String {
        let mut text = match self {
            FatalMessage::Plain(message) | FatalMessage::Formatted(message) => message.clone(),
            FatalMessage::Lines(lines) => lines.join("\n"),
        };
        while text.ends_with('\n') {
            text.pop();
        }
        text.push('\n');
        text
    }
}

impl Display for FatalMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render().trim_end_matches('\n'))
    }
}
