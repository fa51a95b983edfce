//! Console printer utility with color support.

use serde::{Deserialize, Serialize};

/// Available colors for printed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrinterColor {
    Red,
    Green,
    Yellow,
    Purple,
    BoldGreen,
    BoldYellow,
    BoldPurple,
}

impl PrinterColor {
    /// ANSI escape code for this color.
    fn ansi_code(&self) -> &'static str {
        match self {
            Self::Red => "\x1b[31m",
            Self::Green => "\x1b[32m",
            Self::Yellow => "\x1b[33m",
            Self::Purple => "\x1b[35m",
            Self::BoldGreen => "\x1b[1;32m",
            Self::BoldYellow => "\x1b[1;33m",
            Self::BoldPurple => "\x1b[1;35m",
        }
    }
}

/// ANSI reset code.
const RESET: &str = "\x1b[0m";

/// Printer for console output with color support.
#[derive(Debug, Clone, Default)]
pub struct Printer;

impl Printer {
    /// Create a new `Printer`.
    pub fn new() -> Self {
        Self
    }

    /// Print a message with the specified color.
    pub fn print(&self, content: &str, color: PrinterColor) {
        println!("{}{}{}", color.ansi_code(), content, RESET);
    }
}
