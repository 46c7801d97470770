//semantic diagnostics,
//hard errors stop the pipeline at the first offending construct,
//warnings are collected and reported without stopping it

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone)]
pub struct SemanticError {
    pub message: String,
    pub line: u32,
    pub col: u32,
}

impl SemanticError {
    pub fn new(message: impl Into<String>, line: u32, col: u32) -> Self {
        SemanticError {
            message: message.into(),
            line,
            col,
        }
    }
}

impl Display for SemanticError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (line {}, column {})",
            self.message, self.line, self.col
        )
    }
}

impl std::error::Error for SemanticError {}

#[derive(Debug, Clone)]
pub struct SemanticWarning {
    pub message: String,
    pub line: u32,
    pub col: u32,
}

impl Display for SemanticWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (line {}, column {})",
            self.message, self.line, self.col
        )
    }
}
