//phase-tagged pipeline errors for the driver,
//each variant keeps the position of the first offending construct

use std::fmt::{self, Display, Formatter};

use crate::parser::ParseError;
use crate::semantic::SemanticError;

#[derive(Debug, Clone)]
pub enum CompilerError {
    Lexer { message: String, line: u32, col: u32 },
    Parser { message: String, line: u32, col: u32 },
    Semantic { message: String, line: u32, col: u32 },
}

impl CompilerError {
    pub fn phase(&self) -> &'static str {
        match self {
            CompilerError::Lexer { .. } => "lexer",
            CompilerError::Parser { .. } => "parser",
            CompilerError::Semantic { .. } => "semantic",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CompilerError::Lexer { message, .. }
            | CompilerError::Parser { message, .. }
            | CompilerError::Semantic { message, .. } => message,
        }
    }

    pub fn position(&self) -> (u32, u32) {
        match self {
            CompilerError::Lexer { line, col, .. }
            | CompilerError::Parser { line, col, .. }
            | CompilerError::Semantic { line, col, .. } => (*line, *col),
        }
    }
}

impl Display for CompilerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (line, col) = self.position();
        write!(
            f,
            "{} error: {} (line {}, column {})",
            self.phase(),
            self.message(),
            line,
            col
        )
    }
}

impl std::error::Error for CompilerError {}

impl From<ParseError> for CompilerError {
    fn from(e: ParseError) -> Self {
        CompilerError::Parser {
            message: e.message,
            line: e.line,
            col: e.col,
        }
    }
}

impl From<SemanticError> for CompilerError {
    fn from(e: SemanticError) -> Self {
        CompilerError::Semantic {
            message: e.message,
            line: e.line,
            col: e.col,
        }
    }
}
