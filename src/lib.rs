//TinyLang to C++ source-to-source compiler.
//The pipeline runs lexer, parser, semantic analysis, constant folding
//and C++ emission in order; the first failing pass aborts the compilation.

pub mod ast;
pub mod builtins;
pub mod emitter;
pub mod error;
pub mod lexer_tokenizer;
pub mod optimizer;
pub mod parser;
pub mod semantic;

use crate::error::CompilerError;
use crate::lexer_tokenizer::Token;
use crate::semantic::SemanticWarning;

pub struct CompiledProgram {
    pub cpp_source: String,
    pub warnings: Vec<SemanticWarning>,
}

pub fn compile(source: &str) -> Result<CompiledProgram, CompilerError> {
    let tokens = lexer_tokenizer::lex_with_positions(source);
    if let Some(bad) = tokens.iter().find(|t| matches!(t.token, Token::Error)) {
        let message = if bad.text.starts_with('"') {
            "Unterminated string literal".to_string()
        } else {
            format!("Unexpected character: {}", bad.text)
        };
        return Err(CompilerError::Lexer {
            message,
            line: bad.line,
            col: bad.col,
        });
    }

    let mut program = parser::Parser::new(&tokens).parse_program()?;
    let warnings = semantic::analyze(&program)?;
    optimizer::optimize(&mut program);
    let cpp_source = emitter::generate(&program);

    Ok(CompiledProgram {
        cpp_source,
        warnings,
    })
}
