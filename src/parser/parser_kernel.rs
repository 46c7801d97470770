//parser state and the token-level helpers,
//plus the top level: function declarations and global statements

use std::mem::discriminant;

use crate::ast::{FuncDecl, Item, Param, Program, Type};
use crate::lexer_tokenizer::{PositionedToken, Token};
use crate::parser::parser_error::ParseError;

pub struct Parser<'a> {
    pub tokens: &'a [PositionedToken],
    pub pos: usize,
}

impl<'a> Parser<'a> {
    // The token stream must end with EndOfFile, as lex_with_positions guarantees.
    pub fn new(tokens: &'a [PositionedToken]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn current(&self) -> &PositionedToken {
        &self.tokens[self.pos]
    }

    // Consumes and returns the current token; never moves past EndOfFile.
    pub fn advance(&mut self) -> PositionedToken {
        let tok = self.tokens[self.pos].clone();
        if !matches!(tok.token, Token::EndOfFile) {
            self.pos += 1;
        }
        tok
    }

    // Kind comparison only; payloads of Identifier and literal tokens are ignored.
    pub fn check(&self, expected: &Token) -> bool {
        discriminant(&self.current().token) == discriminant(expected)
    }

    pub fn match_token(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, expected: &Token, message: &str) -> Result<PositionedToken, ParseError> {
        if self.check(expected) {
            Ok(self.advance())
        } else {
            Err(self.error_here(message))
        }
    }

    pub fn expect_identifier(&mut self, message: &str) -> Result<(String, u32, u32), ParseError> {
        match &self.current().token {
            Token::Identifier(name) => {
                let name = name.clone();
                let tok = self.advance();
                Ok((name, tok.line, tok.col))
            }
            _ => Err(self.error_here(message)),
        }
    }

    pub fn error_here(&self, message: &str) -> ParseError {
        let tok = self.current();
        ParseError::new(message, tok.line, tok.col)
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::default();
        while !matches!(self.current().token, Token::EndOfFile) {
            if self.check(&Token::Func) {
                program.items.push(Item::Function(self.parse_function()?));
            } else {
                program.items.push(Item::Statement(self.parse_statement()?));
            }
        }
        Ok(program)
    }

    pub fn parse_function(&mut self) -> Result<FuncDecl, ParseError> {
        self.expect(&Token::Func, "Expected 'func'")?;
        let (name, line, col) = self.expect_identifier("Expected function name")?;
        self.expect(&Token::LParen, "Expected '(' after function name")?;

        let mut params = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                params.push(self.parse_parameter()?);
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(&Token::RParen, "Expected ')' after parameters")?;

        let return_type = if self.match_token(&Token::Arrow) {
            Some(self.parse_type_name("Expected return type after '->'")?)
        } else {
            None
        };

        let body = self.parse_block()?;
        Ok(FuncDecl {
            name,
            params,
            return_type,
            body,
            line,
            col,
        })
    }

    fn parse_parameter(&mut self) -> Result<Param, ParseError> {
        let mut ty = None;
        if let Token::Identifier(text) = &self.current().token {
            if let Some(t) = Type::from_name(text) {
                ty = Some(t);
                self.advance();
            }
        }
        let (name, _, _) = self.expect_identifier("Expected parameter name")?;
        Ok(Param { ty, name })
    }

    pub fn parse_type_name(&mut self, message: &str) -> Result<Type, ParseError> {
        if let Token::Identifier(text) = &self.current().token {
            if let Some(ty) = Type::from_name(text) {
                self.advance();
                return Ok(ty);
            }
        }
        Err(self.error_here(message))
    }
}
