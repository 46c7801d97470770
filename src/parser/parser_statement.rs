//statement grammar,
//dispatch on the leading token, with typed declarations recognized
//by the reserved type names at statement position

use crate::ast::{Block, ExprKind, Stmt, StmtKind};
use crate::lexer_tokenizer::Token;
use crate::parser::{parser_error::ParseError, parser_kernel::Parser};

impl<'a> Parser<'a> {
    pub fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let tok = self.current().clone();
        match &tok.token {
            Token::Let => {
                self.advance();
                self.parse_let(tok.line, tok.col)
            }
            Token::For => {
                self.advance();
                self.parse_for(tok.line, tok.col)
            }
            Token::If => {
                self.advance();
                self.parse_if(tok.line, tok.col)
            }
            Token::Print => {
                self.advance();
                self.parse_print(false, tok.line, tok.col)
            }
            Token::Println => {
                self.advance();
                self.parse_print(true, tok.line, tok.col)
            }
            Token::Return => {
                self.advance();
                self.parse_return(tok.line, tok.col)
            }
            Token::LBrace => {
                let block = self.parse_block()?;
                Ok(Stmt {
                    line: block.line,
                    col: block.col,
                    kind: StmtKind::Block(block),
                })
            }
            Token::Identifier(text) if matches!(text.as_str(), "int" | "float" | "string") => {
                self.parse_typed_decl()
            }
            _ => self.parse_expression_statement(),
        }
    }

    pub fn parse_block(&mut self) -> Result<Block, ParseError> {
        let open = self.expect(&Token::LBrace, "Expected '{'")?;
        let mut statements = Vec::new();
        while !self.check(&Token::RBrace) && !matches!(self.current().token, Token::EndOfFile) {
            statements.push(self.parse_statement()?);
        }
        self.expect(&Token::RBrace, "Expected '}'")?;
        Ok(Block {
            statements,
            line: open.line,
            col: open.col,
        })
    }

    fn parse_let(&mut self, line: u32, col: u32) -> Result<Stmt, ParseError> {
        let (name, _, _) = self.expect_identifier("Expected variable name after 'let'")?;
        self.expect(&Token::Assign, "Expected '=' after variable name")?;
        let value = self.parse_expression()?;
        self.expect(&Token::Semicolon, "Expected ';' after declaration")?;
        Ok(Stmt {
            kind: StmtKind::Let { name, value },
            line,
            col,
        })
    }

    fn parse_typed_decl(&mut self) -> Result<Stmt, ParseError> {
        let tok = self.current().clone();
        let ty = self.parse_type_name("Expected type name")?;

        let mut is_array = false;
        let mut array_size = None;
        if self.match_token(&Token::LBracket) {
            is_array = true;
            if !self.check(&Token::RBracket) {
                array_size = Some(self.parse_expression()?);
            }
            self.expect(&Token::RBracket, "Expected ']' after array size")?;
        }

        let (name, _, _) = self.expect_identifier("Expected variable name")?;
        let init = if self.match_token(&Token::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect(&Token::Semicolon, "Expected ';' after declaration")?;
        Ok(Stmt {
            kind: StmtKind::TypedDecl {
                name,
                ty,
                is_array,
                array_size,
                init,
            },
            line: tok.line,
            col: tok.col,
        })
    }

    fn parse_for(&mut self, line: u32, col: u32) -> Result<Stmt, ParseError> {
        self.expect(&Token::LParen, "Expected '(' after 'for'")?;

        let init = if self.match_token(&Token::Semicolon) {
            None
        } else if self.check(&Token::Let) {
            let tok = self.advance();
            Some(Box::new(self.parse_let(tok.line, tok.col)?))
        } else if self.is_type_name_ahead() {
            Some(Box::new(self.parse_typed_decl()?))
        } else {
            let (target, tline, tcol) =
                self.expect_identifier("Expected identifier in for-initializer")?;
            self.expect(&Token::Assign, "Expected '=' in for-initializer")?;
            let value = self.parse_expression()?;
            self.expect(&Token::Semicolon, "Expected ';' after for-initializer")?;
            Some(Box::new(Stmt {
                kind: StmtKind::Assign {
                    target,
                    index: None,
                    value,
                },
                line: tline,
                col: tcol,
            }))
        };

        let condition = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&Token::Semicolon, "Expected ';' after loop condition")?;

        let update = if self.check(&Token::RParen) {
            None
        } else {
            let (target, tline, tcol) = self.expect_identifier("Expected identifier in for-update")?;
            self.expect(&Token::Assign, "Expected '=' in for-update")?;
            let value = self.parse_expression()?;
            Some(Box::new(Stmt {
                kind: StmtKind::Assign {
                    target,
                    index: None,
                    value,
                },
                line: tline,
                col: tcol,
            }))
        };
        self.expect(&Token::RParen, "Expected ')' after for clauses")?;

        let body = self.parse_block()?;
        Ok(Stmt {
            kind: StmtKind::For {
                init,
                condition,
                update,
                body,
            },
            line,
            col,
        })
    }

    fn is_type_name_ahead(&self) -> bool {
        matches!(
            &self.current().token,
            Token::Identifier(text) if matches!(text.as_str(), "int" | "float" | "string")
        )
    }

    fn parse_if(&mut self, line: u32, col: u32) -> Result<Stmt, ParseError> {
        self.expect(&Token::LParen, "Expected '(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect(&Token::RParen, "Expected ')' after condition")?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.match_token(&Token::Else) {
            if self.check(&Token::If) {
                let tok = self.advance();
                Some(Box::new(self.parse_if(tok.line, tok.col)?))
            } else {
                let block = self.parse_block()?;
                Some(Box::new(Stmt {
                    line: block.line,
                    col: block.col,
                    kind: StmtKind::Block(block),
                }))
            }
        } else {
            None
        };

        Ok(Stmt {
            kind: StmtKind::If {
                condition,
                then_branch,
                else_branch,
            },
            line,
            col,
        })
    }

    fn parse_print(&mut self, newline: bool, line: u32, col: u32) -> Result<Stmt, ParseError> {
        self.expect(&Token::LParen, "Expected '(' after 'print'")?;
        let value = self.parse_expression()?;
        self.expect(&Token::RParen, "Expected ')' after expression")?;
        self.expect(&Token::Semicolon, "Expected ';' after statement")?;
        Ok(Stmt {
            kind: StmtKind::Print { value, newline },
            line,
            col,
        })
    }

    fn parse_return(&mut self, line: u32, col: u32) -> Result<Stmt, ParseError> {
        let value = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&Token::Semicolon, "Expected ';' after return")?;
        Ok(Stmt {
            kind: StmtKind::Return { value },
            line,
            col,
        })
    }

    // An expression followed by '=' is rewritten into an assignment,
    // which is only legal when the expression is a variable or an array access.
    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expression()?;

        if self.match_token(&Token::Assign) {
            let value = self.parse_expression()?;
            self.expect(&Token::Semicolon, "Expected ';' after assignment")?;
            return match expr.kind {
                ExprKind::Variable(name) => Ok(Stmt {
                    kind: StmtKind::Assign {
                        target: name,
                        index: None,
                        value,
                    },
                    line: expr.line,
                    col: expr.col,
                }),
                ExprKind::Index { name, index } => Ok(Stmt {
                    kind: StmtKind::Assign {
                        target: name,
                        index: Some(*index),
                        value,
                    },
                    line: expr.line,
                    col: expr.col,
                }),
                _ => Err(ParseError::new(
                    "Invalid assignment target",
                    expr.line,
                    expr.col,
                )),
            };
        }

        self.expect(&Token::Semicolon, "Expected ';' after expression")?;
        Ok(Stmt {
            line: expr.line,
            col: expr.col,
            kind: StmtKind::Expr(expr),
        })
    }
}
