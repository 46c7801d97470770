//expression grammar,
//precedence climbing over the binary operators, all left-associative:
//equality < comparison < additive < multiplicative < unary < primary

use crate::ast::{BinaryOp, Expr, ExprKind, UnaryOp};
use crate::lexer_tokenizer::Token;
use crate::parser::{parser_error::ParseError, parser_kernel::Parser};

impl<'a> Parser<'a> {
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(0)
    }

    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expr, ParseError> {
        let mut expr = self.parse_unary()?;

        while let Some(op) = binary_operator(&self.current().token) {
            let prec = precedence(op);
            if prec < min_precedence {
                break;
            }
            self.advance();
            let right = self.parse_binary(prec + 1)?;
            let (line, col) = (expr.line, expr.col);
            expr = Expr {
                kind: ExprKind::Binary {
                    op,
                    left: Box::new(expr),
                    right: Box::new(right),
                },
                line,
                col,
            };
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let tok = self.current().clone();
        let op = match tok.token {
            Token::Minus => Some(UnaryOp::Neg),
            Token::Not => Some(UnaryOp::Not),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr {
                kind: ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                line: tok.line,
                col: tok.col,
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let tok = self.current().clone();
        match tok.token {
            Token::Integer(value) => {
                self.advance();
                Ok(Expr {
                    kind: ExprKind::Int(value),
                    line: tok.line,
                    col: tok.col,
                })
            }
            Token::Float(value) => {
                self.advance();
                Ok(Expr {
                    kind: ExprKind::Float(value),
                    line: tok.line,
                    col: tok.col,
                })
            }
            Token::StringLiteral(ref value) => {
                let value = value.clone();
                self.advance();
                Ok(Expr {
                    kind: ExprKind::Str(value),
                    line: tok.line,
                    col: tok.col,
                })
            }
            Token::Identifier(ref name) => {
                let name = name.clone();
                self.advance();

                if self.match_token(&Token::LBracket) {
                    let index = self.parse_expression()?;
                    self.expect(&Token::RBracket, "Expected ']' after index")?;
                    return Ok(Expr {
                        kind: ExprKind::Index {
                            name,
                            index: Box::new(index),
                        },
                        line: tok.line,
                        col: tok.col,
                    });
                }

                if self.match_token(&Token::LParen) {
                    let mut args = Vec::new();
                    if !self.check(&Token::RParen) {
                        loop {
                            args.push(self.parse_expression()?);
                            if !self.match_token(&Token::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect(&Token::RParen, "Expected ')' after arguments")?;
                    return Ok(Expr {
                        kind: ExprKind::Call { callee: name, args },
                        line: tok.line,
                        col: tok.col,
                    });
                }

                Ok(Expr {
                    kind: ExprKind::Variable(name),
                    line: tok.line,
                    col: tok.col,
                })
            }
            Token::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(&Token::RParen, "Expected ')' after expression")?;
                Ok(expr)
            }
            _ => Err(self.error_here("Expected expression")),
        }
    }
}

fn binary_operator(token: &Token) -> Option<BinaryOp> {
    match token {
        Token::Plus => Some(BinaryOp::Add),
        Token::Minus => Some(BinaryOp::Sub),
        Token::Star => Some(BinaryOp::Mul),
        Token::Slash => Some(BinaryOp::Div),
        Token::Percent => Some(BinaryOp::Mod),
        Token::EqualEqual => Some(BinaryOp::Equal),
        Token::NotEqual => Some(BinaryOp::NotEqual),
        Token::Less => Some(BinaryOp::Less),
        Token::LessEqual => Some(BinaryOp::LessEqual),
        Token::Greater => Some(BinaryOp::Greater),
        Token::GreaterEqual => Some(BinaryOp::GreaterEqual),
        _ => None,
    }
}

fn precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Equal | BinaryOp::NotEqual => 1,
        BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => 2,
        BinaryOp::Add | BinaryOp::Sub => 3,
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 4,
    }
}
