//lexical analysis,
//logos breaks the source text into tokens,
//each token records the line/column where it starts

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"\s+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // Keywords
    #[token("func")]
    Func,
    #[token("let")]
    Let,
    #[token("print")]
    Print,
    #[token("println")]
    Println,
    #[token("for")]
    For,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("return")]
    Return,

    // Identifiers and literals
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse().unwrap_or(0.0))]
    Float(f64),
    #[regex(r"[0-9]+", |lex| lex.slice().parse().unwrap_or(0))]
    Integer(i64),
    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    StringLiteral(String),

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    NotEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("=")]
    Assign,
    #[token("!")]
    Not,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("->")]
    Arrow,

    // Produced by lex_with_positions, never matched by a pattern
    EndOfFile,
    Error,
}

// A token together with its lexeme and one-based source position.
#[derive(Debug, Clone)]
pub struct PositionedToken {
    pub token: Token,
    pub text: String,
    pub line: u32,
    pub col: u32,
}

// Lexes the whole buffer; the stream always ends with exactly one EndOfFile.
pub fn lex_with_positions(source: &str) -> Vec<PositionedToken> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let (line, col) = position_of(source, span.start);
        tokens.push(PositionedToken {
            token: result.unwrap_or(Token::Error),
            text: source[span.start..span.end].to_string(),
            line,
            col,
        });
    }

    let (line, col) = position_of(source, source.len());
    tokens.push(PositionedToken {
        token: Token::EndOfFile,
        text: String::new(),
        line,
        col,
    });
    tokens
}

// Byte offset to one-based line/column.
pub fn position_of(source: &str, offset: usize) -> (u32, u32) {
    let before = &source[..offset];
    let line = before.matches('\n').count() as u32 + 1;
    let col = match before.rfind('\n') {
        Some(newline) => (offset - newline) as u32,
        None => offset as u32 + 1,
    };
    (line, col)
}

// Decodes \n, \t, \\ and \" between the surrounding quotes.
// An unknown escape keeps the backslash verbatim.
fn unescape(s: &str) -> String {
    let mut chars = s[1..s.len() - 1].chars();
    let mut result = String::new();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => break,
            }
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        lex_with_positions(source)
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("func let print println for if else return foo"),
            vec![
                Token::Func,
                Token::Let,
                Token::Print,
                Token::Println,
                Token::For,
                Token::If,
                Token::Else,
                Token::Return,
                Token::Identifier("foo".to_string()),
                Token::EndOfFile,
            ]
        );
    }

    #[test]
    fn keyword_prefix_is_still_an_identifier() {
        assert_eq!(
            kinds("letter"),
            vec![Token::Identifier("letter".to_string()), Token::EndOfFile]
        );
    }

    #[test]
    fn integer_and_float_literals() {
        assert_eq!(
            kinds("42 3.14"),
            vec![Token::Integer(42), Token::Float(3.14), Token::EndOfFile]
        );
    }

    #[test]
    fn trailing_dot_is_not_a_float() {
        // "1." lexes as the integer 1 followed by a stray dot
        assert_eq!(
            kinds("1."),
            vec![Token::Integer(1), Token::Error, Token::EndOfFile]
        );
    }

    #[test]
    fn two_character_operators_win_over_prefixes() {
        assert_eq!(
            kinds("== != <= >= -> = < > ! -"),
            vec![
                Token::EqualEqual,
                Token::NotEqual,
                Token::LessEqual,
                Token::GreaterEqual,
                Token::Arrow,
                Token::Assign,
                Token::Less,
                Token::Greater,
                Token::Not,
                Token::Minus,
                Token::EndOfFile,
            ]
        );
    }

    #[test]
    fn line_comments_do_not_emit_tokens() {
        assert_eq!(
            kinds("1 // the rest of this line\n2"),
            vec![Token::Integer(1), Token::Integer(2), Token::EndOfFile]
        );
        assert_eq!(kinds("// only a comment"), vec![Token::EndOfFile]);
    }

    #[test]
    fn string_escapes_are_decoded() {
        assert_eq!(
            kinds(r#""a\nb\t\\\"""#),
            vec![
                Token::StringLiteral("a\nb\t\\\"".to_string()),
                Token::EndOfFile
            ]
        );
    }

    #[test]
    fn unterminated_string_is_an_error_token() {
        let tokens = lex_with_positions("\"abc");
        assert!(matches!(tokens[0].token, Token::Error));
        assert!(tokens[0].text.starts_with('"'));
    }

    #[test]
    fn unexpected_character_keeps_its_lexeme() {
        let tokens = lex_with_positions("let @");
        assert_eq!(tokens[1].token, Token::Error);
        assert_eq!(tokens[1].text, "@");
    }

    #[test]
    fn positions_are_one_based() {
        let tokens = lex_with_positions("let x\n  = 1;");
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1)); // let
        assert_eq!((tokens[1].line, tokens[1].col), (1, 5)); // x
        assert_eq!((tokens[2].line, tokens[2].col), (2, 3)); // =
        assert_eq!((tokens[3].line, tokens[3].col), (2, 5)); // 1
    }

    #[test]
    fn stream_ends_with_exactly_one_eof() {
        for source in ["", "let x = 1;", "// comment"] {
            let tokens = lex_with_positions(source);
            let eofs = tokens
                .iter()
                .filter(|t| matches!(t.token, Token::EndOfFile))
                .count();
            assert_eq!(eofs, 1);
            assert!(matches!(
                tokens.last().map(|t| &t.token),
                Some(Token::EndOfFile)
            ));
        }
    }
}
