pub mod parser_error;
pub mod parser_expression;
pub mod parser_kernel;
pub mod parser_statement;

pub use parser_error::ParseError;
pub use parser_kernel::Parser;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use crate::lexer_tokenizer::lex_with_positions;

    fn parse(source: &str) -> Program {
        let tokens = lex_with_positions(source);
        Parser::new(&tokens)
            .parse_program()
            .unwrap_or_else(|e| panic!("parse failed: {}", e))
    }

    fn parse_err(source: &str) -> ParseError {
        let tokens = lex_with_positions(source);
        match Parser::new(&tokens).parse_program() {
            Ok(_) => panic!("expected a parse error for {:?}", source),
            Err(e) => e,
        }
    }

    fn only_stmt(program: &Program) -> &Stmt {
        assert_eq!(program.items.len(), 1);
        match &program.items[0] {
            Item::Statement(stmt) => stmt,
            Item::Function(_) => panic!("expected a statement"),
        }
    }

    #[test]
    fn empty_source_is_an_empty_program() {
        assert!(parse("").items.is_empty());
        assert!(parse("// just a comment").items.is_empty());
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let program = parse("let x = 1 + 2 * 3;");
        let StmtKind::Let { value, .. } = &only_stmt(&program).kind else {
            panic!("expected let");
        };
        let ExprKind::Binary { op, left, right } = &value.kind else {
            panic!("expected binary");
        };
        assert_eq!(*op, BinaryOp::Add);
        assert!(matches!(left.kind, ExprKind::Int(1)));
        assert!(matches!(
            &right.kind,
            ExprKind::Binary { op: BinaryOp::Mul, .. }
        ));
    }

    #[test]
    fn binary_operators_are_left_associative() {
        let program = parse("let x = 1 - 2 - 3;");
        let StmtKind::Let { value, .. } = &only_stmt(&program).kind else {
            panic!("expected let");
        };
        let ExprKind::Binary { op, left, right } = &value.kind else {
            panic!("expected binary");
        };
        assert_eq!(*op, BinaryOp::Sub);
        assert!(matches!(
            &left.kind,
            ExprKind::Binary { op: BinaryOp::Sub, .. }
        ));
        assert!(matches!(right.kind, ExprKind::Int(3)));
    }

    #[test]
    fn comparison_binds_looser_than_arithmetic() {
        let program = parse("let x = 1 + 2 < 3 * 4;");
        let StmtKind::Let { value, .. } = &only_stmt(&program).kind else {
            panic!("expected let");
        };
        assert!(matches!(
            &value.kind,
            ExprKind::Binary { op: BinaryOp::Less, .. }
        ));
    }

    #[test]
    fn assignment_rewrites_a_variable_expression() {
        let program = parse("x = 5;");
        assert!(matches!(
            &only_stmt(&program).kind,
            StmtKind::Assign { target, index: None, .. } if target == "x"
        ));
    }

    #[test]
    fn assignment_rewrites_an_array_access() {
        let program = parse("xs[0] = 1;");
        let StmtKind::Assign { target, index, .. } = &only_stmt(&program).kind else {
            panic!("expected assignment");
        };
        assert_eq!(target, "xs");
        assert!(matches!(index.as_ref().map(|e| &e.kind), Some(ExprKind::Int(0))));
    }

    #[test]
    fn assignment_to_a_literal_is_rejected() {
        let err = parse_err("1 = 2;");
        assert!(err.message.contains("assignment target"));
    }

    #[test]
    fn calls_and_array_accesses_parse_as_primaries() {
        let program = parse("let x = foo(1, bar[2]);");
        let StmtKind::Let { value, .. } = &only_stmt(&program).kind else {
            panic!("expected let");
        };
        let ExprKind::Call { callee, args } = &value.kind else {
            panic!("expected call");
        };
        assert_eq!(callee, "foo");
        assert_eq!(args.len(), 2);
        assert!(matches!(&args[1].kind, ExprKind::Index { name, .. } if name == "bar"));
    }

    #[test]
    fn typed_declarations_cover_the_array_forms() {
        let program = parse("int x = 5; float f; int[3] xs; string[] names;");
        assert_eq!(program.items.len(), 4);

        let decls: Vec<_> = program
            .items
            .iter()
            .map(|item| match item {
                Item::Statement(Stmt {
                    kind: StmtKind::TypedDecl { ty, is_array, array_size, init, .. },
                    ..
                }) => (*ty, *is_array, array_size.is_some(), init.is_some()),
                _ => panic!("expected typed declaration"),
            })
            .collect();
        assert_eq!(decls[0], (Type::Int, false, false, true));
        assert_eq!(decls[1], (Type::Float, false, false, false));
        assert_eq!(decls[2], (Type::Int, true, true, false));
        assert_eq!(decls[3], (Type::String, true, false, false));
    }

    #[test]
    fn for_clauses_are_each_optional() {
        let program = parse("for (;;) {}");
        let StmtKind::For { init, condition, update, .. } = &only_stmt(&program).kind else {
            panic!("expected for");
        };
        assert!(init.is_none());
        assert!(condition.is_none());
        assert!(update.is_none());

        let program = parse("for (let i = 0; i < 3; i = i + 1) { println(i); }");
        let StmtKind::For { init, condition, update, body } = &only_stmt(&program).kind else {
            panic!("expected for");
        };
        assert!(matches!(
            init.as_deref().map(|s| &s.kind),
            Some(StmtKind::Let { .. })
        ));
        assert!(condition.is_some());
        assert!(matches!(
            update.as_deref().map(|s| &s.kind),
            Some(StmtKind::Assign { .. })
        ));
        assert_eq!(body.statements.len(), 1);
    }

    #[test]
    fn for_accepts_a_typed_declaration_initializer() {
        let program = parse("for (int i = 0; i < 3; i = i + 1) {}");
        let StmtKind::For { init, .. } = &only_stmt(&program).kind else {
            panic!("expected for");
        };
        assert!(matches!(
            init.as_deref().map(|s| &s.kind),
            Some(StmtKind::TypedDecl { ty: Type::Int, .. })
        ));
    }

    #[test]
    fn else_if_chains_parse() {
        let program = parse("if (a == 1) {} else if (a == 2) {} else {}");
        let StmtKind::If { else_branch, .. } = &only_stmt(&program).kind else {
            panic!("expected if");
        };
        let else_branch = else_branch.as_deref().expect("expected else branch");
        let StmtKind::If { else_branch: inner_else, .. } = &else_branch.kind else {
            panic!("expected else-if");
        };
        assert!(matches!(
            inner_else.as_deref().map(|s| &s.kind),
            Some(StmtKind::Block(_))
        ));
    }

    #[test]
    fn function_declarations_parse_typed_and_untyped_parameters() {
        let program = parse("func add(int a, b) -> int { return a + b; }");
        let Item::Function(func) = &program.items[0] else {
            panic!("expected function");
        };
        assert_eq!(func.name, "add");
        assert_eq!(func.params.len(), 2);
        assert_eq!(func.params[0].ty, Some(Type::Int));
        assert_eq!(func.params[0].name, "a");
        assert_eq!(func.params[1].ty, None);
        assert_eq!(func.params[1].name, "b");
        assert_eq!(func.return_type, Some(Type::Int));
    }

    #[test]
    fn arrow_without_a_type_name_is_rejected() {
        let err = parse_err("func f() -> {}");
        assert!(err.message.contains("return type"));
    }

    #[test]
    fn missing_semicolon_reports_the_offending_position() {
        let err = parse_err("let x = 1\nlet y = 2;");
        assert_eq!((err.line, err.col), (2, 1));
    }

    #[test]
    fn nodes_keep_the_position_of_their_first_token() {
        let program = parse("let x = 10 + 2;");
        let stmt = only_stmt(&program);
        assert_eq!((stmt.line, stmt.col), (1, 1));
        let StmtKind::Let { value, .. } = &stmt.kind else {
            panic!("expected let");
        };
        // the binary node starts where its left operand starts
        assert_eq!((value.line, value.col), (1, 9));
    }
}
