//constant folding over the checked AST,
//a bottom-up walk that replaces binary arithmetic on two integer
//literals with the literal result; division and modulo by a literal
//zero stay in the tree so the runtime keeps its behavior

use crate::ast::{BinaryOp, Expr, ExprKind, Item, Program, Stmt, StmtKind};

pub fn optimize(program: &mut Program) {
    for item in &mut program.items {
        match item {
            Item::Function(func) => {
                for stmt in &mut func.body.statements {
                    fold_stmt(stmt);
                }
            }
            Item::Statement(stmt) => fold_stmt(stmt),
        }
    }
}

fn fold_stmt(stmt: &mut Stmt) {
    match &mut stmt.kind {
        StmtKind::Let { value, .. } => fold_expr(value),
        StmtKind::TypedDecl {
            array_size, init, ..
        } => {
            if let Some(size) = array_size {
                fold_expr(size);
            }
            if let Some(init) = init {
                fold_expr(init);
            }
        }
        StmtKind::Assign { index, value, .. } => {
            if let Some(index) = index {
                fold_expr(index);
            }
            fold_expr(value);
        }
        StmtKind::Print { value, .. } => fold_expr(value),
        StmtKind::Expr(expr) => fold_expr(expr),
        StmtKind::Block(block) => {
            for stmt in &mut block.statements {
                fold_stmt(stmt);
            }
        }
        StmtKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            fold_expr(condition);
            for stmt in &mut then_branch.statements {
                fold_stmt(stmt);
            }
            if let Some(else_branch) = else_branch {
                fold_stmt(else_branch);
            }
        }
        StmtKind::For {
            init,
            condition,
            update,
            body,
        } => {
            if let Some(init) = init {
                fold_stmt(init);
            }
            if let Some(condition) = condition {
                fold_expr(condition);
            }
            if let Some(update) = update {
                fold_stmt(update);
            }
            for stmt in &mut body.statements {
                fold_stmt(stmt);
            }
        }
        StmtKind::Return { value } => {
            if let Some(value) = value {
                fold_expr(value);
            }
        }
    }
}

fn fold_expr(expr: &mut Expr) {
    match &mut expr.kind {
        ExprKind::Unary { operand, .. } => fold_expr(operand),
        ExprKind::Binary { left, right, .. } => {
            fold_expr(left);
            fold_expr(right);
        }
        ExprKind::Call { args, .. } => {
            for arg in args {
                fold_expr(arg);
            }
        }
        ExprKind::Index { index, .. } => fold_expr(index),
        ExprKind::Int(_) | ExprKind::Float(_) | ExprKind::Str(_) | ExprKind::Variable(_) => {}
    }

    let folded = match &expr.kind {
        ExprKind::Binary { op, left, right } => match (&left.kind, &right.kind) {
            (ExprKind::Int(l), ExprKind::Int(r)) => fold_integers(*op, *l, *r),
            _ => None,
        },
        _ => None,
    };
    if let Some(value) = folded {
        // the replacement literal keeps the node's position
        expr.kind = ExprKind::Int(value);
    }
}

// None means "leave the node alone": comparisons, division or modulo
// by zero, and results that do not fit an i64.
fn fold_integers(op: BinaryOp, left: i64, right: i64) -> Option<i64> {
    match op {
        BinaryOp::Add => left.checked_add(right),
        BinaryOp::Sub => left.checked_sub(right),
        BinaryOp::Mul => left.checked_mul(right),
        BinaryOp::Div if right != 0 => left.checked_div(right),
        BinaryOp::Mod if right != 0 => left.checked_rem(right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use crate::lexer_tokenizer::lex_with_positions;
    use crate::parser::Parser;

    fn optimized(source: &str) -> Program {
        let tokens = lex_with_positions(source);
        let mut program = Parser::new(&tokens)
            .parse_program()
            .unwrap_or_else(|e| panic!("parse failed: {}", e));
        optimize(&mut program);
        program
    }

    fn first_value(program: &Program) -> &Expr {
        match &program.items[0] {
            Item::Statement(Stmt {
                kind: StmtKind::Let { value, .. },
                ..
            }) => value,
            Item::Statement(Stmt {
                kind: StmtKind::Print { value, .. },
                ..
            }) => value,
            _ => panic!("expected a let or print statement"),
        }
    }

    #[test]
    fn folds_nested_integer_arithmetic() {
        let program = optimized("println(1 + 2 * 3);");
        assert!(matches!(first_value(&program).kind, ExprKind::Int(7)));
    }

    #[test]
    fn folds_every_arithmetic_operator() {
        for (source, expected) in [
            ("let x = 4 + 3;", 7),
            ("let x = 4 - 3;", 1),
            ("let x = 4 * 3;", 12),
            ("let x = 9 / 2;", 4),
            ("let x = 9 % 2;", 1),
        ] {
            let program = optimized(source);
            match first_value(&program).kind {
                ExprKind::Int(value) => assert_eq!(value, expected, "{}", source),
                ref other => panic!("{} did not fold: {:?}", source, other),
            }
        }
    }

    #[test]
    fn division_and_modulo_by_zero_stay_in_the_tree() {
        for source in ["let x = 1 / 0;", "let x = 1 % 0;"] {
            let program = optimized(source);
            assert!(
                matches!(first_value(&program).kind, ExprKind::Binary { .. }),
                "{} must not fold",
                source
            );
        }
    }

    #[test]
    fn comparisons_are_not_folded() {
        let program = optimized("let x = 1 < 2;");
        assert!(matches!(
            first_value(&program).kind,
            ExprKind::Binary {
                op: BinaryOp::Less,
                ..
            }
        ));
    }

    #[test]
    fn non_literal_operands_block_folding_locally_only() {
        // 2 * 3 folds inside the larger expression even though y is unknown
        let program = optimized("let x = y + 2 * 3;");
        let ExprKind::Binary { op, left, right } = &first_value(&program).kind else {
            panic!("expected binary");
        };
        assert_eq!(*op, BinaryOp::Add);
        assert!(matches!(left.kind, ExprKind::Variable(_)));
        assert!(matches!(right.kind, ExprKind::Int(6)));
    }

    #[test]
    fn folding_reaches_into_calls_loops_and_branches() {
        let program = optimized(
            "func f(a) { if (a == 1 + 1) { return f(2 * 2); } \
             for (let i = 0; i < 3 + 3; i = i + 1) {} return 0; }",
        );
        let Item::Function(func) = &program.items[0] else {
            panic!("expected function");
        };
        let StmtKind::If {
            condition,
            then_branch,
            ..
        } = &func.body.statements[0].kind
        else {
            panic!("expected if");
        };
        let ExprKind::Binary { right, .. } = &condition.kind else {
            panic!("expected comparison");
        };
        assert!(matches!(right.kind, ExprKind::Int(2)));

        let StmtKind::Return { value: Some(value) } = &then_branch.statements[0].kind else {
            panic!("expected return");
        };
        let ExprKind::Call { args, .. } = &value.kind else {
            panic!("expected call");
        };
        assert!(matches!(args[0].kind, ExprKind::Int(4)));

        let StmtKind::For { condition, .. } = &func.body.statements[1].kind else {
            panic!("expected for");
        };
        let ExprKind::Binary { right, .. } = &condition.as_ref().unwrap().kind else {
            panic!("expected comparison");
        };
        assert!(matches!(right.kind, ExprKind::Int(6)));
    }

    #[test]
    fn float_arithmetic_is_left_alone() {
        let program = optimized("let x = 1.5 + 2.5;");
        assert!(matches!(
            first_value(&program).kind,
            ExprKind::Binary { .. }
        ));
    }

    #[test]
    fn overflowing_results_are_not_folded() {
        let program = optimized("let x = 9223372036854775807 + 1;");
        assert!(matches!(
            first_value(&program).kind,
            ExprKind::Binary { .. }
        ));
    }
}
