//expression emission,
//binary and unary forms are parenthesized so target precedence
//never changes the meaning; built-in calls are rewritten to the
//runtime helper names from the shared table

use crate::ast::{Expr, ExprKind};
use crate::builtins;
use crate::emitter::emitter_context::Emitter;

impl Emitter {
    pub(super) fn emit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Int(value) => self.emit(&value.to_string()),
            ExprKind::Float(value) => {
                let literal = float_literal(*value);
                self.emit(&literal);
            }
            ExprKind::Str(value) => {
                self.emit("\"");
                let escaped = escape_string(value);
                self.emit(&escaped);
                self.emit("\"");
            }
            ExprKind::Variable(name) => self.emit(name),
            ExprKind::Unary { op, operand } => {
                self.emit("(");
                self.emit(op.symbol());
                self.emit_expr(operand);
                self.emit(")");
            }
            ExprKind::Binary { op, left, right } => {
                self.emit("(");
                self.emit_expr(left);
                self.emit(" ");
                self.emit(op.symbol());
                self.emit(" ");
                self.emit_expr(right);
                self.emit(")");
            }
            ExprKind::Index { name, index } => {
                self.emit(name);
                self.emit("[");
                self.emit_expr(index);
                self.emit("]");
            }
            ExprKind::Call { callee, args } => {
                match builtins::lookup(callee) {
                    Some(builtin) => self.emit(builtin.helper),
                    None => self.emit(callee),
                }
                self.emit("(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.emit(", ");
                    }
                    self.emit_expr(arg);
                }
                self.emit(")");
            }
        }
    }
}

// Keeps an integral-valued double a floating literal in the output,
// otherwise "1.0" would re-type as a C++ int.
fn float_literal(value: f64) -> String {
    let text = format!("{}", value);
    if text.contains('.') || text.contains('e') {
        text
    } else {
        format!("{}.0", text)
    }
}

fn escape_string(value: &str) -> String {
    let mut out = String::new();
    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}
