//statement emission: two spaces per nesting level, one statement per line,
//for-headers and if-chains are rendered inline without the usual
//statement terminators

use crate::ast::{Block, Stmt, StmtKind, Type};
use crate::emitter::emitter_context::Emitter;

impl Emitter {
    pub(super) fn emit_block(&mut self, block: &Block) {
        self.emit_line("{");
        self.emit_block_body(block);
        self.emit_line("}");
    }

    fn emit_block_body(&mut self, block: &Block) {
        self.indent_level += 1;
        for stmt in &block.statements {
            self.emit_stmt(stmt);
        }
        self.indent_level -= 1;
    }

    pub(super) fn emit_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Let { name, value } => {
                self.indent();
                self.emit("auto ");
                self.emit(name);
                self.emit(" = ");
                self.emit_expr(value);
                self.emit(";\n");
            }
            StmtKind::TypedDecl {
                name,
                ty,
                is_array,
                array_size,
                init,
            } => {
                self.indent();
                let cpp = Self::cpp_type(*ty);
                if *is_array {
                    self.emit("std::vector<");
                    self.emit(cpp);
                    self.emit("> ");
                    self.emit(name);
                    if let Some(size) = array_size {
                        self.emit("(");
                        self.emit_expr(size);
                        self.emit(")");
                    } else if let Some(init) = init {
                        self.emit(" = ");
                        self.emit_expr(init);
                    }
                } else {
                    self.emit(cpp);
                    self.emit(" ");
                    self.emit(name);
                    if let Some(init) = init {
                        self.emit(" = ");
                        self.emit_expr(init);
                    } else if *ty != Type::String {
                        // scalars without an initializer still get a defined value
                        self.emit(" = 0");
                    }
                }
                self.emit(";\n");
            }
            StmtKind::Assign {
                target,
                index,
                value,
            } => {
                self.indent();
                self.emit(target);
                if let Some(index) = index {
                    self.emit("[");
                    self.emit_expr(index);
                    self.emit("]");
                }
                self.emit(" = ");
                self.emit_expr(value);
                self.emit(";\n");
            }
            StmtKind::Print { value, newline } => {
                self.indent();
                self.emit("std::cout << ");
                self.emit_expr(value);
                if *newline {
                    self.emit(" << std::endl;\n");
                } else {
                    self.emit(";\n");
                }
            }
            StmtKind::Expr(expr) => {
                self.indent();
                self.emit_expr(expr);
                self.emit(";\n");
            }
            StmtKind::Block(block) => self.emit_block(block),
            StmtKind::If { .. } => {
                self.indent();
                self.emit_if_chain(stmt);
            }
            StmtKind::For {
                init,
                condition,
                update,
                body,
            } => {
                self.indent();
                self.emit("for (");
                if let Some(init) = init {
                    self.emit_clause(init);
                }
                self.emit("; ");
                if let Some(condition) = condition {
                    self.emit_expr(condition);
                }
                self.emit("; ");
                if let Some(update) = update {
                    self.emit_clause(update);
                }
                self.emit(") {\n");
                self.emit_block_body(body);
                self.emit_line("}");
            }
            StmtKind::Return { value } => {
                self.indent();
                match value {
                    Some(value) => {
                        self.emit("return ");
                        self.emit_expr(value);
                        self.emit(";\n");
                    }
                    None => {
                        if self.current_return == Some(Type::Void) {
                            self.emit("return;\n");
                        } else {
                            self.emit("return 0;\n");
                        }
                    }
                }
            }
        }
    }

    // if-chains cuddle their braces so else-if reads as written
    fn emit_if_chain(&mut self, stmt: &Stmt) {
        let StmtKind::If {
            condition,
            then_branch,
            else_branch,
        } = &stmt.kind
        else {
            return;
        };

        self.emit("if (");
        self.emit_expr(condition);
        self.emit(") {\n");
        self.emit_block_body(then_branch);
        self.indent();
        self.emit("}");

        match else_branch.as_deref() {
            Some(else_stmt) => match &else_stmt.kind {
                StmtKind::If { .. } => {
                    self.emit(" else ");
                    self.emit_if_chain(else_stmt);
                }
                StmtKind::Block(block) => {
                    self.emit(" else {\n");
                    self.emit_block_body(block);
                    self.indent();
                    self.emit("}\n");
                }
                _ => self.emit("\n"),
            },
            None => self.emit("\n"),
        }
    }

    // inline rendering for for-headers: no indent, no terminator.
    // The parser only places declarations and plain assignments here.
    fn emit_clause(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Let { name, value } => {
                self.emit("auto ");
                self.emit(name);
                self.emit(" = ");
                self.emit_expr(value);
            }
            StmtKind::TypedDecl { name, ty, init, .. } => {
                self.emit(Self::cpp_type(*ty));
                self.emit(" ");
                self.emit(name);
                if let Some(init) = init {
                    self.emit(" = ");
                    self.emit_expr(init);
                }
            }
            StmtKind::Assign {
                target,
                index,
                value,
            } => {
                self.emit(target);
                if let Some(index) = index {
                    self.emit("[");
                    self.emit_expr(index);
                    self.emit("]");
                }
                self.emit(" = ");
                self.emit_expr(value);
            }
            _ => {}
        }
    }
}
