//function emission,
//declared types map onto C++ types, untyped slots fall back to auto,
//and main is always pinned to int

use crate::ast::{FuncDecl, Type};
use crate::emitter::emitter_context::Emitter;

impl Emitter {
    pub(super) fn signature(func: &FuncDecl) -> String {
        let return_type = if func.name == "main" {
            "int"
        } else {
            match func.return_type {
                Some(ty) => Self::cpp_type(ty),
                None => "auto",
            }
        };

        let mut text = String::new();
        text.push_str(return_type);
        text.push(' ');
        text.push_str(&func.name);
        text.push('(');
        for (i, param) in func.params.iter().enumerate() {
            if i > 0 {
                text.push_str(", ");
            }
            let ty = match param.ty {
                Some(ty) => Self::cpp_type(ty),
                None => "auto",
            };
            text.push_str(ty);
            text.push(' ');
            text.push_str(&param.name);
        }
        text.push(')');
        text
    }

    pub(super) fn emit_function(&mut self, func: &FuncDecl) {
        let header = format!("{} {{", Self::signature(func));
        self.emit_line(&header);

        self.current_return = if func.name == "main" {
            Some(Type::Int)
        } else {
            func.return_type
        };
        self.indent_level += 1;
        for stmt in &func.body.statements {
            self.emit_stmt(stmt);
        }
        self.indent_level -= 1;
        self.current_return = None;

        self.emit_line("}");
        self.emit_line("");
    }
}
