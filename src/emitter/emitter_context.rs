//emitter state: the output buffer and the indent counter,
//plus the fixed C++ preamble and the program-level assembly

use crate::ast::{FuncDecl, Item, Program, Type};

//runtime helpers backing the TinyLang built-ins
const PREAMBLE: &str = "\
#include <iostream>
#include <string>
#include <vector>

std::string _tl_input() { std::string s; std::cin >> s; return s; }
int _tl_len(const std::string& s) { return (int)s.length(); }
std::string _tl_substr(const std::string& s, int start, int len) { return s.substr(start, len); }
int _tl_to_int(const std::string& s) { try { return std::stoi(s); } catch (...) { return 0; } }
double _tl_to_float(const std::string& s) { try { return std::stod(s); } catch (...) { return 0.0; } }

";

pub struct Emitter {
    pub(super) out: String,
    pub(super) indent_level: usize,
    //declared return type of the function being emitted; None outside functions
    pub(super) current_return: Option<Type>,
}

// Walks the program once and returns the C++ translation.
// The same tree always produces the same text.
pub fn generate(program: &Program) -> String {
    let mut emitter = Emitter::new();
    emitter.emit_program(program);
    emitter.out
}

impl Emitter {
    fn new() -> Self {
        Emitter {
            out: String::new(),
            indent_level: 0,
            current_return: None,
        }
    }

    pub(super) fn indent(&mut self) {
        for _ in 0..self.indent_level {
            self.out.push_str("  ");
        }
    }

    pub(super) fn emit(&mut self, text: &str) {
        self.out.push_str(text);
    }

    pub(super) fn emit_line(&mut self, text: &str) {
        self.indent();
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub(super) fn cpp_type(ty: Type) -> &'static str {
        match ty {
            Type::Int => "int",
            Type::Float => "double",
            Type::String => "std::string",
            Type::Void => "void",
            Type::Unknown => "auto",
        }
    }

    fn emit_program(&mut self, program: &Program) {
        self.emit(PREAMBLE);

        let functions: Vec<&FuncDecl> = program
            .items
            .iter()
            .filter_map(|item| match item {
                Item::Function(func) => Some(func),
                Item::Statement(_) => None,
            })
            .collect();
        let has_main = functions.iter().any(|f| f.name == "main");

        // forward declarations keep later functions callable from earlier ones
        let mut wrote_prototype = false;
        for func in &functions {
            if func.name != "main" {
                let prototype = format!("{};", Self::signature(func));
                self.emit_line(&prototype);
                wrote_prototype = true;
            }
        }
        if wrote_prototype {
            self.emit_line("");
        }

        for func in &functions {
            self.emit_function(func);
        }

        if !has_main {
            // script mode: the global statements become the main body
            self.current_return = Some(Type::Int);
            self.emit_line("int main() {");
            self.indent_level += 1;
            for item in &program.items {
                if let Item::Statement(stmt) = item {
                    self.emit_stmt(stmt);
                }
            }
            self.emit_line("return 0;");
            self.indent_level -= 1;
            self.emit_line("}");
            self.current_return = None;
        }
    }
}
