//the single table of built-in functions,
//the semantic analyzer reads it for shape checks,
//the emitter reads it for the runtime helper names

use crate::ast::Type;

pub struct Builtin {
    pub name: &'static str,
    //Unknown accepts an argument of any type
    pub params: &'static [Type],
    pub return_type: Type,
    pub helper: &'static str,
}

pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "input",
        params: &[],
        return_type: Type::String,
        helper: "_tl_input",
    },
    Builtin {
        name: "len",
        params: &[Type::String],
        return_type: Type::Int,
        helper: "_tl_len",
    },
    Builtin {
        name: "int",
        params: &[Type::Unknown],
        return_type: Type::Int,
        helper: "_tl_to_int",
    },
    Builtin {
        name: "float",
        params: &[Type::Unknown],
        return_type: Type::Float,
        helper: "_tl_to_float",
    },
    Builtin {
        name: "substr",
        params: &[Type::String, Type::Int, Type::Int],
        return_type: Type::String,
        helper: "_tl_substr",
    },
];

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == name)
}
