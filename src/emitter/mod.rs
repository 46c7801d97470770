//C++ emission, split like the other passes:
//the context holds the buffer and preamble, the sibling modules
//cover functions, statements and expressions

pub mod emitter_context;
pub mod emitter_expression;
pub mod emitter_function;
pub mod emitter_statement;

pub use emitter_context::generate;
