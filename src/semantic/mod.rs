pub mod semantic_analysis;
pub mod semantic_error;

pub use semantic_analysis::analyze;
pub use semantic_error::{SemanticError, SemanticWarning};
