//name and type resolution over the AST,
//a header-only pass collects function signatures first so calls
//may be mutually recursive, then a full walk checks every
//declaration, assignment and expression against the scope stack

use std::collections::HashMap;

use crate::ast::{
    BinaryOp, Block, Expr, ExprKind, FuncDecl, Item, Program, Stmt, StmtKind, Type, UnaryOp,
};
use crate::builtins;
use crate::semantic::semantic_error::{SemanticError, SemanticWarning};

struct SymbolInfo {
    ty: Type,
    initialized: bool,
}

struct FunctionInfo {
    arity: usize,
    return_type: Type,
}

pub struct SemanticAnalyzer {
    scopes: Vec<HashMap<String, SymbolInfo>>,
    functions: HashMap<String, FunctionInfo>,
    warnings: Vec<SemanticWarning>,
    //Some while walking a function body, holding its declared return type
    current_return: Option<Option<Type>>,
}

pub fn analyze(program: &Program) -> Result<Vec<SemanticWarning>, SemanticError> {
    let mut analyzer = SemanticAnalyzer::new();
    analyzer.run(program)?;
    Ok(analyzer.warnings)
}

fn assignable(target: Type, value: Type) -> bool {
    target == value || (target == Type::Float && value == Type::Int)
}

fn type_word(ty: Type) -> &'static str {
    match ty {
        Type::Int => "an integer",
        Type::Float => "a float",
        Type::String => "a string",
        Type::Void => "void",
        Type::Unknown => "any value",
    }
}

impl SemanticAnalyzer {
    fn new() -> Self {
        SemanticAnalyzer {
            scopes: Vec::new(),
            functions: HashMap::new(),
            warnings: Vec::new(),
            current_return: None,
        }
    }

    fn run(&mut self, program: &Program) -> Result<(), SemanticError> {
        // Pass 1: function headers only, so forward references resolve.
        for item in &program.items {
            if let Item::Function(func) = item {
                if self.functions.contains_key(&func.name) {
                    return Err(SemanticError::new(
                        format!("Function '{}' redefined", func.name),
                        func.line,
                        func.col,
                    ));
                }
                self.functions.insert(
                    func.name.clone(),
                    FunctionInfo {
                        arity: func.params.len(),
                        return_type: func.return_type.unwrap_or(Type::Int),
                    },
                );
            }
        }

        let has_main = self.functions.contains_key("main");

        // Pass 2: full walk in source order.
        self.enter_scope();
        let mut result = Ok(());
        for item in &program.items {
            result = match item {
                Item::Function(func) => self.check_function(func),
                Item::Statement(stmt) => {
                    if has_main {
                        Err(SemanticError::new(
                            "Global statements are not allowed when 'main' is declared",
                            stmt.line,
                            stmt.col,
                        ))
                    } else {
                        self.check_stmt(stmt)
                    }
                }
            };
            if result.is_err() {
                break;
            }
        }
        self.exit_scope();
        result
    }

    fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn exit_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(
        &mut self,
        name: &str,
        ty: Type,
        initialized: bool,
        line: u32,
        col: u32,
    ) -> Result<(), SemanticError> {
        if let Some(scope) = self.scopes.last_mut() {
            if scope.contains_key(name) {
                return Err(SemanticError::new(
                    format!("Variable '{}' already declared in this scope", name),
                    line,
                    col,
                ));
            }
            scope.insert(name.to_string(), SymbolInfo { ty, initialized });
        }
        Ok(())
    }

    fn define(&mut self, name: &str) {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(info) = scope.get_mut(name) {
                info.initialized = true;
                return;
            }
        }
    }

    fn resolve(&self, name: &str) -> Option<&SymbolInfo> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    fn check_function(&mut self, func: &FuncDecl) -> Result<(), SemanticError> {
        self.enter_scope();
        let previous = std::mem::replace(&mut self.current_return, Some(func.return_type));

        let mut result = Ok(());
        for param in &func.params {
            result = self.declare(
                &param.name,
                param.ty.unwrap_or(Type::Int),
                true,
                func.line,
                func.col,
            );
            if result.is_err() {
                break;
            }
        }
        if result.is_ok() {
            result = self.check_block(&func.body);
        }

        self.current_return = previous;
        self.exit_scope();
        result
    }

    fn check_block(&mut self, block: &Block) -> Result<(), SemanticError> {
        self.enter_scope();
        let mut result = Ok(());
        for stmt in &block.statements {
            result = self.check_stmt(stmt);
            if result.is_err() {
                break;
            }
        }
        self.exit_scope();
        result
    }

    fn check_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match &stmt.kind {
            StmtKind::Let { name, value } => {
                let ty = self.type_of(value)?;
                self.declare(name, ty, true, stmt.line, stmt.col)
            }
            StmtKind::TypedDecl {
                name,
                ty,
                is_array,
                array_size,
                init,
            } => {
                if let Some(init) = init {
                    let init_ty = self.type_of(init)?;
                    if !*is_array && !assignable(*ty, init_ty) {
                        return Err(SemanticError::new(
                            format!("Type mismatch in initializer for '{}'", name),
                            stmt.line,
                            stmt.col,
                        ));
                    }
                }
                if let Some(size) = array_size {
                    if self.type_of(size)? != Type::Int {
                        return Err(SemanticError::new(
                            "Array size must be an integer",
                            size.line,
                            size.col,
                        ));
                    }
                }
                // arrays with a size are usable immediately, the target
                // default-constructs their elements
                let initialized = init.is_some() || array_size.is_some();
                self.declare(name, *ty, initialized, stmt.line, stmt.col)
            }
            StmtKind::Assign {
                target,
                index,
                value,
            } => {
                let target_ty = match self.resolve(target) {
                    Some(info) => info.ty,
                    None => {
                        return Err(SemanticError::new(
                            format!("Assignment to undefined variable '{}'", target),
                            stmt.line,
                            stmt.col,
                        ))
                    }
                };
                let value_ty = self.type_of(value)?;
                if !assignable(target_ty, value_ty) {
                    return Err(SemanticError::new(
                        "Type mismatch in assignment",
                        stmt.line,
                        stmt.col,
                    ));
                }
                if let Some(index) = index {
                    if self.type_of(index)? != Type::Int {
                        return Err(SemanticError::new(
                            "Array index must be an integer",
                            index.line,
                            index.col,
                        ));
                    }
                }
                self.define(target);
                Ok(())
            }
            StmtKind::Print { value, .. } => {
                self.type_of(value)?;
                Ok(())
            }
            StmtKind::Expr(expr) => {
                self.type_of(expr)?;
                Ok(())
            }
            StmtKind::Block(block) => self.check_block(block),
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.type_of(condition)?;
                self.check_block(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.check_stmt(else_branch)?;
                }
                Ok(())
            }
            StmtKind::For {
                init,
                condition,
                update,
                body,
            } => {
                // the loop gets its own scope so the init binding stays local
                self.enter_scope();
                let mut result = Ok(());
                if let Some(init) = init {
                    result = self.check_stmt(init);
                }
                if result.is_ok() {
                    if let Some(condition) = condition {
                        result = self.type_of(condition).map(|_| ());
                    }
                }
                if result.is_ok() {
                    if let Some(update) = update {
                        result = self.check_stmt(update);
                    }
                }
                if result.is_ok() {
                    result = self.check_block(body);
                }
                self.exit_scope();
                result
            }
            StmtKind::Return { value } => self.check_return(value.as_ref(), stmt.line, stmt.col),
        }
    }

    // Return values are checked against the declared return type only when
    // the enclosing function declares one; undeclared functions keep the
    // permissive behavior.
    fn check_return(
        &mut self,
        value: Option<&Expr>,
        line: u32,
        col: u32,
    ) -> Result<(), SemanticError> {
        let value_ty = match value {
            Some(expr) => Some(self.type_of(expr)?),
            None => None,
        };
        let declared = match self.current_return {
            Some(Some(ty)) => ty,
            _ => return Ok(()),
        };
        match (declared, value_ty) {
            (Type::Void, Some(_)) => Err(SemanticError::new(
                "Void function cannot return a value",
                line,
                col,
            )),
            (Type::Void, None) => Ok(()),
            (_, None) => Err(SemanticError::new("Return value required", line, col)),
            (want, Some(got)) if assignable(want, got) => Ok(()),
            _ => Err(SemanticError::new("Return type mismatch", line, col)),
        }
    }

    fn type_of(&mut self, expr: &Expr) -> Result<Type, SemanticError> {
        match &expr.kind {
            ExprKind::Int(_) => Ok(Type::Int),
            ExprKind::Float(_) => Ok(Type::Float),
            ExprKind::Str(_) => Ok(Type::String),
            ExprKind::Variable(name) => match self.resolve(name) {
                Some(info) => Ok(info.ty),
                None => Err(SemanticError::new(
                    format!("Undefined variable '{}'", name),
                    expr.line,
                    expr.col,
                )),
            },
            ExprKind::Index { name, index } => {
                let (ty, initialized) = match self.resolve(name) {
                    Some(info) => (info.ty, info.initialized),
                    None => {
                        return Err(SemanticError::new(
                            format!("Undefined array '{}'", name),
                            expr.line,
                            expr.col,
                        ))
                    }
                };
                if !initialized {
                    self.warnings.push(SemanticWarning {
                        message: format!("Possible read of uninitialized variable '{}'", name),
                        line: expr.line,
                        col: expr.col,
                    });
                }
                if self.type_of(index)? != Type::Int {
                    return Err(SemanticError::new(
                        "Array index must be an integer",
                        index.line,
                        index.col,
                    ));
                }
                Ok(ty)
            }
            ExprKind::Unary { op, operand } => {
                let ty = self.type_of(operand)?;
                Ok(match op {
                    UnaryOp::Not => Type::Int,
                    UnaryOp::Neg => ty,
                })
            }
            ExprKind::Binary { op, left, right } => {
                let left_ty = self.type_of(left)?;
                let right_ty = self.type_of(right)?;

                if op.is_comparison() {
                    let comparable = (left_ty.is_numeric() && right_ty.is_numeric())
                        || (left_ty == Type::String && right_ty == Type::String);
                    if comparable {
                        return Ok(Type::Int);
                    }
                } else if *op == BinaryOp::Add
                    && left_ty == Type::String
                    && right_ty == Type::String
                {
                    // string concatenation
                    return Ok(Type::String);
                } else if left_ty.is_numeric() && right_ty.is_numeric() {
                    return Ok(if left_ty == Type::Float || right_ty == Type::Float {
                        Type::Float
                    } else {
                        Type::Int
                    });
                }

                Err(SemanticError::new(
                    "Type mismatch in binary operation",
                    expr.line,
                    expr.col,
                ))
            }
            ExprKind::Call { callee, args } => self.check_call(callee, args, expr.line, expr.col),
        }
    }

    fn check_call(
        &mut self,
        callee: &str,
        args: &[Expr],
        line: u32,
        col: u32,
    ) -> Result<Type, SemanticError> {
        if let Some(builtin) = builtins::lookup(callee) {
            if args.len() != builtin.params.len() {
                return Err(SemanticError::new(
                    format!(
                        "{}() expects {} {}",
                        callee,
                        builtin.params.len(),
                        if builtin.params.len() == 1 {
                            "argument"
                        } else {
                            "arguments"
                        }
                    ),
                    line,
                    col,
                ));
            }
            for (position, (arg, want)) in args.iter().zip(builtin.params).enumerate() {
                let got = self.type_of(arg)?;
                if *want != Type::Unknown && got != *want {
                    return Err(SemanticError::new(
                        format!(
                            "{}() argument {} must be {}",
                            callee,
                            position + 1,
                            type_word(*want)
                        ),
                        arg.line,
                        arg.col,
                    ));
                }
            }
            return Ok(builtin.return_type);
        }

        for arg in args {
            self.type_of(arg)?;
        }

        let info = match self.functions.get(callee) {
            Some(info) => info,
            None => {
                return Err(SemanticError::new(
                    format!("Undefined function '{}'", callee),
                    line,
                    col,
                ))
            }
        };
        if info.arity != args.len() {
            return Err(SemanticError::new(
                format!(
                    "Function '{}' expects {} {}",
                    callee,
                    info.arity,
                    if info.arity == 1 {
                        "argument"
                    } else {
                        "arguments"
                    }
                ),
                line,
                col,
            ));
        }
        Ok(match info.return_type {
            Type::Unknown => Type::Int,
            ty => ty,
        })
    }
}
