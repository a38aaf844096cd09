//! Main code generator module.
//!
//! This module contains the `Generator` structure and drives the translation
//! from AST to Python source. Generation is a single depth-first pass; the
//! only work done ahead of it is collecting function signatures, module-level
//! declarations and every identifier in the program.

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    mem,
    rc::Rc,
};

use tracing::debug;

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        statements::FnDeclStmt,
        types::{BaseType, Type},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    scope::{Binding, FrameKind, NameAllocator, ScopeStack},
    stdlib::Helper,
    stmt::{gen_body, gen_statement},
};

/// Settings that change the shape of the generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Reject calls that name neither a standard library entry nor a
    /// function defined in the program.
    pub strict_calls: bool,
    /// Spaces per indentation level. Must be at least 1.
    pub indent_width: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            strict_calls: true,
            indent_width: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub emitted: String,
    pub arity: usize,
    pub return_type: Option<Type>,
}

/// The state of one translation.
///
/// This structure tracks:
/// - The emitted lines and the current indentation depth
/// - The scope stack used for name and type lookups
/// - The functions defined in the program and the helpers already used
/// - Whether generation is inside a function or a loop
pub struct Generator {
    pub options: GeneratorOptions,

    /// Generated lines, already indented
    pub output: Vec<String>,
    pub indent_level: usize,

    pub scopes: ScopeStack,
    pub names: NameAllocator,
    pub functions: HashMap<String, FunctionSignature>,
    /// Runtime helpers in first-use order
    pub helpers: Vec<&'static Helper>,

    pub function_depth: usize,
    pub loop_depth: usize,
    /// Module-level names assigned inside the function being generated
    pub globals_written: BTreeSet<String>,
}

impl Generator {
    pub fn new(program: &Program, options: GeneratorOptions) -> Self {
        let mut names = NameAllocator::new(collect_identifiers(program));
        let mut scopes = ScopeStack::new();
        let mut functions = HashMap::new();

        for statement in &program.statements {
            match statement {
                Stmt::FnDecl(function) => {
                    let signature = FunctionSignature {
                        emitted: names.safe(&function.name),
                        arity: function.parameters.len(),
                        return_type: function.return_type,
                    };
                    functions.insert(function.name.clone(), signature);
                }
                // Module-level variables are known before any function body
                // is generated, so reads and writes from functions resolve
                Stmt::VarDecl(decl) => {
                    if scopes.lookup(&decl.identifier).is_none() {
                        let binding = Binding {
                            emitted: names.safe(&decl.identifier),
                            ty: Some(decl.explicit_type),
                        };
                        scopes.declare(&decl.identifier, binding);
                    }
                }
                _ => {}
            }
        }

        Generator {
            options,
            output: vec![],
            indent_level: 0,
            scopes,
            names,
            functions,
            helpers: vec![],
            function_depth: 0,
            loop_depth: 0,
            globals_written: BTreeSet::new(),
        }
    }

    pub fn emit_line(&mut self, line: &str) {
        let indent = " ".repeat(self.options.indent_width * self.indent_level);
        self.output.push(format!("{}{}", indent, line));
    }

    pub fn emit_blank(&mut self) {
        self.output.push(String::new());
    }

    /// Binds `name` in the innermost frame and returns its Python name.
    ///
    /// Redeclaring in the same frame reuses the existing name; shadowing an
    /// outer binding allocates a fresh one.
    pub fn declare_variable(&mut self, name: &str, ty: Option<Type>) -> String {
        let emitted = if let Some(existing) = self.scopes.lookup_current(name) {
            existing.emitted.clone()
        } else if self.scopes.visible_from_outer(name) {
            self.names.fresh(name)
        } else {
            self.names.safe(name)
        };

        self.scopes.declare(
            name,
            Binding {
                emitted: emitted.clone(),
                ty,
            },
        );

        emitted
    }

    pub fn declare_parameter(&mut self, name: &str, ty: Type) -> String {
        let emitted = self.names.safe(name);
        self.scopes.declare(
            name,
            Binding {
                emitted: emitted.clone(),
                ty: Some(ty),
            },
        );

        emitted
    }

    /// The Python name a read of `name` refers to.
    pub fn resolve_variable(&mut self, name: &str) -> String {
        match self.scopes.lookup(name) {
            Some(binding) => binding.emitted.clone(),
            None => self.names.safe(name),
        }
    }

    /// The Python name an assignment to `name` writes, recording module
    /// variables written from inside a function.
    pub fn resolve_assignment(&mut self, name: &str) -> String {
        let found = self
            .scopes
            .lookup_with_kind(name)
            .map(|(binding, kind)| (binding.emitted.clone(), kind));

        match found {
            Some((emitted, FrameKind::Module)) if self.function_depth > 0 => {
                self.globals_written.insert(emitted.clone());
                emitted
            }
            Some((emitted, _)) => emitted,
            None => self.names.safe(name),
        }
    }

    pub fn variable_type(&self, name: &str) -> Option<Type> {
        self.scopes.lookup(name).and_then(|binding| binding.ty)
    }

    pub fn use_helper(&mut self, helper: &'static Helper) {
        if !self.helpers.iter().any(|used| used.name == helper.name) {
            debug!("using runtime helper {}", helper.name);
            self.helpers.push(helper);
        }
    }

    /// Assembles the final text: helpers first, then the generated lines.
    pub fn finish(self) -> String {
        let mut lines = vec![];

        for helper in &self.helpers {
            for (depth, line) in helper.lines {
                lines.push(format!(
                    "{}{}",
                    " ".repeat(self.options.indent_width * depth),
                    line
                ));
            }
            lines.push(String::new());
        }

        lines.extend(self.output);

        if lines.is_empty() {
            return String::new();
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

/// Translates a program into Python source text.
///
/// Function definitions are emitted first, in source order, followed by the
/// remaining top-level statements in source order.
pub fn generate(program: &Program, options: &GeneratorOptions) -> Result<String, Error> {
    if options.indent_width == 0 {
        let position = program
            .statements
            .first()
            .map(|statement| statement.get_span().start.clone())
            .unwrap_or_else(|| Position::new(1, 1, Rc::new(String::from("shell"))));

        return Err(Error::new(
            ErrorImpl::InvalidIndentWidth {
                width: options.indent_width,
            },
            position,
        ));
    }

    let mut generator = Generator::new(program, options.clone());

    for statement in &program.statements {
        if let Stmt::FnDecl(function) = statement {
            gen_function(&mut generator, function)?;
        }
    }

    for statement in &program.statements {
        if !matches!(statement, Stmt::FnDecl(_)) {
            gen_statement(&mut generator, statement)?;
        }
    }

    debug!(
        "generated {} lines with {} helpers",
        generator.output.len(),
        generator.helpers.len()
    );

    Ok(generator.finish())
}

pub fn gen_function(generator: &mut Generator, function: &FnDeclStmt) -> Result<(), Error> {
    let emitted = match generator.functions.get(&function.name) {
        Some(signature) => signature.emitted.clone(),
        None => generator.names.safe(&function.name),
    };

    generator.scopes.push(FrameKind::Function);
    let parameters: Vec<String> = function
        .parameters
        .iter()
        .map(|param| generator.declare_parameter(&param.name, param.param_type))
        .collect();

    // The body goes into its own buffer so the `global` line can precede it
    let saved_output = mem::take(&mut generator.output);
    let saved_globals = mem::take(&mut generator.globals_written);
    let saved_loops = mem::replace(&mut generator.loop_depth, 0);
    generator.function_depth += 1;
    generator.indent_level += 1;

    let result = gen_body(generator, &function.body);

    generator.indent_level -= 1;
    generator.function_depth -= 1;
    generator.loop_depth = saved_loops;
    let globals = mem::replace(&mut generator.globals_written, saved_globals);
    let body = mem::replace(&mut generator.output, saved_output);
    generator.scopes.pop();
    result?;

    generator.emit_line(&format!("def {}({}):", emitted, parameters.join(", ")));
    if !globals.is_empty() {
        generator.indent_level += 1;
        let names: Vec<String> = globals.into_iter().collect();
        generator.emit_line(&format!("global {}", names.join(", ")));
        generator.indent_level -= 1;
    }
    generator.output.extend(body);
    generator.emit_blank();

    Ok(())
}

/// The Python value a declaration without an initializer starts with.
pub fn default_value(ty: &Type) -> &'static str {
    match ty {
        Type::Base(BaseType::Integer) => "0",
        Type::Base(BaseType::Float) => "0.0",
        Type::Base(BaseType::String) => "\"\"",
        Type::Base(BaseType::Boolean) => "False",
        Type::Base(BaseType::Nothing) => "None",
        Type::List(_) => "[]",
        Type::Map(_, _) => "{}",
    }
}

fn collect_identifiers(program: &Program) -> HashSet<String> {
    let mut identifiers = HashSet::new();
    for statement in &program.statements {
        collect_from_stmt(statement, &mut identifiers);
    }
    identifiers
}

fn collect_from_stmt(statement: &Stmt, identifiers: &mut HashSet<String>) {
    match statement {
        Stmt::VarDecl(decl) => {
            identifiers.insert(decl.identifier.clone());
            if let Some(value) = &decl.assigned_value {
                collect_from_expr(value, identifiers);
            }
        }
        Stmt::Assignment(assignment) => {
            identifiers.insert(assignment.target.clone());
            collect_from_expr(&assignment.value, identifiers);
        }
        Stmt::If(if_stmt) => {
            collect_from_expr(&if_stmt.condition, identifiers);
            for inner in if_stmt.then_body.iter().chain(if_stmt.else_body.iter().flatten()) {
                collect_from_stmt(inner, identifiers);
            }
        }
        Stmt::While(while_stmt) => {
            collect_from_expr(&while_stmt.condition, identifiers);
            for inner in &while_stmt.body {
                collect_from_stmt(inner, identifiers);
            }
        }
        Stmt::Foreach(foreach) => {
            identifiers.insert(foreach.variable.clone());
            collect_from_expr(&foreach.iterable, identifiers);
            for inner in &foreach.body {
                collect_from_stmt(inner, identifiers);
            }
        }
        Stmt::FnDecl(function) => {
            identifiers.insert(function.name.clone());
            for param in &function.parameters {
                identifiers.insert(param.name.clone());
            }
            for inner in &function.body {
                collect_from_stmt(inner, identifiers);
            }
        }
        Stmt::Return(ret) => {
            if let Some(value) = &ret.value {
                collect_from_expr(value, identifiers);
            }
        }
        Stmt::Print(print) => collect_from_expr(&print.value, identifiers),
        Stmt::Break(_) => {}
        Stmt::Expression(call) => {
            identifiers.insert(call.expression.name.clone());
            for argument in &call.expression.arguments {
                collect_from_expr(argument, identifiers);
            }
        }
    }
}

fn collect_from_expr(expression: &Expr, identifiers: &mut HashSet<String>) {
    match expression {
        Expr::Literal(_) => {}
        Expr::Symbol(symbol) => {
            identifiers.insert(symbol.value.clone());
        }
        Expr::Binary(binary) => {
            collect_from_expr(&binary.left, identifiers);
            collect_from_expr(&binary.right, identifiers);
        }
        Expr::Unary(unary) => collect_from_expr(&unary.operand, identifiers),
        Expr::Call(call) => {
            identifiers.insert(call.name.clone());
            for argument in &call.arguments {
                collect_from_expr(argument, identifiers);
            }
        }
        Expr::List(list) => {
            for element in &list.elements {
                collect_from_expr(element, identifiers);
            }
        }
        Expr::Map(map) => {
            for (key, value) in &map.entries {
                collect_from_expr(key, identifiers);
                collect_from_expr(value, identifiers);
            }
        }
    }
}
