/// AST (Abstract Syntax Tree) module
/// Contains the canonical tree the code generator consumes
///
/// Submodules:
/// - ast: The closed statement and expression enums and the program root
/// - expressions: Definitions for the expression node payloads
/// - statements: Definitions for the statement node payloads
/// - types: Definitions for declared types
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
