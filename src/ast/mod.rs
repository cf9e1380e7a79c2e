/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Node identity, the module root and operator kinds
/// - expressions: The expression node and its closed set of kinds
/// - statements: The statement node, function declarations and parameters
pub mod ast;
pub mod expressions;
pub mod statements;
