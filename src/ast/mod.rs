//! py2cxx's own restricted statement/expression tree.
//!
//! The parser module (`crate::parser`) is the only producer of these types;
//! everything downstream (the analyzer, the finalizer, the emitter) only
//! ever sees this closed set of node kinds, never the external parser's
//! native syntax tree. Every node carries the source line information the
//! comment reinjector needs, since the external parser only reports byte
//! offsets.

pub mod expr;
pub mod stmt;

pub use expr::{BoolOperator, CmpOperator, Expr, ExprKind, NumberKind, Operator, UnaryOperator};
pub use stmt::{FunctionDef, IfStmt, Parameter, Stmt, StmtKind, WhileStmt};

/// A node decorated with its source location. `line` and `end_line` are
/// 1-indexed, matching Python's own `ast` module convention
/// (`lineno`/`end_lineno`).
#[derive(Debug, Clone)]
pub struct Located<T> {
	pub line: u32,
	pub end_line: u32,
	pub end_col_offset: u32,
	pub node: T,
}

impl<T> Located<T> {
	pub fn new(line: u32, end_line: u32, end_col_offset: u32, node: T) -> Self {
		Self { line, end_line, end_col_offset, node }
	}
}

/// A full translation unit as produced by the parser: the top-level
/// statement sequence of one Python source file.
#[derive(Debug, Clone)]
pub struct Module {
	pub body: Vec<Stmt>,
}
