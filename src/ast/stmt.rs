use super::{Expr, Located};

pub type Stmt = Located<StmtKind>;

/// Statement node kinds the analyzer's main pass dispatches over. Anything
/// the parser encounters outside this set (`match`, `with`, `try`,
/// `async def`, comprehensions, ...) is represented as a statement whose
/// kind the analyzer cannot recognize, which is exactly what drives the
/// `TranslationNotSupported` fallback for unhandled statements.
#[derive(Debug, Clone)]
pub enum StmtKind {
	FunctionDef(FunctionDef),
	/// A class body. Never walked; only recorded so the pre-pass can skip
	/// over it without erroring.
	ClassDef,
	Return(Option<Expr>),
	/// Single-target assignment. Chained assignment (`a = b = 1`) is
	/// rejected by the parser conversion step itself, producing an
	/// `Unhandled` node instead, since it is never supported downstream.
	Assign {
		target: String,
		value: Expr,
	},
	If(IfStmt),
	While(WhileStmt),
	Break,
	Continue,
	Expr(Expr),
	Import,
	ImportFrom,
	Pass,
	/// A statement kind outside the supported subset. Carries nothing but
	/// its own location; the analyzer turns it into a verbatim comment
	/// block using the raw source text for `[line, end_line]`.
	Unhandled,
}

#[derive(Debug, Clone)]
pub struct Parameter {
	pub name: String,
	/// Present when the parameter was declared with a default value.
	/// Stored separately from `name` so it can be joined only at
	/// definition-site signature emission and omitted at the forward
	/// declaration.
	pub default: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct FunctionDef {
	pub name: String,
	pub params: Vec<Parameter>,
	pub body: Vec<Stmt>,
	/// `true` when the signature used a construct this crate does not
	/// model as a first-class parameter (`*args`, `**kwargs`, keyword-only
	/// or positional-only markers). Such a function is never registered in
	/// the pre-pass; it is silently dropped rather than registered with a
	/// partial parameter list.
	pub unsupported_signature: bool,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
	pub test: Expr,
	pub body: Vec<Stmt>,
	pub or_else: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
	pub test: Expr,
	pub body: Vec<Stmt>,
}
