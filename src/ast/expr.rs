use super::Located;

pub type Expr = Located<ExprKind>;

/// Expression node kinds the analyzer knows how to evaluate. This mirrors
/// the shape of Python's own `ast` expression nodes closely enough that
/// `crate::analyzer::expr` reads the same way
/// `recurse_operator` dispatch does, but it is a closed set: anything the
/// parser cannot map into one of these variants is simply not produced,
/// and the statement that contained it degrades to a comment instead.
#[derive(Debug, Clone)]
pub enum ExprKind {
	BoolOp {
		op: BoolOperator,
		values: Vec<Expr>,
	},
	BinOp {
		left: Box<Expr>,
		op: Operator,
		right: Box<Expr>,
	},
	UnaryOp {
		op: UnaryOperator,
		operand: Box<Expr>,
	},
	Compare {
		left: Box<Expr>,
		ops: Vec<CmpOperator>,
		comparators: Vec<Expr>,
	},
	/// A call to a bare name. Method calls and other computed callables
	/// are not modeled and never reach this variant.
	Call {
		func: String,
		args: Vec<Expr>,
	},
	Name(String),
	StringConstant(String),
	NumberConstant {
		text: String,
		kind: NumberKind,
	},
	BoolConstant(bool),
	NoneConstant,
	List(Vec<Expr>),
	/// `base[index]`. `index` is `None` for a slice subscript (`a[:]`,
	/// `a[1:2]`), which the analyzer always rejects.
	Subscript {
		base: String,
		index: Option<Box<Expr>>,
	},
	/// Anything the parser cannot map into one of the variants above —
	/// dict/set literals, lambdas, f-strings, ternaries, attribute/method
	/// access, tuples, comprehensions, a call through anything but a bare
	/// name. Carried through to the analyzer instead of silently becoming
	/// `NoneConstant`, so the statement that contains it degrades to a
	/// comment instead of emitting a bogus value.
	Unhandled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
	Int,
	Float,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
	Add,
	Sub,
	Mult,
	Div,
	Mod,
	LShift,
	RShift,
	BitOr,
	BitAnd,
	BitXor,
	FloorDiv,
	Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
	Not,
	Invert,
	UAdd,
	USub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOperator {
	And,
	Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOperator {
	Eq,
	NotEq,
	Lt,
	LtE,
	Gt,
	GtE,
}
