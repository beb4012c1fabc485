use ruff_python_ast::{self as py, CmpOp as PyCmpOp, Operator as PyOperator, UnaryOp as PyUnaryOp};
use ruff_text_size::Ranged;

use crate::ast::{
	BoolOperator, CmpOperator, Expr, ExprKind, FunctionDef, IfStmt, NumberKind, Operator, Parameter, Stmt, StmtKind, UnaryOperator, WhileStmt,
};

use super::line_index::LineIndex;

/// Converts a parsed `ruff_python_ast` module into py2cxx's own restricted
/// AST, stamping every node with the line information `LineIndex`
/// resolves from its byte range.
pub struct Converter<'a> {
	lines: &'a LineIndex,
}

impl<'a> Converter<'a> {
	pub fn new(lines: &'a LineIndex) -> Self {
		Self { lines }
	}

	pub fn convert_body(&self, body: &[py::Stmt]) -> Vec<Stmt> {
		body.iter().map(|stmt| self.convert_stmt(stmt)).collect()
	}

	fn locate<T>(&self, ranged: &impl Ranged, node: T) -> crate::ast::Located<T> {
		let (line, end_line, end_col_offset) = self.lines.range(ranged.range());
		crate::ast::Located::new(line, end_line, end_col_offset, node)
	}

	fn convert_stmt(&self, stmt: &py::Stmt) -> Stmt {
		match stmt {
			py::Stmt::FunctionDef(function_def) => self.convert_function_def(function_def),
			py::Stmt::ClassDef(class_def) => self.locate(class_def, StmtKind::ClassDef),
			py::Stmt::Return(return_stmt) => {
				let value = return_stmt.value.as_deref().map(|value| self.convert_expr(value));
				self.locate(return_stmt, StmtKind::Return(value))
			},
			py::Stmt::Assign(assign) => self.convert_assign(assign),
			py::Stmt::If(if_stmt) => self.convert_if(if_stmt),
			py::Stmt::While(while_stmt) => {
				let node = StmtKind::While(WhileStmt {
					test: self.convert_expr(&while_stmt.test),
					body: self.convert_body(&while_stmt.body),
				});
				self.locate(while_stmt, node)
			},
			py::Stmt::Break(break_stmt) => self.locate(break_stmt, StmtKind::Break),
			py::Stmt::Continue(continue_stmt) => self.locate(continue_stmt, StmtKind::Continue),
			py::Stmt::Expr(expr_stmt) => {
				let value = self.convert_expr(&expr_stmt.value);
				self.locate(expr_stmt, StmtKind::Expr(value))
			},
			py::Stmt::Import(import_stmt) => self.locate(import_stmt, StmtKind::Import),
			py::Stmt::ImportFrom(import_from) => self.locate(import_from, StmtKind::ImportFrom),
			py::Stmt::Pass(pass_stmt) => self.locate(pass_stmt, StmtKind::Pass),
			other => self.locate(other, StmtKind::Unhandled),
		}
	}

	fn convert_function_def(&self, function_def: &py::StmtFunctionDef) -> Stmt {
		let parameters = &function_def.parameters;
		let unsupported_signature =
			!parameters.posonlyargs.is_empty() || !parameters.kwonlyargs.is_empty() || parameters.vararg.is_some() || parameters.kwarg.is_some();

		let params = parameters
			.args
			.iter()
			.map(|parameter_with_default| Parameter {
				name: parameter_with_default.parameter.name.to_string(),
				default: parameter_with_default.default.as_deref().map(|default| self.convert_expr(default)),
			})
			.collect();

		let node = StmtKind::FunctionDef(FunctionDef {
			name: function_def.name.to_string(),
			params,
			body: self.convert_body(&function_def.body),
			unsupported_signature,
		});
		self.locate(function_def, node)
	}

	fn convert_assign(&self, assign: &py::StmtAssign) -> Stmt {
		if assign.targets.len() != 1 {
			return self.locate(assign, StmtKind::Unhandled);
		}
		let py::Expr::Name(name) = &assign.targets[0] else {
			return self.locate(assign, StmtKind::Unhandled);
		};
		let node = StmtKind::Assign {
			target: name.id.to_string(),
			value: self.convert_expr(&assign.value),
		};
		self.locate(assign, node)
	}

	/// Folds `ruff`'s flattened `elif_else_clauses` list into the nested
	/// `If`/`or_else` shape the analyzer's elif-vs-else detection expects
	/// (an `or_else` of exactly one nested `If` means "else if", anything
	/// else means a plain `else`).
	fn convert_if(&self, if_stmt: &py::StmtIf) -> Stmt {
		let mut or_else: Vec<Stmt> = Vec::new();
		for clause in if_stmt.elif_else_clauses.iter().rev() {
			or_else = match &clause.test {
				Some(test) => {
					let nested = crate::ast::Located::new(
						self.lines.range(clause.range()).0,
						self.lines.range(clause.range()).1,
						self.lines.range(clause.range()).2,
						StmtKind::If(IfStmt {
							test: self.convert_expr(test),
							body: self.convert_body(&clause.body),
							or_else,
						}),
					);
					vec![nested]
				},
				None => self.convert_body(&clause.body),
			};
		}

		let node = StmtKind::If(IfStmt {
			test: self.convert_expr(&if_stmt.test),
			body: self.convert_body(&if_stmt.body),
			or_else,
		});
		self.locate(if_stmt, node)
	}

	fn convert_expr(&self, expr: &py::Expr) -> Expr {
		match expr {
			py::Expr::BoolOp(bool_op) => {
				let node = ExprKind::BoolOp {
					op: convert_bool_op(bool_op.op),
					values: bool_op.values.iter().map(|value| self.convert_expr(value)).collect(),
				};
				self.locate(bool_op, node)
			},
			py::Expr::BinOp(bin_op) => {
				let node = ExprKind::BinOp {
					left: Box::new(self.convert_expr(&bin_op.left)),
					op: convert_operator(bin_op.op),
					right: Box::new(self.convert_expr(&bin_op.right)),
				};
				self.locate(bin_op, node)
			},
			py::Expr::UnaryOp(unary_op) => {
				let node = ExprKind::UnaryOp {
					op: convert_unary_op(unary_op.op),
					operand: Box::new(self.convert_expr(&unary_op.operand)),
				};
				self.locate(unary_op, node)
			},
			py::Expr::Compare(compare) => {
				let node = ExprKind::Compare {
					left: Box::new(self.convert_expr(&compare.left)),
					ops: compare.ops.iter().filter_map(|op| convert_cmp_op(*op)).collect(),
					comparators: compare.comparators.iter().map(|comparator| self.convert_expr(comparator)).collect(),
				};
				self.locate(compare, node)
			},
			py::Expr::Call(call) => match call.func.as_ref() {
				py::Expr::Name(name) => {
					let node = ExprKind::Call {
						func: name.id.to_string(),
						args: call.arguments.args.iter().map(|argument| self.convert_expr(argument)).collect(),
					};
					self.locate(call, node)
				},
				_ => self.locate(call, ExprKind::Unhandled),
			},
			py::Expr::Name(name) => self.locate(name, ExprKind::Name(name.id.to_string())),
			py::Expr::NumberLiteral(number) => {
				let (text, kind) = match &number.value {
					py::Number::Int(value) => (value.to_string(), NumberKind::Int),
					py::Number::Float(value) => (value.to_string(), NumberKind::Float),
					py::Number::Complex { .. } => (String::new(), NumberKind::Float),
				};
				self.locate(number, ExprKind::NumberConstant { text, kind })
			},
			py::Expr::StringLiteral(string) => self.locate(string, ExprKind::StringConstant(string.value.to_str().to_owned())),
			py::Expr::BooleanLiteral(boolean) => self.locate(boolean, ExprKind::BoolConstant(boolean.value)),
			py::Expr::NoneLiteral(none) => self.locate(none, ExprKind::NoneConstant),
			py::Expr::List(list) => {
				let node = ExprKind::List(list.elts.iter().map(|element| self.convert_expr(element)).collect());
				self.locate(list, node)
			},
			py::Expr::Subscript(subscript) => {
				let base = match subscript.value.as_ref() {
					py::Expr::Name(name) => name.id.to_string(),
					_ => String::new(),
				};
				let index = match subscript.slice.as_ref() {
					py::Expr::Slice(_) => None,
					other => Some(Box::new(self.convert_expr(other))),
				};
				self.locate(subscript, ExprKind::Subscript { base, index })
			},
			other => self.locate(other, ExprKind::Unhandled),
		}
	}
}

fn convert_operator(op: PyOperator) -> Operator {
	match op {
		PyOperator::Add => Operator::Add,
		PyOperator::Sub => Operator::Sub,
		PyOperator::Mult => Operator::Mult,
		PyOperator::Div => Operator::Div,
		PyOperator::Mod => Operator::Mod,
		PyOperator::LShift => Operator::LShift,
		PyOperator::RShift => Operator::RShift,
		PyOperator::BitOr => Operator::BitOr,
		PyOperator::BitAnd => Operator::BitAnd,
		PyOperator::BitXor => Operator::BitXor,
		PyOperator::FloorDiv => Operator::FloorDiv,
		PyOperator::Pow | PyOperator::MatMult => Operator::Pow,
	}
}

fn convert_unary_op(op: PyUnaryOp) -> UnaryOperator {
	match op {
		PyUnaryOp::Invert => UnaryOperator::Invert,
		PyUnaryOp::Not => UnaryOperator::Not,
		PyUnaryOp::UAdd => UnaryOperator::UAdd,
		PyUnaryOp::USub => UnaryOperator::USub,
	}
}

fn convert_bool_op(op: py::BoolOp) -> BoolOperator {
	match op {
		py::BoolOp::And => BoolOperator::And,
		py::BoolOp::Or => BoolOperator::Or,
	}
}

/// `is`/`is not`/`in`/`not in` are deliberately excluded, matching
/// the analyzer's chained-comparison fold; a comparison chain using one of
/// these becomes one fewer entry than `comparators`, which the analyzer
/// detects and reports as unsupported rather than silently misaligning
/// operator/operand pairs.
fn convert_cmp_op(op: PyCmpOp) -> Option<CmpOperator> {
	match op {
		PyCmpOp::Eq => Some(CmpOperator::Eq),
		PyCmpOp::NotEq => Some(CmpOperator::NotEq),
		PyCmpOp::Lt => Some(CmpOperator::Lt),
		PyCmpOp::LtE => Some(CmpOperator::LtE),
		PyCmpOp::Gt => Some(CmpOperator::Gt),
		PyCmpOp::GtE => Some(CmpOperator::GtE),
		PyCmpOp::Is | PyCmpOp::IsNot | PyCmpOp::In | PyCmpOp::NotIn => None,
	}
}
