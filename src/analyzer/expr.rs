use crate::ast::{BoolOperator, CmpOperator, Expr, ExprKind, NumberKind, Operator, UnaryOperator};
use crate::ir::{cell, type_precedence, ResolvedType, TypeCell, Vector};

use super::{tables, Analyzer, AnalysisError};

type EvalResult = Result<(String, TypeCell), AnalysisError>;

impl<'a> Analyzer<'a> {
	/// Evaluates one expression in `func_key`'s scope, returning its
	/// rendered C++ text alongside the (possibly shared) type cell that
	/// describes its result.
	pub(crate) fn eval_expr(&mut self, func_key: &str, expr: &Expr) -> EvalResult {
		match &expr.node {
			ExprKind::BinOp { left, op, right } => self.eval_bin_op(func_key, left, *op, right),
			ExprKind::BoolOp { op, values } => self.eval_bool_op(func_key, *op, values),
			ExprKind::UnaryOp { op, operand } => self.eval_unary_op(func_key, *op, operand),
			ExprKind::Compare { left, ops, comparators } => self.eval_compare(func_key, left, ops, comparators),
			ExprKind::Call { func, args } => self.eval_call(func_key, func, args),
			ExprKind::Name(name) => self.eval_name(func_key, name),
			ExprKind::StringConstant(value) => {
				self.unit.add_include("string");
				Ok((format!("\"{value}\""), cell(ResolvedType::Str)))
			},
			ExprKind::NumberConstant { text, kind } => {
				let ty = match kind {
					NumberKind::Int => ResolvedType::Int,
					NumberKind::Float => ResolvedType::Float,
				};
				Ok((text.clone(), cell(ty)))
			},
			ExprKind::BoolConstant(value) => Ok(((if *value { "true" } else { "false" }).to_owned(), cell(ResolvedType::Bool))),
			ExprKind::NoneConstant => Ok(("NULL".to_owned(), cell(ResolvedType::None))),
			ExprKind::List(elements) => self.eval_list(func_key, elements),
			ExprKind::Subscript { base, index } => self.eval_subscript(func_key, base, index.as_deref()),
			ExprKind::Unhandled => Err(AnalysisError::NotSupported("unsupported expression".to_owned())),
		}
	}

	fn eval_name(&mut self, func_key: &str, name: &str) -> EvalResult {
		let ty = self
			.unit
			.functions
			.get(func_key)
			.and_then(|function| function.find_variable_type(name))
			.ok_or(AnalysisError::VariableNotFound)?;
		Ok((name.to_owned(), ty))
	}

	fn eval_bool_op(&mut self, func_key: &str, op: BoolOperator, values: &[Expr]) -> EvalResult {
		let mut rendered = Vec::with_capacity(values.len());
		let mut first_type: Option<TypeCell> = None;
		let mut mixed = false;
		for value in values {
			let (text, ty) = self.eval_expr(func_key, value)?;
			rendered.push(text);
			match &first_type {
				None => first_type = Some(ty),
				Some(existing) => {
					if *existing.borrow() != *ty.borrow() {
						mixed = true;
					}
				},
			}
		}
		let joiner = match op {
			BoolOperator::And => " && ",
			BoolOperator::Or => " || ",
		};
		let result_type = if mixed { cell(ResolvedType::Auto) } else { first_type.unwrap_or_else(|| cell(ResolvedType::Auto)) };
		Ok((format!("({})", rendered.join(joiner)), result_type))
	}

	fn eval_unary_op(&mut self, func_key: &str, op: UnaryOperator, operand: &Expr) -> EvalResult {
		let (text, _) = self.eval_expr(func_key, operand)?;
		let (symbol, result_type) = match op {
			UnaryOperator::Not => ("!", ResolvedType::Bool),
			UnaryOperator::Invert => ("~", ResolvedType::Int),
			UnaryOperator::UAdd => ("+", ResolvedType::Int),
			UnaryOperator::USub => ("-", ResolvedType::Int),
		};
		Ok((format!("({symbol}{text})"), cell(result_type)))
	}

	fn eval_bin_op(&mut self, func_key: &str, left: &Expr, op: Operator, right: &Expr) -> EvalResult {
		let (left_text, left_type) = self.eval_expr(func_key, left)?;
		let (right_text, right_type) = self.eval_expr(func_key, right)?;

		match op {
			Operator::Pow => {
				self.unit.add_include("cmath");
				Ok((format!("(pow({left_text}, {right_text}))"), cell(ResolvedType::Float)))
			},
			Operator::FloorDiv => {
				let both_int = *left_type.borrow() == ResolvedType::Int && *right_type.borrow() == ResolvedType::Int;
				let expr = if both_int {
					format!("({left_text} / {right_text})")
				} else {
					format!("((int)({left_text} / {right_text}))")
				};
				Ok((expr, cell(ResolvedType::Int)))
			},
			Operator::Div => {
				let both_float = *left_type.borrow() == ResolvedType::Float && *right_type.borrow() == ResolvedType::Float;
				let expr = if both_float {
					format!("({left_text} / {right_text})")
				} else {
					format!("((double){left_text} / {right_text})")
				};
				Ok((expr, cell(ResolvedType::Float)))
			},
			_ => {
				let symbol = operator_symbol(op);
				let result_type = type_precedence(&left_type, &right_type);
				Ok((format!("({left_text}{symbol}{right_text})"), result_type))
			},
		}
	}

	/// The corrected chained-comparison fold: every adjacent
	/// `(operand, operator, operand)` triple contributes one conjunction
	/// term, never skipping the final middle comparator the way
	/// a naively-bounded fold would.
	fn eval_compare(&mut self, func_key: &str, left: &Expr, ops: &[CmpOperator], comparators: &[Expr]) -> EvalResult {
		if ops.len() != comparators.len() {
			return Err(AnalysisError::NotSupported("unsupported comparison operator in chain".to_owned()));
		}

		let (mut previous_text, _) = self.eval_expr(func_key, left)?;
		let mut terms = Vec::with_capacity(ops.len());
		for (op, comparator) in ops.iter().zip(comparators) {
			let (comparator_text, _) = self.eval_expr(func_key, comparator)?;
			terms.push(format!("({previous_text} {} {comparator_text})", cmp_symbol(*op)));
			previous_text = comparator_text;
		}

		Ok((format!("({})", terms.join(" && ")), cell(ResolvedType::Bool)))
	}

	fn eval_call(&mut self, func_key: &str, name: &str, args: &[Expr]) -> EvalResult {
		if let Some(&target_type) = tables::CAST_TYPES.get(name) {
			let (text, _) = self.eval_expr(func_key, args.first().ok_or_else(|| AnalysisError::NotSupported(format!("{name}() requires one argument")))?)?;
			return Ok((format!("(({})({text}))", target_type.cxx_spelling().trim()), cell(target_type)));
		}
		if name == "str" {
			self.unit.add_include("string");
			let (text, _) = self.eval_expr(func_key, args.first().ok_or_else(|| AnalysisError::NotSupported("str() requires one argument".to_owned()))?)?;
			return Ok((format!("std::to_string({text})"), cell(ResolvedType::Str)));
		}

		if self.unit.functions.contains_key(name) {
			return self.eval_user_call(func_key, name, args);
		}

		if tables::PORTED_FUNCTIONS.contains(&name) {
			return self.eval_ported_call(func_key, name, args);
		}

		Err(AnalysisError::NotSupported("call to function not in scope".to_owned()))
	}

	fn eval_user_call(&mut self, func_key: &str, name: &str, args: &[Expr]) -> EvalResult {
		let mut rendered_args = Vec::with_capacity(args.len());
		for (index, argument) in args.iter().enumerate() {
			let (text, argument_type) = self.eval_expr(func_key, argument)?;
			rendered_args.push(text);

			let parameter_key = self
				.unit
				.functions
				.get(name)
				.and_then(|function| function.parameters.get_index(index).map(|(key, _)| key.clone()));
			if let Some(parameter_key) = parameter_key {
				if let Some(function) = self.unit.functions.get_mut(name) {
					if let Some(parameter) = function.parameters.get_mut(&parameter_key) {
						let winner = *type_precedence(&parameter.variable.ty, &argument_type).borrow();
						*parameter.variable.ty.borrow_mut() = winner;
					}
				}
			}
		}

		let return_type = self
			.unit
			.functions
			.get(name)
			.map(|function| std::rc::Rc::clone(&function.return_type))
			.ok_or_else(|| AnalysisError::NotSupported("call to function not in scope".to_owned()))?;

		// Avoid borrowing the same name twice when `func_key == name` (direct recursion).
		let _ = func_key;
		Ok((format!("{name}({})", rendered_args.join(", ")), return_type))
	}

	fn eval_ported_call(&mut self, func_key: &str, name: &str, args: &[Expr]) -> EvalResult {
		match name {
			"print" => {
				self.unit.add_include("iostream");
				let mut rendered_args = Vec::with_capacity(args.len());
				for argument in args {
					let (text, _) = self.eval_expr(func_key, argument)?;
					rendered_args.push(text);
				}
				Ok((format!("std::cout << {}", rendered_args.join(" << ")), cell(ResolvedType::None)))
			},
			"sqrt" => {
				if args.len() != 1 {
					return Err(AnalysisError::NotSupported("sqrt() takes exactly one argument".to_owned()));
				}
				self.unit.add_include("cmath");
				let (text, _) = self.eval_expr(func_key, &args[0])?;
				Ok((format!("sqrt({text})"), cell(ResolvedType::Float)))
			},
			_ => unreachable!("eval_ported_call is only reached for names in PORTED_FUNCTIONS"),
		}
	}

	fn eval_list(&mut self, func_key: &str, elements: &[Expr]) -> EvalResult {
		if elements.is_empty() {
			return Ok(("{}".to_owned(), cell(ResolvedType::Auto)));
		}
		let mut rendered = Vec::with_capacity(elements.len());
		let mut element_type: Option<TypeCell> = None;
		for element in elements {
			let (text, ty) = self.eval_expr(func_key, element)?;
			if let Some(existing) = &element_type {
				if *existing.borrow() != *ty.borrow() {
					return Err(AnalysisError::NotSupported("heterogeneous list literal not supported".to_owned()));
				}
			} else {
				element_type = Some(ty);
			}
			rendered.push(text);
		}
		self.unit.add_include("vector");
		Ok((format!("{{ {} }}", rendered.join(", ")), element_type.unwrap_or_else(|| cell(ResolvedType::Auto))))
	}

	fn eval_subscript(&mut self, func_key: &str, base: &str, index: Option<&Expr>) -> EvalResult {
		let element_type = self
			.unit
			.functions
			.get(func_key)
			.and_then(|function| function.vectors.get(base))
			.map(|vector: &Vector| std::rc::Rc::clone(&vector.element_type))
			.ok_or(AnalysisError::VariableNotFound)?;

		let Some(index) = index else {
			return Err(AnalysisError::NotSupported("range query on vector not supported".to_owned()));
		};
		let (index_text, _) = self.eval_expr(func_key, index)?;
		Ok((format!("{base}[{index_text}]"), element_type))
	}
}

fn operator_symbol(op: Operator) -> &'static str {
	match op {
		Operator::Add => "+",
		Operator::Sub => "-",
		Operator::Mult => " * ",
		Operator::Mod => " % ",
		Operator::LShift => " << ",
		Operator::RShift => " >> ",
		Operator::BitOr => " | ",
		Operator::BitAnd => " & ",
		Operator::BitXor => " ^ ",
		Operator::Div | Operator::FloorDiv | Operator::Pow => unreachable!("handled separately in eval_bin_op"),
	}
}

fn cmp_symbol(op: CmpOperator) -> &'static str {
	match op {
		CmpOperator::Eq => "==",
		CmpOperator::NotEq => "!=",
		CmpOperator::Lt => "<",
		CmpOperator::LtE => "<=",
		CmpOperator::Gt => ">",
		CmpOperator::GtE => ">=",
	}
}
