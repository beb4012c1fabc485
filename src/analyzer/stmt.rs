use crate::ast::{Expr, ExprKind, IfStmt, Stmt, StmtKind, WhileStmt};
use crate::ir::{cell, type_precedence, CodeLine, ResolvedType, Variable, Vector};

use super::{indent_str, Analyzer, AnalysisError};

impl<'a> Analyzer<'a> {
	pub(crate) fn dispatch_statement(&mut self, func_key: &str, statement: &Stmt, depth: usize) -> Result<(), AnalysisError> {
		match &statement.node {
			StmtKind::FunctionDef(_) | StmtKind::ClassDef | StmtKind::Pass | StmtKind::Import | StmtKind::ImportFrom => Ok(()),
			StmtKind::Return(value) => self.handle_return(func_key, statement, value.as_ref(), depth),
			StmtKind::Break => {
				self.insert_line(func_key, statement.line, CodeLine::code(depth, "break;"));
				Ok(())
			},
			StmtKind::Continue => {
				self.insert_line(func_key, statement.line, CodeLine::code(depth, "continue;"));
				Ok(())
			},
			StmtKind::Expr(value) => self.handle_expr_statement(func_key, statement, value, depth),
			StmtKind::Assign { target, value } => self.handle_assign(func_key, statement, target, value, depth),
			StmtKind::If(if_stmt) => self.handle_if(func_key, statement, if_stmt, depth, "if"),
			StmtKind::While(while_stmt) => self.handle_while(func_key, statement, while_stmt, depth),
			StmtKind::Unhandled => Err(AnalysisError::NotSupported("unsupported statement".to_owned())),
		}
	}

	fn handle_return(&mut self, func_key: &str, statement: &Stmt, value: Option<&Expr>, depth: usize) -> Result<(), AnalysisError> {
		let Some(value) = value else {
			self.insert_line(func_key, statement.line, CodeLine::code(depth, "return;"));
			return Ok(());
		};
		let (text, ty) = self.eval_expr(func_key, value)?;
		if let Some(function) = self.unit.functions.get_mut(func_key) {
			function.widen_return_type(&ty);
		}
		self.insert_line(func_key, statement.line, CodeLine::code(depth, format!("return {text};")));
		Ok(())
	}

	/// Keyed by the statement's own starting line rather than the inner
	/// expression's line, so a value expression spanning multiple lines
	/// can never collide with a sibling statement starting where it ends.
	fn handle_expr_statement(&mut self, func_key: &str, statement: &Stmt, value: &Expr, depth: usize) -> Result<(), AnalysisError> {
		if let ExprKind::StringConstant(text) = &value.node {
			let block = docstring_comment(text, depth);
			self.insert_line(func_key, statement.line, CodeLine::code(depth, block));
			return Ok(());
		}
		if let ExprKind::Call { .. } = &value.node {
			let (text, _) = self.eval_expr(func_key, value)?;
			self.insert_line(func_key, statement.line, CodeLine::code(depth, format!("{text};")));
			return Ok(());
		}
		Err(AnalysisError::NotSupported("value not assigned or used".to_owned()))
	}

	fn handle_assign(&mut self, func_key: &str, statement: &Stmt, target: &str, value: &Expr, depth: usize) -> Result<(), AnalysisError> {
		if let ExprKind::List(elements) = &value.node {
			return self.handle_vector_assign(func_key, statement, target, elements, depth);
		}

		let (text, value_type) = self.eval_expr(func_key, value)?;

		let existing_type = self.unit.functions.get(func_key).and_then(|function| function.find_variable_type(target));
		if let Some(existing_type) = existing_type {
			let existing_kind = *existing_type.borrow();
			let incoming_kind = *value_type.borrow();
			if existing_kind != incoming_kind {
				// Only a widening assignment into an existing `float` from an
				// `int` value is allowed to pass through unchanged; every
				// other retype is rejected.
				let is_allowed_widening = existing_kind == ResolvedType::Float && incoming_kind == ResolvedType::Int;
				if !is_allowed_widening {
					return Err(AnalysisError::NotSupported(format!("cannot change the type of \"{target}\"")));
				}
			}
			self.insert_line(func_key, statement.line, CodeLine::code(depth, format!("{target} = {text};")));
			return Ok(());
		}

		if let Some(function) = self.unit.functions.get_mut(func_key) {
			function.locals.insert(target.to_owned(), Variable::new(target, statement.line, value_type));
		}
		self.insert_line(func_key, statement.line, CodeLine::code(depth, format!("{target} = {text};")));
		Ok(())
	}

	fn handle_vector_assign(&mut self, func_key: &str, statement: &Stmt, target: &str, elements: &[Expr], depth: usize) -> Result<(), AnalysisError> {
		let mut rendered_elements = Vec::with_capacity(elements.len());
		let mut element_type = cell(ResolvedType::Auto);
		let mut seen_first = false;
		for element in elements {
			let (text, ty) = self.eval_expr(func_key, element)?;
			if seen_first && *element_type.borrow() != *ty.borrow() {
				return Err(AnalysisError::NotSupported("heterogeneous list literal not supported".to_owned()));
			}
			if !seen_first {
				element_type = ty;
				seen_first = true;
			}
			rendered_elements.push(text);
		}
		self.unit.add_include("vector");

		let vector = Vector {
			name: target.to_owned(),
			element_type,
			elements: rendered_elements,
		};
		let declaration = vector.declaration();
		if let Some(function) = self.unit.functions.get_mut(func_key) {
			function.vectors.insert(target.to_owned(), vector);
		}
		self.insert_line(func_key, statement.line, CodeLine::code(depth, declaration));
		Ok(())
	}

	fn handle_if(&mut self, func_key: &str, statement: &Stmt, if_stmt: &IfStmt, depth: usize, if_keyword: &str) -> Result<(), AnalysisError> {
		let (condition_text, _) = self.eval_expr(func_key, &if_stmt.test)?;
		let header = format!("{if_keyword} ({condition_text})\n{}{{", indent_str(depth));
		self.insert_line(func_key, statement.line, CodeLine::code(depth, header));
		self.run_block_and_close(func_key, &if_stmt.body, depth);

		if if_stmt.or_else.is_empty() {
			return Ok(());
		}

		if if_stmt.or_else.len() == 1 {
			if let StmtKind::If(nested) = &if_stmt.or_else[0].node {
				return self.handle_if(func_key, &if_stmt.or_else[0], nested, depth, "else if");
			}
		}

		let first_else_stmt_line = if_stmt.or_else[0].line;
		let else_line = self
			.find_else_line(first_else_stmt_line)
			.ok_or_else(|| AnalysisError::NotSupported("could not locate matching else".to_owned()))?;
		let else_header = format!("else\n{}{{", indent_str(depth));
		self.insert_line(func_key, else_line, CodeLine::code(depth, else_header));
		self.run_block_and_close(func_key, &if_stmt.or_else, depth);
		Ok(())
	}

	fn handle_while(&mut self, func_key: &str, statement: &Stmt, while_stmt: &WhileStmt, depth: usize) -> Result<(), AnalysisError> {
		let (condition_text, _) = self.eval_expr(func_key, &while_stmt.test)?;
		let header = format!("while ({condition_text})\n{}{{", indent_str(depth));
		self.insert_line(func_key, statement.line, CodeLine::code(depth, header));
		self.run_block_and_close(func_key, &while_stmt.body, depth);
		Ok(())
	}

	/// Walks `body` one nesting level deeper, then closes the block by
	/// appending a closing brace to whichever `CodeLine` sits at the last
	/// statement's end line — which, for a nested compound statement, is
	/// the same physical source line its own closing brace was already
	/// appended to, producing stacked `}` lines exactly where Python's
	/// indentation would have ended multiple blocks at once.
	fn run_block_and_close(&mut self, func_key: &str, body: &[Stmt], depth: usize) {
		self.run_body(func_key, body, depth + 1);
		if let Some(last_statement) = body.last() {
			self.append_to_line(func_key, last_statement.end_line, depth, &format!("\n{}}}", indent_str(depth)));
		}
	}

	/// Scans backward from just before `before_line` for the literal
	/// `else:` token, skipping comment-only lines, matching
	/// the literal `else:` keyword on an unindented line.
	fn find_else_line(&self, before_line: u32) -> Option<u32> {
		let mut index = before_line.checked_sub(2)?;
		loop {
			let line_index = usize::try_from(index).ok()?;
			let line = *self.source_lines.get(line_index)?;
			let trimmed = line.trim_start();
			if trimmed.starts_with('#') {
				index = index.checked_sub(1)?;
				continue;
			}
			if trimmed.contains("else:") {
				return Some(index + 1);
			}
			index = index.checked_sub(1)?;
		}
	}
}

fn docstring_comment(text: &str, depth: usize) -> String {
	let tab = indent_str(depth);
	let mut lines = vec!["/*".to_owned()];
	lines.extend(text.lines().map(|line| format!("{tab}{line}")));
	lines.push(format!("{tab}*/"));
	lines.join("\n")
}
