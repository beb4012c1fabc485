//! The analyzer: pre-pass plus main pass over py2cxx's restricted AST,
//! building the IR defined in `crate::ir`.

mod expr;
mod stmt;
mod tables;

use std::collections::BTreeSet;

use crate::ast::{FunctionDef, Module, Stmt, StmtKind};
use crate::ir::{cell, Function, Parameter, ResolvedType, TranslationUnit, Variable, ENTRY_POINT_KEY};

/// The recoverable error family. `VariableNotFound` is modeled as a
/// distinct internal variant only so call sites can tell it apart while
/// building their own message; it is always converted into
/// `NotSupported` before it leaves the analyzer module.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
	#[error("{0}")]
	NotSupported(String),
	#[error("variable used before declaration")]
	VariableNotFound,
}

impl AnalysisError {
	fn reason(&self) -> String {
		match self {
			Self::NotSupported(reason) => reason.clone(),
			Self::VariableNotFound => "variable used before declaration".to_owned(),
		}
	}
}

/// The outcome of running the analyzer over one module: the built
/// translation unit plus how many statements were degraded to comments.
pub struct AnalysisResult {
	pub unit: TranslationUnit,
	pub degraded_statements: usize,
	/// Every source line claimed by some statement, successful or
	/// degraded, consumed by `crate::comments` to find the lines nothing
	/// touched.
	pub claimed_lines: BTreeSet<u32>,
	/// `(owning function key, line, end_col_offset)` for every
	/// successfully translated statement that occupies a single source
	/// line — the only shape `crate::comments` can safely reattach a
	/// trailing `#` comment to without duplicating text a degraded
	/// statement already carried verbatim into its comment block.
	pub inline_targets: Vec<(String, u32, u32)>,
}

/// Runs the pre-pass and main pass over `module`, producing the
/// translation unit the type finalizer consumes next. Three strictly
/// separate passes: register every top-level function's header, then run
/// every registered function's body to completion, then walk the
/// top-level statements — so a top-level call to a function defined
/// later in the file, or a call inside one function's body to another
/// function defined later, always sees a fully analyzed callee.
pub fn analyze(module: &Module, source: &str) -> AnalysisResult {
	let mut analyzer = Analyzer {
		source_lines: source.lines().collect(),
		unit: TranslationUnit::new(),
		degraded_statements: 0,
		claimed_lines: BTreeSet::new(),
		inline_targets: Vec::new(),
	};
	analyzer.pre_analysis(&module.body);
	analyzer.analyze_function_bodies(&module.body);
	analyzer.run_body(ENTRY_POINT_KEY, &module.body, 0);
	AnalysisResult {
		unit: analyzer.unit,
		degraded_statements: analyzer.degraded_statements,
		claimed_lines: analyzer.claimed_lines,
		inline_targets: analyzer.inline_targets,
	}
}

pub(crate) struct Analyzer<'a> {
	pub(crate) source_lines: Vec<&'a str>,
	pub(crate) unit: TranslationUnit,
	degraded_statements: usize,
	claimed_lines: BTreeSet<u32>,
	inline_targets: Vec<(String, u32, u32)>,
}

impl<'a> Analyzer<'a> {
	/// Registers every top-level function's header before any body is
	/// walked, so forward references (a call to a function defined later
	/// in the file) resolve during the main pass.
	fn pre_analysis(&mut self, body: &[Stmt]) {
		for top_level_stmt in body {
			if let StmtKind::FunctionDef(function_def) = &top_level_stmt.node {
				if function_def.unsupported_signature {
					continue;
				}
				self.register_function_header(function_def, top_level_stmt.line, top_level_stmt.end_line);
			}
		}
	}

	fn register_function_header(&mut self, function_def: &FunctionDef, start_line: u32, end_line: u32) {
		let mut function = Function::new(function_def.name.clone(), start_line, end_line, cell(ResolvedType::Auto));

		for parameter in &function_def.params {
			let ty = cell(ResolvedType::Auto);
			let default_rendered = parameter
				.default
				.as_ref()
				.map(|default_expr| self.render_default(default_expr, &ty));
			function.parameters.insert(
				parameter.name.clone(),
				Parameter {
					variable: Variable::new(parameter.name.clone(), start_line, ty),
					default_rendered,
				},
			);
		}

		self.unit.functions.insert(function_def.name.clone(), function);
	}

	/// Evaluates a parameter's default-value literal at registration time
	/// (defaults are always simple literals in the supported subset) and
	/// seeds the parameter's type cell from it.
	fn render_default(&self, default_expr: &crate::ast::Expr, ty: &crate::ir::TypeCell) -> String {
		use crate::ast::ExprKind;
		match &default_expr.node {
			ExprKind::StringConstant(value) => {
				*ty.borrow_mut() = ResolvedType::Str;
				format!("\"{value}\"")
			},
			ExprKind::NumberConstant { text, kind } => {
				*ty.borrow_mut() = match kind {
					crate::ast::NumberKind::Int => ResolvedType::Int,
					crate::ast::NumberKind::Float => ResolvedType::Float,
				};
				text.clone()
			},
			ExprKind::BoolConstant(value) => {
				*ty.borrow_mut() = ResolvedType::Bool;
				if *value { "true".to_owned() } else { "false".to_owned() }
			},
			ExprKind::NoneConstant => {
				*ty.borrow_mut() = ResolvedType::Void;
				"NULL".to_owned()
			},
			_ => String::new(),
		}
	}

	/// Runs every registered top-level function's body to completion, in
	/// source order, as its own pass — entirely before any top-level
	/// statement is analyzed. A call inside one function's body to
	/// another function defined later in the file still resolves against
	/// that callee's already-registered header; only its body's own
	/// local effects (parameter widening from the calls inside it) may
	/// still be pending until this function reaches it in turn.
	fn analyze_function_bodies(&mut self, body: &[Stmt]) {
		for top_level_stmt in body {
			if let StmtKind::FunctionDef(function_def) = &top_level_stmt.node {
				if !function_def.unsupported_signature && self.unit.functions.contains_key(&function_def.name) {
					self.run_function_body(&function_def.name.clone(), &function_def.body);
				}
			}
		}
	}

	/// Walks one block of statements under `func_key`'s scope, at nesting
	/// `depth` (0 = directly inside the function's braces). A
	/// `FunctionDef` encountered here is always a no-op: top-level
	/// definitions were already walked to completion by
	/// `analyze_function_bodies`; nested definitions are outside the
	/// supported subset and are simply never descended into.
	fn run_body(&mut self, func_key: &str, body: &[Stmt], depth: usize) {
		for top_level_stmt in body {
			if matches!(top_level_stmt.node, StmtKind::FunctionDef(_)) {
				continue;
			}
			self.analyze_statement(func_key, top_level_stmt, depth);
		}
	}

	fn run_function_body(&mut self, name: &str, body: &[Stmt]) {
		self.run_body(name, body, 0);
	}

	/// Claims `statement`'s whole source range before dispatching it, then
	/// — only on success, and only for a statement confined to one
	/// physical line — records where on that line its own text ends, so
	/// `crate::comments` can tell a trailing `#` comment apart from the
	/// rest of the line. A degraded statement already carries its own
	/// trailing comment verbatim inside the raw block `emit_unhandled`
	/// produces, so it is deliberately excluded here.
	fn analyze_statement(&mut self, func_key: &str, statement: &Stmt, depth: usize) {
		self.claimed_lines.extend(statement.line..=statement.end_line);
		match self.dispatch_statement(func_key, statement, depth) {
			Ok(()) => {
				if statement.line == statement.end_line {
					self.inline_targets.push((func_key.to_owned(), statement.line, statement.end_col_offset));
				}
			},
			Err(error) => {
				self.degraded_statements += 1;
				self.emit_unhandled(func_key, statement, depth, &error.reason());
			},
		}
	}

	/// Converts the raw, byte-preserving source text of `[start, end]`
	/// into a `/* ... */` block comment, exactly the fallback path every
	/// unsupported construct takes.
	fn emit_unhandled(&mut self, func_key: &str, statement: &Stmt, depth: usize, reason: &str) {
		let raw = self.raw_source(statement.line, statement.end_line);
		let mut block = String::new();
		for (index, line) in raw.iter().enumerate() {
			if index == 0 {
				block.push_str("/*");
				block.push_str(line);
			} else {
				block.push('\n');
				block.push_str(line);
			}
		}
		block.push_str(&format!(" */ // TODO: not translated — {reason}"));
		self.insert_line(func_key, statement.line, crate::ir::CodeLine::code(depth, block));
	}

	fn raw_source(&self, start_line: u32, end_line: u32) -> Vec<&str> {
		let start = usize::try_from(start_line.saturating_sub(1)).unwrap_or(0);
		let end = usize::try_from(end_line).unwrap_or(self.source_lines.len()).min(self.source_lines.len());
		if start >= end {
			return Vec::new();
		}
		self.source_lines[start..end].to_vec()
	}

	pub(crate) fn insert_line(&mut self, func_key: &str, line: u32, code_line: crate::ir::CodeLine) {
		if let Some(function) = self.unit.functions.get_mut(func_key) {
			function.lines.insert(line, code_line);
		}
	}

	pub(crate) fn append_to_line(&mut self, func_key: &str, line: u32, indent: usize, text: &str) {
		if let Some(function) = self.unit.functions.get_mut(func_key) {
			let entry = function.lines.entry(line).or_insert_with(|| crate::ir::CodeLine::code(indent, String::new()));
			if entry.code.is_empty() {
				entry.code = text.to_owned();
			} else {
				entry.code.push('\n');
				entry.code.push_str(text);
			}
		}
	}
}

pub(crate) fn tabs(depth: usize) -> String {
	"\t".repeat(depth)
}

pub(crate) use tabs as indent_str;

pub(crate) use tables::{CAST_TYPES, PORTED_FUNCTIONS};
