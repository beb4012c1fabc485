use std::collections::BTreeMap;

use indexmap::IndexMap;

use super::code_line::CodeLine;
use super::types::{type_precedence, TypeCell};
use super::variable::Variable;
use super::vector::Vector;

/// The key the synthetic entry point is always registered under.
pub const ENTRY_POINT_KEY: &str = "0";

/// One function parameter. `default_rendered` is the already-rendered C++
/// expression text for the parameter's default value, kept separate from
/// the parameter's `Variable` so the forward declaration (which never
/// carries defaults) can omit it while the definition-site
/// signature includes it.
#[derive(Debug, Clone)]
pub struct Parameter {
	pub variable: Variable,
	pub default_rendered: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Function {
	/// The source identifier, or `ENTRY_POINT_KEY` for the synthetic
	/// top-level entry point.
	pub name: String,
	pub start_line: u32,
	pub end_line: u32,
	pub parameters: IndexMap<String, Parameter>,
	pub locals: IndexMap<String, Variable>,
	pub vectors: IndexMap<String, Vector>,
	pub return_type: TypeCell,
	/// Keyed by source line number; a `BTreeMap` so ascending-order
	/// iteration is structural rather than a separate re-sort pass.
	pub lines: BTreeMap<u32, CodeLine>,
}

impl Function {
	pub fn new(name: impl Into<String>, start_line: u32, end_line: u32, return_type: TypeCell) -> Self {
		Self {
			name: name.into(),
			start_line,
			end_line,
			parameters: IndexMap::new(),
			locals: IndexMap::new(),
			vectors: IndexMap::new(),
			return_type,
			lines: BTreeMap::new(),
		}
	}

	pub fn is_entry_point(&self) -> bool {
		self.name == ENTRY_POINT_KEY
	}

	/// The name this function is emitted under; the entry point is always
	/// renamed to `main`.
	pub fn display_name(&self) -> &str {
		if self.is_entry_point() {
			"main"
		} else {
			&self.name
		}
	}

	/// Looks up a name against parameters first, then locals.
	pub fn find_variable_type(&self, name: &str) -> Option<TypeCell> {
		self.parameters
			.get(name)
			.map(|parameter| &parameter.variable.ty)
			.or_else(|| self.locals.get(name).map(|variable| &variable.ty))
			.cloned()
	}

	/// Merges `incoming` into this function's return type via
	/// `type_precedence`, keeping cell identity so every earlier `return`
	/// statement and every call site observes the widened type once the
	/// type finalizer runs.
	pub fn widen_return_type(&mut self, incoming: &TypeCell) {
		let winner = *type_precedence(&self.return_type, incoming).borrow();
		*self.return_type.borrow_mut() = winner;
	}

	fn parameter_list(&self, include_defaults: bool) -> String {
		self.parameters
			.values()
			.map(|parameter| {
				let spelling = parameter.variable.ty.borrow().cxx_spelling().to_owned();
				let mut rendered = format!("{}{}", spelling, parameter.variable.name);
				if include_defaults {
					if let Some(default) = &parameter.default_rendered {
						rendered += &format!(" = {default}");
					}
				}
				rendered
			})
			.collect::<Vec<_>>()
			.join(", ")
	}

	/// The definition-site signature, including default values.
	pub fn signature(&self) -> String {
		let return_spelling = self.return_type.borrow().cxx_spelling().to_owned();
		format!("{}{}({})", return_spelling, self.display_name(), self.parameter_list(true))
	}

	/// The forward declaration: same as `signature`, but defaults are
	/// omitted and a trailing `;` closes the statement.
	pub fn forward_declaration(&self) -> String {
		let return_spelling = self.return_type.borrow().cxx_spelling().to_owned();
		format!("{}{}({});", return_spelling, self.display_name(), self.parameter_list(false))
	}

	/// Renders the full function body (not including the signature),
	/// indenting every line by one level relative to its own stored
	/// indent. The entry point gets a trailing `return 0;` appended before
	/// the closing brace, and only the entry point.
	pub fn render_body(&self) -> String {
		let mut body = String::new();
		for line in self.lines.values() {
			let rendered = line.render();
			if rendered.is_empty() {
				body += "\n";
				continue;
			}
			for piece in rendered.split('\n') {
				body += &format!("\n\t{piece}");
			}
		}
		if self.is_entry_point() {
			body += "\n\n\treturn 0;\n";
		} else {
			body += "\n";
		}
		body
	}

	pub fn render_definition(&self) -> String {
		format!("{}\n{{{}}}", self.signature(), self.render_body())
	}
}
