//! The type finalizer. Runs once the analyzer has visited every
//! statement in every function, when every variable's and parameter's
//! type cell has settled, and patches each variable's declaring
//! `CodeLine` with its now-known type.

use crate::ir::{ResolvedType, TranslationUnit};

pub fn finalize(unit: &mut TranslationUnit) {
	for function in unit.functions.values_mut() {
		for variable in function.locals.values() {
			if let Some(code_line) = function.lines.get_mut(&variable.declared_line) {
				let spelling = variable.ty.borrow().cxx_spelling().to_owned();
				if !code_line.code.is_empty() {
					code_line.code = format!("{spelling}{}", code_line.code);
				}
			}
		}
	}

	let needs_string_header = unit
		.functions
		.values()
		.any(|function| function.locals.values().any(|variable| *variable.ty.borrow() == ResolvedType::Str));
	if needs_string_header {
		unit.add_include("string");
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ir::{cell, CodeLine, Variable, ENTRY_POINT_KEY};

	#[test]
	fn prepends_settled_type_to_declaration() {
		let mut unit = TranslationUnit::new();
		let entry = unit.entry_point_mut();
		entry.locals.insert("count".to_owned(), Variable::new("count", 3, cell(ResolvedType::Int)));
		entry.lines.insert(3, CodeLine::code(0, "count = 1;"));

		finalize(&mut unit);

		assert_eq!(unit.entry_point().lines[&3].code, "int count = 1;");
	}

	#[test]
	fn str_typed_locals_pull_in_string_header() {
		let mut unit = TranslationUnit::new();
		unit.entry_point_mut().locals.insert("name".to_owned(), Variable::new("name", 1, cell(ResolvedType::Str)));
		finalize(&mut unit);
		assert!(unit.includes.contains("string"));
	}

	#[test]
	fn entry_point_key_constant_matches() {
		assert_eq!(ENTRY_POINT_KEY, "0");
	}
}
