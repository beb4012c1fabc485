//! The emitter: the last stage of the pipeline, turning a finalized,
//! comment-reinjected `TranslationUnit` into the bytes of one C++
//! translation unit.

use crate::ir::TranslationUnit;

/// Renders `unit` as a complete `.cpp` source file: includes, then a
/// forward declaration for every function but the entry point (the
/// entry point is never forward-declared, since nothing may call
/// `main`), then every function's full definition in the translation
/// unit's insertion order, which is always entry-point-first among the
/// registered functions and otherwise source order.
pub fn emit(unit: &TranslationUnit) -> String {
	let mut output = String::new();

	for include in &unit.includes {
		output += &format!("#include <{include}>\n");
	}
	if !unit.includes.is_empty() {
		output += "\n";
	}

	let declarations: Vec<String> =
		unit.functions.values().filter(|function| !function.is_entry_point()).map(|function| function.forward_declaration()).collect();
	if !declarations.is_empty() {
		for declaration in &declarations {
			output += declaration;
			output += "\n";
		}
		output += "\n";
	}

	let mut definitions = unit.functions.values().peekable();
	while let Some(function) = definitions.next() {
		output += &function.render_definition();
		if definitions.peek().is_some() {
			output += "\n\n";
		}
	}
	output += "\n";

	output
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ir::{cell, CodeLine, Function, ResolvedType};

	#[test]
	fn entry_point_alone_skips_forward_declarations_and_includes() {
		let mut unit = TranslationUnit::new();
		unit.entry_point_mut().lines.insert(1, CodeLine::code(0, "return 0;"));
		let rendered = emit(&unit);
		assert!(!rendered.contains("#include"));
		assert!(rendered.starts_with("int main(int argc, char** argv)\n{"));
	}

	#[test]
	fn user_function_gets_a_forward_declaration_before_main() {
		let mut unit = TranslationUnit::new();
		let mut square = Function::new("square", 1, 2, cell(ResolvedType::Int));
		square.lines.insert(2, CodeLine::code(0, "return x * x;"));
		unit.functions.insert("square".to_owned(), square);
		let rendered = emit(&unit);
		let declaration_pos = rendered.find("int square();").expect("forward declaration present");
		let main_pos = rendered.find("int main(").expect("main present");
		assert!(declaration_pos < main_pos);
	}

	#[test]
	fn includes_are_rendered_in_first_use_order() {
		let mut unit = TranslationUnit::new();
		unit.add_include("vector");
		unit.add_include("string");
		let rendered = emit(&unit);
		let vector_pos = rendered.find("#include <vector>").unwrap();
		let string_pos = rendered.find("#include <string>").unwrap();
		assert!(vector_pos < string_pos);
	}
}
