//! # py2cxx
//!
//! Translates a restricted, statically-analyzable subset of Python into
//! readable, best-effort C++.
//!
//! ## Installation
//!
//! py2cxx can be installed cross-platform with Cargo:
//!
//! ```bash
//! cargo install py2cxx
//! ```

/// py2cxx's own restricted statement/expression tree, the only thing the
/// analyzer ever sees.
pub mod ast;

/// Parses Python source into `ast` via the external Python parser.
pub mod parser;

/// The data model the analyzer builds, the type finalizer patches, the
/// comment reinjector augments, and the emitter renders.
pub mod ir;

/// The pre-pass-plus-main-pass tree walker that builds the `ir` from
/// `ast`.
pub mod analyzer;

/// Patches every variable's declaring line with its now-settled type,
/// once every statement has been visited.
pub mod finalize;

/// Folds the source comments the analyzer never looks at back into the
/// translation unit.
pub mod comments;

/// Renders a finalized, comment-reinjected translation unit to C++ text.
pub mod emit;

/// Optional `py2cxx.toml` project configuration.
pub mod config;

/// The CLI module: tooling for the command-line surface — subcommands,
/// argument parsing.
pub mod cli;

use clap::Parser as _;

use crate::cli::commands::{Py2cxxCommand as _, SubCommand};

/// The command-line arguments for py2cxx.
#[derive(clap::Parser)]
pub struct Py2cxxArguments {
	/// The subcommand to run, such as `translate` or `check`.
	#[command(subcommand)]
	pub command: SubCommand,
}

fn main() -> anyhow::Result<()> {
	Py2cxxArguments::parse().command.execute()
}

/// Runs the full pipeline — parse, analyze, finalize types, reinject
/// comments, emit — on one source string, returning the rendered C++
/// text alongside the count of statements that degraded to comments.
pub(crate) fn translate_source(source: &str, display_name: &str) -> Result<(String, usize), parser::ParseError> {
	let module = parser::parse(source, display_name)?;
	let mut result = analyzer::analyze(&module, source);
	finalize::finalize(&mut result.unit);
	comments::reinject(&mut result.unit, source, &result.claimed_lines, &result.inline_targets);
	Ok((emit::emit(&result.unit), result.degraded_statements))
}

#[cfg(test)]
mod end_to_end {
	use super::translate_source;

	fn translate(source: &str) -> String {
		translate_source(source, "test.py").expect("source should parse").0
	}

	/// S1 — widening. `x` is declared `int`, then receives a `float`: the
	/// first assignment succeeds, the second is narrowing-in-reverse and
	/// degrades to a comment rather than silently retyping `x`.
	#[test]
	fn s1_narrowing_assignment_degrades() {
		let cpp = translate("x = 1\nx = 1.5\n");
		assert!(cpp.contains("int x = 1;"), "{cpp}");
		assert!(cpp.contains("TODO:"), "{cpp}");
	}

	/// S2 — chained comparison folds into one `&&` per adjacent pair.
	#[test]
	fn s2_chained_comparison() {
		let cpp = translate("a = 1\nb = 2\nc = 3\nd = a < b < c\n");
		assert!(cpp.contains("((a < b) && (b < c))"), "{cpp}");
	}

	/// S3 — a parameter's type cell widens from `auto` to the type of its
	/// first observed call-site argument, reflected at every signature
	/// that reads the parameter's type afterward.
	#[test]
	fn s3_parameter_type_inference() {
		let cpp = translate("def f(x):\n    return x + 1\n\nf(2.5)\n");
		assert!(cpp.contains("double x"), "{cpp}");
	}

	/// S4 — `/` between two `int`s still widens to `double`, casting only
	/// the left operand so C++'s cast-then-divide precedence promotes the
	/// whole expression; `//` between two `int`s needs no cast at all,
	/// since C++'s native `/` already truncates for integer operands, but
	/// a mixed-type `//` does need one to force the truncation.
	#[test]
	fn s4_division_operators() {
		let cpp = translate("a = 3 / 2\nb = 3 // 2\nc = 3.0 // 2\n");
		assert!(cpp.contains("((double)3 / 2)"), "{cpp}");
		assert!(cpp.contains("(3 / 2)"), "{cpp}");
		assert!(cpp.contains("((int)(3 / 2))"), "{cpp}");
	}

	/// S5 — a list literal becomes a `std::vector`, pulling in `<vector>`.
	#[test]
	fn s5_list_literal_and_subscript() {
		let cpp = translate("xs = [1, 2, 3]\ny = xs[0]\n");
		assert!(cpp.contains("#include <vector>"), "{cpp}");
		assert!(cpp.contains("std::vector<int> xs = { 1, 2, 3 };"), "{cpp}");
		assert!(cpp.contains("int y = xs[0];"), "{cpp}");
	}

	/// S6 — an unsupported top-level construct (a class) contributes no
	/// emission of its own, and surrounding statements translate as if it
	/// were not there.
	#[test]
	fn s6_unsupported_class_is_skipped() {
		let cpp = translate("class C:\n    pass\n\nx = 1\n");
		assert!(cpp.contains("int x = 1;"), "{cpp}");
		assert!(!cpp.contains("class C"), "{cpp}");
	}

	/// S7 — a call to a function whose signature uses `**kwargs` (never
	/// registered by the pre-pass) degrades instead of panicking.
	#[test]
	fn s7_call_to_unregistered_function_degrades() {
		let cpp = translate("def f(**kwargs):\n    pass\n\nf(x=1)\n");
		assert!(cpp.contains("TODO:"), "{cpp}");
	}

	/// S8 — default parameter values are carried at the definition site
	/// and omitted from the forward declaration.
	#[test]
	fn s8_default_parameters() {
		let cpp = translate("def f(x=1, y=2.0):\n    return x\n\nf(1, 2.0)\n");
		assert!(cpp.contains("int x = 1, double y = 2"), "{cpp}");
		assert!(cpp.contains("int f(int x, double y);"), "{cpp}");
	}

	/// S9 — an `Expr` statement whose value spans multiple lines is keyed
	/// by its own starting line, never the line its value happens to end
	/// on.
	#[test]
	fn s9_multiline_expr_statement_keyed_by_start_line() {
		let cpp = translate("print(\n    1,\n)\nx = 1\n");
		assert!(cpp.contains("int x = 1;"), "{cpp}");
	}

	/// A forward reference: a call appearing before the `def` it targets
	/// still resolves, since every top-level function header is registered
	/// before any function body or top-level statement is analyzed.
	#[test]
	fn forward_reference_call_resolves() {
		let cpp = translate("y = square(2.5)\ndef square(x):\n    return x * x\n");
		assert!(!cpp.contains("TODO:"), "{cpp}");
		assert!(cpp.contains("double x"), "{cpp}");
	}

	/// A local variable that captures a parameter's type cell before a
	/// later call widens that parameter still observes the widened type,
	/// since widening mutates the shared cell in place rather than
	/// rebinding the parameter to a new one.
	#[test]
	fn widening_a_parameter_reaches_a_local_that_already_captured_its_cell() {
		let cpp = translate("def f(x):\n    y = x\n    return y\n\nf(1)\nf(2.5)\n");
		assert!(cpp.contains("double y = x;"), "{cpp}");
	}

	/// An expression form outside the supported subset (here, a dict
	/// literal) degrades the statement it appears in instead of silently
	/// emitting a placeholder value.
	#[test]
	fn unsupported_expression_degrades_its_statement() {
		let cpp = translate("x = {1: 2}\ny = 1\n");
		assert!(cpp.contains("TODO:"), "{cpp}");
		assert!(cpp.contains("int y = 1;"), "{cpp}");
	}

	#[test]
	fn idempotent_rerun_is_byte_identical() {
		let source = "x = 1\ny = x + 2\n";
		assert_eq!(translate(source), translate(source));
	}
}
