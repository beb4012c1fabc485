//! The parser stage. Delegates to `ruff_python_parser`
//! for real Python grammar handling and converts the resulting syntax tree
//! into py2cxx's own restricted AST.

mod convert;
mod error;
mod line_index;

pub use error::ParseError;

use crate::ast::Module;
use convert::Converter;
use line_index::LineIndex;

/// Parses `source` into py2cxx's restricted AST. `filename` is used only
/// for error reporting.
pub fn parse(source: &str, filename: &str) -> Result<Module, ParseError> {
	let parsed = ruff_python_parser::parse_module(source).map_err(|error| {
		let lines = LineIndex::new(source);
		let (line, column) = lines.line_column(error.location.start());
		ParseError {
			file: filename.to_owned(),
			line,
			column,
			message: error.error.to_string(),
		}
	})?;

	let lines = LineIndex::new(source);
	let converter = Converter::new(&lines);
	let module = parsed.into_syntax();
	Ok(Module {
		body: converter.convert_body(&module.body),
	})
}
