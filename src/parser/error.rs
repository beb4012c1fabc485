/// A fatal parse failure: the source does not parse as Python at all, so
/// there is no partial syntax tree to recover statements from. Unlike
/// `crate::analyzer::AnalysisError`, this always aborts translation of the
/// whole file.
#[derive(Debug, thiserror::Error)]
#[error("{file}:{line}:{column}: {message}")]
pub struct ParseError {
	pub file: String,
	pub line: u32,
	pub column: u32,
	pub message: String,
}
