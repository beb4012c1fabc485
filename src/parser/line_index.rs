use ruff_text_size::{TextRange, TextSize};

/// Converts byte offsets reported by `ruff_text_size` into 1-indexed
/// line/column pairs. `ruff_python_ast` nodes only carry `TextRange`s, not
/// line numbers, so every node the parser converts is stamped using this
/// index once, up front, instead of re-scanning the source per node.
///
pub struct LineIndex {
	/// Byte offset, within the source, of the start of each line.
	line_starts: Vec<TextSize>,
}

impl LineIndex {
	pub fn new(source: &str) -> Self {
		let mut line_starts = vec![TextSize::from(0)];
		for (offset, byte) in source.bytes().enumerate() {
			if byte == b'\n' {
				#[allow(clippy::cast_possible_truncation)]
				line_starts.push(TextSize::from(offset as u32 + 1));
			}
		}
		Self { line_starts }
	}

	/// Returns the 1-indexed `(line, column)` of a byte offset.
	pub fn line_column(&self, offset: TextSize) -> (u32, u32) {
		let line_index = match self.line_starts.binary_search(&offset) {
			Ok(exact) => exact,
			Err(insertion_point) => insertion_point - 1,
		};
		let column = offset - self.line_starts[line_index];
		#[allow(clippy::cast_possible_truncation)]
		(line_index as u32 + 1, u32::from(column) + 1)
	}

	/// Returns the 1-indexed `(start_line, end_line, end_column)` triple
	/// `crate::ast::Located` nodes are stamped with.
	pub fn range(&self, range: TextRange) -> (u32, u32, u32) {
		let (start_line, _) = self.line_column(range.start());
		let (end_line, end_column) = self.line_column(range.end());
		(start_line, end_line, end_column)
	}
}
