/// The unit of emitted text. A `CodeLine` with neither
/// `code` nor `inline_comment` set is a blank separator line; one with
/// `code` empty and only `inline_comment` set is a comment-only line.
#[derive(Debug, Clone, Default)]
pub struct CodeLine {
	pub indent: usize,
	/// A whole comment line injected immediately before this one, e.g. a
	/// docstring block or a reinjected source comment that preceded this
	/// statement.
	pub pre_comment: Option<String>,
	pub code: String,
	/// A trailing `#` comment from the same source line, reattached as a
	/// trailing `//` comment.
	pub inline_comment: Option<String>,
}

impl CodeLine {
	pub fn code(indent: usize, code: impl Into<String>) -> Self {
		Self { indent, code: code.into(), ..Self::default() }
	}

	pub fn comment_only(indent: usize, comment: impl Into<String>) -> Self {
		Self { indent, inline_comment: Some(comment.into()), ..Self::default() }
	}

	fn tab(&self) -> String {
		"\t".repeat(self.indent)
	}

	pub fn render(&self) -> String {
		let tab = self.tab();
		let mut rendered = String::new();
		if let Some(pre_comment) = &self.pre_comment {
			rendered += &format!("{tab}{pre_comment}\n");
		}
		if !self.code.is_empty() {
			rendered += &format!("{tab}{}", self.code);
			if let Some(inline_comment) = &self.inline_comment {
				rendered += &format!(" // {inline_comment}");
			}
		} else if let Some(inline_comment) = &self.inline_comment {
			rendered += &format!("{tab}// {inline_comment}");
		}
		rendered
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn code_with_inline_comment() {
		let line = CodeLine {
			indent: 1,
			code: "int x = 1;".to_owned(),
			inline_comment: Some("note".to_owned()),
			..CodeLine::default()
		};
		assert_eq!(line.render(), "\tint x = 1; // note");
	}

	#[test]
	fn comment_only_line() {
		let line = CodeLine::comment_only(2, "a trailing remark");
		assert_eq!(line.render(), "\t\t// a trailing remark");
	}

	#[test]
	fn blank_line_renders_empty() {
		let line = CodeLine { indent: 3, ..CodeLine::default() };
		assert_eq!(line.render(), "");
	}

	#[test]
	fn pre_comment_precedes_code() {
		let mut line = CodeLine::code(0, "return 0;");
		line.pre_comment = Some("// about to return".to_owned());
		assert_eq!(line.render(), "// about to return\nreturn 0;");
	}
}
