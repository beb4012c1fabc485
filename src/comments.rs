//! The comment reinjector. Runs after the type finalizer, once every
//! `CodeLine` a statement could produce already exists, and folds the
//! Python comments the analyzer never looks at back into the
//! translation unit: a trailing `#` comment becomes an inline `//`
//! comment on the line that already has code, and a source line with no
//! corresponding statement at all — a full-line comment, or blank
//! padding the analyzer had no reason to visit — is synthesized into its
//! own comment-only `CodeLine`.

use std::collections::BTreeSet;

use crate::ir::{CodeLine, TranslationUnit, ENTRY_POINT_KEY};

/// `inline_targets` and `claimed_lines` are exactly what
/// `crate::analyzer::analyze` returned alongside the unit being patched.
pub fn reinject(unit: &mut TranslationUnit, source: &str, claimed_lines: &BTreeSet<u32>, inline_targets: &[(String, u32, u32)]) {
	let source_lines: Vec<&str> = source.lines().collect();
	attach_inline_comments(unit, &source_lines, inline_targets);
	inject_orphan_lines(unit, &source_lines, claimed_lines);
}

fn attach_inline_comments(unit: &mut TranslationUnit, source_lines: &[&str], inline_targets: &[(String, u32, u32)]) {
	for (func_key, line, end_col_offset) in inline_targets {
		let Some(raw_line) = source_lines.get(usize::try_from(line.saturating_sub(1)).unwrap_or(0)) else {
			continue;
		};
		let Some(comment) = trailing_comment(raw_line, *end_col_offset) else {
			continue;
		};
		if let Some(code_line) = unit.functions.get_mut(func_key).and_then(|function| function.lines.get_mut(line)) {
			code_line.inline_comment = Some(comment);
		}
	}
}

/// Looks for a `#` at or beyond `end_col_offset` — the column where the
/// statement's own rendered text ended — and returns the trimmed text
/// after it. `end_col_offset` is a scalar-value column, matching
/// `ruff_text_size`'s convention, so the remainder is walked by `char`
/// rather than by byte.
fn trailing_comment(raw_line: &str, end_col_offset: u32) -> Option<String> {
	let skip = usize::try_from(end_col_offset).ok()?;
	let remainder: String = raw_line.chars().skip(skip).collect();
	let hash_index = remainder.find('#')?;
	let text = remainder[hash_index + 1..].trim();
	if text.is_empty() {
		None
	} else {
		Some(text.to_owned())
	}
}

/// Converts every source line nothing claimed into a comment-only
/// `CodeLine`, attached to whichever non-entry function's `[start_line,
/// end_line]` span contains it, or to the entry point — with one extra
/// indent level — when no function's span does.
fn inject_orphan_lines(unit: &mut TranslationUnit, source_lines: &[&str], claimed_lines: &BTreeSet<u32>) {
	let spans: Vec<(String, u32, u32)> = unit
		.functions
		.values()
		.filter(|function| !function.is_entry_point())
		.map(|function| (function.name.clone(), function.start_line, function.end_line))
		.collect();

	for (index, raw_line) in source_lines.iter().enumerate() {
		let Ok(line_number) = u32::try_from(index + 1) else {
			continue;
		};
		if claimed_lines.contains(&line_number) {
			continue;
		}
		let trimmed = raw_line.trim();
		if trimmed.is_empty() {
			continue;
		}
		let comment_text = trimmed.strip_prefix('#').map_or(trimmed, str::trim_start);

		let owner = spans.iter().find(|(_, start, end)| line_number >= *start && line_number <= *end);
		let (func_key, indent): (String, usize) = match owner {
			Some((name, ..)) => (name.clone(), 0),
			None => (ENTRY_POINT_KEY.to_owned(), 1),
		};
		if let Some(function) = unit.functions.get_mut(&func_key) {
			function.lines.entry(line_number).or_insert_with(|| CodeLine::comment_only(indent, comment_text.to_owned()));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ir::{cell, Function, ResolvedType};

	#[test]
	fn trailing_hash_comment_becomes_inline() {
		let mut unit = TranslationUnit::new();
		unit.entry_point_mut().lines.insert(1, CodeLine::code(0, "x = 1;"));
		let source = "x = 1  # set the counter\n";
		reinject(&mut unit, source, &BTreeSet::from([1]), &[(ENTRY_POINT_KEY.to_owned(), 1, 5)]);
		assert_eq!(unit.entry_point().lines[&1].inline_comment.as_deref(), Some("set the counter"));
	}

	#[test]
	fn unclaimed_comment_line_is_synthesized() {
		let mut unit = TranslationUnit::new();
		let source = "# a top-level remark\nx = 1\n";
		reinject(&mut unit, source, &BTreeSet::from([2]), &[]);
		let injected = &unit.entry_point().lines[&1];
		assert_eq!(injected.indent, 1);
		assert_eq!(injected.inline_comment.as_deref(), Some("a top-level remark"));
	}

	#[test]
	fn orphan_line_inside_function_span_uses_no_extra_indent() {
		let mut unit = TranslationUnit::new();
		unit.functions.insert("square".to_owned(), Function::new("square", 1, 3, cell(ResolvedType::Auto)));
		let source = "def square(x):\n    # doubling would be wrong here\n    return x * x\n";
		reinject(&mut unit, source, &BTreeSet::from([1, 3]), &[]);
		let injected = &unit.functions["square"].lines[&2];
		assert_eq!(injected.indent, 0);
		assert_eq!(injected.inline_comment.as_deref(), Some("doubling would be wrong here"));
	}
}
