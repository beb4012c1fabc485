use indexmap::{IndexMap, IndexSet};

use super::function::{Function, Parameter, ENTRY_POINT_KEY};
use super::types::{cell, ResolvedType};
use super::variable::Variable;

/// The top-level container for one translated file. The synthetic entry
/// point is inserted at construction time so it is always present and
/// always first in `functions`' insertion order, regardless of where
/// top-level statements occur in the source.
pub struct TranslationUnit {
	pub includes: IndexSet<String>,
	pub functions: IndexMap<String, Function>,
}

impl TranslationUnit {
	pub fn new() -> Self {
		let mut entry_point = Function::new(ENTRY_POINT_KEY, 0, 0, cell(ResolvedType::Int));
		entry_point.parameters.insert(
			"argc".to_owned(),
			Parameter {
				variable: Variable::new("argc", 0, cell(ResolvedType::Int)),
				default_rendered: None,
			},
		);
		entry_point.parameters.insert(
			"argv".to_owned(),
			Parameter {
				variable: Variable::new("argv", 0, cell(ResolvedType::CharPtrPtr)),
				default_rendered: None,
			},
		);

		let mut functions = IndexMap::new();
		functions.insert(ENTRY_POINT_KEY.to_owned(), entry_point);
		Self { includes: IndexSet::new(), functions }
	}

	/// Records an include exactly once, in first-use order.
	pub fn add_include(&mut self, name: &str) {
		self.includes.insert(name.to_owned());
	}

	pub fn entry_point(&self) -> &Function {
		self.functions
			.get(ENTRY_POINT_KEY)
			.expect("the entry point is always inserted by TranslationUnit::new")
	}

	pub fn entry_point_mut(&mut self) -> &mut Function {
		self.functions
			.get_mut(ENTRY_POINT_KEY)
			.expect("the entry point is always inserted by TranslationUnit::new")
	}
}

impl Default for TranslationUnit {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn entry_point_is_always_first() {
		let mut unit = TranslationUnit::new();
		unit.functions.insert("square".to_owned(), Function::new("square", 1, 2, cell(ResolvedType::Auto)));
		let first_key = unit.functions.keys().next().map(String::as_str);
		assert_eq!(first_key, Some(ENTRY_POINT_KEY));
	}

	#[test]
	fn includes_deduplicate_in_first_use_order() {
		let mut unit = TranslationUnit::new();
		unit.add_include("iostream");
		unit.add_include("string");
		unit.add_include("iostream");
		assert_eq!(unit.includes.iter().collect::<Vec<_>>(), vec!["iostream", "string"]);
	}
}
