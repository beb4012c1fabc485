use super::types::TypeCell;

/// A Python list literal bound to a name, translated to `std::vector`.
/// Python's only supported collection.
#[derive(Debug, Clone)]
pub struct Vector {
	pub name: String,
	pub element_type: TypeCell,
	pub elements: Vec<String>,
}

impl Vector {
	pub fn declaration(&self) -> String {
		let element_type = self.element_type.borrow().cxx_spelling();
		format!(
			"std::vector<{}> {} = {{ {} }};",
			element_type.trim(),
			self.name,
			self.elements.join(", ")
		)
	}

	pub fn access_element(&self, index: &str) -> String {
		format!("{}[{}]", self.name, index)
	}
}
