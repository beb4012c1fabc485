use std::cell::RefCell;
use std::rc::Rc;

/// Shared, mutable type storage. Cloning a `TypeCell` never copies the
/// resolved type — it shares the same `RefCell`, so refining the type
/// through one clone (e.g. widening a parameter's type at a later call
/// site) is visible through every other clone (the parameter's own
/// declaration, every earlier call site) once the type finalizer runs.
pub type TypeCell = Rc<RefCell<ResolvedType>>;

pub fn cell(ty: ResolvedType) -> TypeCell {
	Rc::new(RefCell::new(ty))
}

/// The closed set of C++ types py2cxx ever emits. `str`/`float`/`int`/
/// `bool`/`auto`/`None`/`void` form the total order `type_precedence`
/// resolves over; `CharPtrPtr` is only ever the entry point's `argv`
/// parameter type and never participates in precedence comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedType {
	Str,
	Float,
	Int,
	Bool,
	Auto,
	None,
	Void,
	CharPtrPtr,
}

impl ResolvedType {
	fn precedence(self) -> u8 {
		match self {
			Self::Str => 0,
			Self::Float => 1,
			Self::Int => 2,
			Self::Bool => 3,
			Self::Auto => 8,
			Self::None | Self::Void | Self::CharPtrPtr => 9,
		}
	}

	/// The C++ spelling used at declaration sites, including the trailing
	/// space so callers can concatenate directly (`<spelling><name>`).
	pub fn cxx_spelling(self) -> &'static str {
		match self {
			Self::Str => "std::string ",
			Self::Float => "double ",
			Self::Int => "int ",
			Self::Bool => "bool ",
			Self::None | Self::Void => "void ",
			Self::Auto => "auto ",
			Self::CharPtrPtr => "char** ",
		}
	}
}

/// The total order over known types: `str < float < int < bool < auto =
/// None = void`, smaller rank wins. Any type outside this closed set (there
/// is none in practice, since `ResolvedType` is exhaustive) collapses to
/// `auto`. When `a` and `b` are the *same* cell, the identical cell is
/// returned rather than a fresh clone of its value, preserving the
/// identity later refinement relies on.
pub fn type_precedence(a: &TypeCell, b: &TypeCell) -> TypeCell {
	if Rc::ptr_eq(a, b) {
		return Rc::clone(a);
	}
	let a_rank = a.borrow().precedence();
	let b_rank = b.borrow().precedence();
	if a_rank <= b_rank {
		Rc::clone(a)
	} else {
		Rc::clone(b)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn str_outranks_everything() {
		let winner = type_precedence(&cell(ResolvedType::Str), &cell(ResolvedType::Bool));
		assert_eq!(*winner.borrow(), ResolvedType::Str);
	}

	#[test]
	fn shared_cell_identity_is_preserved() {
		let shared = cell(ResolvedType::Int);
		let result = type_precedence(&shared, &shared);
		assert!(Rc::ptr_eq(&shared, &result));
	}

	#[test]
	fn widening_is_visible_through_every_clone() {
		let parameter_type = cell(ResolvedType::Auto);
		let call_site_clone = Rc::clone(&parameter_type);
		*call_site_clone.borrow_mut() = ResolvedType::Float;
		assert_eq!(*parameter_type.borrow(), ResolvedType::Float);
	}
}
