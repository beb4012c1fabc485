use phf::phf_map;

use crate::ir::ResolvedType;

/// Python type-cast call names mapped to the C++ type they coerce to.
/// `str(x)` is handled separately in `analyzer::expr`, since it lowers to
/// `std::to_string(...)` rather than a plain cast.
pub static CAST_TYPES: phf::Map<&'static str, ResolvedType> = phf_map! {
	"int" => ResolvedType::Int,
	"float" => ResolvedType::Float,
	"bool" => ResolvedType::Bool,
};

/// Built-in functions py2cxx ports directly.
pub static PORTED_FUNCTIONS: &[&str] = &["print", "sqrt"];
