//! The type-declaration capability consumed by the rules: an arena-backed
//! class model plus the closed set of type handles rules can produce.
//! Rendering the model to source text is a separate concern and lives
//! outside this crate.

pub mod model;
pub mod types;

pub use model::{ClassModel, EnumConstantDef, FieldDef, Literal, MethodDef, MethodKind, Param, TypeDef, TypeId, TypeKind};
pub use types::{JavaPrimitive, JavaType, is_final_builtin, primitive_by_keyword, type_by_name};
