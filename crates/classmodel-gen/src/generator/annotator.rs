use crate::generator::codemodel::{EnumConstantDef, FieldDef, MethodDef, TypeDef};

/// Serialization-library hook points.
///
/// The rules call these at well-defined moments; implementations push
/// annotation text onto the definitions they receive. The engine itself
/// has no opinion about serialization libraries, so the default is a
/// no-op for every hook.
pub trait Annotator {
  /// Called once per generated class, before its properties are walked.
  fn property_inclusion(&self, _type_def: &mut TypeDef) {}

  fn property_order(&self, _type_def: &mut TypeDef, _property_names: &[String]) {}

  fn property_field(&self, _field: &mut FieldDef, _json_name: &str) {}

  fn property_getter(&self, _method: &mut MethodDef, _json_name: &str) {}

  fn property_setter(&self, _method: &mut MethodDef, _json_name: &str) {}

  fn any_getter(&self, _method: &mut MethodDef) {}

  fn any_setter(&self, _method: &mut MethodDef) {}

  fn enum_constant(&self, _constant: &mut EnumConstantDef, _value: &str) {}

  fn enum_creator(&self, _method: &mut MethodDef) {}

  fn enum_value(&self, _method: &mut MethodDef) {}

  /// Polymorphic dispatch metadata for a marker interface, from an
  /// OpenAPI style `discriminator`.
  fn sub_type_info(&self, _type_def: &mut TypeDef, _discriminator_property: &str) {}

  /// Whether generated classes may carry a catch-all properties map.
  /// Annotators for libraries without any-getter support return false and
  /// the additional-properties machinery is skipped entirely.
  fn additional_properties_supported(&self) -> bool {
    true
  }
}

/// Annotation-free annotator used when no serialization library is in play.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnnotator;

impl Annotator for NoopAnnotator {}
