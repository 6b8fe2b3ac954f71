use std::{
  collections::{HashMap, HashSet},
  sync::LazyLock,
};

use super::model::TypeId;

/// Unboxed Java primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JavaPrimitive {
  Boolean,
  Byte,
  Short,
  Char,
  Int,
  Long,
  Float,
  Double,
}

impl JavaPrimitive {
  pub fn keyword(self) -> &'static str {
    match self {
      JavaPrimitive::Boolean => "boolean",
      JavaPrimitive::Byte => "byte",
      JavaPrimitive::Short => "short",
      JavaPrimitive::Char => "char",
      JavaPrimitive::Int => "int",
      JavaPrimitive::Long => "long",
      JavaPrimitive::Float => "float",
      JavaPrimitive::Double => "double",
    }
  }

  pub fn boxed_name(self) -> &'static str {
    match self {
      JavaPrimitive::Boolean => "java.lang.Boolean",
      JavaPrimitive::Byte => "java.lang.Byte",
      JavaPrimitive::Short => "java.lang.Short",
      JavaPrimitive::Char => "java.lang.Character",
      JavaPrimitive::Int => "java.lang.Integer",
      JavaPrimitive::Long => "java.lang.Long",
      JavaPrimitive::Float => "java.lang.Float",
      JavaPrimitive::Double => "java.lang.Double",
    }
  }
}

static PRIMITIVES_BY_KEYWORD: LazyLock<HashMap<&'static str, JavaPrimitive>> = LazyLock::new(|| {
  [
    JavaPrimitive::Boolean,
    JavaPrimitive::Byte,
    JavaPrimitive::Short,
    JavaPrimitive::Char,
    JavaPrimitive::Int,
    JavaPrimitive::Long,
    JavaPrimitive::Float,
    JavaPrimitive::Double,
  ]
  .into_iter()
  .map(|p| (p.keyword(), p))
  .collect()
});

/// Built-in types known to be final (or effectively so for inheritance
/// purposes). A data-driven stand-in for a live class-loader check: a
/// schema whose supertype lands on one of these collapses onto it instead
/// of generating a new class.
static KNOWN_FINAL_BUILTINS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
  HashSet::from([
    "java.lang.String",
    "java.lang.Boolean",
    "java.lang.Byte",
    "java.lang.Short",
    "java.lang.Character",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Float",
    "java.lang.Double",
    "java.util.UUID",
    "java.net.URI",
    "java.util.Locale",
  ])
});

/// Handle for a resolved type: the output of every rule.
///
/// Generated classes, enums and interfaces are `Defined` handles into the
/// [`ClassModel`](super::model::ClassModel) arena; everything else is
/// described structurally. Handle equality is what identity-sharing means:
/// two properties referencing the same schema location must resolve to an
/// equal `Defined` handle, not merely a structurally similar one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JavaType {
  Primitive(JavaPrimitive),
  Boxed(JavaPrimitive),
  /// An existing class addressed by fully qualified name.
  Existing(String),
  Array(Box<JavaType>),
  List(Box<JavaType>),
  Set(Box<JavaType>),
  Map(Box<JavaType>, Box<JavaType>),
  Defined(TypeId),
}

impl JavaType {
  pub fn object() -> JavaType {
    JavaType::Existing(String::from("java.lang.Object"))
  }

  pub fn string() -> JavaType {
    JavaType::Existing(String::from("java.lang.String"))
  }

  pub fn is_object(&self) -> bool {
    matches!(self, JavaType::Existing(name) if name == "java.lang.Object")
  }

  pub fn is_string(&self) -> bool {
    matches!(self, JavaType::Existing(name) if name == "java.lang.String")
  }

  pub fn is_primitive(&self) -> bool {
    matches!(self, JavaType::Primitive(_))
  }

  pub fn is_collection(&self) -> bool {
    matches!(self, JavaType::List(_) | JavaType::Set(_) | JavaType::Map(..))
  }

  /// Boxed view of this type, for contexts (collections, map values) that
  /// cannot hold an unboxed primitive.
  pub fn boxify(&self) -> JavaType {
    match self {
      JavaType::Primitive(p) => JavaType::Boxed(*p),
      other => other.clone(),
    }
  }

  /// Unboxed view, when one exists.
  pub fn unboxify(&self) -> JavaType {
    match self {
      JavaType::Boxed(p) => JavaType::Primitive(*p),
      other => other.clone(),
    }
  }

  /// The existing-class name this handle refers to, if any.
  pub fn existing_name(&self) -> Option<&str> {
    match self {
      JavaType::Existing(name) => Some(name),
      JavaType::Boxed(p) => Some(p.boxed_name()),
      _ => None,
    }
  }
}

/// Looks up an unboxed primitive by its Java keyword.
pub fn primitive_by_keyword(name: &str) -> Option<JavaPrimitive> {
  PRIMITIVES_BY_KEYWORD.get(name).copied()
}

/// Whether a fully qualified name denotes a known-final built-in.
pub fn is_final_builtin(name: &str) -> bool {
  KNOWN_FINAL_BUILTINS.contains(name)
}

/// Resolves a type-name override (`javaType` / `existingJavaType`) to a
/// handle, without consulting a class loader. Generic arguments are kept
/// verbatim in the existing-class name.
pub fn type_by_name(name: &str) -> JavaType {
  if let Some(element) = name.strip_suffix("[]") {
    return JavaType::Array(Box::new(type_by_name(element.trim_end())));
  }
  if let Some(p) = primitive_by_keyword(name) {
    return JavaType::Primitive(p);
  }
  JavaType::Existing(name.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn primitive_lookup_covers_all_keywords() {
    for keyword in ["boolean", "byte", "short", "char", "int", "long", "float", "double"] {
      assert!(primitive_by_keyword(keyword).is_some(), "missing {keyword}");
    }
    assert!(primitive_by_keyword("String").is_none());
  }

  #[test]
  fn boxify_round_trip() {
    let ty = JavaType::Primitive(JavaPrimitive::Int);
    assert_eq!(ty.boxify(), JavaType::Boxed(JavaPrimitive::Int));
    assert_eq!(ty.boxify().unboxify(), ty);
  }

  #[test]
  fn final_builtin_table() {
    assert!(is_final_builtin("java.lang.String"));
    assert!(!is_final_builtin("com.example.Widget"));
  }

  #[test]
  fn object_identity_helpers() {
    assert!(JavaType::object().is_object());
    assert!(!JavaType::string().is_object());
    assert_eq!(type_by_name("int"), JavaType::Primitive(JavaPrimitive::Int));
    assert_eq!(
      type_by_name("java.util.Currency"),
      JavaType::Existing("java.util.Currency".into())
    );
    assert_eq!(
      type_by_name("byte[]"),
      JavaType::Array(Box::new(JavaType::Primitive(JavaPrimitive::Byte)))
    );
  }
}
