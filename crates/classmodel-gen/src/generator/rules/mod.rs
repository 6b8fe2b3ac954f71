//! Keyword rules. Each schema node is claimed by exactly one rule, picked
//! by [`GenerationSession::apply_schema`] in a fixed precedence order:
//! `$ref`, then `allOf`, then `anyOf`/`oneOf`, then `enum`, then the
//! declared `type`. Rules recurse into each other through `apply_schema`,
//! which also owns memoization and the depth guard.

mod additional;
mod array;
mod combinators;
pub(crate) mod dedup;
mod enums;
mod format;
mod literals;
mod object;
mod properties;

#[cfg(test)]
mod tests;

use percent_encoding::percent_decode_str;
use serde_json::Value;

use self::dedup::RuleKind;
use crate::{
  config::OneOfStrategy,
  error::GenerationError,
  generator::{
    codemodel::{JavaPrimitive, JavaType, TypeId, type_by_name},
    metrics::GenerationWarning,
    schema::DocId,
    session::GenerationSession,
  },
};

impl GenerationSession {
  /// Resolves a schema node to a generated type handle, memoizing the
  /// result on the node. Re-entering a node that is mid-generation (a
  /// reference cycle) returns the memo written before descent, which is
  /// what terminates the recursion.
  pub(crate) fn apply_schema(
    &mut self,
    node_name: &str,
    doc: DocId,
    parent: Option<TypeId>,
  ) -> Result<JavaType, GenerationError> {
    if let Some(existing) = self.store.resolved_type(doc) {
      return Ok(existing.clone());
    }
    self.enter(doc)?;
    let result = self.dispatch(node_name, doc, parent);
    self.depth -= 1;
    let java_type = result?;
    self.store.set_type_if_empty(doc, java_type.clone());
    Ok(java_type)
  }

  fn dispatch(&mut self, node_name: &str, doc: DocId, parent: Option<TypeId>) -> Result<JavaType, GenerationError> {
    let content = self.store.content(doc).clone();

    if let Some(reference) = content.get("$ref").and_then(Value::as_str) {
      return self.apply_ref(node_name, reference, doc, parent);
    }
    if content.get("allOf").is_some() {
      return self.with_dedup(RuleKind::AllOf, doc, |s| s.apply_all_of(node_name, doc, parent));
    }
    if content.get("anyOf").is_some() {
      return self.with_dedup(RuleKind::AnyOf, doc, |s| s.apply_marker_union(node_name, doc, parent, "anyOf"));
    }
    if content.get("oneOf").is_some() {
      return match self.config.one_of_strategy {
        OneOfStrategy::MarkerInterface => {
          self.with_dedup(RuleKind::OneOf, doc, |s| s.apply_marker_union(node_name, doc, parent, "oneOf"))
        }
        OneOfStrategy::CommonAncestor => self.apply_common_ancestor(node_name, doc, parent),
      };
    }
    if content.get("enum").is_some() {
      return self.with_dedup(RuleKind::Enum, doc, |s| s.apply_enum(node_name, doc, parent));
    }
    self.apply_type(node_name, doc, parent, &content)
  }

  fn apply_ref(
    &mut self,
    node_name: &str,
    reference: &str,
    doc: DocId,
    parent: Option<TypeId>,
  ) -> Result<JavaType, GenerationError> {
    let delimiters = self.config.ref_fragment_path_delimiters.clone();
    let target = self.store.resolve(doc, reference, &delimiters)?;
    // The reference target's own name beats whatever property pointed here.
    let name = ref_basename(reference).unwrap_or_else(|| node_name.to_string());
    self.apply_schema(&name, target, parent)
  }

  fn apply_type(
    &mut self,
    node_name: &str,
    doc: DocId,
    parent: Option<TypeId>,
    content: &Value,
  ) -> Result<JavaType, GenerationError> {
    if let Some(existing) = content.get("existingJavaType").and_then(Value::as_str) {
      return Ok(type_by_name(existing));
    }

    match declared_type(content) {
      "string" => {
        if let Some(media) = content.get("media") {
          return Ok(format::media_type(media));
        }
        if let Some(format) = content.get("format").and_then(Value::as_str)
          && let Some(mapped) = format::format_type(&self.config, format)
        {
          return Ok(mapped);
        }
        Ok(JavaType::string())
      }
      "number" => Ok(self.number_type()),
      "integer" => Ok(self.integer_type(content)),
      "boolean" => Ok(self.wrap_primitive(JavaPrimitive::Boolean)),
      "object" => self.with_dedup(RuleKind::Object, doc, |s| s.apply_object(node_name, doc, parent)),
      "array" => self.with_dedup(RuleKind::Array, doc, |s| s.apply_array(node_name, doc, parent)),
      "null" | "any" => Ok(JavaType::object()),
      other => {
        let warning = GenerationWarning::UnrecognizedType {
          location: self.store.location(doc),
          type_value: other.to_string(),
        };
        self.stats.record_warning(warning);
        Ok(JavaType::object())
      }
    }
  }

  pub(crate) fn wrap_primitive(&self, primitive: JavaPrimitive) -> JavaType {
    if self.config.use_primitives {
      JavaType::Primitive(primitive)
    } else {
      JavaType::Boxed(primitive)
    }
  }

  pub(crate) fn number_type(&self) -> JavaType {
    if self.config.use_big_decimals {
      JavaType::Existing(String::from("java.math.BigDecimal"))
    } else if self.config.use_double_numbers {
      self.wrap_primitive(JavaPrimitive::Double)
    } else {
      self.wrap_primitive(JavaPrimitive::Float)
    }
  }

  pub(crate) fn integer_type(&self, content: &Value) -> JavaType {
    if self.config.use_big_integers {
      return JavaType::Existing(String::from("java.math.BigInteger"));
    }
    if self.config.use_long_integers || bounds_exceed_int(content) {
      return self.wrap_primitive(JavaPrimitive::Long);
    }
    self.wrap_primitive(JavaPrimitive::Int)
  }
}

/// The effective `type` of a node. Nodes without a `type` but with
/// properties count as objects; everything else untyped is `any`.
fn declared_type(content: &Value) -> &str {
  match content.get("type") {
    Some(Value::String(name)) => name,
    Some(Value::Array(names)) => names.iter().find_map(Value::as_str).unwrap_or("any"),
    _ => {
      let has_properties = content
        .get("properties")
        .and_then(Value::as_object)
        .is_some_and(|map| !map.is_empty());
      if has_properties { "object" } else { "any" }
    }
  }
}

/// Whether declared numeric bounds force a 64-bit representation.
fn bounds_exceed_int(content: &Value) -> bool {
  ["minimum", "maximum"].iter().any(|key| {
    content
      .get(*key)
      .and_then(Value::as_i64)
      .is_some_and(|bound| i32::try_from(bound).is_err())
  })
}

/// Last meaningful path segment of a reference, used as the naming seed
/// for the resolved type. A bare `#` carries no name.
pub(crate) fn ref_basename(reference: &str) -> Option<String> {
  if reference == "#" {
    return None;
  }
  let last = reference.rsplit(['/', '#']).find(|segment| !segment.is_empty())?;
  let decoded = percent_decode_str(last).decode_utf8_lossy();
  let name = decoded.strip_suffix(".json").unwrap_or(&decoded);
  if name.is_empty() { None } else { Some(name.to_string()) }
}
