use std::collections::HashMap;

use json_canon::to_string as to_canonical_json;
use serde_json::Value;

use crate::{
  error::GenerationError,
  generator::{codemodel::JavaType, schema::DocId, session::GenerationSession},
};

/// Which rule produced a cached result. Structurally equal schemas only
/// collapse when the same rule would fire for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum RuleKind {
  Object,
  Array,
  Enum,
  AllOf,
  AnyOf,
  OneOf,
}

/// Content-addressed results of the structure-generating rules.
#[derive(Debug, Default)]
pub(crate) struct DedupCache {
  by_content: HashMap<(RuleKind, [u8; 32]), JavaType>,
}

impl DedupCache {
  fn get(&self, kind: RuleKind, fingerprint: &[u8; 32]) -> Option<&JavaType> {
    self.by_content.get(&(kind, *fingerprint))
  }

  fn insert(&mut self, kind: RuleKind, fingerprint: [u8; 32], java_type: JavaType) {
    self.by_content.insert((kind, fingerprint), java_type);
  }
}

impl GenerationSession {
  /// Runs a structure-generating rule through the dedup cache. When the
  /// toggle is off this is a plain call. When it is on, a node whose
  /// canonical content matches an earlier node handled by the same rule
  /// short-circuits to the cached handle without re-entering the rule.
  pub(crate) fn with_dedup(
    &mut self,
    kind: RuleKind,
    doc: DocId,
    rule: impl FnOnce(&mut Self) -> Result<JavaType, GenerationError>,
  ) -> Result<JavaType, GenerationError> {
    if !self.config.deduplicate {
      return rule(self);
    }

    let fingerprint = content_fingerprint(self.store.content(doc)).map_err(|reason| GenerationError::Content {
      uri: self.store.location(doc),
      reason,
    })?;

    if let Some(cached) = self.dedup.get(kind, &fingerprint) {
      let java_type = cached.clone();
      self.stats.record_dedup_hit();
      self.store.set_type_if_empty(doc, java_type.clone());
      return Ok(java_type);
    }

    let java_type = rule(self)?;
    self.dedup.insert(kind, fingerprint, java_type.clone());
    Ok(java_type)
  }
}

/// BLAKE3 fingerprint of a node's RFC 8785 canonical JSON, with
/// order-independent arrays normalized first so schemas that differ only
/// in `required`/`type`/`enum` ordering collapse together.
fn content_fingerprint(content: &Value) -> Result<[u8; 32], String> {
  let mut value = content.clone();
  normalize_schema_semantics(&mut value);
  let canonical = to_canonical_json(&value).map_err(|err| err.to_string())?;
  Ok(*blake3::hash(canonical.as_bytes()).as_bytes())
}

/// Sorts the `required`, `type` and `enum` arrays in-place wherever they
/// appear, when they contain only strings.
fn normalize_schema_semantics(value: &mut Value) {
  match value {
    Value::Object(map) => {
      for key in ["required", "type", "enum"] {
        if let Some(Value::Array(items)) = map.get_mut(key) {
          sort_string_array_in_place(items);
        }
      }
      for child in map.values_mut() {
        normalize_schema_semantics(child);
      }
    }
    Value::Array(items) => {
      for item in items {
        normalize_schema_semantics(item);
      }
    }
    _ => {}
  }
}

fn sort_string_array_in_place(items: &mut Vec<Value>) {
  let mut strings: Vec<String> = items.iter().filter_map(|v| v.as_str().map(String::from)).collect();
  if strings.len() == items.len() {
    strings.sort_unstable();
    *items = strings.into_iter().map(Value::String).collect();
  }
}
