use serde_json::json;

use super::common::{defined, generate_with};
use crate::config::GenerationConfig;

fn twin_schema() -> serde_json::Value {
  json!({
    "type": "object",
    "properties": {
      "left": { "type": "object", "properties": { "x": { "type": "string" } } },
      "right": { "type": "object", "properties": { "x": { "type": "string" } } }
    }
  })
}

#[test]
fn structurally_equal_schemas_collapse_when_enabled() {
  let config = GenerationConfig::builder().deduplicate(true).build();
  let (session, java_type) = generate_with(config, "pair", twin_schema());
  let class_id = defined(&java_type);

  let left = session.model().find_field(class_id, "left").expect("left");
  let right = session.model().find_field(class_id, "right").expect("right");
  assert_eq!(left.java_type, right.java_type);
  // The pair class and one shared child.
  assert_eq!(session.model().len(), 2);
  assert_eq!(session.stats().dedup_hits, 1);
}

#[test]
fn structurally_equal_schemas_stay_distinct_by_default() {
  let (session, java_type) = generate_with(GenerationConfig::default(), "pair", twin_schema());
  let class_id = defined(&java_type);

  let left = session.model().find_field(class_id, "left").expect("left");
  let right = session.model().find_field(class_id, "right").expect("right");
  assert_ne!(left.java_type, right.java_type);
  assert_eq!(session.model().len(), 3);
  assert_eq!(session.stats().dedup_hits, 0);
}

#[test]
fn required_ordering_does_not_defeat_deduplication() {
  let config = GenerationConfig::builder().deduplicate(true).build();
  let (session, _) = generate_with(
    config,
    "pair",
    json!({
      "type": "object",
      "properties": {
        "left": {
          "type": "object",
          "properties": { "a": { "type": "string" }, "b": { "type": "string" } },
          "required": ["a", "b"]
        },
        "right": {
          "type": "object",
          "properties": { "a": { "type": "string" }, "b": { "type": "string" } },
          "required": ["b", "a"]
        }
      }
    }),
  );
  assert_eq!(session.stats().dedup_hits, 1);
}
