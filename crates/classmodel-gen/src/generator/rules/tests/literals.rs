use serde_json::json;

use super::common::{defined, generate, generate_with};
use crate::{
  config::GenerationConfig,
  generator::codemodel::{JavaType, Literal},
};

#[test]
fn scalar_defaults_become_field_initializers() {
  let (session, java_type) = generate(
    "thing",
    json!({
      "type": "object",
      "properties": {
        "name": { "type": "string", "default": "anonymous" },
        "count": { "type": "integer", "default": "5" },
        "ratio": { "type": "number", "default": 0.5 },
        "active": { "type": "boolean", "default": true }
      }
    }),
  );
  let class_id = defined(&java_type);
  let field = |name: &str| {
    session
      .model()
      .find_field(class_id, name)
      .unwrap_or_else(|| panic!("missing field {name}"))
      .initializer
      .clone()
  };
  assert_eq!(field("name"), Some(Literal::Str(String::from("anonymous"))));
  // String-typed numeric defaults parse.
  assert_eq!(field("count"), Some(Literal::Int(5)));
  assert_eq!(field("ratio"), Some(Literal::Double(0.5)));
  assert_eq!(field("active"), Some(Literal::Bool(true)));
}

#[test]
fn collection_defaults_build_collection_literals() {
  let (session, java_type) = generate(
    "thing",
    json!({
      "type": "object",
      "properties": {
        "tags": { "type": "array", "items": { "type": "string" }, "default": ["a", "b"] }
      }
    }),
  );
  let class_id = defined(&java_type);
  let tags = session.model().find_field(class_id, "tags").expect("tags");
  assert_eq!(
    tags.initializer,
    Some(Literal::ListOf {
      element: JavaType::string(),
      items: vec![Literal::Str(String::from("a")), Literal::Str(String::from("b"))],
    })
  );
}

#[test]
fn collections_initialize_empty_without_a_default() {
  let (session, java_type) = generate(
    "thing",
    json!({
      "type": "object",
      "properties": {
        "tags": { "type": "array", "items": { "type": "string" } },
        "ids": { "type": "array", "uniqueItems": true, "items": { "type": "string" } }
      }
    }),
  );
  let class_id = defined(&java_type);
  let tags = session.model().find_field(class_id, "tags").expect("tags");
  assert_eq!(tags.initializer, Some(Literal::EmptyList { element: JavaType::string() }));
  let ids = session.model().find_field(class_id, "ids").expect("ids");
  assert_eq!(ids.initializer, Some(Literal::EmptySet { element: JavaType::string() }));
}

#[test]
fn collection_initialization_can_be_disabled() {
  let config = GenerationConfig::builder().initialize_collections(false).build();
  let (session, java_type) = generate_with(
    config,
    "thing",
    json!({
      "type": "object",
      "properties": { "tags": { "type": "array", "items": { "type": "string" } } }
    }),
  );
  let class_id = defined(&java_type);
  assert_eq!(session.model().find_field(class_id, "tags").expect("tags").initializer, None);
}

#[test]
fn const_marks_the_field_final_and_adds_a_constant() {
  let (session, java_type) = generate(
    "thing",
    json!({
      "type": "object",
      "properties": { "kind": { "type": "string", "const": "fixed" } }
    }),
  );
  let class_id = defined(&java_type);
  let kind = session.model().find_field(class_id, "kind").expect("kind");
  assert!(kind.is_final);
  assert_eq!(kind.initializer, Some(Literal::Str(String::from("fixed"))));

  let constant = session.model().find_field(class_id, "KIND").expect("constant");
  assert!(constant.is_static && constant.is_final);
  assert_eq!(constant.initializer, Some(Literal::Str(String::from("fixed"))));
}

#[test]
fn date_defaults_accept_epoch_millis_and_timestamps() {
  let (session, java_type) = generate(
    "thing",
    json!({
      "type": "object",
      "properties": {
        "created": { "type": "string", "format": "date-time", "default": 123456 },
        "updated": { "type": "string", "format": "date-time", "default": "1970-01-01T00:00:01Z" }
      }
    }),
  );
  let class_id = defined(&java_type);
  let created = session.model().find_field(class_id, "created").expect("created");
  assert_eq!(created.initializer, Some(Literal::DateMillis(123456)));
  let updated = session.model().find_field(class_id, "updated").expect("updated");
  assert_eq!(updated.initializer, Some(Literal::DateMillis(1000)));
}

#[test]
fn unparseable_date_default_is_fatal() {
  let mut session = crate::generator::session::GenerationSession::new(GenerationConfig::default());
  let err = session
    .generate(
      "thing",
      super::common::TEST_URI,
      json!({
        "type": "object",
        "properties": {
          "created": { "type": "string", "format": "date-time", "default": "someday" }
        }
      }),
    )
    .expect_err("non-date default on a date field");
  assert!(format!("{err:#}").contains("someday"));
}

#[test]
fn enum_defaults_go_through_from_value() {
  let (session, java_type) = generate(
    "thing",
    json!({
      "type": "object",
      "properties": {
        "color": { "type": "string", "enum": ["red", "green"], "default": "green" }
      }
    }),
  );
  let class_id = defined(&java_type);
  let color = session.model().find_field(class_id, "color").expect("color");
  let enum_id = defined(&color.java_type);
  assert_eq!(
    color.initializer,
    Some(Literal::EnumFromValue {
      enum_type: enum_id,
      arg: Box::new(Literal::Str(String::from("green"))),
    })
  );
}

#[test]
fn uri_formatted_defaults_use_uri_create() {
  let (session, java_type) = generate(
    "thing",
    json!({
      "type": "object",
      "properties": {
        "homepage": { "type": "string", "format": "uri", "default": "http://example.com" }
      }
    }),
  );
  let class_id = defined(&java_type);
  let homepage = session.model().find_field(class_id, "homepage").expect("homepage");
  assert_eq!(
    homepage.initializer,
    Some(Literal::UriCreate(String::from("http://example.com")))
  );
}
