use serde_json::json;

use super::common::{defined, generate, generate_with};
use crate::{
  config::GenerationConfig,
  generator::codemodel::{JavaType, MethodKind, TypeKind},
};

#[test]
fn simple_object_generates_class_with_accessors() {
  let (session, java_type) = generate(
    "person",
    json!({
      "type": "object",
      "properties": {
        "first_name": { "type": "string" },
        "age": { "type": "integer" }
      },
      "required": ["first_name"]
    }),
  );
  let class_id = defined(&java_type);
  let def = session.model().type_def(class_id);
  assert_eq!(def.name, "Person");
  assert_eq!(def.package, "com.example");
  assert_eq!(def.kind, TypeKind::Class);

  let first_name = session.model().find_field(class_id, "firstName").expect("field");
  assert_eq!(first_name.json_name.as_deref(), Some("first_name"));
  assert!(first_name.required);
  assert_eq!(first_name.java_type, JavaType::string());

  let age = session.model().find_field(class_id, "age").expect("field");
  assert!(!age.required);

  assert!(session.model().find_method(class_id, "getFirstName").is_some());
  assert!(session.model().find_method(class_id, "setFirstName").is_some());
  assert!(session.model().find_method(class_id, "getAge").is_some());
}

#[test]
fn colliding_property_names_get_underscore_suffixes() {
  let (session, java_type) = generate(
    "thing",
    json!({
      "type": "object",
      "properties": {
        "foo bar": { "type": "string" },
        "foo_bar": { "type": "string" }
      }
    }),
  );
  let class_id = defined(&java_type);
  assert!(session.model().find_field(class_id, "fooBar").is_some());
  assert!(session.model().find_field(class_id, "fooBar_").is_some());
}

#[test]
fn java_name_overrides_the_derived_field_name() {
  let (session, java_type) = generate(
    "thing",
    json!({
      "type": "object",
      "properties": {
        "a-b": { "type": "string", "javaName": "renamed" }
      }
    }),
  );
  let class_id = defined(&java_type);
  let field = session.model().find_field(class_id, "renamed").expect("field");
  assert_eq!(field.json_name.as_deref(), Some("a-b"));
}

#[test]
fn extends_sets_the_supertype_and_chains_object_contract() {
  let (session, java_type) = generate(
    "child",
    json!({
      "type": "object",
      "extends": { "type": "object", "properties": { "base": { "type": "string" } } },
      "properties": { "own": { "type": "string" } }
    }),
  );
  let class_id = defined(&java_type);
  let def = session.model().type_def(class_id);
  let Some(JavaType::Defined(super_id)) = def.supertype else {
    panic!("expected a generated supertype, got {:?}", def.supertype);
  };
  assert_eq!(session.model().type_def(super_id).name, "ChildParent");

  let equals = session.model().find_method(class_id, "equals").expect("equals");
  let MethodKind::Equals { call_super, .. } = &equals.kind else {
    panic!("unexpected kind");
  };
  assert!(call_super);
}

#[test]
fn object_contract_chains_to_an_existing_supertype() {
  let (session, java_type) = generate(
    "child",
    json!({
      "type": "object",
      "extends": { "existingJavaType": "com.acme.Base" },
      "properties": { "own": { "type": "string" } }
    }),
  );
  let class_id = defined(&java_type);
  let def = session.model().type_def(class_id);
  assert_eq!(def.supertype, Some(JavaType::Existing(String::from("com.acme.Base"))));

  for name in ["equals", "hashCode", "toString"] {
    let method = session.model().find_method(class_id, name).expect(name);
    let chained = match &method.kind {
      MethodKind::Equals { call_super, .. }
      | MethodKind::HashCode { call_super, .. }
      | MethodKind::ToString { call_super, .. } => *call_super,
      other => panic!("unexpected kind {other:?}"),
    };
    assert!(chained, "{name} must chain to super");
  }
}

#[test]
fn extending_a_final_builtin_collapses_onto_it() {
  let (session, java_type) = generate(
    "wrapper",
    json!({
      "type": "object",
      "extends": { "type": "object", "javaType": "java.lang.String" }
    }),
  );
  assert!(java_type.is_string());
  assert!(session.model().is_empty());
}

#[test]
fn fully_qualified_java_type_places_the_class() {
  let (session, java_type) = generate(
    "ignored",
    json!({ "type": "object", "javaType": "com.acme.Widget" }),
  );
  let def = session.model().type_def(defined(&java_type));
  assert_eq!(def.package, "com.acme");
  assert_eq!(def.name, "Widget");
}

#[test]
fn class_name_prefix_and_suffix_are_applied() {
  let config = GenerationConfig::builder()
    .class_name_prefix("Abstract")
    .class_name_suffix("Dto")
    .build();
  let (session, java_type) = generate_with(config, "order", json!({ "type": "object" }));
  assert_eq!(session.model().type_def(defined(&java_type)).name, "AbstractOrderDto");
}

#[test]
fn title_names_the_class_when_configured() {
  let config = GenerationConfig::builder().use_title_as_classname(true).build();
  let (session, java_type) = generate_with(
    config,
    "payload",
    json!({ "type": "object", "title": "delivery address" }),
  );
  assert_eq!(session.model().type_def(defined(&java_type)).name, "DeliveryAddress");
}

#[test]
fn legacy_builders_hang_with_methods_on_the_class() {
  let config = GenerationConfig::builder().generate_builders(true).build();
  let (session, java_type) = generate_with(
    config,
    "thing",
    json!({ "type": "object", "properties": { "name": { "type": "string" } } }),
  );
  let class_id = defined(&java_type);
  let with_name = session.model().find_method(class_id, "withName").expect("withName");
  assert_eq!(with_name.return_type, Some(JavaType::Defined(class_id)));
}

#[test]
fn inner_class_builders_scaffold_a_nested_builder() {
  let config = GenerationConfig::builder()
    .generate_builders(true)
    .use_inner_class_builders(true)
    .build();
  let (session, java_type) = generate_with(
    config,
    "thing",
    json!({ "type": "object", "properties": { "name": { "type": "string" } } }),
  );
  let class_id = defined(&java_type);
  let def = session.model().type_def(class_id);
  assert_eq!(def.nested.len(), 1);
  let builder_id = def.nested[0];
  assert_eq!(session.model().type_def(builder_id).name, "Builder");

  let factory = session.model().find_method(class_id, "builder").expect("factory");
  assert!(factory.is_static);
  assert_eq!(factory.return_type, Some(JavaType::Defined(builder_id)));
  assert!(session.model().find_method(builder_id, "build").is_some());
  assert!(session.model().find_method(builder_id, "withName").is_some());
  assert!(session.model().find_method(class_id, "withName").is_none());
}

#[test]
fn additional_properties_map_is_generated_by_default() {
  let (session, java_type) = generate("thing", json!({ "type": "object" }));
  let class_id = defined(&java_type);
  let field = session.model().find_field(class_id, "additionalProperties").expect("map");
  assert_eq!(
    field.java_type,
    JavaType::Map(Box::new(JavaType::string()), Box::new(JavaType::object()))
  );
  assert!(session.model().find_method(class_id, "getAdditionalProperties").is_some());
  assert!(session.model().find_method(class_id, "setAdditionalProperty").is_some());
}

#[test]
fn additional_properties_false_suppresses_the_map() {
  let (session, java_type) = generate("thing", json!({ "type": "object", "additionalProperties": false }));
  let class_id = defined(&java_type);
  assert!(session.model().find_field(class_id, "additionalProperties").is_none());
}

#[test]
fn schema_valued_additional_properties_types_the_map() {
  let (session, java_type) = generate(
    "thing",
    json!({ "type": "object", "additionalProperties": { "type": "integer" } }),
  );
  let class_id = defined(&java_type);
  let field = session.model().find_field(class_id, "additionalProperties").expect("map");
  let JavaType::Map(_, value) = &field.java_type else {
    panic!("expected a map");
  };
  assert!(matches!(**value, JavaType::Boxed(_)));
}

#[test]
fn constructors_cover_no_arg_and_required_only() {
  let config = GenerationConfig::builder()
    .include_constructors(true)
    .constructors_required_properties_only(true)
    .build();
  let (session, java_type) = generate_with(
    config,
    "thing",
    json!({
      "type": "object",
      "properties": {
        "id": { "type": "string" },
        "note": { "type": "string" }
      },
      "required": ["id"]
    }),
  );
  let class_id = defined(&java_type);
  let constructors: Vec<_> = session
    .model()
    .type_def(class_id)
    .methods
    .iter()
    .filter_map(|m| match &m.kind {
      MethodKind::Constructor { field_params } => Some(field_params.clone()),
      _ => None,
    })
    .collect();
  assert_eq!(constructors.len(), 2);
  assert!(constructors.contains(&vec![]));
  assert!(constructors.contains(&vec![String::from("id")]));
}

#[test]
fn to_string_rejects_reference_element_arrays() {
  let mut session = crate::generator::session::GenerationSession::new(GenerationConfig::default());
  let result = session.generate(
    "thing",
    super::common::TEST_URI,
    json!({
      "type": "object",
      "properties": {
        "widgets": { "existingJavaType": "com.acme.Widget[]" }
      }
    }),
  );
  let err = result.expect_err("toString over an object array is unsupported");
  assert!(format!("{err:#}").contains("toString"));
}
