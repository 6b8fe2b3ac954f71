//! End-to-end generation runs through the public API.

use classmodel_gen::{
  generator::codemodel::{FieldDef, JavaType, TypeId, TypeKind},
  Annotator, GenerationConfig, GenerationSession,
};
use serde_json::json;

const SCHEMA_URI: &str = "http://example.com/order.json";

fn defined(java_type: &JavaType) -> TypeId {
  match java_type {
    JavaType::Defined(id) => *id,
    other => panic!("expected a generated type, got {other:?}"),
  }
}

#[test]
fn order_schema_generates_a_connected_type_graph() {
  let mut session = GenerationSession::new(GenerationConfig::default());
  let java_type = session
    .generate(
      "order",
      SCHEMA_URI,
      json!({
        "type": "object",
        "properties": {
          "orderId": { "type": "string" },
          "customer": { "$ref": "#/definitions/customer" },
          "items": {
            "type": "array",
            "items": {
              "type": "object",
              "properties": {
                "sku": { "type": "string" },
                "quantity": { "type": "integer" }
              },
              "required": ["sku"]
            }
          },
          "status": { "type": "string", "enum": ["pending", "shipped", "delivered"] }
        },
        "required": ["orderId"],
        "definitions": {
          "customer": {
            "type": "object",
            "properties": { "name": { "type": "string" } }
          }
        }
      }),
    )
    .expect("generation should succeed");

  let order_id = defined(&java_type);
  let model = session.model();
  let order = model.type_def(order_id);
  assert_eq!(order.name, "Order");
  assert_eq!(order.kind, TypeKind::Class);

  let order_field = model.find_field(order_id, "orderId").expect("orderId");
  assert!(order_field.required);
  assert_eq!(order_field.java_type, JavaType::string());

  let customer = model.find_field(order_id, "customer").expect("customer");
  assert_eq!(model.type_def(defined(&customer.java_type)).name, "Customer");

  // Array elements are named from the singularized property name.
  let items = model.find_field(order_id, "items").expect("items");
  let JavaType::List(element) = &items.java_type else {
    panic!("items should be a list, got {:?}", items.java_type);
  };
  assert_eq!(model.type_def(defined(element)).name, "Item");
  assert!(model.find_field(defined(element), "sku").expect("sku").required);

  // The enum nests inside the class that declared the property.
  let status = model.find_field(order_id, "status").expect("status");
  let status_def = model.type_def(defined(&status.java_type));
  assert_eq!(status_def.kind, TypeKind::Enum);
  assert_eq!(status_def.enclosing, Some(order_id));
  assert!(model.find_method(order_id, "getStatus").is_some());
  assert!(model.find_method(order_id, "setStatus").is_some());

  let stats = session.stats();
  assert_eq!(stats.classes_generated, 3);
  assert_eq!(stats.enums_generated, 1);
  assert_eq!(stats.types_generated, 4);
  assert!(stats.warnings.is_empty());
}

#[test]
fn string_enum_gets_constants_and_accessors() {
  let mut session = GenerationSession::new(GenerationConfig::default());
  let java_type = session
    .generate(
      "color",
      SCHEMA_URI,
      json!({ "type": "string", "enum": ["red", "green", "blue"] }),
    )
    .expect("generation should succeed");

  let enum_id = defined(&java_type);
  let model = session.model();
  let color = model.type_def(enum_id);
  assert_eq!(color.kind, TypeKind::Enum);
  assert_eq!(color.name, "Color");

  let names: Vec<&str> = color.constants.iter().map(|c| c.name.as_str()).collect();
  assert_eq!(names, vec!["RED", "GREEN", "BLUE"]);

  assert!(model.find_field(enum_id, "value").expect("value field").is_final);
  assert!(model.find_field(enum_id, "CONSTANTS").expect("lookup table").is_static);
  assert!(model.find_method(enum_id, "value").is_some());
  assert!(model.find_method(enum_id, "fromValue").expect("fromValue").is_static);
  assert!(model.find_method(enum_id, "toString").is_some());
}

#[test]
fn unique_items_arrays_come_back_as_sets() {
  let mut session = GenerationSession::new(GenerationConfig::default());
  let java_type = session
    .generate(
      "tags",
      SCHEMA_URI,
      json!({ "type": "array", "uniqueItems": true, "items": { "type": "string" } }),
    )
    .expect("generation should succeed");
  assert_eq!(java_type, JavaType::Set(Box::new(JavaType::string())));
}

#[test]
fn unrecognized_type_values_warn_and_fall_back_to_object() {
  let mut session = GenerationSession::new(GenerationConfig::default());
  let java_type = session
    .generate("mystery", SCHEMA_URI, json!({ "type": "fancy" }))
    .expect("generation should succeed");
  assert!(java_type.is_object());

  let warnings = &session.stats().warnings;
  assert_eq!(warnings.len(), 1);
  assert!(warnings[0].to_string().contains("fancy"));
}

struct JsonPropertyAnnotator;

impl Annotator for JsonPropertyAnnotator {
  fn property_field(&self, field: &mut FieldDef, json_name: &str) {
    field.annotations.push(format!("@JsonProperty(\"{json_name}\")"));
  }

  fn additional_properties_supported(&self) -> bool {
    false
  }
}

#[test]
fn a_custom_annotator_decorates_fields_and_gates_the_catch_all_map() {
  let mut session =
    GenerationSession::new(GenerationConfig::default()).with_annotator(Box::new(JsonPropertyAnnotator));
  let java_type = session
    .generate(
      "person",
      SCHEMA_URI,
      json!({
        "type": "object",
        "properties": { "first-name": { "type": "string" } }
      }),
    )
    .expect("generation should succeed");

  let class_id = defined(&java_type);
  let model = session.model();
  let field = model.find_field(class_id, "firstName").expect("firstName");
  assert_eq!(field.annotations, vec!["@JsonProperty(\"first-name\")"]);

  // No any-getter support means no additionalProperties machinery.
  assert!(model.find_field(class_id, "additionalProperties").is_none());
  assert!(model.find_method(class_id, "getAdditionalProperties").is_none());
}

#[test]
fn into_parts_hands_back_the_model_and_the_run_metrics() {
  let mut session = GenerationSession::new(GenerationConfig::default());
  session
    .generate(
      "widget",
      SCHEMA_URI,
      json!({ "type": "object", "properties": { "name": { "type": "string" } } }),
    )
    .expect("generation should succeed");
  let (model, stats) = session.into_parts();
  assert_eq!(model.len(), 1);
  assert_eq!(stats.classes_generated, 1);
}
