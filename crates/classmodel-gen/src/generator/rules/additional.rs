use serde_json::Value;

use crate::{
  error::GenerationError,
  generator::{
    codemodel::{FieldDef, JavaType, Literal, MethodDef, MethodKind, Param, TypeId},
    schema::DocId,
    session::GenerationSession,
  },
};

impl GenerationSession {
  /// Adds the catch-all properties map and its accessors.
  ///
  /// Gated twice: on the config toggle and on the annotator's capability
  /// check. An explicit `additionalProperties: false` suppresses the map;
  /// a schema-valued `additionalProperties` types the map values; `true`
  /// or absence falls back to `Object` values.
  pub(crate) fn apply_additional_properties(
    &mut self,
    node_name: &str,
    doc: DocId,
    class_id: TypeId,
    builder: Option<TypeId>,
  ) -> Result<(), GenerationError> {
    if !self.config.include_additional_properties || !self.annotator.additional_properties_supported() {
      return Ok(());
    }

    let value_type = match self.store.content(doc).get("additionalProperties") {
      Some(Value::Bool(false)) => return Ok(()),
      Some(Value::Object(_)) => {
        let child = self.store.child(doc, "additionalProperties")?;
        self.apply_schema(&format!("{node_name}Property"), child, Some(class_id))?.boxify()
      }
      _ => JavaType::object(),
    };
    let map_type = JavaType::Map(Box::new(JavaType::string()), Box::new(value_type.clone()));

    let mut field = FieldDef::new("additionalProperties", map_type.clone());
    field.initializer = Some(Literal::EmptyMap {
      key: JavaType::string(),
      value: value_type.clone(),
    });
    self.model.add_field(class_id, field);

    let mut any_getter = MethodDef::new("getAdditionalProperties", MethodKind::AnyGetter);
    any_getter.return_type = Some(map_type);
    self.annotator.any_getter(&mut any_getter);
    self.model.add_method(class_id, any_getter);

    let params = vec![
      Param {
        name: String::from("name"),
        java_type: JavaType::string(),
      },
      Param {
        name: String::from("value"),
        java_type: value_type,
      },
    ];
    let mut any_setter = MethodDef::new("setAdditionalProperty", MethodKind::AnySetter);
    any_setter.params = params.clone();
    self.annotator.any_setter(&mut any_setter);
    self.model.add_method(class_id, any_setter);

    if self.config.generate_builders {
      let mut with = MethodDef::new("withAdditionalProperty", MethodKind::BuilderWithAdditionalProperty);
      with.params = params;
      match builder {
        Some(builder_id) => {
          with.return_type = Some(JavaType::Defined(builder_id));
          self.model.add_method(builder_id, with);
        }
        None => {
          with.return_type = Some(JavaType::Defined(class_id));
          self.model.add_method(class_id, with);
        }
      }
    }
    Ok(())
  }
}
