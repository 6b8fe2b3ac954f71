use serde_json::Value;

use crate::{
  error::GenerationError,
  generator::{
    codemodel::{FieldDef, JavaPrimitive, JavaType, Literal, MethodDef, MethodKind, Param, TypeId, TypeKind},
    schema::DocId,
    session::GenerationSession,
  },
  naming::identifiers,
};

impl GenerationSession {
  /// Declares the nested builder class and its factory/build pair when
  /// inner-class builders are configured. Returns the builder handle so
  /// property synthesis can hang `with` methods off it.
  pub(crate) fn scaffold_builder(&mut self, class_id: TypeId) -> Option<TypeId> {
    if !(self.config.generate_builders && self.config.use_inner_class_builders) {
      return None;
    }
    let name = identifiers::make_unique("Builder", |candidate| self.model.is_nested_name_taken(class_id, candidate));
    let builder_id = self.model.declare_nested(class_id, &name, TypeKind::Class);

    let mut factory = MethodDef::new("builder", MethodKind::BuilderFactory);
    factory.is_static = true;
    factory.return_type = Some(JavaType::Defined(builder_id));
    self.model.add_method(class_id, factory);

    let mut build = MethodDef::new("build", MethodKind::BuilderBuild);
    build.return_type = Some(JavaType::Defined(class_id));
    self.model.add_method(builder_id, build);

    Some(builder_id)
  }

  /// Walks `properties` in document order, adding a field and its
  /// accessors for each entry.
  pub(crate) fn apply_properties(
    &mut self,
    doc: DocId,
    class_id: TypeId,
    builder: Option<TypeId>,
  ) -> Result<(), GenerationError> {
    let content = self.store.content(doc);
    let Some(properties) = content.get("properties").and_then(Value::as_object).cloned() else {
      return Ok(());
    };
    let required: Vec<String> = content
      .get("required")
      .and_then(Value::as_array)
      .map(|names| names.iter().filter_map(Value::as_str).map(String::from).collect())
      .unwrap_or_default();

    let names: Vec<String> = properties.keys().cloned().collect();
    self.annotator.property_order(self.model.type_def_mut(class_id), &names);

    let properties_doc = self.store.child(doc, "properties")?;
    for (json_name, property) in &properties {
      let property_doc = self.store.child(properties_doc, json_name)?;
      let required = required.iter().any(|name| name == json_name);
      self.apply_property(json_name, property, property_doc, class_id, builder, required)?;
    }
    Ok(())
  }

  fn apply_property(
    &mut self,
    json_name: &str,
    property: &Value,
    doc: DocId,
    class_id: TypeId,
    builder: Option<TypeId>,
    required_by_parent: bool,
  ) -> Result<(), GenerationError> {
    let delimiters = self.config.word_delimiters();
    let base = match property.get("javaName").and_then(Value::as_str) {
      Some(java_name) => java_name.to_string(),
      None => identifiers::to_property_name(json_name, &delimiters),
    };
    let field_name = identifiers::make_unique(&base, |candidate| self.model.find_field(class_id, candidate).is_some());

    let java_type = self.apply_schema(json_name, doc, Some(class_id))?;
    let required = required_by_parent || property.get("required").and_then(Value::as_bool).unwrap_or(false);

    let mut field = FieldDef::new(&field_name, java_type.clone());
    if field_name != json_name {
      field.json_name = Some(json_name.to_string());
    }
    field.required = required;
    if let Some(title) = property.get("title").and_then(Value::as_str) {
      field.docs.push(title.to_string());
    }
    if let Some(description) = property.get("description").and_then(Value::as_str) {
      field.docs.push(description.to_string());
    }

    if let Some(const_value) = property.get("const") {
      let literal = self.literal_for(&java_type, const_value, doc)?;
      field.is_final = true;
      field.initializer = Some(literal.clone());

      let mut constant = FieldDef::new(identifiers::to_constant_name(&field_name), java_type.clone());
      constant.is_static = true;
      constant.is_final = true;
      constant.initializer = Some(literal);
      self.model.add_field(class_id, constant);
    } else if let Some(default_value) = property.get("default") {
      field.initializer = Some(self.literal_for(&java_type, default_value, doc)?);
    } else if self.config.initialize_collections {
      field.initializer = match &java_type {
        JavaType::List(element) => Some(Literal::EmptyList {
          element: (**element).clone(),
        }),
        JavaType::Set(element) => Some(Literal::EmptySet {
          element: (**element).clone(),
        }),
        _ => None,
      };
    }

    self.annotator.property_field(&mut field, json_name);
    self.model.add_field(class_id, field);

    let is_boolean = matches!(
      java_type,
      JavaType::Primitive(JavaPrimitive::Boolean) | JavaType::Boxed(JavaPrimitive::Boolean)
    );
    if self.config.include_getters {
      let name = identifiers::getter_name(&field_name, is_boolean);
      let mut getter = MethodDef::new(name, MethodKind::Getter {
        field: field_name.clone(),
      });
      getter.return_type = Some(java_type.clone());
      self.annotator.property_getter(&mut getter, json_name);
      self.model.add_method(class_id, getter);
    }
    if self.config.include_setters {
      let mut setter = MethodDef::new(identifiers::setter_name(&field_name), MethodKind::Setter {
        field: field_name.clone(),
      });
      setter.params = vec![Param {
        name: field_name.clone(),
        java_type: java_type.clone(),
      }];
      self.annotator.property_setter(&mut setter, json_name);
      self.model.add_method(class_id, setter);
    }
    if self.config.generate_builders {
      let mut with = MethodDef::new(identifiers::builder_method_name(&field_name), MethodKind::BuilderWith {
        field: field_name.clone(),
      });
      with.params = vec![Param {
        name: field_name.clone(),
        java_type,
      }];
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
