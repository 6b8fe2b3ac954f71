use serde_json::Value;

use crate::{
  error::GenerationError,
  generator::{
    codemodel::{EnumConstantDef, FieldDef, JavaPrimitive, JavaType, Literal, MethodDef, MethodKind, Param, TypeId, TypeKind},
    metrics::GenerationWarning,
    schema::DocId,
    session::GenerationSession,
  },
  naming::identifiers,
};

impl GenerationSession {
  /// Synthesizes an enum from a schema with an `enum` array.
  ///
  /// Generated as a nested type when a containing class exists, top-level
  /// otherwise. Constants carry the backing value; the type carries the
  /// value field, the reverse lookup table, the throwing `fromValue`
  /// factory and a value-forwarding `toString`.
  pub(crate) fn apply_enum(
    &mut self,
    node_name: &str,
    doc: DocId,
    parent: Option<TypeId>,
  ) -> Result<JavaType, GenerationError> {
    let content = self.store.content(doc).clone();
    let location = self.store.location(doc);

    let backing = self.enum_backing_type(&content);
    if backing.is_primitive() {
      return Err(GenerationError::PrimitiveEnum(location));
    }

    let enum_id = self.declare_enum_type(node_name, &content, parent);
    self.store.set_type_if_empty(doc, JavaType::Defined(enum_id));
    self.stats.record_enum();

    {
      let def = self.model.type_def_mut(enum_id);
      def.origin = Some(doc);
      if let Some(title) = content.get("title").and_then(Value::as_str) {
        def.docs.push(title.to_string());
      }
      if let Some(description) = content.get("description").and_then(Value::as_str) {
        def.docs.push(description.to_string());
      }
    }

    let java_enums = content.get("javaEnums").and_then(Value::as_array);
    let java_enum_names = content.get("javaEnumNames").and_then(Value::as_array);
    if java_enums.is_some() && java_enum_names.is_some() {
      self.stats.record_warning(GenerationWarning::ConflictingEnumExtensions {
        location: location.clone(),
      });
    } else if java_enum_names.is_some() {
      self.stats.record_warning(GenerationWarning::DeprecatedEnumNames {
        location: location.clone(),
      });
    }

    let values = content.get("enum").and_then(Value::as_array).cloned().unwrap_or_default();
    let mut used_names: Vec<String> = vec![];
    for (index, value) in values.iter().enumerate() {
      // A null literal is a valid schema value but not a constant.
      if value.is_null() {
        continue;
      }
      let value_text = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
      };

      let entry = java_enums.and_then(|entries| entries.get(index));
      let custom_name = if let Some(entries) = java_enums {
        let name = entries.get(index).and_then(|e| e.get("name")).and_then(Value::as_str);
        if name.is_none() {
          self.stats.record_warning(GenerationWarning::MissingEnumMetadata {
            location: location.clone(),
            index,
          });
        }
        name
      } else if let Some(names) = java_enum_names {
        names.get(index).and_then(Value::as_str)
      } else {
        None
      };

      let base = custom_name.map_or_else(|| identifiers::to_constant_name(&value_text), String::from);
      let name = identifiers::make_unique(&base, |candidate| {
        used_names.iter().any(|used| used.eq_ignore_ascii_case(candidate))
      });
      used_names.push(name.clone());

      let mut constant = EnumConstantDef {
        name,
        value: self.literal_for(&backing, value, doc)?,
        docs: enum_entry_docs(entry),
        annotations: vec![],
      };
      self.annotator.enum_constant(&mut constant, &value_text);
      self.model.add_constant(enum_id, constant);
    }

    self.add_enum_members(enum_id, &backing);
    Ok(JavaType::Defined(enum_id))
  }

  /// The type backing the enum's values, from `type` with naming
  /// overrides stripped. Defaults to string.
  fn enum_backing_type(&self, content: &Value) -> JavaType {
    match content.get("type").and_then(Value::as_str) {
      Some("integer") => self.integer_type(content),
      Some("number") => self.number_type(),
      Some("boolean") => self.wrap_primitive(JavaPrimitive::Boolean),
      _ => JavaType::string(),
    }
  }

  fn declare_enum_type(&mut self, node_name: &str, content: &Value, parent: Option<TypeId>) -> TypeId {
    let name_source = match content.get("javaType").and_then(Value::as_str) {
      Some(java_type) => java_type.rsplit_once('.').map_or(java_type, |(_, name)| name),
      None => match content.get("title").and_then(Value::as_str) {
        Some(title) if self.config.use_title_as_classname => title,
        _ => node_name,
      },
    };
    let delimiters = self.config.word_delimiters();
    let base = identifiers::to_class_name(
      name_source,
      self.config.class_name_prefix.as_deref(),
      self.config.class_name_suffix.as_deref(),
      &delimiters,
    );

    match parent {
      Some(enclosing) => {
        let name = identifiers::make_unique(&base, |candidate| self.model.is_nested_name_taken(enclosing, candidate));
        self.model.declare_nested(enclosing, &name, TypeKind::Enum)
      }
      None => {
        let package = self.config.target_package.clone();
        let name = identifiers::make_unique(&base, |candidate| self.model.is_name_taken(&package, candidate));
        self.model.declare(&package, &name, TypeKind::Enum)
      }
    }
  }

  fn add_enum_members(&mut self, enum_id: TypeId, backing: &JavaType) {
    let mut value_field = FieldDef::new("value", backing.clone());
    value_field.is_final = true;
    self.model.add_field(enum_id, value_field);

    let mut constants_field = FieldDef::new(
      "CONSTANTS",
      JavaType::Map(Box::new(backing.clone()), Box::new(JavaType::Defined(enum_id))),
    );
    constants_field.is_static = true;
    constants_field.is_final = true;
    constants_field.initializer = Some(Literal::LookupTable);
    self.model.add_field(enum_id, constants_field);

    let enum_name = self.model.type_def(enum_id).name.clone();
    let constructor = MethodDef::new(
      enum_name,
      MethodKind::Constructor {
        field_params: vec![String::from("value")],
      },
    );
    self.model.add_method(enum_id, constructor);

    let mut value_method = MethodDef::new("value", MethodKind::EnumValue);
    value_method.return_type = Some(backing.clone());
    self.annotator.enum_value(&mut value_method);
    self.model.add_method(enum_id, value_method);

    let mut from_value = MethodDef::new("fromValue", MethodKind::EnumFromValue);
    from_value.is_static = true;
    from_value.return_type = Some(JavaType::Defined(enum_id));
    from_value.params = vec![Param {
      name: String::from("value"),
      java_type: backing.clone(),
    }];
    self.annotator.enum_creator(&mut from_value);
    self.model.add_method(enum_id, from_value);

    let mut to_string = MethodDef::new("toString", MethodKind::EnumToString);
    to_string.return_type = Some(JavaType::string());
    self.model.add_method(enum_id, to_string);
  }
}

fn enum_entry_docs(entry: Option<&Value>) -> Vec<String> {
  let mut docs = vec![];
  if let Some(entry) = entry {
    for key in ["title", "description"] {
      if let Some(text) = entry.get(key).and_then(Value::as_str) {
        docs.push(text.to_string());
      }
    }
  }
  docs
}
