use serde_json::Value;

use crate::{
  error::GenerationError,
  generator::{
    codemodel::{
      JavaPrimitive, JavaType, MethodDef, MethodKind, TypeId, TypeKind, is_final_builtin, primitive_by_keyword,
      type_by_name,
    },
    schema::DocId,
    session::GenerationSession,
  },
  naming::identifiers,
};

impl GenerationSession {
  /// Synthesizes a class for an object schema.
  ///
  /// Member synthesis runs in a fixed order: supertype, class creation and
  /// memoization, docs, builder scaffold, properties, declared interfaces,
  /// the additional-properties map, object-contract methods, constructors.
  /// The memo is written before any property recursion so a property that
  /// references back to this schema lands on the class being built.
  pub(crate) fn apply_object(
    &mut self,
    node_name: &str,
    doc: DocId,
    _parent: Option<TypeId>,
  ) -> Result<JavaType, GenerationError> {
    let content = self.store.content(doc).clone();

    let mut supertype = None;
    if content.get("extends").is_some() {
      let extends_doc = self.store.child(doc, "extends")?;
      let super_type = self.apply_schema(&format!("{node_name}Parent"), extends_doc, None)?;
      // Nothing can extend a primitive or a final class; the schema
      // collapses onto the supertype itself.
      if super_type.is_primitive() || super_type.existing_name().is_some_and(is_final_builtin) {
        return Ok(super_type);
      }
      supertype = Some(super_type);
    }

    if let Some(java_type) = content.get("javaType").and_then(Value::as_str)
      && (primitive_by_keyword(java_type).is_some() || is_final_builtin(java_type))
    {
      return Ok(type_by_name(java_type));
    }

    let (package, base_name) = self.class_coordinates(node_name, &content);
    let class_name = identifiers::make_unique(&base_name, |candidate| self.model.is_name_taken(&package, candidate));

    let class_id = self.model.declare(&package, &class_name, TypeKind::Class);
    self.store.set_type_if_empty(doc, JavaType::Defined(class_id));
    self.stats.record_class();

    {
      let def = self.model.type_def_mut(class_id);
      def.origin = Some(doc);
      def.serializable = self.config.serializable;
      if let Some(title) = content.get("title").and_then(Value::as_str) {
        def.docs.push(title.to_string());
      }
      if let Some(description) = content.get("description").and_then(Value::as_str) {
        def.docs.push(description.to_string());
      }
      if let Some(super_type) = supertype {
        def.supertype = Some(super_type);
      }
    }

    self.annotator.property_inclusion(self.model.type_def_mut(class_id));

    let builder = self.scaffold_builder(class_id);

    self.apply_properties(doc, class_id, builder)?;

    if let Some(interfaces) = content.get("javaInterfaces").and_then(Value::as_array) {
      for name in interfaces.iter().filter_map(Value::as_str) {
        self.model.add_interface(class_id, JavaType::Existing(name.to_string()));
      }
    }

    self.apply_additional_properties(node_name, doc, class_id, builder)?;

    // Chain to super for any real supertype, generated or existing.
    let call_super = self
      .model
      .type_def(class_id)
      .supertype
      .as_ref()
      .is_some_and(|super_type| !super_type.is_object());
    if self.config.include_to_string {
      self.add_to_string(class_id, call_super)?;
    }
    if self.config.include_hashcode_and_equals {
      self.add_hash_code_and_equals(class_id, call_super);
    }
    if self.config.include_constructors {
      self.add_constructors(class_id, &class_name);
    }

    Ok(JavaType::Defined(class_id))
  }

  /// Package and base name for a generated class: a fully qualified
  /// `javaType` dictates both, a bare `javaType` dictates the name, and
  /// otherwise the name derives from the title (when configured) or the
  /// node name through the naming engine.
  fn class_coordinates(&self, node_name: &str, content: &Value) -> (String, String) {
    if let Some(java_type) = content.get("javaType").and_then(Value::as_str) {
      if let Some((package, name)) = java_type.rsplit_once('.') {
        return (package.to_string(), name.to_string());
      }
      return (self.config.target_package.clone(), java_type.to_string());
    }

    let name_source = match content.get("title").and_then(Value::as_str) {
      Some(title) if self.config.use_title_as_classname => title,
      _ => node_name,
    };
    let delimiters = self.config.word_delimiters();
    let name = identifiers::to_class_name(
      name_source,
      self.config.class_name_prefix.as_deref(),
      self.config.class_name_suffix.as_deref(),
      &delimiters,
    );
    (self.config.target_package.clone(), name)
  }

  fn add_to_string(&mut self, class_id: TypeId, call_super: bool) -> Result<(), GenerationError> {
    let mut fields = vec![];
    for field in self.model.instance_fields(class_id) {
      // Element-wise formatting only works for primitive element arrays.
      if let JavaType::Array(element) = &field.java_type
        && !element.is_primitive()
      {
        return Err(GenerationError::UnsupportedToString {
          field: field.name.clone(),
        });
      }
      fields.push(field.name.clone());
    }
    let mut method = MethodDef::new("toString", MethodKind::ToString { fields, call_super });
    method.return_type = Some(JavaType::string());
    self.model.add_method(class_id, method);
    Ok(())
  }

  fn add_hash_code_and_equals(&mut self, class_id: TypeId, call_super: bool) {
    let fields: Vec<String> = self.model.instance_fields(class_id).map(|f| f.name.clone()).collect();
    let mut hash_code = MethodDef::new(
      "hashCode",
      MethodKind::HashCode {
        fields: fields.clone(),
        call_super,
      },
    );
    hash_code.return_type = Some(JavaType::Primitive(JavaPrimitive::Int));
    self.model.add_method(class_id, hash_code);

    let mut equals = MethodDef::new("equals", MethodKind::Equals { fields, call_super });
    equals.return_type = Some(JavaType::Primitive(JavaPrimitive::Boolean));
    self.model.add_method(class_id, equals);
  }

  fn add_constructors(&mut self, class_id: TypeId, class_name: &str) {
    self
      .model
      .add_method(class_id, MethodDef::new(class_name, MethodKind::Constructor { field_params: vec![] }));

    let params: Vec<String> = self
      .model
      .instance_fields(class_id)
      .filter(|f| !self.config.constructors_required_properties_only || f.required)
      .map(|f| f.name.clone())
      .collect();
    if !params.is_empty() {
      self
        .model
        .add_method(class_id, MethodDef::new(class_name, MethodKind::Constructor { field_params: params }));
    }
  }
}
