use serde_json::{Map, Value};

use super::ref_basename;
use crate::{
  error::GenerationError,
  generator::{
    codemodel::{JavaType, TypeId, TypeKind},
    schema::DocId,
    session::GenerationSession,
  },
  naming::identifiers,
};

impl GenerationSession {
  /// Collapses an `allOf` node into one merged schema and re-dispatches
  /// it. Branches merge in order, siblings of the `allOf` keyword merge
  /// last and therefore win; the merged schema lives in an anonymous
  /// self-rooted document so later `$ref`s can never find it.
  pub(crate) fn apply_all_of(
    &mut self,
    node_name: &str,
    doc: DocId,
    parent: Option<TypeId>,
  ) -> Result<JavaType, GenerationError> {
    let content = self.store.content(doc).clone();
    let branches = combinator_branches(&content, "allOf")?;

    let mut merged = Value::Object(Map::new());
    for branch in branches {
      self.merge_branch(doc, branch, &mut merged)?;
    }

    if let Some(siblings) = content.as_object() {
      let mut rest = siblings.clone();
      rest.remove("allOf");
      rest.remove("id");
      rest.remove("$id");
      merge_value(&mut merged, &Value::Object(rest));
    }

    let merged_doc = self.store.create_anonymous(merged);
    self.apply_schema(node_name, merged_doc, parent)
  }

  /// Merges one branch into the accumulator: references are resolved in
  /// their own document context first, nested `allOf` arrays flatten.
  fn merge_branch(&mut self, ctx: DocId, branch: &Value, merged: &mut Value) -> Result<(), GenerationError> {
    self.enter(ctx)?;
    let result = self.merge_branch_inner(ctx, branch, merged);
    self.depth -= 1;
    result
  }

  fn merge_branch_inner(&mut self, ctx: DocId, branch: &Value, merged: &mut Value) -> Result<(), GenerationError> {
    if let Some(reference) = branch.get("$ref").and_then(Value::as_str) {
      let delimiters = self.config.ref_fragment_path_delimiters.clone();
      let target = self.store.resolve(ctx, reference, &delimiters)?;
      let target_content = self.store.content(target).clone();
      return self.merge_branch(target, &target_content, merged);
    }
    if let Some(nested) = branch.get("allOf").and_then(Value::as_array) {
      let nested = nested.clone();
      for inner in &nested {
        self.merge_branch(ctx, inner, merged)?;
      }
      if let Some(siblings) = branch.as_object() {
        let mut rest = siblings.clone();
        rest.remove("allOf");
        merge_value(merged, &Value::Object(rest));
      }
      return Ok(());
    }
    merge_value(merged, branch);
    Ok(())
  }

  /// Marker-interface synthesis for `anyOf`/`oneOf`.
  ///
  /// When every branch is object-like, each branch becomes (or reuses) a
  /// class implementing a fresh marker interface, and the node's type is
  /// the interface. Any non-object branch makes the whole node `Object`.
  pub(crate) fn apply_marker_union(
    &mut self,
    node_name: &str,
    doc: DocId,
    parent: Option<TypeId>,
    keyword: &str,
  ) -> Result<JavaType, GenerationError> {
    let content = self.store.content(doc).clone();
    let branches = combinator_branches(&content, keyword)?.clone();
    let branch_docs = self.resolve_branches(doc, keyword, &branches)?;

    let all_object_like = branch_docs
      .iter()
      .all(|(branch_doc, _)| object_like(self.store.content(*branch_doc)));
    if !all_object_like {
      return Ok(JavaType::object());
    }

    let delimiters = self.config.word_delimiters();
    let base = identifiers::to_class_name(
      node_name,
      self.config.class_name_prefix.as_deref(),
      self.config.class_name_suffix.as_deref(),
      &delimiters,
    );
    let package = self.config.target_package.clone();
    let name = identifiers::make_unique(&base, |candidate| self.model.is_name_taken(&package, candidate));
    let interface_id = self.model.declare(&package, &name, TypeKind::Interface);
    self.model.type_def_mut(interface_id).origin = Some(doc);
    self.store.set_type_if_empty(doc, JavaType::Defined(interface_id));
    self.stats.record_interface();

    if let Some(property) = content
      .get("discriminator")
      .and_then(|d| d.get("propertyName"))
      .and_then(Value::as_str)
    {
      self.annotator.sub_type_info(self.model.type_def_mut(interface_id), property);
    }

    for (index, (branch_doc, ref_name)) in branch_docs.iter().enumerate() {
      let branch_name = match ref_name {
        Some(name) => name.clone(),
        None => self
          .store
          .content(*branch_doc)
          .get("title")
          .and_then(Value::as_str)
          .map_or_else(|| format!("{node_name}Option{index}"), String::from),
      };
      let branch_type = self.apply_schema(&branch_name, *branch_doc, parent)?;
      if let JavaType::Defined(branch_id) = branch_type
        && self.model.type_def(branch_id).kind == TypeKind::Class
        && !self.model.type_def(branch_id).interfaces.contains(&JavaType::Defined(interface_id))
      {
        self.model.add_interface(branch_id, JavaType::Defined(interface_id));
      }
    }

    Ok(JavaType::Defined(interface_id))
  }

  /// Legacy `oneOf` handling: every branch resolves independently and the
  /// node's type is the nearest ancestor shared by all branch types.
  pub(crate) fn apply_common_ancestor(
    &mut self,
    node_name: &str,
    doc: DocId,
    parent: Option<TypeId>,
  ) -> Result<JavaType, GenerationError> {
    let content = self.store.content(doc).clone();
    let branches = combinator_branches(&content, "oneOf")?.clone();
    let branch_docs = self.resolve_branches(doc, "oneOf", &branches)?;

    let mut branch_types = vec![];
    for (index, (branch_doc, ref_name)) in branch_docs.iter().enumerate() {
      let branch_name = ref_name
        .clone()
        .unwrap_or_else(|| format!("{node_name}Option{index}"));
      branch_types.push(self.apply_schema(&branch_name, *branch_doc, parent)?);
    }

    let mut common = self.model.ancestor_chain(&branch_types[0]);
    for branch_type in &branch_types[1..] {
      let chain = self.model.ancestor_chain(branch_type);
      let shared = common.iter().zip(chain.iter()).take_while(|(a, b)| a == b).count();
      common.truncate(shared);
    }
    Ok(common.last().cloned().unwrap_or_else(JavaType::object))
  }

  /// Resolves each branch to a stored document, keeping the ref basename
  /// as the branch's naming seed when the branch was a reference.
  fn resolve_branches(
    &mut self,
    doc: DocId,
    keyword: &str,
    branches: &[Value],
  ) -> Result<Vec<(DocId, Option<String>)>, GenerationError> {
    let branches_doc = self.store.child(doc, keyword)?;
    let delimiters = self.config.ref_fragment_path_delimiters.clone();
    let mut resolved = vec![];
    for (index, branch) in branches.iter().enumerate() {
      if let Some(reference) = branch.get("$ref").and_then(Value::as_str) {
        let target = self.store.resolve(doc, reference, &delimiters)?;
        resolved.push((target, ref_basename(reference)));
      } else {
        let inline = self.store.child(branches_doc, &index.to_string())?;
        resolved.push((inline, None));
      }
    }
    Ok(resolved)
  }
}

fn combinator_branches<'a>(content: &'a Value, keyword: &str) -> Result<&'a Vec<Value>, GenerationError> {
  let branches = content
    .get(keyword)
    .and_then(Value::as_array)
    .ok_or_else(|| GenerationError::MalformedCombinator {
      keyword: keyword.to_string(),
      reason: String::from("expected an array of schemas"),
    })?;
  if branches.is_empty() {
    return Err(GenerationError::MalformedCombinator {
      keyword: keyword.to_string(),
      reason: String::from("the schema array is empty"),
    });
  }
  Ok(branches)
}

/// Whether a schema can become a class implementing a marker interface.
fn object_like(content: &Value) -> bool {
  let Some(map) = content.as_object() else {
    return false;
  };
  match map.get("type").and_then(Value::as_str) {
    Some("object") => true,
    Some(_) => false,
    None => map.contains_key("properties") || map.contains_key("allOf") || map.contains_key("extends"),
  }
}

/// Deep merge: objects merge key-wise recursively, arrays union with
/// duplicate suppression, scalars take the incoming value.
fn merge_value(dest: &mut Value, src: &Value) {
  match (&mut *dest, src) {
    (Value::Object(dest_map), Value::Object(src_map)) => {
      for (key, value) in src_map {
        match dest_map.get_mut(key) {
          Some(existing) => merge_value(existing, value),
          None => {
            dest_map.insert(key.clone(), value.clone());
          }
        }
      }
    }
    (Value::Array(dest_items), Value::Array(src_items)) => {
      for item in src_items {
        if !dest_items.contains(item) {
          dest_items.push(item.clone());
        }
      }
    }
    (dest_slot, _) => *dest_slot = src.clone(),
  }
}
