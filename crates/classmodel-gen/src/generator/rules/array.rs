use serde_json::Value;

use crate::{
  error::GenerationError,
  generator::{codemodel::{JavaType, TypeId}, schema::DocId, session::GenerationSession},
  naming::identifiers,
};

impl GenerationSession {
  /// Maps an array schema to a collection type: `Set` under
  /// `uniqueItems`, `List` otherwise. The element type comes from `items`
  /// (named by the singular of the property name); tuple-form or missing
  /// `items` degrades to `Object` elements.
  pub(crate) fn apply_array(
    &mut self,
    node_name: &str,
    doc: DocId,
    parent: Option<TypeId>,
  ) -> Result<JavaType, GenerationError> {
    let unique_items = self
      .store
      .content(doc)
      .get("uniqueItems")
      .and_then(Value::as_bool)
      .unwrap_or(false);

    let element = match self.store.content(doc).get("items") {
      Some(Value::Object(_)) => {
        let items_doc = self.store.child(doc, "items")?;
        let element_name = identifiers::singularize(node_name);
        self.apply_schema(&element_name, items_doc, parent)?.boxify()
      }
      _ => JavaType::object(),
    };

    if unique_items {
      Ok(JavaType::Set(Box::new(element)))
    } else {
      Ok(JavaType::List(Box::new(element)))
    }
  }
}
