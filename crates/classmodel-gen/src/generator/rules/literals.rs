use chrono::DateTime;
use serde_json::Value;

use crate::{
  error::GenerationError,
  generator::{
    codemodel::{JavaPrimitive, JavaType, Literal, TypeKind},
    schema::DocId,
    session::GenerationSession,
  },
};

impl GenerationSession {
  /// Builds the initializer expression for a `default` or `const` value
  /// against the field's resolved type. A value that cannot be expressed
  /// in the target type is fatal.
  pub(crate) fn literal_for(&mut self, target: &JavaType, value: &Value, doc: DocId) -> Result<Literal, GenerationError> {
    if value.is_null() {
      return Ok(Literal::Null);
    }
    match target {
      JavaType::Primitive(primitive) | JavaType::Boxed(primitive) => primitive_literal(*primitive, value),
      JavaType::Existing(name) => self.existing_literal(name, value),
      JavaType::List(element) => self.collection_literal(element, value, doc, false),
      JavaType::Set(element) => self.collection_literal(element, value, doc, true),
      JavaType::Defined(id) if self.model.type_def(*id).kind == TypeKind::Enum => {
        let backing = self
          .model
          .find_field(*id, "value")
          .map_or_else(JavaType::string, |field| field.java_type.clone());
        let argument = self.literal_for(&backing, value, doc)?;
        Ok(Literal::EnumFromValue {
          enum_type: *id,
          arg: Box::new(argument),
        })
      }
      _ => Err(unparseable(value, "this target type")),
    }
  }

  fn existing_literal(&self, class: &str, value: &Value) -> Result<Literal, GenerationError> {
    match class {
      "java.lang.String" => Ok(Literal::Str(text_of(value))),
      "java.math.BigInteger" => Ok(Literal::BigInteger(text_of(value))),
      "java.math.BigDecimal" => Ok(Literal::BigDecimal(text_of(value))),
      "java.net.URI" => Ok(Literal::UriCreate(text_of(value))),
      "java.util.Date" | "org.joda.time.DateTime" => date_literal(value),
      "java.lang.Object" => Ok(Literal::Str(text_of(value))),
      other => Ok(Literal::StringCtor {
        class: other.to_string(),
        value: text_of(value),
      }),
    }
  }

  fn collection_literal(
    &mut self,
    element: &JavaType,
    value: &Value,
    doc: DocId,
    as_set: bool,
  ) -> Result<Literal, GenerationError> {
    let Some(entries) = value.as_array() else {
      return Err(unparseable(value, if as_set { "set" } else { "list" }));
    };
    let mut items = vec![];
    for entry in entries {
      items.push(self.literal_for(element, entry, doc)?);
    }
    if as_set {
      Ok(Literal::SetOf {
        element: element.clone(),
        items,
      })
    } else {
      Ok(Literal::ListOf {
        element: element.clone(),
        items,
      })
    }
  }
}

fn primitive_literal(primitive: JavaPrimitive, value: &Value) -> Result<Literal, GenerationError> {
  match primitive {
    JavaPrimitive::Boolean => match value {
      Value::Bool(flag) => Ok(Literal::Bool(*flag)),
      Value::String(text) => text.parse().map(Literal::Bool).map_err(|_| unparseable(value, "boolean")),
      _ => Err(unparseable(value, "boolean")),
    },
    JavaPrimitive::Byte | JavaPrimitive::Short | JavaPrimitive::Int => {
      integer_value(value).map(Literal::Int).ok_or_else(|| unparseable(value, "int"))
    }
    JavaPrimitive::Long => integer_value(value)
      .map(Literal::Long)
      .ok_or_else(|| unparseable(value, "long")),
    JavaPrimitive::Float => float_value(value)
      .map(Literal::Float)
      .ok_or_else(|| unparseable(value, "float")),
    JavaPrimitive::Double => float_value(value)
      .map(Literal::Double)
      .ok_or_else(|| unparseable(value, "double")),
    JavaPrimitive::Char => match value.as_str() {
      Some(text) if text.chars().count() == 1 => Ok(Literal::Str(text.to_string())),
      _ => Err(unparseable(value, "char")),
    },
  }
}

/// Date-like defaults accept epoch milliseconds (bare number or numeric
/// string) or an RFC 3339 timestamp. Anything else is fatal.
fn date_literal(value: &Value) -> Result<Literal, GenerationError> {
  if let Some(millis) = value.as_i64() {
    return Ok(Literal::DateMillis(millis));
  }
  let Some(text) = value.as_str() else {
    return Err(unparseable(value, "date"));
  };
  if let Ok(millis) = text.parse::<i64>() {
    return Ok(Literal::DateMillis(millis));
  }
  DateTime::parse_from_rfc3339(text)
    .map(|timestamp| Literal::DateMillis(timestamp.timestamp_millis()))
    .map_err(|_| unparseable(value, "date"))
}

fn integer_value(value: &Value) -> Option<i64> {
  match value {
    Value::Number(number) => number.as_i64(),
    Value::String(text) => text.parse().ok(),
    _ => None,
  }
}

fn float_value(value: &Value) -> Option<f64> {
  match value {
    Value::Number(number) => number.as_f64(),
    Value::String(text) => text.parse().ok(),
    _ => None,
  }
}

fn text_of(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}

fn unparseable(value: &Value, target: &str) -> GenerationError {
  GenerationError::UnparseableLiteral {
    value: text_of(value),
    target: target.to_string(),
  }
}
