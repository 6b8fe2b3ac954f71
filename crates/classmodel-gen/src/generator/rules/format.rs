use serde_json::Value;

use crate::{
  config::GenerationConfig,
  generator::codemodel::{JavaPrimitive, JavaType},
};

/// Maps a `format` value on a string schema to a concrete type.
/// Unrecognized formats return `None` and the plain string type stands.
pub(crate) fn format_type(config: &GenerationConfig, format: &str) -> Option<JavaType> {
  let java_type = match format {
    "date-time" => date_time_type(config),
    "date" | "time" => JavaType::string(),
    "utc-millisec" => {
      if config.use_primitives {
        JavaType::Primitive(JavaPrimitive::Long)
      } else {
        JavaType::Boxed(JavaPrimitive::Long)
      }
    }
    "regex" => JavaType::Existing(String::from("java.util.regex.Pattern")),
    "uri" => JavaType::Existing(String::from("java.net.URI")),
    "uuid" => JavaType::Existing(String::from("java.util.UUID")),
    "email" | "phone" | "ip-address" | "ipv6" | "host-name" | "hostname" | "style" | "color" => JavaType::string(),
    _ => return None,
  };
  Some(java_type)
}

pub(crate) fn date_time_type(config: &GenerationConfig) -> JavaType {
  if config.use_joda_dates {
    JavaType::Existing(String::from("org.joda.time.DateTime"))
  } else {
    JavaType::Existing(String::from("java.util.Date"))
  }
}

/// A string schema carrying `media` with a binary encoding holds raw
/// bytes; without one it stays textual.
pub(crate) fn media_type(media: &Value) -> JavaType {
  if media.get("binaryEncoding").and_then(Value::as_str).is_some() {
    JavaType::Array(Box::new(JavaType::Primitive(JavaPrimitive::Byte)))
  } else {
    JavaType::string()
  }
}
