use serde_json::Value;

use crate::{
  config::GenerationConfig,
  generator::{
    codemodel::{JavaType, TypeId},
    session::GenerationSession,
  },
};

pub(crate) const TEST_URI: &str = "http://example.com/schema.json";

pub(crate) fn generate_with(config: GenerationConfig, name: &str, content: Value) -> (GenerationSession, JavaType) {
  let mut session = GenerationSession::new(config);
  let java_type = session
    .generate(name, TEST_URI, content)
    .expect("generation should succeed");
  (session, java_type)
}

pub(crate) fn generate(name: &str, content: Value) -> (GenerationSession, JavaType) {
  generate_with(GenerationConfig::default(), name, content)
}

pub(crate) fn defined(java_type: &JavaType) -> TypeId {
  match java_type {
    JavaType::Defined(id) => *id,
    other => panic!("expected a generated type, got {other:?}"),
  }
}
