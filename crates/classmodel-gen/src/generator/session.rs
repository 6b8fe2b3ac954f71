use anyhow::Context;
use serde_json::Value;

use crate::{
  config::GenerationConfig,
  error::GenerationError,
  generator::{
    annotator::{Annotator, NoopAnnotator},
    codemodel::{ClassModel, JavaType},
    metrics::GenerationStats,
    rules::dedup::DedupCache,
    schema::{ContentResolver, DocId, MapContentResolver, SchemaStore},
  },
};

/// One generation run: owns the schema store, the class model under
/// construction, the dedup caches and the run metrics. The keyword rules
/// are implemented as methods on this type so they can recurse into each
/// other freely.
pub struct GenerationSession {
  pub(crate) config: GenerationConfig,
  pub(crate) store: SchemaStore,
  pub(crate) model: ClassModel,
  pub(crate) stats: GenerationStats,
  pub(crate) annotator: Box<dyn Annotator>,
  pub(crate) dedup: DedupCache,
  pub(crate) depth: usize,
}

impl GenerationSession {
  pub fn new(config: GenerationConfig) -> Self {
    Self::with_resolver(config, Box::new(MapContentResolver::new()))
  }

  pub fn with_resolver(config: GenerationConfig, resolver: Box<dyn ContentResolver>) -> Self {
    Self {
      config,
      store: SchemaStore::new(resolver),
      model: ClassModel::new(),
      stats: GenerationStats::default(),
      annotator: Box::new(NoopAnnotator),
      dedup: DedupCache::default(),
      depth: 0,
    }
  }

  pub fn with_annotator(mut self, annotator: Box<dyn Annotator>) -> Self {
    self.annotator = annotator;
    self
  }

  /// Registers a schema document under `uri` and generates the type graph
  /// rooted at it. `name` seeds the generated type's name when the schema
  /// carries no naming hints of its own.
  pub fn generate(&mut self, name: &str, uri: &str, content: Value) -> anyhow::Result<JavaType> {
    let doc = self.store.register_root(uri, content);
    let java_type = self
      .apply_schema(name, doc, None)
      .with_context(|| format!("failed to generate a type for schema '{uri}'"))?;
    Ok(java_type)
  }

  pub fn config(&self) -> &GenerationConfig {
    &self.config
  }

  pub fn model(&self) -> &ClassModel {
    &self.model
  }

  pub fn stats(&self) -> &GenerationStats {
    &self.stats
  }

  pub fn store(&self) -> &SchemaStore {
    &self.store
  }

  /// Tears the session down into its products.
  pub fn into_parts(self) -> (ClassModel, GenerationStats) {
    (self.model, self.stats)
  }

  /// Recursion guard shared by dispatch and the allOf merge walk. Every
  /// `enter` is paired with a manual depth decrement by the caller.
  pub(crate) fn enter(&mut self, doc: DocId) -> Result<(), GenerationError> {
    self.depth += 1;
    if self.depth > self.config.max_ref_depth {
      return Err(GenerationError::DepthExceeded {
        limit: self.config.max_ref_depth,
        reference: self.store.location(doc),
      });
    }
    Ok(())
  }
}
