use thiserror::Error;

/// Fatal errors that abort a generation run.
///
/// There is no partial-success model: the first fatal error unwinds the
/// whole run. Recoverable conditions are reported as
/// [`GenerationWarning`](crate::generator::metrics::GenerationWarning)s
/// instead and never pass through here.
#[derive(Debug, Error)]
pub enum GenerationError {
  #[error("unresolvable $ref '{reference}': {reason}")]
  UnresolvableRef { reference: String, reason: String },

  #[error("fragment path segment '{segment}' not present in '{reference}'")]
  BadPointer { reference: String, segment: String },

  #[error("content for '{uri}' could not be resolved: {reason}")]
  Content { uri: String, reason: String },

  #[error("enum at '{0}' cannot be backed by a primitive type")]
  PrimitiveEnum(String),

  #[error("unable to parse '{value}' as a {target} literal")]
  UnparseableLiteral { value: String, target: String },

  #[error("toString synthesis does not support reference-element arrays (field '{field}')")]
  UnsupportedToString { field: String },

  #[error("reference depth limit of {limit} exceeded while resolving '{reference}'")]
  DepthExceeded { limit: usize, reference: String },

  #[error("malformed '{keyword}' combinator: {reason}")]
  MalformedCombinator { keyword: String, reason: String },
}
