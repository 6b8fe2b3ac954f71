use serde::Serialize;
use strum::Display;

/// Counters and soft warnings accumulated over one generation run.
/// Serializes for callers that report run summaries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GenerationStats {
  pub types_generated: usize,
  pub classes_generated: usize,
  pub enums_generated: usize,
  pub interfaces_generated: usize,
  pub dedup_hits: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_class(&mut self) {
    self.classes_generated += 1;
    self.types_generated += 1;
  }

  pub fn record_enum(&mut self) {
    self.enums_generated += 1;
    self.types_generated += 1;
  }

  pub fn record_interface(&mut self) {
    self.interfaces_generated += 1;
    self.types_generated += 1;
  }

  pub fn record_dedup_hit(&mut self) {
    self.dedup_hits += 1;
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }
}

/// Recoverable conditions surfaced to the caller without aborting the run.
///
/// Every warning corresponds to a documented fallback: generation never
/// silently produces a different result without one of these.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
pub enum GenerationWarning {
  #[strum(to_string = "Schema '{location}' uses deprecated 'javaEnumNames'; prefer 'javaEnums'")]
  DeprecatedEnumNames { location: String },
  #[strum(
    to_string = "Schema '{location}' declares both 'javaEnums' and 'javaEnumNames'; 'javaEnumNames' is ignored"
  )]
  ConflictingEnumExtensions { location: String },
  #[strum(to_string = "Enum entry {index} of '{location}' has no usable metadata; derived name used")]
  MissingEnumMetadata { location: String, index: usize },
  #[strum(to_string = "Unrecognized type '{type_value}' at '{location}'; falling back to Object")]
  UnrecognizedType { location: String, type_value: String },
}
