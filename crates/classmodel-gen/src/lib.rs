#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

//! Compiles JSON Schema documents into an in-memory class model.
//!
//! The entry point is [`GenerationSession`]: register schema documents,
//! run [`GenerationSession::generate`], and read the resulting
//! [`generator::codemodel::ClassModel`] back out. Rendering the model to
//! source text is left to the caller.

pub mod config;
pub mod error;
pub mod generator;
mod naming;

pub use crate::{
  config::{GenerationConfig, OneOfStrategy},
  error::GenerationError,
  generator::{
    annotator::{Annotator, NoopAnnotator},
    schema::{ContentResolver, FileContentResolver, MapContentResolver},
    session::GenerationSession,
  },
};
