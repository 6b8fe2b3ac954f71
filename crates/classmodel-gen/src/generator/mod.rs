pub mod annotator;
pub mod codemodel;
pub mod metrics;
pub(crate) mod rules;
pub mod schema;
pub mod session;
