use std::{collections::HashMap, fs};

use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::{error::GenerationError, generator::codemodel::JavaType};

/// Handle to one schema node held by the [`SchemaStore`].
///
/// Handle equality is the identity-sharing contract: resolving the same
/// reference from anywhere in the schema graph yields an equal `DocId`,
/// and therefore the same memoized generated type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocId(usize);

/// Canonical cache key for a stored schema node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum StoreKey {
  /// A whole document addressed by absolute URI.
  Absolute(String),
  /// A fragment inside an already-stored document, addressed by its
  /// normalized pointer path.
  Fragment(DocId, String),
}

#[derive(Debug)]
struct SchemaDocument {
  /// Absolute URI of the containing document, for diagnostics and for
  /// resolving relative references found inside this node.
  uri: String,
  /// Document this node lives in. Self-referential for whole documents.
  root: DocId,
  /// Normalized pointer path from the root, when this node is a fragment.
  fragment: Option<String>,
  content: Value,
  /// First-writer-wins memo of the type generated for this node. Written
  /// before a rule descends into child schemas so that cyclic references
  /// land on the in-progress type instead of recursing forever.
  resolved_type: Option<JavaType>,
}

/// Supplies raw document content for URIs the store has not seen yet.
pub trait ContentResolver {
  fn resolve(&self, uri: &str) -> Result<Value, GenerationError>;
}

/// In-memory resolver backed by a URI-to-document map.
///
/// Doubles as the test fixture and as the "everything pre-registered"
/// production mode where callers load documents up front.
#[derive(Debug, Default)]
pub struct MapContentResolver {
  documents: IndexMap<String, Value>,
}

impl MapContentResolver {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, uri: impl Into<String>, content: Value) {
    self.documents.insert(uri.into(), content);
  }
}

impl ContentResolver for MapContentResolver {
  fn resolve(&self, uri: &str) -> Result<Value, GenerationError> {
    self.documents.get(uri).cloned().ok_or_else(|| GenerationError::Content {
      uri: uri.to_string(),
      reason: String::from("no document registered for this URI"),
    })
  }
}

/// Resolver that reads schema documents from the local filesystem.
///
/// Accepts `file://` URIs and bare paths. Relative references inside a
/// `file://` document join against the base URI the usual way and land
/// back here as sibling paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileContentResolver;

impl ContentResolver for FileContentResolver {
  fn resolve(&self, uri: &str) -> Result<Value, GenerationError> {
    let path = uri.strip_prefix("file://").unwrap_or(uri);
    let text = fs::read_to_string(path).map_err(|err| GenerationError::Content {
      uri: uri.to_string(),
      reason: err.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|err| GenerationError::Content {
      uri: uri.to_string(),
      reason: err.to_string(),
    })
  }
}

/// Arena of schema nodes with a canonical-key cache in front of it.
///
/// Every node is stored exactly once per canonical location; repeated
/// resolution of the same reference returns the same handle. Generated-type
/// memos live on the nodes themselves, so identity sharing of schemas
/// directly yields identity sharing of generated types.
pub struct SchemaStore {
  docs: Vec<SchemaDocument>,
  by_key: HashMap<StoreKey, DocId>,
  resolver: Box<dyn ContentResolver>,
  anonymous_count: usize,
}

impl SchemaStore {
  pub fn new(resolver: Box<dyn ContentResolver>) -> Self {
    Self {
      docs: vec![],
      by_key: HashMap::new(),
      resolver,
      anonymous_count: 0,
    }
  }

  /// Registers a whole document under an absolute URI. Registering the
  /// same URI twice returns the original handle and ignores the new
  /// content.
  pub fn register_root(&mut self, uri: &str, content: Value) -> DocId {
    let key = StoreKey::Absolute(uri.to_string());
    if let Some(&existing) = self.by_key.get(&key) {
      return existing;
    }
    let id = DocId(self.docs.len());
    self.docs.push(SchemaDocument {
      uri: uri.to_string(),
      root: id,
      fragment: None,
      content,
      resolved_type: None,
    });
    self.by_key.insert(key, id);
    id
  }

  /// Stores a document with no addressable location. Used for schemas
  /// synthesized during generation (merged combinator results) that must
  /// never be found again by reference.
  pub fn create_anonymous(&mut self, content: Value) -> DocId {
    self.anonymous_count += 1;
    let id = DocId(self.docs.len());
    self.docs.push(SchemaDocument {
      uri: format!("anonymous://{}", self.anonymous_count),
      root: id,
      fragment: None,
      content,
      resolved_type: None,
    });
    id
  }

  pub fn content(&self, id: DocId) -> &Value {
    &self.docs[id.0].content
  }

  pub fn uri(&self, id: DocId) -> &str {
    &self.docs[id.0].uri
  }

  pub fn root_of(&self, id: DocId) -> DocId {
    self.docs[id.0].root
  }

  pub fn fragment_of(&self, id: DocId) -> Option<&str> {
    self.docs[id.0].fragment.as_deref()
  }

  /// Human-readable location of a node, for warnings and errors.
  pub fn location(&self, id: DocId) -> String {
    match &self.docs[id.0].fragment {
      Some(fragment) => format!("{}#{}", self.docs[self.docs[id.0].root.0].uri, fragment),
      None => self.docs[id.0].uri.clone(),
    }
  }

  pub fn resolved_type(&self, id: DocId) -> Option<&JavaType> {
    self.docs[id.0].resolved_type.as_ref()
  }

  /// Memoizes the generated type for a node unless one is already
  /// recorded. The first writer wins; later attempts are ignored so a
  /// cycle that re-enters a node keeps the in-progress type.
  pub fn set_type_if_empty(&mut self, id: DocId, java_type: JavaType) {
    let slot = &mut self.docs[id.0].resolved_type;
    if slot.is_none() {
      *slot = Some(java_type);
    }
  }

  pub fn is_generated(&self, id: DocId) -> bool {
    self.docs[id.0].resolved_type.is_some()
  }

  /// Resolves a `$ref` string against a context node to a stored handle.
  ///
  /// The reference splits into a document part and a fragment part at the
  /// first `#`. An empty document part stays in the context's document; a
  /// non-empty one is joined against the context URI and fetched through
  /// the [`ContentResolver`] on first sight. The fragment is then walked
  /// segment by segment (split on `fragment_delimiters`, percent-decoded)
  /// through objects and arrays. A segment that does not exist is fatal.
  pub fn resolve(&mut self, ctx: DocId, reference: &str, fragment_delimiters: &str) -> Result<DocId, GenerationError> {
    let (base, fragment) = match reference.split_once('#') {
      Some((base, fragment)) => (base, Some(fragment)),
      None => (reference, None),
    };

    let document = if base.is_empty() {
      self.root_of(ctx)
    } else {
      let uri = join_uri(self.uri(self.root_of(ctx)), base);
      self.fetch_document(&uri).map_err(|err| GenerationError::UnresolvableRef {
        reference: reference.to_string(),
        reason: err.to_string(),
      })?
    };

    match fragment {
      None | Some("") => Ok(document),
      Some(path) => self.resolve_fragment(document, reference, path, fragment_delimiters),
    }
  }

  fn fetch_document(&mut self, uri: &str) -> Result<DocId, GenerationError> {
    let key = StoreKey::Absolute(uri.to_string());
    if let Some(&existing) = self.by_key.get(&key) {
      return Ok(existing);
    }
    let content = self.resolver.resolve(uri)?;
    Ok(self.register_root(uri, content))
  }

  fn resolve_fragment(
    &mut self,
    document: DocId,
    reference: &str,
    path: &str,
    delimiters: &str,
  ) -> Result<DocId, GenerationError> {
    let segments = split_fragment(path, delimiters);
    let normalized = segments.join("/");
    if normalized.is_empty() {
      return Ok(document);
    }

    let key = StoreKey::Fragment(document, normalized.clone());
    if let Some(&existing) = self.by_key.get(&key) {
      return Ok(existing);
    }

    let mut node = self.docs[document.0].content.clone();
    for segment in &segments {
      node = navigate(&node, segment).ok_or_else(|| GenerationError::BadPointer {
        reference: reference.to_string(),
        segment: segment.clone(),
      })?;
    }

    let root = self.root_of(document);
    let uri = self.docs[root.0].uri.clone();
    let id = DocId(self.docs.len());
    self.docs.push(SchemaDocument {
      uri,
      root,
      fragment: Some(normalized),
      content: node,
      resolved_type: None,
    });
    self.by_key.insert(key, id);
    Ok(id)
  }

  /// Stores a direct child of an existing node under a derived pointer
  /// path, preserving identity for repeat lookups. Used for keywords like
  /// `additionalProperties` and `items` whose subschemas are addressed
  /// relative to their parent rather than through `$ref`.
  pub fn child(&mut self, parent: DocId, segment: &str) -> Result<DocId, GenerationError> {
    let root = self.root_of(parent);
    let normalized = match self.fragment_of(parent) {
      Some(fragment) => format!("{fragment}/{segment}"),
      None => segment.to_string(),
    };

    let key = StoreKey::Fragment(root, normalized.clone());
    if let Some(&existing) = self.by_key.get(&key) {
      return Ok(existing);
    }

    let content = navigate(&self.docs[parent.0].content, segment).ok_or_else(|| GenerationError::BadPointer {
      reference: self.location(parent),
      segment: segment.to_string(),
    })?;

    let uri = self.docs[root.0].uri.clone();
    let id = DocId(self.docs.len());
    self.docs.push(SchemaDocument {
      uri,
      root,
      fragment: Some(normalized),
      content,
      resolved_type: None,
    });
    self.by_key.insert(key, id);
    Ok(id)
  }
}

/// Walks one pointer segment into a JSON value. Array segments must be
/// valid indices; anything else is a miss.
fn navigate(node: &Value, segment: &str) -> Option<Value> {
  match node {
    Value::Object(map) => map.get(segment).cloned(),
    Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)).cloned(),
    _ => None,
  }
}

/// Splits a fragment path into percent-decoded segments on any of the
/// configured delimiter characters, dropping empties.
fn split_fragment(path: &str, delimiters: &str) -> Vec<String> {
  path
    .split(|c: char| delimiters.contains(c))
    .filter(|s| !s.is_empty())
    .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
    .collect()
}

/// Minimal RFC 3986 style reference join: absolute references win, and
/// relative ones replace the last path segment of the base.
fn join_uri(base: &str, reference: &str) -> String {
  if reference.contains("://") || reference.starts_with("urn:") {
    return reference.to_string();
  }
  if let Some(rest) = reference.strip_prefix('/') {
    if let Some(scheme_end) = base.find("://") {
      let authority_end = base[scheme_end + 3..]
        .find('/')
        .map_or(base.len(), |i| scheme_end + 3 + i);
      return format!("{}/{}", &base[..authority_end], rest);
    }
    return reference.to_string();
  }
  match base.rfind('/') {
    Some(i) => format!("{}/{}", &base[..i], reference),
    None => reference.to_string(),
  }
}
