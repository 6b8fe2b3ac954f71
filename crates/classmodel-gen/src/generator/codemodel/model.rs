use super::types::JavaType;
use crate::generator::schema::DocId;

/// Handle into the [`ClassModel`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
  Class,
  Interface,
  Enum,
}

/// A value-construction expression, declaratively. Rendering these to
/// source text is the emitter's concern, not ours.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
  Null,
  Bool(bool),
  Int(i64),
  Long(i64),
  Float(f64),
  Double(f64),
  Str(String),
  /// `new BigInteger("...")` / `new BigDecimal("...")` style.
  BigInteger(String),
  BigDecimal(String),
  /// Date-like constructed from epoch milliseconds.
  DateMillis(i64),
  /// `new <class>("<value>")` for string-parseable types.
  StringCtor { class: String, value: String },
  /// `URI.create("...")`.
  UriCreate(String),
  /// `<Enum>.fromValue(<arg>)`.
  EnumFromValue { enum_type: TypeId, arg: Box<Literal> },
  EmptyList { element: JavaType },
  EmptySet { element: JavaType },
  EmptyMap { key: JavaType, value: JavaType },
  ListOf { element: JavaType, items: Vec<Literal> },
  SetOf { element: JavaType, items: Vec<Literal> },
  /// Class-init reverse lookup table from backing value to constant.
  LookupTable,
}

#[derive(Debug, Clone)]
pub struct FieldDef {
  pub name: String,
  /// Raw JSON property name this field was derived from, when different.
  pub json_name: Option<String>,
  pub java_type: JavaType,
  pub docs: Vec<String>,
  pub required: bool,
  pub is_static: bool,
  pub is_final: bool,
  pub initializer: Option<Literal>,
  /// Serialization annotations contributed by the [`Annotator`](crate::generator::annotator::Annotator).
  pub annotations: Vec<String>,
}

impl FieldDef {
  pub fn new(name: impl Into<String>, java_type: JavaType) -> Self {
    Self {
      name: name.into(),
      json_name: None,
      java_type,
      docs: vec![],
      required: false,
      is_static: false,
      is_final: false,
      initializer: None,
      annotations: vec![],
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
  pub name: String,
  pub java_type: JavaType,
}

/// Semantic body of a generated method. The emitter knows how to render
/// each kind; the rules only decide which kinds exist and over which
/// fields they operate.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodKind {
  Getter { field: String },
  Setter { field: String },
  /// Chainable `withX` returning the receiver (legacy builder style) or
  /// the enclosing builder (inner-class style).
  BuilderWith { field: String },
  /// `build()` on a nested builder, returning the outer class.
  BuilderBuild,
  /// Static `newBuilder()` factory on the built class.
  BuilderFactory,
  Constructor { field_params: Vec<String> },
  ToString { fields: Vec<String>, call_super: bool },
  HashCode { fields: Vec<String>, call_super: bool },
  Equals { fields: Vec<String>, call_super: bool },
  /// Backing-value accessor on a generated enum.
  EnumValue,
  /// Static factory throwing on unknown input.
  EnumFromValue,
  /// `toString` returning the backing value verbatim.
  EnumToString,
  AnyGetter,
  AnySetter,
  BuilderWithAdditionalProperty,
}

#[derive(Debug, Clone)]
pub struct MethodDef {
  pub name: String,
  pub return_type: Option<JavaType>,
  pub params: Vec<Param>,
  pub is_static: bool,
  pub docs: Vec<String>,
  pub kind: MethodKind,
  pub annotations: Vec<String>,
}

impl MethodDef {
  pub fn new(name: impl Into<String>, kind: MethodKind) -> Self {
    Self {
      name: name.into(),
      return_type: None,
      params: vec![],
      is_static: false,
      docs: vec![],
      kind,
      annotations: vec![],
    }
  }
}

#[derive(Debug, Clone)]
pub struct EnumConstantDef {
  pub name: String,
  pub value: Literal,
  pub docs: Vec<String>,
  pub annotations: Vec<String>,
}

/// One declared type. Members are append-only while the owning rule chain
/// runs and untouched afterwards.
#[derive(Debug, Clone)]
pub struct TypeDef {
  pub name: String,
  pub package: String,
  pub kind: TypeKind,
  pub docs: Vec<String>,
  pub supertype: Option<JavaType>,
  pub interfaces: Vec<JavaType>,
  pub fields: Vec<FieldDef>,
  pub methods: Vec<MethodDef>,
  pub constants: Vec<EnumConstantDef>,
  pub nested: Vec<TypeId>,
  pub enclosing: Option<TypeId>,
  pub type_params: Vec<String>,
  pub serializable: bool,
  pub annotations: Vec<String>,
  /// Schema document this type was synthesized from, for diagnostics and
  /// supertype/field lookups during nested rule application.
  pub origin: Option<DocId>,
}

/// The type-declaration capability: an arena of declared types addressed
/// by [`TypeId`]. Types are created once and never deleted; rules append
/// members as they fire.
#[derive(Debug, Default)]
pub struct ClassModel {
  types: Vec<TypeDef>,
}

impl ClassModel {
  pub fn new() -> Self {
    ClassModel::default()
  }

  pub fn declare(&mut self, package: &str, name: &str, kind: TypeKind) -> TypeId {
    let id = TypeId(self.types.len());
    self.types.push(TypeDef {
      name: name.to_string(),
      package: package.to_string(),
      kind,
      docs: vec![],
      supertype: None,
      interfaces: vec![],
      fields: vec![],
      methods: vec![],
      constants: vec![],
      nested: vec![],
      enclosing: None,
      type_params: vec![],
      serializable: false,
      annotations: vec![],
      origin: None,
    });
    id
  }

  pub fn declare_nested(&mut self, enclosing: TypeId, name: &str, kind: TypeKind) -> TypeId {
    let package = self.types[enclosing.0].package.clone();
    let id = self.declare(&package, name, kind);
    self.types[id.0].enclosing = Some(enclosing);
    self.types[enclosing.0].nested.push(id);
    id
  }

  pub fn type_def(&self, id: TypeId) -> &TypeDef {
    &self.types[id.0]
  }

  pub fn type_def_mut(&mut self, id: TypeId) -> &mut TypeDef {
    &mut self.types[id.0]
  }

  pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
    self.types.iter().enumerate().map(|(i, t)| (TypeId(i), t))
  }

  pub fn len(&self) -> usize {
    self.types.len()
  }

  pub fn is_empty(&self) -> bool {
    self.types.is_empty()
  }

  /// Case-insensitive name check against every top-level type already
  /// declared in `package`. Nested types only collide within their
  /// enclosing type.
  pub fn is_name_taken(&self, package: &str, name: &str) -> bool {
    self
      .types
      .iter()
      .any(|t| t.enclosing.is_none() && t.package == package && t.name.eq_ignore_ascii_case(name))
  }

  pub fn is_nested_name_taken(&self, enclosing: TypeId, name: &str) -> bool {
    self.types[enclosing.0]
      .nested
      .iter()
      .any(|&n| self.types[n.0].name.eq_ignore_ascii_case(name))
  }

  /// Finds a declared top-level type by exact name within a package.
  pub fn find_by_name(&self, package: &str, name: &str) -> Option<TypeId> {
    self
      .types
      .iter()
      .position(|t| t.enclosing.is_none() && t.package == package && t.name == name)
      .map(TypeId)
  }

  pub fn add_field(&mut self, id: TypeId, field: FieldDef) {
    self.types[id.0].fields.push(field);
  }

  pub fn add_method(&mut self, id: TypeId, method: MethodDef) {
    self.types[id.0].methods.push(method);
  }

  pub fn add_constant(&mut self, id: TypeId, constant: EnumConstantDef) {
    self.types[id.0].constants.push(constant);
  }

  pub fn set_supertype(&mut self, id: TypeId, supertype: JavaType) {
    self.types[id.0].supertype = Some(supertype);
  }

  pub fn add_interface(&mut self, id: TypeId, interface: JavaType) {
    self.types[id.0].interfaces.push(interface);
  }

  /// Instance fields of a type, in declaration order.
  pub fn instance_fields(&self, id: TypeId) -> impl Iterator<Item = &FieldDef> {
    self.types[id.0].fields.iter().filter(|f| !f.is_static)
  }

  pub fn find_field<'a>(&'a self, id: TypeId, name: &str) -> Option<&'a FieldDef> {
    self.types[id.0].fields.iter().find(|f| f.name == name)
  }

  pub fn find_method<'a>(&'a self, id: TypeId, name: &str) -> Option<&'a MethodDef> {
    self.types[id.0].methods.iter().find(|m| m.name == name)
  }

  /// Supertype chain from `java.lang.Object` down to (and including) the
  /// given handle. Non-defined handles have `Object` as their sole
  /// ancestor besides themselves; primitives and arrays reduce to
  /// `Object` alone.
  pub fn ancestor_chain(&self, ty: &JavaType) -> Vec<JavaType> {
    match ty {
      JavaType::Primitive(_) | JavaType::Array(_) => vec![JavaType::object()],
      JavaType::Defined(id) => {
        let mut chain = vec![ty.clone()];
        let mut current = self.types[id.0].supertype.clone();
        while let Some(super_ty) = current {
          let done = super_ty.is_object();
          current = match &super_ty {
            JavaType::Defined(super_id) => self.types[super_id.0].supertype.clone(),
            _ => Some(JavaType::object()),
          };
          let at_root = chain.last().is_some_and(|t| t.is_object());
          if !at_root {
            chain.push(super_ty);
          }
          if done {
            break;
          }
        }
        if !chain.last().is_some_and(|t| t.is_object()) {
          chain.push(JavaType::object());
        }
        chain.reverse();
        chain
      }
      other if other.is_object() => vec![JavaType::object()],
      other => vec![JavaType::object(), other.clone()],
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn declare_and_lookup() {
    let mut model = ClassModel::new();
    let id = model.declare("com.example", "Widget", TypeKind::Class);
    assert_eq!(model.type_def(id).name, "Widget");
    assert!(model.is_name_taken("com.example", "widget"));
    assert!(!model.is_name_taken("com.other", "Widget"));
    assert_eq!(model.find_by_name("com.example", "Widget"), Some(id));
  }

  #[test]
  fn nested_names_collide_within_enclosing_only() {
    let mut model = ClassModel::new();
    let outer = model.declare("p", "Outer", TypeKind::Class);
    model.declare_nested(outer, "Builder", TypeKind::Class);
    assert!(model.is_nested_name_taken(outer, "builder"));
    assert!(!model.is_name_taken("p", "Builder"));
  }

  #[test]
  fn ancestor_chain_walks_defined_supertypes() {
    let mut model = ClassModel::new();
    let base = model.declare("p", "Base", TypeKind::Class);
    model.set_supertype(base, JavaType::object());
    let child = model.declare("p", "Child", TypeKind::Class);
    model.set_supertype(child, JavaType::Defined(base));

    let chain = model.ancestor_chain(&JavaType::Defined(child));
    assert_eq!(
      chain,
      vec![JavaType::object(), JavaType::Defined(base), JavaType::Defined(child)]
    );
  }

  #[test]
  fn ancestor_chain_for_primitives_is_object_only() {
    let model = ClassModel::new();
    let chain = model.ancestor_chain(&JavaType::Primitive(super::super::types::JavaPrimitive::Int));
    assert_eq!(chain, vec![JavaType::object()]);
  }
}
