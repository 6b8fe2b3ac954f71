use bon::Builder;

/// Strategy used when a schema node carries `oneOf`.
///
/// The two shipped behaviors are not reconcilable into one algorithm, so the
/// choice is a configuration switch rather than a heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OneOfStrategy {
  /// Synthesize a marker interface implemented by every object-like branch,
  /// wiring discriminator metadata to the annotator when present.
  #[default]
  MarkerInterface,
  /// Resolve every branch independently and type the slot as the nearest
  /// common ancestor of the branch types (legacy behavior).
  CommonAncestor,
}

/// Read-only knob set consulted by every rule.
///
/// Every rule receives the whole config and picks the toggles it cares
/// about; no rule ever mutates it. Defaults mirror the conventional
/// generator defaults (boxed types, getters/setters, no builders).
#[derive(Debug, Clone, Builder)]
pub struct GenerationConfig {
  /// Package generated top-level types are declared in.
  #[builder(default = String::from("com.example"), into)]
  pub target_package: String,

  /// Generate builder methods (`withFoo`) alongside setters.
  #[builder(default = false)]
  pub generate_builders: bool,

  /// Scaffold a nested `Builder` class instead of chainable `with` methods
  /// on the generated class itself. Only consulted when `generate_builders`
  /// is set.
  #[builder(default = false)]
  pub use_inner_class_builders: bool,

  #[builder(default = true)]
  pub include_getters: bool,

  #[builder(default = true)]
  pub include_setters: bool,

  /// Use unboxed primitives (`int`, `boolean`) where the schema allows it.
  #[builder(default = false)]
  pub use_primitives: bool,

  /// Map `integer` to `Long` instead of `Integer`.
  #[builder(default = false)]
  pub use_long_integers: bool,

  /// Map `integer` to `BigInteger`; wins over `use_long_integers`.
  #[builder(default = false)]
  pub use_big_integers: bool,

  /// Map `number` to `Double` instead of `Float`.
  #[builder(default = true)]
  pub use_double_numbers: bool,

  /// Map `number` to `BigDecimal`; wins over `use_double_numbers`.
  #[builder(default = false)]
  pub use_big_decimals: bool,

  /// Map date-time formats to Joda `DateTime` instead of `java.util.Date`.
  #[builder(default = false)]
  pub use_joda_dates: bool,

  /// Prefer a schema's `title` over the property name when naming the
  /// generated class.
  #[builder(default = false)]
  pub use_title_as_classname: bool,

  #[builder(default = true)]
  pub include_hashcode_and_equals: bool,

  #[builder(default = true)]
  pub include_to_string: bool,

  #[builder(default = false)]
  pub include_constructors: bool,

  /// When constructors are generated, only accept required properties
  /// instead of all properties.
  #[builder(default = false)]
  pub constructors_required_properties_only: bool,

  #[builder(default = true)]
  pub include_additional_properties: bool,

  /// Initialize collection fields with an empty collection when no default
  /// is supplied.
  #[builder(default = true)]
  pub initialize_collections: bool,

  /// Collapse structurally identical schemas onto one generated type by
  /// content hash. Opt-in because it changes generated-type identity.
  #[builder(default = false)]
  pub deduplicate: bool,

  #[builder(default)]
  pub one_of_strategy: OneOfStrategy,

  /// Characters treated as word boundaries in property names.
  #[builder(default = String::from("- _"), into)]
  pub property_word_delimiters: String,

  /// Characters used to split `$ref` fragment paths into segments. Some
  /// schema dialects use non-standard pointer separators.
  #[builder(default = String::from("#/."), into)]
  pub ref_fragment_path_delimiters: String,

  #[builder(into)]
  pub class_name_prefix: Option<String>,

  #[builder(into)]
  pub class_name_suffix: Option<String>,

  /// Mark generated classes serializable.
  #[builder(default = false)]
  pub serializable: bool,

  /// Hard cap on `$ref`/nesting recursion. A non-converging reference
  /// chain fails with `DepthExceeded` instead of exhausting the stack.
  #[builder(default = 128)]
  pub max_ref_depth: usize,
}

impl Default for GenerationConfig {
  fn default() -> Self {
    GenerationConfig::builder().build()
  }
}

impl GenerationConfig {
  pub(crate) fn word_delimiters(&self) -> Vec<char> {
    self.property_word_delimiters.chars().collect()
  }
}
