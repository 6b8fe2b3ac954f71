use std::sync::LazyLock;

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

use super::reserved::is_reserved;

static ILLEGAL_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9a-zA-Z_$]").unwrap());

/// Replaces every character that is not legal in a Java identifier with an
/// underscore, one for one. Non-ASCII input is transliterated first so
/// accented letters survive as letters instead of underscores.
pub(crate) fn replace_illegal_characters(input: &str) -> String {
  let ascii = any_ascii(input);
  ILLEGAL_CHARS_RE.replace_all(&ascii, "_").into_owned()
}

/// Capitalizes the character following each word delimiter and drops the
/// delimiters, leaving the first character untouched. A name without any
/// delimiter passes through unchanged.
pub(crate) fn capitalize_trailing_words(name: &str, delimiters: &[char]) -> String {
  if !name.contains(|c| delimiters.contains(&c)) {
    return name.to_string();
  }

  let mut out = String::with_capacity(name.len());
  let mut capitalize_next = false;
  for (i, ch) in name.chars().enumerate() {
    if delimiters.contains(&ch) {
      capitalize_next = true;
      continue;
    }
    if i == 0 {
      out.push(ch);
    } else if capitalize_next {
      out.extend(ch.to_uppercase());
    } else {
      out.push(ch);
    }
    capitalize_next = false;
  }
  out
}

/// Derives a field name from a raw JSON property name.
///
/// Word delimiters become camel-case humps, illegal characters become
/// underscores, a leading digit gets an underscore prefix, and reserved
/// words are escaped by prepending an underscore.
pub(crate) fn to_property_name(json_name: &str, delimiters: &[char]) -> String {
  let mut name = replace_illegal_characters(json_name);
  name = capitalize_trailing_words(&name, delimiters);
  if name.is_empty() {
    return String::from("__EMPTY__");
  }
  if name.starts_with(|c: char| c.is_ascii_digit()) {
    name.insert(0, '_');
  }
  if is_reserved(&name) {
    name.insert(0, '_');
  }
  if is_reserved(&name) {
    name.push('_');
  }
  name
}

/// Derives a class name from a node name. The name is sanitized and
/// capitalized on its own so the configured prefix and suffix never
/// swallow its leading capital.
pub(crate) fn to_class_name(node_name: &str, prefix: Option<&str>, suffix: Option<&str>, delimiters: &[char]) -> String {
  let mut name = replace_illegal_characters(node_name);
  name = capitalize_trailing_words(&name, delimiters);
  let mut full = format!(
    "{}{}{}",
    prefix.map(replace_illegal_characters).unwrap_or_default(),
    capitalize_first(&name),
    suffix.map(replace_illegal_characters).unwrap_or_default(),
  );
  if full.is_empty() {
    return String::from("__EMPTY__");
  }
  if full.starts_with(|c: char| c.is_ascii_digit()) {
    full.insert(0, '_');
  }
  full
}

/// Derives an upper-snake enum constant name from a backing value.
/// Unusable input maps to the `__EMPTY__` sentinel.
pub(crate) fn to_constant_name(value: &str) -> String {
  let ascii = any_ascii(value);
  let cleaned = ILLEGAL_CHARS_RE.replace_all(&ascii, " ");
  let mut name = cleaned.trim().to_constant_case();
  if name.is_empty() {
    return String::from("__EMPTY__");
  }
  if name.starts_with(|c: char| c.is_ascii_digit()) {
    name.insert(0, '_');
  }
  name
}

/// Appends underscores until the candidate passes the caller's taken
/// check. Collision policy is the caller's; this only applies the suffix.
pub(crate) fn make_unique(base: &str, mut taken: impl FnMut(&str) -> bool) -> String {
  let mut name = base.to_string();
  while taken(&name) {
    name.push('_');
  }
  name
}

/// Getter name for a property, using the `is` prefix for booleans.
/// `getClass` collides with `java.lang.Object` and is escaped.
pub(crate) fn getter_name(property: &str, is_boolean: bool) -> String {
  let prefix = if is_boolean { "is" } else { "get" };
  let name = format!("{prefix}{}", accessor_stem(property));
  if name == "getClass" {
    return String::from("getClass_");
  }
  name
}

pub(crate) fn setter_name(property: &str) -> String {
  let name = format!("set{}", accessor_stem(property));
  if name == "setClass" {
    return String::from("setClass_");
  }
  name
}

pub(crate) fn builder_method_name(property: &str) -> String {
  format!("with{}", accessor_stem(property))
}

/// Singular form of a property name, for naming the element type of an
/// array property.
pub(crate) fn singularize(name: &str) -> String {
  cruet::to_singular(name)
}

/// Capitalized form of a property for accessor names. A property whose
/// second character is already uppercase keeps its first character as-is,
/// matching the bean-spec treatment of names like `xIndex`.
fn accessor_stem(property: &str) -> String {
  let second_is_upper = property.chars().nth(1).is_some_and(|c| c.is_ascii_uppercase());
  if second_is_upper {
    property.to_string()
  } else {
    capitalize_first(property)
  }
}

fn capitalize_first(name: &str) -> String {
  let mut chars = name.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
  }
}
