use crate::token::Token;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Separator placed before each trait name in a composite key. It never
/// appears inside a well-formed identifier.
pub const SEPARATOR: char = ',';

/// Order-sensitive key addressing a [`TypeInfoCache`](crate::TypeInfoCache).
///
/// Without traits the key shares the base type token's text. Otherwise it is
/// the base type followed by each trait, each preceded by [`SEPARATOR`], so
/// `("Mesh", ["A", "B"])` becomes `Mesh,A,B` and `("", ["A"])` becomes `,A`.
///
/// Composite keys own their text and are not interned, so building one never
/// touches the process-wide token registry.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeInfoKey(Arc<str>);

impl TypeInfoKey {
  pub fn new(base_type: &Token, traits: &[Token]) -> Self {
    if traits.is_empty() {
      return Self(base_type.as_arc().clone());
    }
    Self(Arc::from(compose(base_type, traits)))
  }

  pub fn empty() -> Self {
    Self(Token::empty().as_arc().clone())
  }

  /// Whether this is the key for "no base type, no traits".
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

fn compose(base_type: &Token, traits: &[Token]) -> String {
  let len = base_type.len()
    + traits.len() * SEPARATOR.len_utf8()
    + traits.iter().map(Token::len).sum::<usize>();
  let mut text = String::with_capacity(len);
  text.push_str(base_type.as_str());
  for name in traits {
    text.push(SEPARATOR);
    text.push_str(name.as_str());
  }
  text
}

impl Default for TypeInfoKey {
  fn default() -> Self {
    Self::empty()
  }
}

impl Borrow<str> for TypeInfoKey {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for TypeInfoKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeInfoKey({:?})", self.as_str())
  }
}

impl fmt::Display for TypeInfoKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
