use crate::key::SEPARATOR;
use crate::token::Token;
use std::fmt;

/// A value the cache can intern.
///
/// The cache builds descriptors speculatively and may drop one that lost an
/// insertion race, so `construct` should be free of side effects other than
/// allocation.
pub trait Descriptor {
  fn construct(base_type: &Token, traits: Vec<Token>) -> Self;

  /// The descriptor for "no base type, no traits".
  fn empty() -> Self;
}

/// Immutable description of a base type plus its ordered, applied traits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeInfo {
  base_type: Token,
  traits: Box<[Token]>,
}

impl TypeInfo {
  pub fn new(base_type: Token, traits: Vec<Token>) -> Self {
    Self {
      base_type,
      traits: traits.into_boxed_slice(),
    }
  }

  pub fn base_type(&self) -> &Token {
    &self.base_type
  }

  pub fn traits(&self) -> &[Token] {
    &self.traits
  }

  pub fn has_trait(&self, name: &Token) -> bool {
    self.traits.contains(name)
  }

  pub fn is_empty(&self) -> bool {
    self.base_type.is_empty() && self.traits.is_empty()
  }
}

impl Descriptor for TypeInfo {
  fn construct(base_type: &Token, traits: Vec<Token>) -> Self {
    Self::new(base_type.clone(), traits)
  }

  fn empty() -> Self {
    Self::new(Token::empty(), Vec::new())
  }
}

impl fmt::Display for TypeInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.base_type.as_str())?;
    for name in self.traits.iter() {
      write!(f, "{SEPARATOR}{name}")?;
    }
    Ok(())
  }
}
