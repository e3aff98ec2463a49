use ahash::RandomState;
use dashmap::DashSet;
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

static REGISTRY: Lazy<TokenRegistry> = Lazy::new(TokenRegistry::new);

/// Process-wide set of interned token texts. Entries are never removed, so a
/// `Token` can compare and hash by the address of its backing allocation.
/// The set is sharded, so interning one text only locks the shard it hashes
/// to.
#[derive(Debug)]
struct TokenRegistry {
  texts: DashSet<Arc<str>, RandomState>,
  empty: Arc<str>,
}

impl TokenRegistry {
  fn new() -> Self {
    let empty: Arc<str> = Arc::from("");
    let texts = DashSet::with_hasher(RandomState::new());
    texts.insert(empty.clone());
    Self { texts, empty }
  }

  fn intern(&self, text: &str) -> Arc<str> {
    if text.is_empty() {
      return self.empty.clone();
    }
    if let Some(existing) = self.texts.get(text) {
      return existing.key().clone();
    }

    let interned: Arc<str> = Arc::from(text);
    if self.texts.insert(interned.clone()) {
      return interned;
    }
    // Another thread interned the same text after our lookup; entries are
    // never removed, so the second lookup always finds it.
    self
      .texts
      .get(text)
      .map(|existing| existing.key().clone())
      .unwrap_or(interned)
  }

  fn len(&self) -> usize {
    self.texts.len()
  }
}

/// An interned identifier, such as a type name or a trait name.
///
/// Tokens with equal text always share one allocation, so equality and
/// hashing are O(1) pointer operations. Ordering compares the text and is
/// therefore stable across runs.
#[derive(Clone)]
pub struct Token(Arc<str>);

impl Token {
  pub fn new(text: &str) -> Self {
    Self(REGISTRY.intern(text))
  }

  pub fn empty() -> Self {
    Self(REGISTRY.empty.clone())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Number of distinct texts interned so far in this process, including the
  /// empty text.
  pub fn registered_count() -> usize {
    REGISTRY.len()
  }

  pub(crate) fn as_arc(&self) -> &Arc<str> {
    &self.0
  }

  fn addr(&self) -> usize {
    Arc::as_ptr(&self.0) as *const u8 as usize
  }
}

impl Default for Token {
  fn default() -> Self {
    Self::empty()
  }
}

impl PartialEq for Token {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

impl Eq for Token {}

impl Hash for Token {
  fn hash<H: Hasher>(&self, state: &mut H) {
    state.write_usize(self.addr());
  }
}

impl PartialOrd for Token {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Token {
  fn cmp(&self, other: &Self) -> Ordering {
    if self == other {
      return Ordering::Equal;
    }
    self.as_str().cmp(other.as_str())
  }
}

impl AsRef<str> for Token {
  fn as_ref(&self) -> &str {
    self.as_str()
  }
}

impl From<&str> for Token {
  fn from(text: &str) -> Self {
    Self::new(text)
  }
}

impl From<String> for Token {
  fn from(text: String) -> Self {
    Self::new(&text)
  }
}

impl fmt::Debug for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Token({:?})", self.as_str())
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for Token {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for Token {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let text = String::deserialize(deserializer)?;
    Ok(Self::new(&text))
  }
}
