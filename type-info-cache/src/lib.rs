#![deny(missing_debug_implementations)]

//! Concurrent interning of composite type descriptors.
//!
//! A descriptor is a base type name plus an ordered list of applied trait
//! names. [`TypeInfoCache`] guarantees that each distinct combination maps to
//! exactly one live descriptor, so descriptors can be compared by identity.
//! Trait order is significant: `Mesh` with `[A, B]` and `Mesh` with `[B, A]`
//! are different descriptors.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use type_info_cache::{Token, TypeInfoCache};
//!
//! let cache: TypeInfoCache = TypeInfoCache::new();
//! let mesh = Token::new("Mesh");
//! let a = cache.find_or_create(&mesh, vec![Token::new("Collision")]);
//! let b = cache.find_or_create(&mesh, vec![Token::new("Collision")]);
//! assert!(Arc::ptr_eq(&a, &b));
//! assert_eq!(a.to_string(), "Mesh,Collision");
//!
//! let empty = cache.find_or_create(&Token::empty(), Vec::new());
//! assert!(Arc::ptr_eq(&empty, &cache.empty_type_info()));
//! ```

mod cache;
mod error;
mod info;
mod key;
mod options;
mod stats;
mod token;

pub use cache::TypeInfoCache;
pub use error::ConfigError;
pub use info::Descriptor;
pub use info::TypeInfo;
pub use key::TypeInfoKey;
pub use key::SEPARATOR;
pub use options::CacheConfig;
pub use stats::CacheStats;
pub use token::Token;
