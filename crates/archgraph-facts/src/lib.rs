//! # archgraph-facts
//!
//! Structural-fact model for the archgraph engine.
//!
//! The engine never parses source text. An external analyzer (an IDE index,
//! a compiler plugin, a test fixture) implements [`FactSource`] and hands the
//! engine an ordered stream of per-file facts: declared classes, declared
//! methods, and call sites. This crate defines those records and nothing else,
//! so the engine can be exercised with synthetic streams independent of any
//! host environment.
//!
//! ## Example
//!
//! ```
//! use archgraph_facts::{ClassFact, FactSource, FileFacts, MemoryFactSource, MethodFact};
//!
//! let mut file = FileFacts::new("src/OrderService.java");
//! file.add_class(ClassFact::new("com.shop.OrderService").with_annotation("Service"));
//! file.add_method(MethodFact::new("com.shop.OrderService", "placeOrder"));
//!
//! let source = MemoryFactSource::new().with_file(file);
//! assert_eq!(source.files().len(), 1);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod entities;
pub mod errors;
pub mod memory;
pub mod traits;

pub use entities::{CallSiteFact, Callee, ClassFact, ExpressionShape, FileFacts, MethodFact};
pub use errors::{FactError, FactResult};
pub use memory::MemoryFactSource;
pub use traits::FactSource;
