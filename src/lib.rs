//! Compact structural type inference over sampled JSON values.
//!
//! Feed one JSON value tree in (an array is read as a sample of its element
//! type), get back the root's inline type expression plus a flat,
//! deduplicated list of named declarations for every object and enum shape
//! the tree contains. Used to generate typed accessors for otherwise
//! untyped JSON data columns.
//!
//! Nondeterminism lives in exactly two places, element sampling and name
//! disambiguation, and both draw from the random source injected into
//! [`Inference`], so a seeded run is fully reproducible:
//!
//! ```
//! use json_shape::Inference;
//! use serde_json::json;
//!
//! let mut inference = Inference::seeded(7);
//! let value = json!([{ "lat": 1.5, "lng": 2.5 }, { "lat": 3.0, "lng": 4.0 }]);
//! let inferred = inference.infer(&value, "points").unwrap();
//! assert_eq!(inferred.expression, "Point[]");
//! assert_eq!(inferred.declarations.len(), 1);
//! ```

pub mod cli;
pub mod error;
pub mod merge;
pub mod naming;
pub mod node;
pub mod parse;
pub mod render;
pub mod sample;
pub mod words;

pub use error::{Error, Result};
pub use node::{ArrayType, EnumType, NodeKind, ObjectType, TupleType, TypeNode, ValueKind};
pub use render::{Declaration, dedup_declarations};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::naming::NameAllocator;

/// One inference run: the injected random source plus the naming state
/// (used identifiers, body-to-name table). Concurrent runs each own their
/// own instance; nothing is shared ambiently.
pub struct Inference<R: Rng = StdRng> {
    rng: R,
    names: NameAllocator,
}

impl Inference<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible run: the same seed over the same input yields identical
    /// trees and identical rendered output.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Inference<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Inference<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, names: NameAllocator::new() }
    }

    /// Mark an identifier as taken so generated names never collide with
    /// declarations the caller already owns.
    pub fn reserve_name(&mut self, name: impl Into<String>) {
        self.names.reserve(name);
    }

    /// Classify a value into its inferred tree without rendering.
    pub fn parse(&mut self, value: &Value, context: &str) -> TypeNode {
        parse::parse(value, context, &mut self.rng)
    }

    /// Classify and render: the root's inline expression plus the
    /// name-deduplicated declarations for every named shape beneath it.
    pub fn infer(&mut self, value: &Value, context: &str) -> Result<Inferred> {
        let root = self.parse(value, context);
        let expression = root.expression(&mut self.names, &mut self.rng)?;
        let mut declarations = Vec::new();
        root.declarations(&mut self.names, &mut self.rng, &mut declarations)?;
        let declarations = dedup_declarations(declarations);
        debug!(context, root = %expression, declarations = declarations.len(), "inference complete");
        Ok(Inferred { expression, declarations })
    }
}

/// Rendered result of one inference: ready for a downstream consumer to
/// persist or splice into generated accessor code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inferred {
    pub expression: String,
    pub declarations: Vec<Declaration>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_roots_have_no_declarations() {
        let mut inference = Inference::seeded(1);
        let inferred = inference.infer(&json!("hello"), "value").unwrap();
        assert_eq!(inferred.expression, "string");
        assert!(inferred.declarations.is_empty());
    }

    #[test]
    fn reserved_names_push_generated_ones_aside() {
        let mut inference = Inference::seeded(2);
        inference.reserve_name("Item");
        let inferred = inference.infer(&json!([{ "a": 1 }]), "items").unwrap();
        assert_ne!(inferred.expression, "Item[]");
        assert!(inferred.expression.ends_with("Item[]"));
    }

    #[test]
    fn separate_runs_reuse_base_names_independently() {
        let value = json!([{ "a": 1 }]);
        let first = Inference::seeded(3).infer(&value, "items").unwrap();
        let second = Inference::seeded(4).infer(&value, "items").unwrap();
        assert_eq!(first.expression, "Item[]");
        assert_eq!(second.expression, "Item[]");
    }
}
