//! Stable, deduplicated names for generated declarations.
//!
//! All state lives in one [`NameAllocator`] owned by the per-run front API;
//! two concurrent runs never share a table. Identical rendered bodies reuse
//! the first allocated name, so a shape inferred twice under different
//! context keys yields one declaration.

use inflector::Inflector;
use rand::Rng;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::error::{Error, Result};
use crate::words::WORD_BANK;

/// Upper bound on word-bank draws before allocation gives up.
const MAX_ATTEMPTS: usize = 100;

#[derive(Debug, Default)]
pub struct NameAllocator {
    used: BTreeSet<String>,
    by_body: HashMap<String, String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a name as taken before inference runs, so generated names never
    /// collide with declarations the caller already owns.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.used.insert(name.into());
    }

    /// Resolve the name for a declaration body rendered under `context`.
    ///
    /// A body seen before returns its recorded name. Otherwise the base
    /// identifier is the singular, capitalized context key; if taken, a
    /// random word from the bank is prepended until an unused candidate
    /// appears, up to [`MAX_ATTEMPTS`] draws.
    pub fn allocate<R: Rng>(&mut self, rng: &mut R, context: &str, body: &str) -> Result<String> {
        if let Some(existing) = self.by_body.get(body) {
            return Ok(existing.clone());
        }
        let base = base_identifier(context);
        if self.used.insert(base.clone()) {
            self.by_body.insert(body.to_string(), base.clone());
            return Ok(base);
        }
        for _ in 0..MAX_ATTEMPTS {
            let word = WORD_BANK[rng.gen_range(0..WORD_BANK.len())];
            let candidate = format!("{word}{base}");
            if self.used.insert(candidate.clone()) {
                debug!(context, name = %candidate, "base name taken, disambiguated");
                self.by_body.insert(body.to_string(), candidate.clone());
                return Ok(candidate);
            }
        }
        Err(Error::NameAllocationExhausted {
            context: context.to_string(),
            attempts: MAX_ATTEMPTS,
        })
    }
}

/// Singular, capitalized identifier derived from a context key.
fn base_identifier(context: &str) -> String {
    capitalize(&context.to_singular())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn base_is_singular_and_capitalized() {
        assert_eq!(base_identifier("posts"), "Post");
        assert_eq!(base_identifier("category"), "Category");
        assert_eq!(base_identifier("weight_classes"), "Weight_class");
    }

    #[test]
    fn identical_bodies_share_one_name() {
        let mut names = NameAllocator::new();
        let mut rng = StdRng::seed_from_u64(1);
        let first = names.allocate(&mut rng, "home", "{ lat: number; }").unwrap();
        let second = names.allocate(&mut rng, "work", "{ lat: number; }").unwrap();
        assert_eq!(first, "Home");
        assert_eq!(second, "Home");
    }

    #[test]
    fn taken_base_gets_a_word_prefix() {
        let mut names = NameAllocator::new();
        let mut rng = StdRng::seed_from_u64(7);
        let first = names.allocate(&mut rng, "item", "{ a: string; }").unwrap();
        let second = names.allocate(&mut rng, "item", "{ b: number; }").unwrap();
        assert_eq!(first, "Item");
        assert_ne!(second, "Item");
        assert!(second.ends_with("Item"));
        assert!(WORD_BANK.iter().any(|w| second == format!("{w}Item")));
    }

    #[test]
    fn reserved_names_are_never_reused() {
        let mut names = NameAllocator::new();
        names.reserve("User");
        let mut rng = StdRng::seed_from_u64(3);
        let name = names.allocate(&mut rng, "users", "{ id: number; }").unwrap();
        assert_ne!(name, "User");
        assert!(name.ends_with("User"));
    }

    #[test]
    fn exhausting_every_candidate_is_fatal() {
        let mut names = NameAllocator::new();
        names.reserve("Item");
        for word in WORD_BANK {
            names.reserve(format!("{word}Item"));
        }
        let mut rng = StdRng::seed_from_u64(11);
        let err = names.allocate(&mut rng, "item", "{ a: string; }").unwrap_err();
        assert!(matches!(err, Error::NameAllocationExhausted { .. }));
    }

    #[test]
    fn separate_allocators_do_not_share_state() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut first = NameAllocator::new();
        let mut second = NameAllocator::new();
        assert_eq!(first.allocate(&mut rng, "tag", "{ a: string; }").unwrap(), "Tag");
        assert_eq!(second.allocate(&mut rng, "tag", "{ b: number; }").unwrap(), "Tag");
    }
}
