//! Recursive classification of JSON values into [`TypeNode`] trees.
//!
//! An array is read as a sample of its element type: per-property evidence
//! for object elements is pooled across the whole sample, which is what
//! makes positional tuple shapes and small string enums detectable at all.
//! Every shape maps to some node; past the complexity cap the result
//! degrades to `Json` instead of failing.

use indexmap::IndexMap;
use rand::Rng;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::debug;

use crate::merge::{cap_union, merge};
use crate::node::{ArrayType, EnumType, ObjectType, TupleType, TypeNode, ValueKind};
use crate::sample::{SAMPLE_CAP, sample};

// ------------------------------- Policy ---------------------------------- //

const ENUM_VALUE_LIMIT: usize = 8; // distinct literals a string enum may hold
const ENUM_PROBE_LIMIT: usize = 9; // stop collecting once this many are seen
const ENUM_LITERAL_MAX_LEN: usize = 15; // longest literal eligible for an enum

enum Class {
    Primitive(ValueKind),
    Array,
    Object,
}

fn classify(value: &Value) -> Class {
    match value {
        Value::Null => Class::Primitive(ValueKind::Null),
        Value::Bool(_) => Class::Primitive(ValueKind::Boolean),
        Value::Number(_) => Class::Primitive(ValueKind::Number),
        Value::String(_) => Class::Primitive(ValueKind::String),
        Value::Array(_) => Class::Array,
        Value::Object(_) => Class::Object,
    }
}

// ------------------------------- Parser ---------------------------------- //

/// Classify one JSON value under a context key.
pub fn parse<R: Rng>(value: &Value, context: &str, rng: &mut R) -> TypeNode {
    match value {
        Value::Array(items) => {
            let elements: Vec<&Value> = items.iter().collect();
            parse_elements(&elements, context, rng)
        }
        Value::Object(map) => TypeNode::Object(parse_single_object(map, context, rng)),
        other => match classify(other) {
            Class::Primitive(kind) => TypeNode::Value(kind),
            // unreachable: arrays and objects matched above
            _ => TypeNode::Json,
        },
    }
}

/// Classify a collection of observed values as one array slot.
fn parse_elements<R: Rng>(elements: &[&Value], context: &str, rng: &mut R) -> TypeNode {
    if elements.is_empty() {
        return TypeNode::Array(ArrayType { members: Vec::new() });
    }
    let picked = sample(elements.to_vec(), rng);
    let full_sample = picked.len() == SAMPLE_CAP;

    let has_object = picked.iter().any(|v| v.is_object());
    let has_array = picked.iter().any(|v| v.is_array());
    let has_primitive = picked.iter().any(|v| !v.is_object() && !v.is_array());

    if !has_object && !has_array {
        let mut members: Vec<TypeNode> = Vec::new();
        for &value in &picked {
            if let Class::Primitive(kind) = classify(value) {
                if !members.iter().any(|n| matches!(n, TypeNode::Value(k) if *k == kind)) {
                    members.push(TypeNode::Value(kind));
                }
            }
        }
        cap_union(&mut members);
        return TypeNode::Array(ArrayType { members });
    }

    if !has_object && !has_primitive {
        return TypeNode::Array(ArrayType { members: vec![nested_array_member(&picked)] });
    }

    if has_object && !has_primitive && !has_array {
        let representative = parse_object_sample(&picked, full_sample, context, rng);
        return TypeNode::Array(ArrayType { members: vec![TypeNode::Object(representative)] });
    }

    // heterogeneous sample: primitives, arrays, and objects in any mix
    TypeNode::Array(ArrayType { members: mixed_union(&picked, context, rng) })
}

/// Union for a heterogeneous sample (any mix of primitives, arrays, and
/// objects): object results are folded together through the merger first,
/// then array elements, then one entry per distinct primitive kind.
fn mixed_union<R: Rng>(picked: &[&Value], context: &str, rng: &mut R) -> Vec<TypeNode> {
    let mut members: Vec<TypeNode> = Vec::new();
    for &value in picked {
        if let Value::Object(map) = value {
            fold_member(&mut members, TypeNode::Object(parse_single_object(map, context, rng)));
        }
    }
    for &value in picked {
        if let Value::Array(items) = value {
            let elements: Vec<&Value> = items.iter().collect();
            fold_member(&mut members, parse_elements(&elements, context, rng));
        }
    }
    let mut kinds: Vec<ValueKind> = Vec::new();
    for &value in picked {
        if let Class::Primitive(kind) = classify(value) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
    }
    for kind in kinds {
        fold_member(&mut members, TypeNode::Value(kind));
    }
    members
}

fn fold_member(members: &mut Vec<TypeNode>, node: TypeNode) {
    if members.is_empty() {
        members.push(node);
    } else {
        merge(members, vec![node]);
    }
}

/// The member shape of a slot whose every observed value is an array.
///
/// One shared non-zero length with one consistent primitive kind per
/// position proves a tuple. Anything else degrades: primitive-only nesting
/// becomes an array of the leaf kinds, and nesting that hides objects
/// becomes an array of `Json`.
fn nested_array_member(arrays: &[&Value]) -> TypeNode {
    let subs: Vec<&[Value]> = arrays
        .iter()
        .filter_map(|v| v.as_array().map(Vec::as_slice))
        .collect();

    let len = subs.first().map_or(0, |s| s.len());
    if len > 0 && subs.iter().all(|s| s.len() == len) {
        if let Some(positional) = positional_kinds(&subs, len) {
            return TypeNode::Tuple(TupleType { elems: positional });
        }
    }

    let mut kinds: Vec<ValueKind> = Vec::new();
    let mut saw_object = false;
    for sub in &subs {
        for value in *sub {
            scan_leaves(value, &mut kinds, &mut saw_object);
        }
    }
    if saw_object {
        return TypeNode::Array(ArrayType { members: vec![TypeNode::Json] });
    }
    let mut members: Vec<TypeNode> = kinds.into_iter().map(TypeNode::Value).collect();
    cap_union(&mut members);
    TypeNode::Array(ArrayType { members })
}

fn positional_kinds(subs: &[&[Value]], len: usize) -> Option<Vec<ValueKind>> {
    let mut positional = Vec::with_capacity(len);
    for i in 0..len {
        let mut kind: Option<ValueKind> = None;
        for sub in subs {
            match classify(&sub[i]) {
                Class::Primitive(k) => match kind {
                    None => kind = Some(k),
                    Some(existing) if existing == k => {}
                    Some(_) => return None,
                },
                _ => return None,
            }
        }
        positional.push(kind?);
    }
    Some(positional)
}

fn scan_leaves(value: &Value, kinds: &mut Vec<ValueKind>, saw_object: &mut bool) {
    match value {
        Value::Object(_) => *saw_object = true,
        Value::Array(items) => {
            for item in items {
                scan_leaves(item, kinds, saw_object);
            }
        }
        other => {
            if let Class::Primitive(kind) = classify(other) {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
        }
    }
}

/// Representative object for a sample of object values.
///
/// Each property's union comes from classifying its observed values
/// together; a key missing from part of the sample gains the optional
/// marker once. Enum detection runs only over a full sample.
fn parse_object_sample<R: Rng>(
    sampled: &[&Value],
    full_sample: bool,
    context: &str,
    rng: &mut R,
) -> ObjectType {
    let total = sampled.len();
    let mut observed: IndexMap<String, Vec<&Value>> = IndexMap::new();
    for &value in sampled {
        if let Some(map) = value.as_object() {
            for (key, item) in map {
                observed.entry(key.clone()).or_default().push(item);
            }
        }
    }

    let mut properties: IndexMap<String, Vec<TypeNode>> = IndexMap::new();
    for (key, values) in &observed {
        let parsed = parse_elements(values, key, rng);
        let mut union = match parsed {
            TypeNode::Array(array) => array.members,
            other => vec![other],
        };
        if values.len() < total {
            union.push(TypeNode::Undefined);
        }
        properties.insert(key.clone(), union);
    }

    if full_sample {
        upgrade_string_enums(&mut properties, &observed);
    }

    ObjectType { key: context.to_string(), properties }
}

/// A plain-string property over a full sample becomes a literal enum when
/// few enough short literals were observed.
fn upgrade_string_enums(
    properties: &mut IndexMap<String, Vec<TypeNode>>,
    observed: &IndexMap<String, Vec<&Value>>,
) {
    for (key, union) in properties.iter_mut() {
        let plain_string =
            union.len() == 1 && matches!(union[0], TypeNode::Value(ValueKind::String));
        if !plain_string {
            continue;
        }
        let Some(values) = observed.get(key) else { continue };
        let mut literals: BTreeSet<String> = BTreeSet::new();
        let mut eligible = true;
        for value in values {
            if let Some(text) = value.as_str() {
                if text.chars().count() > ENUM_LITERAL_MAX_LEN {
                    eligible = false;
                    break;
                }
                literals.insert(text.to_string());
                if literals.len() >= ENUM_PROBE_LIMIT {
                    break;
                }
            }
        }
        if eligible && !literals.is_empty() && literals.len() <= ENUM_VALUE_LIMIT {
            debug!(property = %key, distinct = literals.len(), "string property upgraded to literal enum");
            *union = vec![TypeNode::Enum(EnumType { key: key.clone(), values: literals })];
        }
    }
}

fn parse_single_object<R: Rng>(map: &Map<String, Value>, context: &str, rng: &mut R) -> ObjectType {
    let mut properties = IndexMap::new();
    for (key, value) in map {
        properties.insert(key.clone(), vec![parse(value, key, rng)]);
    }
    ObjectType { key: context.to_string(), properties }
}
