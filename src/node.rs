// Inferred type tree. No serde_json::Value beyond this point.

use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Primitive JSON kinds. `null` is its own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Null,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Null => "null",
        }
    }
}

/// One inferred shape. A `Vec<TypeNode>` is a union: the set of possible
/// shapes for one logical slot (an array's elements or an object property).
#[derive(Debug, Clone)]
pub enum TypeNode {
    Value(ValueKind),
    Enum(EnumType),
    Tuple(TupleType),
    Array(ArrayType),
    Object(ObjectType),
    /// Marks an optional object property; never rendered directly.
    Undefined,
    /// Untyped escape hatch for shapes past the complexity cap.
    Json,
}

/// Small set of observed string literals, named after its context key.
#[derive(Debug, Clone)]
pub struct EnumType {
    pub key: String,
    pub values: BTreeSet<String>,
}

/// Fixed-arity positional array of primitives.
#[derive(Debug, Clone)]
pub struct TupleType {
    pub elems: Vec<ValueKind>,
}

/// Variable-length array; `members` is the element union.
#[derive(Debug, Clone)]
pub struct ArrayType {
    pub members: Vec<TypeNode>,
}

/// Named object shape. Property order is first-observation order; rendering
/// sorts by name so equal shapes produce identical bodies.
#[derive(Debug, Clone)]
pub struct ObjectType {
    pub key: String,
    pub properties: IndexMap<String, Vec<TypeNode>>,
}

/// Variant discriminant, used by the merge rules to decide whether a union
/// already represents a given kind of shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Value,
    Enum,
    Tuple,
    Array,
    Object,
    Undefined,
    Json,
}

impl TypeNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            TypeNode::Value(_) => NodeKind::Value,
            TypeNode::Enum(_) => NodeKind::Enum,
            TypeNode::Tuple(_) => NodeKind::Tuple,
            TypeNode::Array(_) => NodeKind::Array,
            TypeNode::Object(_) => NodeKind::Object,
            TypeNode::Undefined => NodeKind::Undefined,
            TypeNode::Json => NodeKind::Json,
        }
    }

    /// True for `Array` and `Tuple`, which compete for the same slot during
    /// reconciliation.
    pub fn is_array_like(&self) -> bool {
        matches!(self, TypeNode::Array(_) | TypeNode::Tuple(_))
    }
}

/// Set-coverage equality for unions: every member on each side has an equal
/// counterpart on the other side, independent of order or duplication.
pub fn union_eq(a: &[TypeNode], b: &[TypeNode]) -> bool {
    a.iter().all(|x| b.iter().any(|y| x == y)) && b.iter().all(|y| a.iter().any(|x| x == y))
}

impl PartialEq for TypeNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeNode::Value(a), TypeNode::Value(b)) => a == b,
            (TypeNode::Enum(a), TypeNode::Enum(b)) => a.values == b.values,
            (TypeNode::Tuple(a), TypeNode::Tuple(b)) => a.elems == b.elems,
            (TypeNode::Array(a), TypeNode::Array(b)) => union_eq(&a.members, &b.members),
            (TypeNode::Object(a), TypeNode::Object(b)) => {
                // Compare the property mappings: exact key sets, then
                // set-coverage on every property union. Context keys do not
                // participate; two shapes observed under different keys are
                // still the same shape.
                a.properties.len() == b.properties.len()
                    && a.properties.keys().all(|k| b.properties.contains_key(k))
                    && a.properties
                        .iter()
                        .all(|(k, types)| b.properties.get(k).is_some_and(|o| union_eq(types, o)))
            }
            (TypeNode::Undefined, TypeNode::Undefined) => true,
            (TypeNode::Json, TypeNode::Json) => true,
            _ => false,
        }
    }
}
