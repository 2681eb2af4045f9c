//! Declaration text for inferred trees.
//!
//! Every node renders an inline expression; `Enum` and `Object` additionally
//! contribute standalone declarations, named through the per-run
//! [`NameAllocator`]. Recursive collection revisits shared named shapes, so
//! callers deduplicate the flat list by name (first occurrence wins) before
//! final output.

use rand::Rng;
use serde::Serialize;

use crate::error::Result;
use crate::naming::NameAllocator;
use crate::node::{EnumType, NodeKind, ObjectType, TypeNode, ValueKind};

/// One standalone declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub text: String,
}

impl TypeNode {
    /// The inline type expression for this node. Named variants resolve
    /// their identifier here, so the same allocator must be threaded
    /// through every call of one run.
    pub fn expression<R: Rng>(&self, names: &mut NameAllocator, rng: &mut R) -> Result<String> {
        match self {
            TypeNode::Value(kind) => Ok(kind.as_str().to_string()),
            TypeNode::Json => Ok("Json".to_string()),
            TypeNode::Undefined => Ok("undefined".to_string()),
            TypeNode::Tuple(tuple) => {
                let elems: Vec<&str> = tuple.elems.iter().map(|k| k.as_str()).collect();
                Ok(format!("[{}]", elems.join(", ")))
            }
            TypeNode::Array(array) => array_expression(&array.members, names, rng),
            TypeNode::Enum(e) => names.allocate(rng, &e.key, &enum_body(e)),
            TypeNode::Object(object) => {
                let body = object_body(object, names, rng)?;
                names.allocate(rng, &object.key, &body)
            }
        }
    }

    /// Collect the standalone declarations this node and its descendants
    /// require, in parent-before-child order.
    pub fn declarations<R: Rng>(
        &self,
        names: &mut NameAllocator,
        rng: &mut R,
        out: &mut Vec<Declaration>,
    ) -> Result<()> {
        match self {
            TypeNode::Enum(e) => {
                let body = enum_body(e);
                let name = names.allocate(rng, &e.key, &body)?;
                out.push(Declaration { text: format!("type {name} = {body};"), name });
            }
            TypeNode::Object(object) => {
                let body = object_body(object, names, rng)?;
                let name = names.allocate(rng, &object.key, &body)?;
                out.push(Declaration { text: format!("interface {name} {body}"), name });
                for key in sorted_keys(object) {
                    if let Some(union) = object.properties.get(key) {
                        for node in union {
                            node.declarations(names, rng, out)?;
                        }
                    }
                }
            }
            TypeNode::Array(array) => {
                for node in &array.members {
                    node.declarations(names, rng, out)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Drop repeated names, keeping the first occurrence.
pub fn dedup_declarations(declarations: Vec<Declaration>) -> Vec<Declaration> {
    let mut seen = std::collections::BTreeSet::new();
    declarations.into_iter().filter(|d| seen.insert(d.name.clone())).collect()
}

/// Display order inside a union: string, number, boolean, everything else,
/// null last.
fn priority(node: &TypeNode) -> u8 {
    match node {
        TypeNode::Value(ValueKind::String) => 0,
        TypeNode::Value(ValueKind::Number) => 1,
        TypeNode::Value(ValueKind::Boolean) => 2,
        TypeNode::Value(ValueKind::Null) => 4,
        _ => 3,
    }
}

fn array_expression<R: Rng>(
    members: &[TypeNode],
    names: &mut NameAllocator,
    rng: &mut R,
) -> Result<String> {
    let mut visible: Vec<&TypeNode> =
        members.iter().filter(|n| n.kind() != NodeKind::Undefined).collect();
    visible.sort_by_key(|n| priority(n));
    match visible.as_slice() {
        [] => Ok("Json[]".to_string()),
        [single] => Ok(format!("{}[]", single.expression(names, rng)?)),
        many => {
            let mut parts = Vec::with_capacity(many.len());
            for node in many {
                parts.push(node.expression(names, rng)?);
            }
            Ok(format!("Array<{}>", parts.join(" | ")))
        }
    }
}

fn enum_body(e: &EnumType) -> String {
    let mut parts: Vec<String> = e.values.iter().map(|v| format!("'{v}'")).collect();
    parts.push("(string & {})".to_string());
    parts.join(" | ")
}

fn sorted_keys(object: &ObjectType) -> Vec<&String> {
    let mut keys: Vec<&String> = object.properties.keys().collect();
    keys.sort();
    keys
}

/// The braces body of an interface; also the memo key for name dedup, so
/// properties render in sorted order regardless of observation order.
fn object_body<R: Rng>(
    object: &ObjectType,
    names: &mut NameAllocator,
    rng: &mut R,
) -> Result<String> {
    let mut body = String::from("{\n");
    for key in sorted_keys(object) {
        let Some(union) = object.properties.get(key) else { continue };
        let optional = union.iter().any(|n| n.kind() == NodeKind::Undefined);
        let expr = property_expression(union, names, rng)?;
        let marker = if optional { "?" } else { "" };
        body.push_str(&format!("  {key}{marker}: {expr};\n"));
    }
    body.push('}');
    Ok(body)
}

fn property_expression<R: Rng>(
    union: &[TypeNode],
    names: &mut NameAllocator,
    rng: &mut R,
) -> Result<String> {
    let mut visible: Vec<&TypeNode> =
        union.iter().filter(|n| n.kind() != NodeKind::Undefined).collect();
    // A bare null slot says nothing about the eventual shape; fall back.
    if visible.is_empty()
        || (visible.len() == 1 && matches!(visible[0], TypeNode::Value(ValueKind::Null)))
    {
        return Ok("Json".to_string());
    }
    visible.sort_by_key(|n| priority(n));
    let mut parts = Vec::with_capacity(visible.len());
    for node in visible {
        parts.push(node.expression(names, rng)?);
    }
    Ok(parts.join(" | "))
}
