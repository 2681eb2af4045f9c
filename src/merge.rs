//! Union reduction.
//!
//! `merge` folds one union into another in place, the way multi-sample
//! evidence accumulates during parsing. Object and array nodes are mutated
//! while the tree is under construction; nothing mutates after parsing
//! completes.

use tracing::trace;

use crate::node::{ArrayType, NodeKind, ObjectType, TypeNode, ValueKind};

/// A union holding more than this many distinct entries collapses to `Json`.
pub const UNION_LIMIT: usize = 3;

fn has_kind(union: &[TypeNode], kind: NodeKind) -> bool {
    union.iter().any(|n| n.kind() == kind)
}

fn has_primitive(union: &[TypeNode], kind: ValueKind) -> bool {
    union.iter().any(|n| matches!(n, TypeNode::Value(k) if *k == kind))
}

/// Collapse an over-complex union to the untyped escape hatch.
pub fn cap_union(union: &mut Vec<TypeNode>) {
    if union.len() > UNION_LIMIT {
        trace!(entries = union.len(), "union past complexity cap, collapsing to Json");
        *union = vec![TypeNode::Json];
    }
}

/// Reduce two unions of the same logical slot into `into`.
pub fn merge(into: &mut Vec<TypeNode>, from: Vec<TypeNode>) {
    if has_kind(into, NodeKind::Json) || has_kind(&from, NodeKind::Json) {
        *into = vec![TypeNode::Json];
        return;
    }

    let snapshot: Vec<NodeKind> = into.iter().map(TypeNode::kind).collect();
    let both_held_object = snapshot.contains(&NodeKind::Object) && has_kind(&from, NodeKind::Object);

    // Entries whose kind the receiver already represents are held back for
    // the kind-specific reconciliation below; everything else is appended.
    let mut donor_object: Option<ObjectType> = None;
    let mut donor_enum_values: Option<std::collections::BTreeSet<String>> = None;
    let mut donor_array_like: Option<TypeNode> = None;
    let mut donor_primitives: Vec<ValueKind> = Vec::new();
    for node in from {
        match node {
            TypeNode::Object(o) if snapshot.contains(&NodeKind::Object) => {
                donor_object = Some(o);
            }
            TypeNode::Enum(e) if snapshot.contains(&NodeKind::Enum) => {
                donor_enum_values = Some(e.values);
            }
            n @ (TypeNode::Array(_) | TypeNode::Tuple(_)) if snapshot.contains(&n.kind()) => {
                donor_array_like = Some(n);
            }
            TypeNode::Value(k) if snapshot.contains(&NodeKind::Value) => {
                donor_primitives.push(k);
            }
            TypeNode::Undefined if snapshot.contains(&NodeKind::Undefined) => {}
            n => into.push(n),
        }
    }

    // Two enums over one slot pool their observed literals.
    if let Some(values) = donor_enum_values {
        if let Some(TypeNode::Enum(e)) = into.iter_mut().find(|n| n.kind() == NodeKind::Enum) {
            e.values.extend(values);
        }
    }

    // A plain string subsumes an enum.
    if has_primitive(into, ValueKind::String) && has_kind(into, NodeKind::Enum) {
        into.retain(|n| n.kind() != NodeKind::Enum);
    }

    for kind in donor_primitives {
        if !has_primitive(into, kind) {
            into.push(TypeNode::Value(kind));
        }
    }

    if both_held_object {
        if let Some(donor) = donor_object {
            if let Some(TypeNode::Object(receiver)) =
                into.iter_mut().find(|n| n.kind() == NodeKind::Object)
            {
                merge_objects(receiver, donor);
            }
        }
    }

    reconcile_array_like(into, donor_array_like);

    cap_union(into);
}

/// Array/tuple reconciliation for one slot.
///
/// Same kinds: arrays pool their member sets; unequal tuples degrade to one
/// array of their deduplicated positional kinds. Differing kinds: the array
/// wins and every tuple entry is dropped. The survivor always stays in the
/// accumulating union.
fn reconcile_array_like(into: &mut Vec<TypeNode>, donor: Option<TypeNode>) {
    match donor {
        Some(TypeNode::Array(donor_arr)) => {
            if let Some(TypeNode::Array(existing)) =
                into.iter_mut().find(|n| n.kind() == NodeKind::Array)
            {
                merge(&mut existing.members, donor_arr.members);
            }
        }
        Some(TypeNode::Tuple(donor_tup)) => {
            if let Some(slot) = into.iter_mut().find(|n| n.kind() == NodeKind::Tuple) {
                if *slot != TypeNode::Tuple(donor_tup.clone()) {
                    let existing = match slot {
                        TypeNode::Tuple(t) => t.elems.clone(),
                        _ => Vec::new(),
                    };
                    let mut kinds: Vec<ValueKind> = Vec::new();
                    for kind in existing.into_iter().chain(donor_tup.elems) {
                        if !kinds.contains(&kind) {
                            kinds.push(kind);
                        }
                    }
                    *slot = TypeNode::Array(ArrayType {
                        members: kinds.into_iter().map(TypeNode::Value).collect(),
                    });
                }
            }
        }
        _ => {}
    }
    if has_kind(into, NodeKind::Array) && has_kind(into, NodeKind::Tuple) {
        into.retain(|n| n.kind() != NodeKind::Tuple);
    }
}

/// Fold a donor object into the receiver.
///
/// A property missing on either side becomes optional; a property on both
/// sides merges its unions.
pub fn merge_objects(receiver: &mut ObjectType, donor: ObjectType) {
    for (key, union) in receiver.properties.iter_mut() {
        if !donor.properties.contains_key(key) && !has_kind(union, NodeKind::Undefined) {
            union.push(TypeNode::Undefined);
        }
    }
    for (key, donor_union) in donor.properties {
        match receiver.properties.get_mut(&key) {
            Some(existing) => merge(existing, donor_union),
            None => {
                let mut union = vec![TypeNode::Undefined];
                union.extend(donor_union.into_iter().filter(|n| n.kind() != NodeKind::Undefined));
                receiver.properties.insert(key, union);
            }
        }
    }
}
