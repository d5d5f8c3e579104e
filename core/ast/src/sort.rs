//! Deterministic ordering for method declaration lists.
//!
//! Used to keep documentation and generated code stable across runs.

use std::cmp::Ordering;

use crate::nodes::NodeData;
use crate::tree::{NodeId, Tree};

/// Sorts method declarations in place: constructors first, then
/// case-insensitive name order, then per-position case-insensitive
/// parameter type names, then parameter count (shorter first).
///
/// The sort is stable, so methods whose keys collide (erased parameter
/// type names) keep their original relative order.
///
/// # Panics
///
/// Panics if any id is not a method declaration.
pub fn sort_methods(tree: &Tree, methods: &mut [NodeId]) {
    methods.sort_by(|&a, &b| compare_methods(tree, a, b));
}

fn compare_methods(tree: &Tree, a: NodeId, b: NodeId) -> Ordering {
    let (a_ctor, a_name) = method_header(tree, a);
    let (b_ctor, b_name) = method_header(tree, b);
    if a_ctor != b_ctor {
        // true sorts first
        return b_ctor.cmp(&a_ctor);
    }
    if a_name != b_name {
        return compare_ignore_case(a_name, b_name);
    }
    let a_params = parameter_type_names(tree, a);
    let b_params = parameter_type_names(tree, b);
    for (a_ty, b_ty) in a_params.iter().zip(b_params.iter()) {
        if a_ty != b_ty {
            return compare_ignore_case(a_ty, b_ty);
        }
    }
    a_params.len().cmp(&b_params.len())
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn method_header(tree: &Tree, method: NodeId) -> (bool, &str) {
    match tree.data(method) {
        NodeData::MethodDeclaration {
            name,
            is_constructor,
            ..
        } => (*is_constructor, name),
        other => panic!(
            "sort_methods requires method declarations, got {:?} (node {method})",
            other.kind()
        ),
    }
}

fn parameter_type_names(tree: &Tree, method: NodeId) -> Vec<&str> {
    match tree.data(method) {
        NodeData::MethodDeclaration { parameters, .. } => parameters
            .iter()
            .map(|&param| match tree.data(param) {
                NodeData::SingleVariableDeclaration { type_name, .. } => type_name.as_str(),
                other => panic!(
                    "method parameter {param} is not a variable declaration: {:?}",
                    other.kind()
                ),
            })
            .collect(),
        other => panic!(
            "sort_methods requires method declarations, got {:?} (node {method})",
            other.kind()
        ),
    }
}
