//! Structural accessors: typed "enclosing X" and "referenced Y" queries.
//!
//! Every upward search here goes through the ancestor engine on
//! [`Tree`](crate::tree::Tree); this module only adds the kind dispatch and
//! element lookups on top.

use std::path::MAIN_SEPARATOR;

use crate::element::{ElementId, ElementStore};
use crate::nodes::{NodeData, NodeKind, ELEMENT_DECLARING_KINDS, TYPE_KINDS};
use crate::tree::{NodeId, Tree};

/// File extension of the source language handled by the translator.
pub const SOURCE_EXTENSION: &str = "java";

/// Nearest enclosing method declaration, including `node` itself.
#[must_use]
pub fn enclosing_method(tree: &Tree, node: NodeId) -> Option<NodeId> {
    tree.nearest_ancestor_of_kind(node, NodeKind::MethodDeclaration)
}

/// Nearest enclosing statement of any kind.
#[must_use]
pub fn owning_statement(tree: &Tree, node: NodeId) -> Option<NodeId> {
    tree.nearest_ancestor_matching(node, |n| n.kind().is_statement())
}

/// The compilation unit this node lives in.
#[must_use]
pub fn compilation_unit(tree: &Tree, node: NodeId) -> Option<NodeId> {
    tree.nearest_ancestor_of_kind(node, NodeKind::CompilationUnit)
}

/// Nearest enclosing type or anonymous class declaration.
#[must_use]
pub fn enclosing_type(tree: &Tree, node: NodeId) -> Option<NodeId> {
    tree.nearest_ancestor_one_of(node, &TYPE_KINDS)
}

/// Unwraps redundant parenthesization until a non-parenthesized expression
/// is reached. An emptied parenthesized wrapper stops the walk.
#[must_use]
pub fn trim_parentheses(tree: &Tree, mut expr: NodeId) -> NodeId {
    while let NodeData::ParenthesizedExpression {
        expression: Some(inner),
    } = tree.data(expr)
    {
        expr = *inner;
    }
    expr
}

/// The semantic element `node` declares, or `None` for non-declaring kinds.
#[must_use]
pub fn declared_element(tree: &Tree, node: NodeId) -> Option<ElementId> {
    tree.data(node).declared_element()
}

/// Element of the nearest enclosing type or anonymous class declaration.
#[must_use]
pub fn enclosing_type_element(tree: &Tree, node: NodeId) -> Option<ElementId> {
    enclosing_type(tree, node).and_then(|ty| declared_element(tree, ty))
}

/// Element of the nearest enclosing declaring node (type, anonymous class,
/// method, or variable declaration).
#[must_use]
pub fn enclosing_element(tree: &Tree, node: NodeId) -> Option<ElementId> {
    tree.nearest_ancestor_one_of(node, &ELEMENT_DECLARING_KINDS)
        .and_then(|decl| declared_element(tree, decl))
}

/// The variable element an expression refers to, or `None` if the
/// expression does not denote a variable.
#[must_use]
pub fn variable_element(tree: &Tree, elements: &ElementStore, expr: NodeId) -> Option<ElementId> {
    let expr = trim_parentheses(tree, expr);
    match tree.data(expr) {
        NodeData::FieldAccess { element, .. } | NodeData::SuperFieldAccess { element } => *element,
        // A name may denote a package, type or variable; only variables count.
        NodeData::SimpleName { element, .. } | NodeData::QualifiedName { element, .. } => {
            element.filter(|&id| elements.is_variable(id))
        }
        _ => None,
    }
}

/// The method or constructor element an expression invokes, or `None` for
/// kinds with no referenceable executable.
#[must_use]
pub fn executable_element(tree: &Tree, expr: NodeId) -> Option<ElementId> {
    match tree.data(expr) {
        NodeData::MethodInvocation { element, .. }
        | NodeData::SuperMethodInvocation { element, .. }
        | NodeData::ClassInstanceCreation { element, .. } => *element,
        _ => None,
    }
}

/// Return type of the enclosing method's declared element.
///
/// For closures bound to a functional-interface contract the contract's
/// return type is authoritative, so the type always comes from the method
/// element rather than from any binding on the node itself.
#[must_use]
pub fn owning_return_type<'a>(
    tree: &Tree,
    elements: &'a ElementStore,
    node: NodeId,
) -> Option<&'a str> {
    let method = enclosing_method(tree, node)?;
    let element = declared_element(tree, method)?;
    elements
        .as_executable(element)
        .map(|exec| exec.return_type.as_str())
}

/// Body declarations of a type or anonymous class declaration.
///
/// # Panics
///
/// Panics for any other kind: passing a non-type node here is a caller bug,
/// not bad input.
#[must_use]
pub fn body_declarations(tree: &Tree, node: NodeId) -> &[NodeId] {
    match tree.data(node) {
        NodeData::TypeDeclaration {
            body_declarations, ..
        }
        | NodeData::AnonymousClassDeclaration {
            body_declarations, ..
        } => body_declarations,
        other => panic!(
            "node kind {:?} does not contain body declarations",
            other.kind()
        ),
    }
}

/// Body declarations of the nearest enclosing type, or `None` outside any
/// type declaration.
#[must_use]
pub fn enclosing_type_body_declarations(tree: &Tree, node: NodeId) -> Option<&[NodeId]> {
    enclosing_type(tree, node).map(|ty| body_declarations(tree, ty))
}

/// Field declarations in a type's body, in declaration order.
#[must_use]
pub fn field_declarations(tree: &Tree, type_decl: NodeId) -> Vec<NodeId> {
    body_declarations(tree, type_decl)
        .iter()
        .copied()
        .filter(|&decl| tree.kind(decl) == NodeKind::FieldDeclaration)
        .collect()
}

/// Method declarations in a type's body, in declaration order.
#[must_use]
pub fn method_declarations(tree: &Tree, type_decl: NodeId) -> Vec<NodeId> {
    body_declarations(tree, type_decl)
        .iter()
        .copied()
        .filter(|&decl| tree.kind(decl) == NodeKind::MethodDeclaration)
        .collect()
}

/// All variable declaration fragments of a type's fields, flattened.
#[must_use]
pub fn all_fragments(tree: &Tree, type_decl: NodeId) -> Vec<NodeId> {
    field_declarations(tree, type_decl)
        .into_iter()
        .flat_map(|field| match tree.data(field) {
            NodeData::FieldDeclaration { fragments } => fragments.clone(),
            _ => unreachable!("field_declarations only yields FieldDeclaration nodes"),
        })
        .collect()
}

/// Fully qualified name of the compilation unit's main type. The default
/// package yields the bare type name.
///
/// # Panics
///
/// Panics if `unit` is not a compilation unit.
#[must_use]
pub fn qualified_main_type_name(tree: &Tree, unit: NodeId) -> String {
    match tree.data(unit) {
        NodeData::CompilationUnit {
            package_name,
            main_type_name,
            ..
        } => {
            if package_name.is_empty() {
                main_type_name.clone()
            } else {
                format!("{package_name}.{main_type_name}")
            }
        }
        other => panic!("expected a compilation unit, got {:?}", other.kind()),
    }
}

/// Relative source file path for a compilation unit: package separators
/// mapped to the platform path separator, suffixed with the source
/// extension.
///
/// # Panics
///
/// Panics if `unit` is not a compilation unit.
#[must_use]
pub fn source_file_name(tree: &Tree, unit: NodeId) -> String {
    let qualified = qualified_main_type_name(tree, unit);
    format!(
        "{}.{SOURCE_EXTENSION}",
        qualified.replace('.', &MAIN_SEPARATOR.to_string())
    )
}
