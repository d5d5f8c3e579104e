//! Mutable, parent-linked tree storage.
//!
//! The `Tree` owns every node in a flat `FxHashMap` keyed by sequential id
//! and keeps all structural edges itself: the payload's child slots point
//! downward, the node record's `parent` field points upward. The parent link
//! is navigation only; ownership always flows parent to child.
//!
//! Invariant maintained by every operation here: a node has at most one
//! parent, and whenever `child.parent == Some(p)`, the payload of `p` holds
//! `child` in exactly one slot.
//!
//! # Node ID Assignment
//!
//! Ids are assigned sequentially starting from 1; **0 is reserved** for
//! invalid/uninitialized nodes. Ids are never reused, so detached and
//! discarded subtrees simply stop being reachable from any root.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::errors::TreeError;
use crate::nodes::{NodeData, NodeKind};

/// Identifier of a node within its [`Tree`]. Non-zero.
pub type NodeId = u32;

/// One stored node: payload plus the upward navigation link.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Node {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    #[must_use]
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Tree {
    nodes: FxHashMap<NodeId, Node>,
    next_id: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl Tree {
    #[must_use]
    pub fn new() -> Self {
        Tree {
            nodes: FxHashMap::default(),
            next_id: 1,
        }
    }

    /// Adds a node to the tree, attaching every child referenced by its
    /// payload. Returns the fresh id.
    ///
    /// # Panics
    ///
    /// Panics if a referenced child does not exist or already has a parent.
    pub fn add(&mut self, data: NodeData) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        for child in data.children() {
            self.adopt(child, id);
        }
        self.nodes.insert(id, Node { data, parent: None });
        id
    }

    #[must_use]
    pub fn find_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// # Panics
    ///
    /// Panics if no node with this id exists. Dangling ids are a caller bug.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        self.nodes
            .get(&id)
            .unwrap_or_else(|| panic!("no node with id {id}"))
    }

    #[must_use]
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.node(id).data
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind()
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// All nodes currently stored, attached or not. Iteration order is
    /// unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(&id, node)| (id, node))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Detaches `id` from its parent. A node that is already detached is
    /// left as is, so removal is idempotent.
    ///
    /// # Panics
    ///
    /// Panics if the parent link exists but the parent's payload does not
    /// hold `id` — a corrupted tree, not a recoverable state.
    pub fn remove(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let detached = self.node_mut(parent).data.replace_child(id, None);
        assert!(
            detached,
            "node {id} links to parent {parent}, but {parent} does not hold it"
        );
        self.node_mut(id).parent = None;
    }

    /// Detaches `old` and attaches `new` in the exact slot `old` occupied.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvariantViolation`] if `old` has no parent (there is no
    /// slot to take over) or `new` is still attached elsewhere.
    pub fn replace_with(&mut self, old: NodeId, new: NodeId) -> Result<(), TreeError> {
        let Some(parent) = self.parent(old) else {
            return Err(TreeError::InvariantViolation {
                node: old,
                reason: "cannot replace a node that has no parent".to_string(),
            });
        };
        if self.parent(new).is_some() {
            return Err(TreeError::InvariantViolation {
                node: new,
                reason: "replacement node is already attached".to_string(),
            });
        }
        let swapped = self.node_mut(parent).data.replace_child(old, Some(new));
        assert!(
            swapped,
            "node {old} links to parent {parent}, but {parent} does not hold it"
        );
        self.node_mut(old).parent = None;
        self.node_mut(new).parent = Some(parent);
        Ok(())
    }

    /// Deep-clones the subtree rooted at `id` into fresh, unparented nodes.
    /// Child containers are rebuilt from scratch; element references are
    /// shared with the original, since they denote external identity.
    pub fn copy(&mut self, id: NodeId) -> NodeId {
        let mut data = self.node(id).data.clone();
        for child in data.children() {
            let copied = self.copy(child);
            let remapped = data.replace_child(child, Some(copied));
            debug_assert!(remapped);
        }
        self.add(data)
    }

    /// Walks `start`, then its parent chain, returning the first node the
    /// predicate accepts. Linear in tree depth; results are never cached
    /// because the tree mutates between passes.
    pub fn nearest_ancestor_matching<P>(&self, start: NodeId, predicate: P) -> Option<NodeId>
    where
        P: Fn(&Node) -> bool,
    {
        let mut current = Some(start);
        while let Some(id) = current {
            let node = self.node(id);
            if predicate(node) {
                return Some(id);
            }
            current = node.parent;
        }
        None
    }

    #[must_use]
    pub fn nearest_ancestor_of_kind(&self, start: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.nearest_ancestor_matching(start, |node| node.kind() == kind)
    }

    #[must_use]
    pub fn nearest_ancestor_one_of(&self, start: NodeId, kinds: &[NodeKind]) -> Option<NodeId> {
        self.nearest_ancestor_matching(start, |node| kinds.contains(&node.kind()))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes
            .get_mut(&id)
            .unwrap_or_else(|| panic!("no node with id {id}"))
    }

    pub(crate) fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.node_mut(id).data
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(id).parent = Some(parent);
    }

    fn adopt(&mut self, child: NodeId, parent: NodeId) {
        let node = self.node_mut(child);
        assert!(
            node.parent.is_none(),
            "node {child} is already attached to {}",
            node.parent.unwrap_or_default()
        );
        node.parent = Some(parent);
    }
}

// Typed constructors. Each takes ownership of the referenced children,
// which must exist in this tree and be unparented.
impl Tree {
    pub fn new_compilation_unit(
        &mut self,
        package_name: impl Into<String>,
        main_type_name: impl Into<String>,
        types: Vec<NodeId>,
    ) -> NodeId {
        self.add(NodeData::CompilationUnit {
            package_name: package_name.into(),
            main_type_name: main_type_name.into(),
            types,
        })
    }

    pub fn new_type_declaration(
        &mut self,
        name: impl Into<String>,
        element: Option<ElementId>,
        body_declarations: Vec<NodeId>,
    ) -> NodeId {
        self.add(NodeData::TypeDeclaration {
            name: name.into(),
            element,
            body_declarations,
        })
    }

    pub fn new_anonymous_class_declaration(
        &mut self,
        element: Option<ElementId>,
        body_declarations: Vec<NodeId>,
    ) -> NodeId {
        self.add(NodeData::AnonymousClassDeclaration {
            element,
            body_declarations,
        })
    }

    pub fn new_method_declaration(
        &mut self,
        name: impl Into<String>,
        is_constructor: bool,
        element: Option<ElementId>,
        parameters: Vec<NodeId>,
        body: Option<NodeId>,
    ) -> NodeId {
        self.add(NodeData::MethodDeclaration {
            name: name.into(),
            is_constructor,
            element,
            parameters,
            body,
        })
    }

    pub fn new_field_declaration(&mut self, fragments: Vec<NodeId>) -> NodeId {
        self.add(NodeData::FieldDeclaration { fragments })
    }

    pub fn new_single_variable_declaration(
        &mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        element: Option<ElementId>,
    ) -> NodeId {
        self.add(NodeData::SingleVariableDeclaration {
            name: name.into(),
            type_name: type_name.into(),
            element,
        })
    }

    pub fn new_variable_declaration_fragment(
        &mut self,
        name: impl Into<String>,
        element: Option<ElementId>,
        initializer: Option<NodeId>,
    ) -> NodeId {
        self.add(NodeData::VariableDeclarationFragment {
            name: name.into(),
            element,
            initializer,
        })
    }

    pub fn new_block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.add(NodeData::Block { statements })
    }

    pub fn new_expression_statement(&mut self, expression: NodeId) -> NodeId {
        self.add(NodeData::ExpressionStatement {
            expression: Some(expression),
        })
    }

    pub fn new_return_statement(&mut self, expression: Option<NodeId>) -> NodeId {
        self.add(NodeData::ReturnStatement { expression })
    }

    pub fn new_if_statement(
        &mut self,
        condition: NodeId,
        then_statement: NodeId,
        else_statement: Option<NodeId>,
    ) -> NodeId {
        self.add(NodeData::IfStatement {
            condition: Some(condition),
            then_statement: Some(then_statement),
            else_statement,
        })
    }

    pub fn new_while_statement(&mut self, condition: NodeId, body: NodeId) -> NodeId {
        self.add(NodeData::WhileStatement {
            condition: Some(condition),
            body: Some(body),
        })
    }

    pub fn new_variable_declaration_statement(&mut self, fragments: Vec<NodeId>) -> NodeId {
        self.add(NodeData::VariableDeclarationStatement { fragments })
    }

    pub fn new_simple_name(
        &mut self,
        identifier: impl Into<String>,
        element: Option<ElementId>,
    ) -> NodeId {
        self.add(NodeData::SimpleName {
            identifier: identifier.into(),
            element,
        })
    }

    pub fn new_qualified_name(
        &mut self,
        qualifier: NodeId,
        identifier: impl Into<String>,
        element: Option<ElementId>,
    ) -> NodeId {
        self.add(NodeData::QualifiedName {
            qualifier: Some(qualifier),
            identifier: identifier.into(),
            element,
        })
    }

    pub fn new_field_access(&mut self, object: NodeId, element: Option<ElementId>) -> NodeId {
        self.add(NodeData::FieldAccess {
            object: Some(object),
            element,
        })
    }

    pub fn new_super_field_access(&mut self, element: Option<ElementId>) -> NodeId {
        self.add(NodeData::SuperFieldAccess { element })
    }

    pub fn new_method_invocation(
        &mut self,
        target: Option<NodeId>,
        arguments: Vec<NodeId>,
        element: Option<ElementId>,
    ) -> NodeId {
        self.add(NodeData::MethodInvocation {
            target,
            arguments,
            element,
        })
    }

    pub fn new_super_method_invocation(
        &mut self,
        arguments: Vec<NodeId>,
        element: Option<ElementId>,
    ) -> NodeId {
        self.add(NodeData::SuperMethodInvocation { arguments, element })
    }

    pub fn new_class_instance_creation(
        &mut self,
        arguments: Vec<NodeId>,
        element: Option<ElementId>,
    ) -> NodeId {
        self.add(NodeData::ClassInstanceCreation { arguments, element })
    }

    pub fn new_parenthesized_expression(&mut self, expression: NodeId) -> NodeId {
        self.add(NodeData::ParenthesizedExpression {
            expression: Some(expression),
        })
    }
}
