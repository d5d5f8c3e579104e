//! Node kinds and payloads for the Arbor AST.
//!
//! Every node is one variant of the closed [`NodeData`] enum. The payload
//! carries the kind-dependent child slots (single `Option<NodeId>` links and
//! ordered `Vec<NodeId>` containers) plus any leaf fields. Child slots hold
//! ids into the owning [`Tree`](crate::tree::Tree); the reverse parent link
//! lives on the node record itself, not in the payload.
//!
//! [`NodeKind`] is the fieldless tag used for dispatch and ancestor queries.
//! Adding a new statement or expression kind means extending both enums and
//! the exhaustive matches below; the compiler flags every dispatch that
//! needs a new arm.

use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::tree::NodeId;

/// Tag identifying what grammatical construct a node represents.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum NodeKind {
    CompilationUnit,
    TypeDeclaration,
    AnonymousClassDeclaration,
    MethodDeclaration,
    FieldDeclaration,
    SingleVariableDeclaration,
    VariableDeclarationFragment,
    Block,
    ExpressionStatement,
    ReturnStatement,
    IfStatement,
    WhileStatement,
    VariableDeclarationStatement,
    SimpleName,
    QualifiedName,
    FieldAccess,
    SuperFieldAccess,
    MethodInvocation,
    SuperMethodInvocation,
    ClassInstanceCreation,
    ParenthesizedExpression,
    BooleanLiteral,
    CharacterLiteral,
    NumberLiteral,
    StringLiteral,
}

/// Kinds that form the type-declaration category.
pub const TYPE_KINDS: [NodeKind; 2] = [
    NodeKind::TypeDeclaration,
    NodeKind::AnonymousClassDeclaration,
];

/// Kinds whose nodes introduce a semantic element.
pub const ELEMENT_DECLARING_KINDS: [NodeKind; 5] = [
    NodeKind::TypeDeclaration,
    NodeKind::AnonymousClassDeclaration,
    NodeKind::MethodDeclaration,
    NodeKind::SingleVariableDeclaration,
    NodeKind::VariableDeclarationFragment,
];

impl NodeKind {
    #[must_use]
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::Block
                | NodeKind::ExpressionStatement
                | NodeKind::ReturnStatement
                | NodeKind::IfStatement
                | NodeKind::WhileStatement
                | NodeKind::VariableDeclarationStatement
        )
    }

    #[must_use]
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            NodeKind::SimpleName
                | NodeKind::QualifiedName
                | NodeKind::FieldAccess
                | NodeKind::SuperFieldAccess
                | NodeKind::MethodInvocation
                | NodeKind::SuperMethodInvocation
                | NodeKind::ClassInstanceCreation
                | NodeKind::ParenthesizedExpression
                | NodeKind::BooleanLiteral
                | NodeKind::CharacterLiteral
                | NodeKind::NumberLiteral
                | NodeKind::StringLiteral
        )
    }

    #[must_use]
    pub fn is_type_declaration(self) -> bool {
        TYPE_KINDS.contains(&self)
    }

    #[must_use]
    pub fn is_variable_declaration(self) -> bool {
        matches!(
            self,
            NodeKind::SingleVariableDeclaration | NodeKind::VariableDeclarationFragment
        )
    }

    #[must_use]
    pub fn declares_element(self) -> bool {
        ELEMENT_DECLARING_KINDS.contains(&self)
    }
}

/// Kind-dependent payload of a node.
///
/// Child slots are `NodeId`s owned by this node. A slot being `Option` means
/// the construct tolerates the child's removal (detaching leaves the slot
/// empty until a replacement is attached).
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum NodeData {
    CompilationUnit {
        package_name: String,
        main_type_name: String,
        types: Vec<NodeId>,
    },
    TypeDeclaration {
        name: String,
        element: Option<ElementId>,
        body_declarations: Vec<NodeId>,
    },
    AnonymousClassDeclaration {
        element: Option<ElementId>,
        body_declarations: Vec<NodeId>,
    },
    MethodDeclaration {
        name: String,
        is_constructor: bool,
        element: Option<ElementId>,
        parameters: Vec<NodeId>,
        body: Option<NodeId>,
    },
    FieldDeclaration {
        fragments: Vec<NodeId>,
    },
    SingleVariableDeclaration {
        name: String,
        type_name: String,
        element: Option<ElementId>,
    },
    VariableDeclarationFragment {
        name: String,
        element: Option<ElementId>,
        initializer: Option<NodeId>,
    },
    Block {
        statements: Vec<NodeId>,
    },
    ExpressionStatement {
        expression: Option<NodeId>,
    },
    ReturnStatement {
        expression: Option<NodeId>,
    },
    IfStatement {
        condition: Option<NodeId>,
        then_statement: Option<NodeId>,
        else_statement: Option<NodeId>,
    },
    WhileStatement {
        condition: Option<NodeId>,
        body: Option<NodeId>,
    },
    VariableDeclarationStatement {
        fragments: Vec<NodeId>,
    },
    SimpleName {
        identifier: String,
        element: Option<ElementId>,
    },
    QualifiedName {
        qualifier: Option<NodeId>,
        identifier: String,
        element: Option<ElementId>,
    },
    FieldAccess {
        object: Option<NodeId>,
        element: Option<ElementId>,
    },
    SuperFieldAccess {
        element: Option<ElementId>,
    },
    MethodInvocation {
        target: Option<NodeId>,
        arguments: Vec<NodeId>,
        element: Option<ElementId>,
    },
    SuperMethodInvocation {
        arguments: Vec<NodeId>,
        element: Option<ElementId>,
    },
    ClassInstanceCreation {
        arguments: Vec<NodeId>,
        element: Option<ElementId>,
    },
    ParenthesizedExpression {
        expression: Option<NodeId>,
    },
    BooleanLiteral {
        value: bool,
        type_name: String,
    },
    CharacterLiteral {
        value: char,
        type_name: String,
    },
    NumberLiteral {
        token: String,
        type_name: String,
    },
    StringLiteral {
        value: String,
        type_name: String,
    },
}

impl NodeData {
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::CompilationUnit { .. } => NodeKind::CompilationUnit,
            NodeData::TypeDeclaration { .. } => NodeKind::TypeDeclaration,
            NodeData::AnonymousClassDeclaration { .. } => NodeKind::AnonymousClassDeclaration,
            NodeData::MethodDeclaration { .. } => NodeKind::MethodDeclaration,
            NodeData::FieldDeclaration { .. } => NodeKind::FieldDeclaration,
            NodeData::SingleVariableDeclaration { .. } => NodeKind::SingleVariableDeclaration,
            NodeData::VariableDeclarationFragment { .. } => NodeKind::VariableDeclarationFragment,
            NodeData::Block { .. } => NodeKind::Block,
            NodeData::ExpressionStatement { .. } => NodeKind::ExpressionStatement,
            NodeData::ReturnStatement { .. } => NodeKind::ReturnStatement,
            NodeData::IfStatement { .. } => NodeKind::IfStatement,
            NodeData::WhileStatement { .. } => NodeKind::WhileStatement,
            NodeData::VariableDeclarationStatement { .. } => {
                NodeKind::VariableDeclarationStatement
            }
            NodeData::SimpleName { .. } => NodeKind::SimpleName,
            NodeData::QualifiedName { .. } => NodeKind::QualifiedName,
            NodeData::FieldAccess { .. } => NodeKind::FieldAccess,
            NodeData::SuperFieldAccess { .. } => NodeKind::SuperFieldAccess,
            NodeData::MethodInvocation { .. } => NodeKind::MethodInvocation,
            NodeData::SuperMethodInvocation { .. } => NodeKind::SuperMethodInvocation,
            NodeData::ClassInstanceCreation { .. } => NodeKind::ClassInstanceCreation,
            NodeData::ParenthesizedExpression { .. } => NodeKind::ParenthesizedExpression,
            NodeData::BooleanLiteral { .. } => NodeKind::BooleanLiteral,
            NodeData::CharacterLiteral { .. } => NodeKind::CharacterLiteral,
            NodeData::NumberLiteral { .. } => NodeKind::NumberLiteral,
            NodeData::StringLiteral { .. } => NodeKind::StringLiteral,
        }
    }

    /// All child ids, in structural order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeData::CompilationUnit { types, .. } => types.clone(),
            NodeData::TypeDeclaration {
                body_declarations, ..
            }
            | NodeData::AnonymousClassDeclaration {
                body_declarations, ..
            } => body_declarations.clone(),
            NodeData::MethodDeclaration {
                parameters, body, ..
            } => {
                let mut out = parameters.clone();
                out.extend(*body);
                out
            }
            NodeData::FieldDeclaration { fragments }
            | NodeData::VariableDeclarationStatement { fragments } => fragments.clone(),
            NodeData::VariableDeclarationFragment { initializer, .. } => {
                initializer.iter().copied().collect()
            }
            NodeData::Block { statements } => statements.clone(),
            NodeData::ExpressionStatement { expression }
            | NodeData::ReturnStatement { expression }
            | NodeData::ParenthesizedExpression { expression } => {
                expression.iter().copied().collect()
            }
            NodeData::IfStatement {
                condition,
                then_statement,
                else_statement,
            } => condition
                .iter()
                .chain(then_statement.iter())
                .chain(else_statement.iter())
                .copied()
                .collect(),
            NodeData::WhileStatement { condition, body } => {
                condition.iter().chain(body.iter()).copied().collect()
            }
            NodeData::QualifiedName { qualifier, .. } => qualifier.iter().copied().collect(),
            NodeData::FieldAccess { object, .. } => object.iter().copied().collect(),
            NodeData::MethodInvocation {
                target, arguments, ..
            } => target.iter().chain(arguments.iter()).copied().collect(),
            NodeData::SuperMethodInvocation { arguments, .. }
            | NodeData::ClassInstanceCreation { arguments, .. } => arguments.clone(),
            NodeData::SingleVariableDeclaration { .. }
            | NodeData::SimpleName { .. }
            | NodeData::SuperFieldAccess { .. }
            | NodeData::BooleanLiteral { .. }
            | NodeData::CharacterLiteral { .. }
            | NodeData::NumberLiteral { .. }
            | NodeData::StringLiteral { .. } => Vec::new(),
        }
    }

    /// The semantic element this node declares, if it is a declaring kind.
    #[must_use]
    pub fn declared_element(&self) -> Option<ElementId> {
        match self {
            NodeData::TypeDeclaration { element, .. }
            | NodeData::AnonymousClassDeclaration { element, .. }
            | NodeData::MethodDeclaration { element, .. }
            | NodeData::SingleVariableDeclaration { element, .. }
            | NodeData::VariableDeclarationFragment { element, .. } => *element,
            _ => None,
        }
    }

    /// Rewrites the child slot holding `old`. `new = Some(id)` swaps the
    /// occupant, `new = None` empties the slot (removing the entry from
    /// sequence containers). Returns false if no slot holds `old`.
    pub(crate) fn replace_child(&mut self, old: NodeId, new: Option<NodeId>) -> bool {
        fn in_slot(slot: &mut Option<NodeId>, old: NodeId, new: Option<NodeId>) -> bool {
            if *slot == Some(old) {
                *slot = new;
                true
            } else {
                false
            }
        }
        fn in_seq(seq: &mut Vec<NodeId>, old: NodeId, new: Option<NodeId>) -> bool {
            match seq.iter().position(|&id| id == old) {
                Some(i) => {
                    match new {
                        Some(id) => seq[i] = id,
                        None => {
                            seq.remove(i);
                        }
                    }
                    true
                }
                None => false,
            }
        }
        match self {
            NodeData::CompilationUnit { types: seq, .. }
            | NodeData::TypeDeclaration {
                body_declarations: seq,
                ..
            }
            | NodeData::AnonymousClassDeclaration {
                body_declarations: seq,
                ..
            }
            | NodeData::FieldDeclaration { fragments: seq }
            | NodeData::VariableDeclarationStatement { fragments: seq }
            | NodeData::Block { statements: seq }
            | NodeData::SuperMethodInvocation { arguments: seq, .. }
            | NodeData::ClassInstanceCreation { arguments: seq, .. } => in_seq(seq, old, new),
            NodeData::MethodDeclaration {
                parameters, body, ..
            } => in_seq(parameters, old, new) || in_slot(body, old, new),
            NodeData::VariableDeclarationFragment {
                initializer: slot, ..
            }
            | NodeData::ExpressionStatement { expression: slot }
            | NodeData::ReturnStatement { expression: slot }
            | NodeData::ParenthesizedExpression { expression: slot }
            | NodeData::QualifiedName {
                qualifier: slot, ..
            }
            | NodeData::FieldAccess { object: slot, .. } => in_slot(slot, old, new),
            NodeData::IfStatement {
                condition,
                then_statement,
                else_statement,
            } => {
                in_slot(condition, old, new)
                    || in_slot(then_statement, old, new)
                    || in_slot(else_statement, old, new)
            }
            NodeData::WhileStatement { condition, body } => {
                in_slot(condition, old, new) || in_slot(body, old, new)
            }
            NodeData::MethodInvocation {
                target, arguments, ..
            } => in_slot(target, old, new) || in_seq(arguments, old, new),
            NodeData::SingleVariableDeclaration { .. }
            | NodeData::SimpleName { .. }
            | NodeData::SuperFieldAccess { .. }
            | NodeData::BooleanLiteral { .. }
            | NodeData::CharacterLiteral { .. }
            | NodeData::NumberLiteral { .. }
            | NodeData::StringLiteral { .. } => false,
        }
    }
}
