//! Semantic elements supplied by the external resolver.
//!
//! Declaration nodes carry an [`ElementId`] pointing into an [`ElementStore`]
//! filled in by the resolver when the tree is built. The kernel only reads
//! these associations; it never creates or rewrites them. Copying a subtree
//! shares element ids, since an element denotes external identity rather
//! than tree structure.

use serde::{Deserialize, Serialize};

/// Identifier of a semantic element. Index into an [`ElementStore`].
pub type ElementId = u32;

/// A type (class, interface or anonymous class) known to the resolver.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TypeElement {
    pub name: String,
    pub qualified_name: String,
}

/// A method or constructor known to the resolver.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ExecutableElement {
    pub name: String,
    pub is_constructor: bool,
    pub return_type: String,
    pub parameter_types: Vec<String>,
}

/// A field, parameter or local variable known to the resolver.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct VariableElement {
    pub name: String,
    pub type_name: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Element {
    Type(TypeElement),
    Executable(ExecutableElement),
    Variable(VariableElement),
}

impl Element {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Element::Type(t) => &t.name,
            Element::Executable(e) => &e.name,
            Element::Variable(v) => &v.name,
        }
    }
}

/// Append-only table of resolved elements.
#[derive(Default, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ElementStore {
    elements: Vec<Element>,
}

impl ElementStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an element and returns its id.
    #[allow(clippy::cast_possible_truncation)]
    pub fn insert(&mut self, element: Element) -> ElementId {
        let id = self.elements.len() as ElementId;
        self.elements.push(element);
        id
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id as usize)
    }

    #[must_use]
    pub fn is_variable(&self, id: ElementId) -> bool {
        matches!(self.get(id), Some(Element::Variable(_)))
    }

    #[must_use]
    pub fn as_type(&self, id: ElementId) -> Option<&TypeElement> {
        match self.get(id) {
            Some(Element::Type(t)) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_executable(&self, id: ElementId) -> Option<&ExecutableElement> {
        match self.get(id) {
            Some(Element::Executable(e)) => Some(e),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_variable(&self, id: ElementId) -> Option<&VariableElement> {
        match self.get(id) {
            Some(Element::Variable(v)) => Some(v),
            _ => None,
        }
    }
}
