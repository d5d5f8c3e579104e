//! Mutation-safe statement lists and bulk container helpers.
//!
//! [`StatementList`] presents any statement position as an insertable
//! sequence. A statement that is the sole child of a non-block construct
//! (the braceless body of an `if`, say) is exposed as a one-element view
//! that promotes itself into a real block on the first write. Reads never
//! touch the tree; if nothing is ever inserted, no block is introduced.

use crate::errors::TreeError;
use crate::nodes::NodeData;
use crate::tree::{NodeId, Tree};

/// How a [`StatementList`] maps onto the tree. `Lonely` transitions to
/// `Whole` once, irreversibly, on the first mutating call.
#[derive(Clone, Copy, Debug)]
enum Repr {
    /// The statement is itself a block: the block's native list.
    Whole { block: NodeId },
    /// The statement sits inside a block: a live window over its slot,
    /// growing as statements are spliced in through this view.
    Slice {
        block: NodeId,
        start: usize,
        len: usize,
    },
    /// Unpromoted singleton view over a lone statement.
    Lonely { stmt: NodeId },
}

/// A statement position viewed as a mutable sequence.
#[derive(Debug)]
pub struct StatementList {
    repr: Repr,
}

impl StatementList {
    /// Views `stmt` as a statement sequence.
    ///
    /// If `stmt` is a block, the view is the block's own list (so pushing
    /// appends inside the block). If its direct parent is a block, the view
    /// covers exactly the slot holding `stmt`. Otherwise the view is a lone
    /// singleton that builds a block in place of `stmt` on first insertion.
    ///
    /// # Panics
    ///
    /// Panics if `stmt` is not a statement kind.
    #[must_use]
    pub fn of(tree: &Tree, stmt: NodeId) -> Self {
        let kind = tree.kind(stmt);
        assert!(
            kind.is_statement(),
            "expected a statement, got {kind:?} (node {stmt})"
        );
        if let NodeData::Block { .. } = tree.data(stmt) {
            return StatementList {
                repr: Repr::Whole { block: stmt },
            };
        }
        if let Some(parent) = tree.parent(stmt) {
            if let NodeData::Block { statements } = tree.data(parent) {
                let start = statements
                    .iter()
                    .position(|&s| s == stmt)
                    .unwrap_or_else(|| {
                        panic!("node {stmt} links to block {parent}, but {parent} does not hold it")
                    });
                return StatementList {
                    repr: Repr::Slice {
                        block: parent,
                        start,
                        len: 1,
                    },
                };
            }
        }
        StatementList {
            repr: Repr::Lonely { stmt },
        }
    }

    /// Number of statements visible through this view. Never mutates.
    #[must_use]
    pub fn len(&self, tree: &Tree) -> usize {
        match self.repr {
            Repr::Whole { block } => block_statements(tree, block).len(),
            Repr::Slice { len, .. } => len,
            Repr::Lonely { .. } => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self, tree: &Tree) -> bool {
        self.len(tree) == 0
    }

    /// Statement at `index` within the view, or `None` past the end. Never
    /// mutates: an unpromoted view answers from the lone statement itself.
    #[must_use]
    pub fn get(&self, tree: &Tree, index: usize) -> Option<NodeId> {
        match self.repr {
            Repr::Whole { block } => block_statements(tree, block).get(index).copied(),
            Repr::Slice { block, start, len } => {
                if index < len {
                    block_statements(tree, block).get(start + index).copied()
                } else {
                    None
                }
            }
            Repr::Lonely { stmt } => (index == 0).then_some(stmt),
        }
    }

    /// Inserts `stmt` at `index` within the view, promoting a lone
    /// statement into a real block first if necessary.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvariantViolation`] if `stmt` is already attached, or
    /// if promotion is required but the lone statement has no parent to
    /// splice a block into.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the end of the view.
    pub fn insert(&mut self, tree: &mut Tree, index: usize, stmt: NodeId) -> Result<(), TreeError> {
        // Checked before promotion so a rejected insert never mutates.
        if tree.parent(stmt).is_some() {
            return Err(TreeError::InvariantViolation {
                node: stmt,
                reason: "statement to insert is already attached".to_string(),
            });
        }
        match &mut self.repr {
            Repr::Whole { block } => insert_into_block(tree, *block, index, stmt),
            Repr::Slice { block, start, len } => {
                assert!(index <= *len, "index {index} out of bounds for view of {len}");
                insert_into_block(tree, *block, *start + index, stmt)?;
                *len += 1;
                Ok(())
            }
            Repr::Lonely { stmt: lonely } => {
                let block = promote(tree, *lonely)?;
                self.repr = Repr::Whole { block };
                self.insert(tree, index, stmt)
            }
        }
    }

    /// Appends `stmt` at the end of the view.
    ///
    /// # Errors
    ///
    /// Same conditions as [`StatementList::insert`].
    pub fn push(&mut self, tree: &mut Tree, stmt: NodeId) -> Result<(), TreeError> {
        let len = self.len(tree);
        self.insert(tree, len, stmt)
    }
}

/// Inserts `to_insert` immediately after `node` and anything previously
/// inserted after it through the same position.
///
/// A second `insert_after(node, ..)` call looks the position up again, so it
/// lands directly after `node`: `insert_after(s, t)` then
/// `insert_after(s, u)` yields `[s, u, t]`. When `node` is itself a block,
/// the statement is appended to the block's own list.
///
/// # Errors
///
/// See [`StatementList::insert`].
pub fn insert_after(tree: &mut Tree, node: NodeId, to_insert: NodeId) -> Result<(), TreeError> {
    StatementList::of(tree, node).push(tree, to_insert)
}

/// Inserts `to_insert` immediately before `node`.
///
/// # Errors
///
/// See [`StatementList::insert`].
pub fn insert_before(tree: &mut Tree, node: NodeId, to_insert: NodeId) -> Result<(), TreeError> {
    StatementList::of(tree, node).insert(tree, 0, to_insert)
}

/// Element-wise deep copy of a node list. The copies are unparented and
/// share no child containers with the originals.
pub fn copy_list(tree: &mut Tree, list: &[NodeId]) -> Vec<NodeId> {
    list.iter().map(|&id| tree.copy(id)).collect()
}

/// Moves every statement of `from` to the end of `to`, preserving order.
/// Each element is detached from the source before it is attached to the
/// destination, so no node is ever held by two containers at once.
/// Identical source and destination is a no-op.
///
/// # Panics
///
/// Panics if either node is not a block.
pub fn move_statements(tree: &mut Tree, from: NodeId, to: NodeId) {
    move_container(tree, from, to, |data| match data {
        NodeData::Block { statements } => Some(statements),
        _ => None,
    });
}

/// Moves every body declaration of `from` to the end of `to`, preserving
/// order, with the same one-at-a-time detachment as [`move_statements`].
///
/// # Panics
///
/// Panics if either node is not a type or anonymous class declaration.
pub fn move_body_declarations(tree: &mut Tree, from: NodeId, to: NodeId) {
    move_container(tree, from, to, |data| match data {
        NodeData::TypeDeclaration {
            body_declarations, ..
        }
        | NodeData::AnonymousClassDeclaration {
            body_declarations, ..
        } => Some(body_declarations),
        _ => None,
    });
}

fn move_container(
    tree: &mut Tree,
    from: NodeId,
    to: NodeId,
    container: fn(&mut NodeData) -> Option<&mut Vec<NodeId>>,
) {
    if from == to {
        return;
    }
    // Validate both ends before touching anything.
    let expect_container = |tree: &mut Tree, id: NodeId| {
        assert!(
            container(tree.data_mut(id)).is_some(),
            "node {id} of kind {:?} has no such container",
            tree.kind(id)
        );
    };
    expect_container(tree, from);
    expect_container(tree, to);
    loop {
        let Some(&next) = container(tree.data_mut(from)).and_then(|seq| seq.first()) else {
            break;
        };
        // Detach fully before the destination ever sees the node.
        tree.remove(next);
        match container(tree.data_mut(to)) {
            Some(seq) => seq.push(next),
            None => unreachable!("validated above"),
        }
        tree.set_parent(next, to);
    }
}

/// Builds a block in place of the lone statement and moves the statement in
/// as its first child. Checked before any node is created, so a failed
/// promotion leaves the tree untouched.
fn promote(tree: &mut Tree, lonely: NodeId) -> Result<NodeId, TreeError> {
    if tree.parent(lonely).is_none() {
        return Err(TreeError::InvariantViolation {
            node: lonely,
            reason: "cannot promote a detached statement into a block".to_string(),
        });
    }
    let block = tree.new_block(Vec::new());
    tree.replace_with(lonely, block)?;
    insert_into_block(tree, block, 0, lonely)?;
    Ok(block)
}

fn insert_into_block(
    tree: &mut Tree,
    block: NodeId,
    index: usize,
    stmt: NodeId,
) -> Result<(), TreeError> {
    if tree.parent(stmt).is_some() {
        return Err(TreeError::InvariantViolation {
            node: stmt,
            reason: "statement to insert is already attached".to_string(),
        });
    }
    match tree.data_mut(block) {
        NodeData::Block { statements } => statements.insert(index, stmt),
        other => unreachable!("insert target {block} is not a block: {:?}", other.kind()),
    }
    tree.set_parent(stmt, block);
    Ok(())
}

fn block_statements(tree: &Tree, block: NodeId) -> &[NodeId] {
    match tree.data(block) {
        NodeData::Block { statements } => statements,
        other => unreachable!("node {block} is not a block: {:?}", other.kind()),
    }
}
