//! Mutation-safe statement list tests: lazy promotion, insertion order,
//! bulk copy and move.

use anyhow::Result;
use arbor_ast::errors::TreeError;
use arbor_ast::mutate::{
    copy_list, insert_after, insert_before, move_body_declarations, move_statements,
    StatementList,
};
use arbor_ast::nodes::NodeData;

use crate::utils::{
    assert_single_parent_invariant, marker, marker_labels, method_decl, method_fixture,
};

fn then_block(f: &crate::utils::Fixture) -> arbor_ast::tree::NodeId {
    let NodeData::IfStatement {
        then_statement: Some(block),
        ..
    } = f.tree.data(f.if_stmt)
    else {
        panic!("if statement lost its then branch");
    };
    *block
}

#[test]
fn reading_a_lone_statement_view_never_mutates() {
    let f = method_fixture();
    let before = f.tree.clone();
    let list = StatementList::of(&f.tree, f.lone_stmt);
    assert_eq!(list.len(&f.tree), 1);
    assert!(!list.is_empty(&f.tree));
    assert_eq!(list.get(&f.tree, 0), Some(f.lone_stmt));
    assert_eq!(list.get(&f.tree, 1), None);
    assert_eq!(f.tree, before, "reads must leave the tree untouched");
}

#[test]
fn first_insert_promotes_the_lone_statement_into_a_block() -> Result<()> {
    let mut f = method_fixture();
    let t = marker(&mut f.tree, "t");
    insert_after(&mut f.tree, f.lone_stmt, t)?;

    let block = then_block(&f);
    assert_eq!(f.tree.kind(block), arbor_ast::nodes::NodeKind::Block);
    assert_eq!(marker_labels(&f.tree, block), ["count", "t"]);
    assert_eq!(f.tree.parent(f.lone_stmt), Some(block));
    assert_eq!(f.tree.parent(t), Some(block));
    assert_single_parent_invariant(&f.tree);
    Ok(())
}

#[test]
fn repeated_insert_after_lands_directly_after_the_node() -> Result<()> {
    let mut f = method_fixture();
    let t = marker(&mut f.tree, "t");
    let u = marker(&mut f.tree, "u");
    insert_after(&mut f.tree, f.lone_stmt, t)?;
    insert_after(&mut f.tree, f.lone_stmt, u)?;
    assert_eq!(marker_labels(&f.tree, then_block(&f)), ["count", "u", "t"]);
    assert_single_parent_invariant(&f.tree);
    Ok(())
}

#[test]
fn insert_before_prepends_to_the_position() -> Result<()> {
    let mut f = method_fixture();
    let t = marker(&mut f.tree, "t");
    let u = marker(&mut f.tree, "u");
    insert_before(&mut f.tree, f.lone_stmt, t)?;
    insert_before(&mut f.tree, f.lone_stmt, u)?;
    assert_eq!(marker_labels(&f.tree, then_block(&f)), ["t", "u", "count"]);
    assert_single_parent_invariant(&f.tree);
    Ok(())
}

#[test]
fn insert_after_a_block_appends_inside_it() -> Result<()> {
    let mut f = method_fixture();
    let x = marker(&mut f.tree, "x");
    insert_after(&mut f.tree, f.method_body, x)?;
    let NodeData::Block { statements } = f.tree.data(f.method_body) else {
        panic!("method body is not a block");
    };
    assert_eq!(statements.as_slice(), &[f.if_stmt, x]);
    Ok(())
}

#[test]
fn slice_view_grows_with_each_insertion() -> Result<()> {
    let mut tree = arbor_ast::tree::Tree::new();
    let a = marker(&mut tree, "a");
    let b = marker(&mut tree, "b");
    let c = marker(&mut tree, "c");
    let block = tree.new_block(vec![a, b, c]);

    let mut view = StatementList::of(&tree, b);
    assert_eq!(view.len(&tree), 1);
    let t = marker(&mut tree, "t");
    let u = marker(&mut tree, "u");
    view.push(&mut tree, t)?;
    view.push(&mut tree, u)?;

    assert_eq!(marker_labels(&tree, block), ["a", "b", "t", "u", "c"]);
    assert_eq!(view.len(&tree), 3);
    assert_eq!(view.get(&tree, 0), Some(b));
    assert_eq!(view.get(&tree, 1), Some(t));
    assert_eq!(view.get(&tree, 2), Some(u));
    assert_eq!(view.get(&tree, 3), None);
    assert_single_parent_invariant(&tree);
    Ok(())
}

#[test]
fn insert_rejects_an_attached_statement_without_mutating() {
    let mut f = method_fixture();
    let before = f.tree.clone();
    let err = insert_after(&mut f.tree, f.lone_stmt, f.if_stmt).unwrap_err();
    assert!(
        matches!(err, TreeError::InvariantViolation { node, .. } if node == f.if_stmt),
        "unexpected error: {err}"
    );
    assert_eq!(f.tree, before, "a rejected insert must not promote");
}

#[test]
fn inserting_relative_to_a_detached_statement_fails() {
    let mut f = method_fixture();
    let lonely = marker(&mut f.tree, "lonely");
    let t = marker(&mut f.tree, "t");
    let before = f.tree.clone();
    let err = insert_after(&mut f.tree, lonely, t).unwrap_err();
    assert!(
        matches!(err, TreeError::InvariantViolation { node, .. } if node == lonely),
        "unexpected error: {err}"
    );
    assert_eq!(f.tree, before);
}

#[test]
fn move_statements_transfers_all_in_order() {
    let mut tree = arbor_ast::tree::Tree::new();
    let m0 = marker(&mut tree, "m0");
    let m1 = marker(&mut tree, "m1");
    let m2 = marker(&mut tree, "m2");
    let m3 = marker(&mut tree, "m3");
    let from = tree.new_block(vec![m1, m2, m3]);
    let to = tree.new_block(vec![m0]);

    move_statements(&mut tree, from, to);
    assert_eq!(marker_labels(&tree, from), Vec::<String>::new());
    assert_eq!(marker_labels(&tree, to), ["m0", "m1", "m2", "m3"]);
    for stmt in [m1, m2, m3] {
        assert_eq!(tree.parent(stmt), Some(to));
    }
    assert_single_parent_invariant(&tree);

    // moving out of an empty source does nothing
    move_statements(&mut tree, from, to);
    assert_eq!(marker_labels(&tree, to), ["m0", "m1", "m2", "m3"]);
}

#[test]
fn move_statements_to_itself_is_a_no_op() {
    let mut tree = arbor_ast::tree::Tree::new();
    let m1 = marker(&mut tree, "m1");
    let m2 = marker(&mut tree, "m2");
    let block = tree.new_block(vec![m1, m2]);
    move_statements(&mut tree, block, block);
    assert_eq!(marker_labels(&tree, block), ["m1", "m2"]);
}

#[test]
fn move_body_declarations_transfers_members() {
    let mut tree = arbor_ast::tree::Tree::new();
    let m1 = method_decl(&mut tree, "one", false, &[]);
    let m2 = method_decl(&mut tree, "two", false, &[]);
    let from = tree.new_type_declaration("Source", None, vec![m1, m2]);
    let to = tree.new_type_declaration("Target", None, Vec::new());

    move_body_declarations(&mut tree, from, to);
    assert!(arbor_ast::query::body_declarations(&tree, from).is_empty());
    assert_eq!(arbor_ast::query::body_declarations(&tree, to), &[m1, m2]);
    assert_eq!(tree.parent(m1), Some(to));
    assert_single_parent_invariant(&tree);
}

#[test]
fn copy_list_yields_independent_unparented_copies() {
    let mut tree = arbor_ast::tree::Tree::new();
    let m1 = marker(&mut tree, "m1");
    let m2 = marker(&mut tree, "m2");
    let _block = tree.new_block(vec![m1, m2]);

    let copies = copy_list(&mut tree, &[m1, m2]);
    assert_eq!(copies.len(), 2);
    for (&original, &copy) in [m1, m2].iter().zip(copies.iter()) {
        assert_ne!(copy, original);
        assert_eq!(tree.parent(copy), None);
    }
    assert_single_parent_invariant(&tree);
}
