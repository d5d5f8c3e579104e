//! Structural accessor tests: ancestor queries, element dispatch, naming.

use arbor_ast::element::{Element, VariableElement};
use arbor_ast::nodes::NodeKind;
use arbor_ast::query;

use crate::utils::{marker, method_decl, method_fixture};

#[test]
fn enclosing_method_found_from_a_deep_node() {
    let f = method_fixture();
    assert_eq!(query::enclosing_method(&f.tree, f.count_ref), Some(f.method));
}

#[test]
fn ancestor_search_includes_the_start_node() {
    let f = method_fixture();
    assert_eq!(query::enclosing_method(&f.tree, f.method), Some(f.method));
}

#[test]
fn ancestor_search_terminates_at_the_root() {
    let f = method_fixture();
    assert_eq!(query::enclosing_method(&f.tree, f.unit), None);
    assert_eq!(
        f.tree
            .nearest_ancestor_of_kind(f.count_ref, NodeKind::WhileStatement),
        None
    );
}

#[test]
fn owning_statement_finds_the_nearest_statement() {
    let f = method_fixture();
    assert_eq!(
        query::owning_statement(&f.tree, f.count_ref),
        Some(f.lone_stmt)
    );
    // a statement owns itself
    assert_eq!(
        query::owning_statement(&f.tree, f.if_stmt),
        Some(f.if_stmt)
    );
}

#[test]
fn compilation_unit_and_enclosing_type() {
    let f = method_fixture();
    assert_eq!(query::compilation_unit(&f.tree, f.count_ref), Some(f.unit));
    assert_eq!(query::enclosing_type(&f.tree, f.count_ref), Some(f.class));
    assert_eq!(
        query::enclosing_type_element(&f.tree, f.count_ref),
        Some(f.class_element)
    );
}

#[test]
fn enclosing_type_matches_anonymous_classes_too() {
    let mut f = method_fixture();
    let stmt = marker(&mut f.tree, "inside");
    let body = f.tree.new_block(vec![stmt]);
    let run = f
        .tree
        .new_method_declaration("run", false, None, Vec::new(), Some(body));
    let anon = f.tree.new_anonymous_class_declaration(None, vec![run]);
    assert_eq!(query::enclosing_type(&f.tree, stmt), Some(anon));
}

#[test]
fn enclosing_element_prefers_the_nearest_declaring_ancestor() {
    let f = method_fixture();
    assert_eq!(
        query::enclosing_element(&f.tree, f.count_ref),
        Some(f.method_element)
    );
    // the method declares itself
    assert_eq!(
        query::enclosing_element(&f.tree, f.method),
        Some(f.method_element)
    );
}

#[test]
fn declared_element_dispatches_on_kind() {
    let f = method_fixture();
    assert_eq!(
        query::declared_element(&f.tree, f.class),
        Some(f.class_element)
    );
    assert_eq!(
        query::declared_element(&f.tree, f.method),
        Some(f.method_element)
    );
    assert_eq!(
        query::declared_element(&f.tree, f.param),
        Some(f.count_element)
    );
    assert_eq!(query::declared_element(&f.tree, f.lone_stmt), None);
    assert_eq!(query::declared_element(&f.tree, f.unit), None);
}

#[test]
fn trim_parentheses_unwraps_nested_wrappers() {
    let mut f = method_fixture();
    let inner = f.tree.new_simple_name("x", None);
    let once = f.tree.new_parenthesized_expression(inner);
    let twice = f.tree.new_parenthesized_expression(once);
    assert_eq!(query::trim_parentheses(&f.tree, twice), inner);
    assert_eq!(query::trim_parentheses(&f.tree, inner), inner);
}

#[test]
fn variable_element_sees_through_parentheses() {
    let mut f = method_fixture();
    let name = f.tree.new_simple_name("count", Some(f.count_element));
    let wrapped = f.tree.new_parenthesized_expression(name);
    assert_eq!(
        query::variable_element(&f.tree, &f.elements, wrapped),
        Some(f.count_element)
    );
}

#[test]
fn variable_element_rejects_non_variable_names() {
    let mut f = method_fixture();
    // a name bound to a method element does not denote a variable
    let name = f.tree.new_simple_name("frob", Some(f.method_element));
    assert_eq!(query::variable_element(&f.tree, &f.elements, name), None);
    let invocation = f
        .tree
        .new_method_invocation(None, Vec::new(), Some(f.method_element));
    assert_eq!(
        query::variable_element(&f.tree, &f.elements, invocation),
        None
    );
}

#[test]
fn variable_element_takes_field_access_bindings_directly() {
    let mut f = method_fixture();
    let field_element = f.elements.insert(Element::Variable(VariableElement {
        name: "size".to_string(),
        type_name: "int".to_string(),
    }));
    let object = f.tree.new_simple_name("widget", None);
    let access = f.tree.new_field_access(object, Some(field_element));
    assert_eq!(
        query::variable_element(&f.tree, &f.elements, access),
        Some(field_element)
    );
    let super_access = f.tree.new_super_field_access(Some(field_element));
    assert_eq!(
        query::variable_element(&f.tree, &f.elements, super_access),
        Some(field_element)
    );
}

#[test]
fn executable_element_dispatches_on_invocation_kinds() {
    let mut f = method_fixture();
    let invocation = f
        .tree
        .new_method_invocation(None, Vec::new(), Some(f.method_element));
    let super_invocation = f
        .tree
        .new_super_method_invocation(Vec::new(), Some(f.method_element));
    let creation = f
        .tree
        .new_class_instance_creation(Vec::new(), Some(f.method_element));
    assert_eq!(
        query::executable_element(&f.tree, invocation),
        Some(f.method_element)
    );
    assert_eq!(
        query::executable_element(&f.tree, super_invocation),
        Some(f.method_element)
    );
    assert_eq!(
        query::executable_element(&f.tree, creation),
        Some(f.method_element)
    );
    let name = f.tree.new_simple_name("frob", Some(f.method_element));
    assert_eq!(query::executable_element(&f.tree, name), None);
}

#[test]
fn owning_return_type_comes_from_the_method_element() {
    let f = method_fixture();
    assert_eq!(
        query::owning_return_type(&f.tree, &f.elements, f.count_ref),
        Some("int")
    );
    assert_eq!(
        query::owning_return_type(&f.tree, &f.elements, f.unit),
        None
    );
}

#[test]
fn body_declarations_for_type_kinds() {
    let f = method_fixture();
    assert_eq!(query::body_declarations(&f.tree, f.class), &[f.method]);
    assert_eq!(
        query::enclosing_type_body_declarations(&f.tree, f.count_ref),
        Some(&[f.method][..])
    );
    assert_eq!(
        query::enclosing_type_body_declarations(&f.tree, f.unit),
        None
    );
}

#[test]
#[should_panic(expected = "does not contain body declarations")]
fn body_declarations_rejects_non_type_nodes() {
    let f = method_fixture();
    let _ = query::body_declarations(&f.tree, f.method);
}

#[test]
fn field_and_method_declaration_filters() {
    let mut tree = arbor_ast::tree::Tree::new();
    let frag_a = tree.new_variable_declaration_fragment("a", None, None);
    let frag_b = tree.new_variable_declaration_fragment("b", None, None);
    let field = tree.new_field_declaration(vec![frag_a, frag_b]);
    let m1 = method_decl(&mut tree, "one", false, &[]);
    let m2 = method_decl(&mut tree, "two", false, &[]);
    let class = tree.new_type_declaration("Holder", None, vec![field, m1, m2]);

    assert_eq!(query::field_declarations(&tree, class), vec![field]);
    assert_eq!(query::method_declarations(&tree, class), vec![m1, m2]);
    assert_eq!(query::all_fragments(&tree, class), vec![frag_a, frag_b]);
}

#[test]
fn qualified_main_type_name_honors_the_default_package() {
    let f = method_fixture();
    assert_eq!(
        query::qualified_main_type_name(&f.tree, f.unit),
        "demo.Widget"
    );
    let mut tree = arbor_ast::tree::Tree::new();
    let unit = tree.new_compilation_unit("", "Widget", Vec::new());
    assert_eq!(query::qualified_main_type_name(&tree, unit), "Widget");
}

#[test]
fn source_file_name_maps_packages_to_paths() {
    let f = method_fixture();
    let sep = std::path::MAIN_SEPARATOR;
    assert_eq!(
        query::source_file_name(&f.tree, f.unit),
        format!("demo{sep}Widget.java")
    );
}
