//! Tests for clause synthesis

use super::*;

fn builder(names: &[&str], values: Vec<Value>) -> ClauseBuilder {
    ClauseBuilder::new(
        CommandKind::SelectAll,
        names.iter().map(|s| s.to_string()).collect(),
        values,
        ParamStyle::Qmark,
    )
    .expect("valid clause request")
}

#[test]
fn where_clause_pairs_names_and_values() {
    let clause = builder(
        &["id", "name"],
        vec![Value::Int64(1), Value::String("Alpha".into())],
    );
    assert_eq!(clause.where_clause(), "WHERE id = '1' AND name = 'Alpha'");
}

#[test]
fn predicates_have_no_keyword_and_no_trailing_and() {
    let clause = builder(
        &["BFY", "Available"],
        vec![Value::String("2024".into()), Value::Bool(true)],
    );
    assert_eq!(clause.predicates(), "BFY = '2024' AND Available = 'true'");
}

#[test]
fn set_clause_is_comma_joined() {
    let clause = builder(&["x"], vec![Value::Int64(5)]);
    assert_eq!(clause.set_clause(), "SET x = '5'");

    let clause = builder(&["x", "y"], vec![Value::Int64(5), Value::Int64(6)]);
    assert_eq!(clause.set_clause(), "SET x = '5', y = '6'");
}

#[test]
fn column_list_is_parenthesized() {
    let clause = builder(
        &["a", "b", "c"],
        vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)],
    );
    assert_eq!(clause.column_list(), "(a, b, c)");
}

#[test]
fn value_list_renders_values_bare() {
    let clause = builder(
        &["a", "b"],
        vec![Value::Int64(1), Value::String("Alpha".into())],
    );
    assert_eq!(clause.value_list(), "VALUES (1, Alpha)");
}

#[test]
fn empty_request_is_invalid_input() {
    let err = ClauseBuilder::new(
        CommandKind::SelectAll,
        Vec::new(),
        Vec::new(),
        ParamStyle::Qmark,
    )
    .unwrap_err();
    assert!(matches!(err, BexError::InvalidInput(_)));
}

#[test]
fn length_mismatch_is_invalid_input() {
    let err = ClauseBuilder::new(
        CommandKind::Update,
        vec!["a".into(), "b".into()],
        vec![Value::Int64(1)],
        ParamStyle::Qmark,
    )
    .unwrap_err();
    assert!(matches!(err, BexError::InvalidInput(_)));
}

#[test]
fn non_identifier_column_is_rejected() {
    let err = ClauseBuilder::new(
        CommandKind::Select,
        vec!["id; DROP TABLE x".into()],
        vec![Value::Int64(1)],
        ParamStyle::Qmark,
    )
    .unwrap_err();
    assert!(matches!(err, BexError::InvalidInput(_)));
}

#[test]
fn duplicate_columns_are_preserved_in_order() {
    let clause = builder(&["id", "id"], vec![Value::Int64(1), Value::Int64(2)]);
    assert_eq!(clause.where_clause(), "WHERE id = '1' AND id = '2'");
    assert_eq!(clause.criteria().len(), 2);
}

#[test]
fn embedded_quotes_are_doubled() {
    let clause = builder(&["name"], vec![Value::String("O'Brien".into())]);
    assert_eq!(clause.where_clause(), "WHERE name = 'O''Brien'");
}

#[test]
fn where_bound_emits_qmark_placeholders() {
    let clause = builder(
        &["id", "name"],
        vec![Value::Int64(1), Value::String("Alpha".into())],
    );
    let bound = clause.where_bound();
    assert_eq!(bound.sql, "WHERE id = ? AND name = ?");
    assert_eq!(
        bound.values,
        vec![Value::Int64(1), Value::String("Alpha".into())]
    );
}

#[test]
fn bound_clauses_follow_the_parameter_style() {
    let names: Vec<String> = vec!["x".into(), "y".into()];
    let values = vec![Value::Int64(1), Value::Int64(2)];

    let numeric = ClauseBuilder::new(
        CommandKind::Update,
        names.clone(),
        values.clone(),
        ParamStyle::Numeric,
    )
    .unwrap();
    assert_eq!(numeric.set_bound().sql, "SET x = $1, y = $2");

    let named = ClauseBuilder::new(
        CommandKind::Update,
        names.clone(),
        values.clone(),
        ParamStyle::Named,
    )
    .unwrap();
    assert_eq!(named.where_bound().sql, "WHERE x = :x AND y = :y");

    let at = ClauseBuilder::new(CommandKind::Update, names, values, ParamStyle::At).unwrap();
    assert_eq!(at.where_bound().sql, "WHERE x = @x AND y = @y");
}
