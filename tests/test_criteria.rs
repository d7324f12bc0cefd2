use request_criteria::query::Conjunction;
use request_criteria::{
    CriteriaConfig, CriteriaError, Operator, QueryPlan, RequestCriteria, RequestParams,
    Searchable, SearchableFields,
};

fn declared_fields() -> SearchableFields {
    SearchableFields::new()
        .field("name")
        .field_with("email", Operator::Like)
}

fn criteria_for(pairs: &[(&str, &str)]) -> RequestCriteria {
    let params = RequestParams::from_pairs(pairs.iter().copied());
    RequestCriteria::from_request(&CriteriaConfig::default(), &params)
}

fn plan_for(pairs: &[(&str, &str)]) -> QueryPlan {
    let mut plan = QueryPlan::new();
    criteria_for(pairs)
        .apply(&mut plan, &declared_fields())
        .unwrap();
    plan
}

#[test]
fn test_no_search_leaves_predicates_untouched() {
    assert!(plan_for(&[]).predicates.is_empty());
    assert!(
        plan_for(&[("orderBy", "created_at"), ("filter", "id")])
            .predicates
            .is_empty()
    );
}

#[test]
fn test_empty_search_is_treated_as_absent() {
    assert!(plan_for(&[("search", "")]).predicates.is_empty());
}

#[test]
fn test_search_with_no_declared_fields_is_skipped() {
    let mut plan = QueryPlan::new();
    criteria_for(&[("search", "john"), ("searchFields", "name")])
        .apply(&mut plan, &SearchableFields::new())
        .unwrap();
    assert_eq!(plan, QueryPlan::new());
}

#[test]
fn test_scalar_search_matches_any_field_as_one_group() {
    let plan = plan_for(&[("search", "john")]);
    assert_eq!(plan.predicates.len(), 2);

    assert_eq!(plan.predicates[0].conjunction, Conjunction::And);
    assert_eq!(plan.predicates[0].field, "name");
    assert_eq!(plan.predicates[0].operator, Operator::Eq);
    assert_eq!(plan.predicates[0].value, "john");

    assert_eq!(plan.predicates[1].conjunction, Conjunction::Or);
    assert_eq!(plan.predicates[1].field, "email");
    assert_eq!(plan.predicates[1].operator, Operator::Like);
    assert_eq!(plan.predicates[1].value, "%john%");
}

#[test]
fn test_per_field_search_uses_each_fields_own_value() {
    let plan = plan_for(&[("search", "name:john;email:doe@x.com")]);
    assert_eq!(plan.predicates.len(), 2);
    assert_eq!(plan.predicates[0].value, "john");
    assert_eq!(plan.predicates[1].value, "%doe@x.com%");
}

#[test]
fn test_mixed_search_falls_back_for_uncovered_fields() {
    let plan = plan_for(&[("search", "john;email:doe@x.com")]);
    assert_eq!(plan.predicates.len(), 2);
    assert_eq!(plan.predicates[0].field, "name");
    assert_eq!(plan.predicates[0].value, "john");
    assert_eq!(plan.predicates[1].field, "email");
    assert_eq!(plan.predicates[1].value, "%doe@x.com%");
}

#[test]
fn test_search_fields_narrows_the_field_set() {
    let plan = plan_for(&[("search", "john"), ("searchFields", "email")]);
    assert_eq!(plan.predicates.len(), 1);
    assert_eq!(plan.predicates[0].conjunction, Conjunction::And);
    assert_eq!(plan.predicates[0].field, "email");
    assert_eq!(plan.predicates[0].operator, Operator::Like);
    assert_eq!(plan.predicates[0].value, "%john%");
}

#[test]
fn test_search_fields_operator_override() {
    let plan = plan_for(&[("search", "john"), ("searchFields", "email:=")]);
    assert_eq!(plan.predicates.len(), 1);
    assert_eq!(plan.predicates[0].operator, Operator::Eq);
    assert_eq!(plan.predicates[0].value, "john");
}

#[test]
fn test_search_fields_unaccepted_override_keeps_declared_operator() {
    let plan = plan_for(&[("search", "john"), ("searchFields", "email:>")]);
    assert_eq!(plan.predicates.len(), 1);
    assert_eq!(plan.predicates[0].operator, Operator::Like);
}

#[test]
fn test_unknown_search_fields_are_rejected() {
    let mut plan = QueryPlan::new();
    let result = criteria_for(&[("search", "john"), ("searchFields", "nonexistent")])
        .apply(&mut plan, &declared_fields());
    match result {
        Err(CriteriaError::InvalidFieldSelection { rejected }) => {
            assert_eq!(rejected, vec!["nonexistent".to_string()]);
        }
        other => panic!("expected InvalidFieldSelection, got {other:?}"),
    }
}

#[test]
fn test_order_by_defaults_to_ascending() {
    let plan = plan_for(&[("orderBy", "created_at")]);
    let order = plan.order_by.unwrap();
    assert_eq!(order.field, "created_at");
    assert_eq!(order.direction, "asc");
}

#[test]
fn test_sorted_by_is_passed_through_verbatim() {
    let plan = plan_for(&[("orderBy", "created_at"), ("sortedBy", "random")]);
    assert_eq!(plan.order_by.unwrap().direction, "random");
}

#[test]
fn test_sorted_by_without_order_by_does_nothing() {
    let plan = plan_for(&[("sortedBy", "desc")]);
    assert!(plan.order_by.is_none());
}

#[test]
fn test_filter_restricts_projection_in_order() {
    let plan = plan_for(&[("filter", "id;name")]);
    assert_eq!(
        plan.projection,
        Some(vec!["id".to_string(), "name".to_string()])
    );
}

#[test]
fn test_with_registers_eager_loads() {
    let plan = plan_for(&[("with", "author;comments")]);
    assert_eq!(
        plan.eager_load,
        vec!["author".to_string(), "comments".to_string()]
    );
}

#[test]
fn test_all_stages_compose() {
    let plan = plan_for(&[
        ("search", "john"),
        ("searchFields", "name"),
        ("orderBy", "created_at"),
        ("sortedBy", "desc"),
        ("filter", "id;name"),
        ("with", "author"),
    ]);
    assert_eq!(plan.predicates.len(), 1);
    assert_eq!(plan.predicates[0].field, "name");
    assert_eq!(plan.order_by.as_ref().unwrap().direction, "desc");
    assert_eq!(plan.projection.as_ref().unwrap().len(), 2);
    assert_eq!(plan.eager_load, vec!["author".to_string()]);
}

#[test]
fn test_apply_is_idempotent_across_fresh_builders() {
    let pairs = [
        ("search", "john;email:doe@x.com"),
        ("orderBy", "created_at"),
        ("filter", "id;name"),
        ("with", "author"),
    ];
    assert_eq!(plan_for(&pairs), plan_for(&pairs));
}

struct UserRepository;

impl Searchable for UserRepository {
    fn fields_searchable(&self) -> SearchableFields {
        declared_fields()
    }
}

#[test]
fn test_apply_for_uses_the_owners_declared_fields() {
    let mut plan = QueryPlan::new();
    criteria_for(&[("search", "john")])
        .apply_for(&mut plan, &UserRepository)
        .unwrap();
    assert_eq!(plan.predicates.len(), 2);
}

#[test]
fn test_renamed_parameters_are_honored() {
    let mut config = CriteriaConfig::default();
    config.params.search = "q".to_string();

    let params = RequestParams::from_pairs([("q", "john"), ("search", "ignored")]);
    let criteria = RequestCriteria::from_request(&config, &params);

    let mut plan = QueryPlan::new();
    criteria.apply(&mut plan, &declared_fields()).unwrap();
    assert_eq!(plan.predicates.len(), 2);
    assert_eq!(plan.predicates[0].value, "john");
}
