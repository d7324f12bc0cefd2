use crate::criteria::{Operator, SearchableFields};
use serde::Serialize;

/// Contract a query backend exposes for criteria application. The handle is
/// mutated in place by exactly one logical caller at a time.
pub trait QueryBuilder {
    fn and_where(&mut self, field: &str, operator: Operator, value: &str);
    fn or_where(&mut self, field: &str, operator: Operator, value: &str);
    fn order_by(&mut self, field: &str, direction: &str);
    fn select(&mut self, fields: &[String]);
    fn eager_load(&mut self, relations: &[String]);
}

/// Contract a data owner exposes: which fields may be searched, and how
pub trait Searchable {
    fn fields_searchable(&self) -> SearchableFields;
}

/// How a predicate joins the group it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Conjunction {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedPredicate {
    pub conjunction: Conjunction,
    pub field: String,
    pub operator: Operator,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSpec {
    pub field: String,
    pub direction: String,
}

/// In-memory query builder that records everything applied to it.
///
/// Two plans built from the same request parameters compare equal, which is
/// what tests assert against; the inspection CLI renders plans for humans.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryPlan {
    pub predicates: Vec<PlannedPredicate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub eager_load: Vec<String>,
}

impl QueryPlan {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueryBuilder for QueryPlan {
    fn and_where(&mut self, field: &str, operator: Operator, value: &str) {
        self.predicates.push(PlannedPredicate {
            conjunction: Conjunction::And,
            field: field.to_string(),
            operator,
            value: value.to_string(),
        });
    }

    fn or_where(&mut self, field: &str, operator: Operator, value: &str) {
        self.predicates.push(PlannedPredicate {
            conjunction: Conjunction::Or,
            field: field.to_string(),
            operator,
            value: value.to_string(),
        });
    }

    fn order_by(&mut self, field: &str, direction: &str) {
        self.order_by = Some(OrderSpec {
            field: field.to_string(),
            direction: direction.to_string(),
        });
    }

    fn select(&mut self, fields: &[String]) {
        self.projection = Some(fields.to_vec());
    }

    fn eager_load(&mut self, relations: &[String]) {
        self.eager_load.extend_from_slice(relations);
    }
}
