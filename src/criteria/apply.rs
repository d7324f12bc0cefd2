use super::error::CriteriaError;
use super::fields::{Operator, SearchableFields, narrow};
use super::parser::{SearchTerms, parse_search_term};
use crate::config::CriteriaConfig;
use crate::query::{QueryBuilder, Searchable};
use crate::request::RequestParams;
use std::collections::HashMap;

/// A single comparison ready to hand to a query backend. The value already
/// carries any `%...%` wrapping its operator requires.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: String,
    pub operator: Operator,
    pub value: String,
}

/// Everything parsed out of one request, consumed once by the
/// query-application step. Holds no persistent state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    /// Narrowed searchable fields; empty when the request carried no search
    pub fields: SearchableFields,
    pub per_field_value: HashMap<String, String>,
    pub fallback_value: Option<String>,
    /// `(column, direction)`; the direction is passed through verbatim
    pub order_by: Option<(String, String)>,
    pub projection: Option<Vec<String>>,
    pub eager_load: Option<Vec<String>>,
}

impl FilterSpec {
    /// Build the search predicate group.
    ///
    /// Fields are visited in declared order. Each field resolves to its
    /// explicit per-field value, else the fallback value, else contributes
    /// nothing.
    pub fn search_predicates(&self) -> Vec<Predicate> {
        self.fields
            .iter()
            .fold(Vec::new(), |mut group, (field, operator)| {
                let value = self
                    .per_field_value
                    .get(field)
                    .or(self.fallback_value.as_ref());
                if let Some(value) = value {
                    group.push(Predicate {
                        field: field.to_string(),
                        operator,
                        value: operator.pattern_value(value),
                    });
                }
                group
            })
    }

    /// Apply this spec to a query builder.
    ///
    /// The predicate group is AND-ed into the outer query as a whole;
    /// within the group, fields OR together.
    pub fn apply_to<Q: QueryBuilder>(&self, query: &mut Q) {
        let mut predicates = self.search_predicates().into_iter();
        if let Some(first) = predicates.next() {
            query.and_where(&first.field, first.operator, &first.value);
            for predicate in predicates {
                query.or_where(&predicate.field, predicate.operator, &predicate.value);
            }
        }

        if let Some((field, direction)) = &self.order_by {
            query.order_by(field, direction);
        }
        if let Some(projection) = &self.projection {
            query.select(projection);
        }
        if let Some(relations) = &self.eager_load {
            query.eager_load(relations);
        }
    }
}

/// Criteria extracted from one request through the configured parameter
/// names. Empty parameter values count as not supplied.
#[derive(Debug, Clone)]
pub struct RequestCriteria {
    search: Option<String>,
    search_fields: Option<Vec<String>>,
    projection: Option<Vec<String>>,
    order_by: Option<String>,
    sorted_by: String,
    eager_load: Option<Vec<String>>,
    accepted_operators: Vec<Operator>,
}

impl RequestCriteria {
    pub fn from_request(config: &CriteriaConfig, request: &RequestParams) -> Self {
        let params = &config.params;
        Self {
            search: request.get_non_empty(&params.search).map(str::to_string),
            search_fields: split_list(request.get_non_empty(&params.search_fields)),
            projection: split_list(request.get_non_empty(&params.filter)),
            order_by: request.get_non_empty(&params.order_by).map(str::to_string),
            sorted_by: request
                .get_non_empty(&params.sorted_by)
                .unwrap_or("asc")
                .to_string(),
            eager_load: split_list(request.get_non_empty(&params.with)),
            accepted_operators: config.accepted_operators.clone(),
        }
    }

    /// Requested narrowing entries, for diagnostics. Empty when the request
    /// did not ask to narrow.
    pub fn requested_fields(&self) -> &[String] {
        self.search_fields.as_deref().unwrap_or(&[])
    }

    /// Parse this request into a [`FilterSpec`] against the declared fields.
    ///
    /// Search parsing is skipped entirely when the search parameter is
    /// absent or no fields are declared.
    pub fn filter_spec(&self, declared: &SearchableFields) -> Result<FilterSpec, CriteriaError> {
        let (fields, per_field_value, fallback_value) = match self.search.as_deref() {
            Some(search) if !declared.is_empty() => {
                let fields = narrow(
                    declared,
                    self.search_fields.as_deref(),
                    &self.accepted_operators,
                )?;
                let SearchTerms {
                    mut per_field,
                    fallback,
                } = parse_search_term(search);
                // values keyed by fields outside the narrowed set can never
                // be consulted
                per_field.retain(|name, _| fields.contains(name));
                (fields, per_field, fallback)
            }
            _ => (SearchableFields::new(), HashMap::new(), None),
        };

        Ok(FilterSpec {
            fields,
            per_field_value,
            fallback_value,
            order_by: self
                .order_by
                .clone()
                .map(|field| (field, self.sorted_by.clone())),
            projection: self.projection.clone(),
            eager_load: self.eager_load.clone(),
        })
    }

    /// Parse and apply in one step. Stage order is fixed: search predicates,
    /// then ordering, then projection, then eager loads.
    pub fn apply<Q: QueryBuilder>(
        &self,
        query: &mut Q,
        declared: &SearchableFields,
    ) -> Result<(), CriteriaError> {
        let spec = self.filter_spec(declared)?;
        spec.apply_to(query);
        Ok(())
    }

    /// Apply against a data owner's declared searchable fields
    pub fn apply_for<Q: QueryBuilder, S: Searchable>(
        &self,
        query: &mut Q,
        owner: &S,
    ) -> Result<(), CriteriaError> {
        self.apply(query, &owner.fields_searchable())
    }
}

fn split_list(raw: Option<&str>) -> Option<Vec<String>> {
    let list: Vec<String> = raw?
        .split(';')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();
    (!list.is_empty()).then_some(list)
}
