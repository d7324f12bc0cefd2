use super::error::CriteriaError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Comparison operators a searchable field can be matched with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
}

impl FromStr for Operator {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "=" | "eq" => Ok(Operator::Eq),
            "!=" | "<>" | "ne" => Ok(Operator::Ne),
            ">" | "gt" => Ok(Operator::Gt),
            ">=" | "gte" => Ok(Operator::Gte),
            "<" | "lt" => Ok(Operator::Lt),
            "<=" | "lte" => Ok(Operator::Lte),
            "like" => Ok(Operator::Like),
            "not like" | "notlike" => Ok(Operator::NotLike),
            _ => Err(CriteriaError::UnknownOperator(s.to_string())),
        }
    }
}

impl Operator {
    /// Canonical spelling as a query backend expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Like => "like",
            Operator::NotLike => "not like",
        }
    }

    /// Whether this operator matches against a `%value%` pattern
    pub fn is_pattern(&self) -> bool {
        matches!(self, Operator::Like | Operator::NotLike)
    }

    /// Wrap a raw search value the way this operator consumes it
    pub fn pattern_value(&self, value: &str) -> String {
        if self.is_pattern() {
            format!("%{value}%")
        } else {
            value.to_string()
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = CriteriaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operator> for String {
    fn from(operator: Operator) -> Self {
        operator.as_str().to_string()
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered mapping from field name to its match operator, as declared by a
/// data owner. Iteration order is declaration order, which fixes the order
/// search predicates are emitted in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchableFields {
    entries: Vec<(String, Operator)>,
}

impl SearchableFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field matched with the default `=` operator
    pub fn field(self, name: impl Into<String>) -> Self {
        self.field_with(name, Operator::Eq)
    }

    /// Declare a field with an explicit operator. Re-declaring a field
    /// updates its operator in place.
    pub fn field_with(mut self, name: impl Into<String>, operator: Operator) -> Self {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            entry.1 = operator;
        } else {
            self.entries.push((name, operator));
        }
        self
    }

    pub fn operator(&self, name: &str) -> Option<Operator> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, operator)| *operator)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Operator)> {
        self.entries
            .iter()
            .map(|(name, operator)| (name.as_str(), *operator))
    }
}

impl FromStr for SearchableFields {
    type Err = CriteriaError;

    /// Parse the `name[:operator][;name[:operator]]...` declaration form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = SearchableFields::new();
        for segment in s.split(';').filter(|segment| !segment.is_empty()) {
            fields = match segment.split_once(':') {
                Some((name, operator)) => fields.field_with(name, operator.parse()?),
                None => fields.field(segment),
            };
        }
        Ok(fields)
    }
}

/// Narrow a declared field set to the fields a request asked for.
///
/// Each requested entry is either `name` or `name:operator`. An operator
/// suffix overrides the declared operator when it parses and is in the
/// accepted list; an unrecognized suffix is dropped and the entry falls
/// back to plain name matching. Only declared fields can be retained, in
/// declared order.
pub fn narrow(
    declared: &SearchableFields,
    requested: Option<&[String]>,
    accepted: &[Operator],
) -> Result<SearchableFields, CriteriaError> {
    let Some(requested) = requested.filter(|requested| !requested.is_empty()) else {
        return Ok(declared.clone());
    };

    let mut names: Vec<&str> = Vec::with_capacity(requested.len());
    let mut overrides: Vec<(&str, Operator)> = Vec::new();
    for entry in requested {
        match entry.split_once(':') {
            Some((name, suffix)) => {
                names.push(name);
                if let Ok(operator) = suffix.parse::<Operator>() {
                    if accepted.contains(&operator) {
                        overrides.retain(|(existing, _)| *existing != name);
                        overrides.push((name, operator));
                    }
                }
            }
            None => names.push(entry.as_str()),
        }
    }

    let mut narrowed = SearchableFields::new();
    for (name, declared_operator) in declared.iter() {
        if names.contains(&name) {
            let operator = overrides
                .iter()
                .find(|(existing, _)| *existing == name)
                .map(|(_, operator)| *operator)
                .unwrap_or(declared_operator);
            narrowed = narrowed.field_with(name, operator);
        }
    }

    if narrowed.is_empty() {
        return Err(CriteriaError::InvalidFieldSelection {
            rejected: names.iter().map(|name| name.to_string()).collect(),
        });
    }

    Ok(narrowed)
}

/// Print warnings for operator overrides the allow-list drops
///
/// This helps users identify typos or unsupported operators in their
/// `searchFields` parameter; the request itself still succeeds.
pub fn print_narrowing_warnings(requested: &[String], accepted: &[Operator]) {
    for entry in requested {
        if let Some((name, suffix)) = entry.split_once(':') {
            let dropped = match suffix.parse::<Operator>() {
                Ok(operator) => !accepted.contains(&operator),
                Err(_) => true,
            };
            if dropped {
                eprintln!(
                    "Warning: operator '{}' on search field '{}' is not accepted; using the declared operator",
                    suffix, name
                );
            }
        }
    }
}
