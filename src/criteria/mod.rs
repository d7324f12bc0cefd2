//! Request criteria parsing and application
//!
//! This module converts the compact search mini-language carried in request
//! parameters into a structured filter specification, then applies it to an
//! abstract query builder.
//!
//! # Parameters
//!
//! ```text
//! search        search term, plain or per-field (see grammar below)
//! searchFields  narrow/relabel searchable fields, `;`-separated
//! filter        column projection, `;`-separated
//! orderBy       column to sort by
//! sortedBy      sort direction, default "asc", passed through verbatim
//! with          relations to eager-load, `;`-separated
//! ```
//!
//! All parameter names can be remapped through [`crate::config::ParamNames`].
//!
//! # Search grammar
//!
//! ```text
//! term     := segment (";" segment)*
//! segment  := pair | scalar
//! pair     := field ":" value      (exactly one ":")
//! scalar   := any text without ":"
//! ```
//!
//! # Examples
//!
//! ```text
//! search=john                              every searchable field matches "john"
//! search=name:john;email:doe@x.com         each field matches its own value
//! search=john;email:doe@x.com              "john" is the fallback for fields
//!                                          without an explicit value
//! searchFields=email                       only `email` is searched
//! searchFields=email:=                     `email` is searched with `=`
//! ```
//!
//! The resulting predicate group is AND-ed into the outer query as a whole;
//! within the group, fields OR together.

pub mod apply;
pub mod error;
pub mod fields;
pub mod parser;

pub use apply::{FilterSpec, Predicate, RequestCriteria};
pub use error::CriteriaError;
pub use fields::{Operator, SearchableFields, narrow, print_narrowing_warnings};
pub use parser::{SearchTerms, parse_search_term};
