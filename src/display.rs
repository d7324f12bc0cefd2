use crate::query::{Conjunction, QueryPlan};
use colored::Colorize;
use serde_json::json;
use std::fmt::Write;

pub fn format_plan_text(plan: &QueryPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "QUERY PLAN".bold());

    if plan.predicates.is_empty() {
        let _ = writeln!(out, "\nNo search predicates.");
    } else {
        let _ = writeln!(out, "\n{}", "Search predicates".bold());
        for predicate in &plan.predicates {
            let joiner = match predicate.conjunction {
                Conjunction::And => "AND",
                Conjunction::Or => "OR ",
            };
            let _ = writeln!(
                out,
                "  {} {} {} {}",
                joiner,
                predicate.field.cyan(),
                predicate.operator.as_str(),
                predicate.value.green()
            );
        }
    }

    if let Some(order) = &plan.order_by {
        let _ = writeln!(out, "\nOrder by: {} {}", order.field.cyan(), order.direction);
    }
    if let Some(projection) = &plan.projection {
        let _ = writeln!(out, "Projection: {}", projection.join(", "));
    }
    if !plan.eager_load.is_empty() {
        let _ = writeln!(out, "Eager load: {}", plan.eager_load.join(", "));
    }

    out
}

pub fn format_plan_json(plan: &QueryPlan) -> String {
    serde_json::to_string_pretty(&json!({ "plan": plan }))
        .unwrap_or_else(|_| "{\"plan\":{\"error\":\"failed to serialize plan\"}}".into())
}
