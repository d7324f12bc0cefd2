pub mod cli;
pub mod config;
pub mod criteria;
pub mod display;
pub mod query;
pub mod request;
pub mod slug;

pub use cli::{Cli, Commands, OutputFormat, cli_parse};
pub use config::{
    ConfigError, CriteriaConfig, ParamNames, default_config, load_config, load_config_from_path,
};
pub use criteria::{
    CriteriaError, FilterSpec, Operator, Predicate, RequestCriteria, SearchableFields,
};
pub use query::{QueryBuilder, QueryPlan, Searchable};
pub use request::RequestParams;

use anyhow::Context;

fn write_output_file(path: &std::path::Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file '{}'", path.display()))
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();

    match &cli.command {
        Commands::Plan {
            fields,
            search,
            search_fields,
            filter,
            order_by,
            sorted_by,
            with_relations,
            config,
            format,
            output,
        } => {
            let config = load_config(config.as_deref()).context("Failed to load config")?;
            let declared: SearchableFields = fields.parse()?;

            let mut params = RequestParams::new();
            if let Some(search) = search {
                params.set(config.params.search.clone(), search.clone());
            }
            if let Some(search_fields) = search_fields {
                params.set(config.params.search_fields.clone(), search_fields.clone());
            }
            if let Some(filter) = filter {
                params.set(config.params.filter.clone(), filter.clone());
            }
            if let Some(order_by) = order_by {
                params.set(config.params.order_by.clone(), order_by.clone());
            }
            if let Some(sorted_by) = sorted_by {
                params.set(config.params.sorted_by.clone(), sorted_by.clone());
            }
            if let Some(with_relations) = with_relations {
                params.set(config.params.with.clone(), with_relations.clone());
            }

            let criteria = RequestCriteria::from_request(&config, &params);
            criteria::print_narrowing_warnings(
                criteria.requested_fields(),
                &config.accepted_operators,
            );

            let mut plan = QueryPlan::new();
            criteria.apply(&mut plan, &declared)?;

            let rendered = match format {
                OutputFormat::Text => display::format_plan_text(&plan),
                OutputFormat::Json => display::format_plan_json(&plan),
            };
            print!("{rendered}");
            if let Some(path) = output {
                write_output_file(path, &rendered)?;
            }
        }
        Commands::Slug {
            value,
            separator,
            max_length,
            taken,
        } => {
            let options = slug::SlugOptions {
                separator: separator.clone(),
                max_length: *max_length,
            };
            let desired = slug::slug_from_sources(&[value.as_str()], &options);
            let unique = slug::unique_slug(&desired, &options, |candidate| {
                taken.iter().any(|taken| taken == candidate)
            });
            println!("{unique}");
        }
    }

    Ok(())
}
