pub mod issue;
pub mod metric;
pub mod project;
pub mod report;
pub mod run;
pub mod vulnerability;

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::cli::error::CliResult;
use crate::cli::utils::apply_table_style;
use crate::client::PaginatedResponse;

/// Render a page as pretty JSON or as a table with a paging footer.
pub(crate) fn render_page<T, D>(
    page: &PaginatedResponse<T>,
    format: &str,
    empty_message: &str,
) -> CliResult<String>
where
    T: Serialize,
    D: Tabled + for<'a> From<&'a T>,
{
    if format == "json" {
        return Ok(serde_json::to_string_pretty(page)?);
    }
    if page.items.is_empty() {
        return Ok(empty_message.to_string());
    }

    let rows: Vec<D> = page.items.iter().map(D::from).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    Ok(format!("{}\n{}", table, page_footer(page)))
}

/// Summary line under a paged table, with the cursor for the next page.
pub(crate) fn page_footer<T>(page: &PaginatedResponse<T>) -> String {
    let mut footer = format!("Showing {} of {}", page.items.len(), page.total_count);
    if page.page_info.has_next_page {
        if let Some(cursor) = &page.page_info.end_cursor {
            footer.push_str(&format!(" (next page: --after {})", cursor));
        }
    }
    footer
}

#[cfg(test)]
#[path = "issue_test.rs"]
mod issue_test;


#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;
