use tabled::Tabled;

use crate::cli::commands::render_page;
use crate::cli::error::CliResult;
use crate::cli::utils::truncate_with_ellipsis;
use crate::client::{DeepSourceClient, PaginationParams};
use crate::models::Issue;

#[derive(Tabled)]
pub(crate) struct IssueDisplay {
    #[tabled(rename = "Shortcode")]
    pub(crate) shortcode: String,
    #[tabled(rename = "Title")]
    pub(crate) title: String,
    #[tabled(rename = "Category")]
    pub(crate) category: String,
    #[tabled(rename = "Severity")]
    pub(crate) severity: String,
    #[tabled(rename = "Location")]
    pub(crate) location: String,
}

impl From<&Issue> for IssueDisplay {
    fn from(issue: &Issue) -> Self {
        let location = match issue.occurrences.first() {
            Some(first) => {
                let line = first
                    .begin_line
                    .map(|l| format!(":{}", l))
                    .unwrap_or_default();
                let more = issue.occurrences.len() - 1;
                let path = truncate_with_ellipsis(&format!("{}{}", first.path, line), 40);
                if more > 0 {
                    format!("{} (+{})", path, more)
                } else {
                    path
                }
            }
            None => "-".to_string(),
        };

        Self {
            shortcode: issue.shortcode.clone(),
            title: truncate_with_ellipsis(&issue.title, 50),
            category: issue.category.clone(),
            severity: issue.severity.to_string(),
            location,
        }
    }
}

/// List issues on a project's default branch
pub async fn list_issues(
    client: &DeepSourceClient,
    project_key: &str,
    page: &PaginationParams,
    format: &str,
) -> CliResult<String> {
    let issues = client.get_issues(project_key, page).await?;
    render_page::<_, IssueDisplay>(&issues, format, "No issues found.")
}
