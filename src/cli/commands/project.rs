use tabled::{Table, Tabled};

use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_optional};
use crate::client::DeepSourceClient;
use crate::models::Project;

#[derive(Tabled)]
pub(crate) struct ProjectDisplay {
    #[tabled(rename = "Key")]
    pub(crate) key: String,
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(rename = "Owner")]
    pub(crate) owner: String,
    #[tabled(rename = "Provider")]
    pub(crate) provider: String,
    #[tabled(rename = "Branch")]
    pub(crate) branch: String,
    #[tabled(rename = "Private")]
    pub(crate) private: String,
}

impl From<&Project> for ProjectDisplay {
    fn from(project: &Project) -> Self {
        let repo = &project.repository;
        Self {
            key: project.key.clone(),
            name: project.name.clone(),
            owner: repo.login.clone(),
            provider: repo.provider.to_string(),
            branch: format_optional(repo.default_branch.as_deref()),
            private: if repo.is_private { "yes" } else { "no" }.to_string(),
        }
    }
}

/// List every project visible to the API key
pub async fn list_projects(client: &DeepSourceClient, format: &str) -> CliResult<String> {
    let projects = client.list_projects().await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&projects)?),
        _ => Ok(format_table(&projects)),
    }
}

pub(crate) fn format_table(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found.".to_string();
    }

    let rows: Vec<ProjectDisplay> = projects.iter().map(|p| p.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}
