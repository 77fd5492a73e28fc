use serde::{Deserialize, Serialize};

graphql_enum! {
    /// Version-control provider hosting a repository.
    pub enum VcsProvider {
        Github => "GITHUB",
        GithubEnterprise => "GITHUB_ENTERPRISE",
        Gitlab => "GITLAB",
        Bitbucket => "BITBUCKET",
        BitbucketDatacenter => "BITBUCKET_DATACENTER",
        AzureDevops => "ADS",
        GoogleSourceRepositories => "GSR",
    }
}

/// A DeepSource project, addressed by its key (the repository DSN).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub key: String,
    pub name: String,
    pub repository: RepositoryRef,
}

/// Coordinates needed to address a repository in repository-scoped queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRef {
    pub id: String,
    pub login: String,
    pub name: String,
    pub provider: VcsProvider,
    pub default_branch: Option<String>,
    pub is_private: bool,
    pub is_activated: bool,
}
