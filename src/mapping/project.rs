use serde_json::Value;

use crate::client::extract::{edge_nodes, locate};
use crate::mapping::{MalformedNode, enum_field, flag, opt_str, required_str, validated};
use crate::models::{Project, RepositoryRef, VcsProvider};

const KIND: &str = "repository";

/// Flatten `viewer.accounts[].repositories[]` into projects.
///
/// Repositories without a DSN, name, id or recognised provider cannot be
/// addressed later and are skipped.
pub fn map_projects(data: &Value) -> Vec<Project> {
    let Some(accounts) = locate(data, &["viewer", "accounts"]) else {
        return Vec::new();
    };

    let mut projects = Vec::new();
    for account in edge_nodes(accounts) {
        let Some(login) = account.get("login").and_then(Value::as_str) else {
            continue;
        };
        let Some(repositories) = locate(account, &["repositories"]) else {
            continue;
        };
        projects.extend(validated(edge_nodes(repositories), |node| {
            map_repository(login, node)
        }));
    }
    projects
}

fn map_repository(login: &str, node: &Value) -> Result<Project, MalformedNode> {
    let key = required_str(node, KIND, "dsn")?;
    let name = required_str(node, KIND, "name")?;
    let provider = enum_field::<VcsProvider>(node, "vcsProvider")
        .ok_or_else(|| MalformedNode::new(KIND, "missing or unknown `vcsProvider`"))?;

    Ok(Project {
        key,
        name: name.clone(),
        repository: RepositoryRef {
            id: required_str(node, KIND, "id")?,
            login: login.to_string(),
            name,
            provider,
            default_branch: opt_str(node, "defaultBranch"),
            is_private: flag(node, "isPrivate"),
            is_activated: flag(node, "isActivated"),
        },
    })
}
