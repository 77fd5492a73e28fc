use tabled::Tabled;

use crate::cli::commands::render_page;
use crate::cli::error::CliResult;
use crate::cli::utils::{format_optional, truncate_with_ellipsis};
use crate::client::{DeepSourceClient, PaginationParams};
use crate::models::VulnerabilityOccurrence;

#[derive(Tabled)]
pub(crate) struct VulnerabilityDisplay {
    #[tabled(rename = "Identifier")]
    pub(crate) identifier: String,
    #[tabled(rename = "Package")]
    pub(crate) package: String,
    #[tabled(rename = "Version")]
    pub(crate) version: String,
    #[tabled(rename = "Severity")]
    pub(crate) severity: String,
    #[tabled(rename = "CVSS")]
    pub(crate) cvss: String,
    #[tabled(rename = "Reachability")]
    pub(crate) reachability: String,
    #[tabled(rename = "Fix")]
    pub(crate) fixed_in: String,
}

impl From<&VulnerabilityOccurrence> for VulnerabilityDisplay {
    fn from(occ: &VulnerabilityOccurrence) -> Self {
        let vuln = &occ.vulnerability;
        // newest CVSS version wins
        let cvss = vuln
            .cvss_v4_base_score
            .or(vuln.cvss_v3_base_score)
            .or(vuln.cvss_v2_base_score);

        Self {
            identifier: vuln.identifier.clone(),
            package: truncate_with_ellipsis(
                &format!("{}/{}", occ.package.ecosystem, occ.package.name),
                40,
            ),
            version: occ.package_version.version.clone(),
            severity: vuln.severity.to_string(),
            cvss: format_optional(cvss),
            reachability: occ.reachability.to_string(),
            fixed_in: vuln
                .fixed_versions
                .first()
                .cloned()
                .unwrap_or_else(|| occ.fixability.to_string()),
        }
    }
}

/// List dependency vulnerabilities found in a project
pub async fn list_vulnerabilities(
    client: &DeepSourceClient,
    project_key: &str,
    page: &PaginationParams,
    format: &str,
) -> CliResult<String> {
    let vulnerabilities = client
        .get_dependency_vulnerabilities(project_key, page)
        .await?;
    render_page::<_, VulnerabilityDisplay>(
        &vulnerabilities,
        format,
        "No dependency vulnerabilities found.",
    )
}
