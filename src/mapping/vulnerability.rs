use serde_json::Value;

use crate::mapping::{
    MalformedNode, enum_field, opt_f64, opt_str, required_obj, required_str, string_list,
};
use crate::models::{
    Package, PackageVersion, PackageVersionType, Vulnerability, VulnerabilityFixability,
    VulnerabilityOccurrence, VulnerabilityReachability, VulnerabilitySeverity,
};

const KIND: &str = "vulnerability occurrence";

/// Map a dependency vulnerability occurrence node.
///
/// `package`, `packageVersion` and `vulnerability` must all be present along
/// with their identifying scalars. Enum fields fall back as follows:
///
/// | field | fallback |
/// |---|---|
/// | `reachability` | `UNKNOWN` |
/// | `fixability` | `ERROR` |
/// | `vulnerability.severity` | `NONE` |
/// | `cvssV{2,3,4}Severity` | absent |
/// | `packageVersion.versionType` | absent |
pub fn map_vulnerability_occurrence(
    node: &Value,
) -> Result<VulnerabilityOccurrence, MalformedNode> {
    let id = required_str(node, KIND, "id")?;
    let package = map_package(required_obj(node, KIND, "package")?)?;
    let package_version = map_package_version(required_obj(node, KIND, "packageVersion")?)?;
    let vulnerability = map_vulnerability(required_obj(node, KIND, "vulnerability")?)?;

    Ok(VulnerabilityOccurrence {
        id,
        reachability: enum_field::<VulnerabilityReachability>(node, "reachability")
            .unwrap_or_default(),
        fixability: enum_field::<VulnerabilityFixability>(node, "fixability").unwrap_or_default(),
        vulnerability,
        package,
        package_version,
    })
}

fn map_package(node: &Value) -> Result<Package, MalformedNode> {
    Ok(Package {
        id: required_str(node, KIND, "id")?,
        ecosystem: required_str(node, KIND, "ecosystem")?,
        name: required_str(node, KIND, "name")?,
        purl: opt_str(node, "purl"),
    })
}

fn map_package_version(node: &Value) -> Result<PackageVersion, MalformedNode> {
    Ok(PackageVersion {
        id: required_str(node, KIND, "id")?,
        version: required_str(node, KIND, "version")?,
        version_type: enum_field::<PackageVersionType>(node, "versionType"),
    })
}

fn map_vulnerability(node: &Value) -> Result<Vulnerability, MalformedNode> {
    Ok(Vulnerability {
        id: required_str(node, KIND, "id")?,
        identifier: required_str(node, KIND, "identifier")?,
        aliases: string_list(node, "aliases"),
        summary: opt_str(node, "summary"),
        details: opt_str(node, "details"),
        published_at: opt_str(node, "publishedAt"),
        updated_at: opt_str(node, "updatedAt"),
        withdrawn_at: opt_str(node, "withdrawnAt"),
        severity: enum_field::<VulnerabilitySeverity>(node, "severity").unwrap_or_default(),
        cvss_v2_vector: opt_str(node, "cvssV2Vector"),
        cvss_v2_base_score: opt_f64(node, "cvssV2BaseScore"),
        cvss_v2_severity: enum_field(node, "cvssV2Severity"),
        cvss_v3_vector: opt_str(node, "cvssV3Vector"),
        cvss_v3_base_score: opt_f64(node, "cvssV3BaseScore"),
        cvss_v3_severity: enum_field(node, "cvssV3Severity"),
        cvss_v4_vector: opt_str(node, "cvssV4Vector"),
        cvss_v4_base_score: opt_f64(node, "cvssV4BaseScore"),
        cvss_v4_severity: enum_field(node, "cvssV4Severity"),
        epss_score: opt_f64(node, "epssScore"),
        epss_percentile: opt_f64(node, "epssPercentile"),
        introduced_versions: string_list(node, "introducedVersions"),
        fixed_versions: string_list(node, "fixedVersions"),
        reference_urls: string_list(node, "referenceUrls"),
    })
}
