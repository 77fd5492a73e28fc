use serde::{Deserialize, Serialize};

graphql_enum! {
    /// Vulnerability severity, also used for the CVSS v2/v3/v4 ratings.
    #[derive(Default)]
    pub enum VulnerabilitySeverity {
        #[default]
        None => "NONE",
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
        Critical => "CRITICAL",
    }
}

graphql_enum! {
    /// Whether the vulnerable code path is reachable from the project.
    #[derive(Default)]
    pub enum VulnerabilityReachability {
        Reachable => "REACHABLE",
        Unreachable => "UNREACHABLE",
        #[default]
        Unknown => "UNKNOWN",
    }
}

graphql_enum! {
    /// How the vulnerability can be fixed.
    #[derive(Default)]
    pub enum VulnerabilityFixability {
        #[default]
        Error => "ERROR",
        Unfixable => "UNFIXABLE",
        GeneratingFix => "GENERATING_FIX",
        PossiblyFixable => "POSSIBLY_FIXABLE",
        ManuallyFixable => "MANUALLY_FIXABLE",
        AutoFixable => "AUTO_FIXABLE",
    }
}

graphql_enum! {
    /// Versioning scheme of a package version.
    pub enum PackageVersionType {
        Semver => "SEMVER",
        Ecosystem => "ECOSYSTEM",
        Git => "GIT",
    }
}

/// A vulnerable dependency version found in a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityOccurrence {
    pub id: String,
    pub reachability: VulnerabilityReachability,
    pub fixability: VulnerabilityFixability,
    pub vulnerability: Vulnerability,
    pub package: Package,
    pub package_version: PackageVersion,
}

/// Advisory details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    pub id: String,
    /// Advisory identifier, e.g. `GHSA-…` or `CVE-…`
    pub identifier: String,
    pub aliases: Vec<String>,
    pub summary: Option<String>,
    pub details: Option<String>,
    pub published_at: Option<String>,
    pub updated_at: Option<String>,
    pub withdrawn_at: Option<String>,
    pub severity: VulnerabilitySeverity,
    pub cvss_v2_vector: Option<String>,
    pub cvss_v2_base_score: Option<f64>,
    pub cvss_v2_severity: Option<VulnerabilitySeverity>,
    pub cvss_v3_vector: Option<String>,
    pub cvss_v3_base_score: Option<f64>,
    pub cvss_v3_severity: Option<VulnerabilitySeverity>,
    pub cvss_v4_vector: Option<String>,
    pub cvss_v4_base_score: Option<f64>,
    pub cvss_v4_severity: Option<VulnerabilitySeverity>,
    pub epss_score: Option<f64>,
    pub epss_percentile: Option<f64>,
    pub introduced_versions: Vec<String>,
    pub fixed_versions: Vec<String>,
    pub reference_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub ecosystem: String,
    pub name: String,
    pub purl: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageVersion {
    pub id: String,
    pub version: String,
    pub version_type: Option<PackageVersionType>,
}
