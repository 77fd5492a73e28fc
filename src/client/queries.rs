//! GraphQL documents sent to DeepSource.

pub const VIEWER_PROJECTS: &str = r#"
query ViewerProjects {
  viewer {
    email
    accounts {
      edges {
        node {
          login
          repositories(first: 100) {
            edges {
              node {
                id
                name
                defaultBranch
                dsn
                isPrivate
                isActivated
                vcsProvider
              }
            }
          }
        }
      }
    }
  }
}
"#;

pub const REPOSITORY_ISSUES: &str = r#"
query RepositoryIssues(
  $login: String!,
  $name: String!,
  $provider: VCSProvider!,
  $offset: Int,
  $first: Int,
  $after: String,
  $before: String,
  $last: Int
) {
  repository(login: $login, name: $name, vcsProvider: $provider) {
    name
    issues(offset: $offset, first: $first, after: $after, before: $before, last: $last) {
      pageInfo {
        hasNextPage
        hasPreviousPage
        startCursor
        endCursor
      }
      totalCount
      edges {
        node {
          id
          issue {
            shortcode
            title
            category
            severity
            description
            tags
          }
          occurrences(first: 100) {
            edges {
              node {
                path
                beginLine
                endLine
              }
            }
          }
        }
      }
    }
  }
}
"#;

pub const REPOSITORY_RUNS: &str = r#"
query RepositoryRuns(
  $login: String!,
  $name: String!,
  $provider: VCSProvider!,
  $offset: Int,
  $first: Int,
  $after: String,
  $before: String,
  $last: Int
) {
  repository(login: $login, name: $name, vcsProvider: $provider) {
    name
    analysisRuns(offset: $offset, first: $first, after: $after, before: $before, last: $last) {
      pageInfo {
        hasNextPage
        hasPreviousPage
        startCursor
        endCursor
      }
      totalCount
      edges {
        node {
          ...RunFields
        }
      }
    }
  }
}
"#;

pub const RUN_FIELDS: &str = r#"
fragment RunFields on Run {
  id
  runUid
  commitOid
  branchName
  baseOid
  status
  createdAt
  updatedAt
  finishedAt
  summary {
    occurrencesIntroduced
    occurrencesResolved
    occurrencesSuppressed
    occurrenceDistributionByAnalyzer {
      analyzerShortcode
      introduced
    }
    occurrenceDistributionByCategory {
      category
      introduced
    }
  }
  repository {
    id
    name
  }
}
"#;

pub const RUN_BY_IDENTIFIER: &str = r#"
query RunByIdentifier($runUid: UUID, $commitOid: String) {
  run(runUid: $runUid, commitOid: $commitOid) {
    ...RunFields
  }
}
"#;

pub const DEPENDENCY_VULNERABILITIES: &str = r#"
query DependencyVulnerabilities(
  $login: String!,
  $name: String!,
  $provider: VCSProvider!,
  $offset: Int,
  $first: Int,
  $after: String,
  $before: String,
  $last: Int
) {
  repository(login: $login, name: $name, vcsProvider: $provider) {
    name
    dependencyVulnerabilityOccurrences(
      offset: $offset,
      first: $first,
      after: $after,
      before: $before,
      last: $last
    ) {
      pageInfo {
        hasNextPage
        hasPreviousPage
        startCursor
        endCursor
      }
      totalCount
      edges {
        node {
          id
          reachability
          fixability
          package {
            id
            ecosystem
            name
            purl
          }
          packageVersion {
            id
            version
            versionType
          }
          vulnerability {
            id
            identifier
            aliases
            summary
            details
            publishedAt
            updatedAt
            withdrawnAt
            severity
            cvssV2Vector
            cvssV2BaseScore
            cvssV2Severity
            cvssV3Vector
            cvssV3BaseScore
            cvssV3Severity
            cvssV4Vector
            cvssV4BaseScore
            cvssV4Severity
            epssScore
            epssPercentile
            introducedVersions
            fixedVersions
            referenceUrls
          }
        }
      }
    }
  }
}
"#;

pub const QUALITY_METRICS: &str = r#"
query QualityMetrics(
  $login: String!,
  $name: String!,
  $provider: VCSProvider!,
  $shortcodeIn: [MetricShortcode]
) {
  repository(login: $login, name: $name, vcsProvider: $provider) {
    name
    metrics(shortcodeIn: $shortcodeIn) {
      name
      shortcode
      description
      positiveDirection
      unit
      minValueAllowed
      maxValueAllowed
      isReported
      isThresholdEnforced
      items {
        id
        key
        threshold
        latestValue
        latestValueDisplay
        thresholdStatus
      }
    }
  }
}
"#;

pub const METRIC_HISTORY: &str = r#"
query MetricHistory(
  $login: String!,
  $name: String!,
  $provider: VCSProvider!,
  $shortcodeIn: [MetricShortcode],
  $limit: Int
) {
  repository(login: $login, name: $name, vcsProvider: $provider) {
    name
    metrics(shortcodeIn: $shortcodeIn) {
      name
      shortcode
      positiveDirection
      unit
      isThresholdEnforced
      items {
        id
        key
        threshold
        values(first: $limit) {
          edges {
            node {
              id
              value
              valueDisplay
              threshold
              thresholdStatus
              commitOid
              createdAt
            }
          }
        }
      }
    }
  }
}
"#;

pub const COMPLIANCE_REPORT: &str = r#"
query ComplianceReport($login: String!, $name: String!, $provider: VCSProvider!) {
  repository(login: $login, name: $name, vcsProvider: $provider) {
    name
    reports {
      owaspTop10 {
        ...ReportFields
      }
      sansTop25 {
        ...ReportFields
      }
      misraC {
        ...ReportFields
      }
    }
  }
}

fragment ReportFields on ComplianceReport {
  key
  title
  currentValue
  status
  securityIssueStats {
    key
    title
    occurrence {
      critical
      major
      minor
      total
    }
  }
}
"#;

pub const SET_METRIC_THRESHOLD: &str = r#"
mutation SetMetricThreshold($input: SetRepositoryMetricThresholdInput!) {
  setRepositoryMetricThreshold(input: $input) {
    ok
  }
}
"#;

pub const UPDATE_METRIC_SETTING: &str = r#"
mutation UpdateMetricSetting($input: UpdateRepositoryMetricSettingInput!) {
  updateRepositoryMetricSetting(input: $input) {
    ok
  }
}
"#;
