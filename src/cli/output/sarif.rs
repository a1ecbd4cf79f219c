//! SARIF output formatting for code scanning integrations

use serde::Serialize;
use std::collections::BTreeMap;

use super::{ReportRenderer, ScanReport};
use crate::error::GuardError;
use crate::rules::{Severity, Violation};

pub struct SarifOutput;

impl SarifOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SarifOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
struct SarifDriver {
    name: &'static str,
    version: &'static str,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
struct SarifRule {
    id: String,
    name: String,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
    #[serde(rename = "defaultConfiguration")]
    default_configuration: SarifDefaultConfig,
}

#[derive(Serialize)]
struct SarifDefaultConfig {
    level: &'static str,
}

#[derive(Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: &'static str,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<SarifRegion>,
}

#[derive(Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Serialize)]
struct SarifRegion {
    #[serde(rename = "startLine")]
    start_line: usize,
}

impl SarifOutput {
    fn severity_to_level(severity: Severity) -> &'static str {
        match severity {
            Severity::Critical | Severity::High => "error",
            Severity::Medium => "warning",
            Severity::Low => "note",
        }
    }

    fn rule_id(violation: &Violation) -> String {
        match &violation.rule {
            Some(rule) => format!("{}/{}", violation.kind.name(), rule),
            None => violation.kind.name().to_string(),
        }
    }

    fn violation_to_result(path: &str, violation: &Violation) -> SarifResult {
        SarifResult {
            rule_id: Self::rule_id(violation),
            level: Self::severity_to_level(violation.severity),
            message: SarifMessage {
                text: violation.message.clone(),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifactLocation {
                        uri: path.to_string(),
                    },
                    region: violation.line.map(|start_line| SarifRegion { start_line }),
                },
            }],
        }
    }
}

impl ReportRenderer for SarifOutput {
    fn render_report(&self, report: &ScanReport) -> Result<String, GuardError> {
        let mut rules: BTreeMap<String, SarifRule> = BTreeMap::new();
        let mut results = Vec::new();

        for source in report.sources() {
            for violation in source.result.violations() {
                let id = Self::rule_id(violation);
                rules.entry(id.clone()).or_insert_with(|| SarifRule {
                    name: id.clone(),
                    id,
                    short_description: SarifMessage {
                        text: violation.message.clone(),
                    },
                    default_configuration: SarifDefaultConfig {
                        level: Self::severity_to_level(violation.severity),
                    },
                });
                results.push(Self::violation_to_result(&source.path, violation));
            }
        }

        let sarif = SarifReport {
            schema: "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json",
            version: "2.1.0",
            runs: vec![SarifRun {
                tool: SarifTool {
                    driver: SarifDriver {
                        name: "ideguard",
                        version: env!("CARGO_PKG_VERSION"),
                        rules: rules.into_values().collect(),
                    },
                },
                results,
            }],
        };

        Ok(serde_json::to_string_pretty(&sarif)?)
    }
}
