//! The exploit runner.
//!
//! Executes an ordered list of attack scenarios against a connector,
//! strictly sequentially, and verifies each through its marker artifact.
//! The verification step never looks at the connector's own result: a
//! spawned-then-crashed process still proves the injection, so the marker
//! check runs on every path and the marker is removed on every path.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::connector::{Connector, ConnectorOutcome};
use crate::scenario::{AttackScenario, InjectionVector, MarkerArtifact};

// ============================================================================
// Proof
// ============================================================================

/// Whether the marker artifact was observed after the connection attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Proof {
    /// The marker exists: the payload executed.
    Confirmed {
        /// Marker content, for scenarios that capture it.
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    /// The marker was never created.
    NotFound,
}

impl Proof {
    /// Whether execution was proven.
    #[must_use]
    pub const fn confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

// ============================================================================
// ScenarioOutcome / RunSummary
// ============================================================================

/// Per-scenario result, printed then discarded.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    /// Scenario name.
    pub scenario: String,

    /// Which config field carried the payload.
    pub vector: InjectionVector,

    /// Marker path used for this run (removed by the time this exists).
    pub marker_path: std::path::PathBuf,

    /// What the connector reported.
    pub connector: ConnectorOutcome,

    /// What the filesystem proved, independent of the connector.
    pub proof: Proof,

    /// Error removing the marker, if any (the run continues regardless).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup_error: Option<String>,

    /// Wall-clock duration of the scenario in milliseconds.
    pub duration_ms: u64,
}

impl ScenarioOutcome {
    /// Whether this scenario proved arbitrary command execution.
    #[must_use]
    pub const fn proven(&self) -> bool {
        self.proof.confirmed()
    }
}

/// Result of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// Name of the connector under test.
    pub connector: String,

    /// Per-scenario outcomes, in run order.
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunSummary {
    /// Number of scenarios that proved execution.
    #[must_use]
    pub fn proven(&self) -> usize {
        self.outcomes.iter().filter(|o| o.proven()).count()
    }

    /// Whether any scenario proved execution.
    #[must_use]
    pub fn is_vulnerable(&self) -> bool {
        self.proven() > 0
    }
}

// ============================================================================
// ExploitRunner
// ============================================================================

/// Sequential scenario executor.
pub struct ExploitRunner {
    connector: Box<dyn Connector>,
}

impl ExploitRunner {
    /// Creates a runner over the given connector.
    #[must_use]
    pub fn new(connector: Box<dyn Connector>) -> Self {
        Self { connector }
    }

    /// Runs every scenario in order, isolating failures per scenario.
    pub async fn run(&self, scenarios: &[AttackScenario]) -> RunSummary {
        let started_at = Utc::now();
        let mut outcomes = Vec::with_capacity(scenarios.len());

        for scenario in scenarios {
            outcomes.push(self.run_scenario(scenario).await);
        }

        RunSummary {
            started_at,
            connector: self.connector.name().to_string(),
            outcomes,
        }
    }

    /// Runs a single scenario: render, connect, verify, clean up.
    pub async fn run_scenario(&self, scenario: &AttackScenario) -> ScenarioOutcome {
        let start = Instant::now();
        let marker = MarkerArtifact::new(&scenario.name);

        info!(
            scenario = %scenario.name,
            vector = %scenario.vector,
            marker = %marker.path().display(),
            "running scenario"
        );

        let config = scenario.render(marker.path());
        let connector_outcome = self.connector.connect(&config).await;

        // Side-effect check, regardless of what the connector reported.
        let proof = if marker.exists() {
            let content = if scenario.capture_content {
                match marker.read_trimmed() {
                    Ok(content) => Some(content),
                    Err(e) => {
                        warn!(scenario = %scenario.name, error = %e, "marker exists but could not be read");
                        None
                    }
                }
            } else {
                None
            };
            info!(scenario = %scenario.name, "marker created: arbitrary execution proven");
            Proof::Confirmed { content }
        } else {
            info!(scenario = %scenario.name, "marker not found");
            Proof::NotFound
        };

        let cleanup_error = match marker.remove() {
            Ok(()) => None,
            Err(e) => {
                warn!(scenario = %scenario.name, error = %e, "marker cleanup failed");
                Some(e.to_string())
            }
        };

        ScenarioOutcome {
            scenario: scenario.name.clone(),
            vector: scenario.vector,
            marker_path: marker.path().to_path_buf(),
            connector: connector_outcome,
            proof,
            cleanup_error,
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
