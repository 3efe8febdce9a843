//! Run report rendering.
//!
//! The report goes to stdout; diagnostics go to stderr via `tracing`.
//! Human output is for an operator reading a terminal, JSON output is the
//! serialized [`RunSummary`] for machine consumption.

use std::fmt::Write as _;

use crate::runner::{Proof, RunSummary};

/// Renders a run summary for terminal reading.
#[must_use]
pub fn render_human(summary: &RunSummary) -> String {
    let mut out = String::new();
    let total = summary.outcomes.len();

    let _ = writeln!(
        out,
        "command injection probe: {total} scenario(s) against the '{}' connector",
        summary.connector
    );
    let _ = writeln!(out, "{}", "=".repeat(72));

    for (index, outcome) in summary.outcomes.iter().enumerate() {
        let _ = writeln!(
            out,
            "[{}/{total}] {} ({})",
            index + 1,
            outcome.scenario,
            outcome.vector
        );
        let _ = writeln!(out, "    connector: {}", outcome.connector);
        match &outcome.proof {
            Proof::Confirmed { content } => {
                let _ = writeln!(
                    out,
                    "    proof:     marker created at {}",
                    outcome.marker_path.display()
                );
                if let Some(content) = content {
                    let _ = writeln!(out, "    captured:  {content}");
                }
            }
            Proof::NotFound => {
                let _ = writeln!(out, "    proof:     marker not found");
            }
        }
        if let Some(error) = &outcome.cleanup_error {
            let _ = writeln!(out, "    cleanup:   failed: {error}");
        }
    }

    let _ = writeln!(out, "{}", "=".repeat(72));
    let proven = summary.proven();
    if summary.is_vulnerable() {
        let _ = writeln!(
            out,
            "{proven}/{total} scenario(s) proved arbitrary command execution; \
             the connector spawns attacker-controlled commands without sanitization"
        );
    } else {
        let _ = writeln!(
            out,
            "no command execution observed; the connector appears to reject \
             or sanitize malicious configs"
        );
    }

    out
}

/// Renders a run summary as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the summary cannot be serialized.
pub fn render_json(summary: &RunSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::ConnectorOutcome;
    use crate::runner::ScenarioOutcome;
    use crate::scenario::InjectionVector;
    use chrono::Utc;

    fn summary() -> RunSummary {
        RunSummary {
            started_at: Utc::now(),
            connector: "stdio".to_string(),
            outcomes: vec![
                ScenarioOutcome {
                    scenario: "direct-command".to_string(),
                    vector: InjectionVector::CommandField,
                    marker_path: "/tmp/spawnjack-direct.txt".into(),
                    connector: ConnectorOutcome::HandshakeFailed {
                        reason: "connection closed before initialize response".to_string(),
                    },
                    proof: Proof::Confirmed { content: None },
                    cleanup_error: None,
                    duration_ms: 12,
                },
                ScenarioOutcome {
                    scenario: "shell-exfiltration".to_string(),
                    vector: InjectionVector::ShellCommand,
                    marker_path: "/tmp/spawnjack-exfil.txt".into(),
                    connector: ConnectorOutcome::HandshakeFailed {
                        reason: "connection closed before initialize response".to_string(),
                    },
                    proof: Proof::Confirmed {
                        content: Some("Sensitive data: user@host".to_string()),
                    },
                    cleanup_error: None,
                    duration_ms: 15,
                },
            ],
        }
    }

    #[test]
    fn test_human_report_lists_scenarios() {
        let text = render_human(&summary());
        assert!(text.contains("[1/2] direct-command (command field)"));
        assert!(text.contains("[2/2] shell-exfiltration (shell command)"));
        assert!(text.contains("marker created at /tmp/spawnjack-direct.txt"));
        assert!(text.contains("captured:  Sensitive data: user@host"));
        assert!(text.contains("2/2 scenario(s) proved arbitrary command execution"));
    }

    #[test]
    fn test_human_report_not_vulnerable() {
        let mut s = summary();
        for outcome in &mut s.outcomes {
            outcome.proof = Proof::NotFound;
        }
        let text = render_human(&s);
        assert!(text.contains("marker not found"));
        assert!(text.contains("no command execution observed"));
    }

    #[test]
    fn test_json_report_parses_back() {
        let text = render_json(&summary()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["connector"], "stdio");
        assert_eq!(value["outcomes"][0]["proof"]["status"], "confirmed");
        assert_eq!(
            value["outcomes"][1]["proof"]["content"],
            "Sensitive data: user@host"
        );
    }
}
