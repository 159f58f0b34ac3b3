//! Telemetry event union.
//!
//! Events are fire-and-forget: emission must never affect resolution control
//! flow, and sinks must not block. The wire shape uses a `type` tag with
//! camelCase payload fields for consumers outside this codebase.

use serde::{Deserialize, Serialize};

/// Telemetry events emitted during environment resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Outcome of an activated-variables lookup.
    ActivatedVariablesLookup {
        /// Whether any activation variables were found.
        #[serde(rename = "hasEnvVars")]
        has_env_vars: bool,
        /// Whether the lookup itself failed (and was tolerated).
        failed: bool,
    },

    /// Interpreter auto-selection did not finish within the bounded wait.
    AutoSelectionTimedOut {
        /// How long the resolver waited before giving up.
        #[serde(rename = "waitedSecs")]
        waited_secs: u64,
    },

    /// An environment was classified and bound.
    EnvironmentResolved {
        /// Kind name of the selected environment.
        kind: String,
    },
}

impl TelemetryEvent {
    /// Event name for wire protocols.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::ActivatedVariablesLookup { .. } => "activation:variables",
            Self::AutoSelectionTimedOut { .. } => "resolver:auto_select_timeout",
            Self::EnvironmentResolved { .. } => "resolver:environment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = TelemetryEvent::ActivatedVariablesLookup {
            has_env_vars: true,
            failed: false,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"activated_variables_lookup\""));
        assert!(json.contains("\"hasEnvVars\":true"));
    }

    #[test]
    fn test_event_names() {
        assert_eq!(
            TelemetryEvent::AutoSelectionTimedOut { waited_secs: 50 }.event_name(),
            "resolver:auto_select_timeout"
        );
        assert_eq!(
            TelemetryEvent::EnvironmentResolved {
                kind: "plain".to_string()
            }
            .event_name(),
            "resolver:environment"
        );
    }
}
