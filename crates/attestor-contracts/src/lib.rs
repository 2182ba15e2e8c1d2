//! # attestor-contracts
//!
//! Shared value types and contracts for the Attestor execution core.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only immutable data definitions, construction-time
//! validation, and error types.

pub mod action;
pub mod error;
pub mod evidence;
pub mod execution;
pub mod observation;
pub mod plan;
pub mod policy;
pub mod verify;

#[cfg(test)]
mod tests {
    use crate::action::{Action, ActionDraft, ActionKind, Context};
    use crate::error::AttestorError;
    use crate::evidence::{Evidence, EvidenceResult, EvidenceSource};
    use crate::execution::{ActionOutcome, FailureReason, ObservationOutcome, StepOutcome};
    use crate::observation::{Observation, ObservationKind};
    use crate::plan::PlanId;

    // ── Action construction rules ────────────────────────────────────────────

    #[test]
    fn launch_app_requires_target() {
        let err = ActionDraft::new(ActionKind::LaunchApp, Context::Desktop)
            .build()
            .unwrap_err();
        match err {
            AttestorError::Validation { reason } => {
                assert!(reason.contains("launch_app"), "unexpected reason: {reason}");
                assert!(reason.contains("target"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn type_text_requires_text() {
        let err = ActionDraft::new(ActionKind::TypeText, Context::Desktop)
            .build()
            .unwrap_err();
        assert!(matches!(err, AttestorError::Validation { .. }));
    }

    #[test]
    fn type_text_web_requires_selector() {
        // Text alone is not enough in the web context — a selector is needed.
        let err = ActionDraft::new(ActionKind::TypeText, Context::Web)
            .text("hello")
            .build()
            .unwrap_err();
        match err {
            AttestorError::Validation { reason } => {
                assert!(reason.contains("selector"), "unexpected reason: {reason}");
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn close_app_invalid_in_file_context() {
        let err = ActionDraft::new(ActionKind::CloseApp, Context::File)
            .target("notes.txt")
            .build()
            .unwrap_err();
        match err {
            AttestorError::Validation { reason } => {
                assert!(reason.contains("close_app"), "unexpected reason: {reason}");
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn coordinates_always_rejected() {
        let mut draft = ActionDraft::new(ActionKind::LaunchApp, Context::Desktop).target("calc");
        draft.coordinates = Some((100, 200));
        let err = draft.build().unwrap_err();
        match err {
            AttestorError::Validation { reason } => {
                assert!(
                    reason.contains("coordinates"),
                    "unexpected reason: {reason}"
                );
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn empty_target_treated_as_absent() {
        let err = ActionDraft::new(ActionKind::LaunchApp, Context::Web)
            .target("")
            .build()
            .unwrap_err();
        assert!(matches!(err, AttestorError::Validation { .. }));
    }

    #[test]
    fn valid_action_exposes_fields() {
        let action = ActionDraft::new(ActionKind::TypeText, Context::Desktop)
            .text("Hello World")
            .verify("text_visible", "Hello World")
            .build()
            .unwrap();

        assert_eq!(action.kind(), ActionKind::TypeText);
        assert_eq!(action.context(), Context::Desktop);
        assert_eq!(action.text(), Some("Hello World"));
        assert!(action.is_verify_intent());
        assert_eq!(action.verify().unwrap().expected, "Hello World");
    }

    #[test]
    fn action_round_trips_through_json() {
        let action = ActionDraft::new(ActionKind::LaunchApp, Context::Desktop)
            .target("notepad.exe")
            .build()
            .unwrap();

        let json = serde_json::to_string(&action).unwrap();
        let decoded: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, decoded);
    }

    #[test]
    fn draft_from_planner_json_rejects_coordinates() {
        // A planner payload sneaking coordinates in must fail at build time,
        // not be silently dropped.
        let json = r#"{
            "kind": "launch_app",
            "context": "desktop",
            "target": "notepad.exe",
            "coordinates": [640, 480]
        }"#;
        let draft: ActionDraft = serde_json::from_str(json).unwrap();
        assert!(draft.build().is_err());
    }

    // ── Observation construction rules ───────────────────────────────────────

    #[test]
    fn targeted_observation_requires_target() {
        let err =
            Observation::new(ObservationKind::ReadText, Context::File, None).unwrap_err();
        assert!(matches!(err, AttestorError::Validation { .. }));
    }

    #[test]
    fn whole_view_observation_may_omit_target() {
        let obs =
            Observation::new(ObservationKind::DescribeScreen, Context::Desktop, None).unwrap();
        assert_eq!(obs.target(), None);
    }

    // ── Evidence serialization ───────────────────────────────────────────────

    #[test]
    fn evidence_serializes_with_wire_names() {
        let evidence = Evidence::new(
            EvidenceSource::Uia,
            EvidenceResult::NotVerified,
            "window not found",
        );
        let json = serde_json::to_string(&evidence).unwrap();
        assert!(json.contains("\"UIA\""), "json: {json}");
        assert!(json.contains("\"NOT_VERIFIED\""), "json: {json}");
    }

    #[test]
    fn vision_is_not_primary() {
        assert!(EvidenceSource::Uia.is_primary());
        assert!(EvidenceSource::Dom.is_primary());
        assert!(EvidenceSource::File.is_primary());
        assert!(!EvidenceSource::Vision.is_primary());
    }

    // ── Outcomes ─────────────────────────────────────────────────────────────

    #[test]
    fn denied_outcome_is_terminal_with_zero_attempts() {
        let outcome = ActionOutcome::denied("not in whitelist");
        assert!(!outcome.success);
        assert_eq!(outcome.reason, Some(FailureReason::PolicyDenied));
        assert_eq!(outcome.attempts, 0);
        assert_eq!(outcome.confidence, 0.0);
        assert!(outcome.evidence.is_empty());
        assert!(outcome.is_terminal_failure());
    }

    #[test]
    fn observation_outcomes_never_abort_plan() {
        let failed = StepOutcome::Observation(ObservationOutcome::failed("file missing"));
        assert!(!failed.aborts_plan());

        let not_found = StepOutcome::Observation(ObservationOutcome::not_found("no such element"));
        assert!(!not_found.aborts_plan());
    }

    #[test]
    fn failure_reason_round_trips() {
        for reason in [
            FailureReason::VerificationFailed,
            FailureReason::RetryExhausted,
            FailureReason::PolicyDenied,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            let decoded: FailureReason = serde_json::from_str(&json).unwrap();
            assert_eq!(reason, decoded);
        }
    }

    // ── PlanId ───────────────────────────────────────────────────────────────

    #[test]
    fn plan_id_new_produces_unique_values() {
        let ids: Vec<PlanId> = (0..100).map(|_| PlanId::new()).collect();
        let unique: std::collections::HashSet<String> =
            ids.iter().map(|id| id.0.to_string()).collect();
        assert_eq!(unique.len(), 100);
    }

    // ── Error display messages ───────────────────────────────────────────────

    #[test]
    fn error_validation_display() {
        let err = AttestorError::Validation {
            reason: "launch_app (desktop) requires 'target'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("validation error"));
        assert!(msg.contains("launch_app"));
    }

    #[test]
    fn error_config_display() {
        let err = AttestorError::Config {
            reason: "failed to parse whitelist TOML".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("whitelist"));
    }

    #[test]
    fn error_audit_write_failed_display() {
        let err = AttestorError::AuditWriteFailed {
            reason: "disk full".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("audit write failed"));
        assert!(msg.contains("disk full"));
    }
}
