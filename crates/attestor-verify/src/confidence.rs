//! The confidence table: a pure function from evidence to a score.
//!
//! Confidence is diagnostic only — nothing in the runtime branches on it.
//! The score reflects how well the evidence sources agree, with the primary
//! authority always dominating:
//!
//! | primary   | advisory       | confidence |
//! |-----------|----------------|------------|
//! | SUCCESS   | (not consulted)| 1.0        |
//! | FAIL      | VERIFIED       | 0.65       |
//! | FAIL      | UNKNOWN        | 0.4        |
//! | FAIL      | NOT_VERIFIED   | 0.3        |
//! | FAIL      | (none)         | 0.2        |
//! | (none)    | VERIFIED       | 0.5        |
//! | (none)    | UNKNOWN        | 0.3        |
//! | (none)    | NOT_VERIFIED   | 0.2        |
//! | (none)    | (none)         | 0.0        |
//!
//! The 0.65 row is the interesting one: the primary said no but vision says
//! it looks right. The step still fails — the raised score flags the
//! disagreement for a human reading the audit log.

use attestor_contracts::evidence::{Evidence, EvidenceResult};

/// Compute the confidence score for a collected evidence set.
///
/// Pure: same evidence in, same score out. Evidence order does not matter.
pub fn confidence_for(evidence: &[Evidence]) -> f64 {
    let primary = evidence.iter().find(|e| e.source.is_primary());
    let advisory = evidence.iter().find(|e| !e.source.is_primary());

    match primary {
        Some(p) if p.result == EvidenceResult::Success => 1.0,
        Some(_) => match advisory.map(|a| a.result) {
            Some(EvidenceResult::Verified) => 0.65,
            Some(EvidenceResult::Unknown) => 0.4,
            Some(EvidenceResult::NotVerified) => 0.3,
            // An advisory source reporting a primary-style result is not a
            // pattern the engine produces; score it as no advisory.
            _ => 0.2,
        },
        None => match advisory.map(|a| a.result) {
            Some(EvidenceResult::Verified) => 0.5,
            Some(EvidenceResult::Unknown) => 0.3,
            Some(EvidenceResult::NotVerified) => 0.2,
            _ => 0.0,
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use attestor_contracts::evidence::{Evidence, EvidenceResult, EvidenceSource};

    use super::confidence_for;

    fn ev(source: EvidenceSource, result: EvidenceResult) -> Evidence {
        Evidence::new(source, result, "test")
    }

    #[test]
    fn primary_success_is_full_confidence() {
        let evidence = vec![ev(EvidenceSource::Uia, EvidenceResult::Success)];
        assert_eq!(confidence_for(&evidence), 1.0);
    }

    #[test]
    fn primary_fail_with_advisory_agreement_stays_low() {
        let evidence = vec![
            ev(EvidenceSource::Dom, EvidenceResult::Fail),
            ev(EvidenceSource::Vision, EvidenceResult::NotVerified),
        ];
        assert_eq!(confidence_for(&evidence), 0.3);
    }

    #[test]
    fn primary_fail_with_advisory_disagreement_is_flagged() {
        // Vision contradicts the primary: the score rises but stays below
        // any success value.
        let evidence = vec![
            ev(EvidenceSource::Uia, EvidenceResult::Fail),
            ev(EvidenceSource::Vision, EvidenceResult::Verified),
        ];
        assert_eq!(confidence_for(&evidence), 0.65);
    }

    #[test]
    fn primary_fail_with_advisory_unknown() {
        let evidence = vec![
            ev(EvidenceSource::File, EvidenceResult::Fail),
            ev(EvidenceSource::Vision, EvidenceResult::Unknown),
        ];
        assert_eq!(confidence_for(&evidence), 0.4);
    }

    #[test]
    fn primary_fail_alone() {
        let evidence = vec![ev(EvidenceSource::Uia, EvidenceResult::Fail)];
        assert_eq!(confidence_for(&evidence), 0.2);
    }

    #[test]
    fn advisory_only_rows() {
        let verified = vec![ev(EvidenceSource::Vision, EvidenceResult::Verified)];
        assert_eq!(confidence_for(&verified), 0.5);

        let unknown = vec![ev(EvidenceSource::Vision, EvidenceResult::Unknown)];
        assert_eq!(confidence_for(&unknown), 0.3);

        let not_verified = vec![ev(EvidenceSource::Vision, EvidenceResult::NotVerified)];
        assert_eq!(confidence_for(&not_verified), 0.2);
    }

    #[test]
    fn no_evidence_is_zero() {
        assert_eq!(confidence_for(&[]), 0.0);
    }

    #[test]
    fn evidence_order_does_not_matter() {
        let forward = vec![
            ev(EvidenceSource::Uia, EvidenceResult::Fail),
            ev(EvidenceSource::Vision, EvidenceResult::Verified),
        ];
        let backward = vec![
            ev(EvidenceSource::Vision, EvidenceResult::Verified),
            ev(EvidenceSource::Uia, EvidenceResult::Fail),
        ];
        assert_eq!(confidence_for(&forward), confidence_for(&backward));
    }
}
