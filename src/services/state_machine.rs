use crate::domain::{PaymentStatus, QuoteStatus};

use super::error::{EngineError, EngineResult};

/// Validates if a quote status transition is allowed.
///
/// Edges: pending→answered, answered→accepted, answered→rejected,
/// accepted→scheduled, scheduled→completed.
pub fn validate_transition(from: QuoteStatus, to: QuoteStatus) -> EngineResult<()> {
    use QuoteStatus::*;

    match (from, to) {
        (Pending, Answered) => Ok(()),
        (Answered, Accepted) => Ok(()),
        (Answered, Rejected) => Ok(()),
        (Accepted, Scheduled) => Ok(()),
        (Scheduled, Completed) => Ok(()),

        _ => Err(EngineError::IllegalTransition { from, to }),
    }
}

/// Outcome of checking a client decision against the current status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Apply,
    /// The quote already sits in the requested status
    AlreadyApplied,
}

/// Like [`validate_transition`], but a repeat of the same decision is a no-op.
pub fn validate_decision(from: QuoteStatus, to: QuoteStatus) -> EngineResult<Decision> {
    if from == to {
        return Ok(Decision::AlreadyApplied);
    }
    validate_transition(from, to).map(|_| Decision::Apply)
}

/// Validates a payment step: unpaid→requested→paid, never backwards.
pub fn validate_payment_transition(from: PaymentStatus, to: PaymentStatus) -> EngineResult<()> {
    use PaymentStatus::*;

    match (from, to) {
        (Unpaid, Requested) => Ok(()),
        (Requested, Paid) => Ok(()),
        (Paid, Paid) => Err(EngineError::precondition("payment already confirmed")),
        (Unpaid, Paid) => Err(EngineError::precondition(
            "payment has not been requested by the professional",
        )),
        (from, to) => Err(EngineError::precondition(format!(
            "payment cannot move from {} to {}",
            from, to
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_edges_valid() {
        use QuoteStatus::*;
        for (from, to) in [
            (Pending, Answered),
            (Answered, Accepted),
            (Answered, Rejected),
            (Accepted, Scheduled),
            (Scheduled, Completed),
        ] {
            assert!(validate_transition(from, to).is_ok(), "{} -> {}", from, to);
        }
    }

    #[test]
    fn test_every_other_pair_invalid() {
        use QuoteStatus::*;
        let allowed = [
            (Pending, Answered),
            (Answered, Accepted),
            (Answered, Rejected),
            (Accepted, Scheduled),
            (Scheduled, Completed),
        ];
        for from in QuoteStatus::ALL {
            for to in QuoteStatus::ALL {
                if allowed.contains(&(from, to)) {
                    continue;
                }
                let result = validate_transition(from, to);
                assert!(
                    matches!(result, Err(EngineError::IllegalTransition { .. })),
                    "{} -> {} should be illegal",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_same_state_is_not_an_edge() {
        assert!(validate_transition(QuoteStatus::Accepted, QuoteStatus::Accepted).is_err());
    }

    #[test]
    fn test_repeat_decision_is_noop() {
        assert_eq!(
            validate_decision(QuoteStatus::Accepted, QuoteStatus::Accepted).unwrap(),
            Decision::AlreadyApplied
        );
        assert_eq!(
            validate_decision(QuoteStatus::Answered, QuoteStatus::Rejected).unwrap(),
            Decision::Apply
        );
    }

    #[test]
    fn test_accept_after_reject_illegal() {
        let result = validate_decision(QuoteStatus::Rejected, QuoteStatus::Accepted);
        assert_eq!(
            result.unwrap_err(),
            EngineError::IllegalTransition {
                from: QuoteStatus::Rejected,
                to: QuoteStatus::Accepted
            }
        );
    }

    #[test]
    fn test_payment_moves_forward_only() {
        use PaymentStatus::*;
        assert!(validate_payment_transition(Unpaid, Requested).is_ok());
        assert!(validate_payment_transition(Requested, Paid).is_ok());
        assert!(validate_payment_transition(Unpaid, Paid).is_err());
        assert!(validate_payment_transition(Paid, Paid).is_err());
        assert!(validate_payment_transition(Paid, Requested).is_err());
        assert!(validate_payment_transition(Requested, Unpaid).is_err());
        assert!(validate_payment_transition(Requested, Requested).is_err());
    }
}
