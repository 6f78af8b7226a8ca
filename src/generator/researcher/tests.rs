#[cfg(test)]
mod tests {
    use crate::generator::researcher::{GradeDecision, evaluate_feedback};
    use crate::generator::types::{Feedback, FollowUpQuery, Grade, SectionOutcome};

    fn fail_with(queries: Vec<FollowUpQuery>) -> Feedback {
        Feedback {
            grade: Grade::Fail,
            follow_up_queries: queries,
        }
    }

    #[test]
    fn test_pass_terminates_immediately() {
        // once the grader yields pass, no further cycles run
        let decision = evaluate_feedback(Feedback::pass_by_default(), 1, 3);
        assert_eq!(decision, GradeDecision::Accept(SectionOutcome::Passed));
    }

    #[test]
    fn test_pass_on_first_cycle_with_depth_one() {
        // max_search_depth=1 with an immediate pass: exactly one cycle
        let decision = evaluate_feedback(Feedback::pass_by_default(), 1, 1);
        assert_eq!(decision, GradeDecision::Accept(SectionOutcome::Passed));
    }

    #[test]
    fn test_fail_below_ceiling_retries_with_follow_ups() {
        let feedback = fail_with(vec![
            FollowUpQuery::Raw("first".to_string()),
            FollowUpQuery::Annotated {
                search_query: "second".to_string(),
            },
        ]);

        let decision = evaluate_feedback(feedback, 1, 3);
        assert_eq!(
            decision,
            GradeDecision::Retry(vec!["first".to_string(), "second".to_string()])
        );
    }

    #[test]
    fn test_fail_at_ceiling_accepts_best_effort_content() {
        // exhausting the ceiling is not an error, the last draft is kept
        let feedback = fail_with(vec![FollowUpQuery::Raw("unused".to_string())]);
        let decision = evaluate_feedback(feedback, 3, 3);
        assert_eq!(
            decision,
            GradeDecision::Accept(SectionOutcome::ExhaustedRetries)
        );
    }

    #[test]
    fn test_fail_with_depth_one_exhausts_after_single_cycle() {
        let decision = evaluate_feedback(fail_with(vec![]), 1, 1);
        assert_eq!(
            decision,
            GradeDecision::Accept(SectionOutcome::ExhaustedRetries)
        );
    }

    #[test]
    fn test_cycle_count_never_exceeds_ceiling() {
        // drive the transition function the way the loop does: every path
        // reaches Accept by the time cycles_done equals max_depth
        for max_depth in 1..=4 {
            let mut cycles = 0;
            loop {
                cycles += 1;
                match evaluate_feedback(fail_with(vec![FollowUpQuery::Raw("q".into())]), cycles, max_depth) {
                    GradeDecision::Accept(outcome) => {
                        assert_eq!(outcome, SectionOutcome::ExhaustedRetries);
                        break;
                    }
                    GradeDecision::Retry(_) => continue,
                }
            }
            assert_eq!(cycles, max_depth);
        }
    }
}
