//! Allocation run execution.

use super::config::AllocationConfig;
use super::fill::fill_gaps;
use super::greedy::allocate_bids;
use super::types::RunState;
use crate::bidding::{ranked_bids, TieBreakSource};
use crate::error::AllocationError;
use crate::ledger::CapacityLedger;
use crate::model::AllocationInput;
use crate::result::{AllocationResult, RunStatistics};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Executes allocation runs.
///
/// # Usage
///
/// ```
/// use u_allocate::engine::{AllocationConfig, AllocationRunner};
/// use u_allocate::model::{AllocationInput, Preference, School, Student};
///
/// let input = AllocationInput::new(
///     vec![Student::new(1, "Ada")],
///     vec![School::new(1, "North", [1; 6])],
///     vec![Preference::new(1, 1, 500)],
/// );
/// let result = AllocationRunner::run(&input, &AllocationConfig::default().with_seed(7)).unwrap();
/// assert!(result.is_complete());
/// assert_eq!(result.assignments.len(), 6);
/// ```
pub struct AllocationRunner;

impl AllocationRunner {
    /// Runs an allocation, drawing tie-break keys from a seeded generator.
    ///
    /// The seed (from the config, or freshly drawn) is returned on the
    /// result so the run can be replayed.
    pub fn run(
        input: &AllocationInput,
        config: &AllocationConfig,
    ) -> Result<AllocationResult, AllocationError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut result = Self::run_with_source(input, config, &mut rng)?;
        result.seed = Some(seed);
        Ok(result)
    }

    /// Runs an allocation with a caller-supplied tie-break key source.
    ///
    /// `config.seed` is ignored. Input and configuration are validated
    /// before anything is allocated.
    pub fn run_with_source<S>(
        input: &AllocationInput,
        config: &AllocationConfig,
        source: &mut S,
    ) -> Result<AllocationResult, AllocationError>
    where
        S: TieBreakSource + ?Sized,
    {
        config.validate()?;
        input.validate(config.round_count)?;

        let bids = ranked_bids(input, config.strategy, source);
        tracing::debug!(
            bids = bids.len(),
            strategy = ?config.strategy,
            "ranked bids built"
        );

        let mut state = RunState::new(CapacityLedger::from_schools(
            &input.schools,
            config.round_count,
        ));
        allocate_bids(&mut state, &bids);
        let warnings = fill_gaps(&mut state, &input.students, config.fallback);

        let statistics = RunStatistics::compute(&input.students, &state.ledger, &state.assignments);
        tracing::info!(
            students = statistics.total_students,
            assignments = state.assignments.len(),
            complete = statistics.complete_students,
            shortfalls = warnings.len(),
            average_score = statistics.average_preference_score,
            "allocation run finished"
        );

        Ok(AllocationResult {
            assignments: state.assignments,
            statistics,
            warnings,
            seed: None,
        })
    }
}

/// Allocates students to school rounds; see [`AllocationRunner::run`].
pub fn allocate(
    input: &AllocationInput,
    config: &AllocationConfig,
) -> Result<AllocationResult, AllocationError> {
    AllocationRunner::run(input, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::{BidStrategy, KeySequence};
    use crate::model::{Preference, School, SchoolId, Student, StudentId};
    use crate::result::{AllocationResult, Origin};
    use proptest::prelude::*;
    use std::collections::{HashMap, HashSet};

    fn config() -> AllocationConfig {
        AllocationConfig::default().with_seed(42)
    }

    fn rounds_of(result: &AllocationResult, student: u64) -> Vec<usize> {
        result
            .assignments_for(StudentId(student))
            .iter()
            .map(|a| a.round)
            .collect()
    }

    #[test]
    fn test_single_student_single_school() {
        let input = AllocationInput::new(
            vec![Student::new(1, "Ada")],
            vec![School::new(1, "North", [1; 6])],
            vec![Preference::new(1, 1, 500)],
        );
        let result = AllocationRunner::run(&input, &config()).unwrap();

        assert!(result.is_complete());
        assert_eq!(rounds_of(&result, 1), vec![1, 2, 3, 4, 5, 6]);
        assert!(result.assignments.iter().all(|a| a.school_id == SchoolId(1)));

        // The one bid commits round 1; the rest are forced placements.
        let first = result.assignments_for(StudentId(1))[0];
        assert_eq!(first.origin, Origin::Preferred);
        assert_eq!(first.preference_score, 500);
        assert_eq!(result.statistics.fallback_assignments, 5);
        assert_eq!(result.statistics.fill_for(SchoolId(1)).unwrap().fill_rate, 1.0);
    }

    #[test]
    fn test_contested_seat_goes_to_lower_key() {
        let input = AllocationInput::new(
            vec![Student::new(1, "Ada"), Student::new(2, "Ben")],
            vec![
                School::new(1, "North", [1, 0, 0, 0, 0, 0]),
                School::new(2, "South", [1, 2, 2, 2, 2, 2]),
            ],
            vec![Preference::new(1, 1, 1000), Preference::new(2, 1, 1000)],
        );
        let mut keys = KeySequence::new(vec![0.8, 0.3]);
        let result = AllocationRunner::run_with_source(&input, &config(), &mut keys).unwrap();

        assert!(result.is_complete());
        let ben = result.assignments_for(StudentId(2));
        assert_eq!(ben[0].school_id, SchoolId(1));
        assert_eq!(ben[0].origin, Origin::Preferred);

        let ada = result.assignments_for(StudentId(1));
        assert_eq!(ada[0].school_id, SchoolId(2));
        assert_eq!(ada[0].origin, Origin::Fallback);
        assert!(result.seed.is_none());
    }

    #[test]
    fn test_contested_seat_without_alternative_warns() {
        let input = AllocationInput::new(
            vec![Student::new(1, "Ada"), Student::new(2, "Ben")],
            vec![School::new(1, "North", [1, 0, 0, 0, 0, 0])],
            vec![Preference::new(1, 1, 1000), Preference::new(2, 1, 1000)],
        );
        let mut keys = KeySequence::new(vec![0.1, 0.9]);
        let result = AllocationRunner::run_with_source(&input, &config(), &mut keys).unwrap();

        assert!(!result.is_complete());
        assert_eq!(result.assignments.len(), 1);
        assert_eq!(result.assignments[0].student_id, StudentId(1));
        assert_eq!(result.unfilled_rounds(StudentId(2)), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(result.unfilled_rounds(StudentId(1)), vec![2, 3, 4, 5, 6]);
        assert_eq!(result.statistics.complete_students, 0);
        assert_eq!(result.statistics.matched_students, 1);
        assert_eq!(result.statistics.unmatched_students, 1);
    }

    #[test]
    fn test_no_preferences_all_fallback() {
        let input = AllocationInput::new(
            vec![Student::new(1, "Ada")],
            vec![School::new(1, "North", [5; 6]), School::new(2, "South", [5; 6])],
            vec![],
        );
        let result = AllocationRunner::run(&input, &config()).unwrap();

        assert!(result.is_complete());
        assert_eq!(result.assignments.len(), 6);
        assert!(result
            .assignments
            .iter()
            .all(|a| a.origin == Origin::Fallback && a.preference_score == 0));
        assert_eq!(result.statistics.average_preference_score, 0.0);
    }

    #[test]
    fn test_top_k_limits_preferred_placements() {
        let schools: Vec<School> = (1..=10)
            .map(|i| School::new(i, format!("S{i}"), [1; 6]))
            .collect();
        let prefs: Vec<Preference> = (1..=10)
            .map(|i| Preference::new(1, i, 100 + i as u32))
            .collect();
        let input = AllocationInput::new(vec![Student::new(1, "Ada")], schools, prefs);

        let result = AllocationRunner::run(
            &input,
            &config().with_strategy(BidStrategy::TopK { k: 6 }),
        )
        .unwrap();

        // Six bids, one per round, all at the six highest-point schools.
        let mut schools: Vec<u64> = result.assignments.iter().map(|a| a.school_id.0).collect();
        schools.sort_unstable();
        assert_eq!(schools, vec![5, 6, 7, 8, 9, 10]);
        assert_eq!(result.statistics.preferred_assignments, 6);
    }

    #[test]
    fn test_fallback_disabled_reports_shortfall() {
        let input = AllocationInput::new(
            vec![Student::new(1, "Ada")],
            vec![School::new(1, "North", [1; 6])],
            vec![Preference::new(1, 1, 500)],
        );
        let result =
            AllocationRunner::run(&input, &config().with_fallback(false)).unwrap();

        assert_eq!(result.assignments.len(), 1);
        assert_eq!(result.warnings.len(), 5);
        assert_eq!(result.statistics.short_students, 1);
    }

    #[test]
    fn test_same_seed_same_batch() {
        let students: Vec<Student> = (1..=12).map(|i| Student::new(i, "s")).collect();
        let schools: Vec<School> = (1..=3).map(|i| School::new(i, "x", [4; 6])).collect();
        let prefs: Vec<Preference> = (1..=12)
            .flat_map(|s| (1..=3).map(move |c| Preference::new(s, c, 100)))
            .collect();
        let input = AllocationInput::new(students, schools, prefs);

        let a = AllocationRunner::run(&input, &config()).unwrap();
        let b = AllocationRunner::run(&input, &config()).unwrap();
        assert_eq!(a.assignments, b.assignments);
        assert_eq!(a.seed, Some(42));
    }

    #[test]
    fn test_unseeded_run_reports_seed() {
        let input = AllocationInput::new(
            vec![Student::new(1, "Ada")],
            vec![School::new(1, "North", [1; 6])],
            vec![Preference::new(1, 1, 500)],
        );
        let first = AllocationRunner::run(&input, &AllocationConfig::default()).unwrap();
        let seed = first.seed.unwrap();

        let replay =
            AllocationRunner::run(&input, &AllocationConfig::default().with_seed(seed)).unwrap();
        assert_eq!(first.assignments, replay.assignments);
    }

    #[test]
    fn test_empty_inputs() {
        let result = allocate(&AllocationInput::default(), &config()).unwrap();
        assert!(result.assignments.is_empty());
        assert!(result.is_complete());
        assert_eq!(result.statistics.total_students, 0);

        let no_schools = AllocationInput::new(vec![Student::new(1, "Ada")], vec![], vec![]);
        let result = allocate(&no_schools, &config()).unwrap();
        assert!(result.assignments.is_empty());
        assert_eq!(result.warnings.len(), 6);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let input = AllocationInput::new(
            vec![Student::new(1, "Ada")],
            vec![School::new(1, "North", [1; 5])],
            vec![],
        );
        assert!(matches!(
            allocate(&input, &config()),
            Err(AllocationError::CapacityShape { .. })
        ));

        let input = AllocationInput::new(
            vec![Student::new(1, "Ada")],
            vec![School::new(1, "North", [1; 6])],
            vec![Preference::new(1, 2, 10)],
        );
        assert!(matches!(
            allocate(&input, &config()),
            Err(AllocationError::UnknownSchool(SchoolId(2)))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bad = config().with_strategy(BidStrategy::TopK { k: 0 });
        assert!(matches!(
            allocate(&AllocationInput::default(), &bad),
            Err(AllocationError::InvalidConfig(_))
        ));
    }

    // ---- Property tests ----

    fn arb_input() -> impl Strategy<Value = AllocationInput> {
        (0usize..5, 0usize..10)
            .prop_flat_map(|(schools, students)| {
                (
                    prop::collection::vec(prop::collection::vec(0u32..4, 6), schools),
                    prop::collection::vec(
                        prop::collection::vec(prop_oneof![Just(0u32), 1u32..1000], schools),
                        students,
                    ),
                )
            })
            .prop_map(|(capacities, points)| {
                let schools = capacities
                    .into_iter()
                    .enumerate()
                    .map(|(i, caps)| School::new(i as u64 + 1, format!("S{i}"), caps))
                    .collect();
                let students = (0..points.len())
                    .map(|i| Student::new(i as u64 + 1, format!("P{i}")))
                    .collect();
                let preferences = points
                    .iter()
                    .enumerate()
                    .flat_map(|(s, row)| {
                        row.iter().enumerate().filter(|&(_, &p)| p > 0).map(move |(c, &p)| {
                            Preference::new(s as u64 + 1, c as u64 + 1, p)
                        })
                    })
                    .collect();
                AllocationInput::new(students, schools, preferences)
            })
    }

    fn arb_strategy() -> impl Strategy<Value = BidStrategy> {
        prop_oneof![
            Just(BidStrategy::Exhaustive),
            (1usize..8).prop_map(|k| BidStrategy::TopK { k }),
        ]
    }

    proptest! {
        #[test]
        fn prop_run_invariants(
            input in arb_input(),
            strategy in arb_strategy(),
            seed in any::<u64>(),
        ) {
            let config = AllocationConfig::default().with_strategy(strategy).with_seed(seed);
            let result = allocate(&input, &config).unwrap();

            // Capacity bound.
            let mut used: HashMap<(SchoolId, usize), u32> = HashMap::new();
            for a in &result.assignments {
                *used.entry((a.school_id, a.round)).or_insert(0) += 1;
            }
            for school in &input.schools {
                for round in 1..=6 {
                    let n = used.get(&(school.id, round)).copied().unwrap_or(0);
                    prop_assert!(n <= school.capacities[round - 1]);
                }
            }

            // No double booking; assignments and warnings partition the rounds.
            for student in &input.students {
                let mut rounds = HashSet::new();
                for a in result.assignments.iter().filter(|a| a.student_id == student.id) {
                    prop_assert!(rounds.insert(a.round));
                }
                for round in result.unfilled_rounds(student.id) {
                    prop_assert!(rounds.insert(round));
                }
                prop_assert_eq!(rounds, (1..=6).collect::<HashSet<usize>>());
            }

            // Fallback placements carry no weight; preferred ones match a bid.
            for a in &result.assignments {
                match a.origin {
                    Origin::Fallback => prop_assert_eq!(a.preference_score, 0),
                    Origin::Preferred => prop_assert_eq!(
                        a.preference_score,
                        input.points(a.student_id, a.school_id)
                    ),
                }
            }

            let stats = &result.statistics;
            prop_assert_eq!(stats.matched_students + stats.unmatched_students, stats.total_students);
            prop_assert_eq!(result.warnings.is_empty(), stats.short_students == 0);
            let mean = if result.assignments.is_empty() {
                0.0
            } else {
                result.assignments.iter().map(|a| a.preference_score as f64).sum::<f64>()
                    / result.assignments.len() as f64
            };
            prop_assert!((stats.average_preference_score - mean).abs() < 1e-6);
        }

        #[test]
        fn prop_fixed_seed_is_deterministic(input in arb_input(), seed in any::<u64>()) {
            let config = AllocationConfig::default().with_seed(seed);
            let a = allocate(&input, &config).unwrap();
            let b = allocate(&input, &config).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
