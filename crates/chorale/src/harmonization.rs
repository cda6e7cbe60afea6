//! Solved voicings and the outcome of a harmonization run.

use std::fmt;

use chorale_core::CostVector;
use chorale_solver::{SearchStatus, SolverStatistics};

use crate::theory::{note_name, Voice};

/// One complete voicing: four pitches per chord, bass first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Harmonization {
    pitches: Vec<i64>,
    costs: CostVector,
}

impl Harmonization {
    pub fn new(pitches: Vec<i64>, costs: CostVector) -> Self {
        debug_assert_eq!(pitches.len() % Voice::COUNT, 0);
        Self { pitches, costs }
    }

    pub fn chord_count(&self) -> usize {
        self.pitches.len() / Voice::COUNT
    }

    /// All pitches, chord by chord in voice order.
    pub fn pitches(&self) -> &[i64] {
        &self.pitches
    }

    pub fn into_pitches(self) -> Vec<i64> {
        self.pitches
    }

    pub fn chord(&self, position: usize) -> &[i64] {
        &self.pitches[position * Voice::COUNT..(position + 1) * Voice::COUNT]
    }

    pub fn pitch(&self, position: usize, voice: Voice) -> i64 {
        self.pitches[position * Voice::COUNT + voice.index()]
    }

    /// The melody sung by one voice.
    pub fn voice_line(&self, voice: Voice) -> Vec<i64> {
        self.pitches
            .chunks(Voice::COUNT)
            .map(|chord| chord[voice.index()])
            .collect()
    }

    pub fn costs(&self) -> &CostVector {
        &self.costs
    }
}

impl fmt::Display for Harmonization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for voice in Voice::ALL.iter().rev() {
            write!(f, "{:<9}", voice.name())?;
            for pitch in self.voice_line(*voice) {
                write!(f, "{:>5}", note_name(pitch))?;
            }
            writeln!(f)?;
        }
        write!(f, "costs    {}", self.costs)
    }
}

/// Everything a harmonization run produced.
#[derive(Debug, Clone)]
pub struct HarmonizationOutcome {
    trail: Vec<Harmonization>,
    status: SearchStatus,
    statistics: SolverStatistics,
    proven_optimal: bool,
}

impl HarmonizationOutcome {
    pub(crate) fn new(
        trail: Vec<Harmonization>,
        status: SearchStatus,
        statistics: SolverStatistics,
        proven_optimal: bool,
    ) -> Self {
        let proven_optimal = proven_optimal && !trail.is_empty();
        Self {
            trail,
            status,
            statistics,
            proven_optimal,
        }
    }

    /// The cheapest voicing found, if any.
    pub fn best(&self) -> Option<&Harmonization> {
        self.trail.iter().min_by(|a, b| a.costs.cmp(&b.costs))
    }

    pub fn into_best(self) -> Option<Harmonization> {
        self.trail.into_iter().min_by(|a, b| a.costs.cmp(&b.costs))
    }

    /// Every voicing reported, in the order the search found them.
    pub fn trail(&self) -> &[Harmonization] {
        &self.trail
    }

    pub fn into_trail(self) -> Vec<Harmonization> {
        self.trail
    }

    /// No cheaper voicing exists than [`HarmonizationOutcome::best`].
    pub fn is_proven_optimal(&self) -> bool {
        self.proven_optimal
    }

    /// The search was exhausted without finding any voicing.
    pub fn is_unsatisfiable(&self) -> bool {
        self.status == SearchStatus::Complete && self.trail.is_empty()
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }
}

impl fmt::Display for HarmonizationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.best() {
            Some(best) => {
                writeln!(f, "{best}")?;
                let optimality = if self.proven_optimal {
                    "proven optimal"
                } else {
                    "optimality not proven"
                };
                write!(f, "{optimality} after {} voicings", self.trail.len())
            }
            None if self.is_unsatisfiable() => f.write_str("no voicing satisfies the rules"),
            None => f.write_str("stopped before any voicing was found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn statistics() -> SolverStatistics {
        SolverStatistics {
            duration: Duration::from_millis(5),
            node_count: 10,
            failure_count: 2,
            propagation_count: 100,
            solution_count: 2,
            restart_count: 0,
            max_depth: 8,
        }
    }

    fn cadence(costs: Vec<i64>) -> Harmonization {
        Harmonization::new(
            vec![48, 52, 55, 60, 43, 55, 62, 67, 48, 55, 64, 72],
            CostVector::of(costs),
        )
    }

    #[test]
    fn test_accessors() {
        let h = cadence(vec![0, 0, 0, 12, -2]);
        assert_eq!(h.chord_count(), 3);
        assert_eq!(h.chord(1), &[43, 55, 62, 67]);
        assert_eq!(h.pitch(2, Voice::Soprano), 72);
        assert_eq!(h.voice_line(Voice::Tenor), vec![52, 55, 55]);
    }

    #[test]
    fn test_display_lists_voices_top_down() {
        let text = cadence(vec![0, 0, 0, 12, -2]).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("soprano"));
        assert!(lines[0].contains("C5"));
        assert!(lines[3].starts_with("bass"));
        assert!(lines[3].contains("G2"));
        assert!(lines[4].contains("[0/0/0/12/-2]"));
    }

    #[test]
    fn test_best_is_cheapest_of_trail() {
        let outcome = HarmonizationOutcome::new(
            vec![cadence(vec![1, 0, 0, 4, 0]), cadence(vec![0, 0, 1, 30, 0])],
            SearchStatus::Stopped,
            statistics(),
            false,
        );
        assert_eq!(outcome.best().unwrap().costs().levels(), &[0, 0, 1, 30, 0]);
        assert!(!outcome.is_proven_optimal());
        assert!(!outcome.is_unsatisfiable());
        assert!(outcome.to_string().contains("optimality not proven"));
    }

    #[test]
    fn test_empty_complete_outcome_is_unsatisfiable() {
        let outcome =
            HarmonizationOutcome::new(Vec::new(), SearchStatus::Complete, statistics(), true);
        assert!(outcome.is_unsatisfiable());
        assert!(!outcome.is_proven_optimal());
        assert!(outcome.best().is_none());
    }
}
