//! Assembly of the full constraint model for a piece.

use chorale_core::CostVector;
use chorale_solver::{IntVar, Model, Rel, Solution};
use tracing::debug;

use crate::harmonization::Harmonization;
use crate::piece::{ModulationKind, Piece};
use crate::preferences::CostTerms;
use crate::rules::{harmonic, voice_leading, Rules};
use crate::voicing::Voicing;

/// A piece turned into variables, rules and a lexicographic objective.
#[derive(Debug)]
pub struct HarmonyModel {
    model: Model,
    voicing: Voicing,
    costs: CostTerms,
}

impl HarmonyModel {
    pub fn build(piece: &Piece) -> Self {
        let mut model = Model::new();
        let voicing = Voicing::new(&mut model, piece.len());

        {
            let mut rules = Rules::new(&mut model, &voicing);
            for section in piece.section_views() {
                harmonic::post(&mut rules, &section);
                voice_leading::post(&mut rules, &section);
            }
            for join in piece.joins() {
                // a pivot is already covered by the rules of both sections
                if join.kind.overlap() == 0 {
                    voice_leading::forbid_parallels(&mut rules, join.last);
                }
                if join.kind == ModulationKind::Chromatic {
                    let leading_tone = join.to.tonality.leading_tone();
                    voice_leading::chromatic_approach(&mut rules, join.last, leading_tone);
                }
            }
        }

        let chords = piece.chords();
        let costs = CostTerms::post(&mut model, &voicing, &chords);
        model.minimize_lex(costs.levels());
        voicing.branch(&mut model);

        debug!(
            event = "model_built",
            chords = piece.len(),
            sections = piece.sections().len(),
            variables = model.var_count(),
            propagators = model.propagator_count(),
            failed = model.is_failed(),
        );

        Self {
            model,
            voicing,
            costs,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn voicing(&self) -> &Voicing {
        &self.voicing
    }

    pub fn costs(&self) -> &CostTerms {
        &self.costs
    }

    /// Keeps only voicings whose every cost level is at most the matching
    /// level of `bound`.
    pub fn bound_costs(&mut self, bound: &CostVector) {
        for (var, &limit) in self.costs.levels().into_iter().zip(bound.levels()) {
            self.model.linear(&[(1, var)], Rel::Le, limit);
        }
    }

    /// Splits off the model for the solver, keeping what is needed to read
    /// solutions back.
    pub fn into_parts(self) -> (Model, Decoder) {
        let decoder = Decoder {
            pitches: self.voicing.pitches().to_vec(),
            levels: self.costs.levels(),
        };
        (self.model, decoder)
    }
}

/// Reads harmonizations out of solver solutions.
#[derive(Debug, Clone)]
pub struct Decoder {
    pitches: Vec<IntVar>,
    levels: Vec<IntVar>,
}

impl Decoder {
    pub fn decode(&self, solution: &Solution) -> Harmonization {
        Harmonization::new(
            solution.values_of(&self.pitches),
            CostVector::of(solution.values_of(&self.levels)),
        )
    }
}
