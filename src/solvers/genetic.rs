//! Population search with elitism, tournament selection and single-point
//! crossover.

use crate::constraint::{Assignment, DEFAULT_PENALTY, RdfModel, Variant};
use crate::graph::SignedGraph;
use crate::solvers::{Solver, SolverError, SolverResult, finish};
use log::*;
use rand::Rng;
use rand::rngs::StdRng;
use std::time::Instant;

/// A genetic algorithm over labelings. Genomes are label vectors aligned
/// with the ascending vertex-id ordering; fitness is the penalized cost.
/// The best individual ever observed is returned.
#[derive(Debug, Clone, Copy)]
pub struct GeneticAlgorithmSolver {
    pub population: usize,
    pub generations: usize,
    pub elite: usize,
    pub mutation_rate: f64,
    pub tournament: usize,
    pub penalty: f64,
}

impl Default for GeneticAlgorithmSolver {
    fn default() -> Self {
        Self {
            population: 60,
            generations: 150,
            elite: 6,
            mutation_rate: 0.05,
            tournament: 3,
            penalty: DEFAULT_PENALTY,
        }
    }
}

impl GeneticAlgorithmSolver {
    fn assignment(ids: &[u32], genome: &[u8]) -> Assignment {
        Assignment::from_labels(ids.iter().copied().zip(genome.iter().copied()))
    }

    /// Index of the fittest of `tournament` random contenders.
    fn tournament_pick(&self, costs: &[f64], rng: &mut StdRng) -> usize {
        let mut winner = rng.random_range(0..costs.len());
        for _ in 1..self.tournament {
            let contender = rng.random_range(0..costs.len());
            if costs[contender] < costs[winner] {
                winner = contender;
            }
        }
        winner
    }
}

impl Solver for GeneticAlgorithmSolver {
    fn name(&self) -> &'static str {
        "genetic"
    }

    fn solve(
        &self,
        graph: &SignedGraph,
        variant: Variant,
        rng: &mut StdRng,
    ) -> Result<SolverResult, SolverError> {
        let started = Instant::now();
        let model = RdfModel::new(graph, variant);
        let ids = graph.vertex_ids();
        let n = ids.len();
        if n == 0 {
            return Ok(finish(self.name(), &model, Assignment::default(), started, Some(0)));
        }

        let cost_of = |genome: &[u8]| {
            model.total_cost(&Self::assignment(&ids, genome), self.penalty)
        };

        let mut population: Vec<Vec<u8>> = (0..self.population)
            .map(|_| (0..n).map(|_| rng.random_range(0..3u8)).collect())
            .collect();
        let mut best_genome = population[0].clone();
        let mut best_cost = cost_of(&best_genome);

        for generation in 0..self.generations {
            let costs: Vec<f64> = population.iter().map(|g| cost_of(g)).collect();
            // rank ascending by cost; the finite costs give a total order
            let mut order: Vec<usize> = (0..population.len()).collect();
            order.sort_by(|&i, &j| costs[i].total_cmp(&costs[j]));

            if costs[order[0]] < best_cost {
                best_cost = costs[order[0]];
                best_genome = population[order[0]].clone();
                trace!("generation {generation}: best cost {best_cost}");
            }

            // elites pass unmodified; the rest are bred
            let mut next: Vec<Vec<u8>> = order
                .iter()
                .take(self.elite.min(population.len()))
                .map(|&i| population[i].clone())
                .collect();
            while next.len() < self.population {
                let p1 = &population[self.tournament_pick(&costs, rng)];
                let p2 = &population[self.tournament_pick(&costs, rng)];
                let cut = if n > 1 { rng.random_range(1..n) } else { 0 };
                let mut child: Vec<u8> = p1[..cut]
                    .iter()
                    .chain(p2[cut..].iter())
                    .copied()
                    .collect();
                for gene in &mut child {
                    if rng.random_bool(self.mutation_rate) {
                        *gene = rng.random_range(0..3u8);
                    }
                }
                next.push(child);
            }
            population = next;
        }

        let assignment = Self::assignment(&ids, &best_genome);
        Ok(finish(
            self.name(),
            &model,
            assignment,
            started,
            Some(self.generations as u64),
        ))
    }
}
