//! Property-based tests for melody-evo
//!
//! Uses proptest to verify invariants and properties of the library.

use melody_evo::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

fn gene_codes(max_genes: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..64, 1..=max_genes)
}

proptest! {
    // ==================== Codec Properties ====================

    #[test]
    fn decode_is_deterministic(codes in gene_codes(12)) {
        let codec = ChromosomeCodec::standard();
        let chromosome = Chromosome::from_codes(&codes, 6);
        prop_assert_eq!(codec.decode(&chromosome), codec.decode(&chromosome));
    }

    #[test]
    fn structural_error_iff_length_not_multiple(bits in prop::collection::vec(any::<bool>(), 0..80)) {
        let codec = ChromosomeCodec::standard();
        let len = bits.len();
        let result = codec.decode(&Chromosome::new(bits));
        let structural = matches!(result, Err(GenomeError::Structural { .. }));
        prop_assert_eq!(structural, len % 6 != 0);
    }

    #[test]
    fn strip_is_idempotent(codes in gene_codes(16)) {
        let codec = ChromosomeCodec::standard();
        let expression = codec.decode(&Chromosome::from_codes(&codes, 6)).unwrap();
        prop_assert_eq!(expression.clone().strip(), expression);
    }

    #[test]
    fn decoded_expression_has_no_outer_rests(codes in gene_codes(16)) {
        let codec = ChromosomeCodec::standard();
        let expression = codec.decode(&Chromosome::from_codes(&codes, 6)).unwrap();
        if let (Some(first), Some(last)) = (expression.symbols().first(), expression.symbols().last()) {
            prop_assert!(first.is_note());
            prop_assert!(last.is_note());
        }
        prop_assert!(expression.len() <= codes.len());
    }

    #[test]
    fn chromosome_text_roundtrip(bits in prop::collection::vec(any::<bool>(), 0..64)) {
        let chromosome = Chromosome::new(bits);
        let parsed: Chromosome = chromosome.to_string().parse().unwrap();
        prop_assert_eq!(parsed, chromosome);
    }

    // ==================== Operator Properties ====================

    #[test]
    fn crossover_preserves_bits_per_position(
        a in prop::collection::vec(any::<bool>(), 48),
        b in prop::collection::vec(any::<bool>(), 48),
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut population = Population::from_chromosomes(vec![
            Chromosome::new(a.clone()),
            Chromosome::new(b.clone()),
        ]);
        {
            let mut pair = population.pair_mut(0, 1).unwrap();
            OnePointCrossover::new(1.0).crossover(&mut pair, &mut rng).unwrap();
        }

        for i in 0..48 {
            let mut before = [a[i], b[i]];
            let mut after = [population[0][i], population[1][i]];
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }
    }

    #[test]
    fn crossover_at_swaps_tail_from_point(
        point in 0usize..=24,
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut population = Population::from_chromosomes(vec![
            Chromosome::ones(48),
            Chromosome::zeros(48),
        ]);
        {
            let mut pair = population.pair_mut(0, 1).unwrap();
            OnePointCrossover::new(1.0).crossover_at(&mut pair, point).unwrap();
        }
        prop_assert_eq!(population[0].count_ones(), point);
        prop_assert_eq!(population[1].count_ones(), 48 - point);
        prop_assert!(OnePointCrossover::new(1.0).cut_point(48, &mut rng) <= 24);
    }

    #[test]
    fn zero_rate_mutation_is_identity(bits in prop::collection::vec(any::<bool>(), 0..64)) {
        let mut rng = rand::thread_rng();
        let original = Chromosome::new(bits);
        let mut genome = original.clone();
        prop_assert_eq!(BitFlipMutation::new(0.0).mutate(&mut genome, &mut rng), 0);
        prop_assert_eq!(genome, original);
    }

    #[test]
    fn roulette_returns_valid_indices(
        scores in prop::collection::vec(0.01f64..10.0, 1..50),
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let len = scores.len();
        let fitness = FitnessMap::from_scores(scores);
        let (a, b) = RouletteSelection::new().select_pair(&fitness, &mut rng).unwrap();
        prop_assert!(a < len && b < len);
    }

    // ==================== Fitness Properties ====================

    #[test]
    fn evaluator_scores_never_below_floor(
        chromosomes in prop::collection::vec(prop::collection::vec(any::<bool>(), 0..60), 1..20)
    ) {
        let evaluator = FitnessEvaluator::new(
            ChromosomeCodec::standard(),
            HeuristicScorer::default(),
            0.01,
        );
        let population: Population = chromosomes.into_iter().map(Chromosome::new).collect();
        let fitness = evaluator.evaluate(&population);

        prop_assert_eq!(fitness.len(), population.len());
        prop_assert!(fitness.scores().iter().all(|&f| f >= 0.01));
    }

    #[test]
    fn heuristic_score_is_non_negative(codes in gene_codes(12)) {
        let codec = ChromosomeCodec::standard();
        let expression = codec.decode(&Chromosome::from_codes(&codes, 6)).unwrap();
        if let Ok(score) = HeuristicScorer::default().score(&expression) {
            prop_assert!(score >= 0.0);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    // ==================== Population Properties ====================

    #[test]
    fn population_size_invariant(pop_size in 1usize..40, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = EvolutionConfig::default()
            .with_population_size(pop_size)
            .with_parallel_evaluation(false);
        let mut ga = MelodyGA::builder()
            .config(config.clone())
            .analysis(HeuristicScorer::default())
            .checkpointing(false)
            .build()
            .unwrap();

        for _ in 0..3 {
            ga.step(&mut rng).unwrap();
            let population = ga.population().unwrap();
            prop_assert_eq!(population.len(), pop_size);
            prop_assert!(population.check_lengths(config.chromosome_size()).is_ok());
        }
    }

    #[test]
    fn initializer_yields_well_formed_chromosomes(size in 1usize..30, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = EvolutionConfig::default();
        let codec = ChromosomeCodec::standard();
        let initializer = PopulationInitializer::new(&config, codec.clone());

        let population = initializer.generate_population(size, &mut rng).unwrap();
        prop_assert_eq!(population.len(), size);
        for chromosome in population.iter() {
            let expression = codec.decode(chromosome).unwrap();
            prop_assert!(expression.len() > config.min_expression_len);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // ==================== Checkpoint Properties ====================

    #[test]
    fn checkpoint_restores_scores_bit_for_bit(
        scores in prop::collection::vec(
            prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO,
            1..40
        )
    ) {
        let dir = tempdir().unwrap();
        let population: Population = (0..scores.len())
            .map(|i| Chromosome::from_codes(&[i as u32 % 64], 6))
            .collect();
        let checkpoint = Checkpoint::new(2, population, FitnessMap::from_scores(scores.clone()));

        for format in [CheckpointFormat::Json, CheckpointFormat::Binary] {
            let store = CheckpointStore::new(dir.path().join(format!("{:?}", format)))
                .with_format(format);
            store.save(&checkpoint).unwrap();
            let loaded = store.load(6, scores.len()).unwrap().unwrap();

            let expected: Vec<u64> = scores.iter().map(|f| f.to_bits()).collect();
            let restored: Vec<u64> = loaded.fitness.scores().iter().map(|f| f.to_bits()).collect();
            prop_assert_eq!(restored, expected);
        }
    }
}
