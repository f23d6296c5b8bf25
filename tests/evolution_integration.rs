//! End-to-end tests for the evolution loop
//!
//! Multi-generation runs, checkpoint resume and fallback, and the reference
//! decoding scenarios.

use melody_evo::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

fn config_in(dir: &std::path::Path) -> EvolutionConfig {
    EvolutionConfig::default()
        .with_population_size(31)
        .with_mutation_rate(0.005)
        .with_checkpoint_dir(dir)
}

fn build(config: EvolutionConfig) -> MelodyGA<HeuristicScorer> {
    MelodyGA::builder()
        .config(config)
        .analysis(HeuristicScorer::default())
        .build()
        .unwrap()
}

#[test]
fn multi_generation_run_keeps_invariants() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    let mut rng = StdRng::seed_from_u64(100);
    let mut ga = build(config.clone());

    let stats = ga.run_for(5, &mut rng).unwrap();

    assert_eq!(stats.num_generations(), 5);
    for (i, report) in stats.generations.iter().enumerate() {
        assert_eq!(report.generation, i + 1);
        assert!(report.best.fitness >= report.worst.fitness);
        assert!(report.worst.fitness >= config.fitness_floor);
        assert_eq!(report.best.chromosome.len(), config.chromosome_size());
    }

    let population = ga.population().unwrap();
    assert_eq!(population.len(), 31);
    assert!(population.check_lengths(48).is_ok());
}

#[test]
fn resume_continues_from_last_checkpoint() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path()).with_checkpoint_format(CheckpointFormat::Binary);
    let mut rng = StdRng::seed_from_u64(200);

    let mut first = build(config.clone());
    first.run_for(2, &mut rng).unwrap();
    let entering_third = first.population().unwrap().clone();
    first.step(&mut rng).unwrap();
    drop(first);

    let mut resumed = build(config);
    resumed.bootstrap(&mut rng).unwrap();

    assert_eq!(resumed.generation(), 3);
    let state = resumed.state().unwrap();
    assert_eq!(state.population, entering_third);
    assert_eq!(state.fitness.len(), 31);

    let report = resumed.step(&mut rng).unwrap();
    assert_eq!(report.generation, 3);
    assert_eq!(resumed.generation(), 4);
}

#[test]
fn corrupt_checkpoint_falls_back_to_fresh_population() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    let store = CheckpointStore::from_config(&config);
    std::fs::write(store.population_path(), "{ definitely not a population").unwrap();

    let mut rng = StdRng::seed_from_u64(300);
    let mut ga = build(config);
    ga.bootstrap(&mut rng).unwrap();

    assert_eq!(ga.generation(), 1);
    assert_eq!(ga.population().unwrap().len(), 31);
    assert!(ga.state().unwrap().fitness.is_empty());
}

#[test]
fn checkpoint_for_other_population_size_is_discarded() {
    let dir = tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(400);

    let mut small = build(config_in(dir.path()).with_population_size(10));
    small.run_for(2, &mut rng).unwrap();

    let mut large = build(config_in(dir.path()));
    large.bootstrap(&mut rng).unwrap();
    assert_eq!(large.generation(), 1);
    assert_eq!(large.population().unwrap().len(), 31);
}

#[test]
fn checkpoint_roundtrip_is_exact() {
    let dir = tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(500);
    let config = config_in(dir.path());
    let initializer = PopulationInitializer::new(&config, ChromosomeCodec::standard());
    let population = initializer.generate_population(31, &mut rng).unwrap();
    let fitness = FitnessEvaluator::new(
        ChromosomeCodec::standard(),
        HeuristicScorer::default(),
        config.fitness_floor,
    )
    .evaluate(&population);

    for format in [CheckpointFormat::Json, CheckpointFormat::Binary] {
        let store = CheckpointStore::new(dir.path().join(format!("{:?}", format))).with_format(format);
        let checkpoint = Checkpoint::new(9, population.clone(), fitness.clone());
        store.save(&checkpoint).unwrap();
        assert_eq!(store.load(48, 31).unwrap(), Some(checkpoint));
    }
}

#[test]
fn two_gene_scenario_decodes_lowest_notes() {
    let codec = ChromosomeCodec::standard();
    let chromosome: Chromosome = "000000000001".parse().unwrap();
    let expression = codec.decode(&chromosome).unwrap();

    assert_eq!(expression.len(), 2);
    assert_eq!(expression.symbols()[0], Symbol::note(57));
    assert_eq!(expression.symbols()[1], Symbol::note(58));
    assert_eq!(expression.to_string(), "[A3, A#3]");
}

#[test]
fn all_rest_chromosome_scores_floor() {
    let codec = ChromosomeCodec::standard();
    let all_rests = Chromosome::from_codes(&[32, 33, 34, 35, 36, 32, 33, 34], 6);
    assert!(codec.decode(&all_rests).unwrap().is_empty());

    let evaluator = FitnessEvaluator::new(codec, HeuristicScorer::default(), 0.01).parallel(true);
    let population: Population = vec![all_rests; 4].into_iter().collect();
    assert_eq!(evaluator.evaluate(&population).scores(), &[0.01; 4]);
}

#[test]
fn independent_searches_do_not_share_state() {
    let dir_a = tempdir().unwrap();
    let dir_b = tempdir().unwrap();
    let mut rng_a = StdRng::seed_from_u64(600);
    let mut rng_b = StdRng::seed_from_u64(600);

    let mut a = build(config_in(dir_a.path()));
    let mut b = build(config_in(dir_b.path()).with_population_size(12));
    a.run_for(2, &mut rng_a).unwrap();
    b.run_for(2, &mut rng_b).unwrap();

    assert_eq!(a.population().unwrap().len(), 31);
    assert_eq!(b.population().unwrap().len(), 12);
}
