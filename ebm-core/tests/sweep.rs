//! Sweep ordering and range tests.

use ebm_core::config::{ModelConfig, RunConfig};
use ebm_core::errors::{EBMError, EBMResult};
use ebm_core::insolation::InsolationDistribution;
use ebm_core::sweep::{Phase, StepResult};
use ebm_core::Model;

fn collect(model: &Model, min: f64, max: f64, initial: f64, bands: usize) -> Vec<StepResult> {
    model
        .gen_temps(min, max, initial, bands)
        .unwrap()
        .collect::<EBMResult<Vec<_>>>()
        .unwrap()
}

#[test]
fn test_gen_temps_example() {
    let results = collect(&Model::default(), 0.1, 2.0, -60.0, 9);

    assert!(!results.is_empty());
    for r in &results {
        assert!(0.1 <= r.solar_multiplier && r.solar_multiplier <= 2.0);
    }
}

#[test]
fn test_ascending_then_descending() {
    for distribution in [InsolationDistribution::Seasonal, InsolationDistribution::Uniform] {
        let model = Model::new(ModelConfig {
            distribution,
            ..Default::default()
        });
        let results = collect(&model, 4.0, 10.0, -60.0, 9);
        assert_eq!(results.len(), 20);

        let (rising, falling): (Vec<_>, Vec<_>) = results.iter().partition(|r| r.delta > 0.0);
        assert_eq!(rising.len(), 10);
        assert_eq!(falling.len(), 10);

        // All rising steps come before all falling steps.
        assert!(results[..10].iter().all(|r| r.delta > 0.0));
        assert!(results[10..].iter().all(|r| r.delta < 0.0));

        assert!(rising
            .windows(2)
            .all(|w| w[1].solar_multiplier > w[0].solar_multiplier));
        assert!(falling
            .windows(2)
            .all(|w| w[1].solar_multiplier < w[0].solar_multiplier));

        assert_eq!(rising[0].solar_multiplier, 4.0);
        assert_eq!(falling[0].solar_multiplier, 10.0);
        for r in &results {
            assert!((4.0..=10.0).contains(&r.solar_multiplier));
            assert!(((r.delta.abs()) - 0.6).abs() < 1e-12);
        }
    }
}

#[test]
fn test_descending_branch_starts_from_ascending_end() {
    let model = Model::default();
    let solver = model.solver(9).unwrap();
    let results = collect(&model, 4.0, 10.0, -60.0, 9);

    let last_rising = &results[9];
    let first_falling = &results[10];
    let expected = solver
        .solve(first_falling.solar_multiplier, &last_rising.solution.temperatures)
        .unwrap();
    assert_eq!(first_falling.solution, expected);
}

#[test]
fn test_sweep_is_lazy() {
    let mut sweep = Model::default().gen_temps(4.0, 10.0, -60.0, 9).unwrap();

    let first = sweep.next().unwrap().unwrap();
    assert_eq!(first.solar_multiplier, 4.0);
    assert_eq!(sweep.phase(), Phase::Ascending);

    let remaining = sweep.by_ref().count();
    assert_eq!(remaining, 19);
    assert_eq!(sweep.phase(), Phase::Done);
}

#[test]
fn test_failure_on_first_step_yields_only_the_error() {
    let model = Model::new(ModelConfig {
        max_iterations: 3,
        ..Default::default()
    });
    let outcomes: Vec<_> = model.gen_temps(4.0, 10.0, -60.0, 9).unwrap().collect();

    // The first step cannot settle from -60 °C in three iterations.
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_err());
}

#[test]
fn test_failure_ends_sweep_after_partial_results() {
    // The frozen steps settle well inside 20 iterations; the thaw does not.
    let model = Model::new(ModelConfig {
        max_iterations: 20,
        ..Default::default()
    });
    let reference = collect(&Model::default(), 4.0, 10.0, -60.0, 9);

    let mut sweep = model.gen_temps(4.0, 10.0, -60.0, 9).unwrap();
    let mut completed = Vec::new();
    let failure = loop {
        match sweep.next() {
            Some(Ok(step)) => completed.push(step),
            Some(Err(err)) => break err,
            None => panic!("Sweep finished without a convergence failure"),
        }
    };

    assert!(!completed.is_empty());
    assert!(completed.len() < 10, "failed after {} steps", completed.len());
    assert_eq!(completed.as_slice(), &reference[..completed.len()]);

    match failure {
        EBMError::ConvergenceFailure {
            iterations,
            solar_multiplier,
            ..
        } => {
            assert_eq!(iterations, 20);
            assert_eq!(solar_multiplier, reference[completed.len()].solar_multiplier);
        }
        other => panic!("Expected convergence failure, got {:?}", other),
    }

    assert_eq!(sweep.phase(), Phase::Done);
    assert!(sweep.next().is_none());
}

#[test]
fn test_sweep_from_run_config() {
    let config = RunConfig::from_toml_str(
        r#"
        [model]
        steps_per_direction = 4

        [sweep]
        min_multiplier = 1.0
        max_multiplier = 2.0
        num_bands = 6
        "#,
    )
    .unwrap();

    let results = Model::new(config.model)
        .sweep(&config.sweep)
        .unwrap()
        .collect::<EBMResult<Vec<_>>>()
        .unwrap();

    assert_eq!(results.len(), 8);
    assert!(results.iter().all(|r| r.solution.temperatures.len() == 6));
}
