use mean_interp::{
    Bounds, DeviationReport, PeriodSeries, SplineParams, Termination, interpolate_autoregressive,
    interpolate_spline,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

fn random_series(rng: &mut ChaCha12Rng) -> PeriodSeries {
    let n_periods = rng.random_range(2..=12);
    let values = (0..n_periods)
        .map(|_| rng.random_range(-50.0..50.0))
        .collect();
    let lengths = (0..n_periods).map(|_| rng.random_range(1..=31)).collect();
    PeriodSeries::new(values, lengths).unwrap()
}

#[test]
fn autoregressive_keeps_length_and_means() {
    let mut rng = ChaCha12Rng::seed_from_u64(7);
    for _ in 0..32 {
        let series = random_series(&mut rng);
        let samples = interpolate_autoregressive(&series, Bounds::none(), &mut ()).unwrap();

        assert_eq!(samples.len(), series.lengths().iter().sum::<usize>());
        let report = DeviationReport::compute(&series, &samples).unwrap();
        assert!(report.max_abs_dev < 1e-6, "{series:?}: {report:?}");
    }
}

#[test]
fn autoregressive_respects_bounds() {
    let mut rng = ChaCha12Rng::seed_from_u64(11);
    for _ in 0..32 {
        let series = random_series(&mut rng);
        let bounds = Bounds {
            min_val: Some(-40.0),
            max_val: Some(40.0),
        };
        let samples = interpolate_autoregressive(&series, bounds, &mut ()).unwrap();

        assert_eq!(samples.len(), series.n_samples());
        assert!(
            samples.iter().all(|&val| (-40.0..=40.0).contains(&val)),
            "{series:?}"
        );
    }
}

#[test]
fn spline_keeps_length_and_means() {
    let mut rng = ChaCha12Rng::seed_from_u64(13);
    let params = SplineParams::default();
    for _ in 0..32 {
        let series = random_series(&mut rng);
        let interp = interpolate_spline(&series, params, &mut ()).unwrap();
        assert_eq!(interp.samples.len(), series.n_samples());

        assert!(
            matches!(interp.termination, Termination::Converged { .. }),
            "{series:?}: {:?}",
            interp.termination
        );
        let report = DeviationReport::compute(&series, &interp.samples).unwrap();
        assert!(report.max_abs_dev < params.tol, "{series:?}: {report:?}");
    }
}
