use energy_cycle_simulator::{
    cycle::{compare, sample_curves, CycleConfiguration, ModelSlot, Scenario},
    power::ModelParameters,
};

fn scenario(cycle_time: f64, cost: f64, a: (f64, f64), b: (f64, f64)) -> Scenario {
    Scenario {
        cycle: CycleConfiguration::new(cycle_time, cost).expect("cycle"),
        model_a: ModelParameters::new(a.0, a.1).expect("model a"),
        model_b: ModelParameters::new(b.0, b.1).expect("model b"),
        ..Scenario::default()
    }
}

#[test]
fn default_scenario_recommends_standard_server() {
    let s = Scenario::default();
    let r = compare(&s);
    assert_eq!(r.winner, ModelSlot::A);
    assert!((r.energy_a - 181.684).abs() < 1e-3, "energy_a={}", r.energy_a);
    assert!((r.energy_b - 190.078).abs() < 1e-3, "energy_b={}", r.energy_b);
    assert!((r.cost_a - 29.169).abs() < 1e-3, "cost_a={}", r.cost_a);
    assert!((r.cost_b - 30.517).abs() < 1e-3, "cost_b={}", r.cost_b);
    assert!((r.savings_percent - 4.416).abs() < 1e-2, "savings={}", r.savings_percent);
}

#[test]
fn longer_cycle_flips_the_winner() {
    // 긴 사이클에서는 감쇠가 느린 B의 꼬리 에너지가 커진다.
    let r = compare(&scenario(10.0, 160.55, (200.0, 1.0), (80.0, 0.5)));
    assert_eq!(r.winner, ModelSlot::A);
    let r = compare(&scenario(1.0, 160.55, (200.0, 1.0), (80.0, 0.5)));
    assert_eq!(r.winner, ModelSlot::B);
    assert!(r.savings_percent > 0.0);
}

#[test]
fn identical_models_tie_towards_b() {
    let r = compare(&scenario(4.0, 100.0, (120.0, 0.8), (120.0, 0.8)));
    assert_eq!(r.winner, ModelSlot::B);
    assert_eq!(r.savings_percent, 0.0);
}

#[test]
fn cost_scales_linearly_with_rate() {
    let cheap = compare(&scenario(4.0, 100.0, (200.0, 1.0), (80.0, 0.5)));
    let pricey = compare(&scenario(4.0, 200.0, (200.0, 1.0), (80.0, 0.5)));
    assert!((pricey.cost_a - 2.0 * cheap.cost_a).abs() < 1e-9);
    assert_eq!(cheap.winner, pricey.winner);
    assert!((cheap.savings_percent - pricey.savings_percent).abs() < 1e-9);
}

#[test]
fn sampled_curve_peaks_near_analytic_peak() {
    let s = Scenario::default();
    let points = sample_curves(4.0, &s.model_a, &s.model_b, 400);
    let sampled_max = points.iter().map(|p| p.power_b).fold(0.0_f64, f64::max);
    let peak = s.model_b.peak();
    assert!(sampled_max <= peak.power + 1e-9);
    assert!(peak.power - sampled_max < 0.01);
}
