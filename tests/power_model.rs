//! 닫힌 형식 에너지 식을 수치 적분(심프슨)과 대조하는 회귀 테스트.
use energy_cycle_simulator::power::{energy_antiderivative, find_peak, interval_energy, power};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

/// 복합 심프슨 적분. n은 짝수.
fn simpson(f: impl Fn(f64) -> f64, lo: f64, hi: f64, n: usize) -> f64 {
    let h = (hi - lo) / n as f64;
    let mut sum = f(lo) + f(hi);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(lo + h * i as f64);
    }
    sum * h / 3.0
}

#[test]
fn closed_form_matches_simpson_quadrature() {
    let cases = [
        (200.0, 1.0, 4.0),
        (80.0, 0.5, 4.0),
        (10.0, 0.1, 10.0),
        (500.0, 5.0, 1.0),
        (150.0, 2.5, 7.5),
        (320.0, 0.3, 2.0),
    ];
    for (k, a, t) in cases {
        let numeric = simpson(|x| power(x, k, a), 0.0, t, 20_000);
        assert_close(
            &format!("E(k={k}, a={a}, T={t})"),
            interval_energy(t, k, a),
            numeric,
            1e-6,
        );
    }
}

#[test]
fn reference_values() {
    // P(1) = 200·e^-1
    assert_close("P(1)", power(1.0, 200.0, 1.0), 73.575_888_234_288_46, 1e-9);
    // E(4) = 200·(1 - 5·e^-4)
    assert_close("E_A", interval_energy(4.0, 200.0, 1.0), 181.684_361_111_265_9, 1e-9);
    // E(4) = 320·(1 - 3·e^-2)
    assert_close("E_B", interval_energy(4.0, 80.0, 0.5), 190.078_128_092_851_8, 1e-9);
    assert_close("F(0)", energy_antiderivative(0.0, 200.0, 1.0), -200.0, 1e-12);
}

#[test]
fn derivative_vanishes_at_peak() {
    for (k, a) in [(200.0, 1.0), (80.0, 0.5), (42.0, 3.3)] {
        let peak = find_peak(k, a);
        let h = 1e-5;
        let slope = (power(peak.time + h, k, a) - power(peak.time - h, k, a)) / (2.0 * h);
        assert!(slope.abs() < 1e-4, "slope at peak = {slope}");
        assert_close("peak power", peak.power, k / (a * std::f64::consts::E), 1e-12);
    }
}
