//! 전력 모델 성질 기반(property) 테스트.
use energy_cycle_simulator::power::{find_peak, interval_energy, power};
use proptest::prelude::*;

fn amplitude() -> impl Strategy<Value = f64> {
    1.0..1_000.0_f64
}

fn decay() -> impl Strategy<Value = f64> {
    0.05..10.0_f64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn power_starts_at_zero(k in amplitude(), a in decay()) {
        prop_assert_eq!(power(0.0, k, a), 0.0);
    }

    #[test]
    fn power_is_non_negative(k in amplitude(), a in decay(), t in 0.0..50.0_f64) {
        prop_assert!(power(t, k, a) >= 0.0);
    }

    #[test]
    fn peak_dominates_curve(k in amplitude(), a in decay(), t in 0.0..50.0_f64) {
        let peak = find_peak(k, a);
        prop_assert!(peak.power * (1.0 + 1e-12) >= power(t, k, a));
    }

    #[test]
    fn peak_time_is_reciprocal_decay(k in amplitude(), a in decay()) {
        let peak = find_peak(k, a);
        prop_assert!((peak.time * a - 1.0).abs() < 1e-12);
    }

    #[test]
    fn energy_grows_with_cycle_time(
        k in amplitude(),
        a in decay(),
        t1 in 0.0..25.0_f64,
        dt in 0.0..25.0_f64,
    ) {
        let e1 = interval_energy(t1, k, a);
        let e2 = interval_energy(t1 + dt, k, a);
        prop_assert!(e2 >= e1 - 1e-9 * e1.abs().max(1.0));
    }

    #[test]
    fn energy_is_bounded_by_full_discharge(k in amplitude(), a in decay(), t in 0.0..50.0_f64) {
        // T → ∞ 극한은 k/a²
        let limit = k / (a * a);
        prop_assert!(interval_energy(t, k, a) <= limit * (1.0 + 1e-12));
    }

    #[test]
    fn empty_interval_has_no_energy(k in amplitude(), a in decay()) {
        prop_assert_eq!(interval_energy(0.0, k, a), 0.0);
    }
}
