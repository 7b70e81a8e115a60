//! 전력 모델의 닫힌 형식(closed-form) 계산.
//!
//! 모든 함수는 입력 검증 없이 IEEE-754 규칙을 그대로 따른다. `a = 0`이면
//! 무한대/NaN이, `a < 0`이면 물리적으로 의미 없는 값이 반환된다.
//! 검증이 필요하면 [`crate::power::ModelParameters`]를 사용한다.

use serde::{Deserialize, Serialize};

/// 전력 피크 위치와 값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakResult {
    /// 피크 발생 시각 [h]
    pub time: f64,
    /// 피크 전력 [W]
    pub power: f64,
}

/// 시각 t [h]에서의 순간 전력 [W]을 계산한다.
pub fn power(t: f64, k: f64, a: f64) -> f64 {
    k * t * (-a * t).exp()
}

/// 전력의 부정적분 E(t) = (-k/a)·e^(-a·t)·(t + 1/a).
///
/// 그 자체로는 에너지가 아니며, 두 경계에서 평가한 차이만 의미가 있다.
pub fn energy_antiderivative(t: f64, k: f64, a: f64) -> f64 {
    (-k / a) * (-a * t).exp() * (t + 1.0 / a)
}

/// 구간 [0, T] 동안의 총 에너지 [Wh]를 계산한다. 수치 적분 없이 E(T) - E(0).
pub fn interval_energy(cycle_time: f64, k: f64, a: f64) -> f64 {
    energy_antiderivative(cycle_time, k, a) - energy_antiderivative(0.0, k, a)
}

/// dP/dt = k·e^(-a·t)·(1 - a·t) = 0 에서 구한 피크. t* = 1/a.
pub fn find_peak(k: f64, a: f64) -> PeakResult {
    let time = 1.0 / a;
    PeakResult {
        time,
        power: power(time, k, a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn power_at_one_hour() {
        assert_relative_eq!(power(1.0, 200.0, 1.0), 200.0 * (-1.0f64).exp());
        assert!((power(1.0, 200.0, 1.0) - 73.576).abs() < 1e-3);
    }

    #[test]
    fn power_is_zero_at_cycle_start() {
        assert_eq!(power(0.0, 200.0, 1.0), 0.0);
        assert_eq!(power(0.0, -35.0, 0.3), 0.0);
    }

    #[test]
    fn peak_matches_inverse_decay() {
        let peak = find_peak(200.0, 1.0);
        assert_eq!(peak.time, 1.0);
        assert!((peak.power - 73.576).abs() < 1e-3);
    }

    #[test]
    fn interval_energy_reference_cycle() {
        // E(t) = -160·e^(-0.5t)·(t+2)
        let energy = interval_energy(4.0, 80.0, 0.5);
        assert_relative_eq!(energy, 320.0 - 960.0 * (-2.0f64).exp(), max_relative = 1e-12);
        assert!((energy - 189.99).abs() < 0.1, "energy={energy}");
    }

    #[test]
    fn antiderivative_at_zero() {
        assert_relative_eq!(energy_antiderivative(0.0, 80.0, 0.5), -320.0);
    }

    #[test]
    fn zero_decay_is_not_finite() {
        assert!(!energy_antiderivative(1.0, 100.0, 0.0).is_finite());
        assert!(!interval_energy(2.0, 100.0, 0.0).is_finite());
        assert!(find_peak(100.0, 0.0).time.is_infinite());
    }

    #[test]
    fn negative_decay_peak_is_before_start() {
        let peak = find_peak(100.0, -0.5);
        assert_eq!(peak.time, -2.0);
        assert!(peak.power < 0.0);
    }

    #[test]
    fn nan_propagates() {
        assert!(power(1.0, f64::NAN, 1.0).is_nan());
        assert!(interval_energy(1.0, 10.0, f64::NAN).is_nan());
    }
}
