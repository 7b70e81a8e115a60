use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{find_peak, interval_energy, power, PeakResult};

/// 모델 파라미터 검증 오류.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParameterError {
    #[error("진폭 상수 k가 유한한 값이 아닙니다: {0}")]
    NonFiniteAmplitude(f64),
    #[error("진폭 상수 k는 0보다 커야 합니다: {0}")]
    NonPositiveAmplitude(f64),
    #[error("감쇠 상수 a가 유한한 값이 아닙니다: {0}")]
    NonFiniteDecay(f64),
    /// a = 0 이면 0으로 나누기, a < 0 이면 피크가 존재하지 않는다.
    #[error("감쇠 상수 a는 0보다 커야 합니다: {0}")]
    NonPositiveDecay(f64),
}

/// 검증된 모델 파라미터. k > 0, a > 0 (둘 다 유한).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawModelParameters", into = "RawModelParameters")]
pub struct ModelParameters {
    k: f64,
    a: f64,
}

/// 설정 파일에 기록되는 검증 전 형태.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawModelParameters {
    k: f64,
    a: f64,
}

impl ModelParameters {
    /// 기본 비교 대상 A (표준 서버).
    pub const STANDARD_SERVER: Self = Self { k: 200.0, a: 1.0 };
    /// 기본 비교 대상 B (저전력 서버).
    pub const ECO_SERVER: Self = Self { k: 80.0, a: 0.5 };

    pub fn new(k: f64, a: f64) -> Result<Self, ParameterError> {
        if !k.is_finite() {
            return Err(ParameterError::NonFiniteAmplitude(k));
        }
        if k <= 0.0 {
            return Err(ParameterError::NonPositiveAmplitude(k));
        }
        if !a.is_finite() {
            return Err(ParameterError::NonFiniteDecay(a));
        }
        if a <= 0.0 {
            return Err(ParameterError::NonPositiveDecay(a));
        }
        Ok(Self { k, a })
    }

    /// 진폭 상수 k [W/h]
    pub fn k(&self) -> f64 {
        self.k
    }

    /// 감쇠 상수 a [1/h]
    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn with_k(self, k: f64) -> Result<Self, ParameterError> {
        Self::new(k, self.a)
    }

    pub fn with_a(self, a: f64) -> Result<Self, ParameterError> {
        Self::new(self.k, a)
    }

    pub fn power_at(&self, t: f64) -> f64 {
        power(t, self.k, self.a)
    }

    pub fn energy_over(&self, cycle_time: f64) -> f64 {
        interval_energy(cycle_time, self.k, self.a)
    }

    pub fn peak(&self) -> PeakResult {
        find_peak(self.k, self.a)
    }
}

impl TryFrom<RawModelParameters> for ModelParameters {
    type Error = ParameterError;

    fn try_from(raw: RawModelParameters) -> Result<Self, Self::Error> {
        Self::new(raw.k, raw.a)
    }
}

impl From<ModelParameters> for RawModelParameters {
    fn from(value: ModelParameters) -> Self {
        Self {
            k: value.k,
            a: value.a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_and_negative_decay() {
        assert_eq!(
            ModelParameters::new(100.0, 0.0),
            Err(ParameterError::NonPositiveDecay(0.0))
        );
        assert_eq!(
            ModelParameters::new(100.0, -1.0),
            Err(ParameterError::NonPositiveDecay(-1.0))
        );
    }

    #[test]
    fn rejects_non_finite_inputs() {
        assert!(matches!(
            ModelParameters::new(f64::NAN, 1.0),
            Err(ParameterError::NonFiniteAmplitude(_))
        ));
        assert!(matches!(
            ModelParameters::new(10.0, f64::INFINITY),
            Err(ParameterError::NonFiniteDecay(_))
        ));
        assert_eq!(
            ModelParameters::new(-10.0, 1.0),
            Err(ParameterError::NonPositiveAmplitude(-10.0))
        );
    }

    #[test]
    fn delegates_to_closed_form() {
        let model = ModelParameters::new(80.0, 0.5).unwrap();
        assert_eq!(model.peak().time, 2.0);
        assert_eq!(model.energy_over(4.0), interval_energy(4.0, 80.0, 0.5));
        assert_eq!(model.power_at(1.5), power(1.5, 80.0, 0.5));
    }

    #[test]
    fn with_a_revalidates() {
        let model = ModelParameters::new(80.0, 0.5).unwrap();
        assert!(model.with_a(0.0).is_err());
        assert_eq!(model.with_k(120.0).unwrap().k(), 120.0);
    }

    #[test]
    fn deserialize_goes_through_validation() {
        let ok: ModelParameters = toml::from_str("k = 200.0\na = 1.0").unwrap();
        assert_eq!(ok, ModelParameters::new(200.0, 1.0).unwrap());
        let err = toml::from_str::<ModelParameters>("k = 200.0\na = -0.5");
        assert!(err.is_err());
    }
}
