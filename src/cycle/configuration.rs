use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::power::ModelParameters;

/// 사이클 공통 입력 검증 오류.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CycleError {
    #[error("사이클 시간은 0보다 큰 유한한 값이어야 합니다: {0}")]
    InvalidCycleTime(f64),
    #[error("kWh당 비용은 0보다 큰 유한한 값이어야 합니다: {0}")]
    InvalidCostPerKwh(f64),
}

/// 두 모델이 공유하는 사이클 설정.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCycleConfiguration", into = "RawCycleConfiguration")]
pub struct CycleConfiguration {
    cycle_time: f64,
    cost_per_kwh: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawCycleConfiguration {
    cycle_time_h: f64,
    cost_per_kwh: f64,
}

impl CycleConfiguration {
    pub const DEFAULT_CYCLE_TIME_H: f64 = 4.0;
    pub const DEFAULT_COST_PER_KWH: f64 = 160.55;

    pub fn new(cycle_time: f64, cost_per_kwh: f64) -> Result<Self, CycleError> {
        if !cycle_time.is_finite() || cycle_time <= 0.0 {
            return Err(CycleError::InvalidCycleTime(cycle_time));
        }
        if !cost_per_kwh.is_finite() || cost_per_kwh <= 0.0 {
            return Err(CycleError::InvalidCostPerKwh(cost_per_kwh));
        }
        Ok(Self {
            cycle_time,
            cost_per_kwh,
        })
    }

    /// 사이클 시간 T [h]
    pub fn cycle_time(&self) -> f64 {
        self.cycle_time
    }

    /// 에너지 단가 [통화/kWh]
    pub fn cost_per_kwh(&self) -> f64 {
        self.cost_per_kwh
    }

    pub fn with_cycle_time(self, cycle_time: f64) -> Result<Self, CycleError> {
        Self::new(cycle_time, self.cost_per_kwh)
    }

    pub fn with_cost_per_kwh(self, cost_per_kwh: f64) -> Result<Self, CycleError> {
        Self::new(self.cycle_time, cost_per_kwh)
    }
}

impl Default for CycleConfiguration {
    fn default() -> Self {
        Self {
            cycle_time: Self::DEFAULT_CYCLE_TIME_H,
            cost_per_kwh: Self::DEFAULT_COST_PER_KWH,
        }
    }
}

impl TryFrom<RawCycleConfiguration> for CycleConfiguration {
    type Error = CycleError;

    fn try_from(raw: RawCycleConfiguration) -> Result<Self, Self::Error> {
        Self::new(raw.cycle_time_h, raw.cost_per_kwh)
    }
}

impl From<CycleConfiguration> for RawCycleConfiguration {
    fn from(value: CycleConfiguration) -> Self {
        Self {
            cycle_time_h: value.cycle_time,
            cost_per_kwh: value.cost_per_kwh,
        }
    }
}

/// 비교 대상 모델 슬롯.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelSlot {
    A,
    B,
}

impl ModelSlot {
    pub const ALL: [ModelSlot; 2] = [ModelSlot::A, ModelSlot::B];

    pub fn other(self) -> Self {
        match self {
            ModelSlot::A => ModelSlot::B,
            ModelSlot::B => ModelSlot::A,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSlot::A => "A",
            ModelSlot::B => "B",
        }
    }
}

impl std::fmt::Display for ModelSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 비교 한 번에 필요한 모든 입력. UI 상태는 이 값으로만 계산 코어에 전달된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_label_a")]
    pub label_a: String,
    #[serde(default = "default_label_b")]
    pub label_b: String,
    pub cycle: CycleConfiguration,
    pub model_a: ModelParameters,
    pub model_b: ModelParameters,
}

fn default_label_a() -> String {
    "Standard server".to_string()
}

fn default_label_b() -> String {
    "Eco server".to_string()
}

impl Scenario {
    pub fn model(&self, slot: ModelSlot) -> ModelParameters {
        match slot {
            ModelSlot::A => self.model_a,
            ModelSlot::B => self.model_b,
        }
    }

    pub fn model_mut(&mut self, slot: ModelSlot) -> &mut ModelParameters {
        match slot {
            ModelSlot::A => &mut self.model_a,
            ModelSlot::B => &mut self.model_b,
        }
    }

    pub fn label(&self, slot: ModelSlot) -> &str {
        match slot {
            ModelSlot::A => &self.label_a,
            ModelSlot::B => &self.label_b,
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            label_a: default_label_a(),
            label_b: default_label_b(),
            cycle: CycleConfiguration::default(),
            model_a: ModelParameters::STANDARD_SERVER,
            model_b: ModelParameters::ECO_SERVER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_cycle() {
        assert_eq!(
            CycleConfiguration::new(0.0, 100.0),
            Err(CycleError::InvalidCycleTime(0.0))
        );
        assert!(CycleConfiguration::new(f64::NAN, 100.0).is_err());
        assert_eq!(
            CycleConfiguration::new(4.0, -1.0),
            Err(CycleError::InvalidCostPerKwh(-1.0))
        );
    }

    #[test]
    fn default_scenario_matches_reference_servers() {
        let s = Scenario::default();
        assert_eq!(s.cycle.cycle_time(), 4.0);
        assert_eq!(s.cycle.cost_per_kwh(), 160.55);
        assert_eq!((s.model_a.k(), s.model_a.a()), (200.0, 1.0));
        assert_eq!((s.model_b.k(), s.model_b.a()), (80.0, 0.5));
        assert_eq!(s.label(ModelSlot::B), "Eco server");
    }

    #[test]
    fn slot_other() {
        assert_eq!(ModelSlot::A.other(), ModelSlot::B);
        assert_eq!(ModelSlot::B.other(), ModelSlot::A);
    }
}
