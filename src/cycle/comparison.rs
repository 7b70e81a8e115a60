use serde::Serialize;
use tracing::debug;

use super::configuration::{ModelSlot, Scenario};
use super::cost::{energy_cost, savings_percent};
use crate::power::PeakResult;

/// 한 번의 비교 계산 결과. 입력이 바뀔 때마다 새로 만든다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// 모델 A 사이클 에너지 [Wh]
    pub energy_a: f64,
    /// 모델 B 사이클 에너지 [Wh]
    pub energy_b: f64,
    /// 모델 A 사이클 비용 [통화]
    pub cost_a: f64,
    /// 모델 B 사이클 비용 [통화]
    pub cost_b: f64,
    pub peak_a: PeakResult,
    pub peak_b: PeakResult,
    /// 비용이 더 낮은 모델. 동률이면 B.
    pub winner: ModelSlot,
    /// 패자 대비 승자의 절감률 [%]
    pub savings_percent: f64,
}

impl ComparisonResult {
    pub fn energy(&self, slot: ModelSlot) -> f64 {
        match slot {
            ModelSlot::A => self.energy_a,
            ModelSlot::B => self.energy_b,
        }
    }

    pub fn cost(&self, slot: ModelSlot) -> f64 {
        match slot {
            ModelSlot::A => self.cost_a,
            ModelSlot::B => self.cost_b,
        }
    }

    pub fn peak(&self, slot: ModelSlot) -> PeakResult {
        match slot {
            ModelSlot::A => self.peak_a,
            ModelSlot::B => self.peak_b,
        }
    }

    pub fn winner_cost(&self) -> f64 {
        self.cost(self.winner)
    }

    pub fn loser_cost(&self) -> f64 {
        self.cost(self.winner.other())
    }
}

/// 시나리오의 두 모델을 에너지/비용/피크 기준으로 비교한다.
pub fn compare(scenario: &Scenario) -> ComparisonResult {
    let cycle_time = scenario.cycle.cycle_time();
    let cost_per_kwh = scenario.cycle.cost_per_kwh();

    let energy_a = scenario.model_a.energy_over(cycle_time);
    let energy_b = scenario.model_b.energy_over(cycle_time);
    let cost_a = energy_cost(energy_a, cost_per_kwh);
    let cost_b = energy_cost(energy_b, cost_per_kwh);

    let winner = if cost_a < cost_b {
        ModelSlot::A
    } else {
        ModelSlot::B
    };
    let savings = match winner {
        ModelSlot::A => savings_percent(cost_a, cost_b),
        ModelSlot::B => savings_percent(cost_b, cost_a),
    };

    debug!(
        cycle_time,
        cost_per_kwh, energy_a, energy_b, %winner, savings, "recomputed comparison"
    );

    ComparisonResult {
        energy_a,
        energy_b,
        cost_a,
        cost_b,
        peak_a: scenario.model_a.peak(),
        peak_b: scenario.model_b.peak(),
        winner,
        savings_percent: savings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::ModelParameters;
    use approx::assert_relative_eq;

    #[test]
    fn default_scenario_prefers_standard_server() {
        let result = compare(&Scenario::default());
        assert_eq!(result.winner, ModelSlot::A);
        assert_relative_eq!(result.energy_a, 200.0 - 1000.0 * (-4.0f64).exp(), max_relative = 1e-12);
        assert!((result.cost_b - 30.517).abs() < 1e-3);
        assert!((result.savings_percent - 4.416).abs() < 1e-3);
        assert_eq!(result.peak_b.time, 2.0);
    }

    #[test]
    fn tie_goes_to_b() {
        let scenario = Scenario {
            model_b: ModelParameters::STANDARD_SERVER,
            ..Scenario::default()
        };
        let result = compare(&scenario);
        assert_eq!(result.winner, ModelSlot::B);
        assert_eq!(result.savings_percent, 0.0);
    }

    #[test]
    fn accessors_follow_winner() {
        let scenario = Scenario {
            model_a: ModelParameters::new(500.0, 0.1).unwrap(),
            ..Scenario::default()
        };
        let result = compare(&scenario);
        assert_eq!(result.winner, ModelSlot::B);
        assert_eq!(result.winner_cost(), result.cost_b);
        assert_eq!(result.loser_cost(), result.cost_a);
        assert_eq!(result.peak(ModelSlot::A).time, 10.0);
    }
}
