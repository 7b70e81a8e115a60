/// Wh 단위 에너지를 kWh 단가로 환산한 사이클 비용 [통화].
pub fn energy_cost(energy_wh: f64, cost_per_kwh: f64) -> f64 {
    (energy_wh / 1000.0) * cost_per_kwh
}

/// 승자 대비 패자의 비용 절감률 [%]. 패자 비용이 0이면 NaN/inf가 될 수 있다.
pub fn savings_percent(winner_cost: f64, loser_cost: f64) -> f64 {
    (loser_cost - winner_cost) / loser_cost * 100.0
}
