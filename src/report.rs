//! 비교 결과를 사람이 읽는 문자열(요약 카드, 판정 문구, 곡선 표)로 만든다.
//!
//! 계산 코어는 오류 대신 NaN/inf를 돌려주므로, 표시 단계에서 "—"로 바꿔 출력한다.

use std::fmt::Write as _;

use crate::config::DefaultUnits;
use crate::cycle::{ComparisonResult, ModelSlot, SamplePoint, Scenario};
use crate::i18n::{keys, Translator};
use crate::units::{convert_energy, convert_power, EnergyUnit, PowerUnit};

/// 정의되지 않은 값 표시.
pub const NOT_AVAILABLE: &str = "\u{2014}";

/// 유한한 값은 소수점 `decimals` 자리로, 그 외는 "—"로 표시한다.
pub fn format_value(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// 값 + 단위. 값이 정의되지 않으면 단위 없이 "—"만 표시한다.
pub fn format_with_unit(value: f64, decimals: usize, unit: &str) -> String {
    if value.is_finite() {
        format!("{value:.decimals$} {unit}")
    } else {
        NOT_AVAILABLE.to_string()
    }
}

pub fn format_currency(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("${value:.decimals$}")
    } else {
        NOT_AVAILABLE.to_string()
    }
}

fn energy_decimals(unit: EnergyUnit) -> usize {
    match unit {
        EnergyUnit::WattHour | EnergyUnit::Kilojoule => 0,
        EnergyUnit::KilowattHour | EnergyUnit::Megajoule => 3,
    }
}

fn power_decimals(unit: PowerUnit) -> usize {
    match unit {
        PowerUnit::Watt => 1,
        PowerUnit::Kilowatt => 4,
    }
}

/// Wh 값을 표시 단위로 변환해 포맷한다.
pub fn format_energy(energy_wh: f64, unit: EnergyUnit) -> String {
    let v = convert_energy(energy_wh, EnergyUnit::WattHour, unit);
    format_with_unit(v, energy_decimals(unit), unit.symbol())
}

/// W 값을 표시 단위로 변환해 포맷한다.
pub fn format_power(power_w: f64, unit: PowerUnit) -> String {
    let v = convert_power(power_w, PowerUnit::Watt, unit);
    format_with_unit(v, power_decimals(unit), unit.symbol())
}

/// 요약 카드 하나.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
    pub subtext: String,
    /// 강조 표시 여부 (비용 카드)
    pub highlight: bool,
}

/// 피크/총 소비량/사이클 비용 카드 3개를 만든다.
pub fn summary_cards(
    tr: &Translator,
    scenario: &Scenario,
    result: &ComparisonResult,
    units: &DefaultUnits,
) -> [SummaryCard; 3] {
    let peak = SummaryCard {
        title: tr.t(keys::REPORT_PEAK_TITLE).to_string(),
        value: format!(
            "{} vs {}",
            format_power(result.peak_a.power, units.power),
            format_power(result.peak_b.power, units.power)
        ),
        subtext: tr.fmt(
            keys::REPORT_PEAK_SUBTEXT,
            &[
                ("time_a", format_value(result.peak_a.time, 1)),
                ("time_b", format_value(result.peak_b.time, 1)),
            ],
        ),
        highlight: false,
    };
    let energy = SummaryCard {
        title: tr.t(keys::REPORT_ENERGY_TITLE).to_string(),
        value: format!(
            "{} vs {}",
            format_energy(result.energy_a, units.energy),
            format_energy(result.energy_b, units.energy)
        ),
        subtext: tr.t(keys::REPORT_ENERGY_SUBTEXT).to_string(),
        highlight: false,
    };
    let cost = SummaryCard {
        title: tr.t(keys::REPORT_COST_TITLE).to_string(),
        value: format!(
            "{} vs {}",
            format_currency(result.cost_a, 1),
            format_currency(result.cost_b, 1)
        ),
        subtext: tr.fmt(
            keys::REPORT_COST_SUBTEXT,
            &[("rate", scenario.cycle.cost_per_kwh().to_string())],
        ),
        highlight: true,
    };
    [peak, energy, cost]
}

/// 추천 모델 문구와 절감률 문구.
pub fn verdict_lines(
    tr: &Translator,
    scenario: &Scenario,
    result: &ComparisonResult,
) -> (String, String) {
    let headline = tr.fmt(
        keys::REPORT_VERDICT,
        &[
            ("winner", result.winner.to_string()),
            ("label", scenario.label(result.winner).to_string()),
        ],
    );
    let savings = tr.fmt(
        keys::REPORT_SAVINGS,
        &[("savings", format_value(result.savings_percent, 1))],
    );
    (headline, savings)
}

/// CLI 출력용 전체 보고서.
pub fn render_report(
    tr: &Translator,
    scenario: &Scenario,
    result: &ComparisonResult,
    units: &DefaultUnits,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.t(keys::REPORT_HEADING));
    let _ = writeln!(
        out,
        "{}: {} h   {}: {}",
        tr.t(keys::CYCLE_TIME),
        format_value(scenario.cycle.cycle_time(), 1),
        tr.t(keys::CYCLE_COST),
        scenario.cycle.cost_per_kwh()
    );
    for slot in ModelSlot::ALL {
        let model = scenario.model(slot);
        let _ = writeln!(
            out,
            "{} ({}): {}",
            tr.fmt(keys::MODEL, &[("slot", slot.to_string())]),
            scenario.label(slot),
            tr.fmt(
                keys::MODEL_PARAMETERS,
                &[("k", model.k().to_string()), ("a", model.a().to_string())]
            )
        );
    }
    let (headline, savings) = verdict_lines(tr, scenario, result);
    let _ = writeln!(out);
    let _ = writeln!(out, "{headline}");
    let _ = writeln!(out, "{savings}");
    let _ = writeln!(out);
    for card in summary_cards(tr, scenario, result, units) {
        let marker = if card.highlight { "*" } else { " " };
        let _ = writeln!(out, "{marker} {:<20} {}", card.title, card.value);
        let _ = writeln!(out, "  {:<20} {}", "", card.subtext);
    }
    out
}

/// 샘플 곡선을 고정폭 표로 만든다.
pub fn render_curve_table(
    tr: &Translator,
    scenario: &Scenario,
    points: &[SamplePoint],
    unit: PowerUnit,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.t(keys::CURVE_HEADING));
    let header_a = tr.fmt(keys::MODEL, &[("slot", "A".into())]);
    let header_b = tr.fmt(keys::MODEL, &[("slot", "B".into())]);
    let _ = writeln!(
        out,
        "{:>8} | {:>16} | {:>16}",
        "t [h]",
        format!("{header_a} [{}]", unit.symbol()),
        format!("{header_b} [{}]", unit.symbol())
    );
    let _ = writeln!(out, "{}", "-".repeat(46));
    let decimals = power_decimals(unit);
    for p in points {
        let _ = writeln!(
            out,
            "{:>8} | {:>16} | {:>16}",
            format_value(p.time, 2),
            format_value(convert_power(p.power_a, PowerUnit::Watt, unit), decimals),
            format_value(convert_power(p.power_b, PowerUnit::Watt, unit), decimals)
        );
    }
    let _ = writeln!(
        out,
        "{} / {}",
        scenario.label(ModelSlot::A),
        scenario.label(ModelSlot::B)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{compare, sample_curves};

    #[test]
    fn non_finite_values_render_as_dash() {
        assert_eq!(format_value(f64::NAN, 1), NOT_AVAILABLE);
        assert_eq!(format_value(f64::INFINITY, 1), NOT_AVAILABLE);
        assert_eq!(format_currency(f64::NEG_INFINITY, 1), NOT_AVAILABLE);
        assert_eq!(format_energy(f64::NAN, EnergyUnit::KilowattHour), NOT_AVAILABLE);
        assert_eq!(format_value(73.5758, 1), "73.6");
    }

    #[test]
    fn cards_for_default_scenario() {
        let tr = Translator::new("es");
        let scenario = Scenario::default();
        let result = compare(&scenario);
        let cards = summary_cards(&tr, &scenario, &result, &DefaultUnits::default());
        assert_eq!(cards[0].value, "73.6 W vs 58.9 W");
        assert_eq!(cards[0].subtext, "Ocurre en t=1.0h / t=2.0h");
        assert_eq!(cards[1].value, "182 Wh vs 190 Wh");
        assert_eq!(cards[2].value, "$29.2 vs $30.5");
        assert_eq!(cards[2].subtext, "Basado en $160.55/kWh");
        assert!(cards[2].highlight);
    }

    #[test]
    fn verdict_names_winner_and_savings() {
        let tr = Translator::new("en");
        let scenario = Scenario::default();
        let (headline, savings) = verdict_lines(&tr, &scenario, &compare(&scenario));
        assert_eq!(headline, "Recommended option: Model A (Standard server)");
        assert!(savings.contains("4.4%"), "{savings}");
    }

    #[test]
    fn curve_table_has_row_per_point() {
        let tr = Translator::new("en");
        let scenario = Scenario::default();
        let points = sample_curves(4.0, &scenario.model_a, &scenario.model_b, 4);
        let table = render_curve_table(&tr, &scenario, &points, PowerUnit::Watt);
        assert!(table.contains("    4.00 |"), "{table}");
        assert_eq!(table.lines().filter(|l| l.contains(" | ")).count(), 6);
    }
}
