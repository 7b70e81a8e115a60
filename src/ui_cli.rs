use std::io::{self, Write};
use std::path::PathBuf;

use crate::app::AppError;
use crate::config::Config;
use crate::cycle::{compare, sample_curves, ModelSlot, DEFAULT_SAMPLE_STEPS};
use crate::export;
use crate::i18n::{keys, Translator};
use crate::report;
use crate::units::{EnergyUnit, PowerUnit};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Compare,
    Curve,
    Cycle,
    Model(ModelSlot),
    Export,
    Settings,
    Exit,
}

/// 메뉴 번호를 선택지로 바꾼다.
pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::Compare),
        "2" => Some(MenuChoice::Curve),
        "3" => Some(MenuChoice::Cycle),
        "4" => Some(MenuChoice::Model(ModelSlot::A)),
        "5" => Some(MenuChoice::Model(ModelSlot::B)),
        "6" => Some(MenuChoice::Export),
        "7" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 빈 입력은 `None`(현재 값 유지), 숫자가 아니면 `Err`.
pub fn parse_optional_f64(input: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    let s = input.trim();
    if s.is_empty() {
        Ok(None)
    } else {
        s.parse::<f64>().map(Some)
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_COMPARE,
        keys::MAIN_MENU_CURVE,
        keys::MAIN_MENU_CYCLE,
        keys::MAIN_MENU_MODEL_A,
        keys::MAIN_MENU_MODEL_B,
        keys::MAIN_MENU_EXPORT,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 현재 시나리오의 비교 보고서를 출력한다.
pub fn handle_compare(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let result = compare(&cfg.scenario);
    print!(
        "{}",
        report::render_report(tr, &cfg.scenario, &result, &cfg.default_units)
    );
    Ok(())
}

/// 전력 곡선 표를 출력한다.
pub fn handle_curve(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let steps = read_steps(tr)?;
    let s = &cfg.scenario;
    let points = sample_curves(s.cycle.cycle_time(), &s.model_a, &s.model_b, steps);
    print!(
        "{}",
        report::render_curve_table(tr, s, &points, cfg.default_units.power)
    );
    Ok(())
}

/// 사이클 시간과 kWh 단가를 수정한다.
pub fn handle_cycle(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::CYCLE_HEADING));
    let cycle = cfg.scenario.cycle;
    if let Some(t) = read_optional_f64(tr, keys::CYCLE_TIME, cycle.cycle_time())? {
        match cycle.with_cycle_time(t) {
            Ok(updated) => cfg.scenario.cycle = updated,
            Err(e) => println!("{} {e}", tr.t(keys::ERROR_REJECTED_VALUE)),
        }
    }
    let cycle = cfg.scenario.cycle;
    if let Some(c) = read_optional_f64(tr, keys::CYCLE_COST, cycle.cost_per_kwh())? {
        match cycle.with_cost_per_kwh(c) {
            Ok(updated) => cfg.scenario.cycle = updated,
            Err(e) => println!("{} {e}", tr.t(keys::ERROR_REJECTED_VALUE)),
        }
    }
    Ok(())
}

/// 모델 A/B의 k, a를 수정한다. a ≤ 0 은 거부한다.
pub fn handle_model(tr: &Translator, cfg: &mut Config, slot: ModelSlot) -> Result<(), AppError> {
    println!(
        "{}",
        tr.fmt(
            keys::MODEL_HEADING,
            &[
                ("slot", slot.to_string()),
                ("label", cfg.scenario.label(slot).to_string())
            ]
        )
    );
    let model = cfg.scenario.model(slot);
    if let Some(k) = read_optional_f64(tr, keys::MODEL_K, model.k())? {
        match model.with_k(k) {
            Ok(updated) => *cfg.scenario.model_mut(slot) = updated,
            Err(e) => println!("{} {e}", tr.t(keys::ERROR_REJECTED_VALUE)),
        }
    }
    let model = cfg.scenario.model(slot);
    if let Some(a) = read_optional_f64(tr, keys::MODEL_A, model.a())? {
        match model.with_a(a) {
            Ok(updated) => *cfg.scenario.model_mut(slot) = updated,
            Err(e) => println!("{} {e}", tr.t(keys::ERROR_REJECTED_VALUE)),
        }
    }
    Ok(())
}

/// 샘플 곡선을 CSV 파일로 저장한다.
pub fn handle_export(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let steps = read_steps(tr)?;
    let input = read_line(&format!(
        "{} {}",
        tr.t(keys::PROMPT_CSV_PATH),
        tr.fmt(keys::PROMPT_KEEP_CURRENT, &[("current", "curve.csv".into())])
    ))?;
    let path = match input.trim() {
        "" => PathBuf::from("curve.csv"),
        p => PathBuf::from(p),
    };
    let s = &cfg.scenario;
    let points = sample_curves(s.cycle.cycle_time(), &s.model_a, &s.model_b, steps);
    export::write_curve_csv_file(&points, &path)?;
    println!(
        "{}",
        tr.fmt(keys::EXPORT_SAVED, &[("path", path.display().to_string())])
    );
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어가 바뀌면 true.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{}",
        tr.fmt(
            keys::SETTINGS_CURRENT,
            &[
                ("lang", cfg.language.clone()),
                ("energy", cfg.default_units.energy.symbol().to_string()),
                ("power", cfg.default_units.power.symbol().to_string()),
            ]
        )
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "1" => {
            let lang = read_line(tr.t(keys::SETTINGS_PROMPT_LANG))?;
            let lang = lang.trim().to_lowercase();
            if matches!(lang.as_str(), "auto" | "en" | "es") {
                cfg.language = lang;
                return Ok(true);
            }
            println!("{}", tr.t(keys::SETTINGS_INVALID));
        }
        "2" => {
            let unit = read_line(tr.t(keys::SETTINGS_PROMPT_ENERGY_UNIT))?;
            match EnergyUnit::from_symbol(&unit) {
                Some(u) => cfg.default_units.energy = u,
                None => println!("{}", tr.t(keys::SETTINGS_INVALID)),
            }
        }
        "3" => {
            let unit = read_line(tr.t(keys::SETTINGS_PROMPT_POWER_UNIT))?;
            match PowerUnit::from_symbol(&unit) {
                Some(u) => cfg.default_units.power = u,
                None => println!("{}", tr.t(keys::SETTINGS_INVALID)),
            }
        }
        _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
    }
    Ok(false)
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_optional_f64(tr: &Translator, label_key: &str, current: f64) -> Result<Option<f64>, AppError> {
    let prompt = format!(
        "{} {}",
        tr.t(label_key),
        tr.fmt(keys::PROMPT_KEEP_CURRENT, &[("current", current.to_string())])
    );
    loop {
        let s = read_line(&prompt)?;
        match parse_optional_f64(&s) {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_steps(tr: &Translator) -> Result<usize, AppError> {
    let prompt = format!(
        "{} {}",
        tr.t(keys::PROMPT_STEPS),
        tr.fmt(
            keys::PROMPT_KEEP_CURRENT,
            &[("current", DEFAULT_SAMPLE_STEPS.to_string())]
        )
    );
    loop {
        let s = read_line(&prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(DEFAULT_SAMPLE_STEPS);
        }
        match s.parse::<usize>() {
            Ok(n) => return Ok(n),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_map_to_choices() {
        assert_eq!(parse_menu_choice(" 4\n"), Some(MenuChoice::Model(ModelSlot::A)));
        assert_eq!(parse_menu_choice("5"), Some(MenuChoice::Model(ModelSlot::B)));
        assert_eq!(parse_menu_choice("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice("9"), None);
    }

    #[test]
    fn empty_input_keeps_current_value() {
        assert_eq!(parse_optional_f64("\n"), Ok(None));
        assert_eq!(parse_optional_f64(" 0.5 \n"), Ok(Some(0.5)));
        assert!(parse_optional_f64("abc").is_err());
    }
}
