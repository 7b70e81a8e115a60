use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::debug;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_TITLE: &str = "general.app_title";
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const MODEL: &str = "general.model";
    pub const NOT_AVAILABLE_NOTE: &str = "general.not_available_note";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_COMPARE: &str = "main_menu.compare";
    pub const MAIN_MENU_CURVE: &str = "main_menu.curve";
    pub const MAIN_MENU_CYCLE: &str = "main_menu.cycle";
    pub const MAIN_MENU_MODEL_A: &str = "main_menu.model_a";
    pub const MAIN_MENU_MODEL_B: &str = "main_menu.model_b";
    pub const MAIN_MENU_EXPORT: &str = "main_menu.export";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_KEEP_CURRENT: &str = "prompt.keep_current";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_REJECTED_VALUE: &str = "error.rejected_value";

    pub const CYCLE_HEADING: &str = "cycle.heading";
    pub const CYCLE_TIME: &str = "cycle.time";
    pub const CYCLE_COST: &str = "cycle.cost_per_kwh";

    pub const MODEL_HEADING: &str = "model.heading";
    pub const MODEL_K: &str = "model.k";
    pub const MODEL_A: &str = "model.a";
    pub const MODEL_PARAMETERS: &str = "model.parameters";

    pub const REPORT_HEADING: &str = "report.heading";
    pub const REPORT_VERDICT: &str = "report.verdict";
    pub const REPORT_SAVINGS: &str = "report.savings";
    pub const REPORT_PEAK_TITLE: &str = "report.peak_title";
    pub const REPORT_PEAK_SUBTEXT: &str = "report.peak_subtext";
    pub const REPORT_ENERGY_TITLE: &str = "report.energy_title";
    pub const REPORT_ENERGY_SUBTEXT: &str = "report.energy_subtext";
    pub const REPORT_COST_TITLE: &str = "report.cost_title";
    pub const REPORT_COST_SUBTEXT: &str = "report.cost_subtext";

    pub const CURVE_HEADING: &str = "curve.heading";
    pub const CURVE_TITLE: &str = "curve.title";
    pub const CURVE_TIME_AXIS: &str = "curve.time_axis";
    pub const CURVE_POWER_AXIS: &str = "curve.power_axis";
    pub const PROMPT_STEPS: &str = "prompt.steps";
    pub const PROMPT_CSV_PATH: &str = "prompt.csv_path";
    pub const EXPORT_SAVED: &str = "export.saved";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_LANG: &str = "settings.prompt_lang";
    pub const SETTINGS_PROMPT_ENERGY_UNIT: &str = "settings.prompt_energy_unit";
    pub const SETTINGS_PROMPT_POWER_UNIT: &str = "settings.prompt_power_unit";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_GLOBAL_CONFIG: &str = "gui.global_config";
    pub const GUI_MODEL_PARAMETERS: &str = "gui.model_parameters";
    pub const GUI_AMPLITUDE: &str = "gui.amplitude";
    pub const GUI_DECAY: &str = "gui.decay";
    pub const GUI_FORMULA_BUTTON: &str = "gui.formula.button";
    pub const GUI_FORMULA_POWER: &str = "gui.formula.power";
    pub const GUI_FORMULA_ENERGY: &str = "gui.formula.energy";
    pub const GUI_FORMULA_PEAK: &str = "gui.formula.peak";
    pub const GUI_FORMULA_COST: &str = "gui.formula.cost";
    pub const GUI_SETTINGS_TITLE: &str = "gui.settings.title";
    pub const GUI_SETTINGS_LANG: &str = "gui.settings.lang";
    pub const GUI_SETTINGS_LANG_AUTO: &str = "gui.settings.lang_auto";
    pub const GUI_SETTINGS_UNITS: &str = "gui.settings.units";
    pub const GUI_SETTINGS_ALPHA: &str = "gui.settings.alpha";
    pub const GUI_SETTINGS_SAVE: &str = "gui.settings.save";
    pub const GUI_ABOUT_TITLE: &str = "gui.about.title";
    pub const GUI_ABOUT_BODY: &str = "gui.about.body";
    pub const GUI_EXPORT_CSV: &str = "gui.export_csv";
    pub const GUI_RESET: &str = "gui.reset";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Es,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("es") {
            Language::Es
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(en/es)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        if overrides.is_some() {
            debug!(lang = lang_code, "language pack loaded");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 언어팩에서만 키를 조회한다.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key).map(String::as_str))
    }

    /// 번역을 가져온다. 언어팩 → 선택 언어 → 영어 → 키 순으로 폴백한다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let built_in = match self.lang {
            Language::Es => es(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        built_in.unwrap_or(key)
    }

    /// `{name}` 자리표시자를 채운 번역을 반환한다.
    pub fn fmt(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }
}

/// 템플릿의 `{key}`를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "es-cl" => Some("es-cl".into()),
        other if other.starts_with("es") => Some("es".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "es" => Some("es".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LC_ALL", "LANG"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 (중첩 가능한) 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., es-cl)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., es)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        APP_TITLE => "Araucanía Data Energy",
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MODEL => "Model {slot}",
        NOT_AVAILABLE_NOTE => "\u{2014} means the value is undefined for these parameters.",
        MAIN_MENU_TITLE => "\n=== Araucanía Data Energy ===",
        MAIN_MENU_COMPARE => "1) Compare models",
        MAIN_MENU_CURVE => "2) Power curve table",
        MAIN_MENU_CYCLE => "3) Global configuration",
        MAIN_MENU_MODEL_A => "4) Model A parameters",
        MAIN_MENU_MODEL_B => "5) Model B parameters",
        MAIN_MENU_EXPORT => "6) Export curve (CSV)",
        MAIN_MENU_SETTINGS => "7) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        PROMPT_KEEP_CURRENT => "(Enter keeps {current}): ",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_REJECTED_VALUE => "Value rejected:",
        CYCLE_HEADING => "\n-- Global configuration --",
        CYCLE_TIME => "Cycle time [h]",
        CYCLE_COST => "Energy cost [$/kWh]",
        MODEL_HEADING => "\n-- Model {slot} ({label}) --",
        MODEL_K => "Constant k (amplitude)",
        MODEL_A => "Constant a (decay)",
        MODEL_PARAMETERS => "k = {k}, a = {a}",
        REPORT_HEADING => "\n-- Cycle comparison --",
        REPORT_VERDICT => "Recommended option: Model {winner} ({label})",
        REPORT_SAVINGS => {
            "This configuration is more efficient and saves {savings}% in operating costs."
        }
        REPORT_PEAK_TITLE => "Peak power",
        REPORT_PEAK_SUBTEXT => "Occurs at t={time_a}h / t={time_b}h",
        REPORT_ENERGY_TITLE => "Total consumption",
        REPORT_ENERGY_SUBTEXT => "Integral under the curve over [0, T]",
        REPORT_COST_TITLE => "Cycle cost",
        REPORT_COST_SUBTEXT => "Based on ${rate}/kWh",
        CURVE_HEADING => "\n-- Power curve --",
        CURVE_TITLE => "Power curves P(t) = k·t·e^(-at)",
        CURVE_TIME_AXIS => "Time (h)",
        CURVE_POWER_AXIS => "Power (W)",
        PROMPT_STEPS => "Number of intervals",
        PROMPT_CSV_PATH => "CSV path",
        EXPORT_SAVED => "Saved: {path}",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Language: {lang}, energy unit: {energy}, power unit: {power}",
        SETTINGS_OPTIONS => "1) Language  2) Energy unit  3) Power unit",
        SETTINGS_PROMPT_LANG => "Language (auto/en/es): ",
        SETTINGS_PROMPT_ENERGY_UNIT => "Energy unit (Wh/kWh/kJ/MJ): ",
        SETTINGS_PROMPT_POWER_UNIT => "Power unit (W/kW): ",
        SETTINGS_INVALID => "Invalid input, nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        GUI_GLOBAL_CONFIG => "Global configuration",
        GUI_MODEL_PARAMETERS => "Model parameters",
        GUI_AMPLITUDE => "Constant k (Amplitude)",
        GUI_DECAY => "Constant a (Decay)",
        GUI_FORMULA_BUTTON => "Formula reference",
        GUI_FORMULA_POWER => "Power: P(t) = k·t·e^(-a·t)",
        GUI_FORMULA_ENERGY => "Energy: E(T) - E(0), E(t) = (-k/a)·e^(-a·t)·(t + 1/a)",
        GUI_FORMULA_PEAK => "Peak: dP/dt = 0 at t* = 1/a",
        GUI_FORMULA_COST => "Cost: Wh / 1000 · $/kWh",
        GUI_SETTINGS_TITLE => "Settings",
        GUI_SETTINGS_LANG => "Language",
        GUI_SETTINGS_LANG_AUTO => "System",
        GUI_SETTINGS_UNITS => "Display units",
        GUI_SETTINGS_ALPHA => "Window transparency",
        GUI_SETTINGS_SAVE => "Save settings",
        GUI_ABOUT_TITLE => "Help / About",
        GUI_ABOUT_BODY => "Compares two power models over one cycle: energy by closed-form integral, cost by kWh rate.",
        GUI_EXPORT_CSV => "Export CSV",
        GUI_RESET => "Reset defaults",
        _ => return None,
    };
    Some(s)
}

fn es(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Saliendo.",
        MODEL => "Modelo {slot}",
        NOT_AVAILABLE_NOTE => "\u{2014} indica que el valor no está definido para estos parámetros.",
        MAIN_MENU_COMPARE => "1) Comparar modelos",
        MAIN_MENU_CURVE => "2) Tabla de la curva de potencia",
        MAIN_MENU_CYCLE => "3) Configuración global",
        MAIN_MENU_MODEL_A => "4) Parámetros del Modelo A",
        MAIN_MENU_MODEL_B => "5) Parámetros del Modelo B",
        MAIN_MENU_EXPORT => "6) Exportar curva (CSV)",
        MAIN_MENU_SETTINGS => "7) Ajustes",
        MAIN_MENU_EXIT => "0) Salir",
        PROMPT_MENU_SELECT => "Seleccione menú: ",
        PROMPT_SELECT => "Seleccione: ",
        PROMPT_KEEP_CURRENT => "(Enter mantiene {current}): ",
        INVALID_SELECTION_RETRY => "Entrada inválida. Intente de nuevo.",
        ERROR_INVALID_NUMBER => "Ingrese un número.",
        ERROR_REJECTED_VALUE => "Valor rechazado:",
        CYCLE_HEADING => "\n-- Configuración Global --",
        CYCLE_TIME => "Tiempo del Ciclo [h]",
        CYCLE_COST => "Costo Energía [$/kWh]",
        MODEL_HEADING => "\n-- Modelo {slot} ({label}) --",
        MODEL_K => "Constante k (Amplitud)",
        MODEL_A => "Constante a (Decaimiento)",
        REPORT_HEADING => "\n-- Comparación del ciclo --",
        REPORT_VERDICT => "Opción Recomendada: Modelo {winner} ({label})",
        REPORT_SAVINGS => {
            "Esta configuración es más eficiente y genera un ahorro del {savings}% en costos operativos."
        }
        REPORT_PEAK_TITLE => "Peak de Potencia",
        REPORT_PEAK_SUBTEXT => "Ocurre en t={time_a}h / t={time_b}h",
        REPORT_ENERGY_TITLE => "Consumo Total",
        REPORT_ENERGY_SUBTEXT => "Integral bajo la curva en el intervalo [0, T]",
        REPORT_COST_TITLE => "Costo del Ciclo",
        REPORT_COST_SUBTEXT => "Basado en ${rate}/kWh",
        CURVE_HEADING => "\n-- Curva de potencia --",
        CURVE_TITLE => "Curvas de Potencia P(t) = k·t·e^(-at)",
        CURVE_TIME_AXIS => "Tiempo (h)",
        CURVE_POWER_AXIS => "Potencia (W)",
        PROMPT_STEPS => "Número de intervalos",
        PROMPT_CSV_PATH => "Ruta del CSV",
        EXPORT_SAVED => "Guardado: {path}",
        SETTINGS_HEADING => "\n-- Ajustes --",
        SETTINGS_CURRENT => "Idioma: {lang}, unidad de energía: {energy}, unidad de potencia: {power}",
        SETTINGS_OPTIONS => "1) Idioma  2) Unidad de energía  3) Unidad de potencia",
        SETTINGS_PROMPT_LANG => "Idioma (auto/en/es): ",
        SETTINGS_PROMPT_ENERGY_UNIT => "Unidad de energía (Wh/kWh/kJ/MJ): ",
        SETTINGS_PROMPT_POWER_UNIT => "Unidad de potencia (W/kW): ",
        SETTINGS_INVALID => "Entrada inválida, no se cambió nada.",
        SETTINGS_SAVED => "Ajustes guardados.",
        GUI_GLOBAL_CONFIG => "Configuración Global",
        GUI_MODEL_PARAMETERS => "Parámetros del Modelo",
        GUI_AMPLITUDE => "Constante k (Amplitud)",
        GUI_DECAY => "Constante a (Decaimiento)",
        GUI_FORMULA_BUTTON => "Fórmulas",
        GUI_FORMULA_ENERGY => "Energía: E(T) - E(0), E(t) = (-k/a)·e^(-a·t)·(t + 1/a)",
        GUI_FORMULA_PEAK => "Peak: dP/dt = 0 en t* = 1/a",
        GUI_FORMULA_COST => "Costo: Wh / 1000 · $/kWh",
        GUI_SETTINGS_TITLE => "Ajustes",
        GUI_SETTINGS_LANG => "Idioma",
        GUI_SETTINGS_LANG_AUTO => "Sistema",
        GUI_SETTINGS_UNITS => "Unidades",
        GUI_SETTINGS_ALPHA => "Transparencia de la ventana",
        GUI_SETTINGS_SAVE => "Guardar ajustes",
        GUI_ABOUT_TITLE => "Ayuda / Acerca de",
        GUI_ABOUT_BODY => "Compara dos modelos de potencia en un ciclo: energía por integral cerrada, costo por tarifa kWh.",
        GUI_EXPORT_CSV => "Exportar CSV",
        GUI_RESET => "Restablecer",
        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_falls_back_to_english() {
        let tr = Translator::new("es");
        assert_eq!(tr.language(), Language::Es);
        assert_eq!(tr.t(keys::REPORT_COST_TITLE), "Costo del Ciclo");
        // 스페인어 번들에 없는 키
        assert_eq!(tr.t(keys::APP_TITLE), "Araucanía Data Energy");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn unknown_code_is_english() {
        assert_eq!(Translator::new("ko-kr").language(), Language::En);
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("es", Some("en")), "es");
        assert_eq!(resolve_language("auto", Some("en-US")), "en");
        assert_eq!(resolve_language("", Some("es-CL")), "es-cl");
    }

    #[test]
    fn template_placeholders_are_filled() {
        let tr = Translator::new("en");
        let line = tr.fmt(
            keys::REPORT_VERDICT,
            &[("winner", "B".into()), ("label", "Eco server".into())],
        );
        assert_eq!(line, "Recommended option: Model B (Eco server)");
    }

    #[test]
    fn nested_pack_keys_are_flattened() {
        let map = parse_toml_to_map("[report]\ncost_title = \"Coste\"\n").unwrap();
        assert_eq!(map.get("report.cost_title").map(String::as_str), Some("Coste"));
        assert!(parse_toml_to_map("x = 1").is_none());
    }
}
