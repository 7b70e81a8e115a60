#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use clap::Parser;
use eframe::{egui, App, Frame};
use energy_cycle_simulator::{
    config,
    cycle::{
        compare, sample_curves, ComparisonResult, CycleConfiguration, ModelSlot, SamplePoint,
        Scenario, DEFAULT_SAMPLE_STEPS,
    },
    export, i18n,
    i18n::keys,
    power::ModelParameters,
    report,
    units::{EnergyUnit, PowerUnit},
};
use image::GenericImageView;
use rfd::FileDialog;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CYCLE_TIME_RANGE: RangeInclusive<f64> = 1.0..=10.0;
const CYCLE_TIME_STEP: f64 = 0.5;
const K_RANGE: RangeInclusive<f64> = 10.0..=500.0;
const K_STEP: f64 = 10.0;
const A_RANGE: RangeInclusive<f64> = 0.1..=5.0;
const A_STEP: f64 = 0.1;

const COLOR_A: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
const COLOR_B: egui::Color32 = egui::Color32::from_rgb(16, 185, 129);
const BANNER_FILL: egui::Color32 = egui::Color32::from_rgb(30, 41, 59);
const SAVINGS_COLOR: egui::Color32 = egui::Color32::from_rgb(74, 222, 128);

#[derive(Parser, Debug)]
#[command(author, version, about = "Energy cycle simulator (desktop)")]
struct GuiArgs {
    /// auto/en/es
    #[arg(short = 'L', long)]
    lang: Option<String>,

    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> Result<(), eframe::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let args = GuiArgs::parse();
    info!(config = %args.config.display(), "starting desktop app");
    let mut app_cfg = config::load_or_fallback(&args.config);
    if let Some(lang_cli) = args.lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1200.0, 820.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Araucanía Data Energy",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn translator_for(cfg: &config::Config) -> i18n::Translator {
    let resolved = i18n::resolve_language(&cfg.language, None);
    i18n::Translator::new_with_pack(&resolved, cfg.language_pack_dir.as_deref())
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,

    // 슬라이더/입력 원값. 검증은 recompute에서 한다.
    cycle_time: f64,
    cost_per_kwh: f64,
    k: [f64; 2],
    a: [f64; 2],

    scenario: Scenario,
    result: ComparisonResult,
    points: Vec<SamplePoint>,
    input_error: Option<String>,

    show_settings_modal: bool,
    show_help_modal: bool,
    show_formula_modal: bool,
    lang_input: String,
    window_alpha: f32,
    status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let tr = translator_for(&config);
        let scenario = config.scenario.clone();
        let result = compare(&scenario);
        let points = sample_curves(
            scenario.cycle.cycle_time(),
            &scenario.model_a,
            &scenario.model_b,
            DEFAULT_SAMPLE_STEPS,
        );
        let mut app = Self {
            lang_input: config.language.clone(),
            window_alpha: config.window_alpha,
            config,
            tr,
            cycle_time: 0.0,
            cost_per_kwh: 0.0,
            k: [0.0; 2],
            a: [0.0; 2],
            scenario,
            result,
            points,
            input_error: None,
            show_settings_modal: false,
            show_help_modal: false,
            show_formula_modal: false,
            status: None,
        };
        app.load_inputs_from_scenario();
        app
    }

    fn load_inputs_from_scenario(&mut self) {
        self.cycle_time = self.scenario.cycle.cycle_time();
        self.cost_per_kwh = self.scenario.cycle.cost_per_kwh();
        for (i, slot) in ModelSlot::ALL.into_iter().enumerate() {
            let model = self.scenario.model(slot);
            self.k[i] = model.k();
            self.a[i] = model.a();
        }
    }

    /// 입력값이 바뀌면 전체 결과를 다시 계산한다. 잘못된 입력이면 마지막 유효 결과를 유지한다.
    fn recompute(&mut self) {
        match self.scenario_from_inputs() {
            Ok(scenario) => {
                self.scenario = scenario;
                self.input_error = None;
            }
            Err(msg) => {
                warn!(%msg, "input rejected");
                self.input_error = Some(msg);
                return;
            }
        }
        self.result = compare(&self.scenario);
        self.points = sample_curves(
            self.scenario.cycle.cycle_time(),
            &self.scenario.model_a,
            &self.scenario.model_b,
            DEFAULT_SAMPLE_STEPS,
        );
    }

    fn scenario_from_inputs(&self) -> Result<Scenario, String> {
        let cycle = CycleConfiguration::new(self.cycle_time, self.cost_per_kwh)
            .map_err(|e| e.to_string())?;
        let model_a = ModelParameters::new(self.k[0], self.a[0]).map_err(|e| e.to_string())?;
        let model_b = ModelParameters::new(self.k[1], self.a[1]).map_err(|e| e.to_string())?;
        Ok(Scenario {
            cycle,
            model_a,
            model_b,
            ..self.scenario.clone()
        })
    }

    fn reset_defaults(&mut self) {
        self.scenario = Scenario::default();
        self.load_inputs_from_scenario();
        self.recompute();
    }

    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.window_alpha = self.window_alpha;
        self.config.scenario = self.scenario.clone();
        self.tr = translator_for(&self.config);
        self.status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::SETTINGS_SAVED).to_string(),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn export_csv(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name("curve.csv")
            .save_file()
        else {
            return;
        };
        self.status = Some(match export::write_curve_csv_file(&self.points, &path) {
            Ok(()) => self
                .tr
                .fmt(keys::EXPORT_SAVED, &[("path", path.display().to_string())]),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn ui_controls(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;
        ui.heading(self.tr.t(keys::GUI_GLOBAL_CONFIG));
        ui.label(self.tr.t(keys::CYCLE_TIME));
        changed |= ui
            .add(
                egui::Slider::new(&mut self.cycle_time, CYCLE_TIME_RANGE)
                    .step_by(CYCLE_TIME_STEP)
                    .suffix(" h"),
            )
            .changed();
        ui.label(self.tr.t(keys::CYCLE_COST));
        changed |= ui
            .add(
                egui::DragValue::new(&mut self.cost_per_kwh)
                    .speed(0.5)
                    .clamp_range(0.01..=f64::MAX)
                    .prefix("$ "),
            )
            .changed();

        ui.separator();
        ui.heading(self.tr.t(keys::GUI_MODEL_PARAMETERS));
        for (i, slot) in ModelSlot::ALL.into_iter().enumerate() {
            let color = slot_color(slot);
            let title = format!(
                "{} ({})",
                self.tr.fmt(keys::MODEL, &[("slot", slot.to_string())]),
                self.scenario.label(slot)
            );
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(egui::RichText::new(title).strong().color(color));
                ui.label(self.tr.t(keys::GUI_AMPLITUDE));
                changed |= ui
                    .add(egui::Slider::new(&mut self.k[i], K_RANGE).step_by(K_STEP))
                    .changed();
                ui.label(self.tr.t(keys::GUI_DECAY));
                changed |= ui
                    .add(egui::Slider::new(&mut self.a[i], A_RANGE).step_by(A_STEP))
                    .changed();
            });
        }

        ui.separator();
        if ui.button(self.tr.t(keys::GUI_RESET)).clicked() {
            self.reset_defaults();
        }
        if let Some(err) = &self.input_error {
            ui.colored_label(egui::Color32::RED, err);
        }
        if changed {
            self.recompute();
        }
    }

    fn ui_dashboard(&mut self, ui: &mut egui::Ui) {
        let (headline, savings) = report::verdict_lines(&self.tr, &self.scenario, &self.result);
        egui::Frame::none()
            .fill(BANNER_FILL)
            .rounding(8.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    egui::RichText::new(format!("\u{1F3C6} {headline}"))
                        .size(22.0)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
                ui.label(egui::RichText::new(savings).color(SAVINGS_COLOR));
            });

        ui.add_space(12.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.heading(self.tr.t(keys::CURVE_TITLE));
            power_chart(ui, &self.scenario, &self.points, &self.result, &self.tr);
        });

        ui.add_space(12.0);
        let cards = report::summary_cards(
            &self.tr,
            &self.scenario,
            &self.result,
            &self.config.default_units,
        );
        ui.columns(cards.len(), |cols| {
            for (col, card) in cols.iter_mut().zip(cards.iter()) {
                summary_card(col, card);
            }
        });
        if let Some(status) = &self.status {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(status).small());
        }
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings_modal;
        let mut save = false;
        egui::Window::new(self.tr.t(keys::GUI_SETTINGS_TITLE))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(self.tr.t(keys::GUI_SETTINGS_LANG));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(self.lang_input.clone())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.lang_input,
                            "auto".into(),
                            self.tr.t(keys::GUI_SETTINGS_LANG_AUTO),
                        );
                        ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                        ui.selectable_value(&mut self.lang_input, "es".into(), "Español");
                    });
                ui.separator();
                ui.label(self.tr.t(keys::GUI_SETTINGS_UNITS));
                let units = &mut self.config.default_units;
                ui.horizontal(|ui| {
                    for unit in EnergyUnit::ALL {
                        ui.selectable_value(&mut units.energy, unit, unit.symbol());
                    }
                });
                ui.horizontal(|ui| {
                    for unit in PowerUnit::ALL {
                        ui.selectable_value(&mut units.power, unit, unit.symbol());
                    }
                });
                ui.separator();
                ui.label(self.tr.t(keys::GUI_SETTINGS_ALPHA));
                ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                ui.separator();
                if ui.button(self.tr.t(keys::GUI_SETTINGS_SAVE)).clicked() {
                    save = true;
                }
            });
        self.show_settings_modal = open;
        if save {
            self.save_settings();
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut style = (*ctx.style()).clone();
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE));
                ui.label(" | Cálculo II - EID1");
                ui.separator();
                if ui.button(self.tr.t(keys::GUI_FORMULA_BUTTON)).clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button(self.tr.t(keys::GUI_SETTINGS_TITLE)).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(self.tr.t(keys::GUI_ABOUT_TITLE)).clicked() {
                    self.show_help_modal = true;
                }
                if ui.button(self.tr.t(keys::GUI_EXPORT_CSV)).clicked() {
                    self.export_csv();
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }

        if self.show_help_modal {
            egui::Window::new(self.tr.t(keys::GUI_ABOUT_TITLE))
                .collapsible(false)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.label(self.tr.t(keys::GUI_ABOUT_BODY));
                    ui.label(self.tr.t(keys::NOT_AVAILABLE_NOTE));
                    ui.label(format!("v{}", env!("CARGO_PKG_VERSION")));
                });
        }

        if self.show_formula_modal {
            egui::Window::new(self.tr.t(keys::GUI_FORMULA_BUTTON))
                .collapsible(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    for key in [
                        keys::GUI_FORMULA_POWER,
                        keys::GUI_FORMULA_ENERGY,
                        keys::GUI_FORMULA_PEAK,
                        keys::GUI_FORMULA_COST,
                    ] {
                        ui.label(self.tr.t(key));
                    }
                });
        }

        egui::SidePanel::left("controls")
            .resizable(true)
            .min_width(240.0)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.ui_controls(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.ui_dashboard(ui));
        });
    }
}

fn slot_color(slot: ModelSlot) -> egui::Color32 {
    match slot {
        ModelSlot::A => COLOR_A,
        ModelSlot::B => COLOR_B,
    }
}

fn summary_card(ui: &mut egui::Ui, card: &report::SummaryCard) {
    let stroke = if card.highlight {
        egui::Stroke::new(1.5, COLOR_B)
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };
    egui::Frame::group(ui.style())
        .stroke(stroke)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(&card.title).weak());
            ui.label(egui::RichText::new(&card.value).size(18.0).strong());
            ui.label(egui::RichText::new(&card.subtext).small().weak());
        });
}

/// 차트 영역 좌표 변환. 시간 [0, t_max], 전력 [0, p_max].
#[derive(Debug, Clone, Copy)]
struct ChartGeometry {
    plot: egui::Rect,
    t_max: f64,
    p_max: f64,
}

impl ChartGeometry {
    const LEFT_MARGIN: f32 = 56.0;
    const BOTTOM_MARGIN: f32 = 28.0;

    fn new(area: egui::Rect, points: &[SamplePoint]) -> Self {
        let t_max = points.last().map(|p| p.time).unwrap_or(1.0).max(f64::EPSILON);
        let p_max = points
            .iter()
            .flat_map(|p| [p.power_a, p.power_b])
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max)
            * 1.1;
        let plot = egui::Rect::from_min_max(
            egui::pos2(area.left() + Self::LEFT_MARGIN, area.top() + 8.0),
            egui::pos2(area.right() - 8.0, area.bottom() - Self::BOTTOM_MARGIN),
        );
        Self {
            plot,
            t_max,
            p_max: if p_max > 0.0 { p_max } else { 1.0 },
        }
    }

    fn to_screen(&self, t: f64, p: f64) -> egui::Pos2 {
        let x = self.plot.left() + (t / self.t_max) as f32 * self.plot.width();
        let y = self.plot.bottom() - (p / self.p_max) as f32 * self.plot.height();
        egui::pos2(x, y)
    }

    fn time_at(&self, x: f32) -> f64 {
        let frac = ((x - self.plot.left()) / self.plot.width()).clamp(0.0, 1.0);
        frac as f64 * self.t_max
    }
}

fn power_chart(
    ui: &mut egui::Ui,
    scenario: &Scenario,
    points: &[SamplePoint],
    result: &ComparisonResult,
    tr: &i18n::Translator,
) {
    let size = egui::vec2(ui.available_width(), 360.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let geo = ChartGeometry::new(response.rect, points);
    let visuals = ui.visuals();
    let grid = egui::Stroke::new(0.5, visuals.weak_text_color().linear_multiply(0.4));
    let text_color = visuals.text_color();
    let font = egui::FontId::proportional(11.0);

    const DIVISIONS: usize = 5;
    for i in 0..=DIVISIONS {
        let frac = i as f64 / DIVISIONS as f64;
        let y = geo.to_screen(0.0, frac * geo.p_max).y;
        painter.line_segment(
            [egui::pos2(geo.plot.left(), y), egui::pos2(geo.plot.right(), y)],
            grid,
        );
        painter.text(
            egui::pos2(geo.plot.left() - 6.0, y),
            egui::Align2::RIGHT_CENTER,
            report::format_value(frac * geo.p_max, 0),
            font.clone(),
            text_color,
        );
        let x = geo.to_screen(frac * geo.t_max, 0.0).x;
        painter.line_segment(
            [egui::pos2(x, geo.plot.top()), egui::pos2(x, geo.plot.bottom())],
            grid,
        );
        painter.text(
            egui::pos2(x, geo.plot.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            report::format_value(frac * geo.t_max, 1),
            font.clone(),
            text_color,
        );
    }
    painter.text(
        geo.plot.right_bottom() + egui::vec2(0.0, 16.0),
        egui::Align2::RIGHT_TOP,
        tr.t(keys::CURVE_TIME_AXIS),
        font.clone(),
        text_color,
    );
    painter.text(
        geo.plot.left_top() + egui::vec2(4.0, 0.0),
        egui::Align2::LEFT_TOP,
        tr.t(keys::CURVE_POWER_AXIS),
        font.clone(),
        text_color,
    );

    for slot in ModelSlot::ALL {
        let color = slot_color(slot);
        let line: Vec<egui::Pos2> = points
            .iter()
            .map(|p| {
                let v = match slot {
                    ModelSlot::A => p.power_a,
                    ModelSlot::B => p.power_b,
                };
                geo.to_screen(p.time, v)
            })
            .collect();
        painter.add(egui::Shape::line(line, egui::Stroke::new(2.0, color)));

        let peak = result.peak(slot);
        if peak.time.is_finite() && (0.0..=geo.t_max).contains(&peak.time) {
            painter.circle_filled(geo.to_screen(peak.time, peak.power), 4.0, color);
        }
    }

    if let Some(pos) = response.hover_pos() {
        if geo.plot.contains(pos) {
            let t = geo.time_at(pos.x);
            painter.line_segment(
                [egui::pos2(pos.x, geo.plot.top()), egui::pos2(pos.x, geo.plot.bottom())],
                egui::Stroke::new(1.0, text_color),
            );
            let label = format!(
                "t = {} h\nA: {} W\nB: {} W",
                report::format_value(t, 2),
                report::format_value(scenario.model_a.power_at(t), 1),
                report::format_value(scenario.model_b.power_at(t), 1)
            );
            painter.text(
                pos + egui::vec2(10.0, -10.0),
                egui::Align2::LEFT_BOTTOM,
                label,
                font,
                text_color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_shows_default_comparison() {
        let app = GuiApp::new(config::Config::default());
        assert_eq!(app.cycle_time, 4.0);
        assert_eq!(app.k, [200.0, 80.0]);
        assert_eq!(app.a, [1.0, 0.5]);
        assert_eq!(app.result.winner, ModelSlot::A);
        assert_eq!(app.points.len(), DEFAULT_SAMPLE_STEPS + 1);
    }

    #[test]
    fn slider_change_recomputes() {
        let mut app = GuiApp::new(config::Config::default());
        app.k[0] = 500.0;
        app.recompute();
        assert_eq!(app.result.winner, ModelSlot::B);
        assert_eq!(app.scenario.model_a.k(), 500.0);
    }

    #[test]
    fn invalid_cost_keeps_last_valid_result() {
        let mut app = GuiApp::new(config::Config::default());
        let before = app.result;
        app.cost_per_kwh = 0.0;
        app.recompute();
        assert!(app.input_error.is_some());
        assert_eq!(app.result, before);
        app.reset_defaults();
        assert!(app.input_error.is_none());
        assert_eq!(app.cost_per_kwh, 160.55);
    }

    #[test]
    fn chart_geometry_maps_corners() {
        let area = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(456.0, 236.0));
        let s = Scenario::default();
        let points = sample_curves(4.0, &s.model_a, &s.model_b, 8);
        let geo = ChartGeometry::new(area, &points);
        assert_eq!(geo.t_max, 4.0);
        let origin = geo.to_screen(0.0, 0.0);
        assert_eq!(origin, geo.plot.left_bottom());
        assert!((geo.time_at(geo.plot.right()) - 4.0).abs() < 1e-9);
        assert_eq!(geo.time_at(-100.0), 0.0);
    }
}
