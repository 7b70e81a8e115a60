//! 샘플 곡선 내보내기: CSV(csv)와 SVG 차트(plotters).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use plotters::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::cycle::SamplePoint;

/// 내보내기 오류.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV 쓰기 오류: {0}")]
    Csv(#[from] csv::Error),
    #[error("차트 렌더링 오류: {0}")]
    Chart(String),
}

pub const CSV_HEADER: [&str; 3] = ["time_h", "power_a_w", "power_b_w"];

/// 샘플 곡선을 CSV로 쓴다.
pub fn write_curve_csv<W: Write>(points: &[SamplePoint], out: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for p in points {
        writer.write_record([
            format!("{:.4}", p.time),
            p.power_a.to_string(),
            p.power_b.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_curve_csv_file(points: &[SamplePoint], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_curve_csv(points, file)?;
    info!(path = %path.display(), rows = points.len(), "exported curve CSV");
    Ok(())
}

/// 차트 제목/축/범례 문자열.
#[derive(Debug, Clone)]
pub struct ChartLabels {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    pub series_a: String,
    pub series_b: String,
}

const SERIES_A_COLOR: RGBColor = RGBColor(59, 130, 246);
const SERIES_B_COLOR: RGBColor = RGBColor(16, 185, 129);
const CHART_SIZE: (u32, u32) = (1280, 720);

/// 두 모델의 전력 곡선을 SVG 문자열로 렌더링한다.
pub fn render_curve_svg(points: &[SamplePoint], labels: &ChartLabels) -> Result<String, ExportError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        draw_curves(&root, points, labels)?;
        root.present().map_err(|e| ExportError::Chart(e.to_string()))?;
    }
    Ok(svg)
}

pub fn write_curve_svg_file(
    points: &[SamplePoint],
    labels: &ChartLabels,
    path: &Path,
) -> Result<(), ExportError> {
    let svg = render_curve_svg(points, labels)?;
    std::fs::write(path, svg)?;
    info!(path = %path.display(), "exported curve chart");
    Ok(())
}

fn draw_curves<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    points: &[SamplePoint],
    labels: &ChartLabels,
) -> Result<(), ExportError> {
    let chart_err = |e: DrawingAreaErrorKind<DB::ErrorType>| ExportError::Chart(e.to_string());

    root.fill(&WHITE).map_err(chart_err)?;

    let t_max = points
        .iter()
        .map(|p| p.time)
        .filter(|t| t.is_finite())
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);
    let p_max = points
        .iter()
        .flat_map(|p| [p.power_a, p.power_b])
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max)
        * 1.1;
    let p_max = if p_max > 0.0 { p_max } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .caption(&labels.title, ("sans-serif", 28))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(0.0..t_max, 0.0..p_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc(&labels.x_axis)
        .y_desc(&labels.y_axis)
        .draw()
        .map_err(chart_err)?;

    let series = [
        (&labels.series_a, SERIES_A_COLOR, true),
        (&labels.series_b, SERIES_B_COLOR, false),
    ];
    for (name, color, is_a) in series {
        let style = color.stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                points
                    .iter()
                    .map(|p| (p.time, if is_a { p.power_a } else { p.power_b }))
                    .filter(|(_, v)| v.is_finite()),
                style,
            ))
            .map_err(chart_err)?
            .label(name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(chart_err)?;
    Ok(())
}
