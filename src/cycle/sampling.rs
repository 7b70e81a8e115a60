use serde::Serialize;

use crate::power::ModelParameters;

/// 그래프 기본 샘플 구간 수. 점 개수는 구간 수 + 1.
pub const DEFAULT_SAMPLE_STEPS: usize = 50;

/// 그래프 한 행: 같은 시각의 두 모델 전력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplePoint {
    /// 시각 [h]
    pub time: f64,
    /// 모델 A 전력 [W]
    pub power_a: f64,
    /// 모델 B 전력 [W]
    pub power_b: f64,
}

/// [0, T]를 `steps` 구간으로 나눠 두 모델의 전력 곡선을 샘플링한다.
///
/// t_i = T·i/steps (i = 0..=steps). `steps = 0`이면 t = 0 한 점만 반환한다.
pub fn sample_curves(
    cycle_time: f64,
    model_a: &ModelParameters,
    model_b: &ModelParameters,
    steps: usize,
) -> Vec<SamplePoint> {
    if steps == 0 {
        return vec![SamplePoint {
            time: 0.0,
            power_a: model_a.power_at(0.0),
            power_b: model_b.power_at(0.0),
        }];
    }
    (0..=steps)
        .map(|i| {
            let time = cycle_time * i as f64 / steps as f64;
            SamplePoint {
                time,
                power_a: model_a.power_at(time),
                power_b: model_b.power_at(time),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_grid_spans_whole_cycle() {
        let a = ModelParameters::STANDARD_SERVER;
        let b = ModelParameters::ECO_SERVER;
        let points = sample_curves(4.0, &a, &b, DEFAULT_SAMPLE_STEPS);
        assert_eq!(points.len(), 51);
        assert_eq!(points[0].time, 0.0);
        assert_eq!(points[0].power_a, 0.0);
        assert_eq!(points[50].time, 4.0);
        assert!((points[25].time - 2.0).abs() < 1e-12);
        assert_eq!(points[25].power_b, b.power_at(points[25].time));
    }

    #[test]
    fn zero_steps_yields_origin_only() {
        let a = ModelParameters::STANDARD_SERVER;
        let points = sample_curves(4.0, &a, &a, 0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].time, 0.0);
    }
}
