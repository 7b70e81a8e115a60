//! 지수 감쇠 전력 모델 P(t) = k·t·e^(-a·t) 계산 모듈 모음.

pub mod model;
pub mod parameters;

pub use model::*;
pub use parameters::*;
