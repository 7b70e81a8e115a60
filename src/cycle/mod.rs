//! 두 전력 모델을 한 사이클 기준으로 비교하는 계산 모듈 모음.

pub mod comparison;
pub mod configuration;
pub mod cost;
pub mod sampling;

pub use comparison::*;
pub use configuration::*;
pub use cost::*;
pub use sampling::*;
