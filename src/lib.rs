//! 계산 코어(전력 모델, 사이클 비교)를 라이브러리로 분리하여 CLI와 GUI가 함께 사용한다.

pub mod app;
pub mod config;
pub mod cycle;
pub mod export;
pub mod i18n;
pub mod power;
pub mod report;
pub mod ui_cli;
pub mod units;
