use serde::{Deserialize, Serialize};

/// 전력 단위. 내부 기준은 와트(W)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUnit {
    Watt,
    Kilowatt,
}

impl PowerUnit {
    pub const ALL: [PowerUnit; 2] = [PowerUnit::Watt, PowerUnit::Kilowatt];

    pub fn symbol(&self) -> &'static str {
        match self {
            PowerUnit::Watt => "W",
            PowerUnit::Kilowatt => "kW",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "w" => Some(PowerUnit::Watt),
            "kw" => Some(PowerUnit::Kilowatt),
            _ => None,
        }
    }
}

/// 전력을 변환한다.
pub fn convert_power(value: f64, from: PowerUnit, to: PowerUnit) -> f64 {
    let w = match from {
        PowerUnit::Watt => value,
        PowerUnit::Kilowatt => value * 1000.0,
    };
    match to {
        PowerUnit::Watt => w,
        PowerUnit::Kilowatt => w / 1000.0,
    }
}
