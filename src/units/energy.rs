use serde::{Deserialize, Serialize};

/// 에너지 단위. 내부 기준은 와트시(Wh)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUnit {
    WattHour,
    KilowattHour,
    Kilojoule,
    Megajoule,
}

impl EnergyUnit {
    pub const ALL: [EnergyUnit; 4] = [
        EnergyUnit::WattHour,
        EnergyUnit::KilowattHour,
        EnergyUnit::Kilojoule,
        EnergyUnit::Megajoule,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            EnergyUnit::WattHour => "Wh",
            EnergyUnit::KilowattHour => "kWh",
            EnergyUnit::Kilojoule => "kJ",
            EnergyUnit::Megajoule => "MJ",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wh" => Some(EnergyUnit::WattHour),
            "kwh" => Some(EnergyUnit::KilowattHour),
            "kj" => Some(EnergyUnit::Kilojoule),
            "mj" => Some(EnergyUnit::Megajoule),
            _ => None,
        }
    }
}

fn to_watt_hour(value: f64, unit: EnergyUnit) -> f64 {
    match unit {
        EnergyUnit::WattHour => value,
        EnergyUnit::KilowattHour => value * 1000.0,
        EnergyUnit::Kilojoule => value / 3.6,
        EnergyUnit::Megajoule => value / 3.6 * 1000.0,
    }
}

fn from_watt_hour(value: f64, unit: EnergyUnit) -> f64 {
    match unit {
        EnergyUnit::WattHour => value,
        EnergyUnit::KilowattHour => value / 1000.0,
        EnergyUnit::Kilojoule => value * 3.6,
        EnergyUnit::Megajoule => value * 3.6 / 1000.0,
    }
}

/// 에너지를 변환한다.
pub fn convert_energy(value: f64, from: EnergyUnit, to: EnergyUnit) -> f64 {
    let wh = to_watt_hour(value, from);
    from_watt_hour(wh, to)
}
