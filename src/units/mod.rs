//! 표시용 단위 정의 및 변환 모듈 모음.

pub mod energy;
pub mod power;

pub use energy::{convert_energy, EnergyUnit};
pub use power::{convert_power, PowerUnit};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kilowatt_hour_to_megajoule() {
        let mj = convert_energy(1.0, EnergyUnit::KilowattHour, EnergyUnit::Megajoule);
        assert!((mj - 3.6).abs() < 1e-12);
    }

    #[test]
    fn watt_hour_to_kilojoule() {
        let kj = convert_energy(189.99, EnergyUnit::WattHour, EnergyUnit::Kilojoule);
        assert!((kj - 683.964).abs() < 1e-9);
    }

    #[test]
    fn kilowatt_roundtrip_symbol() {
        assert_eq!(PowerUnit::from_symbol(" kW "), Some(PowerUnit::Kilowatt));
        assert_eq!(convert_power(73.5, PowerUnit::Watt, PowerUnit::Kilowatt), 0.0735);
        assert_eq!(EnergyUnit::from_symbol("btu"), None);
    }
}
