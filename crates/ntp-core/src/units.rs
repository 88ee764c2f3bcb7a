// ntp-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Length as UomLength, MassRate as UomMassRate, MolarMass as UomMolarMass,
    Power as UomPower, Pressure as UomPressure, SpecificHeatCapacity as UomSpecificHeatCapacity,
    TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;
pub type MassRate = UomMassRate;
pub type MolarMass = UomMolarMass;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type SpecificHeat = UomSpecificHeatCapacity;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn dk(v: f64) -> TempInterval {
    use uom::si::temperature_interval::kelvin;
    TempInterval::new::<kelvin>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn j_per_kg_k(v: f64) -> SpecificHeat {
    use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
    SpecificHeat::new::<joule_per_kilogram_kelvin>(v)
}

#[inline]
pub fn kg_per_mol(v: f64) -> MolarMass {
    use uom::si::molar_mass::kilogram_per_mole;
    MolarMass::new::<kilogram_per_mole>(v)
}

pub mod constants {
    pub const G0_MPS2: f64 = 9.806_65;

    /// Universal gas constant, J/(mol·K)
    pub const R_UNIVERSAL: f64 = 8.314_462_618;

    /// Standard sea-level atmosphere, Pa
    pub const P_ATM_PA: f64 = 101_325.0;

    /// Specific gas constant `R_universal / M`, J/(kg·K).
    #[inline]
    pub fn specific_gas_constant(molar_mass_kg_per_mol: f64) -> f64 {
        R_UNIVERSAL / molar_mass_kg_per_mol
    }
}
