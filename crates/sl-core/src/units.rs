// sl-core/src/units.rs

use uom::si::f64::{
    Frequency as UomFrequency, Length as UomLength, Pressure as UomPressure, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Frequency = UomFrequency;
pub type Length = UomLength;
pub type Pressure = UomPressure;
pub type Time = UomTime;

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

#[inline]
pub fn atm(v: f64) -> Pressure {
    use uom::si::pressure::atmosphere;
    Pressure::new::<atmosphere>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

/// Length in micrometers, the scale bubble radii are usually reported at.
#[inline]
pub fn to_um(l: Length) -> f64 {
    use uom::si::length::micrometer;
    l.get::<micrometer>()
}

#[inline]
pub fn to_pa(p: Pressure) -> f64 {
    use uom::si::pressure::pascal;
    p.get::<pascal>()
}

#[inline]
pub fn to_s(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}

pub mod constants {
    /// Standard atmosphere in pascal.
    pub const ATM_PA: f64 = 101_325.0;
}
