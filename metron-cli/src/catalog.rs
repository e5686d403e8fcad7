//! Standard catalog: data sizes, time and length

use metron_core::UnitError;
use metron_units::{FamilyOptions, UnitOptions, Units};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const YEAR: f64 = 365.0 * DAY;

/// Build and seal the registry the command line works against
pub fn standard() -> Result<Units, UnitError> {
    let mut units = Units::new();

    units.system("binary bits")?
        .binary("bit", FamilyOptions::new().symbol("b"))?;

    units.system("binary bytes")?
        .binary("byte", FamilyOptions::new().symbol("B"))?;

    units.system("decimal bytes")?
        .metric("byte", FamilyOptions::new().symbol("b").min_value(1.0))?;

    units
        .conversion("binary bytes", "binary bits", 8.0)?
        .conversion("binary bytes", "decimal bytes", 1.0)?;

    units.system("time")?
        .metric("second", FamilyOptions::new().symbol("s"))?
        .unit("minute", MINUTE, UnitOptions::new().symbol("m"))?
        .unit("hour", HOUR, UnitOptions::new().symbol("hr"))?
        .unit("day", DAY, UnitOptions::new().symbol("d"))?
        .unit("week", 7.0 * DAY, UnitOptions::new().symbol("w"))?
        .unit("month", 30.0 * DAY, UnitOptions::new().symbol("M"))?
        .unit("year", YEAR, UnitOptions::new().symbol("y"))?
        .unit("decade", 10.0 * YEAR, UnitOptions::new().symbol("D"))?
        .unit("century", 100.0 * YEAR, UnitOptions::new().alias("centurie").symbol("C"))?
        .unit("millennium", 1000.0 * YEAR, UnitOptions::new().alias("millennia").symbol("Mi"))?;

    units.system("length")?
        .metric("meter", FamilyOptions::new().alias("metre").symbol("m"))?;

    units.seal();
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_catalog_builds_sealed() {
        let units = standard().unwrap();
        assert!(units.is_sealed());
        assert_eq!(units.systems().count(), 5);
        assert_eq!(units.get_system("time").unwrap().base().unwrap().name, "second");
    }

    #[test]
    fn test_standard_conversions() {
        let units = standard().unwrap();

        let bits = units.parse("10 MiB").unwrap().in_unit("b").unwrap();
        assert_eq!(bits.value(), 83_886_080.0);
        assert_eq!(bits.to_string(), "83886080 b");

        let ms = units.parse("2 weeks").unwrap().in_unit("ms").unwrap();
        assert_eq!(ms.value(), 1_209_600_000.0);

        let centuries = units.parse("3 centuries").unwrap().in_unit("year").unwrap();
        assert_relative_eq!(centuries.value(), 300.0);
    }

    #[test]
    fn test_speed_from_demo() {
        let units = standard().unwrap();
        let speed = units.parse("100 km").unwrap()
            .divided_by(&units.parse("2 hours").unwrap()).unwrap();
        assert_eq!(speed.to_string(), "50 km/hr");

        let distance = speed.multiply_by(&units.parse("10 hr").unwrap()).unwrap();
        assert_eq!(distance.to_string(), "500 km");
    }
}
