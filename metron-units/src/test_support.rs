//! Shared fixture registries for tests

use crate::{FamilyOptions, UnitOptions, Units};

/// Binary bits and bytes, decimal bytes, time and length
pub(crate) fn fixture() -> Units {
    let mut units = Units::new();

    units.system("binary bits").unwrap()
        .binary("bit", FamilyOptions::new().symbol("b")).unwrap();
    units.system("binary bytes").unwrap()
        .binary("byte", FamilyOptions::new().symbol("B")).unwrap();
    units.system("decimal bytes").unwrap()
        .metric("byte", FamilyOptions::new().symbol("b").min_value(1.0)).unwrap();
    units
        .conversion("binary bytes", "binary bits", 8.0).unwrap()
        .conversion("binary bytes", "decimal bytes", 1.0).unwrap();

    let day = 24.0 * 60.0 * 60.0;
    units.system("time").unwrap()
        .metric("second", FamilyOptions::new().symbol("s")).unwrap()
        .unit("minute", 60.0, UnitOptions::new().symbol("m")).unwrap()
        .unit("hour", 3600.0, UnitOptions::new().symbol("hr")).unwrap()
        .unit("day", day, UnitOptions::new().symbol("d")).unwrap()
        .unit("week", 7.0 * day, UnitOptions::new().symbol("w")).unwrap()
        .unit("year", 365.0 * day, UnitOptions::new().symbol("y")).unwrap();

    units.system("length").unwrap()
        .metric("meter", FamilyOptions::new().alias("metre").symbol("m")).unwrap()
        .unit("light-second", 299_792_458.0, UnitOptions::new()).unwrap();

    units
}

/// `fixture()` plus two temperature systems linked by a function edge
pub(crate) fn with_temperature() -> Units {
    let mut units = fixture();
    units.system("celsius").unwrap()
        .unit("celsius", 1.0, UnitOptions::new().symbol("C")).unwrap();
    units.system("fahrenheit").unwrap()
        .unit("fahrenheit", 1.0, UnitOptions::new().symbol("F")).unwrap();
    units.conversion_fn(
        "celsius",
        "fahrenheit",
        |c| c * 9.0 / 5.0 + 32.0,
        |f| (f - 32.0) * 5.0 / 9.0,
    ).unwrap();
    units
}
