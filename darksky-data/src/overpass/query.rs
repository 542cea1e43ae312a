//! Overpass QL for accessibility features.

use geo::Coord;

/// `highway` values a car can be expected to use.
pub(crate) const DRIVABLE_HIGHWAYS: &[&str] = &[
    "motorway",
    "trunk",
    "primary",
    "secondary",
    "tertiary",
    "unclassified",
    "residential",
    "service",
    "track",
];

/// Build the query for features within `radius_m` of `location`.
///
/// Ways are returned with their centre so every element carries a single
/// representative point.
pub(crate) fn accessibility_query(location: Coord<f64>, radius_m: f64, timeout_secs: u64) -> String {
    let around = format!("around:{radius_m:.0},{},{}", location.y, location.x);
    let highways = DRIVABLE_HIGHWAYS.join("|");
    format!(
        "[out:json][timeout:{timeout_secs}];\n(\n  \
         node[\"amenity\"=\"parking\"]({around});\n  \
         way[\"amenity\"=\"parking\"]({around});\n  \
         way[\"highway\"~\"^({highways})$\"]({around});\n  \
         way[\"leisure\"=\"park\"]({around});\n\
         );\nout center tags;"
    )
}
