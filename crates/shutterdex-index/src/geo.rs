//! Offline coarse country lookup.
//!
//! A short, ordered list of rectangular lat/lon ranges checked first-match
//! wins. This is a fallback for captures whose platform metadata carries
//! coordinates but no country label; it is approximate and deliberately
//! small. Some boxes overlap (e.g. the Vietnam/Thailand longitudes), so
//! the winner in an overlap is the earlier entry.

/// One rectangular country range.
struct CountryBox {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
    name: &'static str,
}

const COUNTRY_BOXES: &[CountryBox] = &[
    CountryBox { lat_min: 24.5, lat_max: 49.5, lon_min: -125.0, lon_max: -66.9, name: "United States" },
    CountryBox { lat_min: 41.7, lat_max: 83.1, lon_min: -141.0, lon_max: -52.6, name: "Canada" },
    CountryBox { lat_min: 14.5, lat_max: 32.7, lon_min: -118.4, lon_max: -86.7, name: "Mexico" },
    CountryBox { lat_min: 49.9, lat_max: 60.9, lon_min: -8.6, lon_max: 1.8, name: "United Kingdom" },
    CountryBox { lat_min: 41.3, lat_max: 51.1, lon_min: -5.2, lon_max: 9.6, name: "France" },
    CountryBox { lat_min: 47.3, lat_max: 55.1, lon_min: 5.9, lon_max: 15.0, name: "Germany" },
    CountryBox { lat_min: 36.0, lat_max: 43.8, lon_min: -9.3, lon_max: 3.3, name: "Spain" },
    CountryBox { lat_min: 36.6, lat_max: 47.1, lon_min: 6.6, lon_max: 18.5, name: "Italy" },
    CountryBox { lat_min: 24.0, lat_max: 45.5, lon_min: 122.9, lon_max: 145.8, name: "Japan" },
    CountryBox { lat_min: 33.1, lat_max: 38.6, lon_min: 125.9, lon_max: 129.6, name: "South Korea" },
    CountryBox { lat_min: 8.2, lat_max: 23.4, lon_min: 102.1, lon_max: 109.5, name: "Vietnam" },
    CountryBox { lat_min: 5.6, lat_max: 20.5, lon_min: 97.3, lon_max: 105.6, name: "Thailand" },
    CountryBox { lat_min: 8.1, lat_max: 35.5, lon_min: 68.1, lon_max: 97.4, name: "India" },
    CountryBox { lat_min: 18.2, lat_max: 53.5, lon_min: 73.5, lon_max: 134.8, name: "China" },
    CountryBox { lat_min: -43.6, lat_max: -10.7, lon_min: 113.3, lon_max: 153.6, name: "Australia" },
    CountryBox { lat_min: -33.7, lat_max: 5.3, lon_min: -73.9, lon_max: -34.8, name: "Brazil" },
];

/// Country name for the given coordinates, first matching box wins.
pub fn country_for(latitude: f64, longitude: f64) -> Option<&'static str> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }
    COUNTRY_BOXES
        .iter()
        .find(|b| {
            latitude >= b.lat_min
                && latitude <= b.lat_max
                && longitude >= b.lon_min
                && longitude <= b.lon_max
        })
        .map(|b| b.name)
}
