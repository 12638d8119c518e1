//! Shipped registry for the San Diego County coast, north to south.
//!
//! Each section lists its named breaks as anchors. The shoreline between two
//! anchors is filled with evenly spaced unnamed points, no more than
//! [`POINT_SPACING_DEG`] apart (about 150 m).
//!
//! Bias multipliers and location factors are empirical tuning values. Point
//! breaks and reefs get height boosts; the Coronado strand sits in the shadow
//! of Point Loma and is treated like a bay.

use super::{BiasRecord, CoastlinePoint, SectionRegistry, SectionRegistryBuilder, lat_lng_bounds};

const LA_JOLLA: &str = "la-jolla";
const SAN_DIEGO_BAY: &str = "san-diego-bay";

/// Largest gap left between neighbouring points of a section, in degrees.
pub(super) const POINT_SPACING_DEG: f64 = 0.0015;

pub(super) fn registry() -> SectionRegistry {
    let builder = SectionRegistryBuilder::default()
        .tide_station(LA_JOLLA, "9410230")
        .tide_station(SAN_DIEGO_BAY, "9410170")
        .default_tide_station(LA_JOLLA);
    let builder = sections(builder);
    let builder = tuning(builder);
    let builder = query_stations(builder);
    let result = builder
        .exclusion_zone(
            "oceanside-harbor-mouth",
            lat_lng_bounds(33.1995, -117.4010, 33.2035, -117.3930),
        )
        .exclusion_zone(
            "mission-bay-entrance",
            lat_lng_bounds(32.7535, -117.2600, 32.7605, -117.2450),
        )
        .build();
    match result {
        Ok(registry) => registry,
        Err(err) => {
            // The tables below are static; a failure here is a programming error
            // caught by the registry tests.
            log::error!("shipped San Diego registry is invalid: {err}");
            debug_assert!(false, "shipped San Diego registry is invalid: {err}");
            SectionRegistry {
                points: Vec::new(),
                sections: Vec::new(),
                bias: std::collections::BTreeMap::new(),
                location_factors: std::collections::BTreeMap::new(),
                tide_stations: Vec::new(),
                default_tide_station: LA_JOLLA.to_owned(),
                query_stations: Vec::new(),
                exclusion_zones: Vec::new(),
            }
        }
    }
}

fn sections(builder: SectionRegistryBuilder) -> SectionRegistryBuilder {
    builder
        .section(
            "oceanside",
            lat_lng_bounds(33.155, -117.52, 33.215, -117.34),
            LA_JOLLA,
            coast([
                CoastlinePoint::named(33.2045, -117.3920, "Harbor Beach"),
                CoastlinePoint::named(33.2015, -117.3960, "Harbor Mouth"),
                CoastlinePoint::new(33.1958, -117.3888),
                CoastlinePoint::named(33.1935, -117.3865, "Oceanside Pier"),
                CoastlinePoint::new(33.1880, -117.3812),
                CoastlinePoint::named(33.1800, -117.3740, "Wisconsin"),
                CoastlinePoint::named(33.1735, -117.3680, "Buccaneer"),
                CoastlinePoint::named(33.1640, -117.3590, "South Oceanside"),
            ]),
        )
        .section(
            "carlsbad",
            lat_lng_bounds(33.080, -117.47, 33.165, -117.29),
            LA_JOLLA,
            coast([
                CoastlinePoint::named(33.1556, -117.3500, "Tamarack"),
                CoastlinePoint::new(33.1480, -117.3470),
                CoastlinePoint::named(33.1390, -117.3410, "Warm Water Jetty"),
                CoastlinePoint::named(33.1270, -117.3340, "Carlsbad State Beach"),
                CoastlinePoint::named(33.1230, -117.3310, "Terramar"),
                CoastlinePoint::new(33.1150, -117.3260),
                CoastlinePoint::named(33.1000, -117.3190, "South Carlsbad"),
                CoastlinePoint::named(33.0870, -117.3125, "Ponto"),
            ]),
        )
        .section(
            "leucadia-encinitas",
            lat_lng_bounds(33.028, -117.43, 33.082, -117.27),
            LA_JOLLA,
            coast([
                CoastlinePoint::named(33.0760, -117.3095, "Grandview"),
                CoastlinePoint::named(33.0690, -117.3060, "Beacons"),
                CoastlinePoint::named(33.0560, -117.3000, "Stone Steps"),
                CoastlinePoint::named(33.0465, -117.2980, "Moonlight Beach"),
                CoastlinePoint::named(33.0420, -117.2972, "D Street"),
                CoastlinePoint::named(33.0345, -117.2955, "Swami's"),
            ]),
        )
        .section(
            "cardiff-solana",
            lat_lng_bounds(32.975, -117.41, 33.030, -117.26),
            LA_JOLLA,
            coast([
                CoastlinePoint::named(33.0225, -117.2875, "Pipes"),
                CoastlinePoint::named(33.0140, -117.2830, "Cardiff Reef"),
                CoastlinePoint::named(33.0000, -117.2780, "Seaside"),
                CoastlinePoint::named(32.9930, -117.2745, "Fletcher Cove"),
                CoastlinePoint::new(32.9815, -117.2710),
            ]),
        )
        .section(
            "del-mar-torrey",
            lat_lng_bounds(32.882, -117.39, 32.977, -117.24),
            LA_JOLLA,
            coast([
                CoastlinePoint::named(32.9745, -117.2700, "Dog Beach"),
                CoastlinePoint::named(32.9700, -117.2690, "Del Mar 25th Street"),
                CoastlinePoint::named(32.9580, -117.2660, "Del Mar 15th Street"),
                CoastlinePoint::named(32.9330, -117.2610, "Torrey Pines State Beach"),
                CoastlinePoint::new(32.9050, -117.2550),
                CoastlinePoint::named(32.8890, -117.2535, "Black's Beach"),
            ]),
        )
        .section(
            "la-jolla",
            lat_lng_bounds(32.810, -117.40, 32.872, -117.24),
            LA_JOLLA,
            coast([
                CoastlinePoint::named(32.8665, -117.2560, "Scripps Pier"),
                CoastlinePoint::new(32.8560, -117.2640),
                CoastlinePoint::named(32.8500, -117.2700, "La Jolla Cove"),
                CoastlinePoint::named(32.8415, -117.2805, "Hospital Point"),
                CoastlinePoint::named(32.8300, -117.2815, "Windansea"),
                CoastlinePoint::named(32.8220, -117.2775, "Big Rock"),
                CoastlinePoint::named(32.8155, -117.2730, "Bird Rock"),
            ]),
        )
        .section(
            "pacific-mission",
            lat_lng_bounds(32.752, -117.38, 32.812, -117.23),
            LA_JOLLA,
            coast([
                CoastlinePoint::named(32.8050, -117.2620, "Tourmaline"),
                CoastlinePoint::named(32.7960, -117.2575, "Pacific Beach Pier"),
                CoastlinePoint::new(32.7840, -117.2540),
                CoastlinePoint::named(32.7710, -117.2530, "Mission Beach"),
                CoastlinePoint::named(32.7640, -117.2530, "South Mission Jetty"),
                CoastlinePoint::named(32.7575, -117.2515, "Mission Bay Channel"),
            ]),
        )
        .section(
            "ocean-beach-point-loma",
            lat_lng_bounds(32.665, -117.38, 32.755, -117.22),
            SAN_DIEGO_BAY,
            coast([
                CoastlinePoint::named(32.7500, -117.2530, "Ocean Beach Jetty"),
                CoastlinePoint::named(32.7485, -117.2555, "Ocean Beach Pier"),
                CoastlinePoint::named(32.7400, -117.2550, "Sunset Cliffs"),
                CoastlinePoint::new(32.7250, -117.2570),
                CoastlinePoint::new(32.7150, -117.2560),
                CoastlinePoint::named(32.6850, -117.2470, "Point Loma"),
            ]),
        )
        .section(
            "coronado-imperial",
            lat_lng_bounds(32.540, -117.30, 32.690, -117.10),
            SAN_DIEGO_BAY,
            coast([
                CoastlinePoint::named(32.6830, -117.1810, "Coronado"),
                CoastlinePoint::new(32.6680, -117.1700),
                CoastlinePoint::named(32.6380, -117.1440, "Silver Strand"),
                CoastlinePoint::named(32.5795, -117.1340, "Imperial Beach Pier"),
                CoastlinePoint::named(32.5535, -117.1280, "Tijuana Sloughs"),
            ]),
        )
}

/// Densify a run of anchors into a continuous line of points.
fn coast(anchors: impl IntoIterator<Item = CoastlinePoint>) -> Vec<CoastlinePoint> {
    let mut anchors = anchors.into_iter().peekable();
    let mut points = Vec::new();
    while let Some(anchor) = anchors.next() {
        let from = anchor.location;
        points.push(anchor);
        let Some(to) = anchors.peek().map(|next| next.location) else {
            continue;
        };
        let gap = (to.x - from.x).hypot(to.y - from.y);
        let steps = (gap / POINT_SPACING_DEG).ceil().max(1.0) as u32;
        points.extend((1..steps).map(|step| {
            let t = f64::from(step) / f64::from(steps);
            CoastlinePoint::new(from.y + (to.y - from.y) * t, from.x + (to.x - from.x) * t)
        }));
    }
    points
}

fn tuning(builder: SectionRegistryBuilder) -> SectionRegistryBuilder {
    builder
        .bias("oceanside", BiasRecord::new(1.05, 1.0, 0.0, 0.0))
        .bias("carlsbad", BiasRecord::new(0.95, 1.0, 0.0, 0.0))
        .bias("leucadia-encinitas", BiasRecord::new(1.15, 1.05, -5.0, -1.0))
        .bias("cardiff-solana", BiasRecord::new(1.05, 1.0, 0.0, 0.0))
        .bias("del-mar-torrey", BiasRecord::new(1.10, 1.0, 0.0, 0.0))
        .bias(
            "la-jolla",
            BiasRecord::new(1.20, 1.05, -10.0, -2.0).with_temp_offset(-1.0),
        )
        .bias("pacific-mission", BiasRecord::new(1.0, 1.0, 0.0, 1.0))
        .bias("ocean-beach-point-loma", BiasRecord::new(1.10, 1.0, -5.0, 0.0))
        .bias(
            "coronado-imperial",
            BiasRecord::new(0.70, 0.90, 10.0, 0.0).with_temp_offset(2.0),
        )
        .location_factor("oceanside", 0.95)
        .location_factor("carlsbad", 0.85)
        .location_factor("leucadia-encinitas", 1.20)
        .location_factor("cardiff-solana", 1.05)
        .location_factor("del-mar-torrey", 1.10)
        .location_factor("la-jolla", 1.30)
        .location_factor("pacific-mission", 0.90)
        .location_factor("ocean-beach-point-loma", 1.00)
        .location_factor("coronado-imperial", 0.60)
}

fn query_stations(builder: SectionRegistryBuilder) -> SectionRegistryBuilder {
    [
        (33.20, -117.45),
        (33.15, -117.40),
        (33.10, -117.37),
        (33.05, -117.35),
        (33.00, -117.33),
        (32.95, -117.31),
        (32.90, -117.30),
        (32.85, -117.31),
        (32.80, -117.30),
        (32.75, -117.30),
        (32.70, -117.30),
        (32.65, -117.25),
        (32.60, -117.20),
        (32.55, -117.18),
        (33.10, -117.50),
        (32.90, -117.45),
        (32.70, -117.40),
        (32.55, -117.30),
    ]
    .into_iter()
    .fold(builder, |acc, (lat, lng)| acc.query_station(lat, lng))
}
