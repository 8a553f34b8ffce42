//! Bali areas and their cost profiles

use serde::Serialize;

use super::category::CategoryMultipliers;

/// Relative cost of living in one Bali area
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaProfile {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Overall price level against Ubud
    pub base_multiplier: f64,
    pub multipliers: CategoryMultipliers,
}

/// Bounding box in decimal degrees
struct Bounds {
    lat: (f64, f64),
    lng: (f64, f64),
}

impl Bounds {
    fn contains(&self, lat: f64, lng: f64) -> bool {
        lat > self.lat.0 && lat < self.lat.1 && lng > self.lng.0 && lng < self.lng.1
    }
}

const fn multipliers(
    housing: f64,
    food: f64,
    transportation: f64,
    utilities: f64,
    healthcare: f64,
    entertainment: f64,
) -> CategoryMultipliers {
    CategoryMultipliers {
        housing,
        food,
        transportation,
        utilities,
        healthcare,
        entertainment,
    }
}

static AREAS: [AreaProfile; 7] = [
    AreaProfile {
        slug: "ubud",
        name: "Ubud",
        description: "Cultural centre, quiet",
        base_multiplier: 1.0,
        multipliers: multipliers(0.9, 0.8, 1.1, 0.9, 0.8, 0.7),
    },
    AreaProfile {
        slug: "canggu",
        name: "Canggu",
        description: "Digital nomad hotspot, trendy",
        base_multiplier: 1.3,
        multipliers: multipliers(1.4, 1.3, 1.2, 1.1, 1.2, 1.5),
    },
    AreaProfile {
        slug: "seminyak",
        name: "Seminyak",
        description: "Upscale, high-end",
        base_multiplier: 1.5,
        multipliers: multipliers(1.8, 1.6, 1.3, 1.2, 1.4, 1.7),
    },
    AreaProfile {
        slug: "kuta",
        name: "Kuta",
        description: "Tourist area, lively",
        base_multiplier: 0.9,
        multipliers: multipliers(0.8, 0.9, 0.8, 0.8, 0.9, 1.0),
    },
    AreaProfile {
        slug: "sanur",
        name: "Sanur",
        description: "Family friendly, quiet",
        base_multiplier: 0.85,
        multipliers: multipliers(0.8, 0.8, 0.9, 0.8, 0.8, 0.7),
    },
    AreaProfile {
        slug: "nunggulan",
        name: "Nunggulan",
        description: "Rural, traditional",
        base_multiplier: 0.7,
        multipliers: multipliers(0.6, 0.7, 1.2, 0.7, 0.6, 0.5),
    },
    AreaProfile {
        slug: "pererenan",
        name: "Pererenan",
        description: "Up-and-coming",
        base_multiplier: 1.2,
        multipliers: multipliers(1.3, 1.2, 1.1, 1.0, 1.1, 1.3),
    },
];

/// Checked in order; the first box containing the point wins
const DETECTION_BOUNDS: [(&str, Bounds); 5] = [
    (
        "ubud",
        Bounds {
            lat: (-8.7, -8.5),
            lng: (115.2, 115.3),
        },
    ),
    (
        "canggu",
        Bounds {
            lat: (-8.68, -8.62),
            lng: (115.12, 115.15),
        },
    ),
    (
        "seminyak",
        Bounds {
            lat: (-8.68, -8.65),
            lng: (115.15, 115.18),
        },
    ),
    (
        "kuta",
        Bounds {
            lat: (-8.72, -8.67),
            lng: (115.16, 115.19),
        },
    ),
    (
        "sanur",
        Bounds {
            lat: (-8.68, -8.65),
            lng: (115.25, 115.28),
        },
    ),
];

/// Outcome of locating coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaDetection {
    pub area: &'static AreaProfile,
    /// False when no box matched and the default area was returned
    pub detected: bool,
}

impl AreaProfile {
    pub fn all() -> &'static [AreaProfile] {
        &AREAS
    }

    /// Case-insensitive lookup by slug
    pub fn find(slug: &str) -> Option<&'static AreaProfile> {
        let slug = slug.trim();
        AREAS.iter().find(|a| a.slug.eq_ignore_ascii_case(slug))
    }

    /// Area whose bounding box contains the point, Ubud otherwise
    pub fn detect(lat: f64, lng: f64) -> AreaDetection {
        let matched = DETECTION_BOUNDS
            .iter()
            .find(|(_, bounds)| bounds.contains(lat, lng))
            .and_then(|(slug, _)| Self::find(slug));

        match matched {
            Some(area) => AreaDetection {
                area,
                detected: true,
            },
            None => AreaDetection {
                area: Self::default_area(),
                detected: false,
            },
        }
    }

    /// Ubud, the first entry of the table
    fn default_area() -> &'static AreaProfile {
        &AREAS[0]
    }
}
