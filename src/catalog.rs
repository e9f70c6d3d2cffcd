//! Seismic zone metadata.
//!
//! Static table keyed by PGA zone label. Only `cost_multiplier` feeds the cost
//! model; the descriptive lists are passed through for display.

use serde::Serialize;

/// Risk attributes of a seismic zone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneInfo {
    pub zone: &'static str,
    pub risk_level: &'static str,
    /// Peak ground acceleration band, in g
    pub pga_range: &'static str,
    pub description: &'static str,
    pub conditions: &'static [&'static str],
    pub vulnerability: &'static [&'static str],
    pub recommendations: &'static [&'static str],
    pub cost_multiplier: f64,
}

static ZONES: [ZoneInfo; 5] = [
    ZoneInfo {
        zone: "Zone 1",
        risk_level: "Low",
        pga_range: "0.05g - 0.08g",
        description: "Minor seismic activity; damaging shaking is rare.",
        conditions: &[
            "Infrequent low-magnitude earthquakes",
            "Stable geological formations",
        ],
        vulnerability: &["Unreinforced masonry may crack under rare strong events"],
        recommendations: &[
            "Standard building code compliance",
            "Basic lateral bracing for masonry walls",
        ],
        cost_multiplier: 1.00,
    },
    ZoneInfo {
        zone: "Zone 2A",
        risk_level: "Moderate",
        pga_range: "0.08g - 0.16g",
        description: "Moderate shaking expected over a structure's lifetime.",
        conditions: &[
            "Occasional moderate earthquakes",
            "Distant fault systems",
        ],
        vulnerability: &[
            "Non-engineered structures prone to cracking",
            "Parapets and chimneys at risk",
        ],
        recommendations: &[
            "Reinforced concrete bands at plinth and lintel level",
            "Anchor non-structural elements",
        ],
        cost_multiplier: 1.10,
    },
    ZoneInfo {
        zone: "Zone 2B",
        risk_level: "Moderate to High",
        pga_range: "0.16g - 0.24g",
        description: "Damaging earthquakes are plausible within a building's design life.",
        conditions: &[
            "Active faults within regional distance",
            "Amplification on soft alluvial soils",
        ],
        vulnerability: &[
            "Soft-storey buildings",
            "Poorly confined masonry",
        ],
        recommendations: &[
            "Seismic detailing of beam-column joints",
            "Site-specific soil investigation",
            "Confined masonry or RC frame construction",
        ],
        cost_multiplier: 1.25,
    },
    ZoneInfo {
        zone: "Zone 3",
        risk_level: "High",
        pga_range: "0.24g - 0.32g",
        description: "Strong shaking likely; structural damage common without seismic design.",
        conditions: &[
            "Proximity to major active faults",
            "History of damaging earthquakes",
        ],
        vulnerability: &[
            "Collapse risk for unreinforced masonry",
            "Liquefaction on saturated sandy soils",
        ],
        recommendations: &[
            "Full seismic design by a structural engineer",
            "Ductile reinforcement detailing",
            "Shear walls or braced frames",
        ],
        cost_multiplier: 1.50,
    },
    ZoneInfo {
        zone: "Zone 4",
        risk_level: "Very High",
        pga_range: "> 0.32g",
        description: "Severe shaking expected; the highest seismic hazard category.",
        conditions: &[
            "Located on or near plate boundary faults",
            "Frequent strong earthquakes",
            "Landslide-prone slopes during shaking",
        ],
        vulnerability: &[
            "Widespread collapse of non-engineered buildings",
            "Ground rupture near fault traces",
            "Liquefaction and lateral spreading",
        ],
        recommendations: &[
            "Base isolation or energy dissipation for critical structures",
            "Special moment-resisting frames",
            "Geotechnical hazard assessment before design",
        ],
        cost_multiplier: 1.80,
    },
];

/// All zones, ascending by risk
pub fn all_zones() -> &'static [ZoneInfo] {
    &ZONES
}

/// Look up a zone by label.
///
/// Accepts the canonical label (`"Zone 2A"`) as well as loose forms such as
/// `"2a"` or `"ZONE 4"`.
pub fn zone_info(label: &str) -> Option<&'static ZoneInfo> {
    if let Some(info) = ZONES.iter().find(|z| z.zone == label) {
        return Some(info);
    }

    let wanted = zone_code(label);
    ZONES.iter().find(|z| zone_code(z.zone) == wanted)
}

fn zone_code(label: &str) -> String {
    let trimmed = label.trim();
    let code = match trimmed.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("zone") => &trimmed[4..],
        _ => trimmed,
    };
    code.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_4_multiplier() {
        assert_eq!(zone_info("Zone 4").unwrap().cost_multiplier, 1.80);
        assert_eq!(zone_info("Zone 1").unwrap().cost_multiplier, 1.00);
    }

    #[test]
    fn test_multipliers_increase_with_risk() {
        let labels = ["Zone 1", "Zone 2A", "Zone 2B", "Zone 3", "Zone 4"];
        let multipliers: Vec<f64> = labels
            .iter()
            .map(|l| zone_info(l).unwrap().cost_multiplier)
            .collect();

        for pair in multipliers.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(multipliers.iter().all(|m| *m >= 1.0));
    }

    #[test]
    fn test_loose_labels() {
        assert_eq!(zone_info("2a").unwrap().zone, "Zone 2A");
        assert_eq!(zone_info(" ZONE 2b ").unwrap().zone, "Zone 2B");
        assert_eq!(zone_info("4").unwrap().zone, "Zone 4");
    }

    #[test]
    fn test_unknown_label() {
        assert!(zone_info("Zone 5").is_none());
        assert!(zone_info("").is_none());
        assert!(zone_info("Zonal").is_none());
    }

    #[test]
    fn test_table_order() {
        let zones: Vec<&str> = all_zones().iter().map(|z| z.zone).collect();
        assert_eq!(zones, vec!["Zone 1", "Zone 2A", "Zone 2B", "Zone 3", "Zone 4"]);
    }
}
