// Static gazetteer for the Swadesh Darshan project map.
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Hand-curated state/UT centroids. Keys must stay in exact sync with the
/// spellings used in SWADESH_DARSHAN_SUMMARY's STATE_UT column: lookups are
/// case- and diacritic-sensitive, with no fuzzy matching.
static STATE_COORDS: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    HashMap::from([
        ("Andhra Pradesh", (15.9129, 79.7400)),
        ("Arunachal Pradesh", (28.2180, 94.7278)),
        ("Assam", (26.2006, 92.9376)),
        ("Bihar", (25.0961, 85.3131)),
        ("Chhattisgarh", (21.2787, 81.8661)),
        ("Goa", (15.2993, 74.1240)),
        ("Gujarat", (22.2587, 71.1924)),
        ("Haryana", (29.0588, 76.0856)),
        ("Himachal Pradesh", (31.1048, 77.1734)),
        ("Jammu & Kashmir and Ladakh", (33.7782, 76.5762)),
        ("Jharkhand", (23.6102, 85.2799)),
        ("Kerala", (10.8505, 76.2711)),
        ("Madhya Pradesh", (22.9734, 78.6569)),
        ("Maharashtra", (19.7515, 75.7139)),
        ("Manipur", (24.6637, 93.9063)),
        ("Meghalaya", (25.4670, 91.3662)),
        ("Mizoram", (23.1645, 92.9376)),
        ("Nagaland", (26.1584, 94.5624)),
        ("Odisha", (20.9517, 85.0985)),
        ("Punjab", (31.1471, 75.3412)),
        ("Rajasthan", (26.9124, 75.7873)),
        ("Sikkim", (27.5330, 88.5122)),
        ("Tamil Nadu", (11.1271, 78.6569)),
        ("Telangana", (18.1124, 79.0193)),
        ("Tripura", (23.9408, 91.9882)),
        ("Uttar Pradesh", (26.8467, 80.9462)),
        ("Uttarakhand", (30.0668, 79.0193)),
        ("West Bengal", (22.9868, 87.8550)),
        ("Andaman & Nicobar Islands", (11.7401, 92.6586)),
        ("Puducherry", (11.9416, 79.8083)),
        ("Wayside Amenities Uttar Pradesh and Bihar", (25.5, 82.0)),
    ])
});

/// Exact-match coordinate lookup for a state/UT name.
pub fn coordinates(state_ut: &str) -> Option<(f64, f64)> {
    STATE_COORDS.get(state_ut).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_state_resolves() {
        assert_eq!(coordinates("Goa"), Some((15.2993, 74.1240)));
        assert_eq!(coordinates("Puducherry"), Some((11.9416, 79.8083)));
    }

    #[test]
    fn lookup_is_exact_match_only() {
        assert_eq!(coordinates("goa"), None);
        assert_eq!(coordinates(" Goa"), None);
        assert_eq!(coordinates("Delhi"), None);
    }

    #[test]
    fn gazetteer_covers_all_known_entries() {
        assert_eq!(STATE_COORDS.len(), 31);
    }
}
