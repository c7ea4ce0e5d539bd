//! Filter engine: dropdown constraints plus free-text search
use super::types::{FilterSelection, SatelliteRecord};

/// Check the dropdown constraints, in order: country, orbit, object type.
///
/// An unset constraint matches every record. A record without an orbit code
/// never matches a set orbit constraint.
pub fn matches_filters(record: &SatelliteRecord, filters: &FilterSelection) -> bool {
    if let Some(ref country) = filters.country {
        if record.country_code != *country {
            return false;
        }
    }

    if let Some(ref orbit) = filters.orbit {
        if record.orbit_code.as_deref() != Some(orbit.as_str()) {
            return false;
        }
    }

    if let Some(ref object_type) = filters.object_type {
        if record.object_type != *object_type {
            return false;
        }
    }

    true
}

/// Check the search term against catalog ID and name.
///
/// The term is lower-cased; the name is compared lower-cased while the
/// catalog ID is compared as-is (IDs are numeric in practice).
pub fn matches_search(record: &SatelliteRecord, search: &str) -> bool {
    search.is_empty() || contains_term(record, &search.to_lowercase())
}

fn contains_term(record: &SatelliteRecord, term: &str) -> bool {
    record.norad_cat_id.as_str().contains(term) || record.name.to_lowercase().contains(term)
}

/// Derive the filtered collection.
///
/// All constraints are combined with AND. The relative order of `records`
/// is preserved.
pub fn filter_records<'a>(
    records: &'a [SatelliteRecord],
    filters: &FilterSelection,
    search: &str,
) -> Vec<&'a SatelliteRecord> {
    let term = search.to_lowercase();

    records
        .iter()
        .filter(|record| matches_filters(record, filters))
        .filter(|record| term.is_empty() || contains_term(record, &term))
        .collect()
}
