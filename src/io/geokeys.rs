//! GeoTIFF GeoKeyDirectory parsing.
//!
//! The directory is a flat array of shorts: a 4 entry header
//! `[version, revision, minor revision, key count]` followed by one
//! `[key id, tag location, count, value]` entry per key.
//! Only keys with their value stored inline (tag location 0) are resolved.

/// `GTModelTypeGeoKey`
pub const MODEL_TYPE: u32 = 1024;
/// `GeographicTypeGeoKey`
pub const GEOGRAPHIC_TYPE: u32 = 2048;
/// `ProjectedCSTypeGeoKey`
pub const PROJECTED_CS_TYPE: u32 = 3072;
/// Code marking a user-defined coordinate system.
pub const USER_DEFINED: u32 = 32767;

const MODEL_PROJECTED: u32 = 1;
const MODEL_GEOGRAPHIC: u32 = 2;
const MODEL_GEOCENTRIC: u32 = 3;

/// Look up an inline key value.
pub fn geokey(directory: &[u32], key: u32) -> Option<u32> {
    let count = *directory.get(3)? as usize;
    directory
        .get(4..)?
        .chunks_exact(4)
        .take(count)
        .find(|e| e[0] == key && e[1] == 0)
        .map(|e| e[3])
}

/// Describe the coordinate system declared by a GeoKeyDirectory.
///
/// A projected CRS code wins over a geographic one, both are given as `EPSG:<code>`.
/// User-defined systems fall back to the model type.
///
/// ```
/// # use geostl::io::geokeys::projection_from_geokeys;
/// let dir = [1, 1, 0, 2, 1024, 0, 1, 2, 2048, 0, 1, 4326];
/// assert_eq!(projection_from_geokeys(&dir), Some("EPSG:4326".to_string()));
/// ```
pub fn projection_from_geokeys(directory: &[u32]) -> Option<String> {
    let code = |key| geokey(directory, key).filter(|&c| c != 0 && c != USER_DEFINED);

    if let Some(c) = code(PROJECTED_CS_TYPE).or_else(|| code(GEOGRAPHIC_TYPE)) {
        return Some(format!("EPSG:{}", c));
    }

    let desc = match geokey(directory, MODEL_TYPE)? {
        MODEL_PROJECTED => "user-defined projected",
        MODEL_GEOGRAPHIC => "user-defined geographic",
        MODEL_GEOCENTRIC => "user-defined geocentric",
        _ => return None,
    };
    Some(desc.to_string())
}
