use thiserror::Error;

use crate::models::{tag_ids, GpsCoordinate, Rational, RawValue, TagMap};

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum GpsError {
    #[error("missing GPS tag {0}")]
    MissingTag(&'static str),

    #[error("malformed GPS tag {0}")]
    Malformed(&'static str),
}

/// Degrees, minutes and seconds as three EXIF rationals, folded into decimal degrees.
pub fn dms_to_decimal(dms: &[Rational]) -> Option<f64> {
    let [degrees, minutes, seconds] = dms.get(..3)? else {
        return None;
    };

    Some(degrees.to_f64()? + minutes.to_f64()? / 60.0 + seconds.to_f64()? / 3600.0)
}

/// Converts the GPS IFD of a tag set into signed decimal degrees.
///
/// Latitude is negative unless its reference is `N`; longitude is negative
/// unless its reference is `E`.
pub fn convert(gps: &TagMap) -> Result<GpsCoordinate, GpsError> {
    let mut latitude = degrees(gps, tag_ids::GPS_LATITUDE, "GPSLatitude")?;
    let latitude_ref = reference(gps, tag_ids::GPS_LATITUDE_REF, "GPSLatitudeRef")?;
    let mut longitude = degrees(gps, tag_ids::GPS_LONGITUDE, "GPSLongitude")?;
    let longitude_ref = reference(gps, tag_ids::GPS_LONGITUDE_REF, "GPSLongitudeRef")?;

    if latitude_ref != "N" {
        latitude = -latitude;
    }
    if longitude_ref != "E" {
        longitude = -longitude;
    }

    Ok(GpsCoordinate::new(latitude, longitude))
}

fn degrees(gps: &TagMap, tag: u16, name: &'static str) -> Result<f64, GpsError> {
    let value = gps.get(&tag).ok_or(GpsError::MissingTag(name))?;
    value
        .as_rationals()
        .and_then(dms_to_decimal)
        .ok_or(GpsError::Malformed(name))
}

fn reference(gps: &TagMap, tag: u16, name: &'static str) -> Result<String, GpsError> {
    let value: &RawValue = gps.get(&tag).ok_or(GpsError::MissingTag(name))?;
    let bytes = value.as_bytes().ok_or(GpsError::Malformed(name))?;
    Ok(String::from_utf8_lossy(bytes)
        .trim_end_matches('\0')
        .to_string())
}
