use crate::core::geocoder::{self, ReverseGeocoder};
use crate::core::gps;
use crate::models::{tag_ids, ExifTagSet, InterpretedMetadata, TagGroup};

pub const NO_EXIF_KEY: &str = "Error";
pub const NO_EXIF_MESSAGE: &str = "No EXIF data found in this image.";
pub const UNKNOWN_CAMERA: &str = "Unknown camera";
pub const UNKNOWN_DATE: &str = "Date taken unknown";
pub const GPS_NOT_FOUND: &str = "GPS information not found";

pub const CAMERA_KEY: &str = "Camera";
pub const DATE_TAKEN_KEY: &str = "Date Taken";
pub const GPS_LOCATION_KEY: &str = "GPS Location";

/// Turns raw EXIF tags into the display mapping, resolving GPS through `geocoder`.
pub struct MetadataInterpreter<'a> {
    geocoder: &'a dyn ReverseGeocoder,
}

impl<'a> MetadataInterpreter<'a> {
    pub fn new(geocoder: &'a dyn ReverseGeocoder) -> Self {
        Self { geocoder }
    }

    /// `None` means the image has no EXIF block at all. A block without any of
    /// the displayed tags still gets the three sentinel entries.
    pub fn interpret(&self, tags: Option<&ExifTagSet>) -> InterpretedMetadata {
        let mut interpreted = InterpretedMetadata::new();

        let Some(tags) = tags else {
            interpreted.insert(NO_EXIF_KEY, NO_EXIF_MESSAGE);
            return interpreted;
        };

        interpreted.insert(CAMERA_KEY, camera_description(tags));

        let date = text_tag(tags, TagGroup::Image, tag_ids::DATE_TIME);
        interpreted.insert(
            DATE_TAKEN_KEY,
            if date.is_empty() {
                String::from(UNKNOWN_DATE)
            } else {
                date
            },
        );

        interpreted.insert(GPS_LOCATION_KEY, self.gps_description(tags));
        interpreted
    }

    fn gps_description(&self, tags: &ExifTagSet) -> String {
        let Some(gps_group) = tags.group(TagGroup::Gps) else {
            return String::from(GPS_NOT_FOUND);
        };

        match gps::convert(gps_group) {
            Ok(coordinate) => {
                let lookup = self.geocoder.lookup(coordinate);
                if let Err(err) = &lookup {
                    log::warn!("reverse geocoding failed: {err}");
                }
                format!(
                    "{coordinate}\nLocation: {}",
                    geocoder::describe_lookup(&lookup)
                )
            }
            Err(err) => {
                log::debug!("GPS conversion failed: {err}");
                String::from(GPS_NOT_FOUND)
            }
        }
    }
}

/// "Make Model", or the unknown-camera sentinel when either part is empty.
pub fn camera_description(tags: &ExifTagSet) -> String {
    let make = text_tag(tags, TagGroup::Image, tag_ids::MAKE);
    let model = text_tag(tags, TagGroup::Image, tag_ids::MODEL);

    if make.is_empty() || model.is_empty() {
        String::from(UNKNOWN_CAMERA)
    } else {
        format!("{make} {model}")
    }
}

/// UTF-8 text of a tag with undecodable bytes dropped; empty when absent.
pub fn text_tag(tags: &ExifTagSet, group: TagGroup, tag: u16) -> String {
    tags.get(group, tag)
        .and_then(|value| value.as_bytes())
        .map(decode_ignoring_invalid)
        .unwrap_or_default()
}

fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut decoded = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        decoded.push_str(chunk.valid());
    }
    decoded.trim_end_matches('\0').to_string()
}
