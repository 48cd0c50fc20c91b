use std::fs::File;
use std::path::{Path, PathBuf};

use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata as ExifMetadata;
use little_exif::rational::uR64;
use thiserror::Error;

use crate::core::formats;
use crate::models::{ExifTagSet, Rational, RawValue, TagGroup};

#[derive(Debug, Error)]
pub enum ExifReadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct ExifReader;

impl ExifReader {
    /// Reads the raw EXIF tags of `path`.
    ///
    /// Returns `Ok(None)` when the image carries no EXIF block. A block whose
    /// tags are all ones the interpreter ignores yields an empty set. A missing
    /// or unreadable file is an error.
    pub fn read(path: &Path) -> Result<Option<ExifTagSet>, ExifReadError> {
        // Opened only to surface missing/unreadable files; dropped before parsing.
        File::open(path).map_err(|source| ExifReadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let format = formats::detect_format(path);
        if !format.may_carry_exif() {
            log::debug!("{} container has no EXIF support: {}", format.as_str(), path.display());
            return Ok(None);
        }

        let exif = match ExifMetadata::new_from_path(path) {
            Ok(exif) => exif,
            Err(err) => {
                log::debug!("no EXIF block in {}: {err}", path.display());
                return Ok(None);
            }
        };

        let (tag_set, parsed) = Self::collect(&exif);
        if parsed == 0 {
            log::debug!("EXIF block in {} is empty", path.display());
            return Ok(None);
        }

        log::info!(
            "read {parsed} EXIF tag(s) from {}, {} used",
            path.display(),
            tag_set.tag_count()
        );
        Ok(Some(tag_set))
    }

    /// Keeps the tags the interpreter reads; also returns how many tags the block held.
    fn collect(exif: &ExifMetadata) -> (ExifTagSet, usize) {
        let mut tag_set = ExifTagSet::new();
        let mut parsed = 0;

        for tag in exif {
            parsed += 1;
            if let Some((group, value)) = convert_tag(tag) {
                tag_set.insert(group, tag.as_u16(), value);
            }
        }

        (tag_set, parsed)
    }
}

fn convert_tag(tag: &ExifTag) -> Option<(TagGroup, RawValue)> {
    let converted = match tag {
        ExifTag::Make(s) | ExifTag::Model(s) | ExifTag::ModifyDate(s) => {
            (TagGroup::Image, ascii(s))
        }
        ExifTag::GPSLatitudeRef(s) | ExifTag::GPSLongitudeRef(s) => (TagGroup::Gps, ascii(s)),
        ExifTag::GPSLatitude(v) | ExifTag::GPSLongitude(v) => (TagGroup::Gps, rationals(v)),
        _ => return None,
    };

    Some(converted)
}

fn ascii(s: &str) -> RawValue {
    RawValue::Ascii(s.trim_end_matches('\0').as_bytes().to_vec())
}

fn rationals(values: &[uR64]) -> RawValue {
    RawValue::Rationals(
        values
            .iter()
            .map(|r| Rational::new(r.nominator, r.denominator))
            .collect(),
    )
}
