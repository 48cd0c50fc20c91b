mod report;
mod tag;

pub use report::{GpsCoordinate, InterpretedMetadata, Prediction};
pub use tag::{tag_ids, ExifTagSet, Rational, RawValue, TagGroup, TagMap};
