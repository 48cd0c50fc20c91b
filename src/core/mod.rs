pub mod classifier;
pub mod exif_reader;
pub mod formats;
pub mod geocoder;
pub mod gps;
pub mod labels;
pub mod metadata;
pub mod report;
