use std::cell::RefCell;

use photo_insight::core::geocoder::{GeocodeError, GeocodeOutcome, ReverseGeocoder};
use photo_insight::core::metadata::MetadataInterpreter;
use photo_insight::models::{tag_ids, ExifTagSet, GpsCoordinate, Rational, RawValue, TagGroup};

enum Reply {
    Address(&'static str),
    NotFound,
    BadJson,
}

struct StubGeocoder {
    reply: Reply,
    calls: RefCell<Vec<GpsCoordinate>>,
}

impl StubGeocoder {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl ReverseGeocoder for StubGeocoder {
    fn lookup(&self, coordinate: GpsCoordinate) -> Result<GeocodeOutcome, GeocodeError> {
        self.calls.borrow_mut().push(coordinate);
        match self.reply {
            Reply::Address(address) => Ok(GeocodeOutcome::Address(address.to_string())),
            Reply::NotFound => Ok(GeocodeOutcome::NotFound),
            Reply::BadJson => Err(serde_json::from_str::<u8>("nope").unwrap_err().into()),
        }
    }
}

fn camera(make: &str, model: &str) -> ExifTagSet {
    ExifTagSet::new()
        .with(TagGroup::Image, tag_ids::MAKE, RawValue::ascii(make))
        .with(TagGroup::Image, tag_ids::MODEL, RawValue::ascii(model))
}

fn with_gps(tags: ExifTagSet) -> ExifTagSet {
    let dms = |d, m| RawValue::Rationals(vec![Rational::new(d, 1), Rational::new(m, 1), Rational::new(0, 1)]);
    tags.with(TagGroup::Gps, tag_ids::GPS_LATITUDE, dms(40, 30))
        .with(TagGroup::Gps, tag_ids::GPS_LATITUDE_REF, RawValue::ascii("N"))
        .with(TagGroup::Gps, tag_ids::GPS_LONGITUDE, dms(10, 0))
        .with(TagGroup::Gps, tag_ids::GPS_LONGITUDE_REF, RawValue::ascii("W"))
}

#[test]
fn missing_exif_collapses_to_single_error_entry() {
    let geocoder = StubGeocoder::new(Reply::NotFound);
    let interpreter = MetadataInterpreter::new(&geocoder);

    let interpreted = interpreter.interpret(None);
    assert_eq!(interpreted.len(), 1);
    assert_eq!(
        interpreted.get("Error"),
        Some("No EXIF data found in this image.")
    );
    assert!(geocoder.calls.borrow().is_empty());
}

#[test]
fn block_without_displayed_tags_gets_sentinels() {
    let geocoder = StubGeocoder::new(Reply::NotFound);
    let interpreted = MetadataInterpreter::new(&geocoder).interpret(Some(&ExifTagSet::new()));

    let entries: Vec<(&str, &str)> = interpreted.iter().collect();
    assert_eq!(
        entries,
        [
            ("Camera", "Unknown camera"),
            ("Date Taken", "Date taken unknown"),
            ("GPS Location", "GPS information not found"),
        ]
    );
    assert!(geocoder.calls.borrow().is_empty());
}

#[test]
fn camera_joins_make_and_model() {
    let geocoder = StubGeocoder::new(Reply::NotFound);
    let interpreted = MetadataInterpreter::new(&geocoder).interpret(Some(&camera("Canon", "EOS 80D")));

    assert_eq!(interpreted.get("Camera"), Some("Canon EOS 80D"));
    let keys: Vec<&str> = interpreted.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ["Camera", "Date Taken", "GPS Location"]);
}

#[test]
fn empty_make_or_model_means_unknown_camera() {
    let geocoder = StubGeocoder::new(Reply::NotFound);
    let interpreter = MetadataInterpreter::new(&geocoder);

    assert_eq!(
        interpreter.interpret(Some(&camera("", ""))).get("Camera"),
        Some("Unknown camera")
    );
    assert_eq!(
        interpreter.interpret(Some(&camera("Canon", ""))).get("Camera"),
        Some("Unknown camera")
    );
}

#[test]
fn invalid_utf8_bytes_are_dropped_from_camera_name() {
    let tags = ExifTagSet::new()
        .with(TagGroup::Image, tag_ids::MAKE, RawValue::Ascii(b"Nik\xffon\0".to_vec()))
        .with(TagGroup::Image, tag_ids::MODEL, RawValue::ascii("D750"));
    let geocoder = StubGeocoder::new(Reply::NotFound);

    let interpreted = MetadataInterpreter::new(&geocoder).interpret(Some(&tags));
    assert_eq!(interpreted.get("Camera"), Some("Nikon D750"));
}

#[test]
fn date_taken_is_raw_datetime_or_sentinel() {
    let geocoder = StubGeocoder::new(Reply::NotFound);
    let interpreter = MetadataInterpreter::new(&geocoder);

    let dated = camera("Canon", "EOS 80D").with(
        TagGroup::Image,
        tag_ids::DATE_TIME,
        RawValue::ascii("2023:06:01 12:34:56"),
    );
    assert_eq!(
        interpreter.interpret(Some(&dated)).get("Date Taken"),
        Some("2023:06:01 12:34:56")
    );
    assert_eq!(
        interpreter.interpret(Some(&camera("Canon", "EOS 80D"))).get("Date Taken"),
        Some("Date taken unknown")
    );
}

#[test]
fn gps_location_includes_coordinates_and_address() {
    let geocoder = StubGeocoder::new(Reply::Address("1 Infinite Loop"));
    let interpreted =
        MetadataInterpreter::new(&geocoder).interpret(Some(&with_gps(camera("Canon", "EOS 80D"))));

    assert_eq!(
        interpreted.get("GPS Location"),
        Some("Latitude: 40.5, Longitude: -10.0\nLocation: 1 Infinite Loop")
    );
    assert_eq!(
        geocoder.calls.borrow().as_slice(),
        [GpsCoordinate::new(40.5, -10.0)]
    );
}

#[test]
fn geocoder_outcomes_render_inline() {
    let tags = with_gps(camera("Canon", "EOS 80D"));

    let not_found = StubGeocoder::new(Reply::NotFound);
    let interpreted = MetadataInterpreter::new(&not_found).interpret(Some(&tags));
    assert!(interpreted
        .get("GPS Location")
        .unwrap()
        .ends_with("\nLocation: Location not found"));

    let failing = StubGeocoder::new(Reply::BadJson);
    let interpreted = MetadataInterpreter::new(&failing).interpret(Some(&tags));
    assert!(interpreted
        .get("GPS Location")
        .unwrap()
        .contains("\nLocation: Error occurred: "));
}

#[test]
fn incomplete_gps_group_is_not_found() {
    let tags = camera("Canon", "EOS 80D").with(
        TagGroup::Gps,
        tag_ids::GPS_LATITUDE_REF,
        RawValue::ascii("N"),
    );
    let geocoder = StubGeocoder::new(Reply::Address("unused"));

    let interpreted = MetadataInterpreter::new(&geocoder).interpret(Some(&tags));
    assert_eq!(
        interpreted.get("GPS Location"),
        Some("GPS information not found")
    );
    assert!(geocoder.calls.borrow().is_empty());
}

#[test]
fn no_gps_group_is_not_found() {
    let geocoder = StubGeocoder::new(Reply::Address("unused"));
    let interpreted = MetadataInterpreter::new(&geocoder).interpret(Some(&camera("Canon", "EOS 80D")));
    assert_eq!(
        interpreted.get("GPS Location"),
        Some("GPS information not found")
    );
}
