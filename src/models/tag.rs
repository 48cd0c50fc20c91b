use std::collections::BTreeMap;

/// IFD a raw tag was read from.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TagGroup {
    Image,
    Gps,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// `None` when the denominator is zero.
    pub fn to_f64(self) -> Option<f64> {
        if self.denominator == 0 {
            return None;
        }
        Some(self.numerator as f64 / self.denominator as f64)
    }
}

/// Tag value as stored in the EXIF stream, before any interpretation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RawValue {
    Ascii(Vec<u8>),
    Rationals(Vec<Rational>),
}

impl RawValue {
    pub fn ascii(value: impl Into<String>) -> Self {
        Self::Ascii(value.into().into_bytes())
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Ascii(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_rationals(&self) -> Option<&[Rational]> {
        match self {
            Self::Rationals(values) => Some(values),
            _ => None,
        }
    }
}

/// Numeric tag ids used by the interpreter.
pub mod tag_ids {
    pub const MAKE: u16 = 0x010f;
    pub const MODEL: u16 = 0x0110;
    pub const DATE_TIME: u16 = 0x0132;

    pub const GPS_LATITUDE_REF: u16 = 0x0001;
    pub const GPS_LATITUDE: u16 = 0x0002;
    pub const GPS_LONGITUDE_REF: u16 = 0x0003;
    pub const GPS_LONGITUDE: u16 = 0x0004;
}

pub type TagMap = BTreeMap<u16, RawValue>;

/// Raw EXIF tags of one image, grouped by IFD.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExifTagSet {
    groups: BTreeMap<TagGroup, TagMap>,
}

impl ExifTagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: TagGroup, tag: u16, value: RawValue) {
        self.groups.entry(group).or_default().insert(tag, value);
    }

    pub fn with(mut self, group: TagGroup, tag: u16, value: RawValue) -> Self {
        self.insert(group, tag, value);
        self
    }

    pub fn group(&self, group: TagGroup) -> Option<&TagMap> {
        self.groups.get(&group).filter(|tags| !tags.is_empty())
    }

    pub fn get(&self, group: TagGroup, tag: u16) -> Option<&RawValue> {
        self.groups.get(&group)?.get(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(|tags| tags.is_empty())
    }

    pub fn tag_count(&self) -> usize {
        self.groups.values().map(|tags| tags.len()).sum()
    }
}
