//! RFC 3339 (de)serialization for `OffsetDateTime` fields.
//!
//! Deserialization also accepts a bare `YYYY-MM-DD` date, read as midnight UTC.

use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    Time,
};

pub fn serialize<S: Serializer>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    let formatted = value.format(&Rfc3339).map_err(S::Error::custom)?;
    serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OffsetDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(D::Error::custom)
}

pub fn parse(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
    if let Ok(instant) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(instant);
    }
    let date = Date::parse(raw, format_description!("[year]-[month]-[day]"))?;
    Ok(date.with_time(Time::MIDNIGHT).assume_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn accepts_full_timestamps() {
        let parsed = parse("2025-07-18T10:30:00.000Z").unwrap();
        assert_eq!(parsed, datetime!(2025-07-18 10:30:00 UTC));
    }

    #[test]
    fn accepts_plain_dates() {
        let parsed = parse("2025-07-18").unwrap();
        assert_eq!(parsed, datetime!(2025-07-18 00:00:00 UTC));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("next tuesday").is_err());
    }
}
