use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::FormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

use crate::domain::posts::POSTED_AT_FORMAT;

const NAIVE_SPACE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]");
const NAIVE_T_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
const NAIVE_MINUTES_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute][optional [Z]]");
const OFFSET_MINUTES_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][offset_hour sign:mandatory]:[offset_minute]"
);
const DATE_ONLY_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse an API timestamp. Offset-less values and bare dates are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }
    if let Ok(parsed) = OffsetDateTime::parse(raw, OFFSET_MINUTES_FORMAT) {
        return Some(parsed);
    }
    if let Some(parsed) = [NAIVE_SPACE_FORMAT, NAIVE_T_FORMAT, NAIVE_MINUTES_FORMAT]
        .into_iter()
        .find_map(|format| PrimitiveDateTime::parse(raw, format).ok())
    {
        return Some(parsed.assume_utc());
    }
    Date::parse(raw, DATE_ONLY_FORMAT)
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// Shift `time` into `tz`, keeping the instant.
pub fn localized_datetime(time: OffsetDateTime, tz: Tz) -> OffsetDateTime {
    let utc = time.to_offset(UtcOffset::UTC);
    let Some(datetime_utc) = DateTime::<Utc>::from_timestamp(utc.unix_timestamp(), 0) else {
        return utc;
    };
    let offset_seconds = tz
        .offset_from_utc_datetime(&datetime_utc.naive_utc())
        .fix()
        .local_minus_utc();
    match UtcOffset::from_whole_seconds(offset_seconds) {
        Ok(offset) => utc.to_offset(offset),
        Err(_) => utc,
    }
}

/// Human-readable post timestamp; unparsable input is returned unchanged.
pub fn format_posted_at(raw: &str, tz: Tz) -> String {
    parse_timestamp(raw)
        .and_then(|parsed| localized_datetime(parsed, tz).format(POSTED_AT_FORMAT).ok())
        .unwrap_or_else(|| raw.to_string())
}
