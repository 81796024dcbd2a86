//! Publish time conversion.
//!
//! The form edits wall-clock time in the browser's zone (`YYYY-MM-DDTHH:MM`,
//! the `datetime-local` input format); the webhook expects UTC
//! (`YYYY-MM-DDTHH:MM:SSZ`). Every function is generic over the zone so the
//! browser passes `chrono::Local` and tests pass fixed offsets.

use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::error::ScheduleError;
use crate::payload::{Channel, PublishingOptions, Visibility};

/// `datetime-local` input format.
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Same as [`INPUT_FORMAT`] with seconds (browsers may emit these).
const INPUT_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// UTC wire format.
pub const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Render a datetime in input form, in its own zone.
pub fn to_input_local<Tz>(datetime: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    datetime.format(INPUT_FORMAT).to_string()
}

/// Parse input form into a naive wall time.
pub fn parse_input_local(input: &str) -> Result<NaiveDateTime, ScheduleError> {
    let input = input.trim();
    NaiveDateTime::parse_from_str(input, INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(input, INPUT_FORMAT_SECONDS))
        .map_err(|_| ScheduleError::InvalidLocalTime(input.to_string()))
}

/// Interpret input form as wall time in `tz`.
///
/// Ambiguous wall times (DST fold) resolve to the earliest instant.
pub fn local_input_to_utc<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<DateTime<Utc>, ScheduleError> {
    let naive = parse_input_local(input)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ScheduleError::NonexistentLocalTime(input.trim().to_string()))
}

/// Convert input form in `tz` to the UTC wire string.
pub fn local_input_to_utc_iso<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<String, ScheduleError> {
    Ok(local_input_to_utc(input, tz)?.format(UTC_FORMAT).to_string())
}

/// Convert an RFC 3339 timestamp (or naked input form) into input form in `tz`.
pub fn iso_to_input_local<Tz>(iso: &str, tz: &Tz) -> Result<String, ScheduleError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let iso = iso.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(iso) {
        return Ok(to_input_local(&parsed.with_timezone(tz)));
    }
    match parse_input_local(iso) {
        Ok(naive) => Ok(naive.format(INPUT_FORMAT).to_string()),
        Err(_) => Err(ScheduleError::InvalidTimestamp(iso.to_string())),
    }
}

/// Check that the input lies strictly after `now`.
pub fn is_schedule_in_future<Tz: TimeZone>(input: &str, now: DateTime<Utc>, tz: &Tz) -> bool {
    local_input_to_utc(input, tz).is_ok_and(|at| at > now)
}

/// Build publishing options from form state.
///
/// `scheduledTime` is only set for scheduled visibility with a convertible,
/// non-empty input.
pub fn publishing_options<Tz: TimeZone>(
    channel: Channel,
    visibility: Visibility,
    scheduled_local: &str,
    tz: &Tz,
) -> PublishingOptions {
    let scheduled_time = match visibility {
        Visibility::Schedule if !scheduled_local.trim().is_empty() => {
            local_input_to_utc_iso(scheduled_local, tz).ok()
        }
        _ => None,
    };

    PublishingOptions {
        channel,
        visibility,
        scheduled_time,
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
    }

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_local_to_utc_iso() {
        assert_eq!(
            local_input_to_utc_iso("2025-01-10T05:30", &ist()).unwrap(),
            "2025-01-10T00:00:00Z"
        );
        assert_eq!(
            local_input_to_utc_iso("2025-01-10T02:15", &ist()).unwrap(),
            "2025-01-09T20:45:00Z"
        );
        assert_eq!(
            local_input_to_utc_iso("2025-01-10T05:30:15", &ist()).unwrap(),
            "2025-01-10T00:00:15Z"
        );
        assert_eq!(local_input_to_utc_iso("2025-06-01T12:00", &Utc).unwrap(), "2025-06-01T12:00:00Z");
    }

    #[test]
    fn test_negative_offset() {
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            local_input_to_utc_iso("2024-12-31T22:00", &est).unwrap(),
            "2025-01-01T03:00:00Z"
        );
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(
            local_input_to_utc_iso("tomorrow", &ist()),
            Err(ScheduleError::InvalidLocalTime("tomorrow".to_string()))
        );
        assert!(local_input_to_utc_iso("2025-13-01T00:00", &ist()).is_err());
        assert!(local_input_to_utc_iso("", &ist()).is_err());
    }

    #[test]
    fn test_iso_to_input_local() {
        assert_eq!(iso_to_input_local("2025-01-10T00:00:00Z", &ist()).unwrap(), "2025-01-10T05:30");
        assert_eq!(
            iso_to_input_local("2025-01-10T00:00:00.000+01:00", &ist()).unwrap(),
            "2025-01-10T04:30"
        );
        assert_eq!(iso_to_input_local("2025-01-10T08:45", &ist()).unwrap(), "2025-01-10T08:45");
        assert_eq!(
            iso_to_input_local("garbage", &ist()),
            Err(ScheduleError::InvalidTimestamp("garbage".to_string()))
        );
    }

    #[test]
    fn test_round_trip_through_utc() {
        let input = "2025-03-01T18:05";
        let iso = local_input_to_utc_iso(input, &ist()).unwrap();
        assert_eq!(iso_to_input_local(&iso, &ist()).unwrap(), input);
    }

    #[test]
    fn test_to_input_local() {
        let dt = ist().with_ymd_and_hms(2025, 2, 3, 4, 5, 59).unwrap();
        assert_eq!(to_input_local(&dt), "2025-02-03T04:05");
    }

    #[test]
    fn test_is_schedule_in_future() {
        let now = utc("2025-01-10T00:00:00Z");
        assert!(is_schedule_in_future("2025-01-10T05:31", now, &ist()));
        assert!(!is_schedule_in_future("2025-01-10T05:30", now, &ist()));
        assert!(!is_schedule_in_future("2025-01-09T23:00", now, &ist()));
        assert!(!is_schedule_in_future("", now, &ist()));
    }

    #[test]
    fn test_publishing_options() {
        let opts = publishing_options(Channel::Katharas, Visibility::Schedule, "2025-01-10T05:30", &ist());
        assert_eq!(opts.channel, Channel::Katharas);
        assert_eq!(opts.scheduled_time.as_deref(), Some("2025-01-10T00:00:00Z"));

        let opts = publishing_options(Channel::Katharas, Visibility::Public, "2025-01-10T05:30", &ist());
        assert!(opts.scheduled_time.is_none());

        let opts = publishing_options(Channel::Katharas, Visibility::Schedule, "", &ist());
        assert!(opts.scheduled_time.is_none());
    }
}
