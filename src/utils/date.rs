// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Timezone-aware date helpers built on `jiff`.
//!
//! Every helper takes a timezone name: a preset key such as `ASIA_TOKYO`, or
//! any IANA name (`Europe/Berlin`). Civil inputs without an offset
//! (`2024-06-15`, `2024-06-15T09:30:00`) are interpreted in that timezone.

use anyhow::{Context, Result, bail};
use jiff::civil::{Date, DateTime, Weekday};
use jiff::tz::TimeZone;
use jiff::{Span, Timestamp, Unit, Zoned};

/// Timezone used when callers have no preference.
pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";

/// Named timezone presets (key, IANA name).
pub const TIMEZONES: &[(&str, &str)] = &[
    ("UTC", "UTC"),
    ("ASIA_HO_CHI_MINH", "Asia/Ho_Chi_Minh"),
    ("ASIA_TOKYO", "Asia/Tokyo"),
    ("AMERICA_NEW_YORK", "America/New_York"),
    ("AMERICA_LOS_ANGELES", "America/Los_Angeles"),
    ("EUROPE_LONDON", "Europe/London"),
];

/// Named output formats, rendered with strftime patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateFormat {
    Iso,
    IsoDateTime,
    IsoFull,
    DisplayDate,
    DisplayDateTime,
    DisplayTime,
    DisplayTime12h,
    FullDate,
    FullDateTime,
    ShortDate,
    ShortDateTime,
    JapaneseDate,
    JapaneseDateTime,
    JapaneseFullDate,
    JapaneseFullDateTime,
}

impl DateFormat {
    pub const ALL: [DateFormat; 15] = [
        DateFormat::Iso,
        DateFormat::IsoDateTime,
        DateFormat::IsoFull,
        DateFormat::DisplayDate,
        DateFormat::DisplayDateTime,
        DateFormat::DisplayTime,
        DateFormat::DisplayTime12h,
        DateFormat::FullDate,
        DateFormat::FullDateTime,
        DateFormat::ShortDate,
        DateFormat::ShortDateTime,
        DateFormat::JapaneseDate,
        DateFormat::JapaneseDateTime,
        DateFormat::JapaneseFullDate,
        DateFormat::JapaneseFullDateTime,
    ];

    /// Preset key, e.g. `DISPLAY_DATE`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Iso => "ISO",
            Self::IsoDateTime => "ISO_DATETIME",
            Self::IsoFull => "ISO_FULL",
            Self::DisplayDate => "DISPLAY_DATE",
            Self::DisplayDateTime => "DISPLAY_DATETIME",
            Self::DisplayTime => "DISPLAY_TIME",
            Self::DisplayTime12h => "DISPLAY_TIME_12H",
            Self::FullDate => "FULL_DATE",
            Self::FullDateTime => "FULL_DATETIME",
            Self::ShortDate => "SHORT_DATE",
            Self::ShortDateTime => "SHORT_DATETIME",
            Self::JapaneseDate => "JAPANESE_DATE",
            Self::JapaneseDateTime => "JAPANESE_DATETIME",
            Self::JapaneseFullDate => "JAPANESE_FULL_DATE",
            Self::JapaneseFullDateTime => "JAPANESE_FULL_DATETIME",
        }
    }

    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Iso => "%Y-%m-%d",
            Self::IsoDateTime => "%Y-%m-%dT%H:%M:%S",
            Self::IsoFull => "%Y-%m-%dT%H:%M:%S%.3f%:z",
            Self::DisplayDate => "%b %d, %Y",
            Self::DisplayDateTime => "%b %d, %Y %H:%M",
            Self::DisplayTime => "%H:%M",
            Self::DisplayTime12h => "%I:%M %p",
            Self::FullDate => "%A, %B %d, %Y",
            Self::FullDateTime => "%A, %B %d, %Y %H:%M",
            Self::ShortDate => "%m/%d/%Y",
            Self::ShortDateTime => "%m/%d/%Y %H:%M",
            Self::JapaneseDate => "%Y年%m月%d日",
            Self::JapaneseDateTime => "%Y年%m月%d日 %H:%M",
            Self::JapaneseFullDate => "%Y年%m月%d日 %A",
            Self::JapaneseFullDateTime => "%Y年%m月%d日 %A %H:%M",
        }
    }
}

impl AsRef<str> for DateFormat {
    fn as_ref(&self) -> &str {
        self.pattern()
    }
}

/// Resolve a preset key to its pattern; anything else is used as a strftime pattern.
pub fn format_pattern(format: &str) -> &str {
    DateFormat::ALL
        .iter()
        .find(|f| f.key() == format)
        .map(|f| f.pattern())
        .unwrap_or(format)
}

/// Resolve a preset key or IANA name to a timezone.
pub fn resolve_timezone(name: &str) -> Result<TimeZone> {
    let iana = TIMEZONES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, iana)| *iana)
        .unwrap_or(name);
    TimeZone::get(iana).with_context(|| format!("unknown timezone '{name}'"))
}

/// Anything a helper accepts as a point in time.
#[derive(Clone, Debug)]
pub enum DateInput {
    Timestamp(Timestamp),
    Zoned(Zoned),
    Text(String),
}

impl From<Timestamp> for DateInput {
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Zoned> for DateInput {
    fn from(value: Zoned) -> Self {
        Self::Zoned(value)
    }
}

impl From<&Zoned> for DateInput {
    fn from(value: &Zoned) -> Self {
        Self::Zoned(value.clone())
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl DateInput {
    /// Materialize in `tz`.
    fn resolve(&self, tz: &TimeZone) -> Result<Zoned> {
        match self {
            Self::Timestamp(ts) => Ok(ts.to_zoned(tz.clone())),
            Self::Zoned(z) => Ok(z.with_time_zone(tz.clone())),
            Self::Text(text) => parse_text(text.trim(), tz),
        }
    }
}

fn parse_text(text: &str, tz: &TimeZone) -> Result<Zoned> {
    if let Ok(ts) = text.parse::<Timestamp>() {
        return Ok(ts.to_zoned(tz.clone()));
    }
    if let Ok(zoned) = text.parse::<Zoned>() {
        return Ok(zoned.with_time_zone(tz.clone()));
    }
    if let Ok(dt) = text.parse::<DateTime>() {
        return dt.to_zoned(tz.clone()).context("datetime does not exist in timezone");
    }
    if let Ok(date) = text.parse::<Date>() {
        return date.to_zoned(tz.clone()).context("date does not exist in timezone");
    }
    bail!("unrecognized date input '{text}'")
}

fn zoned(input: impl Into<DateInput>, tz: &str) -> Result<Zoned> {
    let tz = resolve_timezone(tz)?;
    input.into().resolve(&tz)
}

/// Current instant in `tz`.
pub fn now(tz: &str) -> Result<Zoned> {
    Ok(Timestamp::now().to_zoned(resolve_timezone(tz)?))
}

/// Build a zoned datetime from an input, or the current instant when `None`.
pub fn create_date(input: Option<DateInput>, tz: &str) -> Result<Zoned> {
    match input {
        Some(input) => zoned(input, tz),
        None => now(tz),
    }
}

/// Format `input` in `tz` with a preset key, [`DateFormat`], or strftime pattern.
pub fn format_date(
    input: impl Into<DateInput>,
    format: impl AsRef<str>,
    tz: &str,
) -> Result<String> {
    let zdt = zoned(input, tz)?;
    format_zoned(&zdt, format.as_ref())
}

/// Format an already-resolved datetime.
pub fn format_zoned(zdt: &Zoned, format: &str) -> Result<String> {
    let pattern = format_pattern(format);
    jiff::fmt::strtime::format(pattern, zdt)
        .with_context(|| format!("failed to format date with '{pattern}'"))
}

/// Parse `text`, optionally with a strftime pattern; civil results are placed in `tz`.
pub fn parse_date(text: &str, format: Option<&str>, tz: &str) -> Result<Zoned> {
    let zone = resolve_timezone(tz)?;
    let Some(format) = format else {
        return parse_text(text.trim(), &zone);
    };
    let pattern = format_pattern(format);
    if let Ok(dt) = DateTime::strptime(pattern, text) {
        return dt.to_zoned(zone).context("datetime does not exist in timezone");
    }
    let date = Date::strptime(pattern, text)
        .with_context(|| format!("'{text}' does not match '{pattern}'"))?;
    date.to_zoned(zone).context("date does not exist in timezone")
}

/// Same instant viewed in another timezone.
///
/// `from` only matters for civil inputs, which are interpreted there first.
pub fn convert_timezone(
    input: impl Into<DateInput>,
    to: &str,
    from: Option<&str>,
) -> Result<Zoned> {
    let source = zoned(input, from.unwrap_or(DEFAULT_TIMEZONE))?;
    Ok(source.with_time_zone(resolve_timezone(to)?))
}

/// Human relative time of `input` seen from `base` (now when `None`): "2 hours ago", "in 3 days".
pub fn relative_time(
    input: impl Into<DateInput>,
    base: Option<DateInput>,
    tz: &str,
) -> Result<String> {
    let date = zoned(input, tz)?;
    let base = create_date(base, tz)?;
    let seconds = date.timestamp().duration_since(base.timestamp()).as_secs();
    Ok(with_direction(seconds))
}

/// Inverse direction of [`relative_time`]: how `base` reads from `input`.
pub fn time_until(
    input: impl Into<DateInput>,
    base: Option<DateInput>,
    tz: &str,
) -> Result<String> {
    let date = zoned(input, tz)?;
    let base = create_date(base, tz)?;
    let seconds = base.timestamp().duration_since(date.timestamp()).as_secs();
    Ok(with_direction(seconds))
}

fn with_direction(seconds: i64) -> String {
    let phrase = humanize_seconds(seconds.unsigned_abs());
    if seconds < 0 {
        format!("{phrase} ago")
    } else {
        format!("in {phrase}")
    }
}

/// Human length of a duration in seconds ("a few seconds", "3 days", "a year").
pub fn humanize_duration(seconds: i64) -> String {
    humanize_seconds(seconds.unsigned_abs())
}

fn humanize_seconds(seconds: u64) -> String {
    let s = seconds as f64;
    let minutes = (s / 60.0).round();
    let hours = (s / 3_600.0).round();
    let days = (s / 86_400.0).round();
    let months = (s / (86_400.0 * 30.436_875)).round();
    let years = (s / (86_400.0 * 365.242_5)).round();

    if seconds < 45 {
        "a few seconds".to_string()
    } else if seconds < 90 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{minutes} minutes")
    } else if minutes < 90.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{hours} hours")
    } else if hours < 36.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{days} days")
    } else if days < 46.0 {
        "a month".to_string()
    } else if months < 11.0 {
        format!("{months} months")
    } else if months < 18.0 {
        "a year".to_string()
    } else {
        format!("{} years", years.max(2.0))
    }
}

/// Whether `input` falls on the same calendar day as `reference` in `tz`.
pub fn is_today_at(
    input: impl Into<DateInput>,
    reference: impl Into<DateInput>,
    tz: &str,
) -> Result<bool> {
    Ok(zoned(input, tz)?.date() == zoned(reference, tz)?.date())
}

pub fn is_yesterday_at(
    input: impl Into<DateInput>,
    reference: impl Into<DateInput>,
    tz: &str,
) -> Result<bool> {
    let yesterday = zoned(reference, tz)?.date().yesterday()?;
    Ok(zoned(input, tz)?.date() == yesterday)
}

pub fn is_tomorrow_at(
    input: impl Into<DateInput>,
    reference: impl Into<DateInput>,
    tz: &str,
) -> Result<bool> {
    let tomorrow = zoned(reference, tz)?.date().tomorrow()?;
    Ok(zoned(input, tz)?.date() == tomorrow)
}

pub fn is_today(input: impl Into<DateInput>, tz: &str) -> Result<bool> {
    is_today_at(input, now(tz)?, tz)
}

pub fn is_yesterday(input: impl Into<DateInput>, tz: &str) -> Result<bool> {
    is_yesterday_at(input, now(tz)?, tz)
}

pub fn is_tomorrow(input: impl Into<DateInput>, tz: &str) -> Result<bool> {
    is_tomorrow_at(input, now(tz)?, tz)
}

/// Strictly before `base` (now when `None`).
pub fn is_past(input: impl Into<DateInput>, base: Option<DateInput>, tz: &str) -> Result<bool> {
    Ok(zoned(input, tz)?.timestamp() < create_date(base, tz)?.timestamp())
}

/// Strictly after `base` (now when `None`).
pub fn is_future(input: impl Into<DateInput>, base: Option<DateInput>, tz: &str) -> Result<bool> {
    Ok(zoned(input, tz)?.timestamp() > create_date(base, tz)?.timestamp())
}

pub fn is_same_day(a: impl Into<DateInput>, b: impl Into<DateInput>, tz: &str) -> Result<bool> {
    is_today_at(a, b, tz)
}

/// Calendar unit for [`start_of`] / [`end_of`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CalendarUnit {
    #[default]
    Day,
    /// Weeks start on Sunday.
    Week,
    Month,
    Year,
}

/// First instant of the unit containing `input`.
pub fn start_of(input: impl Into<DateInput>, unit: CalendarUnit, tz: &str) -> Result<Zoned> {
    let zdt = zoned(input, tz)?;
    start_of_zoned(&zdt, unit)
}

fn start_of_zoned(zdt: &Zoned, unit: CalendarUnit) -> Result<Zoned> {
    let date = zdt.date();
    let first = match unit {
        CalendarUnit::Day => date,
        CalendarUnit::Week => {
            let back = i64::from(date.weekday().to_sunday_zero_offset());
            date.checked_sub(Span::new().days(back))?
        }
        CalendarUnit::Month => date.first_of_month(),
        CalendarUnit::Year => date.first_of_year(),
    };
    Ok(first.to_zoned(zdt.time_zone().clone())?)
}

/// Last instant (nanosecond precision) of the unit containing `input`.
pub fn end_of(input: impl Into<DateInput>, unit: CalendarUnit, tz: &str) -> Result<Zoned> {
    let start = start_of_zoned(&zoned(input, tz)?, unit)?;
    let step = match unit {
        CalendarUnit::Day => Span::new().days(1),
        CalendarUnit::Week => Span::new().weeks(1),
        CalendarUnit::Month => Span::new().months(1),
        CalendarUnit::Year => Span::new().years(1),
    };
    let next = start.checked_add(step)?;
    Ok(next.checked_sub(Span::new().nanoseconds(1))?)
}

/// Unit for arithmetic helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

fn span_of(amount: i64, unit: TimeUnit) -> Result<Span> {
    let span = match unit {
        TimeUnit::Millisecond => Span::new().try_milliseconds(amount)?,
        TimeUnit::Second => Span::new().try_seconds(amount)?,
        TimeUnit::Minute => Span::new().try_minutes(amount)?,
        TimeUnit::Hour => Span::new().try_hours(amount)?,
        TimeUnit::Day => Span::new().try_days(amount)?,
        TimeUnit::Week => Span::new().try_weeks(amount)?,
        TimeUnit::Month => Span::new().try_months(amount)?,
        TimeUnit::Year => Span::new().try_years(amount)?,
    };
    Ok(span)
}

pub fn add_time(
    input: impl Into<DateInput>,
    amount: i64,
    unit: TimeUnit,
    tz: &str,
) -> Result<Zoned> {
    Ok(zoned(input, tz)?.checked_add(span_of(amount, unit)?)?)
}

pub fn subtract_time(
    input: impl Into<DateInput>,
    amount: i64,
    unit: TimeUnit,
    tz: &str,
) -> Result<Zoned> {
    Ok(zoned(input, tz)?.checked_sub(span_of(amount, unit)?)?)
}

/// `a - b` in whole `unit`s, truncated toward zero.
///
/// Calendar units (day and larger) follow the civil calendar of `tz`.
pub fn difference(
    a: impl Into<DateInput>,
    b: impl Into<DateInput>,
    unit: TimeUnit,
    tz: &str,
) -> Result<i64> {
    let a = zoned(a, tz)?;
    let b = zoned(b, tz)?;
    let elapsed = a.timestamp().duration_since(b.timestamp());
    let value = match unit {
        TimeUnit::Millisecond => i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
        TimeUnit::Second => elapsed.as_secs(),
        TimeUnit::Minute => elapsed.as_secs() / 60,
        TimeUnit::Hour => elapsed.as_secs() / 3_600,
        TimeUnit::Day => i64::from(a.since((Unit::Day, &b))?.get_days()),
        TimeUnit::Week => i64::from(a.since((Unit::Week, &b))?.get_weeks()),
        TimeUnit::Month => i64::from(a.since((Unit::Month, &b))?.get_months()),
        TimeUnit::Year => i64::from(a.since((Unit::Year, &b))?.get_years()),
    };
    Ok(value)
}

/// Whole years between `birthdate` and `reference` (now when `None`).
pub fn age(birthdate: impl Into<DateInput>, reference: Option<DateInput>, tz: &str) -> Result<i64> {
    let birth = zoned(birthdate, tz)?;
    let reference = create_date(reference, tz)?;
    Ok(i64::from(reference.since((Unit::Year, &birth))?.get_years()))
}

/// Monday–Friday days from `start` to `end`, both inclusive.
pub fn business_days(
    start: impl Into<DateInput>,
    end: impl Into<DateInput>,
    tz: &str,
) -> Result<u32> {
    let mut current = zoned(start, tz)?.date();
    let last = zoned(end, tz)?.date();
    let mut days = 0;
    while current <= last {
        if !is_weekend_day(current.weekday()) {
            days += 1;
        }
        current = current.tomorrow()?;
    }
    Ok(days)
}

fn is_weekend_day(day: Weekday) -> bool {
    matches!(day, Weekday::Saturday | Weekday::Sunday)
}

pub fn is_weekend(input: impl Into<DateInput>, tz: &str) -> Result<bool> {
    Ok(is_weekend_day(zoned(input, tz)?.date().weekday()))
}

pub fn is_weekday(input: impl Into<DateInput>, tz: &str) -> Result<bool> {
    Ok(!is_weekend(input, tz)?)
}

/// UTC offset of `tz` at `input`, in minutes.
pub fn timezone_offset_minutes(input: impl Into<DateInput>, tz: &str) -> Result<i32> {
    Ok(zoned(input, tz)?.offset().seconds() / 60)
}

/// Abbreviation of `tz` at `input`, e.g. `JST` or `BST`.
pub fn timezone_abbreviation(input: impl Into<DateInput>, tz: &str) -> Result<String> {
    format_zoned(&zoned(input, tz)?, "%Z")
}
