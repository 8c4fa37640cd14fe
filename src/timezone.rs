//! São Paulo civil time helpers used for display and day-bucketed reporting.
//!
//! All conversions go through the tz database shipped with `chrono-tz`, so
//! historical daylight saving periods (UTC-2) resolve correctly for past dates.

use chrono::{DateTime, Datelike, LocalResult, NaiveTime, Offset, TimeDelta, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use rocket::serde::Serialize;
use schemars::JsonSchema;
use thiserror::Error;

pub const TIMEZONE: Tz = chrono_tz::America::Sao_Paulo;

/// Wall-clock fields of an instant as seen in São Paulo. Never persisted.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub struct LocalTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

pub fn to_brazil_time(instant: DateTime<Utc>) -> LocalTime {
    let local = instant.with_timezone(&TIMEZONE);
    LocalTime {
        year: local.year(),
        month: local.month(),
        day: local.day(),
        hour: local.hour(),
        minute: local.minute(),
        second: local.second(),
    }
}

pub fn get_local_hours(instant: DateTime<Utc>) -> u32 {
    to_brazil_time(instant).hour
}

/// Signed whole-hour offset between local civil time and UTC at `instant`.
pub fn utc_offset_hours(instant: DateTime<Utc>) -> i32 {
    instant.with_timezone(&TIMEZONE).offset().fix().local_minus_utc() / 3600
}

/// Turns a raw `local - utc` hour difference into a signed offset: the value is
/// wrapped into [0, 24) and anything past 12 is read as negative, so an
/// apparent +21h becomes -3h.
pub fn normalize_hour_offset(raw: i32) -> i32 {
    let wrapped = raw.rem_euclid(24);
    if wrapped > 12 { wrapped - 24 } else { wrapped }
}

/// UTC instant of 00:00:00 local time on the São Paulo calendar date of `instant`.
///
/// On the historical DST start days local midnight never happened (clocks
/// jumped from 00:00 to 01:00); the day then starts at the transition itself.
pub fn start_of_day_in_brazil(instant: DateTime<Utc>) -> DateTime<Utc> {
    let local_date = instant.with_timezone(&TIMEZONE).date_naive();
    let midnight = local_date.and_time(NaiveTime::MIN);

    match TIMEZONE.from_local_datetime(&midnight) {
        LocalResult::Single(start) => start.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let offset_before = TIMEZONE.offset_from_utc_datetime(&(midnight - TimeDelta::hours(12))).fix();
            let transition = midnight - TimeDelta::seconds(i64::from(offset_before.local_minus_utc()));
            Utc.from_utc_datetime(&transition)
        }
    }
}

pub fn start_of_today_in_brazil() -> DateTime<Utc> {
    start_of_day_in_brazil(Utc::now())
}

// ── pt-BR formatting ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Full,
    Long,
    Medium,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Numeric,
    TwoDigit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextWidth {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFormat {
    Numeric,
    TwoDigit,
    Long,
    Short,
}

/// Formatting controls. Either the two styles or the individual fields may be
/// used, not both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub date_style: Option<Style>,
    pub time_style: Option<Style>,
    pub weekday: Option<TextWidth>,
    pub year: Option<Width>,
    pub month: Option<MonthFormat>,
    pub day: Option<Width>,
    pub hour: Option<Width>,
    pub minute: Option<Width>,
    pub second: Option<Width>,
}

impl FormatOptions {
    pub fn date(style: Style) -> Self {
        Self {
            date_style: Some(style),
            ..Self::default()
        }
    }

    pub fn time(style: Style) -> Self {
        Self {
            time_style: Some(style),
            ..Self::default()
        }
    }

    pub fn date_time(date: Style, time: Style) -> Self {
        Self {
            date_style: Some(date),
            time_style: Some(time),
            ..Self::default()
        }
    }

    fn has_style(&self) -> bool {
        self.date_style.is_some() || self.time_style.is_some()
    }

    fn has_date_fields(&self) -> bool {
        self.weekday.is_some() || self.year.is_some() || self.month.is_some() || self.day.is_some()
    }

    fn has_time_fields(&self) -> bool {
        self.hour.is_some() || self.minute.is_some() || self.second.is_some()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("date_style/time_style cannot be combined with individual date or time fields")]
    StyleWithFields,
}

const MONTHS: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro", "outubro", "novembro", "dezembro",
];
const MONTHS_SHORT: [&str; 12] = ["jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez."];
const WEEKDAYS: [&str; 7] = ["domingo", "segunda-feira", "terça-feira", "quarta-feira", "quinta-feira", "sexta-feira", "sábado"];
const WEEKDAYS_SHORT: [&str; 7] = ["dom.", "seg.", "ter.", "qua.", "qui.", "sex.", "sáb."];

/// Formats `instant` in São Paulo time following pt-BR conventions. With no
/// options the result is the short date, e.g. `14/10/2026`.
pub fn format_in_brazil_time(instant: DateTime<Utc>, options: &FormatOptions) -> Result<String, FormatError> {
    let fields_requested = options.has_date_fields() || options.has_time_fields();
    if options.has_style() && fields_requested {
        return Err(FormatError::StyleWithFields);
    }

    let local = instant.with_timezone(&TIMEZONE);
    let offset = utc_offset_hours(instant);

    if options.has_style() {
        return Ok(format_styles(&local, offset, options.date_style, options.time_style));
    }
    if !fields_requested {
        return Ok(format_date_style(&local, Style::Short));
    }

    let date = format_date_fields(&local, options);
    let time = format_time_fields(&local, options);
    Ok(match (date.is_empty(), time.is_empty()) {
        (false, false) => format!("{}, {}", date, time),
        (false, true) => date,
        _ => time,
    })
}

fn format_styles(local: &DateTime<Tz>, offset: i32, date_style: Option<Style>, time_style: Option<Style>) -> String {
    match (date_style, time_style) {
        (Some(date), Some(time)) => {
            let separator = if matches!(date, Style::Full | Style::Long) { " às " } else { ", " };
            format!("{}{}{}", format_date_style(local, date), separator, format_time_style(local, offset, time))
        }
        (Some(date), None) => format_date_style(local, date),
        (None, Some(time)) => format_time_style(local, offset, time),
        (None, None) => format_date_style(local, Style::Short),
    }
}

fn format_date_style(local: &DateTime<Tz>, style: Style) -> String {
    let month = local.month0() as usize;
    match style {
        Style::Full => format!(
            "{}, {} de {} de {}",
            WEEKDAYS[local.weekday().num_days_from_sunday() as usize],
            local.day(),
            MONTHS[month],
            local.year()
        ),
        Style::Long => format!("{} de {} de {}", local.day(), MONTHS[month], local.year()),
        Style::Medium => format!("{} de {} de {}", local.day(), MONTHS_SHORT[month], local.year()),
        Style::Short => format!("{:02}/{:02}/{}", local.day(), local.month(), local.year()),
    }
}

fn format_time_style(local: &DateTime<Tz>, offset: i32, style: Style) -> String {
    let (short_name, long_name) = zone_names(offset);
    match style {
        Style::Full => format!("{} {}", local.format("%H:%M:%S"), long_name),
        Style::Long => format!("{} {}", local.format("%H:%M:%S"), short_name),
        Style::Medium => local.format("%H:%M:%S").to_string(),
        Style::Short => local.format("%H:%M").to_string(),
    }
}

fn zone_names(offset: i32) -> (String, String) {
    match offset {
        -3 => ("BRT".to_string(), "Horário Padrão de Brasília".to_string()),
        -2 => ("BRST".to_string(), "Horário de Verão de Brasília".to_string()),
        other => {
            let name = format!("GMT{:+03}:00", other);
            (name.clone(), name)
        }
    }
}

fn format_date_fields(local: &DateTime<Tz>, options: &FormatOptions) -> String {
    let weekday = options.weekday.map(|width| {
        let index = local.weekday().num_days_from_sunday() as usize;
        match width {
            TextWidth::Long => WEEKDAYS[index],
            TextWidth::Short => WEEKDAYS_SHORT[index],
        }
    });

    let year = options.year.map(|width| match width {
        Width::Numeric => local.year().to_string(),
        Width::TwoDigit => format!("{:02}", local.year().rem_euclid(100)),
    });

    let date = match options.month {
        Some(MonthFormat::Long) | Some(MonthFormat::Short) => {
            let names = if options.month == Some(MonthFormat::Long) { &MONTHS } else { &MONTHS_SHORT };
            let month = names[local.month0() as usize];
            let day = options.day.map(|width| pad(local.day(), width));
            match (day, year) {
                (Some(day), Some(year)) => format!("{} de {} de {}", day, month, year),
                (Some(day), None) => format!("{} de {}", day, month),
                (None, Some(year)) => format!("{} de {}", month, year),
                (None, None) => month.to_string(),
            }
        }
        numeric => {
            let month_width = numeric.map(|format| match format {
                MonthFormat::TwoDigit => Width::TwoDigit,
                _ => Width::Numeric,
            });
            // pt-BR pads day and month whenever they appear together with another field.
            let combined = [options.day.is_some(), month_width.is_some(), year.is_some()].iter().filter(|present| **present).count() > 1;
            let width = |requested: Width| if combined { Width::TwoDigit } else { requested };

            let mut parts = Vec::new();
            if let Some(day) = options.day {
                parts.push(pad(local.day(), width(day)));
            }
            if let Some(month) = month_width {
                parts.push(pad(local.month(), width(month)));
            }
            if let Some(year) = year {
                parts.push(year);
            }
            parts.join("/")
        }
    };

    match (weekday, date.is_empty()) {
        (Some(weekday), false) => format!("{}, {}", weekday, date),
        (Some(weekday), true) => weekday.to_string(),
        (None, _) => date,
    }
}

fn format_time_fields(local: &DateTime<Tz>, options: &FormatOptions) -> String {
    // 24-hour clock; every time field is two digits in pt-BR.
    let mut parts = Vec::new();
    if options.hour.is_some() {
        parts.push(format!("{:02}", local.hour()));
    }
    if options.minute.is_some() {
        parts.push(format!("{:02}", local.minute()));
    }
    if options.second.is_some() {
        parts.push(format!("{:02}", local.second()));
    }
    parts.join(":")
}

fn pad(value: u32, width: Width) -> String {
    match width {
        Width::Numeric => value.to_string(),
        Width::TwoDigit => format!("{:02}", value),
    }
}
