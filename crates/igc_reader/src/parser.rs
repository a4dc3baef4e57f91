//! Reads the parts of an IGC flight log which make up a track summary.
//!
//! Only a handful of records matter here:
//! - `HFDTE` flight date (`DDMMYY`, newer loggers write `DATE:DDMMYY,NN`)
//! - `HFPLT` pilot in charge
//! - `HFGTY` glider type
//! - `HFGID` glider id
//! - `B` position fixes
//!
//! Header records may also come with the `HO` or `HP` source prefix.
//! Reference: https://xp-soaring.github.io/igc_file_format/igc_format_2008.html

use chrono::{NaiveDate, NaiveTime};
use igc::records::BRecord;
use model::track::{GeoPoint, ParsedTrack};

use crate::IgcError;

/// `B` + time + latitude + longitude + validity + two altitudes.
const MIN_B_RECORD_LENGTH: usize = 35;

#[derive(Default)]
struct Headers {
    date: Option<String>,
    pilot: Option<String>,
    glider_type: Option<String>,
    glider_id: Option<String>,
}

pub fn parse_igc(content: &str) -> Result<ParsedTrack, IgcError> {
    let mut headers = Headers::default();
    let mut points = vec![];

    for line in content.lines().map(|line| line.trim_end()) {
        if line.starts_with('B') {
            if line.len() < MIN_B_RECORD_LENGTH {
                continue;
            }
            // fixes the igc crate can't make sense of are dropped
            if let Some(point) = BRecord::parse(line).ok().map(to_geo_point) {
                points.push(point);
            }
        } else if line.starts_with('H') {
            read_header(&mut headers, line);
        }
    }

    let date = headers
        .date
        .ok_or(IgcError::MissingHeader("date"))
        .and_then(|date| parse_date(&date))?;

    Ok(ParsedTrack {
        date,
        pilot: headers.pilot.unwrap_or_default(),
        glider_type: headers.glider_type.unwrap_or_default(),
        glider_id: headers.glider_id.unwrap_or_default(),
        points,
    })
}

fn read_header(headers: &mut Headers, line: &str) {
    let Some(code) = line.get(2..5) else {
        return;
    };
    let slot = match code {
        "DTE" => &mut headers.date,
        "PLT" => &mut headers.pilot,
        "GTY" => &mut headers.glider_type,
        "GID" => &mut headers.glider_id,
        _ => return,
    };
    // the first occurrence wins
    if slot.is_none() {
        *slot = Some(header_value(line).to_owned());
    }
}

fn header_value(line: &str) -> &str {
    match line.split_once(':') {
        Some((_, value)) => value.trim(),
        None => line.get(5..).unwrap_or_default().trim(),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, IgcError> {
    let invalid = || IgcError::InvalidDate(value.to_owned());
    let digits = value.get(0..6).ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let day: u32 = digits[0..2].parse().map_err(|_| invalid())?;
    let month: u32 = digits[2..4].parse().map_err(|_| invalid())?;
    let year: i32 = digits[4..6].parse().map_err(|_| invalid())?;
    let year = if year < 80 { 2000 + year } else { 1900 + year };
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn to_geo_point(record: BRecord) -> GeoPoint {
    let point = GeoPoint::new(record.pos.lat.into(), record.pos.lon.into());
    let seconds = record.timestamp.seconds_since_midnight() as u32;
    match NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0) {
        Some(time) => point.at(time),
        None => point,
    }
}
