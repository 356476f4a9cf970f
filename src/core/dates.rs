//! Invoice date recognition.
//!
//! A date is valid if it reads as a real calendar date under at least one of
//! the accepted layouts. Which layout matched is not reported, so `03/04/2024`
//! is simply valid.

use chrono::NaiveDate;

/// Position of each date component within a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Day,
    Month,
    Year,
}

/// One accepted layout: three components joined by a separator.
#[derive(Debug, Clone, Copy)]
pub struct DateFormat {
    pub pattern: &'static str,
    separator: char,
    order: [Part; 3],
}

/// Accepted layouts, tried in order.
pub static DATE_FORMATS: &[DateFormat] = &[
    DateFormat {
        pattern: "DD/MM/YYYY",
        separator: '/',
        order: [Part::Day, Part::Month, Part::Year],
    },
    DateFormat {
        pattern: "MM/DD/YYYY",
        separator: '/',
        order: [Part::Month, Part::Day, Part::Year],
    },
    DateFormat {
        pattern: "YYYY-MM-DD",
        separator: '-',
        order: [Part::Year, Part::Month, Part::Day],
    },
    DateFormat {
        pattern: "DD-MM-YYYY",
        separator: '-',
        order: [Part::Day, Part::Month, Part::Year],
    },
    DateFormat {
        pattern: "MM-DD-YYYY",
        separator: '-',
        order: [Part::Month, Part::Day, Part::Year],
    },
];

impl DateFormat {
    /// Parse `s` strictly in this layout.
    ///
    /// Day and month take one or two digits, the year exactly four.
    pub fn parse(&self, s: &str) -> Option<NaiveDate> {
        let mut pieces = s.split(self.separator);
        let mut day = None;
        let mut month = None;
        let mut year = None;

        for part in self.order {
            let piece = pieces.next()?;
            let width_ok = match part {
                Part::Day | Part::Month => (1..=2).contains(&piece.len()),
                Part::Year => piece.len() == 4,
            };
            if !width_ok || !piece.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            match part {
                Part::Day => day = piece.parse::<u32>().ok(),
                Part::Month => month = piece.parse::<u32>().ok(),
                Part::Year => year = piece.parse::<i32>().ok(),
            }
        }
        if pieces.next().is_some() {
            return None;
        }

        let year = year.filter(|y| *y >= 1)?;
        NaiveDate::from_ymd_opt(year, month?, day?)
    }
}

/// Return the first layout under which `s` is a valid calendar date.
pub fn recognize_date(s: &str) -> Option<(&'static DateFormat, NaiveDate)> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| fmt.parse(s).map(|date| (fmt, date)))
}

/// Whether `s` is a valid date in any accepted layout. Blank input is invalid.
pub fn is_valid_date(s: &str) -> bool {
    recognize_date(s).is_some()
}
