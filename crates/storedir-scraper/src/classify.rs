//! Heuristic field classification for unlabeled store detail text.
//!
//! Store items carry their address, working hours and phone as bare
//! paragraphs in no fixed order. Each field is resolved by an ordered rule
//! list; the first fragment matching any rule of a field wins. Phone is
//! resolved first, then working hours (never on the phone fragment), then
//! address takes the first fragment equal to neither.

use std::sync::LazyLock;

use regex::Regex;
use storedir_core::NOT_FOUND;

/// Eight or more digits, spaces or hyphens, optionally after a `+`.
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\s-]{7,}").expect("valid digit run regex"));

static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}[:.-]\d{2}").expect("valid clock time regex"));

static TIME_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}[:.]\d{2}\s*[-–]\s*\d{1,2}[:.]\d{2}").expect("valid time range regex")
});

const PHONE_LABELS: &[&str] = &["Tel:", "Telefon:"];

const WEEKDAYS: &[&str] = &[
    "Pazartesi",
    "Salı",
    "Çarşamba",
    "Perşembe",
    "Cuma",
    "Cumartesi",
    "Pazar",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Matched case-sensitively, as printed on the page.
const HOURS_LABELS: &[&str] = &[
    "Çalışma Saatleri",
    "Haftaiçi",
    "Haftasonu",
    "Açılış",
    "Kapanış",
];

/// Matched against the lower-cased fragment.
const HOURS_KEYWORDS: &[&str] = &["opening", "closing", "weekday", "weekend", "working hours"];

/// One named check in a field's rule list.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    check: fn(&str) -> bool,
}

impl Rule {
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        (self.check)(text)
    }
}

/// Phone rules in precedence order.
pub static PHONE_RULES: &[Rule] = &[
    Rule {
        name: "phone_label",
        check: has_phone_label,
    },
    Rule {
        name: "digit_run",
        check: has_digit_run,
    },
];

/// Working-hours rules in precedence order.
pub static WORKING_HOURS_RULES: &[Rule] = &[
    Rule {
        name: "weekday",
        check: has_weekday,
    },
    Rule {
        name: "clock_time",
        check: has_clock_time,
    },
    Rule {
        name: "time_range",
        check: has_time_range,
    },
    Rule {
        name: "meridiem",
        check: has_meridiem,
    },
    Rule {
        name: "hours_keyword",
        check: has_hours_keyword,
    },
];

fn has_phone_label(text: &str) -> bool {
    PHONE_LABELS.iter().any(|label| text.contains(label))
}

fn has_digit_run(text: &str) -> bool {
    DIGIT_RUN.is_match(text)
}

fn has_weekday(text: &str) -> bool {
    WEEKDAYS.iter().any(|day| text.contains(day))
}

fn has_clock_time(text: &str) -> bool {
    text.contains(':') && CLOCK_TIME.is_match(text)
}

fn has_time_range(text: &str) -> bool {
    TIME_RANGE.is_match(text)
}

fn has_meridiem(text: &str) -> bool {
    text.contains("AM") || text.contains("PM")
}

fn has_hours_keyword(text: &str) -> bool {
    if HOURS_LABELS.iter().any(|label| text.contains(label)) {
        return true;
    }
    let lower = text.to_lowercase();
    HOURS_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Name of the first rule in `rules` that `text` satisfies.
#[must_use]
pub fn matched_rule(rules: &[Rule], text: &str) -> Option<&'static str> {
    rules.iter().find(|rule| rule.matches(text)).map(|rule| rule.name)
}

/// The three detail fields of a store, each [`NOT_FOUND`] when unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDetails {
    pub address: String,
    pub working_hours: String,
    pub phone: String,
}

/// Index and text of the first fragment, other than `skip`, that satisfies any rule.
fn first_match<'a, S: AsRef<str>>(
    fragments: &'a [S],
    rules: &[Rule],
    skip: Option<usize>,
) -> Option<(usize, &'a str)> {
    fragments
        .iter()
        .map(AsRef::as_ref)
        .enumerate()
        .filter(|(index, _)| Some(*index) != skip)
        .find(|(_, text)| rules.iter().any(|rule| rule.matches(text)))
}

/// Assign trimmed, non-empty detail fragments to address, working hours and phone.
#[must_use]
pub fn classify<S: AsRef<str>>(fragments: &[S]) -> StoreDetails {
    let phone = first_match(fragments, PHONE_RULES, None);
    let working_hours = first_match(fragments, WORKING_HOURS_RULES, phone.map(|(i, _)| i));

    let phone_text = phone.map(|(_, text)| text);
    let hours_text = working_hours.map(|(_, text)| text);
    let address = fragments
        .iter()
        .map(AsRef::as_ref)
        .find(|text| Some(*text) != phone_text && Some(*text) != hours_text);

    StoreDetails {
        address: address.unwrap_or(NOT_FOUND).to_owned(),
        working_hours: hours_text.unwrap_or(NOT_FOUND).to_owned(),
        phone: phone_text.unwrap_or(NOT_FOUND).to_owned(),
    }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
