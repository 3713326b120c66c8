use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Timelike, Utc};

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

/// Formats with a chrono pattern from settings. A malformed pattern falls
/// back to RFC 3339 instead of panicking inside `Display`.
pub fn format_date(date: &DateTime<Utc>, pattern: &str) -> String {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        log::warn!("Invalid date format {:?}, falling back to RFC 3339", pattern);
        return date.to_rfc3339();
    }
    date.format_with_items(items.into_iter()).to_string()
}

/// "2 hours ago" / "in about 1 month".
pub fn format_relative_time(date: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let distance = format_distance(date, now);
    if date > now {
        format!("in {}", distance)
    } else {
        format!("{} ago", distance)
    }
}

fn format_distance(date: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let (earlier, later) = if date <= now { (date, now) } else { (now, date) };
    let seconds = (*later - *earlier).num_seconds();
    let minutes = round_div(seconds, 60);

    if minutes < 2 {
        return if minutes == 0 {
            "less than a minute".to_string()
        } else {
            "1 minute".to_string()
        };
    }
    if minutes < 45 {
        return format!("{} minutes", minutes);
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        return format!("about {} hours", round_div(minutes, 60));
    }
    if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        return format!("{} days", round_div(minutes, MINUTES_IN_DAY));
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        return plural_with_prefix("about", round_div(minutes, MINUTES_IN_MONTH), "month");
    }

    let months = calendar_months_between(earlier, later);
    if months < 12 {
        return plural(round_div(minutes, MINUTES_IN_MONTH), "month");
    }

    let remainder = months % 12;
    let years = months / 12;
    if remainder < 3 {
        plural_with_prefix("about", years, "year")
    } else if remainder < 9 {
        plural_with_prefix("over", years, "year")
    } else {
        plural_with_prefix("almost", years + 1, "year")
    }
}

/// Whole calendar months from `earlier` to `later`.
fn calendar_months_between(earlier: &DateTime<Utc>, later: &DateTime<Utc>) -> i64 {
    let mut months = (later.year() as i64 - earlier.year() as i64) * 12
        + (later.month() as i64 - earlier.month() as i64);
    let later_rest = (later.day(), later.num_seconds_from_midnight());
    let earlier_rest = (earlier.day(), earlier.num_seconds_from_midnight());
    if months > 0 && later_rest < earlier_rest {
        months -= 1;
    }
    months
}

fn round_div(value: i64, divisor: i64) -> i64 {
    (value as f64 / divisor as f64).round() as i64
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

fn plural_with_prefix(prefix: &str, count: i64, unit: &str) -> String {
    format!("{} {}", prefix, plural(count, unit))
}

/// 1245 -> "1,245".
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Group header badge: "(1 workflow)", "(3 workflows)".
pub fn workflow_count_label(count: usize) -> String {
    if count == 1 {
        "(1 workflow)".to_string()
    } else {
        format!("({} workflows)", count)
    }
}

pub fn runs_label(count: u64) -> String {
    format!("{} runs", count)
}
