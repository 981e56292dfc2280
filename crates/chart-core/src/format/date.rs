// File: crates/chart-core/src/format/date.rs
// Summary: .NET-style date/time format strings ("dddd\, MMMM %d\, yyyy", "d", "T") over chrono.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Pattern used when a date has no format string and no time component.
pub const DEFAULT_DATE_FORMAT: &str = "M/d/yyyy";
/// Pattern used when a date has no format string but carries a time.
pub const DEFAULT_DATE_TIME_FORMAT: &str = "M/d/yyyy h:mm:ss tt";

/// Expand single-letter standard patterns into their custom equivalent.
fn expand_standard(format: &str) -> &str {
    match format {
        "d" => "M/d/yyyy",
        "D" => "dddd, MMMM d, yyyy",
        "f" => "dddd, MMMM d, yyyy h:mm tt",
        "F" => "dddd, MMMM d, yyyy h:mm:ss tt",
        "g" => "M/d/yyyy h:mm tt",
        "G" => "M/d/yyyy h:mm:ss tt",
        "M" | "m" => "MMMM d",
        "t" => "h:mm tt",
        "T" => "h:mm:ss tt",
        "Y" | "y" => "MMMM yyyy",
        "s" => "yyyy'-'MM'-'dd'T'HH':'mm':'ss",
        "u" => "yyyy'-'MM'-'dd HH':'mm':'ss'Z'",
        other => other,
    }
}

/// Default pattern for `dt` when no format string is supplied.
pub fn default_format_for(dt: &NaiveDateTime) -> &'static str {
    if dt.hour() == 0 && dt.minute() == 0 && dt.second() == 0 && dt.nanosecond() == 0 {
        DEFAULT_DATE_FORMAT
    } else {
        DEFAULT_DATE_TIME_FORMAT
    }
}

/// Format `dt` with a standard or custom date pattern (en-US names).
pub fn format_date(dt: &NaiveDateTime, format: &str) -> String {
    let pattern: Vec<char> = expand_standard(format).chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < pattern.len() {
        let c = pattern[i];
        match c {
            '\\' => {
                if let Some(next) = pattern.get(i + 1) {
                    out.push(*next);
                }
                i += 2;
                continue;
            }
            '\'' | '"' => {
                let mut j = i + 1;
                while j < pattern.len() && pattern[j] != c {
                    out.push(pattern[j]);
                    j += 1;
                }
                i = j + 1;
                continue;
            }
            '%' => {
                // `%d` forces a single-letter custom specifier.
                if let Some(next) = pattern.get(i + 1) {
                    render_specifier(&mut out, dt, *next, 1);
                }
                i += 2;
                continue;
            }
            _ => {}
        }
        let run = pattern[i..].iter().take_while(|p| **p == c).count();
        if !render_specifier(&mut out, dt, c, run) {
            for _ in 0..run {
                out.push(c);
            }
        }
        i += run;
    }
    out
}

/// Render one specifier run. Returns false when `c` is not a specifier.
fn render_specifier(out: &mut String, dt: &NaiveDateTime, c: char, run: usize) -> bool {
    let hour12 = match dt.hour() % 12 {
        0 => 12,
        h => h,
    };
    match (c, run) {
        ('d', 1) => out.push_str(&dt.day().to_string()),
        ('d', 2) => out.push_str(&format!("{:02}", dt.day())),
        ('d', 3) => out.push_str(&dt.format("%a").to_string()),
        ('d', _) => out.push_str(&dt.format("%A").to_string()),
        ('M', 1) => out.push_str(&dt.month().to_string()),
        ('M', 2) => out.push_str(&format!("{:02}", dt.month())),
        ('M', 3) => out.push_str(&dt.format("%b").to_string()),
        ('M', _) => out.push_str(&dt.format("%B").to_string()),
        ('y', 1) => out.push_str(&(dt.year().rem_euclid(100)).to_string()),
        ('y', 2) => out.push_str(&format!("{:02}", dt.year().rem_euclid(100))),
        ('y', n) => out.push_str(&format!("{:0width$}", dt.year(), width = n)),
        ('h', 1) => out.push_str(&hour12.to_string()),
        ('h', _) => out.push_str(&format!("{:02}", hour12)),
        ('H', 1) => out.push_str(&dt.hour().to_string()),
        ('H', _) => out.push_str(&format!("{:02}", dt.hour())),
        ('m', 1) => out.push_str(&dt.minute().to_string()),
        ('m', _) => out.push_str(&format!("{:02}", dt.minute())),
        ('s', 1) => out.push_str(&dt.second().to_string()),
        ('s', _) => out.push_str(&format!("{:02}", dt.second())),
        ('f', n) | ('F', n) => {
            let digits = format!("{:09}", dt.nanosecond());
            let cut = &digits[..n.min(9)];
            if c == 'F' {
                out.push_str(cut.trim_end_matches('0'));
            } else {
                out.push_str(cut);
            }
        }
        ('t', 1) => out.push(if dt.hour() < 12 { 'A' } else { 'P' }),
        ('t', _) => out.push_str(if dt.hour() < 12 { "AM" } else { "PM" }),
        _ => return false,
    }
    true
}
