//! Display formatting for profile values.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Turn a snake_case tag into a title: `weight_loss` -> `Weight Loss`.
#[must_use]
pub fn humanize_tag(tag: &str) -> String {
    tag.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Comma-separated titles for a tag list, or `empty` when there are none.
#[must_use]
pub fn humanize_list(tags: &[String], empty: &str) -> String {
    if tags.is_empty() {
        return empty.to_owned();
    }
    tags.iter().map(|t| humanize_tag(t)).collect::<Vec<_>>().join(", ")
}

/// Whole hours in a minute count, rounded down.
#[must_use]
pub fn whole_hours(minutes: u32) -> u32 {
    minutes / 60
}

/// `1990-01-31` -> `Jan 31, 1990`; anything unparseable is shown as-is and an
/// empty value reads `Not set`.
#[must_use]
pub fn display_date(iso: &str) -> String {
    let iso = iso.trim();
    if iso.is_empty() {
        return "Not set".to_owned();
    }
    format_iso_date(iso).unwrap_or_else(|| iso.to_owned())
}

fn format_iso_date(iso: &str) -> Option<String> {
    const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
    let mut parts = iso.splitn(3, '-');
    let year: u32 = parts.next()?.parse().ok()?;
    let month: usize = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.get(..2)?.parse().ok()?;
    let name = MONTHS.get(month.checked_sub(1)?)?;
    Some(format!("{name} {day}, {year}"))
}
