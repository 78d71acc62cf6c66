use super::*;

#[test]
fn humanize_tag_title_cases_every_word() {
    assert_eq!(humanize_tag("weight_loss"), "Weight Loss");
    assert_eq!(humanize_tag("general_fitness"), "General Fitness");
    assert_eq!(humanize_tag("endurance"), "Endurance");
    assert_eq!(humanize_tag("mobility__assistance"), "Mobility Assistance");
}

#[test]
fn humanize_list_joins_or_uses_placeholder() {
    let tags = vec!["weight_loss".to_owned(), "flexibility".to_owned()];
    assert_eq!(humanize_list(&tags, "No goals set"), "Weight Loss, Flexibility");
    assert_eq!(humanize_list(&[], "No goals set"), "No goals set");
}

#[test]
fn whole_hours_rounds_down() {
    assert_eq!(whole_hours(480), 8);
    assert_eq!(whole_hours(59), 0);
    assert_eq!(whole_hours(119), 1);
}

#[test]
fn display_date_formats_iso_dates() {
    assert_eq!(display_date("1990-01-31"), "Jan 31, 1990");
    assert_eq!(display_date("2024-12-05T10:00:00Z"), "Dec 5, 2024");
}

#[test]
fn display_date_handles_missing_and_garbage() {
    assert_eq!(display_date(""), "Not set");
    assert_eq!(display_date("yesterday"), "yesterday");
    assert_eq!(display_date("2024-13-01"), "2024-13-01");
}
