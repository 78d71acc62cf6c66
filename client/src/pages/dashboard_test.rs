use super::*;

#[test]
fn activity_aria_label_reads_as_sentence() {
    assert_eq!(
        RECENT_ACTIVITIES[0].aria_label(),
        "Workout Completed: 30-minute HIIT session on 2024-01-15 at 09:30 AM"
    );
}

#[test]
fn recent_activities_are_newest_first() {
    let dates: Vec<_> = RECENT_ACTIVITIES.iter().map(|a| a.date).collect();
    let mut sorted = dates.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
}
