use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use crate::store::StoredRecipe;

/// Sections of the recipe history list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeBucket {
    Today,
    Yesterday,
    LastWeek,
    LastMonth,
    LastYear,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 5] = [
        TimeBucket::Today,
        TimeBucket::Yesterday,
        TimeBucket::LastWeek,
        TimeBucket::LastMonth,
        TimeBucket::LastYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeBucket::Today => "Today",
            TimeBucket::Yesterday => "Yesterday",
            TimeBucket::LastWeek => "In The Last Week",
            TimeBucket::LastMonth => "In The Last Month",
            TimeBucket::LastYear => "In The Last Year",
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Buckets `timestamp` by whole calendar days before `now`, in `now`'s time zone.
pub fn time_bucket<Tz: TimeZone>(timestamp: &DateTime<Utc>, now: &DateTime<Tz>) -> TimeBucket {
    let day = timestamp.with_timezone(&now.timezone()).date_naive();
    let days = (now.date_naive() - day).num_days();

    match days {
        d if d <= 0 => TimeBucket::Today,
        1 => TimeBucket::Yesterday,
        d if d < 7 => TimeBucket::LastWeek,
        d if d < 30 => TimeBucket::LastMonth,
        _ => TimeBucket::LastYear,
    }
}

/// Groups recipes into non-empty buckets, newest bucket first. Recipes keep
/// their relative order inside a bucket.
pub fn group_by_bucket<'a, Tz: TimeZone>(
    recipes: &'a [StoredRecipe],
    now: &DateTime<Tz>,
) -> Vec<(TimeBucket, Vec<&'a StoredRecipe>)> {
    TimeBucket::ALL
        .iter()
        .filter_map(|&bucket| {
            let members: Vec<&StoredRecipe> = recipes
                .iter()
                .filter(|recipe| time_bucket(&recipe.timestamp, now) == bucket)
                .collect();
            (!members.is_empty()).then_some((bucket, members))
        })
        .collect()
}
