//! Plastic metrics derived from the room counts.
//!
//! A pure function of parts 2 and 3: daily counts are summed per category,
//! every room's "other" count is pooled into one synthetic category,
//! everything is scaled to a school year and the largest categories are
//! ranked for display and for seeding reduction-promise baselines.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::audit::{Part2Data, Part3Data, RoomSection};
use crate::catalog::{Category, RoomKind};

/// School days per year; converts one observed day into an annual count.
pub const SCHOOL_DAYS_PER_YEAR: u64 = 190;

/// Number of categories reported as top problem plastics.
pub const TOP_PROBLEM_LIMIT: usize = 5;

/// One ranked entry of the results chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPlastic {
    pub name: String,
    pub count: u64,
}

/// Snapshot of the derived results, persisted alongside the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlasticMetrics {
    pub total_plastic_items: u64,
    pub top_problem_plastics: Vec<TopPlastic>,
    /// Annual count per category. `other` is present only when positive.
    pub plastic_counts: BTreeMap<Category, u64>,
}

impl PlasticMetrics {
    /// Annual count for `category`, zero when absent.
    pub fn annual_count(&self, category: Category) -> u64 {
        self.plastic_counts.get(&category).copied().unwrap_or(0)
    }
}

/// Scale a one-day count to a school year.
pub fn annualize(daily: u64) -> u64 {
    daily.saturating_mul(SCHOOL_DAYS_PER_YEAR)
}

/// Derive metrics from the room sections of parts 2 and 3.
///
/// Every room contributes regardless of its selection flag; only catalog
/// items of the room are read.
pub fn derive_metrics(part2: &Part2Data, part3: &Part3Data) -> PlasticMetrics {
    let rooms = part2.rooms().into_iter().chain(part3.rooms());
    derive_from_rooms(rooms)
}

fn derive_from_rooms<'a>(rooms: impl Iterator<Item = (RoomKind, &'a RoomSection)>) -> PlasticMetrics {
    let mut daily: BTreeMap<Category, u64> =
        Category::MEASURED.iter().map(|c| (*c, 0)).collect();
    let mut other_daily: u64 = 0;

    for (room, section) in rooms {
        for item in room.items() {
            let slot = daily.entry(item.category()).or_insert(0);
            *slot = slot.saturating_add(section.count(*item));
        }
        other_daily = other_daily.saturating_add(section.other_count());
    }

    if other_daily > 0 {
        daily.insert(Category::Other, other_daily);
    }

    let plastic_counts: BTreeMap<Category, u64> = daily
        .into_iter()
        .map(|(category, count)| (category, annualize(count)))
        .collect();

    let total_plastic_items = plastic_counts
        .values()
        .fold(0u64, |acc, n| acc.saturating_add(*n));

    PlasticMetrics {
        total_plastic_items,
        top_problem_plastics: rank_top(&plastic_counts, TOP_PROBLEM_LIMIT),
        plastic_counts,
    }
}

/// Rank categories by count, descending, dropping zeros. Ties keep
/// catalog order.
pub fn rank_top(counts: &BTreeMap<Category, u64>, limit: usize) -> Vec<TopPlastic> {
    let mut ranked: Vec<(Category, u64)> = counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(category, count)| (*category, *count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(limit)
        .map(|(category, count)| TopPlastic {
            name: category.name().to_string(),
            count,
        })
        .collect()
}
