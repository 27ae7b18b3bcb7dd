use std::{cmp::Ordering, collections::HashMap};

use serde::Serialize;

use crate::{
    filter::DashboardFilter,
    frequency::{Tally, distinct_by},
    loader::Dataset,
    view::{TableRow, View},
};

pub const DEFAULT_TOP_ATHLETES: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AthleteMedals {
    pub name: String,
    pub noc: String,
    pub medals: u64,
}

/// Athlete identity ordered for tie-breaks: numeric IDs by value and ahead of
/// anything else, other identities lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct IdentityKey<'a>(&'a str);

impl Ord for IdentityKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0.parse::<u64>(), other.0.parse::<u64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b).then_with(|| self.0.cmp(other.0)),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => self.0.cmp(other.0),
        }
    }
}

impl PartialOrd for IdentityKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Medal winners ranked by medal count. A team medal counts once for each of
/// its members; a member listed twice on one roster still counts once.
/// Equal counts rank by athlete ID (numerically), then NOC.
pub fn top_athletes(
    dataset: &Dataset,
    filter: &DashboardFilter,
    top: usize,
) -> View<Vec<AthleteMedals>> {
    let medal_rows = filter
        .apply(&dataset.records)
        .into_iter()
        .filter(|r| r.has_medal())
        .collect::<Vec<_>>();
    let unique = distinct_by(&medal_rows, |r| {
        Some((r.games.as_deref(), r.event.as_deref(), r.medal, r.identity()?))
    });

    let mut names = HashMap::new();
    let mut tally = Tally::new();
    for row in unique {
        let (Some(identity), Some(noc)) = (row.identity(), row.noc.as_deref()) else {
            continue;
        };
        names
            .entry(identity)
            .or_insert(row.name.as_deref().unwrap_or(identity));
        tally.add((IdentityKey(identity), noc), 1);
    }

    View::from_rows(
        tally
            .into_ranked(top)
            .into_iter()
            .map(|((IdentityKey(identity), noc), medals)| AthleteMedals {
                name: names.get(identity).copied().unwrap_or(identity).to_string(),
                noc: noc.to_string(),
                medals,
            })
            .collect(),
    )
}

impl TableRow for AthleteMedals {
    fn headers() -> Vec<String> {
        vec!["Name".into(), "NOC".into(), "Medals".into()]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.noc.clone(), self.medals.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_order_by_value_before_text() {
        let mut keys = vec![
            IdentityKey("Zed"),
            IdentityKey("10"),
            IdentityKey("9"),
            IdentityKey("Ann"),
            IdentityKey("09"),
        ];
        keys.sort();
        assert_eq!(
            keys.iter().map(|k| k.0).collect::<Vec<_>>(),
            vec!["09", "9", "10", "Ann", "Zed"]
        );
    }
}
