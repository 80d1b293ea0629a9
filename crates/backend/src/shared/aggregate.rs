//! Group-by helpers over the in-memory sales table.
//!
//! Groups come out ordered by key, so a later stable sort by metric breaks
//! ties alphabetically.

use contracts::dashboards::d400_superstore::{GroupTotals, Metric};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::shared::data::SalesRecord;

/// Sum sales and profit per key
pub fn sum_by<'a, I, K>(records: I, key: K) -> Vec<GroupTotals>
where
    I: IntoIterator<Item = &'a SalesRecord>,
    K: Fn(&'a SalesRecord) -> &'a str,
{
    let mut groups: BTreeMap<&'a str, (f64, f64)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(key(record)).or_insert((0.0, 0.0));
        entry.0 += record.sales;
        entry.1 += record.profit;
    }

    groups
        .into_iter()
        .map(|(key, (sales, profit))| GroupTotals {
            key: key.to_string(),
            sales,
            profit,
        })
        .collect()
}

/// Total sales and profit over all given records
pub fn grand_totals<'a>(records: impl IntoIterator<Item = &'a SalesRecord>) -> (f64, f64) {
    records
        .into_iter()
        .fold((0.0, 0.0), |(sales, profit), r| (sales + r.sales, profit + r.profit))
}

/// Row count per key, in first-encountered key order
pub fn count_by<'a, I, K>(records: I, key: K) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a SalesRecord>,
    K: Fn(&'a SalesRecord) -> &'a str,
{
    let mut order: Vec<&'a str> = Vec::new();
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for record in records {
        let k = key(record);
        let count = counts.entry(k).or_insert_with(|| {
            order.push(k);
            0
        });
        *count += 1;
    }

    order
        .into_iter()
        .map(|k| (k.to_string(), counts[k]))
        .collect()
}

/// Stable sort by the metric value
pub fn sort_by_metric(groups: &mut [GroupTotals], metric: Metric, descending: bool) {
    groups.sort_by(|a, b| {
        let ord = a.value(metric).total_cmp(&b.value(metric));
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

/// First group with the largest metric value (earliest key wins ties)
pub fn max_by_metric(groups: &[GroupTotals], metric: Metric) -> Option<&GroupTotals> {
    groups.iter().fold(None, |best, g| match best {
        Some(b) if g.value(metric).total_cmp(&b.value(metric)) != Ordering::Greater => Some(b),
        _ => Some(g),
    })
}
