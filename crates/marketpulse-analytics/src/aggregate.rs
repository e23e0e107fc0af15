use std::collections::BTreeMap;

use marketpulse_core::{InstrumentMetrics, RegionGroup, SectorGroup, SectorMap, Symbol};

use crate::stats::round2;

#[derive(Debug, Default)]
struct RegionAccumulator {
    members: Vec<Symbol>,
    return_sum: f64,
}

/// Fold index metrics into per-region averages.
pub fn group_by_region(indices: &[InstrumentMetrics]) -> BTreeMap<String, RegionGroup> {
    let mut buckets: BTreeMap<String, RegionAccumulator> = BTreeMap::new();

    for metrics in indices {
        let bucket = buckets.entry(metrics.region.clone()).or_default();
        bucket.members.push(metrics.symbol.clone());
        bucket.return_sum += metrics.period_return;
    }

    buckets
        .into_iter()
        .filter(|(_, bucket)| !bucket.members.is_empty())
        .map(|(region, bucket)| {
            let count = bucket.members.len();
            let group = RegionGroup {
                members: bucket.members,
                avg_return: round2(bucket.return_sum / count as f64),
                count,
            };
            (region, group)
        })
        .collect()
}

/// Fold equity metrics into per-sector averages using the static membership
/// table. Sectors with no analyzed member are omitted entirely.
pub fn group_by_sector(
    equities: &[InstrumentMetrics],
    sectors: &SectorMap,
) -> BTreeMap<String, SectorGroup> {
    let mut groups = BTreeMap::new();

    for (sector, symbols) in sectors.iter() {
        let members: Vec<&InstrumentMetrics> = equities
            .iter()
            .filter(|metrics| symbols.contains(&metrics.symbol))
            .collect();
        if members.is_empty() {
            continue;
        }

        let count = members.len() as f64;
        let return_sum: f64 = members.iter().map(|metrics| metrics.period_return).sum();
        let volatility_sum: f64 = members.iter().map(|metrics| metrics.volatility).sum();

        groups.insert(
            sector.to_owned(),
            SectorGroup {
                members: members
                    .iter()
                    .map(|metrics| metrics.symbol.clone())
                    .collect(),
                avg_return: round2(return_sum / count),
                avg_volatility: round2(volatility_sum / count),
            },
        );
    }

    groups
}
