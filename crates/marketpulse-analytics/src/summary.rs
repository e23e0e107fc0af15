use std::collections::BTreeMap;

use marketpulse_core::{
    InstrumentMetrics, MarketSummary, PerformanceLeader, RegionGroup, RegionLeader, SectorGroup,
    SectorLeader, UtcDate, VolatilityLeader,
};

/// Scan every derived collection for its extremes.
///
/// Selection is stable: on ties the first element in iteration order wins.
/// Empty collections yield null fields, never errors. The generation date is
/// supplied by the caller so reruns can be frozen.
pub fn build_summary(
    date: UtcDate,
    indices: &[InstrumentMetrics],
    equities: &[InstrumentMetrics],
    regions: &BTreeMap<String, RegionGroup>,
    sectors: &BTreeMap<String, SectorGroup>,
) -> MarketSummary {
    MarketSummary {
        date,
        indices_count: indices.len(),
        stocks_count: equities.len(),
        best_performing_index: performance_leader(first_max_by(indices, |m| m.period_return)),
        worst_performing_index: performance_leader(first_min_by(indices, |m| m.period_return)),
        best_performing_stock: performance_leader(first_max_by(equities, |m| m.period_return)),
        worst_performing_stock: performance_leader(first_min_by(equities, |m| m.period_return)),
        highest_volatility_index: volatility_leader(first_max_by(indices, |m| m.volatility)),
        highest_volatility_stock: volatility_leader(first_max_by(equities, |m| m.volatility)),
        best_performing_region: first_max_by(regions.iter(), |(_, group)| group.avg_return).map(
            |(region, group)| RegionLeader {
                region: region.clone(),
                period_return: group.avg_return,
            },
        ),
        best_performing_sector: first_max_by(sectors.iter(), |(_, group)| group.avg_return).map(
            |(sector, group)| SectorLeader {
                sector: sector.clone(),
                period_return: group.avg_return,
            },
        ),
    }
}

fn performance_leader(metrics: Option<&InstrumentMetrics>) -> Option<PerformanceLeader> {
    metrics.map(|metrics| PerformanceLeader {
        name: metrics.name.clone(),
        period_return: metrics.period_return,
    })
}

fn volatility_leader(metrics: Option<&InstrumentMetrics>) -> Option<VolatilityLeader> {
    metrics.map(|metrics| VolatilityLeader {
        name: metrics.name.clone(),
        volatility: metrics.volatility,
    })
}

// `Iterator::max_by` keeps the last maximum; selection here must keep the
// first, so both folds replace only on strict improvement.

fn first_max_by<T, I>(items: I, key: impl Fn(&T) -> f64) -> Option<T>
where
    I: IntoIterator<Item = T>,
{
    let mut best: Option<(T, f64)> = None;
    for item in items {
        let value = key(&item);
        let better = match &best {
            Some((_, best_value)) => value > *best_value,
            None => true,
        };
        if better {
            best = Some((item, value));
        }
    }
    best.map(|(item, _)| item)
}

fn first_min_by<T, I>(items: I, key: impl Fn(&T) -> f64) -> Option<T>
where
    I: IntoIterator<Item = T>,
{
    first_max_by(items, |item| -key(item))
}

#[cfg(test)]
mod tests {
    use marketpulse_core::{Symbol, Trend};

    use super::*;

    fn metrics(symbol: &str, period_return: f64, volatility: f64) -> InstrumentMetrics {
        InstrumentMetrics {
            symbol: Symbol::parse(symbol).expect("symbol"),
            name: format!("{symbol} Test"),
            region: "EUA".to_owned(),
            last_price: 100.0,
            period_return,
            week_return: 0.0,
            volatility,
            trend: Trend::Lateral,
            equity: None,
        }
    }

    fn date() -> UtcDate {
        UtcDate::parse("2025-06-30").expect("date")
    }

    #[test]
    fn picks_best_and_worst_performers() {
        let indices = vec![
            metrics("A", 2.0, 0.5),
            metrics("B", -1.0, 2.5),
            metrics("C", 5.0, 1.0),
        ];

        let summary = build_summary(date(), &indices, &[], &BTreeMap::new(), &BTreeMap::new());

        assert_eq!(summary.indices_count, 3);
        assert_eq!(
            summary.best_performing_index.expect("best").period_return,
            5.0
        );
        assert_eq!(
            summary.worst_performing_index.expect("worst").period_return,
            -1.0
        );
        assert_eq!(
            summary.highest_volatility_index.expect("highest").name,
            "B Test"
        );
        assert!(summary.best_performing_stock.is_none());
        assert!(summary.best_performing_region.is_none());
    }

    #[test]
    fn ties_keep_the_first_element() {
        let indices = vec![metrics("FIRST", 3.0, 1.0), metrics("SECOND", 3.0, 1.0)];

        let summary = build_summary(date(), &indices, &[], &BTreeMap::new(), &BTreeMap::new());

        assert_eq!(summary.best_performing_index.expect("best").name, "FIRST Test");
        assert_eq!(summary.worst_performing_index.expect("worst").name, "FIRST Test");
    }

    #[test]
    fn empty_inputs_yield_null_fields() {
        let summary = build_summary(date(), &[], &[], &BTreeMap::new(), &BTreeMap::new());

        assert_eq!(summary.indices_count, 0);
        assert!(summary.best_performing_index.is_none());
        assert!(summary.worst_performing_stock.is_none());
        assert!(summary.highest_volatility_index.is_none());
        assert!(summary.best_performing_sector.is_none());
    }

    #[test]
    fn region_and_sector_leaders_use_average_return() {
        let mut regions = BTreeMap::new();
        regions.insert(
            "Asia".to_owned(),
            RegionGroup {
                members: vec![Symbol::parse("^N225").expect("symbol")],
                avg_return: 1.5,
                count: 1,
            },
        );
        regions.insert(
            "Europa".to_owned(),
            RegionGroup {
                members: vec![Symbol::parse("^FTSE").expect("symbol")],
                avg_return: 2.5,
                count: 1,
            },
        );

        let mut sectors = BTreeMap::new();
        sectors.insert(
            "Tecnologia".to_owned(),
            SectorGroup {
                members: vec![Symbol::parse("AAPL").expect("symbol")],
                avg_return: 7.0,
                avg_volatility: 2.0,
            },
        );

        let summary = build_summary(date(), &[], &[], &regions, &sectors);

        let region = summary.best_performing_region.expect("region");
        assert_eq!(region.region, "Europa");
        assert_eq!(region.period_return, 2.5);

        let sector = summary.best_performing_sector.expect("sector");
        assert_eq!(sector.sector, "Tecnologia");
        assert_eq!(sector.period_return, 7.0);
    }
}
