use marketpulse_core::{MarketSummary, PerformanceLeader, VolatilityLeader};

use crate::commands::RunReport;
use crate::error::CliError;

pub fn render_report(report: &RunReport, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    println!("{payload}");
    Ok(())
}

pub fn render_summary(summary: &MarketSummary) -> Result<(), CliError> {
    println!("date          : {}", summary.date);
    println!("indices_count : {}", summary.indices_count);
    println!("stocks_count  : {}", summary.stocks_count);

    print_performance("best index    ", summary.best_performing_index.as_ref());
    print_performance("worst index   ", summary.worst_performing_index.as_ref());
    print_performance("best stock    ", summary.best_performing_stock.as_ref());
    print_performance("worst stock   ", summary.worst_performing_stock.as_ref());
    print_volatility("volatile index", summary.highest_volatility_index.as_ref());
    print_volatility("volatile stock", summary.highest_volatility_stock.as_ref());

    match &summary.best_performing_region {
        Some(leader) => println!(
            "best region   : {} ({:+.2}%)",
            leader.region, leader.period_return
        ),
        None => println!("best region   : -"),
    }
    match &summary.best_performing_sector {
        Some(leader) => println!(
            "best sector   : {} ({:+.2}%)",
            leader.sector, leader.period_return
        ),
        None => println!("best sector   : -"),
    }

    Ok(())
}

fn print_performance(label: &str, leader: Option<&PerformanceLeader>) {
    match leader {
        Some(leader) => println!("{label}: {} ({:+.2}%)", leader.name, leader.period_return),
        None => println!("{label}: -"),
    }
}

fn print_volatility(label: &str, leader: Option<&VolatilityLeader>) {
    match leader {
        Some(leader) => println!("{label}: {} ({:.2}%)", leader.name, leader.volatility),
        None => println!("{label}: -"),
    }
}
