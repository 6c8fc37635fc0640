use clap::{Parser, Subcommand};

use crate::services::{format_compact, format_number, Aggregator, DashboardTables, SalesClient};
use crate::types::{Filters, Region, YearFilter, MAX_TOP_SELLERS, MAX_YEAR, MIN_TOP_SELLERS, MIN_YEAR};

/// Dashboard de vendas no terminal
#[derive(Parser)]
#[command(name = "vendas-tui")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// Print the aggregated tables without the TUI
    Report {
        /// Region filter: brasil, centro-oeste, nordeste, norte or sul
        #[arg(long, default_value = "brasil")]
        region: Region,

        /// Restrict to one year (2020-2023); omit for all periods
        #[arg(long, value_parser = parse_year)]
        year: Option<i32>,

        /// Restrict to these sellers (repeatable)
        #[arg(long = "seller")]
        sellers: Vec<String>,

        /// How many sellers the top rankings show (2-10)
        #[arg(long, default_value_t = 5, value_parser = parse_top)]
        top: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_year(s: &str) -> Result<i32, String> {
    let year: i32 = s.parse().map_err(|_| format!("invalid year '{}'", s))?;
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(format!(
            "year {} out of range ({}-{})",
            year, MIN_YEAR, MAX_YEAR
        ))
    }
}

fn parse_top(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("invalid count '{}'", s))?;
    if (MIN_TOP_SELLERS..=MAX_TOP_SELLERS).contains(&n) {
        Ok(n)
    } else {
        Err(format!(
            "count {} out of range ({}-{})",
            n, MIN_TOP_SELLERS, MAX_TOP_SELLERS
        ))
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            None | Some(Commands::Tui) => crate::tui::app::run(),
            Some(Commands::Report {
                region,
                year,
                sellers,
                top,
                json,
            }) => run_report(region, year, sellers, top, json),
        }
    }
}

fn run_report(
    region: Region,
    year: Option<i32>,
    sellers: Vec<String>,
    top: usize,
    json: bool,
) -> anyhow::Result<()> {
    let mut filters = Filters::default();
    filters.region = region;
    filters.year = match year {
        Some(y) => YearFilter::Year(y),
        None => YearFilter::All,
    };
    filters.sellers = sellers.into_iter().collect();
    filters.set_top_sellers(top);

    let client = SalesClient::new();
    let records = client.fetch(filters.region, filters.year)?;
    let tables = DashboardTables::from_records(&records, &filters);

    if json {
        println!("{}", serde_json::to_string_pretty(&tables)?);
    } else {
        print_report(&tables, &filters);
    }
    Ok(())
}

fn print_report(tables: &DashboardTables, filters: &Filters) {
    println!(
        "Dashboard de vendas — {} / {}",
        filters.region.label(),
        filters.year.label()
    );
    println!();
    println!("Receita:              {}", format_compact(tables.total_revenue, "R$"));
    println!("Quantidade de vendas: {}", format_number(tables.sale_count as u64));

    println!();
    println!("Receita por estado:");
    for row in &tables.state_revenue {
        println!(
            "  {:<20} {}  ({:.2}, {:.2})",
            row.place,
            format_compact(row.revenue, "R$"),
            row.lat,
            row.lon
        );
    }

    println!();
    println!("Receita mensal:");
    for row in &tables.monthly_revenue {
        println!(
            "  {:<20} {}",
            format!("{} {}", row.month_name, row.year),
            format_compact(row.revenue, "R$")
        );
    }

    println!();
    println!("Receita por categoria:");
    for row in &tables.category_revenue {
        println!(
            "  {:<20} {}",
            row.category,
            format_compact(row.revenue, "R$")
        );
    }

    println!();
    println!("Top {} vendedores (receita):", filters.top_sellers);
    for row in Aggregator::top_sellers_by_revenue(&tables.sellers, filters.top_sellers) {
        println!("  {:<20} {}", row.seller, format_compact(row.revenue, "R$"));
    }

    println!();
    println!(
        "Top {} vendedores (quantidade de vendas):",
        filters.top_sellers
    );
    for row in Aggregator::top_sellers_by_count(&tables.sellers, filters.top_sellers) {
        println!("  {:<20} {}", row.seller, format_number(row.count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["vendas-tui"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_report_defaults() {
        let cli = Cli::try_parse_from(["vendas-tui", "report"]).unwrap();
        match cli.command {
            Some(Commands::Report {
                region,
                year,
                sellers,
                top,
                json,
            }) => {
                assert_eq!(region, Region::Brasil);
                assert!(year.is_none());
                assert!(sellers.is_empty());
                assert_eq!(top, 5);
                assert!(!json);
            }
            _ => panic!("expected report subcommand"),
        }
    }

    #[test]
    fn test_cli_parse_report_full() {
        let cli = Cli::try_parse_from([
            "vendas-tui",
            "report",
            "--region",
            "nordeste",
            "--year",
            "2021",
            "--seller",
            "Ana",
            "--seller",
            "Beto",
            "--top",
            "8",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Report {
                region,
                year,
                sellers,
                top,
                json,
            }) => {
                assert_eq!(region, Region::Nordeste);
                assert_eq!(year, Some(2021));
                assert_eq!(sellers, vec!["Ana".to_string(), "Beto".to_string()]);
                assert_eq!(top, 8);
                assert!(json);
            }
            _ => panic!("expected report subcommand"),
        }
    }

    #[test]
    fn test_cli_rejects_year_out_of_range() {
        assert!(Cli::try_parse_from(["vendas-tui", "report", "--year", "2019"]).is_err());
        assert!(Cli::try_parse_from(["vendas-tui", "report", "--year", "2024"]).is_err());
    }

    #[test]
    fn test_cli_rejects_top_out_of_range() {
        assert!(Cli::try_parse_from(["vendas-tui", "report", "--top", "1"]).is_err());
        assert!(Cli::try_parse_from(["vendas-tui", "report", "--top", "11"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_region() {
        assert!(Cli::try_parse_from(["vendas-tui", "report", "--region", "sudeste"]).is_err());
    }
}
