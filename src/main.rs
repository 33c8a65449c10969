use anyhow::Context;
use backtester::{apply_exposure, CostModel};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::{Config, ZScoreWindow};
use core_types::TimeSeries;
use data::{CsvPriceProvider, PriceProvider};
use optimizer::{GridOutcome, GridSearch};
use portfolio::{run_momentum_portfolio, MomentumPortfolioParams};
use std::collections::BTreeMap;
use strategies::{classify_regimes, vol_z_score, RegimeExposureMap};
use volatility::VolEstimator;

/// The main entry point for the meridian backtesting application.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = configuration::load_config().context("failed to load config.toml")?;

    match cli.command {
        Commands::Backtest(args) => handle_backtest(args, &config),
        Commands::Regime(args) => handle_regime(args, &config),
        Commands::Grid(args) => handle_grid(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Backtests rule-based strategies over historical daily price series.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the momentum x vol-target strategy on a single asset.
    Backtest(BacktestArgs),
    /// Run the volatility-regime strategy on a single asset.
    Regime(RegimeArgs),
    /// Sweep the vol-target strategy over the configured parameter grid.
    Grid(GridArgs),
}

#[derive(Parser)]
struct BacktestArgs {
    /// The ticker to backtest (a CSV file of that name must exist).
    #[arg(long)]
    ticker: String,

    /// The start date of the backtest period (format: YYYY-MM-DD).
    #[arg(long)]
    from: NaiveDate,

    /// The end date of the backtest period (format: YYYY-MM-DD).
    #[arg(long)]
    to: NaiveDate,
}

#[derive(Parser)]
struct RegimeArgs {
    #[arg(long)]
    ticker: String,

    #[arg(long)]
    from: NaiveDate,

    #[arg(long)]
    to: NaiveDate,

    /// Use the EWMA volatility estimator instead of the rolling one.
    #[arg(long)]
    ewma: bool,
}

#[derive(Parser)]
struct GridArgs {
    /// The tickers forming the equal-weight portfolio.
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    tickers: Vec<String>,

    #[arg(long)]
    from: NaiveDate,

    #[arg(long)]
    to: NaiveDate,

    /// Emit the result table as JSON instead of a terminal table.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_backtest(args: BacktestArgs, config: &Config) -> anyhow::Result<()> {
    let provider = CsvPriceProvider::new(&config.data.csv_dir);
    let prices = provider.daily_closes(&args.ticker, args.from, args.to)?;
    println!(
        "Backtesting momentum x vol-target on {} over {} observations",
        args.ticker,
        prices.len()
    );

    let params = MomentumPortfolioParams {
        lookback: config.momentum.lookback,
        vol_window: config.volatility.window,
        target_vol: config.vol_target.target_vol,
        min_exposure: config.vol_target.min_exposure,
        max_exposure: config.vol_target.max_exposure,
        trading_days: config.backtest.trading_days,
    };

    let mut universe = BTreeMap::new();
    universe.insert(args.ticker.clone(), prices.clone());
    let outcome = run_momentum_portfolio(&universe, &params)?;

    let trading_days = config.backtest.trading_days;
    let gross = analytics::performance_report(
        &outcome.portfolio_returns,
        &outcome.equity,
        trading_days,
    )?;

    // Cost accounting over the exposure actually held.
    let cost_model = CostModel::new(config.backtest.cost_rate, trading_days)?;
    let exposure = &outcome.per_asset_exposure[&args.ticker];
    let turnover = cost_model.turnover(exposure);
    let annual_turnover = cost_model.annualized_turnover(&turnover)?;
    let net_returns = cost_model.net_returns(&outcome.portfolio_returns, &turnover);
    let net_equity = net_returns.accumulate();
    let net = analytics::performance_report(&net_returns, &net_equity, trading_days)?;

    // Buy-and-hold benchmark over the same range.
    let asset_returns = prices.log_returns()?;
    let bh_equity = asset_returns.accumulate();
    let buy_hold = analytics::performance_report(&asset_returns, &bh_equity, trading_days)?;

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Strategy (gross)", "Strategy (net)", "Buy & Hold"]);
    table.add_row(vec![
        "CAGR".to_string(),
        pct(gross.cagr),
        pct(net.cagr),
        pct(buy_hold.cagr),
    ]);
    table.add_row(vec![
        "Annualized Vol".to_string(),
        pct(gross.annualized_vol),
        pct(net.annualized_vol),
        pct(buy_hold.annualized_vol),
    ]);
    table.add_row(vec![
        "Sharpe".to_string(),
        num(gross.sharpe),
        num(net.sharpe),
        num(buy_hold.sharpe),
    ]);
    table.add_row(vec![
        "Max Drawdown".to_string(),
        pct(gross.max_drawdown),
        pct(net.max_drawdown),
        pct(buy_hold.max_drawdown),
    ]);
    table.add_row(vec![
        "Calmar".to_string(),
        num(gross.calmar),
        num(net.calmar),
        num(buy_hold.calmar),
    ]);
    println!("{table}");
    println!(
        "Annualized turnover: {annual_turnover:.2} (cost rate {} per unit)",
        config.backtest.cost_rate
    );
    println!("Final equity: gross {:.4}, net {:.4}", equity_final(&outcome.equity), equity_final(&net_equity));

    Ok(())
}

fn handle_regime(args: RegimeArgs, config: &Config) -> anyhow::Result<()> {
    let provider = CsvPriceProvider::new(&config.data.csv_dir);
    let prices = provider.daily_closes(&args.ticker, args.from, args.to)?;
    let returns = prices.log_returns()?;

    let estimator = if args.ewma {
        VolEstimator::Ewma {
            lambda: config.volatility.ewma_lambda,
        }
    } else {
        VolEstimator::Rolling {
            window: config.volatility.window,
        }
    };
    let trading_days = config.backtest.trading_days;
    let vol = estimator.annualized(&returns, trading_days)?;

    if config.regime.z_score_window == ZScoreWindow::FullHistory {
        println!(
            "Note: z-scores are standardized over the full history; regime labels \
             are retrospective and not reproducible in live trading."
        );
    }
    let z_scores = vol_z_score(&vol, config.regime.z_score_window)?;
    let regimes = classify_regimes(&z_scores, config.regime.threshold);
    let exposure_map = RegimeExposureMap::new(config.regime.exposure);
    let exposure = exposure_map.map_series(&regimes);
    let lagged = exposure.lag(1)?;

    let outcome = apply_exposure(&returns, &lagged)?;
    let report = analytics::performance_report(
        &outcome.strategy_returns,
        &outcome.equity,
        trading_days,
    )?;

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for &(_, regime) in regimes.points() {
        *counts.entry(regime.as_str()).or_insert(0) += 1;
    }
    println!(
        "Regime backtest for {} ({} estimator): {:?}",
        args.ticker,
        if args.ewma { "EWMA" } else { "rolling" },
        counts
    );

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["CAGR".to_string(), pct(report.cagr)]);
    table.add_row(vec!["Annualized Vol".to_string(), pct(report.annualized_vol)]);
    table.add_row(vec!["Sharpe".to_string(), num(report.sharpe)]);
    table.add_row(vec!["Max Drawdown".to_string(), pct(report.max_drawdown)]);
    table.add_row(vec!["Calmar".to_string(), num(report.calmar)]);
    println!("{table}");

    Ok(())
}

fn handle_grid(args: GridArgs, config: &Config) -> anyhow::Result<()> {
    let provider = CsvPriceProvider::new(&config.data.csv_dir);
    let mut returns_by_asset: BTreeMap<String, TimeSeries> = BTreeMap::new();
    for ticker in &args.tickers {
        let prices = provider.daily_closes(ticker, args.from, args.to)?;
        returns_by_asset.insert(ticker.clone(), prices.log_returns()?);
    }

    let search = GridSearch::new(
        config.grid.windows.clone(),
        config.grid.target_vols.clone(),
        config.vol_target.min_exposure,
        config.vol_target.max_exposure,
        config.backtest.trading_days,
    )?;
    let rows = search.run(&returns_by_asset)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Window", "Target Vol", "CAGR", "Sharpe", "Max DD", "Status"]);
    for row in &rows {
        match &row.outcome {
            GridOutcome::Completed { metrics } => {
                table.add_row(vec![
                    row.window.to_string(),
                    format!("{:.2}", row.target_vol),
                    pct(metrics.cagr),
                    num(metrics.sharpe),
                    pct(metrics.max_drawdown),
                    "ok".to_string(),
                ]);
            }
            GridOutcome::Failed { reason } => {
                table.add_row(vec![
                    row.window.to_string(),
                    format!("{:.2}", row.target_vol),
                    "-".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                    format!("failed: {reason}"),
                ]);
            }
        }
    }
    println!("{table}");

    Ok(())
}

// ==============================================================================
// Formatting Helpers
// ==============================================================================

fn pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn num(value: f64) -> String {
    format!("{value:.2}")
}

fn equity_final(equity: &TimeSeries) -> f64 {
    equity.last().map(|(_, v)| v).unwrap_or(f64::NAN)
}
