//! Command Line Interface for the constant-product impermanent loss model.
mod output;

use amm_il_domain::enums::OptionSide;
use amm_il_domain::metrics::ImpermanentLoss;
use amm_il_domain::model::PositionModel;
use amm_il_domain::options::PutOption;
use amm_il_domain::value_objects::{DepositParameters, PriceDomain};
use amm_il_simulation::curve::CurveGenerator;
use amm_il_simulation::hedge::HedgedCurveGenerator;
use amm_il_simulation::monte_carlo::MonteCarloRunner;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use output::OutputFormat;
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "amm-il")]
#[command(
    about = "Impermanent loss of a constant-product LP position versus holding",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct DepositArgs {
    /// Price of the base asset at deposit (e.g. ETH in USDC)
    #[arg(long, env = "AMM_IL_INITIAL_PRICE", default_value = "1600")]
    initial_price: Decimal,

    /// Capital deposited, in quote units
    #[arg(long, env = "AMM_IL_CAPITAL", default_value = "10000")]
    capital: Decimal,
}

impl DepositArgs {
    fn to_params(&self) -> Result<DepositParameters> {
        DepositParameters::new(self.initial_price, self.capital).context("invalid deposit")
    }
}

#[derive(Args, Debug, Clone)]
struct DomainArgs {
    /// Lowest price to sample
    #[arg(long, env = "AMM_IL_MIN_PRICE", default_value = "800")]
    min_price: Decimal,

    /// Highest price to sample
    #[arg(long, env = "AMM_IL_MAX_PRICE", default_value = "3200")]
    max_price: Decimal,

    /// Number of sampled prices, endpoints included
    #[arg(long, env = "AMM_IL_POINTS", default_value_t = 200)]
    points: usize,
}

impl DomainArgs {
    fn to_domain(&self) -> Result<PriceDomain> {
        PriceDomain::new(self.min_price, self.max_price, self.points)
            .context("invalid price domain")
    }
}

#[derive(Args, Debug, Clone)]
struct PutRangeArgs {
    /// Lowest price of the put's payoff range; widens the sampled domain
    #[arg(long, requires = "put_max_price")]
    put_min_price: Option<Decimal>,

    /// Highest price of the put's payoff range
    #[arg(long, requires = "put_min_price")]
    put_max_price: Option<Decimal>,
}

/// The LP domain, merged with the put range when one is given.
///
/// The merged domain keeps the LP domain's point count.
fn hedge_domain(lp: &PriceDomain, put_range: &PutRangeArgs) -> Result<PriceDomain> {
    match (put_range.put_min_price, put_range.put_max_price) {
        (Some(min), Some(max)) => {
            let put_domain =
                PriceDomain::new(min, max, lp.count).context("invalid put price range")?;
            Ok(lp.merged_with(&put_domain, lp.count)?)
        }
        _ => Ok(*lp),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SideArg {
    Buy,
    Sell,
}

impl From<SideArg> for OptionSide {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Buy => OptionSide::Buy,
            SideArg::Sell => OptionSide::Sell,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print HODL value, LP value and impermanent loss over a price range
    Curve {
        #[command(flatten)]
        deposit: DepositArgs,

        #[command(flatten)]
        domain: DomainArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Overlay a put option payoff at expiry on the LP value
    Hedge {
        #[command(flatten)]
        deposit: DepositArgs,

        #[command(flatten)]
        domain: DomainArgs,

        #[command(flatten)]
        put_range: PutRangeArgs,

        /// Put strike price
        #[arg(long, env = "AMM_IL_PUT_STRIKE")]
        strike: Decimal,

        /// Premium per contract
        #[arg(long, env = "AMM_IL_PUT_PREMIUM", default_value = "0")]
        premium: Decimal,

        /// Number of contracts
        #[arg(long, env = "AMM_IL_PUT_QUANTITY", default_value = "1")]
        quantity: Decimal,

        /// Whether the put is bought or written
        #[arg(long, value_enum, default_value_t = SideArg::Buy)]
        side: SideArg,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Distribution of impermanent loss after a simulated GBM horizon
    MonteCarlo {
        #[command(flatten)]
        deposit: DepositArgs,

        /// Annualized drift
        #[arg(long, default_value_t = 0.0)]
        drift: f64,

        /// Annualized volatility
        #[arg(long, default_value_t = 0.8)]
        volatility: f64,

        /// Horizon in days (one step per day)
        #[arg(short, long, default_value_t = 30)]
        days: usize,

        /// Number of simulated paths
        #[arg(short, long, default_value_t = 1000)]
        iterations: usize,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Curve {
            deposit,
            domain,
            format,
        } => {
            let params = deposit.to_params()?;
            let domain = domain.to_domain()?;
            let model = PositionModel::create(params)?;
            let split = model.position();
            debug!(
                k = %model.invariant(),
                base = %split.base_amount,
                quote = %split.quote_amount,
                "Position model created"
            );

            info!(
                min = %domain.min,
                max = %domain.max,
                points = domain.count,
                "Generating valuation curve"
            );
            let curve = CurveGenerator::generate(&model, &domain)
                .context("price domain must stay above zero")?;

            match format {
                OutputFormat::Json => println!("{}", output::to_json(model.params(), &curve)?),
                OutputFormat::Table => {
                    output::curve_table(&curve).printstd();
                    if let Some(worst) = curve.worst_loss() {
                        let loss = ImpermanentLoss::from(worst);
                        println!(
                            "\nLargest impermanent loss: {:.4}% at price {:.2} (${:.2})",
                            loss.percentage_loss, worst.price.value, loss.absolute_loss
                        );
                    }
                }
            }
        }
        Commands::Hedge {
            deposit,
            domain,
            put_range,
            strike,
            premium,
            quantity,
            side,
            format,
        } => {
            let params = deposit.to_params()?;
            let domain = hedge_domain(&domain.to_domain()?, put_range)?;
            let model = PositionModel::create(params)?;
            let put = PutOption::new(*strike, *premium, *quantity, (*side).into())
                .context("invalid put option")?;

            info!(
                strike = %put.strike,
                side = %put.side,
                min = %domain.min,
                max = %domain.max,
                points = domain.count,
                "Generating hedged curve"
            );
            let samples = HedgedCurveGenerator::generate(&model, &put, &domain)
                .context("price domain must not go below zero")?;

            match format {
                OutputFormat::Json => println!("{}", output::to_json(model.params(), &samples)?),
                OutputFormat::Table => {
                    output::hedged_table(&samples).printstd();
                    println!("\nPut breakeven: {:.2}", put.breakeven().value);
                }
            }
        }
        Commands::MonteCarlo {
            deposit,
            drift,
            volatility,
            days,
            iterations,
            seed,
            format,
        } => {
            let params = deposit.to_params()?;
            let runner = MonteCarloRunner {
                params,
                drift: *drift,
                volatility: *volatility,
                time_step: 1.0 / 365.0,
                steps: *days,
                iterations: *iterations,
                seed: *seed,
            };

            info!(
                paths = runner.iterations,
                days = runner.steps,
                volatility = runner.volatility,
                "Running Monte Carlo"
            );
            let dist = runner.run().context("monte carlo run failed")?;

            match format {
                OutputFormat::Json => println!("{}", output::to_json(&params, &dist)?),
                OutputFormat::Table => output::distribution_table(&dist).printstd(),
            }
        }
    }

    Ok(())
}
