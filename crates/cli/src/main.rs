mod report;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use packwise_core::{PlanRun, Rarity, WildcardBudget};
use packwise_data::load_inputs;
use report::{format_plan, format_ranking, visible_scores, PlanOutput, RankOutput};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "packwise",
    version,
    about = "Rank booster products by needed-card value and plan wildcard crafts"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank products for the cards still missing from the deck
    Rank(InputArgs),
    /// Spend wildcards, then rank again
    Plan {
        #[command(flatten)]
        input: InputArgs,
        /// Rare wildcards available
        #[arg(long, default_value_t = 0)]
        rare: u32,
        /// Mythic wildcards available
        #[arg(long, default_value_t = 0)]
        mythic: u32,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Directory holding deck.txt, printings.json, pools.json and the optional
    /// collection.txt and config.json
    #[arg(short = 'd', long = "data", value_name = "DIR", default_value = "assets/sample")]
    data: PathBuf,
    /// Only plan with printings of this rarity; repeatable
    #[arg(long = "rarity", value_name = "RARITY", value_parser = parse_rarity)]
    rarities: Vec<Rarity>,
    /// Products shown per ranking
    #[arg(long, default_value_t = 10)]
    top: usize,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl InputArgs {
    fn allowed(&self) -> Vec<Rarity> {
        if self.rarities.is_empty() {
            Rarity::ALL.to_vec()
        } else {
            self.rarities.clone()
        }
    }
}

fn parse_rarity(value: &str) -> Result<Rarity, String> {
    Rarity::from_id(value).ok_or_else(|| format!("unknown rarity '{value}' (use rare or mythic)"))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Rank(input) => rank(&input),
        Command::Plan {
            input,
            rare,
            mythic,
        } => plan(&input, WildcardBudget::new(rare, mythic)),
    }
}

fn rank(input: &InputArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&input.data, &input.allowed())
        .with_context(|| format!("load {}", input.data.display()))?;
    let run = PlanRun::new(&inputs.config, &inputs.pools, inputs.cards);
    let ranked = run.rank();

    if input.json {
        let output = RankOutput {
            ranked: visible_scores(&ranked, input.top),
            skipped: &inputs.skipped,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }
    print!(
        "{}",
        format_ranking("Product ranking", &ranked, &inputs.config, input.top)
    );
    print_skipped(&inputs.skipped);
    Ok(())
}

fn plan(input: &InputArgs, budget: WildcardBudget) -> anyhow::Result<()> {
    let inputs = load_inputs(&input.data, &input.allowed())
        .with_context(|| format!("load {}", input.data.display()))?;
    let run = PlanRun::new(&inputs.config, &inputs.pools, inputs.cards);
    let report = run.plan(budget);

    if input.json {
        let output = PlanOutput {
            report: &report,
            skipped: &inputs.skipped,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }
    print!("{}", format_plan(&report, &inputs.config, input.top));
    print_skipped(&inputs.skipped);
    Ok(())
}

fn print_skipped(skipped: &[String]) {
    if skipped.is_empty() {
        return;
    }
    println!();
    println!("Skipped (no usable printing): {}", skipped.join(", "));
}
