//! Racing CLI - terminal view of the sample race card

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use racing::core::filter::RaceFilter;
use racing::data::{extract_time, RaceCatalog};
use racing::models::{Race, Trend};
use racing::predictor::FallbackPredictor;

#[derive(Parser)]
#[command(name = "racing")]
#[command(author, version, about = "Horse racing dashboard CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List races, optionally filtered
    Races {
        /// Track name ("all" for every track)
        #[arg(short, long)]
        track: Option<String>,

        /// Earliest jump time, e.g. "2:00 PM"
        #[arg(long)]
        from: Option<String>,

        /// Latest jump time, e.g. "5:00 PM"
        #[arg(long)]
        to: Option<String>,

        /// Only featured races
        #[arg(long)]
        featured: bool,
    },

    /// Show the field for a race
    Show {
        /// Race id (e.g. hr1)
        id: String,
    },

    /// Odds-based prediction for a race
    Predict {
        /// Race id (e.g. hr1)
        id: String,
    },

    /// Biggest market moves
    Movers,

    /// Longshot tips
    Roughies,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let catalog = RaceCatalog::sample();

    println!("{}", format!("Racing CLI v{}", env!("CARGO_PKG_VERSION")).cyan().bold());
    println!();

    match cli.command {
        Some(Commands::Races {
            track,
            from,
            to,
            featured,
        }) => {
            let filter = RaceFilter {
                track,
                time_from: from,
                time_to: to,
                featured: featured.then_some(true),
            };
            list_races(&catalog, &filter);
        }
        Some(Commands::Show { id }) => show_race(find_race(&catalog, &id)?),
        Some(Commands::Predict { id }) => predict_race(find_race(&catalog, &id)?)?,
        Some(Commands::Movers) => show_movers(&catalog),
        Some(Commands::Roughies) => show_roughies(&catalog),
        None => println!("Use --help for usage information."),
    }

    Ok(())
}

fn find_race<'a>(catalog: &'a RaceCatalog, id: &str) -> Result<&'a Race> {
    match catalog.get(id) {
        Some(race) => Ok(race),
        None => bail!(
            "Race {} not found (available: {})",
            id,
            catalog
                .races()
                .iter()
                .map(|r| r.id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn trend_label(trend: Trend, value: f64) -> String {
    let text = format!("{:+.2}", value);
    match trend {
        Trend::Up => format!("▲ {}", text).green().to_string(),
        Trend::Down => format!("▼ {}", text).red().to_string(),
        Trend::Stable => format!("- {}", text).dimmed().to_string(),
    }
}

fn list_races(catalog: &RaceCatalog, filter: &RaceFilter) {
    let result = filter.apply(catalog.races());

    if result.races.is_empty() {
        println!("{}", "No races match these filters.".red());
        return;
    }

    println!(
        "{:<5} {:<10} {:<15} {:<5} {:>6} {:<14} {}",
        "ID", "Time", "Track", "State", "Dist", "Class", "Going"
    );
    println!("{}", "-".repeat(72));

    for race in &result.races {
        let time = extract_time(&race.name).unwrap_or_else(|| "-".to_string());
        let line = format!(
            "{:<5} {:<10} {:<15} {:<5} {:>5}m {:<14} {}",
            race.id, time, race.track, race.state, race.distance, race.class, race.going
        );
        if race.featured {
            println!("{} {}", line, "★".yellow());
        } else {
            println!("{}", line);
        }
    }

    println!();
    if filter.is_empty() {
        println!("{} race(s)", result.count);
    } else {
        println!("{} of {} race(s) match", result.count, catalog.races().len());
    }
}

fn show_race(race: &Race) {
    println!("{}", race.name.yellow().bold());
    println!(
        "{} ({}) | {}m | {} | {} | {}",
        race.track, race.state, race.distance, race.class, race.prize, race.going
    );
    println!();

    println!(
        "{:>3} {:<20} {:>7} {:>7} {:<16} {:<24} {:>5} {:<8} {}",
        "No", "Horse", "Win", "Place", "Jockey", "Trainer", "Kg", "Form", "Trend"
    );
    println!("{}", "-".repeat(105));

    for horse in &race.horses {
        println!(
            "{:>3} {:<20} {:>7.2} {:>7.2} {:<16} {:<24} {:>5.1} {:<8} {}",
            horse.number,
            horse.name,
            horse.odds,
            horse.place_odds,
            horse.jockey,
            horse.trainer,
            horse.weight,
            horse.form,
            trend_label(horse.trend, horse.trend_value)
        );
    }
}

fn predict_race(race: &Race) -> Result<()> {
    let prediction = FallbackPredictor::new()
        .predict(race)
        .with_context(|| format!("Failed to predict race {}", race.id))?;

    println!("{}: {}", "Predicting".green(), race.name);
    println!();
    println!(
        "  {:<12} {}",
        "Top pick:".bold(),
        prediction.top_pick.unwrap_or_default().green().bold()
    );
    println!(
        "  {:<12} {}",
        "Second:".bold(),
        prediction.second_pick.unwrap_or_default()
    );
    println!("  {:<12} {}%", "Confidence:".bold(), prediction.confidence);
    println!("  {:<12} {}", "Bet type:".bold(), prediction.bet_type);
    println!();
    println!("  {}", prediction.analysis);

    Ok(())
}

fn show_movers(catalog: &RaceCatalog) {
    println!("{}", "Market Movers".yellow().bold());
    println!("{:>3} {:<20} {:<15} {:>8} {:>7}", "#", "Horse", "Track", "Odds", "Change");
    println!("{}", "-".repeat(57));

    for mover in catalog.market_movers() {
        let change = match mover.direction {
            Trend::Up => mover.change.green(),
            Trend::Down => mover.change.red(),
            Trend::Stable => mover.change.normal(),
        };
        println!(
            "{:>3} {:<20} {:<15} {:>8.2} {:>7}",
            mover.position, mover.horse, mover.track, mover.current_odds, change
        );
    }
}

fn show_roughies(catalog: &RaceCatalog) {
    let roughies = catalog.roughies();
    if roughies.is_empty() {
        println!("{}", "No roughies on today's card.".red());
        return;
    }

    println!("{}", "Roughies".yellow().bold());
    for roughie in &roughies {
        println!(
            "{} {} ({}) ${:.2} {}",
            "•".cyan(),
            roughie.horse.bold(),
            roughie.race,
            roughie.odds,
            trend_label(roughie.trend, roughie.trend_value)
        );
        println!("    {}", roughie.reason.dimmed());
    }
}
