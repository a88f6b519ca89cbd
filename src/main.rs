use std::time::Duration;
use anyhow::{Context, Error, Result};
use chrono::Utc;
use log::*;
use structopt::StructOpt;

use detox::{App, Category, FileSource, FileStore, Schema, ThreadRandom, Tick, Ticker, TimerState};
use detox::view;

#[derive(Debug, StructOpt)]
#[structopt(name = "detox", about = "Browse a CSV content catalog, keep favorites, run a countdown")]
struct Opt {
    /// Catalog CSV file
    #[structopt(long, default_value = "content.csv")]
    csv: String,

    /// Column layout of the catalog
    #[structopt(long, default_value = "content", possible_values = &["content", "places"])]
    schema: String,

    /// Where favorites are kept
    #[structopt(long, default_value = "~/.config/detox")]
    state_dir: String,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// List the distinct categories
    Categories,
    /// Show a record from a category
    Show {
        /// Category to show, or "all"
        #[structopt(short, long, default_value = "all")]
        category: Category,
        /// Pick at random instead of the first match
        #[structopt(short, long)]
        random: bool,
        #[structopt(flatten)]
        filters: Filters,
        /// Add the shown record to favorites
        #[structopt(long)]
        save: bool,
    },
    /// Show every matching record
    List {
        /// Category to list, or "all"
        #[structopt(short, long, default_value = "all")]
        category: Category,
        #[structopt(flatten)]
        filters: Filters,
    },
    /// Random category, random record
    Surprise {
        #[structopt(long)]
        save: bool,
    },
    /// Tip of the week
    Tip,
    Favorites(FavoritesCommand),
    /// Count down, one tick per second
    Timer {
        #[structopt(short, long, default_value = "900")]
        seconds: u32,
    },
}

#[derive(Debug, StructOpt)]
struct Filters {
    /// Only records with the schema's flag set (spooky places)
    #[structopt(long)]
    flagged: bool,
    /// Only cafes and food spots
    #[structopt(long)]
    cafe: bool,
}

#[derive(Debug, StructOpt)]
enum FavoritesCommand {
    List,
    Remove { index: usize },
    Clear {
        /// Skip the confirmation refusal
        #[structopt(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let opt = Opt::from_args();
    debug!("{:?}", opt);

    match opt.cmd {
        Command::Timer { seconds } => run_timer(seconds),
        cmd => run_catalog(&opt.csv, &opt.schema, &opt.state_dir, cmd),
    }
}

fn run_catalog(csv: &str, schema: &str, state_dir: &str, cmd: Command) -> Result<()> {
    let schema = Schema::by_name(schema)
        .ok_or_else(|| Error::msg(format!("Unknown schema {}", schema)))?;
    let store = FileStore::open(state_dir)?;
    let source = FileSource::new(csv);
    let mut app = App::load(&source, schema, store, ThreadRandom)
        .with_context(|| format!("Unable to load catalog {}", csv))?;

    match cmd {
        Command::Categories => {
            for c in app.categories() {
                println!("{}", c);
            }
        }
        Command::Show { category, random, filters, save } => {
            app.set_category(category);
            apply_filters(&mut app, &filters);
            if random {
                app.show_random();
            } else {
                app.show_first();
            }
            save_selected(&mut app, save)?;
            print!("{}", app.view());
        }
        Command::List { category, filters } => {
            app.set_category(category);
            apply_filters(&mut app, &filters);
            let cards = app.cards();
            if cards.is_empty() {
                println!("Nothing found for the current filters.");
            }
            for card in cards {
                println!("{}", card);
            }
        }
        Command::Surprise { save } => {
            app.surprise();
            save_selected(&mut app, save)?;
            print!("{}", app.view());
        }
        Command::Tip => match app.tip_of_week(Utc::now()) {
            Some(tip) => println!("{}\n  {}", tip.title, tip.text),
            None => println!("No tips in this catalog."),
        },
        Command::Favorites(FavoritesCommand::List) => {
            println!("{}", view::favorites_text(app.schema(), &app.favorites()));
        }
        Command::Favorites(FavoritesCommand::Remove { index }) => {
            app.remove_favorite(index)?;
            println!("{}", view::favorites_text(app.schema(), &app.favorites()));
        }
        Command::Favorites(FavoritesCommand::Clear { yes }) => {
            if !yes {
                println!("Clear all favorites? Re-run with --yes to confirm.");
                return Ok(());
            }
            app.clear_favorites()?;
            println!("{}", view::favorites_text(app.schema(), &app.favorites()));
        }
        Command::Timer { seconds } => return run_timer(seconds),
    }
    Ok(())
}

fn apply_filters<S, R>(app: &mut App<S, R>, filters: &Filters)
where
    S: detox::KeyValueStore,
    R: detox::RandomSource,
{
    if filters.flagged {
        app.set_flagged_only(true);
    }
    app.set_cafe_only(filters.cafe);
}

fn save_selected<S, R>(app: &mut App<S, R>, save: bool) -> Result<()>
where
    S: detox::KeyValueStore,
    R: detox::RandomSource,
{
    if save && !app.favorite_selected()? {
        warn!("Nothing selected, nothing saved");
    }
    Ok(())
}

fn run_timer(seconds: u32) -> Result<()> {
    let mut timer = detox::Countdown::new(seconds);
    eprint!("{}", timer);
    let state = Ticker::every(Duration::from_secs(1)).run(&mut timer, |t, tick| {
        eprint!("\r{}", t);
        if tick == Tick::Expired {
            eprintln!();
            println!("Time is up! Take a deep breath and notice how you feel.");
        }
        true
    });
    if state != TimerState::Expired {
        eprintln!();
    }
    Ok(())
}
