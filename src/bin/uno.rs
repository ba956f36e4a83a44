use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use uno_duel::game::DEFAULT_SEED;
use uno_duel::{
    Bot, Game, GameBuilder, HumanBot, MachineBot, SaveStore, TurnOutcome, describe_report,
    play_match,
};

#[derive(Parser, Debug)]
#[command(name = "uno", about = "Play Uno against the machine.")]
struct Args {
    /// Seed for shuffling and the machine's color choices
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Directory where games are saved and looked up
    #[arg(short = 'd', long = "save-dir", default_value = ".")]
    save_dir: PathBuf,

    /// Name used when saving on quit
    #[arg(short = 'n', long = "save-name", default_value = "saved_game")]
    save_name: String,

    /// Resume a saved game instead of starting a new one
    #[arg(short = 'l', long = "load")]
    load: Option<String>,

    /// List saved games and exit
    #[arg(long = "list", action = ArgAction::SetTrue)]
    list: bool,

    /// Let the machine play both seats
    #[arg(long = "watch", action = ArgAction::SetTrue)]
    watch: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let store = SaveStore::new(&args.save_dir);

    if args.list {
        let saves = store.list()?;
        if saves.is_empty() {
            println!("No saved games in {}.", store.base_dir().display());
        }
        for (index, name) in saves.iter().enumerate() {
            println!("  {}. {name}", index + 1);
        }
        return Ok(());
    }

    let mut game = match &args.load {
        Some(name) => match store.load(name)? {
            Some(game) => {
                println!("Loading {name}...");
                game
            }
            None => {
                println!("No saved game found for '{name}'. Starting a new game.");
                GameBuilder::new().with_seed(args.seed).build()?
            }
        },
        None => GameBuilder::new().with_seed(args.seed).build()?,
    };
    if game.is_finished() {
        println!("That game is already over.");
        return Ok(());
    }

    println!("\n--- THE GAME BEGINS! ---");
    println!("Table card: {}", game.table_card());

    let mut machine = MachineBot::new(StdRng::seed_from_u64(args.seed ^ game.turn()));
    let mut human: Box<dyn Bot> = if args.watch {
        Box::new(MachineBot::new(StdRng::seed_from_u64(!args.seed)))
    } else {
        Box::new(HumanBot::stdio("Player"))
    };

    let outcome = play_match(&mut game, human.as_mut(), &mut machine, |_: &Game, report| {
        print!("{}", describe_report(report));
    })?;

    match outcome {
        TurnOutcome::HumanQuit => {
            let path = store.save(&args.save_name, &game)?;
            println!("Game saved to {}. See you later!", path.display());
        }
        TurnOutcome::RoundOver { winner } => {
            info!("round finished after {} half-turns", game.turn());
            println!("Winner: {winner}.");
        }
        TurnOutcome::Continue => {}
    }
    Ok(())
}
