/// Interactive Liar's Dice against the heuristic player
///
/// Usage:
///   cargo run --bin play_liars_dice -- [--d1 5] [--d2 5] [--sides 6] [--variant joker] [--first y|n|r] [--seed 7]
///
/// Enter a call as two digits (24 = two fours), "lie" to call a bluff, "q" to quit.
/// RUST_LOG=debug (or --verbose) shows every engine transition.

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use liars_dice::human::HumanProvider;
use liars_dice::play::{play_round_with, Seat};
use liars_dice::utils::{DEFAULT_DICE_PER_PLAYER, DEFAULT_SIDES};
use liars_dice::{DecisionProvider, DiceConfig, GameError, HeuristicPolicy, Outcome, Player, PolicyProvider, RandomRolls, Round, Variant};

#[derive(Parser, Debug)]
#[command(name = "play_liars_dice", about = "Play a round of Liar's Dice against the computer")]
struct Args {
    /// Dice rolled by the opener
    #[arg(long, default_value_t = DEFAULT_DICE_PER_PLAYER)]
    d1: u8,
    /// Dice rolled by the second player
    #[arg(long, default_value_t = DEFAULT_DICE_PER_PLAYER)]
    d2: u8,
    #[arg(long, default_value_t = DEFAULT_SIDES)]
    sides: u8,
    /// normal, joker or stairs
    #[arg(long, default_value = "normal")]
    variant: Variant,
    /// y = you open, n = the computer opens, r = watch two computers
    #[arg(long)]
    first: Option<Seat>,
    /// Seed for dice and computer choices
    #[arg(long)]
    seed: Option<u64>,
    /// Computer always takes its best scoring move instead of sampling
    #[arg(long)]
    greedy: bool,
    #[arg(long)]
    verbose: bool,
}

fn prompt(question: &str) -> io::Result<String> {
    print!("{question}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_lowercase())
}

fn ask_seat() -> io::Result<Seat> {
    loop {
        if let Ok(seat) = prompt("Do you want to go first? [y/n/r] ")?.parse::<Seat>() {
            return Ok(seat);
        }
    }
}

fn computer(args: &Args, rng: &mut StdRng) -> Box<dyn DecisionProvider> {
    let policy = HeuristicPolicy::new(args.variant);
    let rng = StdRng::from_rng(rng);
    if args.greedy { Box::new(PolicyProvider::greedy(policy, rng)) }
    else { Box::new(PolicyProvider::sampling(policy, rng)) }
}

fn report(round: &Round, outcome: &Outcome, names: &[String; 2]) {
    println!();
    println!("> The rolls were {} and {}.", round.hand(Player::P1), round.hand(Player::P2));
    if outcome.bid_was_truthful() {
        println!("> The call {} was valid! ({} on the table)", outcome.final_bid, outcome.total_matching);
        println!("> The {} loses!", names[outcome.loser.index()]);
    } else {
        println!("> The call {} was a bluff! ({} on the table)", outcome.final_bid, outcome.total_matching);
        println!("> The {} wins!", names[outcome.winner().index()]);
    }
    println!();
}

fn play_one(args: &Args, config: DiceConfig, seat: Seat, rng: &mut StdRng) -> liars_dice::Result<()> {
    let mut round = Round::deal(config, &mut RandomRolls(&mut *rng))?;

    let names: [String; 2] = match seat.human() {
        Some(Player::P1) => ["Player".to_string(), "AI".to_string()],
        Some(Player::P2) => ["AI".to_string(), "Player".to_string()],
        None => ["AI 1".to_string(), "AI 2".to_string()],
    };
    if let Some(human) = seat.human() {
        println!("> You rolled {}!", round.hand(human));
    }

    let mut providers: [Box<dyn DecisionProvider>; 2] = match seat.human() {
        Some(Player::P1) => [Box::new(HumanProvider::stdio()), computer(args, rng)],
        Some(Player::P2) => [computer(args, rng), Box::new(HumanProvider::stdio())],
        None => [computer(args, rng), computer(args, rng)],
    };
    let [p1, p2] = &mut providers;
    let outcome = play_round_with(&mut round, [p1.as_mut(), p2.as_mut()], |player, action| {
        println!();
        println!("> The {} called {}!", names[player.index()], action);
    })?;
    drop(providers);

    report(&round, &outcome, &names);
    Ok(())
}

fn run(args: Args) -> liars_dice::Result<()> {
    let config = DiceConfig::new(args.sides, args.d1, args.d2, args.variant)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Liar's Dice: {}v{} dice, {} sides, {} rules", args.d1, args.d2, args.sides, args.variant);
    println!("═══════════════════════════════════════════════════════════════");

    let mut rounds = 0;
    loop {
        let seat = match args.first {
            Some(seat) => seat,
            None => ask_seat()?,
        };
        match play_one(&args, config, seat, &mut rng) {
            Ok(()) => rounds += 1,
            Err(GameError::Quit) => break,
            Err(err) => return Err(err),
        }
        match prompt("Play again? (y/n): ")?.as_str() {
            "y" | "yes" => continue,
            _ => break,
        }
    }
    println!("\nRounds played: {rounds}. Thanks for playing!");
    Ok(())
}

fn main() {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
