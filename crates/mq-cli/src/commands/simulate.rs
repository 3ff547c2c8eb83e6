use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use mq_core::{CharacterId, Role};
use mq_dialogue::{Interaction, InterrogateOption};
use mq_simulation::{Difficulty, Game, GameConfig, GameEventKind, GamePhase, Outcome};

pub struct Options {
    pub difficulty: Difficulty,
    pub seed: u64,
    pub cheat: bool,
    pub reveal: bool,
    pub verbose: bool,
    pub json: bool,
}

/// The autoplayer cycles through these, one guest per round.
const QUESTIONS: [Interaction; 6] = [
    Interaction::Talk,
    Interaction::Interrogate(InterrogateOption::Number),
    Interaction::Interrogate(InterrogateOption::DidntShow),
    Interaction::Interrogate(InterrogateOption::HasTalked),
    Interaction::Interrogate(InterrogateOption::OneOfThree),
    Interaction::Befriend,
];

pub fn run(catalog: Option<&Path>, opts: Options) -> Result<(), String> {
    let catalogs = super::load_catalogs(catalog)?;
    let config = GameConfig::default().with_seed(opts.seed);
    let mut game = Game::new(config, catalogs);
    game.start_new_game(opts.difficulty)
        .map_err(|e| format!("game setup failed: {e}"))?;

    while !game.phase().is_over() {
        play_round(&mut game, opts.cheat)?;
    }

    if opts.json {
        let json = serde_json::to_string_pretty(game.events().events())
            .map_err(|e| format!("failed to serialize events: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "  {} {}",
        "Masquerade".bold(),
        format!("({}, seed={})", opts.difficulty, opts.seed).dimmed()
    );
    println!(
        "  {} guests, {} rounds played, {} events logged",
        game.manor().characters().len(),
        game.round(),
        game.events().len()
    );
    println!();

    if opts.verbose {
        println!("  {}", "Event Log".bold().underline());
        println!();
        for event in game.events().events() {
            let round_label = format!("[round {:>2}]", event.round).dimmed();
            println!("  {round_label} {}", colorize_event(&event.kind, &event.description));
        }
        println!();
    }

    let outcome = match game.phase().outcome() {
        Some(Outcome::Won) => "won".green().bold(),
        Some(Outcome::Lost) => "lost".red().bold(),
        None => "unfinished".normal(),
    };
    println!("  Outcome:    {outcome}");
    println!("  Reputation: {}", game.reputation());
    println!("  Unmasked:   {}", game.score());
    println!();

    if opts.reveal {
        print_reveal(&game);
    }
    Ok(())
}

/// One round of autoplay: advance, answer any forced guess, question someone,
/// then run the event phase.
fn play_round(game: &mut Game, cheat: bool) -> Result<(), String> {
    let phase = game.advance_turn().map_err(|e| e.to_string())?;

    if let GamePhase::ForcedGuess { candidates } = phase {
        let (id, role) = pick_forced_guess(game, &candidates, cheat)
            .ok_or_else(|| "forced guess without candidates".to_string())?;
        game.select_for_guessing(id).map_err(|e| e.to_string())?;
        game.resolve_forced_guess(id, role)
            .map_err(|e| e.to_string())?;
    }
    if game.phase() != &GamePhase::InProgress {
        return Ok(());
    }

    if let Some(id) = pick_guest(game) {
        let question = QUESTIONS[game.round() as usize % QUESTIONS.len()];
        game.select_character(id).map_err(|e| e.to_string())?;
        let statement = game.interact(id, question).map_err(|e| e.to_string())?;
        log::debug!("{id} answered {question}: {}", statement.text);
    }
    game.event_phase().map_err(|e| e.to_string())?;
    Ok(())
}

/// Talk to the first visible guest in the home room, or anyone visible.
fn pick_guest(game: &Game) -> Option<CharacterId> {
    let home = game.manor().graph().home();
    game.visible_characters(home)
        .first()
        .map(|c| c.id)
        .or_else(|| {
            game.manor()
                .graph()
                .kinds()
                .into_iter()
                .find_map(|room| game.visible_characters(room).first().map(|c| c.id))
        })
}

/// With `cheat`, name a non-target guest correctly so play continues.
/// Otherwise guess the first candidate is the first role not yet exposed.
fn pick_forced_guess(
    game: &Game,
    candidates: &[CharacterId],
    cheat: bool,
) -> Option<(CharacterId, Role)> {
    if cheat {
        let target = game.target_role();
        return candidates
            .iter()
            .filter_map(|id| game.manor().character(*id))
            .find(|c| Some(c.true_role()) != target)
            .or_else(|| candidates.first().and_then(|id| game.manor().character(*id)))
            .map(|c| (c.id, c.true_role()));
    }
    let id = *candidates.first()?;
    let role = game
        .used_roles()
        .iter()
        .copied()
        .find(|r| !game.is_character_guessed(*r))?;
    Some((id, role))
}

fn print_reveal(game: &Game) {
    println!("  {}", "Guests".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Guest", "Mask", "Role", "Influence", "Room"]);

    for entry in game.reveal() {
        let mask = entry
            .mask
            .map(|m| m.to_string())
            .unwrap_or_else(|| "unmasked".to_string());
        let role = if entry.is_target {
            format!("{} (target)", entry.role)
        } else {
            entry.role.to_string()
        };
        table.add_row(vec![
            entry.character.to_string(),
            mask,
            role,
            entry.influence.to_string(),
            entry.room.to_string(),
        ]);
    }

    println!("{table}");
    println!();
}

fn colorize_event(kind: &GameEventKind, description: &str) -> colored::ColoredString {
    match kind {
        GameEventKind::GameEnded { won: true } => description.green().bold(),
        GameEventKind::GameEnded { won: false } => description.red().bold(),
        GameEventKind::ForcedGuess { .. } => description.yellow().bold(),
        GameEventKind::Demasked { .. } => description.green(),
        GameEventKind::MasksSwapped { .. } => description.magenta(),
        GameEventKind::RoomChanged { .. } => description.blue(),
        GameEventKind::Statement { .. } => description.cyan(),
        GameEventKind::RoundChanged { .. } => description.bold(),
        GameEventKind::GameStarted { .. }
        | GameEventKind::CharacterSelected { .. }
        | GameEventKind::CharacterSelectedForGuessing { .. } => description.normal(),
    }
}
