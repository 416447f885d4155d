//! Terminal collaborators: prompts on stdin, narration on stdout.

use async_trait::async_trait;
use dice_duel_core::{
    DiceSet, DuelEvent, DuelResult, InputRequest, InputSource, Party, PlayerInput,
    ProbabilityTable, RandomStep, Reporter,
};
use dice_duel_core::duel::TracingReporter;
use prettytable::{row, Cell, Table};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tracing::warn;

/// Reads one selection per request from a line-oriented reader
pub struct ConsoleInput<R> {
    lines: Lines<BufReader<R>>,
    dice: DiceSet,
}

impl<R: AsyncRead + Unpin + Send> ConsoleInput<R> {
    pub fn new(reader: R, dice: DiceSet) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            dice,
        }
    }

    fn print_menu(&self, request: &InputRequest) {
        match request {
            InputRequest::FirstMoveGuess => println!("Try to guess my selection."),
            InputRequest::DieChoice { .. } => println!("Choose your dice:"),
            InputRequest::RollContribution { modulus, .. } => {
                println!("Add your number modulo {}.", modulus)
            }
        }
        for option in request.options() {
            match request {
                InputRequest::DieChoice { .. } => {
                    let faces = self
                        .dice
                        .get(option as usize)
                        .map(|die| die.to_string())
                        .unwrap_or_default();
                    println!("{} - {}", option, faces);
                }
                _ => println!("{} - {}", option, option),
            }
        }
        println!("X - exit");
        println!("? - help");
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> InputSource for ConsoleInput<R> {
    async fn request(&mut self, request: &InputRequest) -> PlayerInput {
        loop {
            self.print_menu(request);
            print!("Your selection: ");
            if let Err(err) = std::io::stdout().flush() {
                warn!(error = %err, "failed to flush prompt");
            }

            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                // Closed or unreadable input ends the duel.
                Ok(None) | Err(_) => return PlayerInput::Cancel,
            };
            if line.trim() == "?" {
                println!("{}", help_text(&self.dice));
                continue;
            }
            return PlayerInput::from_token(&line);
        }
    }
}

/// Narrates duel events in the first person of the system player
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    modulus: u32,
    log: TracingReporter,
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: &DuelEvent) {
        self.log.report(event);
        match event {
            DuelEvent::CommitmentPublished {
                step,
                modulus,
                digest,
            } => {
                self.modulus = *modulus;
                match step {
                    RandomStep::FirstMove => println!("Let's determine who makes the first move."),
                    RandomStep::SystemRoll => println!("It's time for my roll."),
                    RandomStep::UserRoll => println!("It's time for your roll."),
                }
                println!(
                    "I selected a random value in the range 0..{} (HMAC={}).",
                    modulus - 1,
                    digest
                );
            }
            DuelEvent::InputLocked { .. } => {}
            DuelEvent::SecretDisclosed {
                step,
                key,
                value,
                counterparty,
                result,
            } => match step {
                RandomStep::FirstMove => {
                    println!("My selection: {} (KEY={}).", value, key.to_hex())
                }
                RandomStep::SystemRoll | RandomStep::UserRoll => {
                    println!("My number is {} (KEY={}).", value, key.to_hex());
                    println!(
                        "The fair number generation result is {} + {} = {} (mod {}).",
                        value, counterparty, result, self.modulus
                    );
                }
            },
            DuelEvent::FirstMover { party } => match party {
                Party::System => println!("I make the first move."),
                Party::User => println!("You make the first move."),
            },
            DuelEvent::DieChosen { party, die, .. } => match party {
                Party::System => println!("I choose the [{}] dice.", die),
                Party::User => println!("You choose the [{}] dice.", die),
            },
            DuelEvent::RollResolved { party, face, .. } => match party {
                Party::System => println!("My roll result is {}.", face),
                Party::User => println!("Your roll result is {}.", face),
            },
            DuelEvent::Finished { outcome } => match outcome.result {
                DuelResult::UserWins => println!(
                    "You win ({} > {})!",
                    outcome.user_face, outcome.system_face
                ),
                DuelResult::SystemWins => println!(
                    "I win ({} < {})!",
                    outcome.user_face, outcome.system_face
                ),
                DuelResult::Tie => println!(
                    "It's a tie ({} = {})!",
                    outcome.user_face, outcome.system_face
                ),
            },
            DuelEvent::Aborted { .. } => println!("Duel aborted."),
        }
    }
}

/// Help screen: rules and the win probability table
pub fn help_text(dice: &DiceSet) -> String {
    let mut out = String::new();
    out.push_str("Each side rolls its own die; the higher face wins.\n");
    out.push_str("Every random value is committed with an HMAC before you answer,\n");
    out.push_str("and the key is shown afterwards so you can check it.\n");
    out.push_str("Probability of the win for the user:\n");
    out.push_str(&render_table(dice, &ProbabilityTable::from_dice(dice)));
    out
}

/// Rows are the user's die, columns the system's
pub fn render_table(dice: &DiceSet, table: &ProbabilityTable) -> String {
    let labels: Vec<String> = dice.iter().map(|die| die.to_string()).collect();

    let mut out = Table::new();
    let mut titles = row![b->"User dice v"];
    for label in &labels {
        titles.add_cell(Cell::new(label).style_spec("b"));
    }
    out.set_titles(titles);

    for (user, label) in labels.iter().enumerate() {
        let mut row = row![label];
        for system in 0..labels.len() {
            let p = table.get(user, system).unwrap_or_default();
            row.add_cell(Cell::new(&format!("{:.4}", p)));
        }
        out.add_row(row);
    }
    out.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_duel_core::DuelConfig;

    fn dice() -> DiceSet {
        DiceSet::validate(
            &["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"],
            &DuelConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_render_table() {
        let dice = dice();
        let rendered = render_table(&dice, &ProbabilityTable::from_dice(&dice));

        assert!(rendered.contains("User dice v"));
        assert!(rendered.contains("2, 2, 4, 4, 9, 9"));
        assert!(rendered.contains("0.5556"));
        // title row and one row per user die
        let rows: Vec<&str> = rendered.lines().filter(|l| l.starts_with('|')).collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[1].contains("2, 2, 4, 4, 9, 9"));
        assert!(rows[1].contains("0.3333"));
        assert!(rows[1].contains("0.4444"));
    }

    #[tokio::test]
    async fn test_console_input_parses_lines() {
        let reader: &[u8] = b"?\n1\nx\n";
        let mut input = ConsoleInput::new(reader, dice());

        let request = InputRequest::FirstMoveGuess;
        assert_eq!(input.request(&request).await, PlayerInput::Number(1));
        assert_eq!(input.request(&request).await, PlayerInput::Cancel);
        // end of input
        assert_eq!(input.request(&request).await, PlayerInput::Cancel);
    }
}
