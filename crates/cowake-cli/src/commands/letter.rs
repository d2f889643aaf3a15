//! Letter commands for CLI.

use clap::Subcommand;
use cowake_core::letter::{lock, read, save, unlock};
use cowake_core::storage::{Config, SqliteStore};

#[derive(Subcommand)]
pub enum LetterAction {
    /// Try the passphrase
    Unlock {
        /// Passphrase attempt (case and surrounding spaces ignored)
        passphrase: String,
    },
    /// Print the letter
    Show,
    /// Replace the letter text
    Save {
        /// New letter text
        text: String,
    },
    /// Re-engage the gate
    Lock,
}

pub fn run(action: LetterAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = SqliteStore::open()?;

    match action {
        LetterAction::Unlock { passphrase } => {
            let config = Config::load_or_default();
            if unlock(&mut store, &passphrase, &config.letter.passphrase)? {
                println!("Letter unlocked.");
            } else {
                return Err("wrong passphrase".into());
            }
        }
        LetterAction::Show => println!("{}", read(&store)?),
        LetterAction::Save { text } => {
            save(&mut store, &text)?;
            println!("Letter saved.");
        }
        LetterAction::Lock => {
            lock(&mut store)?;
            println!("Letter locked.");
        }
    }
    Ok(())
}
