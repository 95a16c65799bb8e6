use std::{
    fs::File,
    io::{self, BufRead, BufReader},
};

use anyhow::{Context, Result};
use console_bank::{
    bin_utils::{Console, logger::init_console_logger},
    config::BankConfig,
    service::Bank,
};

fn main() -> Result<()> {
    init_console_logger();
    let config = BankConfig::from_env().context("Failed to load bank configuration")?;

    // an optional script replays a session instead of reading the terminal
    let input: Box<dyn BufRead> = match std::env::args().nth(1) {
        Some(filename) => {
            let file =
                File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let console = Console {
        input,
        output: &mut io::stdout(),
        bank: Bank::new(config),
    };
    console.run()
}
