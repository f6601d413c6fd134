use clap::{Parser, Subcommand};
use rand::Rng;
use twogether_core::room_code::{RoomCode, ROOM_CODE_ALPHABET, ROOM_CODE_LEN};

mod simulate;

#[derive(Parser)]
#[command(name = "twogether-cli", version, about = "Session tools for EscapeTwogether")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Rooms {
        #[command(subcommand)]
        command: RoomCommand,
    },
    /// Run a headless scripted playthrough against the real session runtime.
    Simulate(simulate::SimulateArgs),
}

#[derive(Subcommand)]
enum RoomCommand {
    /// Generate a join code, or validate one passed with --code.
    Code {
        #[arg(long)]
        code: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Rooms { command } => match command {
            RoomCommand::Code { code } => {
                let code = match code {
                    Some(raw) => RoomCode::parse(&raw)?.to_string(),
                    None => generate_room_code(),
                };
                println!("room_code: {code}");
            }
        },
        Commands::Simulate(args) => simulate::run(args)?,
    }

    Ok(())
}

fn generate_room_code() -> String {
    let mut rng = rand::rng();
    let alphabet = ROOM_CODE_ALPHABET.as_bytes();
    let mut code = String::with_capacity(ROOM_CODE_LEN);
    for _ in 0..ROOM_CODE_LEN {
        let idx = rng.random_range(0..alphabet.len());
        code.push(alphabet[idx] as char);
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use twogether_core::is_valid_room_code;

    #[test]
    fn generated_codes_validate() {
        for _ in 0..32 {
            assert!(is_valid_room_code(&generate_room_code()));
        }
    }
}
