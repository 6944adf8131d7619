use crate::Verbosity;
use content_inspector::ContentType;
use hustings::{Election, Method, Operation};
use serde::Deserialize;
use uuid::Uuid;

/// A full election run: the admin, the method, and every operation in the
/// order it should be applied.
#[derive(Deserialize)]
struct Scenario {
    admin: Uuid,
    method: Method,
    /// Chamber size under AMS
    #[serde(default)]
    total_seats: u32,
    operations: Vec<ScenarioOperation>,
}

#[derive(Deserialize)]
struct ScenarioOperation {
    /// Defaults to the admin
    caller: Option<Uuid>,
    #[serde(flatten)]
    operation: Operation,
}

pub fn run(matches: &clap::ArgMatches, verbosity: Verbosity) {
    let env_var = std::env::var("HUSTINGS_SCENARIO");
    let filename = match matches.value_of("INPUT") {
        Some(filename) => filename,
        None => match env_var.as_ref() {
            Ok(filename) => filename.as_str(),
            Err(_) => {
                eprintln!("hustings run: scenario filename required");
                std::process::exit(1);
            }
        },
    };

    let file_bytes = match std::fs::read(filename) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("hustings run: unable to read {}: {}", filename, e);
            std::process::exit(1);
        }
    };

    let scenario: Scenario = match content_inspector::inspect(&file_bytes) {
        ContentType::UTF_8 => serde_json::from_slice(&file_bytes).unwrap_or_else(|e| {
            eprintln!("hustings run: unable to read {}: {}", filename, e);
            std::process::exit(1);
        }),
        ContentType::BINARY => serde_cbor::from_slice(&file_bytes).unwrap_or_else(|e| {
            eprintln!("hustings run: unable to read {}: {}", filename, e);
            std::process::exit(1);
        }),
        _ => {
            eprintln!("hustings run: invalid file format for {}", filename);
            std::process::exit(1);
        }
    };

    let mut election = Election::new(scenario.admin, scenario.method, scenario.total_seats);
    for (index, step) in scenario.operations.into_iter().enumerate() {
        let caller = step.caller.unwrap_or(scenario.admin);
        if let Err(e) = election.apply(caller, step.operation) {
            eprintln!("hustings run: operation {} failed: {}", index, e);
            std::process::exit(1);
        }
    }

    if verbosity as u8 >= 3 {
        println!(
            "{} election: {} constituencies, {} seats, {} ballots",
            election.method(),
            election.number_of_constituencies(),
            election.number_of_seats(),
            election.number_of_votes()
        );
    }

    for event in election.events() {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => {
                eprintln!("hustings run: unable to serialize event: {}", e);
                std::process::exit(1);
            }
        }
    }

    if let Ok(results) = election.results() {
        for (party, totals) in &results.party_totals {
            println!("{}: {} seats", party, totals.total_seats);
        }
        if let Some(winner) = &results.overall_winner {
            println!("winner: {}", winner);
        }
    }
}
