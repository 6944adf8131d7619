use clap::{App, Arg, SubCommand};
use num_enum::TryFromPrimitive;

mod command_encode;
mod command_run;

#[derive(TryFromPrimitive, PartialEq, Copy, Clone)]
#[repr(u8)]
pub enum Verbosity {
    Silent = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
}

fn main() {
    let matches = App::new("Hustings CLI")
        .version("1.0")
        .about("Runs FPTP, AMS and STV elections from scenario files")
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity"),
        )
        .subcommand(
            SubCommand::with_name("run")
                .about("Run an election scenario end to end")
                .arg(
                    Arg::with_name("INPUT")
                        .index(1)
                        .required(false)
                        .help("Scenario file in JSON or CBOR format - can also be set with HUSTINGS_SCENARIO"),
                ),
        )
        .subcommand(
            SubCommand::with_name("encode")
                .about("Encode a name to its fixed-length hex form")
                .arg(
                    Arg::with_name("NAME")
                        .index(1)
                        .required(true)
                        .help("Constituency, candidate or party name"),
                ),
        )
        .get_matches();

    let verbosity = match matches.occurrences_of("v") {
        0 => Verbosity::Warn,
        _ => Verbosity::Info,
    };

    if let Some(matches) = matches.subcommand_matches("run") {
        command_run::run(matches, verbosity);
    }
    if let Some(matches) = matches.subcommand_matches("encode") {
        command_encode::encode(matches);
    }
}
