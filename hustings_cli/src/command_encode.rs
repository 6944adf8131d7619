use hustings::Name;

pub fn encode(matches: &clap::ArgMatches) {
    let input = match matches.value_of("NAME") {
        Some(input) => input,
        None => {
            eprintln!("hustings encode: name required");
            std::process::exit(1);
        }
    };

    // Hex input of the right width decodes back to the plain name
    if input.len() == hustings::NAME_LEN * 2 && input.chars().all(|c| c.is_ascii_hexdigit()) {
        match Name::from_hex(input) {
            Ok(name) => {
                println!("{}", name);
                return;
            }
            Err(e) => {
                eprintln!("hustings encode: {}", e);
                std::process::exit(1);
            }
        }
    }

    match Name::new(input) {
        Ok(name) => println!("{}", name.to_hex()),
        Err(e) => {
            eprintln!("hustings encode: {}", e);
            std::process::exit(1);
        }
    }
}
