//! Command-line interface for tibsearch
//!
//! Usage:
//!   tibsearch [OPTIONS] [TEXT]
//!   echo "pad+ma dang rig+pa" | tibsearch
//!
//! Options:
//!   -p, --profile <NAME>  chunk | tibetan | tibetan-filtered (default: chunk)
//!   -j, --json            Output as JSON
//!   -h, --help            Show help

use std::env;
use std::io::{self, BufRead};
use std::process;

use tibsearch::{Analyzer, Profile};

fn print_help() {
    eprintln!(
        r#"tibsearch - Tibetan and Wylie search-token analyzers

USAGE:
    tibsearch [OPTIONS] [TEXT]
    echo "pad+ma dang rig+pa" | tibsearch

OPTIONS:
    -p, --profile <NAME>  Analysis profile: chunk, tibetan, tibetan-filtered
                          (default: chunk)
    -j, --json            Output as JSON
    -h, --help            Show this help message

EXAMPLES:
    tibsearch "pad+ma dang rig+pa"
    tibsearch -p tibetan "བཀྲ་ཤིས་བདེ་ལེགས།"
    echo "rgyal po dang blon po" | tibsearch -j
"#
    );
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut profile = Profile::Chunk;
    let mut json_output = false;
    let mut text: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-j" | "--json" => {
                json_output = true;
            }
            "-p" | "--profile" => {
                i += 1;
                let name = match args.get(i) {
                    Some(name) => name,
                    None => {
                        eprintln!("Error: --profile requires a value");
                        process::exit(1);
                    }
                };
                profile = match Profile::from_name(name) {
                    Some(p) => p,
                    None => {
                        eprintln!("Error: unknown profile '{}'", name);
                        eprintln!("Valid profiles: chunk, tibetan, tibetan-filtered");
                        process::exit(1);
                    }
                };
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: unknown option '{}'", arg);
                print_help();
                process::exit(1);
            }
            arg => {
                text = Some(arg.to_string());
            }
        }
        i += 1;
    }

    // Read from stdin when no text argument is given
    let input = match text {
        Some(t) => t,
        None => {
            let stdin = io::stdin();
            let mut lines = Vec::new();
            for line in stdin.lock().lines() {
                match line {
                    Ok(l) => lines.push(l),
                    Err(e) => {
                        eprintln!("Error reading stdin: {}", e);
                        process::exit(1);
                    }
                }
            }
            lines.join("\n")
        }
    };

    let analyzer = Analyzer::new(profile);
    let tokens = match analyzer.analyze(&input) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if json_output {
        match serde_json::to_string_pretty(&tokens) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing tokens: {}", e);
                process::exit(1);
            }
        }
    } else {
        for token in &tokens {
            println!(
                "{}\t{}..{}\t+{}",
                token.text, token.start, token.end, token.position_increment
            );
        }
    }
}
