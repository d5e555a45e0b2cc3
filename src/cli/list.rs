//! List command implementation

use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use crate::assets::{load_badges, BadgeLibrary};

use super::{load_or_report, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Serialize)]
struct BadgeListing<'a> {
    ribbons: Vec<&'a str>,
    commendations: Vec<&'a str>,
}

/// Execute the list command.
///
/// Only the badge directories are loaded, so this works before the
/// templates and font are in place.
pub fn run_list(config: Option<&Path>, json: bool) -> ExitCode {
    let loaded = match load_or_report(config) {
        Ok(l) => l,
        Err(code) => return code,
    };
    let assets = &loaded.config.assets;

    let libraries = load_badges(&loaded.root.join(&assets.ribbons)).and_then(|ribbons| {
        load_badges(&loaded.root.join(&assets.commendations)).map(|c| (ribbons, c))
    });
    let (ribbons, commendations) = match libraries {
        Ok(libs) => libs,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        let listing = BadgeListing {
            ribbons: ribbons.names().collect(),
            commendations: commendations.names().collect(),
        };
        match serde_json::to_string_pretty(&listing) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print_section("Ribbons", &ribbons);
        println!();
        print_section("Commendations", &commendations);
    }

    ExitCode::from(EXIT_SUCCESS)
}

fn print_section(title: &str, library: &BadgeLibrary) {
    println!("{} ({})", title, library.len());
    for badge in library.iter() {
        println!("  {} ({}x{})", badge.name, badge.image.width(), badge.image.height());
    }
}
