//! Generate command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::assets::AssetError;
use crate::output::with_default_extension;
use crate::session::{SaveOutcome, Selection, Session, SessionError};
use crate::shirt::{ShirtError, ShirtParams};

use super::{load_assets_or_report, load_or_report, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the generate command.
///
/// `scale` of `None` means "use the configured preview scale".
pub fn run_generate(
    config: Option<&Path>,
    ribbons: Vec<String>,
    commendations: Vec<String>,
    name: &str,
    golden: bool,
    output: Option<&Path>,
    scale: Option<u8>,
    strict: bool,
) -> ExitCode {
    let loaded = match load_or_report(config) {
        Ok(l) => l,
        Err(code) => return code,
    };

    let mut params = match ShirtParams::from_config(&loaded.config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    params.strict = strict;
    let scale = scale.unwrap_or(loaded.config.output.preview_scale);

    let assets = match load_assets_or_report(&loaded) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let mut session = Session::new(assets, params);

    let selection = Selection { ribbons, commendations, golden, ..Default::default() }.with_name(name);
    if selection.name != name {
        log::info!("Nametape text normalized to {:?}", selection.name);
    }

    match session.generate(&selection) {
        Ok((shirt, warnings)) => {
            for warning in &warnings {
                eprintln!("Warning: {}", warning.message);
            }
            log::info!("Generated {}x{} shirt", shirt.width(), shirt.height());
        }
        Err(SessionError::Generate(ShirtError::Asset(e @ AssetError::UnknownBadge { .. }))) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    let dest = output.map(with_default_extension);
    match session.save_scaled(dest.as_deref(), scale) {
        Ok(SaveOutcome::Saved) => {
            if let Some(path) = dest {
                println!("Saved {}", path.display());
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(SaveOutcome::Cancelled) => {
            eprintln!("No output file given, shirt not saved");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
