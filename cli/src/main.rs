//! Finds doglegs in a road network snapshot and reports the ones that won't produce good
//! navigation instructions.

#[macro_use]
extern crate log;

mod overlay;
mod settings;

use anyhow::Result;
use geojson::GeoJson;
use structopt::StructOpt;

use abstutil::Timer;
use dogleg::{Scan, Thresholds};
use map_model::Map;

use crate::settings::{ScriptState, Settings};

#[derive(StructOpt)]
#[structopt(name = "falcon_eye", about = "Checks highway forks for badly drawn doglegs")]
enum Command {
    /// Detect and validate every dogleg in a map
    Scan {
        /// The path to a JSON road network snapshot
        map: String,
        /// The zoom level the map is being viewed at. Nothing is checked when zoomed out further
        /// than the configured limit.
        #[structopt(long, default_value = "17")]
        zoom: u32,
        /// The path to the settings file
        #[structopt(long, default_value = "falcon_eye_settings.json")]
        settings: String,
        /// Overrides the stored setting. When true, only the first problem of each fork is
        /// reported.
        #[structopt(long)]
        energy_saving: Option<bool>,
        /// Write a GeoJSON overlay highlighting every dogleg here
        #[structopt(long)]
        overlay: Option<String>,
        /// Write the full results as JSON here
        #[structopt(long)]
        report: Option<String>,
    },
    /// Print the rules a dogleg has to follow
    Rules,
    /// Change and store settings
    Settings {
        /// The path to the settings file
        #[structopt(long, default_value = "falcon_eye_settings.json")]
        path: String,
        #[structopt(long)]
        enabled: Option<bool>,
        #[structopt(long)]
        energy_saving: Option<bool>,
        #[structopt(long)]
        check_from_zoom: Option<u32>,
        /// Go back to the defaults before applying anything else
        #[structopt(long)]
        reset: bool,
    },
}

fn main() -> Result<()> {
    abstutil::logger::setup();

    match Command::from_args() {
        Command::Scan {
            map,
            zoom,
            settings,
            energy_saving,
            overlay,
            report,
        } => {
            let settings = Settings::load(&settings);
            run_scan(
                map,
                settings.state(zoom),
                energy_saving.unwrap_or(settings.energy_saving),
                overlay,
                report,
            )?
        }
        Command::Rules => {
            for rule in Thresholds::default().describe_rules() {
                println!("{}", rule);
            }
        }
        Command::Settings {
            path,
            enabled,
            energy_saving,
            check_from_zoom,
            reset,
        } => {
            let mut settings = if reset {
                Settings::default()
            } else {
                Settings::load(&path)
            };
            if let Some(x) = enabled {
                settings.script_enabled = x;
            }
            if let Some(x) = energy_saving {
                settings.energy_saving = x;
            }
            if let Some(x) = check_from_zoom {
                settings.check_from_zoom = x;
            }
            settings.save(&path)?;
            println!("{}", abstutil::to_json(&settings)?);
        }
    }
    Ok(())
}

fn run_scan(
    path: String,
    state: ScriptState,
    short_circuit: bool,
    overlay: Option<String>,
    report: Option<String>,
) -> Result<()> {
    match state {
        ScriptState::Enabled => {}
        ScriptState::Disabled => {
            info!("Checking is disabled");
            return Ok(());
        }
        ScriptState::ZoomDisabled => {
            info!("Zoomed out too far, not checking anything");
            return Ok(());
        }
    }

    let mut timer = Timer::new("scan for doglegs");
    let map = Map::load(&path, &mut timer)?;
    let scan = dogleg::check_segments(&map, &Thresholds::default(), short_circuit, &mut timer);
    print_summary(&scan);

    if let Some(path) = overlay {
        let gj = GeoJson::from(crate::overlay::make_overlay(&map, &scan.findings));
        abstutil::write_json(&path, &gj)?;
    }
    if let Some(path) = report {
        abstutil::write_json(&path, &scan)?;
    }
    Ok(())
}

fn print_summary(scan: &Scan) {
    for result in scan.invalid() {
        let problems: Vec<String> = result
            .reported_failures()
            .into_iter()
            .map(|(check, m)| match m {
                Some(m) => format!("{:?} ({})", check, m),
                None => format!("{:?} (not enough geometry)", check),
            })
            .collect();
        println!("{}: {}", result.candidate, problems.join(", "));
    }
    for (id, err) in &scan.errors {
        println!("{}: {}", id, err);
    }
    println!(
        "{} doglegs, {} invalid",
        scan.num_candidates,
        scan.invalid().count()
    );
}
