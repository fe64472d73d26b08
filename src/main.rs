use chrono::{Duration, TimeZone, Utc};
use csv::Writer;
use log::{info, warn};
use orbiscope::config::SimulationConfig;
use orbiscope::coordinates::GeodeticPoint;
use orbiscope::errors::SimulationError;
use orbiscope::physics::energy::specific_energy;
use orbiscope::scheduling::{FixedClock, OverflightScheduler, WallClock};
use orbiscope::simulation::{AddSatelliteRequest, Simulation};
use std::env;
use std::error::Error;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

const FRAME_MS: f64 = 1000.0 / 60.0;
const DEFAULT_DURATION_S: f64 = 600.0;

/// `orbiscope [LAT LON [SECONDS]]`, falling back to the configured location.
fn reference_location(
    args: &[String],
    config: &SimulationConfig,
) -> Result<GeodeticPoint, String> {
    match args {
        [lat, lon, ..] => {
            let latitude: f64 = lat.parse().map_err(|e| format!("latitude '{}': {}", lat, e))?;
            let longitude: f64 = lon.parse().map_err(|e| format!("longitude '{}': {}", lon, e))?;
            GeodeticPoint::new(latitude, longitude).map_err(|e| e.to_string())
        }
        _ => config
            .default_location
            .ok_or_else(|| "no location given and none configured".to_string()),
    }
}

/// One CSV row per satellite at the current simulated time.
fn write_trace<W: Write>(writer: &mut Writer<W>, simulation: &Simulation) -> Result<(), SimulationError> {
    let gm = simulation.config().gm;
    for sat in simulation.satellites() {
        let eccentricity = sat.elements.map(|e| e.eccentricity).unwrap_or(0.0);
        let energy = specific_energy(sat.radius, sat.radial_velocity, sat.angular_momentum, gm);
        writer.write_record(&[
            format!("{:.3}", simulation.elapsed()),
            sat.name.clone(),
            sat.radius.to_string(),
            sat.radial_velocity.to_string(),
            sat.true_anomaly_angle.to_string(),
            eccentricity.to_string(),
            energy.to_string(),
            sat.state.to_string(),
        ])?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = SimulationConfig::load()?;
    let duration_s = match args.get(2) {
        Some(s) => s.parse::<f64>().map_err(SimulationError::from)?,
        None => DEFAULT_DURATION_S,
    };

    let location = reference_location(&args, &config);
    let mut simulation = Simulation::start(location, config)?;

    // A custom satellite and one of each preset alongside the demo set
    let requests = [
        AddSatelliteRequest::parse("0.15", "0.06", "150"),
        AddSatelliteRequest::preset("circular", "Circular"),
        AddSatelliteRequest::preset("elliptical", "Elliptical"),
        AddSatelliteRequest::preset("escape", "Escape"),
        AddSatelliteRequest::preset("suborbital", "Suborbital"),
    ];
    for request in requests {
        match request.and_then(|r| simulation.add_satellite(r)) {
            Ok(_) => {}
            Err(e) if e.is_user_facing() => warn!("Skipping satellite: {}", e),
            Err(e) => return Err(e.into()),
        }
    }
    for line in simulation.summary() {
        info!("{}", line);
    }

    let output_dir = Path::new("output");
    fs::create_dir_all(output_dir)?;
    let file = File::create(output_dir.join("orbit_trace.csv"))?;
    let mut writer = Writer::from_writer(file);
    writer.write_record([
        "Time (s)",
        "Satellite",
        "Radius",
        "Radial Velocity",
        "Angle (rad)",
        "Eccentricity",
        "Specific Energy",
        "State",
    ])?;

    let start = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .ok_or("invalid start time")?;
    let scheduler = OverflightScheduler::new(FixedClock::new(start));

    let frames = (duration_s * 1000.0 / FRAME_MS).ceil() as usize;
    let mut next_schedule_s = 0.0;
    for frame in 0..=frames {
        let timestamp_ms = frame as f64 * FRAME_MS;
        for event in simulation.on_frame(timestamp_ms) {
            warn!(
                "{} {} at t={:.2}s (r={:.3})",
                event.name, event.state, event.time, event.radius
            );
        }

        if simulation.elapsed() < next_schedule_s {
            continue;
        }
        next_schedule_s += 1.0;

        let elapsed_ms = (simulation.elapsed() * 1000.0).round() as i64;
        scheduler.clock().set(start + Duration::milliseconds(elapsed_ms));
        let schedule = scheduler.refresh(simulation.satellites(), simulation.config());
        for (i, interval) in schedule.intervals.iter().enumerate() {
            info!(
                "Free interval {}: {}",
                i + 1,
                serde_json::to_string(&interval.report())?
            );
        }

        write_trace(&mut writer, &simulation)?;
    }

    writer.flush()?;
    info!(
        "{} satellites remain after {:.0}s at {}",
        simulation.satellites().len(),
        simulation.elapsed(),
        scheduler.clock().now().to_rfc3339()
    );
    println!("Orbit trace has been written to output/orbit_trace.csv");

    Ok(())
}
