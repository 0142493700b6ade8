use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use green_tracker::{
    Accelerometer, ActivityEvent, ChannelSink, ChannelSource, GeoCoordinate, MotionSample,
    MotionTrackingSession, PositionUpdate, TrackerOptions,
};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Fix,
    Motion,
}

/// Recorded sensor row, either a fix or an accelerometer reading
#[derive(Debug, serde::Deserialize)]
struct RecordCsv {
    kind: Kind,
    latitude: Option<f64>,
    longitude: Option<f64>,
    speed: Option<f64>,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
}

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Input csv file with `kind,latitude,longitude,speed,x,y,z` rows
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("input.csv"), required = false)]
    pub input: PathBuf,
    /// Output file for detected activities as JSON lines, stdout if omitted. _Note_: will truncate old file if exists
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Fixes closer than this many meters are treated as GPS jitter
    #[arg(long, default_value_t = TrackerOptions::new().min_displacement)]
    pub min_displacement: f64,
    /// Number of accelerometer samples used for variance
    #[arg(long, default_value_t = TrackerOptions::new().window_size)]
    pub window_size: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Args {
        input,
        output,
        min_displacement,
        window_size,
    } = <Args as clap::Parser>::parse();

    let mut rdr = csv::Reader::from_reader(
        File::open(&input).map_err(|e| format!("Failed to read input file. Reason: {e}"))?,
    );

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|e| format!("Failed to create output file. Reason: {e}"))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    let options = TrackerOptions::new()
        .set_min_displacement(min_displacement)
        .set_window_size(window_size);

    let (sink, events) = ChannelSink::unbounded();
    let (positions, mut position_source) = ChannelSource::<PositionUpdate>::channel();
    let (samples, mut motion_source) = ChannelSource::<MotionSample>::channel();

    let mut session = MotionTrackingSession::new(options, sink);
    session.start(&mut position_source, &mut motion_source)?;

    for (line, record) in rdr.deserialize::<RecordCsv>().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                log::warn!("skipping row {}: {e}", line + 1);
                continue;
            }
        };

        match record {
            RecordCsv {
                kind: Kind::Fix,
                latitude: Some(latitude),
                longitude: Some(longitude),
                speed,
                ..
            } => positions.send(Ok(GeoCoordinate {
                latitude,
                longitude,
                speed,
            }))?,
            RecordCsv {
                kind: Kind::Motion,
                x: Some(x),
                y: Some(y),
                z: Some(z),
                ..
            } => samples.send(Accelerometer { x, y, z }.into())?,
            _ => {
                log::warn!("skipping incomplete row {}", line + 1);
                continue;
            }
        }

        session.poll()?;

        for event in events.try_iter() {
            write_event(&mut out, &event)?;
        }
    }

    let stats = session.stats();
    session.stop();

    out.flush()?;

    eprintln!(
        "Fixes: {}, anchored: {}, invalid: {}, jitter: {}, stationary: {}, emitted: {}",
        stats.fixes,
        stats.anchors,
        stats.invalid,
        stats.jitter,
        stats.stationary,
        stats.emitted
    );

    Ok(())
}

fn write_event(out: &mut dyn Write, event: &ActivityEvent) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer(&mut *out, event)?;
    out.write_all(b"\n")?;

    Ok(())
}
