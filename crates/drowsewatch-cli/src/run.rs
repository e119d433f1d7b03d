//! The `run` subcommand: wire sample sources to workers and serve the API.
//!
//! Sample sources are plain byte/line streams (device nodes, FIFOs, or
//! captured files), one per channel:
//!
//! - visual: one CSV line of 24 floats per frame (12 landmark points, left
//!   eye then right eye); lines that do not parse are skipped like frames
//!   with no detected face
//! - heart rate: one ASCII integer per line
//! - cabin: raw ten-byte telemetry packets
//!
//! A channel whose source cannot be opened is logged and absent; it never
//! takes the rest of the system down.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use drowsewatch_cabin::PACKET_LEN;
use drowsewatch_core::{EyeLandmarks, EyePoint, PhoneNumber};
use drowsewatch_monitor::{
    create_router, run_cabin_worker, run_heart_rate_worker, run_visual_worker, AlertDispatcher,
    HeartRateMode, LoggingSmsTransport, MonitorConfig, MonitorStore, SmsAlertSink, SmsCredentials,
    VoiceAlertSink,
};

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Visual channel source: CSV eye-landmark lines, one per frame
    #[arg(long)]
    pub eye_input: Option<PathBuf>,

    /// Heart-rate channel source: one ASCII integer per line
    #[arg(long)]
    pub heart_rate_input: Option<PathBuf>,

    /// Cabin CO2 channel source: raw ten-byte telemetry packets
    #[arg(long)]
    pub cabin_input: Option<PathBuf>,

    /// Heart-rate detector deployment mode
    #[arg(long, value_enum, default_value = "deviation")]
    pub heart_rate_mode: HeartRateModeArg,

    /// Command API bind address
    #[arg(long, default_value = "127.0.0.1:8090")]
    pub listen: SocketAddr,

    /// Pre-register the alert recipient phone number
    #[arg(long)]
    pub recipient: Option<String>,

    /// Readings retained per channel in the monitoring snapshot
    #[arg(long, default_value_t = 600)]
    pub history: usize,
}

/// Heart-rate mode argument enum for CLI
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum HeartRateModeArg {
    Deviation,
    Batch,
}

impl From<HeartRateModeArg> for HeartRateMode {
    fn from(val: HeartRateModeArg) -> Self {
        match val {
            HeartRateModeArg::Deviation => HeartRateMode::Deviation,
            HeartRateModeArg::Batch => HeartRateMode::Batch,
        }
    }
}

/// Execute the run command.
pub async fn execute(args: RunArgs) -> Result<()> {
    let config = MonitorConfig::builder()
        .history_per_channel(args.history)
        .heart_rate_mode(args.heart_rate_mode.into())
        .build();

    let store = MonitorStore::new(config.history_per_channel);

    if let Some(recipient) = &args.recipient {
        let phone = PhoneNumber::parse(recipient)
            .map_err(|e| anyhow::anyhow!("invalid --recipient: {e}"))?;
        tracing::info!(phone = %phone, "Alert recipient pre-registered");
        store.set_recipient(phone);
    }

    let dispatcher = Arc::new(build_dispatcher(&store, &config));
    let worker_config = config.worker_config();
    let mut tasks = Vec::new();

    if let Some(path) = &args.eye_input {
        match File::open(path).await {
            Ok(file) => {
                let (tx, rx) = mpsc::channel(256);
                tasks.push(tokio::spawn(feed_landmarks(file, tx)));
                tasks.push(tokio::spawn(run_visual_worker(
                    store.clone(),
                    Arc::clone(&dispatcher),
                    worker_config.clone(),
                    rx,
                )));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "visual channel unavailable");
            }
        }
    }

    if let Some(path) = &args.heart_rate_input {
        match File::open(path).await {
            Ok(file) => {
                let (tx, rx) = mpsc::channel(256);
                tasks.push(tokio::spawn(feed_lines(file, tx)));
                tasks.push(tokio::spawn(run_heart_rate_worker(
                    store.clone(),
                    Arc::clone(&dispatcher),
                    worker_config.clone(),
                    config.heart_rate_mode,
                    rx,
                )));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "heart rate channel unavailable");
            }
        }
    }

    if let Some(path) = &args.cabin_input {
        match File::open(path).await {
            Ok(file) => {
                let (tx, rx) = mpsc::channel(256);
                tasks.push(tokio::spawn(feed_packets(file, tx)));
                tasks.push(tokio::spawn(run_cabin_worker(
                    store.clone(),
                    worker_config.clone(),
                    rx,
                )));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cabin channel unavailable");
            }
        }
    }

    let listener = TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("failed to bind command API on {}", args.listen))?;
    tracing::info!(addr = %args.listen, "Command API listening");

    let app = create_router(store.clone());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(store.clone()))
        .await
        .context("command API server failed")?;

    for task in tasks {
        let _ = task.await;
    }
    tracing::info!("drowsewatch stopped");

    Ok(())
}

fn build_dispatcher(store: &MonitorStore, config: &MonitorConfig) -> AlertDispatcher {
    let mut dispatcher = AlertDispatcher::new(store.clone(), config.alert_config.clone());
    dispatcher.add_sink(Box::new(VoiceAlertSink::console()));

    let sms = match SmsCredentials::from_env() {
        Some(credentials) => {
            tracing::info!(from = %credentials.from_number, "SMS gateway credentials loaded");
            SmsAlertSink::new(Box::new(LoggingSmsTransport::with_credentials(credentials)))
        }
        None => {
            tracing::warn!("no SMS gateway credentials in environment; SMS alerts are logged only");
            SmsAlertSink::logging()
        }
    };
    dispatcher.add_sink(Box::new(sms));
    dispatcher
}

/// Resolve when shutdown is requested, via the command API or Ctrl-C.
async fn shutdown_signal(store: MonitorStore) {
    let stop_requested = async {
        while store.is_running() {
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        }
    };

    tokio::select! {
        () = stop_requested => {
            tracing::info!("shutdown requested; stopping command API");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupt received; stopping");
            store.request_shutdown();
        }
    }
}

/// Feed newline-delimited text into a worker channel.
async fn feed_lines(file: File, tx: mpsc::Sender<String>) {
    let mut lines = BufReader::new(file).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(line).await.is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "line feed read error");
                break;
            }
        }
    }
}

/// Feed parsed eye-landmark frames into a worker channel.
///
/// Lines that do not parse carry no landmarks (the extractor found no
/// face that frame) and are skipped without touching classifier state.
async fn feed_landmarks(file: File, tx: mpsc::Sender<EyeLandmarks>) {
    let mut lines = BufReader::new(file).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_landmark_line(&line) {
                Some(landmarks) => {
                    if tx.send(landmarks).await.is_err() {
                        break;
                    }
                }
                None => tracing::trace!("no landmarks in frame line"),
            },
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "landmark feed read error");
                break;
            }
        }
    }
}

/// Feed fixed-size telemetry packets into a worker channel.
async fn feed_packets(file: File, tx: mpsc::Sender<Vec<u8>>) {
    let mut reader = BufReader::new(file);
    loop {
        let mut packet = vec![0u8; PACKET_LEN];
        match reader.read_exact(&mut packet).await {
            Ok(_) => {
                if tx.send(packet).await.is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => {
                tracing::warn!(error = %e, "packet feed read error");
                break;
            }
        }
    }
}

/// Parse one CSV frame line of 24 floats into eye landmarks.
fn parse_landmark_line(line: &str) -> Option<EyeLandmarks> {
    let values: Vec<f64> = line
        .split(',')
        .map(|field| field.trim().parse())
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    if values.len() != 24 {
        return None;
    }

    let mut points = values
        .chunks_exact(2)
        .map(|pair| EyePoint::new(pair[0], pair[1]));

    let mut left = [EyePoint::default(); 6];
    for slot in &mut left {
        *slot = points.next()?;
    }
    let mut right = [EyePoint::default(); 6];
    for slot in &mut right {
        *slot = points.next()?;
    }

    Some(EyeLandmarks::new(left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_landmark_line() {
        let line = (0..24).map(|i| i.to_string()).collect::<Vec<_>>().join(",");
        let landmarks = parse_landmark_line(&line).unwrap();
        assert!((landmarks.left[0].x - 0.0).abs() < f64::EPSILON);
        assert!((landmarks.left[0].y - 1.0).abs() < f64::EPSILON);
        assert!((landmarks.right[5].x - 22.0).abs() < f64::EPSILON);
        assert!((landmarks.right[5].y - 23.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_wrong_field_count() {
        let line = (0..23).map(|i| i.to_string()).collect::<Vec<_>>().join(",");
        assert!(parse_landmark_line(&line).is_none());
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let mut fields: Vec<String> = (0..24).map(|i| i.to_string()).collect();
        fields[7] = "x".to_string();
        assert!(parse_landmark_line(&fields.join(",")).is_none());
    }

    #[test]
    fn mode_argument_converts() {
        assert_eq!(
            HeartRateMode::from(HeartRateModeArg::Deviation),
            HeartRateMode::Deviation
        );
        assert_eq!(HeartRateMode::from(HeartRateModeArg::Batch), HeartRateMode::Batch);
    }

    #[tokio::test]
    async fn feed_lines_streams_a_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "70").unwrap();
        writeln!(tmp, "banner text").unwrap();
        writeln!(tmp, "68").unwrap();
        tmp.flush().unwrap();

        let file = File::open(tmp.path()).await.unwrap();
        let (tx, mut rx) = mpsc::channel(8);
        feed_lines(file, tx).await;

        let mut received = Vec::new();
        while let Some(line) = rx.recv().await {
            received.push(line);
        }
        assert_eq!(received, ["70", "banner text", "68"]);
    }

    #[tokio::test]
    async fn feed_packets_chunks_exactly_ten_bytes() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        // Two full packets plus a truncated tail that must be dropped.
        tmp.write_all(&[1u8; PACKET_LEN]).unwrap();
        tmp.write_all(&[2u8; PACKET_LEN]).unwrap();
        tmp.write_all(&[3u8; 4]).unwrap();
        tmp.flush().unwrap();

        let file = File::open(tmp.path()).await.unwrap();
        let (tx, mut rx) = mpsc::channel(8);
        feed_packets(file, tx).await;

        let mut received = Vec::new();
        while let Some(packet) = rx.recv().await {
            received.push(packet);
        }
        assert_eq!(received.len(), 2);
        assert_eq!(received[0], vec![1u8; PACKET_LEN]);
        assert_eq!(received[1], vec![2u8; PACKET_LEN]);
    }
}
