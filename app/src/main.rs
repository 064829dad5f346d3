mod frame;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use nuscenes_dataset::NuScenes;
use scene_exporter::{FrameRenderer as _, RerunRenderer};

use crate::frame::{build_frame_scene, frame_tokens, ViewerError};

const DEFAULT_DATAROOT: &str = "/data/sets/nuscenes";
const DEFAULT_VERSION: &str = "v1.0-mini";
const APP_ID: &str = "nusc_viewer";

#[derive(Parser, Debug)]
#[command(
    name = "nuScenes Viewer",
    about = "Shows the top lidar sweep and ground-truth boxes of nuScenes samples",
    version
)]
struct Cli {
    #[arg(short, long, default_value = DEFAULT_DATAROOT, value_name = "DIR")]
    dataroot: PathBuf,

    #[arg(long, default_value = DEFAULT_VERSION)]
    dataset_version: String,

    /// Only show the scene at this index
    #[arg(long)]
    scene: Option<usize>,

    /// Step through every key frame instead of the first sample of each scene
    #[arg(long)]
    all_samples: bool,

    /// Do not wait for Enter between frames
    #[arg(long)]
    no_wait: bool,

    /// Write an .rrd recording instead of spawning the viewer
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,
}

/// Blocks until a line is read. Returns `false` once the input is exhausted.
fn wait_for_enter(input: &mut impl BufRead) -> Result<bool, ViewerError> {
    log::info!("press Enter for the next frame");
    let mut line = String::new();
    Ok(input.read_line(&mut line)? > 0)
}

fn run(args: Cli) -> Result<(), ViewerError> {
    log::info!("loading dataset . . .");
    let nusc = NuScenes::load(&args.dataroot, &args.dataset_version)?;
    log::info!("number of scenes in {}: {}", nusc.version(), nusc.scenes().len());

    let tokens = frame_tokens(&nusc, args.scene, args.all_samples)?;
    log::info!("{} frame(s) to show", tokens.len());

    let mut renderer = match &args.save {
        Some(path) => {
            log::info!("recording to {:?}", path);
            RerunRenderer::save(APP_ID, path)?
        }
        None => RerunRenderer::spawn(APP_ID)?,
    };

    let mut stdin = std::io::stdin().lock();
    for (index, token) in tokens.iter().enumerate() {
        let start_local = std::time::Instant::now();
        let sample = nusc.sample(token)?;
        let scene = nusc.scene(&sample.scene_token)?;
        log::info!("frame {} of {} ({}): sample {}", index + 1, tokens.len(), scene.name, token);

        let frame = build_frame_scene(&nusc, token, index)?;
        log::info!(
            "{} lidar points, {} boxes, built in {:?}",
            frame.points.len(),
            frame.labels.len(),
            start_local.elapsed()
        );

        renderer.render(&frame)?;

        if !args.no_wait && !wait_for_enter(&mut stdin)? {
            log::warn!("stdin closed, stopping after frame {}", index + 1);
            break;
        }
    }

    Ok(())
}

fn main() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .init();

    let args = Cli::parse();

    log::info!("dataset root: {:?}", args.dataroot);
    log::info!("dataset version: {}", args.dataset_version);

    let start = std::time::Instant::now();
    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
    log::info!("Elapsed: {:?}", start.elapsed());
}
