mod parser;

use parser::Args;

use tin_dtm::steps::{compute_dtm, read_laz, write_classified_laz};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, LevelFilter};
use std::{fs, process::ExitCode, time::Instant};

// progress bar resolution
const PROGRESS_STEPS: u64 = 1000;

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> tin_dtm::Result<()> {
    let params = args.parameters()?;
    let now = Instant::now();

    fs::create_dir_all(&args.output_directory)?;
    let file_stem = args
        .in_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());

    info!("Reading {}", args.in_file.to_string_lossy());
    let mut cloud = read_laz(&args.in_file)?;
    info!("Number of points: {}", cloud.len());

    info!("Computing DTM...");
    let pb = ProgressBar::new(PROGRESS_STEPS);
    if let Ok(style) = ProgressStyle::with_template("\t[{bar:50.cyan/blue}] {percent:>3}%") {
        pb.set_style(style.progress_chars("#> "));
    }

    let mut done = 0.;
    let dfm = compute_dtm(&mut cloud, &params, |inc| {
        done += inc;
        pb.set_position((done * PROGRESS_STEPS as f32).round() as u64);
    });
    pb.finish();
    let dfm = dfm?;

    let tiff_path = args.output_directory.join(format!("dtm_{file_stem}.tiff"));
    info!("Writing {}", tiff_path.to_string_lossy());
    dfm.write_to_tiff(&tiff_path, params.nodata)?;

    if args.write_laz {
        let laz_path = args.output_directory.join(format!("ground_{file_stem}.laz"));
        info!("Writing {}", laz_path.to_string_lossy());
        write_classified_laz(&args.in_file, &laz_path, &cloud)?;
    }

    info!("Done in {:.2} sec", now.elapsed().as_secs_f32());
    Ok(())
}
