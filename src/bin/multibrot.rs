extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate multibrot;
extern crate num;
extern crate num_cpus;
extern crate rayon;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use multibrot::{Animation, ImageFormat, ImageWriter, Viewport};
use num::Complex;
use rayon::ThreadPoolBuilder;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

/// Leave one core for the writers and the rest of the machine.
fn default_threads() -> usize {
    let cores = num_cpus::get();
    if cores > 1 {
        cores - 1
    } else {
        1
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const FRAMES: &str = "frames";
const EXPONENT: &str = "exponent";
const INCREMENT: &str = "increment";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const WRITERS: &str = "writers";
const FORMAT: &str = "format";
const RETRIES: &str = "retries";

fn args<'a>(default_threads: &'a str) -> ArgMatches<'a> {
    let max_threads = num_cpus::get().max(1) * 4;

    App::new("multibrot")
        .version("0.1.0")
        .about("Renders an animation of generalized Mandelbrot sets")
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("frames")
                .help("Directory the frames are written to"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1080x720")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of each frame"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,-1.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the complex plane"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0,1.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the complex plane"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .required(false)
                .long(FRAMES)
                .short("f")
                .takes_value(true)
                .default_value("720")
                .validator(|s| validate_number::<usize>(&s, "Could not parse frame count"))
                .help("Number of frames to render"),
        )
        .arg(
            Arg::with_name(EXPONENT)
                .required(false)
                .long(EXPONENT)
                .short("e")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0")
                .validator(|s| validate_number::<f64>(&s, "Could not parse base exponent"))
                .help("Exponent of the first frame"),
        )
        .arg(
            Arg::with_name(INCREMENT)
                .required(false)
                .long(INCREMENT)
                .short("d")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0.01")
                .validator(|s| validate_number::<f64>(&s, "Could not parse exponent increment"))
                .help("How much the exponent grows from one frame to the next"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("900")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Number of iterations before a point is considered inside the set"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value(default_threads)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads computing frames"),
        )
        .arg(
            Arg::with_name(WRITERS)
                .required(false)
                .long(WRITERS)
                .short("w")
                .takes_value(true)
                .default_value("1")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        64,
                        "Could not parse writer count",
                        "Writer count must be between 1 and 64",
                    )
                })
                .help("Number of threads writing images"),
        )
        .arg(
            Arg::with_name(FORMAT)
                .required(false)
                .long(FORMAT)
                .takes_value(true)
                .possible_values(&["png", "ppm"])
                .default_value("png")
                .help("Image format of the frames"),
        )
        .arg(
            Arg::with_name(RETRIES)
                .required(false)
                .long(RETRIES)
                .takes_value(true)
                .default_value("0")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        10,
                        "Could not parse retry count",
                        "Retry count must be between 0 and 10",
                    )
                })
                .help("Extra attempts at writing a frame before giving up on it"),
        )
        .get_matches()
}

// Validators have already run, so these only fail if clap was bypassed.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    let raw = matches.value_of(name).unwrap_or_default();
    T::from_str(raw).map_err(|_| format_err!("Could not parse --{} '{}'", name, raw))
}

fn corner(matches: &ArgMatches, name: &str) -> Result<Complex<f64>, Error> {
    let raw = matches.value_of(name).unwrap_or_default();
    parse_complex(raw).ok_or_else(|| format_err!("Could not parse --{} '{}'", name, raw))
}

/// Returns true if every frame was written.
fn render(matches: &ArgMatches) -> Result<bool, Error> {
    let size = matches.value_of(SIZE).unwrap_or_default();
    let (width, height) = parse_pair::<u16>(size, 'x')
        .ok_or_else(|| format_err!("Could not parse --{} '{}'", SIZE, size))?;
    let viewport = Viewport::new(usize::from(width), usize::from(height), corner(matches, LEFTLOWER)?, corner(matches, RIGHTUPPER)?)?;
    let animation = Animation::new(
        viewport,
        value(matches, FRAMES)?,
        value(matches, EXPONENT)?,
        value(matches, INCREMENT)?,
        value(matches, ITERATIONS)?,
    )?;
    let threads: usize = value(matches, THREADS)?;
    let writers: usize = value(matches, WRITERS)?;
    let format: ImageFormat = value(matches, FORMAT)?;
    let output = matches.value_of(OUTPUT).unwrap_or_default();
    let writer = ImageWriter::new(output, format, value(matches, RETRIES)?)?;

    debug!(
        "{:?}, {} frames, cap {}, {} threads, {} writers",
        animation.viewport(),
        animation.frame_count(),
        animation.iteration_cap(),
        threads,
        writers
    );

    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| multibrot::RenderError::Pool(e.to_string()))?;
    let summary = animation.run(&pool, &writer, writers)?;

    if summary.is_success() {
        info!("Rendered {} frames into {}", summary.rendered, output);
    } else {
        let mut failed: Vec<usize> = summary.failures.iter().map(|f| f.index).collect();
        failed.sort();
        error!(
            "Rendered {} frames into {}; {} failed: {:?}",
            summary.rendered,
            output,
            failed.len(),
            failed
        );
    }
    Ok(summary.is_success())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let default_threads = default_threads().to_string();
    let matches = args(&default_threads);

    match render(&matches) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
    }
}
