use std::io::Read;

use cubesim::cubemath::Float;
use cubesim::geometry::{self, Quad};
use cubesim::{Animator, Cube, DEFAULT_ANGLE, Dialect, Piece, Step};
use eyre::{Context, Result};
use itertools::Itertools;
use serde::Serialize;

use crate::settings::SimulationConfig;

/// NxNxN cube simulator command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// YAML settings file, use '-' for stdin.
    #[arg(long, value_parser)]
    pub config: Option<clio::Input>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

/// Options shared by every subcommand that builds a cube.
#[derive(clap::Args, Debug)]
pub(crate) struct CubeOptions {
    /// Number of layers along each axis.
    #[arg(short = 'n', long)]
    pub size: Option<usize>,
    /// Notation dialect (1x1, 2x2, 3x3, or nxn).
    #[arg(short, long)]
    pub dialect: Option<Dialect>,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Apply moves to a solved cube and print the resulting state as JSON.
    Apply {
        #[command(flatten)]
        cube: CubeOptions,
        /// Rotation angle for each move, in radians. Defaults to a quarter
        /// turn.
        #[arg(long)]
        angle: Option<Float>,
        /// Moves to apply, separated by whitespace.
        moves: Vec<String>,
    },
    /// Animate moves frame by frame and print the resulting state as JSON.
    ///
    /// Moves from the settings file are queued first.
    Animate {
        #[command(flatten)]
        cube: CubeOptions,
        /// Letters typed on the keyboard, where uppercase means Shift was held.
        #[arg(long)]
        keys: Option<String>,
        /// Maximum number of frames to animate. Remaining moves are
        /// completed immediately.
        #[arg(long)]
        frames: Option<usize>,
        /// Moves to queue, separated by whitespace.
        moves: Vec<String>,
    },
    /// Print the quads for drawing each piece as JSON.
    Mesh {
        #[command(flatten)]
        cube: CubeOptions,
        /// Size of each sticker relative to its piece.
        #[arg(long)]
        sticker_factor: Option<Float>,
        /// Moves to apply before generating the mesh.
        moves: Vec<String>,
    },
    /// Print the effective settings as YAML.
    Config {
        #[command(flatten)]
        cube: CubeOptions,
    },
}

#[derive(Serialize, Debug)]
struct CubeReport<'a> {
    size: usize,
    solved: bool,
    pieces: &'a [Piece],
}
impl<'a> CubeReport<'a> {
    fn new(cube: &'a Cube) -> Self {
        Self {
            size: cube.size(),
            solved: cube.is_solved(),
            pieces: cube.pieces(),
        }
    }
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let user_config = match args.config {
        Some(mut input) => {
            let mut buffer = String::new();
            input
                .read_to_string(&mut buffer)
                .context("error reading settings file")?;
            Some(buffer)
        }
        None => None,
    };
    let mut settings = SimulationConfig::load(user_config.as_deref())?;

    match args.subcommand {
        Subcommand::Apply {
            cube: options,
            angle,
            moves,
        } => {
            settings.apply_overrides(options.size, options.dialect)?;
            let dialect = settings.dialect();
            let angle = angle.unwrap_or(DEFAULT_ANGLE);
            let mut cube = Cube::new(settings.cube_size);
            for mv in split_moves(&moves) {
                cube.rotate_with(dialect, mv, angle)
                    .wrap_err_with(|| format!("error applying move {mv:?}"))?;
            }
            write_json_output(&CubeReport::new(&cube))
        }

        Subcommand::Animate {
            cube: options,
            keys,
            frames,
            moves,
        } => {
            settings.apply_overrides(options.size, options.dialect)?;
            let mut animator = Animator::new(
                Cube::new(settings.cube_size),
                settings.dialect(),
                settings.animation_settings(),
            );

            for mv in settings.commands.iter().map(String::as_str).chain(split_moves(&moves)) {
                animator
                    .push(mv)
                    .wrap_err_with(|| format!("error queueing move {mv:?}"))?;
            }
            for mv in keys.iter().flat_map(|k| cubesim::input::moves_for_typed_text(k)) {
                if let Err(e) = animator.push(&mv) {
                    log::warn!("ignoring key for {mv:?}: {e}");
                }
            }

            animate(&mut animator, frames);
            write_json_output(&CubeReport::new(animator.cube()))
        }

        Subcommand::Mesh {
            cube: options,
            sticker_factor,
            moves,
        } => {
            settings.apply_overrides(options.size, options.dialect)?;
            let sticker_factor = sticker_factor.unwrap_or(settings.sticker_factor);
            eyre::ensure!(
                sticker_factor > 0.0 && sticker_factor <= 1.0,
                "sticker factor must be in the range (0, 1]",
            );
            let dialect = settings.dialect();
            let mut cube = Cube::new(settings.cube_size);
            for mv in split_moves(&moves) {
                cube.rotate_with(dialect, mv, DEFAULT_ANGLE)
                    .wrap_err_with(|| format!("error applying move {mv:?}"))?;
            }
            let quads: Vec<Vec<Quad>> = geometry::cube_quads(&cube, sticker_factor);
            write_json_output(&quads)
        }

        Subcommand::Config { cube: options } => {
            settings.apply_overrides(options.size, options.dialect)?;
            print!("{}", settings.to_yaml_string()?);
            Ok(())
        }
    }
}

/// Runs the animation until it is idle or paused, or until `max_frames` have
/// elapsed. Moves still queued after that are completed immediately.
fn animate(animator: &mut Animator, max_frames: Option<usize>) {
    let mut frame = 0;
    while max_frames.is_none_or(|max| frame < max) {
        match animator.step() {
            Step::Paused => {
                log::warn!("animation is paused with {} moves queued", animator.queue_len());
                break;
            }
            Step::Idle => break,
            Step::Advanced { progress } => log::trace!("frame {frame}: {:.0}%", progress * 100.0),
            Step::Finished(mv) => log::info!("finished {mv}"),
        }
        frame += 1;
    }

    if !animator.is_paused() && !animator.is_idle() {
        let finished = animator.catch_up();
        log::info!("completed {} without animation", finished.iter().join(" "));
    }
}

/// Splits arguments into individual moves, so that a whole sequence may be
/// passed as one argument.
fn split_moves(args: &[String]) -> impl Iterator<Item = &str> {
    args.iter().flat_map(|arg| arg.split_whitespace())
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
