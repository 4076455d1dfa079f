//! Command-line interface for the shrink, single and multi collage commands

use crate::algorithm::assembler::MosaicAssembler;
use crate::algorithm::composite::{ToneMode, single_image_collage};
use crate::algorithm::matching::{MatchStrategy, MosaicOptions};
use crate::analysis::pool::CandidatePool;
use crate::analysis::shape::ShapeModel;
use crate::io::configuration::{
    CANDIDATE_LIMIT, CONTOUR_LUMINANCE_THRESHOLD, CONTOUR_TOLERANCE, CREATOR_DEBUG_SUFFIX,
    DEFAULT_BORDER_SIZE, DEFAULT_CELL_SIZE, DEFAULT_EXCLUSION_RADIUS, DEFAULT_JPG_QUALITY,
    DEFAULT_SHRINK_FACTOR, DEFAULT_SHRINK_HEIGHT, DEFAULT_SHRINK_WIDTH, INNER_DEBUG_SUFFIX,
    SINGLE_SHRINK_FACTOR,
};
use crate::io::diagnostics::MemoryLedger;
use crate::io::error::Result;
use crate::io::image::{decode, list_files, load_rgb, save_jpeg};
use crate::io::progress::ProgressManager;
use crate::math::resample::{resize_to, shrink_by_factor};
use crate::spatial::geometry::PrintSize;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "collage")]
#[command(author, version, about = "Build photo collages and photomosaics")]
/// Command-line arguments for the collage tool
pub struct Cli {
    /// Log geometry and per-candidate measurements
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write the intermediate creator and inner mosaic images next to the output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Collage to build
    #[command(subcommand)]
    pub command: Command,
}

/// Available collage commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Downscale an image
    Shrink(ShrinkArgs),
    /// Tile an image with tinted thumbnails of itself
    Single(SingleArgs),
    /// Build a photomosaic of an image from a folder of photos
    Multi(MultiArgs),
}

/// Downscaling algorithm of the shrink command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ShrinkMethod {
    /// Keep every n-th pixel
    #[default]
    Factor,
    /// Bilinear resize to an exact size
    Size,
}

/// Arguments of the shrink command
#[derive(Args, Debug)]
pub struct ShrinkArgs {
    /// Image to shrink
    pub input: PathBuf,

    /// Where to write the JPEG
    pub output: PathBuf,

    /// Downscaling algorithm
    #[arg(long, value_enum, default_value_t = ShrinkMethod::Factor)]
    pub method: ShrinkMethod,

    /// Decimation factor for the factor method
    #[arg(long, default_value_t = DEFAULT_SHRINK_FACTOR)]
    pub factor: usize,

    /// Target width for the size method
    #[arg(long, default_value_t = DEFAULT_SHRINK_WIDTH)]
    pub width: usize,

    /// Target height for the size method
    #[arg(long, default_value_t = DEFAULT_SHRINK_HEIGHT)]
    pub height: usize,

    /// JPEG quality
    #[arg(long, default_value_t = DEFAULT_JPG_QUALITY, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: u8,
}

/// Arguments of the single command
#[derive(Args, Debug)]
pub struct SingleArgs {
    /// Image to build the collage from
    pub input: PathBuf,

    /// Where to write the JPEG
    pub output: PathBuf,

    /// Tone of each copy: 0 follows the image, 1 a centred sine wave
    pub mode: u8,

    /// Decimation factor for the base grid
    #[arg(long, default_value_t = SINGLE_SHRINK_FACTOR)]
    pub factor: usize,

    /// JPEG quality
    #[arg(long, default_value_t = DEFAULT_JPG_QUALITY, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: u8,
}

/// Arguments of the multi command
#[derive(Args, Debug)]
pub struct MultiArgs {
    /// Image the mosaic reproduces
    pub input: PathBuf,

    /// Folder of candidate photos
    pub folder: PathBuf,

    /// Where to write the JPEG
    pub output: PathBuf,

    /// Print size: A1, A2, A3, A4 or WIDTHxHEIGHT in pixels
    pub size: PrintSize,

    /// JPEG quality
    #[arg(default_value_t = DEFAULT_JPG_QUALITY, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: u8,

    /// Fill near-white regions with random bright photos
    #[arg(action = ArgAction::Set, default_value_t = true)]
    pub contour: bool,

    /// Approximate cell edge in pixels
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: usize,

    /// Minimum border on each side in pixels, 0 for no border
    #[arg(long, default_value_t = DEFAULT_BORDER_SIZE)]
    pub border: usize,

    /// Maximum number of photos read from the folder
    #[arg(long, default_value_t = CANDIDATE_LIMIT)]
    pub limit: usize,

    /// Seed for the contour picks, random if omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Radius in cells inside which a photo is not repeated
    #[arg(long, default_value_t = DEFAULT_EXCLUSION_RADIUS)]
    pub radius: usize,

    /// Ranking for ordinary cells
    #[arg(long, value_enum, default_value_t = MatchStrategy::Shape)]
    pub strategy: MatchStrategy,

    /// Measure the top-left quadrant of photos with the plain channel average
    #[arg(long)]
    pub legacy_shape: bool,
}

impl MultiArgs {
    /// Matching options selected by these arguments
    pub fn mosaic_options(&self) -> MosaicOptions {
        MosaicOptions {
            contour: self.contour,
            exclusion_radius: self.radius,
            contour_tolerance: CONTOUR_TOLERANCE,
            contour_threshold: CONTOUR_LUMINANCE_THRESHOLD,
            strategy: self.strategy,
        }
    }

    /// Shape model selected by these arguments
    pub const fn shape_model(&self) -> ShapeModel {
        if self.legacy_shape {
            ShapeModel::Legacy
        } else {
            ShapeModel::Perceptual
        }
    }
}

/// Global run settings shared by every command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
// Three independent switches straight from the command line
#[allow(clippy::struct_excessive_bools)]
pub struct RunOptions {
    /// Log at debug level
    pub verbose: bool,
    /// Write intermediate images
    pub debug: bool,
    /// Hide progress bars
    pub quiet: bool,
}

impl Cli {
    /// Global settings of this invocation
    pub const fn run_options(&self) -> RunOptions {
        RunOptions {
            verbose: self.verbose,
            debug: self.debug,
            quiet: self.quiet,
        }
    }
}

/// Install the stderr log subscriber
///
/// The default level is `info`, raised to `debug` by verbose and lowered to
/// `warn` by quiet. `RUST_LOG` overrides both. Calling this twice is harmless.
pub fn init_logging(options: RunOptions) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let default_level = if options.verbose {
        "collage=debug"
    } else if options.quiet {
        "collage=warn"
    } else {
        "collage=info"
    };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Runs one collage command with progress tracking and a closing summary
pub struct CollageRunner {
    command: Command,
    options: RunOptions,
    progress_manager: Option<ProgressManager>,
    ledger: MemoryLedger,
}

impl CollageRunner {
    /// Create a runner for the parsed command line
    pub fn new(cli: Cli) -> Self {
        let options = cli.run_options();
        Self::with_options(cli.command, options)
    }

    /// Create a runner for a command with explicit settings
    pub fn with_options(command: Command, options: RunOptions) -> Self {
        let progress_manager = (!options.quiet).then(ProgressManager::new);

        Self {
            command,
            options,
            progress_manager,
            ledger: MemoryLedger::new(),
        }
    }

    /// Buffers allocated so far
    pub const fn ledger(&self) -> &MemoryLedger {
        &self.ledger
    }

    /// Execute the command and log the time and memory summary
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be read, an argument is invalid,
    /// no candidate photo is usable or the output cannot be written
    pub fn run(&mut self) -> Result<()> {
        let start_time = Instant::now();

        match &self.command {
            Command::Shrink(args) => Self::shrink(args, &mut self.ledger)?,
            Command::Single(args) => Self::single(args, &mut self.ledger)?,
            Command::Multi(args) => Self::multi(
                args,
                self.options,
                &mut self.ledger,
                self.progress_manager.as_mut(),
            )?,
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }
        self.ledger.report(start_time.elapsed());
        Ok(())
    }

    fn shrink(args: &ShrinkArgs, ledger: &mut MemoryLedger) -> Result<()> {
        let image = load_rgb(&args.input)?;
        ledger.record("input", image.byte_len());
        debug!(
            width = image.width(),
            height = image.height(),
            method = ?args.method,
            "Shrinking"
        );

        let shrunk = match args.method {
            ShrinkMethod::Factor => shrink_by_factor(&image, args.factor)?,
            ShrinkMethod::Size => resize_to(&image, args.width, args.height)?,
        };
        drop(image);
        ledger.record("shrunk", shrunk.byte_len());

        info!("Shrunk to {}x{}", shrunk.width(), shrunk.height());
        save_jpeg(&args.output, &shrunk, args.quality)
    }

    fn single(args: &SingleArgs, ledger: &mut MemoryLedger) -> Result<()> {
        let mode = ToneMode::try_from(args.mode)?;
        let image = load_rgb(&args.input)?;
        ledger.record("input", image.byte_len());

        let base = shrink_by_factor(&image, args.factor)?;
        ledger.record("base", base.byte_len());
        let side = base.width().min(base.height());
        let thumbnail = resize_to(&image, side, side)?;
        ledger.record("thumbnail", thumbnail.byte_len());
        drop(image);

        debug!(
            base_width = base.width(),
            base_height = base.height(),
            side,
            "Single-image collage grid"
        );

        let collage = single_image_collage(&base, &thumbnail, mode)?;
        ledger.record("collage", collage.byte_len());

        info!("Collage is {}x{}", collage.width(), collage.height());
        save_jpeg(&args.output, &collage, args.quality)
    }

    fn multi(
        args: &MultiArgs,
        options: RunOptions,
        ledger: &mut MemoryLedger,
        mut progress: Option<&mut ProgressManager>,
    ) -> Result<()> {
        let assembler =
            MosaicAssembler::new(args.size, args.cell_size, args.border, args.mosaic_options())?;
        let geometry = *assembler.geometry();

        let target = load_rgb(&args.input)?;
        ledger.record("input", target.byte_len());
        let creator = assembler.prepare_creator(&target)?;
        drop(target);
        ledger.record("creator", creator.byte_len());
        debug!(
            width = creator.width(),
            height = creator.height(),
            "Creator image prepared"
        );
        if options.debug {
            save_jpeg(
                &debug_path(&args.output, CREATOR_DEBUG_SUFFIX),
                &creator,
                args.quality,
            )?;
        }

        let files: Vec<PathBuf> = list_files(&args.folder)?
            .into_iter()
            .take(args.limit)
            .collect();
        let mut pool = CandidatePool::new(
            args.folder.display().to_string(),
            geometry.cell_width,
            geometry.cell_height,
        )
        .with_model(args.shape_model());

        if let Some(pm) = progress.as_deref_mut() {
            pm.start_stage("Loading", files.len());
        }
        for file in &files {
            let name = file
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            if pool.offer(name.as_str(), decode(file))?.is_none() {
                ledger.record("candidate", geometry.cell_width * geometry.cell_height * 3);
            }
            if let Some(pm) = progress.as_deref_mut() {
                pm.advance(&name);
            }
        }
        info!(
            usable = pool.usable_count(),
            examined = pool.len(),
            "Candidate pool ready"
        );

        let rng = args
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let mut builder = assembler.builder(creator, &pool, rng)?;
        ledger.record("mosaic", geometry.inner_width() * geometry.inner_height() * 3);

        if let Some(pm) = progress.as_deref_mut() {
            pm.start_stage("Assembling", builder.rows());
        }
        loop {
            let more = builder.fill_next_row();
            if let Some(pm) = progress.as_deref_mut() {
                pm.advance(&format!("row {}", builder.rows_done()));
            }
            if !more {
                break;
            }
        }
        if let Some(pm) = progress.as_deref_mut() {
            pm.finish_stage();
        }

        let (inner, grid) = builder.finish();
        debug!(
            filled = grid.filled(),
            distinct = grid.usage(pool.len()).iter().filter(|&&n| n > 0).count(),
            "Mosaic assembled"
        );
        if options.debug {
            save_jpeg(
                &debug_path(&args.output, INNER_DEBUG_SUFFIX),
                &inner,
                args.quality,
            )?;
        }

        let output = assembler.finish(inner)?;
        if args.border > 0 {
            ledger.record("bordered", output.byte_len());
        }
        save_jpeg(&args.output, &output, args.quality)
    }
}

/// Sibling of `output` named `<stem><suffix>.jpg`
pub fn debug_path(output: &Path, suffix: &str) -> PathBuf {
    let stem = output.file_stem().unwrap_or_default().to_string_lossy();
    output.with_file_name(format!("{stem}{suffix}.jpg"))
}
