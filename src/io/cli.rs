//! Command-line interface: batch analysis of images and reconstruction from saved grids

use crate::algorithm::{reconstruct, reconstruct_parallel, sample};
use crate::analysis::{AnalysisSummary, analyze};
use crate::io::configuration::{
    ANALYSIS_SUFFIX, DEFAULT_CELL_SIZE, DEFAULT_OUTPUT_EXTENSION, PARALLEL_PIXEL_THRESHOLD,
    PIXEL_DATA_SUFFIX, RECONSTRUCTED_PREFIX, SUPPORTED_EXTENSIONS,
};
use crate::io::error::{DepixelError, Result, WithPath, invalid_target};
use crate::io::image::{load_bitmap, save_bitmap};
use crate::io::progress::{ProgressManager, Stage};
use crate::io::report::write_report;
use crate::io::serialization::{
    AnalysisDocument, PixelDataDocument, read_document, write_document,
};
use crate::spatial::PixelGrid;
use clap::{Args, Parser, Subcommand};
use image::RgbImage;
use log::{LevelFilter, debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "depixelator")]
#[command(
    author,
    version,
    about = "Decompose pixel art into a cell grid, report its colors and rebuild it"
)]
/// Command-line arguments for the depixelator tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Suppress reports and progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available operations
#[derive(Subcommand)]
pub enum Command {
    /// Sample images into a cell grid, report color usage and write a reconstruction
    Analyze(AnalyzeArgs),
    /// Rebuild an image from a saved pixel data or analysis document
    Reconstruct(ReconstructArgs),
}

/// Arguments of the `analyze` command
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input image file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Edge length of one grid cell in pixels
    #[arg(short, long, default_value_t = DEFAULT_CELL_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub cell_size: u32,

    /// Directory for outputs (defaults to the input's directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Extension of the reconstructed image (defaults to the input's)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Include every cell's color in the report
    #[arg(short, long)]
    pub list_cells: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl AnalyzeArgs {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }
}

/// Arguments of the `reconstruct` command
#[derive(Args)]
pub struct ReconstructArgs {
    /// Pixel data or analysis JSON document
    #[arg(value_name = "DOCUMENT")]
    pub input: PathBuf,

    /// Output image path (defaults to `reconstructed_<name>.png` next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Check if progress and reports should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level requested by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Error
        } else {
            LevelFilter::Warn
        }
    }
}

/// Execute the command selected on the command line
///
/// # Errors
///
/// Returns the first error raised while processing
pub fn run(cli: Cli) -> Result<()> {
    let quiet = !cli.should_show_progress();
    match cli.command {
        Command::Analyze(args) => {
            FileProcessor::new(args, quiet).process()?;
        }
        Command::Reconstruct(args) => {
            let output = reconstruct_document(&args)?;
            info!("reconstructed image saved as {}", output.display());
            // Allow print for user feedback on the written file
            #[allow(clippy::print_stdout)]
            if !quiet {
                println!("Saved reconstructed image as {}", output.display());
            }
        }
    }
    Ok(())
}

/// Files written for one processed image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Reconstructed image
    pub reconstructed: PathBuf,
    /// Full analysis document
    pub analysis: PathBuf,
    /// Pixel data document
    pub pixel_data: PathBuf,
}

impl OutputPaths {
    /// Derive output locations for an input image
    ///
    /// Outputs go to `output_dir` when given, otherwise next to the input.
    /// `format` replaces the input extension of the reconstructed image.
    pub fn for_input(input: &Path, output_dir: Option<&Path>, format: Option<&str>) -> Self {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let extension = format.map_or_else(
            || input.extension().unwrap_or_default().to_string_lossy(),
            |f| f.trim_start_matches('.').into(),
        );
        let dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| input.parent().map(Path::to_path_buf))
            .unwrap_or_default();

        Self {
            reconstructed: dir.join(format!("{RECONSTRUCTED_PREFIX}{stem}.{extension}")),
            analysis: dir.join(format!("{stem}{ANALYSIS_SUFFIX}.json")),
            pixel_data: dir.join(format!("{stem}{PIXEL_DATA_SUFFIX}.json")),
        }
    }

    /// Whether the image and both documents are all present on disk
    pub fn all_exist(&self) -> bool {
        [&self.reconstructed, &self.analysis, &self.pixel_data]
            .iter()
            .all(|path| path.exists())
    }
}

/// Outcome of processing one image
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    /// Source image
    pub input: PathBuf,
    /// Files written
    pub outputs: OutputPaths,
    /// Statistics of the sampled grid
    pub summary: AnalysisSummary,
}

/// Whether the path has one of the supported image extensions
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

/// Rebuild the full-resolution bitmap, using the rayon pool for large images
///
/// # Errors
///
/// Returns [`DepixelError::CorruptGrid`] if the grid is incomplete
pub fn reconstruct_auto(grid: &PixelGrid) -> Result<RgbImage> {
    if grid.metadata().dimensions().area() >= PARALLEL_PIXEL_THRESHOLD {
        reconstruct_parallel(grid)
    } else {
        reconstruct(grid)
    }
}

/// Load a saved document, rebuild its image and write it
///
/// Returns the path of the written image.
///
/// # Errors
///
/// Returns an error if the document cannot be read, its grid is corrupt, or
/// the image cannot be written
pub fn reconstruct_document(args: &ReconstructArgs) -> Result<PathBuf> {
    let document: PixelDataDocument = read_document(&args.input)?;
    let grid = document.into_grid()?;
    debug!(
        "loaded {} cells ({} grid) from {}",
        grid.len(),
        grid.grid_dimensions(),
        args.input.display()
    );

    let bitmap = reconstruct_auto(&grid)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_reconstruction_path(&args.input));
    save_bitmap(&bitmap, &output)?;

    Ok(output)
}

fn default_reconstruction_path(document: &Path) -> PathBuf {
    let stem = document.file_stem().unwrap_or_default().to_string_lossy();
    let base = stem
        .strip_suffix(PIXEL_DATA_SUFFIX)
        .or_else(|| stem.strip_suffix(ANALYSIS_SUFFIX))
        .unwrap_or(&stem);
    let name = format!("{RECONSTRUCTED_PREFIX}{base}.{DEFAULT_OUTPUT_EXTENSION}");

    document
        .parent()
        .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
}

/// Orchestrates batch processing of image files with progress tracking
pub struct FileProcessor {
    args: AnalyzeArgs,
    quiet: bool,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor for the `analyze` arguments
    pub fn new(args: AnalyzeArgs, quiet: bool) -> Self {
        let progress_manager = (!quiet).then(ProgressManager::new);

        Self {
            args,
            quiet,
            progress_manager,
        }
    }

    /// Process every selected image
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<Vec<ProcessedFile>> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut processed = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            processed.push(self.process_file(file, index)?);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(processed)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.args.target;
        if target.is_file() {
            if !is_supported_image(target) {
                return Err(invalid_target(target, "target file must be a supported image"));
            }
            if self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| DepixelError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry.with_path(target)?.path();
                let is_output = path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .is_some_and(|name| name.starts_with(RECONSTRUCTED_PREFIX));
                if path.is_file()
                    && !is_output
                    && is_supported_image(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_target(
                target,
                "target must be an image file or directory",
            ))
        }
    }

    fn outputs_for(&self, input_path: &Path) -> OutputPaths {
        OutputPaths::for_input(
            input_path,
            self.args.output_dir.as_deref(),
            self.args.format.as_deref(),
        )
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.args.skip_existing() {
            return true;
        }

        let outputs = self.outputs_for(input_path);
        if outputs.all_exist() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn enter_stage(&mut self, index: usize, stage: Stage) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.enter_stage(index, stage);
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<ProcessedFile> {
        let start_time = Instant::now();
        let outputs = self.outputs_for(input_path);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let bitmap = load_bitmap(input_path)?;

        self.enter_stage(index, Stage::Sample);
        let grid = sample(&bitmap, self.args.cell_size)?;

        self.enter_stage(index, Stage::Analyze);
        let (histogram, summary) = analyze(&grid)?;

        self.enter_stage(index, Stage::Reconstruct);
        let reconstructed = reconstruct_auto(&grid)?;

        // The image goes last so its presence marks a finished file
        self.enter_stage(index, Stage::Write);
        write_document(&PixelDataDocument::from_grid(&grid), &outputs.pixel_data)?;
        write_document(
            &AnalysisDocument::new(&grid, &histogram, &summary),
            &outputs.analysis,
        )?;
        save_bitmap(&reconstructed, &outputs.reconstructed)?;

        if !self.quiet {
            let source_name = input_path.display().to_string();
            let list_cells = self.args.list_cells;
            let print = || {
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                write_report(&mut out, &source_name, &grid, &histogram, &summary, list_cells)
            };
            let written = self
                .progress_manager
                .as_ref()
                .map_or_else(print, |pm| pm.suspend(print));
            written.map_err(|e| DepixelError::FileSystem {
                path: PathBuf::from("<stdout>"),
                operation: "write report",
                source: e,
            })?;
        }

        info!(
            "{}: {} grid, {} colors, saved {}",
            input_path.display(),
            summary.grid_dimensions,
            summary.unique_colors,
            outputs.reconstructed.display()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(ProcessedFile {
            input: input_path.to_path_buf(),
            outputs,
            summary,
        })
    }
}
