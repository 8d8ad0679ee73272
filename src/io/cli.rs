//! Command-line interface for inspecting, editing and rewriting Surfer 6 grids

use crate::codec::{DecodeMode, read_grid_file, write_grid_file};
use crate::io::configuration::{
    DEFAULT_BLANK_FRACTION, DEFAULT_SEED, GRID_EXTENSION, OUTPUT_SUFFIX, PREVIEW_SUFFIX,
};
use crate::io::display::{GridData, GridInfo};
use crate::io::error::{GridError, Result, invalid_parameter};
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use crate::spatial::Grid;
use crate::spatial::extent::Extent;
use crate::spatial::synthetic::{SurfaceConfig, synthetic_grid};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{error, info};

/// Single cell assignment requested on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellEdit {
    /// Column index
    pub x: i64,
    /// Row index
    pub y: i64,
    /// Value to store
    pub value: f64,
}

impl FromStr for CellEdit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, value] = parts.as_slice() else {
            return Err(format!("expected X,Y,VALUE but got '{s}'"));
        };
        Ok(Self {
            x: x.parse().map_err(|e| format!("invalid column '{x}': {e}"))?,
            y: y.parse().map_err(|e| format!("invalid row '{y}': {e}"))?,
            value: value
                .parse()
                .map_err(|e| format!("invalid value '{value}': {e}"))?,
        })
    }
}

/// Node counts of a generated grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Columns
    pub x_size: usize,
    /// Rows
    pub y_size: usize,
}

impl FromStr for Dimensions {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (cols, rows) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected COLSxROWS but got '{s}'"))?;
        Ok(Self {
            x_size: cols
                .trim()
                .parse()
                .map_err(|e| format!("invalid column count '{cols}': {e}"))?,
            y_size: rows
                .trim()
                .parse()
                .map_err(|e| format!("invalid row count '{rows}': {e}"))?,
        })
    }
}

#[derive(Parser)]
#[command(name = "surfgrid")]
#[command(
    author,
    version,
    about = "Inspect, edit and rewrite Surfer 6 binary grids"
)]
/// Command-line arguments for the grid tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Surfer 6 grid file or directory of grids
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Cell assignment applied after loading (repeatable)
    #[arg(short, long = "set", value_name = "X,Y,VALUE", allow_hyphen_values = true)]
    pub set: Vec<CellEdit>,

    /// Recompute the z range before writing
    #[arg(short, long)]
    pub recompute: bool,

    /// Print every cell value
    #[arg(short, long)]
    pub dump: bool,

    /// Write a PNG preview next to each output
    #[arg(short, long)]
    pub preview: bool,

    /// Reject files with a wrong tag or fewer than two nodes per axis
    #[arg(long)]
    pub strict: bool,

    /// Also build and print the default 11x11 example grid
    #[arg(short, long)]
    pub example: bool,

    /// Write a synthetic grid of the given size to TARGET instead of reading it
    #[arg(short, long, value_name = "COLSxROWS")]
    pub generate: Option<Dimensions>,

    /// Random seed for synthetic grids
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress grid dumps and progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Header policy for reading input files
    pub const fn decode_mode(&self) -> DecodeMode {
        if self.strict {
            DecodeMode::Strict
        } else {
            DecodeMode::Permissive
        }
    }

    /// Check if the example grid should be shown
    ///
    /// Running without a target shows the example.
    pub const fn run_example(&self) -> bool {
        self.example || self.target.is_none()
    }
}

/// Orchestrates reading, editing and rewriting grid files
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// A file that fails is reported and skipped; the remaining files and the
    /// example grid still run.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Generation was requested without a target or with invalid dimensions
    /// - The example grid cannot be built
    /// - Any input file failed (reported as a batch summary)
    pub fn process(&mut self) -> Result<()> {
        if let Some(dimensions) = self.cli.generate {
            return self.generate(dimensions);
        }

        let mut failed = 0;
        let mut total = 0;

        if let Some(target) = self.cli.target.clone() {
            match self.collect_files(&target) {
                Ok(files) => {
                    total = files.len();
                    failed = self.process_files(&files);
                }
                Err(e) => {
                    error!("{e}");
                    total = 1;
                    failed = 1;
                }
            }
        }

        if self.cli.run_example() {
            self.show_example()?;
        }

        if failed > 0 {
            return Err(GridError::Batch { failed, total });
        }
        Ok(())
    }

    fn process_files(&mut self, files: &[PathBuf]) -> usize {
        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut failed = 0;
        for file in files {
            if let Some(ref pm) = self.progress_manager {
                pm.start_file(file);
            }

            let outcome = self.process_file(file);
            if let Err(ref e) = outcome {
                error!(path = %file.display(), "{e}");
                failed += 1;
            }

            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_file(outcome.is_ok());
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        failed
    }

    fn collect_files(&self, target: &Path) -> Result<Vec<PathBuf>> {
        if target.is_file() {
            if self.should_process_file(target) {
                Ok(vec![target.to_path_buf()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            let entries = std::fs::read_dir(target).map_err(|e| GridError::FileSystem {
                path: target.to_path_buf(),
                operation: "list directory",
                source: e,
            })?;
            for entry in entries {
                let path = entry?.path();
                if is_grid_file(&path) && !is_output_file(&path) && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a grid file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = output_path(input_path);
        if output_path.exists() {
            info!(path = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    // Allow print for the grid dumps that are the tool's normal output
    #[allow(clippy::print_stdout)]
    fn process_file(&self, input_path: &Path) -> Result<()> {
        let mut grid = read_grid_file(input_path, self.cli.decode_mode())?;

        if !self.cli.quiet {
            println!("Grid read from {}:", input_path.display());
            print!("{}", self.grid_report(&grid));
        }

        let edits = self.apply_edits(&mut grid);
        if !self.cli.quiet {
            print!("{edits}");
        }

        if self.cli.recompute {
            grid.recompute_z_range();
        }

        let output = output_path(input_path);
        write_grid_file(&output, &grid)?;
        if !self.cli.quiet {
            println!("Modified grid written to {}", output.display());
        }

        if self.cli.preview {
            export_grid_as_png(&grid, &preview_path(input_path))?;
        }

        Ok(())
    }

    /// Text shown for the example grid, `None` in quiet mode
    ///
    /// The example grid is built and edited either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the example grid cannot be built
    pub fn example_report(&self) -> Result<Option<String>> {
        let mut grid = Grid::create_default()?;

        let mut report = String::from("Example grid:\n");
        report.push_str(&self.grid_report(&grid));
        report.push_str(&self.apply_edits(&mut grid));

        Ok((!self.cli.quiet).then_some(report))
    }

    #[allow(clippy::print_stdout)]
    fn show_example(&self) -> Result<()> {
        if let Some(report) = self.example_report()? {
            print!("{report}");
        }
        Ok(())
    }

    #[allow(clippy::print_stdout)]
    fn generate(&self, dimensions: Dimensions) -> Result<()> {
        let target = self.cli.target.as_deref().ok_or_else(|| {
            invalid_parameter("target", &"<none>", &"generation needs an output path")
        })?;

        let config = SurfaceConfig {
            x_size: dimensions.x_size,
            y_size: dimensions.y_size,
            extent: Extent::new(
                0.0,
                dimensions.x_size.saturating_sub(1) as f64,
                0.0,
                dimensions.y_size.saturating_sub(1) as f64,
            ),
            blank_fraction: DEFAULT_BLANK_FRACTION,
            seed: self.cli.seed,
        };
        let grid = synthetic_grid(&config)?;
        write_grid_file(target, &grid)?;

        if !self.cli.quiet {
            println!("Synthetic grid written to {}", target.display());
            print!("{}", self.grid_report(&grid));
        }
        if self.cli.preview {
            export_grid_as_png(&grid, &preview_path(target))?;
        }
        Ok(())
    }

    // Applies every requested edit and returns one confirmation line per edit
    fn apply_edits(&self, grid: &mut Grid) -> String {
        let mut report = String::new();
        for edit in &self.cli.set {
            grid.set(edit.x, edit.y, edit.value);
            report.push_str(&format!(
                "Updated Grid Value at ({}, {}): {:6.2}\n",
                edit.x,
                edit.y,
                grid.get(edit.x, edit.y)
            ));
        }
        report
    }

    fn grid_report(&self, grid: &Grid) -> String {
        let mut report = GridInfo(grid).to_string();
        if self.cli.dump {
            report.push_str(&GridData(grid).to_string());
        }
        report
    }
}

fn is_grid_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(GRID_EXTENSION))
}

fn is_output_file(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

/// Path of the rewritten grid for an input file
pub fn output_path(input_path: &Path) -> PathBuf {
    sibling_path(input_path, OUTPUT_SUFFIX, GRID_EXTENSION)
}

/// Path of the PNG preview for an input file
pub fn preview_path(input_path: &Path) -> PathBuf {
    sibling_path(input_path, PREVIEW_SUFFIX, "png")
}

fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}
