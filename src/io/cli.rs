//! Command-line interface for running batch-edit scripts and random boards

use crate::algorithm::board::Board;
use crate::analysis::statistics::FieldStatistics;
use crate::io::configuration::{
    DEFAULT_EXIT_COUNT, DEFAULT_OBSTACLE_DENSITY, DEFAULT_RANDOM_HEIGHT, DEFAULT_RANDOM_WIDTH,
    DEFAULT_SEED, OUTPUT_SUFFIX, PNG_CELL_SCALE, SCRIPT_EXTENSION,
};
use crate::io::error::{ErrorContext, Result, WithContext, invalid_parameter};
use crate::io::image::export_field_as_png;
use crate::io::progress::ProgressManager;
use crate::io::render::render_field;
use crate::io::script::Script;
use crate::spatial::layout::random_operations;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "exitfield")]
#[command(
    author,
    version,
    about = "Maintain distance-to-nearest-exit fields under incremental edits"
)]
/// Command-line arguments for the distance field tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Script file or directory of scripts; omit to generate a random board
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Random seed for reproducible layouts
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Width of a random board
    #[arg(short = 'w', long, default_value_t = DEFAULT_RANDOM_WIDTH)]
    pub width: usize,

    /// Height of a random board
    #[arg(short = 'H', long, default_value_t = DEFAULT_RANDOM_HEIGHT)]
    pub height: usize,

    /// Number of exits on a random board
    #[arg(short, long, default_value_t = DEFAULT_EXIT_COUNT)]
    pub exits: usize,

    /// Fraction of non-exit cells turned into obstacles on a random board
    #[arg(short, long, default_value_t = DEFAULT_OBSTACLE_DENSITY)]
    pub density: f64,

    /// Also export the field as a PNG heat map
    #[arg(short, long)]
    pub png: bool,

    /// Cross-check every result against a full recomputation
    #[arg(long)]
    pub verify: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process scripts even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log verbosity (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
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

    /// Default log filter for the requested verbosity
    pub const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Output path beside `input`: `<stem>_field.<extension>`
pub fn output_path(input_path: &Path, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!("{}{OUTPUT_SUFFIX}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

fn is_script(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(SCRIPT_EXTENSION)
}

/// Orchestrates batch processing of scripts with progress tracking
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

    /// Process the target according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, script execution, verification
    /// or output writing fails
    pub fn process(&mut self) -> Result<()> {
        if self.cli.target.is_none() {
            return self.process_random();
        }

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_script(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Script files selected by the target, sorted, minus skipped ones
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a script nor a readable directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let Some(target) = self.cli.target.as_deref() else {
            return Ok(Vec::new());
        };

        if target.is_file() {
            if !is_script(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &format!("script files must have the .{SCRIPT_EXTENSION} extension"),
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.to_path_buf()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let context = ErrorContext {
                path: Some(target.to_path_buf()),
                operation: Some("read directory"),
                ..Default::default()
            };
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_context(context.clone())? {
                let path = entry.with_context(context.clone())?.path();
                if is_script(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a script file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        if output_path(input_path, "txt").exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_script(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let script = Script::from_path(input_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_script(index, input_path, script.operations.len());
        }

        let progress = &mut self.progress_manager;
        let board = script
            .run(|_, changed| {
                if let Some(pm) = progress.as_mut() {
                    pm.record_step(index, changed);
                }
            })
            .inspect_err(|e| log::error!("{}: {e}", input_path.display()))?;

        self.write_outputs(&board, input_path)?;

        let statistics = FieldStatistics::collect(&board);
        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_script(index, &statistics);
        }

        log::info!(
            "{} done in {:.2?}: {statistics}",
            input_path.display(),
            start_time.elapsed()
        );
        Ok(())
    }

    fn write_outputs(&self, board: &Board, input_path: &Path) -> Result<()> {
        if self.cli.verify {
            board.verify()?;
        }

        let text_path = output_path(input_path, "txt");
        std::fs::write(&text_path, render_field(board)).with_context(ErrorContext {
            path: Some(text_path.clone()),
            operation: Some("write field"),
            ..Default::default()
        })?;

        if self.cli.png {
            export_field_as_png(board, PNG_CELL_SCALE, &output_path(input_path, "png"))?;
        }
        Ok(())
    }

    // Allow print for the field and summary, which are the command's output in this mode
    #[allow(clippy::print_stdout)]
    fn process_random(&self) -> Result<()> {
        let operations = random_operations(
            self.cli.width,
            self.cli.height,
            self.cli.exits,
            self.cli.density,
            self.cli.seed,
        )?;

        let mut board = Board::new(self.cli.width, self.cli.height)?;
        board.apply_all(&operations)?;

        if self.cli.verify {
            board.verify()?;
        }

        print!("{board}");
        if !self.cli.quiet {
            println!("{}", FieldStatistics::collect(&board));
        }

        if self.cli.png {
            let png_path = PathBuf::from(format!("random_{}{OUTPUT_SUFFIX}.png", self.cli.seed));
            export_field_as_png(&board, PNG_CELL_SCALE, &png_path)?;
        }
        Ok(())
    }
}
