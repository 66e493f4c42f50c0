//! Progress display for script batches
//!
//! Each script gets a bar that counts its operations and splits them into
//! edits that changed the field and redundant ones. A finished script keeps
//! its bar with a one-line summary of the resulting field. Batches larger
//! than the bar pool add an overall bar and reuse bars in turn.

use crate::analysis::statistics::FieldStatistics;
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static SCRIPT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>4} [{bar:30.cyan/blue}] {pos:>5}/{len:5} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Scripts: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Operation counts and outcome of one script run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptProgress {
    /// File name of the script
    pub name: String,
    /// Operations listed in the script
    pub total: usize,
    /// Operations that changed the field
    pub applied: usize,
    /// Operations that left the field as it was
    pub redundant: usize,
    /// Field summary, set once the script has finished
    pub outcome: Option<String>,
}

impl ScriptProgress {
    /// Operations processed so far
    pub const fn processed(&self) -> usize {
        self.applied + self.redundant
    }

    fn message(&self) -> String {
        match (&self.outcome, self.redundant) {
            (Some(outcome), _) => format!("✓ {}: {outcome}", self.name),
            (None, 0) => self.name.clone(),
            (None, redundant) => format!("{} ({redundant} redundant)", self.name),
        }
    }
}

/// Summary shown beside a finished script
pub fn outcome(statistics: &FieldStatistics) -> String {
    let reach = format!("{:.0}% reachable", statistics.coverage() * 100.0);
    statistics.max_cost.map_or_else(
        || format!("{reach}, no exits"),
        |max| format!("{reach}, max cost {max}"),
    )
}

/// Coordinates progress display for batch script runs
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    bars: Vec<ProgressBar>,
    scripts: Vec<Option<ScriptProgress>>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no scripts
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            bars: Vec::new(),
            scripts: Vec::new(),
        }
    }

    /// Number of scripts announced through [`Self::initialize`]
    pub const fn script_count(&self) -> usize {
        self.scripts.len()
    }

    /// Prepare bars for `script_count` scripts
    pub fn initialize(&mut self, script_count: usize) {
        self.scripts = vec![None; script_count];

        if script_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(script_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        self.bars = (0..script_count.min(MAX_INDIVIDUAL_PROGRESS_BARS))
            .map(|_| {
                let bar = ProgressBar::new(0);
                bar.set_style(SCRIPT_STYLE.clone());
                self.multi_progress.add(bar)
            })
            .collect();
    }

    /// Begin tracking a script of `total` operations
    ///
    /// Unknown indices are ignored.
    pub fn start_script(&mut self, index: usize, path: &Path, total: usize) {
        let Some(slot) = self.scripts.get_mut(index) else {
            return;
        };
        *slot = Some(ScriptProgress {
            name: path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
            total,
            ..ScriptProgress::default()
        });

        if let Some(bar) = self.bar(index) {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_prefix(format!("#{}", index + 1));
        }
        self.redraw(index);
    }

    /// Count one processed operation, `changed` telling whether it altered the field
    pub fn record_step(&mut self, index: usize, changed: bool) {
        let Some(script) = self.scripts.get_mut(index).and_then(Option::as_mut) else {
            return;
        };
        if changed {
            script.applied += 1;
        } else {
            script.redundant += 1;
        }
        self.redraw(index);
    }

    /// Mark a script as finished and attach its field summary
    pub fn complete_script(&mut self, index: usize, statistics: &FieldStatistics) {
        let Some(script) = self.scripts.get_mut(index).and_then(Option::as_mut) else {
            return;
        };
        script.outcome = Some(outcome(statistics));
        self.redraw(index);

        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
            let (applied, redundant) = self.totals();
            batch_bar.set_message(format!("{applied} applied, {redundant} redundant"));
        }
    }

    /// Progress of the script at `index`, if it has started
    pub fn script(&self, index: usize) -> Option<&ScriptProgress> {
        self.scripts.get(index).and_then(Option::as_ref)
    }

    /// Applied and redundant operations summed over every started script
    pub fn totals(&self) -> (usize, usize) {
        self.scripts
            .iter()
            .flatten()
            .fold((0, 0), |(applied, redundant), script| {
                (applied + script.applied, redundant + script.redundant)
            })
    }

    /// Close every bar and log the batch totals
    pub fn finish(&self) {
        let (applied, redundant) = self.totals();
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message(format!("{applied} applied, {redundant} redundant"));
        }
        for bar in &self.bars {
            bar.finish();
        }
        log::info!(
            "{} scripts: {applied} edits applied, {redundant} redundant",
            self.script_count()
        );
    }

    // Scripts share the bar pool in turn, so a large batch shows the latest few
    fn bar(&self, index: usize) -> Option<&ProgressBar> {
        match self.bars.len() {
            0 => None,
            len => self.bars.get(index % len),
        }
    }

    fn redraw(&self, index: usize) {
        let (Some(bar), Some(script)) = (self.bar(index), self.script(index)) else {
            return;
        };
        bar.set_position(script.processed() as u64);
        bar.set_message(script.message());
    }
}
