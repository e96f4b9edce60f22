//! CSV time-series logs written under the output directory.
//!
//! Three files, one row per tick, header written once at creation:
//!
//! | File | Header |
//! |------|--------|
//! | `fish_population_log.csv` | `time_step,fish_population` |
//! | `food_amount_log.csv` | `time_step,food_amount` |
//! | `oxygen_level_log.csv` | `time_step,oxygen_level` |

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use lakesim_core::history::TickLog;
use lakesim_types::TimeSeriesPoint;

use crate::error::EngineError;

/// Fish population log file name.
pub const FISH_LOG: &str = "fish_population_log.csv";
/// Food pool log file name.
pub const FOOD_LOG: &str = "food_amount_log.csv";
/// Oxygen pool log file name.
pub const OXYGEN_LOG: &str = "oxygen_level_log.csv";

/// Empty `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`EngineError::Output`] if the directory cannot be removed or
/// created.
pub fn prepare_output_dir(dir: &Path) -> Result<(), EngineError> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| EngineError::output(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| EngineError::output(dir, e))
}

/// [`TickLog`] that appends each point to the three CSV files.
#[derive(Debug)]
pub struct CsvTickLog {
    fish: BufWriter<File>,
    food: BufWriter<File>,
    oxygen: BufWriter<File>,
}

impl CsvTickLog {
    /// Create the three files in `dir` and write their headers.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Output`] naming the file that could not be
    /// created.
    pub fn create(dir: &Path) -> Result<Self, EngineError> {
        Ok(Self {
            fish: open_with_header(&dir.join(FISH_LOG), "time_step,fish_population")?,
            food: open_with_header(&dir.join(FOOD_LOG), "time_step,food_amount")?,
            oxygen: open_with_header(&dir.join(OXYGEN_LOG), "time_step,oxygen_level")?,
        })
    }
}

fn open_with_header(path: &Path, header: &str) -> Result<BufWriter<File>, EngineError> {
    let file = File::create(path).map_err(|e| EngineError::output(path, e))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{header}").map_err(|e| EngineError::output(path, e))?;
    Ok(writer)
}

impl TickLog for CsvTickLog {
    fn record(&mut self, point: &TimeSeriesPoint) -> io::Result<()> {
        writeln!(self.fish, "{},{}", point.tick, point.fish_count)?;
        writeln!(self.food, "{},{}", point.tick, point.food_amount)?;
        writeln!(self.oxygen, "{},{}", point.tick, point.oxygen_level)?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.fish.flush()?;
        self.food.flush()?;
        self.oxygen.flush()
    }
}
