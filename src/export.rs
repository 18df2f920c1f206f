use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::prelude::*;

use crate::FullReport;
use crate::error::Result;

///Serialize the report as pretty JSON into a timestamped file inside `dir`, creating `dir` if needed. Returns the file path.
pub fn save_report(report: &FullReport, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let local: DateTime<Local> = Local::now();
    let new_filename: String = local
        .format("%Y_%m_%d_%H_%M_%S_sms_vocab_report.json")
        .to_string();
    let path = dir.join(new_filename);

    let json = serde_json::to_string_pretty(report)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)?;
    file.write_all(json.as_bytes())?;

    Ok(path)
}
