use std::path::PathBuf;

use crate::db;
use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_file_exists, shellexpand_path};

pub fn run(data_dir: Option<String>, account: Option<&str>, limits_file: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    } else if !settings_file_exists() {
        // First run: offer the default data dir
        println!("Data directory [{}]: ", settings.data_dir);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        let chosen = input.trim();
        if !chosen.is_empty() {
            settings.data_dir = shellexpand_path(chosen);
        }
    }

    if let Some(key) = account {
        settings.default_account = Some(key.trim().to_string());
    }
    if let Some(path) = limits_file {
        let expanded = shellexpand_path(&path);
        // Fail now rather than on the first report
        crate::limits::LimitSchedule::load(&PathBuf::from(&expanded))?;
        settings.limits_file = Some(expanded);
    }

    save_settings(&settings)?;

    let resolved = settings.data_dir();
    std::fs::create_dir_all(&resolved)?;
    db::open(&resolved)?;

    println!("Initialized tfsa at {}", resolved.display());
    if let Some(key) = &settings.default_account {
        println!("Default account: {key}");
    }
    Ok(())
}
