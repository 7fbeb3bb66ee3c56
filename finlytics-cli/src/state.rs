use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn finlytics_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".finlytics"))
}

pub fn ensure_finlytics_home() -> Result<PathBuf> {
    let dir = finlytics_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
