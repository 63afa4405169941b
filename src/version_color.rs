//! Rotates the color marker shown by `GET /version` so every deploy produces a visible diff.

use anyhow::Context;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

pub const COLORS: [&str; 5] = ["ROJO", "VERDE", "AZUL", "AMARILLO", "NARANJA"];

pub const DEFAULT_BUILD_ID: &str = "1";

pub const DEFAULT_VERSION_FILE: &str = "src/http/status.rs";

#[derive(Error, Debug)]
#[error("build id \"{0}\" is not a non-negative integer")]
pub struct InvalidBuildIdError(String);

pub fn color_for_build(build_id: &str) -> Result<&'static str, InvalidBuildIdError> {
    let id = build_id
        .trim()
        .parse::<u64>()
        .map_err(|_| InvalidBuildIdError(build_id.into()))?;
    let index = usize::try_from(id % COLORS.len() as u64).unwrap_or_default();
    Ok(COLORS[index])
}

pub fn replace_color(content: &str, color: &str) -> String {
    static RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"feature: "Color: [A-Z]+""#).unwrap());
    let replacement = format!(r#"feature: "Color: {color}""#);
    let updated = RE.replace_all(content, regex::NoExpand(&replacement));
    updated.into_owned()
}

pub fn update_version_file(path: &Path, color: &str) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let content = replace_color(&content, color);
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
