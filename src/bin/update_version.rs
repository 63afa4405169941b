use clap::Parser;
use icinema::version_color::{
    DEFAULT_BUILD_ID, DEFAULT_VERSION_FILE, color_for_build, update_version_file,
};
use std::path::PathBuf;

/// Rewrites the color shown by `GET /version` based on the CI build id.
#[derive(Parser, Debug)]
#[command(name = "update-version")]
struct Cli {
    /// CI build id; picks the color by index
    #[arg(default_value = DEFAULT_BUILD_ID)]
    build_id: String,

    /// Source file holding the color marker
    #[arg(long, default_value = DEFAULT_VERSION_FILE)]
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let color = color_for_build(&cli.build_id)?;
    update_version_file(&cli.file, color)?;
    println!("✅ Color cambiado a: {color}");
    Ok(())
}
