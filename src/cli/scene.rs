use anyhow::{Context, Result};
use capsid::core::scene::write_pymol_script;

use crate::args::SceneArgs;

pub fn run(args: SceneArgs) -> Result<()> {
    let SceneArgs {
        structure,
        output,
        object,
    } = args;
    let file = std::fs::File::create(&output)
        .with_context(|| format!("Failed to create script {output:?}"))?;
    let mut writer = std::io::BufWriter::new(file);
    write_pymol_script(&mut writer, &structure.to_string_lossy(), &object)?;
    eprintln!("Wrote PyMOL script to {output:?}.");
    Ok(())
}
