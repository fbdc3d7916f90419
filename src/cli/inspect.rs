use anyhow::{bail, Context, Result};
use capsid::core::config::Config;
use capsid::core::exposure::inspect_residue;
use capsid::core::pdb::read_assembly;

use crate::args::InspectArgs;

pub fn run(args: InspectArgs, config: &Config) -> Result<()> {
    let InspectArgs { input, residues } = args;
    if !matches!(
        input.extension().and_then(|s| s.to_str()),
        Some("pdb") | Some("ent")
    ) {
        bail!("Can only inspect PDB assemblies, but got {input:?}.");
    }
    let text = crate::read_input(&input)?;
    let structure =
        read_assembly(&text).with_context(|| format!("Failed to read atoms from {input:?}"))?;

    for resnum in residues {
        println!();
        println!("--- Residue {resnum} ---");
        let Some(report) = inspect_residue(&structure, resnum, &config.exposure) else {
            println!("No CA atom for this residue in {input:?}.");
            continue;
        };
        println!("Chain:    {}", report.chain);
        println!("Location: {}", report.role);
        println!("Distance from center: {:.2} Å", report.distance);
        println!("Status:   {}", report.exposure);
    }

    Ok(())
}
