use std::path::Path;

use anyhow::{bail, Context, Result};
use capsid::core::assembly::build_assembly;
use capsid::core::config::Config;
use capsid::core::operator::OperatorTable;
use capsid::core::structure::Assembly;
use capsid::core::{cif, pdb};
use tracing::info;

use crate::args::BuildArgs;

enum Format {
    Pdb,
    Cif,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdb") | Some("ent") => Ok(Format::Pdb),
            Some("cif") | Some("mmcif") => Ok(Format::Cif),
            _ => bail!("Unsupported output extension for {path:?}. Use .pdb, .ent, .cif, or .mmcif."),
        }
    }

    /// Format the whole assembly in memory, so that nothing is written if formatting fails.
    fn render(&self, assembly: &Assembly) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        match self {
            Format::Pdb => pdb::write_assembly(&mut buffer, assembly)?,
            Format::Cif => cif::write_assembly(&mut buffer, assembly)?,
        }
        Ok(buffer)
    }
}

/// Format the assembly and only then create `output`, so a failure leaves no file behind.
fn write_output(format: &Format, assembly: &Assembly, output: &Path) -> Result<()> {
    let buffer = format
        .render(assembly)
        .with_context(|| format!("Failed to format the assembly for {output:?}"))?;
    std::fs::write(output, buffer).with_context(|| format!("Failed to write {output:?}"))
}

pub fn run(args: BuildArgs, config: &Config) -> Result<()> {
    let BuildArgs {
        input,
        output,
        biomolecule,
        parallel,
        threads,
    } = args;
    // Check this before doing any work.
    let format = Format::from_path(&output)?;

    info!("Loading {input:?}...");
    let start = std::time::Instant::now();
    let text = crate::read_input(&input)?;
    let table = OperatorTable::parse(&text, &config.record_prefix)
        .with_context(|| format!("Failed to read symmetry operators from {input:?}"))?;
    let operators = table.operators(biomolecule)?;
    let structure = pdb::read_pdb(&text)
        .with_context(|| format!("Failed to read atoms from {input:?}"))?;
    info!(
        "Found {} operator(s) and {} chain(s) with {} atoms. Took {:.3} s.",
        operators.len(),
        structure.chains.len(),
        structure.natoms(),
        start.elapsed().as_secs_f32()
    );

    info!("Expanding the asymmetric unit...");
    let start = std::time::Instant::now();
    let assembly = if parallel {
        if let Some(n) = threads {
            info!("Setting rayon global thread pool to {n} threads.");
            rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build_global()
                .context("Failed to build the global thread pool")?;
        }
        build_assembly::<true>(&structure, operators, &config.roles)?
    } else {
        build_assembly::<false>(&structure, operators, &config.roles)?
    };
    info!("Took {:.3} s.", start.elapsed().as_secs_f32());

    info!("Writing to {output:?}...");
    let start = std::time::Instant::now();
    write_output(&format, &assembly, &output)?;
    info!("Took {:.3} s.", start.elapsed().as_secs_f32());

    eprintln!(
        "Wrote {} chains ({} atoms) to {output:?}.",
        assembly.chains.len(),
        assembly.natoms()
    );
    Ok(())
}
