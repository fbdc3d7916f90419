use std::path::PathBuf;

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};

/// Rebuild a full capsid from its asymmetric unit.
///
/// The symmetry operators are taken from the `REMARK 350 BIOMT` records in the header of the
/// input PDB file. Every chain of the asymmetric unit is copied once per operator, and each atom
/// of the result is tagged with the role of its source chain and its distance from the center.
#[derive(Debug, Parser)]
#[command(about, version = capsid::core::version::version())]
pub struct Args {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Silence all logging.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also write the log to this file, without colors.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// JSON configuration file with the record prefix, role markers, and exposure thresholds.
    ///
    /// Any field that is left out keeps its default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the full assembly and write it to a PDB or mmCIF file.
    Build(BuildArgs),
    /// List the operator ids found in a header.
    Operators(OperatorsArgs),
    /// Report role, distance, and exposure of residues in a built assembly.
    Inspect(InspectArgs),
    /// Write a PyMOL script that colors a built assembly by role.
    Scene(SceneArgs),
}

#[derive(Debug, ClapArgs)]
pub struct BuildArgs {
    /// Asymmetric unit structure (PDB).
    pub input: PathBuf,

    /// Output path. The extension selects the format: .pdb, .ent, .cif, or .mmcif.
    pub output: PathBuf,

    /// The biomolecule whose operators are applied.
    ///
    /// Defaults to the first one declared in the header.
    #[arg(short, long)]
    pub biomolecule: Option<u32>,

    /// Build the replicas on multiple threads.
    ///
    /// The output is identical to a sequential build.
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of threads to use with --parallel. Defaults to the number of cores.
    #[arg(long, requires = "parallel")]
    pub threads: Option<usize>,
}

#[derive(Debug, ClapArgs)]
pub struct OperatorsArgs {
    /// Structure file whose header is scanned.
    pub input: PathBuf,

    /// Also assemble and print every operator's rotation and translation.
    #[arg(long)]
    pub full: bool,
}

#[derive(Debug, ClapArgs)]
pub struct InspectArgs {
    /// A PDB file written by `build`.
    pub input: PathBuf,

    /// Residue numbers to look up.
    #[arg(default_values_t = [293, 400])]
    pub residues: Vec<i32>,
}

#[derive(Debug, ClapArgs)]
pub struct SceneArgs {
    /// Path of the built assembly, as PyMOL should load it.
    pub structure: PathBuf,

    /// Output script path (.pml).
    pub output: PathBuf,

    /// Name of the PyMOL object.
    #[arg(long, default_value = "capsid")]
    pub object: String,
}
