//! Rebuild the full biological assembly of an icosahedral capsid from its asymmetric unit.
//!
//! The symmetry operators are read from the `REMARK 350 BIOMT` records of a PDB header and
//! applied to every chain of the asymmetric unit. Each replica is annotated with the structural
//! role of the chain it descends from and with the radial distance of each atom from the
//! origin.
pub mod core;
