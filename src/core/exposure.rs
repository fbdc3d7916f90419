use serde::Deserialize;

use crate::core::role::Role;
use crate::core::structure::Structure;

fn buried_below_default() -> f64 {
    140.0 // Å
}

fn exposed_above_default() -> f64 {
    230.0 // Å
}

/// Radial thresholds that split a capsid into three shells.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExposureBands {
    #[serde(default = "buried_below_default")]
    pub buried_below: f64,
    #[serde(default = "exposed_above_default")]
    pub exposed_above: f64,
}

impl Default for ExposureBands {
    fn default() -> Self {
        Self {
            buried_below: buried_below_default(),
            exposed_above: exposed_above_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exposure {
    /// On the outer surface of the particle.
    Exposed,
    /// Facing the genome on the inside.
    Buried,
    /// In between, where the transmembrane segments sit.
    Intermediate,
}

impl std::fmt::Display for Exposure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Exposure::Exposed => "EXPOSED (surface loop)",
            Exposure::Buried => "BURIED (RNA interface)",
            Exposure::Intermediate => "INTERMEDIATE (transmembrane)",
        }
        .fmt(f)
    }
}

impl ExposureBands {
    pub fn classify(&self, distance: f64) -> Exposure {
        if distance > self.exposed_above {
            Exposure::Exposed
        } else if distance < self.buried_below {
            Exposure::Buried
        } else {
            Exposure::Intermediate
        }
    }
}

/// What a written assembly says about one residue.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueReport {
    pub resnum: i32,
    pub chain: String,
    pub role: Role,
    pub distance: f64,
    pub exposure: Exposure,
}

/// Look up the alpha carbon of residue `resnum` in a written assembly.
///
/// The first chain that holds it is used. The annotations are read back from the slots they were
/// written to: the distance from the occupancy and the role code from the temperature factor.
pub fn inspect_residue(
    structure: &Structure,
    resnum: i32,
    bands: &ExposureBands,
) -> Option<ResidueReport> {
    let (chain, atom) = structure.find_atom(resnum, "CA")?;
    let distance = atom.occupancy;
    Some(ResidueReport {
        resnum,
        chain: chain.id.clone(),
        role: Role::from_code(atom.temp_factor),
        distance,
        exposure: bands.classify(distance),
    })
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::core::structure::Atom;

    #[test]
    fn bands() {
        let bands = ExposureBands::default();
        assert_eq!(bands.classify(250.0), Exposure::Exposed);
        assert_eq!(bands.classify(230.0), Exposure::Intermediate);
        assert_eq!(bands.classify(180.0), Exposure::Intermediate);
        assert_eq!(bands.classify(140.0), Exposure::Intermediate);
        assert_eq!(bands.classify(139.9), Exposure::Buried);
    }

    #[test]
    fn reads_annotations_back() {
        let mut n = Atom::new(1, "N", "LYS", 293, DVec3::ZERO);
        n.occupancy = 1.0;
        let mut ca = Atom::new(2, "CA", "LYS", 293, DVec3::ZERO);
        ca.occupancy = 241.37;
        ca.temp_factor = 50.0;
        let structure =
            Structure::from_labelled_atoms([("B".to_string(), n), ("B".to_string(), ca)]);

        let report = inspect_residue(&structure, 293, &ExposureBands::default()).unwrap();
        assert_eq!(report.chain, "B");
        assert_eq!(report.role, Role::Face);
        assert_eq!(report.distance, 241.37);
        assert_eq!(report.exposure, Exposure::Exposed);

        assert!(inspect_residue(&structure, 400, &ExposureBands::default()).is_none());
    }
}
