use std::collections::HashMap;

use glam::DVec3;

use crate::core::role::Role;

/// Whether an atom came from an `ATOM` or a `HETATM` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Atom,
    Hetatm,
}

impl Record {
    pub fn as_str(&self) -> &'static str {
        match self {
            Record::Atom => "ATOM",
            Record::Hetatm => "HETATM",
        }
    }
}

/// An atom as read from a coordinate record.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub record: Record,
    /// Serial number within the input file.
    pub serial: u32,
    pub name: String,
    pub alt_loc: Option<char>,
    pub resname: String,
    pub resnum: i32,
    pub icode: Option<char>,
    /// Position in ångströms.
    pub pos: DVec3,
    pub occupancy: f64,
    pub temp_factor: f64,
    pub element: String,
    pub charge: String,
}

impl Atom {
    /// A bare `ATOM` record at `pos`, mostly useful for building structures by hand.
    pub fn new(serial: u32, name: &str, resname: &str, resnum: i32, pos: DVec3) -> Self {
        Self {
            record: Record::Atom,
            serial,
            name: name.to_string(),
            alt_loc: None,
            resname: resname.to_string(),
            resnum,
            icode: None,
            pos,
            occupancy: 1.0,
            temp_factor: 0.0,
            element: name.chars().next().map(String::from).unwrap_or_default(),
            charge: String::new(),
        }
    }
}

/// A named, ordered run of atoms from the asymmetric unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub id: String,
    pub atoms: Vec<Atom>,
}

/// The first model of an input structure file, grouped into chains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    pub chains: Vec<Chain>,
}

impl Structure {
    /// Group `atoms` into chains by their label, in order of first appearance.
    ///
    /// Atom order within each chain follows the order in which the atoms are given.
    pub fn from_labelled_atoms(atoms: impl IntoIterator<Item = (String, Atom)>) -> Self {
        let mut chains: Vec<Chain> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for (label, atom) in atoms {
            let idx = *index.entry(label.clone()).or_insert_with(|| {
                chains.push(Chain {
                    id: label,
                    atoms: Vec::new(),
                });
                chains.len() - 1
            });
            chains[idx].atoms.push(atom);
        }
        Self { chains }
    }

    pub fn natoms(&self) -> usize {
        self.chains.iter().map(|c| c.atoms.len()).sum()
    }

    /// Find the first atom named `name` in residue `resnum`, searching chains in order.
    pub fn find_atom(&self, resnum: i32, name: &str) -> Option<(&Chain, &Atom)> {
        self.chains.iter().find_map(|chain| {
            chain
                .atoms
                .iter()
                .find(|a| a.resnum == resnum && a.name == name)
                .map(|a| (chain, a))
        })
    }
}

/// An atom of a replica, carrying its two annotations next to the transformed source atom.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedAtom {
    pub atom: Atom,
    pub role: Role,
    /// Distance from the origin in ångströms, measured after the transform.
    pub distance: f64,
}

/// One asymmetric-unit chain placed by one operator.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicaChain {
    /// Freshly allocated label, unique within the assembly.
    pub id: String,
    /// Id of the operator that placed this replica.
    pub operator: u32,
    /// Label of the asymmetric-unit chain this replica was built from.
    pub source: String,
    pub role: Role,
    pub atoms: Vec<AnnotatedAtom>,
}

/// The full assembly, in replica enumeration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembly {
    pub chains: Vec<ReplicaChain>,
}

impl Assembly {
    pub fn natoms(&self) -> usize {
        self.chains.iter().map(|c| c.atoms.len()).sum()
    }
}
