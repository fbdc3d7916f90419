//! Fixed-column PDB coordinate records.
//!
//! ```text
//! COLUMNS        DATA  TYPE    FIELD        DEFINITION
//! -------------------------------------------------------------------------------------
//!  1 -  6        Record name   "ATOM  "
//!  7 - 11        Integer       serial       Atom  serial number.
//! 13 - 16        Atom          name         Atom name.
//! 17             Character     altLoc       Alternate location indicator.
//! 18 - 20        Residue name  resName      Residue name.
//! 22             Character     chainID      Chain identifier.
//! 23 - 26        Integer       resSeq       Residue sequence number.
//! 27             AChar         iCode        Code for insertion of residues.
//! 31 - 38        Real(8.3)     x            Orthogonal coordinates for X in Angstroms.
//! 39 - 46        Real(8.3)     y            Orthogonal coordinates for Y in Angstroms.
//! 47 - 54        Real(8.3)     z            Orthogonal coordinates for Z in Angstroms.
//! 55 - 60        Real(6.2)     occupancy    Occupancy.
//! 61 - 66        Real(6.2)     tempFactor   Temperature  factor.
//! 77 - 78        LString(2)    element      Element symbol, right-justified.
//! 79 - 80        LString(2)    charge       Charge  on the atom.
//! ```
//!
//! Column 21 is unused by the format. Assemblies easily hold more chains than one character
//! can label, so written assemblies carry their chain labels over columns 21 and 22. Input
//! structures are read with the standard single-column chain, because some writers let a
//! four-character residue name run into column 21 (`DPPCM`).
use std::io;

use glam::DVec3;

use crate::core::error::PdbError;
use crate::core::structure::{AnnotatedAtom, Assembly, Atom, Record, ReplicaChain, Structure};
use crate::core::version;

/// The largest serial number that fits the five allotted columns.
const MAX_SERIAL: usize = 99999;

/// Where the chain label of a coordinate record is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChainColumns {
    /// Column 22 only.
    Standard,
    /// Columns 21 and 22, as written by [`write_assembly`].
    Wide,
}

/// Wrap a running serial number into `1..=99999`.
fn wrap_serial(serial: usize) -> usize {
    (serial.max(1) - 1) % MAX_SERIAL + 1
}

/// Columns `start..end` (zero-based, exclusive) of `line`, or less if the line is short.
fn cols(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start..end).unwrap_or_default()
}

fn single(line: &str, col: usize) -> Option<char> {
    cols(line, col, col + 1).chars().next().filter(|c| *c != ' ')
}

fn parse_atom_line(
    line: &str,
    ln: usize,
    chain_columns: ChainColumns,
) -> Result<(String, Atom), PdbError> {
    let number = |start, end, field: &str| -> Result<f64, PdbError> {
        let s = cols(line, start, end).trim();
        s.parse()
            .map_err(|_| PdbError::parse(ln, format!("could not parse {field} from '{s}'")))
    };
    let optional = |start, end, field: &str, default: f64| -> Result<f64, PdbError> {
        if cols(line, start, end).trim().is_empty() {
            Ok(default)
        } else {
            number(start, end, field)
        }
    };

    let record = if line.starts_with("HETATM") {
        Record::Hetatm
    } else {
        Record::Atom
    };
    let serial = cols(line, 6, 11).trim();
    let serial = serial
        .parse()
        .map_err(|_| PdbError::parse(ln, format!("could not parse atom serial from '{serial}'")))?;
    let resnum = cols(line, 22, 26).trim();
    let resnum = resnum
        .parse()
        .map_err(|_| PdbError::parse(ln, format!("could not parse resnum from '{resnum}'")))?;
    let pos = DVec3::new(
        number(30, 38, "x coordinate")?,
        number(38, 46, "y coordinate")?,
        number(46, 54, "z coordinate")?,
    );

    let atom = Atom {
        record,
        serial,
        name: cols(line, 12, 16).trim().to_string(),
        alt_loc: single(line, 16),
        resname: cols(line, 17, 20).trim().to_string(),
        resnum,
        icode: single(line, 26),
        pos,
        occupancy: optional(54, 60, "occupancy", 1.0)?,
        temp_factor: optional(60, 66, "temperature factor", 0.0)?,
        element: cols(line, 76, 78).trim().to_string(),
        charge: cols(line, 78, 80).trim().to_string(),
    };
    let chain_start = match chain_columns {
        ChainColumns::Standard => 21,
        ChainColumns::Wide => 20,
    };
    let chain = cols(line, chain_start, 22).trim().to_string();
    Ok((chain, atom))
}

fn read_records(pdb: &str, chain_columns: ChainColumns) -> Result<Structure, PdbError> {
    let mut atoms = Vec::new();
    for (ln, line) in pdb.lines().enumerate() {
        if line.starts_with("ENDMDL") {
            break;
        }
        if line.starts_with("ATOM") || line.starts_with("HETATM") {
            atoms.push(parse_atom_line(line, ln + 1, chain_columns)?);
        }
    }
    Ok(Structure::from_labelled_atoms(atoms))
}

/// Read the atoms of the first model in a PDB file.
///
/// Everything but `ATOM` and `HETATM` records is skipped. Reading stops at the first `ENDMDL`.
/// The chain label is the single character in column 22.
pub fn read_pdb(pdb: &str) -> Result<Structure, PdbError> {
    read_records(pdb, ChainColumns::Standard)
}

/// Read back an assembly written by [`write_assembly`], with chain labels of up to two
/// characters over columns 21 and 22.
pub fn read_assembly(pdb: &str) -> Result<Structure, PdbError> {
    read_records(pdb, ChainColumns::Wide)
}

/// Lay out an atom name the way the format expects.
///
/// Four-character names start in column 13. Shorter names of single-letter elements start in
/// column 14, so that the element symbol lines up.
fn format_atom_name(name: &str, element: &str) -> String {
    if name.len() >= 4 || element.len() == 2 {
        format!("{:<4}", &name[..name.len().min(4)])
    } else {
        format!(" {name:<3}")
    }
}

fn chain_columns(id: &str) -> Result<String, PdbError> {
    if id.len() > 2 {
        return Err(PdbError::ChainIdTooLong { id: id.to_string() });
    }
    Ok(format!("{id:>2}"))
}

fn fixed(field: &'static str, value: f64, width: usize, precision: usize) -> Result<String, PdbError> {
    let s = format!("{value:>width$.precision$}");
    if s.len() > width {
        return Err(PdbError::FieldOverflow { field, value });
    }
    Ok(s)
}

/// Format one annotated atom. The distance goes into the occupancy slot and the role code into
/// the temperature factor slot.
fn format_atom_line(serial: usize, chain: &str, annotated: &AnnotatedAtom) -> Result<String, PdbError> {
    let AnnotatedAtom {
        atom,
        role,
        distance,
    } = annotated;
    let serial = wrap_serial(serial);
    let record = atom.record.as_str();
    let name = format_atom_name(&atom.name, &atom.element);
    let alt_loc = atom.alt_loc.unwrap_or(' ');
    let resname = &atom.resname;
    let resnum = atom.resnum;
    let icode = atom.icode.unwrap_or(' ');
    let x = fixed("x coordinate", atom.pos.x, 8, 3)?;
    let y = fixed("y coordinate", atom.pos.y, 8, 3)?;
    let z = fixed("z coordinate", atom.pos.z, 8, 3)?;
    let occupancy = fixed("distance", *distance, 6, 2)?;
    let temp_factor = fixed("role code", role.code(), 6, 2)?;
    let element = &atom.element;
    let charge = &atom.charge;
    Ok(format!(
        "{record:<6}{serial:>5} {name}{alt_loc}{resname:>3}{chain}{resnum:>4}{icode}   \
         {x}{y}{z}{occupancy}{temp_factor}          {element:>2}{charge:<2}\n"
    ))
}

fn format_ter_line(serial: usize, chain: &str, last: &Atom) -> String {
    let serial = wrap_serial(serial);
    let resname = &last.resname;
    let resnum = last.resnum;
    let icode = last.icode.unwrap_or(' ');
    format!("TER   {serial:>5}      {resname:>3}{chain}{resnum:>4}{icode}\n")
}

fn format_chain(replica: &ReplicaChain, first_serial: usize) -> Result<String, PdbError> {
    let chain = chain_columns(&replica.id)?;
    let mut out = String::new();
    let mut serial = first_serial;
    for annotated in &replica.atoms {
        out.push_str(&format_atom_line(serial, &chain, annotated)?);
        serial += 1;
    }
    if let Some(last) = replica.atoms.last() {
        out.push_str(&format_ter_line(serial, &chain, &last.atom));
    }
    Ok(out)
}

/// Write a full assembly as a single-model PDB file.
///
/// Every chain is closed by a `TER` record, which takes a serial number like the atoms do.
pub fn write_assembly(writer: &mut impl io::Write, assembly: &Assembly) -> Result<(), PdbError> {
    writeln!(
        writer,
        "REMARK 999 ASSEMBLY OF {} CHAINS GENERATED BY {} {}",
        assembly.chains.len(),
        env!("CARGO_PKG_NAME"),
        version::version()
    )?;
    let mut serial = 1;
    for replica in &assembly.chains {
        let block = format_chain(replica, serial)?;
        writer.write_all(block.as_bytes())?;
        serial += replica.atoms.len() + usize::from(!replica.atoms.is_empty());
    }
    writeln!(writer, "END")?;
    writer.flush()?;
    Ok(())
}
