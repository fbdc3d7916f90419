//! Write an assembly as an mmCIF `_atom_site` table.
//!
//! Unlike PDB, mmCIF does not limit the length of a chain label, so any number of replicas can
//! be written. The annotations use the same slots as in PDB output: the distance goes into
//! `occupancy` and the role code into `B_iso_or_equiv`.
use std::io;

use crate::core::structure::Assembly;
use crate::core::version;

const ATOM_SITE_COLUMNS: [&str; 17] = [
    "group_PDB",
    "id",
    "type_symbol",
    "label_atom_id",
    "label_alt_id",
    "label_comp_id",
    "label_asym_id",
    "label_seq_id",
    "pdbx_PDB_ins_code",
    "Cartn_x",
    "Cartn_y",
    "Cartn_z",
    "occupancy",
    "B_iso_or_equiv",
    "auth_seq_id",
    "auth_asym_id",
    "pdbx_PDB_model_num",
];

/// Quote a value if it would otherwise not read back as a single token.
fn cif_value(value: &str) -> String {
    if value.is_empty() {
        return "?".to_string();
    }
    let needs_quotes = value.contains(char::is_whitespace)
        || value.starts_with(['_', '#', '$', '\'', '"', ';', '[', ']'])
        || value == "."
        || value == "?";
    if value.contains('\'') {
        format!("\"{value}\"")
    } else if needs_quotes {
        format!("'{value}'")
    } else {
        value.to_string()
    }
}

fn cif_char(c: Option<char>) -> String {
    c.map(String::from).unwrap_or_else(|| "?".to_string())
}

pub fn write_assembly(writer: &mut impl io::Write, assembly: &Assembly) -> io::Result<()> {
    writeln!(writer, "data_{}", env!("CARGO_PKG_NAME"))?;
    writeln!(writer, "#")?;
    writeln!(
        writer,
        "_software.name {}",
        cif_value(&format!("{} {}", env!("CARGO_PKG_NAME"), version::version()))
    )?;
    writeln!(writer, "#")?;

    writeln!(writer, "loop_")?;
    for column in ATOM_SITE_COLUMNS {
        writeln!(writer, "_atom_site.{column}")?;
    }
    let mut serial = 1usize;
    for replica in &assembly.chains {
        let asym_id = cif_value(&replica.id);
        for annotated in &replica.atoms {
            let atom = &annotated.atom;
            let group = atom.record.as_str();
            let element = cif_value(&atom.element);
            let name = cif_value(&atom.name);
            let alt_loc = cif_char(atom.alt_loc);
            let resname = cif_value(&atom.resname);
            let resnum = atom.resnum;
            let icode = cif_char(atom.icode);
            let [x, y, z] = atom.pos.to_array();
            let distance = annotated.distance;
            let code = annotated.role.code();
            writeln!(
                writer,
                "{group} {serial} {element} {name} {alt_loc} {resname} {asym_id} {resnum} {icode} \
                 {x:.3} {y:.3} {z:.3} {distance:.2} {code:.2} {resnum} {asym_id} 1"
            )?;
            serial += 1;
        }
    }
    writeln!(writer, "#")?;
    writer.flush()
}
