//! Generate a PyMOL script that colors an assembly by role.
use std::io;

use crate::core::role::Role;
use crate::core::version;

/// Half-width of the temperature factor window that selects one role.
const CODE_WINDOW: f64 = 10.0;

fn color(role: Role) -> &'static str {
    match role {
        Role::Pentamer => "red",
        Role::Face => "yellow",
        Role::Edge => "orange",
    }
}

/// Write a `.pml` script that loads `structure_path` as `object` and colors each role.
pub fn write_pymol_script(
    writer: &mut impl io::Write,
    structure_path: &str,
    object: &str,
) -> io::Result<()> {
    writeln!(writer, "# Generated by {} {}", env!("CARGO_PKG_NAME"), version::version())?;
    writeln!(writer, "load {structure_path}, {object}")?;
    writeln!(writer, "hide all")?;
    writeln!(writer, "bg_color white")?;
    writeln!(writer)?;

    writeln!(writer, "show cartoon, {object}")?;
    for role in Role::ALL {
        let name = role.name();
        let lower = role.code() - CODE_WINDOW;
        let upper = role.code() + CODE_WINDOW;
        writeln!(writer, "select {name}s, {object} and b > {lower} and b < {upper}")?;
    }
    for role in Role::ALL {
        writeln!(writer, "color {}, {}s", color(role), role.name())?;
    }
    writeln!(writer)?;

    writeln!(writer, "set ray_trace_mode, 1")?;
    writeln!(writer, "zoom {object}")?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_each_role_by_its_code() {
        let mut out = Vec::new();
        write_pymol_script(&mut out, "out/capsid.pdb", "denv3").unwrap();
        let script = String::from_utf8(out).unwrap();

        assert!(script.contains("load out/capsid.pdb, denv3\n"));
        assert!(script.contains("select pentamers, denv3 and b > 0 and b < 20\n"));
        assert!(script.contains("select faces, denv3 and b > 40 and b < 60\n"));
        assert!(script.contains("select edges, denv3 and b > 80 and b < 100\n"));
        assert!(script.contains("color red, pentamers\n"));
        assert!(script.contains("color yellow, faces\n"));
        assert!(script.contains("color orange, edges\n"));
        assert!(script.ends_with("zoom denv3\n"));
    }
}
