use glam::DVec3;

use crate::core::error::AssemblyError;
use crate::core::operator::Operator;
use crate::core::role::Role;
use crate::core::structure::{AnnotatedAtom, Atom, Chain};

/// Return a new atom at the position `operator` maps `atom` onto.
///
/// All other fields are carried over from the source atom.
pub fn transform_atom(operator: &Operator, atom: &Atom) -> Atom {
    Atom {
        record: atom.record,
        serial: atom.serial,
        name: atom.name.clone(),
        alt_loc: atom.alt_loc,
        resname: atom.resname.clone(),
        resnum: atom.resnum,
        icode: atom.icode,
        pos: operator.apply(atom.pos),
        occupancy: atom.occupancy,
        temp_factor: atom.temp_factor,
        element: atom.element.clone(),
        charge: atom.charge.clone(),
    }
}

/// Transform every atom of `chain`, keeping count and order.
///
/// The source chain is left untouched. A non-finite coordinate in the result is an error.
pub fn transform_chain(operator: &Operator, chain: &Chain) -> Result<Vec<Atom>, AssemblyError> {
    chain
        .atoms
        .iter()
        .map(|atom| {
            let moved = transform_atom(operator, atom);
            if moved.pos.is_finite() {
                Ok(moved)
            } else {
                Err(AssemblyError::TransformFailure {
                    operator: operator.id,
                    chain: chain.id.clone(),
                    serial: atom.serial,
                })
            }
        })
        .collect()
}

/// Distance of `pos` from the origin, which is taken to be the center of the assembly.
pub fn radial_distance(pos: DVec3) -> f64 {
    pos.length()
}

/// Attach the role and the radial distance to an atom that has already been transformed.
pub fn annotate(atom: Atom, role: Role) -> AnnotatedAtom {
    let distance = radial_distance(atom.pos);
    AnnotatedAtom {
        atom,
        role,
        distance,
    }
}

#[cfg(test)]
mod tests {
    use glam::DMat3;

    use super::*;

    const EPS: f64 = 1e-9;

    fn chain() -> Chain {
        Chain {
            id: "A".to_string(),
            atoms: vec![
                Atom::new(1, "N", "MET", 1, DVec3::new(12.0, -3.5, 101.25)),
                Atom::new(2, "CA", "MET", 1, DVec3::new(13.1, -2.9, 100.0)),
                Atom::new(3, "C", "MET", 1, DVec3::new(-7.0, 0.0, 0.5)),
            ],
        }
    }

    fn rotation(id: u32, rotation: DMat3) -> Operator {
        Operator {
            id,
            rotation,
            translation: DVec3::ZERO,
        }
    }

    #[test]
    fn identity_keeps_coordinates() {
        let chain = chain();
        let moved = transform_chain(&Operator::identity(1), &chain).unwrap();
        assert_eq!(moved.len(), chain.atoms.len());
        for (a, b) in chain.atoms.iter().zip(&moved) {
            assert_eq!(a.serial, b.serial);
            assert!((a.pos - b.pos).length() < EPS);
        }
    }

    #[test]
    fn applies_rotation_then_translation() {
        let op = Operator::from_rows(
            2,
            [
                [0.0, -1.0, 0.0, 10.0],
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, -5.0],
            ],
        );
        let atom = Atom::new(1, "CA", "GLY", 1, DVec3::new(1.0, 2.0, 3.0));
        let moved = transform_atom(&op, &atom);
        assert!((moved.pos - DVec3::new(8.0, 1.0, -2.0)).length() < EPS);
        // The source is not touched.
        assert_eq!(atom.pos, DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn keeps_order_and_metadata() {
        let chain = chain();
        let op = Operator::from_rows(
            3,
            [
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 1.0],
            ],
        );
        let moved = transform_chain(&op, &chain).unwrap();
        let names: Vec<_> = moved.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["N", "CA", "C"]);
        assert_eq!(moved[2].pos, DVec3::new(-6.0, 1.0, 1.5));
    }

    #[test]
    fn pure_rotation_preserves_distance() {
        let chain = chain();
        let rotations = [
            DMat3::from_rotation_z(0.4),
            DMat3::from_rotation_x(-2.1),
            DMat3::from_axis_angle(DVec3::new(1.0, 1.0, 1.0).normalize(), 2.0944),
        ];
        for (i, r) in rotations.into_iter().enumerate() {
            let moved = transform_chain(&rotation(i as u32 + 1, r), &chain).unwrap();
            for (a, b) in chain.atoms.iter().zip(moved) {
                let before = radial_distance(a.pos);
                let after = annotate(b, Role::Face).distance;
                assert!((before - after).abs() < 1e-9, "{before} vs {after}");
            }
        }
    }

    #[test]
    fn annotation_uses_transformed_position() {
        let op = Operator::from_rows(
            1,
            [
                [1.0, 0.0, 0.0, 3.0],
                [0.0, 1.0, 0.0, 4.0],
                [0.0, 0.0, 1.0, 0.0],
            ],
        );
        let atom = Atom::new(1, "CA", "GLY", 1, DVec3::ZERO);
        let annotated = annotate(transform_atom(&op, &atom), Role::Edge);
        assert_eq!(annotated.distance, 5.0);
        assert_eq!(annotated.role, Role::Edge);
    }

    #[test]
    fn non_finite_result_fails() {
        let op = Operator {
            id: 4,
            rotation: DMat3::IDENTITY,
            translation: DVec3::new(f64::INFINITY, 0.0, 0.0),
        };
        let err = transform_chain(&op, &chain()).unwrap_err();
        assert_eq!(
            err,
            AssemblyError::TransformFailure {
                operator: 4,
                chain: "A".to_string(),
                serial: 1
            }
        );
    }
}
