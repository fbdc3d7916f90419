//! Expand an asymmetric unit into the full assembly.
//!
//! Replicas are enumerated operator-major, chain-minor. The position of a replica in that
//! enumeration is its index, and the index alone decides its chain label. Because each replica
//! is built from its index and nothing else, the parallel and sequential paths give identical
//! assemblies.
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, info};

use crate::core::chain_id::chain_id;
use crate::core::error::AssemblyError;
use crate::core::operator::Operator;
use crate::core::role::{Role, RoleMarkers};
use crate::core::structure::{Assembly, Chain, ReplicaChain, Structure};
use crate::core::transform::{annotate, transform_chain};

/// Build the replica of `chain` under `operator`, at global enumeration `index`.
pub fn build_replica(
    index: usize,
    operator: &Operator,
    chain: &Chain,
    role: Role,
) -> Result<ReplicaChain, AssemblyError> {
    let atoms = transform_chain(operator, chain)?
        .into_iter()
        .map(|atom| annotate(atom, role))
        .collect();
    let id = chain_id(index);
    debug!(
        "Replica {index}: chain '{}' under operator {} as '{id}' ({role}).",
        chain.id, operator.id
    );
    Ok(ReplicaChain {
        id,
        operator: operator.id,
        source: chain.id.clone(),
        role,
        atoms,
    })
}

/// Apply every operator to every chain of `structure` and collect the annotated replicas.
///
/// When `PAR` is set, replicas are built on the rayon thread pool. Either way the result lists
/// replicas in enumeration order, and the first failing replica in that order is reported.
pub fn build_assembly<const PAR: bool>(
    structure: &Structure,
    operators: &[Operator],
    markers: &RoleMarkers,
) -> Result<Assembly, AssemblyError> {
    let chains = &structure.chains;
    if chains.is_empty() {
        return Err(AssemblyError::EmptyStructure);
    }

    // Roles depend on the source chain only, so we decide them once up front.
    let roles: Vec<Role> = chains.iter().map(|c| markers.classify(&c.id)).collect();
    for (chain, role) in chains.iter().zip(&roles) {
        info!("Chain '{}' ({} atoms) is classified as {role}.", chain.id, chain.atoms.len());
    }

    let nchains = chains.len();
    let total = operators.len() * nchains;
    let replica = |index: usize| {
        let (o, c) = (index / nchains, index % nchains);
        build_replica(index, &operators[o], &chains[c], roles[c])
    };

    let replicas: Vec<Result<ReplicaChain, AssemblyError>> = if PAR {
        (0..total).into_par_iter().map(replica).collect()
    } else {
        (0..total).map(replica).collect()
    };
    let chains = replicas.into_iter().collect::<Result<Vec<_>, _>>()?;

    info!(
        "Built {} replicas from {} operator(s) and {nchains} chain(s).",
        chains.len(),
        operators.len()
    );
    Ok(Assembly { chains })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use glam::{DMat3, DVec3};

    use super::*;
    use crate::core::structure::Atom;

    fn asu() -> Structure {
        let mut atoms = Vec::new();
        let mut serial = 1;
        for (label, n) in [("A", 4), ("C", 2), ("E", 3)] {
            for i in 0..n {
                let pos = DVec3::new(100.0 + i as f64, 20.0 * serial as f64, -5.0);
                atoms.push((label.to_string(), Atom::new(serial, "CA", "ALA", i + 1, pos)));
                serial += 1;
            }
        }
        Structure::from_labelled_atoms(atoms)
    }

    fn operators(n: u32) -> Vec<Operator> {
        (1..=n)
            .map(|id| Operator {
                id,
                rotation: DMat3::from_rotation_z(id as f64 * std::f64::consts::TAU / n as f64),
                translation: DVec3::ZERO,
            })
            .collect()
    }

    #[test]
    fn counts_and_order() {
        let structure = asu();
        let ops = operators(60);
        let assembly = build_assembly::<false>(&structure, &ops, &RoleMarkers::default()).unwrap();

        assert_eq!(assembly.chains.len(), 180);
        for (i, replica) in assembly.chains.iter().enumerate() {
            let source = &structure.chains[i % 3];
            assert_eq!(replica.source, source.id);
            assert_eq!(replica.operator, ops[i / 3].id);
            assert_eq!(replica.atoms.len(), source.atoms.len());
            assert_eq!(replica.id, chain_id(i));
        }
        let ids: HashSet<_> = assembly.chains.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 180);
    }

    #[test]
    fn roles_follow_the_source_chain() {
        let assembly =
            build_assembly::<false>(&asu(), &operators(5), &RoleMarkers::default()).unwrap();
        for replica in &assembly.chains {
            let expected = match replica.source.as_str() {
                "A" => Role::Pentamer,
                "C" => Role::Face,
                _ => Role::Edge,
            };
            assert_eq!(replica.role, expected);
            assert!(replica.atoms.iter().all(|a| a.role == expected));
        }
    }

    #[test]
    fn distances_are_measured_after_the_transform() {
        let op = Operator::from_rows(
            1,
            [
                [1.0, 0.0, 0.0, -100.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 5.0],
            ],
        );
        let structure = asu();
        let assembly = build_assembly::<false>(&structure, &[op], &RoleMarkers::default()).unwrap();
        let first = &assembly.chains[0].atoms[0];
        // (100, 20, -5) moves onto (0, 20, 0).
        assert!((first.distance - 20.0).abs() < 1e-9);
        assert!((first.atom.pos - DVec3::new(0.0, 20.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn parallel_matches_sequential() {
        let structure = asu();
        let ops = operators(60);
        let markers = RoleMarkers::default();
        let seq = build_assembly::<false>(&structure, &ops, &markers).unwrap();
        let par = build_assembly::<true>(&structure, &ops, &markers).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn empty_structure_fails() {
        let err = build_assembly::<false>(&Structure::default(), &operators(2), &RoleMarkers::default())
            .unwrap_err();
        assert_eq!(err, AssemblyError::EmptyStructure);
    }

    #[test]
    fn first_failure_aborts_everything() {
        let mut ops = operators(3);
        ops[1].translation = DVec3::new(f64::NAN, 0.0, 0.0);
        let err = build_assembly::<true>(&asu(), &ops, &RoleMarkers::default()).unwrap_err();
        assert_eq!(
            err,
            AssemblyError::TransformFailure {
                operator: 2,
                chain: "A".to_string(),
                serial: 1
            }
        );
    }
}
