//! Read `REMARK 350 BIOMT` symmetry operators from a PDB header.
//!
//! Each operator is spread over three records, one per matrix row:
//!
//! ```text
//! REMARK 350 BIOMOLECULE: 1
//! REMARK 350   BIOMT1   2  0.309017 -0.809017  0.500000        0.00000
//! REMARK 350   BIOMT2   2  0.809017  0.500000  0.309017        0.00000
//! REMARK 350   BIOMT3   2 -0.500000  0.309017  0.809017        0.00000
//! ```
//!
//! The last character of the row label is the row number, the next field is the operator id,
//! and the trailing numbers are three rotation coefficients followed by the translation
//! component for that row.
use std::collections::{BTreeMap, BTreeSet};

use glam::{DMat3, DVec3};
use tracing::{debug, warn};

use crate::core::error::OperatorError;

/// The conventional prefix of a symmetry operator row.
pub const BIOMT_PREFIX: &str = "REMARK 350   BIOMT";

/// Marks the start of the operator list of one biomolecule.
const BIOMOLECULE_PREFIX: &str = "REMARK 350 BIOMOLECULE:";

/// A rigid transform `R·v + t` taken from the header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operator {
    pub id: u32,
    pub rotation: DMat3,
    pub translation: DVec3,
}

impl Operator {
    /// The operator that leaves every coordinate in place.
    pub fn identity(id: u32) -> Self {
        Self {
            id,
            rotation: DMat3::IDENTITY,
            translation: DVec3::ZERO,
        }
    }

    /// Build an operator from its three header rows, each `[r1, r2, r3, t]`.
    pub fn from_rows(id: u32, rows: [[f64; 4]; 3]) -> Self {
        let rotation = rows.map(|[a, b, c, _]| [a, b, c]);
        // The rows are given in row-major order, while glam expects columns.
        let rotation = DMat3::from_cols_array_2d(&rotation).transpose();
        let translation = DVec3::new(rows[0][3], rows[1][3], rows[2][3]);
        Self {
            id,
            rotation,
            translation,
        }
    }

    /// Apply this operator to a single position.
    pub fn apply(&self, v: DVec3) -> DVec3 {
        self.rotation * v + self.translation
    }

    /// The rotation in row-major order, as it appears in the header.
    pub fn rotation_rows(&self) -> [[f64; 3]; 3] {
        self.rotation.transpose().to_cols_array_2d()
    }
}

/// Collects the rows of one operator until all three have been seen.
#[derive(Debug, Default)]
struct OperatorBuilder {
    rows: [Option<[f64; 4]>; 3],
}

impl OperatorBuilder {
    /// Fill row slot `row` (1, 2 or 3). A slot can only be filled once.
    fn set(&mut self, row: u8, values: [f64; 4], line: usize) -> Result<(), OperatorError> {
        let slot = &mut self.rows[row as usize - 1];
        if slot.is_some() {
            return Err(OperatorError::malformed(
                line,
                format!("row {row} of this operator was already given"),
            ));
        }
        *slot = Some(values);
        Ok(())
    }

    fn finish(self, id: u32) -> Result<Operator, OperatorError> {
        match self.rows {
            [Some(r1), Some(r2), Some(r3)] => Ok(Operator::from_rows(id, [r1, r2, r3])),
            rows => {
                let missing = (1..=3u8)
                    .zip(rows)
                    .filter(|(_, row)| row.is_none())
                    .map(|(n, _)| n)
                    .collect();
                Err(OperatorError::IncompleteOperator { id, missing })
            }
        }
    }
}

/// A single parsed operator row.
struct Row {
    row: u8,
    id: u32,
    values: [f64; 4],
}

/// Index of the row label token, given the record prefix.
///
/// For the conventional prefix the label (`BIOMT1`) is the third token, and it shares its
/// start with the last token of the prefix.
fn label_index(prefix: &str) -> usize {
    let n = prefix.split_whitespace().count();
    if prefix.ends_with(char::is_whitespace) {
        n
    } else {
        n.saturating_sub(1)
    }
}

fn parse_row(line: &str, ln: usize, label_idx: usize) -> Result<Row, OperatorError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let label = fields
        .get(label_idx)
        .ok_or_else(|| OperatorError::malformed(ln, "missing row label"))?;
    let row = match label.chars().last() {
        Some('1') => 1,
        Some('2') => 2,
        Some('3') => 3,
        _ => {
            return Err(OperatorError::malformed(
                ln,
                format!("row label '{label}' does not end in 1, 2 or 3"),
            ))
        }
    };
    let id_field = fields
        .get(label_idx + 1)
        .ok_or_else(|| OperatorError::malformed(ln, "missing operator id"))?;
    let id: u32 = id_field.parse().map_err(|_| {
        OperatorError::malformed(ln, format!("operator id '{id_field}' is not an integer"))
    })?;
    if id == 0 {
        return Err(OperatorError::malformed(ln, "operator ids start at 1"));
    }

    let numbers = fields.get(label_idx + 2..).unwrap_or_default();
    if numbers.len() < 4 {
        return Err(OperatorError::malformed(
            ln,
            format!("expected 4 numeric fields, found {}", numbers.len()),
        ));
    }
    if numbers.len() > 4 {
        warn!(
            "Ignoring {} trailing field(s) of operator record on line {ln}.",
            numbers.len() - 4
        );
    }
    let mut values = [0.0f64; 4];
    for (value, field) in values.iter_mut().zip(numbers) {
        *value = field
            .parse()
            .map_err(|_| OperatorError::malformed(ln, format!("'{field}' is not a number")))?;
        if !value.is_finite() {
            return Err(OperatorError::malformed(
                ln,
                format!("'{field}' is not a finite number"),
            ));
        }
    }

    Ok(Row { row, id, values })
}

fn parse_biomolecule(line: &str, ln: usize) -> Result<u32, OperatorError> {
    let rest = line[BIOMOLECULE_PREFIX.len()..].trim();
    rest.parse().map_err(|_| {
        OperatorError::malformed(ln, format!("biomolecule number '{rest}' is not an integer"))
    })
}

/// All operators of a header, grouped by the biomolecule they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorTable {
    /// Biomolecules in order of first declaration, each with operators sorted by id.
    biomolecules: Vec<(u32, Vec<Operator>)>,
}

impl OperatorTable {
    /// Parse every operator record in `header` that starts with `prefix`.
    ///
    /// Records that precede any `BIOMOLECULE` marker belong to biomolecule 1. The whole parse
    /// fails on the first malformed record or on any operator that lacks a row.
    pub fn parse(header: &str, prefix: &str) -> Result<Self, OperatorError> {
        let label_idx = label_index(prefix);
        let mut order: Vec<u32> = Vec::new();
        let mut builders: BTreeMap<u32, BTreeMap<u32, OperatorBuilder>> = BTreeMap::new();
        let mut current = None;

        for (ln, line) in header.lines().enumerate() {
            let ln = ln + 1;
            if line.starts_with(BIOMOLECULE_PREFIX) {
                let number = parse_biomolecule(line, ln)?;
                current = Some(number);
                continue;
            }
            if !line.starts_with(prefix) {
                continue;
            }

            let Row { row, id, values } = parse_row(line, ln, label_idx)?;
            let biomolecule = *current.get_or_insert(1);
            if !order.contains(&biomolecule) {
                order.push(biomolecule);
            }
            builders
                .entry(biomolecule)
                .or_default()
                .entry(id)
                .or_default()
                .set(row, values, ln)?;
        }

        if order.is_empty() {
            return Err(OperatorError::NoOperators);
        }

        let mut biomolecules = Vec::with_capacity(order.len());
        for number in order {
            let Some(section) = builders.remove(&number) else {
                continue;
            };
            // BTreeMap iteration gives ascending operator ids.
            let operators = section
                .into_iter()
                .map(|(id, builder)| builder.finish(id))
                .collect::<Result<Vec<_>, _>>()?;
            debug!(
                "Biomolecule {number}: {} complete operator(s).",
                operators.len()
            );
            biomolecules.push((number, operators));
        }

        Ok(Self { biomolecules })
    }

    /// The biomolecule numbers that carry operators, in order of declaration.
    pub fn biomolecules(&self) -> Vec<u32> {
        self.biomolecules.iter().map(|(n, _)| *n).collect()
    }

    /// The operators of `biomolecule`, or of the first declared one when `None`.
    pub fn operators(&self, biomolecule: Option<u32>) -> Result<&[Operator], OperatorError> {
        let found = match biomolecule {
            None => self.biomolecules.first(),
            Some(requested) => self.biomolecules.iter().find(|(n, _)| *n == requested),
        };
        match found {
            Some((_, operators)) => Ok(operators),
            None => Err(OperatorError::UnknownBiomolecule {
                requested: biomolecule.unwrap_or(1),
                available: self.biomolecules(),
            }),
        }
    }
}

/// Parse the operators of the first biomolecule in `header`, sorted by ascending id.
pub fn parse_operators(header: &str, prefix: &str) -> Result<Vec<Operator>, OperatorError> {
    let table = OperatorTable::parse(header, prefix)?;
    Ok(table.operators(None)?.to_vec())
}

/// Collect the distinct operator ids that appear in `header`, without assembling matrices.
pub fn scan_operator_ids(header: &str, prefix: &str) -> Result<BTreeSet<u32>, OperatorError> {
    let id_idx = label_index(prefix) + 1;
    let mut ids = BTreeSet::new();
    for (ln, line) in header.lines().enumerate() {
        if !line.starts_with(prefix) {
            continue;
        }
        let field = line
            .split_whitespace()
            .nth(id_idx)
            .ok_or_else(|| OperatorError::malformed(ln + 1, "missing operator id"))?;
        let id: u32 = field.parse().map_err(|_| {
            OperatorError::malformed(ln + 1, format!("operator id '{field}' is not an integer"))
        })?;
        if id == 0 {
            return Err(OperatorError::malformed(ln + 1, "operator ids start at 1"));
        }
        ids.insert(id);
    }
    Ok(ids)
}
