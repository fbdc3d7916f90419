use thiserror::Error;

/// Failures while reading the symmetry operator table from a header.
#[derive(Debug, Error, PartialEq)]
pub enum OperatorError {
    #[error("malformed operator record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("operator {id} is incomplete: missing row(s) {missing:?}")]
    IncompleteOperator { id: u32, missing: Vec<u8> },

    #[error("no operator records were found in the header")]
    NoOperators,

    #[error("biomolecule {requested} is not declared in the header (available: {available:?})")]
    UnknownBiomolecule { requested: u32, available: Vec<u32> },
}

impl OperatorError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

/// Failures while expanding the asymmetric unit into the full assembly.
#[derive(Debug, Error, PartialEq)]
pub enum AssemblyError {
    #[error("the asymmetric unit contains no chains")]
    EmptyStructure,

    #[error(
        "operator {operator} produced a non-finite coordinate for atom {serial} of chain '{chain}'"
    )]
    TransformFailure {
        operator: u32,
        chain: String,
        serial: u32,
    },
}

/// Failures while reading or writing structure files.
#[derive(Debug, Error)]
pub enum PdbError {
    #[error("could not parse line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("chain label '{id}' does not fit the PDB chain columns, write mmCIF instead")]
    ChainIdTooLong { id: String },

    #[error("{field} value {value} does not fit its fixed-width column")]
    FieldOverflow { field: &'static str, value: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PdbError {
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// Failures while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
