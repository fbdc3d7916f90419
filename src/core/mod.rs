pub mod assembly;
pub mod chain_id;
pub mod cif;
pub mod config;
pub mod error;
pub mod exposure;
pub mod operator;
pub mod pdb;
pub mod role;
pub mod scene;
pub mod structure;
pub mod transform;
pub mod version;
