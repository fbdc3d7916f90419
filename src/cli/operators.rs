use anyhow::{Context, Result};
use capsid::core::config::Config;
use capsid::core::operator::{scan_operator_ids, OperatorTable};

use crate::args::OperatorsArgs;

/// How many ids are shown in the summary line.
const SAMPLE: usize = 5;

pub fn run(args: OperatorsArgs, config: &Config) -> Result<()> {
    let OperatorsArgs { input, full } = args;
    let text = crate::read_input(&input)?;
    let prefix = &config.record_prefix;

    let ids = scan_operator_ids(&text, prefix)
        .with_context(|| format!("Failed to scan operator ids in {input:?}"))?;
    let sample: Vec<u32> = ids.iter().take(SAMPLE).copied().collect();
    let ellipsis = if ids.len() > SAMPLE { " ..." } else { "" };
    println!("Found {} operators: {sample:?}{ellipsis}", ids.len());

    if full {
        let table = OperatorTable::parse(&text, prefix)
            .with_context(|| format!("Failed to read symmetry operators from {input:?}"))?;
        for biomolecule in table.biomolecules() {
            println!();
            println!("Biomolecule {biomolecule}:");
            for op in table.operators(Some(biomolecule))? {
                let t = op.translation;
                for (i, [a, b, c]) in op.rotation_rows().into_iter().enumerate() {
                    let label = if i == 0 { format!("{:>4}", op.id) } else { " ".repeat(4) };
                    println!("{label}  {a:>10.6}{b:>10.6}{c:>10.6}{:>15.5}", t[i]);
                }
            }
        }
    }

    Ok(())
}
