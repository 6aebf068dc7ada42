use anyhow::{Result, bail};

use antigen_rmsd::{AlignConfig, BatchConfig};

use crate::cli::{AlignOptions, Cli};

pub fn build_align_config(opts: &AlignOptions) -> Result<AlignConfig> {
    if !(opts.cutoff > 0.0) {
        bail!(
            "Invalid --cutoff {}: must be a positive number of RMSDs",
            opts.cutoff
        );
    }

    Ok(AlignConfig {
        cycles: opts.cycles,
        cutoff: opts.cutoff,
        include_hydrogens: opts.include_hydrogens,
    })
}

pub fn build_batch_config(cli: &Cli) -> Result<BatchConfig> {
    if cli.threshold.is_nan() {
        bail!("Invalid --threshold: NaN never compares above anything");
    }

    Ok(BatchConfig {
        threshold: cli.threshold,
        fail_fast: cli.batch.fail_fast,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn maps_cli_flags() {
        let cli = Cli::try_parse_from([
            "agrmsd",
            "dir",
            "ref.pdb",
            "--threshold",
            "0.3",
            "--cutoff",
            "1.5",
            "--include-hydrogens",
            "--fail-fast",
        ])
        .unwrap();

        let align = build_align_config(&cli.align).unwrap();
        assert_eq!(align.cutoff, 1.5);
        assert_eq!(align.cycles, 5);
        assert!(align.include_hydrogens);

        let batch = build_batch_config(&cli).unwrap();
        assert_eq!(batch.threshold, 0.3);
        assert!(batch.fail_fast);
    }

    #[test]
    fn rejects_non_positive_cutoff() {
        let cli = Cli::try_parse_from(["agrmsd", "dir", "ref.pdb", "--cutoff", "0"]).unwrap();
        assert!(build_align_config(&cli.align).is_err());
    }
}
