use std::fmt;

/// One of the five classical antigenic sites of influenza hemagglutinin.
///
/// Each variant carries a fixed list of residue sequence numbers (H3
/// numbering on the HA1 chain). The lists are compile-time constants and are
/// used identically on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AntigenSite {
    Sa,
    Sb,
    Ca1,
    Ca2,
    Cb,
}

const SA: &[i32] = &[128, 129, 156, 157, 158, 159, 160, 162, 163, 164, 165, 166, 167];
const SB: &[i32] = &[187, 188, 189, 190, 191, 192, 193, 194, 195, 196, 197, 198];
const CA1: &[i32] = &[169, 170, 171, 172, 173, 206, 207, 208];
const CA2: &[i32] = &[140, 141, 142, 143, 144, 145];
const CB: &[i32] = &[79, 80, 81, 82, 83, 84];

impl AntigenSite {
    /// All sites in declaration order. Reports are ordered by this sequence.
    pub const ALL: [AntigenSite; 5] = [
        AntigenSite::Sa,
        AntigenSite::Sb,
        AntigenSite::Ca1,
        AntigenSite::Ca2,
        AntigenSite::Cb,
    ];

    /// Residue sequence numbers belonging to this site.
    pub fn residues(self) -> &'static [i32] {
        match self {
            AntigenSite::Sa => SA,
            AntigenSite::Sb => SB,
            AntigenSite::Ca1 => CA1,
            AntigenSite::Ca2 => CA2,
            AntigenSite::Cb => CB,
        }
    }

    #[inline]
    pub fn contains(self, residue_id: i32) -> bool {
        self.residues().contains(&residue_id)
    }

    pub fn label(self) -> &'static str {
        match self {
            AntigenSite::Sa => "Sa",
            AntigenSite::Sb => "Sb",
            AntigenSite::Ca1 => "Ca1",
            AntigenSite::Ca2 => "Ca2",
            AntigenSite::Cb => "Cb",
        }
    }
}

impl fmt::Display for AntigenSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_order_is_fixed() {
        let labels: Vec<_> = AntigenSite::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Sa", "Sb", "Ca1", "Ca2", "Cb"]);
    }

    #[test]
    fn residue_lists_match_site_definitions() {
        assert_eq!(AntigenSite::Sa.residues().len(), 13);
        assert_eq!(AntigenSite::Sb.residues().len(), 12);
        assert_eq!(AntigenSite::Ca1.residues(), &[169, 170, 171, 172, 173, 206, 207, 208]);
        assert_eq!(AntigenSite::Ca2.residues(), &[140, 141, 142, 143, 144, 145]);
        assert_eq!(AntigenSite::Cb.residues(), &[79, 80, 81, 82, 83, 84]);
        assert!(!AntigenSite::Sa.contains(161));
        assert!(AntigenSite::Sa.contains(162));
    }

    #[test]
    fn sites_do_not_overlap() {
        for (i, a) in AntigenSite::ALL.iter().enumerate() {
            for b in &AntigenSite::ALL[i + 1..] {
                assert!(
                    a.residues().iter().all(|r| !b.contains(*r)),
                    "{a} and {b} share residues"
                );
            }
        }
    }
}
