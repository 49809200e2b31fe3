//! Controlled vocabularies for sample-request metadata.
//!
//! These are closed sets supplied by the sequencing facility; the gate
//! only tests membership, it never manages the registries themselves.
//! Membership is case-insensitive and additionally ignores spaces and
//! underscores, because the upstream feeds disagree on spelling
//! (`"Pooled Library"` vs `"POOLED_LIBRARY"`). A value outside the set
//! is a negative answer, never an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalize a raw field value for vocabulary lookup.
fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect::<String>()
        .to_uppercase()
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $canonical:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Returns the canonical value as supplied by the facility.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $canonical,)+
                }
            }

            /// Case-insensitive membership test. Unrecognized values
            /// return false rather than an error.
            pub fn is_member(value: &str) -> bool {
                value.parse::<$name>().is_ok()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = normalize(s);
                $(
                    if normalized == normalize($canonical) {
                        return Ok($name::$variant);
                    }
                )+
                Err(format!("unknown {}: {s}", stringify!($name)))
            }
        }
    };
}

vocabulary! {
    /// Biological material category of a sample.
    SpecimenType {
        Biopsy => "Biopsy",
        Blood => "Blood",
        CellLine => "CellLine",
        CfDna => "cfDNA",
        Exosome => "Exosome",
        Fingernails => "Fingernails",
        Organoid => "Organoid",
        Pdx => "PDX",
        RapidAutopsy => "RapidAutopsy",
        Resection => "Resection",
        Saliva => "Saliva",
        Xenograft => "Xenograft",
        XenograftDerivedCellLine => "XenograftDerivedCellLine",
        Other => "other",
    }
}

impl SpecimenType {
    /// Specimen types whose validity additionally requires a
    /// resolvable CMO sample class.
    pub fn requires_sample_class(&self) -> bool {
        matches!(
            self,
            SpecimenType::CellLine
                | SpecimenType::Pdx
                | SpecimenType::Xenograft
                | SpecimenType::XenograftDerivedCellLine
                | SpecimenType::Organoid
        )
    }

    /// Specimen types whose validity instead depends on the sample
    /// origin.
    pub fn requires_sample_origin(&self) -> bool {
        matches!(self, SpecimenType::Exosome | SpecimenType::CfDna)
    }
}

vocabulary! {
    /// Secondary classification used when the specimen type is absent
    /// or needs further disambiguation.
    CmoSampleClass {
        AdjacentNormal => "Adjacent Normal",
        AdjacentTissue => "Adjacent Tissue",
        Biopsy => "Biopsy",
        Blood => "Blood",
        CellFreeDna => "cfDNA",
        Exosome => "Exosome",
        Fingernails => "Fingernails",
        LocalRecurrence => "Local Recurrence",
        Metastasis => "Metastasis",
        Normal => "Normal",
        Organoid => "Organoid",
        Other => "Other",
        Pdx => "PDX",
        Primary => "Primary",
        RapidAutopsy => "Rapid Autopsy",
        Recurrence => "Recurrence",
        Resection => "Resection",
        Saliva => "Saliva",
        Tumor => "Tumor",
        UnknownTumor => "Unknown Tumor",
        Xenograft => "Xenograft",
        XenograftDerivedCellLine => "XenograftDerivedCellLine",
    }
}

vocabulary! {
    /// Anatomical/physical origin of the collected material.
    SampleOrigin {
        Block => "Block",
        BoneMarrowAspirate => "Bone Marrow Aspirate",
        BuccalSwab => "Buccal Swab",
        BuffyCoat => "Buffy Coat",
        CellPellet => "Cell Pellet",
        Cells => "Cells",
        CerebrospinalFluid => "Cerebrospinal Fluid",
        CoreBiopsy => "Core Biopsy",
        Curls => "Curls",
        FineNeedleAspirate => "Fine Needle Aspirate",
        Fingernails => "Fingernails",
        FreshOrFrozenTissue => "Fresh or Frozen Tissue",
        Organoid => "Organoid",
        Plasma => "Plasma",
        Punch => "Punch",
        RapidAutopsyTissue => "Rapid Autopsy Tissue",
        Saliva => "Saliva",
        Slides => "Slides",
        SortedCells => "Sorted Cells",
        Tissue => "Tissue",
        Urine => "Urine",
        ViablyFrozenCells => "Viably Frozen Cells",
        WholeBlood => "Whole Blood",
    }
}

vocabulary! {
    /// Nucleic-acid level sample type carried in `cmoSampleIdFields`.
    SampleType {
        Dna => "DNA",
        Rna => "RNA",
        CdnaLibrary => "cDNA Library",
        Cdna => "cDNA",
        CfDna => "cfDNA",
        DnaLibrary => "DNA Library",
        PooledLibrary => "Pooled Library",
        Other => "other",
    }
}
