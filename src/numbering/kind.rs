//! Document kinds and their numbering tables

use crate::numbering::NumberingError;
use crate::org::OfficeBranch;
use serde::{Deserialize, Serialize};

/// Where the sequence lives inside a previously issued number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceSlot {
    /// Text before the first `-`
    BeforeFirstDash,
    /// Character range `[start, end)`, clamped to the string length
    Chars(usize, usize),
}

/// A kind of document that carries its own number sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Memorandum,
    Dts,
    Transaction,
    Serial,
    PurchaseRequest,
    Package,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 6] = [
        Self::Memorandum,
        Self::Dts,
        Self::Transaction,
        Self::Serial,
        Self::PurchaseRequest,
        Self::Package,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Memorandum => "",
            Self::Dts => "DTS",
            Self::Transaction => "T",
            Self::Serial => "SA",
            Self::PurchaseRequest => "PO",
            Self::Package => "P",
        }
    }

    /// Minimum width of the zero-padded sequence segment
    pub fn pad_width(&self) -> usize {
        match self {
            Self::Memorandum | Self::Transaction => 3,
            Self::Dts | Self::Serial | Self::PurchaseRequest | Self::Package => 5,
        }
    }

    pub fn sequence_slot(&self) -> SequenceSlot {
        match self {
            Self::Memorandum => SequenceSlot::BeforeFirstDash,
            Self::Dts => SequenceSlot::Chars(3, 8),
            Self::Transaction => SequenceSlot::Chars(1, 4),
            // Package shares the two-letter offsets even though its prefix is one letter.
            Self::Serial | Self::PurchaseRequest | Self::Package => SequenceSlot::Chars(2, 7),
        }
    }

    /// First sequence issued in a fresh (kind, branch) scope
    pub fn base(&self, branch: OfficeBranch) -> u32 {
        match (self, branch) {
            (Self::Serial, OfficeBranch::Cebu) => 251,
            (Self::Serial, OfficeBranch::Calbayog) => 1451,
            (Self::PurchaseRequest, OfficeBranch::Cebu) => 551,
            (Self::PurchaseRequest, OfficeBranch::Calbayog) => 2551,
            (Self::Package, OfficeBranch::Cebu) => 501,
            _ => 1,
        }
    }

    /// Whether an unparseable prior sequence falls back to the base value
    pub fn falls_back_to_base(&self) -> bool {
        matches!(self, Self::Transaction)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memorandum => "memorandum",
            Self::Dts => "dts",
            Self::Transaction => "transaction",
            Self::Serial => "serial",
            Self::PurchaseRequest => "purchase-request",
            Self::Package => "package",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = NumberingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| NumberingError::UnknownKind(s.to_string()))
    }
}
