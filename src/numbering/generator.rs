//! Next-number generation
//!
//! Every document number renders as `{prefix}{sequence}-{MMDDYYYY}-{branch code}`
//! with the sequence zero-padded to the kind's width. The next number is
//! derived either from a structured [`DocumentNumber`] or, for numbers that
//! were stored as plain text, by reading the sequence back out of the string
//! at the kind's fixed offset.

use crate::numbering::{DocumentKind, NumberingError, SequenceSlot};
use crate::org::OfficeBranch;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%m%d%Y";

/// Structured document number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNumber {
    pub kind: DocumentKind,
    pub sequence: u32,
    pub date: NaiveDate,
    pub branch: OfficeBranch,
}

impl DocumentNumber {
    /// First number of a fresh (kind, branch) scope
    pub fn first(kind: DocumentKind, branch: OfficeBranch, date: NaiveDate) -> Self {
        Self {
            kind,
            sequence: kind.base(branch),
            date,
            branch,
        }
    }

    /// The number following this one, stamped with `date`
    pub fn next(&self, date: NaiveDate) -> Result<Self, NumberingError> {
        let sequence = self
            .sequence
            .checked_add(1)
            .ok_or(NumberingError::SequenceExhausted(self.kind))?;
        Ok(Self {
            kind: self.kind,
            sequence,
            date,
            branch: self.branch,
        })
    }

    /// Read a number previously stored as text.
    ///
    /// The sequence is taken from the kind's fixed offset, the date and branch
    /// from the second and third `-`-separated segments.
    pub fn parse_legacy(kind: DocumentKind, value: &str) -> Result<Self, NumberingError> {
        let malformed = || NumberingError::MalformedNumber {
            kind,
            value: value.to_string(),
        };

        let mut parts = value.splitn(3, '-');
        let (_, date, code) = match (parts.next(), parts.next(), parts.next()) {
            (Some(head), Some(date), Some(code)) => (head, date, code),
            _ => return Err(malformed()),
        };

        let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| malformed())?;
        let branch = OfficeBranch::ALL
            .into_iter()
            .find(|b| b.code() == code)
            .ok_or_else(malformed)?;
        let sequence = legacy_sequence(kind, value).ok_or_else(|| {
            NumberingError::MalformedSequence {
                kind,
                value: value.to_string(),
            }
        })?;

        Ok(Self {
            kind,
            sequence,
            date,
            branch,
        })
    }
}

impl std::fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{:0width$}-{}-{}",
            self.kind.prefix(),
            self.sequence,
            self.date.format(DATE_FORMAT),
            self.branch.code(),
            width = self.kind.pad_width()
        )
    }
}

impl DocumentKind {
    /// Next number for this kind given the last issued one, stamped with `date`.
    ///
    /// `None` or an empty string starts the scope at the kind's base.
    pub fn next_number_on(
        &self,
        last: Option<&str>,
        branch: OfficeBranch,
        date: NaiveDate,
    ) -> Result<String, NumberingError> {
        let number = match last.filter(|s| !s.is_empty()) {
            None => DocumentNumber::first(*self, branch, date),
            Some(last) => match legacy_sequence(*self, last) {
                Some(sequence) => DocumentNumber {
                    kind: *self,
                    sequence,
                    date,
                    branch,
                }
                .next(date)?,
                None if self.falls_back_to_base() => DocumentNumber::first(*self, branch, date),
                None => {
                    return Err(NumberingError::MalformedSequence {
                        kind: *self,
                        value: last.to_string(),
                    })
                }
            },
        };
        Ok(number.to_string())
    }
}

/// Sequence stored inside a legacy number string, if one can be read
pub fn legacy_sequence(kind: DocumentKind, value: &str) -> Option<u32> {
    let slice: String = match kind.sequence_slot() {
        SequenceSlot::BeforeFirstDash => value.split('-').next().unwrap_or_default().to_string(),
        SequenceSlot::Chars(start, end) => value.chars().skip(start).take(end - start).collect(),
    };
    parse_leading_digits(&slice)
}

/// Integer at the start of `s` after optional whitespace; trailing text is ignored.
fn parse_leading_digits(s: &str) -> Option<u32> {
    let trimmed = s.trim_start();
    let digits: &str = match trimmed.find(|c: char| !c.is_ascii_digit()) {
        Some(end) => &trimmed[..end],
        None => trimmed,
    };
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Today's date in the server's local time zone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn next_memorandum_number(
    last: Option<&str>,
    branch: OfficeBranch,
) -> Result<String, NumberingError> {
    DocumentKind::Memorandum.next_number_on(last, branch, today())
}

pub fn next_dts_number(last: Option<&str>, branch: OfficeBranch) -> Result<String, NumberingError> {
    DocumentKind::Dts.next_number_on(last, branch, today())
}

pub fn next_transaction_number(
    last: Option<&str>,
    branch: OfficeBranch,
) -> Result<String, NumberingError> {
    DocumentKind::Transaction.next_number_on(last, branch, today())
}

pub fn next_serial_number(
    last: Option<&str>,
    branch: OfficeBranch,
) -> Result<String, NumberingError> {
    DocumentKind::Serial.next_number_on(last, branch, today())
}

pub fn next_purchase_request_number(
    last: Option<&str>,
    branch: OfficeBranch,
) -> Result<String, NumberingError> {
    DocumentKind::PurchaseRequest.next_number_on(last, branch, today())
}

pub fn next_package_number(
    last: Option<&str>,
    branch: OfficeBranch,
) -> Result<String, NumberingError> {
    DocumentKind::Package.next_number_on(last, branch, today())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn next(kind: DocumentKind, last: Option<&str>, branch: OfficeBranch) -> String {
        kind.next_number_on(last, branch, date()).unwrap()
    }

    /// Numeric segment between the prefix and the first `-`
    fn sequence_segment(kind: DocumentKind, number: &str) -> String {
        number[kind.prefix().len()..]
            .split('-')
            .next()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_first_numbers() {
        use DocumentKind::*;
        use OfficeBranch::*;

        assert_eq!(next(Memorandum, None, Cebu), "001-03052024-CEB");
        assert_eq!(next(Dts, None, Calbayog), "DTS00001-03052024-CAL");
        assert_eq!(next(Transaction, None, Fuente), "T001-03052024-FUENTE");
        assert_eq!(next(Serial, None, Cebu), "SA00251-03052024-CEB");
        assert_eq!(next(Serial, None, Calbayog), "SA01451-03052024-CAL");
        assert_eq!(next(Serial, None, Fuente), "SA00001-03052024-FUENTE");
        assert_eq!(next(PurchaseRequest, None, Cebu), "PO00551-03052024-CEB");
        assert_eq!(next(PurchaseRequest, None, Calbayog), "PO02551-03052024-CAL");
        assert_eq!(next(Package, None, Cebu), "P00501-03052024-CEB");
        assert_eq!(next(Package, None, Fuente), "P00001-03052024-FUENTE");
    }

    #[test]
    fn test_empty_last_number_starts_fresh_scope() {
        assert_eq!(
            next(DocumentKind::Serial, Some(""), OfficeBranch::Calbayog),
            "SA01451-03052024-CAL"
        );
    }

    #[test]
    fn test_generate_twice_increments_by_one() {
        for kind in DocumentKind::ALL {
            for branch in OfficeBranch::ALL {
                let first = next(kind, None, branch);
                let second = next(kind, Some(&first), branch);
                assert_eq!(
                    legacy_sequence(kind, &second).unwrap(),
                    kind.base(branch) + 1,
                    "{kind} {branch}: {first} -> {second}"
                );
            }
        }
    }

    #[test]
    fn test_package_reads_sequence_past_its_prefix() {
        // [2,7) of "P00501-..." is "0501-"; the trailing dash is ignored.
        assert_eq!(
            next(DocumentKind::Package, Some("P00501-01012024-CEB"), OfficeBranch::Cebu),
            "P00502-03052024-CEB"
        );
    }

    #[test]
    fn test_next_uses_new_date_and_branch() {
        assert_eq!(
            next(DocumentKind::Dts, Some("DTS00041-12312023-CEB"), OfficeBranch::Calbayog),
            "DTS00042-03052024-CAL"
        );
        assert_eq!(
            next(DocumentKind::Memorandum, Some("017-01022024-CAL"), OfficeBranch::Calbayog),
            "018-03052024-CAL"
        );
    }

    #[test]
    fn test_padding_width_is_fixed() {
        use DocumentKind::*;
        for (kind, last) in [
            (Memorandum, "008-03052024-CEB"),
            (Dts, "DTS00099-03052024-CEB"),
            (Transaction, "T009-03052024-CEB"),
            (Serial, "SA09999-03052024-CEB"),
            (PurchaseRequest, "PO00009-03052024-CEB"),
            (Package, "P00009-03052024-CEB"),
        ] {
            let number = next(kind, Some(last), OfficeBranch::Cebu);
            assert_eq!(sequence_segment(kind, &number).len(), kind.pad_width(), "{number}");
        }
        assert_eq!(
            next(Package, Some("P00009-03052024-CEB"), OfficeBranch::Cebu),
            "P00010-03052024-CEB"
        );
    }

    #[test]
    fn test_transaction_signed_slice_falls_back_to_base() {
        assert_eq!(
            next(DocumentKind::Transaction, Some("T-12-03052024-CEB"), OfficeBranch::Cebu),
            "T001-03052024-CEB"
        );
        assert!(DocumentKind::Dts
            .next_number_on(Some("DTS-0012-03052024-CEB"), OfficeBranch::Cebu, date())
            .is_err());
    }

    #[test]
    fn test_padding_does_not_truncate() {
        assert_eq!(
            next(DocumentKind::Memorandum, Some("999-03052024-CEB"), OfficeBranch::Cebu),
            "1000-03052024-CEB"
        );
        assert_eq!(
            next(DocumentKind::Transaction, Some("T999-03052024-CEB"), OfficeBranch::Cebu),
            "T1000-03052024-CEB"
        );
    }

    #[test]
    fn test_transaction_keeps_base_for_unreadable_slice() {
        assert_eq!(
            next(DocumentKind::Transaction, Some("T"), OfficeBranch::Cebu),
            "T001-03052024-CEB"
        );
        assert_eq!(
            next(DocumentKind::Transaction, Some("Tabc-03052024-CEB"), OfficeBranch::Cebu),
            "T001-03052024-CEB"
        );
        assert_eq!(
            next(DocumentKind::Transaction, Some("T041-03052024-CEB"), OfficeBranch::Cebu),
            "T042-03052024-CEB"
        );
    }

    #[test]
    fn test_malformed_prior_number_is_an_error() {
        let err = DocumentKind::Dts
            .next_number_on(Some("DTSxxxxx-03052024-CEB"), OfficeBranch::Cebu, date())
            .unwrap_err();
        assert!(matches!(err, NumberingError::MalformedSequence { kind: DocumentKind::Dts, .. }));

        assert!(DocumentKind::Memorandum
            .next_number_on(Some("memo-03052024-CEB"), OfficeBranch::Cebu, date())
            .is_err());
    }

    #[test]
    fn test_deterministic_for_same_inputs() {
        for kind in DocumentKind::ALL {
            let a = kind.next_number_on(Some("00012345-03052024-CEB"), OfficeBranch::Cebu, date());
            let b = kind.next_number_on(Some("00012345-03052024-CEB"), OfficeBranch::Cebu, date());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_today_wrappers_match_explicit_date() {
        let today = today();
        let branch = OfficeBranch::Calbayog;
        assert_eq!(
            next_memorandum_number(None, branch).unwrap(),
            DocumentKind::Memorandum.next_number_on(None, branch, today).unwrap()
        );
        assert_eq!(
            next_dts_number(None, branch).unwrap(),
            DocumentKind::Dts.next_number_on(None, branch, today).unwrap()
        );
        assert_eq!(
            next_transaction_number(None, branch).unwrap(),
            DocumentKind::Transaction.next_number_on(None, branch, today).unwrap()
        );
        assert_eq!(
            next_serial_number(None, branch).unwrap(),
            DocumentKind::Serial.next_number_on(None, branch, today).unwrap()
        );
        assert_eq!(
            next_purchase_request_number(None, branch).unwrap(),
            DocumentKind::PurchaseRequest.next_number_on(None, branch, today).unwrap()
        );
        assert_eq!(
            next_package_number(None, branch).unwrap(),
            DocumentKind::Package.next_number_on(None, branch, today).unwrap()
        );
    }

    #[test]
    fn test_structured_next_matches_string_path() {
        let first = DocumentNumber::first(DocumentKind::Serial, OfficeBranch::Cebu, date());
        let second = first.next(date()).unwrap();
        assert_eq!(
            second.to_string(),
            next(DocumentKind::Serial, Some(&first.to_string()), OfficeBranch::Cebu)
        );
    }

    #[test]
    fn test_parse_legacy() {
        let number =
            DocumentNumber::parse_legacy(DocumentKind::PurchaseRequest, "PO02560-11202023-CAL")
                .unwrap();
        assert_eq!(number.sequence, 2560);
        assert_eq!(number.branch, OfficeBranch::Calbayog);
        assert_eq!(number.date, NaiveDate::from_ymd_opt(2023, 11, 20).unwrap());
        assert_eq!(number.to_string(), "PO02560-11202023-CAL");

        let memo = DocumentNumber::parse_legacy(DocumentKind::Memorandum, "012-01152024-FUENTE")
            .unwrap();
        assert_eq!(memo.sequence, 12);
        assert_eq!(memo.branch, OfficeBranch::Fuente);
    }

    #[test]
    fn test_parse_legacy_rejects_bad_shapes() {
        assert!(DocumentNumber::parse_legacy(DocumentKind::Dts, "DTS00001").is_err());
        assert!(DocumentNumber::parse_legacy(DocumentKind::Dts, "DTS00001-13452024-CEB").is_err());
        assert!(DocumentNumber::parse_legacy(DocumentKind::Dts, "DTS00001-03052024-MNL").is_err());
    }

    #[test]
    fn test_sequence_exhausted() {
        let last = DocumentNumber {
            kind: DocumentKind::Dts,
            sequence: u32::MAX,
            date: date(),
            branch: OfficeBranch::Cebu,
        };
        assert_eq!(
            last.next(date()).unwrap_err(),
            NumberingError::SequenceExhausted(DocumentKind::Dts)
        );
    }

    #[test]
    fn test_parse_leading_digits() {
        assert_eq!(parse_leading_digits("00251"), Some(251));
        assert_eq!(parse_leading_digits("0501-"), Some(501));
        assert_eq!(parse_leading_digits("  42"), Some(42));
        assert_eq!(parse_leading_digits("12a"), Some(12));
        assert_eq!(parse_leading_digits(""), None);
        assert_eq!(parse_leading_digits("abc"), None);
    }
}
