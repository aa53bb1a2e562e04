//! Voter CSV parsing.
//!
//! Format (header row skipped): `address,firstName,lastName,idCardNumber,age`

use crate::error::IngestError;
use crate::{Ingested, SkipReason, SkippedRow};
use scrutin_types::voter::VoterRegistration;
use scrutin_types::WalletAddress;
use std::path::Path;

/// Fields required per voter row.
pub const VOTER_FIELDS: usize = 5;

/// Parallel field lists for a bulk voter registration, mirroring the
/// shape of the ledger's `addVotersBulk` call.
#[derive(Clone, Debug, Default)]
pub struct VoterBatch {
    pub addresses: Vec<WalletAddress>,
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    pub id_card_numbers: Vec<String>,
    pub ages: Vec<u8>,
}

impl VoterBatch {
    /// Number of rows in the batch.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Whether every parallel list has the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.addresses.len();
        self.first_names.len() == n
            && self.last_names.len() == n
            && self.id_card_numbers.len() == n
            && self.ages.len() == n
    }

    fn push(&mut self, reg: VoterRegistration) {
        self.addresses.push(reg.address);
        self.first_names.push(reg.first_name);
        self.last_names.push(reg.last_name);
        self.id_card_numbers.push(reg.id_card_number);
        self.ages.push(reg.age);
    }

    /// Zip the parallel lists back into per-row registrations.
    pub fn into_registrations(self) -> Result<Vec<VoterRegistration>, IngestError> {
        if !self.is_aligned() {
            return Err(IngestError::Misaligned(format!(
                "voter batch of {} addresses",
                self.addresses.len()
            )));
        }
        let regs = self
            .addresses
            .into_iter()
            .zip(self.first_names)
            .zip(self.last_names)
            .zip(self.id_card_numbers)
            .zip(self.ages)
            .map(
                |((((address, first_name), last_name), id_card_number), age)| VoterRegistration {
                    address,
                    first_name,
                    last_name,
                    id_card_number,
                    age,
                },
            )
            .collect();
        Ok(regs)
    }
}

/// Parse voter CSV text. The first line is treated as a header and skipped;
/// blank lines are ignored; malformed rows are dropped with a reason.
pub fn parse_voters(text: &str) -> Ingested<VoterBatch> {
    let mut batch = VoterBatch::default();
    let mut skipped = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if idx == 0 || line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < VOTER_FIELDS {
            skip(
                &mut skipped,
                line_no,
                SkipReason::TooFewFields {
                    found: fields.len(),
                    required: VOTER_FIELDS,
                },
            );
            continue;
        }
        let address = match WalletAddress::parse(fields[0]) {
            Ok(addr) => addr,
            Err(_) => {
                skip(&mut skipped, line_no, SkipReason::BadAddress(fields[0].into()));
                continue;
            }
        };
        let age: u8 = match fields[4].parse() {
            Ok(age) => age,
            Err(_) => {
                skip(&mut skipped, line_no, SkipReason::BadAge(fields[4].into()));
                continue;
            }
        };
        batch.push(VoterRegistration {
            address,
            first_name: fields[1].to_string(),
            last_name: fields[2].to_string(),
            id_card_number: fields[3].to_string(),
            age,
        });
    }

    Ingested { batch, skipped }
}

/// Read and parse a voter CSV file.
pub fn read_voters_file(path: impl AsRef<Path>) -> Result<Ingested<VoterBatch>, IngestError> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_voters(&text))
}

pub(crate) fn skip(skipped: &mut Vec<SkippedRow>, line: usize, reason: SkipReason) {
    tracing::warn!(line, %reason, "dropping CSV row");
    skipped.push(SkippedRow { line, reason });
}
