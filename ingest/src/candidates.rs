//! Candidate CSV parsing.
//!
//! Format (header row skipped):
//! `firstName,lastName,address,certificationCode,politicalParty,age`

use crate::error::IngestError;
use crate::voters::skip;
use crate::{Ingested, SkipReason};
use scrutin_types::candidate::CandidateRegistration;
use scrutin_types::WalletAddress;
use std::path::Path;

/// Fields required per candidate row.
pub const CANDIDATE_FIELDS: usize = 6;

/// Parallel field lists for a bulk candidate registration, mirroring the
/// shape of the ledger's `addCandidatesBulk` call.
#[derive(Clone, Debug, Default)]
pub struct CandidateBatch {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    pub addresses: Vec<WalletAddress>,
    pub certification_codes: Vec<String>,
    pub political_parties: Vec<String>,
    pub ages: Vec<u8>,
}

impl CandidateBatch {
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
            && self.certification_codes.len() == n
            && self.political_parties.len() == n
            && self.ages.len() == n
    }

    fn push(&mut self, reg: CandidateRegistration) {
        self.first_names.push(reg.first_name);
        self.last_names.push(reg.last_name);
        self.addresses.push(reg.address);
        self.certification_codes.push(reg.certification_code);
        self.political_parties.push(reg.political_party);
        self.ages.push(reg.age);
    }

    /// Zip the parallel lists back into per-row registrations.
    pub fn into_registrations(self) -> Result<Vec<CandidateRegistration>, IngestError> {
        if !self.is_aligned() {
            return Err(IngestError::Misaligned(format!(
                "candidate batch of {} addresses",
                self.addresses.len()
            )));
        }
        let regs = self
            .first_names
            .into_iter()
            .zip(self.last_names)
            .zip(self.addresses)
            .zip(self.certification_codes)
            .zip(self.political_parties)
            .zip(self.ages)
            .map(
                |(((((first_name, last_name), address), certification_code), political_party), age)| {
                    CandidateRegistration {
                        first_name,
                        last_name,
                        address,
                        certification_code,
                        political_party,
                        age,
                    }
                },
            )
            .collect();
        Ok(regs)
    }
}

/// Parse candidate CSV text. Same row discipline as voter parsing: header
/// skipped, blank lines ignored, malformed rows dropped with a reason.
pub fn parse_candidates(text: &str) -> Ingested<CandidateBatch> {
    let mut batch = CandidateBatch::default();
    let mut skipped = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if idx == 0 || line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < CANDIDATE_FIELDS {
            skip(
                &mut skipped,
                line_no,
                SkipReason::TooFewFields {
                    found: fields.len(),
                    required: CANDIDATE_FIELDS,
                },
            );
            continue;
        }
        let address = match WalletAddress::parse(fields[2]) {
            Ok(addr) => addr,
            Err(_) => {
                skip(&mut skipped, line_no, SkipReason::BadAddress(fields[2].into()));
                continue;
            }
        };
        let age: u8 = match fields[5].parse() {
            Ok(age) => age,
            Err(_) => {
                skip(&mut skipped, line_no, SkipReason::BadAge(fields[5].into()));
                continue;
            }
        };
        batch.push(CandidateRegistration {
            first_name: fields[0].to_string(),
            last_name: fields[1].to_string(),
            address,
            certification_code: fields[3].to_string(),
            political_party: fields[4].to_string(),
            age,
        });
    }

    Ingested { batch, skipped }
}

/// Read and parse a candidate CSV file.
pub fn read_candidates_file(
    path: impl AsRef<Path>,
) -> Result<Ingested<CandidateBatch>, IngestError> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_candidates(&text))
}
