//! OEIS sequence records.
//!
//! The OEIS search endpoint (`SequenceId::search_url`) returns JSON holding
//! the sequence name, keywords and its first few terms. A [`SequenceRecord`]
//! combines one such entry with the longer b-file sequence after checking
//! the two agree.

use serde::{Deserialize, Serialize};

use crate::sequence::{Result, Sequence, SequenceError, SequenceId};

/// One entry from an OEIS search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceEntry {
    /// The A-number without the `A`.
    pub number: u32,
    #[serde(default)]
    pub name: String,
    /// Leading terms, comma separated.
    pub data: String,
    /// `"first index,position of first term > 1"`.
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl SequenceEntry {
    /// Number of terms listed in `data`.
    pub fn term_count(&self) -> usize {
        self.data.split(',').count()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keyword
            .as_deref()
            .unwrap_or("")
            .split(',')
            .filter(|k| !k.is_empty())
    }
}

/// Search responses come either wrapped with a count or as a bare list.
/// A search with no hits may also answer with plain `null`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    Wrapped {
        count: usize,
        #[serde(default)]
        results: Option<Vec<SequenceEntry>>,
    },
    Bare(Vec<SequenceEntry>),
}

impl SearchResponse {
    fn into_parts(self) -> (usize, Vec<SequenceEntry>) {
        match self {
            SearchResponse::Wrapped { count, results } => (count, results.unwrap_or_default()),
            SearchResponse::Bare(results) => (results.len(), results),
        }
    }
}

/// Metadata for a sequence plus its full list of known terms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceRecord {
    pub seq_id: String,
    #[serde(flatten)]
    pub entry: SequenceEntry,
    pub data_longer: Vec<i128>,
    pub is_positive: bool,
}

impl SequenceRecord {
    /// Build a record from a search response and the b-file for the same id.
    ///
    /// Fails unless the response holds exactly one entry, that entry is the
    /// requested sequence, and the b-file starts with the entry's listed terms.
    pub fn from_search_json(json: &str, id: SequenceId, longer: &Sequence) -> Result<Self> {
        let response: Option<SearchResponse> = serde_json::from_str(json)?;
        let Some(response) = response else {
            return Err(SequenceError::NotFound(id));
        };
        let (count, mut results) = response.into_parts();

        match count {
            0 => return Err(SequenceError::NotFound(id)),
            1 => {}
            count => return Err(SequenceError::Ambiguous { id, count }),
        }
        let Some(entry) = results.pop() else {
            return Err(SequenceError::NotFound(id));
        };

        if entry.number != id.number() {
            return Err(SequenceError::IdMismatch {
                requested: id,
                found: entry.number,
            });
        }

        let data_longer = longer.values();
        let head = data_longer
            .iter()
            .take(entry.term_count())
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        if head != entry.data {
            return Err(SequenceError::DataMismatch {
                id,
                expected: entry.data.clone(),
                actual: head,
            });
        }

        Ok(Self {
            seq_id: id.to_string(),
            is_positive: longer.is_positive(),
            entry,
            data_longer,
        })
    }
}
