use std::collections::HashSet;
use std::fs;
use std::path::Path;

use repdash_core::{DealStatus, RepId, SalesRep};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// On-disk shape of the dataset: a single top-level key holding the ordered
/// representative list.
#[derive(Debug, Default, Deserialize)]
struct DataFile {
    #[serde(rename = "salesReps", default)]
    sales_reps: Vec<SalesRep>,
}

/// A deal flattened out of its owning representative, annotated with the
/// owner's name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnnotatedDeal {
    pub client: String,
    pub value: f64,
    pub status: DealStatus,
    pub sales_rep: String,
}

/// Immutable in-memory copy of the sales dataset, read once at startup.
#[derive(Clone, Debug, Default)]
pub struct SalesDataStore {
    reps: Vec<SalesRep>,
}

impl SalesDataStore {
    /// Read and parse the dataset file. A missing or unparseable file is
    /// tolerated: the store starts empty and the condition is logged, so
    /// every endpoint keeps serving (empty) responses.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(
                    event_name = "data.store.file_unreadable",
                    path = %path.display(),
                    error = %error,
                    "sales dataset could not be read, starting with an empty store"
                );
                return Self::default();
            }
        };

        match serde_json::from_str::<DataFile>(&raw) {
            Ok(file) => Self::from_reps(file.sales_reps),
            Err(error) => {
                warn!(
                    event_name = "data.store.file_malformed",
                    path = %path.display(),
                    error = %error,
                    "sales dataset could not be parsed, starting with an empty store"
                );
                Self::default()
            }
        }
    }

    /// Build a store from an already-materialized collection. Duplicate ids
    /// violate the lookup invariant, so later occurrences are dropped.
    pub fn from_reps(reps: Vec<SalesRep>) -> Self {
        let mut seen = HashSet::with_capacity(reps.len());
        let mut unique = Vec::with_capacity(reps.len());

        for rep in reps {
            if seen.insert(rep.id) {
                unique.push(rep);
            } else {
                warn!(
                    event_name = "data.store.duplicate_rep",
                    rep_id = rep.id.0,
                    rep_name = %rep.name,
                    "duplicate representative id in dataset, keeping the first occurrence"
                );
            }
        }

        Self { reps: unique }
    }

    pub fn get(&self, id: RepId) -> Option<&SalesRep> {
        self.reps.iter().find(|rep| rep.id == id)
    }

    /// All representatives in dataset order.
    pub fn all(&self) -> &[SalesRep] {
        &self.reps
    }

    pub fn len(&self) -> usize {
        self.reps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reps.is_empty()
    }

    /// Every deal across the collection, in representative order then deal
    /// order within each representative.
    pub fn deals_with_reps(&self) -> Vec<AnnotatedDeal> {
        self.reps
            .iter()
            .flat_map(|rep| {
                rep.deals.iter().map(|deal| AnnotatedDeal {
                    client: deal.client.clone(),
                    value: deal.value,
                    status: deal.status.clone(),
                    sales_rep: rep.name.clone(),
                })
            })
            .collect()
    }
}
