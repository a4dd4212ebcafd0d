use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::rep::SalesRep;

/// Aggregate view of the dataset that gets embedded into every AI prompt.
///
/// Built fresh per question from the current collection and discarded with
/// the request. Region names are kept sorted so the rendered prompt is
/// byte-identical across calls against the same data.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AiContext<'a> {
    pub sales_reps: &'a [SalesRep],
    pub total_reps: usize,
    pub regions: BTreeSet<String>,
    pub total_deals: usize,
    pub closed_won_value: f64,
}

impl<'a> AiContext<'a> {
    /// Single pass over the collection. An empty slice yields zeroed
    /// counters and an empty region set.
    pub fn build(reps: &'a [SalesRep]) -> Self {
        let mut regions = BTreeSet::new();
        let mut total_deals = 0;
        let mut closed_won_value = 0.0;

        for rep in reps {
            regions.insert(rep.region.clone());
            total_deals += rep.deals.len();
            closed_won_value += rep
                .deals
                .iter()
                .filter(|deal| deal.status.is_closed_won())
                .map(|deal| deal.value)
                .sum::<f64>();
        }

        Self { sales_reps: reps, total_reps: reps.len(), regions, total_deals, closed_won_value }
    }

    /// Indented JSON rendering used inside the prompt template.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
