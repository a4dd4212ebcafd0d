use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepId(pub i64);

impl std::fmt::Display for RepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Deal pipeline stage as recorded in the dataset. The label set is open;
/// only `Closed Won` carries revenue semantics.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DealStatus(pub String);

impl DealStatus {
    pub const CLOSED_WON: &'static str = "Closed Won";

    /// Exact label match. `closed won` or `Closed Won ` do not count.
    pub fn is_closed_won(&self) -> bool {
        self.0 == Self::CLOSED_WON
    }
}

impl From<&str> for DealStatus {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub client: String,
    pub value: f64,
    pub status: DealStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub industry: String,
    pub contact: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesRep {
    pub id: RepId,
    pub name: String,
    pub role: String,
    pub region: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub deals: Vec<Deal>,
    #[serde(default)]
    pub clients: Vec<Client>,
}

#[cfg(test)]
mod tests {
    use super::{DealStatus, RepId, SalesRep};

    #[test]
    fn closed_won_requires_exact_label() {
        assert!(DealStatus::from("Closed Won").is_closed_won());
        assert!(!DealStatus::from("closed won").is_closed_won());
        assert!(!DealStatus::from("Closed Won ").is_closed_won());
        assert!(!DealStatus::from("Closed Lost").is_closed_won());
        assert!(!DealStatus::from("In Progress").is_closed_won());
    }

    #[test]
    fn rep_deserializes_from_dataset_record() {
        let raw = r#"{
            "id": 1,
            "name": "Alice",
            "role": "Senior Sales Executive",
            "region": "North America",
            "skills": ["Negotiation", "CRM"],
            "deals": [
                { "client": "Acme Corp", "value": 120000, "status": "Closed Won" }
            ],
            "clients": [
                { "name": "Acme Corp", "industry": "Manufacturing", "contact": "alice@acme.com" }
            ]
        }"#;

        let rep: SalesRep = serde_json::from_str(raw).expect("record should deserialize");
        assert_eq!(rep.id, RepId(1));
        assert_eq!(rep.region, "North America");
        assert_eq!(rep.deals.len(), 1);
        assert!(rep.deals[0].status.is_closed_won());
        assert_eq!(rep.deals[0].value, 120000.0);
        assert_eq!(rep.clients[0].industry, "Manufacturing");
    }

    #[test]
    fn rep_tolerates_missing_collections() {
        let raw = r#"{ "id": 7, "name": "Solo", "role": "AE", "region": "EMEA" }"#;

        let rep: SalesRep = serde_json::from_str(raw).expect("record should deserialize");
        assert!(rep.skills.is_empty());
        assert!(rep.deals.is_empty());
        assert!(rep.clients.is_empty());
    }

    #[test]
    fn newtypes_serialize_transparently() {
        let status = DealStatus::from("In Progress");
        assert_eq!(serde_json::to_string(&status).expect("serialize"), r#""In Progress""#);
        assert_eq!(serde_json::to_string(&RepId(3)).expect("serialize"), "3");
    }
}
