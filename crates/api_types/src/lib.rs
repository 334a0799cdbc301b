//! JSON wire types of the HTTP API.
//!
//! Field names are camelCase. Amounts are numbers in major units and dates
//! are strings formatted as `YYYY-MM-DD HH:MM:SS`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod transaction {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Expense {
        pub date: String,
        pub amount: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        pub date: String,
        pub amount: f64,
        pub ceiling: f64,
        pub remanent: f64,
    }

    /// A rejected transaction and the reason it was rejected.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InvalidTransaction {
        pub date: String,
        pub amount: f64,
        pub ceiling: f64,
        pub remanent: f64,
        pub message: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ValidationRequest {
        pub transactions: Vec<Transaction>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ValidationResponse {
        pub valid: Vec<Transaction>,
        pub invalid: Vec<InvalidTransaction>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FilterRequest {
        #[serde(default)]
        pub q: Vec<super::period::QPeriod>,
        #[serde(default)]
        pub p: Vec<super::period::PPeriod>,
        pub transactions: Vec<Transaction>,
    }
}

pub mod period {
    use super::*;

    /// Override rule: replaces the remanent with `fixed`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QPeriod {
        pub fixed: f64,
        pub start: String,
        pub end: String,
    }

    /// Additive rule: adds `extra` to the remanent.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PPeriod {
        pub extra: f64,
        pub start: String,
        pub end: String,
    }

    /// Grouping window for savings buckets.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct KPeriod {
        pub start: String,
        pub end: String,
    }
}

pub mod returns {
    use super::*;
    use crate::{
        period::{KPeriod, PPeriod, QPeriod},
        transaction::{Expense, InvalidTransaction, Transaction},
    };

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReturnsRequest {
        pub age: u32,
        /// Monthly wage.
        pub wage: f64,
        pub inflation: f64,
        #[serde(default)]
        pub q: Vec<QPeriod>,
        #[serde(default)]
        pub p: Vec<PPeriod>,
        #[serde(default)]
        pub k: Vec<KPeriod>,
        pub transactions: Vec<Transaction>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SavingsByDate {
        pub start: String,
        pub end: String,
        pub amount: f64,
        pub profits: f64,
        #[serde(default)]
        pub tax_benefit: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReturnsResponse {
        pub transactions_total_amount: f64,
        pub transactions_total_ceiling: f64,
        pub savings_by_dates: Vec<SavingsByDate>,
    }

    /// Body of the one-shot pipeline endpoint.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CalculateRequest {
        pub age: u32,
        pub wage: f64,
        pub inflation: f64,
        #[serde(default)]
        pub q: Vec<QPeriod>,
        #[serde(default)]
        pub p: Vec<PPeriod>,
        #[serde(default)]
        pub k: Vec<KPeriod>,
        pub expenses: Vec<Expense>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PipelineStepSummary {
        pub parsed: usize,
        pub valid: usize,
        pub filtered: usize,
        pub rejected: usize,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CalculateResponse {
        pub summary: PipelineStepSummary,
        pub rejected_transactions: Vec<InvalidTransaction>,
        pub nps: ReturnsResponse,
        pub index_fund: ReturnsResponse,
    }
}

pub mod job {
    use super::*;
    use crate::returns::ReturnsResponse;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum JobStatus {
        Processing,
        Completed,
        Failed,
    }

    /// Returned when a background job is accepted.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct JobResponse {
        pub job_id: Uuid,
        pub status: JobStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct JobStatusResponse {
        pub job_id: Uuid,
        pub status: JobStatus,
        pub result: Option<ReturnsResponse>,
        pub error: Option<String>,
    }
}

pub mod system {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub status: String,
    }

    /// Process snapshot.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Performance {
        /// Uptime as `HH:MM:SS.mmm`.
        pub time: String,
        /// Resident memory, e.g. `12.34 MB`.
        pub memory: String,
        pub threads: usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_request_defaults_missing_periods() {
        let json = r#"{
            "age": 30,
            "wage": 50000,
            "inflation": 0.05,
            "transactions": [
                {"date": "2023-01-05 10:00:00", "amount": 250, "ceiling": 300, "remanent": 50}
            ]
        }"#;
        let request: returns::ReturnsRequest = serde_json::from_str(json).unwrap();
        assert!(request.q.is_empty() && request.p.is_empty() && request.k.is_empty());
        assert_eq!(request.transactions[0].remanent, 50.0);
    }

    #[test]
    fn response_fields_are_camel_case() {
        let response = returns::ReturnsResponse {
            transactions_total_amount: 1.0,
            transactions_total_ceiling: 2.0,
            savings_by_dates: vec![returns::SavingsByDate {
                start: "a".to_string(),
                end: "b".to_string(),
                amount: 3.0,
                profits: 4.0,
                tax_benefit: 5.0,
            }],
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["transactionsTotalAmount"], 1.0);
        assert_eq!(value["savingsByDates"][0]["taxBenefit"], 5.0);
    }

    #[test]
    fn job_status_is_lowercase() {
        let value = serde_json::to_value(job::JobStatus::Processing).unwrap();
        assert_eq!(value, "processing");
    }
}
