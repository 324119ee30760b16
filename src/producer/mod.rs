//! The external rule-producer boundary. A producer turns a gene list
//! into a rule table; the core only ever sees a valid table or falls
//! back to the built-in minimal one.

mod mock;

pub use mock::MockProducer;

use macroquad::logging::warn;

use crate::domain::{RuleError, RuleTable, fallback_table, ingest};

/// Opaque producer of validated rule tables. Implementations may be a
/// deterministic rule engine, a remote reasoning service, or anything
/// else; failure is always recoverable at this boundary.
pub trait RuleProducer: Send + Sync {
    fn generate(&self, genes: &[String]) -> Result<RuleTable, RuleError>;
}

/// Run a producer, substituting the fallback table on any failure.
pub fn produce_or_fallback(producer: &dyn RuleProducer, genes: &[String]) -> RuleTable {
    match producer.generate(genes) {
        Ok(table) => table,
        Err(err) => {
            warn!("rule producer failed, using fallback table: {}", err);
            fallback_table()
        }
    }
}

/// Validate an externally produced JSON document, substituting the
/// fallback table if it does not conform to the rule schema.
pub fn ingest_or_fallback(document: &str) -> RuleTable {
    match ingest(document) {
        Ok(table) => table,
        Err(err) => {
            warn!("rejected rule document: {}", err);
            fallback_table()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RuleError;

    struct FailingProducer;

    impl RuleProducer for FailingProducer {
        fn generate(&self, _genes: &[String]) -> Result<RuleTable, RuleError> {
            Err(RuleError::Producer("service unreachable".into()))
        }
    }

    #[test]
    fn test_producer_failure_falls_back() {
        let table = produce_or_fallback(&FailingProducer, &[]);
        assert_eq!(table.get("root").unwrap()[0].symbol, "torso");
        assert_eq!(table.get("torso").unwrap()[0].symbol, "head");
    }

    #[test]
    fn test_malformed_document_falls_back() {
        // A key whose value is not a list must yield the fallback, not a crash
        let table = ingest_or_fallback(r#"{ "root": "torso" }"#);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("torso").unwrap()[0].symbol, "head");
    }

    #[test]
    fn test_valid_document_passes_through() {
        let table = ingest_or_fallback(r#"{ "root": [ { "symbol": "orb", "pos": [0, 2, 0] } ] }"#);
        assert_eq!(table.get("root").unwrap()[0].symbol, "orb");
    }
}
