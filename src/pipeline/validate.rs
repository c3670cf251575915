use crate::app::ports::{IdentifierValidator, ProbeOutcome};
use crate::common::types::ValidationOutcomeSet;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tracing::{error, info, warn, Instrument};

/// Probe every identifier with at most `concurrency` probes in flight and
/// return the identifiers that failed.
///
/// All probes are joined before returning; a failing probe never stops the
/// others. A probe task that panics counts as a failure of its identifier.
/// `concurrency` of 1 runs the probes one after another; it is clamped to
/// `1..=Semaphore::MAX_PERMITS`.
pub async fn validate_identifiers<I>(
    validator: Arc<dyn IdentifierValidator>,
    identifiers: I,
    concurrency: usize,
) -> ValidationOutcomeSet
where
    I: IntoIterator<Item = String>,
{
    let width = concurrency.clamp(1, Semaphore::MAX_PERMITS);
    let sem = Arc::new(Semaphore::new(width));
    let bad_ids: Arc<Mutex<ValidationOutcomeSet>> = Arc::default();
    let mut join_set = JoinSet::new();
    let mut in_flight = HashMap::new();

    for twitter_id in identifiers {
        // Held by the task; released when the probe finishes
        let permit = sem
            .clone()
            .acquire_owned()
            .await
            .expect("semaphore never closed");
        let validator = validator.clone();
        let bad_ids = bad_ids.clone();
        let id = twitter_id.clone();

        let handle = join_set.spawn(
            async move {
                let _permit = permit;
                match validator.probe(&id).await {
                    ProbeOutcome::Exists => info!("{} (GOOD)", id),
                    ProbeOutcome::Missing { status } => {
                        info!("{} (BAD) status={}", id, status);
                        bad_ids.lock().await.insert(id);
                    }
                    ProbeOutcome::Unreachable { error } => {
                        warn!("{} (BAD) unreachable: {}", id, error);
                        bad_ids.lock().await.insert(id);
                    }
                }
            }
            .in_current_span(),
        );
        in_flight.insert(handle.id(), twitter_id);
    }

    while let Some(joined) = join_set.join_next_with_id().await {
        match joined {
            Ok((task_id, ())) => {
                in_flight.remove(&task_id);
            }
            Err(e) => {
                if let Some(twitter_id) = in_flight.remove(&e.id()) {
                    error!("{} (BAD) probe task failed: {}", twitter_id, e);
                    bad_ids.lock().await.insert(twitter_id);
                }
            }
        }
    }

    let mut guard = bad_ids.lock().await;
    std::mem::take(&mut *guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;

    /// Valid iff the identifier is in the allow list
    struct AllowList(HashSet<&'static str>);

    #[async_trait]
    impl IdentifierValidator for AllowList {
        async fn probe(&self, twitter_id: &str) -> ProbeOutcome {
            if self.0.contains(twitter_id) {
                ProbeOutcome::Exists
            } else {
                ProbeOutcome::Missing { status: 404 }
            }
        }
    }

    struct Panicky;

    #[async_trait]
    impl IdentifierValidator for Panicky {
        async fn probe(&self, twitter_id: &str) -> ProbeOutcome {
            if twitter_id == "boom" {
                panic!("probe blew up");
            }
            ProbeOutcome::Exists
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_collects_failing_identifiers() {
        let validator = Arc::new(AllowList(["2600", "ae"].into_iter().collect()));
        let bad = validate_identifiers(validator, ids(&["2600", "ae", "1f4a9", "e00"]), 4).await;
        let expected: ValidationOutcomeSet = ids(&["1f4a9", "e00"]).into_iter().collect();
        assert_eq!(bad, expected);
    }

    #[tokio::test]
    async fn test_sequential_width_matches_parallel() {
        let allow: HashSet<&'static str> = ["a", "c"].into_iter().collect();
        let input = ids(&["a", "b", "c", "d", "e"]);

        let sequential =
            validate_identifiers(Arc::new(AllowList(allow.clone())), input.clone(), 1).await;
        let parallel = validate_identifiers(Arc::new(AllowList(allow)), input, 100).await;
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.len(), 3);
    }

    #[tokio::test]
    async fn test_zero_width_is_treated_as_one() {
        let bad = validate_identifiers(Arc::new(AllowList(HashSet::new())), ids(&["x"]), 0).await;
        assert!(bad.contains("x"));
    }

    #[tokio::test]
    async fn test_oversized_width_is_clamped() {
        let allow: HashSet<&'static str> = ["a"].into_iter().collect();
        let bad =
            validate_identifiers(Arc::new(AllowList(allow)), ids(&["a", "b"]), usize::MAX).await;
        let expected: ValidationOutcomeSet = ids(&["b"]).into_iter().collect();
        assert_eq!(bad, expected);
    }

    #[tokio::test]
    async fn test_panicked_probe_counts_as_failure() {
        let bad = validate_identifiers(Arc::new(Panicky), ids(&["fine", "boom"]), 2).await;
        assert_eq!(bad.len(), 1);
        assert!(bad.contains("boom"));
    }

    #[tokio::test]
    async fn test_no_identifiers() {
        let bad = validate_identifiers(Arc::new(Panicky), Vec::new(), 10).await;
        assert!(bad.is_empty());
    }
}
