//! Engine Module Tests
//!
//! ## Test Scopes
//! - **Registry**: callback registration, lookup, and unknown-name errors.
//! - **Data Types**: job identifiers and status serialization.
//! - **I/O**: record reading from files and directories.
//! - **Local Engine**: full map/combine/shuffle/reduce runs against
//!   filesystem fixtures, including failure paths.

#[cfg(test)]
mod tests {
    use crate::driver::driver::{bigram_transform, count_aggregate};
    use crate::engine::io::{self, PART_FILE, SUCCESS_MARKER};
    use crate::engine::local::LocalEngine;
    use crate::engine::registry::FunctionRegistry;
    use crate::engine::types::{JobId, JobSpec, JobStatus};
    use std::path::Path;
    use std::sync::Arc;

    fn bigram_registry() -> Arc<FunctionRegistry> {
        let registry = FunctionRegistry::new();
        registry.register_transform("bigram_extract", bigram_transform);
        registry.register_aggregate("count_sum", count_aggregate);
        registry
    }

    fn bigram_spec(input: &Path, output: &Path) -> JobSpec {
        JobSpec {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            transform: "bigram_extract".to_string(),
            aggregate: "count_sum".to_string(),
        }
    }

    // ============================================================
    // TEST 1: FunctionRegistry - Registration and Lookup
    // ============================================================

    #[test]
    fn test_registry_register_and_lookup() {
        // ARRANGE
        let registry = bigram_registry();

        // ASSERT: both callbacks are registered
        assert!(registry.has_transform("bigram_extract"));
        assert!(registry.has_aggregate("count_sum"));
        assert_eq!(registry.callback_count(), 2);

        // ACT: invoke the looked-up callbacks directly
        let transform = registry.transform("bigram_extract").unwrap();
        let pairs: Vec<_> = transform("a b").collect();

        let aggregate = registry.aggregate("count_sum").unwrap();
        let total = aggregate(&"a b".to_string(), &mut vec![1u64, 2, 3].into_iter());

        // ASSERT
        assert_eq!(pairs, vec![("a b".to_string(), 1)]);
        assert_eq!(total, 6);
    }

    #[test]
    fn test_registry_unknown_names_are_errors() {
        let registry = FunctionRegistry::new();

        let result = registry.transform("no_such_transform");
        assert!(result.is_err());
        assert!(result
            .err()
            .unwrap()
            .to_string()
            .contains("Unknown record transform"));

        let result = registry.aggregate("no_such_aggregate");
        assert!(result.is_err());
        assert!(result
            .err()
            .unwrap()
            .to_string()
            .contains("Unknown aggregate function"));
    }

    #[test]
    fn test_registry_lists_transforms() {
        let registry = bigram_registry();

        assert_eq!(
            registry.list_transforms(),
            vec!["bigram_extract".to_string()]
        );
    }

    // ============================================================
    // TEST 2: Job types
    // ============================================================

    #[test]
    fn test_job_id_is_unique() {
        let id1 = JobId::new();
        let id2 = JobId::new();

        assert_ne!(id1.0, id2.0);
    }

    #[test]
    fn test_job_status_serialization() {
        let status = JobStatus::Failed {
            error: "disk full".to_string(),
        };

        // Serialize
        let json = serde_json::to_string(&status).expect("Serialization failed");

        // Deserialize
        let restored: JobStatus = serde_json::from_str(&json).expect("Deserialization failed");

        assert_eq!(restored, status);
        assert!(restored.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(!JobStatus::Submitted.is_terminal());
    }

    // ============================================================
    // TEST 3: Record reader
    // ============================================================

    #[tokio::test]
    async fn test_read_records_from_directory_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "third\n").unwrap();
        std::fs::write(dir.path().join("a.txt"), "first\nsecond\n").unwrap();

        let records = io::read_records(dir.path()).await.unwrap();

        assert_eq!(records, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_read_records_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = io::read_records(&dir.path().join("missing.txt")).await;

        assert!(result.is_err());
    }

    // ============================================================
    // TEST 4: LocalEngine - end to end
    // ============================================================

    #[tokio::test]
    async fn test_engine_counts_repeated_bigrams_across_records() {
        // ARRANGE: two records sharing the "a b" pair
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.txt");
        std::fs::write(&input, "a b a\na b c\n").unwrap();
        let output = dir.path().join("out");

        let engine = LocalEngine::new(bigram_registry(), 4);

        // ACT
        let report = engine
            .run_job(&bigram_spec(&input, &output))
            .await
            .unwrap();

        // ASSERT: "a b" counted once per record, the reversed and distinct
        // pairs once overall
        let part = std::fs::read_to_string(output.join(PART_FILE)).unwrap();
        assert_eq!(part, "a b\t2\nb a\t1\nb c\t1\n");
        assert!(output.join(SUCCESS_MARKER).exists());

        assert_eq!(report.status, JobStatus::Succeeded);
        assert_eq!(report.records_read, 2);
        assert_eq!(report.pairs_emitted, 4);
        assert_eq!(report.distinct_keys, 3);
        assert_eq!(
            engine.job_status(&report.job_id),
            Some(JobStatus::Succeeded)
        );
    }

    #[tokio::test]
    async fn test_engine_empty_input_produces_empty_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.txt");
        std::fs::write(&input, "").unwrap();
        let output = dir.path().join("out");

        let engine = LocalEngine::new(bigram_registry(), 2);
        let report = engine
            .run_job(&bigram_spec(&input, &output))
            .await
            .unwrap();

        assert_eq!(report.records_read, 0);
        assert_eq!(report.pairs_emitted, 0);
        assert_eq!(report.distinct_keys, 0);
        assert_eq!(
            std::fs::read_to_string(output.join(PART_FILE)).unwrap(),
            ""
        );
        assert!(output.join(SUCCESS_MARKER).exists());
    }

    #[tokio::test]
    async fn test_engine_single_worker_matches_many_workers() {
        // Combine granularity must not change the totals
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.txt");
        std::fs::write(&input, "x y\nx y\nx y\ny x\n").unwrap();

        let single_out = dir.path().join("single");
        let many_out = dir.path().join("many");

        let single = LocalEngine::new(bigram_registry(), 1);
        single
            .run_job(&bigram_spec(&input, &single_out))
            .await
            .unwrap();

        let many = LocalEngine::new(bigram_registry(), 8);
        many.run_job(&bigram_spec(&input, &many_out)).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(single_out.join(PART_FILE)).unwrap(),
            std::fs::read_to_string(many_out.join(PART_FILE)).unwrap()
        );
    }

    // ============================================================
    // TEST 5: LocalEngine - failure paths
    // ============================================================

    #[tokio::test]
    async fn test_engine_unknown_callback_fails_before_reading_input() {
        // ARRANGE: input deliberately missing; callback resolution must
        // fail first, so the missing file is never touched
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");

        let mut spec = bigram_spec(&dir.path().join("missing.txt"), &output);
        spec.transform = "no_such_transform".to_string();

        let engine = LocalEngine::new(bigram_registry(), 2);

        // ACT
        let result = engine.run_job(&spec).await;

        // ASSERT
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown record transform"));
        assert!(!output.exists());

        let (_, _, succeeded, failed) = engine.job_status_counts();
        assert_eq!(succeeded, 0);
        assert_eq!(failed, 1);
    }

    #[tokio::test]
    async fn test_engine_missing_input_fails_the_job() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");

        let engine = LocalEngine::new(bigram_registry(), 2);
        let result = engine
            .run_job(&bigram_spec(&dir.path().join("missing.txt"), &output))
            .await;

        assert!(result.is_err());
        assert!(!output.exists());
    }
}
