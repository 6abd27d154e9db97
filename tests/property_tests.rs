//! Property-based tests for invocation layering
//!
//! These tests use proptest to check the layering rules across randomly
//! generated documents, flags and suite policies.

use std::sync::Arc;

use proptest::prelude::*;
use tdvt::config::PersistedInvocation;
use tdvt::{InvocationArgs, RunTimeTestConfig, TestInvocationConfig};

fn persisted_strategy() -> impl Strategy<Value = PersistedInvocation> {
    (
        (any::<bool>(), any::<bool>(), "[a-z/_]{0,16}", any::<bool>(), "[a-z./_]{0,16}"),
        ("[a-z_]{0,12}", "[-A-Za-z=0-9]{0,16}", any::<bool>(), "[a-z_.]{0,20}", any::<bool>(), 1usize..64),
    )
        .prop_map(
            |(
                (tested_sql, tested_tuples, output_dir, logical, config_file),
                (suite_name, d_override, verbose, tds, noheader, thread_count),
            )| PersistedInvocation {
                tested_sql,
                tested_tuples,
                output_dir,
                logical,
                config_file,
                suite_name,
                d_override,
                verbose,
                tds,
                noheader,
                thread_count,
            },
        )
}

fn flag() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(None), Just(Some(false)), Just(Some(true))]
}

proptest! {
    /// Property: import then export reproduces every persisted value
    #[test]
    fn import_export_preserves_document(persisted in persisted_strategy()) {
        let doc = persisted.to_value().unwrap();
        let config = TestInvocationConfig::from_json_value(&doc).unwrap();
        prop_assert_eq!(config.to_json_value().unwrap(), doc);
        prop_assert_eq!(config.to_persisted(), persisted);
    }

    /// Property: import never touches the non-persisted fields
    #[test]
    fn import_keeps_non_persisted_fields(
        persisted in persisted_strategy(),
        thread_id in -1i64..32,
        leave_temp_dir in any::<bool>(),
        command_line in "[a-z ]{0,24}",
    ) {
        let mut config = TestInvocationConfig::new().with_command_line(command_line.clone());
        config.thread_id = thread_id;
        config.leave_temp_dir = leave_temp_dir;
        config.init_from_json(&persisted.to_value().unwrap()).unwrap();

        prop_assert_eq!(config.thread_id, thread_id);
        prop_assert_eq!(config.leave_temp_dir, leave_temp_dir);
        prop_assert_eq!(config.command_line, command_line);
        prop_assert!(!config.run_as_perf);
        prop_assert!(config.tested_run_time_config.is_none());
        prop_assert_eq!(config.timeout_seconds, 3600);
    }

    /// Property: flags only move their own field, and only when set
    #[test]
    fn args_touch_only_their_fields(
        compare_sql in flag(),
        nocompare_tuples in flag(),
        noclean in flag(),
        verbose in flag(),
    ) {
        let args = InvocationArgs { compare_sql, nocompare_tuples, noclean, verbose };
        let config = TestInvocationConfig::new().with_args(&args);

        prop_assert_eq!(config.tested_sql, compare_sql == Some(true));
        prop_assert_eq!(config.tested_tuples, nocompare_tuples != Some(true));
        prop_assert_eq!(config.leave_temp_dir, noclean == Some(true));
        prop_assert_eq!(config.verbose, verbose == Some(true));

        let mut untouched = config.clone();
        untouched.tested_sql = false;
        untouched.tested_tuples = true;
        untouched.leave_temp_dir = false;
        untouched.verbose = false;
        prop_assert_eq!(untouched, TestInvocationConfig::default());
    }

    /// Property: a freshly applied run time config always finalizes
    #[test]
    fn run_time_config_is_consistent(
        timeout in 1u64..100_000,
        d_override in "[-A-Za-z=0-9]{0,16}",
        perf in any::<bool>(),
    ) {
        let rtt = Arc::new(
            RunTimeTestConfig::new()
                .with_timeout_seconds(timeout)
                .with_d_override(d_override)
                .with_run_as_perf(perf),
        );
        let finalized = TestInvocationConfig::new()
            .with_run_time_test_config(Arc::clone(&rtt))
            .finalize()
            .unwrap();
        prop_assert_eq!(finalized.timeout_seconds, rtt.timeout_seconds);
        prop_assert_eq!(&finalized.d_override, &rtt.d_override);
        prop_assert_eq!(finalized.run_as_perf, rtt.run_as_perf);
    }
}
