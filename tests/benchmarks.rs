use cachebench::compare::compare_on;
use cachebench::driver::{MatmulConfig, Report, run_benchmark, run_benchmark_with, validate_strategies};
use cachebench::false_sharing::{self, FalseSharingConfig, parallel_sum, random_array, run_false_sharing};
use cachebench::numeric::{self, NumericConfig, Operation, product, quotient, run_numeric, sum};
use cachebench::{BenchError, Matrix, Strategy, rng_from_seed};

// ============================================================
// Matrix benchmark driver
// ============================================================

fn small_config() -> MatmulConfig {
    MatmulConfig {
        sizes: vec![1, 5, 33, 40],
        validation_side: 35,
        seed: Some(17),
        ..MatmulConfig::default()
    }
}

#[test]
fn test_report_has_every_strategy_size_pair_once() {
    let config = small_config();
    let mut rng = rng_from_seed(config.seed);
    let report = run_benchmark(&config, &mut rng).unwrap();

    assert_eq!(report.strategies(), &Strategy::ALL);
    let sizes: Vec<usize> = report.rows().iter().map(|(n, _)| *n).collect();
    assert_eq!(sizes, config.sizes);

    for (_, timings) in report.rows() {
        assert_eq!(timings.len(), Strategy::ALL.len());
    }
    for &n in &config.sizes {
        for strategy in Strategy::ALL {
            assert!(report.micros(strategy, n).is_some(), "{} at {}", strategy, n);
        }
    }
    assert_eq!(report.micros(Strategy::Vanilla, 2), None);
}

#[test]
fn test_report_respects_strategy_subset() {
    let config = MatmulConfig {
        strategies: vec![Strategy::CacheOblivious, Strategy::Transposition],
        ..small_config()
    };
    let mut rng = rng_from_seed(config.seed);
    let report = run_benchmark(&config, &mut rng).unwrap();

    assert_eq!(
        report.strategies(),
        &[Strategy::CacheOblivious, Strategy::Transposition]
    );
    assert_eq!(report.micros(Strategy::Vanilla, 5), None);
}

#[test]
fn test_report_csv_format() {
    let config = MatmulConfig {
        sizes: vec![2, 3],
        ..small_config()
    };
    let mut rng = rng_from_seed(config.seed);
    let report = run_benchmark(&config, &mut rng).unwrap();

    let mut out = Vec::new();
    report.write_csv(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "N,1_vanilla,2_vanilla_transposition,3_cache_optimized_transposition,4_cache_oblivious,"
    );
    for (line, size) in lines[1..].iter().zip(["2", "3"]) {
        let cells: Vec<&str> = line.split(',').collect();
        assert_eq!(cells.len(), 6, "{}", line);
        assert_eq!(cells[0], size);
        assert_eq!(cells[5], "");
        for cell in &cells[1..5] {
            cell.parse::<u128>().unwrap();
        }
    }
}

#[test]
fn test_empty_report_csv_has_header_only() {
    let report = Report::new(vec![Strategy::Vanilla]);
    let mut out = Vec::new();
    report.write_csv(&mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "N,1_vanilla,\n");
}

#[test]
fn test_config_rejects_bad_sizes() {
    let empty = MatmulConfig {
        sizes: vec![],
        ..MatmulConfig::default()
    };
    let descending = MatmulConfig {
        sizes: vec![64, 32],
        ..MatmulConfig::default()
    };
    let duplicate = MatmulConfig {
        sizes: vec![32, 32],
        ..MatmulConfig::default()
    };

    for config in [empty, descending, duplicate] {
        let mut rng = rng_from_seed(Some(0));
        assert!(matches!(
            run_benchmark(&config, &mut rng),
            Err(BenchError::InvalidConfig(_))
        ));
    }
}

#[test]
fn test_config_rejects_repeated_strategy() {
    let config = MatmulConfig {
        strategies: vec![Strategy::Vanilla, Strategy::CacheOblivious, Strategy::Vanilla],
        ..small_config()
    };
    let mut rng = rng_from_seed(config.seed);

    match run_benchmark(&config, &mut rng) {
        Err(BenchError::InvalidConfig(msg)) => assert!(msg.contains("1_vanilla"), "{}", msg),
        other => panic!("expected InvalidConfig, got {:?}", other),
    }
}

#[test]
fn test_mismatch_aborts_benchmark_without_report() {
    // Summing row 0 in order gives 1; the oblivious split at 17 loses it.
    let n = 34;
    let mut a = vec![0.0; n * n];
    a[0] = 1e8;
    a[17] = -1e8;
    a[18] = 1.0;
    let a = Matrix::from_vec(a, n).unwrap();
    let b = Matrix::from_vec(vec![1.0; n * n], n).unwrap();

    let config = small_config();
    let mut rng = rng_from_seed(config.seed);
    let mut validated = Vec::new();
    let result = run_benchmark_with(&config, &mut rng, |config, _rng| {
        for &strategy in &config.strategies {
            validated.push(strategy);
            compare_on(Strategy::Vanilla, strategy, &a, &b)?;
        }
        Ok(())
    });

    match result {
        Err(BenchError::Mismatch { right, row, col, expected, actual, .. }) => {
            assert_eq!(right, "4_cache_oblivious");
            assert_eq!((row, col), (0, 0));
            assert_eq!((expected, actual), (1.0, 0.0));
        }
        other => panic!("expected a mismatch, got {:?}", other),
    }
    assert_eq!(validated, Strategy::ALL);
}

#[test]
fn test_validation_passes_for_default_strategies() {
    let config = MatmulConfig::default();
    let mut rng = rng_from_seed(Some(99));
    validate_strategies(&config, &mut rng).unwrap();
}

#[test]
fn test_strategy_names_parse() {
    assert_eq!("4_cache_oblivious".parse::<Strategy>().unwrap(), Strategy::CacheOblivious);
    assert_eq!("cache-oblivious".parse::<Strategy>().unwrap(), Strategy::CacheOblivious);
    assert_eq!("vanilla".parse::<Strategy>().unwrap(), Strategy::Vanilla);
    assert_eq!(
        "Cache_Optimized_Transposition".parse::<Strategy>().unwrap(),
        Strategy::CacheAwareTransposition
    );
    assert_eq!(
        "strassen".parse::<Strategy>().unwrap_err(),
        BenchError::UnknownStrategy("strassen".to_string())
    );

    for strategy in Strategy::ALL {
        assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
    }
}

// ============================================================
// False sharing
// ============================================================

#[test]
fn test_parallel_sum_matches_sequential() {
    // Small integers keep every partial sum exact in f32.
    let values: Vec<f32> = (0..10_000).map(|i| (i % 7) as f32 - 3.0).collect();
    let expected: f32 = values.iter().sum();

    for threads in [1, 2, 3, 16] {
        for offset in [1, 2, 16, 128] {
            assert_eq!(
                parallel_sum(&values, threads, offset),
                expected,
                "threads {}, offset {}",
                threads,
                offset
            );
        }
    }
}

#[test]
fn test_parallel_sum_more_threads_than_values() {
    let values = [1.0, 2.0, 3.0];
    assert_eq!(parallel_sum(&values, 8, 4), 6.0);
    assert_eq!(parallel_sum(&[], 4, 1), 0.0);
}

#[test]
fn test_random_array_range() {
    let mut rng = rng_from_seed(Some(4));
    let values = random_array(1000, &mut rng);

    assert_eq!(values.len(), 1000);
    assert!(values.iter().all(|&x| (-1.0..1.0).contains(&x)));
}

#[test]
fn test_false_sharing_run_covers_every_offset() {
    let config = FalseSharingConfig {
        length: 1000,
        threads: 4,
        offsets: vec![1, 8, 64],
        seed: Some(2),
    };
    let mut rng = rng_from_seed(config.seed);
    let timings = run_false_sharing(&config, &mut rng).unwrap();

    let offsets: Vec<usize> = timings.iter().map(|(offset, _)| *offset).collect();
    assert_eq!(offsets, vec![1, 8, 64]);

    let mut out = Vec::new();
    false_sharing::write_csv(&timings, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Offset,Duration,\n1,"));
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn test_false_sharing_config_rejects_zero() {
    let mut rng = rng_from_seed(Some(0));
    let no_threads = FalseSharingConfig {
        threads: 0,
        ..FalseSharingConfig::default()
    };
    let zero_offset = FalseSharingConfig {
        offsets: vec![4, 0],
        ..FalseSharingConfig::default()
    };

    assert!(run_false_sharing(&no_threads, &mut rng).is_err());
    assert!(run_false_sharing(&zero_offset, &mut rng).is_err());
}

#[test]
fn test_false_sharing_config_rejects_unordered_offsets() {
    for offsets in [vec![8, 4], vec![1, 16, 16]] {
        let config = FalseSharingConfig {
            length: 100,
            threads: 2,
            offsets,
            seed: Some(0),
        };
        let mut rng = rng_from_seed(config.seed);

        assert!(matches!(
            run_false_sharing(&config, &mut rng),
            Err(BenchError::InvalidConfig(_))
        ));
    }
}

// ============================================================
// Numeric representations
// ============================================================

#[test]
fn test_numeric_kernels() {
    let floats = [2.0f64, 4.0, 5.0, 7.0];
    assert_eq!(sum(&floats), 18.0);
    assert_eq!(product(&floats), 40.0);
    assert_eq!(quotient(&floats), 1.0 / 40.0);

    let ints = [2i32, -3, 4];
    assert_eq!(sum(&ints), 3);
    assert_eq!(product(&ints), -6);
    assert_eq!(quotient(&[-1i32, 5]), -1);

    assert_eq!(product::<f32>(&[]), 1.0);
    assert_eq!(quotient::<i64>(&[9]), 1);
}

#[test]
fn test_integer_overflow_wraps() {
    let values = [i16::MAX, 1];
    assert_eq!(sum(&values), i16::MIN);

    let big = [300i16, 300, 0];
    assert_eq!(product(&big), 300i16.wrapping_mul(300));
}

#[test]
fn test_numeric_values_are_nonzero_and_bounded() {
    let mut rng = rng_from_seed(Some(8));
    let ints: Vec<i32> = numeric::random_values(5000, &mut rng);
    let floats: Vec<f32> = numeric::random_values(5000, &mut rng);

    assert!(ints.iter().all(|&x| x != 0 && (-10..=10).contains(&x)));
    assert!(floats.iter().all(|&x| x != 0.0 && (-10.0..10.0).contains(&x)));
}

#[test]
fn test_integer_values_reach_both_bounds() {
    let mut rng = rng_from_seed(Some(13));
    let values: Vec<i16> = numeric::random_values(5000, &mut rng);

    assert!(values.contains(&10));
    assert!(values.contains(&-10));
}

#[test]
fn test_numeric_run_reports_every_type_and_operation() {
    let config = NumericConfig {
        length: 1000,
        repeats: 3,
        seed: Some(5),
    };
    let mut rng = rng_from_seed(config.seed);
    let timings = run_numeric(&config, &mut rng).unwrap();

    assert_eq!(timings.len(), 15);
    for operation in Operation::ALL {
        let types: Vec<&str> = timings
            .iter()
            .filter(|t| t.operation == operation)
            .map(|t| t.type_name)
            .collect();
        assert_eq!(types, vec!["f32", "f64", "i16", "i32", "i64"], "{}", operation);
    }

    let mut out = Vec::new();
    numeric::write_csv(&timings, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Type,Operation,Duration,Result,\nf32,Add,"));
    assert!(text.lines().skip(1).all(|line| line.ends_with(',')));
}

#[test]
fn test_numeric_config_rejects_zero_length() {
    let config = NumericConfig {
        length: 0,
        ..NumericConfig::default()
    };
    let mut rng = rng_from_seed(Some(0));
    assert!(run_numeric(&config, &mut rng).is_err());
}
