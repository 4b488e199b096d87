//! Tests for the Batch adapter.
//!
//! The Batch adapter runs LOWESS over a complete dataset:
//! - Sorting by x (stable) unless the input is declared sorted
//! - Local linear fits with tricube weights
//! - Bisquare robustness iterations
//! - Delta skipping with linear interpolation
//!
//! ## Test Organization
//!
//! 1. **Reference Values** - Agreement with published LOWESS fits
//! 2. **Basic Functionality** - Exactness, ordering and optional outputs
//! 3. **Robustness** - Outlier downweighting
//! 4. **Edge Cases** - Tiny inputs, ties and invalid data
//! 5. **Builder Validation** - Parameter and duplicate checks

use approx::assert_relative_eq;
use numstat::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Deserialize)]
struct Fixture {
    x: Vec<f64>,
    y: Vec<f64>,
    cases: Vec<Case>,
}

#[derive(Deserialize)]
struct Case {
    name: String,
    fraction: f64,
    iterations: usize,
    delta: f64,
    expected: Vec<f64>,
}

fn cars() -> Fixture {
    serde_json::from_str(include_str!("fixtures/cars.json")).expect("fixture should parse")
}

// ============================================================================
// Reference Value Tests
// ============================================================================

/// Test against published fits of the `cars` dataset.
///
/// Verifies default parameters, a narrow span, delta skipping and robustness
/// iterations against reference values to six decimals.
#[test]
fn test_cars_reference_fits() {
    let data = cars();

    for case in &data.cases {
        let result = Lowess::new()
            .fraction(case.fraction)
            .iterations(case.iterations)
            .delta(case.delta)
            .adapter(Batch)
            .build()
            .unwrap()
            .fit(&data.x, &data.y)
            .unwrap();

        assert_eq!(result.x, data.x, "{}: x should be unchanged", case.name);
        assert_eq!(result.iterations_used, case.iterations);
        for (i, (&got, &want)) in result.y.iter().zip(&case.expected).enumerate() {
            assert!(
                (got - want).abs() < 1e-5,
                "{}: point {} got {} expected {}",
                case.name,
                i,
                got,
                want
            );
        }
    }
}

/// Test the default merge distance.
///
/// Verifies that leaving delta unset uses one percent of the x-range, which
/// reproduces the default reference fit.
#[test]
fn test_default_delta_matches_reference() {
    let data = cars();
    let reference = &data.cases[0];

    let result = Lowess::new()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data.x, &data.y)
        .unwrap();

    assert_relative_eq!(result.delta_used, 0.21, epsilon = 1e-12);
    assert_relative_eq!(result.fraction_used, 2.0 / 3.0);
    for (&got, &want) in result.y.iter().zip(&reference.expected) {
        assert_relative_eq!(got, want, epsilon = 1e-5);
    }
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

/// Test exact reproduction of linear data.
///
/// Verifies that a local linear fit returns a straight line unchanged.
#[test]
fn test_linear_data_is_reproduced() {
    let x: Vec<f64> = (0..30).map(|i| i as f64 * 0.5).collect();
    let y: Vec<f64> = x.iter().map(|v| 3.0 * v - 2.0).collect();

    let result = Lowess::new()
        .fraction(0.3)
        .iterations(0)
        .delta(0.0)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();
    for (&got, &want) in result.y.iter().zip(&y) {
        assert_relative_eq!(got, want, epsilon = 1e-9);
    }
}

/// Test robust fitting of a noisy line.
///
/// Verifies that robustness iterations keep the fit on the trend when the
/// noise is small and symmetric.
#[test]
fn test_noisy_line_with_iterations() {
    let x: Vec<f64> = (0..30).map(|i| i as f64 * 0.5).collect();
    let line: Vec<f64> = x.iter().map(|v| 3.0 * v - 2.0).collect();
    let y: Vec<f64> = line
        .iter()
        .enumerate()
        .map(|(i, &v)| if i % 2 == 0 { v - 0.1 } else { v + 0.1 })
        .collect();

    let result = Lowess::new()
        .fraction(0.3)
        .iterations(3)
        .return_robustness_weights()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();
    for (&got, &want) in result.y.iter().zip(&line) {
        assert!((got - want).abs() < 0.1);
    }
    for &w in result.robustness_weights.as_ref().unwrap() {
        assert!(w > 0.5, "No point should look like an outlier");
    }
}

/// Test unsorted input.
///
/// Verifies that shuffled input gives the same fit as sorted input, returned
/// in ascending x order.
#[test]
fn test_shuffled_input_is_sorted() {
    // Distinct x-values so the shuffle cannot reorder ties
    let x: Vec<f64> = (0..40).map(|i| (i as f64 * 0.37).sin() * 10.0 + i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| v.cos() * 5.0 + 0.1 * v).collect();
    let mut order: Vec<usize> = (0..x.len()).collect();
    order.shuffle(&mut StdRng::seed_from_u64(42));
    let xs: Vec<f64> = order.iter().map(|&i| x[i]).collect();
    let ys: Vec<f64> = order.iter().map(|&i| y[i]).collect();

    let model = Lowess::new().fraction(0.4).adapter(Batch).build().unwrap();
    let from_sorted = model.fit(&x, &y).unwrap();
    let from_shuffled = model.fit(&xs, &ys).unwrap();

    assert!(from_shuffled.x.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(from_shuffled.x, from_sorted.x);
    for (&a, &b) in from_shuffled.y.iter().zip(&from_sorted.y) {
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }
    assert_eq!(from_shuffled.len(), x.len());
}

/// Test the sorted flag.
///
/// Verifies that declaring sorted input skips sorting without changing the
/// result for data that is in fact sorted.
#[test]
fn test_sorted_flag_is_idempotent() {
    let data = cars();
    let fit = |sorted: bool| {
        Lowess::new()
            .fraction(0.5)
            .sorted(sorted)
            .adapter(Batch)
            .build()
            .unwrap()
            .fit(&data.x, &data.y)
            .unwrap()
    };
    assert_eq!(fit(true), fit(false));
}

/// Test optional outputs.
///
/// Verifies residuals equal `y - fit` and robustness weights lie in [0, 1].
#[test]
fn test_residuals_and_weights() {
    let data = cars();
    let result = Lowess::new()
        .return_residuals()
        .return_robustness_weights()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data.x, &data.y)
        .unwrap();

    let residuals = result.residuals.as_ref().expect("residuals requested");
    for ((&r, &y), &f) in residuals.iter().zip(&data.y).zip(&result.y) {
        assert_relative_eq!(r, y - f, epsilon = 1e-12);
    }

    let weights = result
        .robustness_weights
        .as_ref()
        .expect("weights requested");
    assert_eq!(weights.len(), data.x.len());
    assert!(weights.iter().all(|&w| (0.0..=1.0).contains(&w)));

    let plain = Lowess::new()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data.x, &data.y)
        .unwrap();
    assert!(plain.residuals.is_none());
    assert!(plain.robustness_weights.is_none());
}

/// Test fitting in f32.
///
/// Verifies single precision tracks the f64 fit closely.
#[test]
fn test_f32_fit() {
    let data = cars();
    let x: Vec<f32> = data.x.iter().map(|&v| v as f32).collect();
    let y: Vec<f32> = data.y.iter().map(|&v| v as f32).collect();

    let result = Lowess::new()
        .fraction(0.25_f32)
        .iterations(0)
        .delta(0.0)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();

    for (&got, &want) in result.y.iter().zip(&data.cases[1].expected) {
        assert_relative_eq!(got as f64, want, epsilon = 1e-3, max_relative = 1e-4);
    }
}

/// Test the Display output.
///
/// Verifies the summary header and column set.
#[test]
fn test_result_display() {
    let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let y = vec![2.0, 4.1, 5.9, 8.2, 9.8];
    let result = Lowess::new()
        .fraction(0.8)
        .return_residuals()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();

    let text = format!("{}", result);
    assert!(text.starts_with("Summary:"));
    assert!(text.contains("Data points: 5"));
    assert!(text.contains("Y_smooth"));
    assert!(text.contains("Residual"));
    assert!(!text.contains("Rob_Weight"));
}

// ============================================================================
// Robustness Tests
// ============================================================================

/// Test outlier downweighting.
///
/// Verifies that robustness iterations pull the fit at a gross outlier back
/// toward the trend and give the outlier a small weight.
#[test]
fn test_outlier_downweighted() {
    let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
    let mut y: Vec<f64> = x.iter().map(|v| 0.5 * v + 1.0 + 0.3 * (1.7 * v).sin()).collect();
    y[10] = 60.0;

    let fit = |iterations: usize| {
        Lowess::new()
            .fraction(0.5)
            .iterations(iterations)
            .return_robustness_weights()
            .adapter(Batch)
            .build()
            .unwrap()
            .fit(&x, &y)
            .unwrap()
    };
    let plain = fit(0);
    let robust = fit(3);

    let trend = 0.5 * 10.0 + 1.0;
    assert!((robust.y[10] - trend).abs() < (plain.y[10] - trend).abs());
    assert!((robust.y[10] - trend).abs() < 0.2);
    let weights = robust.robustness_weights.unwrap();
    assert!(weights[10] < 1e-6);
}

// ============================================================================
// Edge Case Tests
// ============================================================================

/// Test inputs with fewer than two points.
///
/// Verifies y is returned unchanged.
#[test]
fn test_tiny_inputs() {
    let model = Lowess::new()
        .return_residuals()
        .adapter(Batch)
        .build()
        .unwrap();

    let empty = model.fit(&[] as &[f64], &[]).unwrap();
    assert!(empty.is_empty());

    let single = model.fit(&[3.0], &[7.5]).unwrap();
    assert_eq!(single.y, vec![7.5]);
    assert_eq!(single.x, vec![3.0]);
    assert_eq!(single.residuals, Some(vec![0.0]));
}

/// Test all-equal x-values.
///
/// Verifies that a neighborhood of zero width falls back to the weighted
/// mean of the tied points.
#[test]
fn test_constant_x() {
    let x = vec![2.0; 5];
    let y = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let result = Lowess::new()
        .iterations(0)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap();
    for &v in &result.y {
        assert_relative_eq!(v, 3.0, epsilon = 1e-12);
    }
}

/// Test two points.
///
/// Verifies the minimal neighborhood reproduces both points.
#[test]
fn test_two_points() {
    let result = Lowess::new()
        .fraction(0.1)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&[0.0, 1.0], &[1.0, 3.0])
        .unwrap();
    assert_relative_eq!(result.y[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(result.y[1], 3.0, epsilon = 1e-12);
}

/// Test invalid data.
///
/// Verifies length mismatches and non-finite values are rejected.
#[test]
fn test_invalid_data() {
    let model = Lowess::new().adapter(Batch).build().unwrap();

    let res = model.fit(&[1.0, 2.0], &[1.0]);
    assert!(matches!(
        res,
        Err(NumError::MismatchedInputs { x_len: 2, y_len: 1 })
    ));

    let res = model.fit(&[1.0, f64::NAN], &[1.0, 2.0]);
    assert!(matches!(res, Err(NumError::InvalidNumericValue(_))));

    let res = model.fit(&[1.0, 2.0], &[1.0, f64::INFINITY]);
    assert!(matches!(res, Err(NumError::InvalidNumericValue(_))));
}

// ============================================================================
// Builder Validation Tests
// ============================================================================

/// Test parameter validation.
///
/// Verifies invalid fractions and deltas are rejected at build time and
/// fractions above one are accepted.
#[test]
fn test_parameter_validation() {
    for bad in [0.0, -0.5, f64::NAN, f64::INFINITY] {
        let res = Lowess::new().fraction(bad).adapter(Batch).build();
        assert!(matches!(res, Err(NumError::InvalidFraction(_))));
    }

    let res = Lowess::new().delta(-1.0).adapter(Batch).build();
    assert!(matches!(res, Err(NumError::InvalidDelta(_))));

    let data = cars();
    let wide = Lowess::new()
        .fraction(1.5)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data.x, &data.y)
        .unwrap();
    let full = Lowess::new()
        .fraction(1.0)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&data.x, &data.y)
        .unwrap();
    assert_eq!(wide.y, full.y);
}

/// Test duplicate parameters.
///
/// Verifies that setting a parameter twice is reported by name.
#[test]
fn test_duplicate_parameter() {
    let res = Lowess::<f64>::new()
        .fraction(0.5)
        .iterations(2)
        .fraction(0.3)
        .adapter(Batch)
        .build();
    assert!(matches!(
        res,
        Err(NumError::DuplicateParameter {
            parameter: "fraction"
        })
    ));

    let res = Lowess::<f64>::new()
        .sorted(true)
        .sorted(false)
        .adapter(Batch)
        .build();
    assert!(matches!(
        res,
        Err(NumError::DuplicateParameter {
            parameter: "sorted"
        })
    ));
}
