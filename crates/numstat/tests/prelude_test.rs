//! Tests for the public prelude.
//!
//! Verifies that everything a caller needs is reachable through
//! `numstat::prelude::*` alone.

use numstat::prelude::*;

fn copy_f64(
    arrays: &mut [&mut dyn StridedBuffer],
    shape: &[usize],
    strides: &[isize],
    _offsets: Option<&[usize]>,
    _data: Option<&()>,
) {
    let n = shape[0];
    let input = arrays[0].downcast_slice::<f64>().unwrap().to_vec();
    let (si, so) = (implied_offset(n, strides[0]), implied_offset(n, strides[1]));
    let out = arrays[1].downcast_slice_mut::<f64>().unwrap();
    for i in 0..n {
        let src = (si as isize + i as isize * strides[0]) as usize;
        let dst = (so as isize + i as isize * strides[1]) as usize;
        out[dst] = input[src];
    }
}

fn noop(_arrays: &mut [NdArray<'_>], _data: Option<&()>) {}

/// Test the prelude surface.
///
/// Verifies each component can be built and used through the prelude.
#[test]
fn test_prelude_surface() -> Result<(), NumError> {
    // Dispatch
    let builder: StridedDispatcherBuilder = StridedDispatcher::builder(1, 1);
    let copy: StridedDispatcher = builder
        .offsets(false)
        .register(&[DataType::Float64, DataType::Float64], copy_f64 as StridedFn<()>)
        .build()?;
    let mut x = vec![1.0_f64, 2.0, 3.0];
    let mut y = vec![0.0_f64; 3];
    let out: Dispatched<'_> =
        copy.call(3, vec![StridedArg::new(&mut x, 1), StridedArg::new(&mut y, -1)])?;
    assert!(!out.is_unit());
    drop(out);
    assert_eq!(y, vec![3.0, 2.0, 1.0]);

    let nd: NdDispatcher = NdDispatcher::new(vec![noop as NdFn<()>], &["uint8"], None, 1, 1, 0)?;
    let mut bytes = vec![0_u8; 4];
    let res: NdDispatched<'_> =
        nd.call(vec![NdArray::contiguous(&mut bytes, vec![4], Order::default())])?;
    assert!(res.into_array().is_none());

    assert_eq!("complex64".parse::<DataType>()?, DataType::Complex64);
    assert_eq!(Uint8c::from_f64(300.0), Uint8c(255));
    assert_eq!(Uint8c::from_f64(2.5), Uint8c(2));

    // Moving statistics
    let mut cov = MovingCovariance::<f64>::new(2)?;
    let mut cor = MovingCorrelation::<f64>::new(2)?;
    cov.push(1.0, 2.0);
    cor.push(1.0, 2.0);
    assert_eq!(cov.push(2.0, 4.0), 1.0);
    assert!((cor.push(2.0, 4.0) - 1.0).abs() < 1e-12);

    // LOWESS
    let model: BatchLowess<f64> = Lowess::new().fraction(1.0).adapter(Batch).build()?;
    let result: LowessResult<f64> = model.fit(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0])?;
    assert_eq!(result.len(), 3);

    let err = model.fit(&[0.0], &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRange);
    Ok(())
}
