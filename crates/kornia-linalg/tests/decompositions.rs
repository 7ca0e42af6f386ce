use approx::{assert_abs_diff_eq, assert_relative_eq};
use kornia_linalg::{
    eig, polar_decompose, randn_with, solve, svd, sym_eig, LinalgError, Mat2, Mat3, SmallMatrix,
    SmallVector,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_small(rng: &mut StdRng, n: usize) -> SmallMatrix<f64> {
    let data: Vec<f64> = (0..n * n).map(|_| randn_with(&mut *rng)).collect();
    SmallMatrix::from_row_slice(n, n, &data).expect("2 or 3")
}

fn random_symmetric(rng: &mut StdRng, n: usize) -> SmallMatrix<f64> {
    let a = random_small(rng, n);
    match (a, a.transpose()) {
        (SmallMatrix::Mat2(a), SmallMatrix::Mat2(t)) => SmallMatrix::Mat2(a + t),
        (SmallMatrix::Mat3(a), SmallMatrix::Mat3(t)) => SmallMatrix::Mat3(a + t),
        _ => unreachable!(),
    }
}

#[test]
fn svd_reconstructs_random_matrices() -> Result<(), LinalgError> {
    init_logger();
    let mut rng = StdRng::seed_from_u64(42);

    for n in [2, 3] {
        for _ in 0..50 {
            let a = random_small(&mut rng, n);
            let svd = svd(&a)?;
            match (a, svd.u, svd.sigma, svd.v) {
                (
                    SmallMatrix::Mat2(a),
                    SmallMatrix::Mat2(u),
                    SmallMatrix::Mat2(s),
                    SmallMatrix::Mat2(v),
                ) => {
                    assert_relative_eq!(u * s * v.transpose(), a, epsilon = 1e-10);
                    assert_relative_eq!(u.transpose() * u, Mat2::identity(), epsilon = 1e-10);
                    assert_relative_eq!(v.transpose() * v, Mat2::identity(), epsilon = 1e-10);
                    assert!(s[(0, 0)] >= s[(1, 1)]);
                    assert!(s[(1, 1)] >= -1e-12);
                }
                (
                    SmallMatrix::Mat3(a),
                    SmallMatrix::Mat3(u),
                    SmallMatrix::Mat3(s),
                    SmallMatrix::Mat3(v),
                ) => {
                    assert_relative_eq!(u * s * v.transpose(), a, epsilon = 1e-7);
                    assert_relative_eq!(u.transpose() * u, Mat3::identity(), epsilon = 1e-7);
                    assert_relative_eq!(v.transpose() * v, Mat3::identity(), epsilon = 1e-7);
                    for i in 0..3 {
                        assert!(s[(i, i)] >= 0.0);
                        for j in 0..3 {
                            if i != j {
                                assert_eq!(s[(i, j)], 0.0);
                            }
                        }
                    }
                }
                _ => panic!("svd changed the matrix size"),
            }
        }
    }
    Ok(())
}

#[test]
fn polar_factors_random_matrices() -> Result<(), LinalgError> {
    init_logger();
    let mut rng = StdRng::seed_from_u64(3);

    for n in [2, 3] {
        for _ in 0..50 {
            let a = random_small(&mut rng, n);
            let polar = polar_decompose(&a)?;
            match (a, polar.u, polar.p) {
                (SmallMatrix::Mat2(a), SmallMatrix::Mat2(u), SmallMatrix::Mat2(p)) => {
                    assert_relative_eq!(u * p, a, epsilon = 1e-10);
                    assert_relative_eq!(u.transpose() * u, Mat2::identity(), epsilon = 1e-10);
                    assert_relative_eq!(p, p.transpose(), epsilon = 1e-10);
                }
                (SmallMatrix::Mat3(a), SmallMatrix::Mat3(u), SmallMatrix::Mat3(p)) => {
                    assert_relative_eq!(u * p, a, epsilon = 1e-7);
                    assert_relative_eq!(u.transpose() * u, Mat3::identity(), epsilon = 1e-7);
                    assert_relative_eq!(p, p.transpose(), epsilon = 1e-7);
                }
                _ => panic!("polar decomposition changed the matrix size"),
            }
        }
    }
    Ok(())
}

#[test]
fn polar_of_zero_is_identity() -> Result<(), LinalgError> {
    let zero = SmallMatrix::from_row_slice(2, 2, &[0.0f64; 4])?;
    let polar = polar_decompose(&zero)?;
    assert_eq!(polar.u, SmallMatrix::Mat2(Mat2::identity()));
    assert_eq!(polar.p, zero);
    Ok(())
}

#[test]
fn sym_eig_random_matrices() -> Result<(), LinalgError> {
    init_logger();
    let mut rng = StdRng::seed_from_u64(17);

    for n in [2, 3] {
        for _ in 0..50 {
            let a = random_symmetric(&mut rng, n);
            let eig = sym_eig(&a)?;
            let values = eig.eigenvalues.as_slice();
            for (i, lambda) in values.iter().enumerate() {
                for r in 0..n {
                    let av: f64 = (0..n).map(|k| a.get(r, k) * eig.eigenvectors.get(k, i)).sum();
                    assert_abs_diff_eq!(av, lambda * eig.eigenvectors.get(r, i), epsilon = 1e-8);
                }
                for j in 0..n {
                    let dot: f64 = (0..n)
                        .map(|k| eig.eigenvectors.get(k, i) * eig.eigenvectors.get(k, j))
                        .sum();
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_abs_diff_eq!(dot, expected, epsilon = 1e-8);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn sym_eig_of_zero_is_canonical() -> Result<(), LinalgError> {
    for n in [2, 3] {
        let zero = SmallMatrix::from_row_slice(n, n, &vec![0.0f32; n * n])?;
        let eig = sym_eig(&zero)?;
        assert!(eig.eigenvalues.as_slice().iter().all(|&x| x == 0.0));
        // every column is a distinct canonical basis vector
        let mut seen = vec![false; n];
        for j in 0..n {
            let column: Vec<f32> = (0..n).map(|i| eig.eigenvectors.get(i, j)).collect();
            assert!(column.iter().all(|&x| x == 0.0 || x == 1.0));
            let one = column.iter().position(|&x| x == 1.0).expect("unit column");
            assert!(!seen[one]);
            seen[one] = true;
        }
    }
    Ok(())
}

#[test]
fn single_precision_far_from_unit_scale() -> Result<(), LinalgError> {
    init_logger();
    let data = [2.0f32, 1.0, 0.0, 1.0, 2.0, 0.5, 0.0, 0.5, -1.0];

    for scale in [1e-10f32, 1e-6, 1e6, 1e12] {
        let scaled: Vec<f32> = data.iter().map(|x| x * scale).collect();
        let a = SmallMatrix::from_row_slice(3, 3, &scaled)?;

        let eig = sym_eig(&a)?;
        for i in 0..3 {
            let lambda = eig.eigenvalues.as_slice()[i];
            let mut residual = 0.0f32;
            for r in 0..3 {
                let av: f32 = (0..3).map(|k| a.get(r, k) * eig.eigenvectors.get(k, i)).sum();
                residual = residual.max((av - lambda * eig.eigenvectors.get(r, i)).abs());
            }
            assert!(residual / scale < 1e-4, "scale {scale}: residual {residual}");
        }

        let svd = svd(&a)?;
        match (a, svd.u, svd.sigma, svd.v) {
            (
                SmallMatrix::Mat3(a),
                SmallMatrix::Mat3(u),
                SmallMatrix::Mat3(s),
                SmallMatrix::Mat3(v),
            ) => {
                let error = (u * s * v.transpose() - a).frobenius_norm() / a.frobenius_norm();
                assert!(error < 1e-4, "scale {scale}: relative error {error}");
            }
            _ => panic!("svd changed the matrix size"),
        }
    }

    let two = SmallMatrix::from_rows(&[[1e-30f32, 2e-30], [2e-30, -1e-30]])?;
    let eig = sym_eig(&two)?;
    let expected = 5f32.sqrt() * 1e-30;
    assert_relative_eq!(eig.eigenvalues.as_slice()[0], expected, max_relative = 1e-5);
    assert_relative_eq!(eig.eigenvalues.as_slice()[1], -expected, max_relative = 1e-5);
    Ok(())
}

#[test]
fn solve_random_systems() -> Result<(), LinalgError> {
    let mut rng = StdRng::seed_from_u64(5);

    for n in [2, 3] {
        for _ in 0..50 {
            let a = random_small(&mut rng, n);
            let rhs: Vec<f64> = (0..n).map(|_| randn_with(&mut rng)).collect();
            let b = SmallVector::from_slice(&rhs)?;
            let x = solve(&a, &b)?;
            for r in 0..n {
                let ax: f64 = (0..n).map(|k| a.get(r, k) * x.as_slice()[k]).sum();
                assert_abs_diff_eq!(ax, rhs[r], epsilon = 1e-6);
            }
        }
    }
    Ok(())
}

#[test]
fn contract_violations() {
    init_logger();

    let singular = SmallMatrix::from_rows(&[[1.0, 2.0], [0.0, 0.0]]).expect("2x2");
    let b = SmallVector::from_slice(&[1.0, 1.0]).expect("2");
    let err = solve(&singular, &b).unwrap_err();
    assert_eq!(err, LinalgError::Singular);
    assert!(!err.is_contract_violation());

    let skew = SmallMatrix::from_rows(&[[0.0, 1.0], [-1.0, 0.0]]).expect("2x2");
    let err = sym_eig(&skew).unwrap_err();
    assert!(err.is_contract_violation());

    let four = SmallMatrix::from_row_slice(4, 4, &[0.0f32; 16]).unwrap_err();
    assert_eq!(
        four,
        LinalgError::UnsupportedDimension {
            op: "from_row_slice",
            size: 4
        }
    );
    assert!(matches!(
        SmallMatrix::from_row_slice(1, 1, &[1.0f64]),
        Err(LinalgError::UnsupportedDimension { size: 1, .. })
    ));

    let three = SmallMatrix::from_rows(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
        .expect("3x3");
    assert!(matches!(
        eig(&three),
        Err(LinalgError::UnsupportedDimension { size: 3, .. })
    ));
}
