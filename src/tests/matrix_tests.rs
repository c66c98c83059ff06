//! Dense matrix operations

use crate::{DenseMatrix, ErrorKind, Expr, parse};

fn m(rows: &[&[&str]]) -> DenseMatrix {
    DenseMatrix::from_rows(
        rows.iter()
            .map(|r| r.iter().map(|s| parse(s).unwrap()).collect())
            .collect(),
    )
    .unwrap()
}

fn ints(rows: &[&[i64]]) -> DenseMatrix {
    DenseMatrix::from_rows(
        rows.iter()
            .map(|r| r.iter().map(|&n| Expr::integer(n)).collect())
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_add_renders_doubled() {
    let a = m(&[&["x", "y"], &["y", "x"]]);
    let doubled = a.add(&a).unwrap();
    assert_eq!(doubled.to_string(), "[2*x, 2*y]\n[2*y, 2*x]\n");
    assert_eq!(doubled, a.mul_scalar(&Expr::integer(2)));
}

#[test]
fn test_construction_and_access() {
    assert!(DenseMatrix::new(2, 2, vec![Expr::one(); 3]).is_err());
    let mut a = DenseMatrix::zeros(2, 3);
    a.set(1, 2, Expr::symbol("z")).unwrap();
    assert_eq!(a.get(1, 2).unwrap(), &Expr::symbol("z"));
    assert_eq!(a.get(2, 0).unwrap_err().kind(), ErrorKind::Runtime);
    assert_eq!(a.set(0, 3, Expr::one()).unwrap_err().kind(), ErrorKind::Runtime);
    assert_eq!(a.col(2).unwrap(), vec![Expr::zero(), Expr::symbol("z")]);
    assert_eq!(DenseMatrix::ones(1, 2).row(0).unwrap(), vec![Expr::one(), Expr::one()]);

    a.resize(3, 2).unwrap();
    assert_eq!((a.rows(), a.cols()), (3, 2));
    assert!(a.resize(4, 2).is_err());
}

#[test]
fn test_eye_and_diag() {
    assert_eq!(DenseMatrix::eye(2, 3, 1), ints(&[&[0, 1, 0], &[0, 0, 1]]));
    assert_eq!(DenseMatrix::eye(3, 2, -1), ints(&[&[0, 0], &[1, 0], &[0, 1]]));
    let d = DenseMatrix::diag(&[Expr::integer(4), Expr::integer(5)], 1);
    assert_eq!(d, ints(&[&[0, 4, 0], &[0, 0, 5], &[0, 0, 0]]));
}

#[test]
fn test_mul_and_transpose() {
    let a = ints(&[&[1, 2, 3], &[4, 5, 6]]);
    let b = a.transpose();
    assert_eq!(b, ints(&[&[1, 4], &[2, 5], &[3, 6]]));
    assert_eq!(a.mul_matrix(&b).unwrap(), ints(&[&[14, 32], &[32, 77]]));
    assert_eq!(a.mul_matrix(&a).unwrap_err().kind(), ErrorKind::Runtime);
    assert_eq!(a.add(&b).unwrap_err().kind(), ErrorKind::Runtime);
    assert_eq!(a.add_scalar(&Expr::one()), ints(&[&[2, 3, 4], &[5, 6, 7]]));
}

#[test]
fn test_det() {
    assert_eq!(ints(&[&[2, 1], &[1, 1]]).det().unwrap(), Expr::one());
    assert_eq!(ints(&[&[0, 1], &[1, 0]]).det().unwrap(), Expr::minus_one());
    assert_eq!(ints(&[&[1, 2], &[2, 4]]).det().unwrap(), Expr::zero());
    assert_eq!(
        ints(&[&[2, -3, 1], &[2, 0, -1], &[1, 4, 5]]).det().unwrap(),
        Expr::integer(49)
    );

    let sym = m(&[&["x", "y"], &["y", "x"]]);
    assert_eq!(sym.det().unwrap(), parse("x^2 - y^2").unwrap());

    let general = m(&[&["a", "b", "c"], &["d", "e", "f"], &["g", "h", "i"]]);
    assert_eq!(
        general.det().unwrap(),
        parse("a*e*i - a*f*h - b*d*i + b*f*g + c*d*h - c*e*g").unwrap()
    );

    assert_eq!(DenseMatrix::zeros(2, 3).det().unwrap_err().kind(), ErrorKind::Runtime);
}

#[test]
fn test_inverse() {
    let a = ints(&[&[2, 1], &[1, 1]]);
    let inv = a.inv().unwrap();
    assert_eq!(inv, ints(&[&[1, -1], &[-1, 2]]));
    assert_eq!(a.mul_matrix(&inv).unwrap(), DenseMatrix::eye(2, 2, 0));

    let b = ints(&[&[0, 2, 1], &[1, 0, 0], &[3, 1, 1]]);
    assert_eq!(b.mul_matrix(&b.inv().unwrap()).unwrap(), DenseMatrix::eye(3, 3, 0));

    let singular = ints(&[&[1, 2], &[2, 4]]);
    assert_eq!(singular.inv().unwrap_err().kind(), ErrorKind::DivideByZero);
}

#[test]
fn test_lu_and_solve() {
    let a = ints(&[&[2, 1], &[1, 3]]);
    let (l, u, perm) = a.lu().unwrap();
    assert_eq!(perm, vec![0, 1]);
    assert_eq!(l.mul_matrix(&u).unwrap(), a);
    assert_eq!(l.get(0, 1).unwrap(), &Expr::zero());
    assert_eq!(u.get(1, 0).unwrap(), &Expr::zero());

    let b = ints(&[&[3], &[5]]);
    let x = a.solve(&b).unwrap();
    assert_eq!(
        x,
        DenseMatrix::new(2, 1, vec![Expr::rational(4, 5).unwrap(), Expr::rational(7, 5).unwrap()]).unwrap()
    );
    assert_eq!(a.mul_matrix(&x).unwrap(), b);

    let singular = ints(&[&[1, 2], &[2, 4]]);
    assert_eq!(singular.solve(&b).unwrap_err().kind(), ErrorKind::DivideByZero);
}

fn permuted_rows(a: &DenseMatrix, perm: &[usize]) -> DenseMatrix {
    DenseMatrix::from_rows(perm.iter().map(|&r| a.row(r).unwrap()).collect()).unwrap()
}

#[test]
fn test_lu_pivots_past_zero_leading_entry() {
    let a = ints(&[&[0, 1, 2], &[1, 1, 0], &[2, 0, 1]]);
    let (l, u, perm) = a.lu().unwrap();
    assert_eq!(perm[0], 1);
    assert_eq!(l.mul_matrix(&u).unwrap(), permuted_rows(&a, &perm));
    for i in 0..3 {
        assert_eq!(l.get(i, i).unwrap(), &Expr::one());
        for j in i + 1..3 {
            assert!(l.get(i, j).unwrap().is_zero());
            assert!(u.get(j, i).unwrap().is_zero());
        }
    }

    let b = ints(&[&[2], &[3]]);
    let swapped = ints(&[&[0, 1], &[1, 1]]);
    assert_eq!(swapped.solve(&b).unwrap(), ints(&[&[1], &[2]]));

    let sym = m(&[&["0", "x"], &["y", "1"]]);
    let (l, u, perm) = sym.lu().unwrap();
    assert_eq!(perm, vec![1, 0]);
    assert_eq!(l.mul_matrix(&u).unwrap().expand(), permuted_rows(&sym, &perm));
}

#[test]
fn test_det_with_polynomial_pivots() {
    let a = m(&[&["x + 1", "1", "0"], &["1", "x + 1", "1"], &["0", "1", "x + 1"]]);
    assert_eq!(a.det().unwrap(), parse("x^3 + 3x^2 + x - 1").unwrap());

    let b = m(&[&["x + y", "x"], &["y", "x - y"]]);
    assert_eq!(b.det().unwrap(), parse("x^2 - x*y - y^2").unwrap());

    let singular = m(&[&["x + 1", "x + 1"], &["x - 1", "x - 1"]]);
    assert!(singular.det().unwrap().is_zero());
}

#[test]
fn test_calculus() {
    let x = Expr::symbol("x");
    let y = Expr::symbol("y");
    let a = m(&[&["x^2", "x*y"], &["sin(x)", "y"]]);
    assert_eq!(a.diff(&x).unwrap(), m(&[&["2x", "y"], &["cos(x)", "0"]]));

    let f = m(&[&["x^2 + y"], &["x*y"]]);
    let vars = DenseMatrix::new(2, 1, vec![x, y]).unwrap();
    assert_eq!(f.jacobian(&vars).unwrap(), m(&[&["2x", "1"], &["y", "x"]]));
    assert!(a.jacobian(&vars).is_err());
}

#[test]
fn test_reshaping() {
    let a = ints(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
    assert_eq!(a.submatrix(0, 0, 2, 2, 2, 2).unwrap(), ints(&[&[1, 3], &[7, 9]]));
    assert_eq!(a.submatrix(1, 1, 2, 2, 1, 1).unwrap(), ints(&[&[5, 6], &[8, 9]]));
    assert!(a.submatrix(0, 0, 3, 2, 1, 1).is_err());
    assert!(a.submatrix(0, 0, 2, 2, 0, 1).is_err());

    let mut b = ints(&[&[1], &[2]]);
    b.row_join(&ints(&[&[3], &[4]])).unwrap();
    assert_eq!(b, ints(&[&[1, 3], &[2, 4]]));
    b.col_join(&ints(&[&[5, 6]])).unwrap();
    assert_eq!(b, ints(&[&[1, 3], &[2, 4], &[5, 6]]));
    assert!(b.row_join(&ints(&[&[1]])).is_err());

    b.row_del(1).unwrap();
    assert_eq!(b, ints(&[&[1, 3], &[5, 6]]));
    b.col_del(0).unwrap();
    assert_eq!(b, ints(&[&[3], &[6]]));
    assert!(b.col_del(1).is_err());
}

#[test]
fn test_expand_entries() {
    let a = m(&[&["(x+1)^2", "x"]]);
    assert_eq!(a.expand(), m(&[&["x^2 + 2x + 1", "x"]]));
}
