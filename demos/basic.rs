/// Basic tour of the engine
///
/// Differentiates `3*y**2 - log(x)*cos(x)`, prints the result as text and
/// LaTeX, then expands a cubic and works a small matrix.
///
/// Run with: cargo run --example basic
use symb_cas::{DenseMatrix, Expr, SymError, gradient, parse};

fn main() -> Result<(), SymError> {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  SYMB CAS: BASIC TOUR");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    let x = Expr::symbol("x");
    let y = Expr::symbol("y");

    // Differentiation
    let f = 3 * y.pow(2) - x.log()? * x.cos()?;
    let df = f.diff(&x)?;
    println!("  Derivative of 3y^2 - log(x)cos(x)    -->    {df}");
    if let Some(latex) = df.to_latex() {
        println!("  Or in LaTeX: {latex}");
    }

    // Expansion
    let cubic_str = "(3x +2)*(x^2-7x+9)*(x-1)";
    let cubic = parse(cubic_str)?;
    println!("\n  expand( {cubic_str} )    -->    {}", cubic.expand());

    // Substitution and coefficients
    let expanded = cubic.expand();
    println!("  coefficient of x^2: {}", expanded.coefficient(&x, 2)?);
    println!("  at x = 2: {}", expanded.substitute(&x, &Expr::integer(2))?);

    // Gradient
    let g = gradient(&(x.pow(2) * &y + y.sin()?), &[&x, &y])?;
    let rendered: Vec<String> = g.iter().map(ToString::to_string).collect();
    println!("\n  gradient of x^2*y + sin(y): [{}]", rendered.join(", "));

    // Matrices
    let a = DenseMatrix::from_rows(vec![vec![x.clone(), y.clone()], vec![y.clone(), x.clone()]])?;
    println!("\n  A + A =\n{}", a.add(&a)?);
    println!("  det(A) = {}", a.det()?);

    // Code generation
    if let Some(c) = df.to_ccode() {
        println!("\n  C: {c}");
    }
    if let Some(js) = df.to_jscode() {
        println!("  JS: {js}");
    }

    Ok(())
}
