//! The fixed table of unary functions
//!
//! Each concern (name, evaluation, derivative, rendering) is a single `match`
//! over [`Function`], so every table can be audited on its own.
//!
//! `sqrt`, `cbrt` and `exp` are not in the table: they build `Pow` nodes
//! (`x**(1/2)`, `x**(1/3)`, `E**x`) and the renderers print them back under
//! their names.

use std::fmt;
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::expr::{Expr, ExprKind};

mod derivatives;
mod eval;

/// Unary function tag, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Csc,
    Sec,
    Cot,
    Asin,
    Acos,
    Atan,
    Acsc,
    Asec,
    Acot,
    Sinh,
    Cosh,
    Tanh,
    Csch,
    Sech,
    Coth,
    Asinh,
    Acosh,
    Atanh,
    Acsch,
    Asech,
    Acoth,
    Log,
    Abs,
    Erf,
    Erfc,
    Gamma,
    LogGamma,
    Digamma,
    Trigamma,
    Zeta,
    DirichletEta,
    LambertW,
}

/// Behavior of a function under argument negation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// `f(-x) = -f(x)`
    Odd,
    /// `f(-x) = f(x)`
    Even,
    None,
}

impl Function {
    pub const ALL: [Function; 35] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Csc,
        Function::Sec,
        Function::Cot,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Acsc,
        Function::Asec,
        Function::Acot,
        Function::Sinh,
        Function::Cosh,
        Function::Tanh,
        Function::Csch,
        Function::Sech,
        Function::Coth,
        Function::Asinh,
        Function::Acosh,
        Function::Atanh,
        Function::Acsch,
        Function::Asech,
        Function::Acoth,
        Function::Log,
        Function::Abs,
        Function::Erf,
        Function::Erfc,
        Function::Gamma,
        Function::LogGamma,
        Function::Digamma,
        Function::Trigamma,
        Function::Zeta,
        Function::DirichletEta,
        Function::LambertW,
    ];

    /// Name used by the parser and the plain-text renderer
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Csc => "csc",
            Function::Sec => "sec",
            Function::Cot => "cot",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Acsc => "acsc",
            Function::Asec => "asec",
            Function::Acot => "acot",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Csch => "csch",
            Function::Sech => "sech",
            Function::Coth => "coth",
            Function::Asinh => "asinh",
            Function::Acosh => "acosh",
            Function::Atanh => "atanh",
            Function::Acsch => "acsch",
            Function::Asech => "asech",
            Function::Acoth => "acoth",
            Function::Log => "log",
            Function::Abs => "abs",
            Function::Erf => "erf",
            Function::Erfc => "erfc",
            Function::Gamma => "gamma",
            Function::LogGamma => "loggamma",
            Function::Digamma => "digamma",
            Function::Trigamma => "trigamma",
            Function::Zeta => "zeta",
            Function::DirichletEta => "dirichlet_eta",
            Function::LambertW => "lambertw",
        }
    }

    /// Look up a table function by name (`ln` is accepted for `log`)
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "ln" {
            return Some(Function::Log);
        }
        Function::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn parity(self) -> Parity {
        match self {
            Function::Sin
            | Function::Tan
            | Function::Csc
            | Function::Cot
            | Function::Asin
            | Function::Atan
            | Function::Acsc
            | Function::Acot
            | Function::Sinh
            | Function::Tanh
            | Function::Csch
            | Function::Coth
            | Function::Asinh
            | Function::Atanh
            | Function::Acsch
            | Function::Acoth
            | Function::Erf => Parity::Odd,
            Function::Cos | Function::Sec | Function::Cosh | Function::Sech | Function::Abs => {
                Parity::Even
            }
            _ => Parity::None,
        }
    }

    /// Apply the function to `arg`.
    ///
    /// Real-approximation arguments are evaluated numerically, known exact
    /// values are returned directly and a negative sign is pulled out of
    /// odd functions or dropped from even ones. Anything else becomes a
    /// `FunctionCall` node.
    ///
    /// # Errors
    /// `SymError::Domain` when a numeric evaluation has no real value,
    /// `SymError::NotImplemented` for real-approximation complex arguments.
    pub fn apply(self, arg: Expr) -> Result<Expr> {
        if let ExprKind::Number(n) = arg.kind()
            && !n.is_exact()
        {
            return eval::eval_approx(self, n);
        }
        if let Some(value) = eval::exact_value(self, &arg)? {
            return Ok(value);
        }
        if let Some(positive) = strip_negation(&arg) {
            match self.parity() {
                Parity::Odd => return Ok(self.apply(positive)?.negate()),
                Parity::Even => return self.apply(positive),
                Parity::None => {}
            }
        }
        Ok(Expr::new(ExprKind::FunctionCall {
            func: self,
            arg: Arc::new(arg),
        }))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `-arg` when `arg` carries a visible minus sign
fn strip_negation(arg: &Expr) -> Option<Expr> {
    match arg.kind() {
        ExprKind::Number(n) if n.is_negative() => Some(Expr::number(n.neg())),
        ExprKind::Product(factors) => match factors.first().map(|f| f.kind()) {
            Some(ExprKind::Number(c)) if c.is_negative() => Some(arg.clone().negate()),
            _ => None,
        },
        _ => None,
    }
}

macro_rules! function_methods {
    ($($method:ident => $variant:ident),* $(,)?) => {
        impl Expr {
            $(
                #[doc = concat!("`", stringify!($method), "(self)`")]
                ///
                /// # Errors
                /// See [`Function::apply`].
                pub fn $method(&self) -> Result<Expr> {
                    Function::$variant.apply(self.clone())
                }
            )*
        }
    };
}

function_methods! {
    sin => Sin,
    cos => Cos,
    tan => Tan,
    csc => Csc,
    sec => Sec,
    cot => Cot,
    asin => Asin,
    acos => Acos,
    atan => Atan,
    acsc => Acsc,
    asec => Asec,
    acot => Acot,
    sinh => Sinh,
    cosh => Cosh,
    tanh => Tanh,
    csch => Csch,
    sech => Sech,
    coth => Coth,
    asinh => Asinh,
    acosh => Acosh,
    atanh => Atanh,
    acsch => Acsch,
    asech => Asech,
    acoth => Acoth,
    log => Log,
    abs => Abs,
    erf => Erf,
    erfc => Erfc,
    gamma => Gamma,
    loggamma => LogGamma,
    digamma => Digamma,
    trigamma => Trigamma,
    zeta => Zeta,
    dirichlet_eta => DirichletEta,
    lambertw => LambertW,
}

impl Expr {
    /// `func(arg)`
    ///
    /// # Errors
    /// See [`Function::apply`].
    pub fn func(func: Function, arg: Expr) -> Result<Expr> {
        func.apply(arg)
    }

    /// `self ** (1/2)`
    pub fn sqrt(&self) -> Expr {
        Expr::pow_expr(self.clone(), Expr::small_ratio(1, 2))
    }

    /// `self ** (1/3)`
    pub fn cbrt(&self) -> Expr {
        Expr::pow_expr(self.clone(), Expr::small_ratio(1, 3))
    }

    /// `E ** self`
    pub fn exp(&self) -> Expr {
        Expr::pow_expr(Expr::e(), self.clone())
    }

    /// Derivative of `f` at `u`, without the chain-rule factor
    pub(crate) fn function_derivative(func: Function, u: &Expr) -> Result<Expr> {
        derivatives::outer_derivative(func, u)
    }
}
