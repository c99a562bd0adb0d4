use crate::CoreError;

/// Scalar used for readings, parameters and derived quantities.
pub type Real = f64;

/// Absolute and relative tolerance for comparing derived values.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// True when `a` and `b` agree within either the absolute or relative bound.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// Pass `v` through if finite, otherwise name the offending quantity.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if !v.is_finite() {
        return Err(CoreError::NonFinite { what, value: v });
    }
    Ok(v)
}

/// Parse a table cell as a finite number. Surrounding whitespace is ignored.
pub fn parse_real(cell: &str) -> Option<Real> {
    cell.trim().parse::<Real>().ok().filter(|v| v.is_finite())
}

/// Format a value for a table cell. `NaN` becomes an empty cell.
pub fn format_real(v: Real) -> String {
    if v.is_nan() { String::new() } else { v.to_string() }
}
