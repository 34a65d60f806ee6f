/// Bound on `Im(n0 sin th0)` below which the incident condition counts as real.
pub const REALITY_TOLERANCE: f64 = 100.0 * f64::EPSILON;

/// Largest imaginary phase thickness kept for an interior layer.
///
/// `Im(delta) = 35` is a single-pass transmission of about 1e-30.
pub const OPACITY_LIMIT: f64 = 35.0;

/// He-Ne laser line (nm), the default measurement wavelength.
pub const HENE_WAVELENGTH: f64 = 632.8;
