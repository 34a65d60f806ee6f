pub type Result<T> = std::result::Result<T, EllipsometryError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EllipsometryError {
    #[error("layer stack needs at least 2 media, got {0}")]
    StackTooShort(usize),
    #[error("wavelength must be positive and finite, got {0} nm")]
    InvalidWavelength(f64),
    #[error(
        "non-physical incidence: Im(n0 sin th0) = {residual:e} at th0 = {theta} rad"
    )]
    NonPhysicalIncidence { theta: f64, residual: f64 },
    #[error("cannot broadcast {angles} angles against {wavelengths} wavelengths")]
    ShapeMismatch { angles: usize, wavelengths: usize },
    #[error("{indices} refractive indices but {thicknesses} thicknesses")]
    LengthMismatch { indices: usize, thicknesses: usize },
    #[error("expected {expected} parameter values, got {actual}")]
    ParameterCount { expected: usize, actual: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
