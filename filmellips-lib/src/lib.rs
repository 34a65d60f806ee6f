pub mod config;
pub mod constants;
pub mod ellipsometry;
pub mod error;
pub mod fresnel;
pub mod model;
pub mod snell;
pub mod tmm;

pub use config::ModelConfig;
pub use ellipsometry::{DeltaPsi, compute_delta_psi, compute_delta_psi_records};
pub use error::{EllipsometryError, Result};
pub use fresnel::Polarization;
pub use model::{EllipsometryModel, Stack, Structure};
pub use tmm::{Amplitudes, QueryPoint, TmmPoint, coh_tmm};
pub use filmellips_data;
pub use filmellips_data::{DeltaPsiRecord, LayerRow};
