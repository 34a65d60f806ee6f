//! WASM bindings for filmellips.
//!
//! Build with:
//! ```sh
//! wasm-pack build -p filmellips-wasm
//! ```

use wasm_bindgen::prelude::*;

use filmellips::filmellips_data::rows_from_flat;
use filmellips::{EllipsometryError, LayerRow, ModelConfig};

fn to_js(e: EllipsometryError) -> JsError {
    JsError::new(&e.to_string())
}

fn parse_layers(layers: &[f64]) -> Result<Vec<LayerRow>, JsError> {
    rows_from_flat(layers).ok_or_else(|| {
        JsError::new(&format!(
            "layers must be flat [thickness, n, k, roughness] rows, got {} values",
            layers.len()
        ))
    })
}

/// Returns `[psi..., delta...]` (degrees) for each angle of incidence.
///
/// `layers` is a flat row-major array of `[thickness_nm, n, k, roughness]`
/// rows, fronting medium first.
#[wasm_bindgen]
pub fn delta_psi(
    aoi: &[f64],
    layers: &[f64],
    wavelength: f64,
    delta_offset: f64,
    reflect_delta: bool,
) -> Result<Vec<f64>, JsError> {
    let rows = parse_layers(layers)?;
    let result =
        filmellips::compute_delta_psi(aoi, &rows, wavelength, delta_offset, reflect_delta)
            .map_err(to_js)?;
    let mut out = result.psi;
    out.extend(result.delta);
    Ok(out)
}

/// Returns `[aoi, wavelength, psi, delta]` rows, flattened, for angles
/// broadcast against wavelengths.
#[wasm_bindgen]
pub fn delta_psi_spectrum(
    aoi: &[f64],
    wavelengths: &[f64],
    layers: &[f64],
    delta_offset: f64,
    reflect_delta: bool,
) -> Result<Vec<f64>, JsError> {
    let rows = parse_layers(layers)?;
    let records = filmellips::compute_delta_psi_records(
        aoi,
        wavelengths,
        &rows,
        delta_offset,
        reflect_delta,
    )
    .map_err(to_js)?;
    Ok(records
        .iter()
        .flat_map(|r| [r.aoi, r.wavelength, r.psi, r.delta])
        .collect())
}

/// Evaluates a JSON model config at the given angles; returns `[psi..., delta...]`.
#[wasm_bindgen]
pub fn delta_psi_from_config(config_json: &str, aoi: &[f64]) -> Result<Vec<f64>, JsError> {
    let config = ModelConfig::from_json_str(config_json).map_err(to_js)?;
    let model = filmellips::EllipsometryModel::from_config(&config).map_err(to_js)?;
    let result = model.model(aoi).map_err(to_js)?;
    let mut out = result.psi;
    out.extend(result.delta);
    Ok(out)
}
