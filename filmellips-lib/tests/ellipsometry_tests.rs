use approx::assert_relative_eq;
use filmellips::{
    EllipsometryError, LayerRow, compute_delta_psi, compute_delta_psi_records,
};

fn oxide_on_silicon(oxide_nm: f64) -> Vec<LayerRow> {
    vec![
        LayerRow::semi_infinite(1.0, 0.0),
        LayerRow::new(oxide_nm, 1.46, 0.0, 0.0),
        LayerRow::semi_infinite(3.88, 0.02),
    ]
}

#[test]
fn test_native_oxide_reference() {
    // 20 nm SiO2 on Si at 70°, He-Ne line; frozen regression values
    let res = compute_delta_psi(&[70.0], &oxide_on_silicon(20.0), 632.8, 0.0, false).unwrap();
    assert_eq!(res.len(), 1);
    assert_relative_eq!(res.psi[0], 13.713160024257421, max_relative = 1e-8);
    assert_relative_eq!(res.delta[0], 130.50112615970303, max_relative = 1e-8);
}

#[test]
fn test_angle_scan_reference() {
    let aoi = [50.0, 60.0, 65.0, 75.0, 80.0];
    let expected = [
        (31.633238085831216, 168.70240197762402),
        (23.957637808765888, 159.26524279865524),
        (19.03246425063583, 149.84371592317083),
        (10.816969882934265, 85.83078922079936),
        (16.577770153741042, 37.34471493437049),
    ];
    let res = compute_delta_psi(&aoi, &oxide_on_silicon(20.0), 632.8, 0.0, false).unwrap();
    for ((psi, delta), (psi_ref, delta_ref)) in res.iter().zip(expected) {
        assert_relative_eq!(psi, psi_ref, max_relative = 1e-8);
        assert_relative_eq!(delta, delta_ref, max_relative = 1e-8);
    }
}

#[test]
fn test_zero_thickness_film_matches_bare_substrate() {
    let bare = [LayerRow::semi_infinite(1.0, 0.0), LayerRow::semi_infinite(3.88, 0.02)];
    let aoi = [55.0, 70.0, 75.0];
    let a = compute_delta_psi(&aoi, &bare, 632.8, 0.0, false).unwrap();
    let b = compute_delta_psi(&aoi, &oxide_on_silicon(0.0), 632.8, 0.0, false).unwrap();
    for ((psi_a, delta_a), (psi_b, delta_b)) in a.iter().zip(b.iter()) {
        assert_relative_eq!(psi_a, psi_b, epsilon = 1e-9);
        assert_relative_eq!(delta_a, delta_b, epsilon = 1e-9);
    }
    assert_relative_eq!(a.psi[1], 10.558195742746593, max_relative = 1e-8);
    assert_relative_eq!(a.delta[1], 179.1875855925981, max_relative = 1e-8);
}

#[test]
fn test_reflect_delta_convention() {
    // 150 nm oxide at 70° has a raw Delta above 180°
    let stack = oxide_on_silicon(150.0);
    let raw = compute_delta_psi(&[70.0], &stack, 632.8, 0.0, false).unwrap();
    let reflected = compute_delta_psi(&[70.0], &stack, 632.8, 0.0, true).unwrap();
    assert_relative_eq!(raw.delta[0], 267.5356677222248, max_relative = 1e-8);
    assert_relative_eq!(reflected.delta[0], 360.0 - raw.delta[0], epsilon = 1e-9);
    assert_eq!(raw.psi, reflected.psi);

    // values at or below 180° are untouched
    let thin = oxide_on_silicon(20.0);
    let raw = compute_delta_psi(&[70.0], &thin, 632.8, 0.0, false).unwrap();
    let reflected = compute_delta_psi(&[70.0], &thin, 632.8, 0.0, true).unwrap();
    assert_eq!(raw, reflected);
}

#[test]
fn test_delta_offset_is_additive() {
    let stack = oxide_on_silicon(20.0);
    let aoi = [60.0, 70.0, 80.0];
    let base = compute_delta_psi(&aoi, &stack, 632.8, 0.0, false).unwrap();
    for offset in [-3.0, 0.25, 2.5] {
        let shifted = compute_delta_psi(&aoi, &stack, 632.8, offset, false).unwrap();
        assert_eq!(base.psi, shifted.psi);
        for (d0, d1) in base.delta.iter().zip(&shifted.delta) {
            assert_relative_eq!(*d1, d0 + offset, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_opaque_film_saturates() {
    let film = |thickness: f64, k: f64| {
        vec![
            LayerRow::semi_infinite(1.0, 0.0),
            LayerRow::new(thickness, 2.0, k, 0.0),
            LayerRow::semi_infinite(1.5, 0.0),
        ]
    };
    let bulk = [LayerRow::semi_infinite(1.0, 0.0), LayerRow::semi_infinite(2.0, 10.0)];
    let bulk = compute_delta_psi(&[70.0], &bulk, 632.8, 0.0, false).unwrap();

    // once opaque the film reflects like the bulk material
    for thickness in [1e3, 5e3, 5e4] {
        let res = compute_delta_psi(&[70.0], &film(thickness, 10.0), 632.8, 0.0, false).unwrap();
        assert_relative_eq!(res.psi[0], bulk.psi[0], max_relative = 1e-9);
        assert_relative_eq!(res.delta[0], bulk.delta[0], max_relative = 1e-9);
    }

    let mut last_psi = 0.0;
    for k in [10.0, 100.0, 1e3, 1e4] {
        let res = compute_delta_psi(&[70.0], &film(1e3, k), 632.8, 0.0, false).unwrap();
        assert!(res.psi[0].is_finite() && res.delta[0].is_finite(), "k = {k}");
        assert!(res.psi[0] > last_psi, "psi should grow towards 45° with k");
        assert!(res.psi[0] < 45.0);
        last_psi = res.psi[0];
    }
}

#[test]
fn test_array_matches_individual_calls() {
    let stack = oxide_on_silicon(20.0);
    let aoi: Vec<f64> = (0..12).map(|i| 45.0 + 3.0 * i as f64).collect();
    let batch = compute_delta_psi(&aoi, &stack, 632.8, 1.0, false).unwrap();
    assert_eq!(batch.len(), aoi.len());
    for (i, &a) in aoi.iter().enumerate() {
        let single = compute_delta_psi(&[a], &stack, 632.8, 1.0, false).unwrap();
        assert_eq!(single.psi[0], batch.psi[i]);
        assert_eq!(single.delta[0], batch.delta[i]);
    }
}

#[test]
fn test_records_over_wavelengths() {
    let stack = oxide_on_silicon(20.0);
    let wavelengths = [400.0, 500.0, 632.8];
    let records = compute_delta_psi_records(&[70.0], &wavelengths, &stack, 0.0, false).unwrap();
    assert_eq!(records.len(), 3);

    let expected = [
        (17.119498219750753, 113.06948536692987),
        (15.206586477584064, 121.70862753437542),
        (13.713160024257421, 130.50112615970303),
    ];
    for (rec, (psi, delta)) in records.iter().zip(expected) {
        assert_eq!(rec.aoi, 70.0);
        assert_relative_eq!(rec.psi, psi, max_relative = 1e-8);
        assert_relative_eq!(rec.delta, delta, max_relative = 1e-8);
    }
    assert_eq!(records[1].wavelength, 500.0);
}

#[test]
fn test_stack_too_short() {
    let err = compute_delta_psi(&[70.0], &[LayerRow::semi_infinite(1.0, 0.0)], 632.8, 0.0, false)
        .unwrap_err();
    assert_eq!(err, EllipsometryError::StackTooShort(1));
}

#[test]
fn test_fronting_extinction_is_ignored() {
    let mut stack = oxide_on_silicon(20.0);
    let clean = compute_delta_psi(&[70.0], &stack, 632.8, 0.0, false).unwrap();
    stack[0].extinction_coefficient = 0.5;
    let lossy = compute_delta_psi(&[70.0], &stack, 632.8, 0.0, false).unwrap();
    assert_eq!(clean, lossy);
}

#[test]
fn test_bare_interface_normal_incidence() {
    let bare = [LayerRow::semi_infinite(1.0, 0.0), LayerRow::semi_infinite(1.5, 0.0)];
    let res = compute_delta_psi(&[0.0], &bare, 632.8, 0.0, false).unwrap();
    assert_relative_eq!(res.psi[0], 45.0, epsilon = 1e-10);
    assert_relative_eq!(res.delta[0], 180.0, epsilon = 1e-10);
}

#[test]
fn test_total_internal_reflection_uses_decaying_wave() {
    // glass -> air at 60°: the exit wave is evanescent and must decay into the air,
    // which puts Delta at 40.459° rather than its 360° complement
    let glass_to_air = [LayerRow::semi_infinite(1.5, 0.0), LayerRow::semi_infinite(1.0, 0.0)];
    let res = compute_delta_psi(&[60.0], &glass_to_air, 632.8, 0.0, false).unwrap();
    assert_relative_eq!(res.psi[0], 45.0, epsilon = 1e-9);
    assert_relative_eq!(res.delta[0], 40.45908308078944, max_relative = 1e-8);
}
