//! End-to-end sizing runs against the pinned CA_PV_ED reference plant.

use pv_sizing::models::units::{Hectares, Megawatts};
use pv_sizing::{Config, ReferencePlant, SizingEngine, SizingError, SizingInput, size};

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn five_mw_data_center_at_pue_1_3() {
    let r = size(&SizingInput::new(5.0, 1.3, 0.20), &ReferencePlant::ca_pv_ed()).unwrap();

    assert!(close(r.total_power.value(), 6.5, 1e-12), "total={}", r.total_power);
    assert!(close(r.solar_ac_capacity.value(), 32.5, 1e-12), "ac={}", r.solar_ac_capacity);
    assert!(close(r.solar_dc_capacity.value(), 42.25, 1e-12), "dc={}", r.solar_dc_capacity);

    assert!(close(r.scaling_factor, 32.5 / 38.9, 1e-15));
    assert_eq!(r.module_count, 67_600);
    assert_eq!(r.string_count, 2_600);
    assert_eq!(r.structure_count, 1_300);
    assert_eq!(r.combiner_count, 163);
    assert_eq!(r.inverter_count, 11);
    assert_eq!(r.transformer_count, 6);
    assert_eq!(r.station_count, 6);

    let land = 71.2 * 32.5 / 38.9;
    assert!(close(r.land_area.value(), land, 1e-9));
    assert!(close(r.fence_area.value(), land * 0.937, 1e-9));
    assert!(close(r.fence_perimeter.value(), (land * 10_000.0).sqrt() * 4.0 * 1.2, 1e-6));
    assert!(close(r.access_road_length.value(), land * 400.0, 1e-6));

    let annual = 32.5 * 8760.0 * 0.20 * 0.98 * 0.99;
    assert!(close(r.annual_energy.value(), annual, 1e-6), "annual={}", r.annual_energy);
    assert!(close(r.co2_savings.value(), annual * 0.4, 1e-6));
    assert!(close(r.performance_ratio, 0.9702, 1e-12));
    assert!(close(r.actual_capacity_factor, 0.20 * 0.9702, 1e-12));

    assert!(close(r.electrical.string_voltage.value(), 26.0 * 41.1, 1e-9));
    assert!(close(r.electrical.installed_dc_ac_ratio, 1.3, 1e-9));
}

#[test]
fn zero_capacity_factor_names_the_field() {
    let err = size(&SizingInput::new(5.0, 1.3, 0.0), &ReferencePlant::ca_pv_ed()).unwrap_err();
    match err {
        SizingError::InvalidInput { field, .. } => assert_eq!(field, "capacityFactor"),
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn pue_below_one_is_rejected() {
    let err = size(&SizingInput::new(5.0, 0.9, 0.2), &ReferencePlant::ca_pv_ed()).unwrap_err();
    assert_eq!(err.field(), Some("PUE"));
}

#[test]
fn broken_reference_plant_is_a_configuration_error() {
    let mut plant = ReferencePlant::ca_pv_ed();
    plant.monthly_temperature.truncate(6);
    let err = size(&SizingInput::new(5.0, 1.3, 0.2), &plant).unwrap_err();
    assert!(matches!(err, SizingError::Configuration(_)), "{:?}", err);
}

#[test]
fn reference_load_reproduces_reference_plant() {
    // 38.9 MWac at CF 1 and PUE 1 is the benchmark itself.
    let plant = ReferencePlant::ca_pv_ed();
    let r = size(&SizingInput::new(38.9, 1.0, 1.0), &plant).unwrap();
    assert_eq!(r.scaling_factor, 1.0);
    assert_eq!(r.module_count, plant.module_count);
    assert_eq!(r.inverter_count, plant.inverter_count);
    assert_eq!(r.land_area, plant.land_area);
}

#[test]
fn swapping_the_benchmark_plant() {
    // Same equipment on twice the AC rating: every tier halves.
    let plant = ReferencePlant { ac_capacity: Megawatts(77.8), ..ReferencePlant::ca_pv_ed() };
    let r = size(&SizingInput::new(38.9, 1.0, 1.0), &plant).unwrap();
    assert_eq!(r.module_count, 40_456);
    assert_eq!(r.inverter_count, 6);
    assert_eq!(r.land_area, Hectares(35.6));
}

#[test]
fn config_overrides_flow_through() {
    let config = Config::from_json(r#"{ "dcAcRatio": 1.2, "co2TonnesPerMwh": 0.5, "acLoss": 0.0 }"#).unwrap();
    let engine = SizingEngine::new(ReferencePlant::ca_pv_ed(), config).unwrap();
    let r = engine.size(&SizingInput::new(5.0, 1.3, 0.20)).unwrap();
    assert!(close(r.solar_dc_capacity.value(), 32.5 * 1.2, 1e-12));
    let annual = 32.5 * 8760.0 * 0.20 * 0.98;
    assert!(close(r.annual_energy.value(), annual, 1e-6));
    assert!(close(r.co2_savings.value(), annual * 0.5, 1e-6));
}

#[test]
fn result_serializes_with_wire_names() {
    let r = size(&SizingInput::new(5.0, 1.3, 0.20), &ReferencePlant::ca_pv_ed()).unwrap();
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["moduleCount"], 67_600);
    assert!(v["solarACCapacityMW"].is_number());
    assert_eq!(v["monthlyEnergyMWh"].as_array().map(|a| a.len()), Some(12));
    assert!(v["landAreaHa"].is_number());
    assert!(v["electrical"]["stringVoltage"].is_number());
    assert!(v["irradiancePerformanceRatio"].is_number());
    assert!(v["monthlyResource"][6]["plantAcPower"].is_number());
    assert!(v["monthlyResource"][6]["inverterLoadingPercent"].is_number());
}

#[test]
fn monthly_summary_follows_sized_inverters() {
    let r = size(&SizingInput::new(5.0, 1.3, 0.20), &ReferencePlant::ca_pv_ed()).unwrap();
    let fleet_mva = r.inverter_count as f64 * 3.6;
    for m in &r.monthly_resource {
        let loading = m.plant_dc_power.value() / fleet_mva * 100.0;
        assert!(close(m.inverter_loading_percent, loading, 1e-9), "month {}", m.month);
        assert!(m.plant_ac_power <= m.plant_dc_power);
        assert!((0.0..=100.0).contains(&m.shading_loss_percent));
    }
}

#[test]
fn concurrent_invocations_share_one_engine() {
    let engine = SizingEngine::with_reference().unwrap();
    let loads = [1.0, 2.5, 5.0, 7.5, 10.0];

    let parallel: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = loads
            .iter()
            .map(|&mw| {
                let engine = &engine;
                s.spawn(move || engine.size(&SizingInput::new(mw, 1.2, 0.2)).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (mw, r) in loads.iter().zip(parallel) {
        assert_eq!(r, engine.size(&SizingInput::new(*mw, 1.2, 0.2)).unwrap());
    }
}
