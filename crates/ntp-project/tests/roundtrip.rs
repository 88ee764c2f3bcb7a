use ntp_project::*;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ntp_project_{}_{}", std::process::id(), name))
}

#[test]
fn reactor_yaml_roundtrip() {
    let reactor = ReactorDef::reference("yaml-ref");
    let path = temp_path("reactor.yaml");

    save_reactor(&path, &reactor).unwrap();
    let loaded = load_reactor(&path).unwrap();
    assert_eq!(reactor, loaded);

    std::fs::remove_file(&path).ok();
}

#[test]
fn study_json_roundtrip() {
    let mut hot = ReactorDef::reference("hot");
    hot.total_power = 800e6;
    hot.model.power_shape = PowerShapeDef::ChoppedCosine {
        extrapolation_fraction: 0.15,
    };
    let study = StudyDef {
        version: LATEST_VERSION,
        name: "power scan".to_string(),
        reactors: vec![ReactorDef::reference("base"), hot],
    };
    let path = temp_path("study.json");

    save_study(&path, &study).unwrap();
    let loaded = load_study(&path).unwrap();
    assert_eq!(study, loaded);

    std::fs::remove_file(&path).ok();
}

#[test]
fn legacy_parameter_file_loads() {
    // Layout and field names of the hand-written parameter files
    let yaml = r#"
reactor_name: "NTP-Test"
total_power: 500.0e6
inlet_temperature: 300.0
inlet_pressure: 3.0e6
mass_flow_guess: 15.0
geometry:
  core_length: 1.2
  n_slices: 100
nozzle:
  area_throat: 0.001
  area_exit: 0.01
properties:
  cp: 14000
  gamma: 1.35
  molar_mass: 0.002
materials:
  inconel718_Tmax: 1000
"#;
    let path = temp_path("legacy.yaml");
    std::fs::write(&path, yaml).unwrap();

    let reactor = load_reactor(&path).unwrap();
    assert_eq!(reactor.reactor_name, "NTP-Test");
    assert_eq!(reactor.mass_flow, 15.0);
    assert_eq!(reactor.geometry.n_slices, 100);
    assert_eq!(reactor.nozzle.exit_pressure, 101_325.0);
    assert_eq!(reactor.nozzle.ambient_pressure, 101_325.0);
    assert_eq!(reactor.properties.eta_abs, 1.0);
    assert_eq!(reactor.wall_temperature_limit_k(), Some(1000.0));
    assert_eq!(reactor.model, ModelDef::default());

    let params = reactor.to_parameters().unwrap();
    assert_eq!(params.propellant().gamma, 1.35);

    std::fs::remove_file(&path).ok();
}

#[test]
fn tagged_power_shape_in_yaml() {
    let yaml = r#"
reactor_name: ramp
total_power: 1.0e8
inlet_temperature: 250.0
inlet_pressure: 2.0e6
mass_flow: 5.0
geometry: { core_length: 1.0, slice_count: 20 }
nozzle: { area_throat: 0.0005, area_exit: 0.02, exit_pressure: 5000.0, ambient_pressure: 0.0 }
properties: { specific_heat_cp: 14300, gamma: 1.4, molar_mass: 0.002016, absorption_efficiency: 0.95 }
model:
  power_shape:
    type: LinearRamp
    slope: 0.5
  wall_offset_k: 80.0
"#;
    let reactor: ReactorDef = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(
        reactor.model.power_shape,
        PowerShapeDef::LinearRamp { slope: 0.5 }
    );
    assert_eq!(reactor.geometry.n_slices, 20);
    assert_eq!(reactor.properties.eta_abs, 0.95);
    assert_eq!(reactor.nozzle.ambient_pressure, 0.0);
    assert!(reactor.materials.is_none());
}

#[test]
fn unknown_extension_is_rejected() {
    let path = temp_path("reactor.toml");
    let err = save_reactor(&path, &ReactorDef::reference("x")).unwrap_err();
    assert!(matches!(err, ProjectError::UnsupportedFormat { .. }));
}

#[test]
fn invalid_file_is_rejected_on_load() {
    let mut reactor = ReactorDef::reference("bad");
    reactor.inlet_pressure = f64::NAN;
    // NaN is not representable in JSON
    let yaml_path = temp_path("bad.yaml");
    std::fs::write(&yaml_path, serde_yaml::to_string(&reactor).unwrap()).unwrap();

    let err = load_reactor(&yaml_path).unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));

    std::fs::remove_file(&yaml_path).ok();
}
