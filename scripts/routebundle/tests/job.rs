use std::path::PathBuf;

use routebundle::{route_file, Job, Mode};

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
const BUILD_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/build");

fn out_path(test_name: &str, file_name: &str) -> PathBuf {
    PathBuf::from(BUILD_DIR).join(format!("tests/{test_name}/{file_name}"))
}

#[test]
fn job_file_parses_with_defaults() {
    let job = Job::from_toml_file(PathBuf::from(DATA_DIR).join("facing.toml")).unwrap();
    assert_eq!(job.mode, Mode::Auto);
    assert_eq!(job.config.bend_radius, 10.0);
    assert_eq!(job.config.start_straight_length, 0.01);
    assert_eq!(job.ports1.len(), 2);
    assert_eq!(job.ports1[0].width, 1.0);
    assert_eq!(job.ports2[1].width, 0.5);
}

#[test]
fn job_mode_can_be_overridden() {
    let job = Job::from_toml_file(PathBuf::from(DATA_DIR).join("facing.toml")).unwrap();
    let auto = job.run(None).unwrap();
    assert_eq!(auto.len(), 2);
    assert_eq!(job.run(Some(Mode::Direct)).unwrap(), auto);

    let mut sideways = job.clone();
    for port in sideways.ports2.iter_mut() {
        port.orientation = 90.;
    }
    let err = sideways.run(Some(Mode::Indirect)).unwrap_err();
    assert_eq!(err.source().kind(), "UnsupportedConfiguration");
}

#[test]
fn route_file_writes_json() {
    let out = out_path("route_file_writes_json", "routes.json");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();
    route_file(PathBuf::from(DATA_DIR).join("facing.toml"), Some(&out), None).unwrap();

    let json = std::fs::read_to_string(&out).unwrap();
    let routes: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(routes.as_array().unwrap().len(), 2);
    assert_eq!(routes[1][0]["y"], 30.0);
    assert_eq!(routes[1][3]["x"], 200.0);
}

#[test]
fn malformed_job_is_reported() {
    let err = Job::from_toml("mode = \"sideways\"\nports1 = []\nports2 = []\n").unwrap_err();
    assert_eq!(err.source().kind(), "TomlParsing");
}
