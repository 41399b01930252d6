use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_visim")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) { "visim.exe" } else { "visim" });
            p
        })
}

fn write_state(dir: &PathBuf, name: &str, json: &str) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn cli_chain_prints_filter_string() {
    let dir = PathBuf::from("target").join("cli_smoke");
    let state = write_state(
        &dir,
        "chain_state.json",
        r#"{ "effects": [ { "id": "protanopia", "enabled": true, "intensity": 1.0 } ] }"#,
    );

    let out = std::process::Command::new(exe())
        .args(["chain", "--in"])
        .arg(&state)
        .output()
        .unwrap();

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("color-matrix("));
}

#[test]
fn cli_uniforms_lists_every_slot() {
    let dir = PathBuf::from("target").join("cli_smoke");
    let state = write_state(
        &dir,
        "uniforms_state.json",
        r#"{ "effects": [ { "id": "glaucoma", "enabled": true, "intensity": 0.5 } ] }"#,
    );

    let out = std::process::Command::new(exe())
        .args(["uniforms", "--time", "1.5", "--in"])
        .arg(&state)
        .output()
        .unwrap();

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("glaucomaIntensity = 0.5"));
    assert!(stdout.contains("time = 1.5"));
    assert!(stdout.contains("diplopiaSeparation = 0"));
}

#[test]
fn cli_rejects_invalid_state() {
    let dir = PathBuf::from("target").join("cli_smoke");
    let state = write_state(
        &dir,
        "bad_state.json",
        r#"{ "effects": [ { "id": "", "enabled": true, "intensity": 0.5 } ] }"#,
    );

    let status = std::process::Command::new(exe())
        .args(["chain", "--in"])
        .arg(&state)
        .status()
        .unwrap();

    assert!(!status.success());
}
