use forge_kernel::ConfigError;
use forge_kernel::config::{FileFormat, load_config, load_config_str};
use forge_kernel::domain::config::{ForgeConfig, PlateConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const SAMPLE_TOML: &str = r#"
[slicer]
location = "/Applications/SuperSlicer.app/Contents/MacOS/SuperSlicer"

[print_server]
address = "192.168.1.93"

[helper_tool]
location = "./platerbinary/plater_cli_osx"

[helper_tool.plate]
width = 220
height = 200

[profile_sets]
titanx = [
    "printerProfile.ini",
    "filamentProfile.ini",
    "printProfile.ini",
]
"#;

fn write_sample(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write sample config");
    path
}

#[test]
fn loads_record_from_toml_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = write_sample(dir.path(), "forge.toml", SAMPLE_TOML);

    let cfg: ForgeConfig = load_config(Some(&path))?;

    assert!(!cfg.slicer_location().as_os_str().is_empty());
    assert!(!cfg.print_server_address().is_empty());
    assert!(!cfg.helper_location().as_os_str().is_empty());
    assert_eq!(cfg.print_server_address(), "192.168.1.93");
    assert_eq!(cfg.helper_tool.plate.width, 220);
    assert_eq!(cfg.helper_tool.plate.height, 200);
    assert!((cfg.helper_tool.plate.spacing - PlateConfig::default().spacing).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn base_name_resolves_extension_on_disk() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_sample(dir.path(), "forge.toml", SAMPLE_TOML);

    let cfg: ForgeConfig = load_config(Some(dir.path().join("forge")))?;
    assert!(cfg.profile_set("titanx").is_some());
    Ok(())
}

#[test]
fn loading_twice_yields_equal_records() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = write_sample(dir.path(), "forge.toml", SAMPLE_TOML);

    let first: ForgeConfig = load_config(Some(&path))?;
    let second: ForgeConfig = load_config(Some(&path))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn profile_triple_keeps_declared_order() -> Result<(), Box<dyn std::error::Error>> {
    let cfg: ForgeConfig = load_config_str(SAMPLE_TOML, FileFormat::Toml)?;

    let set = cfg.profile_set("titanx").expect("titanx should be defined");
    assert_eq!(
        set.paths(),
        [
            PathBuf::from("printerProfile.ini"),
            PathBuf::from("filamentProfile.ini"),
            PathBuf::from("printProfile.ini"),
        ]
    );
    assert!(set.iter().all(|p| !p.as_os_str().is_empty()));
    Ok(())
}

#[test]
fn yaml_and_toml_sources_agree() -> Result<(), Box<dyn std::error::Error>> {
    let yaml = r#"
slicer:
  location: /Applications/SuperSlicer.app/Contents/MacOS/SuperSlicer
print_server:
  address: 192.168.1.93
helper_tool:
  location: ./platerbinary/plater_cli_osx
  plate:
    width: 220
    height: 200
profile_sets:
  titanx:
    - printerProfile.ini
    - filamentProfile.ini
    - printProfile.ini
"#;

    let from_toml: ForgeConfig = load_config_str(SAMPLE_TOML, FileFormat::Toml)?;
    let from_yaml: ForgeConfig = load_config_str(yaml, FileFormat::Yaml)?;
    assert_eq!(from_toml, from_yaml);
    Ok(())
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempdir().expect("temp dir");
    let err = load_config::<ForgeConfig>(Some(dir.path().join("absent.toml")))
        .expect_err("missing file should fail");

    assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
    assert!(err.to_string().contains("Failed to build config"));
}

#[test]
fn missing_required_field_is_a_config_error() {
    let content = r#"
[slicer]
location = "/opt/slicer"

[helper_tool]
location = "plater"

[profile_sets]
pla = ["a.ini", "b.ini", "c.ini"]
"#;

    let err = load_config_str::<ForgeConfig>(content, FileFormat::Toml)
        .expect_err("print_server is required");
    assert!(err.to_string().contains("Failed to deserialize inline config"));
}

const CAMEL_CASE_TOML: &str = r#"
slicer = { location = "/Applications/SuperSlicer.app/Contents/MacOS/SuperSlicer" }
printServer = { address = "192.168.1.93" }

[helperTool]
location = "./platerbinary/plater_cli_osx"
plate = { width = 220, height = 200 }

[workspace]
inputDir = "models"

[profileSets]
TitanX = ["printerProfile.ini", "filamentProfile.ini", "printProfile.ini"]
"k3.petg" = ["k3.ini", "petg.ini", "fine.ini"]
"#;

#[test]
fn loads_camel_case_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = write_sample(dir.path(), "forge.toml", CAMEL_CASE_TOML);

    let cfg: ForgeConfig = load_config(Some(&path))?;

    assert_eq!(cfg.print_server_address(), "192.168.1.93");
    assert_eq!(cfg.helper_tool.plate.width, 220);
    assert_eq!(cfg.workspace.input_dir, PathBuf::from("models"));
    assert_eq!(cfg.workspace.output_dir, PathBuf::from("output"));
    assert_eq!(cfg.profile_set_names().collect::<Vec<_>>(), ["TitanX", "k3.petg"]);
    assert_eq!(
        cfg.profile_set("TitanX").and_then(|set| set.print()),
        Some(Path::new("printProfile.ini"))
    );
    Ok(())
}

#[test]
fn snake_case_entry_overrides_camel_case_twin() -> Result<(), Box<dyn std::error::Error>> {
    // The layout a `FORGE__*` override produces on top of a camelCase file.
    let content = r#"
slicer = { location = "/opt/superslicer" }
printServer = { address = "192.168.1.93" }
print_server = { address = "printer.local" }

[helperTool]
location = "./platerbinary/plater_cli_osx"
plate = { width = 220, height = 200 }

[helper_tool.plate]
height = 250

[workspace]
inputDir = "models"
output_dir = "plates"

[profileSets]
TitanX = ["printerProfile.ini", "filamentProfile.ini", "printProfile.ini"]
"#;
    let dir = tempdir()?;
    let path = write_sample(dir.path(), "forge.toml", content);

    let cfg: ForgeConfig = load_config(Some(&path))?;

    assert_eq!(cfg.print_server_address(), "printer.local");
    assert_eq!(cfg.helper_location(), Path::new("./platerbinary/plater_cli_osx"));
    assert_eq!(cfg.helper_tool.plate.width, 220);
    assert_eq!(cfg.helper_tool.plate.height, 250);
    assert_eq!(cfg.workspace.input_dir, PathBuf::from("models"));
    assert_eq!(cfg.workspace.output_dir, PathBuf::from("plates"));
    assert!(cfg.profile_set("TitanX").is_some());
    Ok(())
}
