//! Shared test infrastructure for integration tests.
//!
//! A [`FactoryFixture`] is a scratch project directory holding a product table,
//! a fake DITA-OT launcher and a fake LM command, so `dfac` runs end to end
//! without network access or a Java toolchain.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const PRODUCTS_CSV: &str = "\
ProductID,ProductName,Voltage,MaxSpeed,Weight
P-1,Breeze Fan,220V,1200rpm,2kg
F-800,Storm Fan,110V,,5kg
";

/// Fails every topic whose path mentions `F-800`.
const FAKE_DITA: &str = r#"#!/bin/sh
case "$3" in
  *F-800*) echo "unclosed tag" >&2; exit 1 ;;
esac
echo "valid: $3"
"#;

const FAKE_LM: &str = "#!/bin/sh\ncat >/dev/null\necho '<p>Generated summary.</p>'\n";

pub struct FactoryFixture {
    dir: TempDir,
}

impl FactoryFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let fixture = Self { dir };
        fixture.write("product_specs.csv", PRODUCTS_CSV);
        fixture.write_script("dita-ot/bin/dita", FAKE_DITA);
        fixture.write_script("fake-lm.sh", FAKE_LM);
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dir");
        }
        fs::write(&path, contents).expect("write fixture file");
    }

    pub fn write_script(&self, rel: &str, contents: &str) {
        self.write(rel, contents);
        fs::set_permissions(self.path(rel), fs::Permissions::from_mode(0o755))
            .expect("chmod fixture script");
    }

    /// `dfac` isolated from the caller's environment and user config.
    pub fn command(&self) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_dfac"));
        command
            .current_dir(self.root())
            .env("HOME", self.root())
            .env("XDG_CONFIG_HOME", self.root().join(".config"))
            .env_remove("GEMINI_API_KEY")
            .env_remove("DITA_FACTORY_LM_COMMAND")
            .env_remove("RUST_LOG");
        command
    }

    /// `dfac run` with the fake LM and validator and no inter-call delay.
    pub fn run_factory(&self, extra: &[&str]) -> Output {
        let lm = self.path("fake-lm.sh");
        self.command()
            .args(["run", "--generator", "command", "--delay-ms", "0"])
            .arg("--lm")
            .arg(&lm)
            .arg("--dita-ot-dir")
            .arg(self.path("dita-ot"))
            .args(extra)
            .output()
            .expect("run dfac")
    }

    pub fn report_rows(&self) -> Vec<Vec<String>> {
        let mut reader = csv::Reader::from_path(self.path("report/quality_report.csv"))
            .expect("open report");
        let headers = reader.headers().expect("report headers").clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            [
                "ProductID",
                "DITAType",
                "FilePath",
                "ValidationStatus",
                "ErrorMessage"
            ]
        );
        reader
            .records()
            .map(|record| {
                record
                    .expect("report record")
                    .iter()
                    .map(str::to_string)
                    .collect()
            })
            .collect()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
