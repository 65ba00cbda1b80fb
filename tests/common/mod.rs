//! Common test utilities for msipack integration tests

use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Deployment script template used by fixture sites
pub const SCRIPT_TEMPLATE: &str = "\
[String]$appName = 'Example App'
[String]$appVersion = 'x.y.z'
[String]$appArch = 'x64'

Start-ADTMsiProcess -Action 'Install' -FilePath 'placeholder.msi' -ArgumentList '/qn REBOOT=ReallySuppress'

Remove-ADTRegistryKey -Key 'HKLM:\\SOFTWARE\\WOW6432Node\\Microsoft\\Active Setup\\Installed Components\\{00000000-0000-0000-0000-000000000000}'
Remove-ADTRegistryKey -Key 'HKLM:\\SOFTWARE\\Microsoft\\Active Setup\\Installed Components\\{00000000-0000-0000-0000-000000000000}'
";

/// A packaging site for integration tests: template tree, script source,
/// destination root and configuration file under one temp directory
#[allow(dead_code)]
pub struct TestSite {
    /// Temporary directory
    pub temp: TempDir,
    /// Site root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestSite {
    /// Create a site with template tree, script source and msipack.yaml
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let site = Self { temp, path };

        let template = site.template_dir();
        std::fs::create_dir_all(template.join("Files")).expect("Failed to create template");
        std::fs::create_dir_all(template.join("SupportFiles")).expect("Failed to create template");
        std::fs::write(template.join("SupportFiles").join("app.cfg"), "key=value\n")
            .expect("Failed to write template file");
        std::fs::write(template.join(".hidden"), "hidden\n").expect("Failed to write hidden file");
        std::fs::write(template.join("Invoke-AppDeployToolkit.ps1"), "# stale template copy\n")
            .expect("Failed to write stale script");

        site.write_script_source(SCRIPT_TEMPLATE);
        site.write_config("");
        site
    }

    pub fn template_dir(&self) -> PathBuf {
        self.path.join("template")
    }

    pub fn script_source(&self) -> PathBuf {
        self.path.join("Invoke-AppDeployToolkit.ps1")
    }

    pub fn destination_root(&self) -> PathBuf {
        self.path.join("packages")
    }

    pub fn config_path(&self) -> PathBuf {
        self.path.join("msipack.yaml")
    }

    /// Write the deployment script source
    pub fn write_script_source(&self, content: &str) {
        std::fs::write(self.script_source(), content).expect("Failed to write script source");
    }

    /// Write msipack.yaml, appending extra configuration lines verbatim
    pub fn write_config(&self, extra: &str) {
        let yaml = format!(
            "template_dir: \"{}\"\n\
             script_source: \"{}\"\n\
             destination_root: \"{}\"\n\
             {extra}",
            self.template_dir().display(),
            self.script_source().display(),
            self.destination_root().display(),
        );
        std::fs::write(self.config_path(), yaml).expect("Failed to write config");
    }

    /// Fabricate an installer payload at `payloads/<version>/<name>`
    pub fn make_payload(&self, version: &str, name: &str, product_code: &str) -> PathBuf {
        let dir = self.path.join("payloads").join(version);
        std::fs::create_dir_all(&dir).expect("Failed to create payload directory");
        let payload = dir.join(name);
        write_fixture_msi(&payload, &[("ProductCode", product_code)]);
        payload
    }

    /// Read a file under the site root
    pub fn read_file(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path.join(rel)).expect("Failed to read file")
    }

    /// Check a path under the site root
    pub fn exists(&self, rel: &str) -> bool {
        self.path.join(rel).exists()
    }
}

/// Build a minimal Windows Installer database holding the given properties
#[allow(dead_code)]
pub fn write_fixture_msi(path: &Path, properties: &[(&str, &str)]) {
    let cursor = Cursor::new(Vec::new());
    let mut package =
        msi::Package::create(msi::PackageType::Installer, cursor).expect("Failed to create msi");
    package
        .create_table(
            "Property",
            vec![
                msi::Column::build("Property").primary_key().string(72),
                msi::Column::build("Value").string(255),
            ],
        )
        .expect("Failed to create Property table");
    let mut insert = msi::Insert::into("Property");
    for (key, value) in properties {
        insert = insert.row(vec![msi::Value::from(*key), msi::Value::from(*value)]);
    }
    package.insert_rows(insert).expect("Failed to insert properties");
    let cursor = package.into_inner().expect("Failed to finish msi");
    std::fs::write(path, cursor.into_inner()).expect("Failed to write msi");
}

/// Sorted relative listing of a directory tree, for mutation checks
#[allow(dead_code)]
pub fn snapshot_tree(root: &Path) -> Vec<String> {
    if !root.exists() {
        return Vec::new();
    }
    let mut entries: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter_map(|e| {
            e.path()
                .strip_prefix(root)
                .ok()
                .map(|p| p.display().to_string())
        })
        .filter(|p| !p.is_empty())
        .collect();
    entries.sort();
    entries
}
