use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::slice;
use std::sync::Arc;

/// Everything the orchestrator needs to drive the slicing toolchain.
///
/// Files use snake_case keys so `FORGE__*` environment overrides land on the same
/// fields. The camelCase spelling is accepted on input and used on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ForgeConfigInner {
    pub slicer: SlicerConfig,
    #[serde(alias = "printServer")]
    pub print_server: PrintServerConfig,
    #[serde(alias = "helperTool")]
    pub helper_tool: HelperToolConfig,
    #[serde(alias = "profileSets")]
    pub profile_sets: BTreeMap<String, ProfileSet>,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

/// Read-only, Arc-wrapped config for inexpensive cloning into consumers.
///
/// No `DerefMut`: the record is immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForgeConfig {
    inner: Arc<ForgeConfigInner>,
}

impl ForgeConfig {
    #[must_use]
    pub fn new(inner: ForgeConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl From<ForgeConfigInner> for ForgeConfig {
    fn from(inner: ForgeConfigInner) -> Self {
        Self::new(inner)
    }
}

impl Deref for ForgeConfig {
    type Target = ForgeConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl ForgeConfigInner {
    /// Path to the slicer executable.
    #[must_use]
    pub fn slicer_location(&self) -> &Path {
        &self.slicer.location
    }

    /// Host of the print server (no scheme, no port).
    #[must_use]
    pub fn print_server_address(&self) -> &str {
        &self.print_server.address
    }

    /// Path to the plater helper executable.
    #[must_use]
    pub fn helper_location(&self) -> &Path {
        &self.helper_tool.location
    }

    #[must_use]
    pub const fn profile_sets(&self) -> &BTreeMap<String, ProfileSet> {
        &self.profile_sets
    }

    /// Looks up a profile set by name.
    ///
    /// `None` means the name is not defined; a defined set is returned as stored,
    /// even if it happens to be empty.
    #[must_use]
    pub fn profile_set(&self, name: &str) -> Option<&ProfileSet> {
        self.profile_sets.get(name)
    }

    /// Names of all defined profile sets, sorted.
    pub fn profile_set_names(&self) -> impl Iterator<Item = &str> {
        self.profile_sets.keys().map(String::as_str)
    }
}

/// Slicer binary settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlicerConfig {
    pub location: PathBuf,
}

/// Remote print-management service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintServerConfig {
    pub address: String,
}

/// Plater helper binary settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelperToolConfig {
    pub location: PathBuf,
    #[serde(default)]
    pub plate: PlateConfig,
}

/// Build plate dimensions passed to the plater, in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateConfig {
    pub width: u32,
    pub height: u32,
    pub spacing: f64,
}

/// Directories the orchestrator reads models from and writes plates to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct WorkspaceConfig {
    #[serde(alias = "inputDir")]
    pub input_dir: PathBuf,
    #[serde(alias = "outputDir")]
    pub output_dir: PathBuf,
}

/// Ordered profile paths for one slicing setup.
///
/// By convention the order is printer, filament, print. The length is not fixed;
/// the positional helpers return `None` when the set is shorter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileSet(Vec<PathBuf>);

impl ProfileSet {
    pub const PRINTER: usize = 0;
    pub const FILAMENT: usize = 1;
    pub const PRINT: usize = 2;

    #[must_use]
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self(paths)
    }

    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.0.get(index).map(PathBuf::as_path)
    }

    /// Printer profile (first entry).
    #[must_use]
    pub fn printer(&self) -> Option<&Path> {
        self.get(Self::PRINTER)
    }

    /// Filament profile (second entry).
    #[must_use]
    pub fn filament(&self) -> Option<&Path> {
        self.get(Self::FILAMENT)
    }

    /// Print profile (third entry).
    #[must_use]
    pub fn print(&self) -> Option<&Path> {
        self.get(Self::PRINT)
    }

    pub fn iter(&self) -> slice::Iter<'_, PathBuf> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ProfileSet {
    type Item = &'a PathBuf;
    type IntoIter = slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for ProfileSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<PathBuf>> for ProfileSet {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self(paths)
    }
}

// --- Default ---

impl Default for PlateConfig {
    fn default() -> Self {
        Self { width: 150, height: 150, spacing: 2.0 }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self { input_dir: PathBuf::from("input"), output_dir: PathBuf::from("output") }
    }
}
