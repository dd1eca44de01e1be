use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locates the path under which the invoking crate sees another crate of
/// this workspace, by reading the invoking crate's `Cargo.toml`.
///
/// Generated code must name the mapping engine with a path that is valid in
/// the crate where the derive is expanded, which may depend on the engine
/// directly, through the `dobj` facade, or under a renamed key.
///
/// # Example
///
/// ```rust
/// # use dobj_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("dobj_mapper"));
/// ```
///
/// # Resolution rules
///
/// 1. A dependency whose key, or whose `package = "..."` field, equals the
///    requested name resolves to `::key` (dashes become underscores).
/// 2. A requested name beginning with `dobj_`, when the facade crate `dobj`
///    is a dependency, resolves to `::dobj::short_name`
///    (e.g. `dobj_mapper` -> `::dobj::mapper`).
/// 3. Steps 1-2 are repeated for `dev-dependencies`.
/// 4. Otherwise the absolute path `::name` is returned.
///
/// The engine crate refers to itself as `::dobj_mapper` through
/// `extern crate self as dobj_mapper;`, which is what rule 4 produces.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "dobj";
const CRATE_PREFIX: &str = "dobj_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map(|path| {
                let mut path = PathBuf::from(path);
                path.push("Cargo.toml");
                assert!(
                    path.exists(),
                    "Cargo manifest does not exist at path {}",
                    path.display(),
                );
                path
            })
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.")
    }

    #[inline(never)]
    fn get_manifest_modified_time(
        cargo_manifest_path: &Path,
    ) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(cargo_manifest_path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    #[inline]
    fn absolute(segments: &[&str]) -> syn::Path {
        let joined = segments.join("::");
        syn::parse_str(&format!("::{joined}"))
            .unwrap_or_else(|_| panic!("`::{joined}` is not a valid path"))
    }

    // Finds the key under which `name` is declared, following `package` renames.
    fn dependency_key<'t>(deps: &'t Table, name: &str) -> Option<&'t str> {
        deps.iter().find_map(|(key, item)| {
            let package = item.get("package").and_then(Item::as_str);
            (key == name || package == Some(name)).then_some(key)
        })
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if let Some(key) = Self::dependency_key(deps, name) {
            return Some(Self::absolute(&[&key.replace('-', "_")]));
        }

        let short = name.strip_prefix(CRATE_PREFIX)?;
        let facade = Self::dependency_key(deps, FACADE_NAME)?;
        Some(Self::absolute(&[&facade.replace('-', "_"), short]))
    }

    /// Returns a [`syn::Path`] for the crate `name` as seen from the invoking
    /// crate. See the type-level documentation for the rules.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(path) = Self::find_in_deps(deps, name)
            {
                return path;
            }
        }

        Self::absolute(&[name])
    }

    /// Runs `func` with the [`Manifest`] of the invoking crate.
    ///
    /// Manifests are cached per path and re-read when the file's modified time
    /// changes. Call this once per macro invocation and pass the resulting
    /// path around.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use toml_edit::Document;

    use super::Manifest;

    fn path_string(path: &syn::Path) -> String {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        format!("::{}", segments.join("::"))
    }

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(Box::<str>::from(text)).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\ndobj_mapper = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("dobj_mapper")), "::dobj_mapper");
    }

    #[test]
    fn through_facade() {
        let m = manifest("[dependencies]\ndobj = { path = \"../..\" }\n");
        assert_eq!(path_string(&m.get_crate_path("dobj_mapper")), "::dobj::mapper");
    }

    #[test]
    fn renamed_dependency() {
        let m = manifest("[dependencies]\nmapper = { package = \"dobj_mapper\", version = \"0.0.1\" }\n");
        assert_eq!(path_string(&m.get_crate_path("dobj_mapper")), "::mapper");
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let m = manifest("[dev-dependencies]\ndobj = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("dobj_mapper")), "::dobj::mapper");

        let empty = manifest("[package]\nname = \"app\"\n");
        assert_eq!(path_string(&empty.get_crate_path("dobj_mapper")), "::dobj_mapper");
    }
}
