use anyhow::{Context, Result, bail};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Entry modules the viewer builds pipelines from.
pub const MESH_SHADER: &str = "mesh";
pub const LAMP_SHADER: &str = "lamp";
pub const SKYBOX_SHADER: &str = "skybox";

const EMBEDDED: &[(&str, &str)] = &[
    ("common::camera", include_str!("wgsl/common/camera.wgsl")),
    ("common::lighting", include_str!("wgsl/common/lighting.wgsl")),
    ("common::object", include_str!("wgsl/common/object.wgsl")),
    (MESH_SHADER, include_str!("wgsl/mesh.wgsl")),
    (LAMP_SHADER, include_str!("wgsl/lamp.wgsl")),
    (SKYBOX_SHADER, include_str!("wgsl/skybox.wgsl")),
];

/// WGSL shader composer that resolves `// #import module_name` directives.
///
/// The shaders are compiled into the binary; a directory of `.wgsl` files can
/// be layered on top to edit them without rebuilding.
pub struct ShaderComposer {
    modules: HashMap<String, String>,
}

impl ShaderComposer {
    pub fn embedded() -> Self {
        let modules = EMBEDDED
            .iter()
            .map(|(name, src)| (name.to_string(), src.to_string()))
            .collect();
        Self { modules }
    }

    /// Embedded shaders, overridden by any `.wgsl` found under `dir`.
    pub fn with_overrides(dir: &Path) -> Result<Self> {
        let mut composer = Self::embedded();
        if dir.is_dir() {
            let before = composer.modules.len();
            Self::load_dir(dir, dir, &mut composer.modules)?;
            log::info!(
                "Loaded shader overrides from {} ({} new modules)",
                dir.display(),
                composer.modules.len() - before
            );
        }
        Ok(composer)
    }

    fn load_dir(base: &Path, dir: &Path, modules: &mut HashMap<String, String>) -> Result<()> {
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read shader directory: {}", dir.display()))?
        {
            let path = entry?.path();
            if path.is_dir() {
                Self::load_dir(base, &path, modules)?;
            } else if path.extension().is_some_and(|ext| ext == "wgsl") {
                let source = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read shader: {}", path.display()))?;
                modules.insert(Self::path_to_module_name(base, &path), source);
            }
        }
        Ok(())
    }

    /// `base/common/camera.wgsl` -> `common::camera`
    fn path_to_module_name(base: &Path, path: &Path) -> String {
        let relative = path.strip_prefix(base).unwrap_or(path);
        relative
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("::")
    }

    /// Compose `entry_module` with every import inlined once, dependencies first.
    pub fn compose(&self, entry_module: &str) -> Result<String> {
        let mut output = String::new();
        let mut done = HashSet::new();
        let mut stack = Vec::new();
        self.resolve(entry_module, &mut output, &mut done, &mut stack)?;
        Ok(output)
    }

    fn resolve(
        &self,
        module_name: &str,
        output: &mut String,
        done: &mut HashSet<String>,
        stack: &mut Vec<String>,
    ) -> Result<()> {
        if done.contains(module_name) {
            return Ok(());
        }
        if stack.iter().any(|m| m == module_name) {
            bail!(
                "Circular shader import: {} -> {module_name}",
                stack.join(" -> ")
            );
        }

        let source = self
            .modules
            .get(module_name)
            .with_context(|| format!("Shader module not found: {module_name}"))?;

        stack.push(module_name.to_string());
        let mut body = String::new();
        for line in source.lines() {
            if let Some(import) = line.trim().strip_prefix("// #import ") {
                self.resolve(import.trim(), output, done, stack)?;
            } else {
                body.push_str(line);
                body.push('\n');
            }
        }
        stack.pop();

        done.insert(module_name.to_string());
        output.push_str(&body);
        output.push('\n');
        Ok(())
    }

    pub fn register(&mut self, name: &str, source: &str) {
        self.modules.insert(name.to_string(), source.to_string());
    }

    /// Override directory: `shaders/` next to the executable, else `./src/shaders/wgsl`.
    pub fn shader_dir() -> PathBuf {
        let bundled = crate::constants::resolve_data_path("shaders");
        if bundled.is_dir() {
            return bundled;
        }
        PathBuf::from("src/shaders/wgsl")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_composer(entries: &[(&str, &str)]) -> ShaderComposer {
        let mut composer = ShaderComposer {
            modules: HashMap::new(),
        };
        for &(name, src) in entries {
            composer.register(name, src);
        }
        composer
    }

    #[test]
    fn test_import_resolution() {
        let composer = make_composer(&[
            ("utils", "fn helper() -> f32 { return 1.0; }"),
            ("main", "// #import utils\nfn main() { let x = helper(); }"),
        ]);

        let result = composer.compose("main").unwrap();
        assert!(!result.contains("#import"));
        assert!(result.find("fn helper()").unwrap() < result.find("fn main()").unwrap());
    }

    #[test]
    fn test_deduplication() {
        let composer = make_composer(&[
            ("base", "fn base_fn() {}"),
            ("a", "// #import base\nfn a_fn() {}"),
            ("b", "// #import base\nfn b_fn() {}"),
            ("main", "// #import a\n// #import b\nfn main_fn() {}"),
        ]);

        let result = composer.compose("main").unwrap();
        assert_eq!(result.matches("fn base_fn()").count(), 1);
    }

    #[test]
    fn test_cycle_is_an_error() {
        let composer = make_composer(&[("a", "// #import b\n"), ("b", "// #import a\n")]);
        let err = composer.compose("a").unwrap_err().to_string();
        assert!(err.contains("Circular"), "{err}");
    }

    #[test]
    fn test_missing_module() {
        let composer = make_composer(&[("main", "// #import nowhere\n")]);
        assert!(composer.compose("main").is_err());
    }

    #[test]
    fn test_module_name_from_path() {
        let base = Path::new("shaders");
        assert_eq!(
            ShaderComposer::path_to_module_name(base, &base.join("common").join("camera.wgsl")),
            "common::camera"
        );
        assert_eq!(
            ShaderComposer::path_to_module_name(base, &base.join("mesh.wgsl")),
            "mesh"
        );
    }

    #[test]
    fn test_embedded_entries_compose() {
        let composer = ShaderComposer::embedded();
        for entry in [MESH_SHADER, LAMP_SHADER, SKYBOX_SHADER] {
            let src = composer.compose(entry).unwrap();
            assert_eq!(src.matches("struct Camera").count(), 1, "{entry}");
            assert!(src.contains("fn vs_main"));
            assert!(src.contains("fn fs_main"));
        }
        let mesh = composer.compose(MESH_SHADER).unwrap();
        assert!(mesh.contains("struct Lights"));
        assert_eq!(mesh.matches("struct Object").count(), 1);
    }
}
