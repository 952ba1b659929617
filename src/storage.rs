use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save a legend layout (a `LegendSpec`, a `Scene`, …) as pretty JSON.
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Read a JSON document such as a `ScaleDescriptor` or `LegendConfig`.
pub fn load_json<T: serde::de::DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{ColorScale, ContinuousScale};
    use crate::style::{BLACK, WHITE};
    use crate::viz::{self, LegendConfig, Scene};
    use tempfile::tempdir;

    #[test]
    fn write_scene_json() {
        let dir = tempdir().unwrap();
        let jsonp = dir.path().join("scene.json");
        let scale: ColorScale = ContinuousScale::linear(0.0, 1.0, BLACK, WHITE)
            .unwrap()
            .into();
        let mut scene = Scene::new(220, 50);
        viz::render(&mut scene, &scale, &LegendConfig::default()).unwrap();
        save_json(&scene, &jsonp).unwrap();
        let back: Scene = load_json(&jsonp).unwrap();
        assert_eq!(back.groups.len(), 2);
        assert_eq!(back.primitive_count(), scene.primitive_count());
        assert_eq!(back.groups[0].class, viz::COLORBAR_CLASS);
    }

    #[test]
    fn missing_file_has_context() {
        let err = load_json::<LegendConfig, _>("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("reading"));
    }
}
