//! Fabric preset catalog and saved looks
//!
//! The four fabrics are a closed set: each variant carries an immutable bundle
//! of attenuation constants and visual safety limits. Looks (saved control
//! sets) are persisted as YAML, the same way presets are handled elsewhere in
//! the toolchain.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::EffectControls;

/// Immutable physical and safety constants for one fabric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FabricPreset {
    /// Human-readable label
    pub label: &'static str,

    /// Attenuation coefficient; higher means less transmission
    pub density: f32,

    /// Thinnest supported material thickness
    pub thickness_min: f32,

    /// Thickest supported material thickness
    pub thickness_max: f32,

    /// Upper bound on the reveal scalar (0.0-1.0)
    pub max_reveal: f32,

    /// Gain applied to the high-pass detail term
    pub detail_gain: f32,

    /// Tissue scatter blur radius in pixels
    pub blur_radius: u32,

    /// Desaturation applied as detail is revealed (0.0-1.0)
    pub desat: f32,

    /// Grain amplitude (0.0-0.06)
    pub noise: f32,

    /// Per-pixel detail clamp on the 0-255 scale, scaled by reveal
    pub max_delta: f32,
}

impl FabricPreset {
    /// Clamp a thickness into this fabric's supported range.
    pub fn clamp_thickness(&self, thickness: f32) -> f32 {
        thickness.clamp(self.thickness_min, self.thickness_max)
    }

    /// Check the catalog invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.thickness_min >= self.thickness_max {
            return Err(format!(
                "{}: thickness_min {} must be below thickness_max {}",
                self.label, self.thickness_min, self.thickness_max
            ));
        }
        for (name, value) in [
            ("density", self.density),
            ("thickness_min", self.thickness_min),
            ("detail_gain", self.detail_gain),
            ("max_delta", self.max_delta),
        ] {
            if value < 0.0 {
                return Err(format!("{}: {} must be non-negative", self.label, name));
            }
        }
        for (name, value) in [("max_reveal", self.max_reveal), ("desat", self.desat)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{}: {} must be within [0, 1]", self.label, name));
            }
        }
        if !(0.0..=0.06).contains(&self.noise) {
            return Err(format!("{}: noise must be within [0, 0.06]", self.label));
        }
        Ok(())
    }
}

const ESTOFADO: FabricPreset = FabricPreset {
    label: "Upholstery (high density)",
    density: 2.4,
    thickness_min: 0.2,
    thickness_max: 1.6,
    max_reveal: 0.28,
    detail_gain: 0.55,
    blur_radius: 4,
    desat: 0.45,
    noise: 0.018,
    max_delta: 28.0,
};

const CORTINA: FabricPreset = FabricPreset {
    label: "Curtain (medium density)",
    density: 1.5,
    thickness_min: 0.2,
    thickness_max: 1.8,
    max_reveal: 0.42,
    detail_gain: 0.65,
    blur_radius: 3,
    desat: 0.35,
    noise: 0.02,
    max_delta: 34.0,
};

const SEDA: FabricPreset = FabricPreset {
    label: "Silk (low density)",
    density: 0.95,
    thickness_min: 0.15,
    thickness_max: 2.0,
    max_reveal: 0.55,
    detail_gain: 0.7,
    blur_radius: 2,
    desat: 0.28,
    noise: 0.022,
    max_delta: 40.0,
};

const POLIESTER: FabricPreset = FabricPreset {
    label: "Polyester (medium/high density)",
    density: 1.85,
    thickness_min: 0.2,
    thickness_max: 1.9,
    max_reveal: 0.36,
    detail_gain: 0.6,
    blur_radius: 3,
    desat: 0.38,
    noise: 0.02,
    max_delta: 32.0,
};

/// Fabric material key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Fabric {
    /// Upholstery, the densest material
    Estofado,

    /// Curtain
    #[default]
    Cortina,

    /// Silk, the most transmissive material
    Seda,

    /// Polyester
    Poliester,
}

impl Fabric {
    /// Every fabric in catalog order
    pub const ALL: [Fabric; 4] = [
        Fabric::Estofado,
        Fabric::Cortina,
        Fabric::Seda,
        Fabric::Poliester,
    ];

    /// Catalog key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Estofado => "estofado",
            Self::Cortina => "cortina",
            Self::Seda => "seda",
            Self::Poliester => "poliester",
        }
    }

    /// Constants for this fabric
    pub fn preset(&self) -> &'static FabricPreset {
        match self {
            Self::Estofado => &ESTOFADO,
            Self::Cortina => &CORTINA,
            Self::Seda => &SEDA,
            Self::Poliester => &POLIESTER,
        }
    }
}

impl fmt::Display for Fabric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Fabric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Fabric::ALL
            .into_iter()
            .find(|fabric| fabric.key() == key)
            .ok_or_else(|| {
                let keys: Vec<&str> = Fabric::ALL.iter().map(|f| f.key()).collect();
                format!("Unknown fabric '{}' (expected one of: {})", s, keys.join(", "))
            })
    }
}

/// A saved set of controls bound to a fabric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Look {
    /// Name of the look
    pub name: String,

    /// Fabric the controls were tuned for
    #[serde(default)]
    pub fabric: Fabric,

    /// Control values
    #[serde(default)]
    pub controls: EffectControls,

    /// Optional notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Validate a look name to prevent path traversal attacks.
pub fn validate_look_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Look name cannot be empty".to_string());
    }
    if name.contains('/') || name.contains('\\') {
        return Err("Look name cannot contain path separators".to_string());
    }
    if name.contains("..") {
        return Err("Look name cannot contain '..'".to_string());
    }
    if name.starts_with('.') {
        return Err("Look name cannot start with '.'".to_string());
    }
    if name.contains('\0') {
        return Err("Look name cannot contain null bytes".to_string());
    }
    Ok(())
}

/// Load a look from a YAML file, sanitizing its controls.
pub fn load_look<P: AsRef<Path>>(path: P) -> Result<Look, String> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read look file: {}", e))?;

    let mut look: Look =
        serde_yaml::from_str(&contents).map_err(|e| format!("Failed to parse look YAML: {}", e))?;
    validate_look_name(&look.name)?;
    look.controls.sanitize();
    Ok(look)
}

/// Save a look to a YAML file
pub fn save_look<P: AsRef<Path>>(look: &Look, path: P) -> Result<(), String> {
    validate_look_name(&look.name)?;
    let yaml = serde_yaml::to_string(look).map_err(|e| format!("Failed to serialize look: {}", e))?;

    std::fs::write(path.as_ref(), yaml).map_err(|e| format!("Failed to write look file: {}", e))
}

/// Get the default looks directory, creating it if needed.
pub fn get_looks_dir() -> Result<std::path::PathBuf, String> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| "Could not determine home directory".to_string())?;

    let looks_dir = home_dir.join("velum").join("looks");

    if !looks_dir.exists() {
        std::fs::create_dir_all(&looks_dir)
            .map_err(|e| format!("Failed to create looks directory: {}", e))?;
    }

    Ok(looks_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_catalog_invariants_hold() {
        for fabric in Fabric::ALL {
            fabric
                .preset()
                .validate()
                .unwrap_or_else(|e| panic!("{} failed validation: {}", fabric, e));
        }
    }

    #[test]
    fn test_fabric_parse_roundtrip() {
        for fabric in Fabric::ALL {
            assert_eq!(fabric.key().parse::<Fabric>().unwrap(), fabric);
        }
        assert_eq!(" SEDA ".parse::<Fabric>().unwrap(), Fabric::Seda);
    }

    #[test]
    fn test_fabric_parse_unknown_lists_keys() {
        let err = "linen".parse::<Fabric>().unwrap_err();
        assert!(err.contains("estofado") && err.contains("poliester"), "{}", err);
    }

    #[test]
    fn test_clamp_thickness() {
        let preset = Fabric::Seda.preset();
        assert_eq!(preset.clamp_thickness(0.0), 0.15);
        assert_eq!(preset.clamp_thickness(9.0), 2.0);
        assert_eq!(preset.clamp_thickness(1.0), 1.0);
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut preset = *Fabric::Cortina.preset();
        preset.thickness_min = 2.0;
        assert!(preset.validate().is_err());
    }

    #[test]
    fn test_default_fabric_is_cortina() {
        assert_eq!(Fabric::default(), Fabric::Cortina);
    }

    #[test]
    fn test_validate_look_name() {
        assert!(validate_look_name("soft-silk").is_ok());
        assert!(validate_look_name("").is_err());
        assert!(validate_look_name("../etc").is_err());
        assert!(validate_look_name("a/b").is_err());
        assert!(validate_look_name(".hidden").is_err());
    }

    #[test]
    fn test_look_save_load_sanitizes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("look.yml");

        let mut look = Look {
            name: "strong".to_string(),
            fabric: Fabric::Seda,
            controls: EffectControls::default(),
            notes: Some("test".to_string()),
        };
        look.controls.clarity = 0.4;
        save_look(&look, &path).unwrap();

        let loaded = load_look(&path).unwrap();
        assert_eq!(loaded, look);

        std::fs::write(
            &path,
            "name: hot\nfabric: estofado\ncontrols:\n  contrast: 3.0\n",
        )
        .unwrap();
        let loaded = load_look(&path).unwrap();
        assert_eq!(loaded.fabric, Fabric::Estofado);
        assert_eq!(loaded.controls.contrast, 1.0);
        assert_eq!(loaded.controls.intensity, 1.0);
    }
}
