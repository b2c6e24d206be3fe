//! Collision configuration resource.
//!
//! Holds the switch for the built-in collision response and the
//! [`CollisionMatrix`]. Values can be loaded from an INI file; anything
//! missing keeps its current value.
//!
//! # Configuration File Format
//!
//! ```ini
//! [collision]
//! enable_response = true
//!
//! [matrix]
//! enemy/enemy = true
//! player/pickup = false
//! ```
//!
//! Matrix keys are two layer names separated by `/`. Layer names are the
//! snake_case names of [`CollisionLayer`].

use std::path::Path;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};

use crate::components::collisionlayer::CollisionLayer;
use crate::resources::collisionmatrix::CollisionMatrix;

const SECTION_COLLISION: &str = "collision";
const SECTION_MATRIX: &str = "matrix";
const KEY_ENABLE_RESPONSE: &str = "enable_response";

/// Collision settings shared by the detector and the response.
///
/// Response is off by default: most games react to collisions in their own
/// observers (score, bounce, damage) rather than through impulses.
#[derive(Resource, Debug, Clone, Default)]
pub struct CollisionConfig {
    pub enable_collision_response: bool,
    pub matrix: CollisionMatrix,
}

impl CollisionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, enabled: bool) -> Self {
        self.enable_collision_response = enabled;
        self
    }

    pub fn with_matrix(mut self, matrix: CollisionMatrix) -> Self {
        self.matrix = matrix;
        self
    }

    /// Load settings from an INI file.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|e| format!("Failed to load collision config {:?}: {}", path, e))?;
        self.apply_ini(&config);
        info!(
            "Loaded collision config from {:?}: response={}, {} allowed layer pairs",
            path,
            self.enable_collision_response,
            self.matrix.allowed_pairs().count()
        );
        Ok(())
    }

    /// Load settings from INI text.
    pub fn load_from_str(&mut self, contents: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(contents.to_string())
            .map_err(|e| format!("Failed to parse collision config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        match config.getbool(SECTION_COLLISION, KEY_ENABLE_RESPONSE) {
            Ok(Some(enabled)) => self.enable_collision_response = enabled,
            Ok(None) => {}
            Err(e) => warn!("Ignoring [{}] {}: {}", SECTION_COLLISION, KEY_ENABLE_RESPONSE, e),
        }

        let Some(entries) = config.get_map_ref().get(SECTION_MATRIX) else {
            return;
        };
        let mut keys: Vec<&String> = entries.keys().collect();
        keys.sort();
        for key in keys {
            let value = entries.get(key).cloned().flatten();
            match parse_matrix_entry(key, value.as_deref()) {
                Ok((a, b, allowed)) => self.matrix.set_collision(a, b, allowed),
                Err(e) => warn!("Ignoring [{}] {}: {}", SECTION_MATRIX, key, e),
            }
        }
    }

    /// Save the response flag and every allowed pair to an INI file.
    ///
    /// Pairs are written as explicit `true`/`false` entries for the whole
    /// table, so the saved file reproduces this matrix regardless of defaults.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.set(
            SECTION_COLLISION,
            KEY_ENABLE_RESPONSE,
            Some(self.enable_collision_response.to_string()),
        );
        for (i, a) in CollisionLayer::ALL.iter().enumerate() {
            for b in &CollisionLayer::ALL[i..] {
                let key = format!("{}/{}", a.name(), b.name());
                config.set(
                    SECTION_MATRIX,
                    &key,
                    Some(self.matrix.can_collide(*a, *b).to_string()),
                );
            }
        }
        config
            .write(path)
            .map_err(|e| format!("Failed to save collision config {:?}: {}", path, e))?;
        info!("Saved collision config to {:?}", path);
        Ok(())
    }
}

fn parse_matrix_entry(
    key: &str,
    value: Option<&str>,
) -> Result<(CollisionLayer, CollisionLayer, bool), String> {
    let (a, b) = key
        .split_once('/')
        .ok_or_else(|| "expected '<layer>/<layer>'".to_string())?;
    let a: CollisionLayer = a.parse()?;
    let b: CollisionLayer = b.parse()?;
    let allowed = match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "yes" | "on" | "1") => true,
        Some("false" | "no" | "off" | "0") => false,
        Some(other) => return Err(format!("'{}' is not a boolean", other)),
        None => return Err("missing value".to_string()),
    };
    Ok((a, b, allowed))
}
