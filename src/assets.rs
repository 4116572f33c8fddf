//! Asset lookup with placeholder fallback
//!
//! Images live under `<root>/images/`, sounds under `<root>/sounds/`. A
//! missing image becomes a flat-colored 100x100 placeholder and a missing
//! sound becomes `None`; both are logged and neither is an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::content::Roster;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const PLACEHOLDER_SIZE: u32 = 100;

/// A loaded (or stand-in) image, already scaled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub name: String,
    pub path: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    /// Fill color when the file could not be loaded
    pub placeholder: Option<[u8; 3]>,
}

impl Image {
    /// Flat-colored stand-in. The color is derived from the name so the same
    /// missing asset always looks the same.
    pub fn placeholder(name: &str) -> Self {
        let hash = fnv1a(name.as_bytes());
        Self {
            name: name.to_string(),
            path: None,
            width: PLACEHOLDER_SIZE,
            height: PLACEHOLDER_SIZE,
            placeholder: Some([(hash >> 16) as u8, (hash >> 8) as u8, hash as u8]),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }
}

/// Raw sound file contents, decoded by the audio backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sound {
    pub name: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0x811c_9dc5u32, |h, &b| {
        (h ^ b as u32).wrapping_mul(0x0100_0193)
    })
}

/// Width and height from a PNG header
fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    Some((width, height))
}

/// Resolves asset names against a root directory
#[derive(Debug, Clone)]
pub struct AssetProvider {
    root: PathBuf,
}

impl AssetProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load `images/<name>` scaled by `scale`
    pub fn load_image(&self, name: &str, scale: f32) -> Image {
        let path = self.root.join("images").join(name);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Cannot find image file {}: {}", path.display(), e);
                return Image::placeholder(name);
            }
        };
        let Some((width, height)) = png_dimensions(&bytes) else {
            log::warn!("Cannot load image {}: not a PNG", path.display());
            return Image::placeholder(name);
        };

        let (width, height) = if scale != 1.0 {
            (
                (width as f32 * scale) as u32,
                (height as f32 * scale) as u32,
            )
        } else {
            (width, height)
        };
        log::debug!("Loaded image {} ({}x{})", name, width, height);
        Image {
            name: name.to_string(),
            path: Some(path),
            width,
            height,
            placeholder: None,
        }
    }

    /// Load `sounds/<name>`, or `None` if it is missing
    pub fn load_sound(&self, name: &str) -> Option<Sound> {
        let path = self.root.join("sounds").join(name);
        match std::fs::read(&path) {
            Ok(bytes) => Some(Sound {
                name: name.to_string(),
                path,
                bytes,
            }),
            Err(e) => {
                log::warn!("Cannot find sound file {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Every image a scene draws
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub player: Image,
    /// `None` means the renderer paints the default gradient seabed
    pub background: Option<Image>,
    /// Keyed by sprite file name
    pub creatures: HashMap<String, Image>,
}

impl SceneAssets {
    pub const PLAYER_IMAGE: &'static str = "player.png";
    pub const PLAYER_SCALE: f32 = 0.15;
    pub const BACKGROUND_IMAGE: &'static str = "ocean_bg.png";

    pub fn load(provider: &AssetProvider, roster: &Roster) -> Self {
        let background = provider.load_image(Self::BACKGROUND_IMAGE, 1.0);
        let creatures = roster
            .creatures
            .iter()
            .map(|spec| {
                (
                    spec.sprite.clone(),
                    provider.load_image(&spec.sprite, spec.sprite_scale),
                )
            })
            .collect();
        Self {
            player: provider.load_image(Self::PLAYER_IMAGE, Self::PLAYER_SCALE),
            background: (!background.is_placeholder()).then_some(background),
            creatures,
        }
    }

    /// Sprite for a creature, falling back to a placeholder for unknown names
    pub fn creature(&self, sprite: &str) -> Image {
        self.creatures
            .get(sprite)
            .cloned()
            .unwrap_or_else(|| Image::placeholder(sprite))
    }
}
