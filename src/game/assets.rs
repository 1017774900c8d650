use std::path::{Path, PathBuf};

use bevy::{
    prelude::*,
    utils::HashMap,
};
use thiserror::Error;

pub(super) fn plugin(app: &mut App) {
    app.register_type::<HandleMap<ImageKey>>();
    app.init_resource::<HandleMap<ImageKey>>();

    app.register_type::<HandleMap<SfxKey>>();
    app.init_resource::<HandleMap<SfxKey>>();
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Reflect)]
pub enum ImageKey {
    Food,
}

impl ImageKey {
    pub const ALL: [ImageKey; 1] = [ImageKey::Food];

    pub fn path(self) -> &'static str {
        match self {
            ImageKey::Food => "images/food.png",
        }
    }
}

impl AssetKey for ImageKey {
    type Asset = Image;
}

impl FromWorld for HandleMap<ImageKey> {
    fn from_world(world: &mut World) -> Self {
        let asset_server = world.resource::<AssetServer>();
        HandleMap(
            ImageKey::ALL
                .into_iter()
                .map(|key| (key, asset_server.load(key.path())))
                .collect(),
        )
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Reflect)]
pub enum SfxKey {
    Eat,
    WallHit,
}

impl SfxKey {
    pub const ALL: [SfxKey; 2] = [SfxKey::Eat, SfxKey::WallHit];

    pub fn path(self) -> &'static str {
        match self {
            SfxKey::Eat     => "audio/sfx/eat.wav",
            SfxKey::WallHit => "audio/sfx/wall.wav",
        }
    }
}

impl AssetKey for SfxKey {
    type Asset = AudioSource;
}

impl FromWorld for HandleMap<SfxKey> {
    fn from_world(world: &mut World) -> Self {
        let asset_server = world.resource::<AssetServer>();
        HandleMap(
            SfxKey::ALL
                .into_iter()
                .map(|key| (key, asset_server.load(key.path())))
                .collect(),
        )
    }
}

pub trait AssetKey: Sized {
    type Asset: Asset;
}

#[derive(Resource, Reflect, Deref, DerefMut)]
#[reflect(Resource)]
pub struct HandleMap<K: AssetKey>(HashMap<K, Handle<K::Asset>>);



#[derive(Debug, Error, PartialEq)]
pub enum AssetError {
    #[error("asset not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Every asset file the game loads, relative to the asset root.
pub fn required_asset_paths() -> impl Iterator<Item = &'static str> {
    ImageKey::ALL
        .into_iter()
        .map(ImageKey::path)
        .chain(SfxKey::ALL.into_iter().map(SfxKey::path))
}

/// One error per required asset file missing under `asset_root`.
pub fn check_asset_files(asset_root: &Path) -> Vec<AssetError> {
    required_asset_paths()
        .map(|relative| asset_root.join(relative))
        .filter(|path| !path.is_file())
        .map(AssetError::NotFound)
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_each_missing_file() {
        let root = std::env::temp_dir().join(format!("retro_snake_assets_{}", std::process::id()));
        std::fs::create_dir_all(root.join("images")).unwrap();
        std::fs::write(root.join(ImageKey::Food.path()), b"png").unwrap();

        let errors = check_asset_files(&root);
        std::fs::remove_dir_all(&root).unwrap();

        assert_eq!(
            vec![
                AssetError::NotFound(root.join("audio/sfx/eat.wav")),
                AssetError::NotFound(root.join("audio/sfx/wall.wav")),
            ],
            errors
        );
        assert!(errors[0].to_string().starts_with("asset not found: "));
    }

    #[test]
    fn test_shipped_assets_present() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
        assert!(check_asset_files(&root).is_empty());
    }
}
