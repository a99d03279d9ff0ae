//! Asset plugin: the storages text rendering reads from.

use lettera_assets::Assets;
use lettera_ecs::{Schedule, World};
use lettera_text::{FontAsset, Material, Mesh};

use crate::plugin::Plugin;

/// Plugin that provides asset storage.
///
/// # Resources Provided
///
/// - `Assets<FontAsset>`
/// - `Assets<Mesh>`
/// - `Assets<Material>`
///
/// Storages inserted before the engine is built are kept as they are.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssetPlugin;

impl Plugin for AssetPlugin {
    type Dependencies = ();
    fn name(&self) -> &'static str {
        "AssetPlugin"
    }

    fn build(&self, world: &mut World, _schedule: &mut Schedule) {
        world.resource_or_default::<Assets<FontAsset>>();
        world.resource_or_default::<Assets<Mesh>>();
        world.resource_or_default::<Assets<Material>>();
        tracing::debug!("AssetPlugin: registered font, mesh and material storages");
    }
}
