use std::env;

use crate::{
    config::PackMode,
    options::PackImagesOptions,
    packing::{build_atlas, inputs_from_paths, load_sprites, write_atlas, PackSettings},
};

pub fn pack_images(options: PackImagesOptions) -> anyhow::Result<()> {
    let root = env::current_dir()?;
    let inputs = inputs_from_paths(&root, &options.paths)?;

    let settings = PackSettings {
        size: options.size.as_tuple(),
        allow_growth: options.allow_growth,
        insert_flipped: options.flipped,
        mode: if options.immediate {
            PackMode::Immediate
        } else {
            PackMode::Batch
        },
        optimize: options.optimize,
    };

    let sprites = load_sprites(&inputs)?;
    let atlas = build_atlas(&settings, sprites)?;

    let manifest_path = options
        .manifest
        .clone()
        .unwrap_or_else(|| options.output.with_extension("json"));

    write_atlas(&atlas, &options.output, &manifest_path)
}
