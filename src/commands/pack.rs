use std::env;

use anyhow::bail;

use crate::{
    config::Config,
    options::PackOptions,
    packing::{build_atlas, discover_inputs, load_sprites, write_atlas, PackSettings},
};

pub fn pack(options: PackOptions) -> anyhow::Result<()> {
    let fuzzy_config_path = match options.config {
        Some(path) => path,
        None => env::current_dir()?,
    };

    let config = match Config::read_from_folder_or_file(&fuzzy_config_path) {
        Ok(config) => config,
        Err(err) if err.is_not_found() => bail!(
            "No texpack.toml found at {}. Pass --config or use pack-images.",
            fuzzy_config_path.display()
        ),
        Err(err) => return Err(err.into()),
    };
    log::info!("Packing project \"{}\"", config.name);

    let mut settings = PackSettings::from_config(&config);
    if let Some(size) = options.size {
        settings.size = size.as_tuple();
    }
    settings.allow_growth |= options.allow_growth;
    settings.optimize |= options.optimize;

    let inputs = discover_inputs(&config)?;
    if inputs.is_empty() {
        log::warn!("No inputs matched the globs in {}", config.file_path.display());
    }

    let sprites = load_sprites(&inputs)?;
    let atlas = build_atlas(&settings, sprites)?;

    let root = config.folder();
    write_atlas(&atlas, &root.join(&config.output), &root.join(&config.manifest))
}
