use guillotine::{Atlas, AtlasConfig, Id, Image};

fn main() -> Result<(), guillotine::Error> {
    env_logger::init();

    let config = AtlasConfig::new().allow_growth(true);
    let mut atlas = Atlas::new(256, 256, config);

    for i in 0..5 {
        atlas.enqueue(Id::new(i), Image::new_empty_rgba8((128, 128)));
    }
    atlas.pack()?;

    println!("Atlas bounds: {:?}", atlas.bounds());
    for (id, rect) in atlas.placements() {
        println!("{}: {:?}", id, rect);
    }

    Ok(())
}
