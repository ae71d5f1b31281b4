use std::{collections::HashMap, hash::Hash, sync::Arc};

use crate::{
    atlas::Atlas,
    config::AtlasConfig,
    error::{Error, Result},
    geometry::Rect,
    id::{Id, IdGenerator},
    image::Image,
};

/// An [`Atlas`] addressed by keys of the caller's choosing instead of ids.
///
/// Each key is mapped to an id handed out by an [`IdGenerator`]. Looking up
/// the id for a key is a hash lookup, but going from an id back to its key
/// scans every key, so [`key_of`][AliasAtlas::key_of] is meant for debugging
/// and other rare lookups.
#[derive(Debug)]
pub struct AliasAtlas<K> {
    base: Atlas,
    ids: Arc<IdGenerator>,
    aliases: HashMap<K, Id>,

    /// Keys queued for the next pack. They only become visible once the pack
    /// succeeds.
    queued: Vec<(K, Id)>,
}

impl<K: Eq + Hash> AliasAtlas<K> {
    pub fn new(width: u32, height: u32, config: AtlasConfig) -> Self {
        Self::with_generator(width, height, config, Arc::new(IdGenerator::new()))
    }

    /// Creates an atlas that draws ids from a generator shared with other
    /// atlases.
    pub fn with_generator(
        width: u32,
        height: u32,
        config: AtlasConfig,
        ids: Arc<IdGenerator>,
    ) -> Self {
        Self {
            base: Atlas::new(width, height, config),
            ids,
            aliases: HashMap::new(),
            queued: Vec::new(),
        }
    }

    pub fn id_of(&self, key: &K) -> Option<Id> {
        self.aliases.get(key).copied()
    }

    /// Finds the key that maps to `id`. This is a linear scan over every key.
    pub fn key_of(&self, id: Id) -> Option<&K> {
        self.aliases
            .iter()
            .find(|(_, value)| **value == id)
            .map(|(key, _)| key)
    }

    /// Places `item` under a freshly generated id. Keys must be unique; use
    /// [`replace`][AliasAtlas::replace] to change an existing item.
    pub fn insert(&mut self, key: K, item: &Image) -> Result<Rect> {
        if let Some(existing) = self.id_of(&key) {
            return Err(Error::DuplicateId(existing));
        }

        let id = self.ids.generate();
        let rect = self.base.insert(id, item)?;
        self.aliases.insert(key, id);

        Ok(rect)
    }

    /// Queues `item` under `key` for the next [`pack`][AliasAtlas::pack].
    pub fn enqueue(&mut self, key: K, item: Image) -> Result<()> {
        let existing = self.id_of(&key).or_else(|| {
            self.queued
                .iter()
                .find(|(queued, _)| *queued == key)
                .map(|(_, id)| *id)
        });

        if let Some(existing) = existing {
            return Err(Error::DuplicateId(existing));
        }

        let id = self.ids.generate();
        self.base.enqueue(id, item);
        self.queued.push((key, id));

        Ok(())
    }

    /// Places every queued item, largest first. See [`Atlas::pack`].
    pub fn pack(&mut self) -> Result<()> {
        self.base.pack()?;
        self.aliases.extend(self.queued.drain(..));

        Ok(())
    }

    /// Removes every queued item without placing it. See
    /// [`Atlas::take_queued`].
    pub fn take_queued(&mut self) -> Vec<(K, Image)> {
        let images = self.base.take_queued();

        self.queued
            .drain(..)
            .zip(images)
            .map(|((key, _), (_, image))| (key, image))
            .collect()
    }

    /// Swaps the contents stored under `key`, re-packing the whole atlas. Acts
    /// like [`insert`][AliasAtlas::insert] for keys that aren't present.
    pub fn replace(&mut self, key: K, item: &Image) -> Result<Rect> {
        match self.id_of(&key) {
            Some(id) => self.base.replace(id, item),
            None => self.insert(key, item),
        }
    }

    pub fn optimize(&mut self) -> Result<()> {
        self.base.optimize()
    }

    pub fn bounds_of(&self, key: &K) -> Result<Rect> {
        let id = self.id_of(key).ok_or(Error::UnknownKey)?;
        self.base.bounds_of(id)
    }

    pub fn sprite_of(&self, key: &K) -> Result<Image> {
        let id = self.id_of(key).ok_or(Error::UnknownKey)?;
        self.base.sprite_of(id)
    }

    /// Every key alongside where its item was placed, in id order.
    pub fn placements(&self) -> impl Iterator<Item = (&K, Rect)> + '_ {
        let keys: HashMap<Id, &K> = self.aliases.iter().map(|(key, id)| (*id, key)).collect();

        self.base
            .placements()
            .filter_map(move |(id, rect)| keys.get(&id).map(|key| (*key, rect)))
    }

    pub fn center(&self) -> (f32, f32) {
        self.base.center()
    }

    pub fn bounds(&self) -> Rect {
        self.base.bounds()
    }

    pub fn image(&self) -> &Image {
        self.base.image()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// The underlying id-addressed atlas.
    pub fn base(&self) -> &Atlas {
        &self.base
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn growable() -> AtlasConfig {
        AtlasConfig::new().allow_growth(true)
    }

    #[test]
    fn string_keys() {
        let mut atlas = AliasAtlas::new(64, 64, growable());

        atlas
            .insert("hero.png", &Image::new_empty_rgba8((32, 32)))
            .unwrap();
        atlas
            .insert("coin.png", &Image::new_empty_rgba8((8, 8)))
            .unwrap();

        let hero = atlas.id_of(&"hero.png").unwrap();
        let coin = atlas.id_of(&"coin.png").unwrap();

        assert_ne!(hero, coin);
        assert_eq!(atlas.key_of(hero), Some(&"hero.png"));
        assert_eq!(atlas.key_of(coin), Some(&"coin.png"));
        assert_eq!(atlas.bounds_of(&"hero.png"), Ok(Rect::from_size((32, 32))));
        assert_eq!(atlas.bounds_of(&"missing.png"), Err(Error::UnknownKey));
        assert_eq!(atlas.sprite_of(&"missing.png"), Err(Error::UnknownKey));
        assert_eq!(atlas.id_of(&"missing.png"), None);
        assert_eq!(atlas.len(), 2);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut atlas = AliasAtlas::new(64, 64, growable());

        atlas.insert(1u32, &Image::new_empty_rgba8((4, 4))).unwrap();
        let id = atlas.id_of(&1).unwrap();

        assert_eq!(
            atlas.insert(1u32, &Image::new_empty_rgba8((4, 4))),
            Err(Error::DuplicateId(id))
        );
        assert_eq!(atlas.base().len(), 1);
    }

    #[test]
    fn failed_insert_records_no_alias() {
        let mut atlas = AliasAtlas::new(8, 8, AtlasConfig::new());

        assert!(atlas
            .insert("big", &Image::new_empty_rgba8((16, 16)))
            .is_err());
        assert_eq!(atlas.id_of(&"big"), None);
        assert!(atlas.is_empty());
    }

    #[test]
    fn replace_resizes_in_place() {
        let mut atlas = AliasAtlas::new(64, 64, growable());

        atlas.insert('a', &Image::new_empty_rgba8((10, 10))).unwrap();
        atlas.insert('b', &Image::new_empty_rgba8((20, 20))).unwrap();
        let id = atlas.id_of(&'a');

        let rect = atlas.replace('a', &Image::new_empty_rgba8((30, 30))).unwrap();

        assert_eq!(rect.size(), (30, 30));
        assert_eq!(atlas.id_of(&'a'), id);
        assert_eq!(atlas.bounds_of(&'a'), Ok(rect));

        atlas.replace('c', &Image::new_empty_rgba8((5, 5))).unwrap();
        assert_eq!(atlas.len(), 3);
    }

    #[test]
    fn batch_keys_appear_after_pack() {
        let mut atlas = AliasAtlas::new(64, 64, AtlasConfig::new());

        atlas.enqueue("small", Image::new_empty_rgba8((8, 8))).unwrap();
        atlas.enqueue("large", Image::new_empty_rgba8((32, 32))).unwrap();

        assert_eq!(atlas.id_of(&"small"), None);
        assert!(matches!(
            atlas.enqueue("small", Image::new_empty_rgba8((1, 1))),
            Err(Error::DuplicateId(_))
        ));

        atlas.pack().unwrap();

        assert_eq!(atlas.bounds_of(&"large"), Ok(Rect::from_size((32, 32))));
        assert_eq!(atlas.bounds_of(&"small").map(|rect| rect.size()), Ok((8, 8)));
        assert_eq!(atlas.len(), 2);
    }

    #[test]
    fn failed_pack_keeps_keys_hidden() {
        let mut atlas = AliasAtlas::new(16, 16, AtlasConfig::new());

        atlas.enqueue("huge", Image::new_empty_rgba8((32, 32))).unwrap();

        assert!(atlas.pack().is_err());
        assert_eq!(atlas.id_of(&"huge"), None);
        assert_eq!(atlas.base().pending(), 1);

        let taken = atlas.take_queued();
        assert_eq!(taken, vec![("huge", Image::new_empty_rgba8((32, 32)))]);
        assert_eq!(atlas.base().pending(), 0);

        atlas.insert("small", &Image::new_empty_rgba8((8, 8))).unwrap();
        assert_eq!(atlas.len(), 1);
    }

    #[test]
    fn shared_generator() {
        let ids = Arc::new(IdGenerator::new());
        let mut first = AliasAtlas::with_generator(16, 16, growable(), Arc::clone(&ids));
        let mut second = AliasAtlas::with_generator(16, 16, growable(), Arc::clone(&ids));

        first.insert("x", &Image::new_empty_rgba8((1, 1))).unwrap();
        second.insert("x", &Image::new_empty_rgba8((1, 1))).unwrap();

        assert_ne!(first.id_of(&"x"), second.id_of(&"x"));
    }

    #[test]
    fn placements_carry_keys() {
        let mut atlas = AliasAtlas::new(32, 32, AtlasConfig::new());

        atlas.insert("a", &Image::new_empty_rgba8((8, 8))).unwrap();
        atlas.insert("b", &Image::new_empty_rgba8((4, 4))).unwrap();

        let placements: Vec<_> = atlas.placements().collect();
        assert_eq!(
            placements,
            vec![
                (&"a", Rect::new((0, 0), (8, 8))),
                (&"b", Rect::new((8, 0), (4, 4))),
            ]
        );
    }
}
