use std::collections::BTreeMap;

use crate::{
    config::AtlasConfig,
    error::{Error, Result},
    free_list::FreeList,
    geometry::Rect,
    id::Id,
    image::Image,
    split::split,
};

/// A single growable surface that images are packed onto.
///
/// Items are placed with a guillotine allocator: every placement carves the
/// item out of the corner of the smallest free rectangle that can hold it and
/// splits what's left into at most two new free rectangles.
///
/// Items can be placed one at a time with [`insert`][Atlas::insert], or queued
/// with [`enqueue`][Atlas::enqueue] and placed together, largest first, with
/// [`pack`][Atlas::pack]. The two styles can't be interleaved: immediate-mode
/// operations fail with [`Error::PackPending`] while a batch is queued.
///
/// `Atlas` has no internal synchronization. Mutating operations need exclusive
/// access, which the borrow checker already enforces.
#[derive(Debug, Clone)]
pub struct Atlas {
    config: AtlasConfig,
    layout: Layout,
    queued: Vec<Queued>,
}

#[derive(Debug, Clone)]
struct Queued {
    id: Id,
    image: Image,
}

/// Everything describing where items currently live. Operations that move
/// more than one item build a new `Layout` and only swap it in once every item
/// has been placed, so a failure never leaves a half-built atlas behind.
#[derive(Debug, Clone)]
struct Layout {
    bounds: Rect,
    free: FreeList,
    placed: BTreeMap<Id, Rect>,
    image: Image,
}

impl Atlas {
    pub fn new(width: u32, height: u32, config: AtlasConfig) -> Self {
        Self {
            config,
            layout: Layout::new((width, height)),
            queued: Vec::new(),
        }
    }

    /// Places `item` on the atlas right away and copies its pixels into the
    /// surface.
    ///
    /// If nothing fits and growth is allowed, the atlas grows by at least the
    /// item's size and every placed item is laid out again before the item is
    /// retried. If the new layout still can't hold everything, the growth step
    /// doubles until it can. On failure the atlas is left as it was.
    pub fn insert(&mut self, id: Id, item: &Image) -> Result<Rect> {
        self.ensure_not_pending()?;

        if self.layout.placed.contains_key(&id) {
            return Err(Error::DuplicateId(id));
        }

        insert_into(
            &mut self.layout,
            self.config.allow_growth,
            id,
            item,
            self.config.insert_flipped,
        )
    }

    /// Queues `item` to be placed by the next call to [`pack`][Atlas::pack].
    pub fn enqueue(&mut self, id: Id, item: Image) {
        log::trace!(
            "Queueing item {} ({}x{})",
            id,
            item.size().0,
            item.size().1
        );

        self.queued.push(Queued { id, image: item });
    }

    /// Places every queued item, largest area first.
    ///
    /// Either the whole batch is placed, or none of it is: on failure the
    /// atlas keeps its previous layout and the queue is left intact. Use
    /// [`take_queued`][Atlas::take_queued] to give up on the batch.
    pub fn pack(&mut self) -> Result<()> {
        if self.queued.is_empty() {
            return Ok(());
        }

        log::debug!("Packing {} queued items", self.queued.len());

        let mut order: Vec<&Queued> = self.queued.iter().collect();
        order.sort_by(|a, b| area_of(&b.image).cmp(&area_of(&a.image)));

        let mut staged = self.layout.clone();

        for entry in order {
            if staged.placed.contains_key(&entry.id) {
                return Err(Error::DuplicateId(entry.id));
            }

            insert_into(
                &mut staged,
                self.config.allow_growth,
                entry.id,
                &entry.image,
                self.config.insert_flipped,
            )?;
        }

        log::debug!(
            "Packed {} items, atlas is now {}x{}",
            self.queued.len(),
            staged.bounds.width(),
            staged.bounds.height()
        );

        self.layout = staged;
        self.queued.clear();

        Ok(())
    }

    /// Removes every queued item without placing it, in the order they were
    /// queued. Immediate-mode operations work again afterwards.
    pub fn take_queued(&mut self) -> Vec<(Id, Image)> {
        self.queued
            .drain(..)
            .map(|entry| (entry.id, entry.image))
            .collect()
    }

    /// Lays out every placed item again, largest first, on an empty surface
    /// of the current size. Ids and pixel contents are unchanged; only
    /// positions move.
    ///
    /// The surface never grows here. If the items don't fit in the new order,
    /// the current layout is kept as it is.
    pub fn optimize(&mut self) -> Result<()> {
        self.ensure_not_pending()?;

        let items = self.layout.extract();

        match self.repack(items, false) {
            Ok(layout) => self.layout = layout,
            Err(Error::NoFreeSpace { size }) => {
                log::debug!(
                    "Keeping current layout, a {}x{} item doesn't fit when repacked",
                    size.0,
                    size.1
                );
            }
            Err(err) => return Err(err),
        }

        Ok(())
    }

    /// Swaps the contents of `id` for `item`, then lays out every item again
    /// so a change in size can't leave overlaps or holes behind. Behaves like
    /// [`insert`][Atlas::insert] when `id` isn't placed yet.
    pub fn replace(&mut self, id: Id, item: &Image) -> Result<Rect> {
        self.ensure_not_pending()?;

        if !self.layout.placed.contains_key(&id) {
            return self.insert(id, item);
        }

        let stored = if self.config.insert_flipped {
            item.flipped()
        } else {
            item.clone()
        };

        let mut items = self.layout.extract();
        for entry in &mut items {
            if entry.0 == id {
                entry.1 = stored.clone();
            }
        }
        sort_for_replay(&mut items);

        self.layout = self.repack(items, self.config.allow_growth)?;
        self.bounds_of(id)
    }

    pub fn bounds_of(&self, id: Id) -> Result<Rect> {
        self.layout
            .placed
            .get(&id)
            .copied()
            .ok_or(Error::NotFound(id))
    }

    /// A copy of the pixels stored for `id`, as they appear in the atlas.
    pub fn sprite_of(&self, id: Id) -> Result<Image> {
        let rect = self.bounds_of(id)?;
        Ok(self.layout.image.sub_image(rect))
    }

    pub fn contains(&self, id: Id) -> bool {
        self.layout.placed.contains_key(&id)
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.layout.bounds
    }

    pub fn center(&self) -> (f32, f32) {
        self.layout.bounds.center()
    }

    #[inline]
    pub fn image(&self) -> &Image {
        &self.layout.image
    }

    /// Every placed item, ordered by id.
    pub fn placements(&self) -> impl Iterator<Item = (Id, Rect)> + '_ {
        self.layout.placed.iter().map(|(id, rect)| (*id, *rect))
    }

    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.layout.placed.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.layout.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.placed.is_empty()
    }

    /// The free rectangles on the surface, in ascending order of area.
    pub fn free_rects(&self) -> &[Rect] {
        self.layout.free.as_slice()
    }

    /// The number of items waiting for [`pack`][Atlas::pack].
    pub fn pending(&self) -> usize {
        self.queued.len()
    }

    pub fn used_area(&self) -> u64 {
        self.layout.placed.values().map(Rect::area).sum()
    }

    pub fn free_area(&self) -> u64 {
        self.layout.free.total_area()
    }

    fn ensure_not_pending(&self) -> Result<()> {
        if self.queued.is_empty() {
            Ok(())
        } else {
            Err(Error::PackPending {
                queued: self.queued.len(),
            })
        }
    }

    /// Builds a fresh layout at the current size holding `items`, in order.
    fn repack(&self, items: Vec<(Id, Image)>, allow_growth: bool) -> Result<Layout> {
        log::debug!(
            "Repacking {} items into {}x{}",
            items.len(),
            self.layout.bounds.width(),
            self.layout.bounds.height()
        );

        let mut layout = Layout::new(self.layout.bounds.size);

        for (id, image) in &items {
            insert_into(&mut layout, allow_growth, *id, image, false)?;
        }

        Ok(layout)
    }
}

impl Layout {
    fn new(size: (u32, u32)) -> Self {
        let bounds = Rect::from_size(size);

        Self {
            bounds,
            free: FreeList::new(bounds),
            placed: BTreeMap::new(),
            image: Image::new_empty_rgba8(size),
        }
    }

    /// Places a single item without growing. Nothing is modified unless the
    /// item is placed successfully.
    fn place(&mut self, id: Id, item: &Image, flipped: bool) -> Result<Rect> {
        let size = item.size();

        let index = match self.free.find(size) {
            Some(index) => index,
            None => return Err(Error::NoFreeSpace { size }),
        };

        let space = self.free.get(index);
        let splits = split(size, space)?;

        self.free.remove(index);
        self.free.extend(splits.rects());

        let rect = Rect::new(space.pos, size);
        self.placed.insert(id, rect);
        self.image.blit(item, rect.pos, flipped);

        log::trace!(
            "Placed item {} ({}x{}) at {:?}, {} free rects remain",
            id,
            size.0,
            size.1,
            rect.pos,
            self.free.as_slice().len()
        );

        Ok(rect)
    }

    /// Copies every placed item out of the surface, in the order they should
    /// be placed again.
    fn extract(&self) -> Vec<(Id, Image)> {
        let mut items: Vec<_> = self
            .placed
            .iter()
            .map(|(id, rect)| (*id, self.image.sub_image(*rect)))
            .collect();

        sort_for_replay(&mut items);
        items
    }

    /// Builds a layout of the given size holding every placed item, laid out
    /// again from scratch. The free list is always rebuilt; patching it in
    /// place can't keep free rectangles from overlapping.
    fn rebuilt(&self, size: (u32, u32)) -> Result<Layout> {
        let mut layout = Layout::new(size);

        for (id, image) in self.extract() {
            if layout.place(id, &image, false).is_err() {
                return Err(Error::GrowthReplayFailed { id });
            }
        }

        Ok(layout)
    }
}

/// Places one item, growing the layout if it doesn't fit and growth is
/// allowed.
fn insert_into(
    layout: &mut Layout,
    allow_growth: bool,
    id: Id,
    item: &Image,
    flipped: bool,
) -> Result<Rect> {
    match layout.place(id, item, flipped) {
        Err(Error::NoFreeSpace { .. }) if allow_growth => {
            grow_and_place(layout, id, item, flipped)
        }
        other => other,
    }
}

/// Grows `layout` until every placed item and `item` fit, then places `item`.
///
/// Each placement leaves a free rectangle at least as large as the space it
/// was carved from, less the item's width and height, so a surface wider and
/// taller than the sum of every item always fits. Doubling the step gets
/// there unless the size saturates.
fn grow_and_place(layout: &mut Layout, id: Id, item: &Image, flipped: bool) -> Result<Rect> {
    let (width, height) = layout.bounds.size;
    let mut step = (item.size().0.max(1), item.size().1.max(1));
    let mut last = layout.bounds.size;

    loop {
        let size = (width.saturating_add(step.0), height.saturating_add(step.1));

        log::debug!(
            "Growing atlas from {}x{} to {}x{}",
            width,
            height,
            size.0,
            size.1
        );

        let failure = match layout.rebuilt(size) {
            Ok(mut grown) => match grown.place(id, item, flipped) {
                Ok(rect) => {
                    *layout = grown;
                    return Ok(rect);
                }
                Err(Error::NoFreeSpace { size: item_size }) => Error::NoSpaceAfterGrowth {
                    size: item_size,
                },
                Err(err) => return Err(err),
            },
            Err(err) => err,
        };

        if size == last {
            return Err(failure);
        }

        log::debug!(
            "Atlas of {}x{} is still too small: {}",
            size.0,
            size.1,
            failure
        );

        last = size;
        step = (step.0.saturating_mul(2), step.1.saturating_mul(2));
    }
}

/// Largest area first, ties broken by id so layouts are reproducible.
fn sort_for_replay(items: &mut [(Id, Image)]) {
    items.sort_by(|(a_id, a), (b_id, b)| {
        area_of(b)
            .cmp(&area_of(a))
            .then_with(|| a_id.cmp(b_id))
    });
}

fn area_of(image: &Image) -> u64 {
    Rect::from_size(image.size()).area()
}
