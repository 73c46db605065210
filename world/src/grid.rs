use tile_blast_core::{FieldSize, GridView, Position, Tile};

/// Dense row-major arena of tile slots. The only place tile placement changes.
#[derive(Clone, Debug)]
pub(crate) struct TileGrid {
    size: FieldSize,
    cells: Vec<Option<Tile>>,
}

impl TileGrid {
    pub(crate) fn new(size: FieldSize) -> Self {
        Self {
            size,
            cells: vec![None; size.cell_count()],
        }
    }

    pub(crate) fn size(&self) -> FieldSize {
        self.size
    }

    pub(crate) fn get(&self, position: Position) -> Option<&Tile> {
        let index = self.size.index(position)?;
        self.cells.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, position: Position) -> Option<&mut Tile> {
        let index = self.size.index(position)?;
        self.cells.get_mut(index).and_then(Option::as_mut)
    }

    /// Stores the tile at the cell, rewriting its recorded position to match.
    /// Out-of-range cells are ignored.
    pub(crate) fn set(&mut self, position: Position, mut tile: Tile) {
        let Some(slot) = self
            .size
            .index(position)
            .and_then(|index| self.cells.get_mut(index))
        else {
            return;
        };
        tile.relocate(position);
        *slot = Some(tile);
    }

    pub(crate) fn clear(&mut self, position: Position) -> Option<Tile> {
        let index = self.size.index(position)?;
        self.cells.get_mut(index).and_then(Option::take)
    }

    pub(crate) fn clear_all(&mut self) {
        self.cells.fill(None);
    }

    pub(crate) fn empty_positions(&self) -> Vec<Position> {
        self.size
            .positions()
            .filter(|cell| self.get(*cell).is_none())
            .collect()
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.cells.iter_mut().flatten()
    }

    pub(crate) fn view(&self) -> GridView<'_> {
        GridView::new(&self.cells, self.size)
    }
}
