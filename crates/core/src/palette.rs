//! Palette module - 16 RGB slots and the color mapping table
//!
//! Two tables live side by side:
//!
//! - **colors**: the true-color value of each slot, decoded at present time
//! - **mapping**: `mapping[i]` is the slot actually stored when a primitive
//!   asks for color `i`
//!
//! Editing a color marks the palette dirty so the presenter refreshes its
//! color table. Remapping only affects pixels written afterwards.

use crate::types::{check_color_index, PixResult, Rgb, PALETTE_SIZE};

/// Default 16-color palette (PICO-8 ordering).
pub const DEFAULT_PALETTE: [Rgb; PALETTE_SIZE] = [
    Rgb::new(0, 0, 0),
    Rgb::new(29, 43, 83),
    Rgb::new(126, 37, 83),
    Rgb::new(0, 135, 81),
    Rgb::new(171, 82, 54),
    Rgb::new(95, 87, 79),
    Rgb::new(194, 195, 199),
    Rgb::new(255, 241, 232),
    Rgb::new(255, 0, 77),
    Rgb::new(255, 163, 0),
    Rgb::new(255, 236, 39),
    Rgb::new(0, 228, 54),
    Rgb::new(41, 173, 255),
    Rgb::new(131, 118, 156),
    Rgb::new(255, 119, 168),
    Rgb::new(255, 204, 170),
];

/// Color index indirection applied at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMapping {
    slots: [u8; PALETTE_SIZE],
}

impl ColorMapping {
    pub const fn identity() -> Self {
        let mut slots = [0u8; PALETTE_SIZE];
        let mut i = 0;
        while i < PALETTE_SIZE {
            slots[i] = i as u8;
            i += 1;
        }
        Self { slots }
    }

    /// Slot stored when `color` is requested. Only `color % 16` is meaningful.
    #[inline(always)]
    pub fn resolve(&self, color: u8) -> u8 {
        self.slots[(color as usize) % PALETTE_SIZE] % PALETTE_SIZE as u8
    }

    pub fn get(&self, index: usize) -> u8 {
        self.slots[index]
    }

    fn set(&mut self, index: usize, target: u8) {
        self.slots[index] = target;
    }
}

impl Default for ColorMapping {
    fn default() -> Self {
        Self::identity()
    }
}

/// The 16 palette colors plus the mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
    mapping: ColorMapping,
    dirty: bool,
}

impl Palette {
    /// Default colors, identity mapping, marked dirty.
    pub fn new() -> Self {
        Self {
            colors: DEFAULT_PALETTE,
            mapping: ColorMapping::identity(),
            dirty: true,
        }
    }

    /// Set slot `index` to `(r, g, b)`, clamping each channel to `0..=255`.
    pub fn set_color(&mut self, index: i32, r: i32, g: i32, b: i32) -> PixResult<()> {
        let idx = check_color_index(index)?;
        self.colors[idx] = Rgb::clamped(r, g, b);
        self.dirty = true;
        Ok(())
    }

    pub fn get_color(&self, index: i32) -> PixResult<Rgb> {
        let idx = check_color_index(index)?;
        Ok(self.colors[idx])
    }

    /// Make requests for color `index` store slot `target`.
    pub fn remap(&mut self, index: i32, target: i32) -> PixResult<()> {
        let idx = check_color_index(index)?;
        let target = check_color_index(target)?;
        self.mapping.set(idx, target as u8);
        Ok(())
    }

    pub fn get_mapping(&self, index: i32) -> PixResult<u8> {
        let idx = check_color_index(index)?;
        Ok(self.mapping.get(idx))
    }

    pub fn reset_mapping(&mut self) {
        self.mapping = ColorMapping::identity();
    }

    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.colors
    }

    pub fn mapping(&self) -> &ColorMapping {
        &self.mapping
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear the dirty flag, returning whether it was set.
    ///
    /// Only the present step should call this.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}
