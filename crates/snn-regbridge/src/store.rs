//! Register store: image buffer and transfer-complete flag.
//!
//! The store owns the only shared mutable state in the bridge. It is
//! mutated exclusively through the masked-write path, at most once per
//! tick (one admitted write per tick by construction).

use neuro_core::WORD_BYTES;

/// Number of pixel cells in the image buffer.
pub const IMAGE_CELLS: usize = 256;

/// Byte address of the transfer-complete flag register.
///
/// The decode is a single threshold: any write at or above this address
/// lands on the flag. Genuinely out-of-range addresses alias here too —
/// the address space is small and fully decoded as "image" vs "everything
/// else", and the aliasing is part of the register map contract.
pub const FLAG_ADDR: u32 = IMAGE_CELLS as u32;

/// Merge `new` into `prior` under a per-byte strobe.
///
/// Each byte lane of the result takes the byte from `new` where the
/// corresponding strobe bit is set, and the byte from `prior` where it is
/// clear. Pure function, shared by image-cell writes and the flag write.
#[must_use]
pub fn apply_masked_write(prior: u32, new: u32, strb: u8) -> u32 {
    let mut merged = prior;
    for lane in 0..WORD_BYTES {
        if strb & (1 << lane) != 0 {
            let mask = 0xFF_u32 << (lane * 8);
            merged = (merged & !mask) | (new & mask);
        }
    }
    merged
}

/// Image buffer plus transfer-complete flag.
pub struct RegisterStore {
    /// Pixel cells, 8-bit intensity each.
    image: [u8; IMAGE_CELLS],
    /// Non-zero means "image fully received". Cleared only by reset.
    flag: u32,
}

impl RegisterStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            image: [0; IMAGE_CELLS],
            flag: 0,
        }
    }

    /// Synchronous reset: buffer and flag to zero.
    pub fn reset(&mut self) {
        self.image = [0; IMAGE_CELLS];
        self.flag = 0;
    }

    /// Apply one admitted write. Exactly one register is touched.
    ///
    /// Image cells merge on the full word, then truncate to their 8-bit
    /// pixel width. The flag keeps the whole word.
    pub fn commit_write(&mut self, addr: u32, data: u32, strb: u8) {
        if addr < FLAG_ADDR {
            let cell = &mut self.image[addr as usize];
            *cell = apply_masked_write(u32::from(*cell), data, strb) as u8;
        } else {
            self.flag = apply_masked_write(self.flag, data, strb);
        }
    }

    /// The assembled image, as presented to the accelerator.
    #[must_use]
    pub fn image(&self) -> &[u8; IMAGE_CELLS] {
        &self.image
    }

    /// Raw flag register value.
    #[must_use]
    pub fn flag(&self) -> u32 {
        self.flag
    }

    /// "New image" level: true exactly while the flag is non-zero.
    #[must_use]
    pub fn image_complete(&self) -> bool {
        self.flag != 0
    }
}

impl Default for RegisterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_write_touches_only_strobed_bytes() {
        let prior = 0xAABB_CCDD;
        let new = 0x1122_3344;
        for strb in 0..=0x0F_u8 {
            let merged = apply_masked_write(prior, new, strb);
            for lane in 0..4 {
                let shift = lane * 8;
                let got = (merged >> shift) & 0xFF;
                let want = if strb & (1 << lane) != 0 {
                    (new >> shift) & 0xFF
                } else {
                    (prior >> shift) & 0xFF
                };
                assert_eq!(
                    got, want,
                    "strobe {strb:#06b}, lane {lane}: got {got:#04X}, want {want:#04X}"
                );
            }
        }
    }

    #[test]
    fn masked_write_full_strobe_replaces_word() {
        assert_eq!(apply_masked_write(0xFFFF_FFFF, 0x0102_0304, 0x0F), 0x0102_0304);
    }

    #[test]
    fn masked_write_empty_strobe_keeps_prior() {
        assert_eq!(apply_masked_write(0xDEAD_BEEF, 0x0102_0304, 0x00), 0xDEAD_BEEF);
    }

    #[test]
    fn cell_write_updates_only_target() {
        let mut store = RegisterStore::new();
        store.commit_write(7, 0x7F, 0x01);
        assert_eq!(store.image()[7], 0x7F);
        for (i, &cell) in store.image().iter().enumerate() {
            if i != 7 {
                assert_eq!(cell, 0, "cell {i} should be untouched");
            }
        }
        assert_eq!(store.flag(), 0, "flag should be untouched by a cell write");
    }

    #[test]
    fn cell_write_merges_prior_byte() {
        let mut store = RegisterStore::new();
        store.commit_write(0, 0xA5, 0x01);
        // Strobe clear on lane 0: cell keeps its prior value
        store.commit_write(0, 0xFF, 0x02);
        assert_eq!(store.image()[0], 0xA5);
    }

    #[test]
    fn flag_address_writes_flag() {
        let mut store = RegisterStore::new();
        store.commit_write(FLAG_ADDR, 1, 0x0F);
        assert!(store.image_complete());
        assert_eq!(store.flag(), 1);
    }

    #[test]
    fn out_of_range_address_aliases_to_flag() {
        let mut store = RegisterStore::new();
        store.commit_write(0xFFFF_0000, 0x55, 0x0F);
        assert_eq!(store.flag(), 0x55, "any address >= {FLAG_ADDR} hits the flag");
        assert!(store.image().iter().all(|&c| c == 0));
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut store = RegisterStore::new();
        store.commit_write(3, 0x11, 0x01);
        store.commit_write(FLAG_ADDR, 1, 0x0F);
        store.reset();
        assert!(store.image().iter().all(|&c| c == 0));
        assert_eq!(store.flag(), 0);
        assert!(!store.image_complete());
    }
}
