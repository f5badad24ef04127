//! Address Decomposition.
//!
//! This module splits a 64-bit simulated address into the three fields a
//! set-associative cache uses to locate a block. It provides:
//! 1. **Field Layout:** The configured widths of the set-index and block-offset fields.
//! 2. **Decoding:** A pure, total split of an address into tag, set index, and offset.
//! 3. **Composition:** The inverse operation, reassembling an address from its fields.

use super::constants::ADDRESS_BITS;

/// Bit-field layout of a simulated address.
///
/// From most to least significant bit an address reads
/// `| tag | set index (s bits) | block offset (b bits) |`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AddressLayout {
    set_index_bits: u32,
    block_offset_bits: u32,
}

/// An address split into its cache fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// High-order bits identifying the memory block held by a line.
    pub tag: u64,
    /// Index of the set the address maps to.
    pub set_index: u64,
    /// Byte offset within the block.
    pub offset: u64,
}

/// Returns a mask with the low `bits` bits set.
#[inline(always)]
const fn low_mask(bits: u32) -> u64 {
    if bits >= ADDRESS_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

impl AddressLayout {
    /// Creates a layout with `s` set-index bits and `b` block-offset bits.
    ///
    /// Any widths are accepted; configurations are range-checked by
    /// [`CacheConfig::validate`](crate::config::CacheConfig::validate).
    #[inline(always)]
    pub const fn new(set_index_bits: u32, block_offset_bits: u32) -> Self {
        Self {
            set_index_bits,
            block_offset_bits,
        }
    }

    /// Number of set-index bits (`s`).
    #[inline(always)]
    pub const fn set_index_bits(&self) -> u32 {
        self.set_index_bits
    }

    /// Number of block-offset bits (`b`).
    #[inline(always)]
    pub const fn block_offset_bits(&self) -> u32 {
        self.block_offset_bits
    }

    /// Combined width of the set-index and block-offset fields.
    #[inline(always)]
    pub const fn tag_shift(&self) -> u32 {
        self.set_index_bits + self.block_offset_bits
    }

    /// Splits `addr` into tag, set index, and block offset.
    ///
    /// Degenerate layouts are supported: `b = 0` yields `offset = 0` and
    /// `s = 0` yields `set_index = 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cachesim_core::common::AddressLayout;
    ///
    /// let layout = AddressLayout::new(4, 4);
    /// let fields = layout.decode(0x1234);
    /// assert_eq!(fields.offset, 0x4);
    /// assert_eq!(fields.set_index, 0x3);
    /// assert_eq!(fields.tag, 0x12);
    /// ```
    #[inline(always)]
    pub const fn decode(&self, addr: u64) -> DecodedAddr {
        let offset = addr & low_mask(self.block_offset_bits);
        let set_index = match addr.checked_shr(self.block_offset_bits) {
            Some(shifted) => shifted & low_mask(self.set_index_bits),
            None => 0,
        };
        let tag = match addr.checked_shr(self.tag_shift()) {
            Some(tag) => tag,
            None => 0,
        };
        DecodedAddr {
            tag,
            set_index,
            offset,
        }
    }

    /// Reassembles an address from its fields.
    ///
    /// Fields wider than the layout allows are truncated to their width, so
    /// `compose(decode(a)) == a` for every address `a` whenever `s + b < 64`.
    #[inline(always)]
    pub const fn compose(&self, fields: DecodedAddr) -> u64 {
        let tag = match fields.tag.checked_shl(self.tag_shift()) {
            Some(tag) => tag,
            None => 0,
        };
        let set = match (fields.set_index & low_mask(self.set_index_bits))
            .checked_shl(self.block_offset_bits)
        {
            Some(set) => set,
            None => 0,
        };
        tag | set | (fields.offset & low_mask(self.block_offset_bits))
    }
}
