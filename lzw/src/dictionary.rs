//! The string table mapping `(prefix code, byte)` pairs to codes.

use crate::{encoder::EncodingError, Config};

/// One bucket of the table.
///
/// Roots sit at the index of their byte and are never matched by a lookup: a lookup always
/// carries a prefix, and roots have none. They only occupy their slot so that codes and slots
/// agree for the single byte strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Empty,
    Root,
    Word { code: u16, prefix: u16, byte: u8 },
}

/// Outcome of a [Dictionary::lookup].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Probe {
    /// The pair is known, this is its code.
    Found(u16),
    /// The pair is unknown, and would be stored in this slot.
    Vacant(VacantSlot),
}

/// An empty slot returned by a missed lookup.
///
/// Only valid until the next [Dictionary::register].
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct VacantSlot(usize);

impl VacantSlot {
    #[cfg(test)]
    fn index(&self) -> usize {
        self.0
    }
}

/// Fixed capacity hash table with open addressing.
///
/// A pair hashes to `(byte << hash_shift) ^ prefix`. On collision, the table is walked
/// backwards with a constant stride of `table_size - index` (or 1 from slot 0), wrapping
/// around. As the table size is prime, this walk visits every slot before coming back.
#[derive(Debug)]
pub(crate) struct Dictionary {
    slots: Vec<Slot>,
    hash_shift: u8,
    next_code: u16,
    max_code: u16,
    len: usize,
}

impl Dictionary {
    /// Creates a table holding the root entries of `config`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is not valid, see [Config::validate].
    pub(crate) fn new(config: &Config) -> Result<Self, EncodingError> {
        config.validate()?;

        let mut slots = vec![Slot::Empty; config.table_size];
        for byte in 0..config.root_count {
            slots[byte as usize] = Slot::Root;
        }

        Ok(Self {
            slots,
            hash_shift: config.hash_shift,
            next_code: config.root_count,
            max_code: config.max_code(),
            len: config.root_count as usize,
        })
    }

    /// Looks for the string made of the `prefix` string followed by `byte`.
    ///
    /// A validated configuration keeps the hash of any assignable prefix inside the table. Other
    /// prefixes are folded back into it, and simply miss.
    #[inline(always)]
    pub(crate) fn lookup(&self, prefix: u16, byte: u8) -> Probe {
        let table_size = self.slots.len();
        let mut index = (((byte as usize) << self.hash_shift) ^ prefix as usize) % table_size;
        let stride = if index == 0 { 1 } else { table_size - index };

        loop {
            match self.slots[index] {
                Slot::Empty => return Probe::Vacant(VacantSlot(index)),
                Slot::Word {
                    code,
                    prefix: slot_prefix,
                    byte: slot_byte,
                } if slot_prefix == prefix && slot_byte == byte => return Probe::Found(code),
                _ => {}
            }
            index = (index + table_size - stride) % table_size;
        }
    }

    /// Stores a new string in `slot`, giving it the next free code.
    ///
    /// Returns [None] without touching the table once every code is taken, or if `slot` was
    /// filled since the lookup that returned it.
    #[inline(always)]
    pub(crate) fn register(&mut self, slot: VacantSlot, prefix: u16, byte: u8) -> Option<u16> {
        if self.is_full() || self.slots[slot.0] != Slot::Empty {
            return None;
        }

        let code = self.next_code;
        self.slots[slot.0] = Slot::Word { code, prefix, byte };
        self.next_code += 1;
        self.len += 1;

        if self.is_full() {
            log::debug!("String table full after assigning code {code}");
        }

        Some(code)
    }

    /// The code the next registered string would get.
    #[cfg(test)]
    fn next_code(&self) -> u16 {
        self.next_code
    }

    /// Number of populated slots, roots included.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Most strings the table will ever hold, roots included.
    pub(crate) fn capacity(&self) -> usize {
        self.max_code as usize + 1
    }

    pub(crate) fn is_full(&self) -> bool {
        self.next_code > self.max_code
    }

    #[cfg(test)]
    fn is_root(&self, index: usize) -> bool {
        self.slots[index] == Slot::Root
    }
}
