use bitflags::bitflags;

bitflags! {
    /// The storage operations a field takes part in.
    ///
    /// A field is written or read only when its phases intersect the phases
    /// of the current call. `#[store]` without a `phase(..)` list means
    /// [`Phases::all`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Phases: u8 {
        /// Persistent save to disk.
        const SAVE   = 1 << 0;
        /// Initial full copy sent to a client.
        const CLIENT = 1 << 1;
        /// Periodic synchronisation of changed state.
        const SYNC   = 1 << 2;
        /// Targeted update packets.
        const UPDATE = 1 << 3;
        /// State carried by an item form of the object.
        const ITEM   = 1 << 4;
    }
}

impl Phases {
    /// Normalises a declared phase set, where empty means every phase.
    #[inline]
    pub const fn or_all(self) -> Self {
        if self.is_empty() { Self::all() } else { self }
    }
}

impl Default for Phases {
    #[inline]
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::Phases;

    #[test]
    fn empty_declaration_means_all() {
        assert_eq!(Phases::empty().or_all(), Phases::all());
        assert_eq!(Phases::SYNC.or_all(), Phases::SYNC);
    }

    #[test]
    fn disjoint_phases() {
        let field = Phases::SAVE | Phases::ITEM;
        assert!(field.intersects(Phases::SAVE));
        assert!(!field.intersects(Phases::CLIENT | Phases::SYNC));
    }
}
