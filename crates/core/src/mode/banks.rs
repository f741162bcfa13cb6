/// Asset kinds that are split into banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BankKind {
    Sprite = 0,
    Map = 1,
    Sfx = 2,
    Music = 3,
}

impl BankKind {
    pub const ALL: [BankKind; 4] = [
        BankKind::Sprite,
        BankKind::Map,
        BankKind::Sfx,
        BankKind::Music,
    ];
}

/// Bank index selected for each asset kind.
///
/// While chained, selecting a bank for one kind selects it for all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankState {
    indexes: [usize; 4],
    chained: bool,
    /// Whether the bank picker is expanded in the toolbar.
    pub show: bool,
    count: usize,
}

impl BankState {
    pub fn new(count: usize) -> Self {
        Self {
            indexes: [0; 4],
            chained: true,
            show: false,
            count: count.max(1),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn chained(&self) -> bool {
        self.chained
    }

    pub fn index(&self, kind: BankKind) -> usize {
        self.indexes[kind as usize]
    }

    pub fn set(&mut self, kind: BankKind, index: usize) {
        let index = index.min(self.count - 1);
        if self.chained {
            self.indexes = [index; 4];
        } else {
            self.indexes[kind as usize] = index;
        }
    }

    /// Flips chaining. Turning it on aligns every kind to `focused`.
    pub fn toggle_chained(&mut self, focused: BankKind) {
        self.chained = !self.chained;
        if self.chained {
            self.indexes = [self.index(focused); 4];
        }
    }

    pub fn reset(&mut self) {
        self.indexes = [0; 4];
    }
}
