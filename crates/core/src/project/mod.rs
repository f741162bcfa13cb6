use std::fmt;

/// Execution engine of the loaded project, driven by the mode machine.
pub trait ProjectRuntime {
    fn pause(&mut self);
    fn resume(&mut self);
    /// Drops execution state back to idle.
    fn reset(&mut self);
    /// Prepares a fresh run of the loaded project.
    fn init_run(&mut self);
    /// Zeroes the audio output registers after a tick.
    fn silence(&mut self) {}
}

/// MD5 digest of the serialized project.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CartHash([u8; 16]);

impl CartHash {
    pub fn of(bytes: &[u8]) -> Self {
        Self(md5::compute(bytes).0)
    }
}

impl fmt::Debug for CartHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CartHash({self})")
    }
}

impl fmt::Display for CartHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// The project currently open in the studio.
#[derive(Debug, Clone, Default)]
pub struct ProjectState {
    /// File name inside the studio storage; empty for an unnamed project.
    pub name: String,
    pub bytes: Vec<u8>,
    /// Cover image embedded in the project, encoded as a one-frame animation.
    pub cover: Vec<u8>,
    hash: CartHash,
    mdate: u64,
}

impl ProjectState {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, mdate: u64) -> Self {
        let hash = CartHash::of(&bytes);
        Self {
            name: name.into(),
            bytes,
            cover: Vec::new(),
            hash,
            mdate,
        }
    }

    /// Records the current contents as the saved baseline.
    pub fn mark_saved(&mut self, mdate: u64) {
        self.hash = CartHash::of(&self.bytes);
        self.mdate = mdate;
    }

    pub fn hash(&self) -> CartHash {
        self.hash
    }

    pub fn mdate(&self) -> u64 {
        self.mdate
    }

    /// True when the in-memory project differs from the saved baseline.
    pub fn has_unsaved_changes(&self) -> bool {
        CartHash::of(&self.bytes) != self.hash
    }

    /// True when the file on disk is newer than the loaded copy.
    pub fn modified_externally(&self, disk_mdate: u64) -> bool {
        self.mdate != 0 && disk_mdate > self.mdate
    }
}
