use std::fmt;

/// A serialized startup heap image.
///
/// Owned and immutable once produced. The type is deliberately not `Clone`:
/// a blob has exactly one owner, and handing it to
/// [`SnapshotEngine::warm_up`](crate::SnapshotEngine::warm_up) gives it away.
#[derive(PartialEq, Eq)]
pub struct StartupBlob {
    data: Box<[u8]>,
}

impl StartupBlob {
    #[must_use]
    pub fn new(data: impl Into<Box<[u8]>>) -> Self {
        Self { data: data.into() }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn into_bytes(self) -> Box<[u8]> {
        self.data
    }
}

impl From<Vec<u8>> for StartupBlob {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl AsRef<[u8]> for StartupBlob {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

// Blobs run to megabytes; print the size, not the contents.
impl fmt::Debug for StartupBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartupBlob")
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_accessors() {
        let blob = StartupBlob::from(vec![1, 2, 3]);
        assert_eq!(blob.len(), 3);
        assert!(!blob.is_empty());
        assert_eq!(blob.as_bytes(), &[1, 2, 3]);
        assert_eq!(&*blob.into_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_debug_omits_contents() {
        let blob = StartupBlob::new(vec![0xAB; 4096]);
        assert_eq!(format!("{blob:?}"), "StartupBlob { len: 4096 }");
    }
}
