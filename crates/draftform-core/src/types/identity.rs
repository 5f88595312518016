use rand_chacha::{
    ChaCha8Rng,
    rand_core::{RngCore, SeedableRng},
};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    sync::{LazyLock, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};

/// Crockford-style alphabet without the ambiguous 0/1/I/O glyphs.
const ID_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Random suffix length of a generated entity id.
const RANDOM_LEN: usize = 15;

///
/// GENERATOR is lazily initiated with a Mutex.
/// Ids need no cryptographic strength, only distinctness, so a fast
/// clock-seeded stream cipher RNG is enough.
///

static GENERATOR: LazyLock<Mutex<ChaCha8Rng>> = LazyLock::new(|| {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            elapsed
                .as_secs()
                .wrapping_mul(1_000_000_000)
                .wrapping_add(u64::from(elapsed.subsec_nanos()))
        });

    Mutex::new(ChaCha8Rng::seed_from_u64(seed))
});

///
/// EntityTag
///
/// The entity families a schema can describe. The tag fixes the prefix of
/// generated ids, e.g. `DOC_X7K9P2M5N3L8Q4R`.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum EntityTag {
    Appointment,
    Doctor,
    Patient,
}

impl EntityTag {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Appointment => "APP",
            Self::Doctor => "DOC",
            Self::Patient => "PAT",
        }
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Appointment => "appointment",
            Self::Doctor => "doctor",
            Self::Patient => "patient",
        };
        write!(f, "{label}")
    }
}

///
/// EntityId
///
/// Opaque record identifier. Loaded records keep whatever id shape the
/// backing store uses; freshly generated ids follow the
/// `{PREFIX}_{15 alphabet chars}` form.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id for `tag` using the global generator.
    #[must_use]
    pub fn generate(tag: EntityTag) -> Self {
        let mut rng = GENERATOR.lock().expect("identity generator mutex poisoned");

        let mut id = String::with_capacity(tag.prefix().len() + 1 + RANDOM_LEN);
        id.push_str(tag.prefix());
        id.push('_');
        for _ in 0..RANDOM_LEN {
            let index = usize::try_from(rng.next_u32() & 31).unwrap_or(0);
            id.push(char::from(ID_ALPHABET[index]));
        }

        Self(id)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_generated_shape() {
        let id = EntityId::generate(EntityTag::Doctor);

        let (prefix, suffix) = id.as_str().split_once('_').unwrap();
        assert_eq!(prefix, "DOC");
        assert_eq!(suffix.len(), RANDOM_LEN);
        assert!(suffix.bytes().all(|b| ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_prefix_per_tag() {
        assert!(
            EntityId::generate(EntityTag::Patient)
                .as_str()
                .starts_with("PAT_")
        );
        assert!(
            EntityId::generate(EntityTag::Appointment)
                .as_str()
                .starts_with("APP_")
        );
    }

    #[test]
    fn test_no_ambiguous_glyphs_in_suffix() {
        // the alphabet governs only the random part; prefixes like DOC
        // legitimately contain O
        for _ in 0..64 {
            let id = EntityId::generate(EntityTag::Doctor);
            let (_, suffix) = id.as_str().split_once('_').unwrap();
            assert!(!suffix.contains(['0', '1', 'I', 'O']));
        }
    }

    #[test]
    fn test_generated_ids_distinct() {
        let ids: BTreeSet<String> = (0..256)
            .map(|_| EntityId::generate(EntityTag::Patient).as_str().to_owned())
            .collect();

        assert_eq!(ids.len(), 256);
    }
}
