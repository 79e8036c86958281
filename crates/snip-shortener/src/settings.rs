use typed_builder::TypedBuilder;

/// Probes tried by [`CollisionPolicy::disambiguate`] after the base code.
pub const DEFAULT_MAX_PROBES: u32 = 16;

/// What `shorten` does when the encoded code is taken by a different URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Return the existing code. Both URLs share it and it resolves to
    /// whichever was stored first.
    #[default]
    Accept,
    /// Try `code-1`, `code-2`, … up to `max_probes` and use the first free
    /// slot. The probe order is fixed, so a URL always lands on the same
    /// slot on resubmission.
    Disambiguate { max_probes: u32 },
}

impl CollisionPolicy {
    pub fn disambiguate() -> Self {
        Self::Disambiguate {
            max_probes: DEFAULT_MAX_PROBES,
        }
    }
}

/// What `shorten` does when the durable log rejects an append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurabilityPolicy {
    /// Keep the record in the index as volatile and hand out its code anyway.
    /// The record is lost on restart.
    #[default]
    BestEffort,
    /// Fail with `Persistence` and leave the index untouched, so every
    /// indexed record is in the log.
    Strict,
}

/// Configures a [`ShortenerService`](crate::ShortenerService).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, TypedBuilder)]
pub struct ServiceSettings {
    #[builder(default)]
    pub collision: CollisionPolicy,
    #[builder(default)]
    pub durability: DurabilityPolicy,
}
