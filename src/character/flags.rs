//! Story flags.

/// Story toggles set by quests, dreams and encounters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StoryFlag {
    CatsAllied,
    CatsHostile,
    SafeRoute,
    /// Holds until the first enemy is slain.
    Pacifist,
    NodensBlessed,
    NyarlathotepSeen,
    /// An outer entity has been met this run; no more chance meetings.
    VeilTorn,
    LucidDreaming,
}

impl StoryFlag {
    pub const ALL: [StoryFlag; 8] = [
        StoryFlag::CatsAllied,
        StoryFlag::CatsHostile,
        StoryFlag::SafeRoute,
        StoryFlag::Pacifist,
        StoryFlag::NodensBlessed,
        StoryFlag::NyarlathotepSeen,
        StoryFlag::VeilTorn,
        StoryFlag::LucidDreaming,
    ];

    /// Flags set on a fresh character.
    pub const INITIAL: [StoryFlag; 1] = [StoryFlag::Pacifist];

    pub fn id(&self) -> &'static str {
        match self {
            StoryFlag::CatsAllied => "cats_allied",
            StoryFlag::CatsHostile => "cats_hostile",
            StoryFlag::SafeRoute => "safe_route",
            StoryFlag::Pacifist => "pacifist",
            StoryFlag::NodensBlessed => "nodens_blessed",
            StoryFlag::NyarlathotepSeen => "nyarlathotep_seen",
            StoryFlag::VeilTorn => "veil_torn",
            StoryFlag::LucidDreaming => "lucid_dreaming",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }
}
