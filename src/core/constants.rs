// Save format
pub const SAVE_VERSION: &str = "1.0";

// Player starting state
pub const STARTING_HEALTH: i32 = 100;
pub const STARTING_SANITY: i32 = 100;
pub const STARTING_WILLPOWER: i32 = 100;
pub const STARTING_GOLD: i32 = 20;
pub const BASE_SPEED: i32 = 10;
pub const START_ZONE: &str = "ulthar";
pub const FINAL_ZONE: &str = "kadath";
pub const BASELINE_WEAPON: &str = "fists";
pub const BASELINE_ARMOR: &str = "unarmored";
pub const STARTING_ITEM: &str = "common_stone";
pub const MAP_FRAGMENT: &str = "map_fragment";
pub const LUNAR_SEALS: [&str; 3] = ["seal_of_zak", "seal_of_oriab", "seal_of_leng"];

// Resource bounds
pub const GOLD_MAX: i32 = 9999;
pub const REPUTATION_MIN: i32 = -100;
pub const REPUTATION_MAX: i32 = 100;
pub const INVENTORY_CAPACITY: usize = 15;
pub const MAX_ALLIES: usize = 2;

// XP and leveling: (level, experience needed to reach it)
pub const LEVEL_CAP: u32 = 10;
pub const XP_TABLE: [(u32, u32); 9] = [
    (2, 100),
    (3, 200),
    (4, 350),
    (5, 500),
    (6, 800),
    (7, 1200),
    (8, 1800),
    (9, 2600),
    (10, 3600),
];
pub const XP_UNREACHABLE: u32 = 9999;
pub const FIRST_VISIT_XP: u32 = 25;
pub const LEVEL_DAMAGE_PER_LEVEL: i32 = 2;
pub const UPGRADE_CHOICES: usize = 3;

// Disorder tiers
pub const DISORDER_SEVERE_THRESHOLD: i32 = 25;
pub const DISORDER_SEVERE_CAP: usize = 2;
pub const DISORDER_SEVERE_CHANCE: f64 = 0.30;
pub const DISORDER_MILD_THRESHOLD: i32 = 50;
pub const DISORDER_MILD_CAP: usize = 1;
pub const DISORDER_MILD_CHANCE: f64 = 0.15;
pub const DISORDER_RECOVERY_THRESHOLD: i32 = 75;
pub const DISORDER_RECOVERY_CHANCE: f64 = 0.20;
pub const PARANOIA_INCOMING_MULTIPLIER: f64 = 1.2;
pub const MEGALOMANIA_OUTGOING_MULTIPLIER: f64 = 1.3;
pub const CATATONIA_SKIP_CHANCE: f64 = 0.20;

// Combat
pub const ONEIRIC_AFFINITY: f64 = 1.2;
pub const COSMIC_AFFINITY: f64 = 1.5;
pub const DODGE_NEGATE_CHANCE: f64 = 0.60;
pub const FLEE_BASE_CHANCE: i32 = 40;
pub const FLEE_SANITY_PIVOT: i32 = 50;
pub const FLEE_MAX_CHANCE: i32 = 90;
pub const HORROR_DRAIN_CHANCE: f64 = 0.20;
pub const COSMIC_DRAIN_PER_TURN: i32 = 10;
pub const SPELL_WILLPOWER_COST: i32 = 20;
pub const SPELL_DAMAGE_MIN: i32 = 30;
pub const SPELL_DAMAGE_MAX: i32 = 50;
pub const SUMMON_WILLPOWER_COST: i32 = 30;
pub const SUMMONED_ALLY: &str = "dream_cat";

// Rituals
pub const OPEN_PORTAL_COST: i32 = 30;
pub const SEE_INVISIBLE_COST: i32 = 20;
pub const GREATER_RITUAL_COST: i32 = 40;
pub const ETHEREAL_FORM_TURNS: u32 = 3;
pub const NODENS_RITUAL_DAMAGE: i32 = 100;

// Exploration modifiers
pub const DAY_ENCOUNTER_MODIFIER: f64 = 0.7;
pub const NIGHT_ENCOUNTER_MODIFIER: f64 = 1.3;
pub const FULL_MOON_ENCOUNTER_MULTIPLIER: f64 = 1.5;
pub const SILENT_STEP_CHANCE: f64 = 0.30;
pub const BACKGROUND_DREAM_CHANCE: f64 = 0.08;
pub const ENTITY_ENCOUNTER_CHANCE: f64 = 0.02;
pub const TURNS_PER_DAY_PHASE: u64 = 20;
pub const TURNS_PER_LUNAR_PHASE: u64 = 50;

// Dreams
pub const FIRST_VISIT_DREAM_CHANCE: f64 = 0.20;
pub const REST_DREAM_CHANCE: f64 = 0.15;
pub const DREAM_CHANCE_FULL_MOON: f64 = 0.4;
pub const DREAM_CHANCE_NEW_MOON: f64 = 0.1;
pub const DREAM_CHANCE_OTHER: f64 = 0.2;
pub const LUCID_DREAM_MULTIPLIER: f64 = 1.5;
pub const COMPANION_DREAM_ALLY_CHANCE: f64 = 0.30;

// Rest
pub const MAX_RESTS_WITHOUT_INN: u32 = 2;
pub const REST_SANITY: i32 = 15;
pub const REST_WILLPOWER: i32 = 10;
pub const REST_HEALTH: i32 = 5;

// Death
pub const RESURRECTION_BASE_COST: i32 = 20;
pub const RESURRECTION_COST_PER_DEPTH: i32 = 5;
pub const RESURRECTION_RESTORE_FRACTION: f64 = 0.3;

// Achievements
pub const RICH_DREAMER_GOLD: i32 = 500;
pub const ORIAB_SERENITY_SANITY: i32 = 90;
pub const NATURALIST_BESTIARY: usize = 5;
pub const CARTOGRAPHER_FRAGMENTS: u32 = 3;
pub const SURVIVOR_TURNS: u64 = 100;

// Endings
pub const TRUE_ENDING_SANITY: i32 = 70;
pub const TRUE_ENDING_SEALS: u32 = 3;
pub const DREAMER_ENDING_SANITY: i32 = 50;

// New game plus
pub const NG_PLUS_GOLD: i32 = 50;

// Message log
pub const MESSAGE_LOG_CAPACITY: usize = 12;
