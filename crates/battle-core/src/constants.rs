//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz). One tick per animation frame.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Lanes ---

/// Number of stat lanes per side. Fixed.
pub const LANE_COUNT: usize = 5;

/// Apportionment weights per lane, in percent, in lane order
/// (scoring, rebounding, assists, steals, three-pointers).
pub const LANE_WEIGHTS_PERCENT: [u32; LANE_COUNT] = [60, 20, 10, 5, 5];

/// Maximum tokens a single lane may hold on one side.
pub const LANE_TOKEN_CAP: u32 = 10;

// --- Grid ---

/// Slots per lane per side. Must be >= LANE_TOKEN_CAP.
pub const SLOTS_PER_LANE: usize = 10;

/// Width of one token cell (pixels).
pub const CELL_WIDTH: f32 = 28.0;

/// Height of one lane row (pixels).
pub const CELL_HEIGHT: f32 = 40.0;

/// Width of the empty strip between the two token fields (pixels).
pub const NO_MANS_LAND_WIDTH: f32 = 220.0;

/// Width of each castle, measured from the outer edge (pixels).
pub const CASTLE_WIDTH: f32 = 120.0;

/// Vertical offset of the first lane row (pixels).
pub const GRID_TOP_MARGIN: f32 = 60.0;

// --- Allocation ---

/// Net units won per unit of defensive capacity.
pub const UNITS_PER_CAPACITY: f64 = 3.0;

// --- Castle ---

/// Castle HP per side. Independent of the unit record.
pub const CASTLE_MAX_HP: u32 = 20;

// --- Defense tokens ---

/// HP of a single defense token.
pub const TOKEN_CAPACITY: u8 = 3;

// --- Attacks ---

/// Damage dealt by one attack.
pub const ATTACK_DAMAGE: u32 = 1;

/// Default attack speed (grid cells per second).
pub const ATTACK_BASE_SPEED: f32 = 12.0;

/// Ticks between consecutive attacks spawned from one stat event.
pub const ATTACK_STAGGER_TICKS: u64 = 9;

/// Most attacks a single stat event may schedule.
pub const MAX_ATTACKS_PER_EVENT: u32 = 64;

// --- Roaming defender ---

/// Starting HP of a roaming defender.
pub const DEFENDER_MAX_HP: u32 = 20;

/// Minimum time between two deflects (milliseconds).
pub const DEFENDER_DEFLECT_COOLDOWN_MS: u64 = 1000;

/// Radius around the defender centre in which it intercepts attacks (pixels).
pub const DEFENDER_COLLISION_RADIUS: f32 = 18.0;

/// Distance of the defender patrol column from the inner edge of its token
/// field, towards the battlefield centre (pixels).
pub const DEFENDER_PATROL_OFFSET: f32 = 30.0;

/// Castle HP below which the defender enters defender mode.
pub const DEFENDER_MODE_CASTLE_THRESHOLD: u32 = 10;

/// One-time HP bonus granted on entering defender mode.
pub const DEFENDER_MODE_HP_BONUS: u32 = 10;

/// Window over which a lane threat decays to zero (milliseconds).
pub const THREAT_DECAY_WINDOW_MS: u64 = 2000;

// --- Observer ---

/// Collision records retained per battle.
pub const COLLISION_LOG_CAPACITY: usize = 256;

// --- Roster ---

/// Maximum modifiers a capper may equip.
pub const MAX_EQUIPPED_MODIFIERS: usize = 3;
