/// Game tuning parameters. Distances are field units, speeds are units per tick.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Field
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_MARGIN: f32 = 50.0; // gap between field edge and paddle
    pub const HUMAN_PADDLE_SPEED: f32 = 7.0;
    pub const AI_DEAD_ZONE: f32 = 5.0;

    // Ball
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED_MAX: f32 = 12.0;
    pub const BALL_SPEED_GROWTH: f32 = 1.05; // Multiply speed on paddle hit
    pub const BALL_MIN_HORIZONTAL_SPEED: f32 = 2.0;
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

    // Penetration correction
    pub const WALL_SNAP: f32 = 1.0;
    pub const PADDLE_SNAP: f32 = 2.0;

    // Match
    pub const POINTS_TO_WIN: u32 = 3;
    pub const MATCH_DURATION_MS: u64 = 120_000;
    pub const COUNTDOWN_STEP_MS: u64 = 900;
    pub const COUNTDOWN_GO_MS: u64 = 500;

    // Loop
    pub const TICKS_PER_SECOND: u32 = 60;
    pub const TICK_MS: u64 = 16;
}
