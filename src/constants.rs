// Normalized units: the central body has radius 1, time is in seconds.
pub const GM: f64 = 0.137; // Gravitational parameter (normalized)
pub const BODY_RADIUS: f64 = 1.0;
pub const ESCAPE_RADIUS: f64 = 50.0;
pub const RADIAL_DAMPING: f64 = 0.1; // Empirical scale on radial acceleration
pub const RADIAL_FALL_SPEED: f64 = 0.1; // Fall rate with no angular momentum (units/s)
pub const ALTITUDE_SCALE_KM: f64 = 200.0; // km per unit of radius above the surface

// Demo constellation
pub const DEMO_BASE_SPEED: f64 = 0.1; // U component of every demo satellite (rad/s)
pub const DEMO_ALTITUDES_KM: [f64; 5] = [120.0, 150.0, 180.0, 210.0, 240.0];
pub const DEFAULT_PRESET_ALTITUDE_KM: f64 = 200.0;

// Numerical guards
pub const ECCENTRICITY_EPSILON: f64 = 1e-6;
pub const ANGULAR_MOMENTUM_EPSILON: f64 = 1e-12;
pub const MIN_ANGULAR_RATE: f64 = 1e-6;

// Scheduling
pub const CROSSINGS_PER_SATELLITE: usize = 4;
pub const INTERVAL_COUNT: usize = 3;
pub const DEDUP_TOLERANCE_MS: i64 = 1_000;
pub const PADDING_MS: i64 = 3_600_000;

// Rendering
pub const TRAJECTORY_STEP: f64 = 0.01; // rad
pub const MAIN_EARTH_RADIUS_PX: f64 = 300.0;
pub const AUX_EARTH_RADIUS_PX: f64 = 100.0;
pub const MARKER_RADIUS_PX: f64 = 5.0;
pub const TEXTURE_LONGITUDE_OFFSET: f64 = 0.5 - 0.075; // Aligns the day map with the prime meridian

// Math
pub const PI: f64 = std::f64::consts::PI;
pub const TWO_PI: f64 = 2.0 * PI;
