//! SQLite schema definitions
//!
//! Timestamps are stored as INTEGER microseconds since the Unix epoch. Enum
//! columns hold upper-case member names.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Pets
-- =============================================================================
CREATE TABLE IF NOT EXISTS pets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    species TEXT,
    breed TEXT,
    age INTEGER,
    gender TEXT CHECK(gender IS NULL OR gender IN ('MALE', 'FEMALE')),
    photo_url TEXT,
    created_at INTEGER
);

CREATE INDEX IF NOT EXISTS idx_pets_owner ON pets(owner_id);
CREATE INDEX IF NOT EXISTS idx_pets_name ON pets(name);

-- =============================================================================
-- 2. Appointments
-- =============================================================================
CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL,
    owner_id INTEGER NOT NULL,
    vet_id INTEGER NOT NULL,
    appt_time INTEGER NOT NULL,
    appt_time_offset INTEGER NOT NULL DEFAULT 0,
    status TEXT CHECK(status IS NULL OR status IN ('PENDING', 'CONFIRMED', 'CANCELLED', 'DONE')),
    created_at INTEGER
);

CREATE INDEX IF NOT EXISTS idx_appointments_pet ON appointments(pet_id);
CREATE INDEX IF NOT EXISTS idx_appointments_vet_time ON appointments(vet_id, appt_time);

-- =============================================================================
-- 3. Health Records
-- =============================================================================
CREATE TABLE IF NOT EXISTS health_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL,
    vet_id INTEGER NOT NULL,
    appt_id INTEGER NOT NULL,
    diagnosis TEXT,
    treatment TEXT,
    notes TEXT,
    created_at INTEGER
);

CREATE INDEX IF NOT EXISTS idx_health_records_pet ON health_records(pet_id);
CREATE INDEX IF NOT EXISTS idx_health_records_appt ON health_records(appt_id);
"#;
