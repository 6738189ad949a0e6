//! Seeded sample records for tests

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::data::types::{Appointment, ApptStatus, Gender, HealthRecord, Pet};

const NAMES: &[&str] = &["Rex", "Bella", "Milo", "Luna", "Oscar", "Coco", "Max", "daisy"];
const SPECIES: &[&str] = &["dog", "cat", "rabbit", "parrot"];
const BREEDS: &[&str] = &["Beagle", "Siamese", "Lop", "Pug"];
const OFFSETS_SECS: &[i32] = &[0, 3600, 2 * 3600, -5 * 3600, 5 * 3600 + 1800];

fn maybe<T>(rng: &mut impl Rng, value: T) -> Option<T> {
    rng.gen_bool(0.75).then_some(value)
}

fn pick<T: Copy>(rng: &mut impl Rng, items: &[T]) -> T {
    match items.choose(rng) {
        Some(item) => *item,
        None => panic!("sample table is empty"),
    }
}

fn instant(rng: &mut impl Rng) -> DateTime<Utc> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    base + Duration::minutes(rng.gen_range(0..180 * 24 * 60))
}

pub fn pets(rng: &mut impl Rng, count: usize) -> Vec<Pet> {
    (0..count)
        .map(|_| {
            let name = pick(rng, NAMES).to_string();
            let species = pick(rng, SPECIES).to_string();
            let breed = pick(rng, BREEDS).to_string();
            let age = rng.gen_range(0..15);
            let gender = pick(rng, &[Gender::Male, Gender::Female]);
            let created_at = instant(rng);
            let photo_url = format!("https://img.example/{}.png", rng.r#gen::<u16>());
            Pet {
                id: None,
                owner_id: rng.gen_range(1..8),
                name,
                species: maybe(rng, species),
                breed: maybe(rng, breed),
                age: maybe(rng, age),
                gender: maybe(rng, gender),
                photo_url: maybe(rng, photo_url),
                created_at: maybe(rng, created_at),
            }
        })
        .collect()
}

pub fn appointments(rng: &mut impl Rng, count: usize) -> Vec<Appointment> {
    (0..count)
        .map(|_| {
            let offset = FixedOffset::east_opt(pick(rng, OFFSETS_SECS)).unwrap();
            let appt_time = instant(rng).with_timezone(&offset);
            let status = pick(rng, ApptStatus::ALL);
            let created_at = instant(rng);
            Appointment {
                id: None,
                pet_id: rng.gen_range(1..20),
                owner_id: rng.gen_range(1..8),
                vet_id: rng.gen_range(1..6),
                appt_time,
                status: maybe(rng, status),
                created_at: maybe(rng, created_at),
            }
        })
        .collect()
}

pub fn health_records(rng: &mut impl Rng, count: usize) -> Vec<HealthRecord> {
    (0..count)
        .map(|_| {
            let diagnosis = pick(rng, &["otitis", "gingivitis", "healthy"]).to_string();
            let treatment = pick(rng, &["drops", "cleaning", "none"]).to_string();
            let created_at = instant(rng);
            HealthRecord {
                id: None,
                pet_id: rng.gen_range(1..20),
                vet_id: rng.gen_range(1..6),
                appt_id: rng.gen_range(1..40),
                diagnosis: maybe(rng, diagnosis),
                treatment: maybe(rng, treatment),
                notes: maybe(rng, "follow up in two weeks".to_string()),
                created_at: maybe(rng, created_at),
            }
        })
        .collect()
}
