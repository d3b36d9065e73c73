//! Random display names for villagers and their animals.

use rand::Rng;
use rand::seq::IndexedRandom;
use snowglobe_types::{Gender, Species};

const FEMALE_NAMES: &[&str] = &[
    "Holly", "Ivy", "Noelle", "Carol", "Joy", "Stella", "Gloria", "Hazel", "Belle", "Clara",
    "Merry", "Eve", "Ruby", "Winter", "Faith",
];

const MALE_NAMES: &[&str] = &[
    "Nicholas", "Jack", "Gabriel", "Rudy", "Jasper", "Felix", "Oliver", "Casper", "Frost",
    "Gus", "Emmett", "Kris", "Hugo", "Leo", "Silas",
];

const DOG_NAMES: &[&str] = &["Biscuit", "Comet", "Pudding", "Scout", "Maple"];
const CAT_NAMES: &[&str] = &["Mittens", "Pepper", "Tinsel", "Whiskers", "Sugar"];
const BIRD_NAMES: &[&str] = &["Robin", "Tweety", "Pip", "Sky", "Berry"];
const RABBIT_NAMES: &[&str] = &["Snowball", "Clover", "Thumper", "Cotton", "Nibbles"];
const SQUIRREL_NAMES: &[&str] = &["Acorn", "Nutmeg", "Hazelnut", "Chip", "Pinecone"];

/// Pick a random display name fitting the species and gender.
pub fn random_name<R: Rng + ?Sized>(species: Species, gender: Gender, rng: &mut R) -> String {
    let pool = match (species, gender) {
        (Species::Person, Gender::Female) => FEMALE_NAMES,
        (Species::Person, Gender::Male) => MALE_NAMES,
        (Species::Dog, _) => DOG_NAMES,
        (Species::Cat, _) => CAT_NAMES,
        (Species::Bird, _) => BIRD_NAMES,
        (Species::Rabbit, _) => RABBIT_NAMES,
        (Species::Squirrel, _) => SQUIRREL_NAMES,
    };
    pool.choose(rng).map_or_else(|| String::from("Villager"), |n| (*n).to_owned())
}

/// Pick a random gender.
pub fn random_gender<R: Rng + ?Sized>(rng: &mut R) -> Gender {
    if rng.random_bool(0.5) {
        Gender::Female
    } else {
        Gender::Male
    }
}
