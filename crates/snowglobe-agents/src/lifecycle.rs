//! Life-stage transitions by years lived.
//!
//! People pass Baby, Kid, Teenager, Adult. Animals go from Baby straight to
//! Adult. Stages only ever advance.

use snowglobe_types::{LifeStage, Living};

use crate::config::Maturity;

/// Age at which `living` reaches `target`.
const fn threshold(living: &Living, target: LifeStage, maturity: &Maturity) -> u32 {
    if living.species.is_animal() {
        return maturity.animal_adult;
    }
    match target {
        LifeStage::Baby => 0,
        LifeStage::Kid => maturity.kid,
        LifeStage::Teenager => maturity.teenager,
        LifeStage::Adult => maturity.adult,
    }
}

/// Advance the life stage as far as the entity's age allows.
///
/// Returns the new stage when it changed, `None` otherwise. Calling this
/// again with the same age is a no-op.
pub fn grow(living: &mut Living, maturity: &Maturity) -> Option<LifeStage> {
    let start = living.stage;
    while let Some(target) = living.growth_target() {
        if living.age_years < threshold(living, target, maturity) {
            break;
        }
        living.stage = target;
    }
    (living.stage != start).then_some(living.stage)
}

#[cfg(test)]
mod tests {
    use snowglobe_types::{Gender, Species};

    use super::*;

    fn kid(age: u32) -> Living {
        Living::new("Pip".into(), Species::Person, Gender::Male, LifeStage::Kid, age)
    }

    #[test]
    fn kid_becomes_teenager_exactly_once() {
        let maturity = Maturity::default();
        let mut living = kid(13);
        assert_eq!(grow(&mut living, &maturity), Some(LifeStage::Teenager));
        assert_eq!(grow(&mut living, &maturity), None);
        assert_eq!(living.stage, LifeStage::Teenager);
    }

    #[test]
    fn young_kid_stays_kid() {
        let mut living = kid(12);
        assert_eq!(grow(&mut living, &Maturity::default()), None);
        assert_eq!(living.stage, LifeStage::Kid);
    }

    #[test]
    fn animals_skip_to_adult() {
        let mut pup = Living::new("Comet".into(), Species::Dog, Gender::Female, LifeStage::Baby, 1);
        assert_eq!(grow(&mut pup, &Maturity::default()), Some(LifeStage::Adult));
    }

    #[test]
    fn stage_never_regresses() {
        let mut adult = Living::new("Eve".into(), Species::Person, Gender::Female, LifeStage::Adult, 5);
        assert_eq!(grow(&mut adult, &Maturity::default()), None);
        assert_eq!(adult.stage, LifeStage::Adult);
    }

    #[test]
    fn restored_baby_catches_up() {
        let mut living = Living::new("Gus".into(), Species::Person, Gender::Male, LifeStage::Baby, 20);
        assert_eq!(grow(&mut living, &Maturity::default()), Some(LifeStage::Adult));
    }
}
