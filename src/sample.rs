//! Sample Data
//!
//! Fills a KeySwitch with plausible demo values.

use crate::model::KeySwitch;
use uuid::Uuid;

const TONES: &[&str] = &[
    "Quiet", "Silent", "Bold", "Mellow", "Crisp", "Smooth", "Muted", "Bright", "Deep", "Soft",
];

const ANIMALS: &[&str] = &[
    "Panda", "Otter", "Falcon", "Lynx", "Heron", "Badger", "Gecko", "Marten", "Ibex", "Koala",
];

const COMPANIES: &[&str] = &[
    "Cherry", "Gateron", "Kailh", "Akko", "Outemu", "JWK", "TTC", "Durock", "Zeal", "NovelKeys",
];

pub const SAMPLE_TYPE: &str = "Linear Switch";
pub const SAMPLE_FORCE: &str = "55ug";
pub const SAMPLE_TRAVEL: &str = "2.2mm";

/// Overwrite every editable field; `id` is left alone.
pub fn generate(ks: &mut KeySwitch) {
    let mut entropy = Uuid::new_v4().as_u128();
    let mut pick = |list: &[&'static str]| -> &'static str {
        let idx = (entropy % list.len() as u128) as usize;
        entropy /= list.len() as u128;
        list[idx]
    };

    let tone = pick(TONES);
    let animal = pick(ANIMALS);
    let company = pick(COMPANIES);

    ks.name = format!("{} {}", tone, animal);
    ks.switch_type = SAMPLE_TYPE.to_string();
    ks.manufacturer = company.to_string();
    ks.actuation_force = SAMPLE_FORCE.to_string();
    ks.travel = SAMPLE_TRAVEL.to_string();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_fills_fields() {
        let mut ks = KeySwitch::pending();
        generate(&mut ks);

        let (tone, animal) = ks.name.split_once(' ').unwrap();
        assert!(TONES.contains(&tone));
        assert!(ANIMALS.contains(&animal));
        assert!(COMPANIES.contains(&ks.manufacturer.as_str()));
        assert_eq!(ks.switch_type, SAMPLE_TYPE);
        assert_eq!(ks.actuation_force, SAMPLE_FORCE);
        assert_eq!(ks.travel, SAMPLE_TRAVEL);
    }

    #[test]
    fn test_generate_keeps_id() {
        let mut ks = KeySwitch::pending().with_id("-Nkeep");
        generate(&mut ks);
        assert_eq!(ks.id.as_deref(), Some("-Nkeep"));
    }
}
