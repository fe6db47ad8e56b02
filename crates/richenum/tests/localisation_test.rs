mod common;

use std::fs;

use common::{declare_enums, EmotionEnum, Fixture, SizeEnum};
use richenum::{sym, Catalog, EnumValue, Value};

const LOCALE: &str = r#"
en:
  richenum:
    emotion_enum:
      happy: "Localised Happy"
      angry: "Localised Angry"
"#;

#[test]
fn test_localisation() {
    let f = Fixture::new();
    let catalog = Catalog::from_yaml_str("en", LOCALE).unwrap();
    let record = f.create(sym("happy"), sym("big"));
    let emotion = f.emotion.get(&record).unwrap();
    assert_eq!(
        emotion.localized_label(&catalog).as_deref(),
        Some("Localised Happy")
    );
}

#[test]
fn test_localisation_key() {
    declare_enums();
    assert_eq!(
        EmotionEnum::new(sym("tired")).label_key().as_deref(),
        Some("richenum.emotion_enum.tired")
    );
}

#[test]
fn test_localisation_for_nil() {
    let f = Fixture::new();
    let catalog = Catalog::from_yaml_str("en", LOCALE).unwrap();
    let record = f.create(sym("happy"), Value::Null);
    assert!(f.size.get(&record).is_none());
    assert_eq!(SizeEnum::new(Value::Null).localized_label(&catalog), None);
}

#[test]
fn test_missing_translation_is_passed_through() {
    let catalog = Catalog::from_yaml_str("en", LOCALE).unwrap();
    assert_eq!(
        EmotionEnum::new(sym("tired")).localized_label(&catalog),
        Some("translation missing: en.richenum.emotion_enum.tired".to_string())
    );
}

#[test]
fn test_localisation_from_locale_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("en.yml");
    fs::write(&path, LOCALE).unwrap();

    let catalog = Catalog::from_path("en", &path).unwrap();
    assert_eq!(
        EmotionEnum::new(sym("angry")).localized_label(&catalog),
        Some("Localised Angry".to_string())
    );
}
