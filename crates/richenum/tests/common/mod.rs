#![allow(dead_code)]

use std::sync::{Arc, Once};

use richenum::host::memory::{MemoryModel, MemoryRecord};
use richenum::{enum_value, Declaration, EnumAttribute, EnumOptions, EnumValue, Value};

enum_value! {
    /// Integer-backed, bound without a prefix.
    pub struct EmotionEnum => "emotion_enum";
}

impl EmotionEnum {
    pub fn emoji(&self) -> Option<&'static str> {
        match self.value()?.as_str() {
            "confused" => Some("🤔"),
            "happy" => Some("😁"),
            "angry" => Some("😡"),
            "tired" => Some("😴"),
            _ => None,
        }
    }
}

enum_value! {
    /// Integer-backed, bound with the attribute name as prefix.
    pub struct SizeEnum => "size_enum";
}

impl SizeEnum {
    pub fn height_ft(&self) -> Option<u32> {
        match self.value()?.as_str() {
            "big" => Some(8),
            "small" => Some(5),
            _ => None,
        }
    }
}

enum_value! {
    /// String-backed, declared as a list of names.
    pub struct MoodEnum => "mood_enum";
}

static DECLARE: Once = Once::new();

pub fn declare_enums() {
    DECLARE.call_once(|| {
        EmotionEnum::declare_values(Declaration::mapping([
            ("confused", 0),
            ("happy", 1),
            ("angry", 2),
            ("tired", 3),
        ]))
        .unwrap();
        SizeEnum::declare_values(Declaration::mapping([("big", 0), ("small", 1)])).unwrap();
        MoodEnum::declare_values(Declaration::names(["calm", "restless"])).unwrap();
    });
}

pub struct Fixture {
    pub model: Arc<MemoryModel>,
    pub emotion: EnumAttribute<EmotionEnum>,
    pub size: EnumAttribute<SizeEnum>,
    pub mood: EnumAttribute<MoodEnum>,
}

impl Fixture {
    pub fn new() -> Self {
        declare_enums();
        let mut model = MemoryModel::new("test_models")
            .with_column("emotion")
            .with_column("size")
            .with_column("mood");

        let emotion =
            EnumAttribute::<EmotionEnum>::bind(&mut model, "emotion", EnumOptions::new()).unwrap();
        let size =
            EnumAttribute::<SizeEnum>::bind(&mut model, "size", EnumOptions::new().prefixed())
                .unwrap();
        let mood =
            EnumAttribute::<MoodEnum>::bind(&mut model, "mood", EnumOptions::new().suffixed())
                .unwrap();

        model.validates(emotion.validator());
        model.validates(size.validator().allow_nil(true));

        Self {
            model: Arc::new(model),
            emotion,
            size,
            mood,
        }
    }

    pub fn record(&self) -> MemoryRecord {
        MemoryRecord::new(&self.model)
    }

    /// A record with `emotion` and `size` set through the enum setters.
    pub fn create(&self, emotion: impl Into<Value>, size: impl Into<Value>) -> MemoryRecord {
        let mut record = self.record();
        self.emotion.set(&mut record, emotion).unwrap();
        self.size.set(&mut record, size).unwrap();
        record
    }
}
