use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub identifier: String,
}

pub trait PersonProvider: Send + Sync {
    /// The person the current request acts for, if any.
    fn current_person(&self) -> Option<Person>;

    fn person_by_id(&self, identifier: &str) -> Option<Person>;
}

pub trait PhotoProvider: Send + Sync {
    /// Raw JPEG or PNG bytes, or `None` when the person has no photo.
    fn photo_data(&self, person: &Person) -> Option<Vec<u8>>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
