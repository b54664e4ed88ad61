use serde::{Deserialize, Serialize};

/// A registered participant. Ids are assigned sequentially and never reused
/// while the person is still in the registry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub id: u64,
    pub name: String,
}

impl Person {
    /// Id for the next person appended after `people`.
    pub fn next_id(people: &[Person]) -> u64 {
        people.last().map(|p| p.id + 1).unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_follows_last_person() {
        assert_eq!(Person::next_id(&[]), 1);
        let people = vec![
            Person { id: 1, name: "Ana".to_string() },
            Person { id: 4, name: "Ben".to_string() },
        ];
        assert_eq!(Person::next_id(&people), 5);
    }
}
