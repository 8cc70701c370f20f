use rand::distr::Alphanumeric;
use rand::Rng;
use std::fmt;

/// Which priming condition order the subject runs: group A is primed in
/// the first dilemma block, group B in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    A,
    B,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::A => write!(f, "A"),
            Group::B => write!(f, "B"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => write!(f, "f"),
            Gender::Male => write!(f, "m"),
        }
    }
}

/// A participating subject. Built from the intake dialog; an under-age
/// intake is a normal negative result, not an error, and leaves no trace
/// on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    id: String,
    group: Group,
    age: u32,
    gender: Gender,
}

impl Subject {
    pub const MINIMUM_AGE: u32 = 18;

    pub fn new(id: impl Into<String>, group: Group, age: u32, gender: Gender) -> Option<Self> {
        if age < Self::MINIMUM_AGE {
            return None;
        }
        Some(Self {
            id: id.into(),
            group,
            age,
            gender,
        })
    }

    /// An anonymous ten-character token used as the ledger file name.
    pub fn generate_id<R: Rng>(rng: &mut R) -> String {
        rng.sample_iter(&Alphanumeric)
            .take(10)
            .map(char::from)
            .collect()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn group(&self) -> Group {
        self.group
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn is_female(&self) -> bool {
        self.gender == Gender::Female
    }

    /// The intake fields stamped into every ledger row.
    pub fn info(&self) -> Vec<(String, String)> {
        vec![
            ("subject".to_string(), self.id.clone()),
            ("group".to_string(), self.group.to_string()),
            ("age".to_string(), self.age.to_string()),
            ("gender".to_string(), self.gender.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn under_age_intake_is_rejected_quietly() {
        assert!(Subject::new("x", Group::A, 17, Gender::Female).is_none());
        assert!(Subject::new("x", Group::A, 18, Gender::Female).is_some());
    }

    #[test]
    fn generated_ids_are_ten_alphanumeric_chars() {
        let mut rng = StdRng::seed_from_u64(5);
        let id = Subject::generate_id(&mut rng);
        assert_eq!(id.len(), 10);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn info_carries_the_intake_fields() {
        let subject = Subject::new("ABCDE12345", Group::B, 23, Gender::Male).unwrap();
        let info = subject.info();
        assert_eq!(info[0], ("subject".to_string(), "ABCDE12345".to_string()));
        assert_eq!(info[1], ("group".to_string(), "B".to_string()));
        assert_eq!(info[3], ("gender".to_string(), "m".to_string()));
    }
}
