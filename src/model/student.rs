use clap::ValueEnum;
use eyre::{Report, bail, ensure};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

pub const MAX_GPA: f64 = 10.0;
pub const MAX_SEMESTER: u32 = 8;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StudentId(pub u32);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, ValueEnum)]
pub enum Category {
    Sc,
    St,
    General,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Sc => "SC",
            Category::St => "ST",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sc" => Ok(Category::Sc),
            "st" => Ok(Category::St),
            "general" => Ok(Category::General),
            _ => bail!("unknown category: {}", s),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, ValueEnum)]
pub enum Residence {
    Hosteller,
    #[value(alias = "day-scholar")]
    Dayscholar,
}

impl Residence {
    pub fn label(self) -> &'static str {
        match self {
            Residence::Hosteller => "Hosteller",
            Residence::Dayscholar => "Day Scholar",
        }
    }
}

impl fmt::Display for Residence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Residence {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "hosteller" => Ok(Residence::Hosteller),
            "dayscholar" => Ok(Residence::Dayscholar),
            _ => bail!("unknown residence: {}", s),
        }
    }
}

/// Serialize an enum through its label and deserialize it through `FromStr`,
/// so every source accepts the same spellings.
macro_rules! labelled_serde {
    ($t:ty) => {
        impl Serialize for $t {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $t {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer)?
                    .parse()
                    .map_err(de::Error::custom)
            }
        }
    };
}

labelled_serde!(Category);
labelled_serde!(Residence);

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub category: Category,
    pub residence: Residence,
    pub gpa: f64,
    pub semester: u32,
}

impl Student {
    pub fn new(
        id: StudentId,
        name: impl Into<String>,
        category: Category,
        residence: Residence,
        gpa: f64,
        semester: u32,
    ) -> Student {
        Student {
            id,
            name: name.into(),
            category,
            residence,
            gpa,
            semester,
        }
    }

    /// Check the constraints a record must satisfy before it can be ranked.
    pub fn validate(&self) -> Result<(), Report> {
        ensure!(
            !self.name.trim().is_empty(),
            "student {} has an empty name",
            self.id
        );
        ensure!(
            (0.0..=MAX_GPA).contains(&self.gpa),
            "student {} has a GPA of {} outside of [0, {}]",
            self,
            self.gpa,
            MAX_GPA
        );
        ensure!(
            (1..=MAX_SEMESTER).contains(&self.semester),
            "student {} is in semester {} outside of [1, {}]",
            self,
            self.semester,
            MAX_SEMESTER
        );
        Ok(())
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}
