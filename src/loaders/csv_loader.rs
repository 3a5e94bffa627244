use crate::model::{Student, StudentId};
use eyre::{Error, WrapErr};
use std::io;
use std::path::PathBuf;
use tracing::trace;

/// Roster stored in a CSV file with an `id,name,category,residence,gpa,semester`
/// header. The file is read again on every call.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load_students(&self) -> Result<Vec<Student>, Error> {
        let reader = csv::Reader::from_path(&self.path)
            .wrap_err_with(|| format!("cannot open {}", self.path.display()))?;
        let students = parse_students(reader)
            .wrap_err_with(|| format!("cannot load students from {}", self.path.display()))?;
        trace!(students = students.len(), path = %self.path.display(), "roster loaded from file");
        Ok(students)
    }

    pub fn load_student(&self, id: StudentId) -> Result<Option<Student>, Error> {
        Ok(self.load_students()?.into_iter().find(|s| s.id == id))
    }
}

pub fn parse_students<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Student>, Error> {
    reader
        .deserialize()
        .enumerate()
        .map(|(n, record)| record.wrap_err_with(|| format!("invalid record {}", n + 1)))
        .collect()
}
