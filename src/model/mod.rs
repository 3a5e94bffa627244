pub use self::student::{Category, MAX_GPA, Residence, Student, StudentId};

mod student;
